pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod retry;
pub mod services;
pub mod state;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, HistoryCommands, OrgCommands, PrizeCommands, UserCommands};
pub use config::Config;
pub use state::AppState;

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.observability.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;

    init_tracing(&config);

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    if matches!(command, Commands::Init) {
        if Config::create_default_if_missing()? {
            println!("✓ Created config.toml");
        } else {
            println!("config.toml already exists");
        }
        return Ok(());
    }

    config.validate()?;
    let state = AppState::new(config).await?;
    info!("OpenDoors ready");

    match command {
        Commands::Init => Ok(()),

        Commands::User { command } => match command {
            UserCommands::Add {
                email,
                first_name,
                last_name,
                user_type,
                doors,
            } => cli::cmd_user_add(&state, email, first_name, last_name, user_type, doors).await,
            UserCommands::Show { id } => cli::cmd_user_show(&state, id).await,
        },

        Commands::Org { command } => match command {
            OrgCommands::Add { name, description } => {
                cli::cmd_org_add(&state, &name, description.as_deref()).await
            }
            OrgCommands::AddDistributor { organization, user } => {
                cli::cmd_org_add_distributor(&state, organization, user).await
            }
        },

        Commands::Grant { admin, user, doors } => cli::cmd_grant(&state, admin, user, doors).await,

        Commands::Send {
            from,
            to,
            doors,
            reason,
        } => cli::cmd_send(&state, from, to, doors, &reason.join(" ")).await,

        Commands::History { command } => match command {
            HistoryCommands::Distributor { id } => cli::cmd_history_distributor(&state, id).await,
            HistoryCommands::Received { id } => cli::cmd_history_received(&state, id).await,
            HistoryCommands::Organization { id } => {
                cli::cmd_history_organization(&state, id).await
            }
        },

        Commands::Distributors { organization } => {
            cli::cmd_distributors(&state, organization).await
        }

        Commands::Play { user, prize, win } => cli::cmd_play(&state, user, prize, win).await,

        Commands::Plays { user } => cli::cmd_plays(&state, user).await,

        Commands::Stats { user } => cli::cmd_stats(&state, user).await,

        Commands::Prize { command } => match command {
            PrizeCommands::Add {
                name,
                description,
                image_url,
            } => {
                cli::cmd_prize_add(&state, &name, description.as_deref(), image_url.as_deref())
                    .await
            }
        },
    }
}
