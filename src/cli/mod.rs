//! CLI module - Command-line interface for `OpenDoors`
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

use crate::domain::UserType;

/// `OpenDoors` - door distribution ledger
#[derive(Parser)]
#[command(name = "opendoors")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Manage user profiles
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Manage organizations
    Org {
        #[command(subcommand)]
        command: OrgCommands,
    },

    /// Add doors to a user's balance (admins only)
    Grant {
        /// Admin performing the grant
        #[arg(long)]
        admin: i32,
        /// Receiving user
        user: i32,
        /// Number of doors
        doors: i32,
    },

    /// Send doors from a distributor to a user
    Send {
        /// Distributor ID
        #[arg(long)]
        from: i32,
        /// Recipient ID
        #[arg(long)]
        to: i32,
        /// Number of doors
        doors: i32,
        /// Reason shown to the recipient
        #[arg(required = true)]
        reason: Vec<String>,
    },

    /// Show distribution history
    #[command(alias = "h")]
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },

    /// List an organization's distributors with totals
    Distributors {
        /// Organization ID
        organization: i32,
    },

    /// Spend one door on a game play
    Play {
        /// User ID
        user: i32,
        /// Prize the play was for
        #[arg(long)]
        prize: Option<i32>,
        /// Whether the play won the prize
        #[arg(long)]
        win: bool,
    },

    /// Show a user's recent game plays
    Plays {
        /// User ID
        user: i32,
    },

    /// Show a user's play and reward counts
    Stats {
        /// User ID
        user: i32,
    },

    /// Manage prizes
    Prize {
        #[command(subcommand)]
        command: PrizeCommands,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a profile
    Add {
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        /// user, distributor or admin
        #[arg(long, default_value = "user")]
        user_type: UserType,
        /// Starting door balance
        #[arg(long, default_value = "0")]
        doors: i32,
    },
    /// Show a profile
    Show {
        /// User ID
        id: i32,
    },
}

#[derive(Subcommand)]
pub enum OrgCommands {
    /// Create an organization
    Add {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Make a user a distributor of an organization
    AddDistributor {
        /// Organization ID
        organization: i32,
        /// User ID
        user: i32,
    },
}

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// Doors sent by a distributor
    Distributor { id: i32 },
    /// Doors received by a user
    Received { id: i32 },
    /// Every distribution in an organization
    #[command(alias = "org")]
    Organization { id: i32 },
}

#[derive(Subcommand)]
pub enum PrizeCommands {
    /// Create a prize
    Add {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
}

pub use commands::*;
