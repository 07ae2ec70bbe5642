pub mod distribution;
pub mod game;
pub mod organization;
pub mod profile;
pub mod reward;
