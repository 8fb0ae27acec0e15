pub mod arbitrage;
pub mod config;
pub mod exchange;
pub mod scanner;
pub mod types;

pub use config::Config;
pub use types::*;
