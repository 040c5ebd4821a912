pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod session;
pub mod source;
