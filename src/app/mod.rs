pub mod cli;
pub mod config;
pub mod interrupt;
pub mod logging;
