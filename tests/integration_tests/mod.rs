pub mod cli_config;
pub mod cli_helpers;
pub mod cli_quiet;
pub mod cli_resources;
pub mod redirect_threads;
