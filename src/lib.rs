pub mod config;
pub mod constants;
pub mod error;
pub mod gateway;
pub mod locator;
pub mod logging;
pub mod parser;
pub mod processor;
pub mod types;
