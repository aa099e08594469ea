pub mod analytics;
pub mod api;
pub mod cli;
pub mod config;
pub mod date_provider;
pub mod error;
pub mod model;
pub mod report;
pub mod temporal;
pub mod time_format;
