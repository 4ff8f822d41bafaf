pub mod classifier;
pub mod config;
pub mod consts;
pub mod report;
pub mod server;
