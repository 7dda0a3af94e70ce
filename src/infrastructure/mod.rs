// Infrastructure layer - configuration loading and logging adapters
pub mod config;
pub mod log_observer;
