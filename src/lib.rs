pub mod apis;
pub mod arguments;
pub mod checkpoint;
pub mod classifier;
pub mod config;
pub mod discovery;
pub mod errors; // Provider and run error types
pub mod logger;
pub mod output;
pub mod paths;
pub mod pipeline;
pub mod retry;
pub mod run;
pub mod shutdown;
pub mod summary;
pub mod types;
pub mod volume;
