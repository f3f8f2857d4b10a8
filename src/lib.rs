pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

pub use adapters::{http::HttpFetcher, storage::LocalStorage};
pub use config::AppConfig;
pub use core::{etl::ReportEngine, pipeline::CatchPipeline};
pub use utils::error::{CatchError, Result};
