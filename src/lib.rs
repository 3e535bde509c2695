pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliArgs, ExportConfig};
pub use core::{
    client::NotionClient, csv_pipeline::CsvExportPipeline, engine::ExportEngine,
    json_pipeline::JsonExportPipeline,
};
pub use utils::error::{ExportError, Result};
