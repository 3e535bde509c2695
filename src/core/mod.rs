pub mod client;
pub mod csv_pipeline;
pub mod engine;
pub mod json_pipeline;
pub mod mapper;

pub use crate::domain::model::{ExportDocument, OrderRow, OrderSummary, Page, Property};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
