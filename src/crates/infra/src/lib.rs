pub mod repository;

pub mod source;
pub use source::{JsonRecordReader, LocalSourceCatalog};

pub mod config;
pub use config::{AppConfigImpl, PipelineConfig};

pub mod schema;
