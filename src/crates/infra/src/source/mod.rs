pub mod catalog;
pub use catalog::LocalSourceCatalog;

pub mod json_reader;
pub use json_reader::JsonRecordReader;
