pub mod command;
pub mod error;
pub mod pipeline;
pub mod resolve;
