pub mod store;
pub use store::{InMemorySession, InMemoryStore};
