pub mod album;
pub mod artist;
pub mod artist_location;
pub mod location;
pub mod record;
pub mod schema;
pub mod song;
pub mod stage;
pub mod staging;
pub mod store;
pub mod value;
