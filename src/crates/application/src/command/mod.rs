pub mod album;
pub mod artist;
pub mod artist_location;
pub mod location;
pub mod song;
pub mod stage_records;
