use domain::album::Album;
use domain::artist::Artist;
use domain::artist_location::ArtistLocation;
use domain::location::Location;
use domain::song::Song;
use domain::staging::{AlbumKey, Coordinates, StagedSong, TrackFeatures};
use sea_orm::FromQueryResult;

/// Column names shared by the DDL and the queries.
pub mod col {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const LOCATION: &str = "location";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const TITLE: &str = "title";
    pub const YEAR: &str = "year";
    pub const DANCEABILITY: &str = "danceability";
    pub const DURATION: &str = "duration";
    pub const END_OF_FADE_IN: &str = "end_of_fade_in";
    pub const START_OF_FADE_OUT: &str = "start_of_fade_out";
    pub const LOUDNESS: &str = "loudness";
    pub const BPM: &str = "bpm";
    pub const ALBUM_NAME: &str = "album_name";
    pub const ARTIST_NAME: &str = "artist_name";
    pub const ARTIST_ID: &str = "artist_id";
    pub const LOCATION_ID: &str = "location_id";
    pub const ALBUM_ID: &str = "album_id";

    /// Numeric song columns in the order of [`domain::staging::TrackFeatures`].
    pub const FEATURES: [&str; 7] = [
        YEAR,
        DANCEABILITY,
        DURATION,
        END_OF_FADE_IN,
        START_OF_FADE_OUT,
        LOUDNESS,
        BPM,
    ];
}

#[derive(Debug, FromQueryResult)]
pub struct CoordinatesRow {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<CoordinatesRow> for Coordinates {
    fn from(row: CoordinatesRow) -> Self {
        Coordinates {
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub struct AlbumKeyRow {
    pub album_name: Option<String>,
    pub artist_name: Option<String>,
}

impl From<AlbumKeyRow> for AlbumKey {
    fn from(row: AlbumKeyRow) -> Self {
        AlbumKey {
            title: row.album_name,
            artist_name: row.artist_name,
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub struct StagedSongRow {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub danceability: Option<f64>,
    pub duration: Option<f64>,
    pub end_of_fade_in: Option<f64>,
    pub start_of_fade_out: Option<f64>,
    pub loudness: Option<f64>,
    pub bpm: Option<f64>,
    pub album_name: Option<String>,
    pub artist_name: Option<String>,
}

impl From<StagedSongRow> for StagedSong {
    fn from(row: StagedSongRow) -> Self {
        StagedSong {
            title: row.title,
            features: TrackFeatures {
                year: row.year,
                danceability: row.danceability,
                duration: row.duration,
                end_of_fade_in: row.end_of_fade_in,
                start_of_fade_out: row.start_of_fade_out,
                loudness: row.loudness,
                bpm: row.bpm,
            },
            album_name: row.album_name,
            artist_name: row.artist_name,
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub struct ArtistRow {
    pub id: i32,
    pub name: String,
}

impl From<ArtistRow> for Artist {
    fn from(row: ArtistRow) -> Self {
        Artist {
            id: row.id.into(),
            name: row.name,
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub struct LocationRow {
    pub id: i32,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        Location {
            id: row.id.into(),
            name: row.name,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub struct ArtistLocationRow {
    pub id: i32,
    pub artist_id: i32,
    pub location_id: i32,
}

impl From<ArtistLocationRow> for ArtistLocation {
    fn from(row: ArtistLocationRow) -> Self {
        ArtistLocation {
            id: row.id.into(),
            artist_id: row.artist_id.into(),
            location_id: row.location_id.into(),
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub struct AlbumRow {
    pub id: i32,
    pub title: String,
    pub artist_id: i32,
}

impl From<AlbumRow> for Album {
    fn from(row: AlbumRow) -> Self {
        Album {
            id: row.id.into(),
            title: row.title,
            artist_id: row.artist_id.into(),
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub struct SongRow {
    pub id: i32,
    pub title: Option<String>,
    pub year: Option<i32>,
    pub danceability: Option<f64>,
    pub duration: Option<f64>,
    pub end_of_fade_in: Option<f64>,
    pub start_of_fade_out: Option<f64>,
    pub loudness: Option<f64>,
    pub bpm: Option<f64>,
    pub album_id: Option<i32>,
    pub artist_id: Option<i32>,
}

impl From<SongRow> for Song {
    fn from(row: SongRow) -> Self {
        Song {
            id: row.id.into(),
            title: row.title,
            features: TrackFeatures {
                year: row.year,
                danceability: row.danceability,
                duration: row.duration,
                end_of_fade_in: row.end_of_fade_in,
                start_of_fade_out: row.start_of_fade_out,
                loudness: row.loudness,
                bpm: row.bpm,
            },
            album_id: row.album_id.map(Into::into),
            artist_id: row.artist_id.map(Into::into),
        }
    }
}

/// Values of the numeric song columns, matching [`col::FEATURES`].
pub fn feature_values(features: &TrackFeatures) -> [sea_orm::Value; 7] {
    [
        features.year.into(),
        features.danceability.into(),
        features.duration.into(),
        features.end_of_fade_in.into(),
        features.start_of_fade_out.into(),
        features.loudness.into(),
        features.bpm.into(),
    ]
}
