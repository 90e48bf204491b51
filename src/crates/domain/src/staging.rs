use crate::record::{FlatRecord, RecordError};
use crate::store::StoreError;
use async_trait::async_trait;

/// Field names used by the song dataset files.
pub mod fields {
    pub const ARTIST_NAME: &str = "artist_name";
    pub const ARTIST_LOCATION: &str = "artist_location";
    pub const ARTIST_LATITUDE: &str = "artist_latitude";
    pub const ARTIST_LONGITUDE: &str = "artist_longitude";
    pub const TITLE: &str = "title";
    pub const YEAR: &str = "year";
    pub const DANCEABILITY: &str = "danceability";
    pub const DURATION: &str = "duration";
    pub const END_OF_FADE_IN: &str = "end_of_fade_in";
    pub const START_OF_FADE_OUT: &str = "start_of_fade_out";
    pub const LOUDNESS: &str = "loudness";
    pub const TEMPO: &str = "tempo";
    pub const RELEASE: &str = "release";
}

/// 暂存的艺术家行，每个源文件一行，不去重
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagedArtist {
    pub name: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl StagedArtist {
    pub fn from_record(record: &FlatRecord) -> Result<Self, RecordError> {
        Ok(Self {
            name: record.text(fields::ARTIST_NAME)?,
            location: record.text(fields::ARTIST_LOCATION)?,
            latitude: record.float(fields::ARTIST_LATITUDE)?,
            longitude: record.float(fields::ARTIST_LONGITUDE)?,
        })
    }
}

/// Numeric song attributes carried unchanged from staging into the fact table.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackFeatures {
    pub year: Option<i32>,
    pub danceability: Option<f64>,
    pub duration: Option<f64>,
    pub end_of_fade_in: Option<f64>,
    pub start_of_fade_out: Option<f64>,
    pub loudness: Option<f64>,
    pub bpm: Option<f64>,
}

impl TrackFeatures {
    pub fn from_record(record: &FlatRecord) -> Result<Self, RecordError> {
        let year = match record.int(fields::YEAR)? {
            Some(year) => Some(i32::try_from(year).map_err(|_| RecordError::TypeMismatch {
                field: fields::YEAR.to_string(),
                expected: "32-bit integer",
                found: "integer",
            })?),
            None => None,
        };
        Ok(Self {
            year,
            danceability: record.float(fields::DANCEABILITY)?,
            duration: record.float(fields::DURATION)?,
            end_of_fade_in: record.float(fields::END_OF_FADE_IN)?,
            start_of_fade_out: record.float(fields::START_OF_FADE_OUT)?,
            loudness: record.float(fields::LOUDNESS)?,
            bpm: record.float(fields::TEMPO)?,
        })
    }
}

/// 暂存的歌曲行，每个源文件一行
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagedSong {
    pub title: Option<String>,
    pub features: TrackFeatures,
    pub album_name: Option<String>,
    pub artist_name: Option<String>,
}

impl StagedSong {
    pub fn from_record(record: &FlatRecord) -> Result<Self, RecordError> {
        Ok(Self {
            title: record.text(fields::TITLE)?,
            features: TrackFeatures::from_record(record)?,
            album_name: record.text(fields::RELEASE)?,
            artist_name: record.text(fields::ARTIST_NAME)?,
        })
    }
}

/// One staged (latitude, longitude) observation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Coordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A distinct (album title, artist name) pair as staged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlbumKey {
    pub title: Option<String>,
    pub artist_name: Option<String>,
}

#[async_trait]
pub trait StagingRepository: Send + Sync {
    async fn insert_staged_artist(&self, artist: &StagedArtist) -> Result<(), StoreError>;

    async fn insert_staged_song(&self, song: &StagedSong) -> Result<(), StoreError>;

    /// Distinct non-null artist names, ascending.
    async fn staged_artist_names(&self) -> Result<Vec<String>, StoreError>;

    /// Distinct non-null location names, ascending.
    async fn staged_location_names(&self) -> Result<Vec<String>, StoreError>;

    /// Every staged observation recorded under `location`, duplicates included.
    async fn staged_coordinates(&self, location: &str) -> Result<Vec<Coordinates>, StoreError>;

    /// Distinct location values (null included) staged under `artist_name`.
    async fn staged_locations_of_artist(
        &self,
        artist_name: &str,
    ) -> Result<Vec<Option<String>>, StoreError>;

    /// Distinct (album, artist) pairs over all staged songs.
    async fn staged_album_keys(&self) -> Result<Vec<AlbumKey>, StoreError>;

    async fn staged_songs(&self) -> Result<Vec<StagedSong>, StoreError>;

    /// Removes every staged row; the staging tables themselves stay.
    async fn clear_staging(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawValue;

    fn text(s: &str) -> RawValue {
        RawValue::Bytes(s.as_bytes().to_vec())
    }

    fn full_record() -> FlatRecord {
        FlatRecord::new()
            .with(fields::ARTIST_NAME, text("Casual"))
            .with(fields::ARTIST_LOCATION, text("Oakland, CA"))
            .with(fields::ARTIST_LATITUDE, RawValue::Float(37.8))
            .with(fields::ARTIST_LONGITUDE, RawValue::Float(f64::NAN))
            .with(fields::TITLE, text("I Didn't Mean To"))
            .with(fields::YEAR, RawValue::Int(0))
            .with(fields::DANCEABILITY, RawValue::Float(0.0))
            .with(fields::DURATION, RawValue::Float(218.93))
            .with(fields::END_OF_FADE_IN, RawValue::Float(0.247))
            .with(fields::START_OF_FADE_OUT, RawValue::Float(218.932))
            .with(fields::LOUDNESS, RawValue::Float(-11.197))
            .with(fields::TEMPO, RawValue::Float(92.198))
            .with(fields::RELEASE, text(""))
    }

    #[test]
    fn test_staged_artist_from_record() {
        let artist = StagedArtist::from_record(&full_record()).unwrap();
        assert_eq!(artist.name.as_deref(), Some("Casual"));
        assert_eq!(artist.location.as_deref(), Some("Oakland, CA"));
        assert_eq!(artist.latitude, Some(37.8));
        assert_eq!(artist.longitude, None);
    }

    #[test]
    fn test_staged_song_from_record() {
        let song = StagedSong::from_record(&full_record()).unwrap();
        assert_eq!(song.title.as_deref(), Some("I Didn't Mean To"));
        assert_eq!(song.features.year, Some(0));
        assert_eq!(song.features.bpm, Some(92.198));
        // 空字符串视为缺失
        assert_eq!(song.album_name, None);
        assert_eq!(song.artist_name.as_deref(), Some("Casual"));
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let mut record = full_record();
        record.insert(fields::TEMPO, vec![]);
        assert!(matches!(
            StagedSong::from_record(&record),
            Err(RecordError::Cardinality { .. })
        ));
        assert!(StagedArtist::from_record(&FlatRecord::new()).is_err());
    }

    #[test]
    fn test_year_out_of_range() {
        let record = full_record().with(fields::YEAR, RawValue::Int(i64::MAX));
        assert!(TrackFeatures::from_record(&record).is_err());
    }
}
