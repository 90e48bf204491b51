use crate::staging::TrackFeatures;
use crate::store::StoreError;
use crate::value::{AlbumId, ArtistId, SongId};
use async_trait::async_trait;

/// 事实表中的歌曲，外键解析失败时为 None
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub id: SongId,
    pub title: Option<String>,
    pub features: TrackFeatures,
    pub album_id: Option<AlbumId>,
    pub artist_id: Option<ArtistId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSong {
    pub title: Option<String>,
    pub features: TrackFeatures,
    pub album_id: Option<AlbumId>,
    pub artist_id: Option<ArtistId>,
}

#[async_trait]
pub trait SongRepository: Send + Sync {
    async fn insert_song(&self, song: &NewSong) -> Result<SongId, StoreError>;

    async fn list_songs(&self) -> Result<Vec<Song>, StoreError>;
}
