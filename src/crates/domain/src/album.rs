use crate::store::StoreError;
use crate::value::{AlbumId, ArtistId};
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub artist_id: ArtistId,
}

#[async_trait]
pub trait AlbumRepository: Send + Sync {
    async fn insert_album(&self, title: &str, artist_id: ArtistId) -> Result<AlbumId, StoreError>;

    async fn find_album(&self, title: &str, artist_id: ArtistId)
        -> Result<Option<Album>, StoreError>;

    async fn list_albums(&self) -> Result<Vec<Album>, StoreError>;
}
