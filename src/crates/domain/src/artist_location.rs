use crate::store::StoreError;
use crate::value::{ArtistId, ArtistLocationId, LocationId};
use async_trait::async_trait;

/// 艺术家与地点的关联（桥表）
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistLocation {
    pub id: ArtistLocationId,
    pub artist_id: ArtistId,
    pub location_id: LocationId,
}

#[async_trait]
pub trait ArtistLocationRepository: Send + Sync {
    async fn insert_artist_location(
        &self,
        artist_id: ArtistId,
        location_id: LocationId,
    ) -> Result<ArtistLocationId, StoreError>;

    async fn list_artist_locations(&self) -> Result<Vec<ArtistLocation>, StoreError>;
}
