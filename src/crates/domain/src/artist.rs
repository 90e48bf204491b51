use crate::store::StoreError;
use crate::value::ArtistId;
use async_trait::async_trait;

/// 去重后的艺术家维度
#[derive(Debug, Clone, PartialEq)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
}

// 仓储接口 - 依赖反转
#[async_trait]
pub trait ArtistRepository: Send + Sync {
    /// Fails with a constraint error when the name already exists.
    async fn insert_artist(&self, name: &str) -> Result<ArtistId, StoreError>;

    /// All artists ordered by id.
    async fn list_artists(&self) -> Result<Vec<Artist>, StoreError>;

    async fn find_artist_by_name(&self, name: &str) -> Result<Option<Artist>, StoreError>;
}
