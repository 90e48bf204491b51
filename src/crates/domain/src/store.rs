use crate::album::AlbumRepository;
use crate::artist::ArtistRepository;
use crate::artist_location::ArtistLocationRepository;
use crate::location::LocationRepository;
use crate::song::SongRepository;
use crate::stage::Stage;
use crate::staging::StagingRepository;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("数据库错误: {0}")]
    DbErr(String),
    #[error("约束冲突: {0}")]
    Constraint(String),
    #[error("插入后未返回行: {0}")]
    MissingRow(String),
}

/// All table operations of one pipeline stage, bound to a single unit of work.
///
/// Nothing is visible to other sessions until [`StageSession::commit`]
/// succeeds. Dropping a session without committing discards its writes, so
/// every early return (including `?` on an error) rolls the stage back.
#[async_trait]
pub trait StageSession:
    StagingRepository
    + ArtistRepository
    + LocationRepository
    + ArtistLocationRepository
    + AlbumRepository
    + SongRepository
    + Send
    + Sync
{
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}

/// Opens one session per stage.
#[async_trait]
pub trait PipelineStore: Send + Sync {
    async fn begin(&self, stage: Stage) -> Result<Box<dyn StageSession>, StoreError>;
}
