use domain::record::RecordError;
use domain::stage::Stage;
use domain::store::StoreError;
use domain::value::SourceId;

use thiserror::Error;

/// Failure to turn one source file into a flat record.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("cannot read source: {0}")]
    Unreadable(String),
    #[error("cannot decode source: {0}")]
    Undecodable(String),
    #[error("malformed record: {0}")]
    Record(#[from] RecordError),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Source listing error: {0}")]
    SourceListing(String),

    #[error("Malformed record {source_id}: {error}")]
    MalformedRecord {
        source_id: SourceId,
        #[source]
        error: SourceError,
    },

    #[error("Storage failure in stage {stage}{}: {error}", source_suffix(.source_id))]
    StorageFailure {
        stage: Stage,
        source_id: Option<SourceId>,
        #[source]
        error: StoreError,
    },
}

impl AppError {
    /// Maps a store error raised while `stage` runs.
    pub fn storage(stage: Stage) -> impl Fn(StoreError) -> AppError {
        move |error| AppError::StorageFailure {
            stage,
            source_id: None,
            error,
        }
    }

    /// Stage the error was raised in.
    pub fn stage(&self) -> Stage {
        match self {
            AppError::StorageFailure { stage, .. } => *stage,
            AppError::MalformedRecord { .. } | AppError::SourceListing(_) => Stage::Stage,
        }
    }
}

fn source_suffix(source_id: &Option<SourceId>) -> String {
    match source_id {
        Some(id) => format!(" (source {})", id),
        None => String::new(),
    }
}
