use crate::error::{AppError, SourceError};
use domain::record::FlatRecord;
use domain::stage::Stage;
use domain::staging::{StagedArtist, StagedSong};
use domain::store::StageSession;
use domain::value::SourceId;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Lists the source files of one run.
#[async_trait::async_trait]
pub trait SourceCatalog: Send + Sync {
    async fn list(&self) -> Result<Vec<PathBuf>, AppError>;
}

/// Reads one source file into a flat record of named raw fields.
#[async_trait::async_trait]
pub trait SourceReader: Send + Sync {
    async fn read(&self, path: PathBuf) -> Result<FlatRecord, SourceError>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagingReport {
    pub files_seen: usize,
    pub files_staged: usize,
    pub skipped: Vec<SourceId>,
}

impl StagingReport {
    pub fn files_skipped(&self) -> usize {
        self.skipped.len()
    }
}

/// Appends one staged artist row and one staged song row per source file.
#[derive(Clone)]
pub struct RecordStager {
    catalog: Arc<dyn SourceCatalog>,
    reader: Arc<dyn SourceReader>,
    fail_fast: bool,
    progress_every: usize,
}

impl RecordStager {
    pub fn new(catalog: Arc<dyn SourceCatalog>, reader: Arc<dyn SourceReader>) -> Self {
        Self {
            catalog,
            reader,
            fail_fast: false,
            progress_every: 100,
        }
    }

    /// Abort the stage on the first malformed file instead of skipping it.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn with_progress_every(mut self, progress_every: usize) -> Self {
        self.progress_every = progress_every.max(1);
        self
    }

    pub async fn run(&self, session: &dyn StageSession) -> Result<StagingReport, AppError> {
        let mut paths = self.catalog.list().await?;
        paths.sort();
        info!("Staging {} source files", paths.len());

        let mut report = StagingReport::default();
        for path in &paths {
            report.files_seen += 1;
            let source_id = SourceId::from(path.as_path());

            match self.extract(path).await {
                Ok((artist, song)) => {
                    let with_source = |error| AppError::StorageFailure {
                        stage: Stage::Stage,
                        source_id: Some(source_id.clone()),
                        error,
                    };
                    session
                        .insert_staged_artist(&artist)
                        .await
                        .map_err(with_source)?;
                    session
                        .insert_staged_song(&song)
                        .await
                        .map_err(with_source)?;
                    report.files_staged += 1;
                }
                Err(error) if self.fail_fast => {
                    return Err(AppError::MalformedRecord { source_id, error });
                }
                Err(error) => {
                    warn!("Skipping {}: {}", source_id, error);
                    report.skipped.push(source_id);
                }
            }

            if report.files_seen % self.progress_every == 0 {
                info!(
                    "Staged {}/{} files, skipped {}",
                    report.files_staged,
                    paths.len(),
                    report.files_skipped()
                );
            }
        }
        Ok(report)
    }

    // Both rows are built before either is written.
    async fn extract(&self, path: &Path) -> Result<(StagedArtist, StagedSong), SourceError> {
        let record = self.reader.read(path.to_path_buf()).await?;
        let artist = StagedArtist::from_record(&record)?;
        let song = StagedSong::from_record(&record)?;
        Ok((artist, song))
    }
}
