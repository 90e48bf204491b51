use crate::command::album::{AlbumReport, AlbumResolver};
use crate::command::artist::{ArtistDeduplicator, ArtistReport};
use crate::command::artist_location::{ArtistLocationLinker, LinkReport};
use crate::command::location::{LocationReport, LocationResolver};
use crate::command::song::{SongFinalizer, SongReport};
use crate::command::stage_records::{RecordStager, StagingReport};
use crate::error::AppError;
use domain::stage::Stage;
use domain::store::{PipelineStore, StageSession};
use log::{error, info};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineReport {
    pub staging: StagingReport,
    pub artists: ArtistReport,
    pub locations: LocationReport,
    pub links: LinkReport,
    pub albums: AlbumReport,
    pub songs: SongReport,
    pub staging_cleared: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    /// Delete staged rows once the song stage has run.
    pub clear_staging: bool,
}

/// Runs Stage → Artist → Location → Link → Album → Song, each exactly once.
///
/// Every stage gets its own session and is committed before the next one
/// begins. A failing stage is rolled back; the stages committed before it are
/// left in place and the run stops, so the caller sees a partially loaded
/// schema and the stage that failed.
pub struct Pipeline {
    store: Arc<dyn PipelineStore>,
    stager: RecordStager,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(store: Arc<dyn PipelineStore>, stager: RecordStager) -> Self {
        Self {
            store,
            stager,
            options: PipelineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub async fn run(&self) -> Result<PipelineReport, AppError> {
        let start = Instant::now();
        let result = self.run_stages().await;
        match &result {
            Ok(_) => info!("Pipeline finished in {:?}", start.elapsed()),
            Err(e) => error!(
                "Pipeline stopped in stage {} after {:?}: {}",
                e.stage(),
                start.elapsed(),
                e
            ),
        }
        result
    }

    async fn run_stages(&self) -> Result<PipelineReport, AppError> {
        let mut report = PipelineReport::default();
        for stage in Stage::ALL {
            let session = self.begin(stage).await?;
            self.run_stage(stage, session.as_ref(), &mut report).await?;
            self.commit(stage, session).await?;
        }
        Ok(report)
    }

    async fn run_stage(
        &self,
        stage: Stage,
        session: &dyn StageSession,
        report: &mut PipelineReport,
    ) -> Result<(), AppError> {
        match stage {
            Stage::Stage => report.staging = self.stager.run(session).await?,
            Stage::Artist => report.artists = ArtistDeduplicator.run(session).await?,
            Stage::Location => report.locations = LocationResolver.run(session).await?,
            Stage::Link => report.links = ArtistLocationLinker.run(session).await?,
            Stage::Album => report.albums = AlbumResolver.run(session).await?,
            Stage::Song => {
                report.songs = SongFinalizer.run(session).await?;
                if self.options.clear_staging {
                    session
                        .clear_staging()
                        .await
                        .map_err(AppError::storage(Stage::Song))?;
                    report.staging_cleared = true;
                }
            }
        }
        Ok(())
    }

    async fn begin(&self, stage: Stage) -> Result<Box<dyn StageSession>, AppError> {
        info!("Stage {} started", stage);
        self.store
            .begin(stage)
            .await
            .map_err(AppError::storage(stage))
    }

    async fn commit(&self, stage: Stage, session: Box<dyn StageSession>) -> Result<(), AppError> {
        session.commit().await.map_err(AppError::storage(stage))?;
        info!("Stage {} committed", stage);
        Ok(())
    }
}
