use crate::error::AppError;
use domain::stage::Stage;
use domain::store::StageSession;
use log::info;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtistReport {
    pub artists: usize,
}

/// Builds the artist dimension: one row per distinct non-null staged name.
///
/// Location data of conflicting rows is ignored here, the location stages
/// resolve it independently.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtistDeduplicator;

impl ArtistDeduplicator {
    pub async fn run(&self, session: &dyn StageSession) -> Result<ArtistReport, AppError> {
        let storage = AppError::storage(Stage::Artist);
        let names = session.staged_artist_names().await.map_err(&storage)?;

        let mut report = ArtistReport::default();
        for name in &names {
            session.insert_artist(name).await.map_err(&storage)?;
            report.artists += 1;
        }
        info!("Inserted {} artists", report.artists);
        Ok(report)
    }
}
