use crate::error::AppError;
use crate::resolve::{agree, Agreement};
use domain::stage::Stage;
use domain::store::StageSession;
use log::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkReport {
    pub links: usize,
    /// Artists with no staged location, only null, or several distinct values.
    pub skipped_artists: usize,
}

/// Links every artist to its location when the staged rows name exactly one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtistLocationLinker;

impl ArtistLocationLinker {
    pub async fn run(&self, session: &dyn StageSession) -> Result<LinkReport, AppError> {
        let storage = AppError::storage(Stage::Link);
        let artists = session.list_artists().await.map_err(&storage)?;

        let mut report = LinkReport::default();
        for artist in artists {
            let staged = session
                .staged_locations_of_artist(&artist.name)
                .await
                .map_err(&storage)?;

            let location_name = match agree(staged) {
                Agreement::Single(Some(name)) => name,
                other => {
                    debug!("No unique location for artist {:?}: {:?}", artist.name, other);
                    report.skipped_artists += 1;
                    continue;
                }
            };

            let Some(location) = session
                .find_location_by_name(&location_name)
                .await
                .map_err(&storage)?
            else {
                // 地点阶段应已写入所有非空地点名
                warn!(
                    "Location {:?} of artist {:?} is missing from the location table",
                    location_name, artist.name
                );
                report.skipped_artists += 1;
                continue;
            };

            session
                .insert_artist_location(artist.id, location.id)
                .await
                .map_err(&storage)?;
            report.links += 1;
        }
        info!(
            "Linked {} artists to locations, skipped {}",
            report.links, report.skipped_artists
        );
        Ok(report)
    }
}
