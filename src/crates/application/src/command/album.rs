use crate::error::AppError;
use domain::stage::Stage;
use domain::store::StageSession;
use log::{debug, info};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlbumReport {
    pub albums: usize,
    /// Staged (album, artist) pairs without a title or a resolvable artist.
    pub skipped_keys: usize,
}

/// Builds the album dimension keyed by (title, artist id).
#[derive(Debug, Clone, Copy, Default)]
pub struct AlbumResolver;

impl AlbumResolver {
    pub async fn run(&self, session: &dyn StageSession) -> Result<AlbumReport, AppError> {
        let storage = AppError::storage(Stage::Album);
        let keys = session.staged_album_keys().await.map_err(&storage)?;

        let mut report = AlbumReport::default();
        for key in keys {
            let (Some(title), Some(artist_name)) = (key.title, key.artist_name) else {
                report.skipped_keys += 1;
                continue;
            };
            let Some(artist) = session
                .find_artist_by_name(&artist_name)
                .await
                .map_err(&storage)?
            else {
                debug!("Album {:?}: artist {:?} not found", title, artist_name);
                report.skipped_keys += 1;
                continue;
            };
            if session
                .find_album(&title, artist.id)
                .await
                .map_err(&storage)?
                .is_some()
            {
                continue;
            }
            session
                .insert_album(&title, artist.id)
                .await
                .map_err(&storage)?;
            report.albums += 1;
        }
        info!(
            "Inserted {} albums, skipped {} staged keys without identity",
            report.albums, report.skipped_keys
        );
        Ok(report)
    }
}
