use crate::error::AppError;
use domain::song::NewSong;
use domain::stage::Stage;
use domain::store::StageSession;
use domain::value::{AlbumId, ArtistId};
use log::info;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SongReport {
    pub songs: usize,
    pub unresolved_artist: usize,
    pub unresolved_album: usize,
}

/// Copies every staged song into the fact table with surrogate foreign keys.
///
/// A lookup that finds nothing leaves the key null; the row is inserted anyway.
#[derive(Debug, Clone, Copy, Default)]
pub struct SongFinalizer;

impl SongFinalizer {
    pub async fn run(&self, session: &dyn StageSession) -> Result<SongReport, AppError> {
        let storage = AppError::storage(Stage::Song);
        let staged = session.staged_songs().await.map_err(&storage)?;

        let mut artist_ids: HashMap<String, Option<ArtistId>> = HashMap::new();
        let mut album_ids: HashMap<(String, ArtistId), Option<AlbumId>> = HashMap::new();
        let mut report = SongReport::default();

        for song in staged {
            let artist_id = match &song.artist_name {
                Some(name) => match artist_ids.get(name) {
                    Some(cached) => *cached,
                    None => {
                        let id = session
                            .find_artist_by_name(name)
                            .await
                            .map_err(&storage)?
                            .map(|a| a.id);
                        artist_ids.insert(name.clone(), id);
                        id
                    }
                },
                None => None,
            };

            let album_id = match (&song.album_name, artist_id) {
                (Some(title), Some(artist_id)) => {
                    let key = (title.clone(), artist_id);
                    match album_ids.get(&key) {
                        Some(cached) => *cached,
                        None => {
                            let id = session
                                .find_album(title, artist_id)
                                .await
                                .map_err(&storage)?
                                .map(|a| a.id);
                            album_ids.insert(key, id);
                            id
                        }
                    }
                }
                _ => None,
            };

            if artist_id.is_none() {
                report.unresolved_artist += 1;
            }
            if album_id.is_none() {
                report.unresolved_album += 1;
            }

            let new_song = NewSong {
                title: song.title,
                features: song.features,
                album_id,
                artist_id,
            };
            session.insert_song(&new_song).await.map_err(&storage)?;
            report.songs += 1;
        }
        info!(
            "Inserted {} songs ({} without artist, {} without album)",
            report.songs, report.unresolved_artist, report.unresolved_album
        );
        Ok(report)
    }
}
