use async_trait::async_trait;
use domain::album::{Album, AlbumRepository};
use domain::artist::{Artist, ArtistRepository};
use domain::artist_location::{ArtistLocation, ArtistLocationRepository};
use domain::location::{Location, LocationRepository, NewLocation};
use domain::song::{NewSong, Song, SongRepository};
use domain::stage::Stage;
use domain::staging::{AlbumKey, Coordinates, StagedArtist, StagedSong, StagingRepository};
use domain::store::{PipelineStore, StageSession, StoreError};
use domain::value::{AlbumId, ArtistId, ArtistLocationId, LocationId, SongId};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// 内存中的七张表，与 SQL 表一一对应
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub staged_artists: Vec<StagedArtist>,
    pub staged_songs: Vec<StagedSong>,
    pub artists: Vec<Artist>,
    pub locations: Vec<Location>,
    pub artist_locations: Vec<ArtistLocation>,
    pub albums: Vec<Album>,
    pub songs: Vec<Song>,
}

impl Tables {
    fn artist_exists(&self, id: ArtistId) -> bool {
        self.artists.iter().any(|a| a.id == id)
    }

    fn location_exists(&self, id: LocationId) -> bool {
        self.locations.iter().any(|l| l.id == id)
    }

    fn album_exists(&self, id: AlbumId) -> bool {
        self.albums.iter().any(|a| a.id == id)
    }
}

// 自增主键从 1 开始
fn next_id(len: usize) -> i32 {
    i32::try_from(len).map_or(i32::MAX, |n| n.saturating_add(1))
}

/// In-memory [`PipelineStore`] with the same constraints as the SQL schema.
///
/// Every session works on a private copy of the committed tables and
/// publishes it on commit; a dropped session leaves the store untouched.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    committed: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the committed state.
    pub async fn snapshot(&self) -> Tables {
        self.committed.lock().await.clone()
    }
}

#[async_trait]
impl PipelineStore for InMemoryStore {
    async fn begin(&self, _stage: Stage) -> Result<Box<dyn StageSession>, StoreError> {
        let working = self.committed.lock().await.clone();
        Ok(Box::new(InMemorySession {
            committed: self.committed.clone(),
            working: Mutex::new(working),
        }))
    }
}

pub struct InMemorySession {
    committed: Arc<Mutex<Tables>>,
    working: Mutex<Tables>,
}

#[async_trait]
impl StageSession for InMemorySession {
    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let InMemorySession { committed, working } = *self;
        *committed.lock().await = working.into_inner();
        Ok(())
    }
}

#[async_trait]
impl StagingRepository for InMemorySession {
    async fn insert_staged_artist(&self, artist: &StagedArtist) -> Result<(), StoreError> {
        self.working.lock().await.staged_artists.push(artist.clone());
        Ok(())
    }

    async fn insert_staged_song(&self, song: &StagedSong) -> Result<(), StoreError> {
        self.working.lock().await.staged_songs.push(song.clone());
        Ok(())
    }

    async fn staged_artist_names(&self) -> Result<Vec<String>, StoreError> {
        let tables = self.working.lock().await;
        let names: BTreeSet<&String> = tables
            .staged_artists
            .iter()
            .filter_map(|a| a.name.as_ref())
            .collect();
        Ok(names.into_iter().cloned().collect())
    }

    async fn staged_location_names(&self) -> Result<Vec<String>, StoreError> {
        let tables = self.working.lock().await;
        let names: BTreeSet<&String> = tables
            .staged_artists
            .iter()
            .filter_map(|a| a.location.as_ref())
            .collect();
        Ok(names.into_iter().cloned().collect())
    }

    async fn staged_coordinates(&self, location: &str) -> Result<Vec<Coordinates>, StoreError> {
        let tables = self.working.lock().await;
        Ok(tables
            .staged_artists
            .iter()
            .filter(|a| a.location.as_deref() == Some(location))
            .map(|a| Coordinates {
                latitude: a.latitude,
                longitude: a.longitude,
            })
            .collect())
    }

    async fn staged_locations_of_artist(
        &self,
        artist_name: &str,
    ) -> Result<Vec<Option<String>>, StoreError> {
        let tables = self.working.lock().await;
        let locations: BTreeSet<Option<String>> = tables
            .staged_artists
            .iter()
            .filter(|a| a.name.as_deref() == Some(artist_name))
            .map(|a| a.location.clone())
            .collect();
        Ok(locations.into_iter().collect())
    }

    async fn staged_album_keys(&self) -> Result<Vec<AlbumKey>, StoreError> {
        let tables = self.working.lock().await;
        let keys: BTreeSet<AlbumKey> = tables
            .staged_songs
            .iter()
            .map(|s| AlbumKey {
                title: s.album_name.clone(),
                artist_name: s.artist_name.clone(),
            })
            .collect();
        Ok(keys.into_iter().collect())
    }

    async fn staged_songs(&self) -> Result<Vec<StagedSong>, StoreError> {
        Ok(self.working.lock().await.staged_songs.clone())
    }

    async fn clear_staging(&self) -> Result<(), StoreError> {
        let mut tables = self.working.lock().await;
        tables.staged_artists.clear();
        tables.staged_songs.clear();
        Ok(())
    }
}

#[async_trait]
impl ArtistRepository for InMemorySession {
    async fn insert_artist(&self, name: &str) -> Result<ArtistId, StoreError> {
        let mut tables = self.working.lock().await;
        if tables.artists.iter().any(|a| a.name == name) {
            return Err(StoreError::Constraint(format!("artist name '{}' exists", name)));
        }
        let id = ArtistId::from(next_id(tables.artists.len()));
        tables.artists.push(Artist {
            id,
            name: name.to_string(),
        });
        Ok(id)
    }

    async fn list_artists(&self) -> Result<Vec<Artist>, StoreError> {
        Ok(self.working.lock().await.artists.clone())
    }

    async fn find_artist_by_name(&self, name: &str) -> Result<Option<Artist>, StoreError> {
        let tables = self.working.lock().await;
        Ok(tables.artists.iter().find(|a| a.name == name).cloned())
    }
}

#[async_trait]
impl LocationRepository for InMemorySession {
    async fn insert_location(&self, location: &NewLocation) -> Result<LocationId, StoreError> {
        let mut tables = self.working.lock().await;
        if tables.locations.iter().any(|l| l.name == location.name) {
            return Err(StoreError::Constraint(format!(
                "location name '{}' exists",
                location.name
            )));
        }
        let id = LocationId::from(next_id(tables.locations.len()));
        tables.locations.push(Location {
            id,
            name: location.name.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
        });
        Ok(id)
    }

    async fn find_location_by_name(&self, name: &str) -> Result<Option<Location>, StoreError> {
        let tables = self.working.lock().await;
        Ok(tables.locations.iter().find(|l| l.name == name).cloned())
    }

    async fn list_locations(&self) -> Result<Vec<Location>, StoreError> {
        Ok(self.working.lock().await.locations.clone())
    }
}

#[async_trait]
impl ArtistLocationRepository for InMemorySession {
    async fn insert_artist_location(
        &self,
        artist_id: ArtistId,
        location_id: LocationId,
    ) -> Result<ArtistLocationId, StoreError> {
        let mut tables = self.working.lock().await;
        if !tables.artist_exists(artist_id) {
            return Err(StoreError::Constraint(format!("artist {} not found", artist_id)));
        }
        if !tables.location_exists(location_id) {
            return Err(StoreError::Constraint(format!(
                "location {} not found",
                location_id
            )));
        }
        if tables.artist_locations.iter().any(|l| l.artist_id == artist_id) {
            return Err(StoreError::Constraint(format!(
                "artist {} already linked",
                artist_id
            )));
        }
        let id = ArtistLocationId::from(next_id(tables.artist_locations.len()));
        tables.artist_locations.push(ArtistLocation {
            id,
            artist_id,
            location_id,
        });
        Ok(id)
    }

    async fn list_artist_locations(&self) -> Result<Vec<ArtistLocation>, StoreError> {
        Ok(self.working.lock().await.artist_locations.clone())
    }
}

#[async_trait]
impl AlbumRepository for InMemorySession {
    async fn insert_album(&self, title: &str, artist_id: ArtistId) -> Result<AlbumId, StoreError> {
        let mut tables = self.working.lock().await;
        if !tables.artist_exists(artist_id) {
            return Err(StoreError::Constraint(format!("artist {} not found", artist_id)));
        }
        if tables
            .albums
            .iter()
            .any(|a| a.title == title && a.artist_id == artist_id)
        {
            return Err(StoreError::Constraint(format!(
                "album '{}' of artist {} exists",
                title, artist_id
            )));
        }
        let id = AlbumId::from(next_id(tables.albums.len()));
        tables.albums.push(Album {
            id,
            title: title.to_string(),
            artist_id,
        });
        Ok(id)
    }

    async fn find_album(
        &self,
        title: &str,
        artist_id: ArtistId,
    ) -> Result<Option<Album>, StoreError> {
        let tables = self.working.lock().await;
        Ok(tables
            .albums
            .iter()
            .find(|a| a.title == title && a.artist_id == artist_id)
            .cloned())
    }

    async fn list_albums(&self) -> Result<Vec<Album>, StoreError> {
        Ok(self.working.lock().await.albums.clone())
    }
}

#[async_trait]
impl SongRepository for InMemorySession {
    async fn insert_song(&self, song: &NewSong) -> Result<SongId, StoreError> {
        let mut tables = self.working.lock().await;
        if let Some(album_id) = song.album_id {
            if !tables.album_exists(album_id) {
                return Err(StoreError::Constraint(format!("album {} not found", album_id)));
            }
        }
        if let Some(artist_id) = song.artist_id {
            if !tables.artist_exists(artist_id) {
                return Err(StoreError::Constraint(format!("artist {} not found", artist_id)));
            }
        }
        let id = SongId::from(next_id(tables.songs.len()));
        tables.songs.push(Song {
            id,
            title: song.title.clone(),
            features: song.features,
            album_id: song.album_id,
            artist_id: song.artist_id,
        });
        Ok(id)
    }

    async fn list_songs(&self) -> Result<Vec<Song>, StoreError> {
        Ok(self.working.lock().await.songs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged(name: &str, location: Option<&str>) -> StagedArtist {
        StagedArtist {
            name: Some(name.to_string()),
            location: location.map(str::to_string),
            latitude: None,
            longitude: None,
        }
    }

    #[tokio::test]
    async fn test_commit_publishes_writes() {
        let store = InMemoryStore::new();
        let session = store.begin(Stage::Artist).await.unwrap();
        session.insert_artist("Casual").await.unwrap();
        session.commit().await.unwrap();

        let artists = store.snapshot().await.artists;
        assert_eq!(artists.len(), 1);
        assert_eq!(artists[0].id, ArtistId::from(1));
    }

    #[tokio::test]
    async fn test_drop_without_commit_rolls_back() {
        let store = InMemoryStore::new();
        {
            let session = store.begin(Stage::Artist).await.unwrap();
            session.insert_artist("Casual").await.unwrap();
        }
        assert!(store.snapshot().await.artists.is_empty());
    }

    #[tokio::test]
    async fn test_unique_artist_name() {
        let store = InMemoryStore::new();
        let session = store.begin(Stage::Artist).await.unwrap();
        session.insert_artist("Casual").await.unwrap();
        let err = session.insert_artist("Casual").await.unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_link_requires_existing_rows() {
        let store = InMemoryStore::new();
        let session = store.begin(Stage::Link).await.unwrap();
        let artist = session.insert_artist("Casual").await.unwrap();
        let err = session
            .insert_artist_location(artist, LocationId::from(7))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));

        let location = session
            .insert_location(&NewLocation {
                name: "Oakland, CA".to_string(),
                latitude: None,
                longitude: None,
            })
            .await
            .unwrap();
        session.insert_artist_location(artist, location).await.unwrap();
        // 每个艺术家只能有一个地点
        assert!(session
            .insert_artist_location(artist, location)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_staged_queries() {
        let store = InMemoryStore::new();
        let session = store.begin(Stage::Stage).await.unwrap();
        for artist in [
            staged("B", Some("Paris")),
            staged("A", None),
            staged("A", Some("Oslo")),
            staged("B", Some("Paris")),
        ] {
            session.insert_staged_artist(&artist).await.unwrap();
        }

        assert_eq!(session.staged_artist_names().await.unwrap(), vec!["A", "B"]);
        assert_eq!(
            session.staged_location_names().await.unwrap(),
            vec!["Oslo", "Paris"]
        );
        assert_eq!(
            session.staged_locations_of_artist("A").await.unwrap(),
            vec![None, Some("Oslo".to_string())]
        );
        assert_eq!(session.staged_coordinates("Paris").await.unwrap().len(), 2);

        session.clear_staging().await.unwrap();
        assert!(session.staged_artist_names().await.unwrap().is_empty());
    }
}
