mod common;

use application::error::AppError;
use application::pipeline::{Pipeline, PipelineOptions};
use common::{stager, write_tracks, Track};
use domain::album::AlbumRepository;
use domain::artist::ArtistRepository;
use domain::artist_location::ArtistLocationRepository;
use domain::location::LocationRepository;
use domain::schema::{SchemaDef, TableNames};
use domain::song::SongRepository;
use domain::stage::Stage;
use domain::staging::StagingRepository;
use domain::store::{PipelineStore, StageSession, StoreError};
use infra::repository::sql::{connect, SqlStore};
use infra::schema::create_all;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tempfile::TempDir;

async fn sqlite(schema: &SchemaDef) -> DatabaseConnection {
    let db = connect("sqlite::memory:", 1).await.unwrap();
    create_all(&db, schema).await.unwrap();
    db
}

#[tokio::test]
async fn test_create_all_is_idempotent() {
    let schema = SchemaDef::default();
    let db = sqlite(&schema).await;
    create_all(&db, &schema).await.unwrap();
}

#[tokio::test]
async fn test_full_run_against_sqlite() {
    let dir = TempDir::new().unwrap();
    write_tracks(
        dir.path(),
        &[
            Track::by("A").at("X", Some(1.0), None).song("One", "First"),
            Track::by("A").at("X", Some(1.0), None).song("Two", "First"),
            Track::by("A").at("Y", Some(2.0), None).song("Three", ""),
            Track::by("B").at("Y", Some(2.0), Some(3.5)).song("Four", "Second"),
            Track::anonymous().song("Five", "Lost"),
        ],
    );
    let schema = SchemaDef::default();
    let db = sqlite(&schema).await;
    let store = Arc::new(SqlStore::new(db, schema));

    let report = Pipeline::new(store.clone(), stager(dir.path()))
        .run()
        .await
        .unwrap();
    assert_eq!(report.staging.files_staged, 5);

    let session = store.begin(Stage::Song).await.unwrap();
    let artists = session.list_artists().await.unwrap();
    let names: Vec<&str> = artists.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);

    let locations = session.list_locations().await.unwrap();
    assert_eq!(locations.len(), 2);
    assert_eq!(locations[0].name, "X");
    assert_eq!(locations[0].latitude, Some(1.0));
    assert_eq!(locations[0].longitude, None);
    assert_eq!(locations[1].name, "Y");
    assert_eq!(locations[1].latitude, Some(2.0));
    // Y 的经度有 null 和 3.5 两种取值
    assert_eq!(locations[1].longitude, None);

    // A 出现在 X 和 Y，不关联；B 只在 Y
    let links = session.list_artist_locations().await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].artist_id, artists[1].id);
    assert_eq!(links[0].location_id, locations[1].id);

    let albums = session.list_albums().await.unwrap();
    let titles: Vec<&str> = albums.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second"]);

    let songs = session.list_songs().await.unwrap();
    assert_eq!(songs.len(), 5);
    let one = songs
        .iter()
        .find(|s| s.title.as_deref() == Some("One"))
        .unwrap();
    assert_eq!(one.artist_id, Some(artists[0].id));
    assert_eq!(one.album_id, Some(albums[0].id));
    assert_eq!(one.features.duration, Some(218.93));
    let five = songs
        .iter()
        .find(|s| s.title.as_deref() == Some("Five"))
        .unwrap();
    assert_eq!(five.artist_id, None);
    assert_eq!(five.album_id, None);

    assert_eq!(session.staged_songs().await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_custom_table_names_and_clear_staging() {
    let dir = TempDir::new().unwrap();
    write_tracks(dir.path(), &[Track::by("A").song("One", "First")]);
    let schema = SchemaDef::new(TableNames {
        staged_artists: "stg_artist".to_string(),
        staged_songs: "stg_song".to_string(),
        artists: "dim_artist".to_string(),
        locations: "dim_location".to_string(),
        artist_locations: "bridge_artist_location".to_string(),
        albums: "dim_album".to_string(),
        songs: "fact_song".to_string(),
    })
    .unwrap();
    let db = sqlite(&schema).await;
    let store = Arc::new(SqlStore::new(db, schema));

    let report = Pipeline::new(store.clone(), stager(dir.path()))
        .with_options(PipelineOptions {
            clear_staging: true,
        })
        .run()
        .await
        .unwrap();
    assert!(report.staging_cleared);

    let session = store.begin(Stage::Song).await.unwrap();
    assert!(session.staged_songs().await.unwrap().is_empty());
    assert!(session.staged_artist_names().await.unwrap().is_empty());
    let songs = session.list_songs().await.unwrap();
    assert_eq!(songs.len(), 1);
    assert!(songs[0].album_id.is_some());
}

#[tokio::test]
async fn test_unique_violation_fails_the_stage() {
    let dir = TempDir::new().unwrap();
    write_tracks(dir.path(), &[Track::by("A"), Track::by("B")]);
    let schema = SchemaDef::default();
    let db = sqlite(&schema).await;
    let store = Arc::new(SqlStore::new(db, schema));

    Pipeline::new(store.clone(), stager(dir.path()))
        .run()
        .await
        .unwrap();
    let err = Pipeline::new(store.clone(), stager(dir.path()))
        .run()
        .await
        .unwrap_err();

    match err {
        AppError::StorageFailure { stage, error, .. } => {
            assert_eq!(stage, Stage::Artist);
            assert!(matches!(error, StoreError::Constraint(_)));
        }
        other => panic!("unexpected error {:?}", other),
    }

    let session = store.begin(Stage::Artist).await.unwrap();
    assert_eq!(session.list_artists().await.unwrap().len(), 2);
    assert_eq!(session.staged_artist_names().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_dropped_session_rolls_back() {
    let schema = SchemaDef::default();
    let db = sqlite(&schema).await;
    let store = SqlStore::new(db, schema);

    {
        let session = store.begin(Stage::Artist).await.unwrap();
        session.insert_artist("Casual").await.unwrap();
    }

    let session = store.begin(Stage::Artist).await.unwrap();
    assert!(session.list_artists().await.unwrap().is_empty());
    let id = session.insert_artist("Casual").await.unwrap();
    session.commit().await.unwrap();

    let session = store.begin(Stage::Artist).await.unwrap();
    let found = session.find_artist_by_name("Casual").await.unwrap().unwrap();
    assert_eq!(found.id, id);
}
