use crate::repository::sql::db_data::col;
use domain::schema::SchemaDef;
use log::info;
use sea_orm::sea_query::{
    Alias, ColumnDef, ForeignKey, ForeignKeyCreateStatement, Index, IndexCreateStatement, Table,
    TableCreateStatement,
};
use sea_orm::{ConnectionTrait, DbErr};

fn id_column() -> ColumnDef {
    ColumnDef::new(Alias::new(col::ID))
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn text(name: &str) -> ColumnDef {
    ColumnDef::new(Alias::new(name)).string().null().to_owned()
}

fn number(name: &str) -> ColumnDef {
    ColumnDef::new(Alias::new(name)).double().null().to_owned()
}

fn foreign_key(table: &str, column: &str, target: &str) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(format!("fk_{}_{}", table, column))
        .from(Alias::new(table), Alias::new(column))
        .to(Alias::new(target), Alias::new(col::ID))
        .to_owned()
}

/// CREATE TABLE statements for all seven tables, dependencies first.
pub fn table_statements(schema: &SchemaDef) -> Vec<TableCreateStatement> {
    let t = schema.tables();

    let staged_artists = Table::create()
        .table(Alias::new(&t.staged_artists))
        .if_not_exists()
        .col(&mut id_column())
        .col(&mut text(col::NAME))
        .col(&mut text(col::LOCATION))
        .col(&mut number(col::LATITUDE))
        .col(&mut number(col::LONGITUDE))
        .to_owned();

    let staged_songs = Table::create()
        .table(Alias::new(&t.staged_songs))
        .if_not_exists()
        .col(&mut id_column())
        .col(&mut text(col::TITLE))
        .col(ColumnDef::new(Alias::new(col::YEAR)).integer().null())
        .col(&mut number(col::DANCEABILITY))
        .col(&mut number(col::DURATION))
        .col(&mut number(col::END_OF_FADE_IN))
        .col(&mut number(col::START_OF_FADE_OUT))
        .col(&mut number(col::LOUDNESS))
        .col(&mut number(col::BPM))
        .col(&mut text(col::ALBUM_NAME))
        .col(&mut text(col::ARTIST_NAME))
        .to_owned();

    let artists = Table::create()
        .table(Alias::new(&t.artists))
        .if_not_exists()
        .col(&mut id_column())
        .col(
            ColumnDef::new(Alias::new(col::NAME))
                .string()
                .not_null()
                .unique_key(),
        )
        .to_owned();

    let locations = Table::create()
        .table(Alias::new(&t.locations))
        .if_not_exists()
        .col(&mut id_column())
        .col(
            ColumnDef::new(Alias::new(col::NAME))
                .string()
                .not_null()
                .unique_key(),
        )
        .col(&mut number(col::LATITUDE))
        .col(&mut number(col::LONGITUDE))
        .to_owned();

    let artist_locations = Table::create()
        .table(Alias::new(&t.artist_locations))
        .if_not_exists()
        .col(&mut id_column())
        .col(
            ColumnDef::new(Alias::new(col::ARTIST_ID))
                .integer()
                .not_null()
                .unique_key(),
        )
        .col(
            ColumnDef::new(Alias::new(col::LOCATION_ID))
                .integer()
                .not_null(),
        )
        .foreign_key(&mut foreign_key(&t.artist_locations, col::ARTIST_ID, &t.artists))
        .foreign_key(&mut foreign_key(&t.artist_locations, col::LOCATION_ID, &t.locations))
        .to_owned();

    let albums = Table::create()
        .table(Alias::new(&t.albums))
        .if_not_exists()
        .col(&mut id_column())
        .col(ColumnDef::new(Alias::new(col::TITLE)).string().not_null())
        .col(ColumnDef::new(Alias::new(col::ARTIST_ID)).integer().not_null())
        .foreign_key(&mut foreign_key(&t.albums, col::ARTIST_ID, &t.artists))
        .to_owned();

    let songs = Table::create()
        .table(Alias::new(&t.songs))
        .if_not_exists()
        .col(&mut id_column())
        .col(&mut text(col::TITLE))
        .col(ColumnDef::new(Alias::new(col::YEAR)).integer().null())
        .col(&mut number(col::DANCEABILITY))
        .col(&mut number(col::DURATION))
        .col(&mut number(col::END_OF_FADE_IN))
        .col(&mut number(col::START_OF_FADE_OUT))
        .col(&mut number(col::LOUDNESS))
        .col(&mut number(col::BPM))
        .col(ColumnDef::new(Alias::new(col::ALBUM_ID)).integer().null())
        .col(ColumnDef::new(Alias::new(col::ARTIST_ID)).integer().null())
        .foreign_key(&mut foreign_key(&t.songs, col::ALBUM_ID, &t.albums))
        .foreign_key(&mut foreign_key(&t.songs, col::ARTIST_ID, &t.artists))
        .to_owned();

    vec![
        staged_artists,
        staged_songs,
        artists,
        locations,
        artist_locations,
        albums,
        songs,
    ]
}

pub fn index_statements(schema: &SchemaDef) -> Vec<IndexCreateStatement> {
    let t = schema.tables();
    vec![
        Index::create()
            .name(format!("idx_{}_title_artist", t.albums))
            .table(Alias::new(&t.albums))
            .col(Alias::new(col::TITLE))
            .col(Alias::new(col::ARTIST_ID))
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name(format!("idx_{}_name", t.staged_artists))
            .table(Alias::new(&t.staged_artists))
            .col(Alias::new(col::NAME))
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name(format!("idx_{}_location", t.staged_artists))
            .table(Alias::new(&t.staged_artists))
            .col(Alias::new(col::LOCATION))
            .if_not_exists()
            .to_owned(),
    ]
}

/// Creates every table and index that does not exist yet.
pub async fn create_all<C: ConnectionTrait>(db: &C, schema: &SchemaDef) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let tables = table_statements(schema);
    let table_count = tables.len();
    for stmt in tables {
        db.execute(backend.build(&stmt)).await?;
    }
    for stmt in index_statements(schema) {
        db.execute(backend.build(&stmt)).await?;
    }
    info!("Schema ready ({} tables)", table_count);
    Ok(())
}
