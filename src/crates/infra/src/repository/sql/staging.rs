use super::db_data::{col, feature_values, AlbumKeyRow, CoordinatesRow, StagedSongRow};
use super::{store_err, values_err, SqlSession};
use async_trait::async_trait;
use domain::staging::{AlbumKey, Coordinates, StagedArtist, StagedSong, StagingRepository};
use domain::store::StoreError;
use sea_orm::sea_query::{Alias, Expr, Order, Query, SimpleExpr};
use sea_orm::{ConnectionTrait, FromQueryResult};

const VALUE: &str = "value";

#[derive(Debug, FromQueryResult)]
struct NameRow {
    value: Option<String>,
}

#[async_trait]
impl StagingRepository for SqlSession {
    async fn insert_staged_artist(&self, artist: &StagedArtist) -> Result<(), StoreError> {
        let mut stmt = Query::insert();
        stmt.into_table(Alias::new(&self.tables().staged_artists))
            .columns([
                Alias::new(col::NAME),
                Alias::new(col::LOCATION),
                Alias::new(col::LATITUDE),
                Alias::new(col::LONGITUDE),
            ])
            .values([
                artist.name.clone().into(),
                artist.location.clone().into(),
                artist.latitude.into(),
                artist.longitude.into(),
            ])
            .map_err(values_err)?;
        self.execute(&stmt).await
    }

    async fn insert_staged_song(&self, song: &StagedSong) -> Result<(), StoreError> {
        let mut columns = vec![Alias::new(col::TITLE)];
        columns.extend(col::FEATURES.iter().map(|c| Alias::new(*c)));
        columns.push(Alias::new(col::ALBUM_NAME));
        columns.push(Alias::new(col::ARTIST_NAME));

        let mut values: Vec<SimpleExpr> = vec![song.title.clone().into()];
        values.extend(feature_values(&song.features).into_iter().map(Into::into));
        values.push(song.album_name.clone().into());
        values.push(song.artist_name.clone().into());

        let mut stmt = Query::insert();
        stmt.into_table(Alias::new(&self.tables().staged_songs))
            .columns(columns)
            .values(values)
            .map_err(values_err)?;
        self.execute(&stmt).await
    }

    async fn staged_artist_names(&self) -> Result<Vec<String>, StoreError> {
        let stmt = Query::select()
            .distinct()
            .expr_as(Expr::col(Alias::new(col::NAME)), Alias::new(VALUE))
            .from(Alias::new(&self.tables().staged_artists))
            .and_where(Expr::col(Alias::new(col::NAME)).is_not_null())
            .order_by(Alias::new(VALUE), Order::Asc)
            .to_owned();
        let rows: Vec<NameRow> = self.fetch_all(&stmt).await?;
        Ok(rows.into_iter().filter_map(|r| r.value).collect())
    }

    async fn staged_location_names(&self) -> Result<Vec<String>, StoreError> {
        let stmt = Query::select()
            .distinct()
            .expr_as(Expr::col(Alias::new(col::LOCATION)), Alias::new(VALUE))
            .from(Alias::new(&self.tables().staged_artists))
            .and_where(Expr::col(Alias::new(col::LOCATION)).is_not_null())
            .order_by(Alias::new(VALUE), Order::Asc)
            .to_owned();
        let rows: Vec<NameRow> = self.fetch_all(&stmt).await?;
        Ok(rows.into_iter().filter_map(|r| r.value).collect())
    }

    async fn staged_coordinates(&self, location: &str) -> Result<Vec<Coordinates>, StoreError> {
        let stmt = Query::select()
            .columns([Alias::new(col::LATITUDE), Alias::new(col::LONGITUDE)])
            .from(Alias::new(&self.tables().staged_artists))
            .and_where(Expr::col(Alias::new(col::LOCATION)).eq(location))
            .order_by(Alias::new(col::ID), Order::Asc)
            .to_owned();
        let rows: Vec<CoordinatesRow> = self.fetch_all(&stmt).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn staged_locations_of_artist(
        &self,
        artist_name: &str,
    ) -> Result<Vec<Option<String>>, StoreError> {
        let stmt = Query::select()
            .distinct()
            .expr_as(Expr::col(Alias::new(col::LOCATION)), Alias::new(VALUE))
            .from(Alias::new(&self.tables().staged_artists))
            .and_where(Expr::col(Alias::new(col::NAME)).eq(artist_name))
            .to_owned();
        let rows: Vec<NameRow> = self.fetch_all(&stmt).await?;
        let mut locations: Vec<Option<String>> = rows.into_iter().map(|r| r.value).collect();
        // NULL 的排序位置依赖后端，这里统一
        locations.sort();
        Ok(locations)
    }

    async fn staged_album_keys(&self) -> Result<Vec<AlbumKey>, StoreError> {
        let stmt = Query::select()
            .distinct()
            .columns([Alias::new(col::ALBUM_NAME), Alias::new(col::ARTIST_NAME)])
            .from(Alias::new(&self.tables().staged_songs))
            .to_owned();
        let rows: Vec<AlbumKeyRow> = self.fetch_all(&stmt).await?;
        let mut keys: Vec<AlbumKey> = rows.into_iter().map(Into::into).collect();
        keys.sort();
        Ok(keys)
    }

    async fn staged_songs(&self) -> Result<Vec<StagedSong>, StoreError> {
        let mut columns = vec![Alias::new(col::TITLE)];
        columns.extend(col::FEATURES.iter().map(|c| Alias::new(*c)));
        columns.push(Alias::new(col::ALBUM_NAME));
        columns.push(Alias::new(col::ARTIST_NAME));

        let stmt = Query::select()
            .columns(columns)
            .from(Alias::new(&self.tables().staged_songs))
            .order_by(Alias::new(col::ID), Order::Asc)
            .to_owned();
        let rows: Vec<StagedSongRow> = self.fetch_all(&stmt).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn clear_staging(&self) -> Result<(), StoreError> {
        let backend = self.txn.get_database_backend();
        for table in [&self.tables().staged_artists, &self.tables().staged_songs] {
            let stmt = Query::delete().from_table(Alias::new(table)).to_owned();
            self.txn
                .execute(backend.build(&stmt))
                .await
                .map_err(store_err)?;
        }
        Ok(())
    }
}
