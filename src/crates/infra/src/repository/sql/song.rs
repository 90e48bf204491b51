use super::db_data::{col, feature_values, SongRow};
use super::{values_err, SqlSession};
use async_trait::async_trait;
use domain::song::{NewSong, Song, SongRepository};
use domain::store::StoreError;
use domain::value::SongId;
use sea_orm::sea_query::{Alias, Order, Query, SimpleExpr};

#[async_trait]
impl SongRepository for SqlSession {
    async fn insert_song(&self, song: &NewSong) -> Result<SongId, StoreError> {
        let mut columns = vec![Alias::new(col::TITLE)];
        columns.extend(col::FEATURES.iter().map(|c| Alias::new(*c)));
        columns.push(Alias::new(col::ALBUM_ID));
        columns.push(Alias::new(col::ARTIST_ID));

        let mut values: Vec<SimpleExpr> = vec![song.title.clone().into()];
        values.extend(feature_values(&song.features).into_iter().map(Into::into));
        values.push(song.album_id.map(|id| id.as_i32()).into());
        values.push(song.artist_id.map(|id| id.as_i32()).into());

        let mut stmt = Query::insert();
        stmt.into_table(Alias::new(&self.tables().songs))
            .columns(columns)
            .values(values)
            .map_err(values_err)?;
        Ok(self.insert_returning_id(&mut stmt).await?.into())
    }

    async fn list_songs(&self) -> Result<Vec<Song>, StoreError> {
        let mut columns = vec![Alias::new(col::ID), Alias::new(col::TITLE)];
        columns.extend(col::FEATURES.iter().map(|c| Alias::new(*c)));
        columns.push(Alias::new(col::ALBUM_ID));
        columns.push(Alias::new(col::ARTIST_ID));

        let stmt = Query::select()
            .columns(columns)
            .from(Alias::new(&self.tables().songs))
            .order_by(Alias::new(col::ID), Order::Asc)
            .to_owned();
        let rows: Vec<SongRow> = self.fetch_all(&stmt).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
