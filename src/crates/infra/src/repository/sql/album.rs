use super::db_data::{col, AlbumRow};
use super::{values_err, SqlSession};
use async_trait::async_trait;
use domain::album::{Album, AlbumRepository};
use domain::store::StoreError;
use domain::value::{AlbumId, ArtistId};
use sea_orm::sea_query::{Alias, Expr, Order, Query, SelectStatement};

impl SqlSession {
    fn select_albums(&self) -> SelectStatement {
        Query::select()
            .columns([
                Alias::new(col::ID),
                Alias::new(col::TITLE),
                Alias::new(col::ARTIST_ID),
            ])
            .from(Alias::new(&self.tables().albums))
            .to_owned()
    }
}

#[async_trait]
impl AlbumRepository for SqlSession {
    async fn insert_album(&self, title: &str, artist_id: ArtistId) -> Result<AlbumId, StoreError> {
        let mut stmt = Query::insert();
        stmt.into_table(Alias::new(&self.tables().albums))
            .columns([Alias::new(col::TITLE), Alias::new(col::ARTIST_ID)])
            .values([title.into(), artist_id.as_i32().into()])
            .map_err(values_err)?;
        Ok(self.insert_returning_id(&mut stmt).await?.into())
    }

    async fn find_album(
        &self,
        title: &str,
        artist_id: ArtistId,
    ) -> Result<Option<Album>, StoreError> {
        let stmt = self
            .select_albums()
            .and_where(Expr::col(Alias::new(col::TITLE)).eq(title))
            .and_where(Expr::col(Alias::new(col::ARTIST_ID)).eq(artist_id.as_i32()))
            .to_owned();
        let row: Option<AlbumRow> = self.fetch_one(&stmt).await?;
        Ok(row.map(Into::into))
    }

    async fn list_albums(&self) -> Result<Vec<Album>, StoreError> {
        let stmt = self
            .select_albums()
            .order_by(Alias::new(col::ID), Order::Asc)
            .to_owned();
        let rows: Vec<AlbumRow> = self.fetch_all(&stmt).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
