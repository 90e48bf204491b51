use super::db_data::{col, ArtistRow};
use super::{values_err, SqlSession};
use async_trait::async_trait;
use domain::artist::{Artist, ArtistRepository};
use domain::store::StoreError;
use domain::value::ArtistId;
use sea_orm::sea_query::{Alias, Expr, Order, Query};

#[async_trait]
impl ArtistRepository for SqlSession {
    async fn insert_artist(&self, name: &str) -> Result<ArtistId, StoreError> {
        let mut stmt = Query::insert();
        stmt.into_table(Alias::new(&self.tables().artists))
            .columns([Alias::new(col::NAME)])
            .values([name.into()])
            .map_err(values_err)?;
        Ok(self.insert_returning_id(&mut stmt).await?.into())
    }

    async fn list_artists(&self) -> Result<Vec<Artist>, StoreError> {
        let stmt = Query::select()
            .columns([Alias::new(col::ID), Alias::new(col::NAME)])
            .from(Alias::new(&self.tables().artists))
            .order_by(Alias::new(col::ID), Order::Asc)
            .to_owned();
        let rows: Vec<ArtistRow> = self.fetch_all(&stmt).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_artist_by_name(&self, name: &str) -> Result<Option<Artist>, StoreError> {
        let stmt = Query::select()
            .columns([Alias::new(col::ID), Alias::new(col::NAME)])
            .from(Alias::new(&self.tables().artists))
            .and_where(Expr::col(Alias::new(col::NAME)).eq(name))
            .to_owned();
        let row: Option<ArtistRow> = self.fetch_one(&stmt).await?;
        Ok(row.map(Into::into))
    }
}
