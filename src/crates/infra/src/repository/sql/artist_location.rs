use super::db_data::{col, ArtistLocationRow};
use super::{values_err, SqlSession};
use async_trait::async_trait;
use domain::artist_location::{ArtistLocation, ArtistLocationRepository};
use domain::store::StoreError;
use domain::value::{ArtistId, ArtistLocationId, LocationId};
use sea_orm::sea_query::{Alias, Order, Query};

#[async_trait]
impl ArtistLocationRepository for SqlSession {
    async fn insert_artist_location(
        &self,
        artist_id: ArtistId,
        location_id: LocationId,
    ) -> Result<ArtistLocationId, StoreError> {
        let mut stmt = Query::insert();
        stmt.into_table(Alias::new(&self.tables().artist_locations))
            .columns([Alias::new(col::ARTIST_ID), Alias::new(col::LOCATION_ID)])
            .values([artist_id.as_i32().into(), location_id.as_i32().into()])
            .map_err(values_err)?;
        Ok(self.insert_returning_id(&mut stmt).await?.into())
    }

    async fn list_artist_locations(&self) -> Result<Vec<ArtistLocation>, StoreError> {
        let stmt = Query::select()
            .columns([
                Alias::new(col::ID),
                Alias::new(col::ARTIST_ID),
                Alias::new(col::LOCATION_ID),
            ])
            .from(Alias::new(&self.tables().artist_locations))
            .order_by(Alias::new(col::ID), Order::Asc)
            .to_owned();
        let rows: Vec<ArtistLocationRow> = self.fetch_all(&stmt).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
