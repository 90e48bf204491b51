use super::db_data::{col, LocationRow};
use super::{values_err, SqlSession};
use async_trait::async_trait;
use domain::location::{Location, LocationRepository, NewLocation};
use domain::store::StoreError;
use domain::value::LocationId;
use sea_orm::sea_query::{Alias, Expr, Order, Query, SelectStatement};

impl SqlSession {
    fn select_locations(&self) -> SelectStatement {
        Query::select()
            .columns([
                Alias::new(col::ID),
                Alias::new(col::NAME),
                Alias::new(col::LATITUDE),
                Alias::new(col::LONGITUDE),
            ])
            .from(Alias::new(&self.tables().locations))
            .to_owned()
    }
}

#[async_trait]
impl LocationRepository for SqlSession {
    async fn insert_location(&self, location: &NewLocation) -> Result<LocationId, StoreError> {
        let mut stmt = Query::insert();
        stmt.into_table(Alias::new(&self.tables().locations))
            .columns([
                Alias::new(col::NAME),
                Alias::new(col::LATITUDE),
                Alias::new(col::LONGITUDE),
            ])
            .values([
                location.name.as_str().into(),
                location.latitude.into(),
                location.longitude.into(),
            ])
            .map_err(values_err)?;
        Ok(self.insert_returning_id(&mut stmt).await?.into())
    }

    async fn find_location_by_name(&self, name: &str) -> Result<Option<Location>, StoreError> {
        let stmt = self
            .select_locations()
            .and_where(Expr::col(Alias::new(col::NAME)).eq(name))
            .to_owned();
        let row: Option<LocationRow> = self.fetch_one(&stmt).await?;
        Ok(row.map(Into::into))
    }

    async fn list_locations(&self) -> Result<Vec<Location>, StoreError> {
        let stmt = self
            .select_locations()
            .order_by(Alias::new(col::ID), Order::Asc)
            .to_owned();
        let rows: Vec<LocationRow> = self.fetch_all(&stmt).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
