use crate::store::StoreError;
use crate::value::LocationId;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn insert_location(&self, location: &NewLocation) -> Result<LocationId, StoreError>;

    async fn find_location_by_name(&self, name: &str) -> Result<Option<Location>, StoreError>;

    /// All locations ordered by id.
    async fn list_locations(&self) -> Result<Vec<Location>, StoreError>;
}
