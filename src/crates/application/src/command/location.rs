use crate::error::AppError;
use crate::resolve::agree;
use domain::location::NewLocation;
use domain::stage::Stage;
use domain::store::StageSession;
use log::{debug, info};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationReport {
    pub locations: usize,
    pub ambiguous_latitude: usize,
    pub ambiguous_longitude: usize,
}

/// Builds the location dimension.
///
/// Latitude and longitude are resolved independently: a coordinate is kept
/// only when every staged row with that location name carries the same
/// value, otherwise it is stored as null.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationResolver;

impl LocationResolver {
    pub async fn run(&self, session: &dyn StageSession) -> Result<LocationReport, AppError> {
        let storage = AppError::storage(Stage::Location);
        let names = session.staged_location_names().await.map_err(&storage)?;

        let mut report = LocationReport::default();
        for name in names {
            let observations = session.staged_coordinates(&name).await.map_err(&storage)?;

            let latitude = agree(observations.iter().map(|c| c.latitude));
            let longitude = agree(observations.iter().map(|c| c.longitude));
            if latitude.is_conflict() {
                debug!("Ambiguous latitude for location {:?}: {:?}", name, latitude);
                report.ambiguous_latitude += 1;
            }
            if longitude.is_conflict() {
                debug!("Ambiguous longitude for location {:?}: {:?}", name, longitude);
                report.ambiguous_longitude += 1;
            }

            let location = NewLocation {
                name,
                latitude: latitude.single().flatten(),
                longitude: longitude.single().flatten(),
            };
            session.insert_location(&location).await.map_err(&storage)?;
            report.locations += 1;
        }
        info!(
            "Inserted {} locations ({} ambiguous latitudes, {} ambiguous longitudes)",
            report.locations, report.ambiguous_latitude, report.ambiguous_longitude
        );
        Ok(report)
    }
}
