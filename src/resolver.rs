// Location resolution: free-text city -> hotel candidates

use crate::models::HotelCandidate;
use crate::provider::HotelProvider;
use crate::search::SearchError;
use crate::supplier::{record_type, LocationRecord, LocationSearchResponse};
use tracing::{debug, error, info};

/// Type tag the provider puts on hotel entries of a location search.
pub const HOTEL_RESULT_TYPE: &str = "gaiaHotelResult";

const UNKNOWN_HOTEL_NAME: &str = "N/A";

pub async fn resolve_hotels(
    provider: &dyn HotelProvider,
    city: &str,
) -> Result<Vec<HotelCandidate>, SearchError> {
    let response = provider.search_locations(city).await.map_err(|e| {
        error!("Location search for {:?} failed: {}", city, e);
        SearchError::LocationLookup(e)
    })?;

    let candidates = hotel_candidates(&response);
    info!(
        "Location search for {:?} returned {} records, {} hotel candidates",
        city,
        response.records().len(),
        candidates.len()
    );
    Ok(candidates)
}

/// Keeps hotel records only, in provider order. Hotel records that do not
/// decode, or lack a hotel id or region id, are dropped since offers cannot
/// be requested for them.
pub fn hotel_candidates(response: &LocationSearchResponse) -> Vec<HotelCandidate> {
    response
        .records()
        .iter()
        .filter(|raw| record_type(raw) == Some(HOTEL_RESULT_TYPE))
        .filter_map(|raw| match LocationRecord::from_raw(raw) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Skipping undecodable hotel record: {}", e);
                None
            }
        })
        .filter_map(|record| candidate_from_record(&record))
        .collect()
}

fn candidate_from_record(record: &LocationRecord) -> Option<HotelCandidate> {
    let name = record
        .region_names
        .as_ref()
        .and_then(|names| names.display_name.clone())
        .unwrap_or_else(|| UNKNOWN_HOTEL_NAME.to_string());

    let (Some(id), Some(region_id)) = (record.hotel_id.clone(), record.city_id.clone()) else {
        debug!(
            "Skipping {}: hotel id {:?}, region id {:?}",
            name, record.hotel_id, record.city_id
        );
        return None;
    };

    let coordinates = record.coordinates.as_ref();
    Some(HotelCandidate {
        name,
        id,
        latitude: coordinates.and_then(|c| c.lat),
        longitude: coordinates.and_then(|c| c.long),
        region_id,
    })
}
