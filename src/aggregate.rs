// Merges per-hotel results into the flat list handed to the presentation layer

use crate::models::{HotelCandidate, ReviewSummary, RoomOffer, UnitOffer};
use crate::offers::OfferError;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug, PartialEq)]
#[error("Price {display:?} is not numeric")]
pub struct PriceError {
    pub display: String,
}

/// Everything fetched for one hotel.
#[derive(Debug)]
pub struct HotelOffers {
    pub candidate: HotelCandidate,
    pub review: ReviewSummary,
    pub offers: Result<Vec<UnitOffer>, OfferError>,
}

/// Numeric value of a display price such as `"$1,234.00 total"`: first
/// whitespace-delimited token, thousands separators removed, currency symbols
/// trimmed from either end.
pub fn parse_price(display: &str) -> Result<f64, PriceError> {
    let token = display.split_whitespace().next().unwrap_or_default();
    let digits = token
        .replace(',', "")
        .trim_matches(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
        .to_string();

    digits.parse::<f64>().map_err(|_| PriceError {
        display: display.to_string(),
    })
}

/// Flattens in hotel order, then unit order. A hotel whose offer fetch failed
/// contributes nothing. An unparseable price fails the whole merge.
pub fn merge_hotel_offers(hotels: Vec<HotelOffers>) -> Result<Vec<RoomOffer>, PriceError> {
    let mut merged = Vec::new();

    for hotel in hotels {
        let units = match hotel.offers {
            Ok(units) => units,
            Err(e) => {
                debug!("Hotel {} contributes no offers: {}", hotel.candidate.id, e);
                continue;
            }
        };

        for unit in units {
            let price_numeric = parse_price(&unit.price_display).map_err(|e| {
                error!("Hotel {}: {}", hotel.candidate.id, e);
                e
            })?;
            merged.push(RoomOffer {
                room_name: unit.room_name,
                price_display: unit.price_display,
                price_numeric,
                image_url: unit.image_url,
                hotel_name: hotel.candidate.name.clone(),
                score: hotel.review.score.clone(),
                rating_percentage: hotel.review.rating_percentage,
            });
        }
    }

    Ok(merged)
}
