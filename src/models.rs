// Domain records that live for the duration of one search

use crate::search::SearchError;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub const STAY_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub city: String,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    pub adults: u32,
}

impl SearchQuery {
    /// Parses raw form input. Dates must be `YYYY-MM-DD` and adults a
    /// non-negative integer; the city is passed through untouched.
    pub fn parse(
        city: &str,
        checkin: &str,
        checkout: &str,
        adults: &str,
    ) -> Result<Self, SearchError> {
        Ok(Self {
            city: city.to_string(),
            checkin: parse_stay_date("checkin", checkin)?,
            checkout: parse_stay_date("checkout", checkout)?,
            adults: adults
                .trim()
                .parse()
                .map_err(|_| SearchError::InvalidInput {
                    field: "adults",
                    value: adults.to_string(),
                })?,
        })
    }
}

fn parse_stay_date(field: &'static str, value: &str) -> Result<NaiveDate, SearchError> {
    NaiveDate::parse_from_str(value.trim(), STAY_DATE_FORMAT).map_err(|_| {
        SearchError::InvalidInput {
            field,
            value: value.to_string(),
        }
    })
}

/// Day/month/year split of a stay date, as the provider expects it.
pub fn date_parts(date: NaiveDate) -> crate::supplier::DateParts {
    crate::supplier::DateParts {
        day: date.day(),
        month: date.month(),
        year: date.year(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotelCandidate {
    pub name: String,
    pub id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub region_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub score: Option<String>,
    pub rating_percentage: Option<f64>,
}

// A room unit as returned for one hotel, before hotel/review enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitOffer {
    pub room_name: Option<String>,
    pub price_display: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomOffer {
    pub room_name: Option<String>,
    pub price_display: String,
    pub price_numeric: f64,
    pub image_url: Option<String>,
    pub hotel_name: String,
    pub score: Option<String>,
    pub rating_percentage: Option<f64>,
}
