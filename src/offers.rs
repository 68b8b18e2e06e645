// Per-hotel fetching: review summary and room offers

use crate::aggregate::parse_price;
use crate::config::ProviderConfig;
use crate::models::{date_parts, HotelCandidate, ReviewSummary, SearchQuery, UnitOffer};
use crate::provider::{ApiError, HotelProvider};
use crate::supplier::{
    Destination, DestinationCoordinates, OfferUnit, PropertyOffersRequest, PropertyOffersResponse,
    ReviewSummaryRequest, ReviewSummaryResponse, RoomComposition,
};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

/// Why a hotel contributes no offers. Never fatal for the search as a whole.
#[derive(Error, Debug)]
pub enum OfferError {
    #[error("offer request failed: {0}")]
    Request(#[from] ApiError),

    #[error("response carries no data.propertyOffers.units")]
    MissingUnits,
}

/// How a representative price is chosen when a room unit lists several.
/// The gallery image is always the first listed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceSelection {
    /// First price message of the first rate plan that has one.
    #[default]
    FirstListed,
    /// Cheapest parseable price message; falls back to the first listed.
    Lowest,
}

impl FromStr for PriceSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "first_listed" => Ok(PriceSelection::FirstListed),
            "lowest" => Ok(PriceSelection::Lowest),
            other => Err(other.to_string()),
        }
    }
}

impl PriceSelection {
    pub fn select<'a>(&self, unit: &'a OfferUnit) -> Option<&'a str> {
        match self {
            PriceSelection::FirstListed => unit.price_messages().next(),
            PriceSelection::Lowest => unit
                .price_messages()
                .filter_map(|message| parse_price(message).ok().map(|value| (value, message)))
                .min_by(|a, b| a.0.total_cmp(&b.0))
                .map(|(_, message)| message)
                .or_else(|| unit.price_messages().next()),
        }
    }
}

pub fn review_request(config: &ProviderConfig, candidate: &HotelCandidate) -> ReviewSummaryRequest {
    ReviewSummaryRequest {
        currency: config.currency.clone(),
        eapid: config.eapid,
        locale: config.locale.clone(),
        site_id: config.site_id,
        property_id: candidate.id.clone(),
    }
}

pub fn offers_request(
    config: &ProviderConfig,
    candidate: &HotelCandidate,
    query: &SearchQuery,
) -> PropertyOffersRequest {
    PropertyOffersRequest {
        currency: config.currency.clone(),
        eapid: config.eapid,
        locale: config.locale.clone(),
        site_id: config.site_id,
        property_id: candidate.id.clone(),
        check_in_date: date_parts(query.checkin),
        check_out_date: date_parts(query.checkout),
        destination: Destination {
            coordinates: DestinationCoordinates {
                latitude: candidate.latitude,
                longitude: candidate.longitude,
            },
            region_id: candidate.region_id.clone(),
        },
        rooms: vec![RoomComposition {
            adults: query.adults,
            children: Vec::new(),
        }],
    }
}

pub fn review_summary(response: &ReviewSummaryResponse) -> ReviewSummary {
    let Some(summary) = response.first_summary() else {
        return ReviewSummary::default();
    };

    ReviewSummary {
        score: summary
            .overall_score
            .as_ref()
            .and_then(|score| score.value.clone()),
        rating_percentage: summary
            .review_summary_details
            .as_ref()
            .and_then(|details| details.first())
            .and_then(|detail| detail.rating_percentage),
    }
}

/// One offer per priced room unit, in provider order.
pub fn unit_offers(
    response: &PropertyOffersResponse,
    selection: PriceSelection,
) -> Result<Vec<UnitOffer>, OfferError> {
    let units = response.units().ok_or(OfferError::MissingUnits)?;

    Ok(units
        .iter()
        .filter_map(|unit| {
            let Some(price) = selection.select(unit) else {
                debug!("Room unit {:?} has no price, skipping", unit.room_name());
                return None;
            };
            Some(UnitOffer {
                room_name: unit.room_name().map(str::to_string),
                price_display: price.to_string(),
                image_url: unit.image_urls().next().map(str::to_string),
            })
        })
        .collect())
}

pub struct OfferFetcher<'a> {
    provider: &'a dyn HotelProvider,
    config: &'a ProviderConfig,
    selection: PriceSelection,
}

impl<'a> OfferFetcher<'a> {
    pub fn new(
        provider: &'a dyn HotelProvider,
        config: &'a ProviderConfig,
        selection: PriceSelection,
    ) -> Self {
        Self {
            provider,
            config,
            selection,
        }
    }

    /// Absent score and percentage when the call fails.
    pub async fn fetch_review(&self, candidate: &HotelCandidate) -> ReviewSummary {
        let request = review_request(self.config, candidate);
        match self.provider.get_review_summary(&request).await {
            Ok(response) => review_summary(&response),
            Err(e) => {
                warn!("Review summary for hotel {} unavailable: {}", candidate.id, e);
                ReviewSummary::default()
            }
        }
    }

    pub async fn fetch_offers(
        &self,
        candidate: &HotelCandidate,
        query: &SearchQuery,
    ) -> Result<Vec<UnitOffer>, OfferError> {
        let request = offers_request(self.config, candidate, query);
        let response = self.provider.get_offers(&request).await?;
        let offers = unit_offers(&response, self.selection)?;
        debug!("Hotel {} returned {} offers", candidate.id, offers.len());
        Ok(offers)
    }
}
