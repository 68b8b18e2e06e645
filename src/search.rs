// The search pipeline: resolve hotels, fetch each hotel's data, merge

use crate::aggregate::{merge_hotel_offers, HotelOffers, PriceError};
use crate::config::AppConfig;
use crate::models::{HotelCandidate, RoomOffer, SearchQuery};
use crate::offers::OfferFetcher;
use crate::provider::{ApiError, HotelProvider};
use crate::resolver::resolve_hotels;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Location search failed: {0}")]
    LocationLookup(ApiError),

    #[error("Invalid {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },

    #[error(transparent)]
    InvalidPrice(#[from] PriceError),
}

pub struct HotelSearchService {
    provider: Arc<dyn HotelProvider>,
    config: Arc<AppConfig>,
}

impl HotelSearchService {
    pub fn new(provider: Arc<dyn HotelProvider>, config: Arc<AppConfig>) -> Self {
        Self { provider, config }
    }

    /// Runs one search. Hotels are fetched with at most
    /// `max_concurrent_fetches` in flight; results are merged in the order
    /// the resolver returned them regardless of completion order.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<RoomOffer>, SearchError> {
        let candidates = resolve_hotels(self.provider.as_ref(), &query.city).await?;

        let fetcher = OfferFetcher::new(
            self.provider.as_ref(),
            &self.config.provider,
            self.config.price_selection,
        );
        let hotels: Vec<HotelOffers> = stream::iter(candidates)
            .map(|candidate| fetch_hotel(&fetcher, candidate, query))
            .buffered(self.config.max_concurrent_fetches.max(1))
            .collect()
            .await;

        let offers = merge_hotel_offers(hotels)?;
        info!("Search for {:?} produced {} offers", query.city, offers.len());
        Ok(offers)
    }
}

// Review first, then offers; the two calls are independent.
async fn fetch_hotel(
    fetcher: &OfferFetcher<'_>,
    candidate: HotelCandidate,
    query: &SearchQuery,
) -> HotelOffers {
    let review = fetcher.fetch_review(&candidate).await;
    let offers = fetcher.fetch_offers(&candidate, query).await;
    HotelOffers {
        candidate,
        review,
        offers,
    }
}
