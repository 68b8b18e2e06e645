// Hotel offer search: resolves a city to hotels through the provider API,
// fetches reviews and room offers per hotel and merges them for display

pub mod aggregate;
pub mod config;
pub mod models;
pub mod offers;
pub mod provider;
pub mod render;
pub mod resolver;
pub mod search;
pub mod supplier;
pub mod web;

// Re-export key types for convenience
pub use aggregate::{merge_hotel_offers, parse_price, HotelOffers, PriceError};
pub use config::{AppConfig, ConfigError, ProviderConfig};
pub use models::{HotelCandidate, ReviewSummary, RoomOffer, SearchQuery, UnitOffer};
pub use offers::{OfferError, OfferFetcher, PriceSelection};
pub use provider::{ApiError, ClientError, HotelProvider, RapidApiClient};
pub use search::{HotelSearchService, SearchError};
