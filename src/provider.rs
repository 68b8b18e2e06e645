// Outbound client for the hotel provider API

use crate::config::ProviderConfig;
use crate::supplier::{
    LocationSearchResponse, PropertyOffersRequest, PropertyOffersResponse, ReviewSummaryRequest,
    ReviewSummaryResponse,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

pub const LOCATION_SEARCH_PATH: &str = "/locations/v3/search";
pub const PROPERTY_OFFERS_PATH: &str = "/properties/v2/get-offers";
pub const REVIEW_SUMMARY_PATH: &str = "/reviews/v3/get-summary";

pub const API_KEY_HEADER: &str = "X-RapidAPI-Key";
pub const API_HOST_HEADER: &str = "X-RapidAPI-Host";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("API error: {status_code} - {message}")]
    ApiResponseError { status_code: u16, message: String },

    #[error("Unexpected response body: {0}")]
    DecodeError(String),
}

impl ApiError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::ApiResponseError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid header value for {0}")]
    InvalidHeader(&'static str),

    #[error("Initialization error: {0}")]
    InitError(String),
}

/// The three provider calls the search pipeline depends on.
#[async_trait]
pub trait HotelProvider: Send + Sync + 'static {
    async fn search_locations(&self, query: &str) -> Result<LocationSearchResponse, ApiError>;

    async fn get_review_summary(
        &self,
        request: &ReviewSummaryRequest,
    ) -> Result<ReviewSummaryResponse, ApiError>;

    async fn get_offers(
        &self,
        request: &PropertyOffersRequest,
    ) -> Result<PropertyOffersResponse, ApiError>;
}

pub struct RapidApiClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl RapidApiClient {
    pub fn new(config: ProviderConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(&config.api_key)
                .map_err(|_| ClientError::InvalidHeader(API_KEY_HEADER))?,
        );
        headers.insert(
            API_HOST_HEADER,
            HeaderValue::from_str(&config.api_host)
                .map_err(|_| ClientError::InvalidHeader(API_HOST_HEADER))?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::InitError(e.to_string()))?;

        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(self.config.timeout_ms)
            } else {
                ApiError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        debug!("{} responded with {}", path, status);
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::ApiResponseError {
                status_code: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::DecodeError(e.to_string()))
    }
}

#[async_trait]
impl HotelProvider for RapidApiClient {
    async fn search_locations(&self, query: &str) -> Result<LocationSearchResponse, ApiError> {
        let request = self
            .http
            .get(self.url(LOCATION_SEARCH_PATH))
            .query(&[("q", query), ("locale", self.config.locale.as_str())]);
        self.send(request, LOCATION_SEARCH_PATH).await
    }

    async fn get_review_summary(
        &self,
        request: &ReviewSummaryRequest,
    ) -> Result<ReviewSummaryResponse, ApiError> {
        let request = self.http.post(self.url(REVIEW_SUMMARY_PATH)).json(request);
        self.send(request, REVIEW_SUMMARY_PATH).await
    }

    async fn get_offers(
        &self,
        request: &PropertyOffersRequest,
    ) -> Result<PropertyOffersResponse, ApiError> {
        let request = self.http.post(self.url(PROPERTY_OFFERS_PATH)).json(request);
        self.send(request, PROPERTY_OFFERS_PATH).await
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::supplier::{DateParts, Destination, DestinationCoordinates, RoomComposition};
    use axum::extract::{Query, State};
    use axum::http::{HeaderMap as AxumHeaders, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Debug, Clone)]
    struct Seen {
        path: String,
        api_key: Option<String>,
        api_host: Option<String>,
        content_type: Option<String>,
        query: HashMap<String, String>,
        body: Option<Value>,
    }

    type SeenLog = Arc<Mutex<Vec<Seen>>>;

    fn header(headers: &AxumHeaders, name: &str) -> Option<String> {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    }

    fn seen(path: &str, headers: &AxumHeaders) -> Seen {
        Seen {
            path: path.to_string(),
            api_key: header(headers, API_KEY_HEADER),
            api_host: header(headers, API_HOST_HEADER),
            content_type: header(headers, "content-type"),
            query: HashMap::new(),
            body: None,
        }
    }

    // Plays the provider on an ephemeral local port.
    async fn spawn_fake_provider(search_status: StatusCode) -> (String, SeenLog) {
        let log: SeenLog = Arc::new(Mutex::new(Vec::new()));

        let app = Router::new()
            .route(
                LOCATION_SEARCH_PATH,
                get(
                    move |State(log): State<SeenLog>,
                          headers: AxumHeaders,
                          Query(query): Query<HashMap<String, String>>| async move {
                        let mut entry = seen(LOCATION_SEARCH_PATH, &headers);
                        entry.query = query;
                        log.lock().await.push(entry);
                        (
                            search_status,
                            Json(json!({ "sr": [ { "@type": "gaiaHotelResult", "hotelId": "1" } ] })),
                        )
                    },
                ),
            )
            .route(
                REVIEW_SUMMARY_PATH,
                post(
                    |State(log): State<SeenLog>, headers: AxumHeaders, Json(body): Json<Value>| async move {
                        let mut entry = seen(REVIEW_SUMMARY_PATH, &headers);
                        entry.body = Some(body);
                        log.lock().await.push(entry);
                        StatusCode::FORBIDDEN
                    },
                ),
            )
            .route(
                PROPERTY_OFFERS_PATH,
                post(
                    |State(log): State<SeenLog>, headers: AxumHeaders, Json(body): Json<Value>| async move {
                        let mut entry = seen(PROPERTY_OFFERS_PATH, &headers);
                        entry.body = Some(body);
                        log.lock().await.push(entry);
                        Json(json!({ "data": { "propertyOffers": { "units": [] } } }))
                    },
                ),
            )
            .with_state(log.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), log)
    }

    fn client_for(base_url: String, api_key: &str) -> RapidApiClient {
        RapidApiClient::new(ProviderConfig {
            base_url,
            api_key: api_key.to_string(),
            ..ProviderConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_search_locations_sends_query_and_headers() {
        let (base_url, log) = spawn_fake_provider(StatusCode::OK).await;
        let client = client_for(base_url, "secret");

        let response = client.search_locations("Paris").await.unwrap();
        assert_eq!(response.records().len(), 1);

        let log = log.lock().await;
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].path, LOCATION_SEARCH_PATH);
        assert_eq!(log[0].query.get("q").map(String::as_str), Some("Paris"));
        assert_eq!(log[0].query.get("locale").map(String::as_str), Some("en_US"));
        assert_eq!(log[0].api_key.as_deref(), Some("secret"));
        assert_eq!(log[0].api_host.as_deref(), Some("hotels4.p.rapidapi.com"));
        assert_eq!(log[0].content_type.as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let (base_url, _log) = spawn_fake_provider(StatusCode::INTERNAL_SERVER_ERROR).await;
        let client = client_for(base_url, "secret");

        let err = client.search_locations("Paris").await.unwrap_err();
        assert_eq!(err.status_code(), Some(500));
    }

    #[tokio::test]
    async fn test_empty_key_is_still_sent() {
        let (base_url, log) = spawn_fake_provider(StatusCode::OK).await;
        let client = client_for(base_url, "");

        let request = ReviewSummaryRequest {
            currency: "USD".to_string(),
            eapid: 1,
            locale: "en_US".to_string(),
            site_id: 300000001,
            property_id: "123".to_string(),
        };
        let err = client.get_review_summary(&request).await.unwrap_err();
        assert_eq!(err.status_code(), Some(403));

        let log = log.lock().await;
        assert_eq!(log[0].api_key.as_deref(), Some(""));
        assert_eq!(
            log[0].body,
            Some(json!({
                "currency": "USD",
                "eapid": 1,
                "locale": "en_US",
                "siteId": 300000001,
                "propertyId": "123"
            }))
        );
    }

    #[tokio::test]
    async fn test_get_offers_posts_payload() {
        let (base_url, log) = spawn_fake_provider(StatusCode::OK).await;
        let client = client_for(base_url, "secret");

        let request = PropertyOffersRequest {
            currency: "USD".to_string(),
            eapid: 1,
            locale: "en_US".to_string(),
            site_id: 300000001,
            property_id: "123".to_string(),
            check_in_date: DateParts { day: 1, month: 6, year: 2025 },
            check_out_date: DateParts { day: 5, month: 6, year: 2025 },
            destination: Destination {
                coordinates: DestinationCoordinates {
                    latitude: Some(48.85),
                    longitude: Some(2.35),
                },
                region_id: "456".to_string(),
            },
            rooms: vec![RoomComposition {
                adults: 2,
                children: vec![],
            }],
        };

        let response = client.get_offers(&request).await.unwrap();
        assert_eq!(response.units().map(|units| units.len()), Some(0));

        let log = log.lock().await;
        let body = log[0].body.as_ref().unwrap();
        assert_eq!(log[0].path, PROPERTY_OFFERS_PATH);
        assert_eq!(body["propertyId"], json!("123"));
        assert_eq!(body["destination"]["coordinates"]["latitude"], json!(48.85));
        assert_eq!(body["rooms"][0]["adults"], json!(2));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_network_error() {
        let client = client_for("http://127.0.0.1:1".to_string(), "secret");
        let err = client.search_locations("Paris").await.unwrap_err();
        assert!(matches!(err, ApiError::NetworkError(_)));
    }

    #[test]
    fn test_invalid_key_header_is_rejected() {
        let result = RapidApiClient::new(ProviderConfig {
            api_key: "bad\nkey".to_string(),
            ..ProviderConfig::default()
        });
        assert!(matches!(result, Err(ClientError::InvalidHeader(API_KEY_HEADER))));
    }
}
