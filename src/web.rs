// Inbound HTTP surface: the entry form and the search submission

use crate::models::SearchQuery;
use crate::render::{index_page, results_page};
use crate::search::{HotelSearchService, SearchError};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::warn;

pub const LOCATION_ERROR_MESSAGE: &str = "Error searching for hotels";
pub const PRICE_ERROR_MESSAGE: &str = "Error reading hotel offer prices";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub city: String,
    pub checkin: String,
    pub checkout: String,
    pub adults: String,
}

pub fn router(service: Arc<HotelSearchService>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/search", post(search))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn index() -> Html<String> {
    Html(index_page())
}

async fn search(
    State(service): State<Arc<HotelSearchService>>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, SearchError> {
    let query = SearchQuery::parse(&form.city, &form.checkin, &form.checkout, &form.adults)?;
    let offers = service.search(&query).await?;
    Ok(Html(results_page(&offers)))
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        match self {
            SearchError::LocationLookup(_) => {
                (StatusCode::BAD_GATEWAY, LOCATION_ERROR_MESSAGE).into_response()
            }
            SearchError::InvalidInput { .. } => {
                warn!("Rejected search: {}", self);
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            SearchError::InvalidPrice(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, PRICE_ERROR_MESSAGE).into_response()
            }
        }
    }
}
