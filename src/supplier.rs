// Wire format of the hotel provider: request payloads and response documents.
// Response documents are lenient: every nested field is optional so that a
// structure mismatch surfaces as an absent value instead of a decode failure.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---------- location search ----------

// Records stay raw until their type tag is known: non-hotel records come in
// shapes of their own and must not fail the whole document.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LocationSearchResponse {
    #[serde(default)]
    pub sr: Option<Vec<Value>>,
}

impl LocationSearchResponse {
    pub fn records(&self) -> &[Value] {
        self.sr.as_deref().unwrap_or_default()
    }
}

/// The `@type` tag of a raw location record.
pub fn record_type(record: &Value) -> Option<&str> {
    record.get("@type")?.as_str()
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationRecord {
    #[serde(rename = "@type")]
    pub record_type: Option<String>,
    pub region_names: Option<RegionNames>,
    #[serde(deserialize_with = "opaque_id")]
    pub hotel_id: Option<String>,
    pub coordinates: Option<Coordinates>,
    #[serde(deserialize_with = "opaque_id")]
    pub city_id: Option<String>,
}

impl LocationRecord {
    pub fn from_raw(record: &Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(record.clone())
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegionNames {
    pub display_name: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Coordinates {
    #[serde(deserialize_with = "lenient_f64")]
    pub lat: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub long: Option<f64>,
}

// ---------- review summary ----------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummaryRequest {
    pub currency: String,
    pub eapid: u32,
    pub locale: String,
    pub site_id: u64,
    pub property_id: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ReviewSummaryResponse {
    pub data: Option<ReviewData>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewData {
    pub property_review_summaries: Option<Vec<PropertyReviewSummary>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertyReviewSummary {
    #[serde(rename = "overallScoreWithDescriptionA11y")]
    pub overall_score: Option<LocalizedValue>,
    pub review_summary_details: Option<Vec<ReviewSummaryDetail>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LocalizedValue {
    pub value: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewSummaryDetail {
    #[serde(deserialize_with = "lenient_f64")]
    pub rating_percentage: Option<f64>,
}

impl ReviewSummaryResponse {
    /// The provider reports the property-level summary as the first entry.
    pub fn first_summary(&self) -> Option<&PropertyReviewSummary> {
        self.data
            .as_ref()?
            .property_review_summaries
            .as_ref()?
            .first()
    }
}

// ---------- property offers ----------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateParts {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DestinationCoordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub coordinates: DestinationCoordinates,
    pub region_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomComposition {
    pub adults: u32,
    pub children: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyOffersRequest {
    pub currency: String,
    pub eapid: u32,
    pub locale: String,
    pub site_id: u64,
    pub property_id: String,
    pub check_in_date: DateParts,
    pub check_out_date: DateParts,
    pub destination: Destination,
    pub rooms: Vec<RoomComposition>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PropertyOffersResponse {
    pub data: Option<OffersData>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OffersData {
    pub property_offers: Option<PropertyOffers>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PropertyOffers {
    pub units: Option<Vec<OfferUnit>>,
}

impl PropertyOffersResponse {
    /// `None` when the document does not carry `data.propertyOffers.units`.
    pub fn units(&self) -> Option<&[OfferUnit]> {
        self.data
            .as_ref()?
            .property_offers
            .as_ref()?
            .units
            .as_deref()
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OfferUnit {
    pub header: Option<UnitHeader>,
    pub rate_plans: Option<Vec<RatePlan>>,
    pub unit_gallery: Option<UnitGallery>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UnitHeader {
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RatePlan {
    pub price_details: Option<Vec<PriceDetail>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PriceDetail {
    pub total_price_message: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UnitGallery {
    pub gallery: Option<Vec<GalleryEntry>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GalleryEntry {
    pub image: Option<GalleryImage>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GalleryImage {
    pub url: Option<String>,
}

impl OfferUnit {
    pub fn room_name(&self) -> Option<&str> {
        self.header.as_ref()?.text.as_deref()
    }

    /// Every price message of the unit, rate plans in listed order.
    pub fn price_messages(&self) -> impl Iterator<Item = &str> {
        self.rate_plans
            .iter()
            .flatten()
            .flat_map(|plan| plan.price_details.iter().flatten())
            .filter_map(|detail| detail.total_price_message.as_deref())
    }

    pub fn image_urls(&self) -> impl Iterator<Item = &str> {
        self.unit_gallery
            .iter()
            .flat_map(|gallery| gallery.gallery.iter().flatten())
            .filter_map(|entry| entry.image.as_ref()?.url.as_deref())
    }
}

// Identifiers arrive as strings or bare numbers; empty strings count as missing.
fn opaque_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
