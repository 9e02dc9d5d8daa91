use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use storefront_core::{CategoryKey, ProductId};

/// Product record as served by `/products` and `/products/{category}`.
///
/// Records from the aggregated `/products` listing carry the category key
/// they were loaded from in `_cat`; per-category listings usually omit it.
///
/// The product files are hand-edited: descriptive fields that are `null` or of
/// the wrong type fall back to their empty value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    pub price: f64,
    /// Human-readable category label ("Ayakkabı").
    #[serde(default, deserialize_with = "string_or_empty")]
    pub category: String,
    #[serde(rename = "_cat", default, skip_serializing_if = "Option::is_none")]
    pub category_key: Option<CategoryKey>,
    /// Relative image paths, main image first.
    #[serde(default, deserialize_with = "strings_or_empty")]
    pub images: Vec<String>,
    /// Unreadable entries are dropped.
    #[serde(
        default,
        deserialize_with = "stock_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub stock: Option<Vec<StockEntry>>,
    /// Static rating shipped with the product file; only used as a fallback.
    #[serde(
        default,
        deserialize_with = "number_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub description: String,
}

impl Product {
    pub fn in_category(&self, key: &CategoryKey) -> bool {
        self.category_key.as_ref() == Some(key)
    }

    /// Stock entries in source order (empty when the product has none).
    pub fn stock_entries(&self) -> &[StockEntry] {
        self.stock.as_deref().unwrap_or(&[])
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// One size of a product and whether it can currently be bought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    pub size: String,
    #[serde(rename = "isAvailable", default)]
    pub is_available: bool,
}

/// A user comment from `/comments/{category}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<RawRating>,
    /// Only string bodies are kept; anything else reads as no text.
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<String>,
}

impl Comment {
    /// The rating as a usable star value: finite and within `[1, 5]`.
    pub fn valid_rating(&self) -> Option<f64> {
        self.rating
            .as_ref()
            .and_then(RawRating::as_number)
            .filter(|r| r.is_finite() && (1.0..=5.0).contains(r))
    }

    /// Whether the comment has a body worth showing.
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

/// Rating exactly as it appeared on the wire.
///
/// The comment files are hand-edited, so a rating may be a number, a numeric
/// string (`"4"`), or junk. Only the numeric interpretation counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRating {
    Number(f64),
    Text(String),
    Other(JsonValue),
}

impl RawRating {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawRating::Number(n) => Some(*n),
            RawRating::Text(s) => s.trim().parse::<f64>().ok(),
            RawRating::Other(_) => None,
        }
    }
}

impl From<f64> for RawRating {
    fn from(value: f64) -> Self {
        RawRating::Number(value)
    }
}

fn number_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(value.as_f64())
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    string_or_none(deserializer).map(Option::unwrap_or_default)
}

fn strings_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                JsonValue::String(s) => Some(s),
                _ => None,
            })
            .collect()),
        _ => Ok(Vec::new()),
    }
}

fn stock_or_none<'de, D>(deserializer: D) -> Result<Option<Vec<StockEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}
