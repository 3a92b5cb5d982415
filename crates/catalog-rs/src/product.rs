//! Product records and the list envelope decoder
//!
//! The catalog service returns loosely shaped JSON. Every record is validated
//! here, at the fetch boundary, so the rest of the application only ever sees
//! well-formed [`Product`] values.

use crate::error::CatalogError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Stable identity of a product
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A validated product from the catalog
///
/// Products are immutable once fetched; the UI only ever references them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identity key
    pub id: ProductId,
    /// Display name
    pub product_name: String,
    /// Category label (empty when the service omits it)
    pub category: String,
    /// Size label
    pub size: String,
    /// Unit of measure label
    pub per_unit: String,
    /// Price per unit, never negative
    pub rate: Decimal,
}

/// A record from the service that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Position in the original `products` array
    pub index: usize,
    /// Why the record was rejected
    pub reason: String,
}

/// Result of decoding a product list response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogPayload {
    /// Valid products, in the order the service returned them
    pub products: Vec<Product>,
    /// Records that were dropped
    pub rejected: Vec<RejectedRecord>,
}

/// Response envelope of the list endpoint
#[derive(Debug, Deserialize)]
struct ListEnvelope {
    products: Vec<serde_json::Value>,
}

/// A JSON scalar that the service sends either as a string or a number
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireScalar {
    Text(String),
    Number(serde_json::Number),
}

impl WireScalar {
    fn into_text(self) -> String {
        match self {
            WireScalar::Text(s) => s,
            WireScalar::Number(n) => n.to_string(),
        }
    }
}

/// Raw record shape as sent by the service
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRecord {
    /// Document key; preferred when present
    #[serde(rename = "_id", default)]
    key: Option<WireScalar>,
    /// Virtual id some backends send alongside `_id`
    #[serde(default)]
    id: Option<WireScalar>,
    product_name: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    size: Option<WireScalar>,
    #[serde(default)]
    per_unit: Option<WireScalar>,
    rate: WireScalar,
}

impl ProductRecord {
    fn validate(self) -> Result<Product, String> {
        let id = self
            .key
            .or(self.id)
            .map(WireScalar::into_text)
            .ok_or_else(|| "missing id".to_string())?;
        if id.trim().is_empty() {
            return Err("empty id".to_string());
        }

        let product_name = self.product_name.trim().to_string();
        if product_name.is_empty() {
            return Err(format!("product {} has an empty name", id));
        }

        let rate = parse_rate(self.rate)
            .map_err(|e| format!("product {} has an invalid rate: {}", id, e))?;

        Ok(Product {
            id: ProductId(id),
            product_name,
            category: self.category.unwrap_or_default(),
            size: self.size.map(WireScalar::into_text).unwrap_or_default(),
            per_unit: self.per_unit.map(WireScalar::into_text).unwrap_or_default(),
            rate,
        })
    }
}

/// Parse a rate that may arrive as a JSON number or a numeric string
fn parse_rate(raw: WireScalar) -> Result<Decimal, String> {
    let text = raw.into_text();
    let text = text.trim();
    let rate = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| format!("'{}' is not a number", text))?;

    if rate.is_sign_negative() && !rate.is_zero() {
        return Err(format!("{} is negative", rate));
    }
    Ok(rate.normalize())
}

/// Decode and validate a product list response body
///
/// Fails only when the body is not a `{ "products": [...] }` envelope.
/// Individual malformed records and duplicate ids are collected in
/// [`CatalogPayload::rejected`] instead of failing the whole catalog.
pub fn decode_catalog(body: &[u8]) -> Result<CatalogPayload, CatalogError> {
    let envelope: ListEnvelope = serde_json::from_slice(body)?;

    let mut payload = CatalogPayload::default();
    let mut seen = HashSet::new();

    for (index, value) in envelope.products.into_iter().enumerate() {
        let product = serde_json::from_value::<ProductRecord>(value)
            .map_err(|e| e.to_string())
            .and_then(ProductRecord::validate);

        match product {
            Ok(product) if !seen.insert(product.id.clone()) => {
                payload.rejected.push(RejectedRecord {
                    index,
                    reason: format!("duplicate id {}", product.id),
                });
            }
            Ok(product) => payload.products.push(product),
            Err(reason) => payload.rejected.push(RejectedRecord { index, reason }),
        }
    }

    Ok(payload)
}
