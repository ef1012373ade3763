//! DTOs for listing links that share a destination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::variant_ranker::RankedVariant;

#[derive(Debug, Deserialize)]
pub struct VariantsRequest {
    #[serde(alias = "longUrl")]
    pub destination: String,
}

#[derive(Debug, Serialize)]
pub struct VariantsResponse {
    pub variants: Vec<VariantItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantItem {
    pub short_url: String,
    pub code: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_clicks: Option<i64>,
    pub has_password: bool,
    pub is_expired: bool,
    pub is_maxed_out: bool,
    pub rank: usize,
    pub is_most_popular: bool,
}

impl VariantItem {
    /// Builds the item; `short_url` comes from the service's base URL.
    pub fn new(variant: RankedVariant, short_url: String) -> Self {
        let link = variant.link;
        Self {
            short_url,
            is_expired: link.is_expired(),
            is_maxed_out: link.is_maxed_out(),
            has_password: link.has_password(),
            code: link.code,
            click_count: link.click_count,
            created_at: link.created_at,
            expires_at: link.expires_at,
            max_clicks: link.max_clicks,
            rank: variant.rank,
            is_most_popular: variant.is_most_popular,
        }
    }
}
