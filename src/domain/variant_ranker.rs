//! Ranking of links that share one destination URL.

use chrono::{DateTime, Utc};
use std::cmp::{Ordering, Reverse};

use crate::domain::entities::ShortLink;

/// A usable link with its position among its siblings.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedVariant {
    pub link: ShortLink,
    /// 1-based position.
    pub rank: usize,
    /// Set only on rank 1, and only when more than one variant survived.
    pub is_most_popular: bool,
}

/// Output of [`rank_variants`]: ordered usable links plus codes of stale ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedVariants {
    pub ranked: Vec<RankedVariant>,
    pub stale_codes: Vec<String>,
}

/// Orders two usable variants.
///
/// Open links first, then unlimited ones, then by popularity. Creation time
/// and code break the remaining ties so the order never depends on how the
/// store returned the rows.
pub fn compare_variants(a: &ShortLink, b: &ShortLink) -> Ordering {
    let key = |link: &ShortLink| {
        (
            link.has_password(),
            link.max_clicks.is_some(),
            Reverse(link.click_count),
        )
    };

    key(a)
        .cmp(&key(b))
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.code.cmp(&b.code))
}

/// Splits `links` into ranked usable variants and stale codes.
///
/// Stale means expired at `now` or quota-exhausted. Deleting the stale codes is
/// left to the caller.
pub fn rank_variants(links: Vec<ShortLink>, now: DateTime<Utc>) -> RankedVariants {
    let (stale, mut valid): (Vec<ShortLink>, Vec<ShortLink>) =
        links.into_iter().partition(|link| link.is_stale_at(now));

    valid.sort_by(compare_variants);

    let total = valid.len();
    let ranked = valid
        .into_iter()
        .enumerate()
        .map(|(index, link)| RankedVariant {
            link,
            rank: index + 1,
            is_most_popular: index == 0 && total > 1,
        })
        .collect();

    RankedVariants {
        ranked,
        stale_codes: stale.into_iter().map(|link| link.code).collect(),
    }
}
