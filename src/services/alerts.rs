//! Category alert check.
//!
//! Stub: evaluates a fixed table instead of live data and only logs. Nothing
//! is delivered to anyone.

use tracing::instrument;

pub const CATEGORY_FAVORITES_LIMIT: i64 = 50;

const SAMPLE_CATEGORIES: &[(&str, i64)] = &[
    ("Eletrônicos", 42),
    ("Moda", 55),
    ("Casa", 30),
    ("Beleza", 61),
    ("Esportes", 61),
];

/// Returns the categories above [`CATEGORY_FAVORITES_LIMIT`], logging a warning for each.
#[instrument(name = "alerts.check_categories")]
pub fn check_category_alerts() -> Vec<String> {
    categories_over_limit(SAMPLE_CATEGORIES, CATEGORY_FAVORITES_LIMIT)
        .into_iter()
        .inspect(|name| {
            tracing::warn!(
                category = %name,
                limit = CATEGORY_FAVORITES_LIMIT,
                "Category exceeded favorites limit"
            );
        })
        .collect()
}

fn categories_over_limit(categories: &[(&str, i64)], limit: i64) -> Vec<String> {
    categories
        .iter()
        .filter(|(_, favorites)| *favorites > limit)
        .map(|(name, _)| name.to_string())
        .collect()
}
