//! Response text generation
//!
//! Turns a classified intent plus the candidate product list into
//! human-readable text and follow-up suggestions. Deliberately
//! opinionated: weak input gets told so instead of hand-waving.

use serde::{Deserialize, Serialize};

use shop_assistant_core::{Intent, IntentKind, Product, SortKey, SortOrder};

/// Generated reply for one turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedResponse {
    pub text: String,
    pub suggestions: Vec<String>,
}

/// Stateless response generator
pub struct ResponseGenerator;

impl ResponseGenerator {
    /// Render a reply for the intent over the (already ranked) products
    pub fn generate(intent: &Intent, products: &[Product]) -> GeneratedResponse {
        let mut suggestions: Vec<String> = Vec::new();

        let text = match intent.kind {
            IntentKind::ShowProducts => {
                suggestions = Self::contextual_suggestions(intent, products);
                Self::product_summary(intent, products)
            }
            IntentKind::ShowCategories => {
                suggestions = vec![
                    "Show jackets".into(),
                    "Show hoodies".into(),
                    "Show everything".into(),
                ];
                "You can browse by category. Available: Jackets, Hoodies, Pants, Accessories."
                    .into()
            }
            IntentKind::ShowRecommendations => {
                suggestions = vec![
                    "Best sellers".into(),
                    "Trending now".into(),
                    "Under ₹1000".into(),
                ];
                Self::recommendation_listing(intent, products)
            }
            IntentKind::PriceQuery => {
                suggestions = vec![
                    "Cheaper options".into(),
                    "Premium picks".into(),
                    "Compare prices".into(),
                ];
                Self::price_statistics(intent, products)
            }
            IntentKind::BrandQuery => match &intent.entities.brand {
                Some(brand) => format!("Showing results from {brand}."),
                None => "You asked about brands, but didn't specify one.".into(),
            },
            IntentKind::FilterQuery | IntentKind::Comparison | IntentKind::GeneralHelp => {
                suggestions = vec![
                    "Jackets under ₹2000".into(),
                    "Top rated hoodies".into(),
                    "Trending products".into(),
                ];
                "I help you find products efficiently. Categories, prices, brands, \
                 comparisons, recommendations. Ask clearly."
                    .into()
            }
        };

        suggestions.truncate(4);
        GeneratedResponse { text, suggestions }
    }

    fn product_summary(intent: &Intent, products: &[Product]) -> String {
        if products.is_empty() {
            return "No products matched your filters. Loosen your constraints or change category."
                .into();
        }

        let limit = intent.parameters.limit.unwrap_or(5);
        let plural = if products.len() > 1 { "s" } else { "" };
        let mut summary = format!("Found {} product{plural}", products.len());

        if let Some(category) = &intent.entities.category {
            summary.push_str(&format!(" in {category}"));
        }
        if let Some(brand) = &intent.entities.brand {
            summary.push_str(&format!(" by {brand}"));
        }
        if let Some(range) = &intent.entities.price_range {
            match (range.min, range.max) {
                (Some(min), Some(max)) => {
                    summary.push_str(&format!(" between ₹{min:.0}-₹{max:.0}"))
                }
                (None, Some(max)) => summary.push_str(&format!(" under ₹{max:.0}")),
                (Some(min), None) => summary.push_str(&format!(" above ₹{min:.0}")),
                (None, None) => {}
            }
        }

        let items = products
            .iter()
            .take(limit)
            .map(|p| format!("{} — ₹{:.0}", p.name, p.price))
            .collect::<Vec<_>>()
            .join(", ");

        format!("{summary}. Top results: {items}.")
    }

    fn recommendation_listing(intent: &Intent, products: &[Product]) -> String {
        if products.is_empty() {
            return "No data to recommend anything meaningful. Browse first.".into();
        }

        let sort_by = intent.parameters.sort_by.unwrap_or(SortKey::Rating);
        let sort_order = intent.parameters.sort_order.unwrap_or(SortOrder::Desc);
        let limit = intent.parameters.limit.unwrap_or(3);

        let mut ranked: Vec<&Product> = products.iter().collect();
        ranked.sort_by(|a, b| {
            let ordering = match sort_by {
                SortKey::Price => a.price.partial_cmp(&b.price),
                SortKey::Rating => a.rating.partial_cmp(&b.rating),
                SortKey::Name => Some(a.name.cmp(&b.name)),
            }
            .unwrap_or(std::cmp::Ordering::Equal);
            match sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        ranked.truncate(limit);

        let sort_label = match sort_by {
            SortKey::Price => "price",
            SortKey::Rating => "rating",
            SortKey::Name => "name",
        };

        let mut text = format!("Top {} recommendations based on {sort_label}:", ranked.len());
        for (i, product) in ranked.iter().enumerate() {
            text.push_str(&format!(
                "\n{}. {} | ₹{:.0} | ⭐ {:.1}",
                i + 1,
                product.name,
                product.price,
                product.rating
            ));
            if !product.brand.is_empty() {
                text.push_str(&format!(" | {}", product.brand));
            }
        }
        text.push_str("\n\nSay the product name if you want details.");
        text
    }

    fn price_statistics(intent: &Intent, products: &[Product]) -> String {
        if intent.entities.price_range.is_none() {
            return "You asked about price, but gave no range.".into();
        }
        if products.is_empty() {
            return "Nothing exists in that price range.".into();
        }

        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0;
        for product in products {
            min = min.min(product.price);
            max = max.max(product.price);
            sum += product.price;
        }
        let avg = (sum / products.len() as f32).round();

        format!(
            "Prices range from ₹{min:.0} to ₹{max:.0}. Average: ₹{avg:.0}. Total products: {}.",
            products.len()
        )
    }

    fn contextual_suggestions(intent: &Intent, products: &[Product]) -> Vec<String> {
        let mut suggestions = Vec::new();

        if let Some(category) = &intent.entities.category {
            suggestions.push(format!("More {category}"));
        }
        if intent.entities.price_range.is_some() {
            suggestions.push("Same price, better rated".into());
            suggestions.push("Cheaper alternatives".into());
        }
        if products.len() > 5 {
            suggestions.push("Show more results".into());
        }
        suggestions.push("Sort by price".into());
        suggestions.push("Sort by rating".into());

        suggestions
    }
}
