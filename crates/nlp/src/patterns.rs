//! Static pattern tables for the intent detector
//!
//! Compiled once at first use and consulted read-only. Category patterns
//! map plural and synonym phrasing onto the canonical lowercase catalog
//! category so downstream filtering and substring matching agree.

use once_cell::sync::Lazy;
use regex::Regex;

fn regex(pattern: &str) -> Regex {
    // Patterns are compile-time constants; a failure here is a programmer
    // error caught by the pattern table tests.
    Regex::new(pattern).expect("invalid built-in pattern")
}

/// Named pattern with the canonical value it maps to
pub struct NamedPattern {
    pub canonical: &'static str,
    pub regex: Regex,
}

/// Category phrasing, with simple plural handling
pub static CATEGORY_PATTERNS: Lazy<Vec<NamedPattern>> = Lazy::new(|| {
    vec![
        NamedPattern {
            canonical: "jacket",
            regex: regex(r"(?i)\b(jackets?|coat|outerwear|windcheater|blazer)\b"),
        },
        NamedPattern {
            canonical: "hoodie",
            regex: regex(r"(?i)\b(hoodies?|sweatshirt|pullover|crewneck)\b"),
        },
        NamedPattern {
            canonical: "pants",
            regex: regex(r"(?i)\b(pants?|trousers?|jeans|leggings?|track pants?)\b"),
        },
        NamedPattern {
            canonical: "gloves",
            regex: regex(r"(?i)\b(accessories|accessory|gloves?|arm warmers?|scarf|hat|cap)\b"),
        },
    ]
});

/// "Everything" phrasing; matched but never stored as a category entity
pub static CATCH_ALL_CATEGORY: Lazy<Regex> =
    Lazy::new(|| regex(r"(?i)\b(all products?|everything|show me everything|browse)\b"));

/// Brand names carried by the catalog
pub static BRAND_PATTERNS: Lazy<Vec<NamedPattern>> = Lazy::new(|| {
    vec![
        NamedPattern {
            canonical: "wink",
            regex: regex(r"(?i)\b(wink|wink brand|wink products?)\b"),
        },
        NamedPattern {
            canonical: "uniqlo",
            regex: regex(r"(?i)\buniqlo\b"),
        },
        NamedPattern {
            canonical: "zara",
            regex: regex(r"(?i)\bzara\b"),
        },
    ]
});

/// Price phrasing. Each regex captures the amount(s) as groups 2 (and 3).
pub struct PricePatterns {
    pub under: Regex,
    pub above: Regex,
    pub between: Regex,
    pub exact: Regex,
}

pub static PRICE_PATTERNS: Lazy<PricePatterns> = Lazy::new(|| PricePatterns {
    under: regex(r"(?i)\b(under|below|less than|cheaper than|maximum|upto|up to)\s*[₹$]?\s*(\d+)"),
    above: regex(r"(?i)\b(above|over|more than|expensive than|minimum|at least)\s*[₹$]?\s*(\d+)"),
    between: regex(r"(?i)\b(between|from|range)\s*[₹$]?\s*(\d+)\s*(?:and|to|-)\s*[₹$]?\s*(\d+)"),
    exact: regex(r"(?i)\b(exactly|price of|costing)\s*[₹$]?\s*(\d+)"),
});

/// Verb-based intent triggers
pub struct IntentPatterns {
    pub show_products: Regex,
    pub recommendations: Regex,
    pub comparison: Regex,
    pub help: Regex,
    pub filter: Regex,
    pub categories: Regex,
}

pub static INTENT_PATTERNS: Lazy<IntentPatterns> = Lazy::new(|| IntentPatterns {
    show_products: regex(r"(?i)\b(show|display|list|see|view|find|look for|search for)\b"),
    recommendations: regex(
        r"(?i)\b(recommend|suggest|what should i buy|what's good|best|top|popular|trending)\b",
    ),
    comparison: regex(r"(?i)\b(compare|vs\.?|versus|difference between|which is better)\b"),
    help: regex(r"(?i)\b(help|how to|what can you do|assist|support)\b"),
    filter: regex(r"(?i)\b(filter|sort|arrange|organize|order by)\b"),
    categories: regex(r"(?i)\b(categories|category|types?|kinds?|what do you have)\b"),
});

/// "top N" / "best N" result limit phrasing
pub static TOP_N: Lazy<Regex> = Lazy::new(|| regex(r"(?i)\b(?:top|best)\s+(\d+)"));

/// Descriptive feature words, keyed by feature kind
pub static FEATURE_PATTERNS: Lazy<Vec<NamedPattern>> = Lazy::new(|| {
    vec![
        NamedPattern {
            canonical: "color",
            regex: regex(
                r"(?i)\b(black|white|red|blue|green|yellow|brown|grey|gray|pink|purple|orange)\b",
            ),
        },
        NamedPattern {
            canonical: "material",
            regex: regex(r"(?i)\b(cotton|wool|leather|denim|polyester|nylon|silk|linen)\b"),
        },
        NamedPattern {
            canonical: "size",
            regex: regex(r"(?i)\b(small|medium|large|xl|xxl|xs|extra small|extra large)\b"),
        },
        NamedPattern {
            canonical: "season",
            regex: regex(r"(?i)\b(winter|summer|spring|fall|autumn|rainy|monsoon|cold|hot)\b"),
        },
    ]
});
