//! Keyword-driven exhibitor classification.
//!
//! Pure functions over fixed marker tables: no I/O, no state, no failure
//! mode. Missing or empty text degrades toward "no match" (`is_france =
//! false`, `CategoryTag::Other`, `pants_candidate = false`). Matching is
//! case-folded substring search; the category table is consulted in
//! declared order and the first hit wins.

use super::domain::{CategoryTag, ComputedFields, ExhibitorRecord};

/// Country, city, and language markers treated as "based in France".
const FRANCE_MARKERS: &[&str] = &[
    "france",
    "paris",
    "lyon",
    "marseille",
    "bordeaux",
    "lille",
    "toulouse",
    "nantes",
    "french",
    "français",
];

/// Category keyword sets, highest priority first.
const CATEGORY_KEYWORDS: &[(CategoryTag, &[&str])] = &[
    (
        CategoryTag::FashionBrandRetail,
        &[
            "apparel", "clothing", "fashion", "brand", "retail", "boutique", "shoes", "footwear",
            "textile",
        ],
    ),
    (
        CategoryTag::MarketplaceEcommerce,
        &["marketplace", "e-commerce", "ecommerce", "webshop", "platform", "omni"],
    ),
    (
        CategoryTag::HomeInterior,
        &["home", "interior", "furniture", "decor", "homeware"],
    ),
    (
        CategoryTag::PaymentsPos,
        &["payment", "pos", "terminal", "checkout", "acquirer", "card processing"],
    ),
    (
        CategoryTag::LogisticsFulfillment,
        &[
            "logistic",
            "fulfillment",
            "fulfilment",
            "warehouse",
            "3pl",
            "shipping",
            "carrier",
        ],
    ),
    (
        CategoryTag::RetailTechSaas,
        &[
            "saas",
            "software",
            "crm",
            "cdp",
            "analytic",
            "ai",
            "vision",
            "inventory",
            "pricing",
            "planogram",
            "plm",
        ],
    ),
    (
        CategoryTag::InstoreHardwareSignage,
        &[
            "kiosk", "signage", "display", "scanner", "rfid", "handheld", "pda", "barcode",
        ],
    ),
];

/// Apparel/retail signals for the lead-qualification flag.
const APPAREL_KEYWORDS: &[&str] = &[
    "apparel",
    "clothing",
    "fashion",
    "retail",
    "marketplace",
    "boutique",
    "shoes",
    "footwear",
];

/// Categories that qualify a lead on their own.
const CANDIDATE_CATEGORIES: &[CategoryTag] = &[
    CategoryTag::FashionBrandRetail,
    CategoryTag::MarketplaceEcommerce,
    CategoryTag::HomeInterior,
];

fn combined_text(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .filter_map(|part| *part)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Whether the given text mentions a France marker.
pub fn detect_france(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    contains_any(&text.to_lowercase(), FRANCE_MARKERS)
}

/// Assign exactly one category tag; `Other` when nothing matches.
pub fn categorize(
    name: &str,
    company_info: Option<&str>,
    activities: Option<&str>,
    target_markets: Option<&str>,
) -> CategoryTag {
    let text = combined_text(&[Some(name), company_info, activities, target_markets]);

    for (tag, keywords) in CATEGORY_KEYWORDS {
        if contains_any(&text, keywords) {
            return *tag;
        }
    }

    CategoryTag::Other
}

/// Lead-qualification flag: an OR of three independent signals. A France
/// marker always qualifies, regardless of the text content.
pub fn is_pants_candidate(
    category: CategoryTag,
    is_france: bool,
    name: &str,
    company_info: Option<&str>,
    activities: Option<&str>,
    target_markets: Option<&str>,
) -> bool {
    if is_france {
        return true;
    }

    let text = combined_text(&[Some(name), company_info, activities, target_markets]);
    if contains_any(&text, APPAREL_KEYWORDS) {
        return true;
    }

    CANDIDATE_CATEGORIES.contains(&category)
}

/// Derive all three flags for a record.
pub fn classify(record: &ExhibitorRecord) -> ComputedFields {
    let is_france = detect_france(&combined_text(&[
        record.country.as_deref(),
        record.address.as_deref(),
        record.company_info.as_deref(),
    ]));

    let category_tag = categorize(
        &record.name,
        record.company_info.as_deref(),
        record.activities.as_deref(),
        record.target_markets.as_deref(),
    );

    let pants_candidate = is_pants_candidate(
        category_tag,
        is_france,
        &record.name,
        record.company_info.as_deref(),
        record.activities.as_deref(),
        record.target_markets.as_deref(),
    );

    ComputedFields {
        is_france,
        category_tag,
        pants_candidate,
    }
}
