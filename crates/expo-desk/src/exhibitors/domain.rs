use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExhibitorId(pub String);

/// Crawled trade-show exhibitor row. Read-only from the engine's
/// perspective; every text field except the name may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExhibitorRecord {
    pub id: ExhibitorId,
    pub name: String,
    pub country: Option<String>,
    pub address: Option<String>,
    pub booth: Option<String>,
    pub company_info: Option<String>,
    pub activities: Option<String>,
    pub target_markets: Option<String>,
    pub crawled_at: DateTime<Utc>,
}

/// Closed classification buckets, in priority order. The declared order is
/// part of the contract: the first bucket whose keyword set matches wins,
/// so reordering variants is a breaking change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryTag {
    FashionBrandRetail,
    MarketplaceEcommerce,
    HomeInterior,
    PaymentsPos,
    LogisticsFulfillment,
    RetailTechSaas,
    InstoreHardwareSignage,
    Other,
}

impl CategoryTag {
    pub fn label(&self) -> &'static str {
        match self {
            CategoryTag::FashionBrandRetail => "fashion_brand_retail",
            CategoryTag::MarketplaceEcommerce => "marketplace_ecommerce",
            CategoryTag::HomeInterior => "home_interior",
            CategoryTag::PaymentsPos => "payments_pos",
            CategoryTag::LogisticsFulfillment => "logistics_fulfillment",
            CategoryTag::RetailTechSaas => "retail_tech_saas",
            CategoryTag::InstoreHardwareSignage => "instore_hardware_signage",
            CategoryTag::Other => "other",
        }
    }
}

/// Flags derived from an exhibitor's text fields. Never persisted;
/// recomputed on every read so the tables in `tagging` stay the single
/// source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedFields {
    pub is_france: bool,
    pub category_tag: CategoryTag,
    pub pants_candidate: bool,
}

/// Exhibitor row as served to the dashboard: the stored record with the
/// computed flags flattened in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExhibitorView {
    #[serde(flatten)]
    pub record: ExhibitorRecord,
    #[serde(flatten)]
    pub computed: ComputedFields,
}

/// One value/count pair for a facet listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    pub value: String,
    pub count: u64,
}

/// Headline numbers for the dashboard landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExhibitorStats {
    pub total: u64,
    pub by_country: Vec<FacetCount>,
    pub by_category: Vec<FacetCount>,
}
