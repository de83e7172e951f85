use std::collections::HashMap;
use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::exhibitors::domain::{ExhibitorId, ExhibitorRecord, FacetCount};
use crate::exhibitors::repository::{
    ExhibitorPage, ExhibitorQuery, ExhibitorRepository, RepositoryError,
};
use crate::exhibitors::service::ExhibitorDirectory;

fn crawl_time(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, day, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn record(id: &str, name: &str, day: u32) -> ExhibitorRecord {
    ExhibitorRecord {
        id: ExhibitorId(id.to_string()),
        name: name.to_string(),
        country: None,
        address: None,
        booth: None,
        company_info: None,
        activities: None,
        target_markets: None,
        crawled_at: crawl_time(day),
    }
}

/// Four exhibitors spanning the interesting classification outcomes: a
/// French apparel maker, a non-candidate German toolmaker, a Danish
/// interiors studio, and a Dutch payments vendor.
pub(super) fn sample_exhibitors() -> Vec<ExhibitorRecord> {
    vec![
        ExhibitorRecord {
            address: Some("10 Rue de Paris FRANCE".to_string()),
            company_info: Some("clothing manufacturer".to_string()),
            ..record("ex-1", "Acme Apparel SARL", 4)
        },
        ExhibitorRecord {
            country: Some("Germany".to_string()),
            address: Some("Berlin GERMANY".to_string()),
            company_info: Some("industrial tools".to_string()),
            ..record("ex-2", "Generic Hardware Co", 3)
        },
        ExhibitorRecord {
            country: Some("Denmark".to_string()),
            company_info: Some("furniture and interiors studio".to_string()),
            ..record("ex-3", "Nordic Home Studio", 2)
        },
        ExhibitorRecord {
            country: Some("Netherlands".to_string()),
            activities: Some("payment terminals and checkout systems".to_string()),
            ..record("ex-4", "PayFlow Terminals", 1)
        },
    ]
}

#[derive(Clone)]
pub(super) struct MemoryExhibitors {
    records: Vec<ExhibitorRecord>,
}

impl MemoryExhibitors {
    pub(super) fn seeded(records: Vec<ExhibitorRecord>) -> Self {
        Self { records }
    }
}

impl ExhibitorRepository for MemoryExhibitors {
    fn list(&self, query: &ExhibitorQuery) -> Result<ExhibitorPage, RepositoryError> {
        let needle = query.search.as_deref().map(str::to_lowercase);
        let mut matches: Vec<ExhibitorRecord> = self
            .records
            .iter()
            .filter(|record| match &needle {
                Some(needle) => [
                    Some(record.name.as_str()),
                    record.company_info.as_deref(),
                    record.activities.as_deref(),
                    record.target_markets.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(needle)),
                None => true,
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.crawled_at.cmp(&a.crawled_at));

        let total = matches.len() as u64;
        let items = matches
            .into_iter()
            .skip(query.skip)
            .take(query.take)
            .collect();
        Ok(ExhibitorPage { items, total })
    }

    fn country_counts(&self, limit: usize) -> Result<Vec<FacetCount>, RepositoryError> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for record in &self.records {
            let key = record.country.clone().unwrap_or_else(|| "Unknown".to_string());
            *counts.entry(key).or_default() += 1;
        }
        let mut facets: Vec<FacetCount> = counts
            .into_iter()
            .map(|(value, count)| FacetCount { value, count })
            .collect();
        facets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
        facets.truncate(limit);
        Ok(facets)
    }
}

pub(super) struct UnavailableExhibitors;

impl ExhibitorRepository for UnavailableExhibitors {
    fn list(&self, _query: &ExhibitorQuery) -> Result<ExhibitorPage, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn country_counts(&self, _limit: usize) -> Result<Vec<FacetCount>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_directory() -> Arc<ExhibitorDirectory<MemoryExhibitors>> {
    Arc::new(ExhibitorDirectory::new(Arc::new(MemoryExhibitors::seeded(
        sample_exhibitors(),
    ))))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
