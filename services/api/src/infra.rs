use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use metrics_exporter_prometheus::PrometheusHandle;

use expo_desk::auth::{AdminId, AdminPage, AdminStore, AdminUser, CredentialRecord, StoreError};
use expo_desk::exhibitors::{
    ExhibitorId, ExhibitorPage, ExhibitorQuery, ExhibitorRecord, ExhibitorRepository, FacetCount,
    RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Exhibitor rows held in memory, newest crawl first. Stands in for the
/// crawled table until a real store is wired up.
#[derive(Default, Clone)]
pub(crate) struct InMemoryExhibitorRepository {
    records: Arc<Mutex<Vec<ExhibitorRecord>>>,
}

impl InMemoryExhibitorRepository {
    pub(crate) fn seeded(records: Vec<ExhibitorRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }
}

impl ExhibitorRepository for InMemoryExhibitorRepository {
    fn list(&self, query: &ExhibitorQuery) -> Result<ExhibitorPage, RepositoryError> {
        let guard = self.records.lock().expect("exhibitor mutex poisoned");
        let needle = query.search.as_deref().map(str::to_lowercase);
        let mut matches: Vec<ExhibitorRecord> = guard
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
        let guard = self.records.lock().expect("exhibitor mutex poisoned");
        let mut counts: HashMap<String, u64> = HashMap::new();
        for record in guard.iter() {
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

/// Admin credentials held in memory, keyed by id with unique emails.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAdminStore {
    records: Arc<Mutex<HashMap<AdminId, CredentialRecord>>>,
}

impl AdminStore for InMemoryAdminStore {
    fn find_by_email(&self, email: &str) -> Result<Option<CredentialRecord>, StoreError> {
        let guard = self.records.lock().expect("admin mutex poisoned");
        Ok(guard.values().find(|record| record.email == email).cloned())
    }

    fn find_by_id(&self, id: &AdminId) -> Result<Option<CredentialRecord>, StoreError> {
        let guard = self.records.lock().expect("admin mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn insert(&self, record: CredentialRecord) -> Result<CredentialRecord, StoreError> {
        let mut guard = self.records.lock().expect("admin mutex poisoned");
        if guard.values().any(|existing| existing.email == record.email) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: CredentialRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("admin mutex poisoned");
        if !guard.contains_key(&record.id) {
            return Err(StoreError::NotFound);
        }
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn remove(&self, id: &AdminId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("admin mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    fn touch_last_login(&self, id: &AdminId, at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("admin mutex poisoned");
        let record = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        record.last_login = Some(at);
        Ok(())
    }

    fn list(
        &self,
        search: Option<&str>,
        take: usize,
        skip: usize,
    ) -> Result<AdminPage, StoreError> {
        let guard = self.records.lock().expect("admin mutex poisoned");
        let needle = search.map(str::to_lowercase);
        let mut users: Vec<AdminUser> = guard
            .values()
            .filter(|record| match &needle {
                Some(needle) => record.email.to_lowercase().contains(needle),
                None => true,
            })
            .map(CredentialRecord::view)
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.email.cmp(&b.email)));

        let total = users.len() as u64;
        Ok(AdminPage {
            users: users.into_iter().skip(skip).take(take).collect(),
            total,
        })
    }
}

fn crawl_time(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, day, hour, 0, 0)
        .single()
        .expect("valid sample timestamp")
}

fn sample(id: &str, name: &str, day: u32) -> ExhibitorRecord {
    ExhibitorRecord {
        id: ExhibitorId(id.to_string()),
        name: name.to_string(),
        country: None,
        address: None,
        booth: None,
        company_info: None,
        activities: None,
        target_markets: None,
        crawled_at: crawl_time(day, 10),
    }
}

/// Sample rows covering each classification outcome, for the demo command
/// and local development.
pub(crate) fn sample_exhibitors() -> Vec<ExhibitorRecord> {
    vec![
        ExhibitorRecord {
            country: Some("France".to_string()),
            address: Some("12 Rue du Commerce, Paris, France".to_string()),
            booth: Some("A-12".to_string()),
            company_info: Some("Fashion retail company".to_string()),
            activities: Some("Apparel and clothing retail".to_string()),
            target_markets: Some("European fashion market".to_string()),
            ..sample("ex-0001", "Sample Fashion Brand", 6)
        },
        ExhibitorRecord {
            country: Some("Germany".to_string()),
            address: Some("Berlin, Germany".to_string()),
            booth: Some("B-07".to_string()),
            company_info: Some("E-commerce platform".to_string()),
            activities: Some("Online marketplace and webshop operations".to_string()),
            target_markets: Some("Global e-commerce".to_string()),
            ..sample("ex-0002", "Tech Marketplace", 5)
        },
        ExhibitorRecord {
            country: Some("Denmark".to_string()),
            booth: Some("C-02".to_string()),
            company_info: Some("Furniture and interior decoration studio".to_string()),
            ..sample("ex-0003", "Nordic Home Studio", 4)
        },
        ExhibitorRecord {
            country: Some("Netherlands".to_string()),
            activities: Some("Payment terminals and checkout systems".to_string()),
            ..sample("ex-0004", "PayFlow Terminals", 3)
        },
        ExhibitorRecord {
            country: Some("Germany".to_string()),
            address: Some("Hamburg, Germany".to_string()),
            company_info: Some("Industrial tools".to_string()),
            ..sample("ex-0005", "Generic Hardware Co", 2)
        },
    ]
}
