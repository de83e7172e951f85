use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::domain::{CategoryTag, ExhibitorStats, ExhibitorView, FacetCount};
use super::repository::{ExhibitorQuery, ExhibitorRepository, RepositoryError};
use super::tagging::classify;

const DEFAULT_PAGE_SIZE: usize = 50;
const COUNTRY_FACET_LIMIT: usize = 10;

/// Dashboard query: free-text search, optional computed-field filters, and
/// one-based pagination.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryQuery {
    pub q: Option<String>,
    pub category: Option<CategoryTag>,
    #[serde(default)]
    pub candidates_only: bool,
    pub take: Option<usize>,
    pub page: Option<usize>,
}

/// One page of classified exhibitors together with facet counts computed
/// over the returned items.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryPage {
    pub total: u64,
    pub items: Vec<ExhibitorView>,
    pub by_country: Vec<FacetCount>,
    pub by_category: Vec<FacetCount>,
}

/// Read-side service combining the repository with the classification
/// engine. Stateless beyond the repository handle; safe to share.
pub struct ExhibitorDirectory<R> {
    repository: Arc<R>,
}

impl<R> ExhibitorDirectory<R>
where
    R: ExhibitorRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// List exhibitors with computed fields attached. Category and
    /// candidate filters apply to the fetched page, since the flags only
    /// exist after classification.
    pub fn list(&self, query: &DirectoryQuery) -> Result<DirectoryPage, RepositoryError> {
        let take = query.take.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
        let page = query.page.unwrap_or(1).max(1);

        let raw = self.repository.list(&ExhibitorQuery {
            search: query.q.clone(),
            take,
            skip: (page - 1) * take,
        })?;

        let mut items: Vec<ExhibitorView> = raw
            .items
            .into_iter()
            .map(|record| {
                let computed = classify(&record);
                ExhibitorView { record, computed }
            })
            .collect();

        if let Some(category) = query.category {
            items.retain(|view| view.computed.category_tag == category);
        }
        if query.candidates_only {
            items.retain(|view| view.computed.pants_candidate);
        }

        let by_country = facet(&items, |view| {
            view.record
                .country
                .clone()
                .unwrap_or_else(|| "Unknown".to_string())
        });
        let by_category = facet(&items, |view| view.computed.category_tag.label().to_string());

        Ok(DirectoryPage {
            total: raw.total,
            items,
            by_country,
            by_category,
        })
    }

    /// Lead candidates only, in crawl order.
    pub fn candidates(&self, take: usize) -> Result<Vec<ExhibitorView>, RepositoryError> {
        let raw = self.repository.list(&ExhibitorQuery {
            search: None,
            take,
            skip: 0,
        })?;

        Ok(raw
            .items
            .into_iter()
            .map(|record| {
                let computed = classify(&record);
                ExhibitorView { record, computed }
            })
            .filter(|view| view.computed.pants_candidate)
            .collect())
    }

    /// Headline totals, the top country breakdown, and per-category counts.
    /// Categories only exist after classification, so the category facet is
    /// computed over every stored row.
    pub fn stats(&self) -> Result<ExhibitorStats, RepositoryError> {
        let raw = self.repository.list(&ExhibitorQuery {
            search: None,
            take: usize::MAX,
            skip: 0,
        })?;
        let views: Vec<ExhibitorView> = raw
            .items
            .into_iter()
            .map(|record| {
                let computed = classify(&record);
                ExhibitorView { record, computed }
            })
            .collect();

        Ok(ExhibitorStats {
            total: raw.total,
            by_country: self.repository.country_counts(COUNTRY_FACET_LIMIT)?,
            by_category: facet(&views, |view| view.computed.category_tag.label().to_string()),
        })
    }
}

fn facet<F>(items: &[ExhibitorView], key: F) -> Vec<FacetCount>
where
    F: Fn(&ExhibitorView) -> String,
{
    let mut counts: HashMap<String, u64> = HashMap::new();
    for item in items {
        *counts.entry(key(item)).or_default() += 1;
    }

    let mut facets: Vec<FacetCount> = counts
        .into_iter()
        .map(|(value, count)| FacetCount { value, count })
        .collect();
    facets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    facets
}
