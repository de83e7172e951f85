use super::domain::{ExhibitorRecord, FacetCount};

/// Text search plus pagination over the raw exhibitor rows. Computed-field
/// filters do not belong here; they apply after classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExhibitorQuery {
    pub search: Option<String>,
    pub take: usize,
    pub skip: usize,
}

/// One page of raw rows, ordered by crawl time descending, plus the total
/// match count before pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct ExhibitorPage {
    pub items: Vec<ExhibitorRecord>,
    pub total: u64,
}

/// Storage abstraction so the directory service can be exercised in
/// isolation.
pub trait ExhibitorRepository: Send + Sync {
    fn list(&self, query: &ExhibitorQuery) -> Result<ExhibitorPage, RepositoryError>;
    fn country_counts(&self, limit: usize) -> Result<Vec<FacetCount>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("exhibitor store unavailable: {0}")]
    Unavailable(String),
}
