//! Exhibitor directory: classification engine, repository contract, and the
//! read-side service the dashboard queries.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod tagging;

#[cfg(test)]
mod tests;

pub use domain::{
    CategoryTag, ComputedFields, ExhibitorId, ExhibitorRecord, ExhibitorStats, ExhibitorView,
    FacetCount,
};
pub use repository::{ExhibitorPage, ExhibitorQuery, ExhibitorRepository, RepositoryError};
pub use router::exhibitor_router;
pub use service::{DirectoryPage, DirectoryQuery, ExhibitorDirectory};
pub use tagging::{categorize, classify, detect_france, is_pants_candidate};
