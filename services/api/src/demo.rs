use std::sync::Arc;

use clap::Args;

use expo_desk::error::AppError;
use expo_desk::exhibitors::{DirectoryQuery, ExhibitorDirectory};

use crate::infra::{sample_exhibitors, InMemoryExhibitorRepository};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Only print the lead candidates
    #[arg(long)]
    candidates_only: bool,
}

/// Classify the bundled sample exhibitors and print what the dashboard
/// would show: per-record flags, then facet and candidate summaries.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let directory = ExhibitorDirectory::new(Arc::new(InMemoryExhibitorRepository::seeded(
        sample_exhibitors(),
    )));

    let page = directory.list(&DirectoryQuery {
        candidates_only: args.candidates_only,
        ..DirectoryQuery::default()
    })?;

    println!("exhibitors ({} stored):", page.total);
    for view in &page.items {
        println!(
            "  {:<24} country={:<12} category={:<26} france={:<5} candidate={}",
            view.record.name,
            view.record.country.as_deref().unwrap_or("Unknown"),
            view.computed.category_tag.label(),
            view.computed.is_france,
            view.computed.pants_candidate,
        );
    }

    println!("\nby category:");
    for facet in &page.by_category {
        println!("  {:<26} {}", facet.value, facet.count);
    }

    let candidates = directory.candidates(100)?;
    println!("\nlead candidates: {}", candidates.len());
    for view in &candidates {
        println!("  {}", view.record.name);
    }

    Ok(())
}
