//! Create and search handlers shared by every category

use std::io::Write;

use anyhow::{Context, Result};
use tracing::debug;

use kb_core::{Filter, HasTag, Link, Record, Store};

use crate::output::{Output, Render};

/// Validate a record and append it to its category file
///
/// A record missing a required field is rejected before the file is opened.
pub fn create<R: Record + Render>(store: &Store, record: R, output: &Output) -> Result<()> {
    let category = R::CATEGORY;
    record
        .validate()
        .with_context(|| format!("Failed to add {}", category.singular()))?;

    store
        .append(&record)
        .with_context(|| format!("Failed to add {}", category.singular()))?;

    output.success(&format!("Added {}: {}", category.singular(), record.label()));
    Ok(())
}

/// Filter for `links search`
///
/// An empty tag adds no criterion, so `--tag ""` lists every link.
pub fn link_filter(tag: Option<String>) -> Filter<Link> {
    let tag = tag.filter(|t| !t.is_empty()).map(HasTag::new);
    Filter::new().with_opt(tag)
}

/// Load a category, filter it and print the matches
pub fn search<R: Record + Render>(store: &Store, filter: Filter<R>, output: &Output) -> Result<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    search_to(store, filter, output, &mut lock)
}

/// [`search`] writing to any stream
pub fn search_to<R: Record + Render>(
    store: &Store,
    filter: Filter<R>,
    output: &Output,
    w: &mut dyn Write,
) -> Result<()> {
    let records: Vec<R> = store
        .load_all()
        .with_context(|| format!("Failed to load {}", R::CATEGORY))?;

    let results = filter.apply(&records);
    debug!(
        "{} of {} {} matched",
        results.len(),
        records.len(),
        R::CATEGORY
    );

    output
        .write_records(w, &results)
        .context("Failed to write results")?;
    Ok(())
}
