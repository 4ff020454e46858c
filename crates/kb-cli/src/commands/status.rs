//! Status command handler

use anyhow::Result;

use kb_core::{Category, StorageError, Store};

use crate::output::{Output, OutputFormat};

/// One category's line in the status report
#[derive(Debug, PartialEq)]
pub struct CategoryStatus {
    pub category: Category,
    pub path: String,
    /// `None` when the backing file does not exist yet
    pub count: Option<usize>,
}

/// Collect status for one category or all of them
///
/// A missing file is reported as such; an unreadable or malformed file is
/// an error.
pub fn collect(store: &Store, only: Option<Category>) -> Result<Vec<CategoryStatus>> {
    let categories = match only {
        Some(category) => vec![category],
        None => Category::ALL.to_vec(),
    };

    categories
        .into_iter()
        .map(|category| {
            let count = match store.count(category) {
                Ok(n) => Some(n),
                Err(StorageError::NotFound { .. }) => None,
                Err(e) => {
                    return Err(anyhow::Error::new(e).context(format!("Failed to read {}", category)))
                }
            };
            Ok(CategoryStatus {
                category,
                path: store.path_for(category).display().to_string(),
                count,
            })
        })
        .collect()
}

/// Show status information
pub fn show(store: &Store, only: Option<Category>, output: &Output) -> Result<()> {
    let statuses = collect(store, only)?;

    match output.format {
        OutputFormat::Json => {
            let categories: Vec<_> = statuses
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "category": s.category.name(),
                        "path": s.path,
                        "exists": s.count.is_some(),
                        "count": s.count.unwrap_or(0),
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": store.base_dir().display().to_string(),
                    "categories": categories
                })
            );
        }
        OutputFormat::Quiet => {
            for s in &statuses {
                println!("{} {}", s.category, s.count.unwrap_or(0));
            }
        }
        OutputFormat::Human => {
            output.message("kb Status");
            output.message("=========");
            println!();
            println!("Data directory: {}", store.base_dir().display());
            println!();
            for s in &statuses {
                let count = match s.count {
                    Some(n) => n.to_string(),
                    None => "(no file)".to_string(),
                };
                println!("  {:<10} {:>9}  {}", s.category.name(), count, s.path);
            }
        }
    }

    Ok(())
}
