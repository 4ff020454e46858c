//! kb Core Library
//!
//! This crate provides the core functionality for kb, a personal
//! knowledge base that keeps links, reading-list items, shopping-list items,
//! tools and libraries in per-category flat files.
//!
//! # Architecture
//!
//! - **YAML files**: One human-editable sequence of records per category
//!
//! Records are only ever appended; every search reads the whole file back.
//!
//! # Quick Start
//!
//! ```text
//! let store = Store::new("/path/to/data");
//!
//! // Add a link
//! let link = Link::new("Example", "https://example.com");
//! store.append(&link)?;
//!
//! // Query links
//! let links: Vec<Link> = store.load_all()?;
//! let rust = Filter::new().with(HasTag::new("rust")).apply(&links);
//! ```
//!
//! # Modules
//!
//! - `store`: Append/load over the category files (main entry point)
//! - `models`: Record types and the `Record` trait
//! - `category`: The category table (command names, file names)
//! - `filter`: Criteria-based selection of loaded records
//! - `storage`: Storage errors
//! - `config`: Application configuration

pub mod category;
pub mod config;
pub mod filter;
pub mod models;
pub mod storage;
pub mod store;

pub use category::{Category, CategoryError};
pub use config::Config;
pub use filter::{Criterion, Filter, HasTag};
pub use models::{Library, Link, ReadingListItem, Record, ShoppingListItem, Tool, ValidationError};
pub use storage::{StorageError, StorageResult};
pub use store::Store;
