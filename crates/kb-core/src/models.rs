//! Data models for kb
//!
//! Defines one record type per category. Every field is optional as far as
//! the file format is concerned: a missing field loads as empty (or zero).

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::Category;

/// A record that lives in a category file
pub trait Record: Serialize + DeserializeOwned + Clone + Debug + PartialEq {
    /// The category (and so the backing file) this record belongs to
    const CATEGORY: Category;

    /// Primary display name: title for links, name for everything else
    fn label(&self) -> &str;

    /// Check required fields before the record is written
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// A record rejected before it reached the store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{category}: {field} is required")]
    MissingField {
        category: Category,
        field: &'static str,
    },
}

fn require(category: Category, field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingField { category, field });
    }
    Ok(())
}

/// A saved link
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Link {
    pub title: String,
    pub author: String,
    pub url: String,
    /// Comma-separated tag list
    pub tags: String,
}

impl Link {
    /// Create a link with a title and URL
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the comma-separated tags
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    /// Case-insensitive exact match against one element of the tag list
    ///
    /// Tags are split on `,` without trimming. An empty tag string is a
    /// single empty tag, so `has_tag("")` holds for a link without tags.
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.to_lowercase().split(',').any(|t| t == tag)
    }
}

impl Record for Link {
    const CATEGORY: Category = Category::Links;

    fn label(&self) -> &str {
        &self.title
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require(Self::CATEGORY, "title", &self.title)?;
        require(Self::CATEGORY, "url", &self.url)
    }
}

/// Something to read
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReadingListItem {
    pub name: String,
    pub author: String,
    pub link: String,
}

impl Record for ReadingListItem {
    const CATEGORY: Category = Category::Reading;

    fn label(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require(Self::CATEGORY, "name", &self.name)?;
        require(Self::CATEGORY, "link", &self.link)
    }
}

/// Something to buy
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShoppingListItem {
    pub name: String,
    pub category: String,
    pub link: String,
    pub price: f64,
}

impl Record for ShoppingListItem {
    const CATEGORY: Category = Category::Shopping;

    fn label(&self) -> &str {
        &self.name
    }
}

/// A tool worth remembering
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub link: String,
    pub notes: String,
}

impl Record for Tool {
    const CATEGORY: Category = Category::Tools;

    fn label(&self) -> &str {
        &self.name
    }
}

/// A software library
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Library {
    pub name: String,
    pub language: String,
    pub url: String,
    pub description: String,
}

impl Record for Library {
    const CATEGORY: Category = Category::Libraries;

    fn label(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_new() {
        let link = Link::new("Foo", "http://x");
        assert_eq!(link.title, "Foo");
        assert_eq!(link.url, "http://x");
        assert!(link.author.is_empty());
        assert!(link.tags.is_empty());
    }

    #[test]
    fn test_has_tag_case_insensitive() {
        let link = Link::new("A", "http://a").with_tags("Go,RUST");
        assert!(link.has_tag("go"));
        assert!(link.has_tag("rust"));
        assert!(link.has_tag("Rust"));
        assert!(!link.has_tag("python"));
    }

    #[test]
    fn test_has_tag_exact_element() {
        let link = Link::new("A", "http://a").with_tags("rustlang, go");
        assert!(!link.has_tag("rust"));
        // No trimming around the separator
        assert!(!link.has_tag("go"));
        assert!(link.has_tag(" go"));
    }

    #[test]
    fn test_has_tag_empty() {
        let untagged = Link::new("A", "http://a");
        assert!(untagged.has_tag(""));

        let tagged = Link::new("A", "http://a").with_tags("go");
        assert!(!tagged.has_tag(""));
    }

    #[test]
    fn test_link_validation() {
        assert!(Link::new("Foo", "http://x").validate().is_ok());

        let err = Link::new("", "http://x").validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                category: Category::Links,
                field: "title"
            }
        );
        assert_eq!(err.to_string(), "links: title is required");

        let err = Link::new("Foo", "").validate().unwrap_err();
        assert!(err.to_string().contains("url is required"));
    }

    #[test]
    fn test_reading_validation() {
        let mut item = ReadingListItem {
            name: "SICP".to_string(),
            ..Default::default()
        };
        assert!(item.validate().unwrap_err().to_string().contains("link"));

        item.link = "https://mitpress.mit.edu/sicp".to_string();
        assert!(item.validate().is_ok());
    }

    #[test]
    fn test_other_records_accept_empty() {
        assert!(ShoppingListItem::default().validate().is_ok());
        assert!(Tool::default().validate().is_ok());
        assert!(Library::default().validate().is_ok());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Link::new("Title", "u").label(), "Title");
        let tool = Tool {
            name: "ripgrep".to_string(),
            ..Default::default()
        };
        assert_eq!(tool.label(), "ripgrep");
    }

    #[test]
    fn test_missing_fields_default() {
        let item: ShoppingListItem = serde_json::from_str(r#"{"name": "Desk"}"#).unwrap();
        assert_eq!(item.name, "Desk");
        assert!(item.category.is_empty());
        assert_eq!(item.price, 0.0);
    }

    #[test]
    fn test_field_names_are_lowercase() {
        let json = serde_json::to_value(Library::default()).unwrap();
        let obj = json.as_object().unwrap();
        for key in ["name", "language", "url", "description"] {
            assert!(obj.contains_key(key), "missing {}", key);
        }
    }
}
