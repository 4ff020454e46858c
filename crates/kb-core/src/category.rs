//! Record categories
//!
//! Each category has one record type, one command name and one backing file.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Extension of every backing file
pub const FILE_EXTENSION: &str = "yaml";

/// One of the five record domains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Links,
    Reading,
    Shopping,
    Tools,
    Libraries,
}

/// Unknown category token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid category: '{0}' (expected one of: links, reading, shopping, tools, libraries)")]
pub struct CategoryError(pub String);

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 5] = [
        Category::Links,
        Category::Reading,
        Category::Shopping,
        Category::Tools,
        Category::Libraries,
    ];

    /// Command name, also the stem of the backing file
    pub fn name(self) -> &'static str {
        match self {
            Category::Links => "links",
            Category::Reading => "reading",
            Category::Shopping => "shopping",
            Category::Tools => "tools",
            Category::Libraries => "libraries",
        }
    }

    /// Singular noun for messages ("Added link: ...")
    pub fn singular(self) -> &'static str {
        match self {
            Category::Links => "link",
            Category::Reading => "reading list item",
            Category::Shopping => "shopping list item",
            Category::Tools => "tool",
            Category::Libraries => "library",
        }
    }

    /// Backing file name, e.g. `links.yaml`
    pub fn file_name(self) -> String {
        format!("{}.{}", self.name(), FILE_EXTENSION)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| CategoryError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(Category::Links.file_name(), "links.yaml");
        assert_eq!(Category::Libraries.file_name(), "libraries.yaml");
    }

    #[test]
    fn test_parse_roundtrip() {
        for category in Category::ALL {
            assert_eq!(category.name().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_parse_invalid_names_token() {
        let err = "books".parse::<Category>().unwrap_err();
        assert_eq!(err, CategoryError("books".to_string()));
        assert!(err.to_string().contains("'books'"));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Links".parse::<Category>().is_err());
    }
}
