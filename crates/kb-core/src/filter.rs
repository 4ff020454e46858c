//! Record filtering
//!
//! A `Filter` is a conjunction of criteria. With no criteria it matches
//! every record. Filtering never touches its input; matches are cloned out
//! in their original order.

use crate::models::{Link, Record};

/// A single predicate over records of one type
pub trait Criterion<R> {
    fn matches(&self, record: &R) -> bool;
}

/// Links carrying a tag (see [`Link::has_tag`])
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasTag(String);

impl HasTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }
}

impl Criterion<Link> for HasTag {
    fn matches(&self, link: &Link) -> bool {
        link.has_tag(&self.0)
    }
}

/// All-of filter over records of type `R`
pub struct Filter<R> {
    criteria: Vec<Box<dyn Criterion<R>>>,
}

impl<R: Record> Filter<R> {
    /// The empty filter
    pub fn new() -> Self {
        Self {
            criteria: Vec::new(),
        }
    }

    /// Add a criterion
    pub fn with(mut self, criterion: impl Criterion<R> + 'static) -> Self {
        self.criteria.push(Box::new(criterion));
        self
    }

    /// Add a criterion if one is given
    pub fn with_opt(self, criterion: Option<impl Criterion<R> + 'static>) -> Self {
        match criterion {
            Some(c) => self.with(c),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches(&self, record: &R) -> bool {
        self.criteria.iter().all(|c| c.matches(record))
    }

    /// Records matching every criterion, in input order
    pub fn apply(&self, records: &[R]) -> Vec<R> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}

impl<R: Record> Default for Filter<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tool;

    fn links() -> Vec<Link> {
        vec![
            Link::new("A", "http://a").with_tags("go,rust"),
            Link::new("B", "http://b").with_tags("python"),
            Link::new("C", "http://c"),
            Link::new("D", "http://d").with_tags("Go"),
        ]
    }

    struct TitleIs(&'static str);

    impl Criterion<Link> for TitleIs {
        fn matches(&self, link: &Link) -> bool {
            link.title == self.0
        }
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let all = links();
        let filter = Filter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&all), all);
    }

    #[test]
    fn test_empty_filter_other_records() {
        let tools = vec![
            Tool {
                name: "jq".to_string(),
                ..Default::default()
            },
            Tool::default(),
        ];
        assert_eq!(Filter::<Tool>::default().apply(&tools), tools);
    }

    #[test]
    fn test_tag_filter_preserves_order() {
        let all = links();
        let results = Filter::new().with(HasTag::new("go")).apply(&all);
        let titles: Vec<_> = results.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "D"]);
    }

    #[test]
    fn test_criteria_are_anded() {
        let all = links();
        let results = Filter::new()
            .with(HasTag::new("go"))
            .with(TitleIs("D"))
            .apply(&all);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "D");
    }

    #[test]
    fn test_input_untouched() {
        let all = links();
        let before = all.clone();
        let _ = Filter::new().with(HasTag::new("python")).apply(&all);
        assert_eq!(all, before);
    }

    #[test]
    fn test_with_opt() {
        let all = links();
        let none: Option<HasTag> = None;
        assert_eq!(Filter::new().with_opt(none).apply(&all).len(), 4);
        assert_eq!(
            Filter::new()
                .with_opt(Some(HasTag::new("python")))
                .apply(&all)
                .len(),
            1
        );
    }

    #[test]
    fn test_empty_tag_matches_untagged() {
        let results = Filter::new().with(HasTag::new("")).apply(&links());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "C");
    }
}
