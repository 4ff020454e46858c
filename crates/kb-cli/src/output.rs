//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use std::io::{self, Write};

use kb_core::{Library, Link, ReadingListItem, Record, ShoppingListItem, Tool};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Human-readable rendering of one record
///
/// Every record renders as a primary line, indented detail lines, and a
/// blank separator line.
pub trait Render {
    fn render(&self, w: &mut dyn Write) -> io::Result<()>;
}

impl Render for Link {
    fn render(&self, w: &mut dyn Write) -> io::Result<()> {
        write!(w, "{:?}", self.title)?;
        if !self.author.is_empty() {
            write!(w, " by {}", self.author)?;
        }
        writeln!(w)?;
        writeln!(w, "    Tags: {}", self.tags)?;
        writeln!(w, "    URL : {}", self.url)?;
        writeln!(w)
    }
}

impl Render for ReadingListItem {
    fn render(&self, w: &mut dyn Write) -> io::Result<()> {
        write!(w, "{:?}", self.name)?;
        if !self.author.is_empty() {
            write!(w, " by {}", self.author)?;
        }
        writeln!(w)?;
        writeln!(w, "    Link: {}", self.link)?;
        writeln!(w)
    }
}

impl Render for ShoppingListItem {
    fn render(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}", self.name)?;
        writeln!(w, "    Category: {}", self.category)?;
        writeln!(w, "    Price   : ${:.2}", self.price)?;
        writeln!(w, "    Link    : {}", self.link)?;
        writeln!(w)
    }
}

impl Render for Tool {
    fn render(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}", self.name)?;
        writeln!(w, "    Description: {}", self.description)?;
        if !self.notes.is_empty() {
            writeln!(w, "    Notes      : {}", self.notes)?;
        }
        writeln!(w, "    Link       : {}", self.link)?;
        writeln!(w)
    }
}

impl Render for Library {
    fn render(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{} - {}", self.name, self.description)?;
        writeln!(w, "    Language: {}", self.language)?;
        writeln!(w, "    URL     : {}", self.url)?;
        writeln!(w)
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Write a list of records
    pub fn write_records<R: Record + Render>(
        &self,
        w: &mut dyn Write,
        records: &[R],
    ) -> io::Result<()> {
        match self.format {
            OutputFormat::Human => {
                if records.is_empty() {
                    return writeln!(w, "No {} found.", R::CATEGORY);
                }
                for record in records {
                    record.render(w)?;
                }
                Ok(())
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(records).map_err(io::Error::from)?;
                writeln!(w, "{}", json)
            }
            OutputFormat::Quiet => {
                for record in records {
                    writeln!(w, "{}", record.label())?;
                }
                Ok(())
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn human<R: Record + Render>(records: &[R]) -> String {
        let mut buf = Vec::new();
        Output::new(OutputFormat::Human)
            .write_records(&mut buf, records)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_link_format() {
        let links = vec![
            Link::new("Foo", "http://x")
                .with_author("Ann")
                .with_tags("go,rust"),
            Link::new("Bar", "http://y"),
        ];
        assert_eq!(
            human(&links),
            "\"Foo\" by Ann\n    Tags: go,rust\n    URL : http://x\n\n\
             \"Bar\"\n    Tags: \n    URL : http://y\n\n"
        );
    }

    #[test]
    fn test_reading_format() {
        let items = vec![ReadingListItem {
            name: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            link: "https://books.example/dune".to_string(),
        }];
        assert_eq!(
            human(&items),
            "\"Dune\" by Frank Herbert\n    Link: https://books.example/dune\n\n"
        );
    }

    #[test]
    fn test_shopping_format() {
        let items = vec![ShoppingListItem {
            name: "Desk".to_string(),
            category: "office".to_string(),
            link: "https://shop.example/desk".to_string(),
            price: 199.5,
        }];
        assert_eq!(
            human(&items),
            "Desk\n    Category: office\n    Price   : $199.50\n    Link    : https://shop.example/desk\n\n"
        );
    }

    #[test]
    fn test_tool_notes_suppressed_when_empty() {
        let mut tool = Tool {
            name: "jq".to_string(),
            description: "JSON processor".to_string(),
            link: "https://jqlang.org".to_string(),
            notes: String::new(),
        };
        assert!(!human(std::slice::from_ref(&tool)).contains("Notes"));

        tool.notes = "use -r for raw".to_string();
        assert_eq!(
            human(&[tool]),
            "jq\n    Description: JSON processor\n    Notes      : use -r for raw\n    Link       : https://jqlang.org\n\n"
        );
    }

    #[test]
    fn test_library_format() {
        let libraries = vec![Library {
            name: "serde".to_string(),
            language: "rust".to_string(),
            url: "https://serde.rs".to_string(),
            description: "serialization".to_string(),
        }];
        assert_eq!(
            human(&libraries),
            "serde - serialization\n    Language: rust\n    URL     : https://serde.rs\n\n"
        );
    }

    #[test]
    fn test_empty_human() {
        assert_eq!(human::<Tool>(&[]), "No tools found.\n");
    }

    #[test]
    fn test_quiet_and_json() {
        let links = vec![Link::new("Foo", "http://x"), Link::new("Bar", "http://y")];

        let mut buf = Vec::new();
        Output::new(OutputFormat::Quiet)
            .write_records(&mut buf, &links)
            .unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Foo\nBar\n");

        let mut buf = Vec::new();
        Output::new(OutputFormat::Json)
            .write_records(&mut buf, &links)
            .unwrap();
        let parsed: Vec<Link> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, links);
    }
}
