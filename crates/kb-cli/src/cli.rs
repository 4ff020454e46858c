//! Command-line definitions
//!
//! `kb <category> <operation> [flags]`. Field flags are optional at parse
//! time; required fields are checked once the record is built.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Command, Parser, Subcommand};

use kb_core::{Category, Library, Link, ReadingListItem, ShoppingListItem, Tool};

use crate::prompt::FieldResolver;

#[derive(Parser)]
#[command(name = "kb")]
#[command(about = "kb - a personal knowledge base of links, reading, shopping, tools and libraries")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More log output (repeat for debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the category files
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Saved links
    Links {
        #[command(subcommand)]
        command: LinkCommands,
    },
    /// Reading list
    Reading {
        #[command(subcommand)]
        command: ReadingCommands,
    },
    /// Shopping list
    Shopping {
        #[command(subcommand)]
        command: ShoppingCommands,
    },
    /// Tools
    Tools {
        #[command(subcommand)]
        command: ToolCommands,
    },
    /// Libraries
    Libraries {
        #[command(subcommand)]
        command: LibraryCommands,
    },
    /// Show category files and record counts
    Status {
        /// Only this category
        category: Option<Category>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum LinkCommands {
    /// Add a link
    New(NewLink),
    /// List links
    Search {
        /// Only links carrying this tag
        #[arg(long)]
        tag: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ReadingCommands {
    /// Add a reading list item
    New(NewReadingListItem),
    /// List the reading list
    Search,
}

#[derive(Subcommand)]
pub enum ShoppingCommands {
    /// Add a shopping list item
    New(NewShoppingListItem),
    /// List the shopping list
    Search,
}

#[derive(Subcommand)]
pub enum ToolCommands {
    /// Add a tool
    New(NewTool),
    /// List tools
    Search,
}

#[derive(Subcommand)]
pub enum LibraryCommands {
    /// Add a library
    New(NewLibrary),
    /// List libraries
    Search,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct NewLink {
    /// The title of the link
    #[arg(long)]
    pub title: Option<String>,
    /// The author of the link
    #[arg(long)]
    pub author: Option<String>,
    /// The url of the link
    #[arg(long)]
    pub url: Option<String>,
    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,
    /// Prompt for fields not given as flags
    #[arg(short = 'i', long)]
    pub interactive: bool,
}

impl NewLink {
    pub fn into_record(self, fields: &mut FieldResolver<'_>) -> Result<Link> {
        Ok(Link {
            title: fields.resolve(self.title, "Title")?,
            author: fields.resolve(self.author, "Author")?,
            url: fields.resolve(self.url, "URL")?,
            tags: fields.resolve(self.tags, "Tags")?,
        })
    }
}

#[derive(Args, Debug, Default)]
pub struct NewReadingListItem {
    /// The name of the reading list item
    #[arg(long)]
    pub name: Option<String>,
    /// The author's name
    #[arg(long)]
    pub author: Option<String>,
    /// The link to the item
    #[arg(long)]
    pub link: Option<String>,
    /// Prompt for fields not given as flags
    #[arg(short = 'i', long)]
    pub interactive: bool,
}

impl NewReadingListItem {
    pub fn into_record(self, fields: &mut FieldResolver<'_>) -> Result<ReadingListItem> {
        Ok(ReadingListItem {
            name: fields.resolve(self.name, "Name")?,
            author: fields.resolve(self.author, "Author")?,
            link: fields.resolve(self.link, "Link")?,
        })
    }
}

#[derive(Args, Debug, Default)]
pub struct NewShoppingListItem {
    /// The name of the item
    #[arg(long)]
    pub name: Option<String>,
    /// The category for the item
    #[arg(long = "cat", visible_alias = "category")]
    pub category: Option<String>,
    /// A link to the item
    #[arg(long)]
    pub link: Option<String>,
    /// The price of the item
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub price: f64,
}

impl From<NewShoppingListItem> for ShoppingListItem {
    fn from(args: NewShoppingListItem) -> Self {
        Self {
            name: args.name.unwrap_or_default(),
            category: args.category.unwrap_or_default(),
            link: args.link.unwrap_or_default(),
            price: args.price,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct NewTool {
    /// The name of the tool
    #[arg(long)]
    pub name: Option<String>,
    /// A description of the tool
    #[arg(long = "desc", visible_alias = "description")]
    pub description: Option<String>,
    /// A link to the tool
    #[arg(long)]
    pub link: Option<String>,
    /// Notes about the tool
    #[arg(long)]
    pub notes: Option<String>,
}

impl From<NewTool> for Tool {
    fn from(args: NewTool) -> Self {
        Self {
            name: args.name.unwrap_or_default(),
            description: args.description.unwrap_or_default(),
            link: args.link.unwrap_or_default(),
            notes: args.notes.unwrap_or_default(),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct NewLibrary {
    /// The name of the library
    #[arg(long)]
    pub name: Option<String>,
    /// The language the library is written in
    #[arg(long = "lang", visible_alias = "language")]
    pub language: Option<String>,
    /// The URL to the library
    #[arg(long)]
    pub url: Option<String>,
    /// A description of the library's function
    #[arg(long = "desc", visible_alias = "description")]
    pub description: Option<String>,
}

impl From<NewLibrary> for Library {
    fn from(args: NewLibrary) -> Self {
        Self {
            name: args.name.unwrap_or_default(),
            language: args.language.unwrap_or_default(),
            url: args.url.unwrap_or_default(),
            description: args.description.unwrap_or_default(),
        }
    }
}

/// Rewrite single-dash long flags (`-title`) into their `--title` form
///
/// Only names that are long flags somewhere in `command` are rewritten, so
/// short flags (`-i`, `-q`, `-vv`) and negative numbers pass through.
/// Everything after a bare `--` is left alone.
pub fn normalize_args<I, T>(command: &Command, args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut longs = HashSet::new();
    collect_long_flags(command, &mut longs);

    let mut normalized = Vec::new();
    let mut passthrough = false;
    for arg in args {
        let arg: OsString = arg.into();
        if passthrough {
            normalized.push(arg);
            continue;
        }
        let rewritten = match arg.to_str() {
            Some("--") => {
                passthrough = true;
                None
            }
            Some(s) if s.starts_with('-') && !s.starts_with("--") => {
                let name = s[1..].split('=').next().unwrap_or_default();
                (name.len() > 1 && longs.contains(name)).then(|| OsString::from(format!("-{}", s)))
            }
            _ => None,
        };
        normalized.push(rewritten.unwrap_or(arg));
    }
    normalized
}

fn collect_long_flags(command: &Command, longs: &mut HashSet<String>) {
    for arg in command.get_arguments() {
        if let Some(long) = arg.get_long() {
            longs.insert(long.to_string());
        }
        if let Some(aliases) = arg.get_all_aliases() {
            longs.extend(aliases.into_iter().map(str::to_string));
        }
    }
    for sub in command.get_subcommands() {
        collect_long_flags(sub, longs);
    }
}
