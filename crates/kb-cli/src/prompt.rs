//! Interactive field prompting
//!
//! Field values come from three sources, in order: the command-line flag,
//! an interactive prompt (only with `-i`), then empty. A flag that was
//! given is never prompted for.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// Source of interactively entered values
pub trait Prompter {
    /// Ask for `label`, returning the trimmed answer (possibly empty)
    fn prompt(&mut self, label: &str) -> Result<String>;
}

/// Line-based prompter over any reader/writer pair
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

/// Prompter over the process's stdin/stdout
pub fn stdin_prompter() -> LinePrompter<io::StdinLock<'static>, io::Stdout> {
    LinePrompter::new(io::stdin().lock(), io::stdout())
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .with_context(|| format!("Failed to read {}", label.to_lowercase()))?;
        Ok(line.trim().to_string())
    }
}

/// Resolves each field of a record being created
pub struct FieldResolver<'a> {
    prompter: Option<&'a mut dyn Prompter>,
}

impl<'a> FieldResolver<'a> {
    /// Flags only; missing fields are empty
    pub fn flags_only() -> Self {
        Self { prompter: None }
    }

    /// Prompt for every field not given as a flag
    pub fn interactive(prompter: &'a mut dyn Prompter) -> Self {
        Self {
            prompter: Some(prompter),
        }
    }

    /// flag > prompt > empty
    pub fn resolve(&mut self, flag: Option<String>, label: &str) -> Result<String> {
        if let Some(value) = flag {
            return Ok(value);
        }
        match self.prompter.as_deref_mut() {
            Some(prompter) => prompter.prompt(label),
            None => Ok(String::new()),
        }
    }
}
