//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use kb_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir: {}", config.data_dir.display());
            println!(
                "  log_file: {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Apply `key = value` to a configuration
pub fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            if value.is_empty() {
                bail!("data_dir cannot be empty");
            }
            config.data_dir = value.into();
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, log_file",
                key
            );
        }
    }
    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    // Rewrite the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);

    // File values only, so KB_* environment overrides stay out of the file
    let mut config = Config::load_file(&save_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_apply_known_keys() {
        let mut config = Config::default();

        apply(&mut config, "data_dir", "/data/kb").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/data/kb"));

        apply(&mut config, "log_file", "/tmp/kb.log").unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/kb.log")));

        apply(&mut config, "log_file", "none").unwrap();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_apply_rejects_unknown_key() {
        let mut config = Config::default();
        let err = apply(&mut config, "sync_url", "ws://x").unwrap_err();
        assert!(err.to_string().contains("'sync_url'"));
        assert!(apply(&mut config, "data_dir", "").is_err());
    }

    #[test]
    fn test_set_keeps_env_overrides_out_of_file() {
        let saved = env::var("KB_LOG_FILE").ok();
        env::set_var("KB_LOG_FILE", "/tmp/from-env.log");

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let result = set(
            "data_dir".to_string(),
            "/d".to_string(),
            Some(&path),
            &Output::new(OutputFormat::Quiet),
        );

        match saved {
            Some(v) => env::set_var("KB_LOG_FILE", v),
            None => env::remove_var("KB_LOG_FILE"),
        }
        result.unwrap();

        let saved_config = Config::load_file(&path).unwrap();
        assert_eq!(saved_config.data_dir, PathBuf::from("/d"));
        assert!(saved_config.log_file.is_none());
        assert!(!std::fs::read_to_string(&path).unwrap().contains("from-env"));
    }
}
