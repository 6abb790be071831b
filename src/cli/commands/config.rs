//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Set { key, value } => {
            let updated = set_key(&settings, key, value)?;
            updated.save()?;
            Output::success(&format!("Set {} = {}", key, value));
        }

        ConfigAction::Edit => {
            let config_path = Settings::default_config_path();

            // Create default config if it doesn't exist
            if !config_path.exists() {
                settings.save()?;
                Output::info(&format!("Created default config at {:?}", config_path));
            }

            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

            Output::info(&format!("Opening config in {}...", editor));

            let status = std::process::Command::new(&editor)
                .arg(&config_path)
                .status();

            match status {
                Ok(s) if s.success() => {
                    Output::success("Config saved.");
                }
                Ok(_) => {
                    Output::warning("Editor exited with non-zero status.");
                }
                Err(e) => {
                    Output::error(&format!("Failed to open editor: {}", e));
                    Output::info(&format!("Config file is at: {:?}", config_path));
                }
            }
        }

        ConfigAction::Path => {
            let config_path = Settings::default_config_path();
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Apply one dotted-key assignment (e.g. "model.name") to the settings.
fn set_key(settings: &Settings, key: &str, value: &str) -> Result<Settings> {
    let mut table: toml::Value = toml::Value::try_from(settings)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    let parts: Vec<&str> = key.split('.').collect();
    let (last, parents) = parts
        .split_last()
        .ok_or_else(|| anyhow::anyhow!("Unknown config key: {}", key))?;

    let mut cursor = &mut table;
    for part in parents {
        let current = cursor
            .as_table_mut()
            .ok_or_else(|| anyhow::anyhow!("'{}' does not name a config table", key))?;
        cursor = current
            .get_mut(*part)
            .ok_or_else(|| anyhow::anyhow!("Unknown config key: {}", key))?;
    }

    let current = cursor
        .as_table_mut()
        .ok_or_else(|| anyhow::anyhow!("'{}' does not name a config table", key))?;
    let new_value = {
        let existing = current
            .get(*last)
            .ok_or_else(|| anyhow::anyhow!("Unknown config key: {}", key))?;
        parse_value(value, existing)
    };
    current.insert(last.to_string(), new_value);

    // Round-trip through Settings so bad assignments fail here, not at next load
    let updated: Settings = table
        .try_into()
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
    Ok(updated)
}

/// Interpret the value with the same type as the existing entry.
fn parse_value(value: &str, existing: &toml::Value) -> toml::Value {
    match existing {
        toml::Value::Integer(_) => value
            .parse::<i64>()
            .map(toml::Value::Integer)
            .unwrap_or_else(|_| toml::Value::String(value.to_string())),
        toml::Value::Boolean(_) => value
            .parse::<bool>()
            .map(toml::Value::Boolean)
            .unwrap_or_else(|_| toml::Value::String(value.to_string())),
        toml::Value::Array(_) => toml::Value::Array(
            value
                .split(',')
                .map(|v| toml::Value::String(v.trim().to_string()))
                .collect(),
        ),
        _ => toml::Value::String(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_key_string() {
        let settings = Settings::default();
        let updated = set_key(&settings, "model.name", "gpt-4o-mini").unwrap();
        assert_eq!(updated.model.name, "gpt-4o-mini");
    }

    #[test]
    fn test_set_key_integer() {
        let settings = Settings::default();
        let updated = set_key(&settings, "agent.max_iterations", "5").unwrap();
        assert_eq!(updated.agent.max_iterations, 5);
    }

    #[test]
    fn test_set_key_language_list() {
        let settings = Settings::default();
        let updated = set_key(&settings, "transcript.languages", "en, no").unwrap();
        assert_eq!(
            updated.transcript.languages,
            vec!["en".to_string(), "no".to_string()]
        );
    }

    #[test]
    fn test_set_key_unknown() {
        let settings = Settings::default();
        assert!(set_key(&settings, "model.nonsense", "x").is_err());
    }
}
