use crate::error::{Result, ReviewError};
use crate::logic::RulesEngine;
use crate::models::{CheckSettings, ChecksConfig};
use dialoguer::{Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub checks: ChecksConfig,
    #[serde(default)]
    pub outreach: OutreachConfig,
}

/// Wording of the generated outreach emails.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutreachConfig {
    pub subject_prefix: String,
    pub greeting: String,
    pub fallback_name: String,
    pub intro: String,
    pub signature: String,
    pub checklist_url_base: String,
}

impl Default for OutreachConfig {
    fn default() -> Self {
        Self {
            subject_prefix: "eBird checklist review:".into(),
            greeting: "Dear".into(),
            fallback_name: "eBird observer".into(),
            intro: "Thank you for sharing your observations on eBird. While reviewing \
                    recent checklists for data quality, we noticed something that may \
                    need your attention."
                .into(),
            signature: "Best regards,\nThe eBird review team".into(),
            checklist_url_base: "https://ebird.org/checklist".into(),
        }
    }
}

impl Config {
    /// Loads the config file, or returns the defaults when none exists.
    /// An explicit `config_override` must exist.
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) if !p.exists() => {
                return Err(ReviewError::Config(format!(
                    "Config file not found at {:?}",
                    p
                )))
            }
            Some(p) => p.clone(),
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No config file found - using default check settings");
                    return Ok(Self::default());
                }
            },
        };

        tracing::debug!("Loading config from {}", config_path.display());
        Self::from_file(&config_path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| ReviewError::Config(format!("Failed to read config: {}", e)))?;
        Self::from_yaml(&config_str)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // Substitute environment variables
        let content = Self::substitute_env_vars(content);

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content)
            .map_err(|e| ReviewError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| ReviewError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Then the XDG config directory
        dirs::config_dir()
            .map(|dir| dir.join("checklist-review").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/checklist-review/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ReviewError::Config("Cannot determine config directory".into()))?
            .join("checklist-review");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the new Config and the path it was written to.
    pub fn setup_interactive(
        engine: &RulesEngine,
        target: Option<&PathBuf>,
    ) -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's choose which checklist checks to run.");
        println!();

        let labels: Vec<String> = engine
            .rules()
            .map(|r| format!("{} ({})", r.label(), r.id()))
            .collect();
        let defaults: Vec<bool> = engine.rules().map(|r| r.selected_by_default()).collect();

        let chosen = MultiSelect::new()
            .with_prompt("Checks to run (space to toggle, enter to confirm)")
            .items(&labels)
            .defaults(&defaults)
            .interact()
            .map_err(|e| ReviewError::Config(format!("Input error: {}", e)))?;

        let mut checks = ChecksConfig::default();
        for (index, rule) in engine.rules().enumerate() {
            let selected = chosen.contains(&index);
            let mut settings = CheckSettings::selected(selected);

            if selected && !rule.thresholds().is_empty() {
                println!();
                println!("{}", rule.label());
                for spec in rule.thresholds() {
                    let value: f64 = Input::new()
                        .with_prompt(format!("  {}", spec.label))
                        .default(spec.default_value)
                        .interact_text()
                        .map_err(|e| ReviewError::Config(format!("Input error: {}", e)))?;
                    settings = settings.with_threshold(spec.key, value);
                }
            }

            checks.set(rule.id(), settings);
        }

        println!();

        let mut outreach = OutreachConfig::default();
        outreach.signature = Input::new()
            .with_prompt("Email signature")
            .default(outreach.signature.replace('\n', " / "))
            .interact_text()
            .map_err(|e| ReviewError::Config(format!("Input error: {}", e)))?
            .replace(" / ", "\n");

        let config = Config { checks, outreach };

        let config_path = match target {
            Some(p) => p.clone(),
            None => Self::default_config_path()?,
        };
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Write with a header comment
        let content = format!(
            "# Checklist review configuration\n# Generated by `checklist-review init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            config.to_yaml()?
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}
