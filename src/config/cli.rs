use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::utils::error::Result;
use crate::utils::validation::{validate_output_path, Validate};
use clap::{CommandFactory, Parser};

#[derive(Debug, Clone, Parser)]
#[command(name = "pharmacy-locator")]
#[command(about = "Find the pharmacy nearest to an address and show both on a map")]
pub struct CliArgs {
    /// Address to search from; all words are joined with spaces
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ADDRESS")]
    pub address: Vec<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Save the map to this file instead of displaying it
    #[arg(short, long, conflicts_with = "no_map")]
    pub output: Option<String>,

    /// Do not display the map
    #[arg(long)]
    pub no_map: bool,

    /// HTTP timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// The address text, or `None` when no words were given.
    pub fn address(&self) -> Option<String> {
        let address = self.address.join(" ");
        if address.trim().is_empty() {
            None
        } else {
            Some(address)
        }
    }

    pub fn usage() -> String {
        Self::command().render_help().to_string()
    }

    /// Defaults, then the config file, then the environment, then flags.
    pub fn load_settings(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading configuration from {}", path);
            TomlConfig::from_file(path)?.apply_to(&mut settings);
        }

        settings.apply_env(|name| std::env::var(name).ok());

        if let Some(timeout) = self.timeout {
            settings.timeout_seconds = timeout;
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for CliArgs {
    fn validate(&self) -> Result<()> {
        if let Some(output) = &self.output {
            validate_output_path(output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_address_words_are_joined() {
        let args = CliArgs::parse_from(["pharmacy-locator", "Moscow,", "Red", "Square"]);
        assert_eq!(args.address().as_deref(), Some("Moscow, Red Square"));
        assert!(!args.no_map);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_no_address() {
        let args = CliArgs::parse_from(["pharmacy-locator"]);
        assert_eq!(args.address(), None);
        assert!(CliArgs::usage().contains("pharmacy-locator"));
    }

    #[test]
    fn test_flags_before_address() {
        let args = CliArgs::parse_from([
            "pharmacy-locator",
            "--timeout",
            "5",
            "-o",
            "map.png",
            "Tverskaya",
            "-7",
        ]);
        assert_eq!(args.timeout, Some(5));
        assert_eq!(args.output.as_deref(), Some("map.png"));
        assert_eq!(args.address().as_deref(), Some("Tverskaya -7"));
    }

    #[test]
    fn test_output_conflicts_with_no_map() {
        let result =
            CliArgs::try_parse_from(["pharmacy-locator", "--no-map", "-o", "map.png", "Moscow"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_must_name_a_file() {
        let args = CliArgs::parse_from(["pharmacy-locator", "-o", "maps/", "Moscow"]);
        assert!(args.validate().is_err());

        let args = CliArgs::parse_from(["pharmacy-locator", "-o", "maps/nearest.png", "Moscow"]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_cli_timeout_overrides_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[http]\ntimeout_seconds = 30\n\n[search]\nlang = \"en_US\"\n")
            .unwrap();
        let config_path = temp_file.path().to_str().unwrap().to_string();

        let args = CliArgs::parse_from([
            "pharmacy-locator",
            "--config",
            config_path.as_str(),
            "--timeout",
            "4",
            "Moscow",
        ]);
        let settings = args.load_settings().unwrap();
        assert_eq!(settings.timeout_seconds, 4);
        assert_eq!(settings.search.lang, "en_US");
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let args = CliArgs::parse_from(["pharmacy-locator", "--timeout", "0", "Moscow"]);
        assert!(args.load_settings().is_err());
    }
}
