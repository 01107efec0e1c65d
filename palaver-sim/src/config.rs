//! Simulation configuration — TOML-loadable driver settings.

use std::path::Path;

use palaver_llm::{HttpOracle, Provider};
use serde::Deserialize;

/// Driver settings for one simulation run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// How many persons to bootstrap from the catalog.
    pub population: usize,
    /// Message-pairs per conversation.
    pub rounds: usize,
    /// Conversations to run before exiting.
    pub encounters: usize,
    /// Delay between streamed dialogue lines, in milliseconds.
    pub pace_ms: u64,
    /// Oracle backend settings.
    pub oracle: OracleConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            population: 3,
            rounds: 3,
            encounters: 10,
            pace_ms: 300,
            oracle: OracleConfig::default(),
        }
    }
}

/// Oracle backend settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Backend kind: `"ollama"`, `"openai"`, or `"none"`.
    pub provider: String,
    /// Base URL of the backend.
    pub base_url: String,
    /// API key for OpenAI-compatible backends. Falls back to the
    /// `PALAVER_API_KEY` environment variable when unset.
    pub api_key: Option<String>,
    /// Model name to request.
    pub model: String,
    /// Retry attempts per oracle call (collaborator-side policy).
    pub max_retries: u32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".into(),
            base_url: "http://localhost:11434".into(),
            api_key: None,
            model: "llama3.2".into(),
            max_retries: 2,
        }
    }
}

impl SimConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }
}

impl OracleConfig {
    /// Build the HTTP oracle described by this config.
    pub fn build(&self) -> anyhow::Result<HttpOracle> {
        let provider = match self.provider.as_str() {
            "ollama" => Provider::Ollama {
                base_url: self.base_url.clone(),
            },
            "openai" => Provider::OpenAiCompatible {
                base_url: self.base_url.clone(),
                api_key: self
                    .api_key
                    .clone()
                    .or_else(|| std::env::var("PALAVER_API_KEY").ok())
                    .unwrap_or_default(),
            },
            "none" => Provider::None,
            other => anyhow::bail!("unknown oracle provider '{other}'"),
        };
        Ok(HttpOracle::new(provider, self.model.clone(), self.max_retries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_run() {
        let config = SimConfig::default();
        assert_eq!(config.population, 3);
        assert_eq!(config.rounds, 3);
        assert_eq!(config.encounters, 10);
        assert_eq!(config.pace_ms, 300);
        assert_eq!(config.oracle.provider, "ollama");
    }

    #[test]
    fn partial_toml_keeps_defaults_for_the_rest() {
        let config: SimConfig = toml::from_str(
            r#"
population = 5

[oracle]
provider = "openai"
base_url = "https://api.example.com"
model = "gpt-4o-mini"
"#,
        )
        .expect("parse");

        assert_eq!(config.population, 5);
        assert_eq!(config.rounds, 3);
        assert_eq!(config.oracle.provider, "openai");
        assert_eq!(config.oracle.max_retries, 2);
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let config = OracleConfig {
            provider: "carrier-pigeon".into(),
            ..OracleConfig::default()
        };
        assert!(config.build().is_err());
    }

    #[test]
    fn none_provider_builds_an_unavailable_oracle() {
        let config = OracleConfig {
            provider: "none".into(),
            ..OracleConfig::default()
        };
        let oracle = config.build().expect("build");
        assert!(!oracle.is_available());
    }
}
