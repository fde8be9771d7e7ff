//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `domus.toml` in the working directory (or the path in
//! `DOMUS_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use domus_adapter_mqtt::MqttConfig;
use domus_adapter_openai::OpenAiConfig;
use domus_app::services::conversation_service::{
    ConversationSettings, DEFAULT_UTC_OFFSET_MINUTES,
};

const DEFAULT_CONFIG_PATH: &str = "domus.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Persona, locale and streaming settings.
    pub assistant: AssistantConfig,
    /// Telemetry ingestion.
    pub mqtt: MqttConfig,
    /// Speech and language collaborators.
    pub openai: OpenAiConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Name the assistant introduces itself with.
    pub name: String,
    /// Offset of the local wall clock from UTC, in minutes.
    pub utc_offset_minutes: i32,
    /// Idle seconds before the sensor stream sends a keepalive.
    pub keepalive_secs: u64,
}

impl Config {
    /// Load configuration from `domus.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("DOMUS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("DOMUS_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("DOMUS_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("DOMUS_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("DOMUS_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("DOMUS_MQTT_HOST") {
            self.mqtt.broker_host = val;
        }
        if let Some(port) = var("DOMUS_MQTT_PORT").and_then(|val| val.parse().ok()) {
            self.mqtt.broker_port = port;
        }
        if let Some(val) = var("DOMUS_OPENAI_BASE_URL") {
            self.openai.base_url = val;
        }
        if let Some(val) = var("DOMUS_OPENAI_API_KEY").or_else(|| var("OPENAI_API_KEY")) {
            self.openai.api_key = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.assistant.keepalive_secs == 0 {
            return Err(ConfigError::Validation(
                "assistant.keepalive_secs must be non-zero".to_string(),
            ));
        }
        if self.mqtt.reconnect_delay_secs == 0 {
            return Err(ConfigError::Validation(
                "mqtt.reconnect_delay_secs must be non-zero".to_string(),
            ));
        }
        if self.mqtt.topic.trim().is_empty() {
            return Err(ConfigError::Validation(
                "mqtt.topic must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl AssistantConfig {
    #[must_use]
    pub fn keepalive(&self) -> Duration {
        Duration::from_secs(self.keepalive_secs)
    }

    #[must_use]
    pub fn conversation_settings(&self) -> ConversationSettings {
        ConversationSettings {
            assistant_name: self.name.clone(),
            utc_offset_minutes: self.utc_offset_minutes,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "domus=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: ConversationSettings::default().assistant_name,
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            keepalive_secs: 30,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.assistant.name, "Alexa");
        assert_eq!(config.assistant.utc_offset_minutes, -300);
        assert_eq!(config.assistant.keepalive(), Duration::from_secs(30));
        assert_eq!(config.mqtt.topic, "data");
        assert_eq!(config.openai.max_tokens, 150);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let toml = "";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [logging]
            filter = 'debug'

            [assistant]
            name = 'Domus'
            utc_offset_minutes = 60
            keepalive_secs = 10

            [mqtt]
            broker_host = 'broker.local'
            topic = 'aula/sensores'

            [openai]
            base_url = 'http://127.0.0.1:8080/v1'
            chat_model = 'qwen2.5'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.assistant.name, "Domus");
        assert_eq!(config.assistant.utc_offset_minutes, 60);
        assert_eq!(config.assistant.keepalive_secs, 10);
        assert_eq!(config.mqtt.broker_host, "broker.local");
        assert_eq!(config.mqtt.broker_port, 1883);
        assert_eq!(config.mqtt.topic, "aula/sensores");
        assert_eq!(config.openai.base_url, "http://127.0.0.1:8080/v1");
        assert_eq!(config.openai.chat_model, "qwen2.5");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn should_apply_environment_overrides() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("DOMUS_BIND", "127.0.0.1:7000"),
            ("DOMUS_LOG", "debug"),
            ("DOMUS_MQTT_HOST", "10.0.0.5"),
            ("DOMUS_MQTT_PORT", "1884"),
            ("DOMUS_OPENAI_BASE_URL", "http://llm.local/v1"),
            ("OPENAI_API_KEY", "sk-fallback"),
        ]));
        assert_eq!(config.bind_addr(), "127.0.0.1:7000");
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.mqtt.broker_host, "10.0.0.5");
        assert_eq!(config.mqtt.broker_port, 1884);
        assert_eq!(config.openai.base_url, "http://llm.local/v1");
        assert_eq!(config.openai.api_key, "sk-fallback");
    }

    #[test]
    fn should_prefer_rust_log_and_domus_api_key() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("DOMUS_LOG", "debug"),
            ("RUST_LOG", "trace"),
            ("DOMUS_OPENAI_API_KEY", "sk-domus"),
            ("OPENAI_API_KEY", "sk-fallback"),
        ]));
        assert_eq!(config.logging.filter, "trace");
        assert_eq!(config.openai.api_key, "sk-domus");
    }

    #[test]
    fn should_ignore_unparsable_port_override() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("DOMUS_PORT", "eighty")]));
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_keepalive() {
        let mut config = Config::default();
        config.assistant.keepalive_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn should_reject_zero_reconnect_delay() {
        let mut config = Config::default();
        config.mqtt.reconnect_delay_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn should_reject_blank_topic() {
        let mut config = Config::default();
        config.mqtt.topic = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_defaults() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_format_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn should_build_conversation_settings() {
        let config = Config::default();
        let settings = config.assistant.conversation_settings();
        assert_eq!(settings.assistant_name, "Alexa");
        assert_eq!(settings.utc_offset_minutes, -300);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
