use anyhow::{Context, Result, anyhow};
use chrono::NaiveTime;
use chrono_tz::Tz;
use payday_web::ServerConfig;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramSection {
    /// Bot token; falls back to the BOT_TOKEN environment variable.
    #[serde(default)]
    pub token: Option<String>,
    /// Public URL Telegram should deliver updates to.
    pub webhook_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetsSection {
    pub spreadsheet_id: String,
    /// OAuth bearer token; falls back to the SHEETS_TOKEN environment variable.
    #[serde(default)]
    pub access_token: Option<String>,
    /// A1 range of the worker table, columns [id, name, phone, bank, receiver].
    #[serde(default = "default_range")]
    pub range: String,
}

fn default_range() -> String {
    "A:E".to_owned()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        ServerSection {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    8000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlushSection {
    /// Local fire time, "HH:MM".
    #[serde(default = "default_flush_time")]
    pub time: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for FlushSection {
    fn default() -> Self {
        FlushSection {
            time: default_flush_time(),
            timezone: default_timezone(),
        }
    }
}

fn default_flush_time() -> String {
    "21:00".to_owned()
}

fn default_timezone() -> String {
    "Europe/Moscow".to_owned()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateSection {
    #[serde(default = "default_destination_file")]
    pub destination_file: PathBuf,
}

impl Default for StateSection {
    fn default() -> Self {
        StateSection {
            destination_file: default_destination_file(),
        }
    }
}

fn default_destination_file() -> PathBuf {
    PathBuf::from("destination.chat")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub telegram: TelegramSection,
    pub sheets: SheetsSection,
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub flush: FlushSection,
    #[serde(default)]
    pub state: StateSection,
}

impl Config {
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn find_and_load() -> Result<Option<Self>> {
        let config_locations = [
            std::path::Path::new("payday.toml"),
            std::path::Path::new(".payday.toml"),
        ];

        for location in &config_locations {
            if location.exists() {
                return Self::load_from_file(location).map(Some);
            }
        }

        Ok(None)
    }

    /// Resolves secrets from the environment and parses the schedule fields.
    pub fn into_server_config(self) -> Result<ServerConfig> {
        let bot_token = secret(self.telegram.token, "BOT_TOKEN")
            .context("telegram.token is not set and BOT_TOKEN is not in the environment")?;
        let sheets_token = secret(self.sheets.access_token, "SHEETS_TOKEN")
            .context("sheets.access_token is not set and SHEETS_TOKEN is not in the environment")?;

        let flush_time = NaiveTime::parse_from_str(&self.flush.time, "%H:%M")
            .with_context(|| format!("flush.time {:?} is not HH:MM", self.flush.time))?;
        let timezone: Tz = self
            .flush
            .timezone
            .parse()
            .map_err(|e: chrono_tz::ParseError| anyhow!(e))
            .with_context(|| format!("flush.timezone {:?} is unknown", self.flush.timezone))?;

        Ok(ServerConfig {
            bot_token,
            webhook_url: self.telegram.webhook_url,
            spreadsheet_id: self.sheets.spreadsheet_id,
            sheet_range: self.sheets.range,
            sheets_token,
            destination_file: self.state.destination_file,
            flush_time,
            timezone,
            port: self.server.port,
        })
    }
}

fn secret(configured: Option<String>, env_var: &str) -> Option<String> {
    configured
        .filter(|s| !s.is_empty())
        .or_else(|| std::env::var(env_var).ok().filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [telegram]
            token = "123:abc"
            webhook_url = "https://bot.example.com/webhook"

            [sheets]
            spreadsheet_id = "sheet-id"
            access_token = "ya29.token"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.flush.time, "21:00");
        assert_eq!(config.flush.timezone, "Europe/Moscow");
        assert_eq!(config.sheets.range, "A:E");

        let server = config.into_server_config().unwrap();
        assert_eq!(server.flush_time, NaiveTime::from_hms_opt(21, 0, 0).unwrap());
        assert_eq!(server.timezone, chrono_tz::Europe::Moscow);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<Config, _> = toml::from_str(
            r#"
            [telegram]
            token = "123:abc"
            webhook_url = "https://bot.example.com/webhook"
            chat = 42

            [sheets]
            spreadsheet_id = "sheet-id"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn bad_flush_time_is_rejected() {
        let config: Config = toml::from_str(
            r#"
            [telegram]
            token = "123:abc"
            webhook_url = "https://bot.example.com/webhook"

            [sheets]
            spreadsheet_id = "sheet-id"
            access_token = "ya29.token"

            [flush]
            time = "9pm"
            "#,
        )
        .unwrap();
        assert!(config.into_server_config().is_err());
    }
}
