use std::env;

use url::Url;

use crate::error::AppError;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
pub const DEFAULT_MAX_TURNS: usize = 25;
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Runtime configuration for the comparison driver, read from the
/// environment. `ANTHROPIC_API_KEY` is the only required value.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    /// External backend to run against. When unset the driver spawns the
    /// mock backend in-process on an ephemeral port.
    pub backend_url: Option<Url>,
    pub max_turns: usize,
    /// Whether the graphql_query tool description includes the worked
    /// examples of nested queries. Experimental variable of the demo.
    pub nesting_hint: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config(
                    "ANTHROPIC_API_KEY is not set. \
                     Set it by running: export ANTHROPIC_API_KEY=your_api_key"
                        .to_string(),
                )
            })?;

        let model = env_or("APIDUEL_MODEL", DEFAULT_MODEL);

        let backend_url = match env::var("APIDUEL_BACKEND_URL") {
            Ok(raw) if !raw.trim().is_empty() => Some(Url::parse(raw.trim()).map_err(|e| {
                AppError::Config(format!("invalid APIDUEL_BACKEND_URL '{raw}': {e}"))
            })?),
            _ => None,
        };

        let max_turns = match env::var("APIDUEL_MAX_TURNS") {
            Ok(raw) if !raw.trim().is_empty() => raw.trim().parse::<usize>().map_err(|_| {
                AppError::Config(format!("invalid APIDUEL_MAX_TURNS '{raw}': expected a number"))
            })?,
            _ => DEFAULT_MAX_TURNS,
        };

        let nesting_hint = env::var("APIDUEL_NESTING_HINT")
            .map(|v| flag_enabled(&v))
            .unwrap_or(true);

        Ok(Self {
            api_key,
            model,
            backend_url,
            max_turns,
            nesting_hint,
        })
    }
}

pub fn server_port() -> u16 {
    env::var("APIDUEL_PORT")
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_SERVER_PORT)
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn flag_enabled(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parsing() {
        assert!(flag_enabled("1"));
        assert!(flag_enabled("true"));
        assert!(flag_enabled("yes"));
        assert!(flag_enabled(""));
        assert!(!flag_enabled("0"));
        assert!(!flag_enabled("false"));
        assert!(!flag_enabled("OFF"));
        assert!(!flag_enabled(" no "));
    }
}
