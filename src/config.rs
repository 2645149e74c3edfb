use std::time::Duration;
use url::Url;

pub const API_BASE_VAR: &str = "POKERLENS_API_BASE";
pub const REPLAY_SPEED_VAR: &str = "POKERLENS_REPLAY_SPEED_MS";
const DEFAULT_API_BASE: &str = "http://localhost:8000";
const DEFAULT_REPLAY_SPEED: Duration = Duration::from_millis(1500);

/// Where the game server lives and how fast replays advance.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base: Url,
    pub replay_speed: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_base(),
            replay_speed: DEFAULT_REPLAY_SPEED,
        }
    }
}

impl Config {
    /// Reads overrides from the environment.
    /// Unparseable values are logged and replaced with defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(base) = lookup(API_BASE_VAR) {
            match parse_base(&base) {
                Ok(url) => config.api_base = url,
                Err(e) => log::warn!("[config] ignoring {}={:?}: {}", API_BASE_VAR, base, e),
            }
        }
        if let Some(speed) = lookup(REPLAY_SPEED_VAR) {
            match speed.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.replay_speed = Duration::from_millis(ms),
                _ => log::warn!("[config] ignoring {}={:?}", REPLAY_SPEED_VAR, speed),
            }
        }
        config
    }
}

/// Accepts http(s) URLs only; the channel URL is derived from this one.
pub fn parse_base(s: &str) -> anyhow::Result<Url> {
    let url = Url::parse(s.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(anyhow::anyhow!("unsupported scheme {}", other)),
    }
}

fn default_base() -> Url {
    Url::parse(DEFAULT_API_BASE).expect("default api base parses")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> Config {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.api_base.as_str(), "http://localhost:8000/");
        assert_eq!(config.replay_speed, Duration::from_millis(1500));
        assert_eq!(lookup(&[]), config);
    }
    #[test]
    fn environment_overrides() {
        let config = lookup(&[
            (API_BASE_VAR, "https://poker.example/api"),
            (REPLAY_SPEED_VAR, "250"),
        ]);
        assert_eq!(config.api_base.host_str(), Some("poker.example"));
        assert_eq!(config.replay_speed, Duration::from_millis(250));
    }
    #[test]
    fn invalid_values_fall_back() {
        let config = lookup(&[(API_BASE_VAR, "ftp://nope"), (REPLAY_SPEED_VAR, "fast")]);
        assert_eq!(config, Config::default());
        assert_eq!(lookup(&[(REPLAY_SPEED_VAR, "0")]).replay_speed, Duration::from_millis(1500));
    }
}
