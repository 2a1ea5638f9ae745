use std::collections::HashMap;
use std::env;
use std::fs;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_CACHE_TTL_SECS: i64 = 600;

#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(format!("Invalid config line {}: {}", idx + 1, line));
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if (value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\''))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// Config file value, falling back to the process environment.
    pub fn get_prop(&self, key: &str) -> Option<String> {
        self.get(key).or_else(|| env::var(key).ok())
    }
}

/// Typed knobs for the fetch/cache pipeline. Unparseable values fall
/// back to the defaults rather than failing startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub cache_ttl_secs: i64,
}

impl Settings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            request_timeout_secs: parse_or(
                config.get_prop("REQUEST_TIMEOUT"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            max_retries: parse_or(config.get_prop("MAX_RETRIES"), DEFAULT_MAX_RETRIES),
            cache_ttl_secs: parse_or(config.get_prop("CACHE_TTL_SECONDS"), DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}
