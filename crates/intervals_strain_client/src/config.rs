use crate::IntervalsError;
use secrecy::SecretString;

pub const DEFAULT_BASE_URL: &str = "https://intervals.icu";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: SecretString,
    pub athlete_id: String,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, IntervalsError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Reads configuration through `get` so tests never touch the process
    /// environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, IntervalsError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let api = get("INTERVALS_ICU_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| IntervalsError::Config("INTERVALS_ICU_API_KEY missing".into()))?;
        let athlete_id = get("INTERVALS_ICU_ATHLETE_ID")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| IntervalsError::Config("INTERVALS_ICU_ATHLETE_ID missing".into()))?;
        let base_url = get("INTERVALS_ICU_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        Ok(Self {
            api_key: SecretString::new(api.into()),
            athlete_id,
            base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_missing_api_key() {
        let get = |k: &str| match k {
            "INTERVALS_ICU_ATHLETE_ID" => Some("42".into()),
            _ => None,
        };
        let res = Config::from_env_with(get);
        assert!(matches!(res, Err(IntervalsError::Config(_))));
    }

    #[test]
    fn from_env_blank_athlete_is_missing() {
        let get = |k: &str| match k {
            "INTERVALS_ICU_API_KEY" => Some("sekrit".into()),
            "INTERVALS_ICU_ATHLETE_ID" => Some("  ".into()),
            _ => None,
        };
        assert!(Config::from_env_with(get).is_err());
    }

    #[test]
    fn from_env_reads_values_and_defaults_base_url() {
        let get = |k: &str| match k {
            "INTERVALS_ICU_API_KEY" => Some("sekrit".into()),
            "INTERVALS_ICU_ATHLETE_ID" => Some("i42".into()),
            _ => None,
        };
        let cfg = Config::from_env_with(get).expect("cfg");
        assert_eq!(cfg.athlete_id, "i42");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }
}
