use thiserror::Error;

pub const CLIENT_ID_VAR: &str = "CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "CLIENT_SECRET";
pub const USER_AGENT: &str = "ptordenado/0.1.0";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),
}

/// Reddit application credentials.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve both values through `lookup`; blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        Ok(Self {
            client_id: get(CLIENT_ID_VAR)?,
            client_secret: get(CLIENT_SECRET_VAR)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn reads_both_values() {
        let creds =
            Credentials::from_lookup(lookup(&[("CLIENT_ID", "id"), ("CLIENT_SECRET", " s3 ")]))
                .unwrap();
        assert_eq!(creds.client_id, "id");
        assert_eq!(creds.client_secret, "s3");
    }

    #[test]
    fn missing_id_is_reported_first() {
        let err = Credentials::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("CLIENT_ID"));
        assert_eq!(err.to_string(), "CLIENT_ID environment variable must be set");
    }

    #[test]
    fn blank_secret_is_missing() {
        let err = Credentials::from_lookup(lookup(&[("CLIENT_ID", "id"), ("CLIENT_SECRET", "  ")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("CLIENT_SECRET"));
    }

    #[test]
    fn debug_hides_secret() {
        let creds = Credentials {
            client_id: "id".into(),
            client_secret: "hunter2".into(),
        };
        assert!(!format!("{:?}", creds).contains("hunter2"));
    }
}
