use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub remote_url: String,
    pub bind_addr: String,
    pub user_data_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub remote_timeout: Option<Duration>,
    /// Cap on the `/upload` request body; `None` means unlimited.
    pub max_upload_bytes: Option<usize>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let remote_url = lookup("REMOTE_SERVER_URL")
            .with_context(|| "Missing required env var: REMOTE_SERVER_URL")?;
        let remote_url = remote_url.trim_end_matches('/').to_string();

        let bind_addr = lookup("RELAY_BIND_ADDR").unwrap_or_else(|| "127.0.0.1:5000".to_string());
        let user_data_dir = lookup("USER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./static/data/users"));
        let templates_dir = lookup("TEMPLATES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./templates"));

        let remote_timeout = match lookup("REMOTE_TIMEOUT_SECS") {
            Some(v) => {
                let secs: u64 = v
                    .trim()
                    .parse()
                    .with_context(|| format!("REMOTE_TIMEOUT_SECS is not a number: {v}"))?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(v) => Some(
                v.trim()
                    .parse::<usize>()
                    .with_context(|| format!("MAX_UPLOAD_BYTES is not a number: {v}"))?,
            ),
            None => None,
        };

        // Tiny sanity checks (fail fast, fail loud)
        if !remote_url.starts_with("http://") && !remote_url.starts_with("https://") {
            bail!("REMOTE_SERVER_URL must start with http:// or https://");
        }

        Ok(Self {
            remote_url,
            bind_addr,
            user_data_dir,
            templates_dir,
            remote_timeout,
            max_upload_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cfg(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let c = cfg(&[("REMOTE_SERVER_URL", "https://gpu.example.com/")]).unwrap();
        assert_eq!(c.remote_url, "https://gpu.example.com");
        assert_eq!(c.bind_addr, "127.0.0.1:5000");
        assert_eq!(c.user_data_dir, PathBuf::from("./static/data/users"));
        assert_eq!(c.templates_dir, PathBuf::from("./templates"));
        assert!(c.remote_timeout.is_none());
        assert!(c.max_upload_bytes.is_none());
    }

    #[test]
    fn test_remote_url_required() {
        let err = cfg(&[]).unwrap_err();
        assert!(err.to_string().contains("REMOTE_SERVER_URL"));
    }

    #[test]
    fn test_remote_url_scheme_checked() {
        assert!(cfg(&[("REMOTE_SERVER_URL", "gpu.example.com")]).is_err());
    }

    #[test]
    fn test_timeout_parsed() {
        let c = cfg(&[
            ("REMOTE_SERVER_URL", "http://127.0.0.1:9000"),
            ("REMOTE_TIMEOUT_SECS", "30"),
        ])
        .unwrap();
        assert_eq!(c.remote_timeout, Some(Duration::from_secs(30)));

        assert!(cfg(&[
            ("REMOTE_SERVER_URL", "http://127.0.0.1:9000"),
            ("REMOTE_TIMEOUT_SECS", "soon"),
        ])
        .is_err());
    }

    #[test]
    fn test_upload_limit_parsed() {
        let c = cfg(&[
            ("REMOTE_SERVER_URL", "http://127.0.0.1:9000"),
            ("MAX_UPLOAD_BYTES", "104857600"),
        ])
        .unwrap();
        assert_eq!(c.max_upload_bytes, Some(100 * 1024 * 1024));

        assert!(cfg(&[
            ("REMOTE_SERVER_URL", "http://127.0.0.1:9000"),
            ("MAX_UPLOAD_BYTES", "100MB"),
        ])
        .is_err());
    }
}
