// src/config.rs
use chrono::FixedOffset;
use std::{env, path::PathBuf};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    listen_addr: String,
    template_dir: PathBuf,
    media_root: PathBuf,
    media_url: String,
    site_offset: FixedOffset,
    allowed_origins: Vec<String>,
    admin_username: String,
    admin_password_hash: Option<String>,
    max_upload_bytes: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_database_url() -> String {
    "sqlite://blog.db?mode=rwc".into()
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".into()]
}

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// First path segments served by the router; media cannot be mounted under them.
pub const ROUTED_PATH_ROOTS: &[&str] = &["articles", "admin", "health"];

impl AppConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for everything except malformed values.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let non_empty = |key| lookup(key).filter(|value: &String| !value.trim().is_empty());

        let media_url = non_empty("MEDIA_URL").unwrap_or_else(|| "/media".into());
        if !media_url.starts_with('/') {
            return Err(ConfigError::Invalid("MEDIA_URL must start with '/'".into()));
        }
        let media_url = match media_url.trim_end_matches('/') {
            "" => return Err(ConfigError::Invalid("MEDIA_URL must not be '/'".into())),
            trimmed => trimmed.to_string(),
        };
        let media_root_segment = media_url[1..].split('/').next().unwrap_or_default();
        if ROUTED_PATH_ROOTS.contains(&media_root_segment) {
            return Err(ConfigError::Invalid(format!(
                "MEDIA_URL {media_url} overlaps the site's own routes"
            )));
        }

        let site_offset = match non_empty("SITE_UTC_OFFSET") {
            Some(raw) => parse_utc_offset(&raw)?,
            None => FixedOffset::east_opt(0).ok_or(ConfigError::Missing("SITE_UTC_OFFSET"))?,
        };

        let max_upload_bytes = match non_empty("MAX_UPLOAD_BYTES") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                ConfigError::Invalid(format!("MAX_UPLOAD_BYTES is not a byte count: {raw}"))
            })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let allowed_origins = non_empty("ALLOWED_ORIGINS")
            .map(|s| s.split(',').map(|p| p.trim().to_string()).collect())
            .unwrap_or_else(default_allowed_origins);

        Ok(Self {
            database_url: non_empty("DATABASE_URL").unwrap_or_else(default_database_url),
            listen_addr: non_empty("LISTEN_ADDR").unwrap_or_else(default_listen_addr),
            template_dir: non_empty("TEMPLATE_DIR")
                .unwrap_or_else(|| "templates".into())
                .into(),
            media_root: non_empty("MEDIA_ROOT").unwrap_or_else(|| "media".into()).into(),
            media_url,
            site_offset,
            allowed_origins,
            admin_username: non_empty("ADMIN_USERNAME").unwrap_or_else(|| "admin".into()),
            admin_password_hash: non_empty("ADMIN_PASSWORD_HASH"),
            max_upload_bytes,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn template_dir(&self) -> &PathBuf {
        &self.template_dir
    }

    pub fn media_root(&self) -> &PathBuf {
        &self.media_root
    }

    /// URL prefix uploads are served under, without a trailing slash.
    pub fn media_url(&self) -> &str {
        &self.media_url
    }

    /// Offset that defines the calendar day used by dated article URLs.
    pub fn site_offset(&self) -> FixedOffset {
        self.site_offset
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn admin_username(&self) -> &str {
        &self.admin_username
    }

    pub fn admin_password_hash(&self) -> Option<&str> {
        self.admin_password_hash.as_deref()
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}

/// Parse `Z`, `+HH:MM`, `-HH:MM` or `+HHMM`.
fn parse_utc_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    let invalid = || ConfigError::Invalid(format!("SITE_UTC_OFFSET is not a UTC offset: {raw}"));
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match raw.split_at_checked(1) {
        Some(("+", rest)) => (1, rest),
        Some(("-", rest)) => (-1, rest),
        _ => return Err(invalid()),
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
    let minutes: i32 = digits[2..].parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&'static str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.database_url(), "sqlite://blog.db?mode=rwc");
        assert_eq!(cfg.listen_addr(), "127.0.0.1:8080");
        assert_eq!(cfg.template_dir(), &PathBuf::from("templates"));
        assert_eq!(cfg.media_url(), "/media");
        assert_eq!(cfg.site_offset().local_minus_utc(), 0);
        assert_eq!(cfg.admin_username(), "admin");
        assert!(cfg.admin_password_hash().is_none());
        assert_eq!(cfg.max_upload_bytes(), 10 * 1024 * 1024);
    }

    #[test]
    fn offsets_parse() {
        assert_eq!(parse_utc_offset("+02:00").unwrap().local_minus_utc(), 7200);
        assert_eq!(parse_utc_offset("-0530").unwrap().local_minus_utc(), -19800);
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        assert!(parse_utc_offset("02:00").is_err());
        assert!(parse_utc_offset("+2").is_err());
        assert!(parse_utc_offset("+01:75").is_err());
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(matches!(
            config(&[("MAX_UPLOAD_BYTES", "lots")]),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            config(&[("MEDIA_URL", "media")]),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            config(&[("SITE_UTC_OFFSET", "EET")]),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn media_url_cannot_shadow_site_routes() {
        for value in ["/articles", "/articles/", "/articles/media", "/admin", "/health"] {
            assert!(
                matches!(config(&[("MEDIA_URL", value)]), Err(ConfigError::Invalid(_))),
                "{value}"
            );
        }
        assert_eq!(
            config(&[("MEDIA_URL", "/articles-media")]).unwrap().media_url(),
            "/articles-media"
        );
    }

    #[test]
    fn media_url_trailing_slash_is_trimmed() {
        let cfg = config(&[("MEDIA_URL", "/uploads/"), ("ADMIN_PASSWORD_HASH", "$argon2id$x")]).unwrap();
        assert_eq!(cfg.media_url(), "/uploads");
        assert_eq!(cfg.admin_password_hash(), Some("$argon2id$x"));
    }
}
