use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;

use axum::http::HeaderValue;
use sqlx::postgres::PgConnectOptions;
use vidlib_core::error::CoreError;
use vidlib_core::media::{parse_extension_list, DEFAULT_VIDEO_EXTENSIONS};
use vidlib_core::search::HeadlineOptions;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be set")]
    Missing { var: &'static str },

    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },

    #[error("Invalid search snippet settings: {0}")]
    Search(#[from] CoreError),

    #[error("Invalid database URL: {0}")]
    DatabaseUrl(#[from] sqlx::Error),
}

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Directories and file filter used by the scanner.
#[derive(Debug, Clone)]
pub struct LibraryConfig {
    /// Directory holding the media files (`VIDEOS_DIR`).
    pub videos_dir: PathBuf,
    /// Directory holding `{stem}.md` transcripts (`TRANSCRIPTIONS_DIR`).
    pub transcriptions_dir: PathBuf,
    /// Normalized, lowercase extensions without a leading dot.
    pub video_extensions: Vec<String>,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub log_format: LogFormat,
    pub library: LibraryConfig,
    /// `ts_headline` options for search snippets.
    pub search: HeadlineOptions,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default          |
    /// |-----------------------------|------------------|
    /// | `HOST`                      | `0.0.0.0`        |
    /// | `PORT`                      | `8000`           |
    /// | `CORS_ORIGINS`              | `*`              |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`             |
    /// | `LOG_FORMAT`                | `pretty`         |
    /// | `VIDEOS_DIR`                | `videos`         |
    /// | `TRANSCRIPTIONS_DIR`        | `transcriptions` |
    /// | `VIDEO_EXTENSIONS`          | `mp4,mkv`        |
    /// | `SEARCH_HIGHLIGHT_START`    | `<b>`            |
    /// | `SEARCH_HIGHLIGHT_STOP`     | `</b>`           |
    /// | `SEARCH_MAX_FRAGMENTS`      | `1`              |
    /// | `SEARCH_FRAGMENT_DELIMITER` | `...`            |
    /// | `SEARCH_SNIPPET_MAX_WORDS`  | `30`             |
    /// | `SEARCH_SNIPPET_MIN_WORDS`  | `15`             |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_var)
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse_or(&lookup, "HOST", Some(IpAddr::from([0, 0, 0, 0])))?;
        let port = parse_or(&lookup, "PORT", Some(8000))?;
        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", Some(30))?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in cors_origins.iter().filter(|o| o.as_str() != "*") {
            if HeaderValue::from_str(origin).is_err() {
                return Err(ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    value: origin.clone(),
                });
            }
        }

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    value: other.to_string(),
                })
            }
        };

        let video_extensions = match lookup("VIDEO_EXTENSIONS") {
            Some(raw) => {
                let parsed = parse_extension_list(&raw);
                if parsed.is_empty() {
                    return Err(ConfigError::Invalid {
                        var: "VIDEO_EXTENSIONS",
                        value: raw,
                    });
                }
                parsed
            }
            None => DEFAULT_VIDEO_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        };

        let library = LibraryConfig {
            videos_dir: lookup("VIDEOS_DIR")
                .unwrap_or_else(|| "videos".into())
                .into(),
            transcriptions_dir: lookup("TRANSCRIPTIONS_DIR")
                .unwrap_or_else(|| "transcriptions".into())
                .into(),
            video_extensions,
        };

        let defaults = HeadlineOptions::default();
        let search = HeadlineOptions {
            start_sel: lookup("SEARCH_HIGHLIGHT_START").unwrap_or(defaults.start_sel),
            stop_sel: lookup("SEARCH_HIGHLIGHT_STOP").unwrap_or(defaults.stop_sel),
            max_fragments: parse_or(&lookup, "SEARCH_MAX_FRAGMENTS", Some(defaults.max_fragments))?,
            fragment_delimiter: lookup("SEARCH_FRAGMENT_DELIMITER")
                .unwrap_or(defaults.fragment_delimiter),
            max_words: parse_or(&lookup, "SEARCH_SNIPPET_MAX_WORDS", Some(defaults.max_words))?,
            min_words: parse_or(&lookup, "SEARCH_SNIPPET_MIN_WORDS", Some(defaults.min_words))?,
        };
        search.validate()?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            log_format,
            library,
            search,
        })
    }

    /// Returns `true` when `CORS_ORIGINS` allows any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

/// Database connection settings.
///
/// `DATABASE_URL` wins when set; otherwise the connection is assembled from
/// the individual `DB_*` variables, so passwords need no URL escaping.
#[derive(Debug, Clone)]
pub enum DatabaseConfig {
    Url(String),
    Parts {
        user: String,
        password: Option<String>,
        host: String,
        port: u16,
        database: String,
    },
}

impl DatabaseConfig {
    /// | Env Var        | Default     |
    /// |----------------|-------------|
    /// | `DATABASE_URL` | --          |
    /// | `DB_USER`      | --          |
    /// | `DB_PASS`      | (none)      |
    /// | `DB_HOST`      | `localhost` |
    /// | `DB_PORT`      | `5432`      |
    /// | `DB_NAME`      | --          |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_var)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
            return Ok(Self::Url(url));
        }

        let user = lookup("DB_USER").ok_or(ConfigError::Missing {
            var: "DATABASE_URL or DB_USER",
        })?;
        let database = lookup("DB_NAME").ok_or(ConfigError::Missing { var: "DB_NAME" })?;

        Ok(Self::Parts {
            user,
            password: lookup("DB_PASS"),
            host: lookup("DB_HOST").unwrap_or_else(|| "localhost".into()),
            port: parse_or(&lookup, "DB_PORT", Some(5432))?,
            database,
        })
    }

    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        match self {
            Self::Url(url) => Ok(PgConnectOptions::from_str(url)?),
            Self::Parts {
                user,
                password,
                host,
                port,
                database,
            } => {
                let mut options = PgConnectOptions::new()
                    .host(host)
                    .port(*port)
                    .username(user)
                    .database(database);
                if let Some(password) = password {
                    options = options.password(password);
                }
                Ok(options)
            }
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Read and parse `var`, falling back to `default` when it is unset.
/// `None` as default makes the variable required.
fn parse_or<T, F>(lookup: &F, var: &'static str, default: Option<T>) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        None => default.ok_or(ConfigError::Missing { var }),
    }
}
