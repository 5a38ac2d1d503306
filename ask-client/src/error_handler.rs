//! Unified error handling for `ask-client`.
//!
//! [`AskClientError`] covers setup (config validation, HTTP client build).
//! [`TransportError`] is what a single `/ask` exchange fails with; it is the
//! error type of [`crate::AskBackend`] and carries the user-facing message
//! through [`TransportError::message`].
//!
//! Setup messages include the suffix `[Ask Client]` to simplify attribution in logs.

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Result alias for client setup.
pub type Result<T> = std::result::Result<T, AskClientError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level setup error for the `ask-client` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AskClientError {
    /// Configuration/validation errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The underlying `reqwest::Client` could not be built.
    #[error("[Ask Client] failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Errors raised while validating or loading configuration.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value had the wrong format (e.g., invalid URL).
    #[error("[Ask Client] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Field or variable name (e.g., `endpoint`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// A variable was set to a value outside the accepted set.
    #[error("[Ask Client] unsupported value for {var}: {value}")]
    UnsupportedValue {
        /// Variable name.
        var: &'static str,
        /// The offending value.
        value: String,
    },
}

/* ------------------------------------------------------------------------- */
/* Transport errors                                                          */
/* ------------------------------------------------------------------------- */

/// Failure of one `/ask` exchange.
///
/// Every variant except [`TransportError::Unlabelled`] exposes a message via
/// [`TransportError::message`]. Callers that need a string regardless fall
/// back to `Display`.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced a response (DNS, refused connection, reset).
    #[error("[Ask Client] transport error for {url}: {source}")]
    Connect {
        /// Request URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// Upstream returned a non-successful HTTP status.
    #[error("[Ask Client] HTTP {status} from {url}: {snippet}")]
    HttpStatus {
        /// HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body (trimmed).
        snippet: String,
    },

    /// Response payload could not be decoded as JSON.
    #[error("[Ask Client] decode error for {url}: {reason}")]
    Decode {
        /// Request URL.
        url: String,
        /// Decoder message.
        reason: String,
    },

    /// Failure that carries an explicit human-readable message.
    #[error("{0}")]
    Message(String),

    /// Failure without a message; only its string form is known.
    #[error("{0}")]
    Unlabelled(String),
}

impl TransportError {
    /// The message surfaced to the user, if this failure carries one.
    ///
    /// HTTP failures use the wording browsers' HTTP clients produce for the
    /// same situations (`Http failure response for <url>: <code> <reason>`),
    /// so the panel reads the same regardless of front-end.
    pub fn message(&self) -> Option<String> {
        match self {
            TransportError::Connect { url, .. } => {
                Some(format!("Http failure response for {url}: 0 Unknown Error"))
            }
            TransportError::HttpStatus { status, url, .. } => Some(format!(
                "Http failure response for {url}: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Error")
            )),
            TransportError::Decode { url, .. } => {
                Some(format!("Http failure during parsing for {url}"))
            }
            TransportError::Message(msg) if !msg.is_empty() => Some(msg.clone()),
            TransportError::Message(_) | TransportError::Unlabelled(_) => None,
        }
    }
}

/// Keeps the first `max` chars of a response body for error reporting.
pub fn make_snippet(body: &str, max: usize) -> String {
    body.trim().chars().take(max).collect()
}

/* ------------------------------------------------------------------------- */
/* Validation helpers                                                        */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the string does not start with
/// a valid HTTP scheme.
pub fn validate_http_endpoint(
    var: &'static str,
    value: &str,
) -> std::result::Result<(), ConfigError> {
    let value = value.trim();
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        })
    }
}

/// Reads an optional, non-empty environment variable.
pub fn env_opt(name: &'static str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses an optional boolean (`true`/`false`/`1`/`0`) from env.
///
/// # Errors
/// Returns [`ConfigError::UnsupportedValue`] for anything else.
pub fn env_opt_bool(name: &'static str) -> std::result::Result<Option<bool>, ConfigError> {
    match env_opt(name) {
        None => Ok(None),
        Some(v) => match v.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" => Ok(Some(false)),
            _ => Err(ConfigError::UnsupportedValue {
                var: name,
                value: v,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_matches_browser_wording() {
        let err = TransportError::HttpStatus {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            url: "http://127.0.0.1:8000/ask".into(),
            snippet: "boom".into(),
        };
        assert_eq!(
            err.message().as_deref(),
            Some("Http failure response for http://127.0.0.1:8000/ask: 500 Internal Server Error")
        );
    }

    #[test]
    fn decode_message_names_url() {
        let err = TransportError::Decode {
            url: "http://h/ask".into(),
            reason: "expected value".into(),
        };
        assert_eq!(
            err.message().as_deref(),
            Some("Http failure during parsing for http://h/ask")
        );
    }

    #[test]
    fn unlabelled_and_empty_messages_fall_back() {
        assert_eq!(TransportError::Unlabelled("[object Object]".into()).message(), None);
        assert_eq!(TransportError::Message(String::new()).message(), None);
        assert_eq!(
            TransportError::Message("timeout".into()).message().as_deref(),
            Some("timeout")
        );
    }

    #[test]
    fn endpoint_scheme_is_checked() {
        assert!(validate_http_endpoint("endpoint", "http://127.0.0.1:8000").is_ok());
        assert!(validate_http_endpoint("endpoint", " https://x ").is_ok());
        assert!(matches!(
            validate_http_endpoint("endpoint", "127.0.0.1:8000"),
            Err(ConfigError::InvalidFormat { var: "endpoint", .. })
        ));
    }

    #[test]
    fn snippet_is_trimmed_and_bounded() {
        assert_eq!(make_snippet("  abcdef  ", 3), "abc");
        assert_eq!(make_snippet("", 10), "");
    }
}
