//! Credential handling for MCP server connections.
//!
//! Each auth type has a JSON config blob stored alongside the server row.
//! `build_headers` parses the blob for the declared auth type and produces
//! the default headers for the HTTP session. Parsing happens before any
//! network I/O so a bad config never costs a round trip.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;

use mcphub_core::domain::AuthType;
use mcphub_core::ports::TransportError;

/// Config blob for bearer token auth.
#[derive(Debug, Deserialize)]
struct BearerConfig {
    token: String,
}

/// Config blob for HTTP basic auth.
#[derive(Debug, Deserialize)]
struct BasicConfig {
    username: String,
    password: String,
}

/// Config blob for API key auth: sets the header named `key` to `value`.
#[derive(Debug, Deserialize)]
struct ApiKeyConfig {
    key: String,
    value: String,
}

fn parse_config<'a, T: Deserialize<'a>>(
    auth_config: Option<&'a str>,
) -> Result<T, TransportError> {
    let raw = auth_config
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| TransportError::ConfigParse("auth config is missing".to_string()))?;
    serde_json::from_str(raw).map_err(|e| TransportError::ConfigParse(e.to_string()))
}

fn header_value(value: &str) -> Result<HeaderValue, TransportError> {
    HeaderValue::from_str(value)
        .map_err(|_| TransportError::ConfigParse("credential contains invalid characters".into()))
}

/// Build the default headers for a session with the given credentials.
///
/// # Errors
///
/// Returns `ConfigParse` when the config blob is missing, malformed, or
/// produces a header that is not a valid HTTP header.
pub fn build_headers(
    auth_type: AuthType,
    auth_config: Option<&str>,
) -> Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::new();

    match auth_type {
        AuthType::None => {}
        AuthType::Bearer => {
            let config: BearerConfig = parse_config(auth_config)?;
            headers.insert(
                AUTHORIZATION,
                header_value(&format!("Bearer {}", config.token))?,
            );
        }
        AuthType::Basic => {
            let config: BasicConfig = parse_config(auth_config)?;
            let encoded = STANDARD.encode(format!("{}:{}", config.username, config.password));
            headers.insert(AUTHORIZATION, header_value(&format!("Basic {encoded}"))?);
        }
        AuthType::ApiKey => {
            let config: ApiKeyConfig = parse_config(auth_config)?;
            let name = HeaderName::from_bytes(config.key.as_bytes()).map_err(|_| {
                TransportError::ConfigParse(format!("invalid header name: {}", config.key))
            })?;
            headers.insert(name, header_value(&config.value)?);
        }
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_produces_no_headers() {
        let headers = build_headers(AuthType::None, None).unwrap();
        assert!(headers.is_empty());

        // A leftover config blob is ignored for auth type none
        let headers = build_headers(AuthType::None, Some(r#"{"token":"x"}"#)).unwrap();
        assert!(headers.is_empty());
    }

    #[test]
    fn test_bearer_header() {
        let headers = build_headers(AuthType::Bearer, Some(r#"{"token":"secret"}"#)).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer secret");
    }

    #[test]
    fn test_basic_header_is_base64() {
        let headers = build_headers(
            AuthType::Basic,
            Some(r#"{"username":"admin","password":"pw"}"#),
        )
        .unwrap();
        // base64("admin:pw")
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Basic YWRtaW46cHc=");
    }

    #[test]
    fn test_api_key_sets_named_header() {
        let headers = build_headers(
            AuthType::ApiKey,
            Some(r#"{"key":"X-API-Key","value":"k123"}"#),
        )
        .unwrap();
        assert_eq!(headers.get("X-API-Key").unwrap(), "k123");
    }

    #[test]
    fn test_missing_config_is_config_parse() {
        let err = build_headers(AuthType::Bearer, None).unwrap_err();
        assert!(matches!(err, TransportError::ConfigParse(_)));

        let err = build_headers(AuthType::Bearer, Some("  ")).unwrap_err();
        assert!(matches!(err, TransportError::ConfigParse(_)));
    }

    #[test]
    fn test_malformed_config_is_config_parse() {
        let err = build_headers(AuthType::Basic, Some(r#"{"username":"a"}"#)).unwrap_err();
        assert!(matches!(err, TransportError::ConfigParse(_)));

        let err = build_headers(AuthType::ApiKey, Some("not json")).unwrap_err();
        assert!(matches!(err, TransportError::ConfigParse(_)));
    }

    #[test]
    fn test_invalid_header_name_is_config_parse() {
        let err = build_headers(
            AuthType::ApiKey,
            Some(r#"{"key":"bad header name","value":"k"}"#),
        )
        .unwrap_err();
        assert!(matches!(err, TransportError::ConfigParse(_)));
    }
}
