//! Command handlers.
//!
//! Each handler receives the composed `CliContext` and delegates work
//! through the repository and discovery ports.

pub mod discover;
pub mod server;
pub mod tool;

use anyhow::{Result, bail};
use mcphub_core::domain::{AuthType, ServerStatus};

/// Parse a user-supplied auth type, rejecting unknown values.
///
/// Unknown values stored in the database fall back to `none`, but typos on
/// the command line are rejected outright.
pub(crate) fn parse_auth_type(s: &str) -> Result<AuthType> {
    match s {
        "none" => Ok(AuthType::None),
        "bearer" => Ok(AuthType::Bearer),
        "basic" => Ok(AuthType::Basic),
        "api_key" => Ok(AuthType::ApiKey),
        other => bail!("unknown auth type '{other}' (expected none, bearer, basic, api_key)"),
    }
}

/// Parse a user-supplied server status, rejecting unknown values.
pub(crate) fn parse_status(s: &str) -> Result<ServerStatus> {
    match s {
        "active" => Ok(ServerStatus::Active),
        "inactive" => Ok(ServerStatus::Inactive),
        "error" => Ok(ServerStatus::Error),
        other => bail!("unknown status '{other}' (expected active, inactive, error)"),
    }
}

/// Split a comma-separated tag list, dropping empty entries.
pub(crate) fn parse_tags(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_auth_type_rejects_unknown() {
        assert_eq!(parse_auth_type("bearer").unwrap(), AuthType::Bearer);
        assert!(parse_auth_type("oauth2").is_err());
    }

    #[test]
    fn test_parse_status_rejects_unknown() {
        assert_eq!(parse_status("active").unwrap(), ServerStatus::Active);
        assert!(parse_status("up").is_err());
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("a, b,,c"), vec!["a", "b", "c"]);
        assert!(parse_tags("").is_empty());
    }
}
