//! Environment variable expansion for configuration strings.

use std::borrow::Cow;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` is the config path reported when a variable is unset.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env(value)
        .map(Cow::into_owned)
        .map_err(|err| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", err.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_literal_unchanged() {
        assert_eq!(expand_env("content", "content.source_dir").unwrap(), "content");
    }

    #[test]
    fn test_expand_bare_dollar_without_braces_unchanged() {
        assert_eq!(
            expand_env("docs/$HELPDECK_EXPAND_TEST_BARE", "content.source_dir").unwrap(),
            "docs/$HELPDECK_EXPAND_TEST_BARE"
        );
    }

    #[test]
    fn test_expand_default_used_when_unset() {
        let expanded = expand_env(
            "${HELPDECK_EXPAND_TEST_UNSET:-fallback}/docs",
            "content.source_dir",
        )
        .unwrap();
        assert_eq!(expanded, "fallback/docs");
    }

    #[test]
    fn test_expand_missing_var_reports_field() {
        let err = expand_env("${HELPDECK_EXPAND_TEST_MISSING}", "content.output_dir").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("HELPDECK_EXPAND_TEST_MISSING"), "got: {msg}");
        assert!(msg.contains("content.output_dir"), "got: {msg}");
    }
}
