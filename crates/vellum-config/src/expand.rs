//! `${VAR}` expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// - `${VAR}` expands to the value of VAR, errors if unset
/// - `${VAR:-default}` expands to VAR if set, otherwise uses default
///
/// Strings without a `${` sequence are returned unchanged.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var).map(Some).map_err(|_| UnsetVar {
            name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.name),
    })
}

/// Lookup failure for a referenced variable.
struct UnsetVar {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("VELLUM_TEST_BASE", "/handbook/");
        }
        let result = expand_env("${VELLUM_TEST_BASE}", "base").unwrap();
        assert_eq!(result, "/handbook/");
        unsafe {
            std::env::remove_var("VELLUM_TEST_BASE");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("VELLUM_TEST_UNSET_HOST");
        }
        let result = expand_env(
            "https://${VELLUM_TEST_UNSET_HOST:-search.example.com}/q",
            "search.endpoint",
        )
        .unwrap();
        assert_eq!(result, "https://search.example.com/q");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("VELLUM_TEST_MISSING");
        }
        let err = expand_env("${VELLUM_TEST_MISSING}", "search.endpoint").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "search.endpoint"));
        assert!(err.to_string().contains("VELLUM_TEST_MISSING"));
    }

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("/docs/", "base").unwrap(), "/docs/");
        assert_eq!(expand_env("$HOME", "base").unwrap(), "$HOME");
    }
}
