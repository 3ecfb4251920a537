//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use std::convert::Infallible;

use crate::ConfigError;

/// Expand environment variable references using a variable lookup.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Bare `$VAR` syntax is not expanded (only `${VAR}` with braces).
pub(crate) fn expand_env_with(
    value: &str,
    field: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    // Fast path: no expansion needed
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    // Unset variables come back as `None`: shellexpand substitutes the
    // default when one is given and leaves the reference in place otherwise.
    let expanded = match shellexpand::env_with_context(value, |var| {
        Ok::<_, Infallible>(lookup(var))
    }) {
        Ok(expanded) => expanded,
        Err(e) => match e.cause {},
    };

    match unresolved_var(&expanded) {
        Some(var_name) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var_name}}} not set"),
        }),
        None => Ok(expanded.into_owned()),
    }
}

/// Name of the first `${VAR}` reference left in an expanded string.
fn unresolved_var(expanded: &str) -> Option<&str> {
    let start = expanded.find("${")? + 2;
    let len = expanded[start..].find('}')?;
    let name = &expanded[start..start + len];
    Some(name.split_once(":-").map_or(name, |(name, _)| name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(var: &str) -> Option<String> {
        match var {
            "PRISMIC_ENDPOINT" => Some("https://shop.cdn.prismic.io/api/v2".to_owned()),
            "USER_TEST" => Some("admin".to_owned()),
            "PASS_TEST" => Some("secret".to_owned()),
            _ => None,
        }
    }

    #[test]
    fn test_expand_simple_var() {
        let result = expand_env_with("${PRISMIC_ENDPOINT}", "prismic.endpoint", lookup).unwrap();
        assert_eq!(result, "https://shop.cdn.prismic.io/api/v2");
    }

    #[test]
    fn test_expand_with_default_uses_value() {
        let result = expand_env_with("${USER_TEST:-guest}", "test.field", lookup).unwrap();
        assert_eq!(result, "admin");
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        let result = expand_env_with("${UNSET_VAR_TEST:-default}", "test.field", lookup).unwrap();
        assert_eq!(result, "default");
    }

    #[test]
    fn test_expand_missing_var_error() {
        let result = expand_env_with("${PRISMIC_ACCESS_TOKEN}", "prismic.access_token", lookup);

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("PRISMIC_ACCESS_TOKEN"));
        assert!(err.to_string().contains("prismic.access_token"));
    }

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env_with("literal string", "test.field", lookup).unwrap();
        assert_eq!(result, "literal string");
    }

    #[test]
    fn test_expand_multiple_vars() {
        let result = expand_env_with("${USER_TEST}:${PASS_TEST}", "test.creds", lookup).unwrap();
        assert_eq!(result, "admin:secret");
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env_with("https://example.com/$path", "test.url", lookup).unwrap();
        assert_eq!(result, "https://example.com/$path");
    }
}
