//! String checks and formatting helpers.

use crate::errors::TacoError;

/// Characters Cordova cannot carry in an application name.
const INVALID_APP_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*', '&'];

/// Distinct characters in `name` that are not allowed in an app name, in
/// order of first appearance.
pub fn invalid_app_name_chars(name: &str) -> Vec<char> {
    let mut found = Vec::new();
    for c in name.chars() {
        if (INVALID_APP_NAME_CHARS.contains(&c) || c.is_control()) && !found.contains(&c) {
            found.push(c);
        }
    }
    found
}

/// Validate a Cordova application name.
pub fn validate_app_name(name: &str) -> Result<(), TacoError> {
    let invalid = invalid_app_name_chars(name);
    if name.trim().is_empty() || !invalid.is_empty() {
        return Err(TacoError::InvalidAppName {
            name: name.to_string(),
            invalid,
        });
    }
    Ok(())
}

/// Wrap `arg` in double quotes if it contains whitespace and is not already
/// quoted.
pub fn quote_if_needed(arg: &str) -> String {
    let already_quoted = arg.len() >= 2 && arg.starts_with('"') && arg.ends_with('"');
    if arg.chars().any(char::is_whitespace) && !already_quoted {
        format!("\"{arg}\"")
    } else {
        arg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_leaves_plain_words_alone() {
        assert_eq!(quote_if_needed("cordova"), "cordova");
    }

    #[test]
    fn quote_wraps_spaces() {
        assert_eq!(quote_if_needed("My App"), "\"My App\"");
    }

    #[test]
    fn quote_does_not_double_quote() {
        assert_eq!(quote_if_needed("\"My App\""), "\"My App\"");
    }

    #[test]
    fn invalid_chars_are_deduplicated() {
        assert_eq!(invalid_app_name_chars("a<b<c>"), vec!['<', '>']);
    }
}
