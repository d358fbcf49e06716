//! Capitalisation helpers.

use crate::{Result, RutilsError};

/// Uppercase the first character of `text`, leaving the rest untouched.
///
/// Uses the full Unicode uppercase mapping, so a first character may expand
/// into several (`ß` becomes `SS`).
///
/// ```rust
/// use rutilslib::first_char_to_upper;
///
/// assert_eq!(first_char_to_upper("hello world").unwrap(), "Hello world");
/// assert!(first_char_to_upper("").is_err());
/// ```
pub fn first_char_to_upper(text: &str) -> Result<String> {
    let mut chars = text.chars();
    let first = chars.next().ok_or(RutilsError::EmptyString)?;

    let mut capitalised = String::with_capacity(text.len());
    capitalised.extend(first.to_uppercase());
    capitalised.push_str(chars.as_str());
    Ok(capitalised)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalises_first_char_only() {
        assert_eq!(first_char_to_upper("bob").unwrap(), "Bob");
        assert_eq!(first_char_to_upper("bOB").unwrap(), "BOB");
        assert_eq!(first_char_to_upper("x").unwrap(), "X");
    }

    #[test]
    fn test_already_upper_or_not_a_letter() {
        assert_eq!(first_char_to_upper("Alice").unwrap(), "Alice");
        assert_eq!(first_char_to_upper("1st place").unwrap(), "1st place");
    }

    #[test]
    fn test_unicode() {
        assert_eq!(first_char_to_upper("élan").unwrap(), "Élan");
        assert_eq!(first_char_to_upper("ßtraße").unwrap(), "SStraße");
    }

    #[test]
    fn test_empty_is_error() {
        assert_eq!(first_char_to_upper(""), Err(RutilsError::EmptyString));
    }
}
