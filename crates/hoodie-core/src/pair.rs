//! Key helpers for conditional tags.
//!
//! A key may carry a conditional tag as everything from its last `$` onward,
//! e.g. `color$windows`. The tag is kept verbatim (including the `$`) so that
//! downstream tooling can condition the pair on a platform or configuration.

/// Marker that starts a conditional tag inside a key.
pub const CONDITIONAL_MARKER: char = '$';

/// Split `key` at its last `$` into the bare key and the conditional tag.
///
/// # Examples
///
/// ```
/// use hoodie_core::pair::split_key;
///
/// assert_eq!(split_key("color$windows"), ("color", Some("$windows")));
/// assert_eq!(split_key("color"), ("color", None));
/// ```
pub fn split_key(key: &str) -> (&str, Option<&str>) {
    match key.rfind(CONDITIONAL_MARKER) {
        Some(at) => (&key[..at], Some(&key[at..])),
        None => (key, None),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_split_uses_last_marker() {
        assert_eq!(split_key("a$b$c"), ("a$b", Some("$c")));
    }

    #[test]
    fn test_split_bare_marker() {
        assert_eq!(split_key("$"), ("", Some("$")));
        assert_eq!(split_key("key$"), ("key", Some("$")));
    }

    proptest! {
        #[test]
        fn prop_split_reassembles(key in "[a-z$_]{0,12}") {
            let (base, tag) = split_key(&key);
            let joined = format!("{}{}", base, tag.unwrap_or_default());
            prop_assert_eq!(joined, key.clone());
            prop_assert!(!tag.unwrap_or("$x").trim_start_matches('$').contains('$'));
        }
    }
}
