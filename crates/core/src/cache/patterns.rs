//! Glob matching for cache keys.
//!
//! Only `*` is special; it matches any sequence of characters, including
//! the empty one.

/// Checks if a cache key matches a glob pattern.
///
/// # Examples
///
/// ```
/// use peanuts_core::cache::pattern_matches;
///
/// assert!(pattern_matches("peanuts::1", "peanuts::1"));
/// assert!(pattern_matches("peanuts::*", "peanuts::42"));
/// assert!(pattern_matches("*::42", "peanuts::42"));
/// assert!(!pattern_matches("peanuts::*", "woodstock::1"));
/// ```
pub fn pattern_matches(pattern: &str, key: &str) -> bool {
    let mut segments = pattern.split('*');

    // Text before the first wildcard is anchored to the start of the key.
    let Some(head) = segments.next() else {
        return key.is_empty();
    };
    let Some(mut rest) = key.strip_prefix(head) else {
        return false;
    };

    let tail: Vec<&str> = segments.collect();
    let Some((last, middle)) = tail.split_last() else {
        // No wildcard at all.
        return rest.is_empty();
    };

    for segment in middle {
        match rest.find(segment) {
            Some(pos) => rest = &rest[pos + segment.len()..],
            None => return false,
        }
    }

    // Text after the last wildcard is anchored to the end of the key.
    rest.ends_with(last)
}
