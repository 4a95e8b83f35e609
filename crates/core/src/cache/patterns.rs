//! Glob matching for cache keys.
//!
//! Patterns support `*` as a wildcard matching any sequence of characters,
//! including the empty one.

/// Checks if a cache key matches a glob pattern.
///
/// # Examples
///
/// ```
/// use trackhub_core::cache::pattern_matches;
///
/// assert!(pattern_matches("list:fill_up:*", "list:fill_up:all"));
/// assert!(pattern_matches("list:*:all", "list:trip:all"));
/// assert!(!pattern_matches("list:trip:*", "record:trip:123"));
/// ```
pub fn pattern_matches(pattern: &str, key: &str) -> bool {
    let mut segments = pattern.split('*');

    // `split` always yields at least one segment.
    let first = segments.next().unwrap_or_default();
    let Some(mut rest) = key.strip_prefix(first) else {
        return false;
    };

    let tail: Vec<&str> = segments.collect();
    let Some((last, middle)) = tail.split_last() else {
        // No wildcard: the prefix must have consumed the whole key.
        return rest.is_empty();
    };

    for segment in middle.iter().filter(|s| !s.is_empty()) {
        match rest.find(segment) {
            Some(pos) => rest = &rest[pos + segment.len()..],
            None => return false,
        }
    }

    rest.ends_with(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(pattern_matches("list:vehicle:all", "list:vehicle:all"));
        assert!(!pattern_matches("list:vehicle:all", "list:vehicle:none"));
        assert!(!pattern_matches("list:vehicle", "list:vehicle:all"));
    }

    #[test]
    fn test_trailing_wildcard() {
        let parent = "11111111-1111-1111-1111-111111111111";
        assert!(pattern_matches(
            "list:fill_up:*",
            &format!("list:fill_up:{}", parent)
        ));
        assert!(pattern_matches("list:fill_up:*", "list:fill_up:"));
        assert!(!pattern_matches("list:fill_up:*", "list:trip:all"));
    }

    #[test]
    fn test_leading_and_middle_wildcards() {
        assert!(pattern_matches("*:invoice:*", "record:invoice:42"));
        assert!(pattern_matches("list:*:all", "list:project:all"));
        assert!(!pattern_matches("list:*:all", "list:project:42"));
        assert!(pattern_matches("a**b", "a-middle-b"));
    }

    #[test]
    fn test_segments_must_not_overlap() {
        assert!(!pattern_matches("ab*ba", "aba"));
        assert!(pattern_matches("ab*ba", "abba"));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(pattern_matches("", ""));
        assert!(!pattern_matches("", "record:trip:1"));
        assert!(pattern_matches("*", ""));
        assert!(!pattern_matches("list:*", ""));
    }
}
