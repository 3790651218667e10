// Shared helpers

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters that would let a value leave its path segment or be read as a
/// query, fragment or escape.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Joins URL segments with exactly one `/` at every boundary.
pub fn join_url(base: &str, segments: &[&str]) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    for segment in segments {
        let trimmed = segment.trim_matches('/');
        if trimmed.is_empty() {
            continue;
        }
        url.push('/');
        url.push_str(trimmed);
    }
    url
}

/// Percent-encodes a value so it occupies exactly one URL path segment.
pub fn encode_path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// `.` and `..` are resolved away by URL parsers, escaped or not.
pub fn is_dot_segment(value: &str) -> bool {
    matches!(value, "." | "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_collapses_boundary_slashes() {
        assert_eq!(
            join_url("http://uframe:12587/", &["/events/", "postto", "A00416"]),
            "http://uframe:12587/events/postto/A00416"
        );
        assert_eq!(join_url("http://uframe:12587", &["events", "14499"]), "http://uframe:12587/events/14499");
    }

    #[test]
    fn join_url_skips_empty_segments() {
        assert_eq!(join_url("http://host", &["", "assets"]), "http://host/assets");
    }

    #[test]
    fn path_segment_encoding_keeps_separators_inside_the_segment() {
        assert_eq!(encode_path_segment("A00416"), "A00416");
        assert_eq!(encode_path_segment("CE01ISSM-MFD35.1"), "CE01ISSM-MFD35.1");
        assert_eq!(encode_path_segment("A1/../../admin"), "A1%2F..%2F..%2Fadmin");
        assert_eq!(encode_path_segment("A1?x=1"), "A1%3Fx=1");
        assert_eq!(encode_path_segment("A1#frag"), "A1%23frag");
        assert_eq!(encode_path_segment("50%"), "50%25");
        assert_eq!(encode_path_segment("a b\\c"), "a%20b%5Cc");
    }

    #[test]
    fn dot_segments_are_recognised() {
        assert!(is_dot_segment("."));
        assert!(is_dot_segment(".."));
        assert!(!is_dot_segment("..."));
        assert!(!is_dot_segment("A1.."));
    }
}
