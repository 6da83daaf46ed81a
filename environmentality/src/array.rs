//! Escape-aware splitting of array-typed values

/// Element delimiter for array values.
pub const DELIMITER: char = ',';

/// Escape character; the character following it is taken literally.
pub const ESCAPE: char = '\\';

/// Split a raw value into its array segments.
///
/// An unescaped `,` ends the current segment. `\` makes the next character
/// literal and is itself dropped, so `a\,b,c` yields `["a,b", "c"]`.
/// The last segment is always pushed, which means an empty input yields
/// a single empty segment rather than no segments at all.
///
/// A trailing lone `\` has nothing to escape and is dropped.
pub fn parse_array(raw: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        match c {
            ESCAPE => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            DELIMITER => segments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    segments.push(current);

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_is_single_segment() {
        assert_eq!(parse_array("hello world"), vec!["hello world"]);
    }

    #[test]
    fn test_split_on_comma() {
        assert_eq!(
            parse_array("string1,string2,string3"),
            vec!["string1", "string2", "string3"]
        );
    }

    #[test]
    fn test_escaped_delimiter() {
        assert_eq!(parse_array("a\\,b,c"), vec!["a,b", "c"]);
    }

    #[test]
    fn test_escaped_backslash() {
        assert_eq!(parse_array("a\\\\,b"), vec!["a\\", "b"]);
    }

    #[test]
    fn test_escape_any_character() {
        assert_eq!(parse_array("\\x\\y"), vec!["xy"]);
    }

    #[test]
    fn test_empty_input_yields_one_empty_segment() {
        assert_eq!(parse_array(""), vec![""]);
    }

    #[test]
    fn test_empty_segments_are_kept() {
        assert_eq!(parse_array(",a,,"), vec!["", "a", "", ""]);
    }

    #[test]
    fn test_trailing_escape_is_dropped() {
        assert_eq!(parse_array("a,b\\"), vec!["a", "b"]);
    }

    #[test]
    fn test_whitespace_is_preserved() {
        assert_eq!(parse_array(" a , b "), vec![" a ", " b "]);
    }
}
