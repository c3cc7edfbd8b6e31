//! Device-font text sanitization.
//!
//! The rendering font on the boards covers basic Latin plus a handful of
//! symbols; smart punctuation and emoji come out as boxes. Every resolved
//! dynamic text passes through here before it is cached or returned, on both
//! the plain and the generative path.

/// Map "smart" punctuation to ASCII, keep the degree sign, drop every other
/// non-ASCII code point. Total function; never fails.
pub fn sanitize_for_device(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            // Degree sign is in the device font's supplementary range.
            '\u{00B0}' => out.push(c),
            c if c.is_ascii() => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        assert_eq!(sanitize_for_device("Hello, world!"), "Hello, world!");
    }

    #[test]
    fn test_smart_punctuation_mapped() {
        assert_eq!(
            sanitize_for_device("\u{2018}a\u{2019} \u{201C}b\u{201D} c\u{2013}d\u{2014}e\u{2026}"),
            "'a' \"b\" c-d-e..."
        );
    }

    #[test]
    fn test_degree_sign_preserved() {
        assert_eq!(sanitize_for_device("21.5\u{00B0}C"), "21.5\u{00B0}C");
    }

    #[test]
    fn test_remaining_non_ascii_dropped() {
        assert_eq!(sanitize_for_device("hi \u{1F600} there \u{4F60}"), "hi  there ");
    }
}
