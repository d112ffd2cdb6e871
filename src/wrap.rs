//! Width-aware reflow of generated markup.
//!
//! `wrap` splits its input on newlines and processes each line on its own:
//!
//! - Whitespace-only lines and lines already within the width pass through.
//! - A long line holding exactly one opening (or self-closing) tag with
//!   attributes is decomposed: the first attribute stays on the `<name`
//!   line, every further attribute moves to its own line indented two
//!   spaces past the tag, and the closing `>` (or ` />`) lands on the last
//!   of those lines.
//! - A long plain-text line wraps greedily at whitespace boundaries; every
//!   continuation line repeats the original indentation.
//! - Anything else (sibling tags on one line, a tag without attributes) is
//!   left to overflow.
//!
//! The input is assumed to be already-escaped markup; nothing here escapes
//! or re-orders content. Stripping the inserted newlines and indentation
//! from the output yields the input's non-whitespace characters unchanged.

use memchr::memchr;

/// Maximum line width applied when the caller does not choose one.
pub const DEFAULT_MAX_WIDTH: usize = 100;

/// Reformat `markup` so that lines longer than `max_width` columns are
/// broken where possible. Line order and content are preserved.
pub fn wrap(markup: &str, max_width: usize) -> String {
    let mut out = String::with_capacity(markup.len() + markup.len() / 8);
    for (idx, line) in markup.split('\n').enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        reflow_line(line, max_width, &mut out);
    }
    out
}

fn reflow_line(line: &str, max_width: usize, out: &mut String) {
    let content = line.trim();
    if content.is_empty() || width(line) <= max_width {
        out.push_str(line);
        return;
    }

    // Leading whitespace is carried onto every derived line.
    let indent = &line[..line.len() - line.trim_start().len()];

    if content.starts_with('<') {
        if content.contains(' ') {
            if let Some(tag) = parse_single_tag(content) {
                if !tag.attrs.is_empty() {
                    split_tag(&tag, indent, out);
                    return;
                }
            }
        }
        // Long tag-like lines that are not a single tag with attributes
        // overflow as-is.
        out.push_str(line);
        return;
    }

    wrap_text(content, indent, max_width, out);
}

#[inline]
fn width(s: &str) -> usize {
    s.chars().count()
}

#[inline]
fn is_ws(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\n' || b == b'\r'
}

#[inline]
fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/* =============================== Tag lines =============================== */

#[derive(Debug)]
struct Tag<'a> {
    name: &'a str,
    self_closing: bool,
    attrs: Vec<Attr<'a>>,
}

/// One name/value pair from a tag's attribute region. Quoted values keep
/// their surrounding quotes and any backslash escapes verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Attr<'a> {
    name: &'a str,
    value: Option<&'a str>,
}

impl Attr<'_> {
    fn push_onto(&self, out: &mut String) {
        out.push_str(self.name);
        if let Some(value) = self.value {
            out.push('=');
            out.push_str(value);
        }
    }
}

/// View `content` (a trimmed line) as a single `<name attr...>` tag.
/// Returns `None` when the line holds anything else, including a second
/// `>` anywhere before the final one.
fn parse_single_tag(content: &str) -> Option<Tag<'_>> {
    let bytes = content.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'<' || bytes[bytes.len() - 1] != b'>' {
        return None;
    }

    let mut i = 1;
    while i < bytes.len() - 1 && is_name_byte(bytes[i]) {
        i += 1;
    }
    if i == 1 {
        return None;
    }
    let name = &content[1..i];

    let mut inner = &content[i..content.len() - 1];
    if memchr(b'>', inner.as_bytes()).is_some() {
        return None;
    }
    let self_closing = inner.ends_with('/');
    if self_closing {
        inner = &inner[..inner.len() - 1];
    }

    Some(Tag {
        name,
        self_closing,
        attrs: parse_attributes(inner.trim()),
    })
}

fn split_tag(tag: &Tag<'_>, indent: &str, out: &mut String) {
    let attr_indent = " ".repeat(width(indent) + 2);

    // The first attribute always stays on the tag line so a too-narrow
    // width still makes progress.
    out.push_str(indent);
    out.push('<');
    out.push_str(tag.name);
    out.push(' ');
    tag.attrs[0].push_onto(out);

    for attr in &tag.attrs[1..] {
        out.push('\n');
        out.push_str(&attr_indent);
        attr.push_onto(out);
    }

    out.push_str(if tag.self_closing { " />" } else { ">" });
}

/* =========================== Attribute scanner =========================== */

/// Scanner states for a tag's attribute region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scan {
    SkipWhitespace,
    ReadName,
    SkipSeparator,
    ReadQuotedValue,
    ReadUnquotedValue,
}

/// Tokenize an attribute region into name/value pairs.
///
/// A name runs until whitespace or `=`; the separator swallows any mix of
/// whitespace and `=`; a `"`-quoted value keeps a backslash and the byte
/// after it verbatim and, when unterminated, runs to the end of the
/// region; an unquoted value ends at the next whitespace. A name with
/// nothing after it becomes a valueless attribute.
fn parse_attributes(region: &str) -> Vec<Attr<'_>> {
    let bytes = region.as_bytes();
    let n = bytes.len();
    let mut attrs = Vec::new();

    let mut state = Scan::SkipWhitespace;
    let mut i = 0usize;
    let mut name_start = 0usize;
    let mut name: &str = "";
    let mut value_start = 0usize;

    while i < n {
        let b = bytes[i];
        match state {
            Scan::SkipWhitespace => {
                if is_ws(b) {
                    i += 1;
                } else {
                    name_start = i;
                    state = Scan::ReadName;
                }
            }
            Scan::ReadName => {
                if is_ws(b) || b == b'=' {
                    name = &region[name_start..i];
                    state = Scan::SkipSeparator;
                } else {
                    i += 1;
                }
            }
            Scan::SkipSeparator => {
                if is_ws(b) || b == b'=' {
                    i += 1;
                } else if b == b'"' {
                    value_start = i;
                    i += 1;
                    state = Scan::ReadQuotedValue;
                } else {
                    value_start = i;
                    state = Scan::ReadUnquotedValue;
                }
            }
            Scan::ReadQuotedValue => {
                if b == b'\\' {
                    i = (i + 2).min(n);
                } else if b == b'"' {
                    i += 1;
                    attrs.push(Attr {
                        name,
                        value: Some(&region[value_start..i]),
                    });
                    state = Scan::SkipWhitespace;
                } else {
                    i += 1;
                }
            }
            Scan::ReadUnquotedValue => {
                if is_ws(b) {
                    attrs.push(Attr {
                        name,
                        value: Some(&region[value_start..i]),
                    });
                    state = Scan::SkipWhitespace;
                } else {
                    i += 1;
                }
            }
        }
    }

    // Whatever the end of the region cut short still counts.
    match state {
        Scan::SkipWhitespace => {}
        Scan::ReadName => attrs.push(Attr {
            name: &region[name_start..],
            value: None,
        }),
        Scan::SkipSeparator => attrs.push(Attr { name, value: None }),
        Scan::ReadQuotedValue | Scan::ReadUnquotedValue => attrs.push(Attr {
            name,
            value: Some(&region[value_start..]),
        }),
    }

    attrs
}

/* ============================== Text lines =============================== */

/// Greedy wrap at whitespace boundaries. Tokens (maximal runs of
/// non-whitespace or of whitespace) are never split; a token that cannot
/// fit starts a new line behind the original indentation.
fn wrap_text(content: &str, indent: &str, max_width: usize, out: &mut String) {
    let indent_width = width(indent);
    let mut line = String::from(indent);
    let mut line_width = indent_width;
    let mut emitted = false;

    let flush = |line: &str, emitted: &mut bool, out: &mut String| {
        if !line.trim().is_empty() {
            if *emitted {
                out.push('\n');
            }
            out.push_str(line);
            *emitted = true;
        }
    };

    for token in tokens(content) {
        let token_width = width(token);
        if line_width + token_width <= max_width {
            line.push_str(token);
            line_width += token_width;
        } else {
            flush(&line, &mut emitted, out);
            line.clear();
            line.push_str(indent);
            line.push_str(token);
            line_width = indent_width + token_width;
        }
    }
    flush(&line, &mut emitted, out);
}

/// Alternating runs of non-whitespace and whitespace.
fn tokens(content: &str) -> impl Iterator<Item = &str> {
    let mut rest = content;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_whitespace() != first.is_whitespace())
            .map_or(rest.len(), |(i, _)| i);
        let (token, tail) = rest.split_at(end);
        rest = tail;
        Some(token)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_whitespace(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn short_lines_pass_through() {
        let input = "  <p>hello</p>\nplain text here";
        assert_eq!(wrap(input, 100), input);
    }

    #[test]
    fn blank_and_whitespace_lines_pass_through() {
        let input = "<p>x</p>\n\n   \n<p>y</p>";
        assert_eq!(wrap(input, 20), input);
    }

    #[test]
    fn trailing_newline_preserved() {
        assert_eq!(wrap("<p>x</p>\n", 40), "<p>x</p>\n");
    }

    #[test]
    fn splits_attributes_one_per_line() {
        let input = "        <img src=\"a.png\" alt=\"b\" width=\"200\" />";
        let expected =
            "        <img src=\"a.png\"\n          alt=\"b\"\n          width=\"200\" />";
        assert_eq!(wrap(input, 30), expected);
    }

    #[test]
    fn closing_bracket_lands_on_last_attribute_line() {
        let input = "    <link rel=\"stylesheet\" href=\"styles/really/long/sheet.css\">";
        let expected =
            "    <link rel=\"stylesheet\"\n      href=\"styles/really/long/sheet.css\">";
        assert_eq!(wrap(input, 30), expected);
    }

    #[test]
    fn first_attribute_kept_even_when_too_wide() {
        let input = "  <img src=\"longlonglong.png\" alt=\"x\" />";
        let expected = "  <img src=\"longlonglong.png\"\n    alt=\"x\" />";
        assert_eq!(wrap(input, 10), expected);
    }

    #[test]
    fn wraps_text_at_token_boundaries() {
        let input = "      The quick brown fox jumps";
        let out = wrap(input, 20);
        assert_eq!(out, "      The quick \n      brown fox \n      jumps");
        for line in out.lines() {
            assert!(line.chars().count() <= 20);
            assert!(line.starts_with("      "));
        }
    }

    #[test]
    fn never_splits_inside_a_token() {
        let out = wrap("  supercalifragilistic word", 10);
        assert!(out.lines().any(|l| l.contains("supercalifragilistic")));
    }

    #[test]
    fn sibling_tags_overflow_unchanged() {
        let input = "<a href=\"x\"><b href=\"y\">";
        assert_eq!(wrap(input, 10), input);
    }

    #[test]
    fn attributeless_tag_overflows_unchanged() {
        let input = "<averyverylongelementnamewithnoattributes>";
        assert_eq!(wrap(input, 10), input);
        let spaced = "<div                                     >";
        assert_eq!(wrap(spaced, 10), spaced);
    }

    #[test]
    fn wrapping_is_idempotent() {
        let input = "        <img src=\"a.png\" alt=\"b\" width=\"200\" />\n\
                           The quick brown fox jumps over the lazy dog\n\
                     \n\
                     <p>short</p>";
        let once = wrap(input, 30);
        assert_eq!(wrap(&once, 30), once);
    }

    #[test]
    fn preserves_nonwhitespace_characters() {
        let input = "      <h2>Introduction | Crimson Fox</h2>\n\
                             <img src=\"images/me.jpg\" alt=\"A picture\" width=\"200\" />\n\
                             This paragraph is long enough that it will certainly wrap somewhere.\n\
                     <a href=\"x\"><b href=\"y\">";
        let out = wrap(input, 28);
        assert_eq!(strip_whitespace(&out), strip_whitespace(input));
    }

    #[test]
    fn scanner_reads_quoted_values() {
        let attrs = parse_attributes(r#"src="a.png" alt="b""#);
        assert_eq!(
            attrs,
            vec![
                Attr { name: "src", value: Some(r#""a.png""#) },
                Attr { name: "alt", value: Some(r#""b""#) },
            ]
        );
    }

    #[test]
    fn scanner_keeps_escaped_quotes_verbatim() {
        let attrs = parse_attributes(r#"title="a \"b\" c""#);
        assert_eq!(
            attrs,
            vec![Attr { name: "title", value: Some(r#""a \"b\" c""#) }]
        );
    }

    #[test]
    fn scanner_reads_unquoted_values() {
        let attrs = parse_attributes("width=200 height=100");
        assert_eq!(
            attrs,
            vec![
                Attr { name: "width", value: Some("200") },
                Attr { name: "height", value: Some("100") },
            ]
        );
    }

    #[test]
    fn scanner_handles_trailing_valueless_attribute() {
        let attrs = parse_attributes(r#"href="x" download"#);
        assert_eq!(
            attrs,
            vec![
                Attr { name: "href", value: Some(r#""x""#) },
                Attr { name: "download", value: None },
            ]
        );
    }

    #[test]
    fn scanner_handles_empty_quoted_value() {
        let attrs = parse_attributes(r#"alt="""#);
        assert_eq!(attrs, vec![Attr { name: "alt", value: Some(r#""""#) }]);
    }

    #[test]
    fn scanner_skips_spaces_around_equals() {
        let attrs = parse_attributes(r#"src = "a.png""#);
        assert_eq!(attrs, vec![Attr { name: "src", value: Some(r#""a.png""#) }]);
    }

    #[test]
    fn scanner_runs_unterminated_quote_to_end() {
        let attrs = parse_attributes(r#"alt="oops"#);
        assert_eq!(attrs, vec![Attr { name: "alt", value: Some(r#""oops"#) }]);
    }

    #[test]
    fn scanner_handles_dangling_equals() {
        let attrs = parse_attributes("alt=");
        assert_eq!(attrs, vec![Attr { name: "alt", value: None }]);
    }
}
