/// Plain-text extraction from rich-text (HTML-like) labels.
///
/// Board items and connector captions carry their text as small fragments of
/// markup (`<p>Births</p>`, `<span>-</span>`). [`extract_plain_text`] strips
/// the markup and normalizes whitespace so the text can be displayed or
/// compared.
///
/// The scanner is deliberately forgiving: it never fails, stray end tags are
/// ignored, unclosed elements are closed at end of input, and a `<` that does
/// not start a tag is kept as literal text.
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Compiles a pattern that is a string literal in this module.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|_| unreachable!("static pattern {pattern:?} is valid"))
}

/// Matches, in priority order: a comment (possibly unterminated), a start or
/// end tag, a doctype or processing instruction, and an unterminated tag at
/// the very end of the input.
///
/// Group 1 is the `/` of an end tag, group 2 the tag name, group 3 the raw
/// attribute text (used to detect `<br/>`-style self-closing tags).
static MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r#"(?s)<!--.*?(?:-->|\z)|<(/)?([A-Za-z][A-Za-z0-9:-]*)((?:[^>"']|"[^"]*"|'[^']*')*)>|<[!?][^>]*>|<[/!?A-Za-z][^>]*\z"#,
    )
});

/// Matches decimal, hexadecimal and named character references.
static CHAR_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"&(?:#([0-9]{1,7})|#[xX]([0-9A-Fa-f]{1,6})|([A-Za-z][A-Za-z0-9]{1,31}));")
});

/// Matches any run of two or more whitespace characters.
static WHITESPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"\s{2,}"));

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Converts a rich-text fragment into plain text.
///
/// All markup is removed and character references are decoded. When
/// `inject_spacing` is `true`, one space is appended after the text of every
/// element, so `<b>foo</b><b>bar</b>` reads `"foo bar "` rather than
/// `"foobar"`. Nested elements get their space too, so an inline element
/// inside a word splits it: `<p>a<b>b</b>c</p>` reads `"ab c "`. Only
/// whitespace differs from spacing just the top-level elements, which keeps
/// sign captions such as `<p><strong>-</strong></p>` reading `-` after
/// trimming. Finally every run of two or more whitespace characters is
/// collapsed into a single space.
///
/// The result is not trimmed: callers that need exact comparison (such as
/// [`crate::sign::EdgeSign::of_caption`]) trim it themselves.
pub fn extract_plain_text(rich_text: &str, inject_spacing: bool) -> String {
    let mut text = String::with_capacity(rich_text.len());
    let mut open_elements: Vec<String> = Vec::new();
    let mut cursor = 0;

    for caps in MARKUP_RE.captures_iter(rich_text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_decoded(&mut text, &rich_text[cursor..whole.start()]);
        cursor = whole.end();

        // Comments, doctypes and truncated tags carry no text.
        let Some(name) = caps.get(2) else {
            continue;
        };
        let name = name.as_str().to_ascii_lowercase();

        if caps.get(1).is_some() {
            let Some(pos) = open_elements.iter().rposition(|open| *open == name) else {
                continue;
            };
            let closed = open_elements.len() - pos;
            open_elements.truncate(pos);
            if inject_spacing {
                text.extend(std::iter::repeat_n(' ', closed));
            }
        } else if VOID_ELEMENTS.contains(&name.as_str()) || is_self_closing(&caps) {
            if inject_spacing {
                text.push(' ');
            }
        } else {
            open_elements.push(name);
        }
    }
    push_decoded(&mut text, &rich_text[cursor..]);

    if inject_spacing {
        text.extend(std::iter::repeat_n(' ', open_elements.len()));
    }

    WHITESPACE_RUN_RE.replace_all(&text, " ").into_owned()
}

fn is_self_closing(caps: &Captures<'_>) -> bool {
    caps.get(3)
        .is_some_and(|attrs| attrs.as_str().trim_end().ends_with('/'))
}

/// Appends `raw` to `out`, decoding character references on the way.
fn push_decoded(out: &mut String, raw: &str) {
    let mut last = 0;
    for caps in CHAR_REF_RE.captures_iter(raw) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&raw[last..whole.start()]);
        match resolve_reference(&caps) {
            Some(c) => out.push(c),
            None => out.push_str(whole.as_str()),
        }
        last = whole.end();
    }
    out.push_str(&raw[last..]);
}

fn resolve_reference(caps: &Captures<'_>) -> Option<char> {
    if let Some(dec) = caps.get(1) {
        return dec.as_str().parse::<u32>().ok().and_then(char::from_u32);
    }
    if let Some(hex) = caps.get(2) {
        return u32::from_str_radix(hex.as_str(), 16)
            .ok()
            .and_then(char::from_u32);
    }
    match caps.get(3)?.as_str() {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}
