use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use std::borrow::Cow;

// Static initialization: automata are built only once, thread-safe
static TEXT_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">"])
        .expect("Failed to build XML text escaper")
});

static ATTR_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "\r", "\n", "\t"])
        .expect("Failed to build XML attribute escaper")
});

/// Escape character data for use between tags.
///
/// Quotes are left alone; only `&`, `<` and `>` are replaced.
///
/// # Examples
///
/// ```
/// use restyle::common::xml::escape_text;
/// assert_eq!(escape_text("a & b"), "a &amp; b");
/// assert_eq!(escape_text("\"quoted\""), "\"quoted\"");
/// ```
#[inline]
pub fn escape_text(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>']) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(TEXT_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;"]))
}

/// Escape a value for use inside a double-quoted attribute.
///
/// Whitespace control characters are written as character references so
/// they survive attribute-value normalization on the next read.
///
/// # Examples
///
/// ```
/// use restyle::common::xml::escape_attr;
/// assert_eq!(escape_attr("Heading \"1\""), "Heading &quot;1&quot;");
/// assert_eq!(escape_attr("plain"), "plain");
/// ```
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\r', '\n', '\t']) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(ATTR_ESCAPER.replace_all(
        s,
        &["&amp;", "&lt;", "&gt;", "&quot;", "&#13;", "&#10;", "&#9;"],
    ))
}
