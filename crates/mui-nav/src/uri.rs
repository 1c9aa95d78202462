//! URI references and the `uri|parameter|target` link-target grammar.
//!
//! A [`Uri`] is deliberately thin: it keeps the text exactly as written and
//! only knows enough structure (scheme, fragment) to drive navigation.
//! Equality is exact text equality, which is what command lookup keys on.

use std::fmt;
use std::str::FromStr;

use crate::error::UriError;

// ── Uri ───────────────────────────────────────────────────────────────────

/// An absolute (`scheme:rest`) or relative URI reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri {
    text: String,
    /// Byte length of the scheme, when the text starts with one.
    scheme_len: Option<usize>,
}

impl Uri {
    /// Parses `value` as an absolute or relative URI reference.
    ///
    /// Rejects empty input and input containing whitespace or control
    /// characters. Anything else is accepted; a leading `scheme:` makes the
    /// reference absolute.
    pub fn parse(value: &str) -> Result<Self, UriError> {
        if value.is_empty() {
            return Err(UriError::Empty);
        }
        if let Some(ch) = value.chars().find(|c| c.is_whitespace() || c.is_control()) {
            return Err(UriError::InvalidCharacter { value: value.to_string(), ch });
        }
        Ok(Self::from_text(value.to_string()))
    }

    /// Builds a reference from text that is already known to be valid.
    fn from_text(text: String) -> Self {
        let scheme_len = scheme_len(&text);
        Self { text, scheme_len }
    }

    /// `cmd:/{name}` for one of the built-in command names.
    pub(crate) fn command(name: &'static str) -> Self {
        debug_assert!(name.chars().all(|c| c.is_ascii_lowercase()));
        Self::from_text(format!("cmd:/{name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_absolute(&self) -> bool {
        self.scheme_len.is_some()
    }

    /// The scheme without its trailing `:`, for absolute references.
    pub fn scheme(&self) -> Option<&str> {
        self.scheme_len.map(|n| &self.text[..n])
    }

    /// Case-insensitive scheme comparison; always `false` for relative references.
    pub fn has_scheme(&self, scheme: &str) -> bool {
        self.scheme().is_some_and(|s| s.eq_ignore_ascii_case(scheme))
    }

    /// Everything after the first `#`, if any.
    pub fn fragment(&self) -> Option<&str> {
        self.text.split_once('#').map(|(_, f)| f)
    }
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"`
fn scheme_len(text: &str) -> Option<usize> {
    let colon = text.find(':')?;
    let scheme = &text[..colon];
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        Some(colon)
    } else {
        None
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Uri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

// ── Fragments ─────────────────────────────────────────────────────────────

/// Splits `uri` at its first `#`.
///
/// Returns the reference without the fragment and the fragment text.
/// A reference with no `#` comes back unchanged with `None`.
pub fn remove_fragment(uri: &Uri) -> (Uri, Option<String>) {
    match uri.text.split_once('#') {
        Some((base, fragment)) => (Uri::from_text(base.to_string()), Some(fragment.to_string())),
        None => (uri.clone(), None),
    }
}

/// Inverse of [`remove_fragment`].
pub fn append_fragment(uri: &Uri, fragment: Option<&str>) -> Uri {
    match fragment {
        Some(fragment) => Uri::from_text(format!("{}#{}", uri.text, fragment)),
        None => uri.clone(),
    }
}

// ── Link targets ──────────────────────────────────────────────────────────

/// A link target split into its URI, command parameter, and target name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriWithParameters {
    pub uri: Uri,
    pub parameter: Option<String>,
    pub target_name: Option<String>,
}

/// Parses `URI ['|' PARAMETER] ['|' TARGETNAME]`.
///
/// The value splits on at most two pipes, so a target name keeps any further
/// `|` characters. There is no escape for `|` in the URI itself; parameter and
/// target name are percent-decoded, so `%7C` is the way to pass a pipe.
pub fn parse_with_parameters(value: &str) -> Result<UriWithParameters, UriError> {
    let (uri, rest) = match value.split_once('|') {
        Some((uri, rest)) => (uri, Some(rest)),
        None => (value, None),
    };
    let (parameter, target_name) = match rest {
        Some(rest) => match rest.split_once('|') {
            Some((parameter, target)) => (Some(percent_decode(parameter)), Some(percent_decode(target))),
            None => (Some(percent_decode(rest)), None),
        },
        None => (None, None),
    };
    Ok(UriWithParameters { uri: Uri::parse(uri)?, parameter, target_name })
}

/// Decodes `%XX` escapes; malformed escapes and invalid UTF-8 are kept verbatim.
fn percent_decode(segment: &str) -> String {
    if !segment.contains('%') {
        return segment.to_string();
    }
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out).unwrap_or_else(|_| segment.to_string())
}

fn hex_value(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(s: &str) -> Uri {
        Uri::parse(s).unwrap()
    }

    // ── Uri ───────────────────────────────────────────────────────────────

    #[test]
    fn command_uri_matches_parsed_form() {
        let u = Uri::command("browseback");
        assert_eq!(u, uri("cmd:/browseback"));
        assert!(u.has_scheme("cmd"));
    }

    #[test]
    fn absolute_uri_has_scheme() {
        let u = uri("http://example.com/a");
        assert!(u.is_absolute());
        assert_eq!(u.scheme(), Some("http"));
        assert!(u.has_scheme("HTTP"));
    }

    #[test]
    fn command_uri_is_absolute() {
        let u = uri("cmd:/copy");
        assert_eq!(u.scheme(), Some("cmd"));
    }

    #[test]
    fn relative_uri_has_no_scheme() {
        let u = uri("/Pages/Home.xaml");
        assert!(!u.is_absolute());
        assert_eq!(u.scheme(), None);
        assert!(!u.has_scheme("http"));
    }

    #[test]
    fn colon_after_non_scheme_chars_is_relative() {
        assert!(!uri("1abc:foo").is_absolute());
        assert!(!uri("/a:b").is_absolute());
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert_eq!(Uri::parse(""), Err(UriError::Empty));
        assert!(matches!(
            Uri::parse("http://a b"),
            Err(UriError::InvalidCharacter { ch: ' ', .. })
        ));
    }

    #[test]
    fn equality_is_exact_text() {
        assert_eq!(uri("cmd:/copy"), uri("cmd:/copy"));
        assert_ne!(uri("cmd:/copy"), uri("cmd:/Copy"));
    }

    // ── Fragments ─────────────────────────────────────────────────────────

    #[test]
    fn remove_fragment_without_fragment_is_identity() {
        let u = uri("/Pages/LayoutWireframe.xaml");
        let (base, fragment) = remove_fragment(&u);
        assert_eq!(fragment, None);
        assert_eq!(base, u);
    }

    #[test]
    fn remove_fragment_splits_at_hash() {
        let u = uri("/Content/LoremIpsum.xaml#1");
        let (base, fragment) = remove_fragment(&u);
        assert_eq!(fragment.as_deref(), Some("1"));
        assert_eq!(base, uri("/Content/LoremIpsum.xaml"));
        assert!(!base.is_absolute());
    }

    #[test]
    fn fragment_round_trip_reconstructs_input() {
        for s in ["/Content/LoremIpsum.xaml#1", "http://x.org/p#sec#2", "page#", "/plain.xaml"] {
            let u = uri(s);
            let (base, fragment) = remove_fragment(&u);
            assert_eq!(append_fragment(&base, fragment.as_deref()), u, "{s}");
        }
    }

    #[test]
    fn absolute_uri_keeps_scheme_after_fragment_removal() {
        let (base, _) = remove_fragment(&uri("https://x.org/doc#top"));
        assert_eq!(base.scheme(), Some("https"));
    }

    // ── parse_with_parameters ─────────────────────────────────────────────

    #[test]
    fn uri_only() {
        let p = parse_with_parameters("cmd:/foo").unwrap();
        assert_eq!(p.uri, uri("cmd:/foo"));
        assert_eq!(p.parameter, None);
        assert_eq!(p.target_name, None);
    }

    #[test]
    fn uri_and_parameter() {
        let p = parse_with_parameters("http://example.com|p1").unwrap();
        assert_eq!(p.uri, uri("http://example.com"));
        assert_eq!(p.parameter.as_deref(), Some("p1"));
        assert_eq!(p.target_name, None);
    }

    #[test]
    fn uri_parameter_and_target() {
        let p = parse_with_parameters("cmd:/foo|param|target").unwrap();
        assert_eq!(p.parameter.as_deref(), Some("param"));
        assert_eq!(p.target_name.as_deref(), Some("target"));
    }

    #[test]
    fn target_keeps_extra_pipes() {
        let p = parse_with_parameters("cmd:/foo|a|b|c").unwrap();
        assert_eq!(p.parameter.as_deref(), Some("a"));
        assert_eq!(p.target_name.as_deref(), Some("b|c"));
    }

    #[test]
    fn empty_parameter_is_present() {
        let p = parse_with_parameters("cmd:/foo||target").unwrap();
        assert_eq!(p.parameter.as_deref(), Some(""));
        assert_eq!(p.target_name.as_deref(), Some("target"));
    }

    #[test]
    fn segments_are_percent_decoded() {
        let p = parse_with_parameters("cmd:/copy|a%7Cb%20c|x%2").unwrap();
        assert_eq!(p.parameter.as_deref(), Some("a|b c"));
        assert_eq!(p.target_name.as_deref(), Some("x%2"));
    }

    #[test]
    fn invalid_uri_segment_fails() {
        assert_eq!(parse_with_parameters("|p1"), Err(UriError::Empty));
        assert!(parse_with_parameters("not a uri|p").is_err());
    }
}
