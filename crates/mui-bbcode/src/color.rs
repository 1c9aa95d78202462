use std::fmt;

/// Straight-alpha sRGB color as written in markup.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Named colors accepted by `[color=name]`, matched case-insensitively.
const NAMED: &[(&str, [u8; 3])] = &[
    ("black", [0x00, 0x00, 0x00]),
    ("white", [0xff, 0xff, 0xff]),
    ("red", [0xff, 0x00, 0x00]),
    ("green", [0x00, 0x80, 0x00]),
    ("lime", [0x00, 0xff, 0x00]),
    ("blue", [0x00, 0x00, 0xff]),
    ("yellow", [0xff, 0xff, 0x00]),
    ("cyan", [0x00, 0xff, 0xff]),
    ("magenta", [0xff, 0x00, 0xff]),
    ("gray", [0x80, 0x80, 0x80]),
    ("grey", [0x80, 0x80, 0x80]),
    ("silver", [0xc0, 0xc0, 0xc0]),
    ("maroon", [0x80, 0x00, 0x00]),
    ("olive", [0x80, 0x80, 0x00]),
    ("navy", [0x00, 0x00, 0x80]),
    ("purple", [0x80, 0x00, 0x80]),
    ("teal", [0x00, 0x80, 0x80]),
    ("orange", [0xff, 0xa5, 0x00]),
    ("pink", [0xff, 0xc0, 0xcb]),
    ("hotpink", [0xff, 0x69, 0xb4]),
    ("brown", [0xa5, 0x2a, 0x2a]),
    ("gold", [0xff, 0xd7, 0x00]),
    ("crimson", [0xdc, 0x14, 0x3c]),
    ("cobalt", [0x00, 0x50, 0xef]),
];

impl Color {
    /// Used when a `[color=...]` value cannot be parsed.
    pub const HIGHLIGHT: Color = Color::rgb(0xff, 0x69, 0xb4);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rgb`, `#argb`, `#rrggbb`, `#aarrggbb`, or a color name.
    ///
    /// Alpha comes first in the 4- and 8-digit forms.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let Some(hex) = value.strip_prefix('#') else {
            return NAMED
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(value))
                .map(|&(_, [r, g, b])| Self::rgb(r, g, b));
        };
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok();
        let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Self::rgb(digit(0)? * 0x11, digit(1)? * 0x11, digit(2)? * 0x11)),
            4 => Some(Self::argb(digit(0)? * 0x11, digit(1)? * 0x11, digit(2)? * 0x11, digit(3)? * 0x11)),
            6 => Some(Self::rgb(pair(0)?, pair(2)?, pair(4)?)),
            8 => Some(Self::argb(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xff {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_digit_hex() {
        assert_eq!(Color::parse("#FF0000"), Some(Color::rgb(0xff, 0, 0)));
        assert_eq!(Color::parse("#1ba1e2"), Some(Color::rgb(0x1b, 0xa1, 0xe2)));
    }

    #[test]
    fn eight_digit_hex_is_argb() {
        assert_eq!(Color::parse("#80FF0000"), Some(Color::argb(0x80, 0xff, 0, 0)));
    }

    #[test]
    fn short_forms_expand() {
        assert_eq!(Color::parse("#f00"), Some(Color::rgb(0xff, 0, 0)));
        assert_eq!(Color::parse("#8f00"), Some(Color::argb(0x88, 0xff, 0, 0)));
    }

    #[test]
    fn names_ignore_case() {
        assert_eq!(Color::parse("Red"), Some(Color::rgb(0xff, 0, 0)));
        assert_eq!(Color::parse(" HotPink "), Some(Color::HIGHLIGHT));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("#gg0000"), None);
        assert_eq!(Color::parse("#ünï"), None);
        assert_eq!(Color::parse("notacolor"), None);
        assert_eq!(Color::parse(""), None);
    }

    #[test]
    fn display_round_trips() {
        assert_eq!(Color::rgb(0xff, 0, 0x10).to_string(), "#FF0010");
        assert_eq!(Color::argb(0x80, 1, 2, 3).to_string(), "#80010203");
    }
}
