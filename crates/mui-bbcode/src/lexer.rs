use std::collections::VecDeque;
use std::fmt;

use crate::scanner::Scanner;

// ── Tag ───────────────────────────────────────────────────────────────────

/// The tag vocabulary. Names are case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Bold,
    Italic,
    Underline,
    Color,
    Size,
    Url,
}

impl Tag {
    /// Looks up a tag by name; `b`, `i`, and `u` are accepted as short forms.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bold" | "b" => Some(Self::Bold),
            "italic" | "i" => Some(Self::Italic),
            "underline" | "u" => Some(Self::Underline),
            "color" => Some(Self::Color),
            "size" => Some(Self::Size),
            "url" => Some(Self::Url),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Color => "color",
            Self::Size => "size",
            Self::Url => "url",
        }
    }
}

// ── Token ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Text,
    TagOpen,
    TagClose,
    Attribute,
    LineBreak,
    End,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::TagOpen => "tag-open",
            Self::TagClose => "tag-close",
            Self::Attribute => "attribute",
            Self::LineBreak => "line-break",
            Self::End => "end",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Text(String),
    /// Tag name as written, e.g. `b` or `bold`.
    TagOpen(String),
    TagClose(String),
    /// The `value` of a preceding `[tag=value]`.
    Attribute(String),
    LineBreak,
    End,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Text(_) => TokenKind::Text,
            Self::TagOpen(_) => TokenKind::TagOpen,
            Self::TagClose(_) => TokenKind::TagClose,
            Self::Attribute(_) => TokenKind::Attribute,
            Self::LineBreak => TokenKind::LineBreak,
            Self::End => TokenKind::End,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Text(v) | Self::TagOpen(v) | Self::TagClose(v) | Self::Attribute(v) => v.as_str(),
            Self::LineBreak | Self::End => "",
        }
    }
}

// ── TokenSource ───────────────────────────────────────────────────────────

/// Anything the parser can pull tokens from.
///
/// Once a source has returned [`Token::End`] it must keep returning it.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// A pre-built token sequence; yields [`Token::End`] once drained.
#[derive(Debug, Clone, Default)]
pub struct TokenBuffer {
    tokens: VecDeque<Token>,
}

impl From<Vec<Token>> for TokenBuffer {
    fn from(tokens: Vec<Token>) -> Self {
        Self { tokens: tokens.into() }
    }
}

impl TokenSource for TokenBuffer {
    fn next_token(&mut self) -> Token {
        self.tokens.pop_front().unwrap_or(Token::End)
    }
}

// ── Lexer ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ScanningText,
    /// The cursor sits on the `[` of a tag already validated by `tag_ahead`.
    ScanningTag,
    /// The cursor sits just past the `=` of a validated `[tag=value]`.
    ScanningAttribute,
}

/// Splits markup into text, tag, attribute, and line-break tokens.
///
/// Only well-formed tags from the [`Tag`] vocabulary are tokens: `[name]`,
/// `[/name]`, and `[name=value]`. Any other bracket text, including unknown
/// names and unterminated tags, stays part of the surrounding text.
/// `\r\n`, `\n`, and `\r` each become one [`Token::LineBreak`].
#[derive(Debug, Clone)]
pub struct Lexer<'s> {
    scanner: Scanner<'s>,
    state: State,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { scanner: Scanner::new(src), state: State::ScanningText }
    }

    /// Lexes the whole input. The last token is always [`Token::End`].
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let end = tok == Token::End;
            tokens.push(tok);
            if end {
                break;
            }
        }
        log::debug!("lexed {} tokens", tokens.len());
        tokens
    }

    fn lex_text(&mut self) -> Token {
        match self.scanner.peek(1) {
            None => return Token::End,
            Some('\r' | '\n') => return self.lex_line_break(),
            Some('[') if self.tag_ahead() => {
                self.state = State::ScanningTag;
                return self.lex_tag();
            }
            _ => {}
        }

        // The first character is plain text even when it is a `[`.
        self.scanner.mark();
        loop {
            self.scanner.advance();
            match self.scanner.peek(1) {
                None | Some('\r' | '\n') => break,
                Some('[') if self.tag_ahead() => break,
                _ => {}
            }
        }
        Token::Text(self.scanner.extract().to_string())
    }

    fn lex_line_break(&mut self) -> Token {
        if self.scanner.peek(1) == Some('\r') && self.scanner.peek(2) == Some('\n') {
            self.scanner.advance();
        }
        self.scanner.advance();
        Token::LineBreak
    }

    fn lex_tag(&mut self) -> Token {
        self.scanner.advance(); // consume `[`
        let close = self.scanner.peek(1) == Some('/');
        if close {
            self.scanner.advance();
        }

        self.scanner.mark();
        while matches!(self.scanner.peek(1), Some(c) if c.is_ascii_alphabetic()) {
            self.scanner.advance();
        }
        let name = self.scanner.extract().to_string();

        if self.scanner.peek(1) == Some('=') {
            self.scanner.advance(); // consume `=`
            self.state = State::ScanningAttribute;
        } else {
            self.scanner.advance(); // consume `]`
            self.state = State::ScanningText;
        }

        if close { Token::TagClose(name) } else { Token::TagOpen(name) }
    }

    fn lex_attribute(&mut self) -> Token {
        self.scanner.mark();
        while !matches!(self.scanner.peek(1), None | Some(']')) {
            self.scanner.advance();
        }
        let value = self.scanner.extract().to_string();
        self.scanner.advance(); // consume `]`
        self.state = State::ScanningText;
        Token::Attribute(value)
    }

    /// Whether the `[` under the cursor opens a well-formed, known tag.
    ///
    /// Attribute values run to the next `]` and may not span a line break.
    fn tag_ahead(&self) -> bool {
        let rest = &self.scanner.remaining()[1..]; // skip `[`
        let (close, rest) = match rest.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, rest),
        };
        let name_len = rest.find(|c: char| !c.is_ascii_alphabetic()).unwrap_or(rest.len());
        if Tag::from_name(&rest[..name_len]).is_none() {
            return false;
        }
        let rest = &rest[name_len..];
        match rest.chars().next() {
            Some(']') => true,
            Some('=') if !close => {
                let value = &rest[1..];
                value
                    .find(|c: char| matches!(c, ']' | '\r' | '\n'))
                    .is_some_and(|i| value[i..].starts_with(']'))
            }
            _ => false,
        }
    }
}

impl TokenSource for Lexer<'_> {
    fn next_token(&mut self) -> Token {
        let tok = match self.state {
            State::ScanningText => self.lex_text(),
            State::ScanningTag => self.lex_tag(),
            State::ScanningAttribute => self.lex_attribute(),
        };
        log::trace!("token {:?} at byte {}", tok, self.scanner.position());
        tok
    }
}
