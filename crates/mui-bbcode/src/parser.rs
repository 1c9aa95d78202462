use mui_nav::{CommandTable, parse_with_parameters};

use crate::ast::{FontStyle, FontWeight, Inline, Link, LinkAction, Run, Span, Style};
use crate::color::Color;
use crate::error::ParseError;
use crate::lexer::{Lexer, Tag, Token, TokenBuffer, TokenKind, TokenSource};

// ── StyleContext ──────────────────────────────────────────────────────────

/// Style state carried across one parse pass.
///
/// Each tag sets or clears exactly one field. There is no tag stack: a
/// closing tag clears its field even when nested tags of the same kind are
/// still open, and unclosed tags leave their style in place.
#[derive(Debug, Clone, Default)]
pub struct StyleContext {
    pub style: Style,
    /// Raw value of the last `[url=...]`.
    pub link_target: Option<String>,
}

impl StyleContext {
    /// Snapshots the current style into a run.
    pub fn create_run(&self, text: String) -> Run {
        Run { text, style: self.style.clone() }
    }
}

// ── Parser ────────────────────────────────────────────────────────────────

/// Single-use markup parser with one token of lookahead.
///
/// [`parse`](Self::parse) consumes the parser; parse another input with a
/// new one.
pub struct Parser<'c, S> {
    source: S,
    lookahead: Option<Token>,
    commands: Option<&'c CommandTable>,
}

impl<'c, 's> Parser<'c, Lexer<'s>> {
    pub fn new(src: &'s str) -> Self {
        Self::from_source(Lexer::new(src))
    }
}

impl<'c> Parser<'c, TokenBuffer> {
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self::from_source(TokenBuffer::from(tokens))
    }
}

impl<'c, S: TokenSource> Parser<'c, S> {
    pub fn from_source(source: S) -> Self {
        Self { source, lookahead: None, commands: None }
    }

    /// Links whose URI is in `commands` become command links.
    pub fn with_commands(mut self, commands: &'c CommandTable) -> Self {
        self.commands = Some(commands);
        self
    }

    fn la1(&mut self) -> &Token {
        self.lookahead.get_or_insert_with(|| self.source.next_token())
    }

    fn consume(&mut self) -> Token {
        self.lookahead.take().unwrap_or_else(|| self.source.next_token())
    }

    pub fn parse(mut self) -> Result<Span, ParseError> {
        let mut span = Span::default();
        let mut ctx = StyleContext::default();

        loop {
            match self.consume() {
                Token::TagOpen(name) => self.parse_tag(&name, true, &mut ctx)?,
                Token::TagClose(name) => self.parse_tag(&name, false, &mut ctx)?,
                Token::Text(text) => {
                    let run = ctx.create_run(text);
                    let link = ctx.link_target.as_deref().and_then(|t| self.resolve_link(t));
                    span.inlines.push(match link {
                        Some(mut link) => {
                            link.runs.push(run);
                            Inline::Link(link)
                        }
                        None => Inline::Run(run),
                    });
                }
                Token::LineBreak => span.inlines.push(Inline::LineBreak),
                Token::Attribute(value) => {
                    return Err(ParseError::UnexpectedToken { kind: TokenKind::Attribute, value });
                }
                Token::End => break,
            }
        }

        log::debug!("parsed {} inlines", span.inlines.len());
        Ok(span)
    }

    fn parse_tag(&mut self, name: &str, open: bool, ctx: &mut StyleContext) -> Result<(), ParseError> {
        let Some(tag) = Tag::from_name(name) else {
            let kind = if open { TokenKind::TagOpen } else { TokenKind::TagClose };
            return Err(ParseError::UnknownTokenType { kind, value: name.to_string() });
        };
        log::trace!("{} {}", if open { "open" } else { "close" }, tag.name());

        match tag {
            Tag::Bold => ctx.style.font_weight = open.then_some(FontWeight::Bold),
            Tag::Italic => ctx.style.font_style = open.then_some(FontStyle::Italic),
            Tag::Underline => ctx.style.underline = open,
            Tag::Color if open => {
                if let Some(value) = self.take_attribute() {
                    let color = Color::parse(&value).unwrap_or_else(|| {
                        log::warn!("unrecognized color {value:?}, using highlight");
                        Color::HIGHLIGHT
                    });
                    ctx.style.foreground = Some(color);
                }
            }
            Tag::Color => ctx.style.foreground = None,
            Tag::Size if open => {
                if let Some(value) = self.take_attribute() {
                    ctx.style.font_size = Some(parse_font_size(&value)?);
                }
            }
            Tag::Size => ctx.style.font_size = None,
            Tag::Url if open => {
                if let Some(target) = self.take_attribute() {
                    ctx.link_target = Some(target);
                }
            }
            Tag::Url => ctx.link_target = None,
        }
        Ok(())
    }

    /// Consumes the next token if it is an attribute.
    fn take_attribute(&mut self) -> Option<String> {
        if !matches!(self.la1(), Token::Attribute(_)) {
            return None;
        }
        match self.consume() {
            Token::Attribute(value) => Some(value),
            _ => None,
        }
    }

    /// Builds an empty link for `target`, or `None` when it is not a valid
    /// link target and the text should stay plain.
    fn resolve_link(&self, target: &str) -> Option<Link> {
        let parsed = match parse_with_parameters(target) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("ignoring link target {target:?}: {e}");
                return None;
            }
        };
        let action = match self.commands.and_then(|c| c.get(&parsed.uri)) {
            Some(command) => LinkAction::Command {
                command: command.clone(),
                parameter: parsed.parameter,
                target: parsed.target_name,
            },
            None => LinkAction::Navigate { target_name: parsed.parameter },
        };
        Some(Link { uri: parsed.uri, action, runs: Vec::new() })
    }
}

fn parse_font_size(value: &str) -> Result<f64, ParseError> {
    match value.trim().parse::<f64>() {
        Ok(size) if size.is_finite() && size > 0.0 => Ok(size),
        _ => Err(ParseError::InvalidFontSize { value: value.to_string() }),
    }
}

// ── Public parse entry points ─────────────────────────────────────────────

/// Parses markup with no command table; every link is a navigation link.
pub fn parse_str(src: &str) -> Result<Span, ParseError> {
    Parser::new(src).parse()
}

/// Parses markup, binding links whose URI is in `commands` to those commands.
pub fn parse_with_commands(src: &str, commands: &CommandTable) -> Result<Span, ParseError> {
    Parser::new(src).with_commands(commands).parse()
}
