//! Scanner, lexer, and parser for **mui markup**, a small bracket-tag
//! language for rich inline text with clickable links.
//!
//! The crate knows nothing about rendering. It turns markup into a [`Span`]
//! of styled runs, links, and line breaks that a host draws however it likes.
//!
//! # Syntax
//!
//! | Markup | Effect |
//! |--------|--------|
//! | `[bold]..[/bold]`, `[b]..[/b]` | bold weight |
//! | `[italic]..[/italic]`, `[i]..[/i]` | italic style |
//! | `[underline]..[/underline]`, `[u]..[/u]` | underline |
//! | `[color=#RRGGBB]..[/color]` | foreground; also `#AARRGGBB`, `#RGB`, names |
//! | `[size=14]..[/size]` | font size |
//! | `[url=target]..[/url]` | link; target is `uri[|parameter][|target]` |
//!
//! Bracket text that is not one of these tags is kept as text.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`scanner`] | `Scanner`, the character cursor |
//! | [`lexer`] | `Lexer`, `Token`, `Tag` |
//! | [`parser`] | `Parser`, `StyleContext`, `parse_str` |
//! | [`ast`] | `Span`, `Inline`, `Run`, `Link`, `Style` |
//! | [`color`] | `Color` |
//! | [`error`] | `ParseError` |
//!
//! # Quick start
//!
//! ```rust
//! use mui_bbcode::{parse_with_commands, LinkAction};
//! use mui_nav::{CommandTable, FnCommand};
//!
//! let mut commands = CommandTable::new();
//! commands.register("cmd:/copy", FnCommand::new(|_| {}).shared()).unwrap();
//!
//! let span = parse_with_commands(
//!     "[bold]Note:[/bold] [url=cmd:/copy|some text]copy[/url] or [url=https://example.com]read more[/url]",
//!     &commands,
//! )
//! .unwrap();
//!
//! let links: Vec<_> = span.links().collect();
//! assert!(links[0].is_command());
//! assert!(matches!(links[1].action, LinkAction::Navigate { .. }));
//! ```

pub mod ast;
pub mod color;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod scanner;

pub use ast::{FontStyle, FontWeight, Inline, Link, LinkAction, Run, Span, Style};
pub use color::Color;
pub use error::ParseError;
pub use lexer::{Lexer, Tag, Token, TokenKind};
pub use parser::{Parser, StyleContext, parse_str, parse_with_commands};
