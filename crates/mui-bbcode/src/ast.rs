use std::fmt;

use mui_nav::{SharedCommand, Uri};

use crate::color::Color;

// ── Style ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Normal,
    Italic,
}

/// Text attributes of a run. `None` means "inherit from the host".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub font_size: Option<f64>,
    pub foreground: Option<Color>,
    pub underline: bool,
}

impl Style {
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

// ── Run ───────────────────────────────────────────────────────────────────

/// Text sharing one style snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub style: Style,
}

// ── Link ──────────────────────────────────────────────────────────────────

/// How a link behaves when activated.
#[derive(Clone)]
pub enum LinkAction {
    /// Runs a command from the command table.
    Command {
        command: SharedCommand,
        parameter: Option<String>,
        /// Name of the element the command is directed at.
        target: Option<String>,
    },
    /// Navigates to the link URI. The parameter segment of the link target
    /// names the frame to navigate.
    Navigate { target_name: Option<String> },
}

impl PartialEq for LinkAction {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Command { command: a, parameter: pa, target: ta },
                Self::Command { command: b, parameter: pb, target: tb },
            ) => std::sync::Arc::ptr_eq(a, b) && pa == pb && ta == tb,
            (Self::Navigate { target_name: a }, Self::Navigate { target_name: b }) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for LinkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command { parameter, target, .. } => f
                .debug_struct("Command")
                .field("parameter", parameter)
                .field("target", target)
                .finish_non_exhaustive(),
            Self::Navigate { target_name } => {
                f.debug_struct("Navigate").field("target_name", target_name).finish()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub uri: Uri,
    pub action: LinkAction,
    pub runs: Vec<Run>,
}

impl Link {
    pub fn is_command(&self) -> bool {
        matches!(self.action, LinkAction::Command { .. })
    }

    pub fn command(&self) -> Option<&SharedCommand> {
        match &self.action {
            LinkAction::Command { command, .. } => Some(command),
            LinkAction::Navigate { .. } => None,
        }
    }

    /// The `|parameter` segment of the link target.
    pub fn parameter(&self) -> Option<&str> {
        match &self.action {
            LinkAction::Command { parameter, .. } => parameter.as_deref(),
            LinkAction::Navigate { target_name } => target_name.as_deref(),
        }
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

// ── Span ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Run(Run),
    Link(Link),
    LineBreak,
}

/// Root container of a parsed document, in reading order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Span {
    pub inlines: Vec<Inline>,
}

impl Span {
    pub fn is_empty(&self) -> bool {
        self.inlines.is_empty()
    }

    /// Every run in reading order, including those inside links.
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.inlines.iter().flat_map(|inline| match inline {
            Inline::Run(run) => std::slice::from_ref(run).iter(),
            Inline::Link(link) => link.runs.iter(),
            Inline::LineBreak => (&[] as &[Run]).iter(),
        })
    }

    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.inlines.iter().filter_map(|inline| match inline {
            Inline::Link(link) => Some(link),
            _ => None,
        })
    }

    /// The text without styling; line breaks become `\n`.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for inline in &self.inlines {
            match inline {
                Inline::Run(run) => out.push_str(&run.text),
                Inline::Link(link) => link.runs.iter().for_each(|r| out.push_str(&r.text)),
                Inline::LineBreak => out.push('\n'),
            }
        }
        out
    }
}
