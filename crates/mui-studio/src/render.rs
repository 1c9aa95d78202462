//! Terminal rendering of a parsed [`Span`].

use std::fmt::Write as _;

use crossterm::style::{Attribute, Color as TermColor, ContentStyle, StyledContent};

use mui_bbcode::{FontStyle, FontWeight, Inline, LinkAction, Run, Span, Style};

/// Foreground for link text without an explicit `[color]`.
const LINK_COLOR: TermColor = TermColor::Cyan;

fn content_style(style: &Style, link: bool) -> ContentStyle {
    let mut out = ContentStyle::new();
    if style.font_weight == Some(FontWeight::Bold) {
        out.attributes.set(Attribute::Bold);
    }
    if style.font_style == Some(FontStyle::Italic) {
        out.attributes.set(Attribute::Italic);
    }
    if style.underline || link {
        out.attributes.set(Attribute::Underlined);
    }
    out.foreground_color = match style.foreground {
        Some(c) => Some(TermColor::Rgb { r: c.r, g: c.g, b: c.b }),
        None if link => Some(LINK_COLOR),
        None => None,
    };
    out
}

fn push_run(out: &mut String, run: &Run, link: bool, color: bool) {
    if color {
        let _ = write!(out, "{}", StyledContent::new(content_style(&run.style, link), run.text.as_str()));
    } else {
        out.push_str(&run.text);
    }
}

/// Renders `span` as terminal text; `color` enables ANSI styling.
///
/// Each link is followed by its 1-based number in brackets so it can be
/// picked with `--follow`.
pub fn render(span: &Span, color: bool) -> String {
    let mut out = String::new();
    let mut link_no = 0;
    for inline in &span.inlines {
        match inline {
            Inline::Run(run) => push_run(&mut out, run, false, color),
            Inline::Link(link) => {
                link_no += 1;
                for run in &link.runs {
                    push_run(&mut out, run, true, color);
                }
                let _ = write!(out, "[{link_no}]");
            }
            Inline::LineBreak => out.push('\n'),
        }
    }
    out.push('\n');
    out
}

/// One line per link: number, text, and where it goes.
pub fn render_links(span: &Span) -> String {
    let mut out = String::new();
    for (i, link) in span.links().enumerate() {
        let _ = write!(out, "  [{}] {} -> {}", i + 1, link.text(), link.uri);
        match &link.action {
            LinkAction::Command { parameter, target, .. } => {
                out.push_str(" (command");
                if let Some(p) = parameter {
                    let _ = write!(out, ", parameter {p:?}");
                }
                if let Some(t) = target {
                    let _ = write!(out, ", target {t}");
                }
                out.push(')');
            }
            LinkAction::Navigate { target_name: Some(frame) } => {
                let _ = write!(out, " (frame {frame})");
            }
            LinkAction::Navigate { target_name: None } => {}
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mui_bbcode::{parse_str, parse_with_commands};
    use mui_nav::{CommandTable, FnCommand};

    #[test]
    fn plain_render_strips_markup() {
        let span = parse_str("[b]Hello[/b], [color=red]world[/color]\nbye").unwrap();
        assert_eq!(render(&span, false), "Hello, world\nbye\n");
    }

    #[test]
    fn links_are_numbered() {
        let span = parse_str("[url=/a.xaml]a[/url] and [url=http://x.org]x[/url]").unwrap();
        assert_eq!(render(&span, false), "a[1] and x[2]\n");
    }

    #[test]
    fn colored_render_emits_escapes() {
        let span = parse_str("[bold]x[/bold]").unwrap();
        let out = render(&span, true);
        assert!(out.contains('\u{1b}'));
        assert!(out.contains('x'));
    }

    #[test]
    fn style_mapping() {
        let span = parse_str("[i][u][color=#102030]x").unwrap();
        let run = span.runs().next().unwrap();
        let style = content_style(&run.style, false);
        assert!(style.attributes.has(Attribute::Italic));
        assert!(style.attributes.has(Attribute::Underlined));
        assert!(!style.attributes.has(Attribute::Bold));
        assert_eq!(style.foreground_color, Some(TermColor::Rgb { r: 0x10, g: 0x20, b: 0x30 }));
    }

    #[test]
    fn link_listing_describes_targets() {
        let mut commands = CommandTable::new();
        commands.register("cmd:/copy", FnCommand::new(|_| {}).shared()).unwrap();
        let span = parse_with_commands(
            "[url=cmd:/copy|hi|Box]c[/url][url=/p.xaml|Main]p[/url][url=mailto:a@b.c]m[/url]",
            &commands,
        )
        .unwrap();
        assert_eq!(
            render_links(&span),
            "  [1] c -> cmd:/copy (command, parameter \"hi\", target Box)\n  \
             [2] p -> /p.xaml (frame Main)\n  \
             [3] m -> mailto:a@b.c\n"
        );
    }
}
