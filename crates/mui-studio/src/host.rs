//! A single-frame host: one current page, its history, and a navigator.

use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};

use mui_bbcode::{Inline, LinkAction, Run, Span, Style, parse_with_commands};
use mui_nav::{
    Appearance, Clipboard, FrameHistory, FrameNavigation, LinkNavigator, Navigation, NavigatorConfig,
    Uri, remove_fragment,
};

use crate::render;

/// What following a link did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Executed(Uri),
    Refused(Uri),
    External(Uri),
    Opened(Uri),
    Scrolled(Option<String>),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Executed(uri) => write!(f, "executed {uri}"),
            Self::Refused(uri) => write!(f, "{uri} cannot execute right now"),
            Self::External(uri) => write!(f, "opened {uri} externally"),
            Self::Opened(uri) => write!(f, "navigated to {uri}"),
            Self::Scrolled(Some(fragment)) => write!(f, "scrolled to #{fragment}"),
            Self::Scrolled(None) => write!(f, "scrolled to top"),
        }
    }
}

pub struct Studio {
    navigator: LinkNavigator,
    history: FrameHistory,
    appearance: Appearance,
    /// Directory that relative link paths resolve against.
    content_root: PathBuf,
    page: Span,
    color: bool,
}

impl Studio {
    pub fn new(
        config: NavigatorConfig,
        clipboard: Arc<dyn Clipboard>,
        content_root: impl Into<PathBuf>,
        color: bool,
    ) -> Self {
        let appearance = Appearance::new();
        let history = FrameHistory::new();
        let navigator =
            LinkNavigator::with_default_commands(&appearance, &history, clipboard).with_config(config);
        Self {
            navigator,
            history,
            appearance,
            content_root: content_root.into(),
            page: Span::default(),
            color,
        }
    }

    pub fn page(&self) -> &Span {
        &self.page
    }

    pub fn history(&self) -> &FrameHistory {
        &self.history
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    /// Shows `markup` as the current page.
    ///
    /// Markup that fails to parse is shown verbatim.
    pub fn open_markup(&mut self, markup: &str) {
        self.page = self.parse_page(markup);
    }

    fn parse_page(&self, markup: &str) -> Span {
        match parse_with_commands(markup, self.navigator.commands()) {
            Ok(span) => span,
            Err(e) => {
                log::warn!("showing raw markup: {e}");
                Span { inlines: vec![Inline::Run(Run { text: markup.to_string(), style: Style::default() })] }
            }
        }
    }

    /// Navigates the frame to `uri`, loading the file it names under the content root.
    ///
    /// History only moves once the page has been read.
    pub fn open(&mut self, uri: &Uri) -> Result<Outcome> {
        let (base, _) = remove_fragment(uri);
        let same_page = self.history.current().is_some_and(|current| remove_fragment(&current).0 == base);
        if !same_page {
            let page = self.read_page(&base)?;
            self.page = page;
        }
        match self.history.navigate(uri) {
            FrameNavigation::Fragment(fragment) => Ok(Outcome::Scrolled(fragment)),
            FrameNavigation::Content => Ok(Outcome::Opened(uri.clone())),
        }
    }

    /// Maps `uri` to a file under the content root.
    fn resolve(&self, uri: &Uri) -> Result<PathBuf> {
        let (base, _) = remove_fragment(uri);
        let relative = Path::new(base.as_str().trim_start_matches('/'));
        if !relative.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir)) {
            bail!("{uri} points outside the content root");
        }
        Ok(self.content_root.join(relative))
    }

    fn read_page(&self, uri: &Uri) -> Result<Span> {
        let path = self.resolve(uri)?;
        let markup = fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
        log::debug!("loaded {} ({} bytes)", path.display(), markup.len());
        Ok(self.parse_page(&markup))
    }

    /// Activates the `n`th link (1-based) of the current page.
    pub fn follow(&mut self, n: usize) -> Result<Outcome> {
        let Some(link) = n.checked_sub(1).and_then(|i| self.page.links().nth(i)).cloned() else {
            bail!("page has no link {n}");
        };

        if let LinkAction::Command { command, parameter, .. } = &link.action {
            if !command.can_execute(parameter.as_deref()) {
                return Ok(Outcome::Refused(link.uri));
            }
            let saved = self.history.checkpoint();
            let before = (self.history.current(), self.history.refresh_count());
            command.execute(parameter.as_deref());
            let after = (self.history.current(), self.history.refresh_count());
            if before != after {
                if let Some(current) = after.0 {
                    match self.read_page(&current) {
                        Ok(page) => self.page = page,
                        Err(e) => {
                            self.history.restore(saved);
                            return Err(e);
                        }
                    }
                }
            }
            return Ok(Outcome::Executed(link.uri));
        }

        let mut target = None;
        let mut frame = |uri: &Uri| target = Some(uri.clone());
        let navigation = self.navigator.navigate(&link.uri, Some(&mut frame), link.parameter())?;
        match (navigation, target) {
            (Navigation::Frame, Some(uri)) => self.open(&uri),
            (Navigation::External, _) => Ok(Outcome::External(link.uri)),
            (Navigation::Command { executed: true }, _) => Ok(Outcome::Executed(link.uri)),
            (Navigation::Command { executed: false }, _) => Ok(Outcome::Refused(link.uri)),
            (Navigation::Frame, None) => bail!("frame navigation to {} produced no target", link.uri),
        }
    }

    /// The page, its link list, and a status line.
    pub fn render(&self) -> String {
        let mut out = render::render(&self.page, self.color);
        let links = render::render_links(&self.page);
        if !links.is_empty() {
            out.push('\n');
            out.push_str(&links);
        }
        let state = self.appearance.snapshot();
        out.push_str(&format!(
            "\n  theme {:?} · font {:?} · accent {}",
            state.theme, state.font_size, state.accent
        ));
        if let Some(current) = self.history.current() {
            out.push_str(&format!(" · at {current}"));
        }
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use mui_nav::{ClipboardError, Theme};

    #[derive(Default)]
    struct MemoryClipboard(Mutex<Option<String>>);

    impl Clipboard for MemoryClipboard {
        fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
            *self.0.lock().unwrap() = Some(text.to_string());
            Ok(())
        }
    }

    fn studio(root: &std::path::Path) -> (Studio, Arc<MemoryClipboard>) {
        let clipboard = Arc::new(MemoryClipboard::default());
        let studio = Studio::new(NavigatorConfig::default(), clipboard.clone(), root, false);
        (studio, clipboard)
    }

    fn uri(s: &str) -> Uri {
        Uri::parse(s).unwrap()
    }

    #[test]
    fn command_links_run_default_commands() {
        let dir = tempfile::tempdir().unwrap();
        let (mut studio, clipboard) = studio(dir.path());
        studio.open_markup("[url=cmd:/darktheme]dark[/url] [url=cmd:/copy|copied text]copy[/url]");

        assert_eq!(studio.follow(1).unwrap(), Outcome::Executed(uri("cmd:/darktheme")));
        assert_eq!(studio.appearance().theme(), Theme::Dark);
        assert_eq!(studio.follow(1).unwrap(), Outcome::Refused(uri("cmd:/darktheme")));

        studio.follow(2).unwrap();
        assert_eq!(clipboard.0.lock().unwrap().as_deref(), Some("copied text"));
    }

    #[test]
    fn frame_links_load_pages_and_browse_back() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("home.bbcode"), "[url=/about.bbcode]about[/url]").unwrap();
        fs::write(dir.path().join("about.bbcode"), "[b]About[/b] [url=cmd:/browseback]back[/url]").unwrap();
        let (mut studio, _) = studio(dir.path());

        studio.open(&uri("/home.bbcode")).unwrap();
        assert_eq!(studio.follow(1).unwrap(), Outcome::Opened(uri("/about.bbcode")));
        assert!(studio.page().plain_text().starts_with("About"));

        studio.follow(1).unwrap();
        assert_eq!(studio.history().current(), Some(uri("/home.bbcode")));
        assert_eq!(studio.page().plain_text(), "about");
    }

    #[test]
    fn fragment_links_scroll() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("doc.bbcode"), "[url=/doc.bbcode#part2]jump[/url]").unwrap();
        let (mut studio, _) = studio(dir.path());
        studio.open(&uri("/doc.bbcode")).unwrap();
        assert_eq!(studio.follow(1).unwrap(), Outcome::Scrolled(Some("part2".into())));
        assert_eq!(studio.history().back_len(), 0);
    }

    #[test]
    fn missing_link_and_missing_file_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let (mut studio, _) = studio(dir.path());
        studio.open_markup("[url=/nowhere.bbcode]x[/url]");
        assert!(studio.follow(0).is_err());
        assert!(studio.follow(2).is_err());
        assert!(studio.follow(1).is_err());
    }

    #[test]
    fn failed_load_keeps_history_and_page() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("home.bbcode"), "[url=/missing.bbcode]x[/url] back").unwrap();
        let (mut studio, _) = studio(dir.path());
        studio.open(&uri("/home.bbcode")).unwrap();

        assert!(studio.follow(1).is_err());
        assert_eq!(studio.history().current(), Some(uri("/home.bbcode")));
        assert_eq!(studio.history().back_len(), 0);
        assert_eq!(studio.page().plain_text(), "x back");
    }

    #[test]
    fn failed_browse_back_restores_history() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.bbcode"), "a").unwrap();
        fs::write(dir.path().join("b.bbcode"), "[url=cmd:/browseback]back[/url]").unwrap();
        let (mut studio, _) = studio(dir.path());
        studio.open(&uri("/a.bbcode")).unwrap();
        studio.open(&uri("/b.bbcode")).unwrap();
        fs::remove_file(dir.path().join("a.bbcode")).unwrap();

        assert!(studio.follow(1).is_err());
        assert_eq!(studio.history().current(), Some(uri("/b.bbcode")));
        assert_eq!(studio.history().back_len(), 1);
        assert_eq!(studio.page().plain_text(), "back");
    }

    #[test]
    fn parent_segments_cannot_leave_the_content_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("pages");
        fs::create_dir(&root).unwrap();
        fs::write(dir.path().join("secret.bbcode"), "secret").unwrap();
        fs::write(root.join("home.bbcode"), "[url=/../secret.bbcode]x[/url]").unwrap();
        let (mut studio, _) = studio(&root);
        studio.open(&uri("/home.bbcode")).unwrap();

        let err = studio.follow(1).unwrap_err();
        assert!(err.to_string().contains("outside the content root"));
        assert_eq!(studio.history().current(), Some(uri("/home.bbcode")));
        assert!(studio.open(&uri("/sub/../../secret.bbcode")).is_err());
        assert_eq!(studio.page().plain_text(), "x");
    }

    #[test]
    fn refresh_rereads_the_current_page() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("live.bbcode");
        fs::write(&page, "old [url=cmd:/refresh]reload[/url]").unwrap();
        let (mut studio, _) = studio(dir.path());
        studio.open(&uri("/live.bbcode")).unwrap();

        fs::write(&page, "new [url=cmd:/refresh]reload[/url]").unwrap();
        assert_eq!(studio.follow(1).unwrap(), Outcome::Executed(uri("cmd:/refresh")));
        assert_eq!(studio.page().plain_text(), "new reload");
        assert_eq!(studio.history().refresh_count(), 1);
        assert_eq!(studio.history().back_len(), 0);
    }

    #[test]
    fn unparseable_markup_is_shown_raw() {
        let dir = tempfile::tempdir().unwrap();
        let (mut studio, _) = studio(dir.path());
        studio.open_markup("[size=big]x");
        assert_eq!(studio.page().plain_text(), "[size=big]x");
    }

    #[test]
    fn bundled_pages_parse() {
        let dir = tempfile::tempdir().unwrap();
        let (mut studio, clipboard) = studio(dir.path());
        studio.open_markup(include_str!("../pages/welcome.bbcode"));
        assert_eq!(studio.page().links().count(), 9);
        assert!(studio.page().links().skip(2).take(6).all(|l| l.is_command()));

        studio.open_markup(include_str!("../pages/about.bbcode"));
        studio.follow(1).unwrap();
        assert_eq!(clipboard.0.lock().unwrap().as_deref(), Some("uri|parameter|target"));
    }

    #[test]
    fn render_includes_links_and_status() {
        let dir = tempfile::tempdir().unwrap();
        let (mut studio, _) = studio(dir.path());
        studio.open_markup("see [url=cmd:/refresh]reload[/url]");
        let out = studio.render();
        assert!(out.starts_with("see reload[1]\n"));
        assert!(out.contains("[1] reload -> cmd:/refresh (command)"));
        assert!(out.contains("theme Light"));
    }
}
