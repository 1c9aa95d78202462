//! Theme, font size, and accent color state with its `cmd:/` commands.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::command::{CommandTable, FnCommand};
use crate::uri::Uri;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSize {
    Small,
    #[default]
    Large,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppearanceState {
    pub theme: Theme,
    pub font_size: FontSize,
    /// Accent color as written by the caller, e.g. `#1ba1e2`.
    pub accent: String,
}

impl Default for AppearanceState {
    fn default() -> Self {
        Self { theme: Theme::default(), font_size: FontSize::default(), accent: "#1ba1e2".to_string() }
    }
}

/// Shared appearance state. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct Appearance {
    state: Arc<Mutex<AppearanceState>>,
}

impl Appearance {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, AppearanceState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> AppearanceState {
        self.lock().clone()
    }

    pub fn theme(&self) -> Theme {
        self.lock().theme
    }

    pub fn set_theme(&self, theme: Theme) {
        log::info!("theme -> {theme:?}");
        self.lock().theme = theme;
    }

    pub fn font_size(&self) -> FontSize {
        self.lock().font_size
    }

    pub fn set_font_size(&self, size: FontSize) {
        log::info!("font size -> {size:?}");
        self.lock().font_size = size;
    }

    pub fn accent(&self) -> String {
        self.lock().accent.clone()
    }

    pub fn set_accent(&self, accent: impl Into<String>) {
        let accent = accent.into();
        log::info!("accent -> {accent}");
        self.lock().accent = accent;
    }

    /// Registers `cmd:/accentcolor`, `cmd:/darktheme`, `cmd:/lighttheme`,
    /// `cmd:/settheme`, `cmd:/largefontsize`, and `cmd:/smallfontsize`.
    pub fn register_commands(&self, table: &mut CommandTable) {
        let entries = [
            ("accentcolor", self.accent_command()),
            ("darktheme", self.theme_command(Theme::Dark)),
            ("lighttheme", self.theme_command(Theme::Light)),
            ("settheme", self.set_theme_command()),
            ("largefontsize", self.font_size_command(FontSize::Large)),
            ("smallfontsize", self.font_size_command(FontSize::Small)),
        ];
        for (name, command) in entries {
            table.insert(Uri::command(name), command.shared());
        }
    }

    fn accent_command(&self) -> FnCommand {
        let this = self.clone();
        FnCommand::guarded(
            |p| p.is_some_and(|p| !p.trim().is_empty()),
            move |p| {
                if let Some(p) = p {
                    this.set_accent(p.trim());
                }
            },
        )
    }

    fn theme_command(&self, theme: Theme) -> FnCommand {
        let guard = self.clone();
        let this = self.clone();
        FnCommand::guarded(move |_| guard.theme() != theme, move |_| this.set_theme(theme))
    }

    fn set_theme_command(&self) -> FnCommand {
        let this = self.clone();
        FnCommand::guarded(
            |p| p.and_then(Theme::from_name).is_some(),
            move |p| {
                if let Some(theme) = p.and_then(Theme::from_name) {
                    this.set_theme(theme);
                }
            },
        )
    }

    fn font_size_command(&self, size: FontSize) -> FnCommand {
        let guard = self.clone();
        let this = self.clone();
        FnCommand::guarded(move |_| guard.font_size() != size, move |_| this.set_font_size(size))
    }
}
