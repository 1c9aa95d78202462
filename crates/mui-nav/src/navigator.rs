use std::fmt;
use std::sync::Arc;

use crate::appearance::Appearance;
use crate::clipboard::{Clipboard, register_copy_command};
use crate::command::CommandTable;
use crate::error::NavigationError;
use crate::history::FrameHistory;
use crate::launcher::{Launcher, SystemLauncher};
use crate::uri::{Uri, parse_with_parameters};

// ── NavigatorConfig ───────────────────────────────────────────────────────

/// Navigation policy settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorConfig {
    /// Schemes routed to the external launcher. Compared case-insensitively.
    pub external_schemes: Vec<String>,
    /// Suffixes that mark a reference as an in-app document for
    /// [`LinkNavigator::can_navigate`]. Compared case-insensitively.
    pub document_extensions: Vec<String>,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            external_schemes: vec!["http".into(), "https".into(), "mailto".into()],
            document_extensions: vec![".xaml".into(), ".bbcode".into()],
        }
    }
}

// ── Navigation ────────────────────────────────────────────────────────────

/// Which branch of the policy handled a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// A bound command matched; `executed` is `false` when it refused to run.
    Command { executed: bool },
    /// Handed to the external launcher.
    External,
    /// Delegated to the host frame.
    Frame,
}

// ── LinkNavigator ─────────────────────────────────────────────────────────

/// Resolves link targets: command table first, then external schemes,
/// then the host frame.
pub struct LinkNavigator {
    commands: CommandTable,
    config: NavigatorConfig,
    launcher: Box<dyn Launcher>,
}

impl LinkNavigator {
    /// An empty command table, default config, and the system launcher.
    pub fn new() -> Self {
        Self {
            commands: CommandTable::new(),
            config: NavigatorConfig::default(),
            launcher: Box::new(SystemLauncher),
        }
    }

    /// A navigator with the appearance, history, and copy commands registered.
    pub fn with_default_commands(
        appearance: &Appearance,
        history: &FrameHistory,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        let mut nav = Self::new();
        appearance.register_commands(&mut nav.commands);
        history.register_commands(&mut nav.commands);
        register_copy_command(&mut nav.commands, clipboard);
        log::debug!("navigator ready with {} commands", nav.commands.len());
        nav
    }

    pub fn with_config(mut self, config: NavigatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_launcher(mut self, launcher: impl Launcher + 'static) -> Self {
        self.launcher = Box::new(launcher);
        self
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    pub fn commands_mut(&mut self) -> &mut CommandTable {
        &mut self.commands
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// `true` for absolute references whose scheme is in the external list.
    pub fn is_external(&self, uri: &Uri) -> bool {
        uri.is_absolute() && self.config.external_schemes.iter().any(|s| uri.has_scheme(s))
    }

    fn is_document(&self, uri: &Uri) -> bool {
        let text = uri.as_str().to_ascii_lowercase();
        self.config
            .document_extensions
            .iter()
            .any(|ext| text.contains(&ext.to_ascii_lowercase()))
    }

    /// Best-effort check of whether [`navigate`](Self::navigate) would do something.
    ///
    /// Commands answer through `can_execute`. Otherwise external schemes are
    /// navigable, and so is any reference that looks like an in-app document
    /// and differs from `current`.
    pub fn can_navigate(&self, uri: &Uri, current: Option<&Uri>, parameter: Option<&str>) -> bool {
        if let Some(command) = self.commands.get(uri) {
            return command.can_execute(parameter);
        }
        if self.is_external(uri) {
            return true;
        }
        self.is_document(uri) && current != Some(uri)
    }

    /// Navigates to `uri`.
    ///
    /// A bound command runs when its `can_execute` allows it and is otherwise
    /// skipped without error. External schemes go to the launcher and stop
    /// there. Anything else is handed to `frame`; with no frame the target is
    /// unresolvable.
    pub fn navigate(
        &self,
        uri: &Uri,
        frame: Option<&mut dyn FnMut(&Uri)>,
        parameter: Option<&str>,
    ) -> Result<Navigation, NavigationError> {
        if let Some(command) = self.commands.get(uri) {
            let executed = command.can_execute(parameter);
            if executed {
                log::debug!("executing command {uri}");
                command.execute(parameter);
            } else {
                log::warn!("command {uri} cannot execute with parameter {parameter:?}");
            }
            return Ok(Navigation::Command { executed });
        }

        if self.is_external(uri) {
            self.launcher
                .launch(uri)
                .map_err(|source| NavigationError::Launch { uri: uri.clone(), source })?;
            return Ok(Navigation::External);
        }

        match frame {
            Some(frame) => {
                log::debug!("delegating {uri} to frame");
                frame(uri);
                Ok(Navigation::Frame)
            }
            None => Err(NavigationError::Unresolvable { uri: uri.clone() }),
        }
    }

    /// Parses a raw `uri|parameter|target` link target and navigates to it.
    pub fn navigate_target(
        &self,
        target: &str,
        frame: Option<&mut dyn FnMut(&Uri)>,
    ) -> Result<Navigation, NavigationError> {
        let link = parse_with_parameters(target)?;
        self.navigate(&link.uri, frame, link.parameter.as_deref())
    }
}

impl Default for LinkNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LinkNavigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkNavigator")
            .field("commands", &self.commands)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
