//! Link targets, command tables, and navigation policy.
//!
//! A link target is a URI, optionally followed by a command parameter and a
//! target name: `cmd:/settheme|dark|MainFrame`. The [`LinkNavigator`]
//! resolves a target in a fixed order:
//!
//! 1. a command bound to the exact URI in its [`CommandTable`],
//! 2. an external scheme (`http`, `https`, `mailto` by default), opened by a
//!    [`Launcher`],
//! 3. the host frame's navigation callback.
//!
//! The default commands (`cmd:/darktheme`, `cmd:/browseback`, `cmd:/copy`, ...)
//! are composed in by the host from [`Appearance`], [`FrameHistory`], and a
//! [`Clipboard`].
//!
//! ```rust
//! use mui_nav::{LinkNavigator, Navigation, Uri};
//!
//! let nav = LinkNavigator::new();
//! let mut visited = Vec::new();
//! let mut frame = |uri: &Uri| visited.push(uri.to_string());
//! let out = nav.navigate_target("/Pages/Intro.xaml|ignored", Some(&mut frame)).unwrap();
//! assert_eq!(out, Navigation::Frame);
//! assert_eq!(visited, ["/Pages/Intro.xaml"]);
//! ```

pub mod appearance;
pub mod clipboard;
pub mod command;
pub mod error;
pub mod history;
pub mod launcher;
pub mod navigator;
pub mod uri;

pub use appearance::{Appearance, FontSize, Theme};
pub use clipboard::Clipboard;
pub use command::{Command, CommandTable, FnCommand, SharedCommand};
pub use error::{ClipboardError, NavigationError, UriError};
pub use history::{FrameHistory, FrameNavigation, HistoryCheckpoint};
pub use launcher::{Launcher, SystemLauncher};
pub use navigator::{LinkNavigator, Navigation, NavigatorConfig};
pub use uri::{Uri, UriWithParameters, append_fragment, parse_with_parameters, remove_fragment};
