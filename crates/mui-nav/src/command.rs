use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::UriError;
use crate::uri::Uri;

// ── Command ───────────────────────────────────────────────────────────────

/// An executable action bound to a URI.
///
/// The parameter is the `|parameter` segment of the link target that
/// triggered the command, if any.
pub trait Command: Send + Sync {
    fn can_execute(&self, parameter: Option<&str>) -> bool;
    fn execute(&self, parameter: Option<&str>);
}

pub type SharedCommand = Arc<dyn Command>;

type CanExecuteFn = Box<dyn Fn(Option<&str>) -> bool + Send + Sync>;
type ExecuteFn = Box<dyn Fn(Option<&str>) + Send + Sync>;

/// A [`Command`] built from closures.
pub struct FnCommand {
    can_execute: CanExecuteFn,
    execute: ExecuteFn,
}

impl FnCommand {
    /// A command that can always execute.
    pub fn new(execute: impl Fn(Option<&str>) + Send + Sync + 'static) -> Self {
        Self { can_execute: Box::new(|_| true), execute: Box::new(execute) }
    }

    /// A command guarded by `can_execute`.
    pub fn guarded(
        can_execute: impl Fn(Option<&str>) -> bool + Send + Sync + 'static,
        execute: impl Fn(Option<&str>) + Send + Sync + 'static,
    ) -> Self {
        Self { can_execute: Box::new(can_execute), execute: Box::new(execute) }
    }

    pub fn shared(self) -> SharedCommand {
        Arc::new(self)
    }
}

impl Command for FnCommand {
    fn can_execute(&self, parameter: Option<&str>) -> bool {
        (self.can_execute)(parameter)
    }

    fn execute(&self, parameter: Option<&str>) {
        (self.execute)(parameter)
    }
}

impl fmt::Debug for FnCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCommand").finish_non_exhaustive()
    }
}

// ── CommandTable ──────────────────────────────────────────────────────────

/// Maps URIs to commands. Lookup is by exact URI text.
#[derive(Clone, Default)]
pub struct CommandTable {
    entries: HashMap<Uri, SharedCommand>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `command` to `uri`, returning the command it replaced.
    pub fn insert(&mut self, uri: Uri, command: SharedCommand) -> Option<SharedCommand> {
        self.entries.insert(uri, command)
    }

    /// Parses `uri` and binds `command` to it.
    pub fn register(&mut self, uri: &str, command: SharedCommand) -> Result<(), UriError> {
        let uri = Uri::parse(uri)?;
        if self.entries.insert(uri.clone(), command).is_some() {
            log::debug!("command for {uri} replaced");
        }
        Ok(())
    }

    pub fn get(&self, uri: &Uri) -> Option<&SharedCommand> {
        self.entries.get(uri)
    }

    pub fn contains(&self, uri: &Uri) -> bool {
        self.entries.contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn uris(&self) -> impl Iterator<Item = &Uri> {
        self.entries.keys()
    }
}

impl fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.entries.keys().map(Uri::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("CommandTable").field("uris", &keys).finish()
    }
}
