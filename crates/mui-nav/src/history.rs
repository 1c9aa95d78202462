//! Frame navigation history backing `cmd:/browseback` and `cmd:/refresh`.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::command::{CommandTable, FnCommand};
use crate::uri::{Uri, append_fragment, remove_fragment};

/// What a call to [`FrameHistory::navigate`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameNavigation {
    /// New content; the previous source was pushed on the back stack.
    Content,
    /// Same content, different fragment; history is unchanged.
    Fragment(Option<String>),
}

#[derive(Debug, Clone, Default)]
struct HistoryState {
    /// Current source without its fragment.
    current: Option<Uri>,
    fragment: Option<String>,
    back: Vec<Uri>,
    refreshes: usize,
}

/// A saved copy of a [`FrameHistory`], taken with [`FrameHistory::checkpoint`].
#[derive(Debug, Clone)]
pub struct HistoryCheckpoint(HistoryState);

/// Shared navigation history of one frame. Clones observe the same history.
#[derive(Debug, Clone, Default)]
pub struct FrameHistory {
    state: Arc<Mutex<HistoryState>>,
}

impl FrameHistory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HistoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Moves the frame to `uri`.
    ///
    /// A target that differs from the current source only by fragment is a
    /// fragment navigation and leaves the back stack alone.
    pub fn navigate(&self, uri: &Uri) -> FrameNavigation {
        let (base, fragment) = remove_fragment(uri);
        let mut state = self.lock();
        if state.current.as_ref() == Some(&base) {
            log::debug!("fragment navigation to {:?}", fragment);
            state.fragment = fragment.clone();
            return FrameNavigation::Fragment(fragment);
        }
        log::debug!("frame navigation to {uri}");
        if let Some(previous) = state.current.take() {
            let previous = append_fragment(&previous, state.fragment.as_deref());
            state.back.push(previous);
        }
        state.current = Some(base);
        state.fragment = fragment;
        FrameNavigation::Content
    }

    /// The current source including its fragment.
    pub fn current(&self) -> Option<Uri> {
        let state = self.lock();
        state.current.as_ref().map(|c| append_fragment(c, state.fragment.as_deref()))
    }

    pub fn can_browse_back(&self) -> bool {
        !self.lock().back.is_empty()
    }

    /// Pops the back stack and makes that entry current.
    pub fn browse_back(&self) -> Option<Uri> {
        let mut state = self.lock();
        let target = state.back.pop()?;
        let (base, fragment) = remove_fragment(&target);
        state.current = Some(base);
        state.fragment = fragment;
        log::debug!("browse back to {target}");
        Some(target)
    }

    pub fn back_len(&self) -> usize {
        self.lock().back.len()
    }

    /// Requests a reload of the current source. `false` when nothing is loaded.
    pub fn refresh(&self) -> bool {
        let mut state = self.lock();
        if state.current.is_none() {
            return false;
        }
        state.refreshes += 1;
        true
    }

    pub fn refresh_count(&self) -> usize {
        self.lock().refreshes
    }

    pub fn checkpoint(&self) -> HistoryCheckpoint {
        HistoryCheckpoint(self.lock().clone())
    }

    /// Puts the history back to `checkpoint`, undoing anything since.
    pub fn restore(&self, checkpoint: HistoryCheckpoint) {
        log::debug!("history restored");
        *self.lock() = checkpoint.0;
    }

    /// Registers `cmd:/browseback` and `cmd:/refresh`.
    pub fn register_commands(&self, table: &mut CommandTable) {
        let (guard, this) = (self.clone(), self.clone());
        let back = FnCommand::guarded(move |_| guard.can_browse_back(), move |_| {
            this.browse_back();
        });
        let (guard, this) = (self.clone(), self.clone());
        let refresh = FnCommand::guarded(move |_| guard.current().is_some(), move |_| {
            this.refresh();
        });
        table.insert(Uri::command("browseback"), back.shared());
        table.insert(Uri::command("refresh"), refresh.shared());
    }
}
