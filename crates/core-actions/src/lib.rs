//! Actions: text transforms, the default binding set, and the dispatcher that
//! ties a raw key event to the session history.

pub mod bindings;
pub mod dispatcher;
pub mod transforms;

pub use bindings::default_table;
pub use dispatcher::{DispatchError, DispatchOutcome, DispatchResult, dispatch};
pub use transforms::EditOptions;

use core_config::Config;
use core_events::{Platform, RawKeyEvent};
use core_keymap::BindingTable;
use core_state::{EditorSession, PersistenceSink, RenderSink, SessionOptions};

/// A session bundled with the binding table and platform tag it is driven by.
pub struct Editor {
    session: EditorSession,
    table: BindingTable,
    platform: Platform,
}

impl Editor {
    pub fn new(session: EditorSession, table: BindingTable, platform: Platform) -> Self {
        Self {
            session,
            table,
            platform,
        }
    }

    /// Build an editor from configuration with the default bindings.
    pub fn from_config(
        cfg: &Config,
        initial: Option<&str>,
        render: impl RenderSink + 'static,
        persistence: impl PersistenceSink + 'static,
    ) -> Self {
        let options = SessionOptions {
            max_history: cfg.max_history(),
        };
        let session = EditorSession::with_options(initial, options, render, persistence);
        let table = default_table(EditOptions::from_config(cfg));
        let platform = cfg.platform();
        tracing::debug!(target: "actions.dispatch", %platform, bindings = table.len(), max_history = options.max_history, "editor_ready");
        Self::new(session, table, platform)
    }

    pub fn handle_key(&mut self, event: &RawKeyEvent) -> Result<DispatchResult, DispatchError> {
        dispatch(&mut self.session, &self.table, self.platform, event)
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }
    pub fn session_mut(&mut self) -> &mut EditorSession {
        &mut self.session
    }
    pub fn table(&self) -> &BindingTable {
        &self.table
    }
    pub fn table_mut(&mut self) -> &mut BindingTable {
        &mut self.table
    }
    pub fn platform(&self) -> Platform {
        self.platform
    }
    /// Switch the platform tag used to normalize subsequent key events.
    pub fn set_platform(&mut self, platform: Platform) {
        self.platform = platform;
    }
}
