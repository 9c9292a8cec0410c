use crate::error::Result;
use crate::types::{CommandSpec, Position};

/// Conversion between document positions and absolute char offsets.
pub trait OffsetOps {
    fn cursor_offset(&self, pos: Position) -> usize;
    fn offset_to_cursor(&self, offset: usize) -> Position;
}

/// The active editor, as seen by the plugin.
pub trait EditorOps: OffsetOps {
    // Queries
    fn selection(&self) -> String;
    fn selection_from(&self) -> Position;

    // Edits; the host serializes access to the underlying document
    fn replace_selection(&mut self, text: &str);
    fn set_selection(&mut self, anchor: Position, head: Position);

    // Read-only views (previews, locked notes) report false
    fn is_editable(&self) -> bool {
        true
    }
}

/// Host-side list of user-invocable commands.
pub trait CommandRegistry {
    fn add_command(&mut self, spec: CommandSpec) -> Result<()>;
}

/// Raw persisted plugin data. `Ok(None)` means nothing has been saved yet.
pub trait SettingsStore {
    fn load_data(&self) -> Result<Option<serde_json::Value>>;
    fn save_data(&mut self, value: &serde_json::Value) -> Result<()>;
}

/// Lifecycle hooks called by the host.
pub trait Plugin {
    fn on_load(&mut self, registry: &mut dyn CommandRegistry) -> Result<()>;
    fn on_unload(&mut self);
}

/// Lifecycle hooks for a dialog window.
pub trait Modal {
    fn on_open(&mut self);
    fn on_close(&mut self);
    fn is_open(&self) -> bool;
}
