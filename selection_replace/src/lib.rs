pub mod dialog;
pub mod error;
pub mod plugin;
pub mod replacer;
pub mod settings;
pub mod traits;
pub mod types;

pub use crate::dialog::{Button, Field, FindReplaceDialog, TextInput};
pub use crate::error::{Error, Result};
pub use crate::plugin::{CommandCheck, CommandTable, FIND_AND_REPLACE, FindReplacePlugin};
pub use crate::replacer::{
    NEWLINE_MARKER, ReplaceFlags, ReplacementResult, Replacer, ReplacerBuilder, count_literal,
    replace_literal,
};
pub use crate::settings::{JsonFileStore, MarkerRestore, Settings, SettingsManager};
pub use crate::traits::{CommandRegistry, EditorOps, Modal, OffsetOps, Plugin, SettingsStore};
pub use crate::types::{Command, CommandSpec, Position, Selection};
