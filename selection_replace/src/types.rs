/// A position within a host document.
///
/// Positions are zero-indexed and column values are counted in chars,
/// matching the offsets exchanged through [`crate::OffsetOps`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based column position in chars.
    pub col: u32,
}

impl Position {
    /// The origin position (0, 0).
    pub const ZERO: Position = Position { line: 0, col: 0 };

    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

/// A selection span in document coordinates.
///
/// The anchor is where the selection started and the head is where the
/// cursor currently sits; either may come first in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Fixed end of the selection.
    pub anchor: Position,
    /// Moving end of the selection.
    pub head: Position,
}

impl Selection {
    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    /// A collapsed selection (plain cursor) at `pos`.
    pub fn point(pos: Position) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    /// The earlier of the two ends.
    pub fn from(&self) -> Position {
        self.anchor.min(self.head)
    }

    /// The later of the two ends.
    pub fn to(&self) -> Position {
        self.anchor.max(self.head)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }
}

/// Identity of a user-invocable command as shown in the host's command list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandSpec {
    /// Stable identifier, unique within the host.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
}

/// UI effects emitted for the host to carry out.
///
/// Document edits go straight through [`crate::EditorOps`]; these cover the
/// parts of the interaction that belong to the host's own chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Dismiss the dialog that emitted this command.
    CloseDialog,
    /// Show a transient notification with the given message.
    Notify(String),
}
