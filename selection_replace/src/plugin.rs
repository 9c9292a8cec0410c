use std::collections::HashMap;

use crate::dialog::FindReplaceDialog;
use crate::error::{Error, Result};
use crate::settings::Settings;
use crate::traits::{CommandRegistry, EditorOps, Modal, Plugin};
use crate::types::CommandSpec;

pub const FIND_AND_REPLACE: CommandSpec = CommandSpec {
    id: "find-and-replace-in-selection",
    name: "Find And Replace",
};

const COMMANDS: &[CommandSpec] = &[FIND_AND_REPLACE];

/// Answer to a host asking about (or running) one of the plugin's commands.
#[derive(Debug, Clone)]
pub enum CommandCheck {
    /// The command does not apply right now.
    Disabled,
    /// The command would run; returned for availability checks.
    Enabled,
    /// The command ran and opened this dialog.
    Opened(FindReplaceDialog),
}

impl CommandCheck {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, CommandCheck::Disabled)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FindReplacePlugin {
    settings: Settings,
    loaded: bool,
}

impl FindReplacePlugin {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            loaded: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn commands(&self) -> &'static [CommandSpec] {
        COMMANDS
    }

    /// With `checking` set, only report availability; otherwise open the
    /// dialog for `editor`.
    pub fn check_command<E: EditorOps + ?Sized>(
        &self,
        id: &str,
        checking: bool,
        editor: Option<&E>,
    ) -> CommandCheck {
        if !self.loaded || id != FIND_AND_REPLACE.id {
            return CommandCheck::Disabled;
        }
        match editor {
            Some(editor) if editor.is_editable() => {}
            _ => return CommandCheck::Disabled,
        }
        if checking {
            return CommandCheck::Enabled;
        }

        let mut dialog = FindReplaceDialog::new(&self.settings);
        dialog.on_open();
        CommandCheck::Opened(dialog)
    }
}

impl Plugin for FindReplacePlugin {
    fn on_load(&mut self, registry: &mut dyn CommandRegistry) -> Result<()> {
        log::info!("loading plugin");
        for spec in self.commands() {
            registry.add_command(*spec)?;
        }
        self.loaded = true;
        Ok(())
    }

    fn on_unload(&mut self) {
        log::info!("unloading plugin");
        self.loaded = false;
    }
}

/// A minimal [`CommandRegistry`] keyed by command id.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    commands: HashMap<&'static str, CommandSpec>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&CommandSpec> {
        self.commands.get(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<CommandSpec> {
        self.commands.remove(id)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.values()
    }
}

impl CommandRegistry for CommandTable {
    fn add_command(&mut self, spec: CommandSpec) -> Result<()> {
        if self.commands.contains_key(spec.id) {
            return Err(Error::DuplicateCommand(spec.id.to_string()));
        }
        self.commands.insert(spec.id, spec);
        Ok(())
    }
}
