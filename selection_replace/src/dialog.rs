use crate::replacer::{Replacer, ReplacementResult};
use crate::settings::Settings;
use crate::traits::{EditorOps, Modal};
use crate::types::Command;

pub const DIALOG_TITLE: &str = "Find and Replace in Selection";
pub const DIALOG_CLASS: &str = "find-and-replace-modal";

/// One of the two text inputs in the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Find,
    ReplaceWith,
}

/// A labelled single-line text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub value: String,
}

impl TextInput {
    fn new(label: &'static str, placeholder: &'static str) -> Self {
        Self {
            label,
            placeholder,
            value: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub text: &'static str,
    /// Rendered as the primary call to action.
    pub cta: bool,
}

/// Content built by `on_open`, cleared by `on_close`.
#[derive(Debug, Clone, Default)]
struct Content {
    find: Option<TextInput>,
    replace_with: Option<TextInput>,
    submit: Option<Button>,
}

/// The "Find and Replace in Selection" dialog.
///
/// The host renders [`inputs`](Self::inputs) and [`submit_button`](Self::submit_button),
/// forwards typing through [`set_value`](Self::set_value) and calls
/// [`activate`](Self::activate) when the button is pressed.
#[derive(Debug, Clone)]
pub struct FindReplaceDialog {
    replacer: Replacer,
    restore_selection: bool,
    open: bool,
    content: Content,
}

impl FindReplaceDialog {
    pub fn new(settings: &Settings) -> Self {
        Self {
            replacer: Replacer::builder().flags(settings.replace_flags()).build(),
            restore_selection: settings.restore_selection,
            open: false,
            content: Content::default(),
        }
    }

    pub fn title(&self) -> &'static str {
        DIALOG_TITLE
    }

    pub fn class(&self) -> &'static str {
        DIALOG_CLASS
    }

    /// Whether the host should put back the selection it had before the
    /// dialog took focus.
    pub fn restore_selection(&self) -> bool {
        self.restore_selection
    }

    pub fn replacer(&self) -> &Replacer {
        &self.replacer
    }

    /// The input rows in display order. Empty while the dialog is closed.
    pub fn inputs(&self) -> Vec<&TextInput> {
        [&self.content.find, &self.content.replace_with]
            .into_iter()
            .flatten()
            .collect()
    }

    pub fn input(&self, field: Field) -> Option<&TextInput> {
        match field {
            Field::Find => self.content.find.as_ref(),
            Field::ReplaceWith => self.content.replace_with.as_ref(),
        }
    }

    pub fn input_mut(&mut self, field: Field) -> Option<&mut TextInput> {
        match field {
            Field::Find => self.content.find.as_mut(),
            Field::ReplaceWith => self.content.replace_with.as_mut(),
        }
    }

    pub fn set_value(&mut self, field: Field, value: &str) {
        if let Some(input) = self.input_mut(field) {
            input.value = value.to_string();
        }
    }

    pub fn value(&self, field: Field) -> &str {
        self.input(field).map_or("", |input| input.value.as_str())
    }

    pub fn submit_button(&self) -> Option<&Button> {
        self.content.submit.as_ref()
    }

    /// Run the replacement over the editor's selection and close the dialog.
    ///
    /// With zero matches the document is left untouched; the notification is
    /// emitted either way.
    pub fn activate<E: EditorOps>(&mut self, editor: &mut E) -> Vec<Command> {
        if !self.open {
            return Vec::new();
        }

        let result = self.replacer.replace(
            &editor.selection(),
            self.value(Field::Find),
            self.value(Field::ReplaceWith),
        );
        log::debug!("find and replace made {} replacements", result.match_count);

        if !result.is_noop() {
            self.write_back(editor, &result);
        }

        self.on_close();
        vec![Command::CloseDialog, Command::Notify(notice(result.match_count))]
    }

    fn write_back<E: EditorOps>(&self, editor: &mut E, result: &ReplacementResult) {
        let start = editor.selection_from();
        editor.replace_selection(&result.new_text);

        if self.restore_selection {
            let end = editor.offset_to_cursor(editor.cursor_offset(start) + result.char_len());
            editor.set_selection(start, end);
        }
    }
}

impl Modal for FindReplaceDialog {
    fn on_open(&mut self) {
        self.content = Content {
            find: Some(TextInput::new("Find", "Text")),
            replace_with: Some(TextInput::new("Replace With", "Replacement")),
            submit: Some(Button {
                text: "Replace All",
                cta: true,
            }),
        };
        self.open = true;
    }

    fn on_close(&mut self) {
        self.content = Content::default();
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

/// The user-facing summary of a replace pass.
pub fn notice(count: usize) -> String {
    format!("Made {count} replacements")
}
