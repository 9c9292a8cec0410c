//! Terminal UI example using crossterm and ratatui.
//!
//! This example shows how a host wires selection_replace into a terminal editor.
//! Run with: cargo run --example tui_crossterm
//!
//! Shift+arrows select, Ctrl+F opens the dialog, Tab switches fields,
//! Enter replaces, Esc closes the dialog, Ctrl+C quits.

use crossterm::{
    event::{self, Event, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use ropey::Rope;
use selection_replace::{
    Command, CommandCheck, CommandTable, FIND_AND_REPLACE, Field, FindReplaceDialog,
    FindReplacePlugin, JsonFileStore, Modal, Plugin, SettingsManager,
    traits::{EditorOps, OffsetOps},
    types::Position,
};
use std::io;

/// Text buffer implementation using ropey
struct RopeEditor {
    rope: Rope,
    anchor: usize,
    head: usize,
}

impl RopeEditor {
    fn new() -> Self {
        Self {
            rope: Rope::from(
                "Welcome to selection_replace!\n\nSelect some lines with Shift+arrows,\nthen press Ctrl+F to find and replace\nwithin the selection only.\n\nTry replacing \\n to join lines:\nfoo\nbar\nbaz\n",
            ),
            anchor: 0,
            head: 0,
        }
    }

    fn range(&self) -> (usize, usize) {
        (self.anchor.min(self.head), self.anchor.max(self.head))
    }

    fn line_text(&self, line: usize) -> String {
        if line < self.rope.len_lines() {
            self.rope.line(line).to_string()
        } else {
            String::new()
        }
    }

    fn move_head(&mut self, offset: usize, extend: bool) {
        self.head = offset.min(self.rope.len_chars());
        if !extend {
            self.anchor = self.head;
        }
    }

    fn move_vertical(&mut self, down: bool, extend: bool) {
        let pos = self.offset_to_cursor(self.head);
        let line = if down {
            pos.line + 1
        } else {
            pos.line.saturating_sub(1)
        };
        let offset = self.cursor_offset(Position { line, col: pos.col });
        self.move_head(offset, extend);
    }

    fn type_text(&mut self, text: &str) {
        self.replace_selection(text);
    }

    fn backspace(&mut self) {
        let (from, to) = self.range();
        if from == to && from > 0 {
            self.rope.remove(from - 1..from);
            self.move_head(from - 1, false);
        } else {
            self.replace_selection("");
        }
    }
}

impl OffsetOps for RopeEditor {
    fn cursor_offset(&self, pos: Position) -> usize {
        let line = (pos.line as usize).min(self.rope.len_lines().saturating_sub(1));
        let len = self.line_text(line).trim_end_matches('\n').chars().count();
        self.rope.line_to_char(line) + (pos.col as usize).min(len)
    }

    fn offset_to_cursor(&self, offset: usize) -> Position {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        Position {
            line: line as u32,
            col: (offset - self.rope.line_to_char(line)) as u32,
        }
    }
}

impl EditorOps for RopeEditor {
    fn selection(&self) -> String {
        let (from, to) = self.range();
        self.rope.slice(from..to).to_string()
    }

    fn selection_from(&self) -> Position {
        self.offset_to_cursor(self.range().0)
    }

    fn replace_selection(&mut self, text: &str) {
        let (from, to) = self.range();
        self.rope.remove(from..to);
        self.rope.insert(from, text);
        self.move_head(from + text.chars().count(), false);
    }

    fn set_selection(&mut self, anchor: Position, head: Position) {
        self.anchor = self.cursor_offset(anchor);
        self.head = self.cursor_offset(head);
    }
}

struct App {
    plugin: FindReplacePlugin,
    commands: CommandTable,
    editor: RopeEditor,
    dialog: Option<FindReplaceDialog>,
    focus: Field,
    message: String,
    should_quit: bool,
}

impl App {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let store = JsonFileStore::new(
            std::env::temp_dir()
                .join("selection_replace_demo")
                .join("data.json"),
        );
        let settings = SettingsManager::new(store).load();

        let mut plugin = FindReplacePlugin::new(settings);
        let mut commands = CommandTable::new();
        plugin.on_load(&mut commands)?;

        Ok(Self {
            plugin,
            commands,
            editor: RopeEditor::new(),
            dialog: None,
            focus: Field::Find,
            message: format!("Ctrl+F: {}", FIND_AND_REPLACE.name),
            should_quit: false,
        })
    }

    fn run_command(&mut self, id: &str) {
        if self.commands.get(id).is_none() {
            return;
        }
        match self.plugin.check_command(id, false, Some(&self.editor)) {
            CommandCheck::Opened(dialog) => {
                self.dialog = Some(dialog);
                self.focus = Field::Find;
            }
            _ => self.message = "Command unavailable".to_string(),
        }
    }

    fn apply(&mut self, commands: Vec<Command>) {
        for cmd in commands {
            match cmd {
                Command::CloseDialog => self.dialog = None,
                Command::Notify(text) => self.message = text,
            }
        }
    }

    fn handle_dialog_key(&mut self, event: CKeyEvent) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        match event.code {
            CKeyCode::Esc => {
                dialog.on_close();
                self.dialog = None;
            }
            CKeyCode::Tab | CKeyCode::BackTab => {
                self.focus = match self.focus {
                    Field::Find => Field::ReplaceWith,
                    Field::ReplaceWith => Field::Find,
                };
            }
            CKeyCode::Enter => {
                let commands = dialog.activate(&mut self.editor);
                self.apply(commands);
            }
            CKeyCode::Backspace => {
                if let Some(input) = dialog.input_mut(self.focus) {
                    input.value.pop();
                }
            }
            CKeyCode::Char(c) => {
                if let Some(input) = dialog.input_mut(self.focus) {
                    input.value.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_crossterm_event(&mut self, event: CKeyEvent) {
        if event.code == CKeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.dialog.is_some() {
            self.handle_dialog_key(event);
            return;
        }

        let extend = event.modifiers.contains(KeyModifiers::SHIFT);
        match event.code {
            CKeyCode::Char('f') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.run_command(FIND_AND_REPLACE.id);
            }
            CKeyCode::Left => {
                let head = self.editor.head.saturating_sub(1);
                self.editor.move_head(head, extend);
            }
            CKeyCode::Right => {
                let head = self.editor.head + 1;
                self.editor.move_head(head, extend);
            }
            CKeyCode::Up => self.editor.move_vertical(false, extend),
            CKeyCode::Down => self.editor.move_vertical(true, extend),
            CKeyCode::Enter => self.editor.type_text("\n"),
            CKeyCode::Backspace => self.editor.backspace(),
            CKeyCode::Char(c) => self.editor.type_text(&c.to_string()),
            _ => {}
        }
    }
}

fn selection_spans(line_text: &str, line_start: usize, range: (usize, usize)) -> Line<'static> {
    let chars: Vec<char> = line_text.trim_end_matches('\n').chars().collect();
    let line_end = line_start + chars.len();
    let from = range.0.clamp(line_start, line_end) - line_start;
    let to = range.1.clamp(line_start, line_end) - line_start;

    let before: String = chars[..from].iter().collect();
    let selected: String = chars[from..to].iter().collect();
    let after: String = chars[to..].iter().collect();

    Line::from(vec![
        Span::raw(before),
        Span::styled(selected, Style::default().bg(Color::Blue)),
        Span::raw(after),
    ])
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_dialog(f: &mut Frame, dialog: &FindReplaceDialog, focus: Field) {
    let area = centered(f.size(), 50, 9);
    f.render_widget(Clear, area);

    let mut lines = vec![];
    for (field, input) in [Field::Find, Field::ReplaceWith]
        .into_iter()
        .zip(dialog.inputs())
    {
        let style = if field == focus {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let shown = if input.value.is_empty() {
            Span::styled(input.placeholder, Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(input.value.clone())
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<14}", input.label), style),
            shown,
        ]));
        lines.push(Line::from(""));
    }
    if let Some(button) = dialog.submit_button() {
        let style = if button.cta {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(format!("[ {} ]", button.text), style)));
    }

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(dialog.title()),
    );
    f.render_widget(popup, area);
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(3)].as_ref())
        .split(f.size());

    // Main text area
    let range = app.editor.range();
    let mut lines = vec![];
    for i in 0..app.editor.rope.len_lines() {
        let line_start = app.editor.rope.line_to_char(i);
        lines.push(selection_spans(&app.editor.line_text(i), line_start, range));
    }

    let text = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("selection_replace demo"),
    );
    f.render_widget(text, chunks[0]);

    // Status line
    let status = Paragraph::new(app.message.as_str())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[1]);

    if let Some(dialog) = &app.dialog {
        render_dialog(f, dialog, app.focus);
        return;
    }

    let cursor = app.editor.offset_to_cursor(app.editor.head);
    f.set_cursor(
        chunks[0].x + 1 + cursor.col as u16,
        chunks[0].y + 1 + cursor.line as u16,
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            app.handle_crossterm_event(key);

            if app.should_quit {
                break;
            }
        }
    }

    app.plugin.on_unload();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
