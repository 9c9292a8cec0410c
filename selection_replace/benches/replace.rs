//! Benchmarks for selection_replace over large selections.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ropey::Rope;
use selection_replace::{
    Field, FindReplaceDialog, Modal, NEWLINE_MARKER, ReplaceFlags, Replacer, Settings,
    traits::{EditorOps, OffsetOps},
    types::Position,
};
use std::time::Duration;

/// Rope-based editor with the whole document selected
struct BenchEditor {
    rope: Rope,
    from: usize,
    to: usize,
}

impl BenchEditor {
    fn new(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let to = rope.len_chars();
        Self { rope, from: 0, to }
    }
}

impl OffsetOps for BenchEditor {
    fn cursor_offset(&self, pos: Position) -> usize {
        let line = (pos.line as usize).min(self.rope.len_lines().saturating_sub(1));
        (self.rope.line_to_char(line) + pos.col as usize).min(self.rope.len_chars())
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

impl EditorOps for BenchEditor {
    fn selection(&self) -> String {
        self.rope.slice(self.from..self.to).to_string()
    }

    fn selection_from(&self) -> Position {
        self.offset_to_cursor(self.from)
    }

    fn replace_selection(&mut self, text: &str) {
        self.rope.remove(self.from..self.to);
        self.rope.insert(self.from, text);
        self.to = self.from + text.chars().count();
    }

    fn set_selection(&mut self, anchor: Position, head: Position) {
        self.from = self.cursor_offset(anchor);
        self.to = self.cursor_offset(head);
    }
}

fn generate_sample_text(lines: usize) -> String {
    let mut text = String::new();
    for i in 0..lines {
        text.push_str(&format!(
            "let value_{} = compute(foo.bar, \"foo\") + foo * {};\n",
            i + 1,
            i % 7
        ));
    }
    text
}

fn benchmark_literal(c: &mut Criterion) {
    let text = generate_sample_text(5000);
    let replacer = Replacer::builder().flags(ReplaceFlags::empty()).build();

    c.bench_function("literal replace (5k lines)", |b| {
        b.iter(|| black_box(replacer.replace(black_box(&text), "foo", "quux")));
    });
}

fn benchmark_tracked_markers(c: &mut Criterion) {
    let text = generate_sample_text(5000);
    let replacer = Replacer::new();

    c.bench_function("tracked markers, word (5k lines)", |b| {
        b.iter(|| black_box(replacer.replace(black_box(&text), "foo", "quux")));
    });
    c.bench_function("tracked markers, line breaks (5k lines)", |b| {
        b.iter(|| black_box(replacer.replace(black_box(&text), NEWLINE_MARKER, " ")));
    });
}

fn benchmark_first_only(c: &mut Criterion) {
    let text = generate_sample_text(5000);
    let replacer = Replacer::builder()
        .flags(ReplaceFlags::NEWLINE_MARKER | ReplaceFlags::RESTORE_FIRST_MARKER_ONLY)
        .build();

    c.bench_function("first-only markers (5k lines)", |b| {
        b.iter(|| black_box(replacer.replace(black_box(&text), "foo", "quux")));
    });
}

fn benchmark_no_match(c: &mut Criterion) {
    let text = generate_sample_text(5000);
    let replacer = Replacer::new();

    c.bench_function("no match (5k lines)", |b| {
        b.iter(|| black_box(replacer.replace(black_box(&text), "absent", "x")));
    });
}

fn benchmark_dialog_round_trip(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let settings = Settings::default();

    c.bench_function("dialog activate with reselect (1k lines)", |b| {
        b.iter(|| {
            let mut editor = BenchEditor::new(&text);
            let mut dialog = FindReplaceDialog::new(&settings);
            dialog.on_open();
            dialog.set_value(Field::Find, "foo.bar");
            dialog.set_value(Field::ReplaceWith, "foo.baz");
            black_box(dialog.activate(&mut editor));
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(100);
    targets = benchmark_literal,
              benchmark_tracked_markers,
              benchmark_first_only,
              benchmark_no_match,
              benchmark_dialog_round_trip
}
criterion_main!(benches);
