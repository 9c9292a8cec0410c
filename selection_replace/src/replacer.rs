use regex::Regex;

/// The two-character sequence (backslash followed by `n`) that stands in for a
/// real line break while matching, so a user can target line breaks by typing it.
pub const NEWLINE_MARKER: &str = "\\n";

bitflags::bitflags! {
    /// Options controlling how [`Replacer`] treats line breaks.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ReplaceFlags: u8 {
        /// View real newlines as [`NEWLINE_MARKER`] while matching.
        const NEWLINE_MARKER            = 0b01;
        /// Only turn the first leftover marker back into a newline.
        /// Has no effect without `NEWLINE_MARKER`.
        const RESTORE_FIRST_MARKER_ONLY = 0b10;
    }
}

/// Outcome of a replace pass over a block of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementResult {
    /// The text after substitution. Equal to the input when nothing matched.
    pub new_text: String,
    /// Number of non-overlapping occurrences that were replaced.
    pub match_count: usize,
}

impl ReplacementResult {
    fn unchanged(text: &str) -> Self {
        Self {
            new_text: text.to_string(),
            match_count: 0,
        }
    }

    /// Length of `new_text` in chars, the unit used by [`crate::OffsetOps`].
    pub fn char_len(&self) -> usize {
        self.new_text.chars().count()
    }

    pub fn is_noop(&self) -> bool {
        self.match_count == 0
    }
}

/// Literal, case-sensitive, global substitution.
#[derive(Debug, Clone)]
pub struct Replacer {
    flags: ReplaceFlags,
}

pub struct ReplacerBuilder {
    flags: ReplaceFlags,
}

impl Default for ReplacerBuilder {
    fn default() -> Self {
        Self {
            flags: ReplaceFlags::NEWLINE_MARKER,
        }
    }
}

impl ReplacerBuilder {
    pub fn flags(mut self, flags: ReplaceFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn newline_marker(mut self, enabled: bool) -> Self {
        self.flags.set(ReplaceFlags::NEWLINE_MARKER, enabled);
        self
    }

    pub fn restore_first_marker_only(mut self, enabled: bool) -> Self {
        self.flags.set(ReplaceFlags::RESTORE_FIRST_MARKER_ONLY, enabled);
        self
    }

    pub fn build(self) -> Replacer {
        Replacer { flags: self.flags }
    }
}

impl Default for Replacer {
    fn default() -> Self {
        ReplacerBuilder::default().build()
    }
}

impl Replacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ReplacerBuilder {
        ReplacerBuilder::default()
    }

    pub fn flags(&self) -> ReplaceFlags {
        self.flags
    }

    /// Replace every literal occurrence of `search` in `text`.
    ///
    /// `replacement` is always inserted verbatim. With
    /// [`ReplaceFlags::NEWLINE_MARKER`], a line break in `text` is matched as
    /// [`NEWLINE_MARKER`] and is atomic: a match may contain whole line breaks
    /// but never starts or ends halfway through one. `"n"` therefore counts zero
    /// occurrences in `"a\nb"`.
    pub fn replace(&self, text: &str, search: &str, replacement: &str) -> ReplacementResult {
        if !self.flags.contains(ReplaceFlags::NEWLINE_MARKER) {
            return replace_literal(text, search, replacement);
        }
        if self.flags.contains(ReplaceFlags::RESTORE_FIRST_MARKER_ONLY) {
            replace_restoring_first_marker(text, search, replacement)
        } else {
            replace_tracking_markers(text, search, replacement)
        }
    }
}

/// Replace every literal occurrence of `search` in `text`, without any
/// newline handling. An empty `search` matches nothing.
pub fn replace_literal(text: &str, search: &str, replacement: &str) -> ReplacementResult {
    let matches = find_literal(text, search);
    if matches.is_empty() {
        return ReplacementResult::unchanged(text);
    }
    ReplacementResult {
        new_text: splice(text, &matches, replacement),
        match_count: matches.len(),
    }
}

/// Count non-overlapping literal occurrences of `search` in `text`.
pub fn count_literal(text: &str, search: &str) -> usize {
    find_literal(text, search).len()
}

fn literal_pattern(search: &str) -> Result<Regex, regex::Error> {
    Regex::new(&regex::escape(search))
}

// Byte ranges of leftmost-first, non-overlapping matches.
fn find_literal(haystack: &str, needle: &str) -> Vec<(usize, usize)> {
    if needle.is_empty() {
        return Vec::new();
    }
    match literal_pattern(needle) {
        Ok(re) => re.find_iter(haystack).map(|m| (m.start(), m.end())).collect(),
        Err(err) => {
            log::warn!("search term rejected by regex engine, scanning substrings instead: {err}");
            haystack
                .match_indices(needle)
                .map(|(start, s)| (start, start + s.len()))
                .collect()
        }
    }
}

fn splice(text: &str, matches: &[(usize, usize)], replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for &(start, end) in matches {
        out.push_str(&text[last..start]);
        out.push_str(replacement);
        last = end;
    }
    out.push_str(&text[last..]);
    out
}

/// Text with every real newline rewritten to [`NEWLINE_MARKER`], plus the byte
/// offsets (in the encoded text) where those generated markers begin.
struct MarkedText {
    encoded: String,
    markers: Vec<usize>,
}

impl MarkedText {
    fn encode(text: &str) -> Self {
        let mut encoded = String::with_capacity(text.len() + text.len() / 8);
        let mut markers = Vec::new();
        for ch in text.chars() {
            if ch == '\n' {
                markers.push(encoded.len());
                encoded.push_str(NEWLINE_MARKER);
            } else {
                encoded.push(ch);
            }
        }
        Self { encoded, markers }
    }

    // True when `offset` falls strictly inside a generated marker.
    fn splits_marker(&self, offset: usize) -> bool {
        match self.markers.binary_search(&offset) {
            Ok(_) => false,
            Err(0) => false,
            Err(idx) => offset < self.markers[idx - 1] + NEWLINE_MARKER.len(),
        }
    }

    fn next_char_boundary(&self, offset: usize) -> usize {
        self.encoded[offset..]
            .chars()
            .next()
            .map_or(self.encoded.len(), |ch| offset + ch.len_utf8())
    }

    /// Leftmost-first matches that never start or end inside a generated marker.
    fn find(&self, search: &str) -> Vec<(usize, usize)> {
        if search.is_empty() {
            return Vec::new();
        }
        let re = match literal_pattern(search) {
            Ok(re) => re,
            Err(err) => {
                log::warn!("search term rejected by regex engine, scanning substrings instead: {err}");
                return self.find_by_scan(search);
            }
        };

        let mut found = Vec::new();
        let mut from = 0;
        while from <= self.encoded.len() {
            let Some(m) = re.find_at(&self.encoded, from) else {
                break;
            };
            if self.splits_marker(m.start()) || self.splits_marker(m.end()) {
                from = self.next_char_boundary(m.start());
                continue;
            }
            found.push((m.start(), m.end()));
            from = m.end();
        }
        found
    }

    fn find_by_scan(&self, search: &str) -> Vec<(usize, usize)> {
        let mut found = Vec::new();
        let mut from = 0;
        while let Some(rel) = self.encoded[from..].find(search) {
            let start = from + rel;
            let end = start + search.len();
            if self.splits_marker(start) || self.splits_marker(end) {
                from = self.next_char_boundary(start);
                continue;
            }
            found.push((start, end));
            from = end;
        }
        found
    }

    /// Copy `encoded[start..end]` into `out`, turning every generated marker
    /// that lies wholly inside the span back into a real newline.
    fn push_decoded(&self, out: &mut String, start: usize, end: usize) {
        let first = self.markers.partition_point(|&m| m < start);
        let mut pos = start;
        for &marker in &self.markers[first..] {
            if marker + NEWLINE_MARKER.len() > end {
                break;
            }
            out.push_str(&self.encoded[pos..marker]);
            out.push('\n');
            pos = marker + NEWLINE_MARKER.len();
        }
        out.push_str(&self.encoded[pos..end]);
    }
}

fn replace_tracking_markers(text: &str, search: &str, replacement: &str) -> ReplacementResult {
    let marked = MarkedText::encode(text);
    let search = search.replace('\n', NEWLINE_MARKER);
    let matches = marked.find(&search);
    if matches.is_empty() {
        return ReplacementResult::unchanged(text);
    }

    // Replacing a match with itself must leave the original span intact,
    // line breaks included
    let identity = replacement == search;
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for &(start, end) in &matches {
        marked.push_decoded(&mut out, last, start);
        if identity {
            marked.push_decoded(&mut out, start, end);
        } else {
            out.push_str(replacement);
        }
        last = end;
    }
    marked.push_decoded(&mut out, last, marked.encoded.len());

    ReplacementResult {
        new_text: out,
        match_count: matches.len(),
    }
}

fn replace_restoring_first_marker(text: &str, search: &str, replacement: &str) -> ReplacementResult {
    let encoded = text.replace('\n', NEWLINE_MARKER);
    let matches = find_literal(&encoded, search);
    if matches.is_empty() {
        return ReplacementResult::unchanged(text);
    }
    ReplacementResult {
        new_text: splice(&encoded, &matches, replacement).replacen(NEWLINE_MARKER, "\n", 1),
        match_count: matches.len(),
    }
}
