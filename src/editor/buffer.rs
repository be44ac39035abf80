use ropey::Rope;

/// Cursor position in a [`BodyBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column in characters.
    pub col: usize,
    /// Column remembered across vertical moves through shorter lines.
    sticky_col: usize,
}

impl Cursor {
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            sticky_col: col,
        }
    }

    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.sticky_col = col;
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Post body text backed by a rope.
///
/// Columns are counted in characters, so multi-byte text moves one glyph per
/// keypress. Mutating methods return `true` when the text changed.
#[derive(Clone)]
pub struct BodyBuffer {
    rope: Rope,
    cursor: Cursor,
}

impl BodyBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::default(),
        }
    }

    pub fn empty() -> Self {
        Self::from_text("")
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line content without its trailing line break.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_string();
        Some(line.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Line length in characters, without the line break.
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.chars().count())
    }

    /// Replace the whole text and put the cursor at the start.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = Cursor::default();
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        if ch == '\n' {
            return self.split_line();
        }
        self.rope.insert_char(self.char_idx(), ch);
        self.cursor.set_col(self.cursor.col + 1);
        true
    }

    pub fn insert_str(&mut self, s: &str) -> bool {
        if s.is_empty() {
            return false;
        }
        self.rope.insert(self.char_idx(), s);
        match s.rsplit_once('\n') {
            Some((_, tail)) => {
                self.cursor.line += s.matches('\n').count();
                self.cursor.set_col(tail.chars().count());
            }
            None => self.cursor.set_col(self.cursor.col + s.chars().count()),
        }
        true
    }

    pub fn split_line(&mut self) -> bool {
        self.rope.insert_char(self.char_idx(), '\n');
        self.cursor.line += 1;
        self.cursor.set_col(0);
        true
    }

    /// Backspace: delete the character before the cursor, joining lines at
    /// column 0.
    pub fn delete_back(&mut self) -> bool {
        let idx = self.char_idx();
        if idx == 0 {
            return false;
        }
        if self.cursor.col == 0 {
            let prev_len = self.line_len(self.cursor.line - 1);
            self.cursor.line -= 1;
            self.cursor.set_col(prev_len);
        } else {
            self.cursor.set_col(self.cursor.col - 1);
        }
        self.rope.remove(idx - 1..idx);
        true
    }

    /// Delete: remove the character under the cursor.
    pub fn delete_forward(&mut self) -> bool {
        let idx = self.char_idx();
        if idx >= self.rope.len_chars() {
            return false;
        }
        self.rope.remove(idx..=idx);
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                if self.cursor.col > 0 {
                    self.cursor.set_col(self.cursor.col - 1);
                } else if self.cursor.line > 0 {
                    self.cursor.line -= 1;
                    self.cursor.set_col(self.line_len(self.cursor.line));
                }
            }
            Direction::Right => {
                if self.cursor.col < self.line_len(self.cursor.line) {
                    self.cursor.set_col(self.cursor.col + 1);
                } else if self.cursor.line + 1 < self.line_count() {
                    self.cursor.line += 1;
                    self.cursor.set_col(0);
                }
            }
            Direction::Up if self.cursor.line > 0 => self.move_vertical(self.cursor.line - 1),
            Direction::Down if self.cursor.line + 1 < self.line_count() => {
                self.move_vertical(self.cursor.line + 1);
            }
            Direction::Up | Direction::Down => {}
        }
    }

    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    pub fn move_end(&mut self) {
        self.cursor.set_col(self.line_len(self.cursor.line));
    }

    pub const fn move_to_start(&mut self) {
        self.cursor = Cursor::at(0, 0);
    }

    pub fn move_to_end(&mut self) {
        let last = self.line_count().saturating_sub(1);
        self.cursor = Cursor::at(last, self.line_len(last));
    }

    /// Move to `(line, col)`, clamped to the text.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let line = line.min(self.line_count().saturating_sub(1));
        self.cursor = Cursor::at(line, col.min(self.line_len(line)));
    }

    fn move_vertical(&mut self, line: usize) {
        self.cursor.line = line;
        self.cursor.col = self.cursor.sticky_col.min(self.line_len(line));
    }

    fn char_idx(&self) -> usize {
        self.rope.line_to_char(self.cursor.line) + self.cursor.col.min(self.line_len(self.cursor.line))
    }
}

impl Default for BodyBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for BodyBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BodyBuffer")
            .field("chars", &self.rope.len_chars())
            .field("lines", &self.rope.len_lines())
            .field("cursor", &self.cursor)
            .finish()
    }
}
