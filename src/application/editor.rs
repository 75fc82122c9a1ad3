//! Plain multi-line text buffer backing the model editor pane.

const INDENT: &str = "  ";

/// Line-oriented document buffer with a single cursor.
///
/// The buffer splits on `'\n'` only, so `text()` always reproduces exactly
/// what `set_text()` received, carriage returns included.
///
/// # Examples
///
/// ```
/// use plantdesk::application::DocumentEditor;
///
/// let mut editor = DocumentEditor::default();
/// editor.set_text("a: 1");
/// editor.move_end();
/// editor.insert_char('0');
/// assert_eq!(editor.text(), "a: 10");
/// ```
#[derive(Debug, Clone)]
pub struct DocumentEditor {
    lines: Vec<String>,
    /// Cursor line (zero-based)
    cursor_row: usize,
    /// Cursor position within the line, in characters
    cursor_col: usize,
    /// First line shown in the viewport
    pub scroll_row: usize,
}

impl Default for DocumentEditor {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_row: 0,
            cursor_col: 0,
            scroll_row: 0,
        }
    }
}

impl DocumentEditor {
    /// Replaces the whole document and moves the cursor to the start.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(String::from).collect();
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.scroll_row = 0;
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    fn byte_index(line: &str, col: usize) -> usize {
        line.char_indices().nth(col).map(|(i, _)| i).unwrap_or(line.len())
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.insert_newline();
            return;
        }
        let line = &mut self.lines[self.cursor_row];
        let idx = Self::byte_index(line, self.cursor_col);
        line.insert(idx, c);
        self.cursor_col += 1;
    }

    /// YAML forbids tabs for indentation, so Tab inserts spaces.
    pub fn insert_indent(&mut self) {
        for c in INDENT.chars() {
            self.insert_char(c);
        }
    }

    pub fn insert_newline(&mut self) {
        let line = &mut self.lines[self.cursor_row];
        let idx = Self::byte_index(line, self.cursor_col);
        let rest = line.split_off(idx);
        self.lines.insert(self.cursor_row + 1, rest);
        self.cursor_row += 1;
        self.cursor_col = 0;
    }

    pub fn backspace(&mut self) {
        if self.cursor_col > 0 {
            let line = &mut self.lines[self.cursor_row];
            let idx = Self::byte_index(line, self.cursor_col - 1);
            line.remove(idx);
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            let current = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = self.line_len(self.cursor_row);
            self.lines[self.cursor_row].push_str(&current);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor_col < self.line_len(self.cursor_row) {
            let line = &mut self.lines[self.cursor_row];
            let idx = Self::byte_index(line, self.cursor_col);
            line.remove(idx);
        } else if self.cursor_row + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_row + 1);
            self.lines[self.cursor_row].push_str(&next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.line_len(self.cursor_row);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor_col < self.line_len(self.cursor_row) {
            self.cursor_col += 1;
        } else if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_row));
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_row));
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_col = self.line_len(self.cursor_row);
    }

    /// Adjusts `scroll_row` so the cursor line is inside a viewport of `height` lines.
    pub fn ensure_cursor_visible(&mut self, height: usize) {
        let height = height.max(1);
        if self.cursor_row < self.scroll_row {
            self.scroll_row = self.cursor_row;
        } else if self.cursor_row >= self.scroll_row + height {
            self.scroll_row = self.cursor_row + 1 - height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(text: &str) -> DocumentEditor {
        let mut editor = DocumentEditor::default();
        editor.set_text(text);
        editor
    }

    #[test]
    fn test_default_is_empty() {
        let editor = DocumentEditor::default();
        assert!(editor.is_empty());
        assert_eq!(editor.text(), "");
        assert_eq!(editor.cursor(), (0, 0));
    }

    #[test]
    fn test_set_text_round_trips() {
        for text in ["", "a: 1", "a: 1\n", "\n\n", "x: 1\r\ny: 2\r\n", "名前: 工場"] {
            assert_eq!(editor_with(text).text(), text);
        }
    }

    #[test]
    fn test_typing_and_newline() {
        let mut editor = DocumentEditor::default();
        for c in "a: 1\nb: 2".chars() {
            editor.insert_char(c);
        }
        assert_eq!(editor.text(), "a: 1\nb: 2");
        assert_eq!(editor.cursor(), (1, 4));
    }

    #[test]
    fn test_newline_splits_line() {
        let mut editor = editor_with("ab");
        editor.move_right();
        editor.insert_newline();
        assert_eq!(editor.lines(), &["a".to_string(), "b".to_string()]);
        assert_eq!(editor.cursor(), (1, 0));
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut editor = editor_with("a\nb");
        editor.move_down();
        editor.backspace();
        assert_eq!(editor.text(), "ab");
        assert_eq!(editor.cursor(), (0, 1));
        editor.backspace();
        editor.backspace();
        assert_eq!(editor.text(), "b");
    }

    #[test]
    fn test_delete_joins_next_line() {
        let mut editor = editor_with("a\nb");
        editor.move_end();
        editor.delete();
        assert_eq!(editor.text(), "ab");
        editor.move_home();
        editor.delete();
        assert_eq!(editor.text(), "b");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut editor = editor_with("ünï");
        editor.move_right();
        editor.insert_char('x');
        assert_eq!(editor.text(), "üxnï");
        editor.move_end();
        editor.backspace();
        assert_eq!(editor.text(), "üxn");
    }

    #[test]
    fn test_vertical_motion_clamps_column() {
        let mut editor = editor_with("long line\nab");
        editor.move_end();
        editor.move_down();
        assert_eq!(editor.cursor(), (1, 2));
        editor.move_up();
        assert_eq!(editor.cursor(), (0, 2));
    }

    #[test]
    fn test_horizontal_motion_wraps() {
        let mut editor = editor_with("a\nb");
        editor.move_end();
        editor.move_right();
        assert_eq!(editor.cursor(), (1, 0));
        editor.move_left();
        assert_eq!(editor.cursor(), (0, 1));
    }

    #[test]
    fn test_indent_uses_spaces() {
        let mut editor = DocumentEditor::default();
        editor.insert_indent();
        editor.insert_char('-');
        assert_eq!(editor.text(), "  -");
    }

    #[test]
    fn test_ensure_cursor_visible() {
        let mut editor = editor_with(&"x\n".repeat(30));
        for _ in 0..20 {
            editor.move_down();
        }
        editor.ensure_cursor_visible(10);
        assert_eq!(editor.scroll_row, 11);
        for _ in 0..20 {
            editor.move_up();
        }
        editor.ensure_cursor_visible(10);
        assert_eq!(editor.scroll_row, 0);
    }
}
