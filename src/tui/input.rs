/// Single-line prompt used to type a hex color.
pub struct PromptState {
    /// Whether the prompt is open and capturing keys.
    pub active: bool,
    /// Current input text.
    pub text: String,
    /// Cursor position (byte offset).
    pub cursor: usize,
}

/// Longest accepted entry: `#RRGGBB`.
const MAX_LEN: usize = 7;

impl PromptState {
    pub fn new() -> Self {
        Self {
            active: false,
            text: String::new(),
            cursor: 0,
        }
    }

    /// Open the prompt pre-filled with `initial`, cursor at the end.
    pub fn open(&mut self, initial: &str) {
        self.active = true;
        self.text = initial.to_string();
        self.cursor = self.text.len();
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.clear();
    }

    /// Only hex digits and a leading '#' are accepted.
    pub fn insert(&mut self, ch: char) {
        let allowed = ch.is_ascii_hexdigit() || (ch == '#' && self.cursor == 0 && !self.text.starts_with('#'));
        if allowed && self.text.len() < MAX_LEN {
            self.text.insert(self.cursor, ch);
            self.cursor += ch.len_utf8();
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            // Find the previous character boundary
            let prev = self.text[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor += self.text[self.cursor..].chars().next().map(|c| c.len_utf8()).unwrap_or(0);
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Close the prompt and return what was typed.
    pub fn submit(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        self.cursor = 0;
        self.active = false;
        text
    }
}

impl Default for PromptState {
    fn default() -> Self {
        Self::new()
    }
}
