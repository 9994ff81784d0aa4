//! Single-line input buffer for the message being typed.

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineEditor {
    buffer: String,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn append_char(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// Remove the last character. No-op on an empty buffer.
    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Take the current line, leaving the buffer empty.
    pub fn submit(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_then_submit() {
        let mut editor = LineEditor::new();
        editor.append_char('h');
        editor.append_char('i');
        assert_eq!(editor.submit(), "hi");
        assert!(editor.is_empty());
    }

    #[test]
    fn test_double_submit_yields_empty_twice() {
        let mut editor = LineEditor::new();
        assert_eq!(editor.submit(), "");
        assert_eq!(editor.submit(), "");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut editor = LineEditor::new();
        editor.backspace();
        assert_eq!(editor.as_str(), "");
    }

    #[test]
    fn test_backspace_removes_whole_char() {
        let mut editor = LineEditor::new();
        for c in "año ☕".chars() {
            editor.append_char(c);
        }
        editor.backspace();
        assert_eq!(editor.as_str(), "año ");
        editor.backspace();
        editor.backspace();
        assert_eq!(editor.as_str(), "añ");
    }
}
