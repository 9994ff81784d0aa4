//! # Transcript
//!
//! The `(sender, text)` history of the open conversation, pre-wrapped into
//! display rows for a region of fixed width and height.
//!
//! The write cursor is the row the next entry starts on. When it runs past
//! the region's height, older rows scroll off the top so the newest row sits
//! on the bottom line. Entries are never dropped: a resize re-wraps all of
//! them.

use std::fmt;

/// The write cursor ran past the visible region and the view scrolled.
///
/// The entry that caused it was still recorded; `hidden_rows` is how many
/// rows now sit above the top of the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverflowError {
    pub hidden_rows: usize,
}

impl fmt::Display for OverflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transcript overflow: {} rows scrolled out of view",
            self.hidden_rows
        )
    }
}

impl std::error::Error for OverflowError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub sender: String,
    pub text: String,
}

/// One display row. `sender_len` is the byte length of a leading
/// `"sender:"` label (0 on continuation rows).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptRow {
    pub text: String,
    pub sender_len: usize,
}

#[derive(Debug, Default)]
pub struct Transcript {
    conversation_id: Option<String>,
    entries: Vec<TranscriptEntry>,
    rows: Vec<TranscriptRow>,
    width: usize,
    height: usize,
}

fn wrap_entry(entry: &TranscriptEntry, width: usize) -> Vec<TranscriptRow> {
    let prefix = format!("{}:", entry.sender);
    let line = format!("{} {}", prefix, entry.text);
    let options = textwrap::Options::new(width.max(1))
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
        .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit);

    let mut rows: Vec<TranscriptRow> = textwrap::wrap(&line, options)
        .into_iter()
        .map(|row| TranscriptRow {
            text: row.into_owned(),
            sender_len: 0,
        })
        .collect();

    match rows.first_mut() {
        Some(first) if first.text.starts_with(&prefix) => first.sender_len = prefix.len(),
        Some(_) => {}
        None => rows.push(TranscriptRow {
            text: String::new(),
            sender_len: 0,
        }),
    }
    rows
}

impl Transcript {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Empty the buffer and bind it to a conversation.
    pub fn reset(&mut self, conversation_id: Option<String>) {
        self.conversation_id = conversation_id;
        self.entries.clear();
        self.rows.clear();
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Row the next entry will be written at.
    pub fn write_cursor(&self) -> usize {
        self.rows.len()
    }

    /// Rows scrolled above the top of the region.
    pub fn scroll_top(&self) -> usize {
        self.rows.len().saturating_sub(self.height)
    }

    /// The rows that fit in the region, top to bottom.
    pub fn visible_rows(&self) -> &[TranscriptRow] {
        &self.rows[self.scroll_top()..]
    }

    /// Record `"<sender>: <text>"` and advance the write cursor by the
    /// number of wrapped rows it took (at least one).
    pub fn append(&mut self, sender: &str, text: &str) -> Result<(), OverflowError> {
        let entry = TranscriptEntry {
            sender: sender.to_string(),
            text: text.to_string(),
        };
        self.rows.extend(wrap_entry(&entry, self.width));
        self.entries.push(entry);

        if self.rows.len() > self.height {
            Err(OverflowError {
                hidden_rows: self.scroll_top(),
            })
        } else {
            Ok(())
        }
    }

    /// Region size changed: re-wrap every entry.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.rows = self
            .entries
            .iter()
            .flat_map(|entry| wrap_entry(entry, width))
            .collect();
    }
}
