//! A read cursor over a buffer that grows one chunk at a time.
//!
//! The buffer holds only what hasn't been harvested yet:
//! the span consumed since the last commit, plus any unread text.
//! Appending a chunk drops everything before the commit point.

/// A 1-indexed line and column in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug)]
pub struct Cursor {
    buffer: String,
    // Byte offset of the commit point; start of the current span.
    mark: usize,
    // Byte offset of the next unread character.
    offset: usize,

    // Line number, from 1.
    line: usize,
    // Columns consumed on the current line.
    column: usize,
    // Column count of the previous line, for rewinding over a newline.
    last_column: usize,
    // Last character consumed, if it can still be rewound.
    last: Option<char>,
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor {
            buffer: String::new(),
            mark: 0,
            offset: 0,
            line: 1,
            column: 0,
            last_column: 0,
            last: None,
        }
    }
}

impl Cursor {
    /// Add a chunk of input.
    ///
    /// Text already harvested or discarded is dropped;
    /// the in-progress span and unread text are kept ahead of the new chunk.
    pub fn append(&mut self, chunk: &str) {
        self.buffer.drain(..self.mark);
        self.offset -= self.mark;
        self.mark = 0;
        self.buffer.push_str(chunk);
    }

    /// The next character, without consuming it.
    /// None if the buffer is exhausted; more may arrive later.
    pub fn peek(&self) -> Option<char> {
        self.buffer[self.offset..].chars().next()
    }

    /// Consume the next character.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.last_column = self.column;
            self.column = 0;
        } else {
            self.column += 1;
        }
        self.last = Some(c);
        Some(c)
    }

    /// Undo the most recent `advance`.
    ///
    /// Only one step of rewind is kept; a second call is a no-op.
    pub fn retreat(&mut self) {
        let Some(c) = self.last.take() else {
            return;
        };
        debug_assert!(self.offset - c.len_utf8() >= self.mark);
        self.offset -= c.len_utf8();
        if c == '\n' {
            self.line -= 1;
            self.column = self.last_column;
        } else {
            self.column -= 1;
        }
    }

    /// Harvest the text consumed since the last commit, and commit.
    pub fn commit_span(&mut self) -> String {
        let span = self.buffer[self.mark..self.offset].to_owned();
        self.mark = self.offset;
        span
    }

    /// Commit without harvesting.
    pub fn discard_span(&mut self) {
        self.mark = self.offset;
    }

    /// Position of the next character to be read.
    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column + 1,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.buffer.len()
    }

    /// Bytes retained in the buffer; harvested text is not counted.
    pub fn retained(&self) -> usize {
        self.buffer.len() - self.mark
    }
}
