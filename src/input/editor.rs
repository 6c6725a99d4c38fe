use std::io::{self, Read, Write};

use super::history::{self, HistoryRing};
use super::term::RawModeGuard;
use crate::process::signal;

/// Matches the input ceiling the terminal driver would otherwise impose.
const MAX_LINE: usize = 1024;

pub enum ReadOutcome {
    Line(String),
    EndOfInput,
}

enum Step {
    Continue,
    Commit,
    EndOfInput,
}

/// Bounded edit buffer plus the cursor offset, scoped to one editing
/// cycle. Content is printable ASCII, so byte offsets are column offsets.
struct LineBuffer {
    content: String,
    cursor: usize,
}

impl LineBuffer {
    fn new() -> Self {
        LineBuffer {
            content: String::new(),
            cursor: 0,
        }
    }

    fn insert(&mut self, c: char) -> bool {
        if self.content.len() >= MAX_LINE {
            return false;
        }
        self.content.insert(self.cursor, c);
        self.cursor += 1;
        true
    }

    fn delete_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.content.remove(self.cursor);
        true
    }

    fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    fn move_right(&mut self) -> bool {
        if self.cursor >= self.content.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    fn replace_with(&mut self, text: &str) {
        self.content.clear();
        self.content.push_str(text);
        self.content.truncate(MAX_LINE);
        self.cursor = self.content.len();
    }

    fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Raw-terminal line editor producing one committed line per cycle.
pub struct LineEditor {
    history: HistoryRing,
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl LineEditor {
    pub fn new() -> Self {
        LineEditor {
            history: HistoryRing::new(history::DEFAULT_CAPACITY),
        }
    }

    /// Reads one line in raw mode. The mode guard restores the terminal on
    /// every path out of the loop; an interrupt clears the partial line
    /// and resumes prompting, never ending the session.
    ///
    /// When stdin is not a terminal (piped input) there is nothing to put
    /// into raw mode; lines are consumed as-is, with no editing.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<ReadOutcome> {
        if unsafe { libc::isatty(libc::STDIN_FILENO) } == 0 {
            return self.read_line_plain(prompt);
        }

        let _guard = RawModeGuard::new()?;
        let mut stdin = io::stdin().lock();
        let mut stdout = io::stdout();
        let mut buffer = LineBuffer::new();

        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        loop {
            let byte = match read_byte(&mut stdin) {
                Ok(Some(byte)) => byte,
                Ok(None) => {
                    write!(stdout, "\r\n")?;
                    stdout.flush()?;
                    return Ok(ReadOutcome::EndOfInput);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                    // the handler already moved us to a fresh line
                    signal::take_interrupt();
                    buffer.clear();
                    self.history.stop_browsing();
                    write!(stdout, "{}", prompt)?;
                    stdout.flush()?;
                    continue;
                }
                Err(e) => return Err(e),
            };

            match self.handle_byte(byte, &mut stdin, &mut stdout, prompt, &mut buffer)? {
                Step::Continue => {}
                Step::Commit => break,
                Step::EndOfInput => {
                    write!(stdout, "\r\n")?;
                    stdout.flush()?;
                    return Ok(ReadOutcome::EndOfInput);
                }
            }
        }

        write!(stdout, "\r\n")?;
        stdout.flush()?;

        self.history.stop_browsing();
        let line = buffer.content.trim().to_string();
        self.history.add(&line);
        Ok(ReadOutcome::Line(line))
    }

    fn handle_byte(
        &mut self,
        byte: u8,
        stdin: &mut impl Read,
        stdout: &mut impl Write,
        prompt: &str,
        buffer: &mut LineBuffer,
    ) -> io::Result<Step> {
        match byte {
            b'\r' | b'\n' => return Ok(Step::Commit),
            0x7f | 0x08 => {
                if buffer.delete_before_cursor() {
                    redraw(stdout, prompt, buffer)?;
                }
            }
            0x1b => self.handle_escape(stdin, stdout, prompt, buffer)?,
            // Ctrl-D on an empty line ends the session, as the line
            // discipline would have done in canonical mode
            0x04 if buffer.is_empty() => return Ok(Step::EndOfInput),
            byte if (0x20..=0x7e).contains(&byte) => {
                self.history.stop_browsing();
                if buffer.insert(byte as char) {
                    redraw(stdout, prompt, buffer)?;
                }
            }
            _ => {}
        }
        Ok(Step::Continue)
    }

    /// Escape introducer plus exactly two bytes; anything but a recognized
    /// `[A`/`[B`/`[C`/`[D` sequence is swallowed.
    fn handle_escape(
        &mut self,
        stdin: &mut impl Read,
        stdout: &mut impl Write,
        prompt: &str,
        buffer: &mut LineBuffer,
    ) -> io::Result<()> {
        let first = match read_byte(stdin) {
            Ok(Some(byte)) => byte,
            _ => return Ok(()),
        };
        let second = match read_byte(stdin) {
            Ok(Some(byte)) => byte,
            _ => return Ok(()),
        };
        if first != b'[' {
            return Ok(());
        }

        match second {
            b'A' => {
                if let Some(entry) = self.history.older() {
                    let entry = entry.to_string();
                    buffer.replace_with(&entry);
                    redraw(stdout, prompt, buffer)?;
                }
            }
            b'B' => {
                if self.history.is_browsing() {
                    match self.history.newer() {
                        Some(entry) => {
                            let entry = entry.to_string();
                            buffer.replace_with(&entry);
                        }
                        None => buffer.clear(),
                    }
                    redraw(stdout, prompt, buffer)?;
                }
            }
            b'C' => {
                if buffer.move_right() {
                    redraw(stdout, prompt, buffer)?;
                }
            }
            b'D' => {
                if buffer.move_left() {
                    redraw(stdout, prompt, buffer)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn read_line_plain(&mut self, prompt: &str) -> io::Result<ReadOutcome> {
        let mut stdin = io::stdin().lock();
        let mut stdout = io::stdout();
        let mut content = String::new();

        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        loop {
            match read_byte(&mut stdin) {
                Ok(Some(b'\n')) => break,
                Ok(Some(byte)) => {
                    if content.len() < MAX_LINE {
                        content.push(byte as char);
                    }
                }
                Ok(None) => {
                    if content.is_empty() {
                        return Ok(ReadOutcome::EndOfInput);
                    }
                    break;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                    signal::take_interrupt();
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        let line = content.trim().to_string();
        self.history.add(&line);
        Ok(ReadOutcome::Line(line))
    }
}

fn read_byte(stdin: &mut impl Read) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    match stdin.read(&mut byte)? {
        0 => Ok(None),
        _ => Ok(Some(byte[0])),
    }
}

/// Repaints the edit line as one flushed write: column zero, prompt, erase
/// to end of line, full buffer, cursor walked back to its logical offset.
fn redraw(stdout: &mut impl Write, prompt: &str, buffer: &LineBuffer) -> io::Result<()> {
    let mut frame = format!("\r{}\x1b[K{}", prompt, buffer.content);
    let back = buffer.content.len() - buffer.cursor;
    if back > 0 {
        frame.push_str(&format!("\x1b[{}D", back));
    }
    stdout.write_all(frame.as_bytes())?;
    stdout.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_then_delete_restores_state() {
        let mut buffer = LineBuffer::new();
        for c in "hello".chars() {
            assert!(buffer.insert(c));
        }
        buffer.move_left();
        buffer.move_left();
        let before = (buffer.content.clone(), buffer.cursor);

        assert!(buffer.insert('x'));
        assert!(buffer.delete_before_cursor());

        assert_eq!((buffer.content.clone(), buffer.cursor), before);
    }

    #[test]
    fn test_insert_at_cursor_shifts_remainder() {
        let mut buffer = LineBuffer::new();
        for c in "held".chars() {
            buffer.insert(c);
        }
        buffer.move_left();
        buffer.insert('l');
        assert_eq!(buffer.content, "helld");
        assert_eq!(buffer.cursor, 4);
    }

    #[test]
    fn test_delete_at_column_zero_is_a_no_op() {
        let mut buffer = LineBuffer::new();
        assert!(!buffer.delete_before_cursor());
        buffer.insert('a');
        buffer.move_left();
        assert!(!buffer.delete_before_cursor());
        assert_eq!(buffer.content, "a");
    }

    #[test]
    fn test_cursor_bounded_by_content() {
        let mut buffer = LineBuffer::new();
        buffer.insert('a');
        buffer.insert('b');

        assert!(!buffer.move_right());
        assert!(buffer.move_left());
        assert!(buffer.move_left());
        assert!(!buffer.move_left());
        assert_eq!(buffer.cursor, 0);
    }

    #[test]
    fn test_buffer_bounded() {
        let mut buffer = LineBuffer::new();
        for _ in 0..MAX_LINE {
            assert!(buffer.insert('a'));
        }
        assert!(!buffer.insert('b'));
        assert_eq!(buffer.content.len(), MAX_LINE);
    }

    #[test]
    fn test_replace_with_moves_cursor_to_end() {
        let mut buffer = LineBuffer::new();
        buffer.insert('x');
        buffer.move_left();
        buffer.replace_with("recalled line");
        assert_eq!(buffer.content, "recalled line");
        assert_eq!(buffer.cursor, buffer.content.len());
    }
}
