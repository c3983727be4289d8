use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};

use crate::Cell;

/// Terminal column/row pair, 0-based.
pub type TermPos = (u16, u16);

/// Draws the field on the terminal. Field cells are 1-indexed, so cell
/// `(x, y)` lands on terminal column `x`, row `y`, with the border on
/// column/row 0 and `field_size + 1`.
pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: TermPos,
    width: u16,
    height: u16,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("reading terminal size")?;
        let screen = vec![' '; width as usize * height as usize];
        Ok(TermManager { width, height, stdout: stdout(), screen, current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("entering alternate screen")?;
        terminal::enable_raw_mode().context("enabling raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("disabling raw mode")?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking)?;
        execute!(self.stdout, LeaveAlternateScreen).context("leaving alternate screen")?;
        Ok(())
    }

    pub fn size(&self) -> TermPos {
        (self.width, self.height)
    }

    /// Largest square field whose border still fits on screen.
    pub fn max_field_size(&self) -> u16 {
        self.width.min(self.height).saturating_sub(2)
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    /// Drains every pending key event without blocking.
    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn draw_borders(&mut self, field_size: u16) -> Result<()> {
        let end = field_size + 1;

        for x in 0..=end {
            let ch = if x == 0 || x == end { '+' } else { '-' };
            self.print_at((x, 0), ch)?;
            self.print_at((x, end), ch)?;
        }

        for y in 1..end {
            self.print_at((0, y), '|')?;
            self.print_at((end, y), '|')?;
        }

        self.flush()
    }

    pub fn print_cell(&mut self, cell: Cell, ch: char) -> Result<()> {
        self.print_at((cell.x, cell.y), ch)
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as u16;
        let msg_width = (lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2) as u16;
        let center = (self.width / 2, self.height / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        for y in [top_left.1, top_left.1 + msg_height - 1] {
            for dx in 0..msg_width {
                self.print_overlay((top_left.0 + dx, y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{: ^width$}", line, width = msg_width as usize);
            let y = top_left.1 + i as u16 + 1;
            for (dx, ch) in padded.chars().enumerate() {
                self.print_overlay((top_left.0 + dx as u16, y), ch)?;
            }
        }

        self.current_msg = Some(Message { top_left, width: msg_width, height: msg_height });
        self.flush()
    }

    /// Puts back whatever the message box was covering.
    pub fn hide_message(&mut self) -> Result<()> {
        let Some(msg) = self.current_msg.take() else {
            return Ok(());
        };

        for dy in 0..msg.height {
            for dx in 0..msg.width {
                let pos = (msg.top_left.0 + dx, msg.top_left.1 + dy);
                if let Some(&ch) = self.screen.get(self.offset(pos)) {
                    self.print_overlay(pos, ch)?;
                }
            }
        }

        self.flush()
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("clearing screen")?;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        self.current_msg = None;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("flushing stdout")
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn offset(&self, pos: TermPos) -> usize {
        self.width as usize * pos.1 as usize + pos.0 as usize
    }

    fn print_at(&mut self, pos: TermPos, ch: char) -> Result<()> {
        self.print_overlay(pos, ch)?;
        let offset = self.offset(pos);
        if let Some(slot) = self.screen.get_mut(offset) {
            *slot = ch;
        }
        Ok(())
    }

    // Message boxes draw through here so the screen buffer keeps what lies
    // underneath them.
    fn print_overlay(&mut self, pos: TermPos, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }
}
