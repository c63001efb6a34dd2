//! Owns the real terminal: raw mode, the alternate screen and frame output.
//!
//! Frames are encoded into a byte buffer with crossterm's queueable commands and
//! written in one flush. A frame whose size differs from the last one sent is
//! repainted whole; otherwise only the changed runs of each row go out.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};
use tracing::debug;

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    /// Whether the terminal agreed to report key releases.
    release_events: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            release_events: false,
        }
    }

    /// Enter raw mode and the alternate screen.
    ///
    /// Key-release reporting is requested when the terminal supports the keyboard
    /// enhancement protocol; otherwise soft drop relies on the release timeout.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        if self.release_events {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.flush_buf()?;
        debug!(release_events = self.release_events, "terminal entered");
        Ok(())
    }

    pub fn release_events(&self) -> bool {
        self.release_events
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.release_events {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget the last frame so the next draw repaints everything (after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Send `fb` to the terminal, then hand the caller a spare buffer in its place.
    ///
    /// The drawn frame is kept for the next diff; `fb` comes back holding the previous
    /// frame's storage, ready to be rendered over.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        match self.last.as_ref().filter(|last| same_size(last, fb)) {
            Some(last) => encode_diff_into(last, fb, &mut self.buf)?,
            None => encode_full_into(fb, &mut self.buf)?,
        }
        self.flush_buf()?;

        let mut spare = self
            .last
            .take()
            .unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        spare.resize(fb.width(), fb.height());
        std::mem::swap(&mut spare, fb);
        self.last = Some(spare);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

/// Queues cells into a byte buffer, emitting style changes only when the style differs
/// from the previous cell written.
struct StyledOut<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> StyledOut<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn cell(&mut self, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            self.out.queue(SetForegroundColor(to_crossterm(cell.style.fg)))?;
            self.out.queue(SetBackgroundColor(to_crossterm(cell.style.bg)))?;
            self.out.queue(SetAttribute(Attribute::Reset))?;
            if cell.style.bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            if cell.style.dim {
                self.out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(cell.style);
        }
        self.out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn raw(&mut self, text: &str) -> Result<()> {
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        Ok(())
    }

    /// Leave the terminal with default colors and attributes.
    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Clear the screen and queue every cell of `fb`, row by row.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut w = StyledOut::new(out);
    w.move_to(0, 0)?;
    for y in 0..fb.height() {
        if y > 0 {
            w.raw("\r\n")?;
        }
        for x in 0..fb.width() {
            w.cell(fb.get(x, y).unwrap_or_default())?;
        }
    }
    w.finish()
}

/// Queue only the cells of `next` that differ from `prev`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut w = StyledOut::new(out);
    for_each_changed_run(prev, next, |x, y, len| {
        w.move_to(x, y)?;
        (x..x + len).try_for_each(|cx| w.cell(next.get(cx, y).unwrap_or_default()))
    })?;
    w.finish()
}

fn to_crossterm(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Call `f(x, y, len)` for each maximal horizontal run of differing cells.
///
/// Frames of different sizes are reported as one run per full row.
fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let width = next.width();
    if !same_size(prev, next) {
        return (0..next.height()).try_for_each(|y| f(0, y, width));
    }

    for y in 0..next.height() {
        let mut run_start = None;
        // One step past the last column closes a run that reaches the edge.
        for x in 0..=width {
            let dirty = x < width && prev.get(x, y) != next.get(x, y);
            match (run_start, dirty) {
                (None, true) => run_start = Some(x),
                (Some(start), false) => {
                    f(start, y, x - start)?;
                    run_start = None;
                }
                _ => {}
            }
        }
    }
    Ok(())
}
