//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Piece};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::fx::{EffectLayer, FlashKind};
use crate::types::{Color, GameStatus};

/// High-score rows shown on the end-of-round overlay
pub const OVERLAY_SCORE_ROWS: usize = 5;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const OVERLAY_W: u16 = 26;
/// Columns reserved right of the board when centering
const PANEL_W: u16 = 20;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// One row of the high-score table as the view shows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreLine {
    pub name: String,
    pub score: u32,
}

/// Presentation state that lives outside the engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewExtras<'a> {
    /// Best scores first; only the top rows are drawn
    pub high_scores: &'a [ScoreLine],
    /// Text typed so far while the name prompt is open
    pub name_prompt: Option<&'a str>,
    pub effects: Option<&'a EffectLayer>,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

/// Board placement within the viewport
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        extras: &ViewExtras<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = snap.width.saturating_mul(self.cell_w);
        let board_px_h = snap.height.saturating_mul(self.cell_h);
        let (frame_w, frame_h) = (board_px_w + 2, board_px_h + 2);
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w + PANEL_W) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
            w: frame_w,
            h: frame_h,
        };

        let bg = CellStyle::plain(Rgb::new(80, 80, 90), BOARD_BG);
        let border = CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG);

        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);
        draw_border(fb, frame.x, frame.y, frame.w, frame.h, border);

        // Placed cells.
        for y in 0..snap.height as i16 {
            for x in 0..snap.width as i16 {
                match snap.cell(x, y) {
                    Some(Some(color)) => self.draw_block(fb, frame, x, y, color.into(), true),
                    _ => self.draw_empty_cell(fb, frame, x, y),
                }
            }
        }

        if let Some(effects) = extras.effects {
            self.draw_effects(fb, frame, snap, effects);
        }

        if let Some(piece) = snap.current {
            self.draw_piece(fb, frame, snap, &piece);
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if let Some(text) = extras.name_prompt {
            self.draw_name_prompt(fb, frame, snap, text);
            return;
        }
        match snap.status {
            GameStatus::Playing => {}
            GameStatus::Paused => {
                let lines = [("PAUSED", true), ("P to resume", false)];
                draw_overlay(fb, frame, &lines, &[]);
            }
            GameStatus::GameOver | GameStatus::Won => {
                self.draw_round_over(fb, frame, snap, extras.high_scores);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, &ViewExtras::default(), viewport, &mut fb);
        fb
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i16, y: i16) {
        let style = CellStyle::plain(Rgb::new(90, 90, 100), BOARD_BG).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: i16, y: i16, fg: Rgb, bold: bool) {
        let style = CellStyle {
            bold,
            ..CellStyle::plain(fg, BOARD_BG)
        };
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, frame: Frame, snap: &GameSnapshot, piece: &Piece) {
        for (x, y) in piece.cells() {
            // Rows above the grid are legal for a falling piece but not drawn.
            if y < 0 || x < 0 || x >= snap.width as i16 || y >= snap.height as i16 {
                continue;
            }
            self.draw_block(fb, frame, x, y, piece.color.into(), true);
        }
    }

    fn draw_effects(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        snap: &GameSnapshot,
        effects: &EffectLayer,
    ) {
        for flash in effects.flashes() {
            if flash.x < 0
                || flash.y < 0
                || flash.x >= snap.width as i16
                || flash.y >= snap.height as i16
            {
                continue;
            }
            let fg = Rgb::from(flash.color).lighten(flash.intensity() / 2);
            match flash.kind {
                FlashKind::Landed => self.draw_block(fb, frame, flash.x, flash.y, fg, true),
                FlashKind::Cleared => {
                    // Only fade over cells that are empty again.
                    if matches!(snap.cell(flash.x, flash.y), Some(None)) {
                        let style = CellStyle::plain(fg, BOARD_BG).dim();
                        self.fill_cell_rect(fb, frame, flash.x, flash.y, '▒', style);
                    }
                }
            }
        }
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: i16,
        cell_y: i16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x as u16 * self.cell_w;
        let py = frame.y + 1 + cell_y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::plain(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TARGET", label);
        y = y.saturating_add(1);
        let used = fb.put_u32(panel_x, y, snap.target_score, value);
        if panel_w >= 16 {
            let dim = value.dim();
            fb.put_char(panel_x + used + 1, y, '(', dim);
            let pct = (snap.target_progress() * 100.0) as u32;
            let n = fb.put_u32(panel_x + used + 2, y, pct, dim);
            fb.put_str(panel_x + used + 2 + n, y, "%)", dim);
        }
        y = y.saturating_add(1);
        draw_progress_bar(fb, panel_x, y, 10.min(panel_w), snap.target_progress());
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TIME", label);
        y = y.saturating_add(1);
        // The clock only warns while it can still run out.
        let time_style = if snap.playable() && snap.time_remaining_secs <= 10 {
            CellStyle::plain(Rgb::from(Color::Tomato), SCREEN_BG).bold()
        } else {
            value
        };
        fb.put_str(panel_x, y, &format_clock(snap.time_remaining_secs), time_style);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.lines_cleared, value);
        y = y.saturating_add(2);

        if snap.combo > 1 {
            let combo = CellStyle::plain(Rgb::from(Color::Gold), SCREEN_BG).bold();
            fb.put_str(panel_x, y, "COMBO x", combo);
            fb.put_u32(panel_x + 7, y, snap.combo, combo);
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = snap.next {
            for (dx, dy) in next.shape.cells() {
                let style = CellStyle::plain(next.color.into(), SCREEN_BG).bold();
                let px = panel_x + dx as u16 * self.cell_w;
                let py = y + dy as u16 * self.cell_h;
                if py < viewport.height {
                    fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
                }
            }
        }
    }

    fn draw_round_over(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        snap: &GameSnapshot,
        high_scores: &[ScoreLine],
    ) {
        let title = if snap.status == GameStatus::Won {
            "YOU WON!"
        } else {
            "GAME OVER"
        };
        let final_score = format!("SCORE {}", snap.score);
        let rows: Vec<String> = high_scores
            .iter()
            .take(OVERLAY_SCORE_ROWS)
            .enumerate()
            .map(|(i, line)| format_score_line(i + 1, line))
            .collect();

        let mut lines: Vec<(&str, bool)> = vec![(title, true), (&final_score, false), ("", false)];
        if !rows.is_empty() {
            lines.push(("HIGH SCORES", true));
            lines.extend(rows.iter().map(|r| (r.as_str(), false)));
        }
        draw_overlay(fb, frame, &lines, &[("", false), ("R restart  Q quit", false)]);
    }

    fn draw_name_prompt(&self, fb: &mut FrameBuffer, frame: Frame, snap: &GameSnapshot, text: &str) {
        let final_score = format!("SCORE {}", snap.score);
        let field = format!("{}_", text);
        let lines = [
            ("YOU WON!", true),
            (final_score.as_str(), false),
            ("", false),
            ("ENTER YOUR NAME", true),
            (field.as_str(), false),
        ];
        draw_overlay(fb, frame, &lines, &[("", false), ("Enter to save", false)]);
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_progress_bar(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, progress: f32) {
    let filled = ((w as f32) * progress.clamp(0.0, 1.0)).round() as u16;
    let on = CellStyle::plain(Rgb::from(Color::LimeGreen), SCREEN_BG);
    let off = CellStyle::plain(Rgb::new(70, 70, 80), SCREEN_BG);
    for i in 0..w {
        if i < filled {
            fb.put_char(x + i, y, '█', on);
        } else {
            fb.put_char(x + i, y, '░', off);
        }
    }
}

/// Centered box over the board: `body` from the top, `footer` appended below it.
fn draw_overlay(fb: &mut FrameBuffer, frame: Frame, body: &[(&str, bool)], footer: &[(&str, bool)]) {
    let total = (body.len() + footer.len()) as u16 + 2;
    let w = OVERLAY_W.max(frame.w);
    let x = frame.x.saturating_sub((w - frame.w) / 2);
    let y = frame.y + frame.h.saturating_sub(total) / 2;

    let boxed = CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG);
    fb.fill_rect(x, y, w, total, ' ', boxed);
    draw_border(fb, x, y, w, total, boxed);

    let heading = CellStyle::plain(Rgb::new(255, 255, 255), SCREEN_BG).bold();
    for (i, (text, bold)) in body.iter().chain(footer.iter()).enumerate() {
        let style = if *bold { heading } else { boxed };
        fb.put_str_centered(x, w, y + 1 + i as u16, text, style);
    }
}

/// `mm:ss`
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn format_score_line(rank: usize, line: &ScoreLine) -> String {
    let name: String = line.name.chars().take(12).collect();
    format!("{}. {:<12} {:>6}", rank, name, line.score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, GameState};

    fn screen_text(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| fb.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn started() -> GameState {
        let mut g = GameState::new(GameConfig::default(), 1).unwrap();
        g.tick(16);
        g
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(180), "03:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(0), "00:00");
    }

    #[test]
    fn renders_board_and_panel() {
        let g = started();
        let fb = GameView::default().render(&g.snapshot(), Viewport::new(80, 24));
        let text = screen_text(&fb);
        assert!(text.contains("SCORE"));
        assert!(text.contains("TARGET"));
        assert!(text.contains("03:00"));
        assert!(text.contains("NEXT"));
        assert!(!text.contains("COMBO"));
        // The falling piece is visible.
        assert!(text.contains('█'));
    }

    fn clock_fg(fb: &FrameBuffer, clock: &str) -> Option<Rgb> {
        (0..fb.height()).find_map(|y| {
            let row: Vec<char> = fb.row_text(y).chars().collect();
            let needle: Vec<char> = clock.chars().collect();
            let x = row.windows(needle.len()).position(|w| w == needle.as_slice())?;
            fb.get(x as u16, y).map(|c| c.style.fg)
        })
    }

    #[test]
    fn low_time_is_red_only_while_playing() {
        let red = Rgb::from(Color::Tomato);
        let mut snap = started().snapshot();
        snap.time_remaining_secs = 5;
        let fb = GameView::default().render(&snap, Viewport::new(80, 24));
        assert_eq!(clock_fg(&fb, "00:05"), Some(red));

        snap.status = GameStatus::Paused;
        let fb = GameView::default().render(&snap, Viewport::new(80, 24));
        assert_ne!(clock_fg(&fb, "00:05"), Some(red));
    }

    #[test]
    fn combo_shown_only_above_one() {
        let g = started();
        let mut snap = g.snapshot();
        snap.combo = 3;
        let text = screen_text(&GameView::default().render(&snap, Viewport::new(80, 24)));
        assert!(text.contains("COMBO x3"));
    }

    #[test]
    fn paused_overlay() {
        let mut g = started();
        g.toggle_pause();
        let text = screen_text(&GameView::default().render(&g.snapshot(), Viewport::new(80, 24)));
        assert!(text.contains("PAUSED"));
    }

    #[test]
    fn round_over_lists_top_scores() {
        let g = started();
        let mut snap = g.snapshot();
        snap.status = GameStatus::GameOver;
        snap.current = None;
        let scores: Vec<ScoreLine> = (0..7)
            .map(|i| ScoreLine {
                name: format!("p{}", i),
                score: 1000 - i * 100,
            })
            .collect();
        let extras = ViewExtras {
            high_scores: &scores,
            ..ViewExtras::default()
        };
        let mut fb = FrameBuffer::new(1, 1);
        GameView::default().render_into(&snap, &extras, Viewport::new(80, 30), &mut fb);
        let text = screen_text(&fb);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("HIGH SCORES"));
        assert!(text.contains("p4"));
        assert!(!text.contains("p5"));
        assert!(text.contains("R restart"));
    }

    #[test]
    fn name_prompt_replaces_round_overlay() {
        let g = started();
        let mut snap = g.snapshot();
        snap.status = GameStatus::Won;
        let extras = ViewExtras {
            name_prompt: Some("ada"),
            ..ViewExtras::default()
        };
        let mut fb = FrameBuffer::new(1, 1);
        GameView::default().render_into(&snap, &extras, Viewport::new(80, 30), &mut fb);
        let text = screen_text(&fb);
        assert!(text.contains("ENTER YOUR NAME"));
        assert!(text.contains("ada_"));
        assert!(!text.contains("R restart"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let g = started();
        let fb = GameView::default().render(&g.snapshot(), Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
