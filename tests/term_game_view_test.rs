use teratis::core::{Effect, GameConfig, GameState};
use teratis::term::{EffectLayer, FrameBuffer, GameView, ViewExtras, Viewport};
use teratis::types::{Color, GameStatus};

// With cell_w=2 and cell_h=1 a 10x20 board is 20x20 characters, 22x22 with the
// border. A 42-column viewport leaves the board at x=0 once the side panel
// reservation is subtracted.
const VP: Viewport = Viewport {
    width: 42,
    height: 22,
};

fn fresh() -> GameState {
    GameState::new(GameConfig::default(), 1).unwrap()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = fresh().snapshot();
    let fb = GameView::default().render(&snap, VP);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_placed_cell_as_two_chars_wide() {
    let mut state = fresh();
    state.grid_mut().set(0, 19, Some(Color::Tomato));
    let snap = state.snapshot();

    let fb = GameView::default().render(&snap, VP);
    let (x0, y0) = (1, 1 + 19);
    let cell = fb.get(x0, y0).unwrap();
    assert_eq!(cell.ch, '█');
    assert_eq!((cell.style.fg.r, cell.style.fg.g, cell.style.fg.b), Color::Tomato.rgb());
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_skips_piece_cells_above_grid() {
    let mut state = fresh();
    state.tick(16);
    let mut snap = state.snapshot();
    let mut piece = snap.current.unwrap();
    piece.y = -10;
    snap.current = Some(piece);

    let fb = GameView::default().render(&snap, VP);
    for y in 1..21 {
        for x in 1..21 {
            assert_ne!(fb.get(x, y).unwrap().ch, '█');
        }
    }
}

#[test]
fn term_view_resizes_reused_framebuffer() {
    let snap = fresh().snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(10, 10);
    view.render_into(&snap, &ViewExtras::default(), Viewport::new(80, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (80, 24));
}

#[test]
fn term_view_draws_clear_flash_on_empty_cells() {
    let snap = fresh().snapshot();
    let mut layer = EffectLayer::new();
    layer.absorb([Effect::LineCleared {
        cells: vec![(3, 19, Color::Gold)],
    }]);
    let extras = ViewExtras {
        effects: Some(&layer),
        ..ViewExtras::default()
    };
    let mut fb = FrameBuffer::new(1, 1);
    GameView::default().render_into(&snap, &extras, VP, &mut fb);
    assert_eq!(fb.get(1 + 3 * 2, 20).unwrap().ch, '▒');
}

#[test]
fn term_view_won_overlay() {
    let mut snap = fresh().snapshot();
    snap.status = GameStatus::Won;
    let fb = GameView::default().render(&snap, Viewport::new(80, 24));
    let text: Vec<String> = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    assert!(text.iter().any(|row| row.contains("YOU WON!")));
}
