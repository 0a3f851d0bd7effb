//! Turns a [`WorldSnapshot`] into the ordered draw calls of one frame.
//!
//! Kept free of any browser type so frames can be checked in plain unit
//! tests; [`crate::render`] replays the ops on a canvas.

use crate::config::GameConfig;
use crate::session::Phase;
use crate::world::WorldSnapshot;

const OVERLAY_FILL: &str = "rgba(255,255,255,0.85)";
const TEXT_COLOR: &str = "#1f2328";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear {
        width: f64,
        height: f64,
    },
    /// One path of independent segments, stroked once.
    Stroke {
        color: String,
        segments: Vec<((f64, f64), (f64, f64))>,
    },
    FillRect {
        color: String,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
    /// Text centred vertically on `y`.
    Text {
        text: String,
        font: String,
        color: String,
        x: f64,
        y: f64,
        align: Align,
    },
}

/// Top-left pixel of a cell index on a `width`-wide grid.
pub fn cell_origin(index: u32, width: u32, cell_size: f64) -> (f64, f64) {
    let width = width.max(1);
    let column = index % width;
    let row = index / width;
    (column as f64 * cell_size, row as f64 * cell_size)
}

pub fn build(snap: &WorldSnapshot, cfg: &GameConfig) -> Vec<DrawOp> {
    let cell = cfg.cell_size as f64;
    let width = snap.width.max(1);
    let side = width as f64 * cell;
    let mut ops = vec![DrawOp::Clear {
        width: side,
        height: side,
    }];

    if cfg.show_grid {
        ops.push(grid_lines(width, cell, &cfg.grid_color));
    }

    for (i, &idx) in snap.snake.iter().enumerate() {
        let (x, y) = cell_origin(idx, width, cell);
        let color = if i == 0 { &cfg.head_color } else { &cfg.body_color };
        ops.push(DrawOp::FillRect {
            color: color.clone(),
            x,
            y,
            w: cell,
            h: cell,
        });
    }

    if let Some(idx) = snap.reward_cell {
        ops.push(glyph(&cfg.reward_glyph, idx, width, cell));
    }
    if let Some(idx) = snap.poop_cell {
        ops.push(glyph(&cfg.poop_glyph, idx, width, cell));
    }

    let phase = Phase::from_status(snap.status);
    if phase != Phase::Welcome {
        ops.push(points_readout(snap.points, cell));
    }

    match phase {
        Phase::Welcome => overlay(
            &mut ops,
            side,
            "Poopy Snake",
            &["Click or press Enter to start", "Steer with the arrow keys"],
        ),
        Phase::Won | Phase::Lost => {
            let points = format!("Points: {}", snap.points);
            overlay(
                &mut ops,
                side,
                phase.label(),
                &[points.as_str(), "Click or press Enter to play again"],
            )
        }
        Phase::Playing => {}
    }
    ops
}

fn grid_lines(width: u32, cell: f64, color: &str) -> DrawOp {
    let side = width as f64 * cell;
    let mut segments = Vec::with_capacity(2 * (width as usize + 1));
    for x in 0..=width {
        let px = x as f64 * cell;
        segments.push(((px, 0.0), (px, side)));
    }
    for y in 0..=width {
        let py = y as f64 * cell;
        segments.push(((0.0, py), (side, py)));
    }
    DrawOp::Stroke {
        color: color.to_string(),
        segments,
    }
}

fn glyph(text: &str, idx: u32, width: u32, cell: f64) -> DrawOp {
    let (x, y) = cell_origin(idx, width, cell);
    DrawOp::Text {
        text: text.to_string(),
        font: format!("{}px sans-serif", (cell * 0.8).round()),
        color: TEXT_COLOR.to_string(),
        x: x + cell / 2.0,
        y: y + cell / 2.0,
        align: Align::Center,
    }
}

fn points_readout(points: u32, cell: f64) -> DrawOp {
    let size = (cell * 0.4).max(10.0).round();
    DrawOp::Text {
        text: format!("Points: {}", points),
        font: format!("bold {}px sans-serif", size),
        color: TEXT_COLOR.to_string(),
        x: size * 0.5,
        y: size,
        align: Align::Left,
    }
}

fn overlay(ops: &mut Vec<DrawOp>, side: f64, title: &str, lines: &[&str]) {
    ops.push(DrawOp::FillRect {
        color: OVERLAY_FILL.to_string(),
        x: 0.0,
        y: 0.0,
        w: side,
        h: side,
    });
    let title_px = (side / 10.0).max(12.0).round();
    let line_px = (side / 20.0).max(10.0).round();
    let mut y = side / 2.0 - (lines.len() as f64 * line_px * 1.5) / 2.0;
    ops.push(DrawOp::Text {
        text: title.to_string(),
        font: format!("bold {}px sans-serif", title_px),
        color: TEXT_COLOR.to_string(),
        x: side / 2.0,
        y,
        align: Align::Center,
    });
    y += title_px;
    for line in lines {
        ops.push(DrawOp::Text {
            text: line.to_string(),
            font: format!("{}px sans-serif", line_px),
            color: TEXT_COLOR.to_string(),
            x: side / 2.0,
            y,
            align: Align::Center,
        });
        y += line_px * 1.5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::GameStatus;

    fn snapshot(status: Option<GameStatus>) -> WorldSnapshot {
        WorldSnapshot {
            width: 8,
            snake: vec![10, 9, 8],
            reward_cell: Some(63),
            poop_cell: None,
            points: 4,
            status,
        }
    }

    fn texts(ops: &[DrawOp]) -> Vec<String> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn cell_origin_is_row_major() {
        assert_eq!(cell_origin(0, 8, 40.0), (0.0, 0.0));
        assert_eq!(cell_origin(9, 8, 40.0), (40.0, 40.0));
        assert_eq!(cell_origin(63, 8, 40.0), (280.0, 280.0));
    }

    #[test]
    fn starts_with_clear_then_grid() {
        let ops = build(&snapshot(Some(GameStatus::Played)), &GameConfig::default());
        assert_eq!(
            ops[0],
            DrawOp::Clear {
                width: 320.0,
                height: 320.0
            }
        );
        match &ops[1] {
            DrawOp::Stroke { segments, .. } => {
                assert_eq!(segments.len(), 18);
                assert_eq!(segments[8], ((320.0, 0.0), (320.0, 320.0)));
                assert_eq!(segments[17], ((0.0, 320.0), (320.0, 320.0)));
            }
            other => panic!("expected grid stroke, got {:?}", other),
        }
    }

    #[test]
    fn grid_can_be_hidden() {
        let cfg = GameConfig {
            show_grid: false,
            ..GameConfig::default()
        };
        let ops = build(&snapshot(Some(GameStatus::Played)), &cfg);
        assert!(!ops.iter().any(|op| matches!(op, DrawOp::Stroke { .. })));
    }

    #[test]
    fn head_is_coloured_apart_from_body() {
        let cfg = GameConfig::default();
        let ops = build(&snapshot(Some(GameStatus::Played)), &cfg);
        let rects: Vec<_> = ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { color, x, y, .. } => Some((color.clone(), *x, *y)),
                _ => None,
            })
            .collect();
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0], (cfg.head_color.clone(), 80.0, 40.0));
        assert_eq!(rects[1], (cfg.body_color.clone(), 40.0, 40.0));
        assert_eq!(rects[2], (cfg.body_color.clone(), 0.0, 40.0));
    }

    #[test]
    fn absent_cells_skip_their_glyph() {
        let cfg = GameConfig::default();
        let mut snap = snapshot(Some(GameStatus::Played));
        let t = texts(&build(&snap, &cfg));
        assert!(t.contains(&cfg.reward_glyph));
        assert!(!t.contains(&cfg.poop_glyph));

        snap.reward_cell = None;
        snap.poop_cell = Some(1);
        let t = texts(&build(&snap, &cfg));
        assert!(!t.contains(&cfg.reward_glyph));
        assert!(t.contains(&cfg.poop_glyph));
    }

    #[test]
    fn glyph_is_centred_in_its_cell() {
        match glyph("x", 9, 8, 40.0) {
            DrawOp::Text { x, y, align, .. } => {
                assert_eq!((x, y), (60.0, 60.0));
                assert_eq!(align, Align::Center);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn welcome_overlay_before_start_and_no_points() {
        let t = texts(&build(&snapshot(None), &GameConfig::default()));
        assert!(t.iter().any(|s| s == "Poopy Snake"));
        assert!(!t.iter().any(|s| s.starts_with("Points")));
    }

    #[test]
    fn playing_shows_points_without_overlay() {
        let ops = build(&snapshot(Some(GameStatus::Played)), &GameConfig::default());
        let t = texts(&ops);
        assert!(t.contains(&"Points: 4".to_string()));
        assert!(!ops.iter().any(
            |op| matches!(op, DrawOp::FillRect { color, .. } if color == OVERLAY_FILL)
        ));
    }

    #[test]
    fn finished_game_overlay_names_outcome() {
        let t = texts(&build(&snapshot(Some(GameStatus::Lost)), &GameConfig::default()));
        assert!(t.iter().any(|s| s == "Game over"));
        let t = texts(&build(&snapshot(Some(GameStatus::Won)), &GameConfig::default()));
        assert!(t.iter().any(|s| s == "You won!"));
        assert!(t.iter().any(|s| s.contains("play again")));
    }
}
