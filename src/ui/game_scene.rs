//! In-game scene: board, status bar, and info panel.
//!
//! The board uses half-block pixel rendering. Each game cell maps to a square
//! patch of colored pixels; pairs of vertical pixels are packed into one
//! terminal row using the `▀` (upper half block) character with fg=top,
//! bg=bottom colors. The patch size adapts to the terminal so a roomy window
//! gets a bigger board, up to [`BOARD_MAX_SCALE`] columns per cell.

use super::{create_game_layout, format_time_ms, render_info_panel_frame, render_status_bar};
use crate::core::constants::{BOARD_MAX_SCALE, FOOD_VALUE_BONUS, FOOD_VALUE_JACKPOT};
use crate::game::types::GameState;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

// ── Border characters ────────────────────────────────────────────────
const BORDER_H: char = '\u{2500}'; // ─
const BORDER_V: char = '\u{2502}'; // │
const BORDER_TL: char = '\u{250C}'; // ┌
const BORDER_TR: char = '\u{2510}'; // ┐
const BORDER_BL: char = '\u{2514}'; // └
const BORDER_BR: char = '\u{2518}'; // ┘
const HALF_TOP: char = '\u{2580}'; // ▀ (fg = top half, bg = bottom half)
const FULL_BLOCK: char = '\u{2588}'; // █

// ── Board colors ─────────────────────────────────────────────────────
const HEAD_COLOR: Color = Color::Rgb(100, 255, 100);
const BODY_BRIGHT: (f64, f64, f64) = (50.0, 220.0, 50.0);
const BODY_DIM: (f64, f64, f64) = (20.0, 80.0, 20.0);
const EMPTY_BG: Color = Color::Rgb(12, 12, 18);
const OBSTACLE_COLOR: Color = Color::Rgb(110, 110, 120);

const STATUS_CONTROLS: &[(&str, &str)] = &[
    ("[Arrows]", "Move"),
    ("[Space]", "Pause"),
    ("[Q]", "Quit"),
];

/// Render the in-game scene.
///
/// `status_message` overrides the default status line; the main loop uses it
/// to surface recent tick events for a couple of seconds.
pub fn render_game_scene(
    frame: &mut Frame,
    area: Rect,
    state: &GameState,
    status_message: Option<&str>,
) {
    let layout = create_game_layout(frame, area, " Serpent ", Color::LightGreen, 12, 22);

    render_board(frame, layout.board, state);

    if let Some(prompt) = center_prompt(state) {
        render_center_prompt(frame, layout.board, prompt);
    }

    render_status_bar_content(frame, layout.status_bar, state, status_message);
    render_info_panel(frame, layout.info_panel, state);
}

/// Largest whole number of terminal columns per game cell that fits the
/// area, between 1 and [`BOARD_MAX_SCALE`]. Half-blocks give two pixel rows
/// per terminal row, so the vertical budget counts double.
fn board_scale(area: Rect, grid_size: usize) -> usize {
    let inner_w = area.width.saturating_sub(2) as usize;
    let inner_px_h = area.height.saturating_sub(2) as usize * 2;
    let fit = (inner_w / grid_size).min(inner_px_h / grid_size);
    fit.clamp(1, BOARD_MAX_SCALE)
}

/// Interpolated RGB color for a snake body segment, bright at the neck and
/// dim at the tail.
fn body_color(index: usize, snake_len: usize) -> Color {
    let t = index as f64 / (snake_len - 1).max(1) as f64;
    let r = (BODY_BRIGHT.0 * (1.0 - t) + BODY_DIM.0 * t) as u8;
    let g = (BODY_BRIGHT.1 * (1.0 - t) + BODY_DIM.1 * t) as u8;
    let b = (BODY_BRIGHT.2 * (1.0 - t) + BODY_DIM.2 * t) as u8;
    Color::Rgb(r, g, b)
}

/// Food color keyed by point value, modulated by the pulse phase.
fn food_color(value: u32, pulse: f64) -> Color {
    match value {
        FOOD_VALUE_JACKPOT => Color::Rgb((190.0 + pulse * 40.0) as u8, 80, 255),
        FOOD_VALUE_BONUS => Color::Rgb(255, (190.0 + pulse * 40.0) as u8, 50),
        _ => Color::Rgb(255, (80.0 + pulse * 30.0) as u8, (40.0 + pulse * 20.0) as u8),
    }
}

fn slowdown_color(pulse: f64) -> Color {
    Color::Rgb(40, (180.0 + pulse * 40.0) as u8, 220)
}

/// Flat (pulse-free) swatch color for the info panel legend.
fn legend_food_color(value: u32) -> Color {
    match value {
        FOOD_VALUE_JACKPOT => Color::Rgb(200, 80, 255),
        FOOD_VALUE_BONUS => Color::Rgb(255, 200, 50),
        _ => Color::Rgb(255, 80, 40),
    }
}

/// Render the board using half-block pixel rendering.
fn render_board(frame: &mut Frame, area: Rect, state: &GameState) {
    if area.height < 3 || area.width < 5 {
        return;
    }

    let grid = state.grid_size as usize;
    let scale = board_scale(area, grid);
    let border_color = Color::Rgb(80, 80, 80);
    let pulse = ((state.tick_count % 20) as f64 / 20.0 * std::f64::consts::PI * 2.0).sin();

    // ── Build color grid (game coordinates) ─────────────────────
    let mut pixels: Vec<Vec<Option<Color>>> = vec![vec![None; grid]; grid];

    for cell in &state.obstacles {
        pixels[cell.y as usize][cell.x as usize] = Some(OBSTACLE_COLOR);
    }

    if let Some(cell) = state.slowdown_food {
        pixels[cell.y as usize][cell.x as usize] = Some(slowdown_color(pulse));
    }

    if let Some(food) = state.food {
        pixels[food.cell.y as usize][food.cell.x as usize] = Some(food_color(food.value, pulse));
    }

    // Snake last: the head always wins a cell
    let snake_len = state.snake.len();
    for (i, seg) in state.snake.iter().enumerate() {
        pixels[seg.y as usize][seg.x as usize] = Some(if i == 0 {
            HEAD_COLOR
        } else {
            body_color(i, snake_len)
        });
    }

    // ── Layout dimensions ───────────────────────────────────────
    let px_side = grid * scale;
    let content_rows = px_side.div_ceil(2); // 2 pixel rows per terminal row
    let render_w = ((px_side + 2) as u16).min(area.width);
    let inner_w = render_w as usize - 2; // chars between left/right border

    let x_off = area.x + (area.width.saturating_sub(render_w)) / 2;
    let y_off = area.y;

    // ── Row 0: Top border with score ────────────────────────────
    {
        let score_val = state.score.to_string();
        let label = "Score: ";
        let score_full_len = label.len() + score_val.len();
        let pad_before = inner_w.saturating_sub(score_full_len + 1);
        let pad_after = inner_w.saturating_sub(pad_before + score_full_len);

        let mut spans: Vec<Span> = Vec::new();
        spans.push(Span::styled(
            BORDER_TL.to_string(),
            Style::default().fg(border_color),
        ));
        if pad_before > 0 {
            let s = BORDER_H.to_string().repeat(pad_before);
            spans.push(Span::styled(s, Style::default().fg(border_color)));
        }
        spans.push(Span::styled(label, Style::default().fg(border_color)));
        spans.push(Span::styled(score_val, Style::default().fg(Color::White)));
        if pad_after > 0 {
            let s = BORDER_H.to_string().repeat(pad_after);
            spans.push(Span::styled(s, Style::default().fg(border_color)));
        }
        spans.push(Span::styled(
            BORDER_TR.to_string(),
            Style::default().fg(border_color),
        ));

        let line = Paragraph::new(Line::from(spans));
        frame.render_widget(line, Rect::new(x_off, y_off, render_w, 1));
    }

    // ── Board rows (half-block pixel rendering) ─────────────────
    for term_row in 0..content_rows {
        let top_py = term_row * 2;
        let bot_py = term_row * 2 + 1;

        let mut spans: Vec<Span> = Vec::new();
        spans.push(Span::styled(
            BORDER_V.to_string(),
            Style::default().fg(border_color),
        ));

        // Batch consecutive columns with the same color pair
        let mut cur_fg = Color::Reset;
        let mut cur_bg = Color::Reset;
        let mut cur_text = String::new();

        for col in 0..px_side {
            let cell_x = col / scale;
            let fg = pixel_at(&pixels, cell_x, top_py, scale, px_side).unwrap_or(EMPTY_BG);
            let bg = pixel_at(&pixels, cell_x, bot_py, scale, px_side).unwrap_or(EMPTY_BG);

            if fg != cur_fg || bg != cur_bg {
                if !cur_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut cur_text),
                        Style::default().fg(cur_fg).bg(cur_bg),
                    ));
                }
                cur_fg = fg;
                cur_bg = bg;
            }
            cur_text.push(HALF_TOP);
        }
        if !cur_text.is_empty() {
            spans.push(Span::styled(cur_text, Style::default().fg(cur_fg).bg(cur_bg)));
        }

        spans.push(Span::styled(
            BORDER_V.to_string(),
            Style::default().fg(border_color),
        ));

        let row_y = y_off + 1 + term_row as u16;
        if row_y < area.y + area.height {
            let line = Paragraph::new(Line::from(spans));
            frame.render_widget(line, Rect::new(x_off, row_y, render_w, 1));
        }
    }

    // ── Bottom border ───────────────────────────────────────────
    {
        let bot_y = y_off + 1 + content_rows as u16;
        if bot_y < area.y + area.height {
            let mut s = String::new();
            s.push(BORDER_BL);
            for _ in 0..inner_w {
                s.push(BORDER_H);
            }
            s.push(BORDER_BR);
            let line = Paragraph::new(Line::from(Span::styled(
                s,
                Style::default().fg(border_color),
            )));
            frame.render_widget(line, Rect::new(x_off, bot_y, render_w, 1));
        }
    }
}

/// Color of the pixel at (cell_x, pixel row py), or `None` past the board.
fn pixel_at(
    pixels: &[Vec<Option<Color>>],
    cell_x: usize,
    py: usize,
    scale: usize,
    px_side: usize,
) -> Option<Color> {
    if py >= px_side {
        return None;
    }
    pixels[py / scale][cell_x]
}

/// Message to overlay on the board center, if the game is waiting on the
/// player.
fn center_prompt(state: &GameState) -> Option<&'static str> {
    if state.paused {
        Some("[ Paused ]")
    } else if !state.started {
        Some("[ Arrow keys to start ]")
    } else if state.direction.is_none() && state.pending_direction.is_none() {
        // just lost a life, back at spawn
        Some("[ Move to continue ]")
    } else {
        None
    }
}

fn render_center_prompt(frame: &mut Frame, area: Rect, prompt: &str) {
    if area.height < 5 || area.width < prompt.len() as u16 {
        return;
    }

    let center_y = area.y + area.height / 2;
    let x = area.x + area.width.saturating_sub(prompt.len() as u16) / 2;

    let line = Paragraph::new(Line::from(Span::styled(
        prompt,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(line, Rect::new(x, center_y, prompt.len() as u16, 1));
}

/// Status bar below the board.
fn render_status_bar_content(
    frame: &mut Frame,
    area: Rect,
    state: &GameState,
    status_message: Option<&str>,
) {
    if let Some(message) = status_message {
        render_status_bar(frame, area, message, Color::White, STATUS_CONTROLS);
        return;
    }

    let (text, color) = if state.paused {
        ("Paused", Color::Yellow)
    } else if !state.started {
        ("Ready", Color::LightGreen)
    } else if state.direction.is_none() && state.pending_direction.is_none() {
        ("Life lost! Move to continue", Color::LightRed)
    } else if state.slowdown_active {
        ("Half speed", Color::Cyan)
    } else {
        ("Slither!", Color::Green)
    };

    render_status_bar(frame, area, text, color, STATUS_CONTROLS);
}

/// Info panel on the right side.
fn render_info_panel(frame: &mut Frame, area: Rect, state: &GameState) {
    let inner = render_info_panel_frame(frame, area);

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Lives: ", Style::default().fg(Color::DarkGray)),
            Span::styled(state.lives.to_string(), Style::default().fg(Color::LightRed)),
        ]),
        Line::from(vec![
            Span::styled("Time: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format_time_ms(state.elapsed_ms),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Speed: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}ms", state.move_timer.interval_ms()),
                if state.slowdown_active {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::White)
                },
            ),
        ]),
        Line::from(""),
    ];

    if let Some(food) = state.food {
        let mut spans = vec![
            Span::styled("Food: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("+{}", food.value),
                Style::default()
                    .fg(legend_food_color(food.value))
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(secs) = state.bonus_remaining {
            spans.push(Span::styled(
                format!("  {}s left", secs),
                Style::default().fg(Color::Yellow),
            ));
        }
        lines.push(Line::from(spans));
    }

    if state.slowdown_active {
        lines.push(Line::from(Span::styled(
            "Slowdown active",
            Style::default().fg(Color::Cyan),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Legend:",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));

    let legend: [(Color, &str); 6] = [
        (HEAD_COLOR, "Head"),
        (
            Color::Rgb(BODY_BRIGHT.0 as u8, BODY_BRIGHT.1 as u8, BODY_BRIGHT.2 as u8),
            "Body",
        ),
        (legend_food_color(1), "Food +1"),
        (legend_food_color(FOOD_VALUE_BONUS), "Bonus +5"),
        (legend_food_color(FOOD_VALUE_JACKPOT), "Prize +10"),
        (OBSTACLE_COLOR, "Wall"),
    ];
    for (color, label) in legend {
        lines.push(Line::from(vec![
            Span::styled(format!(" {FULL_BLOCK} "), Style::default().fg(color)),
            Span::styled(label, Style::default().fg(Color::DarkGray)),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled(
            format!(" {FULL_BLOCK} "),
            Style::default().fg(slowdown_color(0.0)),
        ),
        Span::styled("Slow-mo", Style::default().fg(Color::DarkGray)),
    ]));

    let text = Paragraph::new(lines);
    frame.render_widget(text, inner);
}
