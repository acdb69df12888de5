//! Game over screen: final score, name entry, and the highscore table.

use super::format_time_ms;
use crate::core::constants::PLAYER_NAME_MAX_LENGTH;
use crate::highscores::types::{sort_entries, top_entries, HighscoreEntry};
use chrono::DateTime;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Interactive game over screen.
///
/// Opens in name-entry mode. Once the run is saved (or skipped with Esc) the
/// table is shown alongside the new-game and quit controls.
pub struct GameOverScreen {
    pub final_score: u32,
    pub final_time_ms: u64,
    pub name_input: String,
    /// True once the player saved or skipped; unlocks the endgame controls.
    pub name_committed: bool,
    pub saved: bool,
    pub save_error: Option<String>,
    entries: Vec<HighscoreEntry>,
}

impl GameOverScreen {
    pub fn new(final_score: u32, final_time_ms: u64, mut entries: Vec<HighscoreEntry>) -> Self {
        sort_entries(&mut entries);
        Self {
            final_score,
            final_time_ms,
            name_input: String::new(),
            name_committed: false,
            saved: false,
            save_error: None,
            entries,
        }
    }

    pub fn handle_char_input(&mut self, c: char) {
        if self.name_input.chars().count() < PLAYER_NAME_MAX_LENGTH && !c.is_control() {
            self.name_input.push(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        self.name_input.pop();
    }

    /// The name to record, as typed. Blank handling happens in the store.
    pub fn entry_name(&self) -> &str {
        self.name_input.trim()
    }

    /// Mark the run as recorded and swap in the refreshed table.
    pub fn mark_saved(&mut self, mut entries: Vec<HighscoreEntry>) {
        sort_entries(&mut entries);
        self.entries = entries;
        self.saved = true;
        self.name_committed = true;
        self.save_error = None;
    }

    /// Skip recording. Keeps the table that was loaded at game over.
    pub fn skip_save(&mut self) {
        self.name_committed = true;
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Game Over ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    self.final_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("   Time: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format_time_ms(self.final_time_ms),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
        ];

        if self.name_committed {
            if self.saved {
                lines.push(Line::from(Span::styled(
                    "Score saved",
                    Style::default().fg(Color::Green),
                )));
            } else if let Some(error) = &self.save_error {
                lines.push(Line::from(Span::styled(
                    error.clone(),
                    Style::default().fg(Color::Red),
                )));
            } else {
                lines.push(Line::from(Span::styled(
                    "Not saved",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        } else {
            lines.push(Line::from(vec![
                Span::styled("Name: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{}_", self.name_input),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            if let Some(error) = &self.save_error {
                lines.push(Line::from(Span::styled(
                    error.clone(),
                    Style::default().fg(Color::Red),
                )));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Top Scores",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.extend(self.table_lines());
        lines.push(Line::from(""));

        let controls = if self.name_committed {
            "[N] New Game   [Q] Quit"
        } else {
            "[Enter] Save   [Esc] Skip"
        };
        lines.push(Line::from(Span::styled(
            controls,
            Style::default().fg(Color::DarkGray),
        )));

        let content_height = lines.len() as u16;
        let y_offset = inner.y + inner.height.saturating_sub(content_height) / 2;
        // clipped on short terminals rather than rendered out of bounds
        let height = content_height.min((inner.y + inner.height).saturating_sub(y_offset));
        let text = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(text, Rect::new(inner.x, y_offset, inner.width, height));
    }

    /// Fixed-width table rows. Equal widths keep the centered column aligned.
    fn table_lines(&self) -> Vec<Line> {
        let top = top_entries(&self.entries);
        if top.is_empty() {
            return vec![Line::from(Span::styled(
                "No scores yet",
                Style::default().fg(Color::DarkGray),
            ))];
        }

        let mut lines = vec![Line::from(Span::styled(
            format!(
                "   {:<16} {:>5}  {:>7}  {:<10}",
                "Name", "Score", "Time", "Date"
            ),
            Style::default().fg(Color::DarkGray),
        ))];

        for (i, entry) in top.iter().enumerate() {
            let date = DateTime::from_timestamp(entry.date, 0)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "----------".to_string());
            let is_this_run =
                self.saved && entry.score == self.final_score && entry.time_ms == self.final_time_ms;

            let style = if is_this_run {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::from(Span::styled(
                format!(
                    "{}{}. {:<16} {:>5}  {:>7}  {:<10}",
                    if is_this_run { ">" } else { " " },
                    i + 1,
                    entry.name,
                    entry.score,
                    format_time_ms(entry.time_ms),
                    date
                ),
                style,
            )));
        }
        lines
    }
}
