//! Plain-text rendering of a session for terminals and spectators.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Session ID: 3f1c...                                      │
//! │ Status: Game is in progress                              │
//! │ Players: Alice, Bob                                      │
//! │ Current turn: Bob                                        │
//! │ Alice plays X, wins: 0                                   │
//! │ Bob plays O, wins: 1                                     │
//! ├──────────────────────────────────────────────────────────┤
//! │ Bob dropped a piece in column 4                          │
//! └──────────────────────────────────────────────────────────┘
//!           Live board
//!
//! |   |   |   |   |   |   |   |
//! -----------------------------
//! ...
//!   1   2   3   4   5   6   7
//! ```

use std::fmt::Write;

use super::aggregate::Session;
use super::events::GameEvent;
use super::grid::{Mark, COLS};

/// Outer width of the status box, in characters.
pub const BOX_WIDTH: usize = 60;

const INNER_WIDTH: usize = BOX_WIDTH - 4;
const BOARD_WIDTH: usize = COLS * 4 + 1;

/// Renders the status box with an announcement line at the bottom.
pub fn status_board(session: &Session, announcement: &str) -> String {
    let mut out = String::new();
    let rule = "─".repeat(BOX_WIDTH - 2);

    let _ = writeln!(out, "┌{}┐", rule);
    box_line(&mut out, &format!("Session ID: {}", session.id()));
    box_line(&mut out, &format!("Status: {}", status_text(session)));

    let names: Vec<&str> = session.players().iter().map(|p| p.name().as_str()).collect();
    box_line(&mut out, &format!("Players: {}", names.join(", ")));

    if session.status() {
        if let Some(current) = session.current_player() {
            box_line(&mut out, &format!("Current turn: {}", current.name()));
        }
    }

    for (seat, player) in session.players().iter().enumerate() {
        let symbol = Mark::for_seat(seat).map(|m| m.symbol()).unwrap_or('?');
        box_line(
            &mut out,
            &format!("{} plays {}, wins: {}", player.name(), symbol, player.wins()),
        );
    }

    let _ = writeln!(out, "├{}┤", rule);
    for line in wrap(announcement, INNER_WIDTH) {
        box_line(&mut out, &line);
    }
    let _ = writeln!(out, "└{}┘", rule);
    out
}

/// Renders the grid with 1-based column labels.
pub fn live_board(session: &Session) -> String {
    let mut out = String::new();
    let separator = "-".repeat(BOARD_WIDTH);

    let _ = writeln!(out, "{:^width$}", "Live board", width = BOARD_WIDTH);
    out.push('\n');

    for row in session.grid().rows() {
        out.push('|');
        for cell in row {
            let symbol = cell.map(|m| m.symbol()).unwrap_or(' ');
            let _ = write!(out, " {} |", symbol);
        }
        out.push('\n');
        out.push_str(&separator);
        out.push('\n');
    }

    for col in 1..=COLS {
        let _ = write!(out, "{:>3} ", col);
    }
    out.push('\n');
    out
}

/// Full snapshot: status box plus board.
pub fn snapshot(session: &Session, announcement: &str) -> String {
    let mut out = status_board(session, announcement);
    out.push_str(&live_board(session));
    out
}

/// The broadcast text for an event: headline, status box, board.
pub fn broadcast_text(session: &Session, event: &GameEvent) -> String {
    let headline = event.to_string();
    let mut out = String::with_capacity(2048);
    out.push_str(&headline);
    out.push('\n');
    out.push_str(&snapshot(session, &headline));
    out
}

fn status_text(session: &Session) -> &'static str {
    if session.status() {
        "Game is in progress"
    } else if session.starts_count() == 0 {
        "Game has not started"
    } else {
        "Game over"
    }
}

fn box_line(out: &mut String, content: &str) {
    let _ = writeln!(out, "│ {:<width$} │", content, width = INNER_WIDTH);
}

/// Greedy word wrap; a single word longer than `width` gets its own line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
