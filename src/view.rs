//! Plain-text rendering of board snapshots, side by side.

use crate::core::BoardSnapshot;

const GAP: &str = "   ";
const HEADER_WIDTH: usize = 14;

/// Render every board next to each other with a small header per board.
pub fn render_boards(boards: &[BoardSnapshot]) -> String {
    let columns: Vec<Vec<String>> = boards.iter().map(board_lines).collect();
    let height = columns.iter().map(Vec::len).max().unwrap_or(0);

    let mut out = String::new();
    for row in 0..height {
        let line: Vec<String> = columns
            .iter()
            .zip(boards)
            .map(|(lines, board)| {
                let width = board.width as usize + 2;
                let cell = lines.get(row).map(String::as_str).unwrap_or("");
                format!("{:<width$}", cell, width = width.max(HEADER_WIDTH))
            })
            .collect();
        out.push_str(line.join(GAP).trim_end());
        out.push('\n');
    }
    out
}

fn board_lines(board: &BoardSnapshot) -> Vec<String> {
    let held = board.held.map_or("-", |s| s.as_str());
    let preview: String = board.preview.iter().map(|s| s.as_str()).collect();

    let mut lines = vec![
        format!("board {}", board.id.0),
        format!("hold {}{}", held, if board.hold_used { "*" } else { "" }),
        format!("next {}", preview),
        format!("garbage {}", board.pending_garbage),
    ];
    for row in board.to_text().lines() {
        lines.push(format!("|{}|", row));
    }
    lines.push(format!("+{}+", "-".repeat(board.width as usize)));
    if board.game_over {
        lines.push("GAME OVER".to_string());
    }
    lines
}
