//! View: maps a `GameSnapshot` into terminal text.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::types::Phase;

/// Width of one board cell in terminal columns. 2x1 compensates for the
/// typical terminal glyph aspect ratio.
const CELL_W: usize = 2;

/// Render the snapshot as one text line per terminal row: a bordered well
/// with two-column cells, plus a status line.
pub fn render(snapshot: &GameSnapshot) -> Vec<String> {
    let inner = snapshot.width as usize * CELL_W;
    let mut lines = Vec::with_capacity(snapshot.height as usize + 3);

    lines.push(format!("+{}+", "-".repeat(inner)));

    for row in 0..snapshot.height as i8 {
        let mut line = String::with_capacity(inner + 2);
        line.push('|');
        for col in 0..snapshot.width as i8 {
            match snapshot.get(row, col).flatten() {
                Some(kind) => {
                    line.push(kind.as_char());
                    line.push(kind.as_char());
                }
                None => line.push_str(" ."),
            }
        }
        line.push('|');
        lines.push(line);
    }

    lines.push(format!("+{}+", "-".repeat(inner)));
    lines.push(match snapshot.phase {
        Phase::Playing => "arrows move, z/x rotate, space drops, r restarts, q quits".to_string(),
        Phase::GameOver => "GAME OVER - r restarts, q quits".to_string(),
    });

    lines
}
