// ui.rs - Text rendering of the grid
// Drawn from engine state on demand; nothing here is authoritative.

use std::io::{self, Write};

use conway::GridEngine;

const LIVE: char = '#';
const DEAD: char = '.';

/// Draws one line per row followed by the statistics line.
pub fn render<W: Write>(grid: &GridEngine, out: &mut W) -> io::Result<()> {
    let mut line = String::with_capacity(grid.width());
    for row in 0..grid.height() {
        line.clear();
        for col in 0..grid.width() {
            // Coordinates come from the grid's own extent.
            let alive = grid.is_alive(row, col).unwrap_or(false);
            line.push(if alive { LIVE } else { DEAD });
        }
        writeln!(out, "{line}")?;
    }
    writeln!(out, "{}", statistics(grid))
}

pub fn statistics(grid: &GridEngine) -> String {
    let total = grid.width() * grid.height();
    let live_cells = grid.population();
    format!(
        "live cells: {}  dead cells: {}  population: {:.1}%",
        live_cells,
        total - live_cells,
        (live_cells as f32 / total as f32) * 100.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_rows_and_statistics() {
        let mut grid = GridEngine::new(4, 2).unwrap();
        grid.set_alive(0, 1).unwrap();
        grid.set_alive(1, 3).unwrap();

        let mut out = Vec::new();
        render(&grid, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            ".#..\n...#\nlive cells: 2  dead cells: 6  population: 25.0%\n"
        );
    }
}
