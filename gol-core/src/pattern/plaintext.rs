use crate::error::LoadError;
use crate::grid::Grid;

use super::offset;

/// Plaintext (Life 1.05 / `.cells`): each line is a row starting at the grid
/// center. `O` and `*` are live cells, any other character is dead. Lines
/// starting with `!` or `#` are comments and do not take up a row.
pub(super) fn parse(text: &str, grid: &mut Grid) -> Result<(), LoadError> {
    let (cx, cy) = grid.center();
    let mut dy = 0;

    for line in text.lines() {
        if line.starts_with('!') || line.starts_with('#') {
            continue;
        }
        for (dx, ch) in line.trim_end().chars().enumerate() {
            if matches!(ch, 'O' | '*') {
                grid.set_alive_checked(offset(cx, dx as i64), offset(cy, dy))?;
            }
        }
        dy += 1;
    }

    Ok(())
}
