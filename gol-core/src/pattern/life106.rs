use crate::error::LoadError;
use crate::grid::Grid;

use super::offset;

/// Life 1.06: one `dx dy` pair per line, relative to the grid center.
/// `#` lines are headers; lines without two integers are ignored.
pub(super) fn parse(text: &str, grid: &mut Grid) -> Result<(), LoadError> {
    let (cx, cy) = grid.center();

    for line in text.lines() {
        if line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace().map(str::parse::<i64>);
        if let (Some(Ok(dx)), Some(Ok(dy))) = (fields.next(), fields.next()) {
            grid.set_alive_checked(offset(cx, dx), offset(cy, dy))?;
        }
    }

    Ok(())
}
