use crate::error::LoadError;
use crate::grid::Grid;

use super::offset;

const SUPPORTED_RULE: &str = "B3/S23";

/// Run-length encoded patterns.
///
/// `#` lines are comments. An optional `x = W, y = H[, rule = R]` header
/// centers the pattern's bounding box on the grid; without it the top-left
/// corner sits at the center. The data is a stream of `<count><tag>` tokens
/// terminated by `!`.
pub(super) fn parse(text: &str, grid: &mut Grid) -> Result<(), LoadError> {
    let (cx, cy) = grid.center();
    let mut origin_x = offset(cx, 0);
    let (mut x, mut y) = (origin_x, offset(cy, 0));
    let mut in_data = false;
    let mut count: i64 = 0;

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if !in_data && line.starts_with('x') {
            let (width, height) = parse_header(line)?;
            origin_x = offset(cx, -(width / 2));
            x = origin_x;
            y = offset(cy, -(height / 2));
            continue;
        }
        in_data = true;

        for ch in line.chars() {
            let run = if count == 0 { 1 } else { count };
            match ch {
                '0'..='9' => {
                    let digit = ch as i64 - '0' as i64;
                    count = count.saturating_mul(10).saturating_add(digit);
                    continue;
                }
                'b' | '.' => x = x.saturating_add(run),
                '$' => {
                    x = origin_x;
                    y = y.saturating_add(run);
                }
                '!' => return Ok(()),
                ch if ch.is_ascii_alphabetic() => {
                    for _ in 0..run {
                        grid.set_alive_checked(x, y)?;
                        x += 1;
                    }
                }
                ch if ch.is_whitespace() => continue,
                ch => {
                    return Err(LoadError::UnexpectedCharacter {
                        line: number + 1,
                        ch,
                    })
                }
            }
            count = 0;
        }
    }

    Err(LoadError::Unterminated)
}

/// Returns the bounding box from `x = W, y = H[, rule = R]`.
fn parse_header(line: &str) -> Result<(i64, i64), LoadError> {
    let malformed = || LoadError::MalformedHeader {
        line: line.to_string(),
    };
    let mut width = None;
    let mut height = None;

    // the rule comes last and may itself contain commas, e.g. `B3/S23:T16,16`
    let (dimensions, rule) = match line.find("rule") {
        Some(at) => line.split_at(at),
        None => (line, ""),
    };

    for part in dimensions.split(',').filter(|part| !part.trim().is_empty()) {
        let (key, value) = part.split_once('=').ok_or_else(malformed)?;
        let value = value.trim();
        match key.trim() {
            "x" => width = Some(value.parse::<i64>().map_err(|_| malformed())?),
            "y" => height = Some(value.parse::<i64>().map_err(|_| malformed())?),
            _ => return Err(malformed()),
        }
    }

    if !rule.is_empty() {
        let (_, value) = rule.split_once('=').ok_or_else(malformed)?;
        let value = value.trim();
        if !value.eq_ignore_ascii_case(SUPPORTED_RULE) {
            return Err(LoadError::UnsupportedRule(value.to_string()));
        }
    }

    match (width, height) {
        (Some(width), Some(height)) if width >= 0 && height >= 0 => Ok((width, height)),
        _ => Err(malformed()),
    }
}
