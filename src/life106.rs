//! Plain-text cell lists in and out of the engine.
//!
//! Input is one coordinate per line, either `(X, Y)` or a Life 1.06 record
//! `X Y`. Lines starting with `#` are skipped; a blank line or end of stream
//! ends the list. Output is the `#Life 1.06` header followed by one `X Y`
//! record per live cell.

use std::io::{BufRead, Write};

use crate::error::{LifeError, LifeResult};
use crate::sparselife::Cell;

pub const HEADER: &str = "#Life 1.06";

/// Parse a single coordinate line.
pub fn parse_cell(line: &str) -> Result<Cell, String> {
    let trimmed = line.trim();
    let (x, y) = if let Some(inner) = trimmed.strip_prefix('(') {
        let inner = inner
            .strip_suffix(')')
            .ok_or_else(|| "missing closing ')'".to_string())?;
        inner
            .split_once(',')
            .ok_or_else(|| "expected ',' between coordinates".to_string())?
    } else {
        let mut parts = trimmed.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(x), Some(y), None) => (x, y),
            _ => return Err("expected \"(X, Y)\" or \"X Y\"".to_string()),
        }
    };
    Ok(Cell::new(parse_coord(x)?, parse_coord(y)?))
}

fn parse_coord(raw: &str) -> Result<i64, String> {
    let raw = raw.trim();
    raw.parse::<i64>()
        .map_err(|e| format!("bad coordinate {raw:?}: {e}"))
}

/// Read cells until a blank line or end of stream.
pub fn read_cells<R: BufRead>(reader: R) -> LifeResult<Vec<Cell>> {
    let mut cells = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.trim();
        if content.is_empty() {
            break;
        }
        if content.starts_with('#') {
            continue;
        }
        let cell = parse_cell(content).map_err(|reason| LifeError::Parse {
            line: i + 1,
            input: line.clone(),
            reason,
        })?;
        cells.push(cell);
    }
    Ok(cells)
}

/// Write the Life 1.06 header and one record per cell.
pub fn write_cells<'a, W, I>(mut writer: W, cells: I) -> LifeResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Cell>,
{
    writeln!(writer, "{HEADER}")?;
    for cell in cells {
        writeln!(writer, "{} {}", cell.x, cell.y)?;
    }
    writer.flush()?;
    Ok(())
}
