//! Map file parsing.
//!
//! A map file carries three `key=value` header lines followed by the dungeon
//! matrix, one row per line:
//!
//! ```text
//! dimensions=RxC
//! color=R,G,B
//! player=ROW,COL
//! <R lines of C tile characters>
//! ```
//!
//! Tile alphabet: space = empty, `B` = block, `G` = gate, `E` = enemy spawn,
//! `P` = health pickup, `A` = ammo pickup. Unknown characters are ignored.

use std::fmt;

pub const HEADER_DIMENSIONS: &str = "dimensions";
pub const HEADER_COLOR: &str = "color";
pub const HEADER_PLAYER: &str = "player";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapFile {
    pub rows: usize,
    pub cols: usize,
    pub color: (u8, u8, u8),
    /// Player start cell as (row, col) in matrix coordinates.
    pub player_start: (usize, usize),
    tiles: Vec<Vec<char>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    MissingHeader(&'static str),
    DuplicateHeader(String),
    UnknownHeader(String),
    MalformedHeader { key: String, value: String },
    RowCountMismatch { expected: usize, found: usize },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::MissingHeader(key) => write!(f, "missing map header '{key}'"),
            MapError::DuplicateHeader(key) => write!(f, "duplicate map header '{key}'"),
            MapError::UnknownHeader(key) => write!(f, "unknown map header '{key}'"),
            MapError::MalformedHeader { key, value } => {
                write!(f, "malformed value '{value}' for map header '{key}'")
            }
            MapError::RowCountMismatch { expected, found } => {
                write!(f, "map matrix has {found} rows, header declares {expected}")
            }
        }
    }
}

impl std::error::Error for MapError {}

impl MapFile {
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut dimensions: Option<(usize, usize)> = None;
        let mut color: Option<(u8, u8, u8)> = None;
        let mut player: Option<(usize, usize)> = None;

        let mut lines = text.lines();
        for _ in 0..3 {
            let Some(line) = lines.next() else {
                break;
            };
            let Some((key, value)) = line.split_once('=') else {
                return Err(MapError::UnknownHeader(line.trim().to_string()));
            };
            let key = key.trim();
            let value = value.trim();
            match key {
                HEADER_DIMENSIONS => {
                    if dimensions.replace(parse_dimensions(key, value)?).is_some() {
                        return Err(MapError::DuplicateHeader(key.to_string()));
                    }
                }
                HEADER_COLOR => {
                    if color.replace(parse_color(key, value)?).is_some() {
                        return Err(MapError::DuplicateHeader(key.to_string()));
                    }
                }
                HEADER_PLAYER => {
                    if player.replace(parse_cell(key, value)?).is_some() {
                        return Err(MapError::DuplicateHeader(key.to_string()));
                    }
                }
                other => return Err(MapError::UnknownHeader(other.to_string())),
            }
        }

        let (rows, cols) = dimensions.ok_or(MapError::MissingHeader(HEADER_DIMENSIONS))?;
        let color = color.ok_or(MapError::MissingHeader(HEADER_COLOR))?;
        let player_start = player.ok_or(MapError::MissingHeader(HEADER_PLAYER))?;

        let mut tiles: Vec<Vec<char>> =
            lines.map(|line| line.trim_end_matches(['\r', '\n']).chars().collect()).collect();
        while tiles.last().is_some_and(|row| row.is_empty()) {
            tiles.pop();
        }
        if tiles.len() != rows {
            return Err(MapError::RowCountMismatch { expected: rows, found: tiles.len() });
        }

        Ok(Self { rows, cols, color, player_start, tiles })
    }

    /// Tile character at a matrix cell; out-of-range cells read as empty.
    pub fn glyph_at(&self, row: usize, col: usize) -> char {
        self.tiles.get(row).and_then(|r| r.get(col)).copied().unwrap_or(' ')
    }
}

fn parse_dimensions(key: &str, value: &str) -> Result<(usize, usize), MapError> {
    let malformed =
        || MapError::MalformedHeader { key: key.to_string(), value: value.to_string() };
    let (rows, cols) = value.split_once('x').ok_or_else(malformed)?;
    let rows = rows.trim().parse::<usize>().map_err(|_| malformed())?;
    let cols = cols.trim().parse::<usize>().map_err(|_| malformed())?;
    Ok((rows, cols))
}

fn parse_color(key: &str, value: &str) -> Result<(u8, u8, u8), MapError> {
    let malformed =
        || MapError::MalformedHeader { key: key.to_string(), value: value.to_string() };
    let mut parts = value.split(',');
    let mut next = || -> Result<u8, MapError> {
        parts.next().ok_or_else(malformed)?.trim().parse::<u8>().map_err(|_| malformed())
    };
    let color = (next()?, next()?, next()?);
    if parts.next().is_some() {
        return Err(malformed());
    }
    Ok(color)
}

fn parse_cell(key: &str, value: &str) -> Result<(usize, usize), MapError> {
    let malformed =
        || MapError::MalformedHeader { key: key.to_string(), value: value.to_string() };
    let (row, col) = value.split_once(',').ok_or_else(malformed)?;
    let row = row.trim().parse::<usize>().map_err(|_| malformed())?;
    let col = col.trim().parse::<usize>().map_err(|_| malformed())?;
    Ok((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_MAP: &str = "dimensions=3x5\ncolor=64,48,48\nplayer=1,1\nBBBBB\nB E G\nBBBBB\n";

    #[test]
    fn parses_headers_and_matrix() {
        let map = MapFile::parse(SMALL_MAP).expect("map should parse");
        assert_eq!(map.rows, 3);
        assert_eq!(map.cols, 5);
        assert_eq!(map.color, (64, 48, 48));
        assert_eq!(map.player_start, (1, 1));
        assert_eq!(map.glyph_at(1, 2), 'E');
        assert_eq!(map.glyph_at(1, 4), 'G');
        assert_eq!(map.glyph_at(0, 0), 'B');
    }

    #[test]
    fn out_of_range_cells_read_as_empty() {
        let map = MapFile::parse(SMALL_MAP).expect("map should parse");
        assert_eq!(map.glyph_at(9, 9), ' ');
    }

    #[test]
    fn missing_header_is_reported_by_name() {
        let text = "dimensions=3x5\ncolor=1,2,3\nBBBBB\nB   B\nBBBBB\n";
        assert_eq!(MapFile::parse(text), Err(MapError::UnknownHeader("BBBBB".to_string())));

        let text = "dimensions=3x5\ncolor=1,2,3\n";
        assert_eq!(MapFile::parse(text), Err(MapError::MissingHeader(HEADER_PLAYER)));
    }

    #[test]
    fn duplicate_header_is_rejected() {
        let text = "dimensions=3x5\ndimensions=3x5\nplayer=1,1\n";
        assert_eq!(MapFile::parse(text), Err(MapError::DuplicateHeader("dimensions".to_string())));
    }

    #[test]
    fn malformed_fields_are_rejected() {
        let text = "dimensions=3by5\ncolor=1,2,3\nplayer=1,1\n";
        assert!(matches!(MapFile::parse(text), Err(MapError::MalformedHeader { .. })));

        let text = "dimensions=3x5\ncolor=1,2\nplayer=1,1\n";
        assert!(matches!(MapFile::parse(text), Err(MapError::MalformedHeader { .. })));

        let text = "dimensions=3x5\ncolor=1,2,999\nplayer=1,1\n";
        assert!(matches!(MapFile::parse(text), Err(MapError::MalformedHeader { .. })));
    }

    #[test]
    fn row_count_mismatch_is_rejected() {
        let text = "dimensions=4x5\ncolor=1,2,3\nplayer=1,1\nBBBBB\nB   B\nBBBBB\n";
        assert_eq!(MapFile::parse(text), Err(MapError::RowCountMismatch { expected: 4, found: 3 }));
    }
}
