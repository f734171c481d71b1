//! Identifier types for document surfaces and grid cells

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One addressable unit of a document with its own coordinate space
///
/// # Examples
///
/// ```
/// use redline::domain::ids::SurfaceId;
///
/// assert_eq!(SurfaceId::Page(2).to_string(), "page 2");
/// assert_eq!(SurfaceId::Page(2).index(), Some(2));
/// assert_eq!(SurfaceId::Image.index(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum SurfaceId {
    /// Zero-based page of a paged document (PDF)
    Page(usize),
    /// A standalone raster image
    Image,
    /// Zero-based worksheet of a workbook
    Sheet(usize),
    /// Zero-based paragraph or table cell of a text container
    Block(usize),
}

impl SurfaceId {
    /// Position of the surface within its document, if it has one
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Page(i) | Self::Sheet(i) | Self::Block(i) => Some(*i),
            Self::Image => None,
        }
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(i) => write!(f, "page {i}"),
            Self::Image => write!(f, "image"),
            Self::Sheet(i) => write!(f, "sheet {i}"),
            Self::Block(i) => write!(f, "block {i}"),
        }
    }
}

/// A1-style spreadsheet cell reference, stored zero-based
///
/// # Examples
///
/// ```
/// use redline::domain::ids::CellRef;
///
/// let cell: CellRef = "AB12".parse().unwrap();
/// assert_eq!(cell.column, 27);
/// assert_eq!(cell.row, 11);
/// assert_eq!(cell.to_string(), "AB12");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellRef {
    /// Zero-based column index (A = 0)
    pub column: usize,
    /// Zero-based row index (row 1 = 0)
    pub row: usize,
}

/// Rows in a worksheet
pub const MAX_ROWS: usize = 1_048_576;
/// Columns in a worksheet (A to XFD)
pub const MAX_COLUMNS: usize = 16_384;

impl CellRef {
    /// Creates a cell reference from zero-based coordinates
    pub fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Whether the cell lies inside the worksheet limits
    pub fn in_bounds(&self) -> bool {
        self.row < MAX_ROWS && self.column < MAX_COLUMNS
    }
}

/// Parses a column label ("A", "AB") into a zero-based index
pub fn parse_column_label(label: &str) -> Result<usize, String> {
    if label.is_empty() || label.len() > 3 {
        return Err(format!("Invalid column label: '{label}'"));
    }
    let mut index = 0usize;
    for c in label.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(format!("Invalid column label: '{label}'"));
        }
        index = index * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }
    if index > MAX_COLUMNS {
        return Err(format!("Column '{label}' is past the last column XFD"));
    }
    Ok(index - 1)
}

/// Formats a zero-based column index as a label
pub fn column_label(mut index: usize) -> String {
    let mut label = Vec::new();
    loop {
        label.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    label.iter().rev().collect()
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_label(self.column), self.row.saturating_add(1))
    }
}

impl FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| format!("Invalid cell reference: '{s}'"))?;
        let (letters, digits) = s.split_at(split);
        let column = parse_column_label(letters)
            .map_err(|_| format!("Invalid cell reference: '{s}'"))?;
        let row: usize = digits
            .parse()
            .map_err(|_| format!("Invalid cell reference: '{s}'"))?;
        if row == 0 {
            return Err(format!("Invalid cell reference: '{s}' (rows start at 1)"));
        }
        if row > MAX_ROWS {
            return Err(format!("Invalid cell reference: '{s}' (last row is {MAX_ROWS})"));
        }
        Ok(Self::new(column, row - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_cell() {
        let cell: CellRef = "A1".parse().unwrap();
        assert_eq!(cell, CellRef::new(0, 0));
    }

    #[test]
    fn test_parse_lowercase_cell() {
        let cell: CellRef = "c7".parse().unwrap();
        assert_eq!(cell, CellRef::new(2, 6));
        assert_eq!(cell.to_string(), "C7");
    }

    #[test]
    fn test_parse_invalid_cells() {
        assert!("".parse::<CellRef>().is_err());
        assert!("12".parse::<CellRef>().is_err());
        assert!("A0".parse::<CellRef>().is_err());
        assert!("A1B".parse::<CellRef>().is_err());
        assert!("$A$1".parse::<CellRef>().is_err());
    }

    #[test]
    fn test_parse_rejects_cells_past_sheet_limits() {
        let last: CellRef = "XFD1048576".parse().unwrap();
        assert_eq!(last, CellRef::new(MAX_COLUMNS - 1, MAX_ROWS - 1));
        assert!(last.in_bounds());

        assert!("A1048577".parse::<CellRef>().is_err());
        assert!("A18446744073709551615".parse::<CellRef>().is_err());
        assert!("XFE1".parse::<CellRef>().is_err());
        assert!(!CellRef::new(MAX_COLUMNS, 0).in_bounds());
    }

    #[test]
    fn test_column_label_round_trip() {
        for index in [0, 25, 26, 51, 52, 701, 702] {
            let label = column_label(index);
            assert_eq!(parse_column_label(&label).unwrap(), index);
        }
        assert_eq!(column_label(26), "AA");
        assert_eq!(column_label(701), "ZZ");
    }

    #[test]
    fn test_surface_id_serialization() {
        let json = serde_json::to_string(&SurfaceId::Page(1)).unwrap();
        assert_eq!(json, r#"{"kind":"page","index":1}"#);
        let image = serde_json::to_string(&SurfaceId::Image).unwrap();
        assert_eq!(image, r#"{"kind":"image"}"#);
    }
}
