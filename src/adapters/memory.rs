//! In-memory text containers and cell grids

use super::traits::{CellGrid, TextContainer};
use crate::domain::{CellRef, RedlineError, Result};
use serde::{Deserialize, Serialize};

/// Plain text where every line is one unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineDocument {
    lines: Vec<String>,
    trailing_newline: bool,
}

impl LineDocument {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
            trailing_newline: text.ends_with('\n'),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| RedlineError::Decode(format!("Input is not UTF-8: {e}")))?;
        Ok(Self::from_text(text))
    }

    pub fn text(&self) -> String {
        let mut text = self.lines.join("\n");
        if self.trailing_newline {
            text.push('\n');
        }
        text
    }
}

impl TextContainer for LineDocument {
    fn unit_count(&self) -> usize {
        self.lines.len()
    }

    fn unit_text(&self, index: usize) -> Option<String> {
        self.lines.get(index).cloned()
    }

    fn replace_unit_text(&mut self, index: usize, text: &str) -> Result<()> {
        let line = self
            .lines
            .get_mut(index)
            .ok_or_else(|| RedlineError::Validation(format!("No line at index {index}")))?;
        *line = text.to_string();
        Ok(())
    }

    fn save(&self) -> Result<Vec<u8>> {
        Ok(self.text().into_bytes())
    }
}

/// One named sheet of rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySheet {
    pub name: String,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

/// Workbook held as JSON: `{"sheets": [{"name": "...", "rows": [["a", "b"]]}]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryGrid {
    pub sheets: Vec<MemorySheet>,
}

impl MemoryGrid {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| RedlineError::Decode(format!("Invalid workbook: {e}")))
    }
}

impl CellGrid for MemoryGrid {
    fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    fn dimensions(&self, sheet: usize) -> Option<(usize, usize)> {
        let sheet = self.sheets.get(sheet)?;
        let columns = sheet.rows.iter().map(Vec::len).max().unwrap_or(0);
        Some((columns, sheet.rows.len()))
    }

    fn cell_text(&self, sheet: usize, cell: CellRef) -> Option<String> {
        self.sheets
            .get(sheet)?
            .rows
            .get(cell.row)?
            .get(cell.column)
            .filter(|value| !value.is_empty())
            .cloned()
    }

    /// Grows the sheet as needed, like writing past the used range of a workbook
    fn set_cell_text(&mut self, sheet: usize, cell: CellRef, text: &str) -> Result<()> {
        if !cell.in_bounds() {
            return Err(RedlineError::surface(
                format!("sheet {sheet}"),
                format!("cell {cell} is outside the worksheet"),
            ));
        }
        let target = self
            .sheets
            .get_mut(sheet)
            .ok_or_else(|| RedlineError::surface(format!("sheet {sheet}"), "sheet does not exist"))?;
        if target.rows.len() <= cell.row {
            target.rows.resize_with(cell.row + 1, Vec::new);
        }
        let row = &mut target.rows[cell.row];
        if row.len() <= cell.column {
            row.resize(cell.column + 1, String::new());
        }
        row[cell.column] = text.to_string();
        Ok(())
    }

    fn save(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}
