//! Cell and column replacement for workbooks

use super::outcome::{RedactionOutcome, SkippedRegion};
use super::text::mask_text;
use crate::adapters::traits::CellGrid;
use crate::detection::models::PhraseSet;
use crate::domain::ids::{parse_column_label, MAX_COLUMNS};
use crate::domain::{CellRef, RedlineError, Result};

/// Default replacement written into redacted cells
pub const DEFAULT_CELL_REPLACEMENT: &str = "REDACTED";

/// Parses a column given as a letter label (`"C"`) or a 1-based index (`"3"`)
///
/// Returns the zero-based column.
///
/// ```
/// use redline::redaction::grid::parse_column_spec;
///
/// assert_eq!(parse_column_spec("C"), Ok(2));
/// assert_eq!(parse_column_spec("3"), Ok(2));
/// assert!(parse_column_spec("0").is_err());
/// assert!(parse_column_spec("18446744073709551615").is_err());
/// ```
pub fn parse_column_spec(spec: &str) -> std::result::Result<usize, String> {
    let spec = spec.trim();
    if !spec.is_empty() && spec.chars().all(|c| c.is_ascii_digit()) {
        return match spec.parse::<usize>() {
            Ok(n) if (1..=MAX_COLUMNS).contains(&n) => Ok(n - 1),
            _ => Err(format!("Column index must be between 1 and {MAX_COLUMNS}: {spec}")),
        };
    }
    parse_column_label(spec)
}

/// Replaces listed cells and whole columns on every sheet
///
/// Column replacement covers every row of the used range. Specs that do not
/// parse are skipped and reported; the workbook is only saved when at least
/// one cell was written.
pub fn redact_cells<G>(
    original: &[u8],
    grid: &mut G,
    cells: &[String],
    columns: &[String],
    replacement: &str,
) -> Result<RedactionOutcome>
where
    G: CellGrid + ?Sized,
{
    let mut skipped = Vec::new();

    let cell_refs: Vec<CellRef> = cells
        .iter()
        .filter_map(|spec| match spec.parse::<CellRef>() {
            Ok(cell) => Some(cell),
            Err(reason) => {
                skipped.push(SkippedRegion::new(format!("cell {spec}"), reason));
                None
            }
        })
        .collect();

    let column_indices: Vec<usize> = columns
        .iter()
        .filter_map(|spec| match parse_column_spec(spec) {
            Ok(column) => Some(column),
            Err(reason) => {
                skipped.push(SkippedRegion::new(format!("column {spec}"), reason));
                None
            }
        })
        .collect();

    let mut applied = 0;
    for sheet in 0..grid.sheet_count() {
        for cell in &cell_refs {
            match grid.set_cell_text(sheet, *cell, replacement) {
                Ok(()) => applied += 1,
                Err(e) => skip_cell(&mut skipped, sheet, *cell, e),
            }
        }

        let rows = grid.dimensions(sheet).map_or(0, |(_, rows)| rows);
        for &column in &column_indices {
            for row in 0..rows {
                let cell = CellRef::new(column, row);
                match grid.set_cell_text(sheet, cell, replacement) {
                    Ok(()) => applied += 1,
                    Err(e) => skip_cell(&mut skipped, sheet, cell, e),
                }
            }
        }
    }

    if applied == 0 {
        return Ok(RedactionOutcome::unchanged(original, skipped));
    }

    tracing::debug!(
        applied,
        sheets = grid.sheet_count(),
        skipped = skipped.len(),
        "Cells replaced"
    );
    Ok(RedactionOutcome::changed(grid.save()?, applied, skipped))
}

fn skip_cell(skipped: &mut Vec<SkippedRegion>, sheet: usize, cell: CellRef, error: RedlineError) {
    skipped.push(SkippedRegion::new(
        format!("sheet {sheet} cell {cell}"),
        error.to_string(),
    ));
}

/// Masks phrases inside every non-empty cell of every sheet
pub fn mask_grid_phrases<G>(
    original: &[u8],
    grid: &mut G,
    phrases: &PhraseSet,
    mask_char: char,
) -> Result<RedactionOutcome>
where
    G: CellGrid + ?Sized,
{
    if phrases.is_empty() {
        return Ok(RedactionOutcome::unchanged(original, Vec::new()));
    }

    let mut applied = 0;
    let mut skipped = Vec::new();
    for sheet in 0..grid.sheet_count() {
        let Some((columns, rows)) = grid.dimensions(sheet) else {
            continue;
        };
        for row in 0..rows {
            for column in 0..columns {
                let cell = CellRef::new(column, row);
                let Some(text) = grid.cell_text(sheet, cell) else {
                    continue;
                };
                let (masked, replaced) = mask_text(&text, phrases, mask_char);
                if replaced == 0 {
                    continue;
                }
                match grid.set_cell_text(sheet, cell, &masked) {
                    Ok(()) => applied += replaced,
                    Err(e) => skip_cell(&mut skipped, sheet, cell, e),
                }
            }
        }
    }

    if applied == 0 {
        return Ok(RedactionOutcome::unchanged(original, skipped));
    }
    Ok(RedactionOutcome::changed(grid.save()?, applied, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::models::Phrase;
    use std::collections::BTreeMap;
    use test_case::test_case;

    #[derive(Default)]
    struct Sheets {
        sheets: Vec<BTreeMap<CellRef, String>>,
        /// Sheet that rejects writes
        protected: Option<usize>,
    }

    impl Sheets {
        fn with(rows: &[&[&str]], sheets: usize) -> Self {
            let mut sheet = BTreeMap::new();
            for (r, row) in rows.iter().enumerate() {
                for (c, value) in row.iter().enumerate() {
                    sheet.insert(CellRef::new(c, r), value.to_string());
                }
            }
            Self {
                sheets: vec![sheet; sheets],
                protected: None,
            }
        }

        fn get(&self, sheet: usize, cell: &str) -> Option<&str> {
            let cell: CellRef = cell.parse().unwrap();
            self.sheets[sheet].get(&cell).map(String::as_str)
        }
    }

    impl CellGrid for Sheets {
        fn sheet_count(&self) -> usize {
            self.sheets.len()
        }

        fn dimensions(&self, sheet: usize) -> Option<(usize, usize)> {
            let cells = self.sheets.get(sheet)?;
            let columns = cells.keys().map(|c| c.column + 1).max().unwrap_or(0);
            let rows = cells.keys().map(|c| c.row + 1).max().unwrap_or(0);
            Some((columns, rows))
        }

        fn cell_text(&self, sheet: usize, cell: CellRef) -> Option<String> {
            self.sheets.get(sheet)?.get(&cell).cloned()
        }

        fn set_cell_text(&mut self, sheet: usize, cell: CellRef, text: &str) -> Result<()> {
            if self.protected == Some(sheet) {
                return Err(RedlineError::surface(format!("sheet {sheet}"), "sheet is protected"));
            }
            if let Some(cells) = self.sheets.get_mut(sheet) {
                cells.insert(cell, text.to_string());
            }
            Ok(())
        }

        fn save(&self) -> Result<Vec<u8>> {
            Ok(b"saved".to_vec())
        }
    }

    #[test_case("A" => Ok(0); "letter")]
    #[test_case("aa" => Ok(26); "lowercase letters")]
    #[test_case("1" => Ok(0); "first index")]
    #[test_case("28" => Ok(27); "index")]
    fn test_parse_column_spec(spec: &str) -> std::result::Result<usize, String> {
        parse_column_spec(spec)
    }

    #[test_case("0")]
    #[test_case("")]
    #[test_case("A1")]
    fn test_parse_column_spec_rejects(spec: &str) {
        assert!(parse_column_spec(spec).is_err());
    }

    #[test]
    fn test_cells_and_columns_on_every_sheet() {
        let mut grid = Sheets::with(&[&["name", "ssn"], &["Ann", "123-45-6789"], &["Bo", "987-65-4321"]], 2);
        let outcome = redact_cells(
            b"xlsx",
            &mut grid,
            &["A2".to_string()],
            &["2".to_string()],
            DEFAULT_CELL_REPLACEMENT,
        )
        .unwrap();

        // one cell plus three rows of column B, on two sheets
        assert_eq!(outcome.applied, 8);
        assert_eq!(outcome.bytes, b"saved");
        for sheet in 0..2 {
            assert_eq!(grid.get(sheet, "A2"), Some("REDACTED"));
            assert_eq!(grid.get(sheet, "B3"), Some("REDACTED"));
            assert_eq!(grid.get(sheet, "A3"), Some("Bo"));
        }
    }

    #[test]
    fn test_invalid_specs_are_skipped() {
        let mut grid = Sheets::with(&[&["x"]], 1);
        let outcome = redact_cells(
            b"xlsx",
            &mut grid,
            &["?1".to_string()],
            &["0".to_string()],
            DEFAULT_CELL_REPLACEMENT,
        )
        .unwrap();
        assert!(outcome.is_unchanged());
        assert_eq!(outcome.bytes, b"xlsx");
        assert_eq!(outcome.skipped.len(), 2);
    }

    #[test]
    fn test_oversized_specs_are_skipped() {
        let mut grid = Sheets::with(&[&["x"]], 1);
        let outcome = redact_cells(
            b"xlsx",
            &mut grid,
            &["A18446744073709551615".to_string()],
            &["18446744073709551615".to_string(), "16385".to_string()],
            DEFAULT_CELL_REPLACEMENT,
        )
        .unwrap();
        assert!(outcome.is_unchanged());
        assert_eq!(outcome.skipped.len(), 3);
    }

    #[test]
    fn test_protected_sheet_is_skipped() {
        let mut grid = Sheets::with(&[&["a", "b"], &["c", "d"]], 2);
        grid.protected = Some(0);
        let outcome = redact_cells(
            b"xlsx",
            &mut grid,
            &["A1".to_string()],
            &["B".to_string()],
            DEFAULT_CELL_REPLACEMENT,
        )
        .unwrap();
        // A1 plus two rows of column B, on the writable sheet only
        assert_eq!(outcome.applied, 3);
        assert_eq!(outcome.skipped.len(), 3);
        assert!(outcome.skipped[0].target.starts_with("sheet 0 cell"));
        assert_eq!(grid.get(0, "A1"), Some("a"));
        assert_eq!(grid.get(1, "A1"), Some("REDACTED"));
    }

    #[test]
    fn test_mask_grid_phrases() {
        let mut grid = Sheets::with(&[&["mail alice@example.com", "ok"]], 1);
        let mut phrases = PhraseSet::new();
        phrases.insert(Phrase::literal("alice@example.com"));
        let outcome = mask_grid_phrases(b"xlsx", &mut grid, &phrases, '#').unwrap();
        assert_eq!(outcome.applied, 1);
        assert_eq!(grid.get(0, "A1"), Some("mail #################"));
        assert_eq!(grid.get(0, "B1"), Some("ok"));
    }
}
