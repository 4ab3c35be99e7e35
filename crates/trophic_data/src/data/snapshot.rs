use std::fmt;

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::census::Census;

/// Row-major copy of the grid returned after every operation.
///
/// Serializes transparently as an array of rows, each an array of cells.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridSnapshot {
    pub rows: Vec<Vec<Cell>>,
}

impl GridSnapshot {
    #[must_use]
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    #[must_use]
    pub fn census(&self) -> Census {
        self.cells().collect()
    }
}

/// One line per row, one symbol per cell.
impl fmt::Display for GridSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let line: String = row.iter().map(|cell| cell.kind.symbol()).collect();
            writeln!(f, "|{line}|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::cell::EntityKind;

    #[test]
    fn test_snapshot_serializes_as_nested_arrays() {
        let snapshot = GridSnapshot::new(vec![
            vec![Cell::empty(), Cell::new(EntityKind::Plant, 0, 4)],
            vec![Cell::new(EntityKind::Carnivore, 90, 7), Cell::empty()],
        ]);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json[0][1]["type"], "P");
        assert_eq!(json[1][0]["energy"], 90);
        assert_eq!(json.as_array().map(Vec::len), Some(2));
        assert_eq!(snapshot.width(), 2);
        assert_eq!(snapshot.census().living(), 2);
    }

    #[test]
    fn test_display_draws_one_symbol_per_cell() {
        let snapshot = GridSnapshot::new(vec![
            vec![Cell::new(EntityKind::Herbivore, 100, 0), Cell::empty()],
            vec![
                Cell::new(EntityKind::Plant, 0, 1),
                Cell::new(EntityKind::Carnivore, 50, 3),
            ],
        ]);
        assert_eq!(snapshot.to_string(), "|H |\n|PC|\n");
    }
}
