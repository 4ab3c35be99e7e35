use serde::{Deserialize, Serialize};

/// What occupies a grid cell.
///
/// Serialized as the single-character codes the landing page renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntityKind {
    #[default]
    #[serde(rename = " ")]
    Empty,
    #[serde(rename = "P")]
    Plant,
    #[serde(rename = "H")]
    Herbivore,
    #[serde(rename = "C")]
    Carnivore,
}

impl EntityKind {
    /// Animals track energy; plants and empty cells never do.
    #[must_use]
    pub fn has_energy(self) -> bool {
        matches!(self, EntityKind::Herbivore | EntityKind::Carnivore)
    }

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            EntityKind::Empty => ' ',
            EntityKind::Plant => 'P',
            EntityKind::Herbivore => 'H',
            EntityKind::Carnivore => 'C',
        }
    }
}

/// One grid cell as seen by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub energy: i32,
    pub age: i32,
}

impl Cell {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            kind: EntityKind::Empty,
            energy: 0,
            age: 0,
        }
    }

    #[must_use]
    pub const fn new(kind: EntityKind, energy: i32, age: i32) -> Self {
        Self { kind, energy, age }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind == EntityKind::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_serializes_with_type_codes() {
        let cell = Cell::new(EntityKind::Herbivore, 75, 3);
        let json = serde_json::to_value(cell).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "H", "energy": 75, "age": 3 })
        );
    }

    #[test]
    fn test_empty_cell_uses_blank_code() {
        let json = serde_json::to_string(&Cell::empty()).unwrap();
        assert_eq!(json, r#"{"type":" ","energy":0,"age":0}"#);
    }

    #[test]
    fn test_only_animals_track_energy() {
        assert!(!EntityKind::Empty.has_energy());
        assert!(!EntityKind::Plant.has_energy());
        assert!(EntityKind::Herbivore.has_energy());
        assert!(EntityKind::Carnivore.has_energy());
    }
}
