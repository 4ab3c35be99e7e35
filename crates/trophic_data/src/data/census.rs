use serde::{Deserialize, Serialize};

use super::cell::{Cell, EntityKind};

/// Population counts per kind for one grid state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Census {
    pub empty: usize,
    pub plants: usize,
    pub herbivores: usize,
    pub carnivores: usize,
}

impl Census {
    pub fn record(&mut self, kind: EntityKind) {
        match kind {
            EntityKind::Empty => self.empty += 1,
            EntityKind::Plant => self.plants += 1,
            EntityKind::Herbivore => self.herbivores += 1,
            EntityKind::Carnivore => self.carnivores += 1,
        }
    }

    /// Number of living entities of any kind.
    #[must_use]
    pub fn living(&self) -> usize {
        self.plants + self.herbivores + self.carnivores
    }

    #[must_use]
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Empty => self.empty,
            EntityKind::Plant => self.plants,
            EntityKind::Herbivore => self.herbivores,
            EntityKind::Carnivore => self.carnivores,
        }
    }
}

impl<'a> FromIterator<&'a Cell> for Census {
    fn from_iter<I: IntoIterator<Item = &'a Cell>>(iter: I) -> Self {
        let mut census = Census::default();
        for cell in iter {
            census.record(cell.kind);
        }
        census
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_census_counts_each_kind() {
        let cells = [
            Cell::empty(),
            Cell::new(EntityKind::Plant, 0, 1),
            Cell::new(EntityKind::Plant, 0, 2),
            Cell::new(EntityKind::Herbivore, 100, 0),
            Cell::new(EntityKind::Carnivore, 100, 0),
        ];
        let census: Census = cells.iter().collect();
        assert_eq!(census.empty, 1);
        assert_eq!(census.plants, 2);
        assert_eq!(census.count(EntityKind::Herbivore), 1);
        assert_eq!(census.living(), 4);
    }
}
