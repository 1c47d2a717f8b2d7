//! Lab module loadout.
//!
//! Modules are bought into numbered slots with Science Points. Swapping a module
//! charges only the price difference and removing one refunds it. Modules are a
//! cosmetic sequence: they never feed into organism attributes or scoring.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SLOTS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModuleKind {
    Tetrahedron,
    Cube,
    Sphere,
    Cylinder,
}

/// Shop entry for a module kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BioModule {
    pub kind: ModuleKind,
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub cost: i64,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 4] = [
        ModuleKind::Tetrahedron,
        ModuleKind::Cube,
        ModuleKind::Sphere,
        ModuleKind::Cylinder,
    ];

    #[must_use]
    pub fn module(&self) -> BioModule {
        match self {
            ModuleKind::Tetrahedron => BioModule {
                kind: *self,
                id: "mod_tetra",
                name: "Thermo-Shell",
                description: "Heat resistant crystalline structure.",
                cost: 10,
            },
            ModuleKind::Cube => BioModule {
                kind: *self,
                id: "mod_cube",
                name: "Basalt Block",
                description: "Heavy reinforced plating.",
                cost: 10,
            },
            ModuleKind::Sphere => BioModule {
                kind: *self,
                id: "mod_sphere",
                name: "Bio-Core",
                description: "Rapid cell division unit.",
                cost: 15,
            },
            ModuleKind::Cylinder => BioModule {
                kind: *self,
                id: "mod_cyl",
                name: "Filter Tube",
                description: "Microplastic filtration system.",
                cost: 12,
            },
        }
    }

    #[must_use]
    pub fn cost(&self) -> i64 {
        self.module().cost
    }
}

fn slot_cost(kind: Option<ModuleKind>) -> i64 {
    kind.map_or(0, |k| k.cost())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    slots: Vec<Option<ModuleKind>>,
}

impl Default for Loadout {
    fn default() -> Self {
        Self::new(DEFAULT_SLOTS)
    }
}

impl Loadout {
    #[must_use]
    pub fn new(slots: usize) -> Self {
        Self {
            slots: vec![None; slots],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    #[must_use]
    pub fn slots(&self) -> &[Option<ModuleKind>] {
        &self.slots
    }

    #[must_use]
    pub fn get(&self, slot: usize) -> Option<ModuleKind> {
        self.slots.get(slot).copied().flatten()
    }

    /// Points spent on everything currently installed.
    #[must_use]
    pub fn total_cost(&self) -> i64 {
        self.slots.iter().map(|k| slot_cost(*k)).sum()
    }

    /// Price of putting `kind` into `slot`: positive charges, negative refunds.
    /// `None` when the slot does not exist.
    #[must_use]
    pub fn cost_delta(&self, slot: usize, kind: Option<ModuleKind>) -> Option<i64> {
        let current = self.slots.get(slot)?;
        Some(slot_cost(kind) - slot_cost(*current))
    }

    pub(crate) fn set(&mut self, slot: usize, kind: Option<ModuleKind>) -> Option<ModuleKind> {
        self.slots
            .get_mut(slot)
            .and_then(|s| std::mem::replace(s, kind))
    }

    /// Empties every slot and returns the points to refund.
    pub(crate) fn clear(&mut self) -> i64 {
        let refund = self.total_cost();
        self.slots.iter_mut().for_each(|s| *s = None);
        refund
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_prices() {
        let costs: Vec<i64> = ModuleKind::ALL.iter().map(ModuleKind::cost).collect();
        assert_eq!(costs, vec![10, 10, 15, 12]);
        assert_eq!(ModuleKind::Cylinder.module().name, "Filter Tube");
    }

    #[test]
    fn test_swap_charges_difference() {
        let mut loadout = Loadout::new(3);
        assert_eq!(loadout.cost_delta(0, Some(ModuleKind::Cube)), Some(10));
        loadout.set(0, Some(ModuleKind::Cube));
        assert_eq!(loadout.cost_delta(0, Some(ModuleKind::Sphere)), Some(5));
        assert_eq!(loadout.cost_delta(0, None), Some(-10));
        assert_eq!(loadout.cost_delta(3, Some(ModuleKind::Cube)), None);
    }

    #[test]
    fn test_clear_refunds_everything() {
        let mut loadout = Loadout::new(3);
        loadout.set(0, Some(ModuleKind::Sphere));
        loadout.set(2, Some(ModuleKind::Cylinder));
        assert_eq!(loadout.total_cost(), 27);
        assert_eq!(loadout.clear(), 27);
        assert!(loadout.is_empty());
        assert_eq!(loadout.len(), 3);
    }
}
