use serde::{Deserialize, Serialize};

/// Position of the protein-folding control, both axes in `[-1, 1]`.
///
/// Values stored here are expected to be quantized already; the mapper in
/// `reefwright_core::folding` is the only producer inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FoldingInput {
    /// Metabolic axis: left favours growth, right favours filtration.
    pub x: f64,
    /// Stability axis: down favours integrity, up favours heat resistance.
    pub y: f64,
}

impl FoldingInput {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Manhattan distance from the balanced origin.
    #[must_use]
    pub fn displacement(&self) -> f64 {
        self.x.abs() + self.y.abs()
    }
}

/// The four organism attributes, each in `[0, 100]`.
///
/// `heat_res + integrity == 100` and `growth + filtration == 100` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganismAttributes {
    pub heat_res: f64,
    pub integrity: f64,
    pub growth: f64,
    pub filtration: f64,
}

impl Default for OrganismAttributes {
    fn default() -> Self {
        Self {
            heat_res: 50.0,
            integrity: 50.0,
            growth: 50.0,
            filtration: 50.0,
        }
    }
}
