//! Folding mapper: protein-matrix coordinates to organism attributes.
//!
//! The vertical axis trades heat resistance against structural integrity and the
//! horizontal axis trades growth against filtration. Both pairs are zero-sum.

use reefwright_data::{FoldingInput, OrganismAttributes};

/// Grid step of the folding matrix.
pub const FOLDING_STEP: f64 = 0.25;

/// Rounds to the nearest integer with halves going toward +∞.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Snaps one raw axis value onto the folding grid.
///
/// Clamping happens after rounding so values just outside the range still land on
/// the boundary. NaN maps to the centre.
#[must_use]
pub fn quantize_axis(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    let snapped = round_half_up(raw / FOLDING_STEP) * FOLDING_STEP;
    let clamped = snapped.clamp(-1.0, 1.0);
    // normalise -0.0
    clamped + 0.0
}

#[must_use]
pub fn quantize(x: f64, y: f64) -> FoldingInput {
    FoldingInput::new(quantize_axis(x), quantize_axis(y))
}

/// Attributes for an already-quantized folding input.
#[must_use]
pub fn attributes_for(input: &FoldingInput) -> OrganismAttributes {
    let heat_res = (input.y + 1.0) / 2.0 * 100.0;
    let filtration = (input.x + 1.0) / 2.0 * 100.0;
    OrganismAttributes {
        heat_res,
        integrity: 100.0 - heat_res,
        growth: 100.0 - filtration,
        filtration,
    }
}

/// Quantizes raw input and maps it to attributes.
#[must_use]
pub fn derive_attributes(x: f64, y: f64) -> OrganismAttributes {
    attributes_for(&quantize(x, y))
}

/// Every point of the 9×9 folding grid, row by row from `(-1, -1)`.
pub fn grid() -> impl Iterator<Item = FoldingInput> {
    let steps = (2.0 / FOLDING_STEP) as i32;
    (0..=steps).flat_map(move |iy| {
        (0..=steps).map(move |ix| {
            FoldingInput::new(
                -1.0 + ix as f64 * FOLDING_STEP,
                -1.0 + iy as f64 * FOLDING_STEP,
            )
        })
    })
}
