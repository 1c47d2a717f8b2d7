//! Outcome simulator.
//!
//! Scores an organism against a mission's difficulty vector. The verdict is a pure
//! function of its inputs; the timed presentation of that verdict lives in
//! [`crate::deployment`].

use crate::config::SimulationConfig;
use reefwright_data::{DifficultyVector, OrganismAttributes};
use serde::{Deserialize, Serialize};

/// Score every deployment starts from.
pub const BASE_SURVIVAL_SCORE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stressor {
    Temperature,
    Virulence,
    Pollution,
    Currents,
}

impl Stressor {
    pub const ALL: [Stressor; 4] = [
        Stressor::Temperature,
        Stressor::Virulence,
        Stressor::Pollution,
        Stressor::Currents,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Stressor::Temperature => "Thermal",
            Stressor::Virulence => "Pathogen",
            Stressor::Pollution => "Toxin",
            Stressor::Currents => "Current",
        }
    }

    /// Attribute the stressor is checked against.
    #[must_use]
    pub fn attribute(&self) -> &'static str {
        match self {
            Stressor::Temperature => "heat resistance",
            Stressor::Virulence => "integrity",
            Stressor::Pollution => "filtration",
            Stressor::Currents => "growth",
        }
    }
}

/// One requirement compared with the organism's matching attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequirementCheck {
    pub stressor: Stressor,
    pub requirement: f64,
    pub capacity: f64,
}

impl RequirementCheck {
    /// Positive shortfall, zero when the organism copes.
    #[must_use]
    pub fn deficit(&self) -> f64 {
        (self.requirement - self.capacity).max(0.0)
    }

    #[must_use]
    pub fn is_stressed(&self) -> bool {
        self.requirement - self.capacity > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub will_succeed: bool,
    pub survival_score: f64,
    pub checks: [RequirementCheck; 4],
}

impl Outcome {
    #[must_use]
    pub fn total_deficit(&self) -> f64 {
        self.checks.iter().map(RequirementCheck::deficit).sum()
    }
}

/// Heat resistance needed for a given water temperature.
#[must_use]
pub fn temperature_requirement(temp: f64, config: &SimulationConfig) -> f64 {
    ((temp - config.temperature_baseline) * config.temperature_scale).max(0.0)
}

#[must_use]
pub fn requirement_checks(
    attributes: &OrganismAttributes,
    difficulty: &DifficultyVector,
    config: &SimulationConfig,
) -> [RequirementCheck; 4] {
    [
        RequirementCheck {
            stressor: Stressor::Temperature,
            requirement: temperature_requirement(difficulty.temp, config),
            capacity: attributes.heat_res,
        },
        RequirementCheck {
            stressor: Stressor::Virulence,
            requirement: difficulty.virulence,
            capacity: attributes.integrity,
        },
        RequirementCheck {
            stressor: Stressor::Pollution,
            requirement: difficulty.pollution,
            capacity: attributes.filtration,
        },
        RequirementCheck {
            stressor: Stressor::Currents,
            requirement: difficulty.currents,
            capacity: attributes.growth,
        },
    ]
}

/// Deterministic verdict for an organism facing a mission.
#[must_use]
pub fn evaluate(
    attributes: &OrganismAttributes,
    difficulty: &DifficultyVector,
    config: &SimulationConfig,
) -> Outcome {
    let checks = requirement_checks(attributes, difficulty, config);
    let survival_score = checks
        .iter()
        .fold(BASE_SURVIVAL_SCORE, |score, check| score - check.deficit());
    Outcome {
        will_succeed: survival_score > config.success_threshold,
        survival_score,
        checks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_polarized_organism_clears_mild_mission() {
        let attrs = OrganismAttributes {
            heat_res: 100.0,
            integrity: 0.0,
            growth: 0.0,
            filtration: 100.0,
        };
        let difficulty = DifficultyVector {
            temp: 20.0,
            virulence: 0.0,
            pollution: 10.0,
            currents: 0.0,
        };
        let outcome = evaluate(&attrs, &difficulty, &SimulationConfig::default());
        assert_eq!(outcome.checks[0].requirement, 0.0);
        assert!(approx(outcome.survival_score, 100.0));
        assert!(outcome.will_succeed);
    }

    #[test]
    fn test_balanced_organism_fails_harsh_mission() {
        let attrs = OrganismAttributes::default();
        let difficulty = DifficultyVector {
            temp: 40.0,
            virulence: 80.0,
            pollution: 80.0,
            currents: 80.0,
        };
        let outcome = evaluate(&attrs, &difficulty, &SimulationConfig::default());
        assert!(approx(outcome.checks[0].requirement, 132.0));
        assert!(approx(outcome.checks[0].deficit(), 82.0));
        assert!(approx(outcome.checks[1].deficit(), 30.0));
        assert!(approx(outcome.checks[2].deficit(), 30.0));
        assert!(approx(outcome.checks[3].deficit(), 30.0));
        assert!(approx(outcome.survival_score, -72.0));
        assert!(!outcome.will_succeed);
    }

    #[test]
    fn test_cold_water_needs_no_heat_resistance() {
        let config = SimulationConfig::default();
        assert_eq!(temperature_requirement(5.0, &config), 0.0);
        assert_eq!(temperature_requirement(20.0, &config), 0.0);
        assert!(approx(temperature_requirement(25.0, &config), 33.0));
    }

    #[test]
    fn test_threshold_is_strict() {
        let attrs = OrganismAttributes::default();
        // deficit of exactly 70 on virulence leaves a score of 30
        let difficulty = DifficultyVector {
            temp: 0.0,
            virulence: 120.0,
            pollution: 0.0,
            currents: 0.0,
        };
        let outcome = evaluate(&attrs, &difficulty, &SimulationConfig::default());
        assert!(approx(outcome.survival_score, 30.0));
        assert!(!outcome.will_succeed);
    }

    #[test]
    fn test_surplus_does_not_raise_score() {
        let attrs = OrganismAttributes::default();
        let outcome = evaluate(
            &attrs,
            &DifficultyVector::default(),
            &SimulationConfig::default(),
        );
        assert_eq!(outcome.survival_score, BASE_SURVIVAL_SCORE);
        assert_eq!(outcome.total_deficit(), 0.0);
        assert!(outcome.checks.iter().all(|c| !c.is_stressed()));
    }

    mod properties {
        use super::approx;
        use crate::config::SimulationConfig;
        use crate::folding::{attributes_for, grid};
        use crate::simulator::{evaluate, BASE_SURVIVAL_SCORE};
        use proptest::prelude::*;
        use reefwright_data::DifficultyVector;

        prop_compose! {
            fn arb_difficulty()(
                temp in 0.0..40.0f64,
                virulence in 0.0..100.0f64,
                pollution in 0.0..100.0f64,
                currents in 0.0..100.0f64,
            ) -> DifficultyVector {
                DifficultyVector { temp, virulence, pollution, currents }
            }
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn test_score_is_base_minus_deficits(
                difficulty in arb_difficulty(),
                cell in 0usize..81,
            ) {
                let folding = grid().nth(cell).unwrap();
                let config = SimulationConfig::default();
                let outcome = evaluate(&attributes_for(&folding), &difficulty, &config);
                let expected = BASE_SURVIVAL_SCORE - outcome.total_deficit();
                prop_assert!(approx(outcome.survival_score, expected));
                prop_assert!(outcome.survival_score <= BASE_SURVIVAL_SCORE);
                let passed = outcome.survival_score > config.success_threshold;
                prop_assert_eq!(outcome.will_succeed, passed);
            }
        }
    }
}
