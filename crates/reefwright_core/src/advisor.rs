//! Folding advisor used by the headless runner.

use crate::config::SimulationConfig;
use crate::folding::{attributes_for, grid};
use crate::ledger::evolution_cost;
use crate::simulator::evaluate;
use reefwright_data::{DifficultyVector, FoldingInput};

/// Best grid folding for a mission: highest survival score, then cheapest.
#[must_use]
pub fn recommend_folding(difficulty: &DifficultyVector, config: &SimulationConfig) -> FoldingInput {
    let mut best = FoldingInput::default();
    let mut best_key = (f64::NEG_INFINITY, i64::MIN);
    for candidate in grid() {
        let score = evaluate(&attributes_for(&candidate), difficulty, config).survival_score;
        let key = (score, -evolution_cost(&candidate));
        if key.0 > best_key.0 || (key.0 == best_key.0 && key.1 > best_key.1) {
            best = candidate;
            best_key = key;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easy_mission_keeps_origin() {
        let fold = recommend_folding(&DifficultyVector::default(), &SimulationConfig::default());
        assert_eq!(fold, FoldingInput::default());
    }

    #[test]
    fn test_hot_mission_pushes_heat_resistance() {
        let difficulty = DifficultyVector {
            temp: 30.0,
            virulence: 0.0,
            pollution: 10.0,
            currents: 20.0,
        };
        let fold = recommend_folding(&difficulty, &SimulationConfig::default());
        // 66 heat resistance needed: y = 0.5 gives 75
        assert_eq!(fold.y, 0.5);
        let outcome = evaluate(&attributes_for(&fold), &difficulty, &SimulationConfig::default());
        assert!(outcome.will_succeed);
        assert_eq!(outcome.survival_score, 100.0);
    }
}
