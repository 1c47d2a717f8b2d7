//! Timed deployment process.
//!
//! A [`DeploymentRun`] animates a verdict that is already fixed: progress climbs
//! toward 100 at a rate that depends only on that verdict, while status lines trickle
//! into a bounded rolling log. Runs are advanced one tick at a time by the owner, so
//! tests drive them without real delays and the binary paces them with a timer.

use crate::config::SimulationConfig;
use crate::simulator::{Outcome, RequirementCheck};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;
use uuid::Uuid;

pub const PROGRESS_COMPLETE: f64 = 100.0;

/// Smallest per-tick progress a run accepts, so every run terminates.
const MIN_INCREMENT: f64 = 0.01;

const SUCCESS_FLAVOR: &[&str] = &[
    "Colony expanding...",
    "Symbiotic bonds forming...",
    "Reef substrate stabilizing...",
    "Photosynthetic output rising...",
];

const FAILURE_FLAVOR: &[&str] = &[
    "Colony contracting...",
    "Cell membranes rupturing...",
    "Metabolic collapse imminent...",
    "Toxins accumulating...",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Running,
    Complete,
    Cancelled,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickEvent {
    /// The run is not running; nothing changed.
    Idle,
    Advanced { progress: f64 },
    /// This tick reached 100%. Reported exactly once per run.
    Completed,
}

#[derive(Debug, Clone)]
struct ScheduledLine {
    due_tick: u64,
    line: String,
}

#[derive(Debug, Clone)]
pub struct DeploymentRun {
    id: Uuid,
    outcome: Outcome,
    state: RunState,
    progress: f64,
    increment: f64,
    ticks: u64,
    period: Duration,
    pending: Vec<ScheduledLine>,
    log: VecDeque<String>,
    log_capacity: usize,
    flavor_chance: f64,
}

/// Status line for one requirement check.
#[must_use]
pub fn status_line(check: &RequirementCheck) -> String {
    if check.is_stressed() {
        format!(
            "{} stress detected: {} short by {:.0}",
            check.stressor.label(),
            check.stressor.attribute(),
            check.deficit()
        )
    } else {
        format!("{} adaptation successful", check.stressor.label())
    }
}

impl DeploymentRun {
    /// Starts a run for a verdict computed beforehand. Each requirement's status
    /// line is scheduled at a random tick within the expected run length.
    pub fn start(outcome: Outcome, config: &SimulationConfig, rng: &mut impl Rng) -> Self {
        let increment = if outcome.will_succeed {
            config.success_increment
        } else {
            config.failure_increment
        };
        let increment = if increment.is_finite() && increment >= MIN_INCREMENT {
            increment
        } else {
            MIN_INCREMENT
        };
        let flavor_chance = if config.flavor_chance.is_nan() {
            0.0
        } else {
            config.flavor_chance.clamp(0.0, 1.0)
        };
        let expected = expected_ticks(increment);

        let mut pending: Vec<ScheduledLine> = outcome
            .checks
            .iter()
            .map(|check| ScheduledLine {
                due_tick: rng.gen_range(1..=expected),
                line: status_line(check),
            })
            .collect();
        pending.sort_by_key(|s| s.due_tick);

        let run = Self {
            id: Uuid::new_v4(),
            outcome,
            state: RunState::Running,
            progress: 0.0,
            increment,
            ticks: 0,
            period: Duration::from_millis(config.tick_period_ms),
            pending,
            log: VecDeque::with_capacity(config.log_capacity),
            log_capacity: config.log_capacity,
            flavor_chance,
        };
        tracing::debug!(
            run_id = %run.id,
            will_succeed = run.outcome.will_succeed,
            expected_ticks = expected,
            "Deployment run started"
        );
        run
    }

    /// Advances the run by one tick.
    pub fn tick(&mut self, rng: &mut impl Rng) -> TickEvent {
        if self.state != RunState::Running {
            return TickEvent::Idle;
        }

        self.ticks += 1;
        self.progress += self.increment;

        let ticks = self.ticks;
        let split = self.pending.partition_point(|s| s.due_tick <= ticks);
        let due: Vec<ScheduledLine> = self.pending.drain(..split).collect();
        for scheduled in due {
            self.push_log(scheduled.line);
        }

        if rng.gen_bool(self.flavor_chance) {
            let pool = if self.outcome.will_succeed {
                SUCCESS_FLAVOR
            } else {
                FAILURE_FLAVOR
            };
            if let Some(line) = pool.choose(rng) {
                self.push_log((*line).to_string());
            }
        }

        if self.progress >= PROGRESS_COMPLETE {
            self.progress = PROGRESS_COMPLETE;
            self.state = RunState::Complete;
            self.pending.clear();
            tracing::debug!(run_id = %self.id, ticks = self.ticks, "Deployment run complete");
            TickEvent::Completed
        } else {
            TickEvent::Advanced {
                progress: self.progress,
            }
        }
    }

    /// Stops the run and drops every scheduled line. Idempotent.
    pub fn cancel(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Cancelled;
            self.pending.clear();
            tracing::debug!(run_id = %self.id, ticks = self.ticks, "Deployment run cancelled");
        }
    }

    fn push_log(&mut self, line: String) {
        if self.log.len() >= self.log_capacity {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == RunState::Complete
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn pending_lines(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn log(&self) -> &VecDeque<String> {
        &self.log
    }
}

/// Ticks needed to reach 100% at the given increment.
#[must_use]
pub fn expected_ticks(increment: f64) -> u64 {
    (PROGRESS_COMPLETE / increment).ceil().max(1.0) as u64
}
