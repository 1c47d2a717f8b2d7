//! Session state machine.
//!
//! Owns every piece of mutable game state (catalog, folding input, ledger, the
//! active deployment run) and moves through `World → Lab → Simulation → Result`.
//! Presentation code reads a [`SessionView`] and writes through the transition
//! methods; rejected requests leave the session unchanged.

use crate::catalog::{CatalogOrigin, MissionCatalog};
use crate::config::AppConfig;
use crate::deployment::{DeploymentRun, TickEvent};
use crate::error::{Result, SessionError};
use crate::folding::{attributes_for, quantize};
use crate::ledger::{evolution_cost, Ledger, Settlement};
use crate::loadout::{Loadout, ModuleKind};
use crate::metrics::Metrics;
use crate::simulator::{evaluate, Outcome};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use reefwright_data::{FoldingInput, GlobalStats, Mission, OrganismAttributes};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    #[default]
    World,
    Lab,
    Simulation,
    Result,
}

/// Read-only snapshot for the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub phase: Phase,
    pub selected_mission: Option<Mission>,
    pub folding: FoldingInput,
    pub attributes: OrganismAttributes,
    pub science_points: i64,
    pub global_stats: GlobalStats,
    pub critical: bool,
    pub progress: f64,
    pub log: Vec<String>,
    pub catalog_origin: CatalogOrigin,
    pub loadout: Loadout,
}

pub struct Session {
    phase: Phase,
    catalog: MissionCatalog,
    /// Catalog as handed in, restored by [`Session::reset`].
    initial_catalog: MissionCatalog,
    selected: Option<String>,
    folding: FoldingInput,
    loadout: Loadout,
    ledger: Ledger,
    seeded_temperature: Option<f64>,
    started: bool,
    run: Option<DeploymentRun>,
    last_settlement: Option<Settlement>,
    config: AppConfig,
    rng: ChaCha8Rng,
    metrics: Metrics,
}

impl Session {
    #[must_use]
    pub fn new(config: AppConfig, catalog: MissionCatalog) -> Self {
        let rng = match config.simulation.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let ledger = Self::fresh_ledger(&config);
        tracing::info!(
            fingerprint = %config.fingerprint(),
            missions = catalog.len(),
            origin = ?catalog.origin(),
            "Session started"
        );
        Self {
            phase: Phase::World,
            initial_catalog: catalog.clone(),
            catalog,
            selected: None,
            folding: FoldingInput::default(),
            loadout: Loadout::new(config.economy.loadout_slots),
            ledger,
            seeded_temperature: None,
            started: false,
            run: None,
            last_settlement: None,
            config,
            rng,
            metrics: Metrics::new(),
        }
    }

    /// Like [`Session::new`], but refuses a config that fails validation.
    pub fn try_new(config: AppConfig, catalog: MissionCatalog) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self::new(config, catalog))
    }

    fn fresh_ledger(config: &AppConfig) -> Ledger {
        Ledger::new(
            &config.economy,
            config.world.initial_stats,
            config.restoration.clone(),
        )
    }

    // ---- reads ----

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn catalog(&self) -> &MissionCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn selected_mission(&self) -> Option<&Mission> {
        self.selected.as_deref().and_then(|id| self.catalog.get(id))
    }

    #[must_use]
    pub fn folding(&self) -> FoldingInput {
        self.folding
    }

    /// Always derived from the current folding input.
    #[must_use]
    pub fn attributes(&self) -> OrganismAttributes {
        attributes_for(&self.folding)
    }

    /// Cost of deploying with the current folding input.
    #[must_use]
    pub fn deployment_cost(&self) -> i64 {
        evolution_cost(&self.folding)
    }

    #[must_use]
    pub fn science_points(&self) -> i64 {
        self.ledger.science_points()
    }

    #[must_use]
    pub fn global_stats(&self) -> GlobalStats {
        self.ledger.global_stats()
    }

    #[must_use]
    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    /// Whether anything has been played since the session opened or was reset.
    #[must_use]
    pub fn has_started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    #[must_use]
    pub fn run(&self) -> Option<&DeploymentRun> {
        self.run.as_ref()
    }

    /// Verdict of the current or just-finished deployment.
    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.run.as_ref().map(DeploymentRun::outcome)
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.run.as_ref().map_or(0.0, DeploymentRun::progress)
    }

    #[must_use]
    pub fn log(&self) -> Vec<String> {
        self.run
            .as_ref()
            .map(|r| r.log().iter().cloned().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn last_settlement(&self) -> Option<&Settlement> {
        self.last_settlement.as_ref()
    }

    #[must_use]
    pub fn view(&self) -> SessionView {
        let global_stats = self.global_stats();
        SessionView {
            phase: self.phase,
            selected_mission: self.selected_mission().cloned(),
            folding: self.folding,
            attributes: self.attributes(),
            science_points: self.science_points(),
            global_stats,
            critical: global_stats.is_critical(),
            progress: self.progress(),
            log: self.log(),
            catalog_origin: self.catalog.origin(),
            loadout: self.loadout.clone(),
        }
    }

    // ---- writes ----

    /// Replaces the starting temperature, typically from observed ocean anomalies.
    pub fn seed_temperature(&mut self, temperature: f64) {
        self.seeded_temperature = Some(temperature);
        self.ledger.seed_temperature(temperature);
    }

    /// Starts a new game: starting balance and stats, the original catalog, an
    /// empty loadout and the World phase. A running deployment is cancelled.
    pub fn reset(&mut self) {
        self.cancel_run();
        self.ledger = Self::fresh_ledger(&self.config);
        if let Some(temperature) = self.seeded_temperature {
            self.ledger.seed_temperature(temperature);
        }
        self.catalog = self.initial_catalog.clone();
        self.selected = None;
        self.folding = FoldingInput::default();
        self.loadout = Loadout::new(self.config.economy.loadout_slots);
        self.run = None;
        self.last_settlement = None;
        self.started = false;
        self.transition(Phase::World);
        tracing::info!(
            science_points = self.ledger.science_points(),
            missions = self.catalog.len(),
            "Session reset"
        );
    }

    /// Puts `kind` into a loadout slot, or empties the slot if it already holds
    /// that module. Returns the points charged (negative when refunded).
    pub fn toggle_module(&mut self, slot: usize, kind: ModuleKind) -> Result<i64> {
        let next = if self.loadout.get(slot) == Some(kind) {
            None
        } else {
            Some(kind)
        };
        self.set_slot(slot, next)
    }

    /// Empties a loadout slot and refunds its module.
    pub fn clear_slot(&mut self, slot: usize) -> Result<i64> {
        self.set_slot(slot, None)
    }

    /// Empties every slot. Returns the points refunded.
    pub fn clear_loadout(&mut self) -> Result<i64> {
        if self.phase != Phase::Lab {
            return Err(SessionError::invalid_transition(self.phase, "edit the loadout"));
        }
        let refund = self.loadout.clear();
        self.ledger.spend(-refund);
        tracing::debug!(refund, "Loadout cleared");
        Ok(refund)
    }

    fn set_slot(&mut self, slot: usize, kind: Option<ModuleKind>) -> Result<i64> {
        if self.phase != Phase::Lab {
            return Err(SessionError::invalid_transition(self.phase, "edit the loadout"));
        }
        let delta = self
            .loadout
            .cost_delta(slot, kind)
            .ok_or(SessionError::SlotOutOfRange {
                slot,
                slots: self.loadout.len(),
            })?;
        if !self.ledger.spend(delta) {
            return Err(SessionError::Unaffordable {
                cost: delta,
                balance: self.ledger.science_points(),
            });
        }
        self.loadout.set(slot, kind);
        tracing::debug!(slot, module = ?kind, delta, "Loadout slot changed");
        Ok(delta)
    }

    /// Accepts a raw folding coordinate from the input surface.
    ///
    /// A change while a deployment is running cancels it and returns to the lab.
    pub fn set_folding(&mut self, x: f64, y: f64) -> FoldingInput {
        let next = quantize(x, y);
        if next == self.folding {
            return next;
        }
        self.folding = next;
        if self.phase == Phase::Simulation {
            self.cancel_run();
            self.transition(Phase::Lab);
        }
        next
    }

    pub fn select_mission(&mut self, mission_id: &str) -> Result<()> {
        if self.phase != Phase::World {
            return Err(SessionError::invalid_transition(self.phase, "select a mission"));
        }
        let mission = self
            .catalog
            .get(mission_id)
            .ok_or_else(|| SessionError::not_found(mission_id))?;
        if !mission.is_available() {
            return Err(SessionError::unavailable(mission_id));
        }
        self.selected = Some(mission.id.clone());
        self.started = true;
        self.transition(Phase::Lab);
        Ok(())
    }

    /// Leaves the lab without deploying. Nothing is charged.
    pub fn abort_lab(&mut self) -> Result<()> {
        if self.phase != Phase::Lab {
            return Err(SessionError::invalid_transition(self.phase, "abort"));
        }
        self.selected = None;
        self.transition(Phase::World);
        Ok(())
    }

    /// Starts a deployment of the current organism against the selected mission.
    pub fn deploy(&mut self) -> Result<&Outcome> {
        if self.phase != Phase::Lab {
            return Err(SessionError::invalid_transition(self.phase, "deploy"));
        }
        let mission_id = self.selected.clone().ok_or(SessionError::NoSelectedMission)?;
        let mission = self
            .catalog
            .get(&mission_id)
            .ok_or_else(|| SessionError::not_found(mission_id.as_str()))?;
        if !mission.is_available() {
            return Err(SessionError::unavailable(mission_id));
        }

        let cost = evolution_cost(&self.folding);
        if self.config.economy.enforce_deploy_affordability && !self.ledger.can_afford(cost) {
            return Err(SessionError::Unaffordable {
                cost,
                balance: self.ledger.science_points(),
            });
        }

        let outcome = evaluate(
            &self.attributes(),
            &mission.difficulty,
            &self.config.simulation,
        );
        self.cancel_run();
        let run = DeploymentRun::start(outcome, &self.config.simulation, &mut self.rng);
        tracing::info!(
            mission_id = %mission_id,
            run_id = %run.id(),
            survival_score = run.outcome().survival_score,
            will_succeed = run.outcome().will_succeed,
            cost,
            "Deploying organism"
        );
        self.metrics.record_deployment();
        self.transition(Phase::Simulation);
        Ok(self.run.insert(run).outcome())
    }

    /// Advances the active deployment by one tick.
    ///
    /// Returns the settlement on the tick that completes the run; the ledger is
    /// invoked at that point and never again for the same run.
    pub fn tick(&mut self) -> Option<Settlement> {
        if self.phase != Phase::Simulation {
            return None;
        }
        let event = match self.run.as_mut() {
            Some(run) => run.tick(&mut self.rng),
            None => return None,
        };
        match event {
            TickEvent::Idle => None,
            TickEvent::Advanced { .. } => {
                self.metrics.record_tick();
                None
            }
            TickEvent::Completed => {
                self.metrics.record_tick();
                self.settle()
            }
        }
    }

    /// Ticks until the active run completes. Returns `None` if nothing is running.
    pub fn run_to_completion(&mut self) -> Option<Settlement> {
        while self.phase == Phase::Simulation && self.run.as_ref().is_some_and(|r| r.is_running()) {
            if let Some(settlement) = self.tick() {
                return Some(settlement);
            }
        }
        None
    }

    /// Abandons a running deployment and returns to the lab. Nothing is charged.
    pub fn cancel_simulation(&mut self) -> Result<()> {
        if self.phase != Phase::Simulation {
            return Err(SessionError::invalid_transition(self.phase, "cancel a deployment"));
        }
        self.cancel_run();
        self.transition(Phase::Lab);
        Ok(())
    }

    pub fn return_to_world(&mut self) -> Result<()> {
        if self.phase != Phase::Result {
            return Err(SessionError::invalid_transition(self.phase, "return to world"));
        }
        self.selected = None;
        self.run = None;
        self.transition(Phase::World);
        Ok(())
    }

    fn cancel_run(&mut self) {
        if let Some(mut run) = self.run.take() {
            if run.is_running() {
                run.cancel();
                self.metrics.record_cancellation();
            }
        }
    }

    fn settle(&mut self) -> Option<Settlement> {
        let will_succeed = self.run.as_ref()?.outcome().will_succeed;
        self.transition(Phase::Result);

        let mission_id = self.selected.as_deref()?;
        let mission = self.catalog.get_mut(mission_id)?;
        let settlement = self
            .ledger
            .complete_mission(mission, will_succeed, &self.folding)?;
        self.metrics.record_completion(settlement.success);
        self.last_settlement = Some(settlement.clone());
        Some(settlement)
    }

    fn transition(&mut self, next: Phase) {
        tracing::debug!(from = ?self.phase, to = ?next, "Phase transition");
        self.phase = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reefwright_data::MissionStatus;

    fn session() -> Session {
        let mut config = AppConfig::default();
        config.simulation.seed = Some(11);
        Session::new(config, MissionCatalog::static_seed())
    }

    #[test]
    fn test_initial_state() {
        let s = session();
        assert_eq!(s.phase(), Phase::World);
        assert!(s.selected_mission().is_none());
        assert_eq!(s.science_points(), 100);
        assert_eq!(s.attributes(), OrganismAttributes::default());
        assert_eq!(s.progress(), 0.0);
    }

    #[test]
    fn test_full_cycle() {
        let mut s = session();
        s.select_mission("m2_gyre").unwrap();
        assert_eq!(s.phase(), Phase::Lab);
        s.set_folding(0.5, 0.0);
        let outcome = s.deploy().unwrap().clone();
        assert!(outcome.will_succeed);
        assert_eq!(s.phase(), Phase::Simulation);

        let settlement = s.run_to_completion().unwrap();
        assert_eq!(s.phase(), Phase::Result);
        assert_eq!(settlement.reward, 150);
        assert_eq!(settlement.evolution_cost, 50);
        assert_eq!(s.science_points(), 200);
        assert_eq!(s.progress(), 100.0);
        assert_eq!(
            s.catalog().get("m2_gyre").unwrap().status,
            MissionStatus::Completed
        );

        s.return_to_world().unwrap();
        assert_eq!(s.phase(), Phase::World);
        assert!(s.selected_mission().is_none());
    }

    #[test]
    fn test_select_requires_world() {
        let mut s = session();
        s.select_mission("m1_coral").unwrap();
        let err = s.select_mission("m2_gyre").unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition { .. }));
        assert_eq!(s.selected_mission().unwrap().id, "m1_coral");
    }

    #[test]
    fn test_unknown_mission_rejected() {
        let mut s = session();
        assert_eq!(
            s.select_mission("nope"),
            Err(SessionError::MissionNotFound("nope".to_string()))
        );
        assert_eq!(s.phase(), Phase::World);
    }

    #[test]
    fn test_abort_lab_charges_nothing() {
        let mut s = session();
        s.select_mission("m1_coral").unwrap();
        s.set_folding(1.0, 1.0);
        s.abort_lab().unwrap();
        assert_eq!(s.phase(), Phase::World);
        assert!(s.selected_mission().is_none());
        assert_eq!(s.science_points(), 100);
        assert_eq!(s.global_stats(), GlobalStats::default());
    }

    #[test]
    fn test_unaffordable_deploy_is_rejected() {
        let mut config = AppConfig::default();
        config.economy.starting_science_points = 150;
        let mut s = Session::new(config, MissionCatalog::static_seed());
        s.select_mission("m1_coral").unwrap();
        s.set_folding(1.0, -1.0);
        assert_eq!(
            s.deploy().unwrap_err(),
            SessionError::Unaffordable {
                cost: 200,
                balance: 150
            }
        );
        assert_eq!(s.phase(), Phase::Lab);
        assert!(s.run().is_none());
        assert_eq!(s.science_points(), 150);
    }

    #[test]
    fn test_tick_outside_simulation_is_noop() {
        let mut s = session();
        assert!(s.tick().is_none());
        s.select_mission("m1_coral").unwrap();
        assert!(s.tick().is_none());
        assert_eq!(s.phase(), Phase::Lab);
    }

    #[test]
    fn test_folding_change_cancels_run() {
        let mut s = session();
        s.select_mission("m1_coral").unwrap();
        s.deploy().unwrap();
        s.tick();
        s.set_folding(0.0, 0.75);
        assert_eq!(s.phase(), Phase::Lab);
        assert!(s.run().is_none());
        assert_eq!(s.metrics().cancellations(), 1);
        assert_eq!(s.science_points(), 100);
    }

    #[test]
    fn test_same_folding_does_not_cancel() {
        let mut s = session();
        s.select_mission("m1_coral").unwrap();
        s.deploy().unwrap();
        s.set_folding(0.05, -0.05);
        assert_eq!(s.phase(), Phase::Simulation);
    }

    #[test]
    fn test_invalid_config_is_refused_or_clamped() {
        let mut config = AppConfig::default();
        config.simulation.flavor_chance = 1.5;
        config.simulation.seed = Some(2);
        assert!(Session::try_new(config.clone(), MissionCatalog::static_seed()).is_err());

        let mut s = Session::new(config, MissionCatalog::static_seed());
        s.select_mission("m2_gyre").unwrap();
        s.deploy().unwrap();
        assert!(s.tick().is_none());
        assert!(s.run_to_completion().is_some());
        assert_eq!(s.log().len(), 5);
    }

    #[test]
    fn test_module_purchase_guarded_by_balance() {
        let mut config = AppConfig::default();
        config.economy.starting_science_points = 20;
        let mut s = Session::new(config, MissionCatalog::static_seed());
        assert!(matches!(
            s.toggle_module(0, ModuleKind::Cube),
            Err(SessionError::InvalidTransition { .. })
        ));

        s.select_mission("m1_coral").unwrap();
        assert_eq!(s.toggle_module(0, ModuleKind::Cube), Ok(10));
        assert_eq!(s.science_points(), 10);
        assert_eq!(
            s.toggle_module(1, ModuleKind::Sphere),
            Err(SessionError::Unaffordable {
                cost: 15,
                balance: 10
            })
        );
        assert_eq!(s.loadout().get(1), None);
        assert_eq!(s.science_points(), 10);

        // swapping charges only the difference
        assert_eq!(s.toggle_module(0, ModuleKind::Cylinder), Ok(2));
        assert_eq!(s.science_points(), 8);
        assert_eq!(s.attributes(), OrganismAttributes::default());
        assert_eq!(
            s.clear_slot(6),
            Err(SessionError::SlotOutOfRange { slot: 6, slots: 6 })
        );
    }

    #[test]
    fn test_removing_modules_refunds() {
        let mut s = session();
        s.select_mission("m1_coral").unwrap();
        s.toggle_module(0, ModuleKind::Sphere).unwrap();
        s.toggle_module(3, ModuleKind::Tetrahedron).unwrap();
        assert_eq!(s.science_points(), 75);

        assert_eq!(s.toggle_module(3, ModuleKind::Tetrahedron), Ok(-10));
        assert_eq!(s.science_points(), 85);
        s.toggle_module(5, ModuleKind::Cube).unwrap();
        assert_eq!(s.clear_loadout(), Ok(25));
        assert_eq!(s.science_points(), 100);
        assert!(s.loadout().is_empty());
    }

    #[test]
    fn test_reset_restores_starting_state() {
        let mut s = session();
        s.seed_temperature(70.0);
        s.select_mission("m2_gyre").unwrap();
        assert!(s.has_started());
        s.toggle_module(0, ModuleKind::Cube).unwrap();
        s.set_folding(0.5, 0.0);
        s.deploy().unwrap();
        s.run_to_completion().unwrap();
        s.return_to_world().unwrap();
        s.select_mission("m1_coral").unwrap();
        s.deploy().unwrap();
        s.tick();

        s.reset();
        assert_eq!(s.phase(), Phase::World);
        assert!(!s.has_started());
        assert!(s.run().is_none());
        assert!(s.last_settlement().is_none());
        assert_eq!(s.science_points(), 100);
        assert_eq!(s.global_stats().temperature, 70.0);
        assert_eq!(s.global_stats().toxicity, GlobalStats::default().toxicity);
        assert!(s.loadout().is_empty());
        assert_eq!(s.folding(), FoldingInput::default());
        assert_eq!(s.catalog().count(MissionStatus::Available), 3);
        assert_eq!(s.metrics().cancellations(), 1);
    }

    #[test]
    fn test_view_reflects_state() {
        let mut s = session();
        s.select_mission("m3_baltic").unwrap();
        s.set_folding(-0.3, 0.9);
        let view = s.view();
        assert_eq!(view.phase, Phase::Lab);
        assert_eq!(view.selected_mission.unwrap().id, "m3_baltic");
        assert_eq!(view.folding, FoldingInput::new(-0.25, 1.0));
        assert_eq!(view.attributes.heat_res, 100.0);
        assert!(!view.critical);
        assert!(view.log.is_empty());
    }
}
