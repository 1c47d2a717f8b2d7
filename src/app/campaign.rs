//! Headless campaign: plays every available mission once.

use reefwright_core::advisor::recommend_folding;
use reefwright_core::{Session, SessionError};
use reefwright_data::{FoldingInput, GlobalStats};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionReport {
    pub mission_id: String,
    pub title: String,
    pub folding: FoldingInput,
    pub survival_score: Option<f64>,
    pub success: bool,
    pub reward: i64,
    pub evolution_cost: i64,
    pub science_points: i64,
    /// Set when the mission was not deployed.
    pub skipped: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignReport {
    pub missions: Vec<MissionReport>,
    pub science_points: i64,
    pub global_stats: GlobalStats,
    pub critical: bool,
    pub successes: u64,
    pub failures: u64,
}

impl fmt::Display for CampaignReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.missions {
            match &m.skipped {
                Some(reason) => writeln!(f, "  - {:<32} skipped: {reason}", m.title)?,
                None => writeln!(
                    f,
                    "  {} {:<32} fold ({:+.2}, {:+.2}) score {:>6.1}  +{} -{}  => {} SP",
                    if m.success { "✓" } else { "✗" },
                    m.title,
                    m.folding.x,
                    m.folding.y,
                    m.survival_score.unwrap_or_default(),
                    m.reward,
                    m.evolution_cost,
                    m.science_points
                )?,
            }
        }
        writeln!(
            f,
            "Science Points: {} | Temp {:.0} Tox {:.0} Acid {:.0} Extinction {:.0}{}",
            self.science_points,
            self.global_stats.temperature,
            self.global_stats.toxicity,
            self.global_stats.acidity,
            self.global_stats.extinction_risk,
            if self.critical { " | CRITICAL" } else { "" }
        )?;
        write!(f, "Successes: {} Failures: {}", self.successes, self.failures)
    }
}

/// Runs one mission from the World phase back to the World phase.
async fn play_mission(
    session: &mut Session,
    mission_id: &str,
    fold: Option<FoldingInput>,
    pacing: Option<Duration>,
) -> Result<MissionReport, SessionError> {
    session.select_mission(mission_id)?;
    let (title, difficulty) = match session.selected_mission() {
        Some(m) => (m.title.clone(), m.difficulty),
        None => return Err(SessionError::NoSelectedMission),
    };
    let target =
        fold.unwrap_or_else(|| recommend_folding(&difficulty, &session.config().simulation));
    let folding = session.set_folding(target.x, target.y);

    let survival_score = match session.deploy() {
        Ok(outcome) => outcome.survival_score,
        Err(err) => {
            session.abort_lab()?;
            return Ok(MissionReport {
                mission_id: mission_id.to_string(),
                title,
                folding,
                survival_score: None,
                success: false,
                reward: 0,
                evolution_cost: session.deployment_cost(),
                science_points: session.science_points(),
                skipped: Some(err.to_string()),
            });
        }
    };

    let settlement = match pacing {
        Some(period) => {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                if let Some(settlement) = session.tick() {
                    break Some(settlement);
                }
                if session.run().map_or(true, |r| !r.is_running()) {
                    break None;
                }
            }
        }
        None => session.run_to_completion(),
    };
    session.return_to_world()?;

    let settlement = settlement.ok_or(SessionError::NoSelectedMission)?;
    Ok(MissionReport {
        mission_id: settlement.mission_id,
        title,
        folding,
        survival_score: Some(survival_score),
        success: settlement.success,
        reward: settlement.reward,
        evolution_cost: settlement.evolution_cost,
        science_points: settlement.science_points,
        skipped: None,
    })
}

/// Plays each mission that is available at the start, in catalog order.
///
/// `fold` pins the folding for every mission; otherwise the advisor picks one.
/// `pacing` ticks on a real timer instead of as fast as possible.
pub async fn run_campaign(
    session: &mut Session,
    fold: Option<FoldingInput>,
    pacing: Option<Duration>,
) -> CampaignReport {
    let mut missions = Vec::new();
    for mission_id in session.catalog().available_ids() {
        match play_mission(session, &mission_id, fold, pacing).await {
            Ok(report) => missions.push(report),
            Err(err) => tracing::warn!(mission_id = %mission_id, error = %err, "Mission skipped"),
        }
    }
    session.metrics().log_summary();

    let global_stats = session.global_stats();
    CampaignReport {
        missions,
        science_points: session.science_points(),
        global_stats,
        critical: global_stats.is_critical(),
        successes: session.metrics().successes(),
        failures: session.metrics().failures(),
    }
}
