//! Service facade: runs scenarios and serves queries.
//!
//! Kinds execute sequentially and commit independently — a failure in one
//! kind leaves earlier kinds' committed batches in place (there is no
//! cross-kind transaction).

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    database::Database,
    error::SimResult,
    lane_change, obstacle_avoidance, pedestrian_stop,
    rng::ScenarioRng,
    scenario::ScenarioKind,
    store::{RowMap, TelemetryStore},
    types::Tick,
};

pub struct Simulator {
    pub store: TelemetryStore,
}

impl Simulator {
    /// Wire the store onto the shared database and make sure the schema
    /// exists.
    pub fn new(db: Arc<Database>) -> SimResult<Self> {
        let store = TelemetryStore::new(db);
        store.ensure_schema()?;
        Ok(Self { store })
    }

    /// Run all three scenario kinds with a fresh random master seed.
    /// Returns the seed so the caller can reproduce the run.
    pub fn run_all(&self, duration: Tick) -> SimResult<u64> {
        let master_seed = rand::random();
        self.run_all_seeded(duration, master_seed)?;
        Ok(master_seed)
    }

    /// Run all three kinds from one master seed, in declaration order.
    pub fn run_all_seeded(&self, duration: Tick, master_seed: u64) -> SimResult<()> {
        for kind in ScenarioKind::ALL {
            self.run_scenario(kind, duration, master_seed)?;
        }
        log::debug!("run complete: duration={duration} seed={master_seed}");
        Ok(())
    }

    /// Generate and persist one kind's series.
    pub fn run_scenario(
        &self,
        kind: ScenarioKind,
        duration: Tick,
        master_seed: u64,
    ) -> SimResult<()> {
        let mut rng = ScenarioRng::for_scenario(master_seed, kind);
        match kind {
            ScenarioKind::LaneChange => {
                let samples = lane_change::generate(duration, &mut rng)?;
                self.store.insert_lane_change_batch(&samples)
            }
            ScenarioKind::PedestrianStop => {
                let samples =
                    pedestrian_stop::generate(duration, pedestrian_stop::TRIGGER_TICK, &mut rng)?;
                self.store.insert_pedestrian_stop_batch(&samples)
            }
            ScenarioKind::ObstacleAvoidance => {
                let samples = obstacle_avoidance::generate(
                    duration,
                    obstacle_avoidance::TRIGGER_TICK,
                    &mut rng,
                )?;
                self.store.insert_obstacle_avoidance_batch(&samples)
            }
        }
    }

    // ── Queries ────────────────────────────────────────────────

    pub fn query_lane_change(&self, limit: i64) -> SimResult<Vec<RowMap>> {
        self.store.recent_rows(ScenarioKind::LaneChange, limit)
    }

    pub fn query_pedestrian_stop(&self, limit: i64) -> SimResult<Vec<RowMap>> {
        self.store.recent_rows(ScenarioKind::PedestrianStop, limit)
    }

    pub fn query_obstacle_avoidance(&self, limit: i64) -> SimResult<Vec<RowMap>> {
        self.store.recent_rows(ScenarioKind::ObstacleAvoidance, limit)
    }

    /// The same `limit` applied independently to each kind, keyed by kind
    /// name.
    pub fn query_all(&self, limit: i64) -> SimResult<BTreeMap<&'static str, Vec<RowMap>>> {
        let mut results = BTreeMap::new();
        for kind in ScenarioKind::ALL {
            results.insert(kind.name(), self.store.recent_rows(kind, limit)?);
        }
        Ok(results)
    }
}
