//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database. Generators produce samples,
//! the simulator hands them here — nothing else executes SQL.

use std::sync::Arc;

use rusqlite::{params, types::ValueRef};
use serde_json::{Map, Value};

use crate::{
    database::Database,
    error::SimResult,
    lane_change::LaneChangeSample,
    obstacle_avoidance::ObstacleAvoidanceSample,
    pedestrian_stop::PedestrianStopSample,
    scenario::ScenarioKind,
};

/// One stored row keyed by column name, values as JSON scalars.
pub type RowMap = Map<String, Value>;

pub struct TelemetryStore {
    db: Arc<Database>,
}

impl TelemetryStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Create the three result tables if absent. Idempotent, safe to call
    /// every startup.
    pub fn ensure_schema(&self) -> SimResult<()> {
        self.db.with_conn(|conn| {
            conn.execute_batch(include_str!("../../migrations/001_telemetry.sql"))?;
            Ok(())
        })
    }

    // ── Batch inserts ──────────────────────────────────────────

    /// Append one lane-change series as a single transaction.
    pub fn insert_lane_change_batch(&self, samples: &[LaneChangeSample]) -> SimResult<()> {
        self.db.with_conn(|conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO lane_change_simulations
                     (time, car_speed, lead_car_speed, distance_to_lead_car, lane_change_event)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )?;
                for s in samples {
                    stmt.execute(params![
                        s.time as i64,
                        s.car_speed,
                        s.lead_car_speed,
                        s.distance_to_lead_car,
                        i64::from(s.lane_change_event),
                    ])?;
                }
            }
            tx.commit()?;
            log::debug!("lane_change: inserted {} rows", samples.len());
            Ok(())
        })
    }

    /// Append one pedestrian-stop series as a single transaction.
    pub fn insert_pedestrian_stop_batch(&self, samples: &[PedestrianStopSample]) -> SimResult<()> {
        self.db.with_conn(|conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO pedestrian_stop_simulations
                     (time, car_speed, pedestrian_event)
                     VALUES (?1, ?2, ?3)",
                )?;
                for s in samples {
                    stmt.execute(params![
                        s.time as i64,
                        s.car_speed,
                        i64::from(s.pedestrian_event),
                    ])?;
                }
            }
            tx.commit()?;
            log::debug!("pedestrian_stop: inserted {} rows", samples.len());
            Ok(())
        })
    }

    /// Append one obstacle-avoidance series as a single transaction.
    pub fn insert_obstacle_avoidance_batch(
        &self,
        samples: &[ObstacleAvoidanceSample],
    ) -> SimResult<()> {
        self.db.with_conn(|conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO obstacle_avoidance_simulations
                     (time, car_speed, obstacle_event)
                     VALUES (?1, ?2, ?3)",
                )?;
                for s in samples {
                    stmt.execute(params![
                        s.time as i64,
                        s.car_speed,
                        i64::from(s.obstacle_event),
                    ])?;
                }
            }
            tx.commit()?;
            log::debug!("obstacle_avoidance: inserted {} rows", samples.len());
            Ok(())
        })
    }

    // ── Queries ────────────────────────────────────────────────

    /// The `limit` most recent rows for `kind`, newest (highest id) first.
    ///
    /// Recency is approximated by descending id: rows carry no run
    /// identifier, so the ordering is only run-correct while inserts come
    /// from a single writer. SQLite treats a negative limit as "no limit".
    pub fn recent_rows(&self, kind: ScenarioKind, limit: i64) -> SimResult<Vec<RowMap>> {
        self.db.with_conn(|conn| {
            let sql = format!("SELECT * FROM {} ORDER BY id DESC LIMIT ?1", kind.table());
            let mut stmt = conn.prepare(&sql)?;
            let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

            let mut rows = stmt.query(params![limit])?;
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                let mut map = RowMap::new();
                for (idx, name) in columns.iter().enumerate() {
                    map.insert(name.clone(), json_scalar(row.get_ref(idx)?));
                }
                out.push(map);
            }
            Ok(out)
        })
    }

    /// Total row count for `kind` (test helper).
    pub fn row_count(&self, kind: ScenarioKind) -> SimResult<i64> {
        self.db.with_conn(|conn| {
            let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
            conn.query_row(&sql, [], |row| row.get(0)).map_err(Into::into)
        })
    }
}

/// External representation rule: numbers pass through, text and raw byte
/// sequences become strings, NULL becomes null.
fn json_scalar(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::String(String::from_utf8_lossy(b).into_owned()),
    }
}
