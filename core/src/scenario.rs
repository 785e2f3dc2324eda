//! Scenario kinds and run-wide defaults.

use crate::types::Tick;

/// Run length in ticks when the caller supplies none.
pub const DEFAULT_DURATION: Tick = 60;

/// One synthetic-driving situation with its own generation rule and table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenarioKind {
    LaneChange,
    PedestrianStop,
    ObstacleAvoidance,
}

impl ScenarioKind {
    /// All kinds, in the order `run_all` executes them.
    pub const ALL: [ScenarioKind; 3] = [
        ScenarioKind::LaneChange,
        ScenarioKind::PedestrianStop,
        ScenarioKind::ObstacleAvoidance,
    ];

    /// Stable RNG slot index. NEVER reorder or remove entries — reordering
    /// changes every kind's derived seed.
    pub fn slot(&self) -> u64 {
        match self {
            Self::LaneChange => 0,
            Self::PedestrianStop => 1,
            Self::ObstacleAvoidance => 2,
        }
    }

    /// Kind name as exposed in `query_all` results.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LaneChange => "lane_change",
            Self::PedestrianStop => "pedestrian_stop",
            Self::ObstacleAvoidance => "obstacle_avoidance",
        }
    }

    /// Backing table for this kind's rows.
    pub fn table(&self) -> &'static str {
        match self {
            Self::LaneChange => "lane_change_simulations",
            Self::PedestrianStop => "pedestrian_stop_simulations",
            Self::ObstacleAvoidance => "obstacle_avoidance_simulations",
        }
    }
}
