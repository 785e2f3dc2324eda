//! Lane-change scenario: the car follows a lead vehicle and occasionally
//! changes lanes.

use rand_distr::Normal;
use serde::Serialize;

use crate::{error::SimResult, rng::ScenarioRng, types::Tick};

const CAR_SPEED_MEAN: f64 = 30.0;
const CAR_SPEED_STD: f64 = 2.0;
const LEAD_DELTA_STD: f64 = 3.0;
const GAP_MEAN: f64 = 10.0;
const GAP_STD: f64 = 2.0;
/// Per-tick probability of a lane-change event, independent across ticks.
const LANE_CHANGE_PROB: f64 = 0.1;

#[derive(Debug, Clone, Serialize)]
pub struct LaneChangeSample {
    pub time: Tick,
    pub car_speed: f64,
    pub lead_car_speed: f64,
    pub distance_to_lead_car: f64,
    pub lane_change_event: bool,
}

/// Generate one lane-change series: one record per tick in `[0, duration)`.
pub fn generate(duration: Tick, rng: &mut ScenarioRng) -> SimResult<Vec<LaneChangeSample>> {
    let car_speed = Normal::new(CAR_SPEED_MEAN, CAR_SPEED_STD)?;
    let lead_delta = Normal::new(0.0, LEAD_DELTA_STD)?;
    let gap = Normal::new(GAP_MEAN, GAP_STD)?;

    let mut samples = Vec::with_capacity(duration as usize);
    for time in 0..duration {
        let speed = rng.sample(&car_speed);
        samples.push(LaneChangeSample {
            time,
            car_speed: speed,
            lead_car_speed: speed - rng.sample(&lead_delta),
            // non-negative by construction
            distance_to_lead_car: rng.sample(&gap).abs(),
            lane_change_event: rng.chance(LANE_CHANGE_PROB),
        });
    }
    Ok(samples)
}
