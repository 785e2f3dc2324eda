//! Obstacle-avoidance scenario: the car brakes around an obstacle in the
//! road and continues at reduced speed.

use rand_distr::Normal;
use serde::Serialize;

use crate::{error::SimResult, rng::ScenarioRng, types::Tick};

const CAR_SPEED_MEAN: f64 = 30.0;
const CAR_SPEED_STD: f64 = 2.0;

/// Tick at which the obstacle appears. Fixed-index policy: runs that end
/// before this tick never reach the trigger and produce no event.
pub const TRIGGER_TICK: Tick = 45;

/// Speed reduction applied from the trigger tick onward, floored at zero.
pub const SPEED_CUT: f64 = 10.0;

#[derive(Debug, Clone, Serialize)]
pub struct ObstacleAvoidanceSample {
    pub time: Tick,
    pub car_speed: f64,
    pub obstacle_event: bool,
}

/// Generate one obstacle-avoidance series. The event flag is set exactly
/// at `trigger_tick`; every tick at or after it has `SPEED_CUT` subtracted
/// from the drawn speed, floored at zero.
pub fn generate(
    duration: Tick,
    trigger_tick: Tick,
    rng: &mut ScenarioRng,
) -> SimResult<Vec<ObstacleAvoidanceSample>> {
    let car_speed = Normal::new(CAR_SPEED_MEAN, CAR_SPEED_STD)?;

    let mut samples = Vec::with_capacity(duration as usize);
    for time in 0..duration {
        let raw = rng.sample(&car_speed);
        samples.push(ObstacleAvoidanceSample {
            time,
            car_speed: if time >= trigger_tick {
                (raw - SPEED_CUT).max(0.0)
            } else {
                raw
            },
            obstacle_event: time == trigger_tick,
        });
    }
    Ok(samples)
}
