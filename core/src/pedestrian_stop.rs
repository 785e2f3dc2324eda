//! Pedestrian-stop scenario: the car halts for a pedestrian at a crosswalk.

use rand_distr::Normal;
use serde::Serialize;

use crate::{error::SimResult, rng::ScenarioRng, types::Tick};

const CAR_SPEED_MEAN: f64 = 30.0;
const CAR_SPEED_STD: f64 = 2.0;

/// Tick at which the pedestrian steps out. Fixed-index policy: runs that
/// end before this tick never reach the trigger and produce no event.
pub const TRIGGER_TICK: Tick = 30;

#[derive(Debug, Clone, Serialize)]
pub struct PedestrianStopSample {
    pub time: Tick,
    pub car_speed: f64,
    pub pedestrian_event: bool,
}

/// Generate one pedestrian-stop series. From `trigger_tick` onward the car
/// is stopped: the event flag is set exactly at the trigger and `car_speed`
/// is forced to zero for every tick at or after it. The speed draw still
/// happens on forced ticks so the random stream advances uniformly per tick.
pub fn generate(
    duration: Tick,
    trigger_tick: Tick,
    rng: &mut ScenarioRng,
) -> SimResult<Vec<PedestrianStopSample>> {
    let car_speed = Normal::new(CAR_SPEED_MEAN, CAR_SPEED_STD)?;

    let mut samples = Vec::with_capacity(duration as usize);
    for time in 0..duration {
        let raw = rng.sample(&car_speed);
        samples.push(PedestrianStopSample {
            time,
            car_speed: if time >= trigger_tick { 0.0 } else { raw },
            pedestrian_event: time == trigger_tick,
        });
    }
    Ok(samples)
}
