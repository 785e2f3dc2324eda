//! Scenario series shape and event-trigger tests.

use drivesim_core::{
    lane_change, obstacle_avoidance, pedestrian_stop, rng::ScenarioRng, scenario::ScenarioKind,
};

fn rng_for(kind: ScenarioKind, seed: u64) -> ScenarioRng {
    ScenarioRng::for_scenario(seed, kind)
}

#[test]
fn every_kind_emits_one_record_per_tick() {
    for duration in [0u64, 1, 31, 60, 100] {
        let mut rng = rng_for(ScenarioKind::LaneChange, 1);
        let series = lane_change::generate(duration, &mut rng).expect("lane change");
        assert_eq!(series.len(), duration as usize);
        for (i, s) in series.iter().enumerate() {
            assert_eq!(s.time, i as u64, "time must be contiguous from 0");
        }

        let mut rng = rng_for(ScenarioKind::PedestrianStop, 1);
        let series = pedestrian_stop::generate(duration, pedestrian_stop::TRIGGER_TICK, &mut rng)
            .expect("pedestrian stop");
        assert_eq!(series.len(), duration as usize);
        for (i, s) in series.iter().enumerate() {
            assert_eq!(s.time, i as u64);
        }

        let mut rng = rng_for(ScenarioKind::ObstacleAvoidance, 1);
        let series =
            obstacle_avoidance::generate(duration, obstacle_avoidance::TRIGGER_TICK, &mut rng)
                .expect("obstacle avoidance");
        assert_eq!(series.len(), duration as usize);
        for (i, s) in series.iter().enumerate() {
            assert_eq!(s.time, i as u64);
        }
    }
}

#[test]
fn lane_change_event_rate_converges_to_one_in_ten() {
    let mut rng = rng_for(ScenarioKind::LaneChange, 0xDECAF);
    let series = lane_change::generate(20_000, &mut rng).expect("series");
    let events = series.iter().filter(|s| s.lane_change_event).count();
    let rate = events as f64 / series.len() as f64;
    assert!(
        (rate - 0.1).abs() < 0.02,
        "empirical lane-change rate {rate:.4} too far from 0.1"
    );
}

#[test]
fn lane_change_distance_is_non_negative() {
    let mut rng = rng_for(ScenarioKind::LaneChange, 3);
    let series = lane_change::generate(500, &mut rng).expect("series");
    assert!(
        series.iter().all(|s| s.distance_to_lead_car >= 0.0),
        "distance_to_lead_car is |Normal| and can never be negative"
    );
}

#[test]
fn pedestrian_stops_from_trigger_tick_onward() {
    let mut rng = rng_for(ScenarioKind::PedestrianStop, 42);
    let series = pedestrian_stop::generate(60, pedestrian_stop::TRIGGER_TICK, &mut rng)
        .expect("series");

    let events: Vec<_> = series.iter().filter(|s| s.pedestrian_event).collect();
    assert_eq!(events.len(), 1, "exactly one pedestrian event");
    assert_eq!(events[0].time, 30);

    for s in &series {
        if s.time >= 30 {
            assert_eq!(s.car_speed, 0.0, "car must be stopped at tick {}", s.time);
        } else {
            assert!(s.car_speed > 0.0, "car still moving at tick {}", s.time);
        }
    }
}

#[test]
fn short_pedestrian_run_never_triggers() {
    let mut rng = rng_for(ScenarioKind::PedestrianStop, 42);
    let series = pedestrian_stop::generate(30, pedestrian_stop::TRIGGER_TICK, &mut rng)
        .expect("series");
    assert_eq!(series.len(), 30);
    assert!(series.iter().all(|s| !s.pedestrian_event));
    assert!(series.iter().all(|s| s.car_speed > 0.0));
}

#[test]
fn obstacle_slows_the_car_from_trigger_tick_onward() {
    let mut rng = rng_for(ScenarioKind::ObstacleAvoidance, 7);
    let series = obstacle_avoidance::generate(60, obstacle_avoidance::TRIGGER_TICK, &mut rng)
        .expect("series");

    let events: Vec<_> = series.iter().filter(|s| s.obstacle_event).collect();
    assert_eq!(events.len(), 1, "exactly one obstacle event");
    assert_eq!(events[0].time, 45);

    for s in &series {
        assert!(s.car_speed >= 0.0, "speed is floored at zero");
        if s.time >= 45 {
            // Normal(30, 2) minus the cut of 10: well below pre-trigger speeds.
            assert!(
                s.car_speed < 28.0,
                "tick {}: speed {} not reduced",
                s.time,
                s.car_speed
            );
        }
    }
}

#[test]
fn obstacle_run_shorter_than_trigger_never_triggers() {
    let mut rng = rng_for(ScenarioKind::ObstacleAvoidance, 7);
    let series = obstacle_avoidance::generate(40, obstacle_avoidance::TRIGGER_TICK, &mut rng)
        .expect("series");
    assert_eq!(series.len(), 40);
    assert!(
        series.iter().all(|s| !s.obstacle_event),
        "trigger tick 45 is never reached in a 40-tick run"
    );
}

#[test]
fn obstacle_run_of_fifty_triggers_once_at_forty_five() {
    let mut rng = rng_for(ScenarioKind::ObstacleAvoidance, 11);
    let series = obstacle_avoidance::generate(50, obstacle_avoidance::TRIGGER_TICK, &mut rng)
        .expect("series");
    let events: Vec<_> = series.iter().filter(|s| s.obstacle_event).collect();
    assert_eq!(events.len(), 1, "tick 45 lies inside a 50-tick run");
    assert_eq!(events[0].time, 45);
}
