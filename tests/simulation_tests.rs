use chrono::{DateTime, TimeDelta, Utc};
use sleighline::{prelude::*, simulation::RouteSummary};

fn scheduled_route() -> Vec<RouteNode> {
    let nodes = vec![
        RouteNode::origin("pole", Location::new("North Pole", 90.0, 0.0, 0.0)),
        RouteNode::delivery("a", Location::new("Wellington", -41.2865, 174.7762, 13.0), 600),
        RouteNode::delivery("b", Location::new("Auckland", -36.8485, 174.7633, 13.0), 600),
    ];
    let config = ScheduleConfig::new(2024).first_arrival_at(23.0);
    recalculate(&nodes, &config).unwrap().nodes
}

fn times(node: &RouteNode) -> (DateTime<Utc>, DateTime<Utc>) {
    (
        node.schedule.arrival_utc.unwrap(),
        node.schedule.departure_utc.unwrap(),
    )
}

#[test]
fn before_departure() {
    let nodes = scheduled_route();
    let departure = nodes[0].schedule.departure_utc.unwrap();
    match simulate_at(&nodes, departure - TimeDelta::minutes(5)) {
        Snapshot::NotStarted {
            start,
            locations_visited,
            total_locations,
            progress,
        } => {
            assert_eq!(start.id, "pole");
            assert_eq!(locations_visited, 0);
            assert_eq!(total_locations, 3);
            assert_eq!(progress, 0.0);
        }
        other => panic!("unexpected snapshot {other:?}"),
    }
}

#[test]
fn at_a_stop() {
    let nodes = scheduled_route();
    let (arrival, _) = times(&nodes[1]);
    match simulate_at(&nodes, arrival + TimeDelta::minutes(5)) {
        Snapshot::AtLocation {
            current,
            previous,
            next,
            locations_visited,
            ..
        } => {
            assert_eq!(current.id, "a");
            assert_eq!(previous.unwrap().id, "pole");
            assert_eq!(next.unwrap().id, "b");
            assert_eq!(locations_visited, 2);
        }
        other => panic!("unexpected snapshot {other:?}"),
    }
}

#[test]
fn between_stops() {
    let nodes = scheduled_route();
    let (_, departed) = times(&nodes[1]);
    let (arrival, _) = times(&nodes[2]);
    let midway = departed + (arrival - departed) / 2;
    match simulate_at(&nodes, midway) {
        Snapshot::Traveling {
            position,
            previous,
            next,
            travel_progress,
            ..
        } => {
            assert_eq!(previous.id, "a");
            assert_eq!(next.id, "b");
            assert!((travel_progress - 0.5).abs() < 0.01);
            assert!(position.latitude > -41.2865 && position.latitude < -36.8485);
        }
        other => panic!("unexpected snapshot {other:?}"),
    }
}

#[test]
fn after_last_departure() {
    let nodes = scheduled_route();
    let (_, departed) = times(&nodes[2]);
    match simulate_at(&nodes, departed) {
        Snapshot::Completed {
            current,
            locations_visited,
            total_locations,
            progress,
        } => {
            assert_eq!(current.id, "b");
            assert_eq!(locations_visited, total_locations);
            assert_eq!(progress, 1.0);
        }
        other => panic!("unexpected snapshot {other:?}"),
    }
}

#[test]
fn unscheduled_route_has_no_times() {
    let nodes = vec![
        RouteNode::origin("pole", Location::new("North Pole", 90.0, 0.0, 0.0)),
        RouteNode::delivery("a", Location::new("Wellington", -41.2865, 174.7762, 13.0), 600),
    ];
    assert_eq!(simulate_at(&nodes, Utc::now()), Snapshot::NoTimes);
}

#[test]
fn summary_spans_the_night() {
    let nodes = scheduled_route();
    let summary = summarize(&nodes);
    assert_eq!(
        summary,
        RouteSummary {
            total_locations: 3,
            locations_with_times: 3,
            start: nodes[0].schedule.departure_utc,
            end: nodes[2].schedule.departure_utc,
            valid: true,
        }
    );
}

#[test]
fn timeline_samples_in_order() {
    let nodes = scheduled_route();
    let start = nodes[0].schedule.departure_utc.unwrap() - TimeDelta::minutes(1);
    let end = nodes[2].schedule.departure_utc.unwrap() + TimeDelta::minutes(1);
    let samples = timeline(&nodes, start, end, TimeDelta::minutes(1));

    assert!(samples.windows(2).all(|pair| pair[0].0 < pair[1].0));
    assert_eq!(samples.first().unwrap().0, start);
    assert!(matches!(samples.first().unwrap().1, Snapshot::NotStarted { .. }));
    assert!(matches!(samples.last().unwrap().1, Snapshot::Completed { .. }));
}

#[test]
fn timeline_rejects_empty_step() {
    let nodes = scheduled_route();
    let now = Utc::now();
    assert!(timeline(&nodes, now, now + TimeDelta::hours(1), TimeDelta::zero()).is_empty());
}

#[test]
fn snapshot_wire_format() {
    let nodes = scheduled_route();
    let (arrival, _) = times(&nodes[1]);
    let value = serde_json::to_value(simulate_at(&nodes, arrival)).unwrap();
    assert_eq!(value["status"], "atLocation");
    assert_eq!(value["current"]["id"], "a");
    assert_eq!(value["locationsVisited"], 2);
}

#[test]
fn timeline_refuses_excessive_sampling() {
    let nodes = scheduled_route();
    let start = nodes[0].schedule.departure_utc.unwrap();
    let end = nodes[2].schedule.departure_utc.unwrap();
    assert!(timeline(&nodes, start, end, TimeDelta::milliseconds(1)).is_empty());
}

#[test]
fn finished_route_wire_format() {
    let nodes = scheduled_route();
    let (_, departed) = times(&nodes[2]);
    let value = serde_json::to_value(simulate_at(&nodes, departed)).unwrap();
    assert_eq!(value["status"], "completed");
    assert_eq!(value["locationsVisited"], 3);
    assert_eq!(value["progress"], 1.0);

    let departure = nodes[0].schedule.departure_utc.unwrap();
    let value = serde_json::to_value(simulate_at(&nodes, departure - TimeDelta::minutes(1))).unwrap();
    assert_eq!(value["status"], "notStarted");
    assert_eq!(value["locationsVisited"], 0);
    assert_eq!(value["progress"], 0.0);
}
