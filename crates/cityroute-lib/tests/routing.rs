mod common;

use cityroute_lib::{plan_route, Error, HeuristicKind, RouteRequest, RouteStatus};

use common::fixture_roadmap;

#[test]
fn distance_route_prefers_short_legs() {
    let map = fixture_roadmap();
    let plan = plan_route(&map, &RouteRequest::distance("A1", "D1")).expect("plan succeeds");

    assert_eq!(plan.status, RouteStatus::Found);
    assert_eq!(plan.heuristic, HeuristicKind::Distance);
    assert_eq!(plan.steps, vec!["A1", "B1", "C1", "D1"]);
    let expected = 20.0 + 125f64.sqrt();
    assert!((plan.total_cost.unwrap() - expected).abs() < 1e-9);
}

#[test]
fn fewest_links_route_prefers_fewer_hops() {
    let map = fixture_roadmap();
    let request =
        RouteRequest::distance("A1", "D1").with_heuristic(HeuristicKind::FewestLinks);
    let plan = plan_route(&map, &request).expect("plan succeeds");

    assert_eq!(plan.steps, vec!["A1", "F1", "D1"]);
    assert_eq!(plan.hop_count(), 2);
    assert_eq!(plan.total_cost, Some(2.0));
}

#[test]
fn avoided_location_is_routed_around() {
    let map = fixture_roadmap();
    let request = RouteRequest::distance("A1", "D1").avoiding(["C1", "not-a-city"]);
    let plan = plan_route(&map, &request).expect("plan succeeds");

    assert_eq!(plan.steps, vec!["A1", "B1", "B2", "C2", "D1"]);
    assert!(!plan.steps.iter().any(|step| step == "C1"));
}

#[test]
fn unreachable_goal_is_no_path_not_error() {
    let map = fixture_roadmap();
    let plan = plan_route(&map, &RouteRequest::distance("A1", "E9")).expect("plan succeeds");

    assert_eq!(plan.status, RouteStatus::NoPath);
    assert!(plan.steps.is_empty());
}

#[test]
fn one_way_connections_are_respected() {
    let map = fixture_roadmap();
    let plan = plan_route(&map, &RouteRequest::distance("E9", "D1")).expect("plan succeeds");
    assert_eq!(plan.steps, vec!["E9", "D1"]);

    let back = plan_route(&map, &RouteRequest::distance("D1", "E9")).expect("plan succeeds");
    assert_eq!(back.status, RouteStatus::NoPath);
}

#[test]
fn same_start_and_goal_is_single_step() {
    let map = fixture_roadmap();
    let plan = plan_route(&map, &RouteRequest::distance("E9", "E9")).expect("plan succeeds");

    assert_eq!(plan.steps, vec!["E9"]);
    assert_eq!(plan.total_cost, Some(0.0));
    assert_eq!(plan.hop_count(), 0);
}

#[test]
fn unknown_goal_suggests_similar_names() {
    let map = fixture_roadmap();
    let err = plan_route(&map, &RouteRequest::distance("A1", "D2")).expect_err("unknown goal");

    match &err {
        Error::UnknownNode { name, suggestions } => {
            assert_eq!(name, "D2");
            assert!(suggestions.contains(&"D1".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(format!("{err}").contains("Did you mean"));
}

#[test]
fn repeated_plans_are_identical() {
    let map = fixture_roadmap();
    let request = RouteRequest::distance("A1", "D1").avoiding(["C1"]);

    let first = plan_route(&map, &request).expect("plan succeeds");
    for _ in 0..5 {
        assert_eq!(plan_route(&map, &request).expect("plan succeeds"), first);
    }
}
