//! Dispatch layer integration tests - JSON requests in, structured responses out

use serde_json::json;
use tactical_grid::battle::{CoverLevel, TerrainKind};
use tactical_grid::command::{CommandExecutor, Request, Response};
use tactical_grid::core::error::SpatialError;
use tactical_grid::core::types::{CreatureId, Position};

fn requests(value: serde_json::Value) -> Vec<Request> {
    serde_json::from_value(value).unwrap()
}

fn setup() -> CommandExecutor {
    let mut executor = CommandExecutor::new();
    let results = executor.execute_all(requests(json!([
        {
            "tool": "initialize_battlefield",
            "width": 12,
            "height": 12,
            "terrain": [
                {"type": "wall", "x": 30, "y": 0, "size": 1, "depth": 10, "blocksLineOfSight": true, "coverType": "total"},
                {"type": "wall", "x": 30, "y": 5, "size": 1, "depth": 10, "blocksLineOfSight": true, "coverType": "total"},
                {"type": "wall", "x": 30, "y": 10, "size": 1, "depth": 10, "blocksLineOfSight": true, "coverType": "total"},
                {"type": "debris", "x": 10, "y": 50},
                {"type": "difficult", "x": 0, "y": 55, "blocksMovement": false}
            ]
        },
        {"tool": "batch_place_creatures", "creatures": [
            {"creature_id": "fighter", "name": "Fighter", "x": 20, "y": 7},
            {"creature_id": "wizard", "name": "Wizard", "x": 5, "y": 5, "speed": 30},
            {"creature_id": "orc", "name": "Orc", "x": 45, "y": 7, "size": "medium"},
            {"creature_id": "wyvern", "name": "Wyvern", "x": 45, "y": 30, "z": 20, "size": "large", "reach": 10}
        ]}
    ])));
    assert!(results.iter().all(|r| r.is_ok()));
    executor
}

#[test]
fn test_initialize_maps_terrain_types() {
    let executor = setup();
    let terrain = executor.battlefield().terrain();
    assert_eq!(terrain.len(), 5);
    assert_eq!(terrain[0].cover, CoverLevel::Total);
    assert_eq!(terrain[3].kind, TerrainKind::Pillar);
    assert_eq!(terrain[4].kind, TerrainKind::Difficult);
    assert!(!terrain[4].blocks_movement);
    assert_eq!(executor.battlefield().creature_count(), 4);
}

#[test]
fn test_line_of_sight_through_wall() {
    let mut executor = setup();
    let response = executor
        .execute(requests(json!([
            {"tool": "check_line_of_sight", "from_creature": "fighter", "to_creature": "orc"}
        ]))
        .remove(0))
        .unwrap();

    let Response::LineOfSight { visibility, distance_feet, .. } = response else {
        panic!("expected line of sight response");
    };
    assert!(!visibility.has_line_of_sight);
    assert_eq!(visibility.blocking_features, vec![1]);
    assert_eq!(distance_feet, 25.0);
}

#[test]
fn test_move_through_wall_rejected_and_not_committed() {
    let mut executor = setup();
    let results = executor.execute_all(requests(json!([
        {"tool": "move_creature", "creature_id": "fighter", "target_x": 40, "target_y": 7, "speed": 30},
        {"tool": "move_creature", "creature_id": "fighter", "target_x": 20, "target_y": 30, "speed": 30}
    ])));

    match &results[0] {
        Ok(Response::Moved { moved, reason, .. }) => {
            assert!(!moved);
            assert_eq!(reason.as_deref(), Some("path blocked"));
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(matches!(&results[1], Ok(Response::Moved { moved: true, .. })));
    assert_eq!(
        executor.battlefield().get_creature("fighter").unwrap().position,
        Position::flat(20.0, 30.0)
    );
}

#[test]
fn test_area_and_tactical_queries() {
    let mut executor = setup();
    let results = executor.execute_all(requests(json!([
        {"tool": "get_area_effect_targets", "center_x": 5, "center_y": 5, "shape": "line", "size": 60, "direction": 0},
        {"tool": "check_flanking", "creature_id": "orc"},
        {"tool": "check_height_advantage", "attacker_id": "wyvern", "target_id": "orc"},
        {"tool": "get_tactical_summary", "creature_id": "orc"},
        {"tool": "get_area_effect_targets", "center_x": 5, "center_y": 5, "shape": "hexagon", "size": 10}
    ])));

    let Ok(Response::AreaTargets { targets, .. }) = &results[0] else {
        panic!("expected area targets");
    };
    // Area effects ignore walls
    assert_eq!(targets, &vec![CreatureId::from("fighter"), CreatureId::from("orc")]);

    assert!(matches!(&results[1], Ok(Response::Flanking { flanked: false, .. })));
    assert!(matches!(&results[2], Ok(Response::HeightAdvantage { has_advantage: true, .. })));

    let Ok(Response::TacticalSummary { situation }) = &results[3] else {
        panic!("expected tactical summary");
    };
    assert_eq!(situation.contacts[0].id, "fighter");

    assert!(matches!(&results[4], Err(SpatialError::InvalidShape(_))));
}

#[test]
fn test_batch_move_continues_after_failure() {
    let mut executor = setup();
    let response = executor
        .execute(
            requests(json!([{"tool": "batch_move_creatures", "movements": [
                {"creature_id": "ghost", "target_x": 0, "target_y": 0, "speed": 30},
                {"creature_id": "wizard", "target_x": 5, "target_y": 25, "speed": 30},
                {"creature_id": "orc", "target_x": 45, "target_y": 55, "speed": 30}
            ]}]))
            .remove(0),
        )
        .unwrap();

    let Response::Batch { succeeded, failed, results } = response else {
        panic!("expected batch response");
    };
    assert_eq!((succeeded, failed), (1, 2));
    assert_eq!(results[0].error.as_ref().unwrap().kind, "not_found");
    assert!(results[1].success);
    assert!(results[2].error.is_none());
    assert!(!results[2].success);
    assert_eq!(
        executor.battlefield().get_creature("wizard").unwrap().position,
        Position::flat(5.0, 25.0)
    );
}

#[test]
fn test_text_tools() {
    let mut executor = setup();
    let results = executor.execute_all(requests(json!([
        {"tool": "describe_battlefield"},
        {"tool": "describe_detailed_tactical_situation", "creature_id": "fighter"},
        {"tool": "generate_battlefield_map"},
        {"tool": "describe_detailed_tactical_situation", "creature_id": "nobody"}
    ])));

    let texts: Vec<String> = results[..3]
        .iter()
        .map(|r| match r {
            Ok(Response::Text { text }) => text.clone(),
            other => panic!("unexpected {:?}", other),
        })
        .collect();

    assert!(texts[0].contains("Battlefield: 12 x 12 squares"));
    assert!(texts[1].starts_with("Fighter [fighter]"));
    assert_eq!(texts[2].lines().next().unwrap().chars().count(), 12);
    assert!(matches!(&results[3], Err(SpatialError::NotFound(_))));
}

#[test]
fn test_remove_then_reinitialize() {
    let mut executor = setup();
    let results = executor.execute_all(requests(json!([
        {"tool": "remove_creature", "creature_id": "orc"},
        {"tool": "remove_creature", "creature_id": "orc"},
        {"tool": "initialize_battlefield", "width": 4, "height": 4}
    ])));

    assert!(matches!(&results[0], Ok(Response::Removed { .. })));
    assert!(matches!(&results[1], Err(SpatialError::NotFound(_))));
    assert!(matches!(&results[2], Ok(Response::Initialized { width: 4, height: 4, terrain_features: 0 })));
    assert_eq!(executor.battlefield().creature_count(), 0);
}

#[test]
fn test_responses_serialize() {
    let mut executor = setup();
    let response = executor
        .execute(requests(json!([{"tool": "check_flanking", "creature_id": "fighter"}])).remove(0))
        .unwrap();
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["kind"], "flanking");
    assert_eq!(value["flanked"], false);
}
