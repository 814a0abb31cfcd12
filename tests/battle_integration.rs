//! Battlefield integration tests - full encounters through the engine API

use tactical_grid::battle::*;
use tactical_grid::core::error::SpatialError;
use tactical_grid::core::types::{CreatureId, Dimensions, Position};
use tactical_grid::render::{describe_battlefield, describe_tactical_situation, generate_battlefield_map};

fn creature(id: &str, pos: Position, reach: u32) -> Creature {
    Creature::new(id, id, pos, SizeCategory::Medium, 30, reach)
}

#[test]
fn test_wall_blocks_crossing_move() {
    // Wall along x = 5 spanning the whole height
    let wall = TerrainFeature::new(
        TerrainKind::Wall,
        Position::flat(5.0, 0.0),
        Dimensions::new(1.0, 10.0, 10.0),
        true,
        false,
        CoverLevel::None,
    );
    let mut field = Battlefield::new(10, 10, vec![wall]).unwrap();
    field.add_creature(creature("runner", Position::flat(0.0, 5.0), 5)).unwrap();

    let result = validate_creature_move(&field, "runner", Position::flat(9.0, 5.0), 30.0).unwrap();
    assert!(!result.valid);
    assert_eq!(result.blocked_by, vec![0]);

    // Moving along the near side of the wall is fine
    let result = validate_creature_move(&field, "runner", Position::flat(0.0, 40.0), 35.0).unwrap();
    assert!(result.valid);
}

#[test]
fn test_leaving_adjacent_enemy_provokes() {
    let mut field = Battlefield::new(10, 10, Vec::new()).unwrap();
    field.add_creature(creature("a", Position::new(0.0, 0.0, 0.0), 5)).unwrap();
    field.add_creature(creature("b", Position::new(1.0, 0.0, 0.0), 5)).unwrap();

    let result = validate_creature_move(&field, "a", Position::new(10.0, 0.0, 0.0), 30.0).unwrap();
    assert!(result.valid);
    assert!(result.opportunity_attack_triggers.contains(&CreatureId::from("b")));
}

#[test]
fn test_cone_membership() {
    let mut field = Battlefield::new(10, 10, Vec::new()).unwrap();
    field.add_creature(creature("ahead", Position::new(10.0, 0.0, 0.0), 5)).unwrap();
    field.add_creature(creature("off_axis", Position::new(10.0, 10.0, 0.0), 5)).unwrap();

    let query = AreaQuery::cone(Position::new(0.0, 0.0, 0.0), 15.0, 0.0);
    let targets = get_targets_in_area(&field, &query).unwrap();
    assert_eq!(targets, vec![CreatureId::from("ahead")]);
}

#[test]
fn test_total_cover_blocks_sight() {
    let wall = TerrainFeature::wall(Position::flat(20.0, 0.0), Dimensions::new(5.0, 50.0, 10.0));
    let mut field = Battlefield::new(10, 10, vec![wall]).unwrap();
    field.add_creature(creature("archer", Position::flat(5.0, 20.0), 5)).unwrap();
    field.add_creature(creature("target", Position::flat(40.0, 20.0), 5)).unwrap();

    let sight = line_of_sight_between(&field, "archer", "target").unwrap();
    assert!(!sight.has_line_of_sight);
    assert_eq!(sight.cover, CoverLevel::Total);

    // Climbing above the wall restores the view
    field.move_creature("archer", Position::new(5.0, 20.0, 15.0)).unwrap();
    field.move_creature("target", Position::new(40.0, 20.0, 15.0)).unwrap();
    assert!(line_of_sight_between(&field, "archer", "target").unwrap().has_line_of_sight);
}

#[test]
fn test_creature_against_wall_keeps_moving_and_seeing() {
    let wall = TerrainFeature::wall(Position::flat(25.0, 0.0), Dimensions::new(5.0, 100.0, 10.0));
    let mut field = Battlefield::new(20, 20, vec![wall]).unwrap();
    field.add_creature(creature("east", Position::flat(30.0, 10.0), 5)).unwrap();
    field.add_creature(creature("far", Position::flat(60.0, 10.0), 5)).unwrap();
    field.add_creature(creature("west", Position::flat(10.0, 10.0), 5)).unwrap();

    let away = validate_creature_move(&field, "east", Position::flat(50.0, 10.0), 30.0).unwrap();
    assert!(away.valid);
    let along = validate_creature_move(&field, "east", Position::flat(30.0, 30.0), 30.0).unwrap();
    assert!(along.valid);

    let sight = line_of_sight_between(&field, "east", "far").unwrap();
    assert!(sight.has_line_of_sight);
    assert_eq!(sight.cover, CoverLevel::None);
    assert!(sight.blocking_features.is_empty());

    assert!(!line_of_sight_between(&field, "east", "west").unwrap().has_line_of_sight);
}

#[test]
fn test_encounter_round() {
    let pillar = TerrainFeature::new(
        TerrainKind::Pillar,
        Position::flat(25.0, 25.0),
        Dimensions::new(5.0, 5.0, 15.0),
        true,
        true,
        CoverLevel::ThreeQuarters,
    );
    let mut field = Battlefield::new(12, 12, vec![pillar]).unwrap();
    field.add_creature(creature("fighter", Position::flat(10.0, 25.0), 5)).unwrap();
    field.add_creature(creature("rogue", Position::flat(40.0, 40.0), 5)).unwrap();
    field.add_creature(creature("ogre", Position::flat(20.0, 40.0), 10)).unwrap();

    // Fighter steps in front of the ogre
    let step = validate_creature_move(&field, "fighter", Position::flat(15.0, 40.0), 30.0).unwrap();
    assert!(step.valid);
    field.move_creature("fighter", Position::flat(15.0, 40.0)).unwrap();

    // Rogue closes on the far side
    let dash = validate_creature_move(&field, "rogue", Position::flat(25.0, 40.0), 30.0).unwrap();
    assert!(dash.valid);
    assert!(dash.opportunity_attack_triggers.is_empty());
    field.move_creature("rogue", Position::flat(25.0, 40.0)).unwrap();

    assert!(is_creature_flanked(&field, "ogre").unwrap());
    assert!(!is_creature_flanked(&field, "fighter").unwrap());

    // A fireball centred on the ogre catches all three
    let fireball = AreaQuery::sphere(Position::flat(20.0, 40.0), 20.0);
    assert_eq!(get_targets_in_area(&field, &fireball).unwrap().len(), 3);

    let situation = tactical_situation(&field, "ogre").unwrap();
    assert!(situation.flanked);
    assert_eq!(situation.threats().count(), 2);

    let map = generate_battlefield_map(&field);
    assert!(map.contains("Legend:"));
    assert!(describe_battlefield(&field).contains("Creatures (3):"));
    assert!(describe_tactical_situation(&field, "ogre").unwrap().contains("Status: flanked by"));

    let removed = field.remove_creature("rogue").unwrap();
    assert_eq!(removed.position, Position::flat(25.0, 40.0));
    assert!(!is_creature_flanked(&field, "ogre").unwrap());
}

#[test]
fn test_failed_mutations_are_no_ops() {
    let mut field = Battlefield::new(5, 5, Vec::new()).unwrap();
    field.add_creature(creature("a", Position::flat(5.0, 5.0), 5)).unwrap();
    let before = battlefield_overview(&field);

    assert!(matches!(
        field.add_creature(creature("a", Position::flat(10.0, 10.0), 5)),
        Err(SpatialError::DuplicateId(_))
    ));
    assert!(matches!(
        field.add_creature(creature("b", Position::flat(25.0, 10.0), 5)),
        Err(SpatialError::OutOfBounds { .. })
    ));
    assert!(field.move_creature("ghost", Position::flat(0.0, 0.0)).is_err());
    assert!(field.remove_creature("ghost").is_err());
    assert!(field.initialize(0, 0, Vec::new()).is_err());

    assert_eq!(battlefield_overview(&field), before);
}
