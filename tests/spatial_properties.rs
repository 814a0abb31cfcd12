//! Property tests for the engine's universally quantified guarantees

use proptest::prelude::*;
use tactical_grid::battle::*;
use tactical_grid::core::types::{Dimensions, Position};

/// 20x20 squares, 100 ft per side
const FIELD_FEET: f64 = 100.0;

fn arb_position() -> impl Strategy<Value = Position> {
    (0.0..FIELD_FEET, 0.0..FIELD_FEET, -50.0..50.0f64).prop_map(|(x, y, z)| Position::new(x, y, z))
}

fn open_field() -> Battlefield {
    Battlefield::new(20, 20, Vec::new()).unwrap()
}

proptest! {
    #[test]
    fn placement_round_trips(pos in arb_position()) {
        let mut field = open_field();
        field
            .add_creature(Creature::new("c", "C", pos, SizeCategory::Medium, 30, 5))
            .unwrap();
        prop_assert_eq!(field.get_creature("c").unwrap().position, pos);
    }

    #[test]
    fn moves_longer_than_speed_are_invalid(
        from in arb_position(),
        to in arb_position(),
        speed in 0.0..200.0f64,
    ) {
        let field = open_field();
        let mover = Creature::new("m", "M", from, SizeCategory::Medium, 30, 5);
        let result = validate_movement(&field, &mover, from, to, speed);

        if result.path_length_feet > speed {
            prop_assert!(!result.valid);
        } else {
            // Open field: nothing else can reject the move
            prop_assert!(result.valid);
        }
    }

    #[test]
    fn speed_equal_to_distance_is_enough(from in arb_position(), to in arb_position()) {
        let field = open_field();
        let mover = Creature::new("m", "M", from, SizeCategory::Medium, 30, 5);
        let exact = from.distance(&to);
        prop_assert!(validate_movement(&field, &mover, from, to, exact).valid);
    }

    #[test]
    fn zero_sphere_hits_at_most_origin(
        positions in prop::collection::vec(arb_position(), 0..8),
        origin in arb_position(),
    ) {
        let mut field = open_field();
        for (i, pos) in positions.iter().enumerate() {
            field
                .add_creature(Creature::new(format!("c{}", i), "C", *pos, SizeCategory::Medium, 30, 5))
                .unwrap();
        }
        field
            .add_creature(Creature::new("on_origin", "O", origin, SizeCategory::Medium, 30, 5))
            .unwrap();

        let targets = get_targets_in_area(&field, &AreaQuery::sphere(origin, 0.0)).unwrap();
        prop_assert!(targets.iter().any(|id| id == "on_origin"));
        for id in &targets {
            prop_assert_eq!(field.get_creature(id.as_str()).unwrap().position, origin);
        }
    }

    #[test]
    fn height_advantage_is_never_mutual(a in arb_position(), b in arb_position()) {
        let mut field = open_field();
        field.add_creature(Creature::new("a", "A", a, SizeCategory::Medium, 30, 5)).unwrap();
        field.add_creature(Creature::new("b", "B", b, SizeCategory::Medium, 30, 5)).unwrap();

        let ab = has_height_advantage(&field, "a", "b").unwrap();
        let ba = has_height_advantage(&field, "b", "a").unwrap();
        prop_assert!(!(ab && ba));
    }

    #[test]
    fn lone_creature_with_one_neighbour_is_not_flanked(
        target in arb_position(),
        neighbour in arb_position(),
        reach in 0u32..30,
    ) {
        let mut field = open_field();
        field
            .add_creature(Creature::new("target", "T", target, SizeCategory::Medium, 30, 5))
            .unwrap();
        prop_assert!(!is_creature_flanked(&field, "target").unwrap());

        field
            .add_creature(Creature::new("n", "N", neighbour, SizeCategory::Medium, 30, reach))
            .unwrap();
        prop_assert!(!is_creature_flanked(&field, "target").unwrap());
    }

    #[test]
    fn sight_through_total_cover_is_blocked(
        y1 in 5.0..95.0f64,
        y2 in 5.0..95.0f64,
        x1 in 0.0..40.0f64,
        x2 in 60.0..100.0f64,
    ) {
        // Full-height wall across the whole field between the two sides
        let wall = TerrainFeature::wall(Position::flat(45.0, 0.0), Dimensions::new(10.0, FIELD_FEET, 30.0));
        let field = Battlefield::new(20, 20, vec![wall]).unwrap();

        let sight = calculate_line_of_sight(&field, Position::flat(x1, y1), Position::flat(x2, y2));
        prop_assert!(!sight.has_line_of_sight);
        prop_assert_eq!(sight.cover, CoverLevel::Total);
    }
}
