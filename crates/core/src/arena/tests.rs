use super::*;
use crate::champion::CHAMPION_STARTING_HP;
use crate::test_support::*;
use crate::weapons::Weapon;

fn menhir_tiles(arena: &Arena) -> Vec<Coords> {
    arena
        .terrain()
        .iter()
        .filter(|(_, tile)| tile.kind == TileKind::Menhir)
        .map(|(coords, _)| coords)
        .collect()
}

#[test]
fn step_forward_moves_and_updates_occupancy() {
    let mut arena = land_arena(5, 5);
    let id = place(&mut arena, Coords::new(2, 2), Facing::Right, idle("a"));
    arena.step_forward(id);

    assert_eq!(arena.champion(id).expect("champion").position(), Coords::new(3, 2));
    assert_eq!(arena.terrain().tile(Coords::new(3, 2)).expect("tile").character, Some(id));
    assert_eq!(arena.terrain().tile(Coords::new(2, 2)).expect("tile").character, None);
}

#[test]
fn step_forward_swaps_weapon_with_loot() {
    let mut arena = land_arena(5, 5);
    arena.terrain.tile_mut(Coords::new(2, 1)).expect("tile").loot = Some(Weapon::Axe);
    let id = place(&mut arena, Coords::new(2, 2), Facing::Up, idle("a"));
    arena.step_forward(id);

    assert_eq!(arena.champion(id).expect("champion").weapon(), Weapon::Axe);
    assert_eq!(arena.terrain().tile(Coords::new(2, 1)).expect("tile").loot, Some(Weapon::Knife));
}

#[test]
fn step_forward_is_blocked_by_impassable_tiles() {
    let mut arena = land_arena(5, 5);
    arena.terrain.set_kind(Coords::new(1, 2), TileKind::Sea);
    arena.terrain.set_kind(Coords::new(3, 2), TileKind::Wall);
    let id = place(&mut arena, Coords::new(2, 2), Facing::Left, idle("a"));
    place(&mut arena, Coords::new(2, 1), Facing::Down, idle("b"));

    for facing in [Facing::Left, Facing::Right, Facing::Up] {
        arena.champion_mut(id).expect("champion").facing = facing;
        arena.step_forward(id);
        assert_eq!(arena.champion(id).expect("champion").position(), Coords::new(2, 2), "{facing:?}");
    }

    let edge = place(&mut arena, Coords::new(0, 4), Facing::Down, idle("c"));
    arena.step_forward(edge);
    assert_eq!(arena.champion(edge).expect("champion").position(), Coords::new(0, 4));
}

#[test]
fn spawn_menhir_twice_leaves_one_menhir() {
    let mut arena = land_arena(5, 5);
    let mut rng = test_rng();
    arena.spawn_menhir(Some(Coords::new(1, 1)), &mut rng).expect("first menhir");
    arena.spawn_menhir(Some(Coords::new(3, 3)), &mut rng).expect("second menhir");

    assert_eq!(menhir_tiles(&arena), vec![Coords::new(3, 3)]);
    assert_eq!(arena.terrain().tile(Coords::new(1, 1)).expect("tile").kind, TileKind::Land);
    assert_eq!(arena.menhir_position(), Some(Coords::new(3, 3)));
}

#[test]
fn random_menhir_lands_on_an_empty_tile() {
    let mut arena = land_arena(3, 3);
    arena.terrain.set_kind(Coords::new(0, 0), TileKind::Wall);
    arena.terrain.tile_mut(Coords::new(1, 1)).expect("tile").loot = Some(Weapon::Sword);

    let position = arena.spawn_menhir(None, &mut test_rng()).expect("menhir");
    assert_ne!(position, Coords::new(0, 0));
    assert_ne!(position, Coords::new(1, 1));
    assert_eq!(menhir_tiles(&arena), vec![position]);
}

#[test]
fn menhir_outside_terrain_is_rejected() {
    let mut arena = land_arena(3, 3);
    let result = arena.spawn_menhir(Some(Coords::new(5, 0)), &mut test_rng());
    assert!(matches!(result, Err(GameError::OutOfBounds(_))));
    assert_eq!(arena.menhir_position(), None);
}

#[test]
fn explicit_menhir_needs_unoccupied_land() {
    let mut arena = land_arena(5, 5);
    let mut rng = test_rng();
    let id = place(&mut arena, Coords::new(1, 1), Facing::Up, idle("a"));
    arena.terrain.set_kind(Coords::new(4, 4), TileKind::Wall);

    let occupied = arena.spawn_menhir(Some(Coords::new(1, 1)), &mut rng);
    assert!(matches!(occupied, Err(GameError::TileNotEmpty(_))));
    let walled = arena.spawn_menhir(Some(Coords::new(4, 4)), &mut rng);
    assert!(matches!(walled, Err(GameError::TileNotEmpty(_))));

    assert!(menhir_tiles(&arena).is_empty());
    assert_eq!(arena.terrain().tile(Coords::new(1, 1)).expect("tile").character, Some(id));
    assert_eq!(arena.terrain().tile(Coords::new(4, 4)).expect("tile").kind, TileKind::Wall);

    arena.spawn_menhir(Some(Coords::new(3, 3)), &mut rng).expect("menhir");
    arena.spawn_menhir(Some(Coords::new(3, 3)), &mut rng).expect("same spot again");
    assert_eq!(menhir_tiles(&arena), vec![Coords::new(3, 3)]);
}

#[test]
fn champions_cannot_share_a_tile() {
    let mut arena = land_arena(3, 3);
    place(&mut arena, Coords::new(1, 1), Facing::Up, idle("a"));
    let result = arena.spawn_champion(Coords::new(1, 1), idle("b"), &mut test_rng());
    assert!(matches!(result, Err(GameError::TileNotEmpty(_))));
}

#[test]
fn mist_ring_closes_in_on_the_menhir() {
    let mut arena = land_arena(5, 5);
    arena.spawn_menhir(Some(Coords::new(2, 2)), &mut test_rng()).expect("menhir");
    assert_eq!(arena.mist_radius(), 7);

    while arena.mist_radius() > 2 {
        arena.increase_mist();
    }
    let misty = |arena: &Arena, coords| {
        arena.terrain().tile(coords).expect("tile").effects.contains(&Effect::Mist)
    };
    assert!(misty(&arena, Coords::new(0, 0)));
    assert!(misty(&arena, Coords::new(2, 0)));
    assert!(misty(&arena, Coords::new(1, 0)));
    assert!(!misty(&arena, Coords::new(1, 2)));
    assert!(!misty(&arena, Coords::new(2, 2)));

    arena.increase_mist();
    arena.increase_mist();
    assert_eq!(arena.mist_radius(), 0);
    assert!(misty(&arena, Coords::new(2, 2)));

    arena.increase_mist();
    assert_eq!(arena.mist_radius(), 0);
}

#[test]
fn standing_in_mist_wounds_every_turn() {
    let mut arena = land_arena(5, 5);
    let id = place(&mut arena, Coords::new(0, 0), Facing::Up, idle("a"));
    arena.register_effect(Effect::Mist, Coords::new(0, 0));

    arena.stay(id);
    arena.stay(id);
    assert_eq!(arena.champion(id).expect("champion").health(), CHAMPION_STARTING_HP - 2);
}

#[test]
fn instant_cut_applies_once_then_vanishes() {
    let mut arena = land_arena(5, 5);
    let id = place(&mut arena, Coords::new(1, 1), Facing::Up, idle("a"));
    arena.register_effect(Effect::WeaponCut, Coords::new(1, 1));
    arena.register_effect(Effect::WeaponCut, Coords::new(3, 3));

    arena.trigger_instants();
    assert_eq!(arena.champion(id).expect("champion").health(), CHAMPION_STARTING_HP - 2);
    assert!(arena.terrain().tile(Coords::new(1, 1)).expect("tile").effects.is_empty());
    assert!(arena.terrain().tile(Coords::new(3, 3)).expect("tile").effects.is_empty());

    arena.trigger_instants();
    assert_eq!(arena.champion(id).expect("champion").health(), CHAMPION_STARTING_HP - 2);
}

#[test]
fn death_drops_the_weapon_and_frees_the_tile() {
    let mut arena = land_arena(5, 5);
    let id = place(&mut arena, Coords::new(1, 1), Facing::Up, idle("a"));
    arena.champion_mut(id).expect("champion").weapon = Weapon::Sword;

    arena.damage(id, CHAMPION_STARTING_HP + 3);
    let champion = arena.champion(id).expect("dead champion stays addressable");
    assert!(!champion.alive());
    assert_eq!(champion.health(), 0);

    let tile = arena.terrain().tile(Coords::new(1, 1)).expect("tile");
    assert_eq!(tile.character, None);
    assert_eq!(tile.loot, Some(Weapon::Sword));
    assert!(!arena.empty_coords().contains(&Coords::new(1, 1)));
}

#[test]
fn description_names_arena_and_menhir() {
    let mut arena = land_arena(4, 4);
    arena.spawn_menhir(Some(Coords::new(0, 3)), &mut test_rng()).expect("menhir");
    let description = arena.description();
    assert_eq!(description.name, "test");
    assert_eq!(description.menhir_position, Some(Coords::new(0, 3)));
}
