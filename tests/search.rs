mod common;

use common::{OrganismBuilder, WorldBuilder};
use vivarium_data::{Direction, Tile};

const SENSE_LARGEST: u8 = 105;
const SENSE_ORGANISM: u8 = 115;
const SENSE_FOOD: u8 = 175;
const FIRE: u8 = 215;

fn sensed(world: &mut vivarium_core::World, id: vivarium_data::OrganismId) -> u8 {
    world.step_lane(id, 0).expect("organism is alive");
    let org = world.organism(id).unwrap();
    org.memory[org.lanes[0].dp]
}

#[test]
fn test_nothing_ahead_reads_zero() {
    let (mut world, ids) = WorldBuilder::new()
        .with_organism(OrganismBuilder::at(20, 40).program(&[SENSE_LARGEST]).dp(50))
        .with_organism(OrganismBuilder::at(30, 40).program(&[SENSE_FOOD]).dp(50))
        .with_organism(OrganismBuilder::at(40, 40).program(&[SENSE_ORGANISM]).dp(50))
        .build();
    for id in ids {
        world.organism_mut(id).unwrap().memory[50] = 77;
        assert_eq!(sensed(&mut world, id), 0);
    }
}

#[test]
fn test_food_within_reach_is_sensed() {
    let (mut world, ids) = WorldBuilder::new()
        .with_tile(20, 15, Tile::Food)
        .with_organism(OrganismBuilder::at(20, 40).program(&[SENSE_FOOD]).dp(50))
        .build();
    // 25 tiles away: rows 39 down to 15.
    assert_eq!(sensed(&mut world, ids[0]), 1);
}

#[test]
fn test_food_out_of_reach_is_not_sensed() {
    let (mut world, ids) = WorldBuilder::new()
        .with_tile(20, 14, Tile::Food)
        .with_organism(OrganismBuilder::at(20, 40).program(&[SENSE_FOOD]).dp(50))
        .build();
    assert_eq!(sensed(&mut world, ids[0]), 0);
}

#[test]
fn test_scan_covers_full_facing_edge() {
    let (mut world, ids) = WorldBuilder::new()
        .with_tile(32, 47, Tile::Food)
        .with_organism(
            OrganismBuilder::at(30, 40)
                .size(3, 3)
                .facing(Direction::Down)
                .program(&[SENSE_FOOD])
                .dp(50),
        )
        .build();
    assert_eq!(sensed(&mut world, ids[0]), 1);
}

#[test]
fn test_largest_organism_ahead_reports_area() {
    let (mut world, ids) = WorldBuilder::new()
        .with_organism(
            OrganismBuilder::at(20, 40)
                .size(2, 1)
                .program(&[SENSE_LARGEST])
                .dp(50),
        )
        .with_organism(OrganismBuilder::at(20, 30))
        .with_organism(OrganismBuilder::at(21, 20).size(3, 2))
        .build();
    assert_eq!(sensed(&mut world, ids[0]), 6);

    world.organism_mut(ids[0]).unwrap().memory[0] = SENSE_ORGANISM;
    assert_eq!(sensed(&mut world, ids[0]), 1);
}

#[test]
fn test_ghost_tiles_read_as_empty_space() {
    let (mut world, ids) = WorldBuilder::new()
        .with_tile(20, 30, Tile::Organism)
        .with_organism(OrganismBuilder::at(20, 40).program(&[SENSE_LARGEST]).dp(50))
        .build();
    assert_eq!(sensed(&mut world, ids[0]), 0);
}

#[test]
fn test_fire_hits_first_organism_on_the_ray() {
    let (mut world, ids) = WorldBuilder::new()
        .with_organism(
            OrganismBuilder::at(10, 30)
                .facing(Direction::Right)
                .program(&[FIRE]),
        )
        .with_organism(OrganismBuilder::at(20, 30))
        .with_organism(OrganismBuilder::at(25, 30))
        .build();
    world.step_lane(ids[0], 0);
    assert_food!(world, ids[0], 249);
    assert_food!(world, ids[1], 249);
    assert_food!(world, ids[2], 250);
}

#[test]
fn test_fire_out_of_range_misses() {
    let (mut world, ids) = WorldBuilder::new()
        .with_organism(
            OrganismBuilder::at(10, 30)
                .facing(Direction::Right)
                .program(&[FIRE]),
        )
        .with_organism(OrganismBuilder::at(36, 30))
        .build();
    world.step_lane(ids[0], 0);
    assert_food!(world, ids[0], 249);
    assert_food!(world, ids[1], 250);
}
