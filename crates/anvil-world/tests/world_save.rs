use anvil_world::blocks::{Block, Material, SimpleBlock};
use anvil_world::{DefaultLayers, Level, World};
use tempfile::tempdir;

#[test]
fn saves_level_and_regions() {
    let dir = tempdir().unwrap();

    let mut layers = DefaultLayers::new();
    layers.set_layer(0, Material::Bedrock);
    layers.set_layers(1, 3, Material::Dirt);

    let mut world = World::new(dir.path(), Level::new("TestWorld"), Some(layers), false).unwrap();

    let grass = SimpleBlock(Material::Grass);
    let column: Vec<&dyn Block> = vec![&grass; 10];
    world.set_blocks(5, 5, &column).unwrap();
    world.set_blocks(-5, -5, &column).unwrap();
    world.save().unwrap();

    let level_dir = dir.path().join("TestWorld");
    assert!(level_dir.join("session.lock").exists());
    // level.dat is gzip-framed.
    let level_dat = std::fs::read(level_dir.join("level.dat")).unwrap();
    assert_eq!(&level_dat[..2], &[0x1f, 0x8b]);
    // One region per sign quadrant touched.
    assert!(level_dir.join("region/r.0.0.mca").exists());
    assert!(level_dir.join("region/r.-1.-1.mca").exists());
}

#[test]
fn maps_negative_coordinates_into_the_right_region() {
    let dir = tempdir().unwrap();
    let mut world = World::new(dir.path(), Level::new("Negatives"), None, false).unwrap();

    let stone = SimpleBlock(Material::Stone);
    let column: Vec<&dyn Block> = vec![&stone; 7];
    world.set_blocks(-1, -1, &column).unwrap();
    world.set_blocks(-512, -512, &column).unwrap();

    assert_eq!(world.highest_block(-1, -1).unwrap(), 7);
    assert_eq!(world.highest_block(-512, -512).unwrap(), 7);
    assert_eq!(world.highest_block(-2, -2).unwrap(), 0);

    world.save().unwrap();
    // Both columns live in region (-1, -1): it spans blocks -512..-1.
    let region_dir = dir.path().join("Negatives/region");
    assert!(region_dir.join("r.-1.-1.mca").exists());
    assert!(!region_dir.join("r.-2.-2.mca").exists());
}

#[test]
fn rejects_empty_and_oversized_columns() {
    let dir = tempdir().unwrap();
    let mut world = World::new(dir.path(), Level::new("Bounds"), None, false).unwrap();

    let stone = SimpleBlock(Material::Stone);
    world.set_blocks(0, 0, &[]).unwrap();
    let too_tall: Vec<&dyn Block> = vec![&stone; 256];
    world.set_blocks(0, 0, &too_tall).unwrap();

    assert_eq!(world.highest_block(0, 0).unwrap(), 0);
}

#[test]
fn default_layers_fill_new_chunks() {
    let dir = tempdir().unwrap();

    let mut layers = DefaultLayers::new();
    layers.set_layers(0, 4, Material::Stone);

    let mut world = World::new(dir.path(), Level::new("Layered"), Some(layers), false).unwrap();

    // Touching one column creates its chunk with the layer fill, so a
    // neighboring column already has the five stone layers.
    let dirt = SimpleBlock(Material::Dirt);
    let one: Vec<&dyn Block> = vec![&dirt; 1];
    world.set_blocks(64, 64, &one).unwrap();
    world.set_blocks(65, 64, &one).unwrap();

    assert_eq!(world.highest_block(65, 64).unwrap(), 5);
}

#[test]
fn sky_light_reaches_saved_regions() {
    let dir = tempdir().unwrap();
    let mut world = World::new(dir.path(), Level::new("Lit"), None, false).unwrap();

    let stone = SimpleBlock(Material::Stone);
    let column: Vec<&dyn Block> = vec![&stone; 3];
    world.set_blocks(10, 10, &column).unwrap();
    world.calculate_sky_light(10, 10).unwrap();
    world.save().unwrap();

    assert!(dir.path().join("Lit/region/r.0.0.mca").exists());
}
