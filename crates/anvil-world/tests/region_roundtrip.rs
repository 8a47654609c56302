use anvil_world::blocks::{Block, Material, SimpleBlock};
use anvil_world::region::Region;
use tempfile::tempdir;

#[test]
fn writes_and_reads_back_an_equal_region() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("r.1.2.mca");

    let mut region = Region::new(1, 2, None);
    region.set_block(1, 10, 3, &SimpleBlock(Material::Grass));
    region.set_block(2, 11, 4, &SimpleBlock(Material::Glass));
    region.set_block(3, 12, 5, &SimpleBlock(Material::BrickBlock));
    region.set_block(4, 13, 6, &SimpleBlock(Material::CoalOre));
    region.set_block(5, 14, 7, &SimpleBlock(Material::GoldBlock));

    region.write_to_file(&path).unwrap();

    let mut result = Region::new(1, 2, None);
    result.read_from_file(&path).unwrap();

    assert_eq!(result, region);
}

#[test]
fn preserves_columns_height_maps_and_sky_light() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("r.0.0.mca");

    let mut region = Region::new(0, 0, None);
    let stone = SimpleBlock(Material::Stone);
    let water = SimpleBlock(Material::Water);
    let column: Vec<&dyn Block> = vec![&stone, &stone, &stone, &water, &water];
    region.set_blocks(141, 126, &column);
    region.add_sky_light(141, 126);

    region.write_to_file(&path).unwrap();

    let mut result = Region::new(0, 0, None);
    result.read_from_file(&path).unwrap();

    assert_eq!(result, region);
    assert_eq!(result.highest_block(141, 126), 5);
}

#[test]
fn empty_chunks_are_not_stored() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("r.0.0.mca");

    let mut region = Region::new(0, 0, None);
    let mut air_only = Region::new(0, 0, None);
    air_only.set_block(0, 0, 0, &SimpleBlock(Material::Air));

    air_only.write_to_file(&path).unwrap();
    region.read_from_file(&path).unwrap();

    // Nothing but the header tables was written.
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 8192);
    assert_eq!(region, Region::new(0, 0, None));
}
