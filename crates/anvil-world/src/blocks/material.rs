use once_cell::sync::Lazy;

use crate::world::DEFAULT_TRANSPARENCY;

macro_rules! materials {
    ($($name:ident => ($id:expr, $transparency:expr)),+ $(,)?) => {
        /// The basic materials with their block ids and transparency levels.
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum Material {
            $($name),+
        }

        impl Material {
            pub const ALL: &'static [Material] = &[$(Material::$name),+];

            /// The block id of this material.
            pub fn id(self) -> u8 {
                match self {
                    $(Material::$name => $id),+
                }
            }

            /// The transparency level: 0 opaque, 1 fully transparent,
            /// greater values absorb that much sky light.
            pub fn transparency(self) -> u8 {
                match self {
                    $(Material::$name => $transparency),+
                }
            }
        }
    };
}

materials! {
    Air => (0, 1),
    Stone => (1, 0),
    Grass => (2, 0),
    Dirt => (3, 0),
    Cobblestone => (4, 0),
    Planks => (5, 0),
    Sapling => (6, 1),
    Bedrock => (7, 0),
    FlowingWater => (8, 2),
    Water => (9, 2),
    FlowingLava => (10, 1),
    Lava => (11, 1),
    Sand => (12, 0),
    Gravel => (13, 0),
    GoldOre => (14, 0),
    IronOre => (15, 0),
    CoalOre => (16, 0),
    Log => (17, 0),
    Leaves => (18, 2),
    Sponge => (19, 0),
    Glass => (20, 1),
    LapisOre => (21, 0),
    LapisBlock => (22, 0),
    Dispenser => (23, 0),
    Sandstone => (24, 0),
    Noteblock => (25, 0),
    Bed => (26, 1),
    GoldenRail => (27, 1),
    DetectorRail => (28, 1),
    StickyPiston => (29, 1),
    Web => (30, 2),
    Tallgrass => (31, 1),
    Deadbush => (32, 1),
    Piston => (33, 1),
    PistonHead => (34, 1),
    Wool => (35, 0),
    PistonExtension => (36, 1),
    YellowFlower => (37, 1),
    RedFlower => (38, 1),
    BrownMushroom => (39, 1),
    RedMushroom => (40, 1),
    GoldBlock => (41, 0),
    IronBlock => (42, 0),
    DoubleStoneSlab => (43, 0),
    StoneSlab => (44, 1),
    BrickBlock => (45, 0),
    Tnt => (46, 0),
    Bookshelf => (47, 0),
    MossyCobblestone => (48, 0),
    Obsidian => (49, 0),
    Torch => (50, 1),
    Fire => (51, 1),
    MobSpawner => (52, 0),
    OakStairs => (53, 0),
    Chest => (54, 1),
    RedstoneWire => (55, 1),
    DiamondOre => (56, 0),
    DiamondBlock => (57, 0),
    CraftingTable => (58, 0),
    Wheat => (59, 1),
    Farmland => (60, 0),
    Furnace => (61, 0),
    LitFurnace => (62, 0),
    StandingSign => (63, 1),
    WoodenDoor => (64, 1),
    Ladder => (65, 1),
    Rail => (66, 1),
    StoneStairs => (67, 0),
    WallSign => (68, 0),
    Lever => (69, 1),
    StonePressurePlate => (70, 1),
    IronDoor => (71, 1),
    WoodenPressurePlate => (72, 1),
    RedstoneOre => (73, 0),
    LitRedstoneOre => (74, 1),
    UnlitRedstoneTorch => (75, 1),
    RedstoneTorch => (76, 1),
    StoneButton => (77, 1),
    SnowLayer => (78, 1),
    Ice => (79, 2),
    Snow => (80, 1),
    Cactus => (81, 1),
    Clay => (82, 0),
    Reeds => (83, 1),
    Jukebox => (84, 0),
    Fence => (85, 1),
    Pumpkin => (86, 0),
    Netherrack => (87, 0),
    SoulSand => (88, 0),
    Glowstone => (89, 1),
    Portal => (90, 1),
    LitPumpkin => (91, 0),
    Cake => (92, 1),
    UnpoweredRepeater => (93, 1),
    PoweredRepeater => (94, 1),
    StainedGlass => (95, 1),
    Trapdoor => (96, 1),
    MonsterEgg => (97, 0),
    Stonebrick => (98, 0),
    BrownMushroomBlock => (99, 0),
    RedMushroomBlock => (100, 0),
    IronBars => (101, 1),
    GlassPane => (102, 1),
    MelonBlock => (103, 0),
    PumpkinStem => (104, 1),
    MelonStem => (105, 1),
    Vine => (106, 1),
    FenceGate => (107, 1),
    BrickStairs => (108, 0),
    StoneBrickStairs => (109, 0),
    Mycelium => (110, 0),
    Waterlily => (111, 1),
    NetherBrick => (112, 0),
    NetherBrickFence => (113, 1),
    NetherBrickStairs => (114, 0),
    NetherWart => (115, 1),
    EnchantingTable => (116, 1),
    BrewingStand => (117, 1),
    Cauldron => (118, 1),
    EndPortal => (119, 1),
    EndPortalFrame => (120, 0),
    EndStone => (121, 0),
    DragonEgg => (122, 1),
    RedstoneLamp => (123, 0),
    LitRedstoneLamp => (124, 1),
    DoubleWoodenSlab => (125, 0),
    WoodenSlab => (126, 1),
    Cocoa => (127, 1),
    SandstoneStairs => (128, 0),
    EmeraldOre => (129, 0),
    EnderChest => (130, 1),
    TripwireHook => (131, 1),
    Tripwire => (132, 1),
    EmeraldBlock => (133, 0),
    SpruceStairs => (134, 0),
    BirchStairs => (135, 0),
    JungleStairs => (136, 0),
    CommandBlock => (137, 0),
    Beacon => (138, 1),
    CobblestoneWall => (139, 1),
    FlowerPot => (140, 1),
    Carrots => (141, 1),
    Potatoes => (142, 1),
    WoodenButton => (143, 1),
    Skull => (144, 1),
    Anvil => (145, 1),
    TrappedChest => (146, 1),
    LightWeightedPressurePlate => (147, 1),
    HeavyWeightedPressurePlate => (148, 1),
    UnpoweredComparator => (149, 1),
    PoweredComparator => (150, 1),
    DaylightDetector => (151, 1),
    RedstoneBlock => (152, 0),
    QuartzOre => (153, 0),
    Hopper => (154, 1),
    QuartzBlock => (155, 0),
    QuartzStairs => (156, 0),
    ActivatorRail => (157, 1),
    Dropper => (158, 0),
    StainedHardenedClay => (159, 0),
    StainedGlassPane => (160, 1),
    Leaves2 => (161, 2),
    Log2 => (162, 0),
    AcaciaStairs => (163, 0),
    DarkOakStairs => (164, 0),
    SlimeBlock => (165, 1),
    Barrier => (166, 1),
    IronTrapdoor => (167, 1),
    Prismarine => (168, 0),
    SeaLantern => (169, 1),
    HayBlock => (170, 0),
    Carpet => (171, 1),
    HardenedClay => (172, 0),
    CoalBlock => (173, 0),
    PackedIce => (174, 0),
    DoublePlant => (175, 1),
    StandingBanner => (176, 1),
    WallBanner => (177, 1),
    DaylightDetectorInverted => (178, 1),
    RedSandstone => (179, 0),
    RedSandstoneStairs => (180, 0),
    DoubleStoneSlab2 => (181, 0),
    StoneSlab2 => (182, 1),
    SpruceFenceGate => (183, 1),
    BirchFenceGate => (184, 1),
    JungleFenceGate => (185, 1),
    DarkOakFenceGate => (186, 1),
    AcaciaFenceGate => (187, 1),
    SpruceFence => (188, 1),
    BirchFence => (189, 1),
    JungleFence => (190, 1),
    DarkOakFence => (191, 1),
    AcaciaFence => (192, 1),
    SpruceDoor => (193, 1),
    BirchDoor => (194, 1),
    JungleDoor => (195, 1),
    AcaciaDoor => (196, 1),
    DarkOakDoor => (197, 1),
}

// Ids without a material fall back to fully transparent.
static TRANSPARENCY_BY_ID: Lazy<[u8; 256]> = Lazy::new(|| {
    let mut table = [DEFAULT_TRANSPARENCY; 256];
    for &material in Material::ALL {
        table[material.id() as usize] = material.transparency();
    }
    table
});

impl Material {
    /// Looks up the transparency for a raw block id, for blocks loaded back
    /// from disk where only the id survives.
    pub fn transparency_of(id: u8) -> u8 {
        TRANSPARENCY_BY_ID[id as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_contiguous() {
        for (index, material) in Material::ALL.iter().enumerate() {
            assert_eq!(material.id() as usize, index);
        }
    }

    #[test]
    fn test_transparency_lookup_matches_material() {
        assert_eq!(Material::transparency_of(Material::Stone.id()), 0);
        assert_eq!(Material::transparency_of(Material::Glass.id()), 1);
        assert_eq!(Material::transparency_of(Material::Water.id()), 2);
        // Unassigned ids read as fully transparent.
        assert_eq!(Material::transparency_of(250), 1);
    }
}
