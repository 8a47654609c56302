use std::collections::HashMap;

use anvil_logger::time::unix_timestamp_millis;
use anvil_nbt::Tag;

/// The game mode stored in the level settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameType {
    Survival = 0,
    Creative = 1,
    Adventure = 2,
    Spectator = 3,
}

impl GameType {
    pub fn value(self) -> i32 {
        self as i32
    }
}

/// The terrain generator recorded in the level settings. Flat worlds can
/// carry a generator-options string such as `2;7,2x3,2;1;village`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Generator {
    Default,
    Flat(Option<String>),
}

impl Generator {
    fn name(&self) -> &str {
        match self {
            Generator::Default => "default",
            Generator::Flat(_) => "flat",
        }
    }

    fn options(&self) -> Option<&str> {
        match self {
            Generator::Default => None,
            Generator::Flat(options) => options.as_deref(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnPoint {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// The world settings written to `level.dat`: game mode, generator, seed
/// and spawn point.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    pub name: String,
    pub generator: Generator,
    pub allow_commands: bool,
    pub map_features: bool,
    pub random_seed: i64,
    pub spawn_point: SpawnPoint,
    pub game_type: GameType,
}

impl Level {
    /// A creative flat world with defaults and a time-derived seed.
    pub fn new(name: &str) -> Level {
        Level {
            name: name.to_owned(),
            generator: Generator::Flat(None),
            allow_commands: false,
            map_features: true,
            random_seed: unix_timestamp_millis(),
            spawn_point: SpawnPoint { x: 0, y: 0, z: 0 },
            game_type: GameType::Creative,
        }
    }

    /// Serializes to the level tag: an unnamed root holding the `Data`
    /// compound.
    pub fn to_tag(&self) -> Tag {
        let mut data = HashMap::new();
        data.insert(
            "allowCommands".to_owned(),
            Tag::Byte(self.allow_commands as i8),
        );
        data.insert("GameType".to_owned(), Tag::Int(self.game_type.value()));
        data.insert(
            "generatorName".to_owned(),
            Tag::String(self.generator.name().to_owned()),
        );
        data.insert("LastPlayed".to_owned(), Tag::Long(unix_timestamp_millis()));
        data.insert("LevelName".to_owned(), Tag::String(self.name.clone()));
        data.insert(
            "MapFeatures".to_owned(),
            Tag::Byte(self.map_features as i8),
        );
        data.insert("RandomSeed".to_owned(), Tag::Long(self.random_seed));
        data.insert("SpawnX".to_owned(), Tag::Int(self.spawn_point.x));
        data.insert("SpawnY".to_owned(), Tag::Int(self.spawn_point.y));
        data.insert("SpawnZ".to_owned(), Tag::Int(self.spawn_point.z));
        data.insert("version".to_owned(), Tag::Int(19133));
        if let Some(options) = self.generator.options() {
            data.insert(
                "generatorOptions".to_owned(),
                Tag::String(options.to_owned()),
            );
        }

        let mut root = HashMap::new();
        root.insert("Data".to_owned(), Tag::Compound(data));
        Tag::Compound(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_carries_settings() {
        let mut level = Level::new("TestWorld");
        level.game_type = GameType::Survival;
        level.random_seed = 42;

        let tag = level.to_tag();
        let data = tag.as_compound().unwrap()["Data"].as_compound().unwrap();

        assert_eq!(data["LevelName"].as_string().unwrap(), "TestWorld");
        assert_eq!(data["GameType"].as_i32(), Some(0));
        assert_eq!(data["RandomSeed"].as_i64(), Some(42));
        assert_eq!(data["generatorName"].as_string().unwrap(), "flat");
        assert_eq!(data["version"].as_i32(), Some(19133));
        assert!(!data.contains_key("generatorOptions"));
    }

    #[test]
    fn test_flat_generator_options() {
        let mut level = Level::new("Flats");
        level.generator = Generator::Flat(Some("2;7,2x3,2;1;village".to_owned()));

        let tag = level.to_tag();
        let data = tag.as_compound().unwrap()["Data"].as_compound().unwrap();
        assert_eq!(
            data["generatorOptions"].as_string().unwrap(),
            "2;7,2x3,2;1;village"
        );
    }
}
