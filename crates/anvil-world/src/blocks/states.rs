//! Shared block-state enums.

/// A direction along one of the two horizontal axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing2 {
    NorthSouth,
    EastWest,
}

/// The direction in which a block or object is facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing4 {
    North,
    South,
    East,
    West,
}

/// For objects that consist of two blocks, which part this is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Half {
    Upper,
    Lower,
}

/// The side on which a door hinge sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HingeSide {
    Left,
    Right,
}

/// The 16 dye colors of stained blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StainedColor {
    White = 0,
    Orange = 1,
    Magenta = 2,
    LightBlue = 3,
    Yellow = 4,
    Lime = 5,
    Pink = 6,
    Gray = 7,
    LightGray = 8,
    Cyan = 9,
    Purple = 10,
    Blue = 11,
    Brown = 12,
    Green = 13,
    Red = 14,
    Black = 15,
}

impl StainedColor {
    pub fn value(self) -> u8 {
        self as u8
    }
}

/// The four curve orientations of curved rails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RailCurve {
    SouthEast = 6,
    SouthWest = 7,
    NorthWest = 8,
    NorthEast = 9,
}

impl RailCurve {
    pub fn value(self) -> u8 {
        self as u8
    }
}
