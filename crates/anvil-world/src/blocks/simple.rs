use crate::blocks::{Block, Material};

/// A plain block carrying nothing but its material; block data is always 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimpleBlock(pub Material);

impl Block for SimpleBlock {
    fn id(&self) -> u8 {
        self.0.id()
    }

    fn data(&self) -> u8 {
        0
    }

    fn transparency(&self) -> u8 {
        self.0.transparency()
    }
}
