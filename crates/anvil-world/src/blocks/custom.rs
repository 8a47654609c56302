use crate::blocks::Block;

/// A free-form block with explicit id, data and transparency. Used for the
/// default-layer fill and for tests. The declared transparency affects sky
/// light at placement time but is not persisted; reloading derives it from
/// the material table again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CustomBlock {
    id: u8,
    data: u8,
    transparency: u8,
}

impl CustomBlock {
    pub fn new(id: u8, data: u8, transparency: u8) -> CustomBlock {
        CustomBlock {
            id,
            data,
            transparency,
        }
    }
}

impl Block for CustomBlock {
    fn id(&self) -> u8 {
        self.id
    }

    fn data(&self) -> u8 {
        self.data
    }

    fn transparency(&self) -> u8 {
        self.transparency
    }
}
