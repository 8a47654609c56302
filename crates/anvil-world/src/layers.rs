use crate::blocks::Material;
use crate::world::MAX_HEIGHT;

/// Default block layers for newly created chunks: an optional material per
/// Y level. Filling every new chunk from these gives a flat base world that
/// later writes overwrite. Out-of-range Y coordinates are ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct DefaultLayers {
    layers: [Option<Material>; MAX_HEIGHT],
}

impl DefaultLayers {
    pub fn new() -> DefaultLayers {
        DefaultLayers {
            layers: [None; MAX_HEIGHT],
        }
    }

    /// Sets the material of a single layer. Fails silently on invalid Y.
    pub fn set_layer(&mut self, y: usize, material: Material) {
        if y < MAX_HEIGHT {
            self.layers[y] = material.into();
        }
    }

    /// Sets the material for all layers from `y1` through `y2` inclusive.
    /// Fails silently when either bound is invalid.
    pub fn set_layers(&mut self, y1: usize, y2: usize, material: Material) {
        if y1 >= MAX_HEIGHT || y2 >= MAX_HEIGHT {
            return;
        }
        for y in y1..=y2 {
            self.layers[y] = Some(material);
        }
    }

    pub fn layer(&self, y: usize) -> Option<Material> {
        if y < MAX_HEIGHT {
            self.layers[y]
        } else {
            None
        }
    }
}

impl Default for DefaultLayers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_layers() {
        let mut layers = DefaultLayers::new();
        layers.set_layer(0, Material::Bedrock);
        layers.set_layers(1, 3, Material::Dirt);

        assert_eq!(layers.layer(0), Some(Material::Bedrock));
        assert_eq!(layers.layer(2), Some(Material::Dirt));
        assert_eq!(layers.layer(4), None);
    }

    #[test]
    fn test_invalid_y_fails_silently() {
        let mut layers = DefaultLayers::new();
        layers.set_layer(256, Material::Stone);
        layers.set_layers(250, 300, Material::Stone);

        assert_eq!(layers.layer(255), None);
        assert_eq!(layers.layer(300), None);
    }
}
