/// A packed array of 4-bit values. Two elements share a byte; even indices
/// occupy the low nibble, odd indices the high nibble. When the logical
/// length is odd the last byte holds a single nibble.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NibbleArray {
    bytes: Vec<u8>,
}

impl NibbleArray {
    /// Creates a zeroed array able to hold `len` nibbles.
    pub fn new(len: usize) -> NibbleArray {
        NibbleArray {
            bytes: vec![0; len.div_ceil(2)],
        }
    }

    /// Wraps an existing packed byte array; the logical length is twice the
    /// byte count.
    pub fn from_bytes(bytes: Vec<u8>) -> NibbleArray {
        NibbleArray { bytes }
    }

    /// The number of nibbles this array holds.
    pub fn len(&self) -> usize {
        self.bytes.len() * 2
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn get(&self, index: usize) -> u8 {
        let byte = self.bytes[index / 2];
        if index % 2 == 0 {
            byte & 0xF
        } else {
            byte >> 4
        }
    }

    /// Stores the low 4 bits of `value` at `index`, leaving the neighboring
    /// nibble untouched.
    pub fn set(&mut self, index: usize, value: u8) {
        let byte = &mut self.bytes[index / 2];
        if index % 2 == 0 {
            *byte = (*byte & 0xF0) | (value & 0xF);
        } else {
            *byte = (*byte & 0x0F) | ((value & 0xF) << 4);
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rounds_odd_length_up() {
        assert_eq!(NibbleArray::new(5).bytes().len(), 3);
        assert_eq!(NibbleArray::new(4096).bytes().len(), 2048);
    }

    #[test]
    fn test_set_get() {
        let mut array = NibbleArray::new(8);
        array.set(0, 0xA);
        array.set(1, 0x5);
        array.set(7, 0xF);

        assert_eq!(array.get(0), 0xA);
        assert_eq!(array.get(1), 0x5);
        assert_eq!(array.get(2), 0);
        assert_eq!(array.get(7), 0xF);
        assert_eq!(array.bytes()[0], 0x5A);
    }

    #[test]
    fn test_set_replaces_without_disturbing_neighbor() {
        let mut array = NibbleArray::new(2);
        array.set(0, 0xF);
        array.set(1, 0x3);
        array.set(0, 0x1);

        assert_eq!(array.get(0), 0x1);
        assert_eq!(array.get(1), 0x3);
    }

    #[test]
    fn test_value_is_masked() {
        let mut array = NibbleArray::new(2);
        array.set(0, 0xAB);
        assert_eq!(array.get(0), 0xB);
    }

    #[test]
    fn test_from_bytes() {
        let array = NibbleArray::from_bytes(vec![0x21, 0x43]);
        assert_eq!(array.len(), 4);
        assert_eq!(array.get(0), 1);
        assert_eq!(array.get(1), 2);
        assert_eq!(array.get(2), 3);
        assert_eq!(array.get(3), 4);
    }
}
