//! Nibble paths and the compact key encoding.
//!
//! A key byte expands to two nibbles (high first). A path that addresses a
//! leaf ends with the out-of-band [`TERMINATOR`] nibble. The compact
//! encoding packs a path back into bytes: bit 5 of the first byte flags the
//! terminator, bit 4 flags odd length, and an odd path's first nibble rides
//! in the low nibble of that byte.

/// Out-of-band nibble marking the end of a leaf path. Real nibbles are 0-15.
pub const TERMINATOR: u8 = 0x10;

/// A trie traversal path of half-byte nibbles, possibly terminator-ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NibblePath(Vec<u8>);

impl NibblePath {
    /// Wrap raw nibbles (values 0-15, optionally ending in [`TERMINATOR`]).
    pub fn from_nibbles(nibbles: Vec<u8>) -> Self {
        NibblePath(nibbles)
    }

    /// Expand key bytes to a terminator-ended nibble path.
    pub fn from_key_bytes(key: &[u8]) -> Self {
        let mut nibbles = Vec::with_capacity(key.len() * 2 + 1);
        for byte in key {
            nibbles.push(byte >> 4);
            nibbles.push(byte & 0x0F);
        }
        nibbles.push(TERMINATOR);
        NibblePath(nibbles)
    }

    /// Decode a compact-encoded key back to its nibble path.
    pub fn from_compact(compact: &[u8]) -> Self {
        if compact.is_empty() {
            return NibblePath(Vec::new());
        }

        // Re-expand to nibbles, dropping the synthetic terminator the
        // expansion appends.
        let mut base = Self::from_key_bytes(compact).0;
        base.pop();

        // High nibble of the first byte: bit 1 = terminator, bit 0 = odd.
        if base[0] >= 2 {
            base.push(TERMINATOR);
        }
        let chop = (2 - (base[0] & 1)) as usize;
        NibblePath(base.split_off(chop))
    }

    /// Pack this path into the compact encoding.
    pub fn to_compact(&self) -> Vec<u8> {
        let mut hex: &[u8] = &self.0;
        let mut terminator = 0u8;
        if self.has_terminator() {
            terminator = 1;
            hex = &hex[..hex.len() - 1];
        }

        let mut buf = vec![0u8; hex.len() / 2 + 1];
        buf[0] = terminator << 5;
        if hex.len() % 2 == 1 {
            buf[0] |= 1 << 4;
            buf[0] |= hex[0];
            hex = &hex[1..];
        }
        for (i, pair) in hex.chunks(2).enumerate() {
            buf[i + 1] = (pair[0] << 4) | pair[1];
        }
        buf
    }

    /// Whether this path ends in the terminator nibble.
    pub fn has_terminator(&self) -> bool {
        self.0.last() == Some(&TERMINATOR)
    }

    /// Length of the prefix shared with another path.
    pub fn common_prefix_len(&self, other: &NibblePath) -> usize {
        self.0
            .iter()
            .zip(other.0.iter())
            .take_while(|(a, b)| a == b)
            .count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get nibble at index.
    pub fn at(&self, index: usize) -> u8 {
        self.0[index]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}
