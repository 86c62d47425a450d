/// FNV-1a over the bytes that describe a shape; stable across runs and platforms.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Default for Fnv1a64 {
    fn default() -> Self {
        Self(0xcbf2_9ce4_8422_2325)
    }
}

impl Fnv1a64 {
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    /// Variant tag, so shapes with equal dimensions but different kinds differ.
    pub(crate) fn tag(&mut self, v: u8) {
        self.bytes(&[v]);
    }

    /// Exact bit pattern; `0.0` and `-0.0` hash apart.
    pub(crate) fn float(&mut self, v: f64) {
        self.bytes(&v.to_bits().to_le_bytes());
    }

    pub(crate) fn bytes(&mut self, bytes: &[u8]) {
        self.0 = bytes
            .iter()
            .fold(self.0, |h, &b| (h ^ u64::from(b)).wrapping_mul(Self::PRIME));
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// `round(x * y / 255)` for 8-bit channels.
pub(crate) fn scale_u8(x: u8, y: u8) -> u8 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
