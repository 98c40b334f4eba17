//! Rolling weak checksum (Adler-32)
//!
//! The weak hash over the current window is the classic Adler-32 pair:
//! `a` = 1 + sum of window bytes mod 65521, `b` = sum of the prefix sums
//! mod 65521, combined as `(b << 16) | a`. Seeding a fresh window is a
//! single pass with [`RollingChecksum::write`]; sliding the window by one
//! byte is O(1) with [`RollingChecksum::roll`], which is exactly equivalent
//! to recomputing the checksum over the slid window.

/// Adler-32 modulus (largest prime below 2^16)
pub const MOD_ADLER: u32 = 65521;

/// Incrementally updatable Adler-32 checksum over a sliding window
#[derive(Debug, Clone)]
pub struct RollingChecksum {
    a: u32,
    b: u32,
    window_len: usize,
}

impl RollingChecksum {
    /// Create a checksum in its initial state (`a = 1`, `b = 0`, no window)
    pub fn new() -> Self {
        Self {
            a: 1,
            b: 0,
            window_len: 0,
        }
    }

    /// Drop all window state and return to the initial accumulators
    pub fn reset(&mut self) {
        self.a = 1;
        self.b = 0;
        self.window_len = 0;
    }

    /// Fold a whole buffer into the checksum.
    ///
    /// Used to seed a freshly established window after [`reset`]; incremental
    /// sliding goes through [`roll`] instead.
    ///
    /// [`reset`]: RollingChecksum::reset
    /// [`roll`]: RollingChecksum::roll
    pub fn write(&mut self, data: &[u8]) {
        for &byte in data {
            self.a = (self.a + u32::from(byte)) % MOD_ADLER;
            self.b = (self.b + self.a) % MOD_ADLER;
        }
        self.window_len += data.len();
    }

    /// Slide the window by one byte in O(1): `evicted` leaves the head,
    /// `incoming` is appended at the tail.
    ///
    /// With window length W, eviction removes W·evicted from `b` and the
    /// evicted byte from `a`; the new tail byte then contributes through the
    /// updated `a`. All intermediate sums stay far below `u32::MAX`, so the
    /// arithmetic never wraps before the modulo reduction.
    pub fn roll(&mut self, evicted: u8, incoming: u8) {
        let evicted = u32::from(evicted);
        let incoming = u32::from(incoming);

        self.a = (self.a + MOD_ADLER - evicted + incoming) % MOD_ADLER;

        let shift = ((self.window_len as u64 * u64::from(evicted)) % u64::from(MOD_ADLER)) as u32;
        self.b = (self.b + 2 * MOD_ADLER - shift + self.a - 1) % MOD_ADLER;
    }

    /// Current 32-bit checksum value
    pub fn sum(&self) -> u32 {
        (self.b << 16) | self.a
    }
}

impl Default for RollingChecksum {
    fn default() -> Self {
        Self::new()
    }
}
