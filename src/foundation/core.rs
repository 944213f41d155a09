/// One packed 32-bit color sample.
///
/// Channel layout, most significant byte first: alpha, red, green, blue. The same layout is used
/// for every source buffer and for the composited output. Transparency companions reuse the
/// layout to carry an `f32` bit pattern instead of a color, see
/// [`channel_bits_to_float`](crate::channel_bits_to_float).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct Argb(pub u32);

impl Argb {
    /// Fully opaque white, the value every output pixel starts from.
    pub const OPAQUE_WHITE: Self = Self(0xFFFF_FFFF);
    /// All channels zero.
    pub const TRANSPARENT: Self = Self(0);

    /// Pack four 8-bit channels.
    pub fn from_channels(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b))
    }

    /// Alpha channel.
    pub fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red channel.
    pub fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    pub fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    pub fn b(self) -> u8 {
        self.0 as u8
    }

    /// Channels widened to `i32`, in `[a, r, g, b]` order.
    pub fn channels(self) -> [i32; 4] {
        [
            i32::from(self.a()),
            i32::from(self.r()),
            i32::from(self.g()),
            i32::from(self.b()),
        ]
    }

    /// Clamp each `[a, r, g, b]` channel to `[0, 255]` and pack.
    pub fn pack_clamped(ch: [i32; 4]) -> Self {
        let c = |v: i32| v.clamp(0, 255) as u8;
        Self::from_channels(c(ch[0]), c(ch[1]), c(ch[2]), c(ch[3]))
    }
}

impl From<u32> for Argb {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl From<Argb> for u32 {
    fn from(v: Argb) -> Self {
        v.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
