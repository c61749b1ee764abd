//! Rescaling of auxiliary font units into base font units

/// Ratio between the base and auxiliary `unitsPerEm`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Scale {
    to_upem: u16,
    from_upem: u16,
}

impl Scale {
    pub const IDENTITY: Self = Self { to_upem: 1, from_upem: 1 };

    /// Scale converting `from_upem` units into `to_upem` units
    pub fn new(to_upem: u16, from_upem: u16) -> Self {
        if to_upem == from_upem || from_upem == 0 {
            Self::IDENTITY
        } else {
            Self { to_upem, from_upem }
        }
    }

    pub fn is_identity(self) -> bool {
        self.to_upem == self.from_upem
    }

    pub fn factor(self) -> f64 {
        self.to_upem as f64 / self.from_upem as f64
    }

    pub fn apply(self, value: i16) -> i16 {
        if self.is_identity() {
            return value;
        }
        (value as f64 * self.factor())
            .round()
            .clamp(i16::MIN as f64, i16::MAX as f64) as i16
    }

    pub fn apply_u16(self, value: u16) -> u16 {
        if self.is_identity() {
            return value;
        }
        (value as f64 * self.factor()).round().clamp(0.0, u16::MAX as f64) as u16
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::IDENTITY
    }
}
