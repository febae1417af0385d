/// Per-account stake flag bits. Only carried through the codec; the
/// activation math ignores them.
#[repr(transparent)]
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy)]
pub struct StakeFlags {
    bits: u8,
}

impl StakeFlags {
    pub const LEN: usize = 1;

    /// Stake must be fully activated before it may be deactivated.
    pub const MUST_FULLY_ACTIVATE_BEFORE_DEACTIVATION_IS_PERMITTED: Self =
        Self { bits: 0b0000_0001 };

    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self { bits }
    }

    pub const fn bits(&self) -> u8 {
        self.bits
    }

    pub const fn contains(&self, other: Self) -> bool {
        self.bits & other.bits == other.bits
    }
}
