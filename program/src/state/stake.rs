use crate::error::StakeActivationError;

use super::{Delegation, LeReader, LeWriter};

#[repr(C)]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct Stake {
    pub delegation: Delegation,
    /// credits observed is credits from vote account state when delegated or redeemed
    pub credits_observed: u64,
}

impl Stake {
    pub const LEN: usize = Delegation::LEN + 8;

    pub fn read(reader: &mut LeReader) -> Result<Self, StakeActivationError> {
        Ok(Self {
            delegation: Delegation::read(reader)?,
            credits_observed: reader.read_u64()?,
        })
    }

    pub fn write(&self, writer: &mut LeWriter) {
        self.delegation.write(writer);
        writer.write_u64(self.credits_observed);
    }
}
