use pinocchio::pubkey::Pubkey;

use crate::error::StakeActivationError;

use super::{LeReader, LeWriter};

#[repr(C)]
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy)]
pub struct Authorized {
    pub staker: Pubkey,
    pub withdrawer: Pubkey,
}

impl Authorized {
    pub const LEN: usize = 64;

    pub fn read(reader: &mut LeReader) -> Result<Self, StakeActivationError> {
        Ok(Self {
            staker: reader.read_pubkey()?,
            withdrawer: reader.read_pubkey()?,
        })
    }

    pub fn write(&self, writer: &mut LeWriter) {
        writer.write_pubkey(&self.staker);
        writer.write_pubkey(&self.withdrawer);
    }
}
