use pinocchio::pubkey::Pubkey;

use crate::error::StakeActivationError;

use super::{Epoch, LeReader, LeWriter, UnixTimestamp};

#[repr(C)]
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy)]
pub struct Lockup {
    /// UnixTimestamp at which this stake will allow withdrawal, unless the
    ///   transaction is signed by the custodian
    pub unix_timestamp: UnixTimestamp,
    /// epoch height at which this stake will allow withdrawal, unless the
    ///   transaction is signed by the custodian
    pub epoch: Epoch,
    /// custodian signature on a transaction exempts the operation from
    ///  lockup constraints
    pub custodian: Pubkey,
}

impl Lockup {
    pub const LEN: usize = 48;

    pub fn read(reader: &mut LeReader) -> Result<Self, StakeActivationError> {
        Ok(Self {
            unix_timestamp: reader.read_i64()?,
            epoch: reader.read_u64()?,
            custodian: reader.read_pubkey()?,
        })
    }

    pub fn write(&self, writer: &mut LeWriter) {
        writer.write_i64(self.unix_timestamp);
        writer.write_u64(self.epoch);
        writer.write_pubkey(&self.custodian);
    }
}
