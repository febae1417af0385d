use crate::error::StakeActivationError;

use super::{Authorized, LeReader, LeWriter, Lockup};

#[repr(C)]
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy)]
pub struct Meta {
    /// lamports that must stay in the account; never stakeable
    pub rent_exempt_reserve: u64,
    pub authorized: Authorized,
    pub lockup: Lockup,
}

impl Meta {
    pub const LEN: usize = 8 + Authorized::LEN + Lockup::LEN;

    pub fn read(reader: &mut LeReader) -> Result<Self, StakeActivationError> {
        Ok(Self {
            rent_exempt_reserve: reader.read_u64()?,
            authorized: Authorized::read(reader)?,
            lockup: Lockup::read(reader)?,
        })
    }

    pub fn write(&self, writer: &mut LeWriter) {
        writer.write_u64(self.rent_exempt_reserve);
        self.authorized.write(writer);
        self.lockup.write(writer);
    }
}
