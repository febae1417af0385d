use crate::error::StakeActivationError;

use super::{Delegation, LeReader, LeWriter, Meta, Stake, StakeFlags};

/// Fixed size of every stake account's data.
pub const STAKE_ACCOUNT_SIZE: usize = 200;

// the largest variant must fit, or `serialize` would drop its tail
const _: () = assert!(4 + Meta::LEN + Stake::LEN + StakeFlags::LEN <= STAKE_ACCOUNT_SIZE);

#[repr(u32)]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum StakeStateV2 {
    #[default]
    Uninitialized = 0,
    Initialized(Meta) = 1,
    Stake(Meta, Stake, StakeFlags) = 2,
    RewardsPool = 3,
}

impl StakeStateV2 {
    /// The fixed number of bytes used to serialize each stake account
    pub const fn size_of() -> usize {
        STAKE_ACCOUNT_SIZE
    }

    pub fn deserialize(data: &[u8]) -> Result<Self, StakeActivationError> {
        if data.len() < Self::size_of() {
            return Err(StakeActivationError::MalformedRecord);
        }

        let mut reader = LeReader::new(data);
        match reader.read_u32()? {
            0 => Ok(Self::Uninitialized),
            1 => Ok(Self::Initialized(Meta::read(&mut reader)?)),
            2 => {
                let meta = Meta::read(&mut reader)?;
                let stake = Stake::read(&mut reader)?;
                let stake_flags = StakeFlags::from_bits(reader.read_u8()?);
                Ok(Self::Stake(meta, stake, stake_flags))
            }
            3 => Ok(Self::RewardsPool),
            _ => Err(StakeActivationError::MalformedRecord),
        }
    }

    /// Serializes into a full-size account buffer, zero-filling unused bytes.
    pub fn serialize(&self) -> [u8; STAKE_ACCOUNT_SIZE] {
        let mut writer = LeWriter::with_capacity(STAKE_ACCOUNT_SIZE);
        self.write(&mut writer);

        let mut data = [0; STAKE_ACCOUNT_SIZE];
        for (dst, src) in data.iter_mut().zip(writer.into_inner()) {
            *dst = src;
        }
        data
    }

    fn write(&self, writer: &mut LeWriter) {
        writer.write_u32(self.discriminant());
        match self {
            Self::Uninitialized | Self::RewardsPool => {}
            Self::Initialized(meta) => meta.write(writer),
            Self::Stake(meta, stake, stake_flags) => {
                meta.write(writer);
                stake.write(writer);
                writer.write_u8(stake_flags.bits());
            }
        }
    }

    fn discriminant(&self) -> u32 {
        match self {
            Self::Uninitialized => 0,
            Self::Initialized(_) => 1,
            Self::Stake(..) => 2,
            Self::RewardsPool => 3,
        }
    }

    pub fn meta(&self) -> Option<&Meta> {
        match self {
            Self::Initialized(meta) | Self::Stake(meta, _, _) => Some(meta),
            _ => None,
        }
    }

    pub fn stake(&self) -> Option<&Stake> {
        match self {
            Self::Stake(_, stake, _) => Some(stake),
            _ => None,
        }
    }

    pub fn delegation(&self) -> Option<&Delegation> {
        self.stake().map(|stake| &stake.delegation)
    }
}
