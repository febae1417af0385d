use pinocchio::pubkey::{Pubkey, PUBKEY_BYTES};

use crate::error::StakeActivationError;

/// Forward-only little-endian reader over a fixed layout.
///
/// Callers check the total length up front, so reads past the end report
/// `MalformedRecord` instead of panicking.
pub struct LeReader<'a> {
    data: &'a [u8],
    offset: usize,
}

/// Little-endian writer, the mirror of [`LeReader`]. Appends to a growable
/// buffer, so writes cannot fail.
#[derive(Debug, Default)]
pub struct LeWriter {
    data: Vec<u8>,
}

macro_rules! impl_le_number {
    ($read:ident, $write:ident, $int_type:ty) => {
        impl LeReader<'_> {
            #[inline(always)]
            pub fn $read(&mut self) -> Result<$int_type, StakeActivationError> {
                self.take_array().map(<$int_type>::from_le_bytes)
            }
        }

        impl LeWriter {
            #[inline(always)]
            pub fn $write(&mut self, value: $int_type) {
                self.data.extend_from_slice(&value.to_le_bytes());
            }
        }
    };
}

impl_le_number!(read_u8, write_u8, u8);
impl_le_number!(read_u32, write_u32, u32);
impl_le_number!(read_u64, write_u64, u64);
impl_le_number!(read_i64, write_i64, i64);

impl<'a> LeReader<'a> {
    #[inline(always)]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    #[inline(always)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline(always)]
    pub fn read_pubkey(&mut self) -> Result<Pubkey, StakeActivationError> {
        self.take_array::<PUBKEY_BYTES>()
    }

    pub fn skip(&mut self, len: usize) -> Result<(), StakeActivationError> {
        self.take(len).map(|_| ())
    }

    #[inline(always)]
    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], StakeActivationError> {
        let bytes = self.take(N)?;
        // `take` returned exactly N bytes
        bytes
            .try_into()
            .map_err(|_| StakeActivationError::MalformedRecord)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], StakeActivationError> {
        let end = self
            .offset
            .checked_add(len)
            .ok_or(StakeActivationError::MalformedRecord)?;
        let bytes = self
            .data
            .get(self.offset..end)
            .ok_or(StakeActivationError::MalformedRecord)?;
        self.offset = end;
        Ok(bytes)
    }
}

impl LeWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline(always)]
    pub fn write_pubkey(&mut self, pubkey: &Pubkey) {
        self.data.extend_from_slice(pubkey);
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}
