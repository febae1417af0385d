pub mod authorized;
pub mod delegation;
pub mod lockup;
pub mod meta;
pub mod pod;
pub mod stake;
pub mod stake_flags;
pub mod stake_history;
pub mod stake_history_entry;
pub mod stake_history_sysvar;
pub mod stake_state_v2;

pub use authorized::*;
pub use delegation::*;
pub use lockup::*;
pub use meta::*;
pub use pod::*;
pub use stake::*;
pub use stake_flags::*;
pub use stake_history::{StakeHistory, StakeHistoryGetEntry, MAX_ENTRIES};
pub use stake_history_entry::*;
pub use stake_history_sysvar::*;
pub use stake_state_v2::*;

pub(crate) use stake_history::{
    checked_entry_count, EPOCH_AND_ENTRY_SERIALIZED_SIZE, LENGTH_PREFIX_SIZE,
};

pub use pinocchio::sysvars::clock::Epoch;

pub type UnixTimestamp = i64;
