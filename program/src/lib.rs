//! Warmup/cooldown accounting for delegated stake.
//!
//! Decodes stake accounts and the stake history sysvar from their raw bytes
//! and computes how much of a delegation is effective, activating or
//! deactivating at a given epoch.

pub mod activation;
pub mod error;
pub mod state;

pub use activation::{
    compute_activation, resolve, StakeAccount, StakeActivation, StakeActivationState,
};
pub use error::StakeActivationError;

pinocchio_pubkey::declare_id!("Stake11111111111111111111111111111111111111");
