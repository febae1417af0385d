//! Activation status of a stake account as of an epoch.
//!
//! [`resolve`] takes the raw stake account data (with its lamport balance)
//! and the raw stake history sysvar data, and reports the same
//! `{state, active, inactive}` split the cluster's RPC returns.

use core::fmt;

#[cfg(feature = "logging")]
use pinocchio_log::log;

use crate::{
    error::StakeActivationError,
    state::{
        Delegation, Epoch, StakeActivationStatus, StakeHistoryGetEntry, StakeHistorySysvar,
        StakeStateV2,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StakeActivationState {
    Activating,
    Active,
    Deactivating,
    Inactive,
}

impl StakeActivationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activating => "activating",
            Self::Active => "active",
            Self::Deactivating => "deactivating",
            Self::Inactive => "inactive",
        }
    }

    /// Deactivating wins over activating, which wins over active.
    pub fn from_status(status: &StakeActivationStatus) -> Self {
        if status.deactivating > 0 {
            Self::Deactivating
        } else if status.activating > 0 {
            Self::Activating
        } else if status.effective > 0 {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

impl fmt::Display for StakeActivationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeActivation {
    pub state: StakeActivationState,
    /// lamports currently effective
    pub active: u64,
    /// lamports not effective, excluding the rent exempt reserve
    pub inactive: u64,
}

/// A fetched stake account: its balance and its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeAccount<'a> {
    pub lamports: u64,
    pub data: &'a [u8],
}

/// Splits one delegation into effective, activating and deactivating stake
/// at `target_epoch`.
#[inline]
pub fn compute_activation<T: StakeHistoryGetEntry>(
    delegation: &Delegation,
    target_epoch: Epoch,
    history: &T,
) -> StakeActivationStatus {
    delegation.stake_activating_and_deactivating(target_epoch, history)
}

pub fn resolve(
    account: &StakeAccount,
    history_data: &[u8],
    current_epoch: Epoch,
) -> Result<StakeActivation, StakeActivationError> {
    let stake_state = StakeStateV2::deserialize(account.data).map_err(|e| {
        #[cfg(feature = "logging")]
        log!("stake account rejected: {} bytes", account.data.len() as u64);
        e
    })?;
    let stake_history = StakeHistorySysvar::new(history_data).map_err(|e| {
        #[cfg(feature = "logging")]
        log!("stake history rejected: {} bytes", history_data.len() as u64);
        e
    })?;

    resolve_state(&stake_state, account.lamports, &stake_history, current_epoch)
}

/// [`resolve`] for records that are already decoded.
pub fn resolve_state<T: StakeHistoryGetEntry>(
    stake_state: &StakeStateV2,
    lamports: u64,
    history: &T,
    current_epoch: Epoch,
) -> Result<StakeActivation, StakeActivationError> {
    let activation = match stake_state {
        StakeStateV2::Stake(meta, stake, _stake_flags) => {
            let status = compute_activation(&stake.delegation, current_epoch, history);
            let inactive = lamports
                .checked_sub(status.effective)
                .and_then(|lamports| lamports.checked_sub(meta.rent_exempt_reserve))
                .ok_or(StakeActivationError::ArithmeticGuardFailed)?;
            StakeActivation {
                state: StakeActivationState::from_status(&status),
                active: status.effective,
                inactive,
            }
        }
        StakeStateV2::Initialized(meta) => {
            // stake accounts must have a balance >= rent_exempt_reserve
            let inactive = lamports
                .checked_sub(meta.rent_exempt_reserve)
                .ok_or(StakeActivationError::ArithmeticGuardFailed)?;
            StakeActivation {
                state: StakeActivationState::Inactive,
                active: 0,
                inactive,
            }
        }
        StakeStateV2::Uninitialized | StakeStateV2::RewardsPool => {
            return Err(StakeActivationError::NotADelegatedStake)
        }
    };

    #[cfg(feature = "logging")]
    log!(
        "stake {}: active {} inactive {}",
        activation.state.as_str(),
        activation.active,
        activation.inactive
    );

    Ok(activation)
}
