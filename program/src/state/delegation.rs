use pinocchio::pubkey::Pubkey;

use crate::error::StakeActivationError;

use super::{
    Epoch, LeReader, LeWriter, StakeActivationStatus, StakeHistoryEntry, StakeHistoryGetEntry,
};

/// Fraction of the cluster's effective stake that may warm up or cool down per epoch.
pub const WARMUP_COOLDOWN_RATE: f64 = 0.09;

#[repr(C)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Delegation {
    /// to whom the stake is delegated
    pub voter_pubkey: Pubkey,
    /// activated stake amount, set at delegate() time
    pub stake: u64,
    /// epoch at which this stake was activated
    pub activation_epoch: Epoch,
    /// epoch the stake was deactivated, Epoch::MAX if not deactivated
    pub deactivation_epoch: Epoch,
    /// formerly the per-delegation warmup/cooldown rate; unused
    pub reserved: u64,
}

impl Default for Delegation {
    fn default() -> Self {
        Self {
            voter_pubkey: Pubkey::default(),
            stake: 0,
            activation_epoch: 0,
            deactivation_epoch: Epoch::MAX,
            reserved: 0,
        }
    }
}

impl Delegation {
    pub const LEN: usize = 32 + 8 * 4;

    pub fn new(voter_pubkey: &Pubkey, stake: u64, activation_epoch: Epoch) -> Self {
        Self {
            voter_pubkey: *voter_pubkey,
            stake,
            activation_epoch,
            ..Self::default()
        }
    }

    pub fn read(reader: &mut LeReader) -> Result<Self, StakeActivationError> {
        Ok(Self {
            voter_pubkey: reader.read_pubkey()?,
            stake: reader.read_u64()?,
            activation_epoch: reader.read_u64()?,
            deactivation_epoch: reader.read_u64()?,
            reserved: reader.read_u64()?,
        })
    }

    pub fn write(&self, writer: &mut LeWriter) {
        writer.write_pubkey(&self.voter_pubkey);
        writer.write_u64(self.stake);
        writer.write_u64(self.activation_epoch);
        writer.write_u64(self.deactivation_epoch);
        writer.write_u64(self.reserved);
    }

    #[inline]
    pub fn is_deactivated(&self) -> bool {
        self.deactivation_epoch != Epoch::MAX
    }

    /// Effective stake only.
    pub fn effective_stake<T: StakeHistoryGetEntry>(&self, target_epoch: Epoch, history: &T) -> u64 {
        self.stake_activating_and_deactivating(target_epoch, history)
            .effective
    }

    pub fn stake_activating_and_deactivating<T: StakeHistoryGetEntry>(
        &self,
        target_epoch: Epoch,
        history: &T,
    ) -> StakeActivationStatus {
        // first, calculate an effective and activating stake
        let (effective_stake, activating_stake) = self.stake_and_activating(target_epoch, history);

        // then de-activate some portion if necessary
        if target_epoch < self.deactivation_epoch {
            // not deactivated
            if activating_stake == 0 {
                StakeHistoryEntry::with_effective(effective_stake)
            } else {
                StakeHistoryEntry::with_effective_and_activating(effective_stake, activating_stake)
            }
        } else if target_epoch == self.deactivation_epoch {
            // can only deactivate what's activated
            StakeHistoryEntry::with_deactivating(effective_stake)
        } else if let Some(mut prev_cluster_stake) = history.get_entry(self.deactivation_epoch) {
            // target_epoch > self.deactivation_epoch

            // loop from my deactivation epoch until the target epoch
            // current effective stake is updated using its previous epoch's cluster stake
            let mut current_epoch = self.deactivation_epoch;
            let mut current_effective_stake = effective_stake;
            loop {
                // if there is no deactivating stake at prev epoch, we should have been
                // fully undelegated at this moment
                if prev_cluster_stake.deactivating == 0 {
                    break;
                }

                // I'm trying to get to zero, how much of the deactivation in stake
                //   this account is entitled to take
                let weight =
                    current_effective_stake as f64 / prev_cluster_stake.deactivating as f64;

                // portion of newly not-effective cluster stake I'm entitled to at current epoch
                let newly_not_effective_cluster_stake =
                    prev_cluster_stake.effective as f64 * WARMUP_COOLDOWN_RATE;
                let newly_not_effective_stake =
                    entitled_share(weight, newly_not_effective_cluster_stake);

                current_effective_stake =
                    current_effective_stake.saturating_sub(newly_not_effective_stake);
                if current_effective_stake == 0 {
                    break;
                }

                current_epoch = current_epoch.saturating_add(1);
                if current_epoch >= target_epoch {
                    break;
                }
                match history.get_entry(current_epoch) {
                    Some(current_cluster_stake) => prev_cluster_stake = current_cluster_stake,
                    // a gap mid-walk keeps whatever is left
                    None => break,
                }
            }

            // deactivating stake should equal to all of currently remaining effective stake
            StakeHistoryEntry::with_deactivating(current_effective_stake)
        } else {
            // no history or I've dropped out of history, so assume fully deactivated
            StakeHistoryEntry::default()
        }
    }

    // returned tuple is (effective, activating) stake
    fn stake_and_activating<T: StakeHistoryGetEntry>(
        &self,
        target_epoch: Epoch,
        history: &T,
    ) -> (u64, u64) {
        let delegated_stake = self.stake;

        if self.activation_epoch == self.deactivation_epoch {
            // activated but instantly deactivated; no stake at all regardless of target_epoch
            // this must be before the all-is-activating check
            (0, 0)
        } else if target_epoch == self.activation_epoch {
            // all is activating
            (0, delegated_stake)
        } else if target_epoch < self.activation_epoch {
            // not yet enabled
            (0, 0)
        } else if let Some(mut prev_cluster_stake) = history.get_entry(self.activation_epoch) {
            // target_epoch > self.activation_epoch

            // loop from my activation epoch until the target epoch summing up my entitlement
            // current effective stake is updated using its previous epoch's cluster stake
            let mut current_epoch = self.activation_epoch;
            let mut current_effective_stake = 0u64;
            loop {
                // how much of the growth in stake this account is
                //  entitled to take
                let remaining_activating_stake = delegated_stake - current_effective_stake;
                let weight =
                    remaining_activating_stake as f64 / prev_cluster_stake.activating as f64;

                // portion of newly effective cluster stake I'm entitled to at current epoch
                let newly_effective_cluster_stake =
                    prev_cluster_stake.effective as f64 * WARMUP_COOLDOWN_RATE;
                let newly_effective_stake = entitled_share(weight, newly_effective_cluster_stake);

                current_effective_stake =
                    current_effective_stake.saturating_add(newly_effective_stake);
                if current_effective_stake >= delegated_stake {
                    current_effective_stake = delegated_stake;
                    break;
                }

                current_epoch = current_epoch.saturating_add(1);
                if current_epoch >= target_epoch || current_epoch >= self.deactivation_epoch {
                    break;
                }
                match history.get_entry(current_epoch) {
                    Some(current_cluster_stake) => prev_cluster_stake = current_cluster_stake,
                    // a gap mid-walk keeps whatever has accumulated
                    None => break,
                }
            }

            (
                current_effective_stake,
                delegated_stake - current_effective_stake,
            )
        } else {
            // no history or I've dropped out of history, so assume fully effective
            (delegated_stake, 0)
        }
    }
}

/// Rounds `weight * cluster_stake` to the nearest lamport, never below one so
/// every step makes progress. The float to int cast saturates.
#[inline]
fn entitled_share(weight: f64, cluster_stake: f64) -> u64 {
    ((weight * cluster_stake).round() as u64).max(1)
}
