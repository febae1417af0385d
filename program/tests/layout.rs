#![allow(deprecated)]

//! The decoders must read exactly what the cluster writes, so compare them
//! against bincode output of the reference `solana-program` types.

use solana_program::{
    pubkey::Pubkey as RefPubkey,
    stake::{
        stake_flags::StakeFlags as RefStakeFlags,
        state::{
            Authorized as RefAuthorized, Delegation as RefDelegation, Lockup as RefLockup,
            Meta as RefMeta, Stake as RefStake, StakeStateV2 as RefStakeStateV2,
        },
    },
    stake_history::{StakeHistory as RefStakeHistory, StakeHistoryEntry as RefStakeHistoryEntry},
};
use stake_activation::state::{
    stake_history, StakeHistory, StakeHistoryEntry, StakeHistoryGetEntry, StakeHistorySysvar,
    StakeStateV2, STAKE_ACCOUNT_SIZE,
};

fn ref_meta() -> RefMeta {
    RefMeta {
        rent_exempt_reserve: 2_282_880,
        authorized: RefAuthorized {
            staker: RefPubkey::new_from_array([1; 32]),
            withdrawer: RefPubkey::new_from_array([2; 32]),
        },
        lockup: RefLockup {
            unix_timestamp: 1_700_000_000,
            epoch: 600,
            custodian: RefPubkey::new_from_array([3; 32]),
        },
    }
}

/// Account data as the runtime stores it: serialized state in a zeroed 200 byte buffer.
fn account_data(state: &RefStakeStateV2) -> Vec<u8> {
    let mut data = bincode::serialize(state).unwrap();
    assert!(data.len() <= STAKE_ACCOUNT_SIZE);
    data.resize(STAKE_ACCOUNT_SIZE, 0);
    data
}

#[test]
fn test_ids_match_reference() {
    assert_eq!(stake_activation::ID, solana_program::stake::program::ID.to_bytes());
    assert_eq!(
        stake_history::ID,
        solana_program::sysvar::stake_history::ID.to_bytes()
    );
    assert_eq!(STAKE_ACCOUNT_SIZE, RefStakeStateV2::size_of());
}

#[test]
fn test_decodes_reference_stake_account() {
    let ref_state = RefStakeStateV2::Stake(
        ref_meta(),
        RefStake {
            delegation: RefDelegation {
                voter_pubkey: RefPubkey::new_from_array([4; 32]),
                stake: 5_000_000_000,
                activation_epoch: 580,
                deactivation_epoch: 610,
                warmup_cooldown_rate: 0.25,
            },
            credits_observed: 123_456,
        },
        RefStakeFlags::empty(),
    );
    let data = account_data(&ref_state);

    let state = StakeStateV2::deserialize(&data).unwrap();
    let meta = state.meta().unwrap();
    assert_eq!(meta.rent_exempt_reserve, 2_282_880);
    assert_eq!(meta.authorized.staker, [1; 32]);
    assert_eq!(meta.authorized.withdrawer, [2; 32]);
    assert_eq!(meta.lockup.unix_timestamp, 1_700_000_000);
    assert_eq!(meta.lockup.epoch, 600);
    assert_eq!(meta.lockup.custodian, [3; 32]);

    let stake = state.stake().unwrap();
    assert_eq!(stake.credits_observed, 123_456);
    assert_eq!(stake.delegation.voter_pubkey, [4; 32]);
    assert_eq!(stake.delegation.stake, 5_000_000_000);
    assert_eq!(stake.delegation.activation_epoch, 580);
    assert_eq!(stake.delegation.deactivation_epoch, 610);
    assert_eq!(stake.delegation.reserved, 0.25f64.to_bits());

    assert_eq!(state.serialize().as_slice(), data.as_slice());
}

#[test]
fn test_decodes_reference_initialized_account() {
    let data = account_data(&RefStakeStateV2::Initialized(ref_meta()));
    let state = StakeStateV2::deserialize(&data).unwrap();
    assert_eq!(state.meta().map(|meta| meta.rent_exempt_reserve), Some(2_282_880));
    assert_eq!(state.delegation(), None);
    assert_eq!(state.serialize().as_slice(), data.as_slice());
}

#[test]
fn test_decodes_reference_unit_variants() {
    let data = account_data(&RefStakeStateV2::Uninitialized);
    assert_eq!(StakeStateV2::deserialize(&data), Ok(StakeStateV2::Uninitialized));

    let data = account_data(&RefStakeStateV2::RewardsPool);
    assert_eq!(StakeStateV2::deserialize(&data), Ok(StakeStateV2::RewardsPool));
}

#[test]
fn test_decodes_reference_stake_history() {
    let mut ref_history = RefStakeHistory::default();
    for epoch in 0..10u64 {
        ref_history.add(
            epoch,
            RefStakeHistoryEntry {
                effective: epoch * 1_000,
                activating: epoch * 100,
                deactivating: epoch * 10,
            },
        );
    }
    let data = bincode::serialize(&ref_history).unwrap();

    let stake_history = StakeHistory::deserialize(&data).unwrap();
    let sysvar = StakeHistorySysvar::new(&data).unwrap();
    assert_eq!(stake_history.len(), 10);
    for epoch in 0..10u64 {
        let expected = StakeHistoryEntry {
            effective: epoch * 1_000,
            activating: epoch * 100,
            deactivating: epoch * 10,
        };
        assert_eq!(stake_history.get_entry(epoch), Some(expected));
        assert_eq!(sysvar.get_entry(epoch), Some(expected));
    }
    assert_eq!(stake_history.serialize(), data);
}
