use pinocchio::program_error::ProgramError;
use thiserror::Error;

#[repr(u32)]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StakeActivationError {
    /// Buffer too short for the fixed layout, or a discriminant matches no
    /// known variant.
    #[error("Account data is too short or has an unknown layout")]
    MalformedRecord = 0,

    /// The record decoded fine but carries no delegation.
    #[error("Account is not a delegated stake account")]
    NotADelegatedStake = 1,

    #[error("Arithmetic guard failed while computing lamport balances")]
    ArithmeticGuardFailed = 2,
}

impl From<StakeActivationError> for ProgramError {
    fn from(e: StakeActivationError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
