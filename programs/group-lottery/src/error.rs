use anchor_lang::error::Error;
use anchor_lang::error_code;

#[error_code]
pub enum LotteryError {
    #[msg("This group has no lottery activity")]
    NoActivity,
    #[msg("The lottery activity is not running")]
    ActivityInactive,
    #[msg("You have already taken part in this lottery")]
    AlreadyParticipated,
    #[msg("This group already has a running lottery activity")]
    ActivityAlreadyRunning,
    #[msg("The lottery activity has already been stopped")]
    ActivityAlreadyStopped,
    #[msg("Unknown prize level in configuration")]
    UnknownPrizeLevel,
    #[msg("The no-prize level cannot be configured")]
    NoPrizeNotConfigurable,
    #[msg("Prize level is configured more than once")]
    DuplicatePrizeLevel,
    #[msg("Probability must be a finite value between 0 and 1")]
    InvalidProbability,
    #[msg("Prize configuration is malformed")]
    MalformedConfig,
    #[msg("Prize template must configure at least one level")]
    EmptyTemplate,
    #[msg("Prize level is missing from the activity prize table")]
    PrizeLevelMissing,
    #[msg("Entropy buffer must hold at least 8 bytes")]
    InsufficientEntropy,
    #[msg("Failed to persist lottery state")]
    PersistenceFailed,
    #[msg("Stored lottery snapshot could not be decoded")]
    CorruptSnapshot,
    #[msg("Stored lottery snapshot has an unsupported version")]
    UnsupportedSnapshotVersion,
}

/// Returns the human-readable message carried by a lottery error.
pub fn describe_error(error: &Error) -> String {
    match error {
        Error::AnchorError(anchor_error) => anchor_error.error_msg.clone(),
        Error::ProgramError(program_error) => program_error.program_error.to_string(),
    }
}

#[cfg(test)]
pub(crate) fn error_code_of(error: &Error) -> u32 {
    match error {
        Error::AnchorError(anchor_error) => anchor_error.error_code_number,
        _ => panic!("unexpected error variant: {error:?}"),
    }
}

#[cfg(test)]
pub(crate) fn code(variant: LotteryError) -> u32 {
    6000 + variant as u32
}
