use thiserror::Error;

/// Failure modes of proof and speech generation.
///
/// Unknown scenarios, urgencies and tones never error; they are normalized
/// to defaults by the generator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    GenerationFailure(String),
}

impl GeneratorError {
    pub fn proof_failure(err: &anyhow::Error) -> Self {
        GeneratorError::GenerationFailure(format!("Error generating proof: {err:#}"))
    }

    pub fn speech_failure(err: &anyhow::Error) -> Self {
        GeneratorError::GenerationFailure(format!("Error generating speech: {err:#}"))
    }
}
