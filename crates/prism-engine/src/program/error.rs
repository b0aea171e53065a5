use thiserror::Error;

use super::ProgramStage;

/// A program could not be resolved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProgramError {
    #[error("no program named `{0}`")]
    Unknown(String),

    #[error("program `{name}` failed to parse:\n{message}")]
    Parse { name: String, message: String },

    #[error("program `{name}` failed validation: {message}")]
    Validation { name: String, message: String },

    #[error("program `{name}` has no {stage:?} entry point `{entry_point}`")]
    MissingEntryPoint {
        name: String,
        entry_point: String,
        stage: ProgramStage,
    },

    #[error("program `{name}` is a {found:?} program, expected {expected:?}")]
    WrongStage {
        name: String,
        expected: ProgramStage,
        found: ProgramStage,
    },
}
