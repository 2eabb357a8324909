use thiserror::Error;

use crate::validation::Violation;

/// Enumerates high-level errors returned by this service.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Represents a submission that failed schema validation. Carries
    /// every violated field, not just the first.
    #[error("Dados inválidos")]
    InvalidSubmission { violations: Vec<Violation> },

    /// Represents a failure to read the registrations file.
    #[error("Erro ao ler o arquivo de cadastros")]
    StorageRead { source: std::io::Error },

    /// Represents a registrations file whose contents could not be
    /// parsed.
    #[error("Arquivo de cadastros corrompido")]
    CorruptStorage { source: serde_json::Error },

    /// Represents a failure to rewrite the registrations file.
    #[error("Erro ao gravar o arquivo de cadastros")]
    StorageWrite { source: std::io::Error },

    /// Represents a failure to serialize the collection before writing.
    #[error("Erro ao serializar os cadastros")]
    Serialization { source: serde_json::Error },
}

impl BackendError {
    pub fn invalid_submission(violations: Vec<Violation>) -> Self {
        BackendError::InvalidSubmission { violations }
    }
}
