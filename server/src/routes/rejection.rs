use serde::Serialize;
use warp::reject;

use crate::errors::BackendError;
use crate::export::Filtro;
use crate::validation::Violation;

#[derive(Debug)]
pub struct Rejection {
    pub(crate) context: Context,
    pub(crate) error: BackendError,
}

impl Rejection {
    pub fn new(context: Context, error: BackendError) -> Self {
        Rejection { context, error }
    }

    /// The body sent to the caller. Validation failures report every
    /// violation; anything else is an opaque server error so internal
    /// detail stays in the logs.
    pub fn flatten(&self) -> FlattenedRejection {
        match &self.error {
            BackendError::InvalidSubmission { violations } => FlattenedRejection {
                success: false,
                message: format!("{}", self.error),
                errors: Some(violations.clone()),
            },
            _ => FlattenedRejection {
                success: false,
                message: "Erro interno do servidor".to_owned(),
                errors: None,
            },
        }
    }
}

impl reject::Reject for Rejection {}

#[derive(Debug, Serialize)]
pub struct FlattenedRejection {
    pub(crate) success: bool,
    pub(crate) message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) errors: Option<Vec<Violation>>,
}

/// Which operation a failure happened in, for the logs.
#[derive(Clone, Copy, Debug)]
pub enum Context {
    Export { filtro: Filtro },
    Listing,
    Submit,
}

impl Context {
    pub fn export(filtro: Filtro) -> Context {
        Context::Export { filtro }
    }

    pub fn listing() -> Context {
        Context::Listing
    }

    pub fn submit() -> Context {
        Context::Submit
    }
}
