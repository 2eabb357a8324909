use futures::future::BoxFuture;

use crate::cadastro::{Cadastro, NovoCadastro};
use crate::errors::BackendError;

mod file;
mod memory;

pub use self::file::FileStore;
pub use self::memory::MemoryStore;

/// Append-only storage for registrations. Implementations assign the
/// ID and submission timestamp; records are never updated or deleted,
/// and `list_all` returns them in insertion order.
pub trait Store: Send + Sync {
    /// Appends a validated submission and returns the stored record.
    fn append(&self, novo: NovoCadastro) -> BoxFuture<Result<Cadastro, BackendError>>;

    /// Returns every stored record, oldest first.
    fn list_all(&self) -> BoxFuture<Result<Vec<Cadastro>, BackendError>>;
}
