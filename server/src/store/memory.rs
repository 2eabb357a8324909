use std::sync::RwLock;

use futures::future::{BoxFuture, FutureExt};

use crate::cadastro::{Cadastro, NovoCadastro};
use crate::errors::BackendError;
use crate::store::Store;

/// A store that keeps the collection in process memory only, for
/// deployments without writable durable storage. Restarting the
/// process loses all records.
#[derive(Default)]
pub struct MemoryStore {
    cadastros: RwLock<Vec<Cadastro>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl Store for MemoryStore {
    fn append(&self, novo: NovoCadastro) -> BoxFuture<Result<Cadastro, BackendError>> {
        append(self, novo).boxed()
    }

    fn list_all(&self) -> BoxFuture<Result<Vec<Cadastro>, BackendError>> {
        list_all(self).boxed()
    }
}

async fn append(store: &MemoryStore, novo: NovoCadastro) -> Result<Cadastro, BackendError> {
    let cadastro = Cadastro::create(novo);

    store.cadastros.write().unwrap().push(cadastro.clone());

    Ok(cadastro)
}

async fn list_all(store: &MemoryStore) -> Result<Vec<Cadastro>, BackendError> {
    Ok(store.cadastros.read().unwrap().clone())
}
