use std::io;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use futures::future::{BoxFuture, FutureExt};
use log::{warn, Logger};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::cadastro::{Cadastro, NovoCadastro};
use crate::errors::BackendError;
use crate::store::Store;

/// The layout of the registrations file.
#[derive(Default, Deserialize)]
struct Collection {
    #[serde(default)]
    cadastros: Vec<Cadastro>,
}

#[derive(Serialize)]
struct CollectionRef<'a> {
    cadastros: &'a [Cadastro],
}

/// A store backed by a single JSON file, rewritten wholesale on every
/// append.
///
/// An unreadable or corrupt file is treated as an empty collection. A
/// failed write keeps the new record in `pendentes` so the append still
/// succeeds; pending records are merged into every read and drained
/// into the file by the next successful write.
pub struct FileStore {
    logger: Arc<Logger>,
    path: PathBuf,
    pendentes: RwLock<Vec<Cadastro>>,
}

impl FileStore {
    pub fn new(logger: Arc<Logger>, path: impl Into<PathBuf>) -> Self {
        FileStore {
            logger,
            path: path.into(),
            pendentes: RwLock::new(vec![]),
        }
    }
}

impl Store for FileStore {
    fn append(&self, novo: NovoCadastro) -> BoxFuture<Result<Cadastro, BackendError>> {
        append(self, novo).boxed()
    }

    fn list_all(&self) -> BoxFuture<Result<Vec<Cadastro>, BackendError>> {
        list_all(self).boxed()
    }
}

async fn append(store: &FileStore, novo: NovoCadastro) -> Result<Cadastro, BackendError> {
    let mut cadastros = read_all(store).await;

    let cadastro = Cadastro::create(novo);
    cadastros.push(cadastro.clone());

    match write_file(store, &cadastros).await {
        Ok(()) => store.pendentes.write().unwrap().clear(),
        Err(e) => {
            warn!(store.logger, "Falha ao gravar o arquivo de cadastros, mantendo o registro em memória"; "error" => %e, "path" => store.path.display().to_string());
            store.pendentes.write().unwrap().push(cadastro.clone());
        }
    }

    Ok(cadastro)
}

async fn list_all(store: &FileStore) -> Result<Vec<Cadastro>, BackendError> {
    Ok(read_all(store).await)
}

/// Reads the file collection plus any records still waiting to be
/// written, preserving insertion order.
async fn read_all(store: &FileStore) -> Vec<Cadastro> {
    let mut cadastros = match read_file(store).await {
        Ok(cadastros) => cadastros,
        Err(BackendError::StorageRead { ref source })
            if source.kind() == io::ErrorKind::NotFound =>
        {
            // First run: the file only appears after the first append.
            vec![]
        }
        Err(e) => {
            warn!(store.logger, "Falha ao ler o arquivo de cadastros, tratando como vazio"; "error" => %e, "path" => store.path.display().to_string());
            vec![]
        }
    };

    let pendentes = store.pendentes.read().unwrap();
    cadastros.extend(pendentes.iter().cloned());

    cadastros
}

async fn read_file(store: &FileStore) -> Result<Vec<Cadastro>, BackendError> {
    let raw = fs::read(&store.path)
        .await
        .map_err(|source| BackendError::StorageRead { source })?;

    let collection: Collection =
        serde_json::from_slice(&raw).map_err(|source| BackendError::CorruptStorage { source })?;

    Ok(collection.cadastros)
}

async fn write_file(store: &FileStore, cadastros: &[Cadastro]) -> Result<(), BackendError> {
    let json = serde_json::to_string_pretty(&CollectionRef { cadastros })
        .map_err(|source| BackendError::Serialization { source })?;

    if let Some(parent) = store.path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| BackendError::StorageWrite { source })?;
        }
    }

    fs::write(&store.path, json)
        .await
        .map_err(|source| BackendError::StorageWrite { source })
}
