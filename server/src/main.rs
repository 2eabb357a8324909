use std::error::Error;
use std::sync::Arc;

use futures::future::FutureExt;
use tokio::sync::mpsc;
use warp::Filter;

use log::{info, initialize_logger};
use missao_backend::config::{get_variable, StorageMode};
use missao_backend::environment::{Config, Environment};
use missao_backend::routes;
use missao_backend::store::{FileStore, MemoryStore, Store};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    let logger = initialize_logger();

    let main_port: u16 = get_variable("CADASTRO_PORT")
        .parse()
        .expect("parse CADASTRO_PORT as u16");
    let admin_port: u16 = get_variable("CADASTRO_ADMIN_PORT")
        .parse()
        .expect("parse CADASTRO_ADMIN_PORT as u16");

    let mode_name = get_variable("CADASTRO_STORAGE");
    let mode = StorageMode::from_name(&mode_name)
        .unwrap_or_else(|| panic!("unknown CADASTRO_STORAGE value {}", mode_name));

    info!(logger, "Starting..."; "main_port" => main_port, "admin_port" => admin_port, "storage" => mode.as_str());
    let logger = Arc::new(logger);

    let store: Arc<dyn Store + Send + Sync> = match mode {
        StorageMode::File => Arc::new(FileStore::new(
            logger.clone(),
            get_variable("CADASTRO_DATA_PATH"),
        )),
        StorageMode::Memory => Arc::new(MemoryStore::new()),
    };

    let environment = Environment::new(logger.clone(), store, Config::new(mode));

    let (termination_sender, mut termination_receiver) = mpsc::channel::<()>(1);

    let terminate = Arc::new(move || {
        let termination_sender = termination_sender.clone();

        async move {
            let termination_sender = termination_sender.clone();
            termination_sender.send(()).await.unwrap();
        }
        .boxed()
    });

    let should_terminate = async move {
        termination_receiver.recv().await;
    }
    .shared();

    let ctrlc = {
        let should_terminate = should_terminate.clone();
        let terminate = terminate.clone();

        let signal = tokio::signal::ctrl_c();

        async move {
            let terminate = terminate.clone();

            tokio::select! {
                _ = should_terminate => {},
                _ = signal => {
                    terminate().await;
                }
            }
        }
    };

    let main_server = {
        let should_terminate = should_terminate.clone();

        let routes = routes::make_routes(environment.clone());

        let (_, main_server) =
            warp::serve(routes).bind_with_graceful_shutdown(([0, 0, 0, 0], main_port), async {
                should_terminate.await;
            });

        main_server
    };

    let admin_server = {
        let should_terminate = should_terminate.clone();
        let terminate = terminate.clone();

        let routes = routes::admin::make_healthz_route(environment.clone()).or(
            routes::admin::make_termination_route(environment.clone(), terminate),
        );

        let (_, admin_server) =
            warp::serve(routes).bind_with_graceful_shutdown(([0, 0, 0, 0], admin_port), async {
                should_terminate.await;
            });

        admin_server
    };

    tokio::join!(ctrlc, main_server, admin_server);

    info!(logger, "Exiting gracefully...");

    Ok(())
}
