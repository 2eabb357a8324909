use std::time::{Duration, Instant};

use log::{debug, info, trace};
use serde_json::Value;
use time::OffsetDateTime;
use warp::{
    http::StatusCode,
    reject,
    reply::{html, json, with_header, with_status, Reply},
};

use crate::cadastro::Cadastro;
use crate::environment::Environment;
use crate::errors::BackendError;
use crate::export::{self, Filtro};
use crate::routes::{
    query::ExportQuery,
    rejection::{Context, Rejection},
    response::SuccessResponse,
};
use crate::validation;

const SERVER_TIMING_HEADER: &str = "server-timing";

const CADASTRO_REALIZADO: &str = "Cadastro realizado com sucesso!";
const API_CADASTRO: &str = "API de Cadastro da Missão Fraternal";

const PAGINA_CADASTRO: &str = include_str!("pages/cadastro.html");
const PAGINA_LISTA: &str = include_str!("pages/lista.html");

type RouteResult = Result<Box<dyn Reply>, reject::Rejection>;

macro_rules! timed {
    ($($expression:stmt);+) => {
        let start = Instant::now();

        let result = { $($expression)+ };

        Ok(Box::new(with_header(
            result,
            SERVER_TIMING_HEADER,
            format_server_timing(start.elapsed()),
        )) as Box<dyn Reply>)
    };
}

pub async fn form_page(environment: Environment) -> RouteResult {
    timed! {
        trace!(environment.logger, "Servindo página de cadastro");

        html(PAGINA_CADASTRO)
    }
}

pub async fn lista_page(environment: Environment) -> RouteResult {
    timed! {
        trace!(environment.logger, "Servindo página de listagem");

        html(PAGINA_LISTA)
    }
}

pub async fn submit(environment: Environment, payload: Value) -> RouteResult {
    timed! {
        let Environment { logger, store, .. } = environment.clone();

        let error_handler = |e: BackendError| Rejection::new(Context::submit(), e);

        debug!(logger, "Validando cadastro...");
        let novo = validation::validate(&payload)
            .map_err(|violations| error_handler(BackendError::invalid_submission(violations)))?;

        debug!(logger, "Gravando cadastro...");
        let cadastro = store.append(novo).await.map_err(error_handler)?;

        info!(logger, "Novo cadastro recebido"; "id" => cadastro.id().to_string(), "disponibilidade" => cadastro.dados.disponibilidade.label());

        with_status(
            json(&SuccessResponse::Created {
                success: true,
                message: CADASTRO_REALIZADO,
                data: cadastro,
            }),
            StatusCode::CREATED,
        )
    }
}

pub async fn listing(environment: Environment) -> RouteResult {
    timed! {
        let error_handler = |e: BackendError| Rejection::new(Context::listing(), e);

        debug!(environment.logger, "Listando cadastros...");
        let cadastros = environment.store.list_all().await.map_err(error_handler)?;

        json(&SuccessResponse::Listing {
            message: API_CADASTRO,
            version: info::VERSION,
            total_cadastros: cadastros.len(),
            environment: environment.config.mode.as_str(),
            cadastros,
        })
    }
}

pub async fn export(environment: Environment, query: ExportQuery) -> RouteResult {
    timed! {
        // Unknown filter names fall back to the full collection.
        let filtro = query
            .filtro
            .as_deref()
            .and_then(Filtro::from_name)
            .unwrap_or(Filtro::Todos);

        let error_handler = |e: BackendError| Rejection::new(Context::export(filtro), e);

        debug!(environment.logger, "Exportando cadastros..."; "filtro" => format!("{:?}", filtro));
        let cadastros = environment.store.list_all().await.map_err(error_handler)?;

        let filtrados: Vec<Cadastro> = cadastros
            .into_iter()
            .filter(|cadastro| filtro.matches(cadastro))
            .collect();

        let csv = export::render_csv(&filtrados);
        let hoje = OffsetDateTime::now_utc().date();

        with_header(
            with_header(csv, "content-type", "text/csv; charset=utf-8"),
            "content-disposition",
            export::content_disposition(hoje),
        )
    }
}

fn format_server_timing(seconds: Duration) -> String {
    format!("handler;dur={}", seconds.as_secs_f64() * 1000.0)
}
