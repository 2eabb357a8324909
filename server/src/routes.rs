use std::sync::Arc;

use log::{error, Logger};
use warp::filters::BoxedFilter;
use warp::http::StatusCode;
use warp::reject;
use warp::reply::{json, with_status, Json, Reply, WithStatus};
use warp::Filter;

use crate::environment::Environment;
use crate::errors::BackendError;

pub mod admin;
mod handlers;
mod query;
mod rejection;
mod response;

pub use internal::*;

/// The maximum request body size to accept. Far beyond any legitimate
/// form submission.
const MAX_CONTENT_LENGTH: u64 = 1024 * 1024;

/// The public routes, composed the way `main` serves them: pages,
/// submission, listing, export, with rejections rendered centrally.
pub fn make_routes(environment: Environment) -> BoxedFilter<(Box<dyn Reply>,)> {
    let logger = environment.logger.clone();

    make_form_route(environment.clone())
        .or(make_lista_route(environment.clone()))
        .or(make_submission_route(environment.clone()))
        .or(make_export_route(environment.clone()))
        .or(make_listing_route(environment))
        .recover(move |r| format_rejection(logger.clone(), r))
        .map(|reply| Box::new(reply) as Box<dyn Reply>)
        .boxed()
}

pub async fn format_rejection(
    logger: Arc<Logger>,
    rej: reject::Rejection,
) -> Result<WithStatus<Json>, reject::Rejection> {
    if let Some(r) = rej.find::<rejection::Rejection>() {
        let e = &r.error;
        error!(logger, "Backend error"; "context" => ?r.context, "error" => ?r.error, "status" => %status_code_for(e), "message" => %r.error);
        let flattened = r.flatten();

        return Ok(with_status(json(&flattened), status_code_for(e)));
    }

    Err(rej)
}

fn status_code_for(e: &BackendError) -> StatusCode {
    use BackendError::*;

    match e {
        InvalidSubmission { .. } => StatusCode::BAD_REQUEST,
        StorageRead { .. } | CorruptStorage { .. } | StorageWrite { .. }
        | Serialization { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

mod internal {
    use warp::filters::BoxedFilter;
    use warp::path::end;
    use warp::Filter;
    use warp::Reply;
    use warp::{get as g, path as p, post, query};

    use super::{handlers, query as q, MAX_CONTENT_LENGTH};
    use crate::environment::Environment;

    type Route = BoxedFilter<(Box<dyn Reply>,)>;

    macro_rules! route_filter {
    ($route_variable:ident; $first:expr) => (let $route_variable = $route_variable.and($first););
    ($route_variable:ident; $first:expr, $($rest:expr),+) => (
        let $route_variable = $route_variable.and($first);
        route_filter!($route_variable; $($rest),+);
    )
}

    macro_rules! route {
    ($name:ident => $handler:ident, $route_variable:ident; $($filters:expr),+) => (
        pub fn $name(environment: Environment) -> Route {
            let $route_variable = warp::any()
                .map(move || environment.clone());

            route_filter!($route_variable; $($filters),+);

            $route_variable.and_then(handlers::$handler)
                .boxed()
        }
    );
}

    route!(make_form_route => form_page, rt; end(), g());
    route!(make_lista_route => lista_page, rt; p("lista"), end(), g());
    route!(make_submission_route => submit, rt; p("api"), p("cadastro"), end(), post(), warp::body::content_length_limit(MAX_CONTENT_LENGTH), warp::body::json());
    route!(make_listing_route => listing, rt; p("api"), p("cadastro"), end(), g());
    route!(make_export_route => export, rt; p("api"), p("cadastro"), p("export"), end(), g(), query::<q::ExportQuery>());
}
