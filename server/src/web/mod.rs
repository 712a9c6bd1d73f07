//! HTTP surface of the dashboard.

pub mod notice;
pub mod page;

use std::sync::Arc;

use axum::extract::{Form, Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use portmonitor_core::ports::{MappingRepository, SocketEnumeratorPort};
use portmonitor_core::{host_name, DashboardService, MappingUpdate, RowQuery};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::config::ServerConfig;
use notice::{Notice, CLEAR_COOKIE};
use page::Page;

/// Shared state handed to every request handler.
pub struct AppState<S: SocketEnumeratorPort, M: MappingRepository> {
    pub config: ServerConfig,
    pub service: DashboardService<S, M>,
}

impl<S: SocketEnumeratorPort, M: MappingRepository> AppState<S, M> {
    pub fn new(config: ServerConfig, service: DashboardService<S, M>) -> Self {
        Self { config, service }
    }
}

/// Build the dashboard router.
pub fn router<S, M>(state: AppState<S, M>) -> Router
where
    S: SocketEnumeratorPort + 'static,
    M: MappingRepository + 'static,
{
    Router::new()
        .route("/", get(index::<S, M>))
        .route("/update_mapping", post(update_mapping::<S, M>))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Query parameters of `GET /`.
#[derive(Debug, Deserialize)]
pub struct IndexParams {
    #[serde(default)]
    pub search_query: String,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_order")]
    pub sort_order: String,
}

fn default_sort_by() -> String {
    "laddr.port".to_string()
}

fn default_sort_order() -> String {
    "asc".to_string()
}

async fn index<S, M>(
    State(state): State<Arc<AppState<S, M>>>,
    Query(params): Query<IndexParams>,
    headers: HeaderMap,
) -> Result<Response, AppError>
where
    S: SocketEnumeratorPort + 'static,
    M: MappingRepository + 'static,
{
    let query = RowQuery::from_params(&params.search_query, &params.sort_by, &params.sort_order);
    let rows = state.service.rows(&query).await?;
    let notice = Notice::from_headers(&headers);

    let host = host_name();
    let generated_at = chrono::Local::now().format("%d/%m/%Y %H:%M:%S").to_string();
    let html = page::render(&Page {
        host_name: &host,
        rows: &rows,
        notice: notice.as_ref(),
        search_query: &params.search_query,
        sort_key: query.sort_key,
        sort_order: query.sort_order,
        generated_at: &generated_at,
    });

    let mut response = Html(html).into_response();
    if notice.is_some() {
        response
            .headers_mut()
            .insert(SET_COOKIE, HeaderValue::from_static(CLEAR_COOKIE));
    }
    Ok(response)
}

async fn update_mapping<S, M>(
    State(state): State<Arc<AppState<S, M>>>,
    Form(update): Form<MappingUpdate>,
) -> Result<Response, AppError>
where
    S: SocketEnumeratorPort + 'static,
    M: MappingRepository + 'static,
{
    let outcome = state.service.update_mapping(&update).await?;
    if !outcome.is_success() {
        debug!(
            ?outcome,
            file = %state.config.mappings_file.display(),
            "mapping update rejected"
        );
    }

    let cookie = Notice::from(&outcome).to_cookie()?;
    Ok(([(SET_COOKIE, cookie)], Redirect::to("/")).into_response())
}

/// A request failure, rendered as a 500 page.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %format!("{:#}", self.0), "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(page::render_error(&self.0.to_string())),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
