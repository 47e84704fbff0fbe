use crate::{
    command::{Apply, Command},
    error::{Error, HttpErr},
    instance::Overrides,
    pagination::{calculate, calculate_value},
    store::ConfigStore,
};
use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response, Result as HttpResult},
    routing::{get, post, put},
    Json, Router,
};
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, RwLock},
};
use tokio::io::AsyncBufReadExt;
use tokio_stream::wrappers::LinesStream;
use tokio_util::io::StreamReader;
use tracing::{debug, info};

/// Shared state of the pagination host
#[derive(Default)]
pub struct AppState {
    /// Pagination configs
    pub store: ConfigStore,
    /// Content collections by name
    pub collections: HashMap<String, Arc<Vec<Value>>>,
}

impl AppState {
    /// State whose registrations use `store`
    #[must_use]
    pub fn new(store: ConfigStore) -> Self {
        Self { store, collections: HashMap::new() }
    }
}

/// Handle passed to every handler
pub type AppStateWrapper = Arc<RwLock<AppState>>;
/// Handler result
pub type HttpResponse = HttpResult<Response<Body>, HttpErr>;

/// Compose the routes
#[must_use]
pub fn router(state: AppStateWrapper) -> Router {
    Router::new()
        .route("/paginations", get(paginations_index).post(pagination_register))
        .route("/paginations/:id", get(pagination_get).delete(pagination_delete))
        .route("/paginations/:id/pages/:collection", get(pagination_page))
        .route("/commands", post(command_dispatch))
        .route("/collections", get(collections_index))
        .route("/collections/:name", put(collection_put).delete(collection_delete))
        .route("/calculate", post(calculate_json))
        .with_state(state)
}

/// Return state locked for reading
fn lock_state_read(state: &AppStateWrapper) -> Result<std::sync::RwLockReadGuard<'_, AppState>> {
    // With map errors to string because PoisonError are not `Send`
    state.read().map_err(move |e| anyhow::anyhow! { e.to_string() })
}

/// Return state locked for writing
fn lock_state_write(state: &AppStateWrapper) -> Result<std::sync::RwLockWriteGuard<'_, AppState>> {
    // With map errors to string because PoisonError are not `Send`
    state.write().map_err(move |e| anyhow::anyhow! { e.to_string() })
}

/// Url parameters for listing, either may be left out
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ListParams {
    /// Index offset in entries
    pub offset: usize,
    /// Maximum number of entries returned
    pub limit: usize,
}

impl Default for ListParams {
    fn default() -> Self {
        Self { offset: 0, limit: usize::MAX }
    }
}

/// Handler to return a paginated list of configs, ordered by id
pub async fn paginations_index(
    params: Option<Query<ListParams>>,
    State(s): State<AppStateWrapper>,
) -> HttpResponse {
    let Query(params) = params.unwrap_or_default();

    let state = lock_state_read(&s)?;
    let mut configs = state.store.iter().collect::<Vec<_>>();
    configs.sort_by(|a, b| a.id.cmp(&b.id));
    let configs = configs.into_iter().skip(params.offset).take(params.limit).collect::<Vec<_>>();

    Ok(Json(configs).into_response())
}

/// Handler to register a pagination instance
pub async fn pagination_register(
    State(s): State<AppStateWrapper>,
    Json(overrides): Json<Overrides>,
) -> HttpResponse {
    let mut state = lock_state_write(&s)?;
    let config = state.store.register(overrides)?;

    Ok((StatusCode::CREATED, Json(config)).into_response())
}

/// Handler to read a config; unknown ids read back as `{id}`
pub async fn pagination_get(
    Path(id): Path<String>,
    State(s): State<AppStateWrapper>,
) -> HttpResponse {
    let state = lock_state_read(&s)?;

    Ok(Json(state.store.get_config(&id)).into_response())
}

/// Handler to delete a config by id
pub async fn pagination_delete(
    Path(id): Path<String>,
    State(s): State<AppStateWrapper>,
) -> HttpResponse {
    let mut state = lock_state_write(&s)?;
    let _ = state.store.remove(&id).ok_or(StatusCode::NOT_FOUND)?;

    Ok(StatusCode::OK.into_response())
}

/// Handler applying one command to the store
pub async fn command_dispatch(
    State(s): State<AppStateWrapper>,
    Json(command): Json<Command>,
) -> HttpResponse {
    debug!(?command, "command received");
    let mut state = lock_state_write(&s)?;
    command.apply(&mut state.store)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Handler paging a named collection with a stored config
pub async fn pagination_page(
    Path((id, collection)): Path<(String, String)>,
    State(s): State<AppStateWrapper>,
) -> HttpResponse {
    // Snapshot both under one lock so they are consistent
    let (config, content) = {
        let state = lock_state_read(&s)?;
        (
            state.store.get_config(&id),
            Arc::clone(state.collections.get(&collection).ok_or(StatusCode::NOT_FOUND)?),
        )
    };
    let result = calculate(content.as_slice(), &config)?;

    Ok(Json(result).into_response())
}

/// Body of an untyped calculation
#[derive(Debug, Deserialize)]
pub struct CalculateBody {
    /// Collection to page through
    pub content: Value,
    /// Config mapping
    pub config: Value,
}

/// Handler running the calculator on caller-supplied JSON
pub async fn calculate_json(Json(body): Json<CalculateBody>) -> HttpResponse {
    let result = calculate_value(&body.content, &body.config)?;

    Ok(Json(result).into_response())
}

/// Size of a stored collection
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionInfo {
    /// Number of items
    pub len: usize,
}

/// Handler listing collections
pub async fn collections_index(State(s): State<AppStateWrapper>) -> HttpResponse {
    let state = lock_state_read(&s)?;
    let collections: BTreeMap<_, _> = state
        .collections
        .iter()
        .map(|(name, items)| (name.clone(), CollectionInfo { len: items.len() }))
        .collect();

    Ok(Json(collections).into_response())
}

/// Handler loading a collection from a newline delimited JSON body
pub async fn collection_put(
    Path(name): Path<String>,
    State(s): State<AppStateWrapper>,
    req: Request,
) -> HttpResponse {
    // Convert the body into an `AsyncBufRead` and read it line by line
    let body = req.into_body().into_data_stream().map_err(std::io::Error::other);
    let reader = Box::pin(StreamReader::new(body));
    let mut lines = LinesStream::new(reader.lines());

    let mut items = Vec::new();
    while let Some(line) = lines.try_next().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let item = serde_json::from_str::<Value>(line)
            .map_err(|e| Error::TypeMismatch(format!("item {}: {e}", items.len())))?;
        items.push(item);
    }

    let info = CollectionInfo { len: items.len() };
    info!(%name, len = info.len, "collection loaded");
    let mut state = lock_state_write(&s)?;
    let _ = state.collections.insert(name, Arc::new(items));

    Ok((StatusCode::CREATED, Json(info)).into_response())
}

/// Handler to delete a collection by name
pub async fn collection_delete(
    Path(name): Path<String>,
    State(s): State<AppStateWrapper>,
) -> HttpResponse {
    let mut state = lock_state_write(&s)?;
    let _ = state.collections.remove(&name).ok_or(StatusCode::NOT_FOUND)?;

    Ok(StatusCode::OK.into_response())
}
