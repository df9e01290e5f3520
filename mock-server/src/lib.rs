//! In-memory stand-in for the restaurant backend.
//!
//! Serves the same paths and payload shapes as the real service, including
//! the resources whose create/update/delete live under their own paths.
//! State lives in one [`Backend`] behind a `tokio` `RwLock`.

pub mod backend;
pub mod model;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub use backend::{Backend, BackendError, Record};
use model::{
    Categoria, CategoriaInput, CategoriaPatch, Empleado, Id, Insumo, InsumoInput, Manufacturado,
    ManufacturadoInput, Rol, UnidadMedida,
};

pub type Db = Arc<RwLock<Backend>>;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        match self {
            BackendError::NotFound => StatusCode::NOT_FOUND.into_response(),
            BackendError::Unprocessable(message) => (StatusCode::UNPROCESSABLE_ENTITY, message).into_response(),
        }
    }
}

/// Router over a seeded backend.
pub fn app() -> Router {
    app_with(Backend::seeded())
}

pub fn app_with(backend: Backend) -> Router {
    let db: Db = Arc::new(RwLock::new(backend));
    Router::new()
        .merge(records::<Empleado>("/Empleados"))
        .merge(records::<Rol>("/api/admin/roles"))
        .merge(records::<UnidadMedida>("/unidadmedida"))
        .route("/categoria/listar", get(list_categories))
        .route("/categoria", post(create_category))
        .route(
            "/categoria/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/articuloInsumo/listar", get(list_supplies))
        .route("/articuloInsumo/{id}", get(get_supply))
        .route("/articuloInsumo/crear", post(create_supply))
        .route("/articuloInsumo/modificar/{id}", put(update_supply))
        .route("/articuloInsumo/baja/{id}", delete(delete_supply))
        .route("/articuloManufacturadoDetalle/todos", get(list_products))
        .route(
            "/articuloManufacturadoDetalle/crearArticuloManufacturado",
            post(create_product),
        )
        .route("/articulosManufacturados/{id}", get(get_product))
        .route("/articulosManufacturados/modificar/{id}", put(update_product))
        .route("/articulosManufacturados/baja/{id}", delete(delete_product))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Plain REST routes: `GET/POST {path}` and `GET/PUT/DELETE {path}/{id}`.
fn records<R: Record>(path: &str) -> Router<Db> {
    Router::new()
        .route(path, get(list_records::<R>).post(create_record::<R>))
        .route(
            &format!("{path}/{{id}}"),
            get(get_record::<R>).put(update_record::<R>).delete(delete_record::<R>),
        )
}

// --- generic records ---

async fn list_records<R: Record>(State(db): State<Db>) -> Json<Vec<R>> {
    let backend = db.read().await;
    Json(R::table(&backend).all())
}

async fn get_record<R: Record>(State(db): State<Db>, Path(id): Path<Id>) -> Result<Json<R>, BackendError> {
    let backend = db.read().await;
    R::table(&backend).get(id).cloned().map(Json).ok_or(BackendError::NotFound)
}

async fn create_record<R: Record>(State(db): State<Db>, Json(input): Json<R::Input>) -> (StatusCode, Json<R>) {
    let record: R = db.write().await.create(input);
    info!(kind = R::KIND, "created");
    (StatusCode::CREATED, Json(record))
}

async fn update_record<R: Record>(
    State(db): State<Db>,
    Path(id): Path<Id>,
    Json(input): Json<R::Input>,
) -> Result<Json<R>, BackendError> {
    let record = db.write().await.update::<R>(id, input)?;
    info!(kind = R::KIND, id, "updated");
    Ok(Json(record))
}

async fn delete_record<R: Record>(State(db): State<Db>, Path(id): Path<Id>) -> Result<StatusCode, BackendError> {
    db.write().await.delete::<R>(id)?;
    info!(kind = R::KIND, id, "deleted");
    Ok(StatusCode::NO_CONTENT)
}

// --- categories ---

async fn list_categories(State(db): State<Db>) -> Json<Vec<Categoria>> {
    let backend = db.read().await;
    Json(backend.categories.all())
}

async fn get_category(State(db): State<Db>, Path(id): Path<Id>) -> Result<Json<Categoria>, BackendError> {
    let backend = db.read().await;
    backend.category(id).map(Json).ok_or(BackendError::NotFound)
}

async fn create_category(
    State(db): State<Db>,
    Json(input): Json<CategoriaInput>,
) -> Result<(StatusCode, Json<Categoria>), BackendError> {
    let category = db.write().await.create_category(input)?;
    info!(id = category.id, name = %category.denominacion, "category created");
    Ok((StatusCode::CREATED, Json(category)))
}

async fn update_category(
    State(db): State<Db>,
    Path(id): Path<Id>,
    Json(patch): Json<CategoriaPatch>,
) -> Result<Json<Categoria>, BackendError> {
    let category = db.write().await.update_category(id, patch)?;
    info!(id, "category updated");
    Ok(Json(category))
}

async fn delete_category(State(db): State<Db>, Path(id): Path<Id>) -> Result<StatusCode, BackendError> {
    db.write().await.delete_category(id)?;
    info!(id, "category deleted");
    Ok(StatusCode::NO_CONTENT)
}

// --- supplies ---

async fn list_supplies(State(db): State<Db>) -> Json<Vec<Insumo>> {
    let backend = db.read().await;
    Json(backend.supplies.all())
}

async fn get_supply(State(db): State<Db>, Path(id): Path<Id>) -> Result<Json<Insumo>, BackendError> {
    let backend = db.read().await;
    backend.supplies.get(id).cloned().map(Json).ok_or(BackendError::NotFound)
}

async fn create_supply(
    State(db): State<Db>,
    Json(input): Json<InsumoInput>,
) -> Result<(StatusCode, Json<Insumo>), BackendError> {
    let supply = db.write().await.create_supply(input)?;
    info!(id = supply.id, name = %supply.denominacion, "supply created");
    Ok((StatusCode::CREATED, Json(supply)))
}

async fn update_supply(
    State(db): State<Db>,
    Path(id): Path<Id>,
    Json(input): Json<InsumoInput>,
) -> Result<Json<Insumo>, BackendError> {
    let supply = db.write().await.update_supply(id, input)?;
    info!(id, "supply updated");
    Ok(Json(supply))
}

async fn delete_supply(State(db): State<Db>, Path(id): Path<Id>) -> Result<StatusCode, BackendError> {
    db.write().await.delete_supply(id)?;
    info!(id, "supply discontinued");
    Ok(StatusCode::NO_CONTENT)
}

// --- products ---

async fn list_products(State(db): State<Db>) -> Json<Vec<Manufacturado>> {
    let backend = db.read().await;
    Json(backend.products.all())
}

async fn get_product(State(db): State<Db>, Path(id): Path<Id>) -> Result<Json<Manufacturado>, BackendError> {
    let backend = db.read().await;
    backend.products.get(id).cloned().map(Json).ok_or(BackendError::NotFound)
}

async fn create_product(
    State(db): State<Db>,
    Json(input): Json<ManufacturadoInput>,
) -> Result<(StatusCode, Json<Manufacturado>), BackendError> {
    let product = db.write().await.create_product(input)?;
    info!(id = product.id, name = %product.denominacion, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<Id>,
    Json(input): Json<ManufacturadoInput>,
) -> Result<Json<Manufacturado>, BackendError> {
    let product = db.write().await.update_product(id, input)?;
    info!(id, "product updated");
    Ok(Json(product))
}

async fn delete_product(State(db): State<Db>, Path(id): Path<Id>) -> Result<StatusCode, BackendError> {
    db.write().await.delete_product(id)?;
    info!(id, "product discontinued");
    Ok(StatusCode::NO_CONTENT)
}
