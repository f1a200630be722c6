use actix_web::{web, HttpResponse};
use log::{error, info};

use crate::{
    database::PoolStore,
    errors::ApiError,
    handlers::{
        auth::AuthUser,
        pool::{
            dto::{
                CreatePoolRequest, DataResponse, ListResponse, PaginationQuery, PoolPayload,
                UpdatePoolRequest,
            },
            service::PoolService,
        },
    },
};

pub const LIST_ERROR_MESSAGE: &str = "Error fetching Pool data";

/// GET /pools/{pool_id} - Returns a pool, or `data: null` when it does not exist
pub async fn get_pool_handler(
    store: web::Data<dyn PoolStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id_str = path.into_inner();
    info!("Handling GET /pools/{} request", id_str);

    let id = PoolService::parse_id(&id_str, "pool id")?;

    match PoolService::get_pool(store.get_ref(), &id).await {
        Ok(pool) => {
            info!("Pool {} found: {}", id_str, pool.is_some());
            Ok(HttpResponse::Ok().json(DataResponse { data: pool }))
        }
        Err(e) => {
            error!("Failed to retrieve pool {}: {}", id_str, e);
            Err(e.into())
        }
    }
}

/// GET /pools?page=&limit= - Returns one page of pools
///
/// Uses the `{ error, message }` envelope; a query failure is reported in the
/// body with status 200.
pub async fn get_pools_handler(
    store: web::Data<dyn PoolStore>,
    query: web::Query<Vec<(String, String)>>,
) -> HttpResponse {
    let pagination = PaginationQuery::from_pairs(&query).resolve();
    info!(
        "Handling GET /pools request (page {}, limit {})",
        pagination.page, pagination.limit
    );

    match PoolService::get_pools_page(store.get_ref(), pagination).await {
        Ok(pools) => {
            info!("Successfully retrieved {} pools", pools.len());
            HttpResponse::Ok().json(ListResponse {
                error: false,
                message: pools,
            })
        }
        Err(e) => {
            error!("Failed to retrieve pools: {}", e);
            HttpResponse::Ok().json(ListResponse {
                error: true,
                message: LIST_ERROR_MESSAGE,
            })
        }
    }
}

/// GET /pools/owner/{pool_owner} - Returns every pool of an owner
pub async fn get_pools_by_owner_handler(
    store: web::Data<dyn PoolStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let owner_str = path.into_inner();
    info!("Handling GET /pools/owner/{} request", owner_str);

    let owner = PoolService::parse_id(&owner_str, "owner id")?;

    match PoolService::get_pools_by_owner(store.get_ref(), &owner).await {
        Ok(pools) => {
            info!("Successfully retrieved {} pools", pools.len());
            Ok(HttpResponse::Ok().json(DataResponse { data: pools }))
        }
        Err(e) => {
            error!("Failed to retrieve pools for owner {}: {}", owner_str, e);
            Err(e.into())
        }
    }
}

/// POST /pools - Creates a new pool owned by the caller
/// Requires a valid token in the Authorization header
///
/// # Arguments
/// * `user` - Authenticated caller (validated by extractor)
/// * `store` - Pool store
/// * `body` - CreatePoolRequest containing pool data
///
/// # Returns
/// `{ data: { pool } }` with the created pool
pub async fn create_pool_handler(
    user: AuthUser,
    store: web::Data<dyn PoolStore>,
    body: web::Json<CreatePoolRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling POST /pools request from user {}", user.user_id);

    match PoolService::create_pool(store.get_ref(), &user.user_id, body.into_inner()).await {
        Ok(pool) => {
            info!("Successfully created pool with id: {}", pool.id);
            Ok(HttpResponse::Ok().json(DataResponse {
                data: PoolPayload { pool: Some(pool) },
            }))
        }
        Err(e) => {
            error!("Failed to create pool: {}", e);
            Err(e)
        }
    }
}

/// PUT /pools/{pool_id} - Merges `poolDetails` and `contractAddress` into a pool
/// Requires a valid token. Any authenticated user may update any pool.
///
/// # Arguments
/// * `user` - Authenticated caller (validated by extractor)
/// * `store` - Pool store
/// * `path` - Path parameters containing pool_id
/// * `body` - UpdatePoolRequest containing fields to update
///
/// # Returns
/// `{ data: { pool } }` with the updated pool, or `pool: null` if it does not exist
pub async fn update_pool_handler(
    user: AuthUser,
    store: web::Data<dyn PoolStore>,
    path: web::Path<String>,
    body: web::Json<UpdatePoolRequest>,
) -> Result<HttpResponse, ApiError> {
    let id_str = path.into_inner();
    info!(
        "Handling PUT /pools/{} request from user {}",
        id_str, user.user_id
    );

    let id = PoolService::parse_id(&id_str, "pool id")?;

    match PoolService::update_pool(store.get_ref(), &id, body.into_inner().into_patch()).await {
        Ok(pool) => {
            info!("Pool {} updated: {}", id_str, pool.is_some());
            Ok(HttpResponse::Ok().json(DataResponse {
                data: PoolPayload { pool },
            }))
        }
        Err(e) => {
            error!("Failed to update pool {}: {}", id_str, e);
            Err(e.into())
        }
    }
}
