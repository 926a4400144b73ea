//! Catalog route handlers.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use farmhaat_core::ProductId;

use crate::db::products::{ProductFilter, ProductRepository, ProductSort};
use crate::db::reviews::ReviewRepository;
use crate::error::{AppError, Result};
use crate::middleware::auth::{OptionalAuth, RequireAuth};
use crate::models::product::{Product, ProductUnit, ProductWithUnits};
use crate::models::review::ReviewWithAuthor;
use crate::state::AppState;

const DEFAULT_PER_PAGE: i64 = 20;
const MAX_PER_PAGE: i64 = 100;
const RECENT_LIMIT: i64 = 10;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Case-insensitive search over name and description.
    pub q: Option<String>,
    pub category: Option<String>,
    /// `newest` (default), `price_asc`, or `price_desc`.
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Paginated product listing response.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub products: Vec<ProductWithUnits>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

/// List products with search, category filter, sorting, and pagination.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>> {
    let sort = match params.sort.as_deref() {
        None | Some("newest") => ProductSort::Newest,
        Some("price_asc") => ProductSort::PriceAsc,
        Some("price_desc") => ProductSort::PriceDesc,
        Some(other) => {
            return Err(AppError::BadRequest(format!("unknown sort: {other}")));
        }
    };

    let page = params.page.unwrap_or(1).max(1);
    let per_page = params
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);

    let filter = ProductFilter {
        query: params.q,
        category: params.category,
        sort,
        limit: per_page,
        offset: (page - 1) * per_page,
    };

    let repo = ProductRepository::new(state.pool());
    let products = repo.list(&filter).await?;
    let total = repo.count(&filter).await?;
    let products = attach_units(&repo, products).await?;

    Ok(Json(ListResponse {
        products,
        total,
        page,
        per_page,
    }))
}

/// Product detail with units and reviews. Records a view for logged-in users.
#[instrument(skip(state, auth))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(auth): OptionalAuth,
    Path(id): Path<ProductId>,
) -> Result<Json<Value>> {
    let repo = ProductRepository::new(state.pool());

    let product = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let units = repo.units_for(&[id]).await?;
    let reviews = ReviewRepository::new(state.pool())
        .list_for_product(id)
        .await?;

    if let Some(user) = auth {
        repo.record_view(user.id, id).await?;
    }

    Ok(Json(json!({
        "product": ProductWithUnits { product, units },
        "reviews": reviews,
    })))
}

/// The caller's recently viewed products.
#[instrument(skip(state))]
pub async fn recent(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<ProductWithUnits>>> {
    let repo = ProductRepository::new(state.pool());
    let products = repo.recent_for(user.id, RECENT_LIMIT).await?;
    let products = attach_units(&repo, products).await?;

    Ok(Json(products))
}

/// Reviews for a product.
#[instrument(skip(state))]
pub async fn reviews(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Vec<ReviewWithAuthor>>> {
    let reviews = ReviewRepository::new(state.pool())
        .list_for_product(id)
        .await?;

    Ok(Json(reviews))
}

/// Group units under their products, preserving product order.
async fn attach_units(
    repo: &ProductRepository<'_>,
    products: Vec<Product>,
) -> Result<Vec<ProductWithUnits>> {
    let ids: Vec<ProductId> = products.iter().map(|p| p.id).collect();
    let mut units_by_product: HashMap<ProductId, Vec<ProductUnit>> = HashMap::new();
    for unit in repo.units_for(&ids).await? {
        units_by_product.entry(unit.product_id).or_default().push(unit);
    }

    Ok(products
        .into_iter()
        .map(|product| {
            let units = units_by_product.remove(&product.id).unwrap_or_default();
            ProductWithUnits { product, units }
        })
        .collect())
}
