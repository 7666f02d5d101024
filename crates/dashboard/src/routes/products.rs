//! Product catalog route handlers.
//!
//! Every handler works on the visitor's own catalog, stored in their session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use matjari_core::{Product, ProductId, Route};

use crate::error::AppError;
use crate::forms::ProductForm;
use crate::middleware::SessionContext;

// =============================================================================
// View Types
// =============================================================================

/// Product row for the listing.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub category: String,
    pub stock: u32,
    pub image_url: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.to_string(),
            category: product.category.clone(),
            stock: product.stock,
            image_url: product.image_url.clone(),
        }
    }
}

/// Search query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Products list page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub current_path: &'static str,
    pub products: Vec<ProductView>,
    pub search_query: String,
}

/// Create/edit form template.
///
/// `product_id` is `None` when creating.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub current_path: &'static str,
    pub product_id: Option<String>,
    pub form: ProductForm,
    pub error: Option<String>,
}

impl ProductFormTemplate {
    fn new(product_id: Option<String>, form: ProductForm, error: Option<String>) -> Self {
        Self {
            current_path: Route::Products.path(),
            product_id,
            form,
            error,
        }
    }
}

/// Delete confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/delete.html")]
pub struct DeleteProductTemplate {
    pub current_path: &'static str,
    pub product: ProductView,
}

fn back_to_list() -> Redirect {
    Redirect::to(Route::Products.path())
}

fn not_found(id: &ProductId) -> AppError {
    AppError::NotFound(format!("product {id}"))
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Product list, filtered by `?q=` exactly as typed.
#[instrument(skip(context))]
pub async fn index(
    context: SessionContext,
    Query(query): Query<SearchQuery>,
) -> Result<ProductsIndexTemplate, AppError> {
    let catalog = context.catalog().await?;
    let products = catalog
        .list(&query.q)
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(ProductsIndexTemplate {
        current_path: Route::Products.path(),
        products,
        search_query: query.q,
    })
}

/// Empty create form.
pub async fn new_form() -> ProductFormTemplate {
    ProductFormTemplate::new(None, ProductForm::default(), None)
}

/// Create a product.
#[instrument(skip_all, fields(name = %form.name))]
pub async fn create(
    context: SessionContext,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let fields = match form.parse() {
        Ok(fields) => fields,
        Err(err) => {
            let template = ProductFormTemplate::new(None, form, Some(err.to_string()));
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    let mut catalog = context.catalog().await?;
    let product_id = catalog.create(fields).id.clone();
    context.save_catalog(&catalog).await?;
    tracing::info!(%product_id, "Product created");

    Ok(back_to_list().into_response())
}

/// Edit form, prefilled.
#[instrument(skip(context))]
pub async fn edit_form(
    context: SessionContext,
    Path(id): Path<ProductId>,
) -> Result<ProductFormTemplate, AppError> {
    let catalog = context.catalog().await?;
    let product = catalog.get(&id).ok_or_else(|| not_found(&id))?;

    Ok(ProductFormTemplate::new(
        Some(id.to_string()),
        ProductForm::from(product),
        None,
    ))
}

/// Update a product. Unknown IDs are a no-op.
#[instrument(skip(context, form), fields(product_id = %id))]
pub async fn update(
    context: SessionContext,
    Path(id): Path<ProductId>,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let fields = match form.parse() {
        Ok(fields) => fields,
        Err(err) => {
            let template =
                ProductFormTemplate::new(Some(id.to_string()), form, Some(err.to_string()));
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    let mut catalog = context.catalog().await?;
    if catalog.update(&id, fields) {
        context.save_catalog(&catalog).await?;
        tracing::info!("Product updated");
    } else {
        tracing::debug!("Update of unknown product ignored");
    }

    Ok(back_to_list().into_response())
}

/// Delete confirmation page.
#[instrument(skip(context))]
pub async fn confirm_delete(
    context: SessionContext,
    Path(id): Path<ProductId>,
) -> Result<DeleteProductTemplate, AppError> {
    let catalog = context.catalog().await?;
    let product = catalog.get(&id).ok_or_else(|| not_found(&id))?;

    Ok(DeleteProductTemplate {
        current_path: Route::Products.path(),
        product: ProductView::from(product),
    })
}

/// Delete a product. Unknown IDs are a no-op.
#[instrument(skip(context), fields(product_id = %id))]
pub async fn delete(
    context: SessionContext,
    Path(id): Path<ProductId>,
) -> Result<Redirect, AppError> {
    let mut catalog = context.catalog().await?;
    if catalog.delete(&id).is_some() {
        context.save_catalog(&catalog).await?;
        tracing::info!("Product deleted");
    }

    Ok(back_to_list())
}
