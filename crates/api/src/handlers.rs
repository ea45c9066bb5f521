//! API request handlers
//!
//! Every handler is a thin adapter: extract parameters, call exactly one
//! data-access operation, hand the result to the classifier in `respond`.

use crate::respond;
use crate::SharedState;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use partsbin_database::{
    AttributeFilter, NewBipolarTransistor, NewComponent, NewComponentDetail, Page, UpdateComponent,
};
use serde::Deserialize;

fn default_limit() -> i64 {
    50
}

/// Ordering and pagination query parameters shared by every list route
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    order_by: Option<String>,
    order_at: Option<String>,
    #[serde(default = "default_limit")]
    limit: i64,
    #[serde(default)]
    offset: i64,
}

impl ListParams {
    fn page(&self) -> Page {
        Page {
            order_by: self.order_by.clone(),
            order_at: self.order_at.clone(),
            limit: self.limit,
            offset: self.offset,
        }
    }
}

// Query strings go through serde_urlencoded, which cannot flatten nested
// structs, so the routes below repeat the ordering fields instead of
// embedding ListParams.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeListParams {
    order_by: Option<String>,
    order_at: Option<String>,
    #[serde(default = "default_limit")]
    limit: i64,
    #[serde(default)]
    offset: i64,
    code: Option<String>,
    description: Option<String>,
    image: Option<String>,
    part_number: Option<String>,
    category: Option<String>,
    maker: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMakerParams {
    order_by: Option<String>,
    order_at: Option<String>,
    #[serde(default = "default_limit")]
    limit: i64,
    #[serde(default)]
    offset: i64,
    category: Option<String>,
    maker: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntRangeParams {
    order_by: Option<String>,
    order_at: Option<String>,
    #[serde(default = "default_limit")]
    limit: i64,
    #[serde(default)]
    offset: i64,
    min: Option<i64>,
    max: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloatRangeParams {
    order_by: Option<String>,
    order_at: Option<String>,
    #[serde(default = "default_limit")]
    limit: i64,
    #[serde(default)]
    offset: i64,
    min: Option<f64>,
    max: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    id: Option<i64>,
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// ==================== Writes ====================

pub async fn add_component(State(state): State<SharedState>, body: Bytes) -> Response {
    const BAD: &str = "Bad request, could not add a component.";
    let new: NewComponent = match serde_json::from_slice(&body) {
        Ok(new) => new,
        Err(_) => return respond::bad_request(BAD),
    };

    respond::created("add_component", state.db.create_component(new).await)
}

pub async fn update_component(State(state): State<SharedState>, body: Bytes) -> Response {
    const BAD: &str = "Bad request, could not update a component.";
    let fields: UpdateComponent = match serde_json::from_slice(&body) {
        Ok(fields) => fields,
        Err(_) => return respond::bad_request(BAD),
    };
    let Some(id) = fields.id else {
        return respond::bad_request(BAD);
    };

    respond::acknowledged(
        "update_component",
        "objectUpdated",
        "the id",
        state.db.update_component(id, &fields).await,
    )
}

pub async fn delete_component(
    State(state): State<SharedState>,
    Query(params): Query<DeleteParams>,
) -> Response {
    let Some(id) = params.id else {
        return respond::bad_request("Bad request, could not delete a component.");
    };

    respond::acknowledged(
        "delete_component",
        "objectDeleted",
        "the id",
        state.db.delete_component(id).await,
    )
}

pub async fn add_component_detail(State(state): State<SharedState>, body: Bytes) -> Response {
    const BAD: &str = "Bad request, could not add a component detail.";
    let new: NewComponentDetail = match serde_json::from_slice(&body) {
        Ok(new) => new,
        Err(_) => return respond::bad_request(BAD),
    };

    match state.db.create_component_detail(new).await {
        // A missing parent component is a caller mistake, not an empty result.
        Ok(None) => respond::bad_request(BAD),
        Ok(Some(created)) => respond::created("add_component_detail", Ok(created)),
        Err(err) => respond::created::<partsbin_database::ComponentDetail>(
            "add_component_detail",
            Err(err),
        ),
    }
}

pub async fn add_bipolar_transistor(State(state): State<SharedState>, body: Bytes) -> Response {
    const BAD: &str = "Bad request, could not add a bipolar transistor.";
    let new: NewBipolarTransistor = match serde_json::from_slice(&body) {
        Ok(new) => new,
        Err(_) => return respond::bad_request(BAD),
    };

    match state.db.create_bipolar_transistor(new).await {
        Ok(None) => respond::bad_request(BAD),
        Ok(Some(created)) => respond::created("add_bipolar_transistor", Ok(created)),
        Err(err) => respond::created::<partsbin_database::BipolarTransistor>(
            "add_bipolar_transistor",
            Err(err),
        ),
    }
}

// ==================== Reads ====================

pub async fn get_by_id(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.parse::<i64>() else {
        return respond::bad_request("Bad request, could not get a component with the requested id.");
    };

    respond::one(
        "get_component_by_id",
        "the id",
        state.db.get_component_by_id(id).await,
    )
}

pub async fn list_components(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Response {
    respond::list(
        "list_components",
        "all attributes",
        state.db.list_components(&params.page()).await,
    )
}

pub async fn list_by_attributes(
    State(state): State<SharedState>,
    Query(params): Query<AttributeListParams>,
) -> Response {
    let page = Page {
        order_by: params.order_by.clone(),
        order_at: params.order_at.clone(),
        limit: params.limit,
        offset: params.offset,
    };
    let filter = AttributeFilter {
        code: params.code,
        description: params.description,
        image: params.image,
        part_number: params.part_number,
        category: params.category,
        maker: params.maker,
    };

    respond::list(
        "list_components_by_attributes",
        "all attributes",
        state.db.list_components_by_attributes(&page, &filter).await,
    )
}

pub async fn list_by_code(
    State(state): State<SharedState>,
    Path(code): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    respond::list(
        "list_components_by_code",
        "the code",
        state.db.list_components_by_code(&params.page(), &code).await,
    )
}

pub async fn list_by_image(
    State(state): State<SharedState>,
    Path(image): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    respond::list(
        "list_components_by_image",
        "the image",
        state.db.list_components_by_image(&params.page(), &image).await,
    )
}

pub async fn list_by_part_number(
    State(state): State<SharedState>,
    Path(part_number): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    respond::list(
        "list_components_by_part_number",
        "the part number",
        state
            .db
            .list_components_by_part_number(&params.page(), &part_number)
            .await,
    )
}

pub async fn list_by_category_maker(
    State(state): State<SharedState>,
    Query(params): Query<CategoryMakerParams>,
) -> Response {
    let (Some(category), Some(maker)) = (params.category.as_deref(), params.maker.as_deref())
    else {
        return respond::bad_request(
            "Bad request, could not get all paginated list components according to the category and maker.",
        );
    };
    let page = Page {
        order_by: params.order_by.clone(),
        order_at: params.order_at.clone(),
        limit: params.limit,
        offset: params.offset,
    };

    respond::list(
        "list_components_by_category_maker",
        "the maker or category",
        state
            .db
            .list_components_by_category_maker(&page, category, maker)
            .await,
    )
}

pub async fn list_by_description(
    State(state): State<SharedState>,
    Path(description): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    respond::list(
        "list_components_by_description",
        "the description",
        state
            .db
            .list_components_by_description(&params.page(), &description)
            .await,
    )
}

pub async fn list_by_stock(
    State(state): State<SharedState>,
    Path(stock): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    let Ok(stock) = stock.parse::<i64>() else {
        return respond::bad_request(
            "Bad request, could not get all paginated list components according to the stock.",
        );
    };

    respond::list(
        "list_components_by_stock",
        "the stock",
        state.db.list_components_by_stock(&params.page(), stock).await,
    )
}

pub async fn list_by_stock_max(
    State(state): State<SharedState>,
    Path(max): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    let Ok(max) = max.parse::<i64>() else {
        return respond::bad_request(
            "Bad request, could not get all paginated list components according to the stock max.",
        );
    };

    respond::list(
        "list_components_by_stock_max",
        "the stock max",
        state.db.list_components_by_stock_max(&params.page(), max).await,
    )
}

pub async fn list_by_stock_range(
    State(state): State<SharedState>,
    Query(params): Query<IntRangeParams>,
) -> Response {
    let (Some(min), Some(max)) = (params.min, params.max) else {
        return respond::bad_request(
            "Bad request, could not get all paginated list components according to the stock min and max.",
        );
    };
    let page = Page {
        order_by: params.order_by.clone(),
        order_at: params.order_at.clone(),
        limit: params.limit,
        offset: params.offset,
    };

    respond::list(
        "list_components_by_stock_range",
        "the stock min and max",
        state.db.list_components_by_stock_range(&page, min, max).await,
    )
}

pub async fn list_by_price(
    State(state): State<SharedState>,
    Path(price): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    let Ok(price) = price.parse::<f64>() else {
        return respond::bad_request(
            "Bad request, could not get all paginated list components according to the price.",
        );
    };

    respond::list(
        "list_components_by_price",
        "the price",
        state.db.list_components_by_price(&params.page(), price).await,
    )
}

pub async fn list_by_price_max(
    State(state): State<SharedState>,
    Path(max): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    let Ok(max) = max.parse::<f64>() else {
        return respond::bad_request(
            "Bad request, could not get all paginated list components according to the price max.",
        );
    };

    respond::list(
        "list_components_by_price_max",
        "the price max",
        state.db.list_components_by_price_max(&params.page(), max).await,
    )
}

pub async fn list_by_price_range(
    State(state): State<SharedState>,
    Query(params): Query<FloatRangeParams>,
) -> Response {
    let (Some(min), Some(max)) = (params.min, params.max) else {
        return respond::bad_request(
            "Bad request, could not get all paginated list components according to the price min and max.",
        );
    };
    let page = Page {
        order_by: params.order_by.clone(),
        order_at: params.order_at.clone(),
        limit: params.limit,
        offset: params.offset,
    };

    respond::list(
        "list_components_by_price_range",
        "the price min and max",
        state.db.list_components_by_price_range(&page, min, max).await,
    )
}

pub async fn list_with_details(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Response {
    respond::list(
        "list_components_with_details",
        "the component details model",
        state.db.list_components_with_details(&params.page()).await,
    )
}

pub async fn list_with_transistors(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Response {
    respond::list(
        "list_components_with_transistors",
        "the bipolar transistor model",
        state.db.list_components_with_transistors(&params.page()).await,
    )
}

pub async fn list_full(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Response {
    respond::list(
        "list_components_full",
        "the all models",
        state.db.list_components_full(&params.page()).await,
    )
}
