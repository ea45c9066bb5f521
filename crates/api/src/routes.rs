//! API route definitions

use crate::handlers;
use crate::respond;
use crate::SharedState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};

/// Create the main application router
pub fn create_router(state: SharedState) -> Router {
    let component_routes = Router::new()
        .route(
            "/",
            post(handlers::add_component)
                .put(handlers::update_component)
                .delete(handlers::delete_component),
        )
        .route("/list", get(handlers::list_components))
        .route("/list-attributes", get(handlers::list_by_attributes))
        .route("/id/{id}", get(handlers::get_by_id))
        .route("/code/{code}", get(handlers::list_by_code))
        .route("/image/{image}", get(handlers::list_by_image))
        .route("/part-number/{part_number}", get(handlers::list_by_part_number))
        .route("/category-maker", get(handlers::list_by_category_maker))
        .route("/description/{description}", get(handlers::list_by_description))
        .route("/stock/{stock}", get(handlers::list_by_stock))
        .route("/stock-max/{max}", get(handlers::list_by_stock_max))
        .route("/stock-range", get(handlers::list_by_stock_range))
        .route("/price/{price}", get(handlers::list_by_price))
        .route("/price-max/{max}", get(handlers::list_by_price_max))
        .route("/price-range", get(handlers::list_by_price_range))
        .route("/details", get(handlers::list_with_details))
        .route("/detail", post(handlers::add_component_detail))
        .route(
            "/bipolar-transistor",
            get(handlers::list_with_transistors).post(handlers::add_bipolar_transistor),
        )
        .route("/all-models", get(handlers::list_full));

    let api_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/component", component_routes)
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(CatchPanicLayer::custom(respond::handle_panic))
}
