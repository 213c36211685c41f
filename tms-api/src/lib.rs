use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod shipments;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    Router::new()
        .route(
            "/shipments/{shipment_id}/export",
            get(shipments::get_shipment_export),
        )
        .route("/shipments/{shipment_id}", post(shipments::submit_shipment))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
