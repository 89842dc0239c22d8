use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{addresses, auth, cart, products};
use crate::api::state::AppState;

/// Builds the full application router
///
/// Cart and address routes authenticate through the `AuthUser` extractor;
/// the user and product routes are public.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(auth::health_check))
        // Public user and catalog routes
        .route("/users/signup", post(auth::signup))
        .route("/users/login", post(auth::login))
        .route("/admin/addproduct", post(products::add_product))
        .route("/users/productview", get(products::list_products))
        .route("/users/search", get(products::search_products))
        // Cart routes
        .route("/addtocart", get(cart::add_to_cart))
        .route("/removeitem", get(cart::remove_item))
        .route("/listcart", get(cart::list_cart))
        .route("/cartcheckout", get(cart::checkout))
        .route("/instantbuy", get(cart::instant_buy))
        // Address routes
        .route("/addaddress", post(addresses::add_address))
        .route("/edithomeaddress", put(addresses::edit_home_address))
        .route("/editworkaddress", put(addresses::edit_work_address))
        .route("/deleteaddresses", get(addresses::delete_addresses))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(state)
}
