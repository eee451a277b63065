use crate::handlers;
use crate::middleware::require_bearer_token;
use crate::state::AppState;
use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
    Router,
};
use shared::Config;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;
use tracing::warn;

pub const API_PREFIX: &str = "/api/v1";

/// Build and configure the application router.
///
/// Trailing slashes are trimmed before routing, so `/api/v1/patients/` and
/// `/api/v1/patients` reach the same handler.
pub fn build_router(state: AppState, config: &Config) -> NormalizePath<Router> {
    let public = Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Accounts
        .route("/auth/signup", post(handlers::signup))
        .route("/auth/login", post(handlers::login))
        // Directory lookups
        .route("/patients/{id}", get(handlers::get_patient))
        .route("/dentists/{id}", get(handlers::get_dentist));

    let protected = Router::new()
        .route("/patients", post(handlers::create_patient))
        .route(
            "/patients/{id}",
            put(handlers::update_patient)
                .patch(handlers::patch_patient)
                .delete(handlers::delete_patient),
        )
        .route("/dentists", post(handlers::create_dentist))
        .route(
            "/dentists/{id}",
            put(handlers::update_dentist)
                .patch(handlers::patch_dentist)
                .delete(handlers::delete_dentist),
        )
        .route("/turns", post(handlers::create_turn))
        .route(
            "/turns/{id}",
            get(handlers::get_turn)
                .put(handlers::update_turn)
                .delete(handlers::delete_turn),
        )
        .route("/turns/patient/{id}", get(handlers::get_turns_by_patient))
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            require_bearer_token,
        ));

    let router = Router::new()
        .nest(API_PREFIX, public.merge(protected))
        // Middleware
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    NormalizePath::trim_trailing_slash(router)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
