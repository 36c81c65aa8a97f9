use axum::{Router, http::HeaderName, middleware};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod permissions;
pub mod repository;

// Module for routing segregation (Public, Authenticated, Admin).
pub mod routes;
use routes::{admin, authenticated, public};

// --- Public Re-exports ---

// Makes core state types easily accessible to the main application entry point (main.rs).
pub use config::AppConfig;
pub use repository::{InMemoryAccountRepository, RepositoryState};

/// ApiDoc
///
/// Auto-generates the OpenAPI documentation (Swagger JSON) for the
/// application from the `#[utoipa::path]` handler annotations and the
/// `ToSchema` derives. The resulting JSON is served at
/// `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_status,
        handlers::register_account,
        handlers::create_account,
        handlers::get_my_account,
        handlers::get_account_by_id,
        handlers::list_accounts,
        handlers::update_my_account,
        handlers::update_my_password,
        handlers::update_account_by_id,
    ),
    components(
        schemas(
            models::Role,
            models::AccountResponse,
            models::RegisterAccountRequest,
            models::CreateAccountRequest,
            models::UpdateAccountRequest,
            models::UpdatePasswordRequest,
            models::StatusResponse,
            models::Page<models::AccountResponse>,
        )
    ),
    tags(
        (name = "latte-gallery", description = "LatteGallery Accounts API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, thread-safe, immutable container holding all application
/// services and configuration, shared across all incoming requests.
#[derive(Clone)]
pub struct AppState {
    /// The account store, used by credential resolution and the account
    /// endpoints.
    pub repo: RepositoryState,
    /// The loaded, immutable environment configuration.
    pub config: AppConfig,
}

/// create_router
///
/// Assembles the application's routing structure, the two authorization
/// layers, and the observability stack.
///
/// Per-request control flow, outermost first:
/// 1. request-id / trace / CORS layers,
/// 2. `auth::authenticate` — credential resolution for every request
///    (absent header → anonymous; invalid credentials → 401),
/// 3. `permissions::check_route_permission` — the permission gate, consulting
///    the `ROUTE_PERMISSIONS` table for the matched route (failure → 403),
/// 4. the handler.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: Serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Routes, grouped by access tier. The tier modules only register
        // handlers; requirements come from the ROUTE_PERMISSIONS table.
        .merge(public::public_routes())
        .merge(authenticated::authenticated_routes())
        .merge(admin::admin_routes())
        // Permission gate. Installed with route_layer so the matched route
        // template is available for the table lookup.
        .route_layer(middleware::from_fn(permissions::check_route_permission))
        // Credential resolver. A router-level layer runs before the gate
        // above and populates the CurrentAccount extension it reads.
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::authenticate,
        ))
        // Apply the Unified State to all routes.
        .with_state(state);

    // 3. Observability and Correlation Layers (Applied outermost/first)
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID Generation: a unique id for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request Tracing: wraps the request/response lifecycle in a span
                // carrying the generated request id.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID Propagation: return the x-request-id header to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer
        .layer(cors)
}

/// trace_span_logger
///
/// Span factory for `TraceLayer`: includes the `x-request-id` header (if
/// present) alongside the HTTP method and URI so every log line of a request
/// is correlated by a unique id.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
