use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod engine;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{ClubError, ClubResult};
pub use services::AppState;
pub use store::{ClubStore, SharedStore};

/// CSP middleware adds Content-Security-Policy header to all responses
async fn csp_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    response.headers_mut().insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'self'; connect-src 'self'"),
    );
    response
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_origin(tower_http::cors::Any);

    Router::new()
        // Public endpoints (no auth required)
        .route("/health", get(handlers::health_check))
        // Metrics endpoint with Basic Auth protection
        .route(
            "/metrics",
            get(handlers::metrics_handler).layer(middleware::from_fn_with_state(
                app_state.clone(),
                handlers::metrics_auth_middleware,
            )),
        )
        .nest("/api/v1", api_routes(app_state.clone()))
        .nest(
            "/admin",
            admin_routes()
                .layer(middleware::from_fn_with_state(
                    app_state.clone(),
                    middlewares::auth::auth_middleware,
                )),
        )
        .with_state(app_state)
        .layer(cors)
        .layer(middleware::from_fn(csp_middleware))
        .layer(middleware::from_fn(
            middlewares::metrics::metrics_middleware,
        ))
        .layer(middleware::from_fn(
            middlewares::trace::trace_context_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}

fn api_routes(app_state: Arc<AppState>) -> Router<Arc<AppState>> {
    let public_routes = Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/leaderboard", get(handlers::leaderboard::overall))
        .route(
            "/leaderboard/contests/{id}",
            get(handlers::leaderboard::contest),
        )
        .route("/events", get(handlers::events::list_events))
        .route("/forum/topics", get(handlers::forum::list_topics))
        .route("/forum/topics/{id}", get(handlers::forum::get_topic))
        .route("/users/{id}/score", get(handlers::users::get_user_score));

    // Protected routes (require JWT)
    let protected_routes = Router::new()
        .route("/auth/me", get(handlers::auth::get_current_user))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/users/me/stats", get(handlers::users::my_stats))
        .route("/users/{id}", patch(handlers::users::update_profile))
        .route("/contests", get(handlers::contests::list_contests))
        .route("/contests/{id}", get(handlers::contests::get_contest))
        .route(
            "/contests/{id}/attempts",
            post(handlers::contests::start_attempt).get(handlers::contests::list_my_attempts),
        )
        .route(
            "/contests/{id}/attempts/current",
            get(handlers::contests::current_attempt),
        )
        .route(
            "/challenges/{id}/answer",
            post(handlers::contests::practice_answer),
        )
        .route("/attempts/{id}", get(handlers::attempts::get_attempt))
        .route(
            "/attempts/{id}/answers",
            post(handlers::attempts::submit_answer),
        )
        .route(
            "/attempts/{id}/finish",
            post(handlers::attempts::finish_attempt),
        )
        .route("/attempts/{id}/stream", get(handlers::sse::attempt_stream))
        .route("/forum/topics", post(handlers::forum::create_topic))
        .route("/forum/topics/{id}/replies", post(handlers::forum::reply))
        .route_layer(middleware::from_fn_with_state(
            app_state,
            middlewares::auth::auth_middleware,
        ));

    public_routes.merge(protected_routes)
}

fn admin_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Contests
        .route("/contests", post(handlers::admin::create_contest))
        .route(
            "/contests/{id}",
            patch(handlers::admin::update_contest).delete(handlers::admin::delete_contest),
        )
        .route(
            "/contests/{id}/challenges",
            post(handlers::admin::add_challenge),
        )
        // Events board
        .route(
            "/events",
            get(handlers::admin::list_all_events).post(handlers::admin::create_event),
        )
        .route(
            "/events/{id}",
            patch(handlers::admin::update_event).delete(handlers::admin::delete_event),
        )
        // Forum moderation
        .route("/forum/topics/{id}/pin", post(handlers::admin::toggle_pin))
        .route_layer(middleware::from_fn(
            middlewares::auth::admin_guard_middleware,
        ))
}
