use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::bugs;
use super::handlers::comments;
use super::handlers::health::health;
use super::handlers::projects;
use super::handlers::users::change_password::change_password;
use super::handlers::users::delete_user::delete_user;
use super::handlers::users::list_users::list_project_users;
use super::handlers::users::list_users::list_users;
use super::handlers::users::login::login;
use super::handlers::users::profile::get_profile;
use super::handlers::users::profile::update_profile;
use super::handlers::users::register::register;
use super::middleware::authenticate as auth_middleware;
use super::middleware::require_admin;
use crate::domain::bug::ports::BugServicePort;
use crate::domain::comment::ports::CommentServicePort;
use crate::domain::project::ports::ProjectServicePort;
use crate::domain::user::ports::UserServicePort;

/// Shared handler state. Services sit behind their ports so any adapter set can back them.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub project_service: Arc<dyn ProjectServicePort>,
    pub bug_service: Arc<dyn BugServicePort>,
    pub comment_service: Arc<dyn CommentServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/users", get(list_users))
        .route("/api/users/project/:project_id", get(list_project_users))
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login));

    let protected_routes = Router::new()
        .route("/api/users/profile", get(get_profile).put(update_profile))
        .route("/api/users/change-password", put(change_password))
        .route("/api/users/:id", delete(delete_user))
        .route(
            "/api/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/api/projects/creator/:creator_id",
            get(projects::list_projects_by_creator),
        )
        .route(
            "/api/projects/:id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/api/bugs", get(bugs::list_bugs).post(bugs::create_bug))
        .route(
            "/api/bugs/project/:project_id",
            get(bugs::list_bugs_by_project),
        )
        .route(
            "/api/bugs/assignee/:assignee_id",
            get(bugs::list_bugs_by_assignee),
        )
        .route(
            "/api/bugs/reporter/:reporter_id",
            get(bugs::list_bugs_by_reporter),
        )
        .route("/api/bugs/status/:status", get(bugs::list_bugs_by_status))
        .route(
            "/api/bugs/:id",
            get(bugs::get_bug)
                .put(bugs::update_bug)
                .delete(bugs::delete_bug),
        )
        .route(
            "/api/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/api/comments/bug/:bug_id",
            get(comments::list_comments_by_bug).merge(
                delete(comments::delete_comments_by_bug)
                    .route_layer(middleware::from_fn(require_admin)),
            ),
        )
        .route(
            "/api/comments/user/:user_id",
            get(comments::list_comments_by_user),
        )
        .route(
            "/api/comments/:id",
            get(comments::get_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route_layer(middleware::from_fn_with_state(
            state.authenticator.clone(),
            auth_middleware,
        ));

    // Headers stay out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
