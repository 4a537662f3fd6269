use axum::{
    Router,
    routing::{get, post},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

/// Documented REST endpoints, nested under `/rest`.
pub fn rest_routes() -> OpenApiRouter<AppState> {
    let upload = OpenApiRouter::new()
        .routes(routes!(handlers::upload::upload_avatar))
        .layer(handlers::upload::avatar_upload_body_limit());

    OpenApiRouter::new()
        .routes(routes!(handlers::auth::authenticate))
        .routes(routes!(handlers::account::check_account))
        .routes(routes!(handlers::account::pre_register))
        .routes(routes!(handlers::account::resend_otp))
        .routes(routes!(handlers::account::confirm_email))
        .routes(routes!(handlers::account::complete_registration))
        .routes(routes!(handlers::account::forgot_password))
        .routes(routes!(handlers::account::request_delete_account_otp))
        .merge(upload)
}

pub fn actuator_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::health::health))
}

/// Routes kept out of the OpenAPI document: the GraphQL endpoint and the
/// HTML deletion form.
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/graphql", post(handlers::graphql::graphql))
        .route(
            "/requestDeleteAccount",
            get(handlers::web::delete_account_form).post(handlers::web::submit_delete_account),
        )
}
