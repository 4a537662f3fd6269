use axum::{Json, extract::State};
use tracing::instrument;

use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::state::AppState;

/// Execute a GraphQL request on behalf of the bearer of the token.
#[instrument(skip_all, fields(email = %auth_user.email, role = %auth_user.role))]
pub async fn graphql(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(request): AppJson<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    Json(state.schema.execute(request.data(auth_user)).await)
}
