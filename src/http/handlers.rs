//! Route handlers.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Html,
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::client::CREDENTIALS_FIELD;
use crate::http::error::ApiError;
use crate::http::form::FormFields;
use crate::http::server::AppState;
use crate::hubspot::{CallbackParams, IntegrationItem};

/// Page returned to the OAuth popup; it closes itself.
const CLOSE_WINDOW_HTML: &str = r#"<html>
    <script>
        window.close();
    </script>
</html>
"#;

#[derive(Serialize)]
pub struct HealthStatus {
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

pub async fn authorize_hubspot(
    State(state): State<AppState>,
    form: FormFields,
) -> Result<Json<String>, ApiError> {
    let user_id = form.require("user_id")?;
    let org_id = form.require("org_id")?;
    Ok(Json(state.hubspot.authorize(user_id, org_id)?))
}

pub async fn oauth2callback_hubspot(
    State(state): State<AppState>,
    params: Result<Query<CallbackParams>, QueryRejection>,
) -> Result<Html<&'static str>, ApiError> {
    let Query(params) = params?;
    state.hubspot.oauth2_callback(&params).await?;
    Ok(Html(CLOSE_WINDOW_HTML))
}

pub async fn get_hubspot_credentials(
    State(state): State<AppState>,
    form: FormFields,
) -> Result<Json<Value>, ApiError> {
    let user_id = form.require("user_id")?;
    let org_id = form.require("org_id")?;
    Ok(Json(state.hubspot.credentials(user_id, org_id)?))
}

pub async fn get_hubspot_items(
    State(state): State<AppState>,
    form: FormFields,
) -> Result<Json<Vec<IntegrationItem>>, ApiError> {
    let credentials = form.require(CREDENTIALS_FIELD)?;
    Ok(Json(state.hubspot.items(credentials).await?))
}
