use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Form, Query, State};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::GrantConfig;
use crate::oauth::payload::AuthResponsePayload;

/// Parameters of an authorization-code exchange. Accepted for logging only.
#[derive(Debug, Default, Deserialize)]
pub struct TokenRequest {
    pub code: Option<String>,
    pub grant_type: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
}

impl TokenRequest {
    /// Fill fields missing from `self` with those from `other`.
    fn or(self, other: TokenRequest) -> TokenRequest {
        TokenRequest {
            code: self.code.or(other.code),
            grant_type: self.grant_type.or(other.grant_type),
            client_id: self.client_id.or(other.client_id),
            client_secret: self.client_secret.or(other.client_secret),
            redirect_uri: self.redirect_uri.or(other.redirect_uri),
        }
    }
}

/// POST /oauth2/token: authorization-code exchange.
///
/// Always answers 200 with the configured grant. Parameters may arrive in the
/// form body or the query string; unreadable ones are dropped, never rejected.
pub async fn token(
    State(grant): State<Arc<GrantConfig>>,
    query: Result<Query<TokenRequest>, QueryRejection>,
    form: Result<Form<TokenRequest>, FormRejection>,
) -> Json<AuthResponsePayload> {
    let from_form = form.map(|Form(req)| req).unwrap_or_default();
    let from_query = query.map(|Query(req)| req).unwrap_or_default();
    let req = from_form.or(from_query);

    tracing::debug!(
        grant_type = ?req.grant_type,
        client_id = ?req.client_id,
        has_code = req.code.is_some(),
        has_client_secret = req.client_secret.is_some(),
        redirect_uri = ?req.redirect_uri,
        "Token exchange"
    );

    Json(AuthResponsePayload::issue(&grant))
}
