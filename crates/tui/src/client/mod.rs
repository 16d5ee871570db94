//! HTTP gateway speaking the hosted table API's REST dialect.
//!
//! Every table is exposed under `/rest/v1/{table}` with query-string
//! filters (`id=eq.{uuid}`, `order=created_at.desc`). Writes ask for the
//! created/updated rows back with `Prefer: return=representation`, which
//! is what keeps the local stores current without a refetch.

use reqwest::{Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use store::gateway::{GatewayError, GatewayResult, Table, TableGateway};

use crate::error::{AppError, Result};

/// Body shape of backend error responses.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

/// Postgres unique violation, surfaced for duplicate names.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Clone)]
pub struct RestGateway {
    base_url: Url,
    api_key: String,
    http: reqwest::Client,
}

impl RestGateway {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::Setting(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
            http: reqwest::Client::new(),
        })
    }

    fn table_url(&self, table: &str) -> GatewayResult<Url> {
        self.base_url
            .join(&format!("rest/v1/{table}"))
            .map_err(|err| GatewayError::Server(format!("invalid base_url: {err}")))
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Request a short-lived signed URL for an uploaded file. Signed URLs
    /// expire, so one is requested per access and never cached.
    pub async fn signed_url(
        &self,
        bucket: &str,
        path: &str,
        expires_in_secs: u32,
    ) -> GatewayResult<String> {
        let endpoint = self
            .base_url
            .join(&format!("storage/v1/object/sign/{bucket}/{path}"))
            .map_err(|err| GatewayError::Server(format!("invalid base_url: {err}")))?;

        let res = self
            .request(self.http.post(endpoint))
            .json(&json!({ "expiresIn": expires_in_secs }))
            .send()
            .await
            .map_err(transport)?;
        if !res.status().is_success() {
            return Err(error_for_response(res).await);
        }

        #[derive(Deserialize)]
        struct Signed {
            #[serde(rename = "signedURL")]
            signed_url: String,
        }
        let signed: Signed = res.json().await.map_err(transport)?;
        // The backend answers with a path relative to the project root.
        self.base_url
            .join(signed.signed_url.trim_start_matches('/'))
            .map(|url| url.to_string())
            .map_err(|err| GatewayError::Server(format!("invalid signed url: {err}")))
    }
}

impl TableGateway for RestGateway {
    async fn select_all<T: Table>(&self) -> GatewayResult<Vec<T>> {
        let mut url = self.table_url(T::NAME)?;
        let direction = if T::ORDER.descending { "desc" } else { "asc" };
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", &format!("{}.{direction}", T::ORDER.column));

        let res = self.request(self.http.get(url)).send().await.map_err(transport)?;
        if !res.status().is_success() {
            return Err(error_for_response(res).await);
        }
        res.json::<Vec<T>>().await.map_err(transport)
    }

    async fn insert<T: Table>(&self, row: &T::Insert) -> GatewayResult<T> {
        let url = self.table_url(T::NAME)?;
        let res = self
            .request(self.http.post(url))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await
            .map_err(transport)?;
        if !res.status().is_success() {
            return Err(error_for_response(res).await);
        }
        single_row(res).await
    }

    async fn update<T: Table>(&self, id: Uuid, patch: &T::Patch) -> GatewayResult<T> {
        let mut url = self.table_url(T::NAME)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        let res = self
            .request(self.http.patch(url))
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await
            .map_err(transport)?;
        if !res.status().is_success() {
            return Err(error_for_response(res).await);
        }
        single_row(res).await
    }

    async fn delete<T: Table>(&self, id: Uuid) -> GatewayResult<()> {
        let mut url = self.table_url(T::NAME)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        let res = self
            .request(self.http.delete(url))
            .send()
            .await
            .map_err(transport)?;
        if !res.status().is_success() {
            return Err(error_for_response(res).await);
        }
        Ok(())
    }
}

/// Writes with `return=representation` answer with an array of affected
/// rows; exactly one is expected for id-scoped requests.
async fn single_row<T: Table>(res: Response) -> GatewayResult<T> {
    let mut rows: Vec<T> = res.json().await.map_err(transport)?;
    match rows.len() {
        0 => Err(GatewayError::NotFound),
        _ => Ok(rows.swap_remove(0)),
    }
}

fn transport(err: reqwest::Error) -> GatewayError {
    GatewayError::Transport(err.to_string())
}

async fn error_for_response(res: Response) -> GatewayError {
    let status = res.status();
    let body = res.json::<ErrorResponse>().await.ok();
    let message = body
        .as_ref()
        .map(|err| err.message.clone())
        .unwrap_or_else(|| "unknown error".to_string());
    let code = body.and_then(|err| err.code);

    if code.as_deref() == Some(UNIQUE_VIOLATION) {
        return GatewayError::Conflict(message);
    }
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::Unauthorized,
        StatusCode::NOT_FOUND => GatewayError::NotFound,
        StatusCode::CONFLICT => GatewayError::Conflict(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            GatewayError::Validation(message)
        }
        _ => GatewayError::Server(message),
    }
}
