//! REST API client
//!
//! Typed HTTP requests over `gloo-net`, with the bearer token injected
//! from the session context and 401 handled in one place: the credential
//! is cleared and the logout signal raised no matter which call tripped
//! it.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use pop_core::model::{ApiErrorBody, LoginRequest, LoginResponse, PerfilUsuario, RegisterRequest};

use crate::config::DashboardConfig;
use crate::session::SessionContext;

/// Generic fallback shown when the server supplies no message of its own.
pub const MSG_GENERIC_FAILURE: &str = "Não foi possível concluir a operação";

// ============================================================================
// Error type
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Falha de rede: {0}")]
    Network(String),

    #[error("Sessão expirada")]
    Unauthorized,

    /// Human message supplied by the server (`detail` field).
    #[error("{0}")]
    Server(String),

    #[error("Erro HTTP {0}")]
    Http(u16),

    #[error("Resposta inválida: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message rendered near the triggering control: server-supplied text
    /// verbatim, everything else collapses to the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server(detail) => detail.clone(),
            ApiError::Unauthorized => self.to_string(),
            _ => MSG_GENERIC_FAILURE.to_string(),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

// ============================================================================
// Cache keys / request paths
// ============================================================================

/// One page of a collection; also the cache key for that page.
pub fn page_key(collection: &str, page: usize, items: usize) -> String {
    format!("/{collection}?page={page}&items={items}")
}

/// The decoupled count endpoint for a collection.
pub fn count_key(collection: &str) -> String {
    format!("/{collection}/count")
}

/// A single entity by id.
pub fn entity_key(collection: &str, id: &str) -> String {
    format!("/{collection}/{id}")
}

/// The unpaged collection, used by pickers in composite forms.
pub fn collection_key(collection: &str) -> String {
    format!("/{collection}")
}

// ============================================================================
// Client
// ============================================================================

/// API client for the Manhattan Pop! backend.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(config: &DashboardConfig, session: SessionContext) -> Self {
        Self {
            base_url: config.api_url().to_string(),
            session,
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Maps a non-2xx response to an error. 401 clears the session and
    /// raises the logout signal before reporting.
    async fn fail(&self, resp: Response) -> ApiError {
        if resp.status() == 401 {
            self.session.expire();
            return ApiError::Unauthorized;
        }
        let status = resp.status();
        match resp.json::<ApiErrorBody>().await {
            Ok(ApiErrorBody { detail: Some(detail) }) => ApiError::Server(detail),
            _ => ApiError::Http(status),
        }
    }

    async fn read_ok(&self, resp: Response) -> Result<Response> {
        if resp.ok() {
            Ok(resp)
        } else {
            Err(self.fail(resp).await)
        }
    }

    /// GET returning the raw JSON value; the resource cache stores these.
    pub async fn get_value(&self, path: &str) -> Result<Value> {
        let resp = self
            .authorize(Request::get(&self.endpoint(path)))
            .send()
            .await?;
        let resp = self.read_ok(resp).await?;
        resp.json::<Value>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// GET decoded straight into a typed value.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self
            .authorize(Request::get(&self.endpoint(path)))
            .send()
            .await?;
        let resp = self.read_ok(resp).await?;
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let resp = self
            .authorize(Request::post(&self.endpoint(path)))
            .json(body)?
            .send()
            .await?;
        self.read_ok(resp).await.map(|_| ())
    }

    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let resp = self
            .authorize(Request::put(&self.endpoint(path)))
            .json(body)?
            .send()
            .await?;
        self.read_ok(resp).await.map(|_| ())
    }

    /// Soft delete: the server flips `ativo` off, nothing is purged.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let resp = self
            .authorize(Request::delete(&self.endpoint(path)))
            .send()
            .await?;
        self.read_ok(resp).await.map(|_| ())
    }

    // ------------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------------

    /// Logs in and begins the stored session on success.
    pub async fn login(&self, email: &str, senha: &str) -> Result<LoginResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            senha: senha.to_string(),
        };
        let resp = Request::post(&self.endpoint("/auth/login"))
            .json(&body)?
            .send()
            .await?;
        let resp = self.read_ok(resp).await?;
        let login: LoginResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        self.session
            .start(&login.token, &PerfilUsuario::from(&login.usuario));
        Ok(login)
    }

    pub async fn register(&self, body: &RegisterRequest) -> Result<()> {
        let resp = Request::post(&self.endpoint("/auth/register"))
            .json(body)?
            .send()
            .await?;
        self.read_ok(resp).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryStore, SessionContext};
    use std::rc::Rc;

    #[test]
    fn test_cache_keys() {
        assert_eq!(page_key("vendedor", 0, 10), "/vendedor?page=0&items=10");
        assert_eq!(count_key("materia-prima"), "/materia-prima/count");
        assert_eq!(entity_key("vendedor", "42"), "/vendedor/42");
        assert_eq!(collection_key("produto"), "/produto");
    }

    #[test]
    fn test_endpoint_joins_base_and_path() {
        let config = DashboardConfig {
            api_url: "http://localhost:8080".into(),
            version: None,
        };
        let client = ApiClient::new(&config, SessionContext::new(Rc::new(MemoryStore::default())));
        assert_eq!(
            client.endpoint("/vendedor/42"),
            "http://localhost:8080/vendedor/42"
        );
    }

    #[test]
    fn test_user_message_prefers_server_detail() {
        assert_eq!(
            ApiError::Server("Estoque insuficiente".into()).user_message(),
            "Estoque insuficiente"
        );
        assert_eq!(ApiError::Http(500).user_message(), MSG_GENERIC_FAILURE);
        assert_eq!(
            ApiError::Network("timeout".into()).user_message(),
            MSG_GENERIC_FAILURE
        );
    }
}
