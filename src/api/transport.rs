// ============================================================================
// Transport HTTP
// ============================================================================
// Sépare "envoyer une requête" de "interpréter la réponse" :
// - HttpTransport : implémentation reqwest vers le vrai backend
// - MockTransport (tests) : réponses scriptées, requêtes enregistrées
//
// CONCEPT RUST : Trait avec méthode async (return-position impl Trait)
// - fn execute(...) -> impl Future<Output = ...> + Send
// - Pas de Box<dyn Future> : le client est générique sur le transport
// ============================================================================

use std::future::Future;
use std::time::Duration;

use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;

/// Requête décrite indépendamment du client HTTP
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Chemin absolu côté serveur (ex: "/api/user/login")
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Jeton à envoyer en "Authorization: Bearer <jeton>"
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query(mut self, params: Vec<(String, String)>) -> Self {
        self.query = params;
        self
    }

    pub fn bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }
}

/// Réponse brute : statut + corps texte
///
/// Le corps reste en texte car certains endpoints renvoient
/// une chaîne nue (jeton, nom) au lieu de JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Envoie une requête et retourne la réponse brute
///
/// Un statut HTTP d'erreur n'est PAS une erreur de transport :
/// l'interprétation (401, 500, ...) appartient au client.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send;
}

// ============================================================================
// HttpTransport : implémentation reqwest
// ============================================================================

/// Transport réel vers l'adresse de base de l'API
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Crée le client HTTP unique de l'application
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("lazybank/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(Box::new(e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url(&request.path);
        debug!(method = %request.method, url = %url, authenticated = request.bearer.is_some(), "Sending HTTP request");

        let mut builder = self.client.request(request.method, &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(Box::new(e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(Box::new(e)))?;

        debug!(status, bytes = body.len(), "Received HTTP response");
        Ok(ApiResponse { status, body })
    }
}

// ============================================================================
// MockTransport : transport scripté pour les tests
// ============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let transport = HttpTransport::new("http://localhost:8080/", Duration::from_secs(5)).unwrap();
        assert_eq!(transport.url("/api/user/login"), "http://localhost:8080/api/user/login");
    }

    #[test]
    fn test_request_builder() {
        let request = ApiRequest::new(Method::GET, "/bankStatement")
            .query(vec![("accountNumber".to_string(), "1".to_string())])
            .bearer(Some("tok".to_string()));
        assert_eq!(request.query.len(), 1);
        assert_eq!(request.bearer.as_deref(), Some("tok"));
        assert!(request.body.is_none());
    }

    #[test]
    fn test_response_success_range() {
        assert!(ApiResponse::new(200, "").is_success());
        assert!(ApiResponse::new(204, "").is_success());
        assert!(!ApiResponse::new(401, "").is_success());
        assert!(!ApiResponse::new(500, "").is_success());
    }
}
