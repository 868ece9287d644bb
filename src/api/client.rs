// ============================================================================
// API Client : passerelle vers le backend bancaire
// ============================================================================
// Un seul client, configuré avec l'adresse de base de l'API :
// - attache "Authorization: Bearer <jeton>" quand un jeton est stocké
// - traite tout HTTP 401 comme "session invalide" : jeton supprimé,
//   hook de redirection vers le login, et l'appel échoue quand même
// - normalise les formes de réponse incohérentes (voir normalize.rs)
//
// Politique d'erreur :
// - lectures (solde, nom, relevé, transactions) : dégradées en valeurs
//   par défaut, sauf 401 qui remonte toujours
// - écritures (login, crédit, débit, virement, profil) : propagées,
//   un mouvement d'argent raté ne doit jamais passer inaperçu
// ============================================================================

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::api::normalize::{self, LoginShape, Payload};
use crate::api::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    AccountBalanceResult, AuthenticatedUser, BankResponse, CreditDebitRequest, EnquiryRequest,
    LoginRequest, PasswordChange, ProfileUpdate, StatementRequest, Transaction, TransferRequest,
    UserProfile, UserRegistration, SUCCESS_CODE,
};
use crate::storage::{LocalStorage, TOKEN_KEY};
use crate::validation::Validate;

const CREATE_ACCOUNT_PATH: &str = "/api/user";
const LOGIN_PATH: &str = "/api/user/login";
const BALANCE_ENQUIRY_PATH: &str = "/api/user/balanceEnquiry";
const NAME_ENQUIRY_PATH: &str = "/api/user/nameEnquiry";
const CREDIT_PATH: &str = "/api/user/credit";
const DEBIT_PATH: &str = "/api/user/debit";
const TRANSFER_PATH: &str = "/api/user/transfer";
const STATEMENT_PATH: &str = "/bankStatement";
const TRANSACTIONS_PATH: &str = "/api/user/transactions";
const PROFILE_PATH: &str = "/api/user/profile";
const CHANGE_PASSWORD_PATH: &str = "/api/user/changePassword";

/// Appelé à chaque HTTP 401, après suppression du jeton
///
/// Le front-end s'en sert pour revenir à l'écran de connexion.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// Client de l'API bancaire
///
/// CONCEPT RUST : Paramètre générique avec valeur par défaut
/// - BankClient == BankClient<HttpTransport> dans le code applicatif
/// - Les tests utilisent BankClient<MockTransport>
pub struct BankClient<T: Transport = HttpTransport> {
    transport: T,
    storage: Arc<LocalStorage>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl BankClient<HttpTransport> {
    /// Client HTTP réel configuré depuis la configuration
    pub fn connect(config: &Config, storage: Arc<LocalStorage>) -> Result<Self> {
        let transport = HttpTransport::new(&config.api_url, config.timeout)?;
        info!(api_url = %config.api_url, "Bank API client ready");
        Ok(Self::new(transport, storage))
    }
}

impl<T: Transport> BankClient<T> {
    pub fn new(transport: T, storage: Arc<LocalStorage>) -> Self {
        Self {
            transport,
            storage,
            on_unauthorized: None,
        }
    }

    /// Enregistre le hook de redirection vers le login
    pub fn with_unauthorized_hook(mut self, hook: UnauthorizedHook) -> Self {
        self.on_unauthorized = Some(hook);
        self
    }

    pub fn storage(&self) -> &Arc<LocalStorage> {
        &self.storage
    }

    // ========================================================================
    // Authentification
    // ========================================================================

    /// Connexion : retourne toujours une réponse structurée avec le jeton
    ///
    /// Le jeton est stocké avant de rendre la main (il écrase le précédent).
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthenticatedUser> {
        request.validate()?;

        let response = self.post(LOGIN_PATH, request).await?;
        let payload = Payload::parse(&response.body);

        let (token, account_info) = match normalize::classify_login(&payload) {
            LoginShape::BareToken(token) => (token, None),
            LoginShape::Structured {
                token,
                account_info,
            }
            | LoginShape::LegacyMessageToken {
                token,
                account_info,
            } => (token, account_info),
            LoginShape::Rejected { code, message } => {
                warn!(code = %code, "Login rejected by server");
                return Err(ApiError::Rejected { code, message });
            }
            LoginShape::Unrecognized => {
                error!("Login response carried no token");
                return Err(ApiError::MissingToken);
            }
        };

        self.storage.set(TOKEN_KEY, &token)?;
        info!(token_len = token.len(), "Login succeeded, token stored");

        Ok(BankResponse {
            response_code: SUCCESS_CODE.to_string(),
            response_message: "Login successful".to_string(),
            token: Some(token),
            account_info,
        })
    }

    /// Création de compte (inscription)
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn create_account(&self, registration: &UserRegistration) -> Result<BankResponse> {
        registration.validate()?;
        let response = self.post(CREATE_ACCOUNT_PATH, registration).await?;
        decode(CREATE_ACCOUNT_PATH, &response)
    }

    // ========================================================================
    // Lectures (dégradées en valeurs par défaut)
    // ========================================================================

    /// Solde du compte ; "solde inconnu" plutôt qu'une erreur de forme
    #[instrument(skip(self, request), fields(account = %request.account_number))]
    pub async fn balance_enquiry(&self, request: &EnquiryRequest) -> Result<AccountBalanceResult> {
        request.validate()?;

        let result = self
            .post(BALANCE_ENQUIRY_PATH, request)
            .await
            .map(|response| normalize::normalize_balance(&Payload::parse(&response.body), &request.account_number));

        degrade(result, "balance enquiry", || AccountBalanceResult::unknown(&request.account_number))
    }

    /// Nom du titulaire ; chaîne vide si indisponible
    #[instrument(skip(self, request), fields(account = %request.account_number))]
    pub async fn name_enquiry(&self, request: &EnquiryRequest) -> Result<String> {
        request.validate()?;

        let result = self
            .post(NAME_ENQUIRY_PATH, request)
            .await
            .map(|response| normalize::normalize_name(&Payload::parse(&response.body)));

        degrade(result, "name enquiry", String::new)
    }

    /// Relevé sur une période : toujours une liste plate
    #[instrument(skip(self, request), fields(account = %request.account_number, start = %request.start_date, end = %request.end_date))]
    pub async fn get_bank_statement(&self, request: &StatementRequest) -> Result<Vec<Transaction>> {
        request.validate()?;

        let api_request = ApiRequest::new(Method::GET, STATEMENT_PATH).query(request.query_params());
        let result = self
            .send(api_request)
            .await
            .map(|response| normalize::normalize_statement(&Payload::parse(&response.body)));

        let mut transactions = degrade(result, "bank statement", Vec::new)?;

        // Le serveur peut déborder de la période : on s'en tient aux bornes
        // demandées (une ligne sans date lisible est conservée)
        let received = transactions.len();
        transactions.retain(|t| t.timestamp().map_or(true, |at| request.contains(at)));
        debug!(count = transactions.len(), dropped = received - transactions.len(), "Statement normalized");
        Ok(transactions)
    }

    /// Toutes les transactions de l'utilisateur (vue analytique)
    #[instrument(skip(self))]
    pub async fn get_transactions(&self) -> Result<Vec<Transaction>> {
        let result = self
            .send(ApiRequest::new(Method::GET, TRANSACTIONS_PATH))
            .await
            .map(|response| normalize::normalize_statement(&Payload::parse(&response.body)));

        degrade(result, "transactions", Vec::new)
    }

    // ========================================================================
    // Écritures (erreurs propagées)
    // ========================================================================

    #[instrument(skip(self, request), fields(account = %request.account_number, amount = request.amount))]
    pub async fn credit_account(&self, request: &CreditDebitRequest) -> Result<BankResponse> {
        request.validate()?;
        let response = self.post(CREDIT_PATH, request).await?;
        log_outcome("credit", decode(CREDIT_PATH, &response))
    }

    #[instrument(skip(self, request), fields(account = %request.account_number, amount = request.amount))]
    pub async fn debit_account(&self, request: &CreditDebitRequest) -> Result<BankResponse> {
        request.validate()?;
        let response = self.post(DEBIT_PATH, request).await?;
        log_outcome("debit", decode(DEBIT_PATH, &response))
    }

    #[instrument(
        skip(self, request),
        fields(from = %request.source_account_number, to = %request.destination_account_number, amount = request.amount)
    )]
    pub async fn transfer(&self, request: &TransferRequest) -> Result<BankResponse> {
        request.validate()?;
        let response = self.post(TRANSFER_PATH, request).await?;
        log_outcome("transfer", decode(TRANSFER_PATH, &response))
    }

    // ========================================================================
    // Profil
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn get_profile(&self) -> Result<UserProfile> {
        let response = self.send(ApiRequest::new(Method::GET, PROFILE_PATH)).await?;
        decode(PROFILE_PATH, &response)
    }

    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        update.validate()?;
        let body = to_json(PROFILE_PATH, update)?;
        let response = self
            .send(ApiRequest::new(Method::PUT, PROFILE_PATH).json(body))
            .await?;
        info!("Profile updated");
        decode(PROFILE_PATH, &response)
    }

    #[instrument(skip(self, change))]
    pub async fn change_password(&self, change: &PasswordChange) -> Result<BankResponse> {
        change.validate()?;
        let response = self.post(CHANGE_PASSWORD_PATH, change).await?;
        log_outcome("change password", decode(CHANGE_PASSWORD_PATH, &response))
    }

    // ========================================================================
    // Plomberie HTTP
    // ========================================================================

    async fn post<B: Serialize>(&self, path: &'static str, body: &B) -> Result<ApiResponse> {
        let body = to_json(path, body)?;
        self.send(ApiRequest::new(Method::POST, path).json(body)).await
    }

    /// Envoie la requête avec le jeton courant et interprète le statut
    ///
    /// idle → in-flight → succès | échec (401 : session invalidée)
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let path = request.path.clone();
        let request = request.bearer(self.storage.token());

        let response = self.transport.execute(request).await?;

        match response.status {
            401 => {
                warn!(path = %path, "Server answered 401, invalidating session");
                self.invalidate_session();
                Err(ApiError::Unauthorized)
            }
            status if !response.is_success() => {
                let message = normalize::error_message(&response.body);
                warn!(path = %path, status, message = %message, "Request failed");
                Err(ApiError::Status { status, message })
            }
            _ => Ok(response),
        }
    }

    /// Supprime le jeton stocké puis déclenche la redirection
    fn invalidate_session(&self) {
        match self.storage.remove(TOKEN_KEY) {
            Ok(true) => info!("Stored token removed"),
            Ok(false) => debug!("No stored token to remove"),
            Err(e) => error!(error = %e, "Failed to remove stored token"),
        }
        if let Some(hook) = &self.on_unauthorized {
            hook();
        }
    }
}

/// Lecture dégradée : toute erreur sauf 401 devient la valeur par défaut
fn degrade<V>(result: Result<V>, operation: &str, fallback: impl FnOnce() -> V) -> Result<V> {
    match result {
        Err(ApiError::Unauthorized) => Err(ApiError::Unauthorized),
        Err(e) => {
            warn!(operation, error = %e, "Read failed, using default value");
            Ok(fallback())
        }
        ok => ok,
    }
}

fn log_outcome(operation: &str, result: Result<BankResponse>) -> Result<BankResponse> {
    match &result {
        Ok(response) if response.is_success() => info!(operation, "Operation succeeded"),
        Ok(response) => warn!(
            operation,
            code = %response.response_code,
            message = %response.response_message,
            "Operation refused by server"
        ),
        Err(e) => error!(operation, error = %e, "Operation failed"),
    }
    result
}

fn to_json<B: Serialize>(endpoint: &'static str, body: &B) -> Result<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode {
        endpoint,
        message: e.to_string(),
    })
}

fn decode<D: DeserializeOwned>(endpoint: &'static str, response: &ApiResponse) -> Result<D> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode {
        endpoint,
        message: e.to_string(),
    })
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDate;

    use super::*;
    use crate::api::transport::mock::MockTransport;

    fn client(transport: MockTransport) -> BankClient<MockTransport> {
        BankClient::new(transport, Arc::new(LocalStorage::in_memory()))
    }

    fn counting_hook() -> (UnauthorizedHook, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let hook: UnauthorizedHook = Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (hook, count)
    }

    fn transfer(amount: f64) -> TransferRequest {
        TransferRequest {
            source_account_number: "2024000001".to_string(),
            destination_account_number: "2024000002".to_string(),
            amount,
        }
    }

    // CONCEPT RUST : #[tokio::test]
    // - Crée un runtime tokio pour le test
    // - Permet d'utiliser .await directement
    #[tokio::test]
    async fn test_login_with_bare_token() {
        let api = client(MockTransport::new().reply(200, "tok123"));

        let user = api.login(&LoginRequest::new("a@b.com", "secret")).await.unwrap();

        assert_eq!(user.token.as_deref(), Some("tok123"));
        assert!(user.is_success());
        assert_eq!(api.storage().token().as_deref(), Some("tok123"));

        let sent = &api.transport.requests()[0];
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.path, LOGIN_PATH);
        assert_eq!(sent.body.as_ref().unwrap()["email"], "a@b.com");
    }

    #[tokio::test]
    async fn test_login_with_legacy_and_structured_shapes() {
        let api = client(
            MockTransport::new()
                .reply(200, r#"{"responseCode":"Login Success","responseMessage":"legacy-tok"}"#)
                .reply(200, r#"{"token":"new-tok","accountInfo":{"accountNumber":"2024000001"}}"#),
        );

        let legacy = api.login(&LoginRequest::new("a@b.com", "secret")).await.unwrap();
        assert_eq!(legacy.token.as_deref(), Some("legacy-tok"));

        let structured = api.login(&LoginRequest::new("a@b.com", "secret")).await.unwrap();
        assert_eq!(structured.account_number(), Some("2024000001"));
        // Un seul jeton stocké : le dernier
        assert_eq!(api.storage().token().as_deref(), Some("new-tok"));
    }

    #[tokio::test]
    async fn test_login_rejected_keeps_storage_untouched() {
        let api = client(
            MockTransport::new().reply(200, r#"{"responseCode":"01","responseMessage":"Invalid credentials"}"#),
        );

        let err = api.login(&LoginRequest::new("a@b.com", "wrong-pass")).await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected { .. }));
        assert!(api.storage().token().is_none());
    }

    #[tokio::test]
    async fn test_login_without_token_fails() {
        let api = client(MockTransport::new().reply(200, "{}"));
        let err = api.login(&LoginRequest::new("a@b.com", "secret")).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingToken));
    }

    #[tokio::test]
    async fn test_invalid_login_form_sends_nothing() {
        let api = client(MockTransport::new().reply(200, "tok123"));
        let err = api.login(&LoginRequest::new("not-an-email", "")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(api.transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_bearer_header_follows_stored_token() {
        let api = client(MockTransport::new().reply(200, "Ada").reply(200, "Ada"));
        let enquiry = EnquiryRequest::new("2024000001");

        api.name_enquiry(&enquiry).await.unwrap();
        api.storage().set(TOKEN_KEY, "tok123").unwrap();
        api.name_enquiry(&enquiry).await.unwrap();

        let requests = api.transport.requests();
        assert_eq!(requests[0].bearer, None);
        assert_eq!(requests[1].bearer.as_deref(), Some("tok123"));
    }

    #[tokio::test]
    async fn test_login_with_failed_token_write_leaves_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("data");
        let storage = Arc::new(LocalStorage::open(folder.join(crate::storage::STORAGE_FILE)).unwrap());
        std::fs::remove_dir_all(&folder).unwrap();

        let api = BankClient::new(MockTransport::new().reply(200, "tok123").reply(200, "Ada"), storage);

        let err = api.login(&LoginRequest::new("a@b.com", "secret")).await.unwrap_err();
        assert!(matches!(err, ApiError::Storage(_)));
        assert!(api.storage().token().is_none());

        api.name_enquiry(&EnquiryRequest::new("2024000001")).await.unwrap();
        assert_eq!(api.transport.requests()[1].bearer, None);
    }

    #[tokio::test]
    async fn test_unauthorized_clears_token_once_and_redirects() {
        let (hook, redirects) = counting_hook();
        let api = client(MockTransport::new().reply(401, "")).with_unauthorized_hook(hook);
        api.storage().set(TOKEN_KEY, "expired").unwrap();

        let err = api.get_profile().await.unwrap_err();

        assert!(err.is_unauthorized());
        assert!(api.storage().token().is_none());
        assert_eq!(redirects.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unauthorized_propagates_from_read_operations() {
        let (hook, redirects) = counting_hook();
        let api = client(MockTransport::new().reply(401, "").reply(401, ""))
            .with_unauthorized_hook(hook);
        api.storage().set(TOKEN_KEY, "expired").unwrap();

        let balance = api.balance_enquiry(&EnquiryRequest::new("2024000001")).await;
        assert!(matches!(balance, Err(ApiError::Unauthorized)));

        let statement = api.get_transactions().await;
        assert!(matches!(statement, Err(ApiError::Unauthorized)));

        assert_eq!(redirects.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_balance_shapes_yield_same_value() {
        let api = client(
            MockTransport::new()
                .reply(200, "2500.5")
                .reply(200, r#"{"accountBalance": 2500.5}"#)
                .reply(200, r#"{"responseCode":"004","responseMessage":"Found","accountInfo":{"accountBalance":2500.5}}"#),
        );
        let enquiry = EnquiryRequest::new("2024000001");

        for _ in 0..3 {
            let result = api.balance_enquiry(&enquiry).await.unwrap();
            assert_eq!(result.balance(), Some(2500.5));
        }
    }

    #[tokio::test]
    async fn test_balance_degrades_on_failures() {
        let api = client(MockTransport::new().reply(500, "boom").offline().reply(200, "n/a"));
        let enquiry = EnquiryRequest::new("2024000001");

        for _ in 0..3 {
            let result = api.balance_enquiry(&enquiry).await.unwrap();
            assert_eq!(result.balance(), None);
            assert_eq!(result.account_info.account_number.as_deref(), Some("2024000001"));
        }
    }

    #[tokio::test]
    async fn test_name_enquiry_degrades_to_empty() {
        let api = client(MockTransport::new().offline());
        let name = api.name_enquiry(&EnquiryRequest::new("2024000001")).await.unwrap();
        assert_eq!(name, "");
    }

    #[tokio::test]
    async fn test_statement_request_and_shapes() {
        let list = r#"[{"id":1,"accountNumber":"2024000001","transactionType":"CREDIT","amount":10,"createdAt":"2024-01-05T10:00:00","status":"SUCCESS"}]"#;
        let api = client(
            MockTransport::new()
                .reply(200, list)
                .reply(200, &format!(r#"{{"transactions":{}}}"#, list))
                .reply(200, &format!(r#"{{"data":{{"transactions":{}}}}}"#, list))
                .reply(200, r#"{"unexpected":true}"#)
                .offline(),
        );
        let request = StatementRequest::new(
            "2024000001",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );

        let first = api.get_bank_statement(&request).await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(api.get_bank_statement(&request).await.unwrap(), first);
        assert_eq!(api.get_bank_statement(&request).await.unwrap(), first);
        assert!(api.get_bank_statement(&request).await.unwrap().is_empty());
        assert!(api.get_bank_statement(&request).await.unwrap().is_empty());

        let sent = &api.transport.requests()[0];
        assert_eq!(sent.method, Method::GET);
        assert_eq!(sent.path, STATEMENT_PATH);
        assert!(sent.query.contains(&("startDate".to_string(), "2024-01-01".to_string())));
        assert!(sent.body.is_none());
    }

    #[tokio::test]
    async fn test_statement_keeps_only_requested_period() {
        let body = r#"[
            {"id":1,"transactionType":"CREDIT","amount":10,"createdAt":"2024-01-01T00:00:00"},
            {"id":2,"transactionType":"DEBIT","amount":5,"createdAt":"2024-01-31T23:59:59"},
            {"id":3,"transactionType":"DEBIT","amount":7,"createdAt":"2024-02-01T00:00:00"},
            {"id":4,"transactionType":"CREDIT","amount":3,"createdAt":"2023-12-31T23:59:59"},
            {"id":5,"transactionType":"CREDIT","amount":1}
        ]"#;
        let api = client(MockTransport::new().reply(200, body));
        let request = StatementRequest::new(
            "2024000001",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );

        let transactions = api.get_bank_statement(&request).await.unwrap();
        let amounts: Vec<f64> = transactions.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![10.0, 5.0, 1.0]);
    }

    #[tokio::test]
    async fn test_transfer_with_non_positive_amount_sends_nothing() {
        let api = client(MockTransport::new());
        for amount in [0.0, -10.0] {
            let err = api.transfer(&transfer(amount)).await.unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)));
        }
        assert_eq!(api.transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_transfer_business_failure_is_returned() {
        let api = client(
            MockTransport::new().reply(200, r#"{"responseCode":"008","responseMessage":"Insufficient balance"}"#),
        );
        let response = api.transfer(&transfer(5000.0)).await.unwrap();
        assert!(!response.is_success());
        assert_eq!(response.response_message, "Insufficient balance");
    }

    #[tokio::test]
    async fn test_write_operations_propagate_errors() {
        let api = client(MockTransport::new().offline().reply(500, r#"{"message":"db down"}"#).reply(200, "not json"));
        let request = CreditDebitRequest {
            account_number: "2024000001".to_string(),
            amount: 100.0,
        };

        assert!(matches!(api.credit_account(&request).await, Err(ApiError::Transport(_))));
        match api.debit_account(&request).await {
            Err(ApiError::Status { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "db down");
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(api.credit_account(&request).await, Err(ApiError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_update_profile_sends_partial_put() {
        let api = client(MockTransport::new().reply(200, r#"{"firstName":"Ada","lastName":"King","darkMode":true}"#));
        let update = ProfileUpdate {
            dark_mode: Some(true),
            ..Default::default()
        };

        let profile = api.update_profile(&update).await.unwrap();
        assert_eq!(profile.full_name(), "Ada King");

        let sent = &api.transport.requests()[0];
        assert_eq!(sent.method, Method::PUT);
        assert_eq!(sent.body, Some(serde_json::json!({"darkMode": true})));
    }

    #[tokio::test]
    async fn test_get_profile_accepts_null_fields() {
        let api = client(MockTransport::new().reply(
            200,
            r#"{"firstName":"Ada","lastName":"Lovelace","gender":null,"status":null,"email":"a@b.com"}"#,
        ));

        let profile = api.get_profile().await.unwrap();
        assert_eq!(profile.full_name(), "Ada Lovelace");
        assert_eq!(profile.gender, "");
        assert_eq!(api.transport.requests()[0].method, Method::GET);
    }

    #[tokio::test]
    async fn test_change_password_mismatch_sends_nothing() {
        let api = client(MockTransport::new());
        let change = PasswordChange {
            old_password: "old-secret".to_string(),
            new_password: "new-secret".to_string(),
            confirm_password: "typo".to_string(),
        };
        assert!(api.change_password(&change).await.is_err());
        assert_eq!(api.transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_account_returns_bank_response() {
        let api = client(MockTransport::new().reply(
            200,
            r#"{"responseCode":"002","responseMessage":"Account has been successfully created!","accountInfo":{"accountNumber":"2024000009"}}"#,
        ));
        let registration = UserRegistration {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            gender: "F".to_string(),
            address: "12 Analytical St".to_string(),
            state: "London".to_string(),
            email: "ada@example.com".to_string(),
            password: "engine1".to_string(),
            phone_number: "0123456789".to_string(),
            status: UserRegistration::ACTIVE.to_string(),
        };

        let response = api.create_account(&registration).await.unwrap();
        assert_eq!(response.account_number(), Some("2024000009"));
        assert_eq!(api.transport.requests()[0].path, CREATE_ACCOUNT_PATH);
    }
}
