// ============================================================================
// Session Store
// ============================================================================
// Source unique de vérité pour l'authentification :
// - construit une fois au démarrage, passé explicitement (pas de global)
// - le jeton vit dans le stockage local, la session en garde une copie
// - invariant : is_authenticated == true  =>  jeton non vide stocké
//
// CONCEPT RUST : Mutex jamais tenu pendant un .await
// - On attend la réponse réseau SANS verrou
// - Puis une seule affectation de l'état sous verrou
// ============================================================================

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, instrument, warn};

use crate::api::{BankClient, HttpTransport, Transport};
use crate::error::Result;
use crate::models::{AuthenticatedUser, LoginRequest};
use crate::storage::{LocalStorage, ACCOUNT_NUMBER_KEY, PROFILE_PIC_KEY, TOKEN_KEY};

/// État d'authentification observé par les écrans
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub is_authenticated: bool,
    pub token: Option<String>,
    /// Réponse du login ; absente après un restore()
    pub user: Option<AuthenticatedUser>,
}

/// Détient la session courante et la fait évoluer
pub struct SessionStore<T: Transport = HttpTransport> {
    client: Arc<BankClient<T>>,
    storage: Arc<LocalStorage>,
    state: Mutex<Session>,
}

impl<T: Transport> SessionStore<T> {
    /// Session vide ; appeler restore() pour reprendre un jeton stocké
    pub fn new(client: Arc<BankClient<T>>) -> Self {
        let storage = client.storage().clone();
        Self {
            client,
            storage,
            state: Mutex::new(Session::default()),
        }
    }

    pub fn client(&self) -> &Arc<BankClient<T>> {
        &self.client
    }

    /// Connexion : en cas d'échec l'état reste inchangé
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser> {
        let request = LoginRequest::new(email, password);

        // Le jeton est déjà stocké par le client quand login() réussit
        let user = self.client.login(&request).await?;

        if let Some(account_number) = user.account_number() {
            if let Err(e) = self.storage.set(ACCOUNT_NUMBER_KEY, account_number) {
                warn!(error = %e, "Failed to persist account number");
            }
        }

        *self.lock() = Session {
            is_authenticated: true,
            token: user.token.clone(),
            user: Some(user.clone()),
        };
        info!(account = ?user.account_number(), "Session authenticated");
        Ok(user)
    }

    /// Déconnexion locale (aucun appel réseau)
    ///
    /// L'état mémoire est vidé même si le stockage échoue ; la première
    /// erreur de stockage est alors retournée.
    pub fn logout(&self) -> Result<()> {
        *self.lock() = Session::default();

        let mut first_error = None;
        for key in [TOKEN_KEY, ACCOUNT_NUMBER_KEY, PROFILE_PIC_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "Failed to clear storage key");
                first_error.get_or_insert(e);
            }
        }

        info!("Logged out");
        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    /// Reprend un jeton stocké au démarrage, sans le vérifier
    ///
    /// Retourne true si une session a été restaurée. Un jeton expiré sera
    /// détecté au premier 401.
    pub fn restore(&self) -> bool {
        match self.storage.token() {
            Some(token) => {
                *self.lock() = Session {
                    is_authenticated: true,
                    token: Some(token),
                    user: None,
                };
                info!("Session restored from storage");
                true
            }
            None => {
                debug!("No stored token, starting unauthenticated");
                false
            }
        }
    }

    /// Copie de la session courante
    ///
    /// Si le jeton a disparu du stockage (401), la session est d'abord
    /// ramenée à l'état vide.
    pub fn session(&self) -> Session {
        let mut state = self.lock();
        if state.is_authenticated && self.storage.token().is_none() {
            debug!("Stored token gone, clearing session");
            *state = Session::default();
        }
        state.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated
    }

    /// Vide l'état mémoire après une redirection 401
    pub fn invalidate(&self) {
        *self.lock() = Session::default();
        info!("Session invalidated");
    }

    /// Compte à afficher : stockage d'abord, puis la réponse du login
    pub fn account_number(&self) -> Option<String> {
        self.storage
            .get(ACCOUNT_NUMBER_KEY)
            .filter(|n| !n.trim().is_empty())
            .or_else(|| {
                self.lock()
                    .user
                    .as_ref()
                    .and_then(|u| u.account_number().map(str::to_string))
            })
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
