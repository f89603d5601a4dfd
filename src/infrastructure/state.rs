use crate::domain::addresses::AddressRepository;
use crate::domain::auth::AuthService;
use crate::domain::contacts::ContactRepository;
use crate::domain::images::ImageStore;
use crate::domain::mailer::Mailer;
use crate::domain::password::PasswordHashingService;
use crate::domain::users::UserRepository;
use crate::infrastructure::auth::JwtAuthService;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::password::PasswordService;
use crate::infrastructure::repositories::addresses::PostgresAddressRepository;
use crate::infrastructure::repositories::contacts::PostgresContactRepository;
use crate::infrastructure::repositories::users::PostgresUserRepository;
use crate::infrastructure::{images, mailer};
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepository>,
    pub contacts: Arc<dyn ContactRepository>,
    pub addresses: Arc<dyn AddressRepository>,
    pub auth_service: Arc<dyn AuthService>,
    pub password_service: Arc<dyn PasswordHashingService>,
    pub mailer: Arc<dyn Mailer>,
    pub image_store: Arc<dyn ImageStore>,
    pub cookie_key: Key,
}

/// Collaborators handed to `AppState::new`.
pub struct Services {
    pub users: Arc<dyn UserRepository>,
    pub contacts: Arc<dyn ContactRepository>,
    pub addresses: Arc<dyn AddressRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub image_store: Arc<dyn ImageStore>,
}

impl AppState {
    pub fn new(config: AppConfig, services: Services) -> anyhow::Result<Self> {
        let auth_service = JwtAuthService::from_config(&config.jwt)?;
        let cookie_key = cookie_key(&config.cookie_secret);

        Ok(Self {
            config: Arc::new(config),
            users: services.users,
            contacts: services.contacts,
            addresses: services.addresses,
            auth_service: Arc::new(auth_service),
            password_service: Arc::new(PasswordService::new()),
            mailer: services.mailer,
            image_store: services.image_store,
            cookie_key,
        })
    }

    /// Wire the Postgres repositories and outbound HTTP collaborators.
    pub fn postgres(config: AppConfig, pool: DbPool) -> anyhow::Result<Self> {
        let http = build_http_client(15)?;
        let services = Services {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            contacts: Arc::new(PostgresContactRepository::new(pool.clone())),
            addresses: Arc::new(PostgresAddressRepository::new(pool)),
            mailer: mailer::from_config(&config.mail, http.clone()),
            image_store: images::from_config(config.cloudinary.as_ref(), http),
        };
        Self::new(config, services)
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Derive the 64-byte cookie signing key from an arbitrary-length secret.
pub fn cookie_key(secret: &str) -> Key {
    Key::from(Sha512::digest(secret.as_bytes()).as_slice())
}

fn build_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(concat!("addressbook/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))
}
