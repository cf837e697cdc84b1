//! Service container - wires repositories into services.

use std::sync::Arc;

use super::{AuthService, Authenticator, UserManager, UserService};
use crate::config::Config;
use crate::infra::UserStore;

/// Centralized access to all application services.
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
}

impl Services {
    /// Create a service container from already-built services
    pub fn new(auth_service: Arc<dyn AuthService>, user_service: Arc<dyn UserService>) -> Self {
        Self {
            auth_service,
            user_service,
        }
    }

    /// Create a service container from a database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let repo = Arc::new(UserStore::new(db));
        let auth_service = Arc::new(Authenticator::new(repo.clone(), config));
        let user_service = Arc::new(UserManager::new(repo));

        Self {
            auth_service,
            user_service,
        }
    }

    /// Get authentication service
    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    /// Get user service
    pub fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }
}
