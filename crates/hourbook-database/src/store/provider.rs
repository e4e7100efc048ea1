//! Store bundle selected by configuration.

use std::sync::Arc;

use tracing::info;

use hourbook_core::config::{DatabaseConfig, DatabaseProvider};
use hourbook_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::migration::run_migrations;
use crate::repositories::{
    ClassRepository, EnrollmentRepository, HoursRepository, MessageRepository,
    NotificationRepository, RegistrationRepository, UserRepository,
};

use super::traits::{
    ClassStore, EnrollmentStore, HoursStore, MessageStore, NotificationStore, RegistrationStore,
    UserStore,
};

/// Every store the services need, backed by one provider.
#[derive(Debug, Clone)]
pub struct Store {
    pub users: Arc<dyn UserStore>,
    pub classes: Arc<dyn ClassStore>,
    pub enrollments: Arc<dyn EnrollmentStore>,
    pub registrations: Arc<dyn RegistrationStore>,
    pub hours: Arc<dyn HoursStore>,
    pub messages: Arc<dyn MessageStore>,
    pub notifications: Arc<dyn NotificationStore>,
    backend: Backend,
}

#[derive(Debug, Clone)]
enum Backend {
    Postgres(DatabasePool),
    Memory,
}

impl Store {
    /// Build the store for the configured provider.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        info!(provider = %config.provider, "Initializing store");

        match config.provider {
            DatabaseProvider::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
            DatabaseProvider::Memory => {
                info!("Using in-memory store; data is lost on shutdown");
                Ok(Self::memory())
            }
        }
    }

    /// Store backed by PostgreSQL repositories.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pg.clone())),
            classes: Arc::new(ClassRepository::new(pg.clone())),
            enrollments: Arc::new(EnrollmentRepository::new(pg.clone())),
            registrations: Arc::new(RegistrationRepository::new(pg.clone())),
            hours: Arc::new(HoursRepository::new(pg.clone())),
            messages: Arc::new(MessageRepository::new(pg.clone())),
            notifications: Arc::new(NotificationRepository::new(pg)),
            backend: Backend::Postgres(pool),
        }
    }

    /// Store kept entirely in process memory.
    pub fn memory() -> Self {
        let mem = MemoryStore::new();
        Self {
            users: Arc::new(mem.clone()),
            classes: Arc::new(mem.clone()),
            enrollments: Arc::new(mem.clone()),
            registrations: Arc::new(mem.clone()),
            hours: Arc::new(mem.clone()),
            messages: Arc::new(mem.clone()),
            notifications: Arc::new(mem),
            backend: Backend::Memory,
        }
    }

    /// Name of the active backend.
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory => "memory",
        }
    }

    /// Underlying pool, when backed by PostgreSQL.
    pub fn pool(&self) -> Option<&DatabasePool> {
        match &self.backend {
            Backend::Postgres(pool) => Some(pool),
            Backend::Memory => None,
        }
    }

    /// Check backend connectivity.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.backend {
            Backend::Postgres(pool) => pool.health_check().await,
            Backend::Memory => Ok(true),
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Backend::Postgres(pool) = &self.backend {
            pool.close().await;
        }
    }
}
