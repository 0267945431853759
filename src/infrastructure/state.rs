//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::ProductRepository;
use crate::infrastructure::SeaOrmProductRepository;
use crate::pricing::Locale;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    /// Product repository
    pub product_repo: Arc<dyn ProductRepository>,
    /// Locale used when a request does not pass `locale`
    pub default_locale: Locale,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_locale(db, Locale::default())
    }

    pub fn with_locale(db: DatabaseConnection, default_locale: Locale) -> Self {
        let product_repo = Arc::new(SeaOrmProductRepository::new(db.clone()));

        Self {
            db,
            product_repo,
            default_locale,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn locale(&self, requested: Option<&str>) -> Locale {
        requested
            .map(Locale::from_code)
            .unwrap_or(self.default_locale)
    }
}

// Implement FromRef to allow extracting DatabaseConnection from AppState
impl axum::extract::FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
