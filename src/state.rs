use std::sync::Arc;

use crate::config::{AppConfig, StoreBackend};
use crate::gateway::{GeminiClient, TextCompletion};
use crate::store::{MemoryStore, PgStore, Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub gateway: Arc<dyn TextCompletion>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store: Arc<dyn Store> = match config.store_backend {
            StoreBackend::Memory => {
                tracing::warn!("using the in-memory store; data will not survive a restart");
                Arc::new(MemoryStore::new())
            }
            StoreBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("DATABASE_URL missing for postgres backend"))?;
                Arc::new(PgStore::connect(url).await?)
            }
        };

        let gateway = Arc::new(GeminiClient::new(&config.gemini)) as Arc<dyn TextCompletion>;

        Ok(Self {
            store,
            gateway,
            config,
        })
    }

    pub fn from_parts(
        store: Arc<dyn Store>,
        gateway: Arc<dyn TextCompletion>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            store,
            gateway,
            config,
        }
    }

    /// State for unit tests: in-memory store, a gateway that is always
    /// down (the generation path is expected to fall back), fixed config.
    pub fn fake() -> Self {
        use crate::config::{GeminiConfig, JwtConfig};
        use crate::error::AppError;
        use async_trait::async_trait;

        struct OfflineGateway;

        #[async_trait]
        impl TextCompletion for OfflineGateway {
            async fn complete(&self, _prompt: &str) -> Result<String, AppError> {
                Err(AppError::GatewayUnavailable("offline test gateway".into()))
            }
        }

        let config = Arc::new(AppConfig {
            store_backend: StoreBackend::Memory,
            database_url: None,
            jwt: JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
            },
            gemini: GeminiConfig {
                api_key: "test".into(),
                model: "gemini-1.5-flash".into(),
                base_url: "http://localhost:0".into(),
            },
        });

        Self::from_parts(Arc::new(MemoryStore::new()), Arc::new(OfflineGateway), config)
    }
}
