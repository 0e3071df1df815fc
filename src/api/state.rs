use std::sync::Arc;

use crate::ai::AiBackend;
use crate::catalog::CatalogClient;
use crate::config::AppConfig;
use crate::riot::RiotClient;

/// Shared handler state. Holds configuration and long-lived HTTP clients
/// only; no data is cached between requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub riot: Arc<RiotClient>,
    pub catalog: Arc<CatalogClient>,
    pub ai: Arc<dyn AiBackend>,
}

/// State wired against placeholder keys, for router tests that never leave
/// the validation layer.
#[cfg(test)]
pub fn test_state() -> AppState {
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::ai::AiError;

    struct EchoBackend;

    #[async_trait]
    impl AiBackend for EchoBackend {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn generate(&self, _model: &str, prompt: &str) -> Result<String, AiError> {
            Ok(format!("echo: {}", prompt.len()))
        }
    }

    let config = AppConfig::default();
    AppState {
        riot: Arc::new(
            RiotClient::new("RGAPI-test".to_string(), Duration::from_secs(1)).unwrap(),
        ),
        catalog: Arc::new(CatalogClient::new(config.catalog.clone()).unwrap()),
        ai: Arc::new(EchoBackend),
        config: Arc::new(config),
    }
}
