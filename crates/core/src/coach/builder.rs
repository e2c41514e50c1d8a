use fitcoach_model::ModelProvider;

use super::Coach;
use crate::config::CoachConfig;
use crate::model_client::ModelClient;
use crate::responder::Responder;
use crate::router::Router;
use crate::session::SessionStore;

/// [`Coach`] builder.
pub struct CoachBuilder {
    model_client: ModelClient,
    config: CoachConfig,
}

impl CoachBuilder {
    /// Creates a new builder with the specified model provider and the
    /// default configuration.
    #[inline]
    pub fn with_model_provider<P: ModelProvider + 'static>(
        provider: P,
    ) -> Self {
        Self {
            model_client: ModelClient::new(provider),
            config: CoachConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[inline]
    pub fn with_config(mut self, config: CoachConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the coach with an empty session store.
    #[inline]
    pub fn build(self) -> Coach {
        let Self {
            model_client,
            config,
        } = self;
        Coach {
            router: Router::new(model_client.clone(), config.clone()),
            responder: Responder::new(model_client, config),
            sessions: SessionStore::default(),
        }
    }
}
