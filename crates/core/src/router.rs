use std::fmt::{self, Display};

use fitcoach_model::{ModelMessage, ModelProviderError, ModelRequest};

use crate::config::CoachConfig;
use crate::model_client::ModelClient;

/// Whether a message belongs to the supported topic domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    /// The message is about fitness or nutrition.
    OnTopic,
    /// Anything else, including unparseable classifier output.
    OffTopic,
}

impl Classification {
    /// Interprets a classifier answer.
    ///
    /// Any answer containing "yes" (case-insensitive) is on topic. There
    /// is no abstention: empty or malformed answers are off topic.
    #[inline]
    pub fn from_answer(answer: &str) -> Self {
        if answer.to_lowercase().contains("yes") {
            Classification::OnTopic
        } else {
            Classification::OffTopic
        }
    }
}

impl Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::OnTopic => write!(f, "on topic"),
            Classification::OffTopic => write!(f, "off topic"),
        }
    }
}

/// Decides whether the latest user message is on topic.
#[derive(Clone)]
pub(crate) struct Router {
    client: ModelClient,
    config: CoachConfig,
}

impl Router {
    #[inline]
    pub fn new(client: ModelClient, config: CoachConfig) -> Self {
        Self { client, config }
    }

    /// Classifies one message with a single model call.
    ///
    /// Only the message itself is sent, without history or persona.
    /// Failures are returned as is, the router has no fallback.
    pub async fn classify(
        &self,
        message: &str,
    ) -> Result<Classification, Box<dyn ModelProviderError>> {
        let prompt = self.config.render_classifier_prompt(message);
        let req = ModelRequest::new(
            self.config.classifier_model.clone(),
            vec![ModelMessage::User(prompt)],
        )
        .with_temperature(self.config.temperature);

        let resp = self.client.send_request(req).await?;
        let classification = Classification::from_answer(&resp.transcript);
        debug!(
            "classified message as {classification} (answer={:?})",
            resp.transcript.trim()
        );
        Ok(classification)
    }
}

#[cfg(test)]
mod tests {
    use fitcoach_model::ErrorKind;
    use fitcoach_test_model::{PresetResponse, TestModelProvider};

    use super::*;
    use crate::config::CoachConfigBuilder;

    #[test]
    fn test_from_answer() {
        assert_eq!(Classification::from_answer("yes"), Classification::OnTopic);
        assert_eq!(
            Classification::from_answer("  YES.\n"),
            Classification::OnTopic
        );
        assert_eq!(
            Classification::from_answer("Yes, this is about diet."),
            Classification::OnTopic
        );
        assert_eq!(Classification::from_answer("no"), Classification::OffTopic);
        assert_eq!(Classification::from_answer(""), Classification::OffTopic);
        assert_eq!(
            Classification::from_answer("I cannot tell."),
            Classification::OffTopic
        );
    }

    #[tokio::test]
    async fn test_classify_request_shape() {
        let provider = TestModelProvider::default();
        provider.add_response_step(PresetResponse::with_text("Yes"));
        let config = CoachConfigBuilder::new()
            .with_primary_model("coach-model")
            .with_classifier_model("router-model")
            .with_temperature(0.3)
            .build();
        let router = Router::new(ModelClient::new(provider.clone()), config);

        let classification = router
            .classify("Help me plan meals for a bulk")
            .await
            .unwrap();
        assert_eq!(classification, Classification::OnTopic);

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "router-model");
        assert_eq!(requests[0].temperature, Some(0.3));
        let [ModelMessage::User(prompt)] = requests[0].messages.as_slice()
        else {
            panic!("unexpected messages: {:?}", requests[0].messages);
        };
        assert!(prompt.contains("Answer only 'yes' or 'no'."));
        assert!(prompt.ends_with("Query: Help me plan meals for a bulk"));
    }

    #[tokio::test]
    async fn test_classify_failure_propagates() {
        let provider = TestModelProvider::default();
        provider.add_response_step(PresetResponse::failure(
            ErrorKind::ModelUnavailable,
        ));
        let router =
            Router::new(ModelClient::new(provider.clone()), CoachConfig::default());

        let err = router.classify("What's the capital of France?").await;
        assert_eq!(err.unwrap_err().kind(), ErrorKind::ModelUnavailable);
        // The router never retries.
        assert_eq!(provider.requests().len(), 1);
    }
}
