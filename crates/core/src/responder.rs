use fitcoach_model::{
    ErrorKind, ModelFinishReason, ModelMessage, ModelProviderError,
    ModelRequest,
};

use crate::config::CoachConfig;
use crate::conversation::Message;
use crate::model_client::{ModelClient, ModelClientResponse};

/// Produces the next assistant message for either branch of a turn.
#[derive(Clone)]
pub(crate) struct Responder {
    client: ModelClient,
    config: CoachConfig,
}

impl Responder {
    #[inline]
    pub fn new(client: ModelClient, config: CoachConfig) -> Self {
        Self { client, config }
    }

    /// Generates a coaching answer from the persona and the full history.
    ///
    /// If the primary model is reported as unavailable and a fallback
    /// model is configured, the same input is sent once to the fallback
    /// model and its outcome is final. Every other failure is returned
    /// as is.
    pub async fn respond(
        &self,
        history: &[Message],
    ) -> Result<Message, Box<dyn ModelProviderError>> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ModelMessage::System(self.config.persona_prompt.clone()));
        messages.extend(history.iter().map(Message::to_model_message));

        let req = ModelRequest::new(self.config.primary_model.clone(), messages)
            .with_temperature(self.config.temperature);

        let resp = match self.client.send_request(req.clone()).await {
            Ok(resp) => resp,
            Err(err) if err.kind() == ErrorKind::ModelUnavailable => {
                let Some(fallback_model) = &self.config.fallback_model else {
                    return Err(err);
                };
                warn!(
                    "model `{}` is unavailable, falling back to `{fallback_model}`",
                    req.model
                );
                let req = ModelRequest {
                    model: fallback_model.clone(),
                    ..req
                };
                self.client.send_request(req).await?
            }
            Err(err) => return Err(err),
        };
        Ok(Message::assistant(finish_transcript(resp)))
    }

    /// Returns the fixed redirect reply. No model is involved.
    #[inline]
    pub fn respond_off_topic(&self) -> Message {
        Message::assistant(self.config.off_topic_reply.clone())
    }
}

fn finish_transcript(resp: ModelClientResponse) -> String {
    match resp.finish_reason {
        Some(ModelFinishReason::Stop) => {}
        Some(reason) => warn!("answer finished abnormally: {reason:?}"),
        None => warn!("answer finished without a reason"),
    }
    resp.transcript
}
