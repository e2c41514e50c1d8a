use fitcoach_model::{ModelFinishReason, ModelMessage, ModelRequest};
use serde::{Deserialize, Serialize};

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default)]
    pub id: Option<String>,
    pub choices: Vec<Choice>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub delta: Delta,
    pub finish_reason: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct Delta {
    pub content: Option<String>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    System { content: String },
    User { content: String },
    Assistant { content: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream_options: Option<StreamOptions>,
    stream: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
struct StreamOptions {
    include_usage: bool,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(req: &ModelRequest) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: req.model.clone(),
        messages: req.messages.iter().map(create_message).collect(),
        temperature: req.temperature,
        stream_options: Some(StreamOptions {
            include_usage: true,
        }),
        stream: true,
    }
}

#[inline]
fn create_message(msg: &ModelMessage) -> Message {
    match msg {
        ModelMessage::System(content) => Message::System {
            content: content.clone(),
        },
        ModelMessage::User(content) => Message::User {
            content: content.clone(),
        },
        ModelMessage::Assistant(content) => Message::Assistant {
            content: content.clone(),
        },
    }
}

#[inline]
pub fn parse_finish_reason(reason: &str) -> ModelFinishReason {
    match reason {
        "length" => ModelFinishReason::Length,
        "content_filter" => ModelFinishReason::ContentFilter,
        _ => ModelFinishReason::Stop,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_create_request() {
        let request = ModelRequest::new(
            "gemini-2.5-pro",
            vec![
                ModelMessage::System("You are a fitness coach.".to_owned()),
                ModelMessage::User("Plan my week".to_owned()),
                ModelMessage::Assistant("How many days can you train?".to_owned()),
            ],
        )
        .with_temperature(0.5);
        let expected = ChatCompletionRequest {
            model: "gemini-2.5-pro".to_owned(),
            messages: vec![
                Message::System {
                    content: "You are a fitness coach.".to_owned(),
                },
                Message::User {
                    content: "Plan my week".to_owned(),
                },
                Message::Assistant {
                    content: "How many days can you train?".to_owned(),
                },
            ],
            temperature: Some(0.5),
            stream_options: Some(StreamOptions {
                include_usage: true,
            }),
            stream: true,
        };
        assert_eq!(create_request(&request), expected);
    }

    #[test]
    fn test_serialize_request() {
        let request = ModelRequest::new(
            "gemini-2.5-flash",
            vec![ModelMessage::User("yes or no?".to_owned())],
        );
        let value = serde_json::to_value(create_request(&request)).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "gemini-2.5-flash",
                "messages": [{ "role": "user", "content": "yes or no?" }],
                "stream_options": { "include_usage": true },
                "stream": true
            })
        );
    }

    #[test]
    fn test_parse_chunk_without_delta() {
        let chunk: ChatCompletionChunk = serde_json::from_value(json!({
            "choices": [{ "index": 0, "finish_reason": "content_filter" }]
        }))
        .unwrap();
        assert_eq!(chunk.id, None);
        assert_eq!(chunk.choices[0].delta, Delta::default());
        assert_eq!(
            parse_finish_reason(chunk.choices[0].finish_reason.as_deref().unwrap()),
            ModelFinishReason::ContentFilter
        );
    }
}
