/// A request to be sent to the model provider.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelRequest {
    /// Identifier of the model that should serve this request.
    pub model: String,
    /// The input messages.
    pub messages: Vec<ModelMessage>,
    /// Sampling temperature. Providers use their own default when unset.
    pub temperature: Option<f32>,
}

impl ModelRequest {
    /// Creates a request for `model` with the given messages and no
    /// explicit temperature.
    #[inline]
    pub fn new<S: Into<String>>(model: S, messages: Vec<ModelMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
        }
    }

    /// Sets the sampling temperature.
    #[inline]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// A complete message.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModelMessage {
    /// The system instructions.
    System(String),
    /// A user input text.
    User(String),
    /// An assistant text.
    Assistant(String),
}
