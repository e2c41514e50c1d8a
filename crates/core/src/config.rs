//! Configuration of the coach: model identifiers, sampling, and prompts.

/// Placeholder in the classifier template that is replaced with the raw
/// user message.
pub const QUERY_PLACEHOLDER: &str = "{{QUERY}}";

/// Default model for coaching answers.
pub const DEFAULT_PRIMARY_MODEL: &str = "gemini-2.5-pro";

/// Default model used when the primary model is unavailable.
pub const DEFAULT_FALLBACK_MODEL: &str = "gemini-2.5-flash";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default persona instructions for the on-topic branch.
pub const DEFAULT_PERSONA_PROMPT: &str = "\
You are an expert Fitness & Nutrition Coach. \
You give personalized, science-based advice on training programs, workout plans, \
nutrition, macros, meal ideas, supplements, recovery, and lifestyle habits. \
Always ask follow-up questions when needed (age, goals, experience, dietary restrictions, etc.). \
Be motivating, clear, and practical. Never give medical diagnoses.";

/// Default yes/no topical-relevance prompt.
pub const DEFAULT_CLASSIFIER_TEMPLATE: &str = "\
Does this message relate to fitness, workouts, exercise, nutrition, diet, supplements, \
weight loss, muscle gain, sports performance, or healthy eating? \
Answer only 'yes' or 'no'.\n\nQuery: {{QUERY}}";

/// Default reply for messages outside the supported topics.
pub const DEFAULT_OFF_TOPIC_REPLY: &str = "\
I'm your dedicated Fitness & Nutrition Coach! \
I can help with workout plans, meal ideas, macros, supplements, and reaching your goals 💪 \
Ask me anything about training or nutrition!";

/// Builder for [`CoachConfig`].
#[derive(Clone, Debug, Default)]
pub struct CoachConfigBuilder {
    primary_model: Option<String>,
    fallback_model: Option<Option<String>>,
    classifier_model: Option<String>,
    temperature: Option<f32>,
    persona_prompt: Option<String>,
    classifier_template: Option<String>,
    off_topic_reply: Option<String>,
}

impl CoachConfigBuilder {
    /// Creates a builder with every setting at its default.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the model that generates coaching answers.
    #[inline]
    pub fn with_primary_model<S: Into<String>>(mut self, model: S) -> Self {
        self.primary_model = Some(model.into());
        self
    }

    /// Sets the model to retry with when the primary model is reported
    /// as unavailable.
    #[inline]
    pub fn with_fallback_model<S: Into<String>>(mut self, model: S) -> Self {
        self.fallback_model = Some(Some(model.into()));
        self
    }

    /// Disables the fallback: an unavailable primary model fails the turn.
    #[inline]
    pub fn without_fallback_model(mut self) -> Self {
        self.fallback_model = Some(None);
        self
    }

    /// Sets the model that classifies messages. Defaults to the primary
    /// model.
    #[inline]
    pub fn with_classifier_model<S: Into<String>>(mut self, model: S) -> Self {
        self.classifier_model = Some(model.into());
        self
    }

    /// Sets the sampling temperature used for every request.
    #[inline]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the persona instructions sent ahead of the history.
    #[inline]
    pub fn with_persona_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.persona_prompt = Some(prompt.into());
        self
    }

    /// Sets the classifier prompt template.
    ///
    /// Occurrences of [`QUERY_PLACEHOLDER`] are replaced with the user
    /// message. A template without the placeholder gets the message
    /// appended after a `Query:` label.
    #[inline]
    pub fn with_classifier_template<S: Into<String>>(
        mut self,
        template: S,
    ) -> Self {
        self.classifier_template = Some(template.into());
        self
    }

    /// Sets the fixed reply for off-topic messages.
    #[inline]
    pub fn with_off_topic_reply<S: Into<String>>(mut self, reply: S) -> Self {
        self.off_topic_reply = Some(reply.into());
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> CoachConfig {
        let primary_model = self
            .primary_model
            .unwrap_or_else(|| DEFAULT_PRIMARY_MODEL.to_owned());
        CoachConfig {
            classifier_model: self
                .classifier_model
                .unwrap_or_else(|| primary_model.clone()),
            primary_model,
            fallback_model: self
                .fallback_model
                .unwrap_or_else(|| Some(DEFAULT_FALLBACK_MODEL.to_owned())),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            persona_prompt: self
                .persona_prompt
                .unwrap_or_else(|| DEFAULT_PERSONA_PROMPT.to_owned()),
            classifier_template: self
                .classifier_template
                .unwrap_or_else(|| DEFAULT_CLASSIFIER_TEMPLATE.to_owned()),
            off_topic_reply: self
                .off_topic_reply
                .unwrap_or_else(|| DEFAULT_OFF_TOPIC_REPLY.to_owned()),
        }
    }
}

/// Configuration consumed by the router and the response generator.
///
/// Credentials are not part of it, they belong to the model provider.
#[derive(Clone, Debug, PartialEq)]
pub struct CoachConfig {
    pub(crate) primary_model: String,
    pub(crate) fallback_model: Option<String>,
    pub(crate) classifier_model: String,
    pub(crate) temperature: f32,
    pub(crate) persona_prompt: String,
    pub(crate) classifier_template: String,
    pub(crate) off_topic_reply: String,
}

impl CoachConfig {
    /// Returns the model that generates coaching answers.
    #[inline]
    pub fn primary_model(&self) -> &str {
        &self.primary_model
    }

    /// Returns the fallback model, if enabled.
    #[inline]
    pub fn fallback_model(&self) -> Option<&str> {
        self.fallback_model.as_deref()
    }

    /// Returns the model that classifies messages.
    #[inline]
    pub fn classifier_model(&self) -> &str {
        &self.classifier_model
    }

    /// Returns the fixed off-topic reply.
    #[inline]
    pub fn off_topic_reply(&self) -> &str {
        &self.off_topic_reply
    }

    pub(crate) fn render_classifier_prompt(&self, message: &str) -> String {
        if self.classifier_template.contains(QUERY_PLACEHOLDER) {
            self.classifier_template.replace(QUERY_PLACEHOLDER, message)
        } else {
            format!("{}\n\nQuery: {message}", self.classifier_template)
        }
    }
}

impl Default for CoachConfig {
    #[inline]
    fn default() -> Self {
        CoachConfigBuilder::new().build()
    }
}
