use clap::Parser;
use fitcoach_core::config::{
    DEFAULT_FALLBACK_MODEL, DEFAULT_PRIMARY_MODEL, DEFAULT_TEMPERATURE,
};
use fitcoach_core::{CoachConfig, CoachConfigBuilder};

/// Gemini's OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai";

/// Your personal fitness & nutrition coach, in the terminal.
#[derive(Debug, Parser)]
#[command(name = "fitcoach", version, about)]
pub struct Args {
    /// API key of the model provider.
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of an OpenAI-compatible chat completions API.
    #[arg(long, env = "FITCOACH_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Model that writes coaching answers.
    #[arg(long, env = "FITCOACH_MODEL", default_value = DEFAULT_PRIMARY_MODEL)]
    pub model: String,

    /// Model to use when the primary model is unavailable.
    #[arg(
        long,
        env = "FITCOACH_FALLBACK_MODEL",
        default_value = DEFAULT_FALLBACK_MODEL
    )]
    pub fallback_model: String,

    /// Fail instead of switching to the fallback model.
    #[arg(long)]
    pub no_fallback: bool,

    /// Model that decides whether a message is on topic [default: --model].
    #[arg(long, env = "FITCOACH_CLASSIFIER_MODEL")]
    pub classifier_model: Option<String>,

    /// Sampling temperature.
    #[arg(
        long,
        env = "FITCOACH_TEMPERATURE",
        default_value_t = DEFAULT_TEMPERATURE
    )]
    pub temperature: f32,

    /// Skip the routing graph and the welcome message.
    #[arg(long)]
    pub no_banner: bool,
}

impl Args {
    pub fn coach_config(&self) -> CoachConfig {
        let mut builder = CoachConfigBuilder::new()
            .with_primary_model(&self.model)
            .with_temperature(self.temperature);
        builder = if self.no_fallback {
            builder.without_fallback_model()
        } else {
            builder.with_fallback_model(&self.fallback_model)
        };
        if let Some(classifier_model) = &self.classifier_model {
            builder = builder.with_classifier_model(classifier_model);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_coach_config() {
        let args = Args::try_parse_from([
            "fitcoach",
            "--api-key",
            "key",
            "--model",
            "pro",
            "--classifier-model",
            "lite",
            "--no-fallback",
        ])
        .unwrap();
        let config = args.coach_config();
        assert_eq!(config.primary_model(), "pro");
        assert_eq!(config.classifier_model(), "lite");
        assert_eq!(config.fallback_model(), None);
    }
}
