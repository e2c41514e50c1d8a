//! A terminal front end for the fitness & nutrition coach.

#[macro_use]
extern crate tracing;

mod args;
mod banner;

use std::io::Write as _;
use std::time::Duration;

use clap::Parser;
use fitcoach_core::{
    Classification, CoachBuilder, Error as TurnError, ModelErrorKind,
    TurnOutcome,
};
use fitcoach_openai_model::{OpenAIConfigBuilder, OpenAIProvider};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufReadExt, BufReader};

use args::Args;
use banner::BAR_CHAR;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = OpenAIConfigBuilder::with_api_key(args.api_key.clone())
        .with_base_url(args.base_url.clone())
        .build();
    let model_provider = OpenAIProvider::new(config);

    let mut coach = CoachBuilder::with_model_provider(model_provider)
        .with_config(args.coach_config())
        .build();

    if !args.no_banner {
        banner::print_routing_graph(&args);
        banner::print_welcome();
    }

    let mut conversation_id = coach.start_conversation();
    info!("started conversation {conversation_id}");

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .map(|style| style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"))
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                error!("error reading input: {}", err);
                break;
            }
        };
        let line = line.trim();
        match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/new" => {
                coach.clear_conversation(conversation_id.as_str());
                conversation_id = coach.start_conversation();
                info!("started conversation {conversation_id}");
                println!("{}\n", "Starting a fresh conversation.".dimmed());
                continue;
            }
            _ => {}
        }

        let progress_bar = ProgressBar::new_spinner();
        progress_bar.set_style(progress_style.clone());
        progress_bar.set_message("🤔 Thinking like a pro coach...");
        progress_bar.enable_steady_tick(Duration::from_millis(100));

        let result = coach.run_turn(conversation_id.as_str(), line).await;

        // Finish the progress bar before printing anything else.
        progress_bar.finish_and_clear();

        match result {
            Ok(outcome) => print_reply(&outcome),
            Err(err) => print_error(&err),
        }
    }
}

fn print_reply(outcome: &TurnOutcome) {
    let (bar, route) = match outcome.classification {
        Classification::OnTopic => {
            (BAR_CHAR.bright_cyan().to_string(), "coach".bright_green().to_string())
        }
        Classification::OffTopic => {
            (BAR_CHAR.bright_red().to_string(), "off_topic".bright_red().to_string())
        }
    };
    println!("{bar}💪 [{route}]");
    for line in outcome.reply.content().lines() {
        println!("{bar}{}", line.bright_white());
    }
    println!();
}

fn print_error(err: &TurnError) {
    let bar = BAR_CHAR.bright_red();
    println!("{bar}⚠️  {}", err.to_string().bright_red());
    if err.model_error_kind() == ModelErrorKind::ModelUnavailable {
        println!("{bar}Check the --model and --fallback-model settings.");
    }
    println!("{bar}Your message was not saved, feel free to send it again.");
    println!();
}
