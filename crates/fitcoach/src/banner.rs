use owo_colors::OwoColorize;

use crate::args::Args;

pub const BAR_CHAR: &str = "▎";

const WELCOME: &str = "\
Hey Champion! I'm your dedicated Fitness & Nutrition Coach, here to help you:
  - Build muscle, lose fat, get stronger
  - Custom workout programs
  - Meal plans & macros
  - Supplements & recovery

Tell me your goal, stats, or any question and I'll build you a personalized plan.
What are we crushing today?";

/// Prints how messages are routed.
pub fn print_routing_graph(args: &Args) {
    let classifier_model =
        args.classifier_model.as_deref().unwrap_or(&args.model);
    let coach_models = if args.no_fallback {
        args.model.clone()
    } else {
        format!("{} → {}", args.model, args.fallback_model)
    };

    println!();
    println!(
        "{} ──► {} ({classifier_model}) ──┬─► {} ({coach_models}) ──► {}",
        "START".bright_cyan().bold(),
        "classifier".bright_yellow().bold(),
        "coach".bright_green().bold(),
        "END".bright_cyan().bold(),
    );
    println!(
        "{:>width$}└─► {} ──► {}",
        "",
        "off_topic".bright_red().bold(),
        "END".bright_cyan().bold(),
        width = 26 + classifier_model.chars().count(),
    );
    println!(
        "{}",
        "Full conversation history • Personalized fitness & nutrition advice"
            .dimmed()
    );
    println!();
}

pub fn print_welcome() {
    for line in WELCOME.lines() {
        println!("{}{}", BAR_CHAR.bright_cyan(), line.bright_white());
    }
    println!();
}
