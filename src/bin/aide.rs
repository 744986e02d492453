use anyhow::{Context as _, Result};
use dotenvy::dotenv;
use log::{error, info};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use aide::assistant::{extract_name, Assistant};
use aide::commands::handlers::utility::farewell;
use aide::commands::{create_all_handlers, AssistantContext, CommandRouter, HandlerRegistry};
use aide::core::Config;
use aide::database::Database;
use aide::features::classifier::IntentClassifier;
use aide::features::launcher::SystemLauncher;
use aide::features::notify::{ConsoleNotifier, Notifier};
use aide::features::reminders::ReminderScheduler;

type Input = Lines<BufReader<Stdin>>;

/// Print the prompt and read one line; `None` on EOF
async fn read_line(input: &mut Input) -> Result<Option<String>> {
    print!("\n👤 You: ");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}

/// Ask for the user's name unless it is already stored
async fn onboard(assistant: &Assistant, notifier: &dyn Notifier, input: &mut Input) -> Result<()> {
    if assistant.user_name().await.is_some() {
        return Ok(());
    }

    notifier.notify("Hi! I'm your personal assistant. What's your name?");
    let Some(response) = read_line(input).await? else {
        return Ok(());
    };
    match assistant.set_user_name(&extract_name(&response)).await? {
        Some(name) => notifier.notify(&format!("Nice to meet you, {name}! I'm ready to help.")),
        None => info!("No name given, continuing anonymously"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting assistant...");

    let database = Database::new(&config.database_path).await?;

    // Load the model up front: nothing works without it
    let classifier = IntentClassifier::new(&config.model_path);
    if let Err(e) = classifier.load() {
        error!("❌ {e}");
        return Err(e).context("intent classifier unavailable");
    }
    info!("🧠 Intent model loaded from {}", config.model_path.display());

    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
    let ctx = Arc::new(AssistantContext::new(
        database.clone(),
        Arc::clone(&notifier),
        Arc::new(SystemLauncher),
        &config,
    ));
    let router = CommandRouter::new(
        Arc::new(classifier),
        HandlerRegistry::with_handlers(create_all_handlers()),
        config.confidence_threshold,
    );
    let assistant = Assistant::new(ctx, router).await?;

    // Start reminder scheduler
    let scheduler = ReminderScheduler::new(
        database,
        Arc::clone(&notifier),
        config.reminder_poll_interval,
    )
    .start();
    info!("⏰ Reminder scheduler running");

    println!("\n{}", "=".repeat(55));
    println!("   Personal Assistant");
    println!("{}", "=".repeat(55));

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    onboard(&assistant, notifier.as_ref(), &mut input).await?;
    notifier.notify("Just tell me what you need!");

    loop {
        let line = match read_line(&mut input).await {
            Ok(Some(line)) => line,
            Ok(None) => {
                notifier.notify(&farewell(assistant.user_name().await.as_deref()));
                break;
            }
            Err(e) => {
                error!("Failed to read input: {e}");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let reply = assistant.process(&line).await;
        notifier.notify(&reply.text);
        if reply.exit {
            break;
        }
    }

    assistant.shutdown().await;
    scheduler.stop().await;
    println!("\n✔ Assistant exited. Goodbye!\n");
    Ok(())
}
