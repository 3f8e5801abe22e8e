//! PizzaTalk - Spoken Pizza Ordering
//!
//! Runs a console session: type what you would say, one utterance per line.
//! Typing after the microphone closed reopens it; end of input (Ctrl-D)
//! ends the conversation.

use anyhow::Result;
use clap::Parser;
use pizzatalk::asr::ConsoleAsr;
use pizzatalk::config::{Config, TimeoutPolicy};
use pizzatalk::dialog::DialogObserver;
use pizzatalk::provision::ModelCache;
use pizzatalk::session::event_channel;
use pizzatalk::{nlu, tts, Engines, MicAuthorization, Orchestrator, Session};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file (defaults to ~/.config/pizzatalk/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// TTS engine: console or system
    #[arg(long)]
    tts: Option<String>,

    /// Skip the opening prompt and start listening right away
    #[arg(long)]
    no_greeting: bool,

    /// Reopen the microphone after a recognition timeout
    #[arg(long)]
    reactivate_on_timeout: bool,
}

/// Prints order updates and errors the way a UI would show them
struct ConsoleObserver;

impl DialogObserver for ConsoleObserver {
    fn on_order_state_changed(&mut self, topping: &str, selected: bool) {
        let mark = if selected { "[x]" } else { "[ ]" };
        println!("  {} {}", mark, topping);
    }

    fn on_user_facing_error(&mut self, message: &str) {
        println!("  ⚠️ {}", message);
    }

    fn on_conversation_ended(&mut self) {
        println!("  👋 Bye!");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(engine) = args.tts {
        config.tts_engine = engine;
    }
    if args.no_greeting {
        config.greeting = None;
    }
    if args.reactivate_on_timeout {
        config.timeout_policy = TimeoutPolicy::Reactivate;
    }

    // Setup logging
    let level = if args.verbose {
        "debug".to_string()
    } else {
        config.log_level.to_lowercase()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("🍕 PizzaTalk v{} starting...", env!("CARGO_PKG_VERSION"));

    let (tx, rx) = event_channel(config.queue_capacity);
    let engines = Engines {
        speech: Arc::new(ConsoleAsr::stdin(
            tx.clone(),
            Duration::from_secs(config.listen_timeout_secs),
        )),
        classifier: nlu::create_engine(&config),
        synthesizer: tts::create_engine(&config),
    };
    let orchestrator = Orchestrator::new(&config, Box::new(ConsoleObserver));
    let mut session = Session::new(orchestrator, engines, tx, rx);

    // A terminal is always allowed to "listen"
    session.begin(&ModelCache::new(&config), MicAuthorization::Granted)?;

    tokio::select! {
        order = session.run() => {
            let order = order?;
            if order.is_empty() {
                println!("No toppings selected.");
            } else {
                println!("Your pizza: {}", order.join(", "));
            }
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted; abandoning order");
        }
    }

    Ok(())
}
