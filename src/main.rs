mod config;
mod core;
mod models;
mod services;

use std::sync::Arc;
use std::time::{Duration, Instant};

use config::Settings;
use core::deck::{DeckHandle, DeckSnapshot, FeedPhase};
use models::SwipeDirection;
use services::{FeedClient, NoticeLevel, Notifier};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting DevDeck swipe engine...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    let api = Arc::new(FeedClient::new(
        settings.api.base_url.clone(),
        settings.api.session_cookie.clone(),
        settings.api.timeout_secs,
    ));

    info!("API client initialized for {}", settings.api.base_url);

    let (notifier, mut notices) = Notifier::channel(32);
    let tuning = settings.gesture.into_tuning();
    let deck = DeckHandle::spawn(api, tuning, notifier);

    // Surface transient notices the way the app's toast layer would
    tokio::spawn(async move {
        while let Some(notice) = notices.recv().await {
            match notice.level {
                NoticeLevel::Error => warn!("[notice] {}", notice.message),
                _ => info!("[notice] {}", notice.message),
            }
        }
    });

    // Trace frame updates at debug level
    let mut frames = deck.frames();
    tokio::spawn(async move {
        while frames.changed().await.is_ok() {
            let frame = *frames.borrow();
            debug!(
                "frame: x={:.1} y={:.1} rot={:.1} like={:.2} nope={:.2} t={}ms",
                frame.translate_x,
                frame.translate_y,
                frame.rotation_deg,
                frame.like_opacity,
                frame.nope_opacity,
                frame.transition_ms
            );
        }
    });

    if deck.refresh().await.is_err() {
        error!("Deck engine stopped before first refresh");
        return Ok(());
    }

    println!("Commands: like | pass | drag <dx> | show | refresh | quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let mut parts = line.split_whitespace();
        let result = match parts.next() {
            Some("like") => deck.swipe(SwipeDirection::Right).await,
            Some("pass") => deck.swipe(SwipeDirection::Left).await,
            Some("drag") => {
                let dx: f32 = parts.next().and_then(|v| v.parse().ok()).unwrap_or(0.0);
                simulate_drag(&deck, dx).await;
                Ok(())
            }
            Some("refresh") => deck.refresh().await,
            Some("show") => match deck.snapshot().await {
                Ok(snapshot) => {
                    print_snapshot(&snapshot);
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Some("quit") => break,
            Some(other) => {
                println!("Unknown command: {}", other);
                Ok(())
            }
            None => Ok(()),
        };
        if let Err(e) = result {
            error!("Deck command failed: {}", e);
            break;
        }
    }

    info!("Shutting down");
    Ok(())
}

/// Replay a horizontal drag as the host's pointer events would arrive
async fn simulate_drag(deck: &DeckHandle, dx: f32) {
    let start = Instant::now();
    deck.pointer_down(0.0, 0.0, start);
    // Two samples 200ms apart keep the release velocity realistic
    tokio::time::sleep(Duration::from_millis(200)).await;
    deck.pointer_move(dx / 2.0, 0.0, Instant::now());
    tokio::time::sleep(Duration::from_millis(200)).await;
    deck.pointer_move(dx, 0.0, Instant::now());
    deck.pointer_up();
}

fn print_snapshot(snapshot: &DeckSnapshot) {
    match snapshot.feed {
        FeedPhase::NotLoaded => println!("Feed not loaded yet (try: refresh)"),
        FeedPhase::Loading => println!("Feed loading..."),
        FeedPhase::Empty => println!("No new developers. Check back later!"),
        FeedPhase::Populated(remaining) => {
            if let Some(top) = &snapshot.top {
                println!(
                    "[{} remaining] {} ({})",
                    remaining,
                    top.display_name(),
                    top.age.map(|a| a.to_string()).unwrap_or_else(|| "-".into())
                );
                if let Some(about) = &top.about {
                    println!("  {}", about);
                }
                if !top.skills.is_empty() {
                    println!("  skills: {}", top.skills.join(", "));
                }
            }
            if let Some(next) = &snapshot.next {
                println!("  up next: {}", next.display_name());
            }
        }
    }
    println!("  state: {:?}", snapshot.state);
}
