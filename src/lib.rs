//! devdeck - Gesture-to-decision swipe deck engine for the DevDeck app
//!
//! This library provides the interaction engine behind the card-stack
//! "swipe to decide" screen: gesture tracking, transform projection,
//! threshold/velocity classification, the commit/cancel transition state
//! machine, and the queue-advance protocol coordinated with the remote
//! decision endpoint.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use core::{classify_release, DeckError, DeckHandle, DeckSnapshot, FeedPhase};
pub use models::{
    CardFrame, Decision, DecisionOutcome, DeckState, Profile, SwipeDirection, SwipeIntent,
    SwipeTuning,
};
pub use services::{FeedClient, Notice, NoticeLevel, Notifier};
