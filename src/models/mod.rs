// Model exports
pub mod domain;
pub mod responses;

pub use domain::{
    CardFrame, Decision, DecisionOutcome, DeckState, GestureSample, Point, Profile,
    SwipeDirection, SwipeIntent, SwipeTuning, DEFAULT_AVATAR, DEFAULT_DISPLAY_NAME,
};
pub use responses::{ActionResponse, FeedResponse};
