use serde::{Deserialize, Serialize};

/// Fallback asset shown when a profile carries no photo
pub const DEFAULT_AVATAR: &str = "assets/default-user-image.png";

/// Fallback display name for profiles with no name fields set
pub const DEFAULT_DISPLAY_NAME: &str = "Developer";

/// Candidate profile presented on a card
///
/// The engine only reads these fields for display, it never mutates them.
/// Missing fields deserialize to `None`/empty and render via fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(rename = "photoUrl", default)]
    pub photo_url: Option<String>,
}

impl Profile {
    /// Full display name, falling back to a generic label when both name
    /// fields are absent or blank
    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("");
        let last = self.last_name.as_deref().unwrap_or("");
        let full = format!("{} {}", first, last).trim().to_string();
        if full.is_empty() {
            DEFAULT_DISPLAY_NAME.to_string()
        } else {
            full
        }
    }

    /// Photo reference, falling back to the bundled default avatar
    pub fn photo(&self) -> &str {
        match self.photo_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => DEFAULT_AVATAR,
        }
    }
}

/// Outcome of a committed swipe, as spelled on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionOutcome {
    Interested,
    Ignored,
}

impl DecisionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionOutcome::Interested => "interested",
            DecisionOutcome::Ignored => "ignored",
        }
    }
}

/// Horizontal direction of a committed swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// Sign of the direction on the x axis
    pub fn sign(&self) -> f32 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }

    /// The decision a swipe in this direction commits
    pub fn outcome(&self) -> DecisionOutcome {
        match self {
            SwipeDirection::Left => DecisionOutcome::Ignored,
            SwipeDirection::Right => DecisionOutcome::Interested,
        }
    }
}

/// A committed decision, produced exactly once per swipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub profile_id: String,
    pub outcome: DecisionOutcome,
}

/// Point in viewport coordinates (px)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Final delta and velocity of a gesture, handed to the classifier on release
///
/// Velocity is in px/ms, taken from the two most recent samples only.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureSample {
    pub delta: Point,
    pub velocity: Point,
}

/// What a released gesture asks the deck to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeIntent {
    Commit(SwipeDirection),
    Cancel,
}

/// Top-level interaction state of the deck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckState {
    Idle,
    Dragging,
    Exiting(SwipeDirection),
    Settling,
}

/// Visual state of the top card for one paint
///
/// The host tweens translation, rotation, and card opacity towards these
/// targets over `transition_ms` (0 means apply immediately, used for live
/// drag updates). Overlay intensities always apply immediately: a commit
/// pins its label at full strength for the whole fly-off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardFrame {
    pub translate_x: f32,
    pub translate_y: f32,
    pub rotation_deg: f32,
    pub opacity: f32,
    pub like_opacity: f32,
    pub nope_opacity: f32,
    pub transition_ms: u64,
}

impl Default for CardFrame {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            rotation_deg: 0.0,
            opacity: 1.0,
            like_opacity: 0.0,
            nope_opacity: 0.0,
            transition_ms: 0,
        }
    }
}

/// Tuning constants for gesture classification and card motion
#[derive(Debug, Clone, Copy)]
pub struct SwipeTuning {
    /// Horizontal displacement (px) past which a release commits
    pub swipe_threshold: f32,
    /// Horizontal velocity (px/ms) past which a release commits
    pub velocity_threshold: f32,
    /// Scale applied to the vertical delta so vertical motion never dominates
    pub vertical_damping: f32,
    /// Degrees of card rotation per px of horizontal displacement
    pub rotation_factor: f32,
    /// Width of the host viewport (px), used to size the fly-off travel
    pub viewport_width: f32,
    /// Duration of the commit fly-off transition
    pub fly_duration_ms: u64,
    /// Duration of the cancel spring-back transition
    pub settle_duration_ms: u64,
}

impl Default for SwipeTuning {
    fn default() -> Self {
        Self {
            swipe_threshold: 120.0,
            velocity_threshold: 0.5,
            vertical_damping: 0.4,
            rotation_factor: 0.1,
            viewport_width: 480.0,
            fly_duration_ms: 350,
            settle_duration_ms: 400,
        }
    }
}
