// Core engine exports
pub mod classify;
pub mod deck;
pub mod gesture;
pub mod transform;

pub use classify::classify_release;
pub use deck::{DeckCommand, DeckError, DeckHandle, DeckSnapshot, FeedPhase};
pub use gesture::GestureSession;
pub use transform::{drag_frame, fly_off_frame, rest_frame, settle_frame};
