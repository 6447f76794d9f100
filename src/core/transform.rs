use crate::models::{CardFrame, Point, SwipeDirection, SwipeTuning};

/// Vertical lift applied to the card while it flies off
const FLY_OFF_LIFT: f32 = -50.0;

/// Rotation of a fully committed card (degrees)
const FLY_OFF_ROTATION: f32 = 30.0;

/// How far past the viewport edge the card travels, as a width multiple
const FLY_OFF_TRAVEL: f32 = 1.5;

/// Project a live drag delta onto the top card
///
/// Pure function: translation follows the delta, rotation grows with
/// horizontal displacement, and the like/nope overlays fade in with
/// progress towards the commit threshold.
pub fn drag_frame(delta: Point, tuning: &SwipeTuning) -> CardFrame {
    CardFrame {
        translate_x: delta.x,
        translate_y: delta.y,
        rotation_deg: delta.x * tuning.rotation_factor,
        opacity: 1.0,
        like_opacity: clamp01(delta.x / tuning.swipe_threshold),
        nope_opacity: clamp01(-delta.x / tuning.swipe_threshold),
        transition_ms: 0,
    }
}

/// Target frame of the commit transition: fully off-viewport, faded out,
/// with the committed overlay pinned at full intensity
pub fn fly_off_frame(direction: SwipeDirection, tuning: &SwipeTuning) -> CardFrame {
    let sign = direction.sign();
    CardFrame {
        translate_x: sign * tuning.viewport_width * FLY_OFF_TRAVEL,
        translate_y: FLY_OFF_LIFT,
        rotation_deg: sign * FLY_OFF_ROTATION,
        opacity: 0.0,
        like_opacity: if direction == SwipeDirection::Right { 1.0 } else { 0.0 },
        nope_opacity: if direction == SwipeDirection::Left { 1.0 } else { 0.0 },
        transition_ms: tuning.fly_duration_ms,
    }
}

/// Target frame of the cancel transition: spring back to the origin
/// transform with both overlays faded out
pub fn settle_frame(tuning: &SwipeTuning) -> CardFrame {
    CardFrame {
        transition_ms: tuning.settle_duration_ms,
        ..CardFrame::default()
    }
}

/// Identity frame applied instantly, used when the next card becomes topmost
pub fn rest_frame() -> CardFrame {
    CardFrame::default()
}

#[inline]
fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> SwipeTuning {
        SwipeTuning::default()
    }

    #[test]
    fn test_rotation_tracks_horizontal_displacement() {
        let frame = drag_frame(Point::new(80.0, 12.0), &tuning());
        assert!((frame.rotation_deg - 8.0).abs() < 1e-4);
        assert_eq!(frame.translate_x, 80.0);
        assert_eq!(frame.translate_y, 12.0);
        assert_eq!(frame.transition_ms, 0);
    }

    #[test]
    fn test_overlay_opacity_is_threshold_progress() {
        let t = tuning();

        let half = drag_frame(Point::new(60.0, 0.0), &t);
        assert!((half.like_opacity - 0.5).abs() < 1e-4);
        assert_eq!(half.nope_opacity, 0.0);

        let past = drag_frame(Point::new(240.0, 0.0), &t);
        assert_eq!(past.like_opacity, 1.0);

        let leftward = drag_frame(Point::new(-60.0, 0.0), &t);
        assert_eq!(leftward.like_opacity, 0.0);
        assert!((leftward.nope_opacity - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_fly_off_leaves_viewport() {
        let t = tuning();
        let frame = fly_off_frame(SwipeDirection::Right, &t);

        assert!(frame.translate_x > t.viewport_width);
        assert_eq!(frame.opacity, 0.0);
        assert_eq!(frame.like_opacity, 1.0);
        assert_eq!(frame.nope_opacity, 0.0);
        assert_eq!(frame.transition_ms, t.fly_duration_ms);

        let left = fly_off_frame(SwipeDirection::Left, &t);
        assert!(left.translate_x < -t.viewport_width);
        assert_eq!(left.rotation_deg, -30.0);
        assert_eq!(left.nope_opacity, 1.0);
    }

    #[test]
    fn test_settle_returns_to_origin_transform() {
        let t = tuning();
        let frame = settle_frame(&t);
        assert_eq!(frame.translate_x, 0.0);
        assert_eq!(frame.rotation_deg, 0.0);
        assert_eq!(frame.opacity, 1.0);
        assert_eq!(frame.like_opacity, 0.0);
        assert_eq!(frame.transition_ms, t.settle_duration_ms);
    }
}
