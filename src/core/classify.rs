use crate::models::{SwipeDirection, SwipeIntent, SwipeTuning};

/// Classify a released gesture into commit-right, commit-left, or cancel
///
/// Either sufficient displacement or sufficient velocity alone commits;
/// the two conditions are OR'd per direction. Opposite signs make a
/// double trigger impossible in practice, but if both directions ever
/// fire the displacement sign wins.
pub fn classify_release(dx: f32, vx: f32, tuning: &SwipeTuning) -> SwipeIntent {
    let right = dx > tuning.swipe_threshold || vx > tuning.velocity_threshold;
    let left = dx < -tuning.swipe_threshold || vx < -tuning.velocity_threshold;

    match (right, left) {
        (true, false) => SwipeIntent::Commit(SwipeDirection::Right),
        (false, true) => SwipeIntent::Commit(SwipeDirection::Left),
        (true, true) => {
            if dx >= 0.0 {
                SwipeIntent::Commit(SwipeDirection::Right)
            } else {
                SwipeIntent::Commit(SwipeDirection::Left)
            }
        }
        (false, false) => SwipeIntent::Cancel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> SwipeTuning {
        SwipeTuning::default()
    }

    #[test]
    fn test_displacement_commit_right() {
        // Past the 120px threshold, velocity irrelevant
        assert_eq!(
            classify_release(150.0, 0.0, &tuning()),
            SwipeIntent::Commit(SwipeDirection::Right)
        );
        // Even with opposing velocity
        assert_eq!(
            classify_release(150.0, -0.2, &tuning()),
            SwipeIntent::Commit(SwipeDirection::Right)
        );
    }

    #[test]
    fn test_displacement_commit_left() {
        assert_eq!(
            classify_release(-121.0, 0.0, &tuning()),
            SwipeIntent::Commit(SwipeDirection::Left)
        );
    }

    #[test]
    fn test_velocity_alone_commits() {
        // dx well under threshold, flick velocity carries it
        assert_eq!(
            classify_release(10.0, 0.8, &tuning()),
            SwipeIntent::Commit(SwipeDirection::Right)
        );
        assert_eq!(
            classify_release(-10.0, -0.8, &tuning()),
            SwipeIntent::Commit(SwipeDirection::Left)
        );
    }

    #[test]
    fn test_sub_threshold_release_cancels() {
        assert_eq!(classify_release(40.0, 0.1, &tuning()), SwipeIntent::Cancel);
        assert_eq!(classify_release(-40.0, -0.1, &tuning()), SwipeIntent::Cancel);
        assert_eq!(classify_release(0.0, 0.0, &tuning()), SwipeIntent::Cancel);
    }

    #[test]
    fn test_exact_threshold_is_not_a_commit() {
        assert_eq!(classify_release(120.0, 0.0, &tuning()), SwipeIntent::Cancel);
        assert_eq!(classify_release(0.0, 0.5, &tuning()), SwipeIntent::Cancel);
    }

    #[test]
    fn test_double_trigger_resolved_by_displacement_sign() {
        // Not reachable from a real gesture, the guard still has to hold:
        // rightward displacement with a hard leftward flick
        assert_eq!(
            classify_release(130.0, -0.9, &tuning()),
            SwipeIntent::Commit(SwipeDirection::Right)
        );
        assert_eq!(
            classify_release(-130.0, 0.9, &tuning()),
            SwipeIntent::Commit(SwipeDirection::Left)
        );
    }
}
