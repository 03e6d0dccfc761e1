//! Derives the `featured` flag of an offer from its engagement.
//!
//! The flag is a latch: once set it is never cleared by engagement flows,
//! so removing a favorite does not re-run the rule.

pub const FEATURE_MIN_LIKES: i32 = 10;
pub const FEATURE_MIN_COMMENTS: i64 = 5;

pub fn should_feature(likes: i32, comment_count: i64, already_featured: bool) -> bool {
    already_featured || (likes >= FEATURE_MIN_LIKES && comment_count >= FEATURE_MIN_COMMENTS)
}

/// True only on the transition into featured, so callers write the flag once.
pub fn needs_promotion(likes: i32, comment_count: i64, already_featured: bool) -> bool {
    !already_featured && should_feature(likes, comment_count, already_featured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_thresholds_is_not_featured() {
        assert!(!should_feature(9, 5, false));
        assert!(!should_feature(10, 4, false));
        assert!(!should_feature(0, 0, false));
    }

    #[test]
    fn test_reaching_both_thresholds_features() {
        assert!(should_feature(10, 5, false));
        assert!(should_feature(250, 40, false));
    }

    #[test]
    fn test_latch_holds_below_thresholds() {
        assert!(should_feature(0, 0, true));
        assert!(should_feature(9, 5, true));
    }

    #[test]
    fn test_promotion_only_on_transition() {
        assert!(needs_promotion(10, 5, false));
        assert!(!needs_promotion(11, 5, true));
        assert!(!needs_promotion(9, 5, false));
    }

    #[test]
    fn test_ninth_to_tenth_like_with_five_comments() {
        assert!(!should_feature(9, 5, false));
        assert!(needs_promotion(9 + 1, 5, false));
    }
}
