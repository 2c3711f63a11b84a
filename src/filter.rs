//! Event filtering.

/// Decide whether an incoming event type should be handled.
///
/// An empty `target` is the wildcard and matches every event. Anything else
/// must equal the incoming type exactly: case-sensitive, no patterns.
pub fn should_handle(target: &str, incoming: &str) -> bool {
    target.is_empty() || target == incoming
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;

    #[test]
    fn test_empty_target_matches_everything() {
        for event_type in EventType::ALL {
            assert!(should_handle("", event_type.as_str()));
        }
    }

    #[test]
    fn test_exact_match_only() {
        assert!(should_handle("transfer.complete", "transfer.complete"));
        assert!(!should_handle("transfer.complete", "download.added"));
        assert!(!should_handle("transfer.complete", "transfer.completed"));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert!(!should_handle("transfer.complete", "Transfer.Complete"));
    }
}
