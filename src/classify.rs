use crate::probe::{ProbeOutcome, ProbeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Candidate bypass.
    Interesting,
    Unremarkable,
}

/// Only an exact 200 counts as a bypass. Transport errors are never interesting.
pub fn classify(result: &ProbeResult) -> Classification {
    match result.outcome {
        ProbeOutcome::Status(200) => Classification::Interesting,
        _ => Classification::Unremarkable,
    }
}

/// Whether a bare request's status makes the target worth probing.
pub fn is_restricted(status: u16) -> bool {
    (400..500).contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    fn result(outcome: ProbeOutcome) -> ProbeResult {
        ProbeResult {
            index: 0,
            method: Method::GET,
            url: "http://example.com/".to_string(),
            headers: vec![],
            outcome,
        }
    }

    #[test]
    fn only_200_is_interesting() {
        assert_eq!(classify(&result(ProbeOutcome::Status(200))), Classification::Interesting);
        for code in [201, 204, 301, 302, 401, 403, 404, 405, 500] {
            assert_eq!(
                classify(&result(ProbeOutcome::Status(code))),
                Classification::Unremarkable,
                "{}",
                code
            );
        }
    }

    #[test]
    fn transport_errors_are_unremarkable() {
        let r = result(ProbeOutcome::TransportError("connect error".into()));
        assert_eq!(classify(&r), Classification::Unremarkable);
    }

    #[test]
    fn restricted_is_4xx() {
        assert!(is_restricted(401));
        assert!(is_restricted(403));
        assert!(is_restricted(404));
        assert!(!is_restricted(200));
        assert!(!is_restricted(302));
        assert!(!is_restricted(500));
    }
}
