use crate::error::Result;

/// What to do when posting a record fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Return the error to the caller
    Propagate,
    /// Drop the record and report success. Only transport/API errors are dropped.
    Silent,
}

impl FailurePolicy {
    pub fn from_fail_silent(fail_silent: bool) -> Self {
        if fail_silent { Self::Silent } else { Self::Propagate }
    }

    pub fn apply(self, result: Result<()>) -> Result<()> {
        match (self, result) {
            (_, Ok(())) => Ok(()),
            (Self::Silent, Err(e)) if e.is_transport() => {
                tracing::debug!(error = %e, "Dropping log record after failed send");
                Ok(())
            }
            (_, Err(e)) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SlackLogError;

    #[test]
    fn test_silent_swallows_transport_errors() {
        let result = FailurePolicy::Silent.apply(Err(SlackLogError::SlackApi("timeout".into())));
        assert!(result.is_ok());
    }

    #[test]
    fn test_propagate_returns_error() {
        let result = FailurePolicy::Propagate.apply(Err(SlackLogError::SlackApi("timeout".into())));
        assert!(matches!(result, Err(SlackLogError::SlackApi(_))));
    }

    #[test]
    fn test_silent_keeps_non_transport_errors() {
        let result = FailurePolicy::Silent.apply(Err(SlackLogError::UserNotFound("carol".into())));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_flag() {
        assert_eq!(FailurePolicy::from_fail_silent(true), FailurePolicy::Silent);
        assert_eq!(FailurePolicy::from_fail_silent(false), FailurePolicy::Propagate);
    }
}
