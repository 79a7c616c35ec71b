//! What happens to an error returned by an operation run under a scoped flag change.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Log the error with `log::error!` and report "no value" to the caller.
    #[default]
    Log,
    /// Hand the error back to the caller.
    Propagate,
}

impl FailurePolicy {
    /// Turn the result of a scoped operation into what the caller sees.
    ///
    /// Called after the scoped state has been restored.
    pub fn settle<R>(self, result: anyhow::Result<R>, operation: &str) -> anyhow::Result<Option<R>> {
        match (result, self) {
            (Ok(value), _) => Ok(Some(value)),
            (Err(err), FailurePolicy::Log) => {
                log::error!("{operation} failed: {err:#}");
                Ok(None)
            }
            (Err(err), FailurePolicy::Propagate) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_default_is_log() {
        assert_eq!(FailurePolicy::default(), FailurePolicy::Log);
    }

    #[test]
    fn test_settle() {
        assert_eq!(FailurePolicy::Log.settle(Ok(3), "op").unwrap(), Some(3));
        assert_eq!(FailurePolicy::Propagate.settle(Ok(3), "op").unwrap(), Some(3));

        let swallowed = FailurePolicy::Log.settle::<()>(Err(anyhow!("boom")), "op");
        assert!(matches!(swallowed, Ok(None)));

        let surfaced = FailurePolicy::Propagate.settle::<()>(Err(anyhow!("boom")), "op");
        assert_eq!(surfaced.unwrap_err().to_string(), "boom");
    }

    #[test]
    fn test_names() {
        assert_eq!(FailurePolicy::Propagate.to_string(), "propagate");
        assert_eq!("log".parse::<FailurePolicy>().unwrap(), FailurePolicy::Log);
        assert!("ignore".parse::<FailurePolicy>().is_err());
    }
}
