use clap::Parser;

use crate::submission::ErrorPolicy;

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum ErrorPolicyKind {
    /// Report the failure and keep the form for a retry.
    Strict,

    /// Report the failure, but announce success after the fallback delay anyway.
    Optimistic,
}

#[derive(Parser)]
pub struct ErrorPolicyArgs {
    /// What to tell the visitor when the backend call fails.
    #[clap(long = "error-policy", env = "ERROR_POLICY", default_value = "strict")]
    pub kind: ErrorPolicyKind,

    /// Delay before a failed submission is announced as successful (optimistic policy only).
    #[clap(
        long = "fallback-delay",
        env = "FALLBACK_DELAY",
        default_value_t = ErrorPolicy::DEFAULT_FALLBACK_DELAY.into()
    )]
    pub fallback_delay: humantime::Duration,
}

impl ErrorPolicyArgs {
    pub fn policy(&self) -> ErrorPolicy {
        match self.kind {
            ErrorPolicyKind::Strict => ErrorPolicy::Strict,
            ErrorPolicyKind::Optimistic => {
                ErrorPolicy::OptimisticFallback { delay: self.fallback_delay.into() }
            }
        }
    }
}
