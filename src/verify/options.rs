use std::time::Duration;

use crate::mx::DEFAULT_MX_TIMEOUT;
use crate::validator::ValidationMode;
use crate::vendors::ApiKeys;

/// Controls one run of [`verify_email`](crate::verify_email).
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    pub api_keys: ApiKeys,
    pub skip_apis: bool,
    pub validation_mode: ValidationMode,
    pub mx_timeout: Duration,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            api_keys: ApiKeys::default(),
            skip_apis: false,
            validation_mode: ValidationMode::Strict,
            mx_timeout: DEFAULT_MX_TIMEOUT,
        }
    }
}

impl VerifyOptions {
    pub fn new(api_keys: ApiKeys) -> Self {
        Self {
            api_keys,
            ..Self::default()
        }
    }

    pub fn with_skip_apis(mut self, skip: bool) -> Self {
        self.skip_apis = skip;
        self
    }

    pub fn with_validation_mode(mut self, mode: ValidationMode) -> Self {
        self.validation_mode = mode;
        self
    }

    /// A zero timeout falls back to the default DNS deadline.
    pub fn with_mx_timeout(mut self, timeout: Duration) -> Self {
        self.mx_timeout = if timeout.is_zero() {
            DEFAULT_MX_TIMEOUT
        } else {
            timeout
        };
        self
    }
}
