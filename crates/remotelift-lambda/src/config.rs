//! Lambda invoker configuration

use crate::error::{LambdaError, Result};

/// Environment variable naming the lambda function handling lifecycle calls.
pub const ENV_FUNCTION: &str = "REMOTELIFT_LAMBDA";

/// Environment variable carrying the AWS region when the function is named
/// rather than given as an ARN.
pub const ENV_REGION: &str = "AWS_REGION";

/// Where and how to reach the remote function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaConfig {
    /// Function name or full ARN.
    pub function: String,
    /// AWS region; may be omitted when `function` is an ARN (the ARN carries
    /// its own region).
    pub region: Option<String>,
}

impl LambdaConfig {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            region: None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Read the configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let function = std::env::var(ENV_FUNCTION)
            .ok()
            .filter(|value| !value.is_empty())
            .ok_or(LambdaError::MissingFunction)?;
        let region = std::env::var(ENV_REGION)
            .ok()
            .filter(|value| !value.is_empty());
        Self { function, region }.validated()
    }

    pub fn is_arn(&self) -> bool {
        self.function.starts_with("arn:")
    }

    /// Check the region rule: a bare function name needs an explicit region.
    pub fn validated(self) -> Result<Self> {
        if !self.is_arn() && self.region.is_none() {
            return Err(LambdaError::MissingRegion);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arn_needs_no_region() {
        let config = LambdaConfig::new("arn:aws:lambda:eu-west-1:123456789012:function:lift");
        assert!(config.is_arn());
        assert!(config.validated().is_ok());
    }

    #[test]
    fn bare_name_requires_a_region() {
        let err = LambdaConfig::new("lift").validated().unwrap_err();
        assert!(matches!(err, LambdaError::MissingRegion));

        let config = LambdaConfig::new("lift").with_region("eu-west-1");
        assert!(config.validated().is_ok());
    }

    #[test]
    fn from_env_reads_both_variables() {
        temp_env::with_vars(
            [(ENV_FUNCTION, Some("lift")), (ENV_REGION, Some("eu-west-1"))],
            || {
                let config = LambdaConfig::from_env().unwrap();
                assert_eq!(config.function, "lift");
                assert_eq!(config.region.as_deref(), Some("eu-west-1"));
            },
        );
    }

    #[test]
    fn from_env_without_function_fails() {
        temp_env::with_vars([(ENV_FUNCTION, None::<&str>), (ENV_REGION, None)], || {
            let err = LambdaConfig::from_env().unwrap_err();
            assert!(matches!(err, LambdaError::MissingFunction));
        });
    }
}
