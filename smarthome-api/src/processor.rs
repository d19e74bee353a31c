use crate::error::Result;
use async_trait::async_trait;
use smarthome_core::{Device, Directive, Response};

/// Something which can process an Alexa directive.
#[async_trait]
pub trait DirectiveProcessor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Checks whether the directive can be processed by this processor.
    fn is_capable(&self, directive: &Directive) -> bool;

    /// Processes the directive for an optional endpoint device.
    ///
    /// Fails with [`crate::DirectiveError::IncompatibleDirective`] when
    /// [`DirectiveProcessor::is_capable`] does not hold.
    async fn process(&self, directive: &Directive, device: Option<&dyn Device>) -> Result<Response>;
}
