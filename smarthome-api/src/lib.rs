pub mod authority;
pub mod directives;
pub mod dispatcher;
pub mod error;
pub mod factory;
pub mod processor;

#[cfg(test)]
mod mocks;
#[cfg(test)]
mod authorization_tests;

pub use authority::{AccessTokens, Authority, RestrictedAuthority};
pub use directives::{Authorization, AuthorizationEndpoints, Discovery, PowerController, Report};
pub use dispatcher::Dispatcher;
pub use error::{DirectiveError, Result};
pub use factory::DeviceFactory;
pub use processor::DirectiveProcessor;
