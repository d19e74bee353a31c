//! Directive processors, one per directive family.

pub mod authorization;
pub mod discovery;
pub mod power;
pub mod report;

pub use authorization::{Authorization, AuthorizationEndpoints};
pub use discovery::{Discovery, EndpointsError};
pub use power::PowerController;
pub use report::Report;
