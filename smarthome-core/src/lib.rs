pub mod capabilities;
pub mod clock;
pub mod context;
pub mod directive;
pub mod discoverable;
pub mod endpoint;
pub mod error;
pub mod header;
pub mod response;

pub use capabilities::{Device, EndpointHealth, PowerDevice, TemperatureSensor};
pub use clock::{Clock, FixedClock, SystemClock};
pub use context::{Context, Property, PropertyValue};
pub use directive::Directive;
pub use discoverable::{Capability, DiscoverableEndpoint, DisplayCategory};
pub use endpoint::{Cookie, Endpoint, Scope};
pub use error::{AlexaError, DirectiveParseError, ErrorType, Result};
pub use header::Header;
pub use response::{Event, Response};
