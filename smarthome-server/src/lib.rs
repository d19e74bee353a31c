pub mod config;
pub mod http;
pub mod simulated;
pub mod startup;
pub mod validator;

pub use config::{ConfigError, ServerConfig};
pub use http::{create_router, AppState, BasicAuth};
pub use simulated::SimulatedDeviceFactory;
pub use startup::{build_dispatcher, build_state, StartupError};
pub use validator::{ResponseValidator, SchemaValidator, ValidationError};
