//! Capability contracts a device may satisfy.
//!
//! A [`Device`] is whatever the device factory hands out for an endpoint.
//! Processors ask it at runtime which capabilities it supports; a device
//! supporting none of them is still a valid device.

/// A device whose power state can be read and changed.
pub trait PowerDevice: Send + Sync {
    /// Switches the device and returns the state it ended up in.
    fn set_power_state(&self, on: bool) -> anyhow::Result<bool>;

    fn power_state(&self) -> anyhow::Result<bool>;
}

/// A device measuring temperature in celsius.
pub trait TemperatureSensor: Send + Sync {
    fn temperature(&self) -> f32;
}

/// A device able to report its connectivity.
pub trait EndpointHealth: Send + Sync {
    fn is_connected(&self) -> bool;
}

/// Handle to a device created for a single directive.
///
/// Every capability accessor defaults to `None`; implementors override
/// the ones they support, usually by returning `Some(self)`.
pub trait Device: Send + Sync {
    fn as_power_device(&self) -> Option<&dyn PowerDevice> {
        None
    }

    fn as_temperature_sensor(&self) -> Option<&dyn TemperatureSensor> {
        None
    }

    fn as_endpoint_health(&self) -> Option<&dyn EndpointHealth> {
        None
    }
}
