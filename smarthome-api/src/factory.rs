use smarthome_core::Device;

/// Creates the device handling an endpoint addressed by a directive.
///
/// `endpoint_type` and `endpoint_id` come from the endpoint cookie. The
/// created device should support the capabilities announced for that
/// endpoint during discovery.
pub trait DeviceFactory: Send + Sync {
    fn new_device(&self, endpoint_type: &str, endpoint_id: &str) -> anyhow::Result<Box<dyn Device>>;
}
