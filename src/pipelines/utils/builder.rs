use super::DeviceRequest;

/// Options, device and identity shared by pipeline builders.
pub struct StandardPipelineBuilder<Opts> {
    pub(crate) options: Opts,
    pub(crate) device_request: DeviceRequest,
    pub(crate) instance_id: Option<u64>,
}

impl<Opts> StandardPipelineBuilder<Opts> {
    pub fn new(options: Opts) -> Self {
        Self {
            options,
            device_request: DeviceRequest::Cpu,
            instance_id: None,
        }
    }

    pub(crate) fn device_request_mut(&mut self) -> &mut DeviceRequest {
        &mut self.device_request
    }
}
