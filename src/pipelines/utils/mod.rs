use crate::error::{PipelineError, Result};
use candle_core::Device;

pub mod builder;
pub use builder::StandardPipelineBuilder;

/// Device a pipeline should run its model on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeviceRequest {
    /// Run on the CPU (default).
    #[default]
    Cpu,
    /// Run on the CUDA GPU with this index.
    Cuda(usize),
    /// Run on the Metal GPU with this index.
    Metal(usize),
}

impl DeviceRequest {
    /// Resolve the request into an actual [`Device`].
    pub fn resolve(self) -> Result<Device> {
        match self {
            DeviceRequest::Cpu => Ok(Device::Cpu),
            DeviceRequest::Cuda(i) => Device::new_cuda(i).map_err(|e| {
                PipelineError::Device(format!(
                    "Failed to init CUDA device {i}: {e}. Try CPU as fallback."
                ))
            }),
            DeviceRequest::Metal(i) => Device::new_metal(i).map_err(|e| {
                PipelineError::Device(format!(
                    "Failed to init Metal device {i}: {e}. Try CPU as fallback."
                ))
            }),
        }
    }
}

impl std::fmt::Display for DeviceRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceRequest::Cpu => write!(f, "cpu"),
            DeviceRequest::Cuda(i) => write!(f, "cuda:{i}"),
            DeviceRequest::Metal(i) => write!(f, "metal:{i}"),
        }
    }
}

macro_rules! impl_device_methods {
    (delegated: $builder:ident < $($gen:ident : $bound:path),* >) => {
        impl<$($gen: $bound),*> $builder<$($gen),*> {
            /// Use CPU for inference (default).
            pub fn cpu(mut self) -> Self {
                *self.0.device_request_mut() = crate::pipelines::utils::DeviceRequest::Cpu;
                self
            }

            /// Use a specific CUDA GPU for inference.
            pub fn cuda(mut self, index: usize) -> Self {
                *self.0.device_request_mut() = crate::pipelines::utils::DeviceRequest::Cuda(index);
                self
            }

            /// Use a specific Metal GPU for inference.
            pub fn metal(mut self, index: usize) -> Self {
                *self.0.device_request_mut() = crate::pipelines::utils::DeviceRequest::Metal(index);
                self
            }

            /// Use the given device request.
            pub fn device(mut self, request: crate::pipelines::utils::DeviceRequest) -> Self {
                *self.0.device_request_mut() = request;
                self
            }
        }
    };
}

pub(crate) use impl_device_methods;
