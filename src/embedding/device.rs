use candle_core::Device;
use tracing::debug;

#[cfg(any(feature = "metal", feature = "cuda"))]
use tracing::{info, warn};

/// Picks the best compute device compiled into this build.
///
/// Probing never fails startup; every path terminates on a usable device,
/// with the CPU as the final fallback.
pub fn select_device() -> Device {
    #[cfg(feature = "metal")]
    match Device::new_metal(0) {
        Ok(device) => {
            info!("Embedding on Metal");
            return device;
        }
        Err(e) => warn!(error = %e, "Metal probe failed"),
    }

    #[cfg(feature = "cuda")]
    match Device::new_cuda(0) {
        Ok(device) => {
            info!("Embedding on CUDA");
            return device;
        }
        Err(e) => warn!(error = %e, "CUDA probe failed"),
    }

    debug!("Embedding on the CPU");
    Device::Cpu
}
