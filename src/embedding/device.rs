use candle_core::Device;
use tracing::{debug, warn};

#[cfg(any(feature = "metal", feature = "cuda"))]
use tracing::info;

use super::error::EmbeddingError;

/// Picks the compute device for model inference.
///
/// GPU backends are only tried when compiled in (`metal` / `cuda` features). Every
/// failure is logged and the CPU is used as the final fallback, so this only errors
/// if a future backend makes the CPU unusable.
pub fn select_device() -> Result<Device, EmbeddingError> {
    #[allow(unused_mut)]
    let mut failures: Vec<String> = Vec::new();

    #[cfg(feature = "metal")]
    {
        match Device::new_metal(0) {
            Ok(device) => {
                info!("Using Metal GPU for inference");
                return Ok(device);
            }
            Err(e) => failures.push(format!("metal: {e}")),
        }
    }

    #[cfg(feature = "cuda")]
    {
        match Device::new_cuda(0) {
            Ok(device) => {
                info!("Using CUDA GPU for inference");
                return Ok(device);
            }
            Err(e) => failures.push(format!("cuda: {e}")),
        }
    }

    if failures.is_empty() {
        debug!("No GPU backend compiled in, using CPU");
    } else {
        warn!(reason = %failures.join("; "), "GPU unavailable, falling back to CPU");
    }

    Ok(Device::Cpu)
}
