use candle_core::Device;

/// Picks the compute device for encoder inference.
///
/// GPU backends are only attempted when compiled in; an unavailable GPU falls
/// back to the next option rather than failing, so a CPU-only host can still
/// serve the linear strategy. Selection happens once at encoder load.
pub fn select_device() -> Device {
    #[cfg(feature = "metal")]
    match Device::new_metal(0) {
        Ok(device) => {
            tracing::info!("Encoder running on Metal");
            return device;
        }
        Err(e) => tracing::warn!(error = %e, "Metal unavailable for encoder"),
    }

    #[cfg(feature = "cuda")]
    match Device::new_cuda(0) {
        Ok(device) => {
            tracing::info!("Encoder running on CUDA");
            return device;
        }
        Err(e) => tracing::warn!(error = %e, "CUDA unavailable for encoder"),
    }

    tracing::debug!("Encoder running on CPU");
    Device::Cpu
}
