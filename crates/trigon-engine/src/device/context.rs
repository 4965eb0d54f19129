use std::sync::Arc;

use crate::error::InitError;

use super::GpuInit;

/// Owns the wgpu core objects shared by every other GPU component.
///
/// Created once at startup and kept for the lifetime of the process. Surface
/// management is separate because it requires a window.
pub struct GraphicsContext {
    instance: wgpu::Instance,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl GraphicsContext {
    /// Acquires an adapter and then a device, blocking on each request.
    ///
    /// The device request is never issued when the adapter request fails.
    pub fn new(init: &GpuInit) -> Result<Self, InitError> {
        let (instance, adapter) = Self::acquire_adapter(init)?;
        let (device, queue) = Self::acquire_device(&adapter, init)?;

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
        })
    }

    /// Creates the instance and requests an adapter.
    ///
    /// The request is not tied to a surface; presentation support is checked
    /// when the surface is created.
    pub fn acquire_adapter(init: &GpuInit) -> Result<(wgpu::Instance, wgpu::Adapter), InitError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: init.backends,
            ..Default::default()
        });

        log::info!("requesting adapter...");
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: init.power_preference,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))?;

        let info = adapter.get_info();
        log::info!(
            "got adapter: {} ({:?}, {:?})",
            info.name,
            info.device_type,
            info.backend
        );

        Ok((instance, adapter))
    }

    /// Requests the logical device and queue from `adapter`.
    ///
    /// Installs an uncaptured-error handler and a device-lost callback; both
    /// only log and never affect control flow.
    pub fn acquire_device(
        adapter: &wgpu::Adapter,
        init: &GpuInit,
    ) -> Result<(wgpu::Device, wgpu::Queue), InitError> {
        log::info!("requesting device...");
        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("trigon device"),
            required_features: init.required_features,
            required_limits: init.required_limits.clone(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        }))?;

        device.on_uncaptured_error(Arc::new(|err: wgpu::Error| {
            log::error!("device error: {err}");
        }));

        device.set_device_lost_callback(|reason, message| {
            log::error!("device lost ({reason:?}): {message}");
        });

        log::info!("got device");
        Ok((device, queue))
    }

    pub fn instance(&self) -> &wgpu::Instance {
        &self.instance
    }

    pub fn adapter(&self) -> &wgpu::Adapter {
        &self.adapter
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Pumps pending device callbacks without blocking.
    pub fn poll(&self) {
        if let Err(e) = self.device.poll(wgpu::PollType::Poll) {
            log::warn!("device poll failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_failure_stops_before_device() {
        let init = GpuInit {
            backends: wgpu::Backends::empty(),
            ..GpuInit::default()
        };

        match GraphicsContext::new(&init) {
            Err(InitError::Adapter(_)) => {}
            Err(other) => panic!("expected adapter failure, got {other}"),
            Ok(_) => panic!("no backends enabled, adapter request must fail"),
        }
    }

    #[test]
    fn limits_beyond_adapter_fail_at_device_stage() {
        let Ok((_instance, adapter)) = GraphicsContext::acquire_adapter(&GpuInit::default()) else {
            eprintln!("no GPU adapter available; skipping");
            return;
        };

        let mut limits = adapter.limits();
        limits.max_texture_dimension_2d = u32::MAX;
        let init = GpuInit {
            required_limits: limits,
            ..GpuInit::default()
        };

        match GraphicsContext::acquire_device(&adapter, &init) {
            Err(InitError::Device(_)) => {}
            Err(other) => panic!("expected device failure, got {other}"),
            Ok(_) => panic!("limits above the adapter's must be rejected"),
        }
    }

    #[test]
    fn headless_context_reports_device() {
        let Ok(ctx) = GraphicsContext::new(&GpuInit::default()) else {
            eprintln!("no GPU adapter available; skipping");
            return;
        };

        assert!(ctx.device().limits().max_texture_dimension_2d >= 2048);
        ctx.poll();
    }
}
