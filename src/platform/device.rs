//! Device pixel ratio surface for rasterization scaling.

use std::sync::Mutex;

/// Scale used when the platform reports no usable pixel ratio.
pub const FALLBACK_PIXEL_RATIO: f32 = 2.0;

/// Reported display metrics. A `pixel_ratio` of zero (or less) means the
/// platform did not report one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceMetrics {
    pub pixel_ratio: f32,
}

/// Source of the device pixel ratio used to size raster surfaces.
pub trait PixelRatioSource: Send + Sync {
    fn metrics(&self) -> DeviceMetrics;
}

/// Pixel ratio source holding a configured value. Mutable so embedders can
/// follow display changes.
pub struct StaticDevice {
    metrics: Mutex<DeviceMetrics>,
}

impl StaticDevice {
    pub fn new(pixel_ratio: f32) -> Self {
        StaticDevice {
            metrics: Mutex::new(DeviceMetrics { pixel_ratio }),
        }
    }

    pub fn set_pixel_ratio(&self, pixel_ratio: f32) {
        self.metrics.lock().unwrap().pixel_ratio = pixel_ratio;
    }
}

impl Default for StaticDevice {
    fn default() -> Self {
        StaticDevice::new(0.0)
    }
}

impl PixelRatioSource for StaticDevice {
    fn metrics(&self) -> DeviceMetrics {
        *self.metrics.lock().unwrap()
    }
}

/// The scale actually applied to raster surfaces: the reported ratio, or
/// [`FALLBACK_PIXEL_RATIO`] when none was reported.
pub fn effective_scale(metrics: &DeviceMetrics) -> f32 {
    if metrics.pixel_ratio > 0.0 {
        metrics.pixel_ratio
    } else {
        FALLBACK_PIXEL_RATIO
    }
}
