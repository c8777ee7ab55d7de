//! Backend Selector
//!
//! Selects the burn backend based on feature flags. Only one backend can be
//! active at a time.

use burn::backend::Autodiff;

// ============ WGPU BACKEND ============
#[cfg(all(feature = "gpu", not(feature = "cpu")))]
mod backend_impl {
    pub use burn::backend::wgpu::{Wgpu, WgpuDevice};
    pub type MyBackend = Wgpu<f32, i32>;

    pub fn get_device() -> WgpuDevice {
        WgpuDevice::BestAvailable
    }
}

// ============ CPU (NDARRAY) BACKEND ============
#[cfg(all(feature = "cpu", not(feature = "gpu")))]
mod backend_impl {
    pub use burn::backend::ndarray::{NdArray, NdArrayDevice};
    pub type MyBackend = NdArray;

    pub fn get_device() -> NdArrayDevice {
        NdArrayDevice::Cpu
    }
}

// ============ FALLBACK (BOTH OR NEITHER FEATURE) ============
#[cfg(not(any(
    all(feature = "gpu", not(feature = "cpu")),
    all(feature = "cpu", not(feature = "gpu"))
)))]
mod backend_impl {
    pub use burn::backend::ndarray::{NdArray, NdArrayDevice};
    pub type MyBackend = NdArray;

    pub fn get_device() -> NdArrayDevice {
        NdArrayDevice::Cpu
    }
}

// ============ PUBLIC EXPORTS ============
pub use backend_impl::{get_device, MyBackend};

/// Backend with autodiff for training
pub type TrainBackend = Autodiff<MyBackend>;
