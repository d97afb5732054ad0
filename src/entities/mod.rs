// Entity Models
//
// A single `Device` struct covers both wearable variants; the variant
// payload lives in `DeviceKind`.

pub mod device;

pub use device::{Device, DeviceDetails, DeviceKind, DeviceVariant};
