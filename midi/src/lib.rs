pub mod constants;
pub mod error;
pub mod messages;
pub mod sink;

#[cfg(feature = "device")]
pub mod device;
