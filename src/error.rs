//! Error types for the Tauri bridge
//!
//! The prompt engine itself has no error paths; everything here comes from
//! shared state, frame transfer or decoding user-supplied images.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Shared state lock poisoned: {0}")]
    StatePoisoned(String),
    #[error("No frame yet (scene still loading)")]
    FrameNotReady,
    #[error("Invalid base64 data: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("Failed to decode subject image: {0}")]
    InvalidImage(#[from] image::ImageError),
    #[error("Failed to encode frame: {0}")]
    FrameEncoding(String),
    #[error("Frame buffer does not match {width}x{height}")]
    FrameSizeMismatch { width: u32, height: u32 },
    #[error("Failed to serialize response: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl<T> From<std::sync::PoisonError<T>> for BridgeError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        BridgeError::StatePoisoned(err.to_string())
    }
}

// Tauri commands return errors to the frontend as plain strings
impl Serialize for BridgeError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;
