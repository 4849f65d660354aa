//! Bevy systems
//!
//! This module contains all the systems that operate on entities
//! and resources in the Bevy ECS.

pub mod scene;
pub mod manipulator;
pub mod subject;
pub mod frame_extraction;

pub use scene::setup_scene;
pub use manipulator::{highlight_handles, pose_scene_from_angles};
pub use subject::sync_subject_texture;
pub use frame_extraction::extract_and_process_frame;
