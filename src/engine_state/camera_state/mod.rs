//! # Camera State Management
//!
//! This module handles the first-person view:
//! - Camera position and orientation tracking
//! - Mouse look with a pitch clamp
//! - Forward/right vectors for movement and ray picking

pub mod camera;

pub use camera::Camera;
