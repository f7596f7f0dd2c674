//! WF3D Core Library - Spatial math and camera engine for wireframe viewers
//!
//! This library provides the stateless math (vector algebra, oriented
//! transforms, projection) plus the small amount of camera state a viewer
//! needs to navigate a scene of line segments.

pub mod error;
pub mod geometry;
pub mod movement;
pub mod projection;
pub mod transform;
pub mod vector;
pub mod viewer;

// Re-export commonly used types
pub use error::{Result, VectorError};
pub use geometry::{LineSegment, Wireframe};
pub use movement::{InputState, MouseDelta, MovementConfig, MovementController, NavigationState, SpeedMode};
pub use projection::{project_to_screen, Camera, HalfCanvas, ScreenPoint};
pub use transform::Transform;
pub use vector::{RoundingMode, Vector3};
pub use viewer::Viewer;
