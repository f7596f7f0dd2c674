//! Viewer context: one camera, its canvas and its movement controller
//!
//! The shell owns a `Viewer` and drives it from a single thread. Ticks and
//! paints both go through it, and `on_tick` needs `&mut self`, so a tick can
//! never interleave with a projection pass over the same camera.

use std::time::Duration;

use crate::geometry::{LineSegment, Wireframe};
use crate::movement::{InputState, MovementConfig, MovementController};
use crate::projection::{self, Camera, HalfCanvas, ScreenPoint};
use crate::vector::Vector3;

#[derive(Debug, Clone, Default)]
pub struct Viewer {
    camera: Camera,
    half_canvas: HalfCanvas,
    controller: MovementController,
}

impl Viewer {
    pub fn new(camera: Camera, config: MovementConfig) -> Self {
        Self {
            camera,
            half_canvas: HalfCanvas::default(),
            controller: MovementController::new(config),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn half_canvas(&self) -> HalfCanvas {
        self.half_canvas
    }

    pub fn controller(&self) -> &MovementController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut MovementController {
        &mut self.controller
    }

    pub fn is_camera_mode(&self) -> bool {
        self.controller.is_navigating()
    }

    pub fn set_camera_mode(&mut self, enabled: bool) {
        self.controller.set_camera_mode(enabled);
    }

    /// Fisheye slider; always triggers a redraw in the shell
    pub fn set_fisheye(&mut self, slider: f64) {
        self.camera.set_fisheye(slider);
    }

    /// Canvas resized, recompute the half size used by projection
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.half_canvas = HalfCanvas::from_size(width, height);
        log::debug!(
            "canvas resized to {width}x{height}, half {}x{}",
            self.half_canvas.width,
            self.half_canvas.height
        );
    }

    /// Returns true when the camera moved and a redraw is needed.
    pub fn on_tick(&mut self, input: &InputState, elapsed: Option<Duration>) -> bool {
        self.controller
            .on_tick(&mut self.camera.pos_n_rot, input, elapsed)
    }

    pub fn project_to_screen(&self, point: Vector3) -> ScreenPoint {
        projection::project_to_screen(point, &self.camera, self.half_canvas)
    }

    pub fn project_segment(&self, segment: &LineSegment) -> (ScreenPoint, ScreenPoint) {
        projection::project_segment(segment.start, segment.end, &self.camera, self.half_canvas)
    }

    /// Projects every segment of a wireframe, in order.
    pub fn project_wireframe<'a>(
        &'a self,
        wireframe: &'a Wireframe,
    ) -> impl Iterator<Item = (ScreenPoint, ScreenPoint)> + 'a {
        wireframe
            .segments
            .iter()
            .map(move |segment| self.project_segment(segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use crate::movement::MouseDelta;
    use crate::transform::Transform;

    fn viewer() -> Viewer {
        let mut viewer = Viewer::new(Camera::default(), MovementConfig::default());
        viewer.on_resize(800, 600);
        viewer
    }

    #[test]
    fn test_resize() {
        let mut viewer = viewer();
        assert_eq!(viewer.half_canvas(), HalfCanvas::new(400, 300));
        viewer.on_resize(101, 50);
        assert_eq!(viewer.half_canvas(), HalfCanvas::new(50, 25));
    }

    #[test]
    fn test_tick_then_project() {
        let mut viewer = viewer();
        let target = Vector3::new(0.0, 0.0, 10.0);
        assert_eq!(viewer.project_to_screen(target), ScreenPoint::new(400, 300));

        let forward = InputState {
            forward: true,
            ..Default::default()
        };
        // idle: no movement
        assert!(!viewer.on_tick(&forward, None));
        assert_eq!(viewer.camera().pos_n_rot.position, Vector3::ORIGIN);

        viewer.set_camera_mode(true);
        assert!(viewer.is_camera_mode());
        assert!(viewer.on_tick(&forward, None));
        assert_abs_diff_eq!(
            viewer.camera().pos_n_rot.position,
            Vector3::new(0.0, 0.0, 0.4),
            epsilon = 1e-12
        );

        // an off-axis point drifts outward as the camera approaches
        let side = Vector3::new(1.0, 0.0, 10.0);
        let before = projection::project_to_screen(side, &Camera::default(), viewer.half_canvas());
        let after = viewer.project_to_screen(side);
        assert!(after.x > before.x);
    }

    #[test]
    fn test_look_keeps_target_consistent() {
        let mut viewer = viewer();
        viewer.set_camera_mode(true);
        let look = InputState {
            mouse: MouseDelta { dx: -12.0, dy: 7.0 },
            ..Default::default()
        };
        assert!(viewer.on_tick(&look, None));

        let transform: Transform = viewer.camera().pos_n_rot;
        let ahead = transform.position + transform.forward() * 3.0;
        assert_eq!(viewer.project_to_screen(ahead), ScreenPoint::new(400, 300));
    }

    #[test]
    fn test_fisheye() {
        let mut viewer = viewer();
        viewer.set_fisheye(200.0);
        assert_relative_eq!(viewer.camera().depth_stretch(), 2.0, epsilon = 1e-12);
        viewer.camera_mut().set_depth_stretch(0.0);
        assert_eq!(viewer.camera().depth_stretch(), 1.0);
    }

    #[test]
    fn test_project_wireframe() {
        let viewer = viewer();
        let cube = Wireframe::cube(Vector3::new(0.0, 0.0, 5.0), 2.0);
        let projected: Vec<_> = viewer.project_wireframe(&cube).collect();
        assert_eq!(projected.len(), 12);
        assert!(projected
            .iter()
            .all(|(a, b)| (0..=800).contains(&a.x) && (0..=600).contains(&b.y)));
    }
}
