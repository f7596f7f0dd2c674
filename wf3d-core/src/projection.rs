//! Camera and world-to-screen projection
use crate::transform::Transform;
use crate::vector::Vector3;

/// Multiplier applied to points at or behind the camera so they land far off-canvas
pub const BEHIND_CAMERA_SCALE: f64 = 20000.0;

/// Camera configuration for wireframe rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pos_n_rot: Transform,
    depth_stretch: f64,
}

impl Camera {
    pub fn new(pos_n_rot: Transform, depth_stretch: f64) -> Self {
        let mut camera = Self {
            pos_n_rot,
            depth_stretch: 1.0,
        };
        camera.set_depth_stretch(depth_stretch);
        camera
    }

    /// Exponent applied to depth before the perspective divide, always >= 1
    pub fn depth_stretch(&self) -> f64 {
        self.depth_stretch
    }

    /// Values below 1 (and NaN) are clamped to 1.
    pub fn set_depth_stretch(&mut self, depth_stretch: f64) {
        let clamped = if depth_stretch >= 1.0 { depth_stretch } else { 1.0 };
        if clamped != depth_stretch {
            log::warn!("depth stretch {depth_stretch} clamped to {clamped}");
        }
        log::debug!("depth stretch set to {clamped}");
        self.depth_stretch = clamped;
    }

    /// Maps the fisheye slider position onto depth stretch: `slider * 0.005 + 1`.
    pub fn set_fisheye(&mut self, slider: f64) {
        self.set_depth_stretch(fisheye_to_depth_stretch(slider));
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Transform::identity(), 1.0)
    }
}

pub fn fisheye_to_depth_stretch(slider: f64) -> f64 {
    slider.max(0.0) * 0.005 + 1.0
}

/// Half of the canvas size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HalfCanvas {
    pub width: i16,
    pub height: i16,
}

impl HalfCanvas {
    pub fn new(width: i16, height: i16) -> Self {
        Self { width, height }
    }

    /// Halves a full canvas size, rounding ties to even.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            width: to_i16(width as f64 * 0.5),
            height: to_i16(height as f64 * 0.5),
        }
    }
}

/// Pixel coordinate handed to the consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenPoint {
    pub x: i16,
    pub y: i16,
}

impl ScreenPoint {
    pub fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// Project a world-space point to a screen coordinate.
///
/// Never fails: infinite results clamp to the i16 range and NaN lands on 0.
pub fn project_to_screen(point: Vector3, camera: &Camera, half: HalfCanvas) -> ScreenPoint {
    let local = camera.pos_n_rot.to_local(point);

    let depth = local.z();
    let normalized = if depth > 0.0 {
        local / depth.powf(camera.depth_stretch)
    } else {
        local * BEHIND_CAMERA_SCALE
    };

    let half_width = half.width as f64;
    let half_height = half.height as f64;

    ScreenPoint {
        x: to_i16(normalized.x() * half_width + half_width),
        y: to_i16(normalized.y() * half_height + half_height),
    }
}

/// Project both endpoints of a line segment.
pub fn project_segment(
    start: Vector3,
    end: Vector3,
    camera: &Camera,
    half: HalfCanvas,
) -> (ScreenPoint, ScreenPoint) {
    (
        project_to_screen(start, camera, half),
        project_to_screen(end, camera, half),
    )
}

fn to_i16(value: f64) -> i16 {
    if value.is_nan() {
        return 0;
    }
    value
        .clamp(i16::MIN as f64, i16::MAX as f64)
        .round_ties_even() as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn half() -> HalfCanvas {
        HalfCanvas::new(400, 300)
    }

    #[test]
    fn test_camera_creation() {
        let camera = Camera::default();
        assert_eq!(camera.depth_stretch(), 1.0);
        assert_eq!(camera.pos_n_rot, Transform::identity());
    }

    #[test]
    fn test_depth_stretch_bound() {
        let mut camera = Camera::new(Transform::identity(), 0.5);
        assert_eq!(camera.depth_stretch(), 1.0);

        camera.set_depth_stretch(f64::NAN);
        assert_eq!(camera.depth_stretch(), 1.0);

        camera.set_depth_stretch(1.75);
        assert_eq!(camera.depth_stretch(), 1.75);

        camera.set_fisheye(100.0);
        assert_relative_eq!(camera.depth_stretch(), 1.5, epsilon = 1e-12);
        camera.set_fisheye(-20.0);
        assert_eq!(camera.depth_stretch(), 1.0);
    }

    #[test]
    fn test_half_canvas_from_size() {
        assert_eq!(HalfCanvas::from_size(800, 600), HalfCanvas::new(400, 300));
        // 5 * 0.5 = 2.5 rounds to even, 7 * 0.5 = 3.5 rounds to 4
        assert_eq!(HalfCanvas::from_size(5, 7), HalfCanvas::new(2, 4));
        assert_eq!(HalfCanvas::from_size(u32::MAX, 0), HalfCanvas::new(i16::MAX, 0));
    }

    #[test]
    fn test_point_ahead_projects_to_center() {
        let camera = Camera::new(Transform::new(Vector3::new(2.0, -1.0, 5.0), 0.6, 0.3, 0.1), 1.0);
        let ahead = camera.pos_n_rot.position + camera.pos_n_rot.forward() * 0.001;
        assert_eq!(project_to_screen(ahead, &camera, half()), ScreenPoint::new(400, 300));
    }

    #[test]
    fn test_perspective_divide() {
        let camera = Camera::default();
        // x / z = 0.5 -> 0.5 * 400 + 400
        let p = project_to_screen(Vector3::new(1.0, -1.0, 2.0), &camera, half());
        assert_eq!(p, ScreenPoint::new(600, 150));

        // farther points move toward the center
        let near = project_to_screen(Vector3::new(1.0, 0.0, 2.0), &camera, half());
        let far = project_to_screen(Vector3::new(1.0, 0.0, 8.0), &camera, half());
        assert!(far.x < near.x);
        assert!(far.x > 400);
    }

    #[test]
    fn test_depth_stretch_compresses_distance() {
        let flat = Camera::default();
        let fisheye = Camera::new(Transform::identity(), 1.5);
        let point = Vector3::new(1.0, 0.0, 4.0);

        let a = project_to_screen(point, &flat, half());
        let b = project_to_screen(point, &fisheye, half());
        // 1 / 4 vs 1 / 4^1.5
        assert_eq!(a.x, 500);
        assert_eq!(b.x, 450);
    }

    #[test]
    fn test_behind_camera_clamps() {
        let camera = Camera::default();
        let p = project_to_screen(Vector3::new(1.0, -1.0, -3.0), &camera, half());
        assert_eq!(p, ScreenPoint::new(i16::MAX, i16::MIN));

        let p = project_to_screen(Vector3::new(-0.5, 0.5, 0.0), &camera, half());
        assert_eq!(p, ScreenPoint::new(i16::MIN, i16::MAX));
    }

    #[test]
    fn test_degenerate_points_never_fail() {
        let camera = Camera::default();
        let inputs = [
            Vector3::NAN,
            Vector3::MAX,
            Vector3::MIN,
            Vector3::new(f64::INFINITY, f64::NEG_INFINITY, 1.0),
            Vector3::new(1.0, 1.0, f64::INFINITY),
            Vector3::EPSILON,
        ];
        for point in inputs {
            let p = project_to_screen(point, &camera, half());
            assert!(p.x >= i16::MIN && p.x <= i16::MAX);
        }
        assert_eq!(project_to_screen(Vector3::NAN, &camera, half()), ScreenPoint::new(0, 0));
    }

    #[test]
    fn test_project_segment() {
        let camera = Camera::default();
        let (a, b) = project_segment(
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(1.0, 1.0, 1.0),
            &camera,
            half(),
        );
        assert_eq!(a, ScreenPoint::new(400, 300));
        assert_eq!(b, ScreenPoint::new(800, 600));
    }
}
