use glam::{EulerRot, Mat3, Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Canonical forward direction the look rotation is applied to
pub const CANONICAL_FORWARD: Vec3 = Vec3::new(0.0, 0.0, -1.0);
/// Canonical up direction the look rotation is applied to
pub const CANONICAL_UP: Vec3 = Vec3::Y;

/// Axis-aligned box every accepted camera position must lie inside.
///
/// A move either lands fully inside the box or the position is left
/// unchanged - there is no clamping to the boundary and no partial step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MovementBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl MovementBounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Whether a point lies inside the box (boundary inclusive)
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

impl Default for MovementBounds {
    fn default() -> Self {
        Self {
            min: Vec3::new(-9.0, -6.0, -29.0),
            max: Vec3::new(9.0, 6.0, 2.0),
        }
    }
}

/// The six free-fly movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl MoveDirection {
    pub fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

/// Free-fly camera with yaw/pitch look and bounded movement.
///
/// `view_direction` and `up` are always recomputed together from the
/// accumulated yaw/pitch angles; they are never mutated independently.
/// Yaw and pitch accumulate in degrees without wrapping or clamping, so
/// extreme pitch reproduces the original gimbal behavior on purpose.
pub struct Camera {
    pub position: Vec3,
    pub view_direction: Vec3,
    pub up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    speed: f32,
    bounds: MovementBounds,
}

impl Camera {
    pub fn new(speed: f32, bounds: MovementBounds) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.281),
            view_direction: CANONICAL_FORWARD,
            up: CANONICAL_UP,
            yaw: 0.0,
            pitch: 0.0,
            speed,
            bounds,
        }
    }

    /// Accumulate a look delta (degrees) and rebuild the orientation.
    ///
    /// The combined yaw-pitch rotation (roll fixed at zero) is applied to
    /// the canonical forward and up vectors in one step.
    pub fn apply_look(&mut self, delta: Vec2) {
        self.yaw += delta.x;
        self.pitch += delta.y;
        let rotation = Mat3::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            0.0,
        );
        self.view_direction = rotation * CANONICAL_FORWARD;
        self.up = rotation * CANONICAL_UP;
    }

    /// Step the camera along one of the six movement axes.
    ///
    /// The candidate position is accepted only if it lies inside the
    /// movement bounds; otherwise the call is a silent no-op.
    pub fn apply_move(&mut self, direction: MoveDirection, dt: f32) {
        let step = self.speed * dt;
        let right = self.view_direction.cross(self.up).normalize();
        let candidate = match direction {
            MoveDirection::Forward => self.position + step * self.view_direction,
            MoveDirection::Backward => self.position - step * self.view_direction,
            MoveDirection::Right => self.position + step * right,
            MoveDirection::Left => self.position - step * right,
            MoveDirection::Up => self.position + step * self.up,
            MoveDirection::Down => self.position - step * self.up,
        };
        if self.bounds.contains(candidate) {
            self.position = candidate;
        }
    }

    /// World-to-view matrix for the current pose
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.view_direction, self.up)
    }

    pub fn bounds(&self) -> &MovementBounds {
        &self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn test_camera() -> Camera {
        Camera::new(20.0, MovementBounds::default())
    }

    #[test]
    fn starts_at_default_pose() {
        let camera = test_camera();
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 1.281));
        assert_eq!(camera.view_direction, CANONICAL_FORWARD);
        assert_eq!(camera.up, CANONICAL_UP);
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);
    }

    #[test]
    fn forward_move_inside_bounds_is_accepted() {
        let mut camera = test_camera();
        camera.apply_move(MoveDirection::Forward, 1.0);

        // 20 units/s for 1s along -Z from z=1.281
        let expected = Vec3::new(0.0, 0.0, -18.719);
        assert!(
            (camera.position - expected).length() < EPSILON,
            "expected {expected}, got {}",
            camera.position
        );
    }

    #[test]
    fn forward_move_outside_bounds_is_rejected_whole() {
        let mut camera = test_camera();
        camera.apply_move(MoveDirection::Forward, 1.0);
        let before = camera.position;

        // Candidate z = -18.719 - 40 = -58.719, outside [-29, 2]
        camera.apply_move(MoveDirection::Forward, 2.0);
        assert_eq!(
            camera.position, before,
            "rejected move must not change the position at all"
        );
    }

    #[test]
    fn opposite_moves_restore_position() {
        let directions = [
            MoveDirection::Forward,
            MoveDirection::Backward,
            MoveDirection::Left,
            MoveDirection::Right,
            MoveDirection::Up,
            MoveDirection::Down,
        ];
        for direction in directions {
            let mut camera = test_camera();
            // Move to an interior point first; from the default pose a
            // backward step would exit the box and be rejected, which the
            // restore property does not cover.
            camera.apply_move(MoveDirection::Forward, 0.5);
            let start = camera.position;
            camera.apply_move(direction, 0.1);
            camera.apply_move(direction.opposite(), 0.1);
            assert!(
                (camera.position - start).length() < EPSILON,
                "{direction:?} then {:?} drifted to {}",
                direction.opposite(),
                camera.position
            );
        }
    }

    #[test]
    fn accepted_positions_stay_inside_bounds() {
        let mut camera = test_camera();
        let bounds = *camera.bounds();
        let directions = [
            MoveDirection::Forward,
            MoveDirection::Left,
            MoveDirection::Down,
            MoveDirection::Forward,
            MoveDirection::Forward,
            MoveDirection::Right,
            MoveDirection::Up,
        ];
        for direction in directions.iter().cycle().take(200) {
            camera.apply_move(*direction, 0.25);
            assert!(
                bounds.contains(camera.position),
                "position {} escaped the bounds",
                camera.position
            );
        }
    }

    #[test]
    fn zero_look_delta_leaves_orientation_unchanged() {
        let mut camera = test_camera();
        camera.apply_look(Vec2::new(33.0, -12.0));
        let view_direction = camera.view_direction;
        let up = camera.up;

        camera.apply_look(Vec2::ZERO);
        assert!((camera.view_direction - view_direction).length() < EPSILON);
        assert!((camera.up - up).length() < EPSILON);
    }

    #[test]
    fn yaw_only_look_rotates_about_up() {
        let mut camera = test_camera();
        camera.apply_look(Vec2::new(10.0, 0.0));

        assert_eq!(camera.yaw, 10.0);
        assert_eq!(camera.pitch, 0.0);
        // Rotation about an axis parallel to up leaves up fixed
        assert!((camera.up - CANONICAL_UP).length() < EPSILON);

        let angle = camera.view_direction.dot(CANONICAL_FORWARD).acos().to_degrees();
        assert!(
            (angle - 10.0).abs() < 0.01,
            "view direction should rotate 10 degrees, got {angle}"
        );
    }

    #[test]
    fn orientation_stays_orthonormal_under_look_sequences() {
        let mut camera = test_camera();
        let deltas = [
            Vec2::new(37.0, 12.5),
            Vec2::new(-120.0, 45.0),
            Vec2::new(720.0, -300.0),
            Vec2::new(3.0, 89.9),
            Vec2::new(-0.25, 0.75),
        ];
        for delta in deltas {
            camera.apply_look(delta);
            assert!((camera.view_direction.length() - 1.0).abs() < EPSILON);
            assert!((camera.up.length() - 1.0).abs() < EPSILON);
            assert!(camera.view_direction.dot(camera.up).abs() < EPSILON);
        }
    }

    #[test]
    fn pitch_and_yaw_accumulate_without_clamping() {
        let mut camera = test_camera();
        camera.apply_look(Vec2::new(400.0, 200.0));
        camera.apply_look(Vec2::new(400.0, 200.0));
        assert_eq!(camera.yaw, 800.0);
        assert_eq!(camera.pitch, 400.0);
    }

    #[test]
    fn look_does_not_touch_position() {
        let mut camera = test_camera();
        let position = camera.position;
        camera.apply_look(Vec2::new(90.0, -45.0));
        assert_eq!(camera.position, position);
    }

    #[test]
    fn view_matrix_is_pure() {
        let mut camera = test_camera();
        camera.apply_look(Vec2::new(25.0, -10.0));
        let first = camera.view_matrix();
        let second = camera.view_matrix();
        assert_eq!(first, second);
        assert_eq!(camera.yaw, 25.0);
    }

    #[test]
    fn view_matrix_maps_position_to_origin() {
        let camera = test_camera();
        let view = camera.view_matrix();
        let eye_in_view = view.transform_point3(camera.position);
        assert!(eye_in_view.length() < EPSILON);
    }

    #[test]
    fn bounds_boundary_is_inclusive() {
        let bounds = MovementBounds::default();
        assert!(bounds.contains(Vec3::new(9.0, 6.0, 2.0)));
        assert!(bounds.contains(Vec3::new(-9.0, -6.0, -29.0)));
        assert!(!bounds.contains(Vec3::new(9.001, 0.0, 0.0)));
        assert!(!bounds.contains(Vec3::new(0.0, 0.0, -29.001)));
    }
}
