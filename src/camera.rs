use raylib::prelude::*;

/// Orbit camera circling a fixed target, suited to inspecting a static mesh.
pub struct OrbitCamera {
    pub target: Vector3,
    pub yaw: f32,   // degrees
    pub pitch: f32, // degrees
    pub distance: f32,
    pub mouse_sensitivity: f32,
}

impl OrbitCamera {
    pub fn new(target: Vector3, distance: f32) -> Self {
        Self {
            target,
            yaw: -45.0,
            pitch: -35.0,
            distance,
            mouse_sensitivity: 0.25,
        }
    }

    pub fn to_camera3d(&self) -> Camera3D {
        let yaw_rad = self.yaw.to_radians();
        let pitch_rad = self.pitch.to_radians();
        let offset = Vector3::new(
            yaw_rad.cos() * pitch_rad.cos(),
            -pitch_rad.sin(),
            yaw_rad.sin() * pitch_rad.cos(),
        ) * self.distance;
        Camera3D::perspective(
            self.target + offset,
            self.target,
            Vector3::new(0.0, 1.0, 0.0),
            60.0,
        )
    }

    /// Re-centers on a new target, keeping the current viewing angles.
    pub fn retarget(&mut self, target: Vector3, distance: f32) {
        self.target = target;
        self.distance = distance;
    }

    pub fn update(&mut self, rl: &RaylibHandle) {
        if rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_RIGHT) {
            let md = rl.get_mouse_delta();
            self.yaw += md.x * self.mouse_sensitivity;
            self.pitch -= md.y * self.mouse_sensitivity;
            self.pitch = self.pitch.clamp(-89.0, -1.0);
        }
        let wheel = rl.get_mouse_wheel_move();
        if wheel != 0.0 {
            self.distance = (self.distance * (1.0 - wheel * 0.1)).clamp(1.0, 10_000.0);
        }
    }
}
