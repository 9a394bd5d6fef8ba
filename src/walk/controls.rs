//! First-person movement controller
//!
//! Reads a per-frame key-state snapshot, computes a camera-relative wish
//! direction, scales it by the walk or run speed, clamps the step against
//! the no-go zone, and applies the result either directly to the camera or
//! as the linear velocity of an attached physics body. Head bob layers a
//! sinusoidal height offset on top while moving.
//!
//! The app builds the [`MoveState`] snapshot each frame; while the pointer
//! is free it feeds the default (idle) state so movement pauses.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::input::{Action, Bindings, Input};
use crate::physics::{Physics, RigidBodyHandle};
use crate::renderer::Camera;
use crate::walk::NoGoZone;

/// Bob frequency multiplier while running
const RUN_BOB_SCALE: f32 = 1.5;

/// Key-state snapshot for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub run: bool,
}

impl MoveState {
    /// Sample the movement actions from the input layer.
    #[must_use]
    pub fn from_input(input: &Input, bindings: &Bindings) -> Self {
        Self {
            forward: bindings.is_action_pressed(input, Action::MoveForward),
            backward: bindings.is_action_pressed(input, Action::MoveBackward),
            left: bindings.is_action_pressed(input, Action::MoveLeft),
            right: bindings.is_action_pressed(input, Action::MoveRight),
            run: bindings.is_action_pressed(input, Action::Run),
        }
    }

    /// Camera-relative horizontal wish direction.
    ///
    /// Normalized before any speed scaling, or zero when no movement key is
    /// held (or opposing keys cancel). The Y component is always zero.
    #[must_use]
    pub fn direction(&self, yaw: f32) -> Vec3 {
        let forward = Vec3::new(yaw.cos(), 0.0, yaw.sin());
        let right = forward.cross(Vec3::Y);
        let front = (self.forward as i32 - self.backward as i32) as f32;
        let side = (self.right as i32 - self.left as i32) as f32;
        (forward * front + right * side).normalize_or_zero()
    }
}

/// Sinusoidal head bob
#[derive(Debug, Clone)]
pub struct HeadBob {
    /// Bob cycles per second at walking speed
    frequency: f32,
    /// Peak height offset in meters
    amplitude: f32,
    /// Accumulated phase in radians
    phase: f32,
}

impl HeadBob {
    #[must_use]
    pub fn new(frequency: f32, amplitude: f32) -> Self {
        Self {
            frequency,
            amplitude,
            phase: 0.0,
        }
    }

    /// Advance the bob while moving.
    ///
    /// Returns the number of footfalls this frame, one per half cycle.
    pub fn advance(&mut self, dt: f32, running: bool) -> u32 {
        if dt <= 0.0 {
            return 0;
        }
        let scale = if running { RUN_BOB_SCALE } else { 1.0 };
        let next = self.phase + dt * self.frequency * scale * TAU;
        let footfalls = (next / PI).floor() as i64 - (self.phase / PI).floor() as i64;
        // Wrap to keep the phase precise over long sessions
        self.phase = next % TAU;
        footfalls.max(0) as u32
    }

    /// Reset to the baseline (no height offset).
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Current height offset in meters
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.phase.sin() * self.amplitude
    }

    /// Accumulated phase in radians
    #[must_use]
    pub fn phase(&self) -> f32 {
        self.phase
    }
}

impl Default for HeadBob {
    fn default() -> Self {
        Self::new(2.0, 0.06)
    }
}

/// Physics body the controller drives instead of the camera
#[derive(Debug, Clone, Copy)]
struct PlayerBody {
    handle: RigidBodyHandle,
    /// Camera height above the body center
    eye_offset: f32,
}

/// First-person movement controller
#[derive(Debug)]
pub struct MoveControls {
    walk_speed: f32,
    run_speed: f32,
    eye_height: f32,
    bob: HeadBob,
    zone: Option<NoGoZone>,
    body: Option<PlayerBody>,
}

impl MoveControls {
    #[must_use]
    pub fn new(walk_speed: f32, run_speed: f32, eye_height: f32) -> Self {
        Self {
            walk_speed,
            run_speed,
            eye_height,
            bob: HeadBob::default(),
            zone: None,
            body: None,
        }
    }

    /// Set the head bob parameters
    #[must_use]
    pub fn with_head_bob(mut self, bob: HeadBob) -> Self {
        self.bob = bob;
        self
    }

    /// Set the keep-out region
    #[must_use]
    pub fn with_zone(mut self, zone: NoGoZone) -> Self {
        self.zone = Some(zone);
        self
    }

    /// Drive a physics body instead of moving the camera directly.
    ///
    /// `eye_offset` is the camera height above the body center.
    pub fn attach_body(&mut self, handle: RigidBodyHandle, eye_offset: f32) {
        self.body = Some(PlayerBody { handle, eye_offset });
    }

    #[must_use]
    pub fn walk_speed(&self) -> f32 {
        self.walk_speed
    }

    #[must_use]
    pub fn run_speed(&self) -> f32 {
        self.run_speed
    }

    #[must_use]
    pub fn eye_height(&self) -> f32 {
        self.eye_height
    }

    /// Advance the controller one frame.
    ///
    /// Exactly one of the walk or run speed applies. With a body attached
    /// the movement becomes the body's horizontal velocity (vertical
    /// velocity is preserved so gravity keeps acting) and the camera is
    /// synced after the physics step via [`MoveControls::sync_camera`];
    /// without one the camera integrates directly.
    ///
    /// Returns the number of footfalls taken this frame.
    pub fn update(
        &mut self,
        state: &MoveState,
        camera: &mut Camera,
        physics: Option<&mut Physics>,
        dt: f32,
    ) -> u32 {
        let direction = state.direction(camera.yaw());
        let moving = direction != Vec3::ZERO && dt > 0.0;

        let footfalls = if moving {
            self.bob.advance(dt, state.run)
        } else {
            self.bob.reset();
            0
        };

        let speed = if state.run {
            self.run_speed
        } else {
            self.walk_speed
        };
        let step = direction * speed * dt;

        if let Some(attachment) = self.body
            && let Some(physics) = physics
            && let Some(position) = physics.get_position(attachment.handle)
            && let Some(velocity) = physics.get_linear_velocity(attachment.handle)
        {
            let clamped = self.clamp_step(position, step);
            let horizontal = if dt > 0.0 { clamped / dt } else { Vec3::ZERO };
            physics.set_linear_velocity(
                attachment.handle,
                Vec3::new(horizontal.x, velocity.y, horizontal.z),
            );
            return footfalls;
        }

        let clamped = self.clamp_step(camera.position, step);
        camera.position.x += clamped.x;
        camera.position.z += clamped.z;
        camera.position.y = self.eye_height + self.bob.offset();
        footfalls
    }

    /// Sync the camera to the attached body. Call after the physics step.
    pub fn sync_camera(&self, camera: &mut Camera, physics: &Physics) {
        if let Some(attachment) = self.body
            && let Some(position) = physics.get_position(attachment.handle)
        {
            camera.position = Vec3::new(
                position.x,
                position.y + attachment.eye_offset + self.bob.offset(),
                position.z,
            );
        }
    }

    /// Clamp a step so it cannot end inside the no-go zone.
    ///
    /// When the full step lands inside, each horizontal axis is tried on
    /// its own so the player slides along the boundary; an axis that would
    /// enter is dropped. A diagonal into a corner drops both.
    fn clamp_step(&self, from: Vec3, step: Vec3) -> Vec3 {
        let Some(zone) = &self.zone else {
            return step;
        };
        if !zone.contains(from + step) {
            return step;
        }

        let x_only = from + Vec3::new(step.x, 0.0, 0.0);
        let z_only = from + Vec3::new(0.0, 0.0, step.z);
        let slid = Vec3::new(
            if zone.contains(x_only) { 0.0 } else { step.x },
            step.y,
            if zone.contains(z_only) { 0.0 } else { step.z },
        );
        if zone.contains(from + slid) {
            return Vec3::new(0.0, step.y, 0.0);
        }
        slid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EYE: f32 = 1.7;

    fn facing_neg_z() -> Camera {
        // yaw -90 degrees faces -Z
        Camera::look_at(Vec3::new(0.0, EYE, 5.0), Vec3::new(0.0, EYE, -5.0), Vec3::Y)
    }

    fn all_key_states() -> Vec<MoveState> {
        let mut states = Vec::new();
        for bits in 0..16u8 {
            states.push(MoveState {
                forward: bits & 1 != 0,
                backward: bits & 2 != 0,
                left: bits & 4 != 0,
                right: bits & 8 != 0,
                run: false,
            });
        }
        states
    }

    #[test]
    fn test_direction_normalized_for_every_key_combination() {
        for state in all_key_states() {
            for yaw in [0.0, 0.7, -2.3, std::f32::consts::FRAC_PI_2] {
                let dir = state.direction(yaw);
                let len = dir.length();
                assert!(
                    len < 1e-6 || (len - 1.0).abs() < 1e-5,
                    "length {len} for {state:?} at yaw {yaw}"
                );
                assert_eq!(dir.y, 0.0);
            }
        }
    }

    #[test]
    fn test_diagonal_is_not_faster() {
        let diagonal = MoveState {
            forward: true,
            right: true,
            ..Default::default()
        };
        let straight = MoveState {
            forward: true,
            ..Default::default()
        };
        let d = diagonal.direction(0.4).length();
        let s = straight.direction(0.4).length();
        assert!((d - s).abs() < 1e-5);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let state = MoveState {
            forward: true,
            backward: true,
            left: true,
            right: true,
            run: false,
        };
        assert_eq!(state.direction(1.1), Vec3::ZERO);
    }

    #[test]
    fn test_running_covers_more_ground() {
        let mut walk_camera = facing_neg_z();
        let mut run_camera = facing_neg_z();
        let mut controls = MoveControls::new(4.0, 8.0, EYE);
        let state = MoveState {
            forward: true,
            ..Default::default()
        };
        let running = MoveState { run: true, ..state };

        controls.update(&state, &mut walk_camera, None, 0.5);
        controls.update(&running, &mut run_camera, None, 0.5);

        let walked = (walk_camera.position - Vec3::new(0.0, EYE, 5.0)).length();
        let ran = (run_camera.position - Vec3::new(0.0, EYE, 5.0)).length();
        assert!(ran > walked);
        assert!((walked - 2.0).abs() < 1e-3);
        assert!((ran - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_idle_returns_to_eye_height() {
        let mut camera = facing_neg_z();
        let mut controls =
            MoveControls::new(4.0, 8.0, EYE).with_head_bob(HeadBob::new(2.0, 0.08));
        let moving = MoveState {
            forward: true,
            ..Default::default()
        };

        // Walk until the bob is mid-swing
        controls.update(&moving, &mut camera, None, 0.07);
        assert!((camera.position.y - EYE).abs() > 1e-4);

        controls.update(&MoveState::default(), &mut camera, None, 0.016);
        assert_eq!(camera.position.y, EYE);
        assert_eq!(controls.bob.phase(), 0.0);
    }

    #[test]
    fn test_zero_dt_moves_nothing() {
        let mut camera = facing_neg_z();
        let start = camera.position;
        let mut controls = MoveControls::new(4.0, 8.0, EYE);
        let moving = MoveState {
            forward: true,
            ..Default::default()
        };

        let footfalls = controls.update(&moving, &mut camera, None, 0.0);
        assert_eq!(footfalls, 0);
        assert_eq!(camera.position.x, start.x);
        assert_eq!(camera.position.z, start.z);
    }

    #[test]
    fn test_zone_is_never_entered_head_on() {
        let zone = NoGoZone::new(-2.0, 2.0, -2.0, 2.0);
        let mut camera = facing_neg_z();
        let mut controls = MoveControls::new(4.0, 8.0, EYE).with_zone(zone);
        let moving = MoveState {
            forward: true,
            ..Default::default()
        };

        // March at the zone from z = 5 for well past the distance to it
        for _ in 0..300 {
            controls.update(&moving, &mut camera, None, 0.016);
            assert!(
                !zone.contains(camera.position),
                "entered zone at {:?}",
                camera.position
            );
        }
        // Stopped at the near face rather than passing through
        assert!(camera.position.z >= 2.0);
        assert!(camera.position.z < 2.2);
    }

    #[test]
    fn test_sliding_along_zone_boundary() {
        let zone = NoGoZone::new(-2.0, 2.0, -2.0, 2.0);
        // Face diagonally so the wish direction pushes +X and +Z
        let mut camera = Camera::look_at(
            Vec3::new(-2.5, EYE, -1.0),
            Vec3::new(2.5, EYE, 4.0),
            Vec3::Y,
        );
        let start_z = camera.position.z;
        let mut controls = MoveControls::new(4.0, 8.0, EYE).with_zone(zone);
        let moving = MoveState {
            forward: true,
            ..Default::default()
        };

        // Stay within the zone's Z extent so the west face keeps blocking
        for _ in 0..55 {
            controls.update(&moving, &mut camera, None, 0.016);
            assert!(!zone.contains(camera.position));
        }
        // X is pinned at the west face while Z keeps advancing
        assert!(camera.position.x <= -2.0 + 1e-4);
        assert!(camera.position.z > start_z + 1.0);
    }

    #[test]
    fn test_diagonal_into_corner_stays_out() {
        let zone = NoGoZone::new(-2.0, 2.0, -2.0, 2.0);
        let mut camera = Camera::look_at(
            Vec3::new(-2.1, EYE, -2.1),
            Vec3::new(3.0, EYE, 3.0),
            Vec3::Y,
        );
        let mut controls = MoveControls::new(4.0, 8.0, EYE).with_zone(zone);
        let moving = MoveState {
            forward: true,
            ..Default::default()
        };

        for _ in 0..60 {
            controls.update(&moving, &mut camera, None, 0.05);
            assert!(
                !zone.contains(camera.position),
                "entered zone at {:?}",
                camera.position
            );
        }
    }

    #[test]
    fn test_body_velocity_preserves_vertical() {
        let mut physics = Physics::new();
        let handle = physics.create_player_body(Vec3::new(0.0, 0.5, 5.0), 0.5);
        physics.set_linear_velocity(handle, Vec3::new(0.0, -3.0, 0.0));

        let mut camera = facing_neg_z();
        let mut controls = MoveControls::new(4.0, 8.0, EYE);
        controls.attach_body(handle, EYE - 0.5);
        let moving = MoveState {
            forward: true,
            ..Default::default()
        };

        controls.update(&moving, &mut camera, Some(&mut physics), 0.016);

        let velocity = physics.get_linear_velocity(handle).unwrap();
        assert_eq!(velocity.y, -3.0);
        assert!((velocity.z - (-4.0)).abs() < 1e-3);
        assert!(velocity.x.abs() < 1e-3);
    }

    #[test]
    fn test_sync_camera_adds_eye_offset() {
        let mut physics = Physics::new();
        let handle = physics.create_player_body(Vec3::new(1.0, 0.5, -3.0), 0.5);

        let mut camera = facing_neg_z();
        let mut controls = MoveControls::new(4.0, 8.0, EYE);
        controls.attach_body(handle, EYE - 0.5);

        controls.sync_camera(&mut camera, &physics);
        assert!((camera.position - Vec3::new(1.0, EYE, -3.0)).length() < 1e-5);
    }

    #[test]
    fn test_footfall_cadence_while_walking() {
        // 2 Hz bob crosses a half cycle 4 times per second
        let mut bob = HeadBob::new(2.0, 0.06);
        let mut footfalls = 0;
        for _ in 0..105 {
            footfalls += bob.advance(0.01, false);
        }
        assert_eq!(footfalls, 4);
    }

    #[test]
    fn test_running_quickens_the_cadence() {
        let mut walk_bob = HeadBob::new(2.0, 0.06);
        let mut run_bob = HeadBob::new(2.0, 0.06);
        let mut walking = 0;
        let mut running = 0;
        for _ in 0..200 {
            walking += walk_bob.advance(0.01, false);
            running += run_bob.advance(0.01, true);
        }
        assert!(running > walking);
    }

    #[test]
    fn test_move_state_from_input() {
        use winit::event::ElementState;
        use winit::keyboard::KeyCode;

        let bindings = Bindings::with_defaults();
        let mut input = Input::new();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        input.process_keyboard(KeyCode::ShiftLeft, ElementState::Pressed);

        let state = MoveState::from_input(&input, &bindings);
        assert!(state.forward);
        assert!(state.run);
        assert!(!state.backward);
        assert!(!state.left);
        assert!(!state.right);
    }
}
