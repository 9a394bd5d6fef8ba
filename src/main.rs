//! First-person portfolio walkthrough
//!
//! Loads a scene config, assembles the showroom (glTF centerpiece,
//! textured floor, ground plane, sky, lights), and wires per-frame input
//! through the movement controller, physics, overlays, and audio.

use showroom::prelude::*;
use showroom::renderer::Texture;
use winit::event::MouseButton;

/// The walkthrough app driven by the engine loop
struct ShowroomApp {
    config: SceneConfig,
    bindings: Bindings,
    camera: Camera,
    light: Light,
    physics: Physics,
    controls: MoveControls,
    welcome: WelcomeScreen,
    legend: ControlsLegend,
    footsteps: Footsteps,
    text: Option<TextOverlay>,
    legend_image: Option<UiImage>,
    axis_lines: Option<LineSet>,
    /// Overlay rectangles rebuilt each frame
    ui_rects: Vec<UiRect>,
    /// Pointer state last seen, for capture-change events
    was_captured: bool,
}

impl ShowroomApp {
    fn new(config: SceneConfig) -> Self {
        let player = &config.player;
        let camera = Camera::look_at(player.spawn, player.spawn + Vec3::NEG_Z, Vec3::Y);
        let light = Light {
            position: config.lighting.directional_position,
            color: config.lighting.directional_color,
            ambient: Vec3::splat(config.lighting.ambient_intensity),
        };
        let mut controls = MoveControls::new(player.walk_speed, player.run_speed, player.eye_height)
            .with_head_bob(HeadBob::new(player.bob_frequency, player.bob_amplitude));
        if let Some(zone) = config.no_go_zone {
            controls = controls.with_zone(zone);
        }
        let footsteps = Footsteps::new(config.audio.footsteps.as_deref());

        Self {
            config,
            bindings: Bindings::with_defaults(),
            camera,
            light,
            physics: Physics::new(),
            controls,
            welcome: WelcomeScreen::new(),
            legend: ControlsLegend::new(),
            footsteps,
            text: None,
            legend_image: None,
            axis_lines: None,
            ui_rects: Vec::new(),
            was_captured: false,
        }
    }

    /// Load assets and populate the world. Any error here is fatal.
    fn build_scene(&mut self, ctx: &mut EngineContext) -> Result<(), Box<dyn std::error::Error>> {
        self.camera.set_aspect(ctx.width(), ctx.height());

        if let Some(sky) = &self.config.sky {
            ctx.renderer_mut().load_sky(&sky.hdr)?;
        }

        // Centerpiece model, one entity per material part
        let model = load_model(&self.config.model.path)?;
        let model_transform = Mat4::from_scale_rotation_translation(
            Vec3::splat(self.config.model.scale),
            Quat::IDENTITY,
            self.config.model.position,
        );
        for part in model.parts {
            let renderer = ctx.renderer_mut();
            let texture = match &part.texture {
                Some(data) => Some(Texture::from_rgba(
                    renderer.device(),
                    renderer.queue(),
                    &data.pixels,
                    (data.width, data.height),
                    Some("model_texture"),
                )?),
                None => None,
            };
            let tint = Vec3::new(part.base_color[0], part.base_color[1], part.base_color[2]);
            let material = if texture.is_some() {
                Material::textured(tint)
            } else {
                Material::diffuse(tint)
            };
            let material = renderer.add_material(&material, texture.as_ref());
            let mesh = renderer.add_mesh(part.mesh);
            let binding = renderer.create_model_binding(model_transform);
            ctx.world.spawn((
                Name::new("model"),
                Transform::from_position(self.config.model.position),
                RenderMesh::new(mesh, material),
                binding,
            ));
        }

        // Textured floor under the model
        {
            let renderer = ctx.renderer_mut();
            let texture = Texture::from_path(
                renderer.device(),
                renderer.queue(),
                &self.config.floor.texture,
                Some("floor_texture"),
            )?;
            let material = renderer.add_material(&Material::textured(Vec3::ONE), Some(&texture));
            let mesh = renderer.add_mesh(Mesh::plane(self.config.floor.size));
            let position = Vec3::new(0.0, self.config.floor.height, 0.0);
            let binding = renderer.create_model_binding(Mat4::from_translation(position));
            ctx.world.spawn((
                Name::new("floor"),
                Transform::from_position(position),
                RenderMesh::new(mesh, material),
                binding,
            ));
        }

        // Plain ground plane the player walks on
        {
            let renderer = ctx.renderer_mut();
            let material =
                renderer.add_material(&Material::diffuse(self.config.ground.color), None);
            let mesh = renderer.add_mesh(Mesh::plane(self.config.ground.size));
            let position = Vec3::new(0.0, self.config.ground.height, 0.0);
            let binding = renderer.create_model_binding(Mat4::from_translation(position));
            ctx.world.spawn((
                Name::new("ground"),
                Transform::from_position(position),
                RenderMesh::new(mesh, material),
                binding,
            ));
        }

        // Physics: ground slab, and optionally a body for the player
        let ground_body = self.physics.create_static_body(
            Vec3::new(0.0, self.config.ground.height, 0.0),
            Quat::IDENTITY,
        );
        self.physics
            .add_ground_plane(ground_body, self.config.ground.size / 2.0);

        let player = &self.config.player;
        if player.use_physics_body {
            let spawn = Vec3::new(
                player.spawn.x,
                self.config.ground.height + player.collider_radius,
                player.spawn.z,
            );
            let body = self.physics.create_player_body(spawn, player.collider_radius);
            self.controls
                .attach_body(body, player.eye_height - player.collider_radius);
        }

        if self.config.debug.falling_cube {
            let spawn = Vec3::new(0.0, 5.0, 0.0);
            let body = self.physics.create_dynamic_body(spawn, Quat::IDENTITY);
            self.physics.add_box_collider(body, Vec3::splat(0.5), 1.0);

            let renderer = ctx.renderer_mut();
            let material =
                renderer.add_material(&Material::new(Vec3::new(0.9, 0.4, 0.1)), None);
            let mesh = renderer.add_mesh(Mesh::cube());
            let binding = renderer.create_model_binding(Mat4::from_translation(spawn));
            ctx.world.spawn((
                Name::new("cube"),
                Transform::from_position(spawn),
                RenderMesh::new(mesh, material),
                PhysicsBody(body),
                binding,
            ));
        }

        if self.config.debug.axis_triad {
            let vertices = axis_triad_vertices(self.config.debug.axis_size);
            self.axis_lines = Some(LineSet::new(ctx.renderer().device(), &vertices));
        }

        self.text = Some(
            ctx.renderer()
                .create_text_overlay(&self.config.overlay.font)?,
        );

        // The key diagram is decorative; the legend text stands alone
        if let Some(path) = &self.config.overlay.legend_image {
            match ctx.renderer().create_ui_image(path) {
                Ok(image) => self.legend_image = Some(image),
                Err(e) => log::warn!("Legend image unavailable: {e}"),
            }
        }

        log::info!(
            "Scene \"{}\" ready ({} entities)",
            self.config.name,
            ctx.world.len()
        );
        Ok(())
    }
}

impl Game for ShowroomApp {
    fn init(&mut self, ctx: &mut EngineContext) {
        if let Err(e) = self.build_scene(ctx) {
            log::error!("Failed to build scene: {e}");
            ctx.quit();
        }
    }

    fn update(&mut self, ctx: &mut EngineContext) {
        let dt = ctx.time.delta_seconds();
        let screen = Vec2::new(ctx.width() as f32, ctx.height() as f32);

        // Report capture changes applied by the loop last frame
        let captured = ctx.pointer_captured();
        if captured != self.was_captured {
            ctx.events.push(GameEvent::PointerCaptured { captured });
            self.was_captured = captured;
        }

        if self.welcome.visible() {
            // Scene is paused behind the welcome screen
            if self.welcome.update(&ctx.input, &self.bindings, screen) {
                ctx.events.push(GameEvent::WelcomeDismissed);
                ctx.request_pointer_capture(true);
            }
        } else {
            if captured {
                if self
                    .bindings
                    .is_action_just_pressed(&ctx.input, Action::ReleasePointer)
                {
                    ctx.request_pointer_capture(false);
                }
            } else if ctx.input.is_mouse_button_just_pressed(MouseButton::Left) {
                ctx.request_pointer_capture(true);
            }

            if self
                .bindings
                .is_action_just_pressed(&ctx.input, Action::ToggleOverlay)
            {
                let visible = self.legend.toggle();
                ctx.events.push(GameEvent::OverlayToggled { visible });
            }

            if captured {
                let look = ctx.input.look_delta();
                self.camera
                    .rotate(look.x, look.y, self.config.player.look_sensitivity);
            }

            // Movement pauses while the pointer is free
            let state = if captured {
                MoveState::from_input(&ctx.input, &self.bindings)
            } else {
                MoveState::default()
            };
            let footfalls =
                self.controls
                    .update(&state, &mut self.camera, Some(&mut self.physics), dt);
            for _ in 0..footfalls {
                ctx.events.push(GameEvent::StepTaken {
                    position: self.camera.position,
                    running: state.run,
                });
            }

            self.physics.step(dt);
            self.controls.sync_camera(&mut self.camera, &self.physics);
        }

        // Entities with a body follow the simulation
        let renderer = ctx.renderer();
        for (_, (transform, body, binding)) in ctx
            .world
            .query::<(&mut Transform, &PhysicsBody, &ModelBinding)>()
            .iter()
        {
            if let (Some(position), Some(rotation)) = (
                self.physics.get_position(body.0),
                self.physics.get_rotation(body.0),
            ) {
                transform.position = position;
                transform.rotation = rotation;
                renderer.update_model_binding(binding, transform.matrix());
            }
        }

        self.footsteps.handle_events(&ctx.events);
    }

    fn render(&mut self, ctx: &mut EngineContext) {
        let screen = (ctx.width(), ctx.height());

        {
            let renderer = ctx.renderer_mut();
            renderer.update_camera(&self.camera);
            renderer.update_light(&self.light);
            renderer.update_sky(&self.camera);
        }

        let Some(text) = self.text.as_mut() else {
            return;
        };

        // Rebuild the overlay draw lists
        self.ui_rects.clear();
        text.begin();
        let mut legend_image_shown = false;
        if self.welcome.visible() {
            self.welcome.draw(&mut self.ui_rects, text, screen);
        } else if self.legend.visible() {
            self.legend
                .draw(&self.bindings, &mut self.ui_rects, text, screen);
            legend_image_shown = self.legend_image.is_some();
        }
        if self.config.debug.camera_readout {
            CameraReadout::draw(self.camera.position, &mut self.ui_rects, text, screen);
        }
        if self.axis_lines.is_some() {
            draw_axis_labels(&self.camera, self.config.debug.axis_size, text, screen);
        }

        let renderer = ctx.renderer();
        text.upload(renderer.device(), renderer.queue());
        if legend_image_shown
            && let Some(image) = &self.legend_image
        {
            let (x, y, width, height) = ControlsLegend::image_rect(image.size(), screen);
            image.set_rect(renderer.queue(), x, y, width, height, screen);
        }

        let Some(mut frame) = renderer.begin_frame() else {
            return;
        };
        let mut props = ctx.world.query::<(&RenderMesh, &ModelBinding)>();
        {
            let mut pass = renderer.begin_render_pass(&mut frame);

            for (_, (prop, binding)) in props.iter() {
                renderer.draw_mesh(&mut pass, prop.mesh, prop.material, binding);
            }
            renderer.draw_sky(&mut pass);
            if let Some(lines) = &self.axis_lines {
                renderer.draw_lines(&mut pass, lines);
            }

            renderer.draw_ui(&mut pass, &self.ui_rects);
            if legend_image_shown
                && let Some(image) = &self.legend_image
            {
                renderer.draw_ui_image(&mut pass, image);
            }
            renderer.draw_text(&mut pass, text);
        }
        drop(props);
        renderer.end_frame(frame);
    }

    fn on_resize(&mut self, _ctx: &mut EngineContext, width: u32, height: u32) {
        self.camera.set_aspect(width, height);
    }

    fn shutdown(&mut self, _ctx: &mut EngineContext) {
        self.footsteps.stop();
        log::info!("Walkthrough closed");
    }
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("assets/scene.ron"));
    let config = match SceneConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load scene config {path}: {e}");
            std::process::exit(1);
        }
    };

    let engine_config = EngineConfig::default()
        .with_title(config.name.as_str())
        .with_size(1280, 720)
        .with_vsync(true);

    let app = ShowroomApp::new(config);
    let engine = Engine::new(engine_config, app);

    if let Err(e) = engine.run() {
        eprintln!("Engine error: {e}");
    }
}
