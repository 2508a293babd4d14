use crate::io::config::Config;
use crate::io::image::save_framebuffer;
use crate::pipeline::commands::SceneBuffers;
use crate::pipeline::passes::{RenderStyle, present_to_buffer, render};
use crate::pipeline::renderer::Renderer;
use crate::scene::camera::ViewSelection;
use crate::scene::mesh::PolygonMesh;
use crate::scene::scene_object::SceneObject;
use crate::ui::console::{print_help, print_matrix};
use crate::ui::input::{Action, KeyboardState, ObjectController, pressed_actions};
use log::{debug, info, warn};
use minifb::{Window, WindowOptions};
use std::io::{self, Write};
use std::time::Instant;

/// Everything that changes between frames.
#[derive(Debug, Clone)]
pub struct AppState {
    pub object: SceneObject,
    pub selection: ViewSelection,
}

impl AppState {
    pub fn new(object: SceneObject, selection: ViewSelection) -> Self {
        Self { object, selection }
    }

    /// The letter glyph at identity, shown in the overview.
    pub fn with_letter_glyph() -> Self {
        Self::new(SceneObject::new(PolygonMesh::letter_glyph()), ViewSelection::Overview)
    }

    /// Applies one discrete action. Help and matrix printouts are written to `out`.
    pub fn apply_action<W: Write>(&mut self, action: Action, out: &mut W) -> io::Result<()> {
        match action {
            Action::SelectView(selection) => {
                if selection != self.selection {
                    info!("View: {} -> {}", self.selection, selection);
                }
                self.selection = selection;
            }
            Action::ResetTransform => {
                self.object.reset();
                info!("Transform reset to identity");
            }
            Action::PrintHelp => print_help(out)?,
            Action::PrintMatrix => print_matrix(out, self.object.transform())?,
        }
        Ok(())
    }

    /// One input step: discrete key-down actions first, then held-key increments.
    pub fn step<K: KeyboardState + ?Sized, W: Write>(
        &mut self,
        keys: &K,
        controller: &ObjectController,
        out: &mut W,
    ) {
        for action in pressed_actions(keys) {
            if let Err(e) = self.apply_action(action, out) {
                warn!("Failed to write to output: {}", e);
            }
        }
        controller.update(keys, &mut self.object);
    }
}

/// Opens the window and runs the interactive loop until the window is closed.
pub fn run_gui(config: &Config, selection: ViewSelection) -> Result<(), String> {
    let width = config.window.width;
    let height = config.window.height;

    info!("Starting GUI mode ({}x{})...", width, height);
    info!("Press H for the list of controls");

    let mut window = Window::new(
        &config.window.title,
        width,
        height,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| format!("Failed to create window: {}", e))?;

    window.set_target_fps(config.window.target_fps);

    let mut state = AppState::with_letter_glyph();
    state.selection = selection;
    let style = config.render.style();
    let buffers = SceneBuffers::new(&state.object.mesh, style.axis_length, style.grid_color);
    let controller = ObjectController::from_config(&config.controls);
    let mut renderer = Renderer::new(width, height);
    let mut buffer = vec![0u32; width * height];
    let mut stdout = io::stdout();

    let mut last_frame_time = Instant::now();
    let mut frame_count = 0;
    let mut last_fps_update = Instant::now();

    while window.is_open() {
        let now = Instant::now();
        let dt = (now - last_frame_time).as_secs_f32();
        last_frame_time = now;

        // --- Input ---
        state.step(&window, &controller, &mut stdout);

        // --- Render ---
        let commands = render(&state.object, &buffers, state.selection, width, height, &style);
        renderer.execute(&commands);

        // --- Display ---
        present_to_buffer(&renderer.framebuffer, &mut buffer);
        window
            .update_with_buffer(&buffer, width, height)
            .map_err(|e| format!("Failed to present frame: {}", e))?;

        window.set_title(&format!(
            "{} - {} - {:.1} FPS",
            config.window.title,
            state.selection,
            1.0 / dt.max(f32::EPSILON)
        ));

        frame_count += 1;
        if last_fps_update.elapsed().as_secs_f32() >= 2.0 {
            debug!(
                "Average FPS: {:.1} ({} draw commands per frame)",
                frame_count as f32 / last_fps_update.elapsed().as_secs_f32(),
                commands.len()
            );
            frame_count = 0;
            last_fps_update = Instant::now();
        }
    }

    info!("Window closed, exiting");
    Ok(())
}

/// Renders one frame of the untransformed glyph without a window and returns the renderer.
pub fn render_snapshot(config: &Config, selection: ViewSelection) -> Renderer {
    let state = AppState::new(SceneObject::new(PolygonMesh::letter_glyph()), selection);
    render_state(&state, config.window.width, config.window.height, &config.render.style())
}

/// Renders the given state into a fresh framebuffer.
pub fn render_state(state: &AppState, width: usize, height: usize, style: &RenderStyle) -> Renderer {
    let buffers = SceneBuffers::new(&state.object.mesh, style.axis_length, style.grid_color);
    let commands = render(&state.object, &buffers, state.selection, width, height, style);
    let mut renderer = Renderer::new(width, height);
    renderer.execute(&commands);
    renderer
}

/// Headless mode: render a single frame and save it to `output`.
pub fn run_snapshot(config: &Config, selection: ViewSelection, output: &str) -> Result<(), String> {
    info!("Starting snapshot mode ({} view)...", selection);
    let start_time = Instant::now();

    let renderer = render_snapshot(config, selection);
    info!("Render completed in {:.2?}", start_time.elapsed());

    info!("Saving output to '{}'...", output);
    save_framebuffer(&renderer.framebuffer, output)?;
    info!("Done.");
    Ok(())
}
