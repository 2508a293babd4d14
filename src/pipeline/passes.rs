use crate::core::color::{OUTLINE, to_0rgb};
use crate::core::framebuffer::FrameBuffer;
use crate::core::rasterizer::DepthOffset;
use crate::pipeline::commands::{
    AXIS_LINE_WIDTH, DrawCommand, GRID_LINE_WIDTH, OUTLINE_LINE_WIDTH, SceneBuffers,
};
use crate::scene::camera::{Camera, ViewSelection};
use crate::scene::scene_object::SceneObject;
use crate::scene::viewport::{ViewportPass, layout};
use nalgebra::Vector3;

/// Colors and sizes that are not part of the object itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub background: Vector3<f32>,
    pub grid_color: Vector3<f32>,
    pub axis_length: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: Vector3::new(0.15, 0.15, 0.15),
            grid_color: Vector3::new(0.2, 0.2, 0.2),
            axis_length: 5.0,
        }
    }
}

/// Builds the full command list of one frame from the current object state and view selection.
///
/// Pure: the object is only read, and nothing is kept between calls.
pub fn render<'a>(
    object: &SceneObject,
    buffers: &'a SceneBuffers,
    selection: ViewSelection,
    surface_width: usize,
    surface_height: usize,
    style: &RenderStyle,
) -> Vec<DrawCommand<'a>> {
    let passes = layout(selection, surface_width, surface_height);
    let mut commands = Vec::with_capacity(1 + passes.len() * 5);
    commands.push(DrawCommand::Clear {
        color: style.background,
    });
    for pass in &passes {
        commands.extend(viewport_pass_commands(object, buffers, pass));
    }
    commands
}

/// Axes, grid, filled faces, then face outlines, for one viewport.
pub fn viewport_pass_commands<'a>(
    object: &SceneObject,
    buffers: &'a SceneBuffers,
    pass: &ViewportPass,
) -> [DrawCommand<'a>; 5] {
    let camera = Camera::new(pass.view, pass.projection, &pass.viewport);
    let view_proj = camera.view_projection();
    let object_mvp = view_proj * object.transform();

    [
        DrawCommand::SetViewport(pass.viewport),
        DrawCommand::Lines {
            mvp: view_proj,
            vertices: &buffers.axes,
            width: AXIS_LINE_WIDTH,
        },
        DrawCommand::Lines {
            mvp: view_proj,
            vertices: &buffers.grid,
            width: GRID_LINE_WIDTH,
        },
        DrawCommand::FillPolygons {
            mvp: object_mvp,
            polygons: &buffers.faces,
            depth_offset: Some(DepthOffset::default()),
        },
        DrawCommand::OutlinePolygons {
            mvp: object_mvp,
            polygons: &buffers.faces,
            color: OUTLINE,
            width: OUTLINE_LINE_WIDTH,
        },
    ]
}

/// Packs the framebuffer into the window's 0RGB pixel buffer.
pub fn present_to_buffer(framebuffer: &FrameBuffer, buffer: &mut [u32]) {
    for (dst_row, src_row) in buffer.chunks_mut(framebuffer.width.max(1)).zip(framebuffer.rows()) {
        for (pixel, color) in dst_row.iter_mut().zip(src_row) {
            *pixel = to_0rgb(*color);
        }
    }
}
