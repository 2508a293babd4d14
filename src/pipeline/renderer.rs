use crate::core::framebuffer::FrameBuffer;
use crate::core::rasterizer::Rasterizer;
use crate::pipeline::commands::DrawCommand;
use crate::scene::viewport::Viewport;
use nalgebra::{Matrix4, Point3, Vector4};

/// Executes draw-command lists against an owned framebuffer.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rasterizer: Rasterizer::new(),
            framebuffer: FrameBuffer::new(width, height),
        }
    }

    /// Runs every command in order. The viewport starts out as the whole surface.
    pub fn execute(&mut self, commands: &[DrawCommand<'_>]) {
        let mut viewport = Viewport::new(0, 0, self.framebuffer.width, self.framebuffer.height);

        for command in commands {
            match command {
                DrawCommand::Clear { color } => self.framebuffer.clear(*color),
                DrawCommand::SetViewport(vp) => viewport = *vp,
                DrawCommand::Lines {
                    mvp,
                    vertices,
                    width,
                } => {
                    for segment in vertices.chunks_exact(2) {
                        self.rasterizer.draw_line(
                            &mut self.framebuffer,
                            &viewport,
                            (to_clip(mvp, &segment[0].position), segment[0].color),
                            (to_clip(mvp, &segment[1].position), segment[1].color),
                            *width,
                        );
                    }
                }
                DrawCommand::FillPolygons {
                    mvp,
                    polygons,
                    depth_offset,
                } => {
                    for polygon in polygons.iter() {
                        let clip: Vec<Vector4<f32>> =
                            polygon.positions.iter().map(|p| to_clip(mvp, p)).collect();
                        self.rasterizer.fill_polygon(
                            &mut self.framebuffer,
                            &viewport,
                            &clip,
                            polygon.color,
                            *depth_offset,
                        );
                    }
                }
                DrawCommand::OutlinePolygons {
                    mvp,
                    polygons,
                    color,
                    width,
                } => {
                    for polygon in polygons.iter() {
                        let clip: Vec<Vector4<f32>> =
                            polygon.positions.iter().map(|p| to_clip(mvp, p)).collect();
                        for (i, &start) in clip.iter().enumerate() {
                            let end = clip[(i + 1) % clip.len()];
                            self.rasterizer.draw_line(
                                &mut self.framebuffer,
                                &viewport,
                                (start, *color),
                                (end, *color),
                                *width,
                            );
                        }
                    }
                }
            }
        }
    }
}

#[inline]
fn to_clip(mvp: &Matrix4<f32>, position: &Point3<f32>) -> Vector4<f32> {
    mvp * position.to_homogeneous()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::{FlatPolygon, LineVertex};
    use nalgebra::Vector3;

    #[test]
    fn clear_then_fill() {
        let mut renderer = Renderer::new(10, 10);
        let square = [FlatPolygon {
            positions: vec![
                Point3::new(-1.0, -1.0, 0.0),
                Point3::new(1.0, -1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(-1.0, 1.0, 0.0),
            ],
            color: Vector3::new(0.0, 1.0, 0.0),
        }];
        renderer.execute(&[
            DrawCommand::Clear {
                color: Vector3::zeros(),
            },
            DrawCommand::SetViewport(Viewport::new(0, 0, 5, 10)),
            DrawCommand::FillPolygons {
                mvp: Matrix4::identity(),
                polygons: &square,
                depth_offset: None,
            },
        ]);
        assert_eq!(renderer.framebuffer.get_pixel(2, 5), Some(Vector3::new(0.0, 1.0, 0.0)));
        assert_eq!(renderer.framebuffer.get_pixel(7, 5), Some(Vector3::zeros()));
    }

    #[test]
    fn odd_trailing_line_vertex_is_ignored() {
        let mut renderer = Renderer::new(10, 10);
        let white = Vector3::repeat(1.0);
        let lines = [
            LineVertex::new(Point3::new(-1.0, 0.0, 0.0), white),
            LineVertex::new(Point3::new(1.0, 0.0, 0.0), white),
            LineVertex::new(Point3::new(0.0, 1.0, 0.0), white),
        ];
        renderer.execute(&[
            DrawCommand::Clear {
                color: Vector3::zeros(),
            },
            DrawCommand::Lines {
                mvp: Matrix4::identity(),
                vertices: &lines,
                width: 1.0,
            },
        ]);
        assert_eq!(renderer.framebuffer.get_pixel(3, 5), Some(white));
        assert_eq!(renderer.framebuffer.get_pixel(3, 2), Some(Vector3::zeros()));
    }

    #[test]
    fn outline_closes_the_loop() {
        let mut renderer = Renderer::new(20, 20);
        let red = Vector3::new(1.0, 0.0, 0.0);
        let triangle = [FlatPolygon {
            positions: vec![
                Point3::new(-0.5, -0.5, 0.0),
                Point3::new(0.5, -0.5, 0.0),
                Point3::new(-0.5, 0.5, 0.0),
            ],
            color: red,
        }];
        renderer.execute(&[
            DrawCommand::Clear {
                color: Vector3::zeros(),
            },
            DrawCommand::OutlinePolygons {
                mvp: Matrix4::identity(),
                polygons: &triangle,
                color: Vector3::repeat(1.0),
                width: 1.0,
            },
        ]);
        // Closing edge from (-0.5, 0.5) back to (-0.5, -0.5) is the column at x = 5.
        assert_eq!(renderer.framebuffer.get_pixel(5, 10), Some(Vector3::repeat(1.0)));
        // Interior stays untouched.
        assert_eq!(renderer.framebuffer.get_pixel(7, 12), Some(Vector3::zeros()));
    }
}
