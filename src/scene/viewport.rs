use crate::scene::camera::{ProjectionKind, ViewKind, ViewSelection};

/// Pixel rectangle of the output surface, origin at the bottom-left corner (`glViewport` layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Inclusive framebuffer pixel range (rows counted from the top) covered by a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl Viewport {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Pixels of a `surface_width` x `surface_height` framebuffer covered by this viewport,
    /// or `None` when they do not overlap.
    pub fn pixel_bounds(&self, surface_width: usize, surface_height: usize) -> Option<PixelBounds> {
        if self.width == 0 || self.height == 0 || self.x >= surface_width || self.y >= surface_height {
            return None;
        }
        let max_x = (self.x + self.width).min(surface_width) - 1;
        let top_up = (self.y + self.height).min(surface_height);
        Some(PixelBounds {
            min_x: self.x,
            min_y: surface_height - top_up,
            max_x,
            max_y: surface_height - 1 - self.y,
        })
    }
}

/// One camera drawn into one rectangle of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportPass {
    pub view: ViewKind,
    pub projection: ProjectionKind,
    pub viewport: Viewport,
}

/// Splits the surface into the viewport passes of a view selection.
///
/// Overview: the perspective main view in the middle (a quarter of the width in from the left,
/// a fifth of the height up from the bottom, half the width by three fifths of the height), plus
/// top/front/side orthographic squares of side 3/10 of the height in a row along the bottom edge.
/// Single view: one orthographic pass over the whole surface.
pub fn layout(selection: ViewSelection, surface_width: usize, surface_height: usize) -> Vec<ViewportPass> {
    match selection {
        ViewSelection::Overview => {
            let main = ViewportPass {
                view: ViewKind::Main,
                projection: ProjectionKind::Perspective,
                viewport: Viewport::new(
                    surface_width / 4,
                    surface_height / 5,
                    surface_width / 2,
                    surface_height * 3 / 5,
                ),
            };
            let size = surface_height * 3 / 10;
            let thumbnails = [ViewKind::Top, ViewKind::Front, ViewKind::Side]
                .into_iter()
                .enumerate()
                .map(|(i, view)| ViewportPass {
                    view,
                    projection: ProjectionKind::Orthographic,
                    viewport: Viewport::new(size * i, 0, size, size),
                });
            std::iter::once(main).chain(thumbnails).collect()
        }
        ViewSelection::Single(view) => vec![ViewportPass {
            view,
            projection: ProjectionKind::Orthographic,
            viewport: Viewport::new(0, 0, surface_width, surface_height),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_matches_reference_layout() {
        let passes = layout(ViewSelection::Overview, 1600, 1000);
        assert_eq!(passes.len(), 4);

        assert_eq!(passes[0].view, ViewKind::Main);
        assert_eq!(passes[0].projection, ProjectionKind::Perspective);
        assert_eq!(passes[0].viewport, Viewport::new(400, 200, 800, 600));

        let expected = [ViewKind::Top, ViewKind::Front, ViewKind::Side];
        for (i, pass) in passes[1..].iter().enumerate() {
            assert_eq!(pass.view, expected[i]);
            assert_eq!(pass.projection, ProjectionKind::Orthographic);
            assert_eq!(pass.viewport, Viewport::new(300 * i, 0, 300, 300));
        }
    }

    #[test]
    fn single_view_fills_surface() {
        let passes = layout(ViewSelection::Single(ViewKind::Side), 1600, 1000);
        assert_eq!(
            passes,
            vec![ViewportPass {
                view: ViewKind::Side,
                projection: ProjectionKind::Orthographic,
                viewport: Viewport::new(0, 0, 1600, 1000),
            }]
        );
    }

    #[test]
    fn pixel_bounds_flip_rows() {
        let vp = Viewport::new(0, 0, 300, 300);
        assert_eq!(
            vp.pixel_bounds(1600, 1000),
            Some(PixelBounds {
                min_x: 0,
                min_y: 700,
                max_x: 299,
                max_y: 999
            })
        );
        let main = Viewport::new(400, 200, 800, 600);
        assert_eq!(
            main.pixel_bounds(1600, 1000),
            Some(PixelBounds {
                min_x: 400,
                min_y: 200,
                max_x: 1199,
                max_y: 799
            })
        );
    }

    #[test]
    fn pixel_bounds_clamp_to_surface() {
        let vp = Viewport::new(10, 5, 100, 100);
        let bounds = vp.pixel_bounds(50, 40).unwrap();
        assert_eq!((bounds.min_x, bounds.max_x), (10, 49));
        assert_eq!((bounds.min_y, bounds.max_y), (0, 34));
        assert_eq!(Viewport::new(60, 0, 10, 10).pixel_bounds(50, 40), None);
    }
}
