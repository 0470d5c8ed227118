use crate::Viewport;
use life_grid::World;

/// Rasterizes the visible part of a world into an owned buffer of packed
/// ARGB pixels (A<<24 | R<<16 | G<<8 | B), row-major.
#[derive(Debug)]
pub struct Rasterizer {
    frame: Vec<u32>,
    out_width: u32,
}

impl Rasterizer {
    pub fn new(out_width: u32, out_height: u32) -> Self {
        assert!(out_width > 0 && out_height > 0);
        Self {
            frame: vec![0; out_width as usize * out_height as usize],
            out_width,
        }
    }

    /// Renders one frame. When zoomed in, runs of consecutive output pixels
    /// map to the same grid cell, so the last mapped cell's color is cached
    /// and recomputed only when the mapping changes. The output is identical
    /// to recomputing the color for every pixel.
    pub fn render<W: World>(&mut self, world: &W, viewport: &Viewport) -> &[u32] {
        debug_assert_eq!(viewport.out_width(), self.out_width);
        debug_assert_eq!(
            self.frame.len(),
            self.out_width as usize * viewport.out_height() as usize
        );

        let mut last_loc = viewport.cell_at(0, 0);
        let mut argb = world.pixel(last_loc);
        for (index, pixel) in self.frame.iter_mut().enumerate() {
            let out_row = index as u32 / self.out_width;
            let out_col = index as u32 % self.out_width;
            let loc = viewport.cell_at(out_row, out_col);
            if loc != last_loc {
                argb = world.pixel(loc);
                last_loc = loc;
            }
            *pixel = argb;
        }
        &self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ViewCommand, ViewController};
    use life_grid::{LifeWorld, Random};

    fn test_world() -> LifeWorld {
        LifeWorld::new(48, 32, 1.0 / 3.0, Random::from_seed(99))
    }

    fn naive_render<W: World>(world: &W, viewport: &Viewport) -> Vec<u32> {
        let mut frame =
            Vec::with_capacity(viewport.out_width() as usize * viewport.out_height() as usize);
        for out_row in 0..viewport.out_height() {
            for out_col in 0..viewport.out_width() {
                frame.push(world.pixel(viewport.cell_at(out_row, out_col)));
            }
        }
        frame
    }

    #[test]
    fn unzoomed_render_at_the_origin_is_the_identity_blit() {
        let world = test_world();
        let viewport = Viewport::new(48, 32, 48, 32);
        let mut rasterizer = Rasterizer::new(48, 32);

        let frame = rasterizer.render(&world, &viewport);

        assert_eq!(frame.len(), 48 * 32);
        for row in 0..32 {
            for col in 0..48 {
                assert_eq!(
                    frame[(row * 48 + col) as usize],
                    world.pixel(life_grid::Loc::new(row, col))
                );
            }
        }
    }

    #[test]
    fn memoized_render_matches_the_naive_render() {
        let world = test_world();
        let mut rasterizer = Rasterizer::new(24, 16);

        for (zoom_delta, drag_y, drag_x) in [(0, 0, 0), (2, 0, 0), (2, 5, 9), (6, 3, 1)] {
            let mut controller = ViewController::new(Viewport::new(48, 32, 24, 16), 100);
            controller.apply(ViewCommand::Zoom {
                delta: zoom_delta,
                y: 0,
                x: 0,
            });
            controller.apply(ViewCommand::DragStart { y: 0, x: 0 });
            controller.apply(ViewCommand::DragMove {
                y: drag_y,
                x: drag_x,
            });

            let viewport = *controller.viewport();
            assert_eq!(
                rasterizer.render(&world, &viewport),
                naive_render(&world, &viewport).as_slice()
            );
        }
    }

    #[test]
    fn zoomed_render_repeats_each_cell_in_blocks() {
        let mut world = LifeWorld::new_empty(48, 32);
        world.set_alive(0, 0, true);
        let mut viewport = Viewport::new(48, 32, 24, 16);
        viewport.zoom_by(3, 0, 0);
        assert_eq!(viewport.zoom(), 4);
        let mut rasterizer = Rasterizer::new(24, 16);

        let frame = rasterizer.render(&world, &viewport);

        let born = world.pixel(life_grid::Loc::new(0, 0));
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(frame[(row * 24 + col) as usize], born);
            }
        }
        assert_eq!(frame[4], 0x0000_0000);
        assert_eq!(frame[(4 * 24) as usize], 0x0000_0000);
    }
}
