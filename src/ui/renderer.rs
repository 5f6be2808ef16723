/// Paints the world onto a `Surface`.
///
/// Read-only with respect to the simulation. Each frame:
///   1. Clear the whole surface
///   2. One `tile × tile` square per non-Empty cell, colored by kind
///   3. The player square on top, in its own color

use crate::domain::tile::Tile;
use crate::sim::world::WorldState;
use super::surface::{Rgb, Surface};

pub const PLAYER_COLOR: Rgb = Rgb::hex(0xff0000);

/// Color for a cell kind. Exhaustive: adding a tile without a color is a
/// compile error.
pub fn tile_color(tile: Tile) -> Rgb {
    match tile {
        Tile::Empty => Rgb::hex(0xffffff),
        Tile::Flux => Rgb::hex(0xccffcc),
        Tile::Unbreakable => Rgb::hex(0x999999),
        // Drawn over by the player square every frame.
        Tile::Player => PLAYER_COLOR,
        Tile::Stone | Tile::FallingStone => Rgb::hex(0x0000cc),
        Tile::Box | Tile::FallingBox => Rgb::hex(0x8b4513),
        Tile::Key1 | Tile::Lock1 => Rgb::hex(0xffcc00),
        Tile::Key2 | Tile::Lock2 => Rgb::hex(0x00ccff),
    }
}

pub struct Renderer {
    tile: usize,
}

impl Renderer {
    pub fn new(tile_size: u16) -> Self {
        Renderer { tile: tile_size.max(1) as usize }
    }

    /// Surface size needed to show the whole grid.
    pub fn surface_size(&self, world: &WorldState) -> (usize, usize) {
        (world.width() * self.tile, world.height() * self.tile)
    }

    pub fn draw(&self, world: &WorldState, g: &mut dyn Surface) {
        g.clear();
        self.draw_map(world, g);
        self.draw_player(world, g);
    }

    fn draw_map(&self, world: &WorldState, g: &mut dyn Surface) {
        for (x, y, tile) in world.grid.iter() {
            if tile == Tile::Empty {
                continue;
            }
            self.fill_tile(g, x, y, tile_color(tile));
        }
    }

    fn draw_player(&self, world: &WorldState, g: &mut dyn Surface) {
        self.fill_tile(g, world.player.x, world.player.y, PLAYER_COLOR);
    }

    fn fill_tile(&self, g: &mut dyn Surface, x: usize, y: usize, color: Rgb) {
        g.fill_rect(x * self.tile, y * self.tile, self.tile, self.tile, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::Level;
    use crate::ui::surface::PixelBuffer;

    const BG: Rgb = Rgb::hex(0x161623);

    fn world_from(text: &str) -> WorldState {
        WorldState::new(Level::parse(text, "t").expect("valid"))
    }

    #[test]
    fn paints_every_non_empty_cell() {
        let w = world_from("#####\n#P o#\n#####\n");
        let r = Renderer::new(2);
        let (sw, sh) = r.surface_size(&w);
        assert_eq!((sw, sh), (10, 6));

        let mut buf = PixelBuffer::new(sw, sh, BG);
        r.draw(&w, &mut buf);

        // Wall at (0,0) covers pixels (0..2, 0..2).
        assert_eq!(buf.get(0, 0), tile_color(Tile::Unbreakable));
        assert_eq!(buf.get(1, 1), tile_color(Tile::Unbreakable));
        // Player at (1,1) → pixels (2..4, 2..4).
        assert_eq!(buf.get(2, 2), PLAYER_COLOR);
        assert_eq!(buf.get(3, 3), PLAYER_COLOR);
        // Empty (2,1) is left as background.
        assert_eq!(buf.get(4, 2), BG);
        // Stone (3,1).
        assert_eq!(buf.get(6, 2), tile_color(Tile::Stone));
    }

    #[test]
    fn previous_frame_is_cleared() {
        let mut w = world_from("####\n#P #\n####\n");
        let r = Renderer::new(1);
        let (sw, sh) = r.surface_size(&w);
        let mut buf = PixelBuffer::new(sw, sh, BG);

        r.draw(&w, &mut buf);
        w.move_player_to(2, 1);
        r.draw(&w, &mut buf);

        assert_eq!(buf.get(1, 1), BG);
        assert_eq!(buf.get(2, 1), PLAYER_COLOR);
    }

    #[test]
    fn player_color_is_distinct() {
        for t in Tile::ALL {
            if t != Tile::Player {
                assert_ne!(tile_color(t), PLAYER_COLOR, "{t:?}");
            }
        }
    }

    #[test]
    fn falling_variants_share_resting_color() {
        assert_eq!(tile_color(Tile::FallingStone), tile_color(Tile::Stone));
        assert_eq!(tile_color(Tile::FallingBox), tile_color(Tile::Box));
    }
}
