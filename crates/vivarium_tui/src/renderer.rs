use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::{Block, Borders, Widget};

use vivarium_core::World;
use vivarium_data::{Footprint, Tile};

/// Window onto the grid centred on the focused organism.
///
/// The focus is the organism in the highest live slot. With no organisms
/// alive only the frame is drawn. Cells past the world edge render blank.
pub struct ViewportWidget<'a> {
    world: &'a World,
}

impl<'a> ViewportWidget<'a> {
    pub fn new(world: &'a World) -> Self {
        Self { world }
    }

    pub fn inner_area(area: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(area)
    }

    pub fn glyph(tile: Tile) -> char {
        match tile {
            Tile::Empty => ' ',
            Tile::Obstacle => 'X',
            Tile::Organism => 'O',
            Tile::Food => 'F',
        }
    }

    pub fn color(tile: Tile) -> Color {
        match tile {
            Tile::Empty => Color::Reset,
            Tile::Obstacle => Color::Rgb(120, 120, 120),
            Tile::Organism => Color::Rgb(100, 255, 100),
            Tile::Food => Color::Yellow,
        }
    }

    /// Grid coordinates of the top-left cell of a `columns x rows` window
    /// centred on `focus`. May be negative near the world edge.
    pub fn origin(focus: &Footprint, columns: u16, rows: u16) -> (i64, i64) {
        (
            i64::from(focus.x) + i64::from(focus.width / 2) - i64::from(columns / 2),
            i64::from(focus.y) + i64::from(focus.height / 2) - i64::from(rows / 2),
        )
    }
}

impl Widget for ViewportWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(format!(
                "World (Tick: {}, Population: {})",
                self.world.tick_count(),
                self.world.population().len()
            ))
            .borders(Borders::ALL)
            .render(area, buf);

        let inner = Self::inner_area(area);
        let Some(focus) = self.world.focus().and_then(|id| self.world.organism(id)) else {
            return;
        };
        let (origin_x, origin_y) = Self::origin(&focus.footprint, inner.width, inner.height);
        let grid = self.world.grid();

        for row in 0..inner.height {
            for col in 0..inner.width {
                let tile = grid
                    .try_get(origin_x + i64::from(col), origin_y + i64::from(row))
                    .unwrap_or(Tile::Empty);
                let cell = &mut buf[(inner.x + col, inner.y + row)];
                cell.set_char(Self::glyph(tile));
                cell.set_fg(Self::color(tile));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vivarium_core::SimConfig;

    fn world() -> World {
        let mut config = SimConfig::default();
        config.world.width = 40;
        config.world.height = 30;
        config.organism.memory_size = 16;
        World::empty(config, 1).unwrap()
    }

    fn render(world: &World) -> Buffer {
        let area = Rect::new(0, 0, 12, 7);
        let mut buf = Buffer::empty(area);
        ViewportWidget::new(world).render(area, &mut buf);
        buf
    }

    #[test]
    fn test_viewport_centres_on_focus() {
        let mut world = world();
        world.spawn_at(20, 15);
        world.grid_mut().set(21, 15, Tile::Food);
        world.grid_mut().set(18, 14, Tile::Obstacle);
        let buf = render(&world);
        // Inner area is 10x5 at (1, 1); the window starts at grid (15, 13).
        assert_eq!(buf[(6, 3)].symbol(), "O");
        assert_eq!(buf[(7, 3)].symbol(), "F");
        assert_eq!(buf[(4, 2)].symbol(), "X");
    }

    #[test]
    fn test_viewport_without_organisms_draws_only_frame() {
        let mut world = world();
        for x in 0..40 {
            for y in 0..30 {
                world.grid_mut().set(x, y, Tile::Obstacle);
            }
        }
        let buf = render(&world);
        assert_eq!(buf[(5, 3)].symbol(), " ");
    }

    #[test]
    fn test_viewport_blank_past_world_edge() {
        let mut world = world();
        world.spawn_at(0, 0);
        let buf = render(&world);
        assert_eq!(buf[(6, 3)].symbol(), "O");
        assert_eq!(buf[(5, 3)].symbol(), " ");
        assert_eq!(buf[(6, 2)].symbol(), " ");
    }

    #[test]
    fn test_origin_uses_footprint_centre() {
        let fp = Footprint::new(100, 50, 4, 2);
        assert_eq!(ViewportWidget::origin(&fp, 80, 24), (62, 39));
    }
}
