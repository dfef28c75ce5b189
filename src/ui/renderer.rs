use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

use crate::model::world::World;

/// Draws the battle grid: a frame one cell thick (`#`, or `0` on an
/// unofficial run), every live entity's glyph inside it. The widget reads
/// the world directly rather than going through a snapshot; the simulation
/// is idle while the frame is drawn.
pub struct FieldWidget<'a> {
    world: &'a World,
}

impl<'a> FieldWidget<'a> {
    pub fn new(world: &'a World) -> Self {
        Self { world }
    }

    /// Terminal footprint: the grid plus the frame.
    pub fn size(world: &World) -> (u16, u16) {
        (
            world.field.cols() as u16 + 2,
            world.field.rows() as u16 + 2,
        )
    }
}

impl Widget for FieldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = self.world.field.rows() as u16;
        let cols = self.world.field.cols() as u16;
        if area.width < cols + 2 || area.height < rows + 2 {
            render_undersized(area, buf);
            return;
        }

        // Unofficial runs are visibly branded by their frame glyph.
        let marker = if self.world.config.modes.unofficial {
            '0'
        } else {
            '#'
        };
        let frame_style = Style::default().fg(Color::DarkGray);
        for x in 0..cols + 2 {
            set(buf, area, x, 0, marker, frame_style);
            set(buf, area, x, rows + 1, marker, frame_style);
        }
        for y in 1..rows + 1 {
            set(buf, area, 0, y, marker, frame_style);
            set(buf, area, cols + 1, y, marker, frame_style);
        }

        for (_, entity) in self.world.arena.iter() {
            let x = entity.pos.col as u16 + 1;
            let y = entity.pos.row as u16 + 1;
            set(buf, area, x, y, entity.glyph(), entity.style());
        }
    }
}

fn render_undersized(area: Rect, buf: &mut Buffer) {
    let msg = "terminal too small";
    let style = Style::default().fg(Color::Red);
    for (i, ch) in msg.chars().enumerate() {
        set(buf, area, i as u16, 0, ch, style);
    }
}

fn set(buf: &mut Buffer, area: Rect, x: u16, y: u16, ch: char, style: Style) {
    if x >= area.width || y >= area.height {
        return;
    }
    if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
        cell.set_char(ch);
        cell.set_style(style);
    }
}
