use crate::app::{ActiveSession, NameEntry};
use crate::board::{AvatarStyle, Board, Cell, Terrain};
use macroquad::prelude::*;

const BACKGROUND: Color = Color::new(0.1, 0.1, 0.1, 1.0);
const FLOOR: Color = Color::new(0.2, 0.2, 0.2, 1.0);
const WALL: Color = Color::new(0.45, 0.35, 0.25, 1.0);
const HUD_HEIGHT: f32 = 60.0;
const MARGIN: f32 = 10.0;
const LABEL_SIZE: f32 = 18.0;

pub fn terrain_color(terrain: Terrain) -> Color {
    match terrain {
        Terrain::Floor => FLOOR,
        Terrain::Wall => WALL,
    }
}

pub fn avatar_color(style: AvatarStyle) -> Color {
    match style {
        AvatarStyle::Own => GREEN,
        AvatarStyle::Other => Color::from_rgba(255, 68, 68, 255),
        AvatarStyle::Dead => Color::from_rgba(136, 136, 136, 255),
    }
}

/// Side length of a square cell so that `size` cells fit in the given area.
pub fn cell_extent(area_width: f32, area_height: f32, size: usize) -> f32 {
    if size == 0 {
        return 0.0;
    }
    (area_width.min(area_height) / size as f32).floor().max(1.0)
}

pub struct Renderer {
    width: f32,
    height: f32,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Renderer {
            width: width as f32,
            height: height as f32,
        }
    }

    fn sync_screen_size(&mut self) {
        self.width = screen_width();
        self.height = screen_height();
    }

    pub fn draw_name_prompt(&mut self, entry: &NameEntry) {
        self.sync_screen_size();
        clear_background(BACKGROUND);

        let x = self.width / 2.0 - 160.0;
        let y = self.height / 2.0;

        draw_text("Enter your name:", x, y - 30.0, 28.0, WHITE);
        draw_rectangle_lines(x, y - 20.0, 320.0, 36.0, 2.0, WHITE);
        draw_text(entry.text(), x + 8.0, y + 6.0, 26.0, WHITE);
        draw_text("Press Enter to join", x, y + 46.0, 18.0, GRAY);
    }

    pub fn render(&mut self, active: &ActiveSession) {
        self.sync_screen_size();
        clear_background(BACKGROUND);

        let (revision, visible) = {
            let board = active.board();
            self.draw_board(&board);
            (board.revision(), board.is_initialized())
        };

        self.draw_hud(active, revision, visible);

        if let Some(alert) = active.hud().current_alert() {
            self.draw_alert(alert);
        }
    }

    fn draw_board(&mut self, board: &Board) {
        let Some(size) = board.size() else {
            draw_text("Waiting for game state...", MARGIN, MARGIN + 24.0, 24.0, GRAY);
            return;
        };

        let extent = cell_extent(
            self.width - 2.0 * MARGIN,
            self.height - HUD_HEIGHT - 2.0 * MARGIN,
            size,
        );

        for cell in board.cells() {
            let x = MARGIN + cell.key.col as f32 * extent;
            let y = MARGIN + cell.key.row as f32 * extent;
            self.draw_cell(cell, x, y, extent);
        }
    }

    fn draw_cell(&mut self, cell: &Cell, x: f32, y: f32, extent: f32) {
        draw_rectangle(x, y, extent, extent, terrain_color(cell.terrain));
        draw_rectangle_lines(x, y, extent, extent, 1.0, DARKGRAY);

        let slot = extent / cell.avatars.len().max(1) as f32;
        for (i, avatar) in cell.avatars.iter().enumerate() {
            let top = y + i as f32 * slot;
            let inset = (slot * 0.1).max(1.0);

            draw_rectangle(
                x + inset,
                top + inset,
                extent - 2.0 * inset,
                slot - 2.0 * inset,
                avatar_color(avatar.style),
            );

            let label = measure_text(&avatar.label, None, LABEL_SIZE as u16, 1.0);
            draw_text(
                &avatar.label,
                x + (extent - label.width) / 2.0,
                top + slot / 2.0 + label.height / 2.0,
                LABEL_SIZE,
                WHITE,
            );
        }
    }

    fn draw_hud(&mut self, active: &ActiveSession, revision: u64, controls_visible: bool) {
        let y = self.height - HUD_HEIGHT + 20.0;

        let player = format!("Playing as {}", active.session().self_name());
        draw_text(&player, MARGIN, y, 20.0, WHITE);

        if controls_visible {
            draw_text(
                "Arrows/WASD: walk   Space: attack",
                MARGIN,
                y + 22.0,
                18.0,
                LIGHTGRAY,
            );
        }

        if let Some(status) = active.hud().status(revision) {
            let text = measure_text(status, None, 18, 1.0);
            draw_text(status, self.width - text.width - MARGIN, y, 18.0, ORANGE);
        }
    }

    fn draw_alert(&mut self, message: &str) {
        draw_rectangle(0.0, 0.0, self.width, self.height, Color::new(0.0, 0.0, 0.0, 0.6));

        let text = measure_text(message, None, 26, 1.0);
        let box_width = (text.width + 40.0).max(280.0);
        let x = (self.width - box_width) / 2.0;
        let y = self.height / 2.0 - 50.0;

        draw_rectangle(x, y, box_width, 100.0, Color::from_rgba(40, 40, 40, 255));
        draw_rectangle_lines(x, y, box_width, 100.0, 2.0, WHITE);
        draw_text(message, x + (box_width - text.width) / 2.0, y + 45.0, 26.0, WHITE);
        draw_text("Enter / Esc to close", x + 20.0, y + 80.0, 16.0, GRAY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_extent_fits_smaller_side() {
        assert_eq!(cell_extent(600.0, 300.0, 3), 100.0);
        assert_eq!(cell_extent(200.0, 900.0, 4), 50.0);
        assert_eq!(cell_extent(100.0, 100.0, 0), 0.0);
        assert_eq!(cell_extent(10.0, 10.0, 20), 1.0);
    }

    #[test]
    fn test_avatar_colors_are_distinct() {
        let own = avatar_color(AvatarStyle::Own);
        let other = avatar_color(AvatarStyle::Other);
        let dead = avatar_color(AvatarStyle::Dead);
        assert_ne!(own, other);
        assert_ne!(own, dead);
        assert_ne!(other, dead);
    }

    #[test]
    fn test_walls_stand_out_from_floor() {
        assert_ne!(terrain_color(Terrain::Floor), terrain_color(Terrain::Wall));
    }
}
