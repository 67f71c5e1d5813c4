use crate::render::RenderSurface;

/// A single call made against a surface
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize { width: u32, height: u32 },
    Background { gray: u8, alpha: u8 },
    Fill { r: f64, g: f64, b: f64 },
    Circle { center_x: f64, center_y: f64, diameter: f64 },
}

/// Surface that records commands instead of drawing them
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain recorded commands, e.g. between ticks
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    /// Fill colors in the order they were set
    pub fn fills(&self) -> Vec<[f64; 3]> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Fill { r, g, b } => Some([*r, *g, *b]),
                _ => None,
            })
            .collect()
    }
}

impl RenderSurface for RecordingSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn background(&mut self, gray: u8, alpha: u8) {
        self.commands.push(DrawCommand::Background { gray, alpha });
    }

    fn fill_color(&mut self, r: f64, g: f64, b: f64) {
        self.commands.push(DrawCommand::Fill { r, g, b });
    }

    fn draw_circle(&mut self, center_x: f64, center_y: f64, diameter: f64) {
        self.commands.push(DrawCommand::Circle { center_x, center_y, diameter });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut surface = RecordingSurface::new(10, 10);
        surface.background(0, 8);
        surface.fill_color(1.0, 2.0, 3.0);
        surface.draw_circle(5.0, 5.0, 4.5);

        assert_eq!(surface.circle_count(), 1);
        assert_eq!(surface.fills(), vec![[1.0, 2.0, 3.0]]);
        assert_eq!(surface.take_commands().len(), 3);
        assert!(surface.commands().is_empty());
    }
}
