//! Character-cell canvas.
//!
//! Every cell covers a `cell_width × cell_height` block of physical pixels and
//! is painted when its center falls inside a shape.
use std::fmt;

use loading_button::{ArcCommand, Canvas, Color, Point, PxSize, RectCommand, TextCommand};

const FILL: char = '=';
const PIE: char = 'o';
const EMPTY: char = ' ';

/// Rasterizes loading button frames into text.
#[derive(Clone, Debug)]
pub struct TerminalCanvas {
    columns: usize,
    rows: usize,
    cell_width: f32,
    cell_height: f32,
    cells: Vec<char>,
}

impl TerminalCanvas {
    /// Creates a canvas covering `size` with cells of `cell_width × cell_height` pixels.
    pub fn new(size: PxSize, cell_width: f32, cell_height: f32) -> Self {
        let cell_width = cell_width.max(1.0);
        let cell_height = cell_height.max(1.0);
        let [width, height] = size.to_f32_arr2();
        let columns = (width / cell_width).ceil() as usize;
        let rows = (height / cell_height).ceil() as usize;
        Self {
            columns,
            rows,
            cell_width,
            cell_height,
            cells: vec![EMPTY; columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<char> {
        (column < self.columns && row < self.rows).then(|| self.cells[row * self.columns + column])
    }

    /// Rows of the canvas as strings.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.columns.max(1))
            .take(self.rows)
            .map(|row| row.iter().collect())
    }

    fn cell_center(&self, column: usize, row: usize) -> Point {
        Point::new(
            (column as f32 + 0.5) * self.cell_width,
            (row as f32 + 0.5) * self.cell_height,
        )
    }

    fn paint_where(&mut self, glyph: char, color: Color, inside: impl Fn(Point) -> bool) {
        if color.a <= 0.0 {
            return;
        }
        for row in 0..self.rows {
            for column in 0..self.columns {
                if inside(self.cell_center(column, row)) {
                    self.cells[row * self.columns + column] = glyph;
                }
            }
        }
    }
}

/// Whether `point` lies in the pie slice described by `arc`.
fn in_pie(arc: &ArcCommand, point: Point) -> bool {
    if arc.bounds.is_empty() || arc.sweep_angle_degrees <= 0.0 {
        return false;
    }
    let center = arc.bounds.center();
    let radius = arc.bounds.width.min(arc.bounds.height) / 2.0;
    let (dx, dy) = (point.x - center.x, point.y - center.y);
    if dx * dx + dy * dy > radius * radius {
        return false;
    }
    if arc.sweep_angle_degrees >= 360.0 {
        return true;
    }
    // Screen y grows downwards, so atan2 already measures clockwise.
    let angle = dy.atan2(dx).to_degrees();
    (angle - arc.start_angle_degrees).rem_euclid(360.0) <= arc.sweep_angle_degrees
}

impl Canvas for TerminalCanvas {
    fn draw_rect(&mut self, command: RectCommand) {
        let rect = command.rect;
        self.paint_where(FILL, command.color, |point| rect.contains(point));
    }

    fn draw_text(&mut self, command: TextCommand) {
        if self.rows == 0 || command.color.a <= 0.0 {
            return;
        }
        // Label sits on the row holding the middle of its glyph box.
        let middle_y = command.origin.y - command.size_px * 0.26;
        let row = ((middle_y / self.cell_height).floor().max(0.0) as usize).min(self.rows - 1);
        let glyphs: Vec<char> = command.text.chars().collect();
        let first = (command.origin.x / self.cell_width).round() as isize - glyphs.len() as isize / 2;
        for (offset, glyph) in glyphs.into_iter().enumerate() {
            let column = first + offset as isize;
            if (0..self.columns as isize).contains(&column) {
                self.cells[row * self.columns + column as usize] = glyph;
            }
        }
    }

    fn draw_arc(&mut self, command: ArcCommand) {
        self.paint_where(PIE, command.color, |point| in_pie(&command, point));
    }
}

impl fmt::Display for TerminalCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "-".repeat(self.columns);
        writeln!(f, "+{border}+")?;
        for line in self.lines() {
            writeln!(f, "|{line}|")?;
        }
        write!(f, "+{border}+")
    }
}

#[cfg(test)]
mod tests {
    use loading_button::Rect;

    use super::*;

    fn arc(sweep: f32) -> ArcCommand {
        ArcCommand {
            bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
            start_angle_degrees: -90.0,
            sweep_angle_degrees: sweep,
            use_center: true,
            color: Color::YELLOW,
        }
    }

    #[test]
    fn quarter_pie_covers_top_right_only() {
        let quarter = arc(90.0);
        assert!(in_pie(&quarter, Point::new(70.0, 30.0)));
        assert!(!in_pie(&quarter, Point::new(30.0, 30.0)));
        assert!(!in_pie(&quarter, Point::new(70.0, 70.0)));
        assert!(!in_pie(&arc(0.0), Point::new(70.0, 30.0)));
        assert!(in_pie(&arc(360.0), Point::new(30.0, 70.0)));
        assert!(!in_pie(&arc(360.0), Point::new(2.0, 2.0)));
    }

    #[test]
    fn rect_fills_cells_under_it() {
        let mut canvas = TerminalCanvas::new(PxSize::from([100, 20]), 10.0, 10.0);
        assert_eq!((canvas.columns(), canvas.rows()), (10, 2));
        canvas.draw_rect(RectCommand {
            rect: Rect::new(0.0, 0.0, 50.0, 20.0),
            color: Color::BLUE,
        });
        assert_eq!(canvas.cell(4, 1), Some(FILL));
        assert_eq!(canvas.cell(5, 1), Some(EMPTY));
        assert_eq!(canvas.cell(10, 0), None);
    }

    #[test]
    fn text_is_centered_and_clipped() {
        let mut canvas = TerminalCanvas::new(PxSize::from([100, 20]), 10.0, 10.0);
        canvas.draw_text(TextCommand {
            text: "abcd".into(),
            origin: Point::new(50.0, 8.0),
            size_px: 10.0,
            color: Color::BLACK,
        });
        let line: String = canvas.lines().next().unwrap();
        assert_eq!(line, "   abcd   ");

        canvas.clear();
        canvas.draw_text(TextCommand {
            text: "a very long label".into(),
            origin: Point::new(50.0, 8.0),
            size_px: 10.0,
            color: Color::BLACK,
        });
        assert_eq!(canvas.lines().next().unwrap().chars().count(), 10);
    }

    #[test]
    fn transparent_commands_paint_nothing() {
        let mut canvas = TerminalCanvas::new(PxSize::from([40, 10]), 10.0, 10.0);
        canvas.draw_rect(RectCommand {
            rect: Rect::new(0.0, 0.0, 40.0, 10.0),
            color: Color::TRANSPARENT,
        });
        assert!(canvas.lines().all(|line| line.trim().is_empty()));
    }
}
