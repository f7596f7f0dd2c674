//! ASCII line rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wf3d_core::{ScreenPoint, Viewer, Wireframe};

/// ASCII renderer that draws projected wireframes as terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::Reset);
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.char_buffer[y * self.width + x])
        } else {
            None
        }
    }

    pub fn render_wireframe(&mut self, wireframe: &Wireframe, viewer: &Viewer, color: Color) {
        for (start, end) in viewer.project_wireframe(wireframe) {
            self.draw_line(start, end, color);
        }
    }

    /// Draws a line between two projected points, clipped to the buffer.
    pub fn draw_line(&mut self, start: ScreenPoint, end: ScreenPoint, color: Color) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        let bounds = (0.0, 0.0, (self.width - 1) as f64, (self.height - 1) as f64);
        let Some(((x0, y0), (x1, y1))) = clip_line(
            (start.x as f64, start.y as f64),
            (end.x as f64, end.y as f64),
            bounds,
        ) else {
            return;
        };

        let character = line_char(end.x as f64 - start.x as f64, end.y as f64 - start.y as f64);
        let (mut x, mut y) = (x0.round() as i32, y0.round() as i32);
        let (x1, y1) = (x1.round() as i32, y1.round() as i32);

        // Bresenham
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, character, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn plot(&mut self, x: i32, y: i32, character: char, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.char_buffer[idx] = character;
        self.color_buffer[idx] = color;
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let color = self.color_buffer[idx];
                if current != Some(color) {
                    writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Character that best follows a line with the given screen-space slope
fn line_char(dx: f64, dy: f64) -> char {
    let (adx, ady) = (dx.abs(), dy.abs());
    if adx == 0.0 && ady == 0.0 {
        '+'
    } else if ady * 2.0 < adx {
        '-'
    } else if adx * 2.0 < ady {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        // screen y grows downwards
        '\\'
    } else {
        '/'
    }
}

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn outcode(x: f64, y: f64, (min_x, min_y, max_x, max_y): (f64, f64, f64, f64)) -> u8 {
    let mut code = INSIDE;
    if x < min_x {
        code |= LEFT;
    } else if x > max_x {
        code |= RIGHT;
    }
    if y < min_y {
        code |= TOP;
    } else if y > max_y {
        code |= BOTTOM;
    }
    code
}

/// Cohen–Sutherland clipping; None when the segment misses the rectangle
fn clip_line(
    mut a: (f64, f64),
    mut b: (f64, f64),
    bounds: (f64, f64, f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (min_x, min_y, max_x, max_y) = bounds;
    let mut code_a = outcode(a.0, a.1, bounds);
    let mut code_b = outcode(b.0, b.1, bounds);

    loop {
        if code_a | code_b == INSIDE {
            return Some((a, b));
        }
        if code_a & code_b != INSIDE {
            return None;
        }

        let code = if code_a != INSIDE { code_a } else { code_b };
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let point = if code & BOTTOM != 0 {
            (a.0 + dx * (max_y - a.1) / dy, max_y)
        } else if code & TOP != 0 {
            (a.0 + dx * (min_y - a.1) / dy, min_y)
        } else if code & RIGHT != 0 {
            (max_x, a.1 + dy * (max_x - a.0) / dx)
        } else {
            (min_x, a.1 + dy * (min_x - a.0) / dx)
        };

        if code == code_a {
            a = point;
            code_a = outcode(a.0, a.1, bounds);
        } else {
            b = point;
            code_b = outcode(b.0, b.1, bounds);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf3d_core::{Camera, MovementConfig, Vector3};

    fn row(renderer: &AsciiRenderer, y: usize) -> String {
        (0..renderer.width()).filter_map(|x| renderer.cell(x, y)).collect()
    }

    #[test]
    fn test_horizontal_line() {
        let mut renderer = AsciiRenderer::new(10, 3);
        renderer.draw_line(ScreenPoint::new(2, 1), ScreenPoint::new(6, 1), Color::White);
        assert_eq!(row(&renderer, 1), "  -----   ");
        assert_eq!(row(&renderer, 0), "          ");
    }

    #[test]
    fn test_line_chars() {
        assert_eq!(line_char(5.0, 0.0), '-');
        assert_eq!(line_char(0.0, -5.0), '|');
        assert_eq!(line_char(3.0, 3.0), '\\');
        assert_eq!(line_char(3.0, -3.0), '/');
        assert_eq!(line_char(0.0, 0.0), '+');
    }

    #[test]
    fn test_clipping_far_endpoints() {
        let mut renderer = AsciiRenderer::new(8, 4);
        // clamped projection output, far outside the buffer
        renderer.draw_line(
            ScreenPoint::new(i16::MIN, 2),
            ScreenPoint::new(i16::MAX, 2),
            Color::White,
        );
        assert_eq!(row(&renderer, 2), "--------");

        renderer.clear();
        renderer.draw_line(
            ScreenPoint::new(i16::MIN, i16::MIN),
            ScreenPoint::new(i16::MIN, i16::MAX),
            Color::White,
        );
        assert!((0..4).all(|y| row(&renderer, y).trim().is_empty()));
    }

    #[test]
    fn test_clip_line() {
        let bounds = (0.0, 0.0, 9.0, 9.0);
        let clipped = clip_line((-10.0, 5.0), (20.0, 5.0), bounds).unwrap();
        assert_eq!(clipped, ((0.0, 5.0), (9.0, 5.0)));
        assert!(clip_line((-10.0, -10.0), (-1.0, 20.0), bounds).is_none());
        assert_eq!(clip_line((1.0, 1.0), (2.0, 2.0), bounds), Some(((1.0, 1.0), (2.0, 2.0))));
    }

    #[test]
    fn test_render_wireframe() {
        let mut viewer = Viewer::new(Camera::default(), MovementConfig::default());
        viewer.on_resize(40, 20);
        let mut renderer = AsciiRenderer::new(40, 20);

        let cube = Wireframe::cube(Vector3::new(0.0, 0.0, 4.0), 2.0);
        renderer.render_wireframe(&cube, &viewer, Color::Cyan);
        let drawn: usize = (0..20).map(|y| row(&renderer, y).trim().len()).sum();
        assert!(drawn > 0);

        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        assert!(!out.is_empty());
    }

    #[test]
    fn test_zero_sized() {
        let mut renderer = AsciiRenderer::new(0, 0);
        renderer.draw_line(ScreenPoint::new(0, 0), ScreenPoint::new(5, 5), Color::White);
        assert_eq!(renderer.cell(0, 0), None);
    }
}
