/// Terminal presenter: shows the renderer's pixels with half-block cells.
///
/// Per frame:
///   1. `Renderer` paints the world into a `PixelBuffer`
///   2. Every two pixel rows become one cell row of `▀`
///      (fg = upper pixel, bg = lower pixel), HUD and help text around it
///   3. Cells equal to last frame's are skipped; the rest are queued
///      and written with a single flush
///   4. front/back swap

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::sim::world::WorldState;
use super::renderer::Renderer;
use super::surface::{PixelBuffer, Rgb, Surface};

const HALF_BLOCK: char = '▀';

/// Background shared by the terminal clear and empty pixels, so the
/// gaps between rows match the board.
pub const BASE_BG: Rgb = Rgb { r: 22, g: 22, b: 35 };

fn to_color(c: Rgb) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::White,
        bg: Color::Rgb { r: BASE_BG.r, g: BASE_BG.g, b: BASE_BG.b },
    };

    /// Never produced by drawing; filling `back` with it repaints everything.
    const INVALID: Cell = Cell {
        ch: '?',
        fg: Color::Magenta,
        bg: Color::Magenta,
    };

    fn pixels(top: Rgb, bottom: Rgb) -> Self {
        Cell { ch: HALF_BLOCK, fg: to_color(top), bg: to_color(bottom) }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y). Each char occupies 1 column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            self.set(x + i, y, Cell { ch, fg, bg: Cell::BLANK.bg });
        }
    }

    /// Pack `pixels` into half-block cells starting at terminal row `row`.
    fn blit(&mut self, pixels: &PixelBuffer, row: usize) {
        let (pw, ph) = pixels.size();
        for ty in 0..ph.div_ceil(2) {
            for x in 0..pw {
                let top = pixels.get(x, ty * 2);
                let bottom = if ty * 2 + 1 < ph { pixels.get(x, ty * 2 + 1) } else { BASE_BG };
                self.set(x, row + ty, Cell::pixels(top, bottom));
            }
        }
    }
}

// ── Presenter ──

const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;

pub struct TerminalPresenter {
    writer: BufWriter<io::Stdout>,
    renderer: Renderer,
    pixels: PixelBuffer,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
}

impl TerminalPresenter {
    pub fn new(renderer: Renderer) -> Self {
        TerminalPresenter {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            renderer,
            pixels: PixelBuffer::new(0, 0, BASE_BG),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(to_color(BASE_BG)),
            Clear(ClearType::All)
        )?;

        self.sync_size();
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, world: &WorldState) -> io::Result<()> {
        if self.sync_size() {
            queue!(self.writer, SetBackgroundColor(to_color(BASE_BG)), Clear(ClearType::All))?;
        }

        let (pw, ph) = self.renderer.surface_size(world);
        self.pixels.resize(pw, ph);
        self.renderer.draw(world, &mut self.pixels);

        self.front.clear();
        self.compose(world);
        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(())
    }

    /// Track the terminal size. On change (and on the first call) both
    /// buffers are resized and the next flush repaints every cell.
    fn sync_size(&mut self) -> bool {
        let (cols, rows) = terminal::size().unwrap_or((80, 24));
        let (cols, rows) = (cols as usize, rows as usize);
        if (cols, rows) == (self.term_w, self.term_h) && !self.front.cells.is_empty() {
            return false;
        }
        self.term_w = cols;
        self.term_h = rows;
        self.front.resize(cols, rows);
        self.back.resize(cols, rows);
        self.back.cells.fill(Cell::INVALID);
        true
    }

    fn compose(&mut self, world: &WorldState) {
        let hud = format!(" Stonekeep  {}  tick {} ", world.level.name, world.tick);
        self.front.put_str(0, HUD_ROW, &hud, Color::White);

        self.front.blit(&self.pixels, MAP_ROW);

        let map_rows = self.pixels.size().1.div_ceil(2);
        let help = " Arrows/WASD:Move  R:Restart  Esc/Q:Quit";
        self.front.put_str(0, MAP_ROW + map_rows + 1, help, Color::DarkGrey);
    }

    // ── Diff flush ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BLANK.bg;
        let mut need_move = true;

        queue!(self.writer,
            SetForegroundColor(last_fg),
            SetBackgroundColor(last_bg),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x == 0 {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                queue!(self.writer, Print(cell.ch))?;
            }
        }

        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::hex(0xff0000);
    const BLUE: Rgb = Rgb::hex(0x0000ff);

    #[test]
    fn blit_packs_two_rows_per_cell() {
        let mut px = PixelBuffer::new(2, 2, BASE_BG);
        px.fill_rect(0, 0, 2, 1, RED);
        px.fill_rect(0, 1, 2, 1, BLUE);

        let mut fb = FrameBuffer::new(4, 4);
        fb.blit(&px, 1);

        assert_eq!(fb.get(0, 1), Cell::pixels(RED, BLUE));
        assert_eq!(fb.get(1, 1), Cell::pixels(RED, BLUE));
        assert_eq!(fb.get(0, 0), Cell::BLANK);
        assert_eq!(fb.get(0, 2), Cell::BLANK);
    }

    #[test]
    fn odd_height_pads_with_background() {
        let mut px = PixelBuffer::new(1, 3, BASE_BG);
        px.fill_rect(0, 0, 1, 3, RED);

        let mut fb = FrameBuffer::new(1, 2);
        fb.blit(&px, 0);

        assert_eq!(fb.get(0, 0), Cell::pixels(RED, RED));
        assert_eq!(fb.get(0, 1), Cell::pixels(RED, BASE_BG));
    }

    #[test]
    fn put_str_clips_at_width() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.put_str(1, 0, "abc", Color::White);
        assert_eq!(fb.get(0, 0), Cell::BLANK);
        assert_eq!(fb.get(1, 0).ch, 'a');
        assert_eq!(fb.get(2, 0).ch, 'b');
    }
}
