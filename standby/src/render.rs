use crate::celestial::Viewport;
use crate::color::Rgba;
use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg: Color::Black,
        }
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }
    pub(crate) fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }
    pub(crate) fn get(&self, x: u16, y: u16) -> Option<Cell> {
        if x < self.w && y < self.h {
            Some(self.cells[self.idx(x, y)])
        } else {
            None
        }
    }
    pub(crate) fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }
    pub(crate) fn clear(&mut self, bg: Color) {
        for c in &mut self.cells {
            c.ch = ' ';
            c.fg = Color::White;
            c.bg = bg;
        }
    }
}

pub(crate) struct PixelCanvas {
    pub(crate) w: u32,
    pub(crate) h: u32,
    pub(crate) px: Vec<Rgba>,
}

impl PixelCanvas {
    pub(crate) fn new(w: u32, h: u32) -> Self {
        Self {
            w,
            h,
            px: vec![Rgba::default(); (w as usize) * (h as usize)],
        }
    }
    pub(crate) fn idx(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }
    pub(crate) fn clear(&mut self, p: Rgba) {
        self.px.fill(p);
    }
    pub(crate) fn viewport(&self) -> Viewport {
        Viewport {
            w: self.w,
            h: self.h,
        }
    }

    pub(crate) fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.w && y < self.h {
            Some(self.px[self.idx(x, y)])
        } else {
            None
        }
    }

    /// Filled disc centred on a sub-pixel position, overwriting whatever is
    /// underneath. Nothing is drawn for a non-positive radius.
    pub(crate) fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        if !(radius > 0.0) || !cx.is_finite() || !cy.is_finite() || self.w == 0 || self.h == 0 {
            return;
        }
        let r2 = radius * radius;
        // clip the bounding box to the canvas before walking it
        let x_lo = (cx - radius).floor().max(0.0) as u32;
        let y_lo = (cy - radius).floor().max(0.0) as u32;
        let x_hi = (cx + radius).ceil().min(self.w as f32 - 1.0);
        let y_hi = (cy + radius).ceil().min(self.h as f32 - 1.0);
        if x_hi < 0.0 || y_hi < 0.0 {
            return;
        }
        let (x_hi, y_hi) = (x_hi as u32, y_hi as u32);

        for y in y_lo..=y_hi {
            let dy = y as f32 - cy;
            for x in x_lo..=x_hi {
                let dx = x as f32 - cx;
                if dx * dx + dy * dy <= r2 {
                    let i = self.idx(x, y);
                    self.px[i] = color;
                }
            }
        }
    }
}

pub(crate) struct Terminal {
    pub(crate) out: io::Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    pub(crate) prev: CellBuffer,
    pub(crate) cur: CellBuffer,
    pub(crate) canvas: PixelCanvas,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        // nothing to undo if this fails
        let (cols, rows) = terminal::size()?;

        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        with_rollback(
            execute!(
                out,
                EnterAlternateScreen,
                cursor::Hide,
                DisableLineWrap,
                terminal::Clear(ClearType::All)
            ),
            || {
                execute!(io::stdout(), cursor::Show, EnableLineWrap, LeaveAlternateScreen)?;
                terminal::disable_raw_mode()
            },
        )?;

        Ok(Self {
            out,
            cols,
            rows,
            prev: CellBuffer::new(cols, rows),
            cur: CellBuffer::new(cols, rows),
            // Braille: 2×4 pixels per cell
            canvas: PixelCanvas::new(cols as u32 * 2, rows as u32 * 4),
        })
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            BeginSynchronizedUpdate,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            EndSynchronizedUpdate,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn resize_if_needed(&mut self) -> anyhow::Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        self.cols = c;
        self.rows = r;
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        self.canvas = PixelCanvas::new(c as u32 * 2, r as u32 * 4);
        // prev no longer mirrors the screen
        queue!(self.out, Clear(ClearType::All))?;
        Ok(true)
    }

    pub(crate) fn present(&mut self, diff_only: bool) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;
        // where the terminal cursor sits after the previous Print
        let mut cursor_at = None;

        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if diff_only && c == self.prev.cells[i] {
                    continue;
                }

                if cursor_at != Some((x, y)) {
                    queue!(self.out, cursor::MoveTo(x, y))?;
                }
                if last_fg != Some(c.fg) {
                    queue!(self.out, SetForegroundColor(c.fg))?;
                    last_fg = Some(c.fg);
                }
                if last_bg != Some(c.bg) {
                    queue!(self.out, SetBackgroundColor(c.bg))?;
                    last_bg = Some(c.bg);
                }

                queue!(self.out, Print(c.ch))?;
                cursor_at = Some((x + 1, y));
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}

/// Runs `undo` when `step` failed, then hands back the original result.
fn with_rollback<T>(step: io::Result<T>, undo: impl FnOnce() -> io::Result<()>) -> io::Result<T> {
    if step.is_err() {
        // the setup error is the one worth reporting
        let _ = undo();
    }
    step
}

/* -----------------------------
   Braille encoding: 2×4 pixels -> U+2800..U+28FF
------------------------------ */

// Dot bit for sub-pixel (dx, dy), indexed [dy][dx].
const BRAILLE_DOTS: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

/// Painted sub-pixels of one terminal cell.
#[derive(Default)]
struct Ink {
    mask: u8,
    rgb: [u32; 3],
    dots: u32,
}

impl Ink {
    fn gather(canvas: &PixelCanvas, col: u32, row: u32) -> Self {
        let mut ink = Ink::default();
        for (dy, bits) in BRAILLE_DOTS.iter().enumerate() {
            for (dx, &bit) in bits.iter().enumerate() {
                let Some(p) = canvas.get(col * 2 + dx as u32, row * 4 + dy as u32) else {
                    continue;
                };
                // the canvas starts BLANK; any alpha at all was painted
                if p.a == 0 {
                    continue;
                }
                ink.mask |= bit;
                ink.rgb[0] += u32::from(p.r);
                ink.rgb[1] += u32::from(p.g);
                ink.rgb[2] += u32::from(p.b);
                ink.dots += 1;
            }
        }
        ink
    }

    fn glyph(&self) -> char {
        char::from_u32(0x2800 | u32::from(self.mask)).unwrap_or(' ')
    }

    /// Mean colour of the painted dots.
    fn color(&self) -> Option<Color> {
        if self.dots == 0 {
            return None;
        }
        let [r, g, b] = self.rgb.map(|sum| (sum / self.dots) as u8);
        Some(Color::Rgb { r, g, b })
    }
}

/// Folds the canvas into braille cells over a solid background.
pub(crate) fn canvas_to_cells(
    canvas: &PixelCanvas,
    out: &mut CellBuffer,
    enable_color: bool,
    bg: Color,
) {
    for row in 0..out.h {
        for col in 0..out.w {
            let ink = Ink::gather(canvas, u32::from(col), u32::from(row));
            let fg = match ink.color() {
                Some(c) if enable_color => c,
                _ => Color::White,
            };
            out.set(
                col,
                row,
                Cell {
                    ch: ink.glyph(),
                    fg,
                    bg,
                },
            );
        }
    }
}

/* -----------------------------
   Clock readout (3×5 block font)
------------------------------ */

const GLYPH_H: u16 = 5;

fn glyph(ch: char) -> Option<[&'static str; 5]> {
    let g = match ch {
        '0' => ["###", "#.#", "#.#", "#.#", "###"],
        '1' => [".#.", "##.", ".#.", ".#.", "###"],
        '2' => ["###", "..#", "###", "#..", "###"],
        '3' => ["###", "..#", "###", "..#", "###"],
        '4' => ["#.#", "#.#", "###", "..#", "..#"],
        '5' => ["###", "#..", "###", "..#", "###"],
        '6' => ["###", "#..", "###", "#.#", "###"],
        '7' => ["###", "..#", ".#.", ".#.", ".#."],
        '8' => ["###", "#.#", "###", "#.#", "###"],
        '9' => ["###", "#.#", "###", "..#", "###"],
        ':' => [".", "#", ".", "#", "."],
        _ => return None,
    };
    Some(g)
}

/// Width of `text` in font pixels, one blank column between glyphs.
fn text_units(text: &str) -> u16 {
    let widths: Vec<u16> = text
        .chars()
        .filter_map(glyph)
        .map(|g| g[0].len() as u16)
        .collect();
    let gaps = widths.len().saturating_sub(1) as u16;
    widths.iter().sum::<u16>() + gaps
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ClockLayout {
    pub(crate) x0: u16,
    pub(crate) y0: u16,
    pub(crate) sx: u16,
    pub(crate) sy: u16,
}

/// Block-font placement: about a quarter of the screen tall, centred
/// horizontally, top edge at one third of the height. Cells are roughly twice
/// as tall as they are wide, so font pixels are two cells wide per row.
pub(crate) fn clock_layout(text: &str, cols: u16, rows: u16) -> Option<ClockLayout> {
    let units = text_units(text);
    if units == 0 {
        return None;
    }
    let mut sy = (rows / 4) / GLYPH_H;
    while sy > 0 && u32::from(units) * u32::from(sy) * 2 > u32::from(cols) {
        sy -= 1;
    }
    if sy == 0 {
        return None;
    }
    let sx = sy * 2;
    let w = units * sx;
    let h = GLYPH_H * sy;
    let y0 = (rows / 3).min(rows.saturating_sub(h));
    Some(ClockLayout {
        x0: (cols - w) / 2,
        y0,
        sx,
        sy,
    })
}

pub(crate) fn draw_clock(buf: &mut CellBuffer, text: &str, fg: Color) {
    let Some(layout) = clock_layout(text, buf.w, buf.h) else {
        // too small for block digits
        let len = text.chars().count() as u16;
        let x = buf.w.saturating_sub(len) / 2;
        draw_text(buf, x, buf.h / 3, text, fg);
        return;
    };

    let mut gx = layout.x0;
    for g in text.chars().filter_map(glyph) {
        for (row, line) in g.iter().enumerate() {
            for (col, px) in line.chars().enumerate() {
                if px != '#' {
                    continue;
                }
                let x = gx + col as u16 * layout.sx;
                let y = layout.y0 + row as u16 * layout.sy;
                for dy in 0..layout.sy {
                    for dx in 0..layout.sx {
                        paint(buf, x + dx, y + dy, '█', fg);
                    }
                }
            }
        }
        gx += (g[0].len() as u16 + 1) * layout.sx;
    }
}

// Keeps whatever sky colour is already behind the cell.
fn paint(buf: &mut CellBuffer, x: u16, y: u16, ch: char, fg: Color) {
    if let Some(c) = buf.get(x, y) {
        buf.set(x, y, Cell { ch, fg, bg: c.bg });
    }
}

pub(crate) fn draw_text(buf: &mut CellBuffer, x: u16, y: u16, s: &str, fg: Color) {
    for (i, ch) in s.chars().enumerate() {
        let xx = x.saturating_add(i as u16);
        if xx >= buf.w || y >= buf.h {
            break;
        }
        paint(buf, xx, y, ch, fg);
    }
}
