// Minimal widget set drawn through the Canvas capability
use crate::devices::framebuffer::{text_width, Canvas, Color, GLYPH_ADVANCE, GLYPH_HEIGHT};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w as i32)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h as i32)
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }
}

pub trait Widget {
    fn layout(&mut self, bounds: Rect) -> Rect;
    fn render<C: Canvas>(&self, canvas: &mut C, theme: &Theme);
}

pub struct Panel {
    pub rect: Rect,
    pub bg: Color,
}

impl Panel {
    pub fn new(bg: Color) -> Self {
        Self { rect: Rect::default(), bg }
    }
}

impl Widget for Panel {
    fn layout(&mut self, bounds: Rect) -> Rect {
        self.rect = bounds;
        self.rect
    }

    fn render<C: Canvas>(&self, canvas: &mut C, _theme: &Theme) {
        let r = self.rect;
        canvas.fill_rect(r.x, r.y, r.w, r.h, self.bg);
    }
}

/// Single line of text, clipped to its rectangle's width.
pub struct Label<'a> {
    pub rect: Rect,
    pub text: &'a str,
    pub color: Color,
    pub bg: Option<Color>,
}

impl<'a> Label<'a> {
    pub fn new(text: &'a str, color: Color) -> Self {
        Self { rect: Rect::default(), text, color, bg: None }
    }
}

impl Widget for Label<'_> {
    fn layout(&mut self, bounds: Rect) -> Rect {
        self.rect = Rect::new(bounds.x, bounds.y, bounds.w.min(text_width(self.text)), GLYPH_HEIGHT as u32);
        self.rect
    }

    fn render<C: Canvas>(&self, canvas: &mut C, _theme: &Theme) {
        let fits = (self.rect.w / GLYPH_ADVANCE as u32) as usize;
        let end = self
            .text
            .char_indices()
            .nth(fits)
            .map_or(self.text.len(), |(i, _)| i);
        canvas.draw_string(self.rect.x, self.rect.y, &self.text[..end], self.color, self.bg);
    }
}

/// Bordered push button with a centered caption.
pub struct Button<'a> {
    pub rect: Rect,
    pub caption: &'a str,
    pub hovered: bool,
    /// Fill used instead of the theme's hover color.
    pub hover_fill: Option<Color>,
}

impl<'a> Button<'a> {
    pub fn new(caption: &'a str) -> Self {
        Self { rect: Rect::default(), caption, hovered: false, hover_fill: None }
    }
}

impl Widget for Button<'_> {
    fn layout(&mut self, bounds: Rect) -> Rect {
        self.rect = bounds;
        self.rect
    }

    fn render<C: Canvas>(&self, canvas: &mut C, theme: &Theme) {
        let r = self.rect;
        let fill = match (self.hovered, self.hover_fill) {
            (true, Some(fill)) => fill,
            (true, None) => theme.button_hover,
            (false, _) => theme.button,
        };
        canvas.fill_rect(r.x, r.y, r.w, r.h, fill);
        canvas.draw_rect(r.x, r.y, r.w, r.h, theme.button_border);

        let tw = text_width(self.caption) as i32;
        let tx = r.x + (r.w as i32 - tw + 1) / 2;
        let ty = r.y + (r.h as i32 - GLYPH_HEIGHT) / 2;
        canvas.draw_string(tx, ty, self.caption, theme.text, None);
    }
}
