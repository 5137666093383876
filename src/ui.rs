//! Menu widgets.  Both are stationary entities: they share `Body` geometry
//! with the ships but never move.

use crossterm::style::Color;

use crate::entities::{Body, Entity};
use crate::input::InputSnapshot;
use crate::surface::{Bounds, Rect, Surface};

// ── Button ────────────────────────────────────────────────────────────────────

/// A clickable button, also triggered by its hotkey.
#[derive(Clone, Debug)]
pub struct Button {
    pub body: Body,
    pub label: String,
    pub hotkey: Option<char>,
    pub hover_color: Color,
    hovered: bool,
}

impl Button {
    pub fn new(label: &str, rect: Rect, hotkey: Option<char>) -> Self {
        Button {
            body: Body::new(rect.x, rect.y, rect.width, rect.height, 0.0),
            label: label.to_string(),
            hotkey,
            hover_color: Color::DarkGrey,
            hovered: false,
        }
    }

    /// A button of the given size centred horizontally on the field.
    pub fn centered(label: &str, field: Bounds, y: f32, width: f32, hotkey: Option<char>) -> Self {
        Button::new(label, Rect::new(field.width / 2.0 - width / 2.0, y, width, 80.0), hotkey)
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Update hover state; true when clicked or its hotkey was typed.
    pub fn poll(&mut self, input: &InputSnapshot) -> bool {
        let (px, py) = input.pointer;
        self.hovered = self.body.rect().contains(px, py);
        let clicked = self.hovered && input.pointer_pressed;
        let hotkey = self.hotkey.is_some_and(|k| {
            input.typed.iter().any(|c| c.eq_ignore_ascii_case(&k))
        });
        clicked || hotkey
    }
}

impl Entity for Button {
    fn body(&self) -> &Body {
        &self.body
    }

    fn advance(&mut self, _direction: i32, _bounds: Bounds) {}

    fn draw(&self, surface: &mut dyn Surface) {
        let rect = self.body.rect();
        if self.hovered {
            surface.fill_rect(rect, self.hover_color);
        }
        surface.outline_rect(rect, Color::White);
        let label = match self.hotkey {
            Some(k) => format!("{} ({})", self.label, k),
            None => self.label.clone(),
        };
        surface.text_centered(rect.y + rect.height / 2.0, &label, Color::White);
    }
}

// ── Text input ────────────────────────────────────────────────────────────────

/// Single-line text box.  Click inside (or tab) to focus; click outside or
/// press enter to commit.
#[derive(Clone, Debug)]
pub struct InputField {
    pub body: Body,
    pub text: String,
    pub active: bool,
    pub active_color: Color,
    pub inactive_color: Color,
}

impl InputField {
    pub fn new(rect: Rect) -> Self {
        InputField {
            body: Body::new(rect.x, rect.y, rect.width, rect.height, 0.0),
            text: String::new(),
            active: false,
            active_color: Color::White,
            inactive_color: Color::DarkGrey,
        }
    }

    pub fn focus(&mut self) {
        self.active = true;
    }

    /// Process one frame of input.  Returns the text when the field is
    /// committed (deactivated after being active).
    pub fn handle(&mut self, input: &InputSnapshot) -> Option<String> {
        if input.pointer_pressed {
            let was_active = self.active;
            let (px, py) = input.pointer;
            self.active = self.body.rect().contains(px, py);
            if was_active && !self.active {
                return Some(self.text.clone());
            }
        }
        if !self.active {
            return None;
        }
        if input.backspace {
            self.text.pop();
        }
        self.text.extend(input.typed.iter().filter(|c| !c.is_control()));
        if input.enter {
            self.active = false;
            return Some(self.text.clone());
        }
        None
    }

    fn color(&self) -> Color {
        if self.active {
            self.active_color
        } else {
            self.inactive_color
        }
    }
}

impl Entity for InputField {
    fn body(&self) -> &Body {
        &self.body
    }

    fn advance(&mut self, _direction: i32, _bounds: Bounds) {}

    /// The box widens to fit long text.
    fn draw(&self, surface: &mut dyn Surface) {
        let glyph = surface.glyph_width();
        let mut rect = self.body.rect();
        rect.width = rect.width.max((self.text.chars().count() as f32 + 2.0) * glyph);
        surface.outline_rect(rect, self.color());
        surface.text(rect.x + glyph, rect.y + rect.height / 2.0, &self.text, self.color());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(x: f32, y: f32) -> InputSnapshot {
        InputSnapshot { pointer: (x, y), pointer_pressed: true, ..Default::default() }
    }

    fn typing(chars: &str) -> InputSnapshot {
        InputSnapshot { typed: chars.chars().collect(), ..Default::default() }
    }

    #[test]
    fn button_click_and_hotkey() {
        let mut b = Button::new("Play", Rect::new(100.0, 100.0, 200.0, 80.0), Some('p'));
        assert!(b.poll(&click(150.0, 120.0)));
        assert!(b.is_hovered());
        assert!(!b.poll(&click(10.0, 10.0)));
        assert!(b.poll(&typing("P")));
    }

    #[test]
    fn field_accepts_text_only_when_active() {
        let mut f = InputField::new(Rect::new(0.0, 0.0, 300.0, 50.0));
        assert_eq!(f.handle(&typing("ignored")), None);
        assert_eq!(f.text, "");
        f.handle(&click(10.0, 10.0));
        assert!(f.active);
        f.handle(&typing("Ada"));
        let mut back = typing("");
        back.backspace = true;
        f.handle(&back);
        assert_eq!(f.text, "Ad");
    }

    #[test]
    fn click_outside_commits() {
        let mut f = InputField::new(Rect::new(0.0, 0.0, 300.0, 50.0));
        f.focus();
        f.handle(&typing("Ada"));
        assert_eq!(f.handle(&click(500.0, 500.0)), Some("Ada".to_string()));
        assert!(!f.active);
    }

    #[test]
    fn enter_commits() {
        let mut f = InputField::new(Rect::new(0.0, 0.0, 300.0, 50.0));
        f.focus();
        let mut input = typing("x.txt");
        input.enter = true;
        assert_eq!(f.handle(&input), Some("x.txt".to_string()));
    }
}
