//! Keyboard and mouse handling for the bench window
//!
//! The presenter translates window-system events into [`InputEvent`]s and
//! hands them to the [`InputManager`], which applies them to the bench and
//! reports the action taken.

use crate::bench::Bench;
use crate::canvas::Pen;
use log::{debug, info};

/// Window input relevant to the bench
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Printable key press
    Key { ch: char },
    /// Cursor moved, physical window coordinates
    MouseMove { x: f64, y: f64 },
    /// Mouse button press/release at the last known cursor position
    MouseButton { button: MouseButton, pressed: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// What an input event did to the bench
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchAction {
    /// User asked to leave
    Quit,
    /// Window cleared and pen reset to draw
    Clear,
    /// Pen flipped; carries the new pen
    TogglePen(Pen),
    /// Logical point drawn with the pen
    Draw { x: i32, y: i32, pen: Pen },
}

/// Command bound to a key, if any
pub fn action_for_key(ch: char) -> Option<KeyCommand> {
    match ch {
        'q' | 'Q' => Some(KeyCommand::Quit),
        'c' => Some(KeyCommand::Clear),
        'x' => Some(KeyCommand::TogglePen),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Quit,
    Clear,
    TogglePen,
}

/// Logical pixel under a physical window position
pub fn logical_point(x: f64, y: f64, multiplier: u32) -> (i32, i32) {
    let m = multiplier.max(1) as f64;
    ((x / m).floor() as i32, (y / m).floor() as i32)
}

#[derive(Debug)]
pub struct InputManager {
    bench: Bench,
    multiplier: u32,
    mouse_position: (f64, f64),
}

impl InputManager {
    pub fn new(bench: Bench, multiplier: u32) -> Self {
        Self {
            bench,
            multiplier: multiplier.max(1),
            mouse_position: (0.0, 0.0),
        }
    }

    /// Apply an input event to the bench
    pub fn process_input_event(&mut self, event: InputEvent) -> Option<BenchAction> {
        match event {
            InputEvent::Key { ch } => self.process_key(ch),
            InputEvent::MouseMove { x, y } => {
                self.mouse_position = (x, y);
                None
            }
            InputEvent::MouseButton { button, pressed } => {
                if pressed {
                    self.process_click(button)
                } else {
                    None
                }
            }
        }
    }

    fn process_key(&mut self, ch: char) -> Option<BenchAction> {
        info!("You pressed the {} key!", ch);

        match action_for_key(ch)? {
            KeyCommand::Quit => Some(BenchAction::Quit),
            KeyCommand::Clear => {
                if let Err(e) = self.bench.clear_window() {
                    debug!("clear ignored: {}", e);
                    return None;
                }
                self.bench.set_pen(Pen::Draw);
                Some(BenchAction::Clear)
            }
            KeyCommand::TogglePen => {
                let pen = self.bench.toggle_pen();
                info!("Pen now = {}", pen);
                Some(BenchAction::TogglePen(pen))
            }
        }
    }

    fn process_click(&mut self, button: MouseButton) -> Option<BenchAction> {
        let (px, py) = self.mouse_position;
        let (x, y) = logical_point(px, py, self.multiplier);
        let pen = self.bench.pen();

        debug!(
            "🐁 Mouse button {:?} pressed at ({:.1}, {:.1}) -> ({}, {})",
            button, px, py, x, y
        );

        match self.bench.draw_point(x, y, pen) {
            Ok(()) => Some(BenchAction::Draw { x, y, pen }),
            Err(e) => {
                debug!("click ignored: {}", e);
                None
            }
        }
    }

    pub fn mouse_position(&self) -> (f64, f64) {
        self.mouse_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click_at(input: &mut InputManager, x: f64, y: f64) -> Option<BenchAction> {
        input.process_input_event(InputEvent::MouseMove { x, y });
        input.process_input_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        })
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(action_for_key('q'), Some(KeyCommand::Quit));
        assert_eq!(action_for_key('Q'), Some(KeyCommand::Quit));
        assert_eq!(action_for_key('c'), Some(KeyCommand::Clear));
        assert_eq!(action_for_key('x'), Some(KeyCommand::TogglePen));
        assert_eq!(action_for_key('C'), None);
        assert_eq!(action_for_key('z'), None);
    }

    #[test]
    fn test_logical_point_scaling() {
        assert_eq!(logical_point(0.0, 0.0, 1), (0, 0));
        assert_eq!(logical_point(7.9, 3.2, 1), (7, 3));
        assert_eq!(logical_point(15.0, 16.0, 4), (3, 4));
        assert_eq!(logical_point(-0.5, 2.0, 2), (-1, 1));
        // A zero multiplier behaves like 1
        assert_eq!(logical_point(5.0, 5.0, 0), (5, 5));
    }

    #[test]
    fn test_click_draws_with_current_pen() {
        let bench = Bench::headless(10, 10);
        let mut input = InputManager::new(bench.clone(), 3);

        assert_eq!(
            click_at(&mut input, 10.0, 20.0),
            Some(BenchAction::Draw {
                x: 3,
                y: 6,
                pen: Pen::Draw
            })
        );
        assert_eq!(bench.get_pixel(3, 6).unwrap(), Pen::Draw);
        assert_eq!(input.mouse_position(), (10.0, 20.0));
    }

    #[test]
    fn test_toggle_pen_then_erase() {
        let bench = Bench::headless(4, 4);
        let mut input = InputManager::new(bench.clone(), 1);
        click_at(&mut input, 1.0, 1.0);

        assert_eq!(
            input.process_input_event(InputEvent::Key { ch: 'x' }),
            Some(BenchAction::TogglePen(Pen::Erase))
        );
        click_at(&mut input, 1.0, 1.0);
        assert_eq!(bench.get_pixel(1, 1).unwrap(), Pen::Erase);
    }

    #[test]
    fn test_clear_resets_pen() {
        let bench = Bench::headless(4, 4);
        bench.draw_point(2, 2, Pen::Draw).unwrap();
        bench.set_pen(Pen::Erase);

        let mut input = InputManager::new(bench.clone(), 1);
        assert_eq!(
            input.process_input_event(InputEvent::Key { ch: 'c' }),
            Some(BenchAction::Clear)
        );
        assert_eq!(bench.pen(), Pen::Draw);
        assert_eq!(bench.with_mirror(|m| m.lit_count()), 0);
    }

    #[test]
    fn test_quit_and_unbound_keys() {
        let bench = Bench::headless(4, 4);
        let mut input = InputManager::new(bench, 1);
        assert_eq!(
            input.process_input_event(InputEvent::Key { ch: 'Q' }),
            Some(BenchAction::Quit)
        );
        assert_eq!(input.process_input_event(InputEvent::Key { ch: 'k' }), None);
    }

    #[test]
    fn test_click_outside_area_ignored() {
        let bench = Bench::headless(4, 4);
        let mut input = InputManager::new(bench.clone(), 2);
        assert_eq!(click_at(&mut input, 8.0, 1.0), None);
        assert_eq!(bench.with_mirror(|m| m.lit_count()), 0);
    }

    #[test]
    fn test_release_does_not_draw() {
        let bench = Bench::headless(4, 4);
        let mut input = InputManager::new(bench.clone(), 1);
        input.process_input_event(InputEvent::MouseMove { x: 1.0, y: 1.0 });
        assert_eq!(
            input.process_input_event(InputEvent::MouseButton {
                button: MouseButton::Right,
                pressed: false
            }),
            None
        );
        assert_eq!(bench.with_mirror(|m| m.lit_count()), 0);
    }
}
