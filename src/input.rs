//! Keyboard State Tracking
//!
//! Holds the level state of every key (for continuous camera motion) and
//! detects press-then-release edges (for one-shot actions like the render
//! mode toggle). An edge fires exactly once per press/release cycle no
//! matter how long the key is held.

use std::collections::HashSet;

use sdl2::keyboard::Keycode;

use crate::display::InputEvent;

#[derive(Default)]
pub struct KeyState {
    held: HashSet<Keycode>,
    released: HashSet<Keycode>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame: release edges from the previous frame expire
    pub fn begin_frame(&mut self) {
        self.released.clear();
    }

    /// Feed one polled event into the tracker
    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.held.insert(*key);
            },
            InputEvent::KeyUp(key) => {
                // Only a key we saw go down produces a release edge
                if self.held.remove(key) {
                    self.released.insert(*key);
                }
            },
            InputEvent::Quit => {},
        }
    }

    /// Level query: is the key currently held down?
    #[inline]
    pub fn is_held(&self, key: Keycode) -> bool {
        self.held.contains(&key)
    }

    /// Edge query: did the key complete a press-then-release cycle this frame?
    #[inline]
    pub fn released(&self, key: Keycode) -> bool {
        self.released.contains(&key)
    }

    /// Signed axis from a pair of opposing keys (e.g. rotate left/right)
    #[inline]
    pub fn axis(&self, negative: Keycode, positive: Keycode) -> f32 {
        let mut v = 0.0;
        if self.is_held(negative) {
            v -= 1.0;
        }
        if self.is_held(positive) {
            v += 1.0;
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(key: Keycode) -> InputEvent {
        InputEvent::KeyDown(key)
    }

    fn up(key: Keycode) -> InputEvent {
        InputEvent::KeyUp(key)
    }

    #[test]
    fn test_held_tracks_level_state() {
        let mut keys = KeyState::new();
        keys.apply(&down(Keycode::Up));
        assert!(keys.is_held(Keycode::Up));
        keys.apply(&up(Keycode::Up));
        assert!(!keys.is_held(Keycode::Up));
    }

    #[test]
    fn test_no_edge_while_key_is_held() {
        let mut keys = KeyState::new();
        keys.begin_frame();
        keys.apply(&down(Keycode::M));
        assert!(!keys.released(Keycode::M));

        // Key stays down across several frames: still no edge
        for _ in 0..5 {
            keys.begin_frame();
            assert!(!keys.released(Keycode::M));
        }
    }

    #[test]
    fn test_edge_fires_once_per_press_release_cycle() {
        let mut keys = KeyState::new();

        keys.begin_frame();
        keys.apply(&down(Keycode::M));
        keys.begin_frame();
        keys.apply(&up(Keycode::M));
        assert!(keys.released(Keycode::M));

        // Edge expires on the next frame
        keys.begin_frame();
        assert!(!keys.released(Keycode::M));
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut keys = KeyState::new();
        keys.begin_frame();
        keys.apply(&up(Keycode::M));
        assert!(!keys.released(Keycode::M));
    }

    #[test]
    fn test_two_cycles_fire_two_edges() {
        let mut keys = KeyState::new();
        let mut edges = 0;
        for _ in 0..2 {
            keys.begin_frame();
            keys.apply(&down(Keycode::M));
            keys.begin_frame();
            keys.apply(&up(Keycode::M));
            if keys.released(Keycode::M) {
                edges += 1;
            }
        }
        assert_eq!(edges, 2);
    }

    #[test]
    fn test_axis_combines_opposing_keys() {
        let mut keys = KeyState::new();
        assert_eq!(keys.axis(Keycode::Q, Keycode::E), 0.0);
        keys.apply(&down(Keycode::E));
        assert_eq!(keys.axis(Keycode::Q, Keycode::E), 1.0);
        keys.apply(&down(Keycode::Q));
        assert_eq!(keys.axis(Keycode::Q, Keycode::E), 0.0);
        keys.apply(&up(Keycode::E));
        assert_eq!(keys.axis(Keycode::Q, Keycode::E), -1.0);
    }
}
