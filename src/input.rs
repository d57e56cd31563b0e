//! Input collection
//!
//! Accumulates raw key and pointer events between frames and turns them
//! into one `FrameInput` per tick. The platform shell forwards events as
//! they arrive; the simulation only ever sees the polled snapshot.
//! One-shot triggers (dash, start) clear on snapshot so each fires at
//! most once no matter how event and frame timing interleave.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::FrameInput;

/// Maximum joystick displacement; larger drags saturate at full tilt
const JOYSTICK_RADIUS: f32 = 40.0;
/// Joystick magnitude below this is treated as resting
const JOYSTICK_DEADZONE: f32 = 0.1;
/// A release counts as a flick past this displacement...
const FLICK_DISTANCE: f32 = 50.0;
/// ...if the whole gesture took less than this
const FLICK_MAX_SECS: f32 = 0.2;

/// Logical movement/action keys after device mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Dash,
}

impl Key {
    /// Map a DOM-style key name to a logical key. Unmapped keys still
    /// count as "any key" for the start trigger.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "w" | "W" | "ArrowUp" => Some(Key::Up),
            "s" | "S" | "ArrowDown" => Some(Key::Down),
            "a" | "A" | "ArrowLeft" => Some(Key::Left),
            "d" | "D" | "ArrowRight" => Some(Key::Right),
            " " | "Shift" => Some(Key::Dash),
            _ => None,
        }
    }
}

/// Active pointer drag, doubling as virtual joystick and flick tracker
#[derive(Debug, Clone, Copy)]
struct Drag {
    origin: Vec2,
    current: Vec2,
    elapsed: f32,
}

/// Event accumulator polled once per frame via [`InputCollector::snapshot`]
#[derive(Debug, Default)]
pub struct InputCollector {
    keys: HashSet<Key>,
    drag: Option<Drag>,
    dash_edge: bool,
    start_edge: bool,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any key press arms the start trigger; mapped keys also update the
    /// held set, with Dash firing its edge on press rather than while held.
    pub fn key_down(&mut self, key: Option<Key>) {
        self.start_edge = true;
        if let Some(key) = key {
            if key == Key::Dash {
                self.dash_edge = true;
            } else {
                self.keys.insert(key);
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.start_edge = true;
        self.drag = Some(Drag {
            origin: pos,
            current: pos,
            elapsed: 0.0,
        });
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        if let Some(drag) = self.drag.as_mut() {
            drag.current = pos;
        }
    }

    /// End the drag; a fast, long displacement releases as a flick
    pub fn pointer_up(&mut self) {
        if let Some(drag) = self.drag.take()
            && drag.elapsed < FLICK_MAX_SECS
            && drag.origin.distance(drag.current) > FLICK_DISTANCE
        {
            self.dash_edge = true;
        }
    }

    /// Advance gesture timers; call once per frame before `snapshot`
    pub fn update(&mut self, dt: f32) {
        if let Some(drag) = self.drag.as_mut() {
            drag.elapsed += dt;
        }
    }

    /// Joystick direction with magnitude in [0, 1], displacement saturating
    /// at [`JOYSTICK_RADIUS`]. None while no drag is active.
    fn joystick(&self) -> Option<Vec2> {
        let drag = self.drag?;
        let offset = drag.current - drag.origin;
        let len = offset.length();
        if len <= JOYSTICK_RADIUS {
            Some(offset / JOYSTICK_RADIUS)
        } else {
            Some(offset / len)
        }
    }

    fn key_axis(&self) -> Vec2 {
        let axis = |neg: Key, pos: Key| -> f32 {
            let mut v = 0.0;
            if self.keys.contains(&neg) {
                v -= 1.0;
            }
            if self.keys.contains(&pos) {
                v += 1.0;
            }
            v
        };
        Vec2::new(axis(Key::Left, Key::Right), axis(Key::Up, Key::Down))
    }

    /// Produce this frame's input. The joystick overrides the keyboard
    /// whenever it is tilted past the deadzone; one-shot edges clear here.
    pub fn snapshot(&mut self) -> FrameInput {
        let movement = match self.joystick() {
            Some(joy) if joy.length() > JOYSTICK_DEADZONE => joy,
            _ => self.key_axis(),
        };
        let input = FrameInput {
            movement,
            dash: self.dash_edge,
            start: self.start_edge,
        };
        self.dash_edge = false;
        self.start_edge = false;
        input
    }
}
