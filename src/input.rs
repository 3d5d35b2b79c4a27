//! Logical input: what the simulation sees of the keyboard each tick.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

impl Key {
    pub const ALL: [Key; 5] = [Key::Up, Key::Down, Key::Left, Key::Right, Key::Fire];
}

/// Level state: which keys are held during this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl KeyState {
    pub fn is_pressed(&self, key: Key) -> bool {
        match key {
            Key::Up => self.up,
            Key::Down => self.down,
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Fire => self.fire,
        }
    }

    pub fn set(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Up => self.up = pressed,
            Key::Down => self.down = pressed,
            Key::Left => self.left = pressed,
            Key::Right => self.right = pressed,
            Key::Fire => self.fire = pressed,
        }
    }

    pub fn with(mut self, key: Key) -> Self {
        self.set(key, true);
        self
    }
}

/// Discrete events: the quit request and key edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
}

/// Everything polled for one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub keys: KeyState,
    pub events: Vec<InputEvent>,
}

impl FrameInput {
    pub fn new(keys: KeyState, events: Vec<InputEvent>) -> Self {
        FrameInput { keys, events }
    }

    pub fn quit_requested(&self) -> bool {
        self.events.contains(&InputEvent::Quit)
    }
}
