use crate::viewport::SurfaceSize;

/// Represents a mouse button of the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Down,
    Up,
}

/// A mouse button was pressed or released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonChange {
    pub button: MouseButton,
    pub state: ButtonState,
}

/// Mouse event as delivered by the host. A single event can carry several facts at once, e.g. a
/// button transition together with wheel rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseEvent {
    /// Button transition carried by this event, if any
    pub button: Option<ButtonChange>,
    /// Wheel rotation, 0 when the wheel did not move
    pub wheel_rotation: i32,
    /// Pointer moved without buttons held
    pub moving: bool,
    /// Pointer moved with a button held
    pub dragging: bool,
    /// The x coordinate, local to the widget
    pub x: i32,
    /// The y coordinate, local to the widget
    pub y: i32,
}

impl MouseEvent {
    pub fn button(button: MouseButton, state: ButtonState, x: i32, y: i32) -> Self {
        Self { button: Some(ButtonChange { button, state }), x, y, ..Self::default() }
    }

    pub fn wheel(rotation: i32, x: i32, y: i32) -> Self {
        Self { wheel_rotation: rotation, x, y, ..Self::default() }
    }

    pub fn motion(x: i32, y: i32) -> Self {
        Self { moving: true, x, y, ..Self::default() }
    }

    pub fn drag(x: i32, y: i32) -> Self {
        Self { dragging: true, x, y, ..Self::default() }
    }

    pub fn with_wheel(mut self, rotation: i32) -> Self {
        self.wheel_rotation = rotation;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    Down,
    Up,
}

/// Keyboard event as delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub transition: KeyTransition,
    /// Platform key code, untranslated
    pub raw_key_code: u32,
    /// Toolkit key code
    pub key_code: i32,
    /// Unicode character of the key, when the host supports it
    pub unicode_key: Option<char>,
    pub shift: bool,
    /// Control, or command on macOS
    pub cmd: bool,
}

impl KeyEvent {
    pub fn new(transition: KeyTransition, raw_key_code: u32, key_code: i32) -> Self {
        Self { transition, raw_key_code, key_code, unicode_key: None, shift: false, cmd: false }
    }

    pub fn with_unicode(mut self, c: char) -> Self {
        self.unicode_key = Some(c);
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_cmd(mut self) -> Self {
        self.cmd = true;
        self
    }
}

/// A size event from the widget itself or from its parent window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeEvent {
    pub size: SurfaceSize,
}

impl SizeEvent {
    pub fn new(width: u32, height: u32) -> Self {
        Self { size: SurfaceSize::new(width, height) }
    }
}

/// Events the host delivers to an embedded render widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// Widget area must be repainted
    Paint,
    /// Toolkit is about to erase the background
    EraseBackground,
    /// Widget itself was resized
    Size(SizeEvent),
    /// Parent window was resized
    ParentSize(SizeEvent),
    Mouse(MouseEvent),
    Key(KeyEvent),
    /// Rendering timer fired
    Timer,
}

/// Whether the host should keep delivering an event to other listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFlow {
    Consumed,
    Propagate,
}
