/// Mouse event kinds understood by the render engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseInputKind {
    /// Left mouse button was pressed down
    LeftPressed,
    /// Left mouse button was released
    LeftReleased,
    /// Middle mouse button was pressed down
    MiddlePressed,
    /// Middle mouse button was released
    MiddleReleased,
    /// Right mouse button was pressed down
    RightPressed,
    /// Right mouse button was released
    RightReleased,
    /// Mouse wheel was rotated
    Wheel,
    /// Mouse moved, with or without buttons held
    Moved,
}

/// Mouse input posted into the engine's input queue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseInput {
    pub kind: MouseInputKind,
    /// The x coordinate, local to the render surface
    pub x: i32,
    /// The y coordinate, local to the render surface
    pub y: i32,
    /// Wheel rotation, only non-zero for [`MouseInputKind::Wheel`]
    pub wheel: f32,
}

/// Keyboard input posted into the engine's input queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    /// Raw platform key code, passed through untouched
    pub key: u32,
    /// True on key down, false on key up
    pub pressed_down: bool,
    pub shift: bool,
    /// Control, or command on macOS
    pub control: bool,
    /// Character produced by the key, `'\0'` when there is none
    pub character: char,
}

/// Events that have occurred in the host and must be passed to the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    Mouse(MouseInput),
    Key(KeyInput),
}
