//! Host to engine input translation.
//!
//! A host mouse event may carry several facts at once. Only one engine event is produced per host
//! event, picked in this order: button transition, wheel rotation, movement. Events carrying none
//! of these (enter/leave notifications, for instance) produce nothing.

use crate::engine::event::{KeyInput, MouseInput, MouseInputKind};
use crate::host::event::{ButtonState, KeyEvent, KeyTransition, MouseButton, MouseEvent};

pub fn translate_mouse(event: &MouseEvent) -> Option<MouseInput> {
    let (kind, wheel) = if let Some(change) = event.button {
        let kind = match (change.button, change.state) {
            (MouseButton::Left, ButtonState::Down) => MouseInputKind::LeftPressed,
            (MouseButton::Left, ButtonState::Up) => MouseInputKind::LeftReleased,
            (MouseButton::Middle, ButtonState::Down) => MouseInputKind::MiddlePressed,
            (MouseButton::Middle, ButtonState::Up) => MouseInputKind::MiddleReleased,
            (MouseButton::Right, ButtonState::Down) => MouseInputKind::RightPressed,
            (MouseButton::Right, ButtonState::Up) => MouseInputKind::RightReleased,
        };
        (kind, 0.0)
    } else if event.wheel_rotation != 0 {
        (MouseInputKind::Wheel, event.wheel_rotation as f32)
    } else if event.moving || event.dragging {
        (MouseInputKind::Moved, 0.0)
    } else {
        return None;
    };

    Some(MouseInput { kind, x: event.x, y: event.y, wheel })
}

pub fn translate_key(event: &KeyEvent) -> KeyInput {
    let character = event
        .unicode_key
        .or_else(|| u8::try_from(event.key_code).ok().map(char::from))
        .unwrap_or('\0');

    KeyInput {
        key: event.raw_key_code,
        pressed_down: event.transition == KeyTransition::Down,
        shift: event.shift,
        control: event.cmd,
        character,
    }
}
