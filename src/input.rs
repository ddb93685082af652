// Input module - Controller input handling
//
// The CPU sees the controller through $4016 as a serial shift register:
// a write with bit 0 set latches the buttons (strobe), each read returns the
// next button in order A, B, Select, Start, Up, Down, Left, Right, and every
// read after the eighth returns 1.

pub mod config;

use std::collections::HashMap;

pub use config::{InputConfig, MappingConfig};

/// NES controller button, in serial read order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    /// Every button, in the order the shift register reports them
    pub const ALL: [Button; 8] = [
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    /// Position in the serial read sequence
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse a button name as used on the command line ("a", "start", ...)
    pub fn from_name(name: &str) -> Option<Button> {
        match name.to_ascii_lowercase().as_str() {
            "a" => Some(Button::A),
            "b" => Some(Button::B),
            "select" => Some(Button::Select),
            "start" => Some(Button::Start),
            "up" => Some(Button::Up),
            "down" => Some(Button::Down),
            "left" => Some(Button::Left),
            "right" => Some(Button::Right),
            _ => None,
        }
    }
}

/// A device plugged into controller port 1 ($4016)
pub trait ControllerPort {
    /// Serial read: bit 0 carries the current button
    fn read(&mut self) -> u8;

    /// Strobe write: bit 0 = 1 resets and holds the button index
    fn write(&mut self, data: u8);

    /// Host-side button update
    fn set_button(&mut self, button: Button, pressed: bool);

    /// Host key press or release by binding name
    ///
    /// Devices without a binding table ignore key events.
    fn key_event(&mut self, _key: &str, _pressed: bool) -> Option<Button> {
        None
    }

    /// Rebuild the device's key bindings from `config`
    fn reload_bindings(&mut self, _config: &InputConfig) {}
}

/// Standard NES controller
#[derive(Debug, Clone, Default)]
pub struct StandardController {
    buttons: [bool; 8],
    index: usize,
    strobe: bool,
}

impl StandardController {
    /// Create a new controller instance with all buttons released
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.buttons[button.index()]
    }
}

impl ControllerPort for StandardController {
    fn read(&mut self) -> u8 {
        let value = match self.buttons.get(self.index) {
            Some(&pressed) => pressed as u8,
            None => 1,
        };
        if !self.strobe && self.index < 8 {
            self.index += 1;
        }
        value
    }

    fn write(&mut self, data: u8) {
        self.strobe = data & 0x01 != 0;
        if self.strobe {
            self.index = 0;
        }
    }

    fn set_button(&mut self, button: Button, pressed: bool) {
        self.buttons[button.index()] = pressed;
    }
}

/// Which binding table drives a `BoundController`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Keyboard,
    Gamepad,
}

/// Standard controller driven by host key names through a binding table
#[derive(Debug, Clone)]
pub struct BoundController {
    source: InputSource,
    bindings: HashMap<String, Button>,
    controller: StandardController,
}

impl BoundController {
    pub fn new(source: InputSource, config: &InputConfig) -> Self {
        let mut bound = Self {
            source,
            bindings: HashMap::new(),
            controller: StandardController::new(),
        };
        bound.reload_bindings(config);
        bound
    }

    pub fn source(&self) -> InputSource {
        self.source
    }

    /// Rebuild the key -> button table from `config`
    ///
    /// Buttons held under the old table are released.
    pub fn reload_bindings(&mut self, config: &InputConfig) {
        let mapping = match self.source {
            InputSource::Keyboard => &config.keyboard,
            InputSource::Gamepad => &config.gamepad,
        };
        self.bindings = mapping
            .entries()
            .iter()
            .map(|(button, key)| (key.to_string(), *button))
            .collect();
        for button in Button::ALL {
            self.controller.set_button(button, false);
        }
    }

    /// Host key pressed; returns the mapped button, if any
    pub fn key_down(&mut self, key: &str) -> Option<Button> {
        let button = self.bindings.get(key).copied()?;
        self.controller.set_button(button, true);
        Some(button)
    }

    /// Host key released; returns the mapped button, if any
    pub fn key_up(&mut self, key: &str) -> Option<Button> {
        let button = self.bindings.get(key).copied()?;
        self.controller.set_button(button, false);
        Some(button)
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.controller.is_pressed(button)
    }
}

impl ControllerPort for BoundController {
    fn read(&mut self) -> u8 {
        self.controller.read()
    }

    fn write(&mut self, data: u8) {
        self.controller.write(data);
    }

    fn set_button(&mut self, button: Button, pressed: bool) {
        self.controller.set_button(button, pressed);
    }

    fn key_event(&mut self, key: &str, pressed: bool) -> Option<Button> {
        if pressed {
            self.key_down(key)
        } else {
            self.key_up(key)
        }
    }

    fn reload_bindings(&mut self, config: &InputConfig) {
        BoundController::reload_bindings(self, config);
    }
}
