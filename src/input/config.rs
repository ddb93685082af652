// Input configuration module
//
// Key bindings for the standard controller, stored as host-side key names
// (e.g. "KeyX", "ArrowUp", "DPadLeft"). The core never interprets the names;
// it only matches them against what the host reports.

use serde::{Deserialize, Serialize};

use super::Button;

/// Serializable button mapping (button -> host key name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingConfig {
    pub button_a: String,
    pub button_b: String,
    pub select: String,
    pub start: String,
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
}

impl MappingConfig {
    /// X/Z for A/B, A/S for Select/Start, arrows for the D-pad
    pub fn keyboard_default() -> Self {
        Self {
            button_a: "KeyX".to_string(),
            button_b: "KeyZ".to_string(),
            select: "KeyA".to_string(),
            start: "KeyS".to_string(),
            up: "ArrowUp".to_string(),
            down: "ArrowDown".to_string(),
            left: "ArrowLeft".to_string(),
            right: "ArrowRight".to_string(),
        }
    }

    /// Default gamepad mapping (standard gamepad layout names)
    pub fn gamepad_default() -> Self {
        Self {
            button_a: "East".to_string(),
            button_b: "South".to_string(),
            select: "Select".to_string(),
            start: "Start".to_string(),
            up: "DPadUp".to_string(),
            down: "DPadDown".to_string(),
            left: "DPadLeft".to_string(),
            right: "DPadRight".to_string(),
        }
    }

    /// All eight bindings in controller serial order
    pub fn entries(&self) -> [(Button, &str); 8] {
        [
            (Button::A, self.button_a.as_str()),
            (Button::B, self.button_b.as_str()),
            (Button::Select, self.select.as_str()),
            (Button::Start, self.start.as_str()),
            (Button::Up, self.up.as_str()),
            (Button::Down, self.down.as_str()),
            (Button::Left, self.left.as_str()),
            (Button::Right, self.right.as_str()),
        ]
    }
}

/// Bindings per input source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    pub keyboard: MappingConfig,
    pub gamepad: MappingConfig,
}

impl InputConfig {
    pub fn new() -> Self {
        Self {
            keyboard: MappingConfig::keyboard_default(),
            gamepad: MappingConfig::gamepad_default(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_config_defaults() {
        let config = MappingConfig::keyboard_default();
        assert_eq!(config.button_a, "KeyX");
        assert_eq!(config.button_b, "KeyZ");
        assert_eq!(config.select, "KeyA");
        assert_eq!(config.start, "KeyS");
        assert_eq!(config.up, "ArrowUp");
    }

    #[test]
    fn test_gamepad_config_defaults() {
        let config = MappingConfig::gamepad_default();
        assert_eq!(config.button_a, "East");
        assert_eq!(config.button_b, "South");
        assert_eq!(config.up, "DPadUp");
    }

    #[test]
    fn test_entries_follow_serial_order() {
        let config = MappingConfig::keyboard_default();
        let buttons: Vec<Button> = config.entries().iter().map(|(b, _)| *b).collect();
        assert_eq!(buttons, Button::ALL.to_vec());
    }

    #[test]
    fn test_config_serialization() {
        let config = InputConfig::new();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("[keyboard]"));
        assert!(toml_str.contains("[gamepad]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [keyboard]
            button_a = "KeyK"
            button_b = "KeyJ"
            select = "KeyU"
            start = "KeyY"
            up = "KeyW"
            down = "KeyS"
            left = "KeyA"
            right = "KeyD"

            [gamepad]
            button_a = "East"
            button_b = "South"
            select = "Select"
            start = "Start"
            up = "DPadUp"
            down = "DPadDown"
            left = "DPadLeft"
            right = "DPadRight"
        "#;

        let config: InputConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.keyboard.button_a, "KeyK");
        assert_eq!(config.gamepad.button_a, "East");
    }
}
