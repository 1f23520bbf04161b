//! Control input plumbing: mouse drags and slider/checkbox values as the
//! page forwards them.

/// Tracks a mouse drag and reports motion only while the button is held
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseDrag {
    dragging: bool,
    last_x: f32,
    last_y: f32,
}

impl MouseDrag {
    pub fn press(&mut self, x: f32, y: f32) {
        self.dragging = true;
        self.last_x = x;
        self.last_y = y;
    }

    /// Motion since the previous event, `None` when no button is down
    pub fn motion(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        if !self.dragging {
            return None;
        }
        let delta = (x - self.last_x, y - self.last_y);
        self.last_x = x;
        self.last_y = y;
        Some(delta)
    }

    pub fn release(&mut self) {
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

/// Value of a checkbox or range slider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlValue {
    Bool(bool),
    Number(f32),
}

impl ControlValue {
    /// Parse the string form an `<input>` reports
    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        match raw.to_ascii_lowercase().as_str() {
            "true" | "on" | "checked" => Ok(ControlValue::Bool(true)),
            "false" | "off" | "" => Ok(ControlValue::Bool(false)),
            _ => raw
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .map(ControlValue::Number)
                .ok_or_else(|| format!("Invalid control value '{}'", raw)),
        }
    }

    pub fn as_f32(&self) -> f32 {
        match *self {
            ControlValue::Number(v) => v,
            ControlValue::Bool(b) => if b { 1.0 } else { 0.0 },
        }
    }

    pub fn as_bool(&self) -> bool {
        match *self {
            ControlValue::Bool(b) => b,
            ControlValue::Number(v) => v != 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_only_while_pressed() {
        let mut drag = MouseDrag::default();
        assert_eq!(drag.motion(5.0, 5.0), None);

        drag.press(10.0, 20.0);
        assert!(drag.is_dragging());
        assert_eq!(drag.motion(15.0, 18.0), Some((5.0, -2.0)));
        assert_eq!(drag.motion(15.0, 28.0), Some((0.0, 10.0)));

        drag.release();
        assert_eq!(drag.motion(100.0, 100.0), None);
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(ControlValue::parse("true"), Ok(ControlValue::Bool(true)));
        assert_eq!(ControlValue::parse(" On "), Ok(ControlValue::Bool(true)));
        assert_eq!(ControlValue::parse("false"), Ok(ControlValue::Bool(false)));
        assert_eq!(ControlValue::parse("45"), Ok(ControlValue::Number(45.0)));
        assert_eq!(ControlValue::parse("-0.25"), Ok(ControlValue::Number(-0.25)));
        assert!(ControlValue::parse("forty").is_err());
        assert!(ControlValue::parse("NaN").is_err());
    }

    #[test]
    fn test_conversions() {
        assert_eq!(ControlValue::Bool(true).as_f32(), 1.0);
        assert!(ControlValue::Number(2.0).as_bool());
        assert!(!ControlValue::Number(0.0).as_bool());
    }
}
