use crate::error::SnakeError;
use crate::geometry::Size;
use crate::palette::PaletteMode;
use ratatui::style::Color;
use std::str::FromStr;
use std::time::Duration;

pub const LOG_FILE: &str = "rainbow_snek.log";

pub const FLAT_COLOR: Color = Color::Rgb(0x00, 0xff, 0x00);

/// Everything a session needs to know up front.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Logical play field in pixels.
    pub field: Size,
    /// Logical ticks per second.
    pub tick_rate: u32,
    pub title: String,
    pub initial_length: u16,
    /// Cross-travel size of a segment. Also the length of a turn corner and
    /// the side of the food square.
    pub segment_thickness: u16,
    pub palette: PaletteMode,
    pub food_color: Color,
    pub max_food_attempts: u32,
    /// Treat running into your own body as game over.
    pub end_on_collision: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            field: Size {
                width: 320,
                height: 240,
            },
            tick_rate: 60,
            title: "Snake".to_string(),
            initial_length: 200,
            segment_thickness: 10,
            palette: PaletteMode::Rainbow,
            food_color: Color::Rgb(0xff, 0xff, 0xff),
            max_food_attempts: 10_000,
            end_on_collision: false,
        }
    }
}

impl Settings {
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }

    /// Defaults with `SNEK_*` environment overrides applied.
    pub fn from_env() -> Result<Self, SnakeError> {
        Settings::default().with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SnakeError> {
        if let Some(value) = lookup("SNEK_TICK_RATE") {
            self.tick_rate = parse("SNEK_TICK_RATE", &value)?;
        }
        if let Some(value) = lookup("SNEK_INITIAL_LENGTH") {
            self.initial_length = parse("SNEK_INITIAL_LENGTH", &value)?;
        }
        if let Some(value) = lookup("SNEK_THICKNESS") {
            self.segment_thickness = parse("SNEK_THICKNESS", &value)?;
        }
        if let Some(value) = lookup("SNEK_END_ON_COLLISION") {
            self.end_on_collision = parse("SNEK_END_ON_COLLISION", &value)?;
        }
        if let Some(value) = lookup("SNEK_PALETTE") {
            self.palette = match value.trim() {
                "rainbow" => PaletteMode::Rainbow,
                "flat" => PaletteMode::Flat(FLAT_COLOR),
                other => {
                    return Err(SnakeError::InvalidSettings(format!(
                        "SNEK_PALETTE must be rainbow or flat, got {:?}",
                        other
                    )))
                }
            };
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), SnakeError> {
        let invalid = |reason: String| Err(SnakeError::InvalidSettings(reason));

        if self.tick_rate == 0 {
            return invalid("tick rate must be positive".to_string());
        }
        if self.initial_length == 0 {
            return invalid("initial length must be positive".to_string());
        }
        if self.segment_thickness == 0 {
            return invalid("segment thickness must be positive".to_string());
        }
        if self.max_food_attempts == 0 {
            return invalid("max food attempts must be positive".to_string());
        }
        if self.initial_length > self.field.width {
            return invalid(format!(
                "initial length {} does not fit a field {} wide",
                self.initial_length, self.field.width
            ));
        }
        if self.segment_thickness > self.field.width || self.segment_thickness > self.field.height
        {
            return invalid(format!(
                "segment thickness {} does not fit a {}x{} field",
                self.segment_thickness, self.field.width, self.field.height
            ));
        }
        Ok(())
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, SnakeError> {
    value
        .trim()
        .parse()
        .map_err(|_| SnakeError::InvalidSettings(format!("{} has a bad value {:?}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.field, Size { width: 320, height: 240 });
        assert_eq!(settings.segment_thickness, 10);
    }

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let settings = Settings::default().with_overrides(|_| None).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::default()
            .with_overrides(lookup(&[
                ("SNEK_TICK_RATE", "120"),
                ("SNEK_INITIAL_LENGTH", " 20 "),
                ("SNEK_THICKNESS", "8"),
                ("SNEK_END_ON_COLLISION", "true"),
                ("SNEK_PALETTE", "flat"),
            ]))
            .unwrap();

        assert_eq!(settings.tick_rate, 120);
        assert_eq!(settings.initial_length, 20);
        assert_eq!(settings.segment_thickness, 8);
        assert!(settings.end_on_collision);
        assert_eq!(settings.palette, PaletteMode::Flat(FLAT_COLOR));
    }

    #[test]
    fn test_bad_overrides() {
        for pairs in [
            &[("SNEK_TICK_RATE", "fast")][..],
            &[("SNEK_PALETTE", "plaid")][..],
            &[("SNEK_END_ON_COLLISION", "maybe")][..],
            &[("SNEK_INITIAL_LENGTH", "400")][..],
        ] {
            assert!(matches!(
                Settings::default().with_overrides(lookup(pairs)),
                Err(SnakeError::InvalidSettings(_))
            ));
        }
    }

    #[test]
    fn test_tick_period() {
        let settings = Settings {
            tick_rate: 100,
            ..Settings::default()
        };
        assert_eq!(settings.tick_period(), Duration::from_millis(10));
    }

    #[test]
    fn test_rejects_oversized_snake() {
        let settings = Settings {
            field: Size {
                width: 20,
                height: 20,
            },
            initial_length: 21,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SnakeError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_thickness() {
        let settings = Settings {
            field: Size {
                width: 40,
                height: 8,
            },
            initial_length: 5,
            segment_thickness: 10,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_values() {
        for settings in [
            Settings {
                tick_rate: 0,
                ..Settings::default()
            },
            Settings {
                initial_length: 0,
                ..Settings::default()
            },
            Settings {
                segment_thickness: 0,
                ..Settings::default()
            },
            Settings {
                max_food_attempts: 0,
                ..Settings::default()
            },
        ] {
            assert!(settings.validate().is_err(), "{:?} should be rejected", settings);
        }
    }
}
