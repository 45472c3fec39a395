use plan::{CanvasPoint, CanvasRect, CanvasSize, MIN_ROOM_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fixed parameters of an editing session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Drawing surface size in pixels.
    pub canvas_size: CanvasSize,
    /// Spacing of the background grid.
    pub grid_spacing: u32,
    /// Drags must exceed this in both dimensions to become a room.
    pub min_room_size: u32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            canvas_size: CanvasSize::new(800, 600),
            grid_spacing: 20,
            min_room_size: MIN_ROOM_SIZE,
        }
    }
}

impl EditorSettings {
    /// Read settings from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, crate::EditorError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| crate::EditorError::Settings(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, crate::EditorError> {
        let settings: Self =
            serde_json::from_str(text).map_err(|e| crate::EditorError::Settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Canvas sides must be non-zero and addressable as `i32`, the grid
    /// spacing non-zero, and a room of `min_room_size + 1` must fit.
    pub fn validate(&self) -> Result<(), crate::EditorError> {
        let invalid = |message: String| -> Result<(), crate::EditorError> {
            Err(crate::EditorError::Settings(message))
        };
        let (width, height) = (self.canvas_size.width(), self.canvas_size.height());

        if width == 0 || height == 0 {
            return invalid(format!("canvas_size {}x{} has a zero side", width, height));
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return invalid(format!("canvas_size {}x{} is too large", width, height));
        }
        if self.grid_spacing == 0 {
            return invalid("grid_spacing must be greater than zero".into());
        }
        if self.min_room_size >= width.min(height) {
            return invalid(format!(
                "min_room_size {} does not fit a {}x{} canvas",
                self.min_room_size, width, height
            ));
        }
        Ok(())
    }

    fn max_point(&self) -> CanvasPoint {
        CanvasPoint::new(
            i32::try_from(self.canvas_size.width()).unwrap_or(i32::MAX),
            i32::try_from(self.canvas_size.height()).unwrap_or(i32::MAX),
        )
    }

    /// Pull a pointer position back onto the drawing surface.
    pub fn clamp(&self, point: CanvasPoint) -> CanvasPoint {
        let max = self.max_point();
        CanvasPoint::new(point.x().clamp(0, max.x()), point.y().clamp(0, max.y()))
    }

    /// Whether `rect` lies entirely on the drawing surface.
    pub fn contains_rect(&self, rect: CanvasRect) -> bool {
        let right = i64::from(rect.x()) + i64::from(rect.width());
        let bottom = i64::from(rect.y()) + i64::from(rect.height());
        rect.x() >= 0
            && rect.y() >= 0
            && right <= i64::from(self.canvas_size.width())
            && bottom <= i64::from(self.canvas_size.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_canvas() {
        let settings = EditorSettings::default();
        assert_eq!(settings.canvas_size, CanvasSize::new(800, 600));
        assert_eq!(settings.grid_spacing, 20);
        assert_eq!(settings.min_room_size, 20);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = EditorSettings::from_json(r#"{"grid_spacing": 40}"#).unwrap();
        assert_eq!(settings.grid_spacing, 40);
        assert_eq!(settings.canvas_size, CanvasSize::new(800, 600));
    }

    #[test]
    fn malformed_json_is_a_settings_error() {
        let err = EditorSettings::from_json("{grid").unwrap_err();
        assert!(matches!(err, crate::EditorError::Settings(_)));
    }

    #[test]
    fn oversized_canvas_is_a_settings_error() {
        let err = EditorSettings::from_json(r#"{"canvas_size": [3000000000, 600]}"#).unwrap_err();
        assert!(matches!(err, crate::EditorError::Settings(_)));
    }

    #[test]
    fn degenerate_settings_are_rejected() {
        for json in [
            r#"{"canvas_size": [0, 600]}"#,
            r#"{"grid_spacing": 0}"#,
            r#"{"canvas_size": [100, 20], "min_room_size": 20}"#,
        ] {
            assert!(EditorSettings::from_json(json).is_err(), "{}", json);
        }
    }

    #[test]
    fn clamp_never_panics_on_unvalidated_settings() {
        let settings = EditorSettings {
            canvas_size: CanvasSize::new(3_000_000_000, 600),
            ..EditorSettings::default()
        };
        assert_eq!(settings.clamp(CanvasPoint::new(-10, 900)), CanvasPoint::new(0, 600));
        assert_eq!(settings.clamp(CanvasPoint::new(i32::MAX, 0)), CanvasPoint::new(i32::MAX, 0));
    }

    #[test]
    fn contains_rect_checks_every_edge() {
        let settings = EditorSettings::default();
        let rect = |x, y, w, h| CanvasRect::new(CanvasPoint::new(x, y), CanvasSize::new(w, h));
        assert!(settings.contains_rect(rect(0, 0, 800, 600)));
        assert!(!settings.contains_rect(rect(-50, 0, 30, 30)));
        assert!(!settings.contains_rect(rect(790, 0, 30, 30)));
        assert!(!settings.contains_rect(rect(0, 590, 30, 30)));
    }

    #[test]
    fn clamp_keeps_points_on_canvas() {
        let settings = EditorSettings::default();
        assert_eq!(settings.clamp(CanvasPoint::new(-10, 700)), CanvasPoint::new(0, 600));
        assert_eq!(settings.clamp(CanvasPoint::new(400, 300)), CanvasPoint::new(400, 300));
    }
}
