//! Widget placement model for the dashboard grid.
//!
//! # Responsibility
//! - Define the widget placement record and the closed component taxonomy.
//! - Provide construction helpers for seeded and custom widgets.
//!
//! # Invariants
//! - `size.width` and `size.height` are both >= 1 on validated records.
//! - `visible` starts as `true` on every freshly created widget.
//! - Unknown persisted component keys decode to `WidgetKind::Unknown`
//!   instead of failing the layout load.

use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable widget identifier.
///
/// Seeded widgets use fixed well-known ids (`"tasks"`, `"events"`, ...);
/// custom widgets get a minted UUID string.
pub type WidgetId = String;

/// Closed set of renderable widget components.
///
/// The embedding UI binds each kind to a concrete renderer through the
/// binding registry; this enum is the compile-time-checked contract between
/// the two sides. `Unknown` is the single fallback arm for component keys
/// written by a newer build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    Tasks,
    Events,
    Notes,
    Analytics,
    Clock,
    Bookmarks,
    Unknown,
}

impl WidgetKind {
    /// Returns the wire token for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Events => "events",
            Self::Notes => "notes",
            Self::Analytics => "analytics",
            Self::Clock => "clock",
            Self::Bookmarks => "bookmarks",
            Self::Unknown => "unknown",
        }
    }

    /// Parses a wire token; anything unrecognized lands on the fallback arm.
    pub fn from_token(token: &str) -> Self {
        match token {
            "tasks" => Self::Tasks,
            "events" => Self::Events,
            "notes" => Self::Notes,
            "analytics" => Self::Analytics,
            "clock" => Self::Clock,
            "bookmarks" => Self::Bookmarks,
            _ => Self::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for WidgetKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        Ok(Self::from_token(&token))
    }
}

impl Display for WidgetKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zero-based grid cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: u32,
    pub y: u32,
}

/// Cell span of a widget. Both axes are at least one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

/// Validation failures for widget write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetValidationError {
    /// Width or height is zero.
    ZeroSize,
}

impl Display for WidgetValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroSize => write!(f, "widget size must span at least one cell per axis"),
        }
    }
}

impl Error for WidgetValidationError {}

/// Canonical widget placement record.
///
/// The grid itself performs no collision handling; overlapping placements
/// are representable and left to the user to untangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    pub id: WidgetId,
    /// Display label shown by the embedding UI.
    pub title: String,
    /// Serialized as `component` to match the persisted schema naming.
    #[serde(rename = "component")]
    pub kind: WidgetKind,
    pub position: GridPosition,
    pub size: GridSize,
    /// Hidden widgets keep their record; toggling never deletes.
    pub visible: bool,
}

impl Widget {
    /// Creates a seeded widget with a fixed well-known id.
    pub fn seeded(
        id: impl Into<WidgetId>,
        title: impl Into<String>,
        kind: WidgetKind,
        position: GridPosition,
        size: GridSize,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            position,
            size,
            visible: true,
        }
    }

    /// Creates a user-added widget with a minted id at the default placement.
    pub fn custom(kind: WidgetKind, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            kind,
            position: GridPosition { x: 0, y: 0 },
            size: GridSize {
                width: 1,
                height: 1,
            },
            visible: true,
        }
    }

    /// Checks record-level preconditions for persistence.
    pub fn validate(&self) -> Result<(), WidgetValidationError> {
        if self.size.width == 0 || self.size.height == 0 {
            return Err(WidgetValidationError::ZeroSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{GridPosition, GridSize, Widget, WidgetKind, WidgetValidationError};

    #[test]
    fn custom_widget_uses_default_placement_and_is_visible() {
        let widget = Widget::custom(WidgetKind::Notes, "Scratchpad");
        assert_eq!(widget.position, GridPosition { x: 0, y: 0 });
        assert_eq!(
            widget.size,
            GridSize {
                width: 1,
                height: 1
            }
        );
        assert!(widget.visible);
        assert!(widget.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_span() {
        let mut widget = Widget::custom(WidgetKind::Clock, "Clock");
        widget.size.height = 0;
        assert_eq!(widget.validate(), Err(WidgetValidationError::ZeroSize));
    }

    #[test]
    fn unrecognized_component_key_decodes_to_unknown() {
        let kind: WidgetKind =
            serde_json::from_str("\"crypto-ticker\"").expect("fallback arm should absorb key");
        assert_eq!(kind, WidgetKind::Unknown);
    }

    #[test]
    fn component_key_round_trips_kebab_case() {
        let token = serde_json::to_string(&WidgetKind::Bookmarks).expect("kind serializes");
        assert_eq!(token, "\"bookmarks\"");
        let parsed: WidgetKind = serde_json::from_str(&token).expect("kind parses");
        assert_eq!(parsed, WidgetKind::Bookmarks);
    }
}
