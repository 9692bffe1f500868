//! Widget layout registry.
//!
//! # Responsibility
//! - Own the canonical dashboard layout and serve read access.
//! - Seed the fixed default layout on first use.
//! - Persist the full layout after every successful mutation.
//!
//! # Invariants
//! - `load` never fails: an absent or unreadable payload yields the seeded
//!   default layout, persisted immediately.
//! - Visibility toggling flips one flag and touches nothing else.
//! - Widgets are never deleted; hiding keeps the record.

use crate::model::widget::{
    GridPosition, GridSize, Widget, WidgetId, WidgetKind, WidgetValidationError,
};
use crate::store::snapshot::{self, SnapshotError};
use crate::store::{KvStore, StoreError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store key holding the widget layout.
pub const WIDGETS_KEY: &str = "dashboard.widgets";

pub type LayoutResult<T> = Result<T, LayoutError>;

/// Errors surfaced by layout mutations.
#[derive(Debug)]
pub enum LayoutError {
    /// Widget record failed a precondition; nothing was mutated.
    Validation(WidgetValidationError),
    /// Layout could not be serialized for persistence.
    Snapshot(SnapshotError),
    /// Persistence write failed; the in-memory change was rolled back.
    Store(StoreError),
}

impl Display for LayoutError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Snapshot(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LayoutError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Snapshot(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<WidgetValidationError> for LayoutError {
    fn from(value: WidgetValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<SnapshotError> for LayoutError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

impl From<StoreError> for LayoutError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Returns the fixed default layout seeded on first use.
///
/// Deterministic: same ids, titles, placements and spans on every call,
/// all widgets visible.
pub fn default_layout() -> Vec<Widget> {
    vec![
        Widget::seeded(
            "tasks",
            "Tasks",
            WidgetKind::Tasks,
            GridPosition { x: 0, y: 0 },
            GridSize {
                width: 2,
                height: 2,
            },
        ),
        Widget::seeded(
            "events",
            "Upcoming Events",
            WidgetKind::Events,
            GridPosition { x: 2, y: 0 },
            GridSize {
                width: 2,
                height: 1,
            },
        ),
        Widget::seeded(
            "notes",
            "Notes",
            WidgetKind::Notes,
            GridPosition { x: 2, y: 1 },
            GridSize {
                width: 1,
                height: 1,
            },
        ),
        Widget::seeded(
            "analytics",
            "Site Analytics",
            WidgetKind::Analytics,
            GridPosition { x: 3, y: 1 },
            GridSize {
                width: 1,
                height: 1,
            },
        ),
        Widget::seeded(
            "clock",
            "Clock",
            WidgetKind::Clock,
            GridPosition { x: 0, y: 2 },
            GridSize {
                width: 1,
                height: 1,
            },
        ),
        Widget::seeded(
            "bookmarks",
            "Bookmarks",
            WidgetKind::Bookmarks,
            GridPosition { x: 1, y: 2 },
            GridSize {
                width: 3,
                height: 1,
            },
        ),
    ]
}

/// The canonical widget layout bound to an injected store.
pub struct WidgetLayoutRegistry<'s, S: KvStore> {
    store: &'s S,
    widgets: Vec<Widget>,
}

impl<'s, S: KvStore> WidgetLayoutRegistry<'s, S> {
    /// Loads the layout from the store, seeding the default on first use.
    ///
    /// An unreadable payload is logged and replaced by the default seed;
    /// the seed is persisted immediately so the next load reads it back.
    pub fn load(store: &'s S) -> Self {
        let (widgets, seeded) = match store.get(WIDGETS_KEY) {
            Ok(Some(payload)) => match snapshot::decode::<Widget>(&payload) {
                Ok(widgets) => (widgets, false),
                Err(err) => {
                    warn!(
                        "event=layout_load module=dashboard status=recovered error_code=bad_payload error={err}"
                    );
                    (default_layout(), true)
                }
            },
            Ok(None) => (default_layout(), true),
            Err(err) => {
                warn!(
                    "event=layout_load module=dashboard status=recovered error_code=store_read_failed error={err}"
                );
                (default_layout(), true)
            }
        };

        let registry = Self { store, widgets };
        if seeded {
            if let Err(err) = registry.save() {
                error!(
                    "event=layout_seed module=dashboard status=error error_code=seed_persist_failed error={err}"
                );
            } else {
                info!(
                    "event=layout_seed module=dashboard status=ok count={}",
                    registry.widgets.len()
                );
            }
        }

        info!(
            "event=layout_load module=dashboard status=ok count={}",
            registry.widgets.len()
        );
        registry
    }

    /// Flips the `visible` flag of one widget.
    ///
    /// Unknown ids are a silent no-op and perform no store write.
    pub fn toggle_visibility(&mut self, id: &str) -> LayoutResult<()> {
        let Some(index) = self.widgets.iter().position(|widget| widget.id == id) else {
            return Ok(());
        };

        self.widgets[index].visible = !self.widgets[index].visible;
        if let Err(err) = self.save() {
            self.widgets[index].visible = !self.widgets[index].visible;
            return Err(err);
        }

        info!(
            "event=widget_toggle module=dashboard status=ok widget_id={} visible={}",
            id, self.widgets[index].visible
        );
        Ok(())
    }

    /// Appends a user-added widget at the default placement.
    ///
    /// The new widget gets a minted id, position `{0,0}`, a `1x1` span and
    /// starts visible. The placement may overlap existing widgets; the
    /// grid accepts that.
    pub fn add_custom_widget(
        &mut self,
        kind: WidgetKind,
        title: impl Into<String>,
    ) -> LayoutResult<WidgetId> {
        let widget = Widget::custom(kind, title);
        widget.validate()?;

        let id = widget.id.clone();
        self.widgets.push(widget);
        if let Err(err) = self.save() {
            self.widgets.pop();
            return Err(err);
        }

        info!("event=widget_add module=dashboard status=ok widget_id={id} kind={kind}");
        Ok(id)
    }

    /// Returns the cell span of one widget for the external rendering grid.
    pub fn resolve_size(&self, id: &str) -> Option<GridSize> {
        self.widgets
            .iter()
            .find(|widget| widget.id == id)
            .map(|widget| widget.size)
    }

    /// Returns the canonical layout, hidden widgets included.
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Returns the widgets the external UI should render.
    pub fn visible_widgets(&self) -> Vec<&Widget> {
        self.widgets.iter().filter(|widget| widget.visible).collect()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    fn save(&self) -> LayoutResult<()> {
        let payload = snapshot::encode(&self.widgets)?;
        self.store.set(WIDGETS_KEY, &payload)?;
        Ok(())
    }
}
