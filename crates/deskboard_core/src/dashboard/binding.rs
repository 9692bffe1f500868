//! Widget binding registry.
//!
//! # Responsibility
//! - Map each widget kind to the renderer binding supplied by the
//!   embedding UI.
//! - Guarantee total resolution through one explicit fallback binding.
//!
//! # Invariants
//! - `resolve` never fails; unregistered and `Unknown` kinds return the
//!   fallback.
//! - Each kind is bound at most once.

use crate::model::widget::WidgetKind;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Renderer handle owned by the embedding UI.
///
/// Core never renders; this trait is the seam through which the dashboard
/// composition layer announces what it can draw.
pub trait WidgetBinding {
    /// The widget kind this binding renders.
    fn kind(&self) -> WidgetKind;
    /// Human-readable name of the renderable implementation.
    fn display_name(&self) -> &str;
}

/// Binding registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingRegistryError {
    /// A binding for this kind is already registered.
    DuplicateKind(WidgetKind),
    /// `Unknown` is reserved for the fallback and cannot be bound.
    ReservedFallbackKind,
}

impl Display for BindingRegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKind(kind) => write!(f, "widget kind already bound: {kind}"),
            Self::ReservedFallbackKind => {
                write!(f, "the unknown kind is reserved for the fallback binding")
            }
        }
    }
}

impl Error for BindingRegistryError {}

/// Runtime registry resolving widget kinds to renderer bindings.
pub struct BindingRegistry {
    bindings: BTreeMap<WidgetKind, Arc<dyn WidgetBinding>>,
    fallback: Arc<dyn WidgetBinding>,
}

impl BindingRegistry {
    /// Creates a registry with the mandatory fallback binding.
    pub fn new(fallback: Arc<dyn WidgetBinding>) -> Self {
        Self {
            bindings: BTreeMap::new(),
            fallback,
        }
    }

    /// Registers one binding under the kind it reports.
    pub fn register(&mut self, binding: Arc<dyn WidgetBinding>) -> Result<(), BindingRegistryError> {
        let kind = binding.kind();
        if kind == WidgetKind::Unknown {
            return Err(BindingRegistryError::ReservedFallbackKind);
        }
        if self.bindings.contains_key(&kind) {
            return Err(BindingRegistryError::DuplicateKind(kind));
        }

        self.bindings.insert(kind, binding);
        Ok(())
    }

    /// Resolves one kind to its binding, or the fallback.
    pub fn resolve(&self, kind: WidgetKind) -> Arc<dyn WidgetBinding> {
        self.bindings
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.fallback))
    }

    /// Returns sorted bound kinds, fallback excluded.
    pub fn bound_kinds(&self) -> Vec<WidgetKind> {
        self.bindings.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
