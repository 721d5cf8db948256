//! Per-phase creator overrides
//!
//! Options are tagged: only [`ActionOptions::Plain`] maps are consulted, and
//! within them only [`PhaseOptions::Plain`] entries. Opaque carriers are
//! accepted so that arbitrary option objects can be passed through, but they
//! contribute nothing, even if they happen to hold something that looks like
//! an override.

use indexmap::IndexMap;
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::descriptor::{Creator, creator};
use crate::shape::{is_plain_object, is_undefined};

/// Creator overrides for a single phase
#[derive(Clone, Default)]
pub struct PhaseCreators {
    /// Payload creator, identity of the first argument when unset
    pub payload_creator: Option<Creator>,
    /// Meta creator, no meta when unset
    pub meta_creator: Option<Creator>,
}

impl PhaseCreators {
    /// Create an empty override set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the payload creator
    pub fn with_payload_creator<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Value]) -> anyhow::Result<Option<Value>> + Send + Sync + 'static,
    {
        self.payload_creator = Some(creator(f));
        self
    }

    /// Set the meta creator
    pub fn with_meta_creator<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Value]) -> anyhow::Result<Option<Value>> + Send + Sync + 'static,
    {
        self.meta_creator = Some(creator(f));
        self
    }
}

impl fmt::Debug for PhaseCreators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseCreators")
            .field("payload_creator", &self.payload_creator.is_some())
            .field("meta_creator", &self.meta_creator.is_some())
            .finish()
    }
}

/// Options entry for one phase
#[derive(Debug, Clone)]
pub enum PhaseOptions {
    /// Record-like overrides, honored
    Plain(PhaseCreators),
    /// Anything else, ignored
    Opaque,
}

impl From<PhaseCreators> for PhaseOptions {
    fn from(creators: PhaseCreators) -> Self {
        Self::Plain(creators)
    }
}

/// Options passed to the phase-set factory
#[derive(Clone)]
pub enum ActionOptions {
    /// Phase name to options entry, looked up by the configured phase name
    Plain(IndexMap<String, PhaseOptions>),
    /// An arbitrary carrier; never consulted
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl Default for ActionOptions {
    fn default() -> Self {
        Self::Plain(IndexMap::new())
    }
}

impl fmt::Debug for ActionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(phases) => f.debug_tuple("Plain").field(phases).finish(),
            Self::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

impl ActionOptions {
    /// Create an empty plain options map
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an arbitrary value; the factory will ignore it
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Self::Opaque(Arc::new(value))
    }

    /// Add overrides for a phase
    ///
    /// Turns an opaque carrier into a plain map holding only this phase.
    pub fn phase(mut self, name: impl Into<String>, options: impl Into<PhaseOptions>) -> Self {
        if let Self::Opaque(_) = self {
            self = Self::Plain(IndexMap::new());
        }
        if let Self::Plain(phases) = &mut self {
            phases.insert(name.into(), options.into());
        }
        self
    }

    /// Whether these options can contribute overrides at all
    pub fn is_plain(&self) -> bool {
        matches!(self, Self::Plain(_))
    }

    /// Overrides for a phase, if the options and the phase entry are both plain
    pub fn creators_for(&self, phase: &str) -> Option<&PhaseCreators> {
        match self {
            Self::Plain(phases) => match phases.get(phase)? {
                PhaseOptions::Plain(creators) => Some(creators),
                PhaseOptions::Opaque => None,
            },
            Self::Opaque(_) => None,
        }
    }

    /// Build options from a declarative JSON description
    ///
    /// ```json
    /// { "error": { "meta": { "retryable": true }, "payload": "fallback" } }
    /// ```
    ///
    /// `meta` becomes a constant meta creator. `payload` becomes a default
    /// used only when the descriptor is invoked without arguments. A value
    /// that is not an object is opaque, as is any phase entry that is not.
    pub fn from_json(value: &Value) -> Self {
        let Value::Object(entries) = value else {
            return Self::opaque(value.clone());
        };

        let phases = entries
            .iter()
            .map(|(phase, entry)| {
                let options = if is_plain_object(entry) {
                    PhaseOptions::Plain(declared_creators(entry))
                } else {
                    PhaseOptions::Opaque
                };
                (phase.clone(), options)
            })
            .collect();

        Self::Plain(phases)
    }
}

fn declared_creators(entry: &Value) -> PhaseCreators {
    let mut creators = PhaseCreators::new();

    if !is_undefined(entry.get("payload")) {
        let fallback = entry["payload"].clone();
        creators.payload_creator = Some(creator(move |args| {
            Ok(Some(args.first().cloned().unwrap_or_else(|| fallback.clone())))
        }));
    }

    if !is_undefined(entry.get("meta")) {
        let meta = entry["meta"].clone();
        creators.meta_creator = Some(creator(move |_| Ok(Some(meta.clone()))));
    }

    creators
}
