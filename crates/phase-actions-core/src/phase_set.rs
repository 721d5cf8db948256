//! Phase sets
//!
//! A phase set is a base descriptor plus one descriptor per configured phase
//! name. With the default names, `FETCH` yields `FETCH`, `FETCH_START`,
//! `FETCH_SUCCESS` and `FETCH_ERROR`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::ops::Index;
use tracing::{debug, info, warn};

use crate::descriptor::Descriptor;
use crate::message::Message;
use crate::options::ActionOptions;

/// Position of a phase within the phase name triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseSlot {
    /// The work has begun
    Start,
    /// The work finished
    Success,
    /// The work failed
    Error,
}

impl PhaseSlot {
    /// All slots in order
    pub const ALL: [PhaseSlot; 3] = [PhaseSlot::Start, PhaseSlot::Success, PhaseSlot::Error];
}

impl fmt::Display for PhaseSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseSlot::Start => write!(f, "start"),
            PhaseSlot::Success => write!(f, "success"),
            PhaseSlot::Error => write!(f, "error"),
        }
    }
}

/// The ordered triple of phase names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseNames {
    /// Name of the start phase
    pub start: String,
    /// Name of the success phase
    pub success: String,
    /// Name of the error phase
    pub error: String,
}

impl Default for PhaseNames {
    fn default() -> Self {
        Self::new("start", "success", "error")
    }
}

impl PhaseNames {
    /// Create a phase name triple
    pub fn new(
        start: impl Into<String>,
        success: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            start: start.into(),
            success: success.into(),
            error: error.into(),
        }
    }

    /// Name configured for a slot
    pub fn get(&self, slot: PhaseSlot) -> &str {
        match slot {
            PhaseSlot::Start => &self.start,
            PhaseSlot::Success => &self.success,
            PhaseSlot::Error => &self.error,
        }
    }

    /// Names in slot order
    pub fn iter(&self) -> impl Iterator<Item = (PhaseSlot, &str)> {
        PhaseSlot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }

    /// Lower-cased names in slot order, as used for phase set keys
    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(_, name)| name.to_lowercase()).collect()
    }
}

/// A base descriptor with its phase descriptors
#[derive(Debug, Clone)]
pub struct PhaseSet {
    base: Descriptor,
    phases: IndexMap<String, Descriptor>,
    names: PhaseNames,
}

impl PhaseSet {
    /// The descriptor for the base name itself
    pub fn base(&self) -> &Descriptor {
        &self.base
    }

    /// Phase descriptor by lower-cased phase name
    pub fn phase(&self, key: &str) -> Option<&Descriptor> {
        self.phases.get(key)
    }

    /// Phase descriptor by slot, under the names this set was built with
    pub fn slot(&self, slot: PhaseSlot) -> Option<&Descriptor> {
        self.phases.get(&self.names.get(slot).to_lowercase())
    }

    /// Phase keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.phases.keys().map(String::as_str)
    }

    /// Phase keys and descriptors in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Descriptor)> {
        self.phases.iter().map(|(key, descriptor)| (key.as_str(), descriptor))
    }

    /// Number of distinct phase descriptors
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Whether the set has no phase descriptors
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// The phase names this set was built with
    pub fn phase_names(&self) -> &PhaseNames {
        &self.names
    }

    /// Invoke the base descriptor
    pub fn invoke(&self, args: &[Value]) -> anyhow::Result<Message> {
        self.base.invoke(args)
    }
}

impl fmt::Display for PhaseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.base, f)
    }
}

impl Index<&str> for PhaseSet {
    type Output = Descriptor;

    /// # Panics
    ///
    /// Panics if the set has no phase with this key.
    fn index(&self, key: &str) -> &Descriptor {
        match self.phases.get(key) {
            Some(descriptor) => descriptor,
            None => panic!("no phase '{}' on '{}'", key, self.base),
        }
    }
}

/// Builds phase sets under a phase name configuration
#[derive(Debug, Clone, Default)]
pub struct PhaseSetFactory {
    names: PhaseNames,
}

impl PhaseSetFactory {
    /// Create a factory with the default phase names
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a factory with custom phase names
    pub fn with_phase_names(names: PhaseNames) -> Self {
        Self { names }
    }

    /// The current phase names
    pub fn phase_names(&self) -> &PhaseNames {
        &self.names
    }

    /// Replace all three phase names for sets created from now on
    pub fn set_phase_names(&mut self, names: PhaseNames) {
        info!(
            start = %names.start,
            success = %names.success,
            error = %names.error,
            "Phase names changed"
        );
        self.names = names;
    }

    /// Create the phase set for a base name
    ///
    /// Phase descriptors are typed `<BASE>_<PHASE>` in upper case and keyed by
    /// the lower-cased phase name. Overrides are taken from `options` only when
    /// both the options and the phase's entry are plain; see
    /// [`ActionOptions::creators_for`]. If two phase names share a key the
    /// later one replaces the earlier.
    pub fn create(&self, base: &str, options: Option<&ActionOptions>) -> PhaseSet {
        let names = self.names.clone();

        if let Some(options) = options.filter(|options| !options.is_plain()) {
            debug!(base, ?options, "Ignoring non-plain phase options");
        }

        let mut phases = IndexMap::new();
        for (slot, phase) in names.iter() {
            let action_type = format!("{}_{}", base.to_uppercase(), phase.to_uppercase());
            let key = phase.to_lowercase();

            let (payload, meta) = match options.and_then(|options| options.creators_for(phase)) {
                Some(creators) => (
                    creators.payload_creator.clone(),
                    creators.meta_creator.clone(),
                ),
                None => (None, None),
            };

            let descriptor = Descriptor::builder(action_type)
                .with_creators(payload, meta)
                .build();

            if let Some(replaced) = phases.insert(key.clone(), descriptor) {
                warn!(
                    base,
                    key = %key,
                    %slot,
                    replaced = %replaced,
                    "Phase key collision, keeping the later phase"
                );
            }
        }

        debug!(base, keys = ?phases.keys().collect::<Vec<_>>(), "Created phase set");

        PhaseSet {
            base: Descriptor::new(base),
            phases,
            names,
        }
    }
}
