//! Phase Actions Core Library
//!
//! This crate builds action descriptors: values that carry an action type
//! identifier and turn call arguments into standard `{type, payload, meta,
//! error}` messages. On top of single descriptors it builds phase sets, a
//! base descriptor plus `start`, `success` and `error` descriptors derived
//! from the base name.
//!
//! ```rust
//! use phase_actions_core::prelude::*;
//!
//! # fn example() -> anyhow::Result<()> {
//! let fetch = PhaseSetFactory::new().create("fetch_user", None);
//!
//! assert_eq!(fetch.to_string(), "fetch_user");
//! assert_eq!(fetch["success"].to_string(), "FETCH_USER_SUCCESS");
//!
//! let message = fetch["start"].invoke(&[json!({"id": 7})])?;
//! assert_eq!(message.into_value(), json!({"type": "FETCH_USER_START", "payload": {"id": 7}}));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

pub mod descriptor;
pub mod error;
pub mod fsa;
pub mod message;
pub mod options;
pub mod phase_set;
pub mod shape;

pub use error::{Error, Result};

/// Convenience prelude for phase-actions-core users
pub mod prelude {
    pub use crate::descriptor::{Creator, Descriptor, DescriptorBuilder, creator, identity};
    pub use crate::error::{Error, Result};
    pub use crate::message::Message;
    pub use crate::options::{ActionOptions, PhaseCreators, PhaseOptions};
    pub use crate::phase_set::{PhaseNames, PhaseSet, PhaseSetFactory, PhaseSlot};

    // Re-export commonly used types from dependencies
    pub use serde_json::{Value, json};
}
