//! Action descriptors
//!
//! A descriptor owns an action type identifier and knows how to turn call
//! arguments into a [`Message`]. Descriptors display as their identifier, so
//! they can be used wherever a plain type string is expected, for example as
//! a key when building a lookup table.

use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

use crate::Result;
use crate::message::Message;

/// Payload or meta creator signature
///
/// Creators receive every call argument. Returning `Ok(None)` leaves the
/// corresponding field off the message; an `Err` is handed back to the caller
/// of [`Descriptor::invoke`] as-is.
pub type Creator = Arc<dyn Fn(&[Value]) -> anyhow::Result<Option<Value>> + Send + Sync + 'static>;

/// Wrap a closure as a [`Creator`]
pub fn creator<F>(f: F) -> Creator
where
    F: Fn(&[Value]) -> anyhow::Result<Option<Value>> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// The default payload creator: the first call argument, verbatim
pub fn identity() -> Creator {
    creator(|args| Ok(args.first().cloned()))
}

/// A callable action message constructor
#[derive(Clone)]
pub struct Descriptor {
    action_type: Arc<str>,
    payload_creator: Option<Creator>,
    meta_creator: Option<Creator>,
}

impl Descriptor {
    /// Create a descriptor with default creators
    pub fn new(action_type: impl Into<String>) -> Self {
        Self::builder(action_type).build()
    }

    /// Start building a descriptor with custom creators
    pub fn builder(action_type: impl Into<String>) -> DescriptorBuilder {
        DescriptorBuilder {
            action_type: action_type.into(),
            payload_creator: None,
            meta_creator: None,
        }
    }

    /// The action type identifier
    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    /// Whether a meta creator was supplied
    pub fn has_meta(&self) -> bool {
        self.meta_creator.is_some()
    }

    /// Build a message from the call arguments
    pub fn invoke(&self, args: &[Value]) -> anyhow::Result<Message> {
        let payload = match &self.payload_creator {
            Some(create) => create(args)?,
            None => args.first().cloned(),
        };

        let mut message = Message::new(self.action_type());
        message.payload = payload;
        if let Some(create) = &self.meta_creator {
            message.meta = create(args)?;
        }

        Ok(message)
    }

    /// Build a message from a single typed payload
    pub fn emit<T: Serialize + ?Sized>(&self, payload: &T) -> Result<Message> {
        let value = serde_json::to_value(payload)?;
        Ok(self.invoke(&[value])?)
    }

    /// Build an error message from a failure value
    ///
    /// The payload creator is skipped; the payload is the error's
    /// `{name, message}` record and the message is flagged with `error: true`.
    /// A meta creator still runs, with the record as its only argument.
    pub fn reject<E: fmt::Display + ?Sized>(&self, err: &E) -> anyhow::Result<Message> {
        let record = json!({
            "name": short_type_name::<E>(),
            "message": err.to_string(),
        });

        let mut message = Message::new(self.action_type()).with_error();
        if let Some(create) = &self.meta_creator {
            message.meta = create(std::slice::from_ref(&record))?;
        }
        message.payload = Some(record);

        Ok(message)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.action_type)
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("action_type", &self.action_type)
            .field("payload_creator", &self.payload_creator.is_some())
            .field("meta_creator", &self.meta_creator.is_some())
            .finish()
    }
}

impl AsRef<str> for Descriptor {
    fn as_ref(&self) -> &str {
        &self.action_type
    }
}

impl PartialEq<str> for Descriptor {
    fn eq(&self, other: &str) -> bool {
        &*self.action_type == other
    }
}

impl PartialEq<&str> for Descriptor {
    fn eq(&self, other: &&str) -> bool {
        &*self.action_type == *other
    }
}

impl From<&Descriptor> for String {
    fn from(descriptor: &Descriptor) -> Self {
        descriptor.action_type.to_string()
    }
}

/// Builder for [`Descriptor`]
pub struct DescriptorBuilder {
    action_type: String,
    payload_creator: Option<Creator>,
    meta_creator: Option<Creator>,
}

impl DescriptorBuilder {
    /// Set the payload creator
    pub fn payload_creator<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Value]) -> anyhow::Result<Option<Value>> + Send + Sync + 'static,
    {
        self.payload_creator = Some(creator(f));
        self
    }

    /// Set the meta creator
    pub fn meta_creator<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Value]) -> anyhow::Result<Option<Value>> + Send + Sync + 'static,
    {
        self.meta_creator = Some(creator(f));
        self
    }

    /// Set or clear both creators from shared handles
    pub fn with_creators(mut self, payload: Option<Creator>, meta: Option<Creator>) -> Self {
        self.payload_creator = payload;
        self.meta_creator = meta;
        self
    }

    /// Finish the descriptor
    pub fn build(self) -> Descriptor {
        trace!(
            action_type = %self.action_type,
            payload_creator = self.payload_creator.is_some(),
            meta_creator = self.meta_creator.is_some(),
            "Created descriptor"
        );

        Descriptor {
            action_type: self.action_type.into(),
            payload_creator: self.payload_creator,
            meta_creator: self.meta_creator,
        }
    }
}

fn short_type_name<E: ?Sized>() -> &'static str {
    let full = std::any::type_name::<E>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}
