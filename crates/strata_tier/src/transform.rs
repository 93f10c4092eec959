// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Encode/decode pipeline for stores that persist raw bytes.
//!
//! Stores such as the filesystem and remote-object stores hold raw payloads.
//! A [`Transform`] converts between the caller's value type and those payloads:
//! `encode` runs on the way into the backing resource and `decode` on the way
//! out. Either stage may be left unset, in which case the value passes through
//! unchanged. Pass-through is only possible for the raw value types [`Bytes`],
//! `Vec<u8>` and `String`; for any other value type both stages must be set,
//! which [`Transform::validate`] checks when the store is built.

use std::{
    any::{Any, TypeId},
    fmt,
    sync::Arc,
};

use bytes::Bytes;

use crate::{Error, Result};

/// Function applied to a value before it is written.
pub type EncodeFn<V> = Arc<dyn Fn(V) -> Result<Bytes> + Send + Sync>;

/// Function applied to a raw payload after it is read.
pub type DecodeFn<V> = Arc<dyn Fn(Bytes) -> Result<V> + Send + Sync>;

/// An optional encode stage paired with an optional decode stage.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use strata_tier::{Error, Transform};
///
/// let transform = Transform::<u64>::new()
///     .with_encode(|n| Ok(Bytes::from(n.to_string())))
///     .with_decode(|raw| {
///         std::str::from_utf8(&raw)
///             .map_err(Error::transform)?
///             .parse()
///             .map_err(Error::transform)
///     });
///
/// transform.validate()?;
/// let raw = transform.encode(42)?;
/// assert_eq!(raw, Bytes::from_static(b"42"));
/// assert_eq!(transform.decode(raw)?, 42);
/// # Ok::<(), Error>(())
/// ```
pub struct Transform<V> {
    encode: Option<EncodeFn<V>>,
    decode: Option<DecodeFn<V>>,
}

impl<V> Clone for Transform<V> {
    fn clone(&self) -> Self {
        Self {
            encode: self.encode.clone(),
            decode: self.decode.clone(),
        }
    }
}

impl<V> Default for Transform<V> {
    fn default() -> Self {
        Self {
            encode: None,
            decode: None,
        }
    }
}

impl<V> fmt::Debug for Transform<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("encode", &self.encode.is_some())
            .field("decode", &self.decode.is_some())
            .finish()
    }
}

impl<V: 'static> Transform<V> {
    /// Creates a transform with both stages unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the function applied before a value is written.
    #[must_use]
    pub fn with_encode<F>(mut self, encode: F) -> Self
    where
        F: Fn(V) -> Result<Bytes> + Send + Sync + 'static,
    {
        self.encode = Some(Arc::new(encode));
        self
    }

    /// Sets the function applied after a payload is read.
    #[must_use]
    pub fn with_decode<F>(mut self, decode: F) -> Self
    where
        F: Fn(Bytes) -> Result<V> + Send + Sync + 'static,
    {
        self.decode = Some(Arc::new(decode));
        self
    }

    /// Returns `true` if an encode stage is set.
    #[must_use]
    pub fn has_encode(&self) -> bool {
        self.encode.is_some()
    }

    /// Returns `true` if a decode stage is set.
    #[must_use]
    pub fn has_decode(&self) -> bool {
        self.decode.is_some()
    }

    /// Checks that every unset stage can pass `V` through unchanged.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a stage is unset and `V` is not one of
    /// the raw value types.
    pub fn validate(&self) -> Result<()> {
        if is_raw::<V>() {
            return Ok(());
        }
        let missing = match (self.encode.is_some(), self.decode.is_some()) {
            (true, true) => return Ok(()),
            (false, true) => "encode",
            (true, false) => "decode",
            (false, false) => "encode and decode",
        };
        Err(Error::configuration(format!(
            "value type `{}` is not raw bytes or text, an {missing} function is required",
            std::any::type_name::<V>()
        )))
    }

    /// Converts a value into the payload that is written.
    ///
    /// # Errors
    ///
    /// Returns the error of the encode function unchanged, or a configuration
    /// error if no encode function is set and `V` cannot pass through.
    pub fn encode(&self, value: V) -> Result<Bytes> {
        match &self.encode {
            Some(encode) => encode(value),
            None => pass_through_encode(value),
        }
    }

    /// Converts a payload that was read back into a value.
    ///
    /// # Errors
    ///
    /// Returns the error of the decode function unchanged. Without a decode
    /// function, returns a transform error if `V` is `String` and the payload
    /// is not UTF-8, or a configuration error if `V` cannot pass through.
    pub fn decode(&self, raw: Bytes) -> Result<V> {
        match &self.decode {
            Some(decode) => decode(raw),
            None => pass_through_decode(raw),
        }
    }
}

fn is_raw<V: 'static>() -> bool {
    let id = TypeId::of::<V>();
    id == TypeId::of::<Bytes>() || id == TypeId::of::<Vec<u8>>() || id == TypeId::of::<String>()
}

fn not_raw<V>() -> Error {
    Error::configuration(format!(
        "no encode or decode function for value type `{}`",
        std::any::type_name::<V>()
    ))
}

fn pass_through_encode<V: 'static>(value: V) -> Result<Bytes> {
    let value: Box<dyn Any> = Box::new(value);
    let value = match value.downcast::<Bytes>() {
        Ok(raw) => return Ok(*raw),
        Err(value) => value,
    };
    let value = match value.downcast::<Vec<u8>>() {
        Ok(raw) => return Ok(Bytes::from(*raw)),
        Err(value) => value,
    };
    match value.downcast::<String>() {
        Ok(text) => Ok(Bytes::from(*text)),
        Err(_) => Err(not_raw::<V>()),
    }
}

fn pass_through_decode<V: 'static>(raw: Bytes) -> Result<V> {
    let id = TypeId::of::<V>();
    let value: Box<dyn Any> = if id == TypeId::of::<Bytes>() {
        Box::new(raw)
    } else if id == TypeId::of::<Vec<u8>>() {
        Box::new(raw.to_vec())
    } else if id == TypeId::of::<String>() {
        Box::new(String::from_utf8(raw.to_vec()).map_err(Error::transform)?)
    } else {
        return Err(not_raw::<V>());
    };
    value.downcast::<V>().map(|value| *value).map_err(|_| not_raw::<V>())
}
