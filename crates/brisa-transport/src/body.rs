//! Request and response bodies.
//!
//! A [`Body`] is either fully buffered bytes or a single-use stream of chunks.
//! Streams cannot be read twice, so anything that needs to look at a body and
//! still pass it on (logging, retries) calls [`Body::buffer`], which drains the
//! stream once and leaves replayable bytes behind.

use crate::error::{Result, TransportError};
use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use std::fmt;
use std::sync::Mutex;

/// A boxed stream of body chunks.
pub type BodyStream = BoxStream<'static, Result<Bytes>>;

/// HTTP message body.
///
/// `Body` is `Send + Sync` even when it wraps a stream, so responses can travel
/// inside error values.
#[derive(Default)]
pub struct Body {
    inner: Inner,
}

enum Inner {
    Full(Bytes),
    // Only ever accessed by value or through `&mut`, never locked.
    Stream(Mutex<BodyStream>),
}

impl Default for Inner {
    fn default() -> Self {
        Self::Full(Bytes::new())
    }
}

impl Body {
    /// An empty body.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A buffered body.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            inner: Inner::Full(bytes.into()),
        }
    }

    /// A streaming body. It can be read exactly once unless buffered first.
    pub fn from_stream<S, E>(stream: S) -> Self
    where
        S: Stream<Item = std::result::Result<Bytes, E>> + Send + 'static,
        E: Into<TransportError>,
    {
        Self {
            inner: Inner::Stream(Mutex::new(
                stream.map(|chunk| chunk.map_err(Into::into)).boxed(),
            )),
        }
    }

    /// Whether the body is held in memory.
    pub fn is_buffered(&self) -> bool {
        matches!(self.inner, Inner::Full(_))
    }

    /// Whether the body is known to be empty. Streams are never known-empty.
    pub fn is_empty(&self) -> bool {
        match &self.inner {
            Inner::Full(bytes) => bytes.is_empty(),
            Inner::Stream(_) => false,
        }
    }

    /// The buffered bytes, if the body is buffered.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match &self.inner {
            Inner::Full(bytes) => Some(bytes),
            Inner::Stream(_) => None,
        }
    }

    /// A copy of a buffered body. Streams cannot be cloned.
    pub fn try_clone(&self) -> Option<Self> {
        self.as_bytes().map(|bytes| Self::from_bytes(bytes.clone()))
    }

    /// Drain a streaming body into memory, leaving the buffered bytes in place,
    /// and return a cheap handle to them.
    ///
    /// On error the stream has been partially consumed and the body is left
    /// empty.
    pub async fn buffer(&mut self) -> Result<Bytes> {
        let bytes = match std::mem::take(&mut self.inner) {
            Inner::Full(bytes) => bytes,
            Inner::Stream(stream) => collect(take_stream(stream)).await?,
        };
        self.inner = Inner::Full(bytes.clone());
        Ok(bytes)
    }

    /// Consume the body, collecting it into memory.
    pub async fn into_bytes(self) -> Result<Bytes> {
        match self.inner {
            Inner::Full(bytes) => Ok(bytes),
            Inner::Stream(stream) => collect(take_stream(stream)).await,
        }
    }

    /// Consume the body as a stream of chunks.
    pub fn into_stream(self) -> BodyStream {
        match self.inner {
            Inner::Stream(stream) => take_stream(stream),
            Inner::Full(bytes) if bytes.is_empty() => stream::empty().boxed(),
            Inner::Full(bytes) => stream::once(async move { Ok(bytes) }).boxed(),
        }
    }
}

fn take_stream(stream: Mutex<BodyStream>) -> BodyStream {
    stream.into_inner().unwrap_or_else(|e| e.into_inner())
}

async fn collect(mut stream: BodyStream) -> Result<Bytes> {
    let mut buffer = BytesMut::new();
    while let Some(chunk) = stream.next().await {
        buffer.extend_from_slice(&chunk?);
    }
    Ok(buffer.freeze())
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Inner::Full(bytes) => f.debug_tuple("Body::Full").field(&bytes.len()).finish(),
            Inner::Stream(_) => f.write_str("Body::Stream"),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::from_bytes(text)
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Self::from_bytes(text)
    }
}

impl From<&'static [u8]> for Body {
    fn from(bytes: &'static [u8]) -> Self {
        Self::from_bytes(bytes)
    }
}
