use bytes::Bytes;
use std::sync::atomic::{AtomicU64, Ordering};

pub const MPEG: &str = "audio/mpeg";

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Audio bytes tagged with their MIME type.
///
/// Each payload gets its own local address, the `blob:` URL a browser would
/// hand out for the same bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioPayload {
    id: u64,
    pub bytes: Bytes,
    pub mime: String,
}

impl AudioPayload {
    pub fn new(bytes: impl Into<Bytes>, mime: impl Into<String>) -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            bytes: bytes.into(),
            mime: mime.into(),
        }
    }

    pub fn mpeg(bytes: impl Into<Bytes>) -> Self {
        Self::new(bytes, MPEG)
    }

    pub fn object_url(&self) -> String {
        format!("blob:talkie/{}", self.id)
    }
}
