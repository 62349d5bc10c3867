use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::debug;

use crate::usecase::ports::remote::Binary;

const URL_PREFIX: &str = "blob:loan-dashboard/";
const DEFAULT_CONTENT_TYPE: &str = "image/png";

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    live: HashMap<u64, Arc<[u8]>>,
    revoked: u64,
}

/// Hands out [`ObjectUrl`] handles for fetched image bytes and tracks which
/// ones are still alive.
#[derive(Debug, Clone, Default)]
pub struct ObjectUrlRegistry {
    inner: Arc<Mutex<Registry>>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    match registry.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, binary: Binary) -> ObjectUrl {
        let bytes: Arc<[u8]> = Arc::from(binary.bytes);
        let mut registry = lock(&self.inner);
        registry.next_id += 1;
        let id = registry.next_id;
        registry.live.insert(id, bytes.clone());
        debug!(id, size = bytes.len(), "object url created");

        ObjectUrl {
            id,
            bytes,
            content_type: binary
                .content_type
                .filter(|value| value.starts_with("image/"))
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            registry: self.inner.clone(),
        }
    }

    pub fn live_count(&self) -> usize {
        lock(&self.inner).live.len()
    }

    pub fn revoked_count(&self) -> u64 {
        lock(&self.inner).revoked
    }
}

/// Scoped handle to registered image bytes. Dropping it revokes the URL.
pub struct ObjectUrl {
    id: u64,
    bytes: Arc<[u8]>,
    content_type: String,
    registry: Arc<Mutex<Registry>>,
}

impl ObjectUrl {
    pub fn url(&self) -> String {
        format!("{URL_PREFIX}{}", self.id)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Inline `data:` form for the WebView `img` element.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

impl fmt::Debug for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectUrl")
            .field("url", &self.url())
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        let mut registry = lock(&self.registry);
        if registry.live.remove(&self.id).is_some() {
            registry.revoked += 1;
            debug!(id = self.id, "object url revoked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(bytes: &[u8]) -> Binary {
        Binary {
            bytes: bytes.to_vec(),
            content_type: Some("image/png".to_string()),
        }
    }

    #[test]
    fn dropping_handle_revokes_once() {
        let registry = ObjectUrlRegistry::new();
        let first = registry.create(png(&[1, 2, 3]));
        let second = registry.create(png(&[4]));

        assert_ne!(first.url(), second.url());
        assert!(first.url().starts_with(URL_PREFIX));
        assert_eq!(first.bytes(), &[1_u8, 2, 3][..]);
        assert_eq!(registry.live_count(), 2);

        drop(first);
        assert_eq!(registry.live_count(), 1);
        assert_eq!(registry.revoked_count(), 1);
        drop(second);
        assert_eq!(registry.live_count(), 0);
        assert_eq!(registry.revoked_count(), 2);
    }

    #[test]
    fn data_url_embeds_base64_payload() {
        let registry = ObjectUrlRegistry::new();
        let handle = registry.create(Binary {
            bytes: b"abc".to_vec(),
            content_type: None,
        });

        assert_eq!(handle.data_url(), "data:image/png;base64,YWJj");
    }
}
