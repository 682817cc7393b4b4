/// Thread-safe handle to a [`MutableDocument`].
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::ooxml::opc::PartStore;

use super::config::WriterConfig;
use super::doc::MutableDocument;

/// A document that several threads can build at once.
///
/// Every closure passed to [`with`](Self::with) runs under one lock, so a
/// header's relationship, content-type override and section reference are
/// never observed separately. The part store is reachable without the lock
/// because it synchronizes itself.
///
/// # Examples
///
/// ```rust
/// use docx_parts::ooxml::docx::enums::WdHeaderFooter;
/// use docx_parts::ooxml::docx::writer::SharedDocument;
///
/// let doc = SharedDocument::default();
/// std::thread::scope(|s| {
///     for i in 0..4 {
///         let doc = doc.clone();
///         s.spawn(move || {
///             doc.with(|d| {
///                 let header = d.add_header(WdHeaderFooter::Primary)?;
///                 header.add_paragraph(&format!("worker {i}"));
///                 header.save()
///             })
///             .unwrap();
///         });
///     }
/// });
/// assert_eq!(doc.parts().count_with_prefix("word/header"), 4);
/// ```
#[derive(Debug, Clone)]
pub struct SharedDocument {
    inner: Arc<Mutex<MutableDocument>>,
    parts: Arc<PartStore>,
}

impl Default for SharedDocument {
    fn default() -> Self {
        Self::new(MutableDocument::new())
    }
}

impl SharedDocument {
    pub fn new(doc: MutableDocument) -> Self {
        let parts = Arc::clone(doc.parts());
        Self {
            inner: Arc::new(Mutex::new(doc)),
            parts,
        }
    }

    pub fn with_config(config: WriterConfig) -> Self {
        Self::new(MutableDocument::with_config(config))
    }

    /// Run `f` with exclusive access to the document.
    pub fn with<R>(&self, f: impl FnOnce(&mut MutableDocument) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    /// Lock the document for a longer sequence of calls.
    pub fn lock(&self) -> MutexGuard<'_, MutableDocument> {
        self.inner.lock()
    }

    /// The document's part store.
    #[inline]
    pub fn parts(&self) -> &Arc<PartStore> {
        &self.parts
    }

    /// Take the document back if this is the last handle.
    pub fn into_inner(self) -> Option<MutableDocument> {
        Arc::try_unwrap(self.inner).ok().map(Mutex::into_inner)
    }
}
