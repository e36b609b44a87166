//! Render target capability and the shared document handle

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{Document, NodeId};

/// The small set of tree mutations countdown widgets need.
///
/// Mutations are assumed to succeed; there is no error channel.
pub trait RenderTarget {
    fn create_node(&mut self, tag: &str) -> NodeId;
    fn add_class(&mut self, node: NodeId, class: &str);
    fn append_child(&mut self, parent: NodeId, child: NodeId);
    fn set_text(&mut self, node: NodeId, text: &str);
}

impl RenderTarget for Document {
    fn create_node(&mut self, tag: &str) -> NodeId {
        self.create_element(tag)
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        Document::add_class(self, node, class);
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        Document::append_child(self, parent, child);
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        Document::set_text(self, node, text);
    }
}

/// Document shared between the widget tasks and whoever reads it.
///
/// Writers render through the guard returned by [`SharedDocument::lock`],
/// holding it for a whole tick so readers only see complete updates.
#[derive(Debug, Clone, Default)]
pub struct SharedDocument(Arc<Mutex<Document>>);

impl SharedDocument {
    pub fn new(document: Document) -> Self {
        Self(Arc::new(Mutex::new(document)))
    }

    /// Lock the document. A poisoned lock is recovered since every mutation
    /// leaves the tree consistent.
    pub fn lock(&self) -> MutexGuard<'_, Document> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a read-only closure against the document
    pub fn read<T>(&self, f: impl FnOnce(&Document) -> T) -> T {
        f(&self.lock())
    }
}

impl From<Document> for SharedDocument {
    fn from(document: Document) -> Self {
        Self::new(document)
    }
}
