//! Collaborators the host supplies to an add-in
//!
//! The host hands a [`HostClient`] and a [`HostState`] to every lifecycle
//! callback. The [`Page`] is the pre-existing DOM region the add-in renders
//! into; the add-in never creates it.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::HostError;
use crate::types::{DeviceId, ServerAddress, Session};

/// Session and data API of the host application
#[async_trait]
pub trait HostClient: Send + Sync {
    /// Fetch the active user session and the server that issued it
    async fn get_session(&self) -> Result<(Session, ServerAddress), HostError>;

    /// Generic RPC, e.g. `call("Get", {"typeName": "Device", "search": {...}})`
    async fn call(&self, method: &str, params: Value) -> Result<Value, HostError>;
}

/// Read-only view of the host's page state
pub trait HostState: Send + Sync {
    /// Identifier of the device currently selected in the host, if any
    fn device_id(&self) -> Option<DeviceId>;
}

/// The DOM region the add-in renders into.
///
/// Elements are addressed by id. Every mutator reports whether the element
/// was present; a missing element is a no-op.
pub trait Page: Send {
    /// Replace the text content of an element
    fn set_text(&mut self, element_id: &str, text: &str) -> bool;

    /// Add a CSS class to an element (no duplicates)
    fn add_class(&mut self, element_id: &str, class: &str) -> bool;

    /// Remove a CSS class from an element
    fn remove_class(&mut self, element_id: &str, class: &str) -> bool;

    /// Check whether an element carries a CSS class
    fn has_class(&self, element_id: &str, class: &str) -> bool;

    /// Detach an element from the document
    fn remove_element(&mut self, element_id: &str) -> bool;

    /// Route clicks on an element to [`AddIn::on_click`](crate::AddIn::on_click).
    ///
    /// Default handling of the click (navigation) is suppressed.
    fn attach_click(&mut self, element_id: &str) -> bool;

    /// Open a URL in a new top-level browsing context
    fn open_window(&mut self, url: &str, target: &str);
}
