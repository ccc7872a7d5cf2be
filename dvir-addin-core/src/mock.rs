//! In-memory host and page for tests
//!
//! `MockHostClient` answers from queued responses the way a scripted backend
//! does: each request consumes one entry, and an empty queue is reported as a
//! transport failure. `MemoryPage` records what the add-in did to the DOM.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use dvir_addin_api::{
    Device, DeviceId, HostClient, HostError, HostState, Page, ServerAddress, Session,
};
use serde_json::{Value, json};

use crate::config::ElementIds;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Scripted implementation of HostClient
#[derive(Default)]
pub struct MockHostClient {
    sessions: Mutex<VecDeque<Result<(Session, ServerAddress), HostError>>>,
    responses: Mutex<VecDeque<Result<Value, HostError>>>,
    calls: Mutex<Vec<(String, Value)>>,
    session_requests: Mutex<usize>,
}

impl MockHostClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer for the next `get_session`
    pub fn queue_session(&self, result: Result<(Session, ServerAddress), HostError>) {
        lock(&self.sessions).push_back(result);
    }

    /// Queue a successful session (convenience method)
    pub fn queue_session_ok(&self, session: Session, server: &str) {
        self.queue_session(Ok((session, ServerAddress::new(server))));
    }

    /// Queue the answer for the next `call`
    pub fn queue_response(&self, result: Result<Value, HostError>) {
        lock(&self.responses).push_back(result);
    }

    /// Queue a `Get` result containing the given devices
    pub fn queue_devices(&self, devices: &[Device]) {
        self.queue_response(Ok(json!(devices)));
    }

    /// Every `call` received, in order
    pub fn calls(&self) -> Vec<(String, Value)> {
        lock(&self.calls).clone()
    }

    /// Number of `get_session` requests received
    pub fn session_requests(&self) -> usize {
        *lock(&self.session_requests)
    }
}

#[async_trait]
impl HostClient for MockHostClient {
    async fn get_session(&self) -> Result<(Session, ServerAddress), HostError> {
        *lock(&self.session_requests) += 1;
        lock(&self.sessions)
            .pop_front()
            .unwrap_or_else(|| Err(HostError::transport("No queued session in MockHostClient")))
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, HostError> {
        lock(&self.calls).push((method.to_string(), params));
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(HostError::transport("No queued response in MockHostClient")))
    }
}

/// Fixed page state
#[derive(Debug, Clone, Default)]
pub struct StaticHostState {
    pub device_id: Option<DeviceId>,
}

impl StaticHostState {
    pub fn with_device(id: impl Into<String>) -> Self {
        Self {
            device_id: Some(DeviceId::new(id)),
        }
    }
}

impl HostState for StaticHostState {
    fn device_id(&self) -> Option<DeviceId> {
        self.device_id.clone()
    }
}

#[derive(Debug, Clone, Default)]
struct Element {
    text: String,
    classes: Vec<String>,
    click_bindings: usize,
}

/// A window opened through the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedWindow {
    pub url: String,
    pub target: String,
}

/// In-memory DOM
#[derive(Debug, Default)]
pub struct MemoryPage {
    elements: HashMap<String, Element>,
    opened: Vec<OpenedWindow>,
}

impl MemoryPage {
    /// An empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// The add-in's markup: a hidden root, empty fields and the launch control
    pub fn with_panel(ids: &ElementIds) -> Self {
        let mut page = Self::new()
            .with_element(&ids.root)
            .with_element(&ids.driver)
            .with_element(&ids.session_id)
            .with_element(&ids.database)
            .with_element(&ids.server)
            .with_element(&ids.vehicle)
            .with_element(&ids.launch);
        page.add_class(&ids.root, &ids.hidden_class);
        page
    }

    /// Builder: add an empty element
    pub fn with_element(mut self, element_id: &str) -> Self {
        self.elements
            .insert(element_id.to_string(), Element::default());
        self
    }

    pub fn contains(&self, element_id: &str) -> bool {
        self.elements.contains_key(element_id)
    }

    pub fn text(&self, element_id: &str) -> Option<&str> {
        self.elements.get(element_id).map(|e| e.text.as_str())
    }

    /// How many times a click route was attached to an element
    pub fn click_bindings(&self, element_id: &str) -> usize {
        self.elements
            .get(element_id)
            .map(|e| e.click_bindings)
            .unwrap_or(0)
    }

    pub fn opened(&self) -> &[OpenedWindow] {
        &self.opened
    }
}

impl Page for MemoryPage {
    fn set_text(&mut self, element_id: &str, text: &str) -> bool {
        match self.elements.get_mut(element_id) {
            Some(element) => {
                element.text = text.to_string();
                true
            }
            None => false,
        }
    }

    fn add_class(&mut self, element_id: &str, class: &str) -> bool {
        match self.elements.get_mut(element_id) {
            Some(element) => {
                if !element.classes.iter().any(|c| c == class) {
                    element.classes.push(class.to_string());
                }
                true
            }
            None => false,
        }
    }

    fn remove_class(&mut self, element_id: &str, class: &str) -> bool {
        match self.elements.get_mut(element_id) {
            Some(element) => {
                element.classes.retain(|c| c != class);
                true
            }
            None => false,
        }
    }

    fn has_class(&self, element_id: &str, class: &str) -> bool {
        self.elements
            .get(element_id)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    fn remove_element(&mut self, element_id: &str) -> bool {
        self.elements.remove(element_id).is_some()
    }

    fn attach_click(&mut self, element_id: &str) -> bool {
        match self.elements.get_mut(element_id) {
            Some(element) => {
                element.click_bindings += 1;
                true
            }
            None => false,
        }
    }

    fn open_window(&mut self, url: &str, target: &str) {
        self.opened.push(OpenedWindow {
            url: url.to_string(),
            target: target.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            session_id: "S1".to_string(),
            database: "db1".to_string(),
            user_name: "Jane Doe".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_host_consumes_queue_in_order() {
        let host = MockHostClient::new();
        host.queue_session_ok(session(), "server1");
        host.queue_session(Err(HostError::rejected("expired")));

        let (s, server) = host.get_session().await.unwrap();
        assert_eq!(s, session());
        assert_eq!(server.as_str(), "server1");
        assert!(matches!(
            host.get_session().await,
            Err(HostError::Rejected(_))
        ));
        assert!(matches!(
            host.get_session().await,
            Err(HostError::Transport(_))
        ));
        assert_eq!(host.session_requests(), 3);
    }

    #[tokio::test]
    async fn test_mock_host_records_calls() {
        let host = MockHostClient::new();
        host.queue_devices(&[Device {
            id: DeviceId::new("b1"),
            name: "Truck".to_string(),
        }]);

        let result = host
            .call("Get", json!({"typeName": "Device"}))
            .await
            .unwrap();
        assert_eq!(result[0]["name"], "Truck");
        assert_eq!(host.calls().len(), 1);
        assert_eq!(host.calls()[0].0, "Get");
    }

    #[test]
    fn test_memory_page_classes_do_not_duplicate() {
        let mut page = MemoryPage::new().with_element("app");
        page.add_class("app", "hidden");
        page.add_class("app", "hidden");
        page.remove_class("app", "hidden");
        assert!(!page.has_class("app", "hidden"));
    }

    #[test]
    fn test_memory_page_missing_element() {
        let mut page = MemoryPage::new();
        assert!(!page.set_text("nope", "x"));
        assert!(!page.attach_click("nope"));
        assert!(!page.remove_element("nope"));
        assert_eq!(page.click_bindings("nope"), 0);
    }
}
