//! Session, device and lifecycle types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AddInError;

/// Add-in manifest containing metadata the host registers it under
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddInManifest {
    /// Registration name (the host looks the add-in up by this)
    pub name: String,
    /// Add-in version (semver)
    pub version: String,
    /// Human-readable description
    pub description: String,
}

impl Default for AddInManifest {
    fn default() -> Self {
        Self {
            name: "dvirPro".to_string(),
            version: "0.0.1".to_string(),
            description: String::new(),
        }
    }
}

/// The authenticated user's login context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Opaque session token
    pub session_id: String,
    /// Database the session is bound to
    pub database: String,
    /// Login name of the driver
    pub user_name: String,
}

/// Address of the host server that issued a session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerAddress(pub String);

impl ServerAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A session paired with the server that issued it.
///
/// Both halves come from the same `get_session` answer; there is no way to
/// hold one without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub session: Session,
    pub server: ServerAddress,
}

impl SessionContext {
    pub fn new(session: Session, server: ServerAddress) -> Self {
        Self { session, server }
    }
}

/// Identifier of a device (vehicle) record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(pub String);

impl DeviceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Vehicle record as returned by the host's `Get` call.
///
/// Only the fields shown in the panel are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
}

/// Whether the panel's content region is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

/// Lifecycle callbacks the host can deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    Startup,
    Initialize,
    Focus,
    Blur,
    Shutdown,
}

/// Where an add-in instance is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Constructed, no callback seen yet
    #[default]
    Unstarted,
    /// `startup` completed
    Started,
    /// `initialize` completed
    Initialized,
    /// UI is active
    Focused,
    /// User navigated away
    Blurred,
    /// Terminal; the instance accepts nothing further
    ShutDown,
}

impl LifecycleState {
    /// Apply a lifecycle event, returning the next state.
    pub fn on(self, event: LifecycleEvent) -> Result<LifecycleState, AddInError> {
        use LifecycleEvent as E;
        use LifecycleState as S;

        let next = match (self, event) {
            (S::Unstarted, E::Startup) => S::Started,
            (S::Started, E::Initialize) => S::Initialized,
            (S::Initialized | S::Focused | S::Blurred, E::Focus) => S::Focused,
            (S::Initialized | S::Focused | S::Blurred, E::Blur) => S::Blurred,
            (S::Started | S::Initialized | S::Focused | S::Blurred, E::Shutdown) => S::ShutDown,
            (from, event) => return Err(AddInError::InvalidTransition { from, event }),
        };
        Ok(next)
    }

    /// True once shutdown has completed
    pub fn is_terminal(self) -> bool {
        self == LifecycleState::ShutDown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_uses_host_field_names() {
        let json = r#"{"sessionId":"S1","database":"db1","userName":"Jane Doe"}"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.session_id, "S1");
        assert_eq!(session.database, "db1");
        assert_eq!(session.user_name, "Jane Doe");
    }

    #[test]
    fn test_device_ignores_extra_fields() {
        let json = r#"{"id":"b12","name":"Truck 7","serialNumber":"G9XX","vehicleIdentificationNumber":"1FT"}"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.id, DeviceId::new("b12"));
        assert_eq!(device.name, "Truck 7");
    }

    #[test]
    fn test_server_address_display_is_raw() {
        assert_eq!(ServerAddress::new("my3.geotab.com").to_string(), "my3.geotab.com");
    }

    #[test]
    fn test_manifest_default_name() {
        assert_eq!(AddInManifest::default().name, "dvirPro");
    }

    #[test]
    fn test_happy_path_transitions() {
        let state = LifecycleState::default()
            .on(LifecycleEvent::Startup)
            .and_then(|s| s.on(LifecycleEvent::Initialize))
            .and_then(|s| s.on(LifecycleEvent::Focus))
            .and_then(|s| s.on(LifecycleEvent::Blur))
            .and_then(|s| s.on(LifecycleEvent::Focus))
            .and_then(|s| s.on(LifecycleEvent::Shutdown))
            .unwrap();
        assert_eq!(state, LifecycleState::ShutDown);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_repeated_focus_and_blur_are_allowed() {
        let focused = LifecycleState::Focused.on(LifecycleEvent::Focus).unwrap();
        assert_eq!(focused, LifecycleState::Focused);
        let blurred = LifecycleState::Blurred.on(LifecycleEvent::Blur).unwrap();
        assert_eq!(blurred, LifecycleState::Blurred);
    }

    #[test]
    fn test_focus_before_initialize_is_rejected() {
        for from in [LifecycleState::Unstarted, LifecycleState::Started] {
            let err = from.on(LifecycleEvent::Focus).unwrap_err();
            assert!(matches!(
                err,
                AddInError::InvalidTransition {
                    event: LifecycleEvent::Focus,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_startup_and_initialize_only_once() {
        assert!(LifecycleState::Started.on(LifecycleEvent::Startup).is_err());
        assert!(
            LifecycleState::Initialized
                .on(LifecycleEvent::Initialize)
                .is_err()
        );
    }

    #[test]
    fn test_shut_down_is_terminal() {
        for event in [
            LifecycleEvent::Startup,
            LifecycleEvent::Initialize,
            LifecycleEvent::Focus,
            LifecycleEvent::Blur,
            LifecycleEvent::Shutdown,
        ] {
            assert!(LifecycleState::ShutDown.on(event).is_err());
        }
    }
}
