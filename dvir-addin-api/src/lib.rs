//! dvir-addin-api - Contract between the fleet host and the DVIR Pro add-in
//!
//! The host drives an add-in through five lifecycle callbacks:
//!
//! 1. `startup` - once, before any UI is shown
//! 2. `initialize` - once per load, before the first focus
//! 3. `focus` - every time the add-in's UI is activated, and again when the
//!    host's global navigation or group filter changes
//! 4. `blur` - when the user navigates away
//! 5. `shutdown` - when the last logged-in driver logs out, under a hard
//!    time budget
//!
//! `startup`, `initialize` and `shutdown` complete when their future resolves;
//! the host holds the page (or the logout) until then.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//! use dvir_addin_api::{AddIn, AddInError, AddInManifest, HostClient, HostState};
//!
//! #[derive(Default)]
//! pub struct MyAddIn;
//!
//! #[async_trait]
//! impl AddIn for MyAddIn {
//!     fn manifest(&self) -> AddInManifest {
//!         AddInManifest::default()
//!     }
//!
//!     async fn startup(&mut self, _: &dyn HostClient, _: &dyn HostState) -> Result<(), AddInError> {
//!         Ok(())
//!     }
//!     // ...
//! }
//! ```

pub mod error;
pub mod host;
pub mod types;

use async_trait::async_trait;

pub use error::{AddInError, HostError};
pub use host::{HostClient, HostState, Page};
pub use types::*;

/// Outcome of a `focus` callback.
///
/// Host API failures are absorbed (logged) rather than returned, so focus
/// reports how far it got instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusOutcome {
    /// Session and device were fetched and the panel is visible
    Revealed,
    /// The session request failed; nothing was updated
    SessionUnavailable,
    /// The host page state has no selected device
    DeviceUnknown,
    /// The device request failed
    DeviceUnavailable,
    /// The device search matched nothing
    DeviceNotFound,
}

/// The lifecycle contract every add-in implements.
#[async_trait]
pub trait AddIn: Send {
    /// Return add-in metadata
    fn manifest(&self) -> AddInManifest;

    /// Setup with no user-visible dependency. Resolving signals completion.
    async fn startup(
        &mut self,
        host: &dyn HostClient,
        state: &dyn HostState,
    ) -> Result<(), AddInError>;

    /// One-time state and default setup. Resolving signals completion.
    async fn initialize(
        &mut self,
        host: &dyn HostClient,
        state: &dyn HostState,
    ) -> Result<(), AddInError>;

    /// UI activated (or global host state changed).
    async fn focus(
        &mut self,
        host: &dyn HostClient,
        state: &dyn HostState,
    ) -> Result<FocusOutcome, AddInError>;

    /// User navigated away.
    fn blur(&mut self, host: &dyn HostClient, state: &dyn HostState) -> Result<(), AddInError>;

    /// Teardown after the last user logs out. Must stay bounded: the host
    /// gives up waiting after its budget.
    async fn shutdown(
        &mut self,
        host: &dyn HostClient,
        state: &dyn HostState,
    ) -> Result<(), AddInError>;

    /// Called when an element attached via [`Page::attach_click`] is clicked
    fn on_click(&mut self, _element_id: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addin_trait_is_object_safe() {
        // This compiles only if AddIn is object-safe
        fn _takes_boxed_addin(_: Box<dyn AddIn>) {}
    }

    #[test]
    fn test_page_trait_is_object_safe() {
        fn _takes_boxed_page(_: Box<dyn Page>) {}
    }
}
