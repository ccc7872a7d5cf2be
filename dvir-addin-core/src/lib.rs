//! dvir-addin-core - The DVIR Pro add-in for the fleet host
//!
//! Shows the current driver, vehicle and session in a small panel and
//! launches the external DVIR Pro inspection tool with the session passed as
//! URL parameters.
//!
//! - [`ExtensionController`] implements the lifecycle contract
//! - [`Panel`] writes into the host-provided DOM region
//! - [`launch_url`] builds the inspection tool link
//! - [`LifecycleDriver`] is the host-side dispatcher with the shutdown budget
//! - [`mock`] holds in-memory host and page doubles for tests

pub mod config;
pub mod controller;
pub mod driver;
pub mod launch;
pub mod mock;
pub mod panel;

pub use config::AddInConfig;
pub use controller::{ExtensionController, LaunchOutcome};
pub use driver::LifecycleDriver;
pub use launch::launch_url;
pub use panel::Panel;

pub use dvir_addin_api::{AddIn, AddInError, FocusOutcome, HostError};
