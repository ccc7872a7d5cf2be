//! LifecycleDriver - host side of the add-in contract
//!
//! Delivers lifecycle callbacks to an [`AddIn`], logs how long each took,
//! and holds `shutdown` to its budget. When the budget runs out the driver
//! gives up on the add-in and reports a timeout so logout can proceed.

use std::time::{Duration, Instant};

use dvir_addin_api::{AddIn, AddInError, FocusOutcome, HostClient, HostState};
use tracing::{debug, info, warn};

/// Drives one add-in instance through its lifecycle
pub struct LifecycleDriver<A: AddIn> {
    addin: A,
    shutdown_budget: Duration,
}

impl<A: AddIn> LifecycleDriver<A> {
    pub fn new(addin: A, shutdown_budget: Duration) -> Self {
        Self {
            addin,
            shutdown_budget,
        }
    }

    pub fn addin(&self) -> &A {
        &self.addin
    }

    pub fn shutdown_budget(&self) -> Duration {
        self.shutdown_budget
    }

    pub async fn startup(
        &mut self,
        host: &dyn HostClient,
        state: &dyn HostState,
    ) -> Result<(), AddInError> {
        let started = Instant::now();
        let result = self.addin.startup(host, state).await;
        log_completion("startup", started, &result);
        result
    }

    pub async fn initialize(
        &mut self,
        host: &dyn HostClient,
        state: &dyn HostState,
    ) -> Result<(), AddInError> {
        let started = Instant::now();
        let result = self.addin.initialize(host, state).await;
        log_completion("initialize", started, &result);
        result
    }

    pub async fn focus(
        &mut self,
        host: &dyn HostClient,
        state: &dyn HostState,
    ) -> Result<FocusOutcome, AddInError> {
        let started = Instant::now();
        let result = self.addin.focus(host, state).await;
        log_completion("focus", started, &result);
        result
    }

    pub fn blur(&mut self, host: &dyn HostClient, state: &dyn HostState) -> Result<(), AddInError> {
        let result = self.addin.blur(host, state);
        if let Err(e) = &result {
            warn!(callback = "blur", error = %e, "Add-in callback failed");
        }
        result
    }

    /// Deliver a click routed from the page
    pub fn click(&mut self, element_id: &str) {
        debug!(element = %element_id, "Dispatching click");
        self.addin.on_click(element_id);
    }

    /// Run `shutdown`, abandoning it once the budget is spent
    pub async fn shutdown(
        &mut self,
        host: &dyn HostClient,
        state: &dyn HostState,
    ) -> Result<(), AddInError> {
        let started = Instant::now();
        let bounded =
            tokio::time::timeout(self.shutdown_budget, self.addin.shutdown(host, state)).await;
        let result = match bounded {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    addin = %self.addin.manifest().name,
                    budget_ms = self.shutdown_budget.as_millis() as u64,
                    "Add-in shutdown exceeded budget, proceeding without it"
                );
                Err(AddInError::ShutdownTimedOut(self.shutdown_budget))
            }
        };
        log_completion("shutdown", started, &result);
        result
    }
}

fn log_completion<T>(callback: &'static str, started: Instant, result: &Result<T, AddInError>) {
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match result {
        Ok(_) => info!(callback, elapsed_ms, "Add-in callback completed"),
        Err(e) => warn!(callback, elapsed_ms, error = %e, "Add-in callback failed"),
    }
}
