//! ExtensionController - the DVIR Pro add-in
//!
//! Owns everything the add-in remembers between host callbacks: lifecycle
//! state, the cached session and device, and whether the launch control is
//! wired up. The host never runs two callbacks at once, so plain `&mut self`
//! is enough.

use async_trait::async_trait;
use dvir_addin_api::{
    AddIn, AddInError, AddInManifest, Device, DeviceId, FocusOutcome, HostClient, HostError,
    HostState, LifecycleEvent, LifecycleState, Page, SessionContext, Visibility,
};
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::config::AddInConfig;
use crate::launch::launch_url;
use crate::panel::Panel;

/// Result of a click on the launch control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The inspection tool was opened at this URL
    Opened(String),
    /// No session cached yet; nothing was opened
    NoSession,
    /// The click was not on the launch control
    Ignored,
}

/// The add-in instance, constructed once per module load
pub struct ExtensionController<P: Page> {
    config: AddInConfig,
    panel: Panel,
    page: P,
    state: LifecycleState,
    session: Option<SessionContext>,
    device: Option<Device>,
    launch_attached: bool,
}

impl<P: Page> ExtensionController<P> {
    /// Take over the mount region and adjust the host's menu and dashboard
    pub fn new(config: AddInConfig, mut page: P) -> Self {
        let panel = Panel::new(config.elements.clone());
        panel.adjust_host_chrome(&mut page, &config.host_chrome);
        Self {
            config,
            panel,
            page,
            state: LifecycleState::Unstarted,
            session: None,
            device: None,
            launch_attached: false,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Cached session, set by the last successful focus
    pub fn session(&self) -> Option<&SessionContext> {
        self.session.as_ref()
    }

    /// Cached device, cleared whenever focus fetches a new session
    pub fn device(&self) -> Option<&Device> {
        self.device.as_ref()
    }

    pub fn visibility(&self) -> Visibility {
        self.panel.visibility(&self.page)
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn config(&self) -> &AddInConfig {
        &self.config
    }

    /// Open the inspection tool for the cached session
    pub fn launch(&mut self) -> LaunchOutcome {
        let Some(ctx) = &self.session else {
            warn!("Launch clicked before a session was fetched");
            return LaunchOutcome::NoSession;
        };
        let url = launch_url(&self.config.launch.base_url, ctx);
        info!(server = %ctx.server, "Opening inspection tool");
        self.page.open_window(&url, &self.config.launch.target);
        LaunchOutcome::Opened(url)
    }

    /// Route a click from the page
    pub fn handle_click(&mut self, element_id: &str) -> LaunchOutcome {
        if element_id == self.config.elements.launch {
            self.launch()
        } else {
            LaunchOutcome::Ignored
        }
    }

    fn advance(&mut self, event: LifecycleEvent) -> Result<(), AddInError> {
        match self.state.on(event) {
            Ok(next) => {
                debug!(from = ?self.state, to = ?next, "Lifecycle transition");
                self.state = next;
                Ok(())
            }
            Err(e) => {
                if self.state.is_terminal() {
                    warn!(?event, "Ignoring lifecycle call after shutdown");
                } else {
                    warn!(state = ?self.state, ?event, "Ignoring out-of-order lifecycle call");
                }
                Err(e)
            }
        }
    }

    fn attach_launch(&mut self) {
        if self.launch_attached {
            return;
        }
        if self.page.attach_click(&self.config.elements.launch) {
            self.launch_attached = true;
        } else {
            debug!(element = %self.config.elements.launch, "Launch control not present");
        }
    }

    async fn fetch_device(
        host: &dyn HostClient,
        device_id: &DeviceId,
    ) -> Result<Option<Device>, HostError> {
        let params = json!({
            "typeName": "Device",
            "search": { "id": device_id },
        });
        let result = host.call("Get", params).await?;
        let devices: Vec<Device> = serde_json::from_value(result)?;
        Ok(devices.into_iter().next())
    }
}

#[async_trait]
impl<P: Page> AddIn for ExtensionController<P> {
    fn manifest(&self) -> AddInManifest {
        AddInManifest {
            name: "dvirPro".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Launches DVIR Pro inspections for the current driver and vehicle"
                .to_string(),
        }
    }

    async fn startup(
        &mut self,
        _host: &dyn HostClient,
        _state: &dyn HostState,
    ) -> Result<(), AddInError> {
        self.advance(LifecycleEvent::Startup)
    }

    async fn initialize(
        &mut self,
        _host: &dyn HostClient,
        _state: &dyn HostState,
    ) -> Result<(), AddInError> {
        self.advance(LifecycleEvent::Initialize)?;
        self.panel.set_visibility(&mut self.page, Visibility::Hidden);
        Ok(())
    }

    async fn focus(
        &mut self,
        host: &dyn HostClient,
        state: &dyn HostState,
    ) -> Result<FocusOutcome, AddInError> {
        self.advance(LifecycleEvent::Focus)?;
        self.attach_launch();

        let ctx = match host.get_session().await {
            Ok((session, server)) => SessionContext::new(session, server),
            Err(e) => {
                error!(error = %e, "Failed to fetch session");
                return Ok(FocusOutcome::SessionUnavailable);
            }
        };
        self.panel.show_session(&mut self.page, &ctx);
        self.session = Some(ctx);

        // The previous vehicle belongs to the previous session.
        self.device = None;
        self.panel.clear_device(&mut self.page);
        self.panel.set_visibility(&mut self.page, Visibility::Hidden);

        let Some(device_id) = state.device_id() else {
            warn!("Host page state has no selected device");
            return Ok(FocusOutcome::DeviceUnknown);
        };

        match Self::fetch_device(host, &device_id).await {
            Ok(Some(device)) => {
                self.panel.show_device(&mut self.page, &device);
                self.panel.set_visibility(&mut self.page, Visibility::Visible);
                self.device = Some(device);
                Ok(FocusOutcome::Revealed)
            }
            Ok(None) => {
                warn!(device_id = %device_id, "Device search returned no records");
                Ok(FocusOutcome::DeviceNotFound)
            }
            Err(e) => {
                error!(device_id = %device_id, error = %e, "Failed to fetch device");
                Ok(FocusOutcome::DeviceUnavailable)
            }
        }
    }

    fn blur(&mut self, _host: &dyn HostClient, _state: &dyn HostState) -> Result<(), AddInError> {
        self.advance(LifecycleEvent::Blur)?;
        self.panel.set_visibility(&mut self.page, Visibility::Hidden);
        Ok(())
    }

    async fn shutdown(
        &mut self,
        _host: &dyn HostClient,
        _state: &dyn HostState,
    ) -> Result<(), AddInError> {
        self.advance(LifecycleEvent::Shutdown)?;
        // Local teardown only; nothing here may wait on the host.
        self.panel.set_visibility(&mut self.page, Visibility::Hidden);
        self.session = None;
        self.device = None;
        Ok(())
    }

    fn on_click(&mut self, element_id: &str) {
        self.handle_click(element_id);
    }
}
