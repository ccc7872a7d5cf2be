//! Panel rendering - writes session and vehicle fields into the page

use dvir_addin_api::{Device, Page, SessionContext, Visibility};
use tracing::debug;

use crate::config::{ElementIds, HostChromeConfig};

/// Display logic for the add-in's mount region
#[derive(Debug, Clone)]
pub struct Panel {
    ids: ElementIds,
}

impl Panel {
    pub fn new(ids: ElementIds) -> Self {
        Self { ids }
    }

    /// Disable the add-in's dashboard tile and drop its menu entry.
    ///
    /// Applied once when the add-in is loaded.
    pub fn adjust_host_chrome(&self, page: &mut dyn Page, chrome: &HostChromeConfig) {
        if !page.add_class(&chrome.dashboard_tile, &chrome.disabled_class) {
            debug!(element = %chrome.dashboard_tile, "Dashboard tile not present");
        }
        if !page.remove_element(&chrome.menu_item) {
            debug!(element = %chrome.menu_item, "Menu entry not present");
        }
    }

    /// Write driver, session id, database and server
    pub fn show_session(&self, page: &mut dyn Page, ctx: &SessionContext) {
        let fields = [
            (&self.ids.driver, ctx.session.user_name.as_str()),
            (&self.ids.session_id, ctx.session.session_id.as_str()),
            (&self.ids.database, ctx.session.database.as_str()),
            (&self.ids.server, ctx.server.as_str()),
        ];
        for (id, text) in fields {
            set_text(page, id, text);
        }
    }

    pub fn show_device(&self, page: &mut dyn Page, device: &Device) {
        set_text(page, &self.ids.vehicle, &device.name);
    }

    /// Blank the vehicle field
    pub fn clear_device(&self, page: &mut dyn Page) {
        set_text(page, &self.ids.vehicle, "");
    }

    pub fn set_visibility(&self, page: &mut dyn Page, visibility: Visibility) {
        let present = match visibility {
            Visibility::Visible => page.remove_class(&self.ids.root, &self.ids.hidden_class),
            Visibility::Hidden => page.add_class(&self.ids.root, &self.ids.hidden_class),
        };
        if !present {
            debug!(element = %self.ids.root, ?visibility, "Mount region not present");
        }
    }

    /// Read visibility back from the page
    pub fn visibility(&self, page: &dyn Page) -> Visibility {
        if page.has_class(&self.ids.root, &self.ids.hidden_class) {
            Visibility::Hidden
        } else {
            Visibility::Visible
        }
    }
}

fn set_text(page: &mut dyn Page, element_id: &str, text: &str) {
    if !page.set_text(element_id, text) {
        debug!(element = %element_id, "Display field not present");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MemoryPage;
    use dvir_addin_api::{DeviceId, ServerAddress, Session};

    fn ctx() -> SessionContext {
        SessionContext::new(
            Session {
                session_id: "S1".to_string(),
                database: "db1".to_string(),
                user_name: "Jane Doe".to_string(),
            },
            ServerAddress::new("server1"),
        )
    }

    #[test]
    fn test_show_session_fills_fields() {
        let ids = ElementIds::default();
        let mut page = MemoryPage::with_panel(&ids);
        let panel = Panel::new(ids.clone());

        panel.show_session(&mut page, &ctx());

        assert_eq!(page.text(&ids.driver), Some("Jane Doe"));
        assert_eq!(page.text(&ids.session_id), Some("S1"));
        assert_eq!(page.text(&ids.database), Some("db1"));
        assert_eq!(page.text(&ids.server), Some("server1"));
        assert_eq!(page.text(&ids.vehicle), Some(""));
    }

    #[test]
    fn test_show_device() {
        let ids = ElementIds::default();
        let mut page = MemoryPage::with_panel(&ids);
        let panel = Panel::new(ids.clone());

        let device = Device {
            id: DeviceId::new("b1"),
            name: "Truck 7".to_string(),
        };
        panel.show_device(&mut page, &device);
        assert_eq!(page.text(&ids.vehicle), Some("Truck 7"));

        panel.clear_device(&mut page);
        assert_eq!(page.text(&ids.vehicle), Some(""));
    }

    #[test]
    fn test_visibility_toggle() {
        let ids = ElementIds::default();
        let mut page = MemoryPage::with_panel(&ids);
        let panel = Panel::new(ids);

        assert_eq!(panel.visibility(&page), Visibility::Hidden);
        panel.set_visibility(&mut page, Visibility::Visible);
        assert_eq!(panel.visibility(&page), Visibility::Visible);
        panel.set_visibility(&mut page, Visibility::Hidden);
        panel.set_visibility(&mut page, Visibility::Hidden);
        assert_eq!(panel.visibility(&page), Visibility::Hidden);
    }

    #[test]
    fn test_missing_fields_are_tolerated() {
        let ids = ElementIds::default();
        let mut page = MemoryPage::new();
        let panel = Panel::new(ids.clone());

        panel.show_session(&mut page, &ctx());
        panel.set_visibility(&mut page, Visibility::Visible);
        assert_eq!(page.text(&ids.driver), None);
    }

    #[test]
    fn test_adjust_host_chrome() {
        let ids = ElementIds::default();
        let chrome = HostChromeConfig::default();
        let mut page = MemoryPage::with_panel(&ids)
            .with_element(&chrome.dashboard_tile)
            .with_element(&chrome.menu_item);
        let panel = Panel::new(ids);

        panel.adjust_host_chrome(&mut page, &chrome);

        assert!(page.has_class(&chrome.dashboard_tile, "__disabled"));
        assert!(!page.contains(&chrome.menu_item));
    }
}
