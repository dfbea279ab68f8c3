use std::collections::BTreeSet;

/// Activation state for Panel-capability references.
///
/// Tracks the active set plus a single "last activated" marker. The marker,
/// when non-empty, always names a member of the active set; `deactivate`
/// clears it in the same operation, so no stale pointer survives a tick.
#[derive(Debug, Clone, Default)]
pub struct PanelActivation {
    active: BTreeSet<String>,
    last_activated: Option<String>,
}

impl PanelActivation {
    pub fn new() -> Self {
        PanelActivation::default()
    }

    /// Activate a panel by canonical path.
    ///
    /// With `exclusive`, every other active panel is deactivated first;
    /// `keep_last` exempts the current "last activated" panel from that
    /// sweep.
    pub fn activate(&mut self, panel: &str, exclusive: bool, keep_last: bool) {
        if exclusive {
            let keep = if keep_last {
                self.last_activated.clone()
            } else {
                None
            };
            self.active
                .retain(|p| p == panel || Some(p) == keep.as_ref());
        }
        self.active.insert(panel.to_string());
        self.last_activated = Some(panel.to_string());
    }

    pub fn deactivate(&mut self, panel: &str) {
        self.active.remove(panel);
        if self.last_activated.as_deref() == Some(panel) {
            self.last_activated = None;
        }
    }

    pub fn is_active(&self, panel: &str) -> bool {
        self.active.contains(panel)
    }

    pub fn last_activated(&self) -> Option<&str> {
        self.last_activated.as_deref()
    }

    pub fn active_panels(&self) -> impl Iterator<Item = &str> {
        self.active.iter().map(|s| s.as_str())
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}
