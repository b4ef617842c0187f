//! Session state machine: turns inbound messages and user actions into widget
//! updates and outbound requests.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::binding::BindingRegistry;
use crate::error::SyncResult;
use crate::proto::{Inbound, Outbound};
use crate::topology;
use crate::types::{ClientData, HardwareData};
use crate::widget::{EffectSelector, SmartPanel, WidgetArena};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingConfig,
    AwaitingFirstSnapshot,
    Streaming,
}

impl SessionState {
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::AwaitingConfig => "waiting for config",
            SessionState::AwaitingFirstSnapshot => "waiting for data",
            SessionState::Streaming => "streaming",
        }
    }
}

pub struct Session {
    state: SessionState,
    // None until seeded by the server or set by the user
    config: Option<ClientData>,
    selector: EffectSelector,
    widgets: WidgetArena,
    bindings: BindingRegistry,
    smart: SmartPanel,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(WidgetArena::default())
    }
}

impl Session {
    pub fn new(widgets: WidgetArena) -> Self {
        Self {
            state: SessionState::AwaitingConfig,
            config: None,
            selector: EffectSelector::default(),
            widgets,
            bindings: BindingRegistry::default(),
            smart: SmartPanel::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> Option<&ClientData> {
        self.config.as_ref()
    }

    pub fn selector(&self) -> &EffectSelector {
        &self.selector
    }

    pub fn widgets(&self) -> &WidgetArena {
        &self.widgets
    }

    pub fn bindings(&self) -> &BindingRegistry {
        &self.bindings
    }

    pub fn smart(&self) -> &SmartPanel {
        &self.smart
    }

    /// Feed one inbound message. Returns the messages to send, in order.
    pub fn handle(&mut self, msg: Inbound, now: DateTime<Utc>) -> SyncResult<Vec<Outbound>> {
        match msg {
            Inbound::ClientData(data) => Ok(self.on_client_data(data)),
            Inbound::HardwareData(hw) => {
                self.on_hardware_data(&hw, now)?;
                Ok(Vec::new())
            }
            Inbound::SmartData(list) => {
                self.smart.render(&list);
                debug!(reports = list.len(), "smart data rendered");
                Ok(Vec::new())
            }
        }
    }

    fn on_client_data(&mut self, data: ClientData) -> Vec<Outbound> {
        let mut out = Vec::with_capacity(3);
        match &self.config {
            None => {
                if !self.selector.select_name(&data.effect) {
                    warn!(effect = %data.effect, "server config names an unknown effect");
                }
                info!(effect = %data.effect, "session config seeded from server");
                self.config = Some(data);
            }
            Some(local) => {
                // A local choice outranks whatever the server echoes back
                debug!(server = %data.effect, local = %local.effect, "re-pushing local config");
                out.push(Outbound::SetClientData(local.clone()));
            }
        }
        if self.state != SessionState::AwaitingConfig {
            info!("server restarted the handshake; topology will be rebuilt");
        }
        out.push(Outbound::GetHardwareData);
        out.push(Outbound::GetSmartData);
        self.state = SessionState::AwaitingFirstSnapshot;
        out
    }

    fn on_hardware_data(&mut self, hw: &HardwareData, now: DateTime<Utc>) -> SyncResult<()> {
        match self.state {
            SessionState::AwaitingConfig => {
                warn!("hardware_data before client_data; dropped");
                Ok(())
            }
            SessionState::AwaitingFirstSnapshot => {
                self.bindings = topology::build(hw, &mut self.widgets);
                self.state = SessionState::Streaming;
                info!(
                    widgets = self.widgets.len(),
                    bindings = self.bindings.len(),
                    "dashboard created"
                );
                self.bindings.dispatch(hw, &mut self.widgets, now)
            }
            SessionState::Streaming => self.bindings.dispatch(hw, &mut self.widgets, now),
        }
    }

    /// User picked option `index` in the effect selector. Always pushes the
    /// resulting config, whatever state the session is in.
    pub fn select_effect(&mut self, index: usize) -> SyncResult<Vec<Outbound>> {
        let effect = self.selector.select(index)?.to_string();
        let config = match self.config.as_mut() {
            Some(c) => {
                c.effect = effect;
                c.clone()
            }
            None => {
                let c = ClientData::new(effect);
                self.config = Some(c.clone());
                c
            }
        };
        info!(effect = %config.effect, "effect changed");
        Ok(vec![Outbound::SetClientData(config)])
    }

    pub fn cycle_effect(&mut self) -> SyncResult<Vec<Outbound>> {
        self.select_effect(self.selector.next_index())
    }
}
