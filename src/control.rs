//! Message-based control surface: observers (debug panel, loaders, window events) never touch
//! passes directly. They send [`ChainEvent`]s that the viewer drains before each frame.

pub mod panel;

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};

use crate::{
    assets::Texture,
    foundation::{
        core::SurfaceSize,
        error::{ChainError, ChainResult},
    },
};

/// One edit of a pass's enable flag or parameter, addressed by pass id and parameter name.
#[derive(Clone, Debug)]
pub enum ParamUpdate {
    SetEnabled {
        pass: String,
        enabled: bool,
    },
    SetFloat {
        pass: String,
        param: String,
        value: f64,
    },
    SetBool {
        pass: String,
        param: String,
        value: bool,
    },
    SetVec2 {
        pass: String,
        param: String,
        value: [f64; 2],
    },
    SetVec3 {
        pass: String,
        param: String,
        value: [f64; 3],
    },
    SetVec3Component {
        pass: String,
        param: String,
        component: usize,
        value: f64,
    },
    SetTexture {
        pass: String,
        param: String,
        texture: Arc<Texture>,
    },
}

impl ParamUpdate {
    pub fn enabled(pass: impl Into<String>, enabled: bool) -> Self {
        Self::SetEnabled {
            pass: pass.into(),
            enabled,
        }
    }

    pub fn float(pass: impl Into<String>, param: impl Into<String>, value: f64) -> Self {
        Self::SetFloat {
            pass: pass.into(),
            param: param.into(),
            value,
        }
    }

    pub fn vec3_component(
        pass: impl Into<String>,
        param: impl Into<String>,
        component: usize,
        value: f64,
    ) -> Self {
        Self::SetVec3Component {
            pass: pass.into(),
            param: param.into(),
            component,
            value,
        }
    }

    /// Build an update from a JSON value: numbers, booleans and 2/3-element number arrays.
    pub fn from_json(
        pass: impl Into<String>,
        param: impl Into<String>,
        value: &serde_json::Value,
    ) -> ChainResult<Self> {
        let pass = pass.into();
        let param = param.into();
        if let Some(v) = value.as_f64() {
            return Ok(Self::SetFloat { pass, param, value: v });
        }
        if let Some(v) = value.as_bool() {
            return Ok(Self::SetBool { pass, param, value: v });
        }
        let components: Option<Vec<f64>> = value
            .as_array()
            .and_then(|items| items.iter().map(|v| v.as_f64()).collect());
        match components.as_deref() {
            Some(&[x, y]) => Ok(Self::SetVec2 {
                pass,
                param,
                value: [x, y],
            }),
            Some(&[x, y, z]) => Ok(Self::SetVec3 {
                pass,
                param,
                value: [x, y, z],
            }),
            _ => Err(ChainError::validation(format!(
                "unsupported value for '{pass}.{param}': {value}"
            ))),
        }
    }

    /// Id of the pass this update addresses.
    pub fn pass(&self) -> &str {
        match self {
            Self::SetEnabled { pass, .. }
            | Self::SetFloat { pass, .. }
            | Self::SetBool { pass, .. }
            | Self::SetVec2 { pass, .. }
            | Self::SetVec3 { pass, .. }
            | Self::SetVec3Component { pass, .. }
            | Self::SetTexture { pass, .. } => pass,
        }
    }
}

#[derive(Clone, Debug)]
pub enum ChainEvent {
    Update(ParamUpdate),
    /// Logical surface size and device pixel ratio reported by the window.
    Resize(SurfaceSize),
}

/// Cloneable sending side of the viewer's event queue.
#[derive(Clone, Debug)]
pub struct ControlHandle {
    tx: Sender<ChainEvent>,
}

impl ControlHandle {
    pub fn send(&self, event: ChainEvent) -> ChainResult<()> {
        self.tx
            .send(event)
            .map_err(|_| ChainError::render("viewer is no longer receiving events"))
    }

    pub fn update(&self, update: ParamUpdate) -> ChainResult<()> {
        self.send(ChainEvent::Update(update))
    }

    pub fn set_enabled(&self, pass: &str, enabled: bool) -> ChainResult<()> {
        self.update(ParamUpdate::enabled(pass, enabled))
    }

    pub fn set_float(&self, pass: &str, param: &str, value: f64) -> ChainResult<()> {
        self.update(ParamUpdate::float(pass, param, value))
    }

    pub fn resize(&self, size: SurfaceSize) -> ChainResult<()> {
        self.send(ChainEvent::Resize(size))
    }
}

pub fn control_channel() -> (ControlHandle, Receiver<ChainEvent>) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (ControlHandle { tx }, rx)
}

#[cfg(test)]
#[path = "../tests/unit/control/messages.rs"]
mod tests;
