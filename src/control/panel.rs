use std::sync::Arc;

use crate::{
    assets::Texture,
    control::ParamUpdate,
    foundation::error::{ChainError, ChainResult},
    render::chain::{ChainSnapshot, ParamSnapshot, PassSnapshot},
};

/// Widget shape of one control.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum ControlKind {
    Toggle { value: bool },
    Slider { min: f64, max: f64, step: f64, value: f64 },
    ImagePicker { loaded: bool },
}

/// One control bound to a pass's enable flag (`param == None`) or to a parameter.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ControlSpec {
    pub label: String,
    pub pass: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<usize>,
    #[serde(flatten)]
    pub kind: ControlKind,
}

/// A value produced by a widget.
#[derive(Clone, Debug)]
pub enum ControlInput {
    Toggle(bool),
    Number(f64),
    Image(Arc<Texture>),
}

impl ControlInput {
    fn kind_name(&self) -> &'static str {
        match self {
            Self::Toggle(_) => "toggle",
            Self::Number(_) => "number",
            Self::Image(_) => "image",
        }
    }
}

impl ControlSpec {
    /// Translate widget input into the message the chain understands.
    pub fn update(&self, input: ControlInput) -> ChainResult<ParamUpdate> {
        let pass = self.pass.clone();
        match (&self.kind, &self.param, input) {
            (ControlKind::Toggle { .. }, None, ControlInput::Toggle(enabled)) => {
                Ok(ParamUpdate::SetEnabled { pass, enabled })
            }
            (ControlKind::Toggle { .. }, Some(param), ControlInput::Toggle(value)) => {
                Ok(ParamUpdate::SetBool {
                    pass,
                    param: param.clone(),
                    value,
                })
            }
            (ControlKind::Slider { .. }, Some(param), ControlInput::Number(value)) => {
                Ok(match self.component {
                    Some(component) => ParamUpdate::SetVec3Component {
                        pass,
                        param: param.clone(),
                        component,
                        value,
                    },
                    None => ParamUpdate::SetFloat {
                        pass,
                        param: param.clone(),
                        value,
                    },
                })
            }
            (ControlKind::ImagePicker { .. }, Some(param), ControlInput::Image(texture)) => {
                Ok(ParamUpdate::SetTexture {
                    pass,
                    param: param.clone(),
                    texture,
                })
            }
            (_, _, input) => Err(ChainError::validation(format!(
                "control '{}' does not accept {} input",
                self.label,
                input.kind_name()
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PanelFolder {
    pub title: String,
    pub controls: Vec<ControlSpec>,
}

/// Debug-panel layout: one folder per toggle-able pass, holding its enable toggle followed by
/// its user-editable parameters. Clock-driven and unranged numeric parameters are not exposed.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ControlPanel {
    pub folders: Vec<PanelFolder>,
}

impl ControlPanel {
    pub fn from_snapshot(snapshot: &ChainSnapshot) -> Self {
        let folders = snapshot
            .passes
            .iter()
            .filter(|p| p.toggleable)
            .map(folder_for)
            .collect();
        Self { folders }
    }

    pub fn folder(&self, title: &str) -> Option<&PanelFolder> {
        self.folders.iter().find(|f| f.title == title)
    }

    /// Look up a control by folder title and control label.
    pub fn control(&self, folder: &str, label: &str) -> Option<&ControlSpec> {
        self.folder(folder)?.controls.iter().find(|c| c.label == label)
    }

    pub fn to_json_pretty(&self) -> ChainResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ChainError::serde(e.to_string()))
    }
}

fn folder_for(pass: &PassSnapshot) -> PanelFolder {
    let mut controls = vec![ControlSpec {
        label: pass.label.clone(),
        pass: pass.id.clone(),
        param: None,
        component: None,
        kind: ControlKind::Toggle {
            value: pass.enabled,
        },
    }];
    for param in pass.params.iter().filter(|p| !p.clock_driven) {
        controls.extend(param_controls(&pass.id, param));
    }
    PanelFolder {
        title: pass.label.clone(),
        controls,
    }
}

fn param_controls(pass: &str, param: &ParamSnapshot) -> Vec<ControlSpec> {
    let control = |label: String, component: Option<usize>, kind: ControlKind| ControlSpec {
        label,
        pass: pass.to_string(),
        param: Some(param.name.clone()),
        component,
        kind,
    };

    match (param.type_name.as_str(), param.range) {
        ("bool", _) => vec![control(
            param.name.clone(),
            None,
            ControlKind::Toggle {
                value: param.value.as_bool().unwrap_or(false),
            },
        )],
        ("texture", _) => vec![control(
            param.name.clone(),
            None,
            ControlKind::ImagePicker {
                loaded: !param.value.is_null(),
            },
        )],
        ("float", Some(r)) => vec![control(
            param.name.clone(),
            None,
            ControlKind::Slider {
                min: r.min,
                max: r.max,
                step: r.step,
                value: param.value.as_f64().unwrap_or(r.min),
            },
        )],
        ("vec3", Some(r)) => (0..3)
            .map(|i| {
                let label = param
                    .labels
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("{}[{i}]", param.name));
                control(
                    label,
                    Some(i),
                    ControlKind::Slider {
                        min: r.min,
                        max: r.max,
                        step: r.step,
                        value: param.value[i].as_f64().unwrap_or(r.min),
                    },
                )
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/control/panel.rs"]
mod tests;
