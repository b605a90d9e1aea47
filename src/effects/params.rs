use std::sync::Arc;

use crate::{
    assets::Texture,
    foundation::error::{ChainError, ChainResult},
};

/// Inclusive numeric bounds used to clamp edits and to build UI sliders.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }
}

/// Current value of one pass parameter.
#[derive(Clone, Debug)]
pub enum ParamValue {
    Float(f64),
    Bool(bool),
    Vec2([f64; 2]),
    Vec3([f64; 3]),
    Texture(Option<Arc<Texture>>),
}

impl ParamValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Vec2(_) => "vec2",
            Self::Vec3(_) => "vec3",
            Self::Texture(_) => "texture",
        }
    }

    /// A serializable view of the value (textures are reported by their dimensions).
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Float(v) => serde_json::json!(v),
            Self::Bool(v) => serde_json::json!(v),
            Self::Vec2(v) => serde_json::json!(v),
            Self::Vec3(v) => serde_json::json!(v),
            Self::Texture(None) => serde_json::Value::Null,
            Self::Texture(Some(t)) => serde_json::json!({
                "width": t.width(),
                "height": t.height(),
            }),
        }
    }
}

/// A named parameter. `labels` optionally names the components of a vector (e.g. the
/// Red/Green/Blue sliders of a tint).
#[derive(Clone, Debug)]
pub struct ParamSpec {
    pub name: &'static str,
    pub value: ParamValue,
    pub range: Option<ParamRange>,
    pub labels: &'static [&'static str],
    /// Written by the frame clock, not by the control panel.
    pub clock_driven: bool,
}

impl ParamSpec {
    pub fn float(name: &'static str, value: f64, range: Option<ParamRange>) -> Self {
        Self {
            name,
            value: ParamValue::Float(value),
            range,
            labels: &[],
            clock_driven: false,
        }
    }

    pub fn boolean(name: &'static str, value: bool) -> Self {
        Self {
            name,
            value: ParamValue::Bool(value),
            range: None,
            labels: &[],
            clock_driven: false,
        }
    }

    pub fn vec2(name: &'static str, value: [f64; 2], range: Option<ParamRange>) -> Self {
        Self {
            name,
            value: ParamValue::Vec2(value),
            range,
            labels: &[],
            clock_driven: false,
        }
    }

    pub fn vec3(name: &'static str, value: [f64; 3], range: Option<ParamRange>) -> Self {
        Self {
            name,
            value: ParamValue::Vec3(value),
            range,
            labels: &[],
            clock_driven: false,
        }
    }

    pub fn texture(name: &'static str) -> Self {
        Self {
            name,
            value: ParamValue::Texture(None),
            range: None,
            labels: &[],
            clock_driven: false,
        }
    }

    pub fn with_labels(mut self, labels: &'static [&'static str]) -> Self {
        self.labels = labels;
        self
    }

    pub fn clock_driven(mut self) -> Self {
        self.clock_driven = true;
        self
    }
}

/// Ordered set of named parameters owned by one pass.
#[derive(Clone, Debug, Default)]
pub struct ParamSet {
    specs: Vec<ParamSpec>,
}

impl ParamSet {
    pub fn new(specs: Vec<ParamSpec>) -> Self {
        Self { specs }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParamSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn spec(&self, name: &str) -> Option<&ParamSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    fn spec_mut(&mut self, name: &str) -> ChainResult<&mut ParamSpec> {
        self.specs
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| ChainError::validation(format!("unknown parameter '{name}'")))
    }

    pub fn float(&self, name: &str) -> f64 {
        match self.spec(name).map(|s| &s.value) {
            Some(ParamValue::Float(v)) => *v,
            _ => 0.0,
        }
    }

    pub fn boolean(&self, name: &str) -> bool {
        matches!(self.spec(name).map(|s| &s.value), Some(ParamValue::Bool(true)))
    }

    pub fn vec2(&self, name: &str) -> [f64; 2] {
        match self.spec(name).map(|s| &s.value) {
            Some(ParamValue::Vec2(v)) => *v,
            _ => [0.0; 2],
        }
    }

    pub fn vec3(&self, name: &str) -> [f64; 3] {
        match self.spec(name).map(|s| &s.value) {
            Some(ParamValue::Vec3(v)) => *v,
            _ => [0.0; 3],
        }
    }

    pub fn texture(&self, name: &str) -> Option<Arc<Texture>> {
        match self.spec(name).map(|s| &s.value) {
            Some(ParamValue::Texture(t)) => t.clone(),
            _ => None,
        }
    }

    /// Set a float, clamped to its range. Returns the stored value.
    pub fn set_float(&mut self, name: &str, value: f64) -> ChainResult<f64> {
        check_finite(name, value)?;
        let spec = self.spec_mut(name)?;
        let v = spec.range.map_or(value, |r| r.clamp(value));
        match &mut spec.value {
            ParamValue::Float(slot) => {
                *slot = v;
                Ok(v)
            }
            other => Err(type_mismatch(name, "float", other)),
        }
    }

    pub fn set_bool(&mut self, name: &str, value: bool) -> ChainResult<()> {
        let spec = self.spec_mut(name)?;
        match &mut spec.value {
            ParamValue::Bool(slot) => {
                *slot = value;
                Ok(())
            }
            other => Err(type_mismatch(name, "bool", other)),
        }
    }

    pub fn set_vec2(&mut self, name: &str, value: [f64; 2]) -> ChainResult<[f64; 2]> {
        for v in value {
            check_finite(name, v)?;
        }
        let spec = self.spec_mut(name)?;
        let range = spec.range;
        let v = value.map(|c| range.map_or(c, |r| r.clamp(c)));
        match &mut spec.value {
            ParamValue::Vec2(slot) => {
                *slot = v;
                Ok(v)
            }
            other => Err(type_mismatch(name, "vec2", other)),
        }
    }

    pub fn set_vec3(&mut self, name: &str, value: [f64; 3]) -> ChainResult<[f64; 3]> {
        for v in value {
            check_finite(name, v)?;
        }
        let spec = self.spec_mut(name)?;
        let range = spec.range;
        let v = value.map(|c| range.map_or(c, |r| r.clamp(c)));
        match &mut spec.value {
            ParamValue::Vec3(slot) => {
                *slot = v;
                Ok(v)
            }
            other => Err(type_mismatch(name, "vec3", other)),
        }
    }

    /// Set one component (0..3) of a vec3 parameter, clamped to its range.
    pub fn set_vec3_component(
        &mut self,
        name: &str,
        component: usize,
        value: f64,
    ) -> ChainResult<f64> {
        if component > 2 {
            return Err(ChainError::validation(format!(
                "vec3 component index {component} out of range for '{name}'"
            )));
        }
        let mut v = self.vec3(name);
        v[component] = value;
        let stored = self.set_vec3(name, v)?;
        Ok(stored[component])
    }

    pub fn set_texture(&mut self, name: &str, texture: Arc<Texture>) -> ChainResult<()> {
        let spec = self.spec_mut(name)?;
        match &mut spec.value {
            ParamValue::Texture(slot) => {
                *slot = Some(texture);
                Ok(())
            }
            other => Err(type_mismatch(name, "texture", other)),
        }
    }
}

fn check_finite(name: &str, v: f64) -> ChainResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ChainError::validation(format!(
            "parameter '{name}' must be finite"
        )))
    }
}

fn type_mismatch(name: &str, wanted: &str, got: &ParamValue) -> ChainError {
    ChainError::validation(format!(
        "parameter '{name}' is a {}, not a {wanted}",
        got.type_name()
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/params.rs"]
mod tests;
