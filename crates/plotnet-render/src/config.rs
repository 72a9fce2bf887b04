//! Render configuration: the defaults every unset element attribute falls back to.

use crate::Result;
use crate::attrs::LabelPosition;
use crate::color::Color;
use crate::normalize::DegenerateAxis;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphDefaults {
    pub width: f64,
    pub height: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
}

impl Default for GraphDefaults {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 450.0,
            bottom: 0.0,
            left: 0.0,
            right: 0.0,
            top: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeDefaults {
    pub size: f64,
    pub color: Color,
    pub label_position: LabelPosition,
}

impl Default for NodeDefaults {
    fn default() -> Self {
        Self {
            size: 20.0,
            color: Color::WHITE,
            label_position: LabelPosition::MiddleCenter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeDefaults {
    pub width: f64,
    pub color: Color,
    pub label_fraction: f64,
    pub label_distance: f64,
    pub label_flip: bool,
}

impl Default for EdgeDefaults {
    fn default() -> Self {
        Self {
            width: 1.0,
            color: Color::BLACK,
            label_fraction: 0.5,
            label_distance: 10.0,
            label_flip: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub graph: GraphDefaults,
    pub node: NodeDefaults,
    pub edge: EdgeDefaults,
    pub degenerate_axis: DegenerateAxis,
    /// Shows the backend's mode bar on single (non-animated) figures.
    pub toolbar: bool,
}

impl RenderConfig {
    /// Builds a config from a (possibly partial) JSON object layered over the defaults.
    pub fn from_value(value: &Value) -> Result<Self> {
        let mut base = serde_json::to_value(Self::default())?;
        deep_merge_value(&mut base, value);
        Ok(serde_json::from_value(base)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
