//! Public data models for generated maps, layers, nodes, and node properties.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// Tolerance for comparing `Double` properties.
pub const DOUBLE_EPSILON: f64 = 1e-15;
/// Tolerance for comparing `Float` properties.
pub const FLOAT_EPSILON: f32 = 1e-7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Combat,
    Elite,
    Event,
    Treasure,
    Shop,
    Rest,
    Boss,
}

impl NodeType {
    fn code(self) -> u8 {
        match self {
            Self::Combat => 0,
            Self::Elite => 1,
            Self::Event => 2,
            Self::Treasure => 3,
            Self::Shop => 4,
            Self::Rest => 5,
            Self::Boss => 6,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum PropertyValue {
    Int(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Text(String),
}

impl PropertyValue {
    /// Exact for integer, bool and text values; floating-point variants match
    /// within [`FLOAT_EPSILON`] / [`DOUBLE_EPSILON`]. Mismatched variants never
    /// compare equal.
    pub fn approx_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Double(a), Self::Double(b)) => (a - b).abs() <= DOUBLE_EPSILON,
            (Self::Float(a), Self::Float(b)) => (a - b).abs() <= FLOAT_EPSILON,
            _ => self == other,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(f64::from(*value)),
            Self::Double(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub node_type: NodeType,
    pub layer_index: usize,
    pub path_index: usize,
    pub node_index: usize,
    pub properties: BTreeMap<String, PropertyValue>,
}

impl Node {
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn approx_eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.node_type == other.node_type
            && self.layer_index == other.layer_index
            && self.path_index == other.path_index
            && self.node_index == other.node_index
            && self.properties.len() == other.properties.len()
            && self.properties.iter().all(|(key, value)| {
                other.properties.get(key).is_some_and(|theirs| value.approx_eq(theirs))
            })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub layer_index: usize,
    pub boss: String,
    pub location: String,
    pub nodes: Vec<Node>,
}

impl Layer {
    pub fn path_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.node_type != NodeType::Boss)
            .map(|node| node.path_index + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn boss_node(&self) -> Option<&Node> {
        self.nodes.iter().find(|node| node.node_type == NodeType::Boss)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Map {
    pub seed: String,
    pub layers: Vec<Layer>,
}

impl Map {
    pub fn node_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.nodes.len()).sum()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.layers.iter().flat_map(|layer| layer.nodes.iter())
    }

    /// Deep comparison using [`PropertyValue::approx_eq`] for node properties.
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.seed == other.seed
            && self.layers.len() == other.layers.len()
            && self.layers.iter().zip(&other.layers).all(|(mine, theirs)| {
                mine.layer_index == theirs.layer_index
                    && mine.boss == theirs.boss
                    && mine.location == theirs.location
                    && mine.nodes.len() == theirs.nodes.len()
                    && mine.nodes.iter().zip(&theirs.nodes).all(|(a, b)| a.approx_eq(b))
            })
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        write_str(&mut bytes, &self.seed);
        bytes.extend((self.layers.len() as u32).to_le_bytes());
        for layer in &self.layers {
            bytes.extend((layer.layer_index as u32).to_le_bytes());
            write_str(&mut bytes, &layer.boss);
            write_str(&mut bytes, &layer.location);
            bytes.extend((layer.nodes.len() as u32).to_le_bytes());
            for node in &layer.nodes {
                write_str(&mut bytes, &node.id);
                bytes.push(node.node_type.code());
                bytes.extend((node.layer_index as u32).to_le_bytes());
                bytes.extend((node.path_index as u32).to_le_bytes());
                bytes.extend((node.node_index as u32).to_le_bytes());
                bytes.extend((node.properties.len() as u32).to_le_bytes());
                for (key, value) in &node.properties {
                    write_str(&mut bytes, key);
                    write_property(&mut bytes, value);
                }
            }
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn write_str(bytes: &mut Vec<u8>, value: &str) {
    bytes.extend((value.len() as u32).to_le_bytes());
    bytes.extend(value.as_bytes());
}

fn write_property(bytes: &mut Vec<u8>, value: &PropertyValue) {
    match value {
        PropertyValue::Int(value) => {
            bytes.push(0);
            bytes.extend(value.to_le_bytes());
        }
        PropertyValue::Float(value) => {
            bytes.push(1);
            bytes.extend(value.to_bits().to_le_bytes());
        }
        PropertyValue::Double(value) => {
            bytes.push(2);
            bytes.extend(value.to_bits().to_le_bytes());
        }
        PropertyValue::Bool(value) => {
            bytes.push(3);
            bytes.push(u8::from(*value));
        }
        PropertyValue::Text(value) => {
            bytes.push(4);
            write_str(bytes, value);
        }
    }
}
