use core::fmt;

use serde::{Serialize, Serializer};

/// Raw bytes, serialized as a lowercase hex string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer(pub Vec<u8>);

impl Serialize for Buffer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(&self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Primitive {
    None,
    Boolean(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I32(i32),
    I64(i64),
    String(String),
    Buffer(Buffer),
}

impl Primitive {
    pub fn buffer(bytes: impl Into<Vec<u8>>) -> Primitive {
        Primitive::Buffer(Buffer(bytes.into()))
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::None => Ok(()),
            Primitive::Boolean(v) => write!(f, "{}", v),
            Primitive::U8(v) => write!(f, "{}", v),
            Primitive::U16(v) => write!(f, "{}", v),
            Primitive::U32(v) => write!(f, "{}", v),
            Primitive::U64(v) => write!(f, "{}", v),
            Primitive::I32(v) => write!(f, "{}", v),
            Primitive::I64(v) => write!(f, "{}", v),
            Primitive::String(v) => write!(f, "{}", v),
            Primitive::Buffer(Buffer(bytes)) => write!(f, "{}", hex::encode(bytes)),
        }
    }
}

/// Labelled tree used to display a decoded transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub label: String,
    pub value: Primitive,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(label: impl Into<String>, value: Primitive) -> Node {
        Node {
            label: label.into(),
            value,
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn with_child(mut self, child: Node) -> Node {
        self.add_child(child);
        self
    }

    /// First direct child with the given label
    pub fn child(&self, label: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.label == label)
    }
}
