//! Tree rendering for parsed transactions

use colored::{Color, Colorize};
use ptree::{PrintConfig, Style, TreeItem};
use std::borrow::Cow;
use std::io;
use wasm_utxo_tx::parse_node::{Node, Primitive};

/// Buffers longer than this are shortened in the tree view
const MAX_BUFFER_DISPLAY_BYTES: usize = 64;

#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub label: Option<Color>,
    pub number: Option<Color>,
    pub buffer: Option<Color>,
    pub text: Option<Color>,
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme {
            label: Some(Color::Cyan),
            number: Some(Color::Yellow),
            buffer: Some(Color::Green),
            text: Some(Color::White),
        }
    }
}

impl ColorScheme {
    pub fn no_color() -> Self {
        ColorScheme {
            label: None,
            number: None,
            buffer: None,
            text: None,
        }
    }
}

fn paint(s: &str, color: Option<Color>) -> String {
    match color {
        Some(c) => s.color(c).to_string(),
        None => s.to_string(),
    }
}

fn format_value(value: &Primitive, scheme: &ColorScheme) -> Option<String> {
    match value {
        Primitive::None => None,
        Primitive::Buffer(buffer) => {
            let bytes = &buffer.0;
            let text = if bytes.len() > MAX_BUFFER_DISPLAY_BYTES {
                format!(
                    "{}... ({} bytes)",
                    hex::encode(&bytes[..MAX_BUFFER_DISPLAY_BYTES]),
                    bytes.len()
                )
            } else {
                hex::encode(bytes)
            };
            Some(paint(&text, scheme.buffer))
        }
        Primitive::String(s) => Some(paint(s, scheme.text)),
        other => Some(paint(&other.to_string(), scheme.number)),
    }
}

/// One line of the tree: `label: value`, or just `label` for grouping nodes
pub fn format_node_line(node: &Node, scheme: &ColorScheme) -> String {
    let label = paint(&node.label, scheme.label);
    match format_value(&node.value, scheme) {
        Some(value) => format!("{}: {}", label, value),
        None => label,
    }
}

#[derive(Clone)]
struct StyledNode<'a> {
    node: &'a Node,
    scheme: &'a ColorScheme,
}

impl TreeItem for StyledNode<'_> {
    type Child = Self;

    fn write_self<W: io::Write>(&self, f: &mut W, _style: &Style) -> io::Result<()> {
        write!(f, "{}", format_node_line(self.node, self.scheme))
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Owned(
            self.node
                .children
                .iter()
                .map(|node| StyledNode {
                    node,
                    scheme: self.scheme,
                })
                .collect(),
        )
    }
}

pub fn write_tree_with_scheme<W: io::Write>(
    node: &Node,
    scheme: &ColorScheme,
    writer: W,
) -> io::Result<()> {
    let item = StyledNode { node, scheme };
    ptree::write_tree_with(&item, writer, &PrintConfig::default())
}

pub fn render_tree_with_scheme(node: &Node, scheme: &ColorScheme) -> io::Result<()> {
    write_tree_with_scheme(node, scheme, io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        let mut tx = Node::new("tx", Primitive::None);
        tx.add_child(Node::new("version", Primitive::I32(2)));
        let mut inputs = Node::new("inputs", Primitive::U64(1));
        inputs.add_child(Node::new("prev_txid", Primitive::buffer(vec![0xab; 2])));
        tx.add_child(inputs);
        tx
    }

    #[test]
    fn test_format_node_line() {
        let scheme = ColorScheme::no_color();
        assert_eq!(format_node_line(&sample(), &scheme), "tx");
        assert_eq!(
            format_node_line(&Node::new("version", Primitive::I32(2)), &scheme),
            "version: 2"
        );
        let long = Node::new("data", Primitive::buffer(vec![0; 100]));
        assert!(format_node_line(&long, &scheme).ends_with("... (100 bytes)"));
    }

    #[test]
    fn test_write_tree() {
        let mut out = Vec::new();
        write_tree_with_scheme(&sample(), &ColorScheme::no_color(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "tx");
        assert!(lines[1].ends_with("version: 2"));
        assert!(lines[3].ends_with("prev_txid: abab"));
    }
}
