//! Structure descriptors: the declarative description of a file tree.
//!
//! A descriptor is a YAML mapping where each key is a path segment and each
//! value is one of:
//! - a nested mapping, describing a subdirectory,
//! - `null` (or no value at all), describing an empty directory,
//! - a string, naming the template that produces the file's content.
//!
//! ```yaml
//! src:
//!   main.py: main.py.j2
//! tests:
//! README.md: readme.md.j2
//! ```

use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use indexmap::IndexMap;
use log::debug;
use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use std::fmt;
use std::path::{Component, Path};

/// One entry of a structure descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Directory with nested entries
    Directory(Structure),
    /// Directory without content
    Empty,
    /// File rendered from the named template
    Template(String),
}

/// Ordered mapping of path segments to nodes. Iteration follows document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure(IndexMap<String, Node>);

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<S: Into<String>>(&mut self, name: S, node: Node) -> Option<Node> {
        self.0.insert(name.into(), node)
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.0.get(name)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Node> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses a descriptor from YAML text. An empty document is an empty descriptor.
    ///
    /// Entry names are taken verbatim from the keys as written, so `1.10:` names
    /// `1.10` rather than the number it would resolve to.
    ///
    /// # Errors
    /// * `Error::StructureError` for sequences, booleans, numbers, duplicate names
    ///   and entry names that are absolute or climb out of their parent
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let blank = content
            .lines()
            .map(str::trim)
            .all(|line| line.is_empty() || line.starts_with('#') || line == "---");
        if blank {
            return Ok(Self::new());
        }
        match serde_yaml::from_str(content)? {
            RawNode::Null => Ok(Self::new()),
            RawNode::Mapping(entries) => build_structure(entries, None),
            other => Err(Error::StructureError {
                path: "<root>".to_string(),
                reason: format!("expected a mapping, found {}", other.kind()),
            }),
        }
    }

    /// Renders the descriptor file as a template against `context` and parses
    /// the rendered text.
    ///
    /// # Arguments
    /// * `path` - Descriptor template file
    /// * `renderer` - Renderer used for the descriptor itself
    /// * `context` - Full rendering context
    pub fn load<P: AsRef<Path>>(
        path: P,
        renderer: &dyn TemplateRenderer,
        context: &serde_json::Value,
    ) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading structure from {}", path.display());
        let template = std::fs::read_to_string(path)?;
        let rendered = renderer.render(&template, context)?;
        Self::from_yaml_str(&rendered)
    }
}

impl<S: Into<String>> FromIterator<(S, Node)> for Structure {
    fn from_iter<I: IntoIterator<Item = (S, Node)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<'a> IntoIterator for &'a Structure {
    type Item = (&'a String, &'a Node);
    type IntoIter = indexmap::map::Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// YAML node as written in the descriptor, before validation.
enum RawNode {
    Mapping(Vec<(String, RawNode)>),
    Null,
    Scalar(String),
    Unsupported(&'static str),
}

impl RawNode {
    fn kind(&self) -> &'static str {
        match self {
            RawNode::Mapping(_) => "a mapping",
            RawNode::Null => "null",
            RawNode::Scalar(_) => "a string",
            RawNode::Unsupported(kind) => kind,
        }
    }
}

impl<'de> Deserialize<'de> for RawNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(RawNodeVisitor)
    }
}

struct RawNodeVisitor;

impl<'de> Visitor<'de> for RawNodeVisitor {
    type Value = RawNode;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a mapping, null or a template name")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<RawNode, E> {
        Ok(RawNode::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<RawNode, E> {
        Ok(RawNode::Null)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<RawNode, E> {
        Ok(RawNode::Scalar(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> std::result::Result<RawNode, E> {
        Ok(RawNode::Scalar(value))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> std::result::Result<RawNode, E> {
        Ok(RawNode::Unsupported("a boolean"))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> std::result::Result<RawNode, E> {
        Ok(RawNode::Unsupported("a number"))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> std::result::Result<RawNode, E> {
        Ok(RawNode::Unsupported("a number"))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> std::result::Result<RawNode, E> {
        Ok(RawNode::Unsupported("a number"))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<RawNode, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(RawNode::Unsupported("a sequence"))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<RawNode, A::Error> {
        let mut entries = Vec::new();
        // Keys are read as strings so the scalar text is kept as written.
        while let Some(name) = map.next_key::<String>()? {
            entries.push((name, map.next_value::<RawNode>()?));
        }
        Ok(RawNode::Mapping(entries))
    }
}

fn build_structure(entries: Vec<(String, RawNode)>, parent: Option<&str>) -> Result<Structure> {
    let mut structure = Structure::new();
    for (name, raw) in entries {
        let path = match parent {
            Some(parent) => format!("{parent}/{name}"),
            None => name.clone(),
        };
        validate_segment(&name, &path)?;
        if structure.get(&name).is_some() {
            return Err(Error::StructureError {
                path,
                reason: "duplicate entry name".to_string(),
            });
        }
        let node = match raw {
            RawNode::Null => Node::Empty,
            RawNode::Scalar(template) => Node::Template(template),
            RawNode::Mapping(children) => {
                Node::Directory(build_structure(children, Some(path.as_str()))?)
            }
            RawNode::Unsupported(kind) => {
                return Err(Error::StructureError {
                    path,
                    reason: format!("expected a mapping, null or a template name, found {kind}"),
                })
            }
        };
        structure.insert(name, node);
    }
    Ok(structure)
}

/// Names may span several components (`dev/algo/app`, typically produced by the
/// `toFolder` filter) but must stay below their parent.
fn validate_segment(name: &str, path: &str) -> Result<()> {
    let segment = Path::new(name);
    let reason = if name.trim().is_empty() {
        "empty entry name"
    } else if segment.has_root() || segment.is_absolute() {
        "absolute paths are not allowed"
    } else if segment.components().any(|c| matches!(c, Component::ParentDir)) {
        "parent directory components are not allowed"
    } else {
        return Ok(());
    };
    Err(Error::StructureError {
        path: path.to_string(),
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nodes() {
        let structure = Structure::from_yaml_str(
            "src:\n  main.py: main.tpl\ntests:\nempty: ~\nREADME.md: readme.tpl\n",
        )
        .unwrap();

        let names: Vec<&str> = structure.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["src", "tests", "empty", "README.md"]);

        let src = Structure::from_iter([("main.py", Node::Template("main.tpl".into()))]);
        assert_eq!(structure.get("src"), Some(&Node::Directory(src)));
        assert_eq!(structure.get("tests"), Some(&Node::Empty));
        assert_eq!(structure.get("empty"), Some(&Node::Empty));
        assert_eq!(structure.get("README.md"), Some(&Node::Template("readme.tpl".into())));
    }

    #[test]
    fn test_empty_document() {
        assert!(Structure::from_yaml_str("").unwrap().is_empty());
        assert!(Structure::from_yaml_str("# nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn test_numeric_names() {
        let structure = Structure::from_yaml_str("2024:\n  01: notes.tpl\n").unwrap();
        match structure.get("2024") {
            Some(Node::Directory(children)) => {
                assert_eq!(children.get("01"), Some(&Node::Template("notes.tpl".into())))
            }
            other => panic!("Expected directory, got {other:?}"),
        }

        let structure = Structure::from_yaml_str("1.10: a.tpl\n010: b.tpl\n0x1F: c.tpl\n").unwrap();
        let names: Vec<&str> = structure.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["1.10", "010", "0x1F"]);
    }

    #[test]
    fn test_duplicate_names() {
        let err = Structure::from_yaml_str("\"1.10\": a.tpl\n1.10: b.tpl\n").unwrap_err();
        match err {
            Error::StructureError { path, reason } => {
                assert_eq!(path, "1.10");
                assert_eq!(reason, "duplicate entry name");
            }
            other => panic!("Expected StructureError, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_invalid_entries() {
        let err = Structure::from_yaml_str("src:\n  lib: [a, b]\n").unwrap_err();
        match err {
            Error::StructureError { path, .. } => assert_eq!(path, "src/lib"),
            other => panic!("Expected StructureError, got {other:?}"),
        }

        assert!(Structure::from_yaml_str("flag: true\n").is_err());
        assert!(Structure::from_yaml_str("\"..\": x.tpl\n").is_err());
        assert!(Structure::from_yaml_str("\"a/../../b\": x.tpl\n").is_err());
        assert!(Structure::from_yaml_str("/etc/passwd: x.tpl\n").is_err());
        assert!(Structure::from_yaml_str("\"\": x.tpl\n").is_err());
        assert!(Structure::from_yaml_str("- a\n- b\n").is_err());
    }

    #[test]
    fn test_multi_component_names() {
        let structure =
            Structure::from_yaml_str("java:\n  dev/algo/app:\n    App.java: app.tpl\n").unwrap();
        match structure.get("java") {
            Some(Node::Directory(java)) => assert!(java.get("dev/algo/app").is_some()),
            other => panic!("Expected directory, got {other:?}"),
        }
    }
}
