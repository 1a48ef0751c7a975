//! Wire format for reference graphs.
//!
//! A graph is a JSON array in discovery order, root first:
//!
//! ```json
//! [{"name":"Nat.add_comm","constType":"Theorem","references":["Nat.add","Eq"]}]
//! ```
//!
//! `references` may name nodes missing from the array. Those are frontier
//! stubs left by the round cap.

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;

use crate::error::{RefGraphError, Result};
use crate::graph::{ConstantKind, GraphModel, NodeRecord};
use crate::name::Name;

/// One element of the serialized array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WireNode {
    pub name: Name,
    pub const_type: ConstantKind,
    pub references: Vec<Name>,
}

impl From<&NodeRecord> for WireNode {
    fn from(record: &NodeRecord) -> Self {
        Self {
            name: record.name.clone(),
            const_type: record.kind,
            references: record.references.clone(),
        }
    }
}

/// Borrowed counterpart of [`WireNode`] so encoding never clones the graph.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireNodeRef<'a> {
    name: &'a Name,
    const_type: ConstantKind,
    references: &'a [Name],
}

struct WireGraph<'a>(&'a GraphModel);

impl Serialize for WireGraph<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for record in self.0.nodes() {
            seq.serialize_element(&WireNodeRef {
                name: &record.name,
                const_type: record.kind,
                references: &record.references,
            })?;
        }
        seq.end()
    }
}

/// Encode a graph as compact JSON.
///
/// Deterministic: the same graph always yields the same bytes.
pub fn serialize(graph: &GraphModel) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&WireGraph(graph))?)
}

/// Encode a graph as indented JSON.
pub fn serialize_pretty(graph: &GraphModel) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(&WireGraph(graph))?)
}

/// Decode a serialized graph. Each name may appear as a node only once.
pub fn deserialize(bytes: &[u8]) -> Result<Vec<WireNode>> {
    let nodes: Vec<WireNode> = serde_json::from_slice(bytes)?;
    let mut seen = HashSet::with_capacity(nodes.len());
    for node in &nodes {
        if !seen.insert(&node.name) {
            return Err(RefGraphError::DuplicateNode {
                name: node.name.clone(),
            });
        }
    }
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> Name {
        Name::parse(s).unwrap()
    }

    fn sample() -> GraphModel {
        let mut graph = GraphModel::new();
        graph.insert(NodeRecord::new(
            name("Nat.add_comm"),
            ConstantKind::Theorem,
            vec![name("Nat.add"), name("Eq")],
        ));
        graph.insert(NodeRecord::new(
            name("Nat.add"),
            ConstantKind::Definition,
            vec![],
        ));
        graph
    }

    #[test]
    fn test_exact_wire_shape() {
        let bytes = serialize(&sample()).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"[{"name":"Nat.add_comm","constType":"Theorem","references":["Nat.add","Eq"]},{"name":"Nat.add","constType":"Definition","references":[]}]"#
        );
    }

    #[test]
    fn test_empty_graph_is_empty_array() {
        assert_eq!(serialize(&GraphModel::new()).unwrap(), b"[]");
    }

    #[test]
    fn test_escaped_names_on_wire() {
        let mut graph = GraphModel::new();
        graph.insert(NodeRecord::new(
            Name::atom("Foo").child("a.b").child_num(3),
            ConstantKind::Other,
            vec![],
        ));
        let text = String::from_utf8(serialize(&graph).unwrap()).unwrap();
        assert!(text.contains(r#""name":"Foo.«a.b».3""#), "{text}");
    }

    #[test]
    fn test_pretty_decodes_to_same_nodes() {
        let graph = sample();
        let compact = deserialize(&serialize(&graph).unwrap()).unwrap();
        let pretty = deserialize(&serialize_pretty(&graph).unwrap()).unwrap();
        assert_eq!(compact, pretty);
        assert_eq!(compact[0].const_type, ConstantKind::Theorem);
        assert_eq!(compact[0].references, vec![name("Nat.add"), name("Eq")]);
    }

    #[test]
    fn test_deserialize_rejects_duplicate_node() {
        let err = deserialize(
            br#"[{"name":"a","constType":"Theorem","references":["b"]},
                 {"name":"b","constType":"Axiom","references":[]},
                 {"name":"a","constType":"Definition","references":["c"]}]"#,
        )
        .unwrap_err();
        assert!(
            matches!(&err, RefGraphError::DuplicateNode { name } if name.to_string() == "a"),
            "{err}"
        );
    }

    #[test]
    fn test_deserialize_rejects_unknown_kind() {
        let err = deserialize(br#"[{"name":"a","constType":"Lemma","references":[]}]"#)
            .unwrap_err();
        assert!(matches!(err, RefGraphError::Serialization(_)));
    }
}
