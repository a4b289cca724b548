//! Generated architecture artifacts.
//!
//! One successful generation call yields one [`GeneratedArtifacts`] value: a
//! SQL schema, a list of source files and a small node/link diagram. Field
//! names on the wire are camelCase (`sourceFiles`).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Category of a generated source file.
///
/// `Config` covers security and application configuration classes
/// (e.g. `SecurityConfig.java`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceFileKind {
    /// Persistence entity (`@Entity`)
    #[display("entity")]
    Entity,
    /// REST controller
    #[display("controller")]
    Controller,
    /// Data repository
    #[display("repository")]
    Repository,
    /// Service layer class
    #[display("service")]
    Service,
    /// Security or application configuration
    #[display("config")]
    Config,
}

impl SourceFileKind {
    /// Wire names of every kind, in declaration order.
    pub fn wire_names() -> Vec<&'static str> {
        use strum::IntoEnumIterator;
        Self::iter().map(<&'static str>::from).collect()
    }
}

/// A generated source file.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct SourceFile {
    /// File name, e.g. `User.java`
    name: String,
    /// Full file content
    content: String,
    /// File category
    kind: SourceFileKind,
}

impl SourceFile {
    /// Create a source file record.
    pub fn new(name: impl Into<String>, content: impl Into<String>, kind: SourceFileKind) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            kind,
        }
    }
}

/// A diagram node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiagramNode {
    /// Node identifier referenced by links
    pub id: String,
    /// Display label
    pub label: String,
}

/// A directed diagram edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiagramLink {
    /// Id of the source node
    pub source: String,
    /// Id of the target node
    pub target: String,
}

/// Node/link graph describing the generated architecture.
///
/// Links are expected to reference node ids, but the provider is not trusted
/// to honor that. Dangling links are kept and reported through
/// [`Diagram::dangling_links`].
///
/// # Examples
///
/// ```
/// use cms_architect_core::{Diagram, DiagramLink, DiagramNode};
///
/// let diagram = Diagram {
///     nodes: vec![DiagramNode { id: "users".into(), label: "Users".into() }],
///     links: vec![DiagramLink { source: "users".into(), target: "roles".into() }],
/// };
///
/// assert_eq!(diagram.dangling_links().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Diagram {
    /// Graph nodes
    #[serde(default)]
    pub nodes: Vec<DiagramNode>,
    /// Graph edges
    #[serde(default)]
    pub links: Vec<DiagramLink>,
}

impl Diagram {
    /// Whether the diagram has neither nodes nor links.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    /// Links whose source or target does not name a node.
    pub fn dangling_links(&self) -> Vec<&DiagramLink> {
        let ids: HashSet<&str> = self.nodes.iter().map(|node| node.id.as_str()).collect();
        self.links
            .iter()
            .filter(|link| {
                !ids.contains(link.source.as_str()) || !ids.contains(link.target.as_str())
            })
            .collect()
    }

    /// Label for a node id, falling back to the id itself when unknown.
    pub fn label_for<'a>(&'a self, id: &'a str) -> &'a str {
        self.nodes
            .iter()
            .find(|node| node.id == id)
            .map(|node| node.label.as_str())
            .unwrap_or(id)
    }
}

/// Result of one successful generation call.
///
/// The default value is the empty artifact set, which every view renders as
/// "nothing generated yet".
///
/// # Examples
///
/// ```
/// use cms_architect_core::GeneratedArtifacts;
///
/// let empty = GeneratedArtifacts::default();
/// assert!(empty.is_empty());
///
/// let json = serde_json::to_value(&empty).unwrap();
/// assert!(json.get("sourceFiles").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedArtifacts {
    /// Data-definition script
    #[serde(default)]
    pub schema: String,
    /// Source files in display order
    #[serde(default)]
    pub source_files: Vec<SourceFile>,
    /// Architecture diagram
    #[serde(default)]
    pub diagram: Diagram,
}

impl GeneratedArtifacts {
    /// Whether nothing has been generated.
    pub fn is_empty(&self) -> bool {
        self.schema.trim().is_empty() && self.source_files.is_empty() && self.diagram.is_empty()
    }

    /// Files of the given kind, in display order.
    pub fn files_of_kind(&self, kind: SourceFileKind) -> impl Iterator<Item = &SourceFile> {
        self.source_files
            .iter()
            .filter(move |file| *file.kind() == kind)
    }
}
