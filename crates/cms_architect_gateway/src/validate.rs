//! Shape validation for generated artifacts.
//!
//! The provider's JSON is walked field by field instead of being handed to a
//! derived deserializer, so that a violation is reported with the exact path
//! of the offending value. Absent or null containers default to empty.

use crate::strip_json_fence;
use cms_architect_core::{
    Diagram, DiagramLink, DiagramNode, GeneratedArtifacts, SourceFile, SourceFileKind,
};
use cms_architect_error::{ProviderError, ProviderErrorKind, ProviderResult};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

/// Parses provider text into artifacts.
///
/// Text that is not JSON as given is retried with its "```json" fence
/// stripped. Blank text is
/// [`ProviderErrorKind::EmptyResponse`], text that is not JSON is
/// [`ProviderErrorKind::Malformed`], and JSON of the wrong shape is
/// [`ProviderErrorKind::Shape`].
///
/// # Examples
///
/// ```
/// use cms_architect_gateway::parse_artifacts;
///
/// let artifacts = parse_artifacts(r#"{"schema": "CREATE TABLE users (id INT);"}"#).unwrap();
/// assert!(artifacts.source_files.is_empty());
/// assert!(artifacts.diagram.is_empty());
///
/// assert!(parse_artifacts(r#"{"schema": 42}"#).is_err());
/// ```
#[instrument(skip(text), fields(text_len = text.len()))]
pub fn parse_artifacts(text: &str) -> ProviderResult<GeneratedArtifacts> {
    let raw = text.trim();
    if raw.is_empty() {
        return Err(ProviderError::new(ProviderErrorKind::EmptyResponse));
    }

    // Fences inside string values are content; only unwrap when the raw text is not JSON.
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(raw_err) => {
            let payload = strip_json_fence(raw);
            if payload.is_empty() {
                return Err(ProviderError::new(ProviderErrorKind::EmptyResponse));
            }
            if payload.len() == raw.len() {
                return Err(ProviderError::new(ProviderErrorKind::Malformed(
                    raw_err.to_string(),
                )));
            }
            debug!("Stripped markdown fence from provider response");
            serde_json::from_str(payload)
                .map_err(|e| ProviderError::new(ProviderErrorKind::Malformed(e.to_string())))?
        }
    };
    artifacts_from_value(&value)
}

/// Builds artifacts from an already-parsed JSON value.
pub fn artifacts_from_value(value: &Value) -> ProviderResult<GeneratedArtifacts> {
    let root = value
        .as_object()
        .ok_or_else(|| ProviderError::shape("$", "object"))?;

    let schema = optional_string(root, "schema", "schema")?.unwrap_or_default();

    let source_files = optional_array(root, "sourceFiles", "sourceFiles")?
        .iter()
        .enumerate()
        .map(|(index, file)| source_file(file, &format!("sourceFiles[{}]", index)))
        .collect::<ProviderResult<Vec<_>>>()?;

    let diagram = match root.get("diagram") {
        None | Some(Value::Null) => Diagram::default(),
        Some(diagram) => diagram_from(diagram)?,
    };

    debug!(
        files = source_files.len(),
        nodes = diagram.nodes.len(),
        links = diagram.links.len(),
        "Validated artifacts"
    );

    Ok(GeneratedArtifacts {
        schema,
        source_files,
        diagram,
    })
}

fn source_file(value: &Value, path: &str) -> ProviderResult<SourceFile> {
    let object = value
        .as_object()
        .ok_or_else(|| ProviderError::shape(path, "object"))?;

    let name = required_string(object, "name", path)?;
    let content = required_string(object, "content", path)?;
    let kind_path = format!("{}.kind", path);
    let kind = required_string(object, "kind", path)?
        .to_ascii_lowercase()
        .parse::<SourceFileKind>()
        .map_err(|_| {
            ProviderError::shape(
                kind_path,
                format!("one of {}", SourceFileKind::wire_names().join(", ")),
            )
        })?;

    Ok(SourceFile::new(name, content, kind))
}

fn diagram_from(value: &Value) -> ProviderResult<Diagram> {
    let object = value
        .as_object()
        .ok_or_else(|| ProviderError::shape("diagram", "object"))?;

    let nodes = optional_array(object, "nodes", "diagram.nodes")?
        .iter()
        .enumerate()
        .map(|(index, node)| -> ProviderResult<DiagramNode> {
            let path = format!("diagram.nodes[{}]", index);
            let node = node
                .as_object()
                .ok_or_else(|| ProviderError::shape(path.as_str(), "object"))?;
            Ok(DiagramNode {
                id: required_string(node, "id", &path)?,
                label: required_string(node, "label", &path)?,
            })
        })
        .collect::<ProviderResult<Vec<_>>>()?;

    let links = optional_array(object, "links", "diagram.links")?
        .iter()
        .enumerate()
        .map(|(index, link)| -> ProviderResult<DiagramLink> {
            let path = format!("diagram.links[{}]", index);
            let link = link
                .as_object()
                .ok_or_else(|| ProviderError::shape(path.as_str(), "object"))?;
            Ok(DiagramLink {
                source: required_string(link, "source", &path)?,
                target: required_string(link, "target", &path)?,
            })
        })
        .collect::<ProviderResult<Vec<_>>>()?;

    Ok(Diagram { nodes, links })
}

fn optional_string(
    object: &Map<String, Value>,
    key: &str,
    path: &str,
) -> ProviderResult<Option<String>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(ProviderError::shape(path, "string")),
    }
}

fn required_string(object: &Map<String, Value>, key: &str, parent: &str) -> ProviderResult<String> {
    let path = format!("{}.{}", parent, key);
    optional_string(object, key, &path)?.ok_or_else(|| ProviderError::shape(path, "string"))
}

fn optional_array<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> ProviderResult<&'a [Value]> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(&[] as &[Value]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(ProviderError::shape(path, "array")),
    }
}
