//! Typed result structures for one analysis response.
//!
//! A [`Document`] holds one optional section per task family. Every value is
//! built once while decoding the response body and never mutated afterwards;
//! the document exclusively owns all nested structures.

use serde::{Deserialize, Serialize};

/// One named entity within a sentence.
///
/// `begin` and `end` are token offsets into the owning sentence, with `end`
/// exclusive, so `begin <= end` always holds for well-formed responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    /// Surface text of the entity.
    pub text: String,
    /// Entity type label, e.g. `ns` or `ORGANIZATION`.
    pub label: String,
    /// First token index, inclusive.
    pub begin: usize,
    /// Last token index, exclusive.
    pub end: usize,
}

impl NamedEntity {
    /// Create a new entity tuple.
    #[must_use]
    pub fn new(text: impl Into<String>, label: impl Into<String>, begin: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            begin,
            end,
        }
    }
}

/// One predicate or argument span from semantic role labelling.
///
/// Spans use the same `[begin, end)` token convention as [`NamedEntity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleArgument {
    /// Surface text of the predicate or argument.
    pub text: String,
    /// Role label, e.g. `PRED`, `ARG0` or `ARGM-TMP`.
    pub label: String,
    /// First token index, inclusive.
    pub begin: usize,
    /// Last token index, exclusive.
    pub end: usize,
}

impl RoleArgument {
    /// Create a new argument tuple.
    #[must_use]
    pub fn new(text: impl Into<String>, label: impl Into<String>, begin: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            begin,
            end,
        }
    }
}

/// One edge of a dependency tree or semantic dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyArc {
    /// 1-based index of the head token within the sentence; 0 means root.
    pub head: usize,
    /// Relation label, e.g. `nsubj`.
    pub relation: String,
}

impl DependencyArc {
    /// Create a new dependency edge.
    #[must_use]
    pub fn new(head: usize, relation: impl Into<String>) -> Self {
        Self {
            head,
            relation: relation.into(),
        }
    }
}

/// One node of a constituency parse tree.
///
/// A leaf carries a label and no children collection. An internal node may
/// have an empty children list, which is distinct from a leaf: the response
/// grammar encodes `["NP"]` as a leaf and `["NP", []]` as a node whose child
/// list was materialised empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstituencyNode {
    /// Constituent label; empty for unlabelled grouping nodes.
    pub label: String,
    /// Ordered child subtrees, absent for leaves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ConstituencyNode>>,
}

impl ConstituencyNode {
    /// Create a leaf node with no children collection.
    #[must_use]
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: None,
        }
    }

    /// Create an internal node with the given ordered children.
    #[must_use]
    pub fn branch(label: impl Into<String>, children: Vec<ConstituencyNode>) -> Self {
        Self {
            label: label.into(),
            children: Some(children),
        }
    }

    /// Whether the node is a leaf, i.e. has no children collection at all.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Decoded result of one analysis request.
///
/// Each field mirrors one task-family key of the response object. A task that
/// was not requested, or not applicable, is `None` rather than an empty
/// collection. Sections that are present hold one top-level entry per input
/// sentence.
///
/// # Examples
///
/// ```
/// use hanlp_client::Document;
///
/// let body = r#"{"tok/fine":[["北京","立方庭"]]}"#;
/// let doc = Document::from_slice(body.as_bytes())?;
/// assert_eq!(doc.tok_fine, Some(vec![vec!["北京".into(), "立方庭".into()]]));
/// assert!(doc.pos_ctb.is_none());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "crate::decode::RawDocument")]
pub struct Document {
    /// Fine-grained tokenization, one token list per sentence.
    #[serde(rename = "tok/fine", skip_serializing_if = "Option::is_none")]
    pub tok_fine: Option<Vec<Vec<String>>>,
    /// Coarse-grained tokenization, one token list per sentence.
    #[serde(rename = "tok/coarse", skip_serializing_if = "Option::is_none")]
    pub tok_coarse: Option<Vec<Vec<String>>>,
    /// Part-of-speech tags under the CTB tagset.
    #[serde(rename = "pos/ctb", skip_serializing_if = "Option::is_none")]
    pub pos_ctb: Option<Vec<Vec<String>>>,
    /// Part-of-speech tags under the PKU tagset.
    #[serde(rename = "pos/pku", skip_serializing_if = "Option::is_none")]
    pub pos_pku: Option<Vec<Vec<String>>>,
    /// Part-of-speech tags under the 863 tagset.
    #[serde(rename = "pos/863", skip_serializing_if = "Option::is_none")]
    pub pos_863: Option<Vec<Vec<String>>>,
    /// Named entities under the PKU scheme, one list per sentence.
    #[serde(rename = "ner/pku", skip_serializing_if = "Option::is_none")]
    pub ner_pku: Option<Vec<Vec<NamedEntity>>>,
    /// Named entities under the MSRA scheme, one list per sentence.
    #[serde(rename = "ner/msra", skip_serializing_if = "Option::is_none")]
    pub ner_msra: Option<Vec<Vec<NamedEntity>>>,
    /// Named entities under the OntoNotes scheme, one list per sentence.
    #[serde(rename = "ner/ontonotes", skip_serializing_if = "Option::is_none")]
    pub ner_ontonotes: Option<Vec<Vec<NamedEntity>>>,
    /// Semantic roles: per sentence, per predicate, a list of argument tuples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srl: Option<Vec<Vec<Vec<RoleArgument>>>>,
    /// Dependency tree, one edge per token per sentence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dep: Option<Vec<Vec<DependencyArc>>>,
    /// Semantic dependency graph: per token, possibly several incoming edges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdp: Option<Vec<Vec<Vec<DependencyArc>>>>,
    /// Constituency forest, one tree per sentence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub con: Option<Vec<ConstituencyNode>>,
}

impl Document {
    /// Decode a response body into a document.
    ///
    /// Unrecognised keys are ignored. Individual malformed tuples inside a
    /// section are dropped with a logged warning; a response that is not a
    /// JSON object of the expected top-level shape fails as a whole.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the bytes are not valid JSON or do
    /// not match the expected envelope shape.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Whether no task section is present at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tok_fine.is_none()
            && self.tok_coarse.is_none()
            && self.pos_ctb.is_none()
            && self.pos_pku.is_none()
            && self.pos_863.is_none()
            && self.ner_pku.is_none()
            && self.ner_msra.is_none()
            && self.ner_ontonotes.is_none()
            && self.srl.is_none()
            && self.dep.is_none()
            && self.sdp.is_none()
            && self.con.is_none()
    }
}

impl std::str::FromStr for Document {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}
