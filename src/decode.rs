//! Response envelope decoding.
//!
//! The wire format keys one section per task family and encodes tuples as
//! positional JSON arrays, so the outer layers deserialise into strongly
//! typed collections while the tuple layer stays a [`serde_json::Value`].
//! Normalisers then reinterpret each positional array as a named record.
//! A malformed tuple is dropped with a warning instead of failing the whole
//! response; a top-level shape mismatch still fails the envelope.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::document::{ConstituencyNode, DependencyArc, Document, NamedEntity, RoleArgument};

/// Loosely typed intermediate form of the response object.
///
/// Unknown keys are ignored so new server-side task families do not break
/// older clients.
#[derive(Debug, Deserialize)]
pub(crate) struct RawDocument {
    #[serde(rename = "tok/fine")]
    tok_fine: Option<Vec<Vec<String>>>,
    #[serde(rename = "tok/coarse")]
    tok_coarse: Option<Vec<Vec<String>>>,
    #[serde(rename = "pos/ctb")]
    pos_ctb: Option<Vec<Vec<String>>>,
    #[serde(rename = "pos/pku")]
    pos_pku: Option<Vec<Vec<String>>>,
    #[serde(rename = "pos/863")]
    pos_863: Option<Vec<Vec<String>>>,
    #[serde(rename = "ner/pku")]
    ner_pku: Option<Vec<Vec<Value>>>,
    #[serde(rename = "ner/msra")]
    ner_msra: Option<Vec<Vec<Value>>>,
    #[serde(rename = "ner/ontonotes")]
    ner_ontonotes: Option<Vec<Vec<Value>>>,
    srl: Option<Vec<Vec<Vec<Value>>>>,
    dep: Option<Vec<Vec<Value>>>,
    sdp: Option<Vec<Vec<Vec<Value>>>>,
    con: Option<Vec<Value>>,
}

impl From<RawDocument> for Document {
    fn from(raw: RawDocument) -> Self {
        Self {
            tok_fine: raw.tok_fine,
            tok_coarse: raw.tok_coarse,
            pos_ctb: raw.pos_ctb,
            pos_pku: raw.pos_pku,
            pos_863: raw.pos_863,
            ner_pku: raw.ner_pku.map(|s| entity_rows("ner/pku", s)),
            ner_msra: raw.ner_msra.map(|s| entity_rows("ner/msra", s)),
            ner_ontonotes: raw.ner_ontonotes.map(|s| entity_rows("ner/ontonotes", s)),
            srl: raw.srl.map(role_groups),
            dep: raw.dep.map(|s| arc_rows("dep", s)),
            sdp: raw.sdp.map(arc_groups),
            con: raw.con.map(|trees| constituency_forest(&trees)),
        }
    }
}

/// Truncate a wire index to an integer offset.
///
/// Indices travel as JSON numbers and may carry a fractional part; the
/// fraction is discarded and anything below zero clamps to zero.
fn truncate_index(number: &serde_json::Number) -> usize {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "wire indices are small non-negative floats"
    )]
    number.as_f64().map_or(0, |f| f as usize)
}

/// Reinterpret a 4-element array as `(text, label, begin, end)`.
///
/// Returns [`None`] and logs the anomaly when the value is not an array of
/// exactly four elements with string text, string label and numeric offsets.
fn labelled_span(family: &str, value: &Value) -> Option<(String, String, usize, usize)> {
    let Value::Array(items) = value else {
        warn!("{family}: expected tuple array, got {value}");
        return None;
    };
    match items.as_slice() {
        [Value::String(text), Value::String(label), Value::Number(begin), Value::Number(end)] => {
            Some((
                text.clone(),
                label.clone(),
                truncate_index(begin),
                truncate_index(end),
            ))
        }
        _ => {
            warn!("{family}: malformed span tuple {value}, dropping");
            None
        }
    }
}

/// Reinterpret a 2-element array as `(head, relation)`.
fn dependency_arc(family: &str, value: &Value) -> Option<DependencyArc> {
    let Value::Array(items) = value else {
        warn!("{family}: expected tuple array, got {value}");
        return None;
    };
    match items.as_slice() {
        [Value::Number(head), Value::String(relation)] => {
            Some(DependencyArc::new(truncate_index(head), relation.clone()))
        }
        _ => {
            warn!("{family}: malformed edge tuple {value}, dropping");
            None
        }
    }
}

fn entity_rows(family: &str, sentences: Vec<Vec<Value>>) -> Vec<Vec<NamedEntity>> {
    sentences
        .into_iter()
        .map(|sentence| {
            sentence
                .iter()
                .filter_map(|tuple| {
                    labelled_span(family, tuple)
                        .map(|(text, label, begin, end)| NamedEntity::new(text, label, begin, end))
                })
                .collect()
        })
        .collect()
}

fn role_groups(sentences: Vec<Vec<Vec<Value>>>) -> Vec<Vec<Vec<RoleArgument>>> {
    sentences
        .into_iter()
        .map(|sentence| {
            sentence
                .into_iter()
                .map(|predicate| {
                    predicate
                        .iter()
                        .filter_map(|tuple| {
                            labelled_span("srl", tuple).map(|(text, label, begin, end)| {
                                RoleArgument::new(text, label, begin, end)
                            })
                        })
                        .collect()
                })
                .collect()
        })
        .collect()
}

fn arc_rows(family: &str, sentences: Vec<Vec<Value>>) -> Vec<Vec<DependencyArc>> {
    sentences
        .into_iter()
        .map(|sentence| {
            sentence
                .iter()
                .filter_map(|tuple| dependency_arc(family, tuple))
                .collect()
        })
        .collect()
}

fn arc_groups(sentences: Vec<Vec<Vec<Value>>>) -> Vec<Vec<Vec<DependencyArc>>> {
    sentences
        .into_iter()
        .map(|sentence| {
            sentence
                .into_iter()
                .map(|token| {
                    token
                        .iter()
                        .filter_map(|tuple| dependency_arc("sdp", tuple))
                        .collect()
                })
                .collect()
        })
        .collect()
}

/// Decode one bracketed-list array into an ordered list of tree nodes.
///
/// The grammar has two forms. An array headed by a string is a single
/// labelled node; with exactly two elements the second is the child list,
/// decoded recursively, while a single-element array is a leaf. An array
/// headed by another array is a sequence of sibling subtrees, each decoded
/// by the same grammar, concatenated in order; the grouping itself carries
/// no label and contributes no node. Anything else at a position where a
/// string or array is expected decodes to nothing.
pub(crate) fn constituency_forest(items: &[Value]) -> Vec<ConstituencyNode> {
    let Some(head) = items.first() else {
        return Vec::new();
    };
    match head {
        Value::String(label) => {
            let children = match items {
                [_] => None,
                [_, Value::Array(child_items)] => Some(constituency_forest(child_items)),
                _ => {
                    warn!("con: unexpected node shape {items:?}, keeping bare label");
                    None
                }
            };
            vec![ConstituencyNode {
                label: label.clone(),
                children,
            }]
        }
        Value::Array(_) => items
            .iter()
            .flat_map(|item| match item {
                Value::Array(subtree) => constituency_forest(subtree),
                other => {
                    warn!("con: expected subtree array, got {other}, dropping");
                    Vec::new()
                }
            })
            .collect(),
        other => {
            warn!("con: expected label or subtree, got {other}, dropping");
            Vec::new()
        }
    }
}
