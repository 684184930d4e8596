//! Normalization of raw element records into the canonical [`Element`] shape.
//!
//! DESIGN
//! ======
//! Records arrive from the host as JSON in whatever shape the writing host
//! version used: structured `position`/`size` objects, or the legacy flat
//! `x`/`y`/`width`/`height` fields. This module is the only place that knows
//! about those shapes. It never mutates its input, so running it twice over
//! the same record yields the same element.
//!
//! Bad geometry (missing, non-finite, non-positive sizes) is replaced with
//! safe defaults instead of failing, so one corrupt record cannot take down
//! layout for the whole board. Only a record with no usable id is rejected.

#[cfg(test)]
#[path = "migrate_test.rs"]
mod migrate_test;

use std::collections::HashSet;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::element::{Element, ElementId, ElementKind, normalize_degrees};
use crate::geom::{Point, Size};

#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    #[error("element record is not a JSON object")]
    NotAnObject,
    #[error("element record has no id")]
    MissingId,
    #[error("element id is not a valid UUID: {0}")]
    InvalidId(String),
}

/// Normalize one raw record.
///
/// # Errors
///
/// Returns [`MigrateError`] when the record is not an object or lacks a
/// parseable `id`. Every other defect is repaired.
pub fn normalize(raw: &Value) -> Result<Element, MigrateError> {
    let obj = raw.as_object().ok_or(MigrateError::NotAnObject)?;
    let id = parse_id(obj)?;
    let kind = parse_kind(obj, id);
    let defaults = kind.spec().default_size;

    let position = read_point(obj.get("position")).unwrap_or_else(|| Point::new(
        finite(obj.get("x")).unwrap_or(0.0),
        finite(obj.get("y")).unwrap_or(0.0),
    ));

    let size_obj = obj.get("size").and_then(Value::as_object);
    let width = size_obj
        .and_then(|s| positive(s.get("width")))
        .or_else(|| positive(obj.get("width")))
        .unwrap_or(defaults.width);
    let height = size_obj
        .and_then(|s| positive(s.get("height")))
        .or_else(|| positive(obj.get("height")))
        .unwrap_or(defaults.height);

    let rotation = normalize_degrees(finite(obj.get("rotation")).unwrap_or(0.0));
    let z_index = read_z_index(obj.get("zIndex"));

    let parent_id = read_parent(obj.get("parentId"), id);
    let relative_position = parent_id.and_then(|_| read_point(obj.get("relativePosition")));
    let hidden = parent_id.is_some() || obj.get("hidden").and_then(Value::as_bool).unwrap_or(false);

    let content = match obj.get("content") {
        Some(v @ Value::Object(_)) => v.clone(),
        _ => Value::Object(Map::new()),
    };

    Ok(Element {
        id,
        kind,
        position,
        size: Size::new(width, height),
        rotation,
        z_index,
        parent_id,
        relative_position,
        hidden,
        content,
    })
}

/// Normalize a batch of raw records, skipping (and logging) unusable ones
/// and keeping only the first record for a duplicated id.
#[must_use]
pub fn normalize_all(raws: &[Value]) -> Vec<Element> {
    let mut seen: HashSet<ElementId> = HashSet::new();
    let mut out = Vec::with_capacity(raws.len());
    for (index, raw) in raws.iter().enumerate() {
        match normalize(raw) {
            Ok(el) => {
                if seen.insert(el.id) {
                    out.push(el);
                } else {
                    tracing::warn!(id = %el.id, index, "duplicate element id; keeping first record");
                }
            }
            Err(e) => tracing::warn!(index, error = %e, "skipping unreadable element record"),
        }
    }
    out
}

fn parse_id(obj: &Map<String, Value>) -> Result<ElementId, MigrateError> {
    let raw = obj.get("id").and_then(Value::as_str).ok_or(MigrateError::MissingId)?;
    Uuid::parse_str(raw).map_err(|_| MigrateError::InvalidId(raw.to_string()))
}

fn parse_kind(obj: &Map<String, Value>, id: ElementId) -> ElementKind {
    let Some(tag) = obj.get("type").and_then(Value::as_str) else {
        tracing::warn!(%id, "element record has no type; treating as unknown");
        return ElementKind::Unknown;
    };
    let kind = serde_json::from_value::<ElementKind>(Value::String(tag.to_string())).unwrap_or(ElementKind::Unknown);
    if kind == ElementKind::Unknown {
        tracing::warn!(%id, tag, "unknown element type; it will not be rendered");
    }
    kind
}

fn read_parent(value: Option<&Value>, id: ElementId) -> Option<ElementId> {
    let raw = value?.as_str()?;
    match Uuid::parse_str(raw) {
        Ok(parent) if parent == id => {
            tracing::warn!(%id, "element names itself as parent; ignoring");
            None
        }
        Ok(parent) => Some(parent),
        Err(e) => {
            tracing::warn!(%id, raw, error = %e, "ignoring malformed parentId");
            None
        }
    }
}

fn read_point(value: Option<&Value>) -> Option<Point> {
    let obj = value?.as_object()?;
    Some(Point::new(finite(obj.get("x")).unwrap_or(0.0), finite(obj.get("y")).unwrap_or(0.0)))
}

#[allow(clippy::cast_possible_truncation)]
fn read_z_index(value: Option<&Value>) -> Option<i64> {
    let value = value?;
    value.as_i64().or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64))
}

fn finite(value: Option<&Value>) -> Option<f64> {
    value?.as_f64().filter(|f| f.is_finite())
}

fn positive(value: Option<&Value>) -> Option<f64> {
    finite(value).filter(|f| *f > 0.0)
}
