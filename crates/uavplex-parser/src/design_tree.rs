//! Parser for `design_tree.json` geometry payloads.
//!
//! Only a handful of fields are read; everything missing falls back to a
//! default and is reported as a warning.

use std::collections::BTreeMap;

use log::debug;
use serde_json::{Map, Value};
use uavplex_core::design::{Airframe, Fuselage, SensorSlot};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    json,
    span::Span,
};

/// Hub type used when the tree has no `hub.node_type`.
pub const UNKNOWN_HUB_TYPE: &str = "Unknown";

/// Parses the airframe geometry of a design tree.
///
/// # Errors
///
/// Fails only when the source is not a JSON object. Missing or mistyped
/// fields produce warnings and defaults.
pub fn parse_airframe(source: &str) -> Result<Airframe, ParseError> {
    let root: Value = json::from_source(source)?;
    let Value::Object(root) = root else {
        return Err(Diagnostic::error("design tree must be a JSON object")
            .with_code(ErrorCode::E003)
            .with_label(Span::new(0..source.len().min(1)), "expected `{`")
            .into());
    };

    let mut reader = TreeReader {
        source,
        collector: DiagnosticCollector::new(),
    };

    let hub = reader.section(&root, "hub");
    let hub_type = hub
        .and_then(|hub| reader.string(hub, "node_type"))
        .unwrap_or_else(|| UNKNOWN_HUB_TYPE.to_string());
    let arm_length = hub
        .and_then(|hub| reader.section(hub, "mainSegment"))
        .and_then(|segment| reader.number(segment, "armLength"));

    let mut airframe = Airframe::new(hub_type, arm_length);

    let fuselage = root
        .get("fuselageWithComponents")
        .and_then(Value::as_object)
        .and_then(|section| section.get("fuselage"))
        .and_then(Value::as_object)
        .filter(|fuselage| !fuselage.is_empty());
    if let Some(fuselage) = fuselage {
        let defaults = Fuselage::default();
        let dimensions = Fuselage {
            length: reader.number(fuselage, "length").unwrap_or(defaults.length),
            horz_diameter: reader
                .number(fuselage, "horzDiameter")
                .unwrap_or(defaults.horz_diameter),
            vert_diameter: reader
                .number(fuselage, "vertDiameter")
                .unwrap_or(defaults.vert_diameter),
            floor_height: reader
                .number(fuselage, "floorHeight")
                .unwrap_or(defaults.floor_height),
        };

        let offsets: BTreeMap<_, _> = SensorSlot::ALL
            .into_iter()
            .map(|slot| {
                let x = reader.number(fuselage, &format!("{}X", slot.key()));
                let y = reader.number(fuselage, &format!("{}Y", slot.key()));
                (slot, (x.unwrap_or(0.0), y.unwrap_or(0.0)))
            })
            .collect();

        airframe = airframe.with_fuselage(dimensions, offsets);
    }

    reader.collector.finish()?;

    debug!(
        hub_type = airframe.hub_type(),
        num_arms = airframe.num_arms(),
        arm_length = airframe.arm_length();
        "Design tree parsed"
    );
    Ok(airframe)
}

struct TreeReader<'a> {
    source: &'a str,
    collector: DiagnosticCollector,
}

impl TreeReader<'_> {
    fn section<'v>(
        &mut self,
        parent: &'v Map<String, Value>,
        key: &str,
    ) -> Option<&'v Map<String, Value>> {
        match parent.get(key) {
            Some(Value::Object(section)) => Some(section),
            Some(_) => {
                self.invalid(key, "an object");
                None
            }
            None => {
                self.collector.emit(
                    Diagnostic::warning(format!("design tree has no `{key}` section"))
                        .with_code(ErrorCode::E102)
                        .with_help("defaults are used for the missing geometry"),
                );
                None
            }
        }
    }

    fn string(&mut self, parent: &Map<String, Value>, key: &str) -> Option<String> {
        match parent.get(key)? {
            Value::String(value) => Some(value.clone()),
            _ => {
                self.invalid(key, "a string");
                None
            }
        }
    }

    fn number(&mut self, parent: &Map<String, Value>, key: &str) -> Option<f32> {
        match parent.get(key)? {
            Value::Number(value) => value.as_f64().map(|v| v as f32),
            Value::Null => None,
            _ => {
                self.invalid(key, "a number");
                None
            }
        }
    }

    fn invalid(&mut self, key: &str, expected: &str) {
        let span = Span::of_quoted(self.source, key, 0);
        self.collector.emit(
            Diagnostic::warning(format!("`{key}` is not {expected}"))
                .with_code(ErrorCode::E101)
                .with_optional_label(span, "ignored")
                .with_help("the default value is used instead"),
        );
    }
}
