//! Parser for `design_low_level.json` descriptors.
//!
//! A descriptor lists component instances and the connections between them:
//!
//! ```json
//! {
//!   "name": "QuadCopter",
//!   "components": [
//!     { "component_instance": "Hub", "component_type": "MainHub", "component_choice": "0394od_para_hub_4" }
//!   ],
//!   "connections": [
//!     { "from_ci": "Hub", "to_ci": "Arm_1", "from_conn": "Side_Connector_1", "to_conn": "Base" }
//!   ]
//! }
//! ```
//!
//! Schema and reference problems are collected across the whole file before
//! the parse fails, so one run reports every broken connection.

use std::collections::HashMap;

use log::{debug, trace};
use serde::Deserialize;
use uavplex_core::design::{Component, Connection, Design, UNKNOWN_CONNECTOR};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    json,
    span::Span,
};

#[derive(Debug, Deserialize)]
struct RawDescriptor {
    name: Option<String>,
    components: Option<Vec<RawComponent>>,
    connections: Option<Vec<RawConnection>>,
}

#[derive(Debug, Deserialize)]
struct RawComponent {
    component_instance: Option<String>,
    component_type: Option<String>,
    component_choice: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawConnection {
    from_ci: Option<String>,
    to_ci: Option<String>,
    from_conn: Option<String>,
    to_conn: Option<String>,
}

/// Locates identifiers in the source, walking forward so repeated names
/// resolve to successive occurrences.
struct SpanCursor<'a> {
    source: &'a str,
    offset: usize,
}

impl<'a> SpanCursor<'a> {
    fn after_key(source: &'a str, key: &str) -> Self {
        let offset = Span::of_quoted(source, key, 0)
            .map(|span| span.end())
            .unwrap_or(0);
        Self { source, offset }
    }

    fn next(&mut self, needle: &str) -> Option<Span> {
        let span = Span::of_quoted(self.source, needle, self.offset)?;
        self.offset = span.end();
        Some(span)
    }
}

/// Parses a design descriptor into a validated [`Design`] named `name`.
///
/// # Errors
///
/// Returns a [`ParseError`] holding every diagnostic found: JSON errors
/// (`E0xx`), missing fields (`E100`), duplicate components (`E201`) and
/// connections to undefined components (`E200`).
pub fn parse_design(name: &str, source: &str) -> Result<Design, ParseError> {
    debug!(design = name; "Parsing design descriptor");

    let raw: RawDescriptor = json::from_source(source)?;
    trace!(design = name, payload_name:? = raw.name; "Descriptor deserialized");

    let mut collector = DiagnosticCollector::new();

    let raw_components = required_list(raw.components, "components", source, &mut collector);
    let raw_connections = required_list(raw.connections, "connections", source, &mut collector);

    let (components, declared) = build_components(raw_components, source, &mut collector);
    let connections = build_connections(raw_connections, &declared, source, &mut collector);

    collector.finish()?;

    let components = components.into_iter().map(|(component, _)| component).collect();
    let design = Design::new(name, components, connections);
    debug!(
        design = name,
        nodes = design.components().len(),
        edges = design.connections().len();
        "Design parsed"
    );
    Ok(design)
}

fn required_list<T>(
    list: Option<Vec<T>>,
    key: &str,
    source: &str,
    collector: &mut DiagnosticCollector,
) -> Vec<T> {
    match list {
        Some(list) => list,
        None => {
            collector.emit(
                Diagnostic::error(format!("descriptor has no `{key}` list"))
                    .with_code(ErrorCode::E100)
                    .with_label(Span::new(0..source.len().min(1)), "in this document")
                    .with_help(format!("add a `{key}` array, even if it is empty")),
            );
            Vec::new()
        }
    }
}

/// Builds the components and returns them with every declared instance name,
/// including names whose entry was rejected.
fn build_components(
    raw: Vec<RawComponent>,
    source: &str,
    collector: &mut DiagnosticCollector,
) -> (Vec<(Component, Option<Span>)>, HashMap<String, Option<Span>>) {
    let mut cursor = SpanCursor::after_key(source, "components");
    let mut seen: HashMap<String, Option<Span>> = HashMap::new();
    let mut components = Vec::with_capacity(raw.len());

    for (index, raw) in raw.into_iter().enumerate() {
        let Some(instance) = raw.component_instance else {
            collector.emit(missing_field("component_instance", "component", index));
            continue;
        };
        let span = cursor.next(&instance);

        if let Some(first) = seen.get(&instance) {
            let mut diag = Diagnostic::error(format!(
                "component `{instance}` is defined more than once"
            ))
            .with_code(ErrorCode::E201)
            .with_optional_label(span, "duplicate definition")
            .with_help("component instance names must be unique within a design");
            if let Some(first) = first {
                diag = diag.with_secondary_label(*first, "first defined here");
            }
            collector.emit(diag);
            continue;
        }
        seen.insert(instance.clone(), span);

        let Some(kind) = raw.component_type else {
            collector.emit(
                missing_field("component_type", "component", index)
                    .with_optional_label(span, "component without a type"),
            );
            continue;
        };

        let mut component = Component::new(instance.as_str(), kind.as_str());
        if let Some(choice) = raw.component_choice {
            component = component.with_choice(choice);
        }
        components.push((component, span));
    }

    (components, seen)
}

fn build_connections(
    raw: Vec<RawConnection>,
    declared: &HashMap<String, Option<Span>>,
    source: &str,
    collector: &mut DiagnosticCollector,
) -> Vec<Connection> {
    let mut cursor = SpanCursor::after_key(source, "connections");
    let mut connections = Vec::with_capacity(raw.len());

    for (index, raw) in raw.into_iter().enumerate() {
        let (Some(from), Some(to)) = (raw.from_ci, raw.to_ci) else {
            collector.emit(missing_field("from_ci` or `to_ci", "connection", index));
            continue;
        };

        let mut valid = true;
        for endpoint in [&from, &to] {
            let span = cursor.next(endpoint);
            if !declared.contains_key(endpoint.as_str()) {
                valid = false;
                collector.emit(
                    Diagnostic::error(format!(
                        "connection #{index} references unknown component `{endpoint}`"
                    ))
                    .with_code(ErrorCode::E200)
                    .with_optional_label(span, "not defined in `components`")
                    .with_help("add the component or fix the connection endpoint"),
                );
            }
        }
        if !valid {
            continue;
        }

        connections.push(
            Connection::new(from.as_str(), to.as_str()).with_connectors(
                raw.from_conn.unwrap_or_else(|| UNKNOWN_CONNECTOR.to_string()),
                raw.to_conn.unwrap_or_else(|| UNKNOWN_CONNECTOR.to_string()),
            ),
        );
    }

    connections
}

fn missing_field(field: &str, item: &str, index: usize) -> Diagnostic {
    Diagnostic::error(format!("{item} #{index} is missing `{field}`"))
        .with_code(ErrorCode::E100)
        .with_help(format!("every {item} entry needs `{field}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = r#"{
        "name": "quad",
        "components": [
            { "component_instance": "Hub", "component_type": "MainHub", "component_choice": "hub_4" },
            { "component_instance": "M1", "component_type": "Motor", "component_choice": null },
            { "component_instance": "M2", "component_type": "Motor" },
            { "component_instance": "S1", "component_type": "Sensor" }
        ],
        "connections": [
            { "from_ci": "Hub", "to_ci": "M1", "from_conn": "Side_Connector_1", "to_conn": "Base" },
            { "from_ci": "Hub", "to_ci": "M2", "from_conn": "Side_Connector_2", "to_conn": "Base" },
            { "from_ci": "Hub", "to_ci": "S1" }
        ]
    }"#;

    #[test]
    fn test_parse_quad() {
        let design = parse_design("design_1", QUAD).unwrap();

        assert_eq!(design.name(), "design_1");
        assert_eq!(design.components().len(), 4);
        assert_eq!(design.connections().len(), 3);
        assert_eq!(design.components()[0].choice(), Some("hub_4"));
        assert_eq!(design.components()[1].choice(), None);
        assert_eq!(design.connections()[0].from_connector(), "Side_Connector_1");
        assert_eq!(design.connections()[2].to_connector(), UNKNOWN_CONNECTOR);
        assert!(design.validate().is_ok());
    }

    #[test]
    fn test_dangling_connections_all_reported() {
        let source = r#"{
            "components": [{ "component_instance": "Hub", "component_type": "MainHub" }],
            "connections": [
                { "from_ci": "Hub", "to_ci": "X" },
                { "from_ci": "Y", "to_ci": "Hub" }
            ]
        }"#;

        let err = parse_design("broken", source).unwrap_err();
        let codes: Vec<_> = err.diagnostics().iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec![Some(ErrorCode::E200), Some(ErrorCode::E200)]);

        let span = err.diagnostics()[0].labels()[0].span();
        assert_eq!(&source[span.start()..span.end()], "X");
    }

    #[test]
    fn test_duplicate_component_points_at_both() {
        let source = r#"{
            "components": [
                { "component_instance": "Arm_1", "component_type": "Arm" },
                { "component_instance": "Arm_1", "component_type": "Arm" }
            ],
            "connections": []
        }"#;

        let err = parse_design("dup", source).unwrap_err();
        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E201));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].span().start() > diag.labels()[1].span().start());
    }

    #[test]
    fn test_missing_lists() {
        let err = parse_design("empty", "{}").unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert!(
            err.diagnostics()
                .iter()
                .all(|d| d.code() == Some(ErrorCode::E100))
        );
    }

    #[test]
    fn test_empty_lists_are_valid() {
        let design = parse_design("empty", r#"{"components": [], "connections": []}"#).unwrap();
        assert!(design.is_empty());
    }

    #[test]
    fn test_missing_component_type() {
        let source = r#"{
            "components": [{ "component_instance": "Hub" }],
            "connections": []
        }"#;
        let err = parse_design("typeless", source).unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E100));
        assert_eq!(err.diagnostics()[0].labels().len(), 1);
    }

    #[test]
    fn test_typeless_component_is_not_reported_as_unknown() {
        let source = r#"{
            "components": [
                { "component_instance": "Hub", "component_type": "MainHub" },
                { "component_instance": "M1" }
            ],
            "connections": [{ "from_ci": "Hub", "to_ci": "M1" }]
        }"#;
        let err = parse_design("typeless", source).unwrap_err();

        let codes: Vec<_> = err.diagnostics().iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec![Some(ErrorCode::E100)]);
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_design("bad", "{ \"components\": [ }").unwrap_err();
        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E001));
    }
}
