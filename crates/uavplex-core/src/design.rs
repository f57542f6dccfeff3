//! The in-memory design model.
//!
//! A [`Design`] is one UAV variant: an ordered list of [`Component`]s, the
//! [`Connection`]s between them, and optional geometry payloads. Designs are
//! built by the parser crate and read by every later pipeline stage.
//!
//! [`Design::validate`] checks referential integrity. It is called by the
//! loader before a design enters a corpus, and again by the analyzer so that
//! programmatically assembled designs cannot slip through.

mod airframe;

pub use airframe::{Airframe, DEFAULT_ARM_LENGTH, DEFAULT_NUM_ARMS, Fuselage, SensorSlot};

use std::{collections::HashSet, fmt, path::PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::identifier::Id;

/// Connector name used when a connection endpoint carries none.
pub const UNKNOWN_CONNECTOR: &str = "Unknown";

/// Categorical component type.
///
/// Known types get their own variant so the position calculator can match on
/// them; anything else is preserved verbatim in [`ComponentType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentType {
    Hub,
    Arm,
    Motor,
    Propeller,
    Flange,
    Tube,
    Sensor,
    Battery,
    BatteryController,
    Fuselage,
    LandingGear,
    Other(String),
}

impl ComponentType {
    /// Returns the type name as it appears in design descriptors.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Hub => "MainHub",
            Self::Arm => "Arm",
            Self::Motor => "Motor",
            Self::Propeller => "Propeller",
            Self::Flange => "Flange",
            Self::Tube => "Tube",
            Self::Sensor => "Sensor",
            Self::Battery => "Battery",
            Self::BatteryController => "BatteryController",
            Self::Fuselage => "Fuselage",
            Self::LandingGear => "LandingGear",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for ComponentType {
    fn from(name: &str) -> Self {
        match name {
            "MainHub" | "Hub" => Self::Hub,
            "Arm" => Self::Arm,
            "Motor" => Self::Motor,
            "Propeller" => Self::Propeller,
            "Flange" => Self::Flange,
            "Tube" => Self::Tube,
            "Sensor" => Self::Sensor,
            "Battery" => Self::Battery,
            "BatteryController" => Self::BatteryController,
            "Fuselage" => Self::Fuselage,
            "LandingGear" => Self::LandingGear,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ComponentType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A node of the design graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    id: Id,
    kind: ComponentType,
    choice: Option<String>,
}

impl Component {
    /// Creates a component with an instance identifier and type.
    pub fn new(id: impl Into<Id>, kind: impl Into<ComponentType>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            choice: None,
        }
    }

    /// Sets the catalog part chosen for this component.
    pub fn with_choice(mut self, choice: impl Into<String>) -> Self {
        self.choice = Some(choice.into());
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> &ComponentType {
        &self.kind
    }

    pub fn choice(&self) -> Option<&str> {
        self.choice.as_deref()
    }
}

/// A link between two components.
///
/// The source/target order is kept as recorded in the descriptor. Connector
/// names default to [`UNKNOWN_CONNECTOR`].
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    from: Id,
    to: Id,
    from_connector: String,
    to_connector: String,
}

impl Connection {
    /// Creates a connection with unknown connectors on both ends.
    pub fn new(from: impl Into<Id>, to: impl Into<Id>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            from_connector: UNKNOWN_CONNECTOR.to_string(),
            to_connector: UNKNOWN_CONNECTOR.to_string(),
        }
    }

    /// Sets the connector names used on the source and target side.
    pub fn with_connectors(
        mut self,
        from_connector: impl Into<String>,
        to_connector: impl Into<String>,
    ) -> Self {
        self.from_connector = from_connector.into();
        self.to_connector = to_connector.into();
        self
    }

    pub fn from(&self) -> Id {
        self.from
    }

    pub fn to(&self) -> Id {
        self.to
    }

    pub fn from_connector(&self) -> &str {
        &self.from_connector
    }

    pub fn to_connector(&self) -> &str {
        &self.to_connector
    }

    /// Returns the endpoint opposite to `id`, if `id` is one of the endpoints.
    pub fn other_end(&self, id: Id) -> Option<Id> {
        if self.from == id {
            Some(self.to)
        } else if self.to == id {
            Some(self.from)
        } else {
            None
        }
    }

    /// Connector name on the side of `id`, if `id` is one of the endpoints.
    ///
    /// For a self-loop the source connector is returned.
    pub fn connector_at(&self, id: Id) -> Option<&str> {
        if self.from == id {
            Some(&self.from_connector)
        } else if self.to == id {
            Some(&self.to_connector)
        } else {
            None
        }
    }
}

/// Referential integrity failures in a design graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("design `{design}`: connection #{index} references unknown component `{component}`")]
    DanglingConnection {
        design: String,
        index: usize,
        component: String,
    },

    #[error("design `{design}`: component `{component}` is defined more than once")]
    DuplicateComponent { design: String, component: String },
}

/// One UAV variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Design {
    name: String,
    components: Vec<Component>,
    connections: Vec<Connection>,
    airframe: Option<Airframe>,
    cad_path: Option<PathBuf>,
}

impl Design {
    /// Creates a design from its components and connections.
    ///
    /// No validation happens here; see [`Design::validate`].
    pub fn new(
        name: impl Into<String>,
        components: Vec<Component>,
        connections: Vec<Connection>,
    ) -> Self {
        Self {
            name: name.into(),
            components,
            connections,
            airframe: None,
            cad_path: None,
        }
    }

    /// Attaches the parsed design tree geometry.
    pub fn with_airframe(mut self, airframe: Airframe) -> Self {
        self.airframe = Some(airframe);
        self
    }

    /// Records the location of the design's STL mesh.
    pub fn with_cad_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cad_path = Some(path.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn airframe(&self) -> Option<&Airframe> {
        self.airframe.as_ref()
    }

    pub fn cad_path(&self) -> Option<&PathBuf> {
        self.cad_path.as_ref()
    }

    /// Looks up a component by identifier.
    pub fn component(&self, id: Id) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Returns `true` if the design has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Design number parsed from a `<prefix><number>[_suffix]` name.
    ///
    /// # Examples
    ///
    /// ```
    /// # use uavplex_core::design::Design;
    /// assert_eq!(Design::number_from_name("design_14_quad", "design_"), Some(14));
    /// assert_eq!(Design::number_from_name("baseline", "design_"), None);
    /// ```
    pub fn number_from_name(name: &str, prefix: &str) -> Option<u32> {
        let (_, rest) = name.split_once(prefix)?;
        rest.split('_').next()?.parse().ok()
    }

    /// Checks that component identifiers are unique and every connection
    /// references existing components.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, in descriptor order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut known = HashSet::with_capacity(self.components.len());
        for component in &self.components {
            if !known.insert(component.id) {
                return Err(ValidationError::DuplicateComponent {
                    design: self.name.clone(),
                    component: component.id.to_string(),
                });
            }
        }

        for (index, connection) in self.connections.iter().enumerate() {
            for endpoint in [connection.from, connection.to] {
                if !known.contains(&endpoint) {
                    return Err(ValidationError::DanglingConnection {
                        design: self.name.clone(),
                        index,
                        component: endpoint.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Design {
        Design::new(
            "design_1",
            vec![
                Component::new("Hub", "MainHub"),
                Component::new("M1", "Motor"),
                Component::new("M2", "Motor"),
                Component::new("S1", "Sensor"),
            ],
            vec![
                Connection::new("Hub", "M1"),
                Connection::new("Hub", "M2"),
                Connection::new("Hub", "S1"),
            ],
        )
    }

    #[test]
    fn test_component_type_round_trip_names() {
        assert_eq!(ComponentType::from("MainHub"), ComponentType::Hub);
        assert_eq!(ComponentType::Hub.as_str(), "MainHub");
        assert_eq!(
            ComponentType::from("Wing"),
            ComponentType::Other("Wing".to_string())
        );
        assert_eq!(ComponentType::from("Wing").to_string(), "Wing");
    }

    #[test]
    fn test_validate_ok() {
        assert!(quad().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_design() {
        let design = Design::new("empty", Vec::new(), Vec::new());
        assert!(design.is_empty());
        assert!(design.validate().is_ok());
    }

    #[test]
    fn test_validate_dangling_connection() {
        let design = Design::new(
            "broken",
            vec![Component::new("Hub", "MainHub")],
            vec![Connection::new("Hub", "X")],
        );

        let err = design.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::DanglingConnection {
                design: "broken".to_string(),
                index: 0,
                component: "X".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_duplicate_component() {
        let design = Design::new(
            "dup",
            vec![
                Component::new("Arm_1", "Arm"),
                Component::new("Arm_1", "Arm"),
            ],
            Vec::new(),
        );

        assert!(matches!(
            design.validate(),
            Err(ValidationError::DuplicateComponent { .. })
        ));
    }

    #[test]
    fn test_connection_endpoints() {
        let conn = Connection::new("Hub", "M1").with_connectors("Side_Connector_1", "Base");
        assert_eq!(conn.other_end(Id::new("Hub")), Some(Id::new("M1")));
        assert_eq!(conn.other_end(Id::new("S1")), None);
        assert_eq!(conn.connector_at(Id::new("M1")), Some("Base"));
        assert_eq!(conn.connector_at(Id::new("Hub")), Some("Side_Connector_1"));
    }

    #[test]
    fn test_number_from_name() {
        assert_eq!(Design::number_from_name("design_3", "design_"), Some(3));
        assert_eq!(Design::number_from_name("design_x", "design_"), None);
    }
}
