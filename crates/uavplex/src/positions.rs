//! Approximate 3D placement of components for network plots.
//!
//! Designs with airframe geometry and a hub are laid out the way the parts
//! sit on the vehicle: arms radiate from the hub, each arm chain runs out to
//! its motor and propeller, and fuselage-mounted parts hang under the hub.
//! Everything else falls back to a planar force-directed layout.
//!
//! All randomness comes from a generator seeded with the design name, so
//! the same design always gets the same positions.

use std::{
    collections::HashSet,
    f32::consts::PI,
    hash::{DefaultHasher, Hash, Hasher},
};

use log::{debug, warn};
use petgraph::graph::NodeIndex;
use rand::{Rng, SeedableRng, rngs::StdRng};

use uavplex_core::{
    design::{Airframe, Component, ComponentType, Design, Fuselage, SensorSlot, ValidationError},
    geometry::{Point, Point3},
    identifier::Id,
};

use crate::structure::DesignGraph;

const HUB_Z: f32 = 50.0;
const ARM_MID_FRACTION: f32 = 0.6;
const FLANGE_FRACTION: f32 = 0.9;
const PROPELLER_LIFT: f32 = 60.0;
const CHAIN_STEPS: usize = 10;
const FUSELAGE_DROP: f32 = 20.0;
const SENSOR_SCALE: f32 = 0.4;
const UNSLOTTED_SENSOR_DROP: f32 = 15.0;
const NO_CONNECTOR_NUMBER: u32 = 999;

/// How a design's positions were derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Hub-centered airframe placement.
    Airframe,
    /// Planar force-directed layout with `z = 0`.
    ForceLayout,
}

/// Position of every component of a design, in component order.
#[derive(Debug, Clone, PartialEq)]
pub struct Positions {
    design: String,
    placement: Placement,
    points: Vec<(Id, Point3)>,
}

impl Positions {
    pub fn design(&self) -> &str {
        &self.design
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn get(&self, id: Id) -> Option<Point3> {
        self.points
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, point)| *point)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id, Point3)> + '_ {
        self.points.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Planar force-directed layout.
///
/// Nodes start on a jittered grid, repel each other (strongly when closer
/// than `min_distance`) and are pulled together along connections. The
/// result is centered on the origin and scaled down to `max_dimension`.
#[derive(Debug, Clone)]
pub struct ForceLayout {
    iterations: usize,
    spring_constant: f32,
    repulsion_constant: f32,
    damping_factor: f32,
    min_distance: f32,
    max_dimension: f32,
}

impl Default for ForceLayout {
    fn default() -> Self {
        Self {
            iterations: 100,
            spring_constant: 0.1,
            repulsion_constant: 1000.0,
            damping_factor: 0.85,
            min_distance: 80.0,
            max_dimension: 1200.0,
        }
    }
}

impl ForceLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of iterations for the force simulation
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Runs the simulation; positions are indexed like the graph's nodes.
    pub fn layout(&self, graph: &DesignGraph<'_>, rng: &mut impl Rng) -> Vec<Point> {
        let mut positions = self.initialize_positions(graph.node_count(), rng);
        let mut velocities = vec![Point::default(); positions.len()];
        let edges: Vec<(usize, usize)> = graph
            .connections()
            .map(|(source, target, _)| (source.index(), target.index()))
            .collect();

        for _ in 0..self.iterations {
            let mut forces = vec![Point::default(); positions.len()];

            for i in 0..positions.len() {
                for j in 0..positions.len() {
                    if i == j {
                        continue;
                    }
                    let trans = positions[i].sub_point(positions[j]);
                    let distance = trans.hypot().max(1.0);

                    // Stronger repulsion when components are too close
                    let force_factor = if distance < self.min_distance {
                        self.repulsion_constant * (self.min_distance / distance).powi(2)
                    } else {
                        self.repulsion_constant / distance
                    };
                    forces[i] = forces[i].add_point(trans.scale(force_factor / distance));
                }
            }

            for &(source, target) in &edges {
                let dist = positions[source].sub_point(positions[target]);
                let distance = dist.hypot().max(1.0);
                let force = self.spring_constant * distance;
                let pull = dist.scale(force / distance);

                forces[source] = forces[source].sub_point(pull);
                forces[target] = forces[target].add_point(pull);
            }

            for ((position, velocity), force) in
                positions.iter_mut().zip(velocities.iter_mut()).zip(&forces)
            {
                *velocity = velocity.add_point(*force).scale(self.damping_factor);
                *position = position.add_point(*velocity);
            }
        }

        self.center_layout(&mut positions);
        positions
    }

    /// Grid placement with some jitter to avoid perfect alignment.
    fn initialize_positions(&self, count: usize, rng: &mut impl Rng) -> Vec<Point> {
        let grid_size = ((count as f32).sqrt().ceil() as usize).max(1);
        let cell_size = self.min_distance * 1.5;

        (0..count)
            .map(|i| {
                let row = i / grid_size;
                let col = i % grid_size;
                let base = Point::new(col as f32 * cell_size, row as f32 * cell_size);
                let jitter = Point::new(
                    rng.random_range(-20.0..20.0),
                    rng.random_range(-20.0..20.0),
                );
                base.add_point(jitter)
            })
            .collect()
    }

    /// Center the layout around the origin
    fn center_layout(&self, positions: &mut [Point]) {
        if positions.is_empty() {
            return;
        }

        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;
        for pos in positions.iter() {
            min_x = min_x.min(pos.x());
            min_y = min_y.min(pos.y());
            max_x = max_x.max(pos.x());
            max_y = max_y.max(pos.y());
        }

        let center = Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
        for pos in positions.iter_mut() {
            *pos = pos.sub_point(center);
        }

        let width = max_x - min_x;
        let height = max_y - min_y;
        if width > self.max_dimension || height > self.max_dimension {
            let scale_factor = self.max_dimension / width.max(height);
            for pos in positions.iter_mut() {
                *pos = pos.scale(scale_factor);
            }
        }
    }
}

/// Derives component positions for a design.
#[derive(Debug, Clone, Default)]
pub struct PositionCalculator {
    force: ForceLayout,
}

impl PositionCalculator {
    pub fn new(force: ForceLayout) -> Self {
        Self { force }
    }

    /// Positions every component of `design`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the design graph is malformed.
    pub fn calculate(&self, design: &Design) -> Result<Positions, ValidationError> {
        let graph = DesignGraph::from_design(design)?;
        let mut rng = StdRng::seed_from_u64(seed_for(design.name()));

        let hub = graph.node_indices().find(|&idx| is_hub(graph.component(idx)));
        let (placement, points) = match (design.airframe(), hub) {
            (Some(airframe), Some(hub)) => (
                Placement::Airframe,
                place_on_airframe(&graph, airframe, hub, &mut rng),
            ),
            (airframe, hub) => {
                if airframe.is_none() {
                    warn!(design = design.name(); "No geometry, using force layout");
                } else if hub.is_none() {
                    warn!(design = design.name(); "No hub found, using force layout");
                }
                let points = self
                    .force
                    .layout(&graph, &mut rng)
                    .into_iter()
                    .map(|p| Point3::new(p.x(), p.y(), 0.0))
                    .collect();
                (Placement::ForceLayout, points)
            }
        };

        let points = graph
            .node_indices()
            .zip(points)
            .map(|(idx, point)| (graph.component(idx).id(), point))
            .collect::<Vec<_>>();

        debug!(
            design = design.name(),
            nodes = points.len(),
            placement:? = placement;
            "Positions calculated"
        );
        Ok(Positions {
            design: design.name().to_string(),
            placement,
            points,
        })
    }
}

fn seed_for(name: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    hasher.finish()
}

fn is_hub(component: &Component) -> bool {
    *component.kind() == ComponentType::Hub || component.id().contains("MainHub")
}

fn matches(component: &Component, kind: ComponentType, name: &str) -> bool {
    *component.kind() == kind || component.id().contains(name)
}

fn connector_number(connector: &str) -> u32 {
    let digits: String = connector.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(NO_CONNECTOR_NUMBER)
}

fn place_on_airframe(
    graph: &DesignGraph<'_>,
    airframe: &Airframe,
    hub: NodeIndex,
    rng: &mut impl Rng,
) -> Vec<Point3> {
    let mut positions: Vec<Option<Point3>> = vec![None; graph.node_count()];
    let center = Point3::new(0.0, 0.0, HUB_Z);
    positions[hub.index()] = Some(center);

    place_arms(graph, airframe, hub, center, &mut positions);
    place_fuselage(graph, airframe, center, &mut positions);

    // Everything else is scattered around a placed neighbor, or the hub
    for idx in graph.node_indices() {
        if positions[idx.index()].is_some() {
            continue;
        }
        let anchor = graph
            .successors(idx)
            .into_iter()
            .chain(graph.predecessors(idx))
            .find_map(|neighbor| positions[neighbor.index()]);
        let point = match anchor {
            Some(base) => base.add_point(jitter(rng, 30.0, 20.0)),
            None => center.add_point(jitter(rng, 80.0, 40.0)),
        };
        positions[idx.index()] = Some(point);
    }

    positions
        .into_iter()
        .map(|point| point.unwrap_or(center))
        .collect()
}

fn jitter(rng: &mut impl Rng, planar: f32, vertical: f32) -> Point3 {
    Point3::new(
        rng.random_range(-planar..planar),
        rng.random_range(-planar..planar),
        rng.random_range(-vertical..vertical),
    )
}

fn place_arms(
    graph: &DesignGraph<'_>,
    airframe: &Airframe,
    hub: NodeIndex,
    center: Point3,
    positions: &mut [Option<Point3>],
) {
    let mut arms: Vec<(NodeIndex, &str)> = graph
        .connections()
        .filter_map(|(source, target, connection)| {
            if source == hub && connection.from_connector().contains("Side_Connector") {
                Some((target, connection.from_connector()))
            } else if target == hub && connection.to_connector().contains("Side_Connector") {
                Some((source, connection.to_connector()))
            } else {
                None
            }
        })
        .collect();
    arms.sort_by_key(|(_, connector)| connector_number(connector));

    let num_arms = airframe.num_arms() as usize;
    let arm_length = airframe.arm_length();
    debug!(
        arms = arms.len(),
        num_arms = num_arms,
        arm_length = arm_length;
        "Placing arms"
    );

    for (i, &(arm, _)) in arms.iter().take(num_arms).enumerate() {
        let angle = 2.0 * PI * i as f32 / num_arms as f32;
        let (sin, cos) = angle.sin_cos();
        let arm_end = Point3::new(
            center.x() + arm_length * cos,
            center.y() + arm_length * sin,
            center.z(),
        );
        positions[arm.index()] = Some(Point3::new(
            center.x() + arm_length * ARM_MID_FRACTION * cos,
            center.y() + arm_length * ARM_MID_FRACTION * sin,
            center.z(),
        ));

        let mut visited = HashSet::from([hub, arm]);
        let mut current = arm;
        for step in 0..CHAIN_STEPS {
            let next = graph
                .incident_neighbors(current)
                .into_iter()
                .find(|neighbor| !visited.contains(neighbor));
            let Some(next) = next else {
                break;
            };
            visited.insert(next);
            let point = chain_position(graph.component(next), arm_end, step);
            positions[next.index()] = Some(point);
            current = next;
        }
    }
}

/// Position of the `step`-th part along an arm chain ending at `arm_end`.
fn chain_position(component: &Component, arm_end: Point3, step: usize) -> Point3 {
    if matches(component, ComponentType::Flange, "Flange") {
        arm_end.scale_xy(FLANGE_FRACTION)
    } else if matches(component, ComponentType::Motor, "Motor") {
        arm_end
    } else if matches(component, ComponentType::Propeller, "Propeller") {
        arm_end.lift(PROPELLER_LIFT)
    } else {
        arm_end.scale_xy(0.7 + step as f32 * 0.05)
    }
}

fn place_fuselage(
    graph: &DesignGraph<'_>,
    airframe: &Airframe,
    center: Point3,
    positions: &mut [Option<Point3>],
) {
    let fuselage = graph
        .node_indices()
        .find(|&idx| matches(graph.component(idx), ComponentType::Fuselage, "Fuselage"));
    let Some(fuselage) = fuselage else {
        return;
    };

    let floor_height = airframe
        .fuselage()
        .map(|f| f.floor_height)
        .filter(|height| *height != 0.0)
        .unwrap_or(Fuselage::default().floor_height);
    let fuselage_z = center.z() - floor_height - FUSELAGE_DROP;
    positions[fuselage.index()] = Some(center.with_z(fuselage_z));

    for idx in graph.node_indices() {
        let component = graph.component(idx);
        let name = component.id().to_string();
        let mounted = *component.kind() == ComponentType::Sensor
            || *component.kind() == ComponentType::Battery
            || name.contains("Sensor")
            || (name.contains("Battery") && !name.contains("Controller"));
        if !mounted {
            continue;
        }

        let offset =
            SensorSlot::for_instance(&name).and_then(|slot| airframe.sensor_offset(slot));
        let point = match offset {
            Some((x, y)) => Point3::new(
                center.x() + x * SENSOR_SCALE,
                center.y() + y * SENSOR_SCALE,
                fuselage_z,
            ),
            None => center.with_z(fuselage_z - UNSLOTTED_SENSOR_DROP),
        };
        positions[idx.index()] = Some(point);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use float_cmp::assert_approx_eq;
    use uavplex_core::design::Connection;

    use super::*;

    fn arm_chain(arm: usize) -> (Vec<Component>, Vec<Connection>) {
        let arm_id = format!("Arm_{arm}");
        let flange = format!("Flange_{arm}");
        let motor = format!("Motor_{arm}");
        let prop = format!("Propeller_{arm}");
        let components = vec![
            Component::new(arm_id.as_str(), "Arm"),
            Component::new(flange.as_str(), "Flange"),
            Component::new(motor.as_str(), "Motor"),
            Component::new(prop.as_str(), "Propeller"),
        ];
        let connections = vec![
            Connection::new("MainHub", arm_id.as_str())
                .with_connectors(format!("Side_Connector_{arm}"), "End"),
            Connection::new(arm_id.as_str(), flange.as_str()),
            Connection::new(flange.as_str(), motor.as_str()),
            Connection::new(motor.as_str(), prop.as_str()),
        ];
        (components, connections)
    }

    fn quad() -> Design {
        let mut components = vec![Component::new("MainHub", "MainHub")];
        let mut connections = Vec::new();
        // arms listed out of connector order
        for arm in [2, 1, 4, 3] {
            let (c, e) = arm_chain(arm);
            components.extend(c);
            connections.extend(e);
        }
        components.push(Component::new("Fuselage", "Fuselage"));
        components.push(Component::new("Sensor_5", "Sensor"));
        components.push(Component::new("Sensor_9", "Sensor"));
        components.push(Component::new("Wire", "Cable"));
        connections.push(Connection::new("MainHub", "Fuselage"));
        connections.push(Connection::new("Fuselage", "Sensor_5"));
        connections.push(Connection::new("Sensor_5", "Wire"));
        Design::new("design_1", components, connections)
    }

    fn airframe() -> Airframe {
        let offsets = BTreeMap::from([(SensorSlot::Gps, (10.0, -20.0))]);
        Airframe::new("Hub4", Some(400.0)).with_fuselage(Fuselage::default(), offsets)
    }

    fn position(positions: &Positions, name: &str) -> Point3 {
        positions.get(Id::new(name)).unwrap()
    }

    #[test]
    fn test_airframe_placement() {
        let design = quad().with_airframe(airframe());
        let positions = PositionCalculator::default().calculate(&design).unwrap();

        assert_eq!(positions.placement(), Placement::Airframe);
        assert_eq!(positions.len(), design.components().len());
        assert_eq!(position(&positions, "MainHub"), Point3::new(0.0, 0.0, 50.0));

        // Side_Connector_1 gets angle 0
        let arm = position(&positions, "Arm_1");
        assert_approx_eq!(f32, arm.x(), 240.0, epsilon = 1e-3);
        assert_approx_eq!(f32, arm.y(), 0.0, epsilon = 1e-3);

        let flange = position(&positions, "Flange_1");
        assert_approx_eq!(f32, flange.x(), 360.0, epsilon = 1e-3);
        let motor = position(&positions, "Motor_1");
        assert_approx_eq!(f32, motor.x(), 400.0, epsilon = 1e-3);
        let prop = position(&positions, "Propeller_1");
        assert_approx_eq!(f32, prop.z(), 110.0, epsilon = 1e-3);

        // Side_Connector_2 gets angle π/2
        let motor_2 = position(&positions, "Motor_2");
        assert_approx_eq!(f32, motor_2.x(), 0.0, epsilon = 1e-3);
        assert_approx_eq!(f32, motor_2.y(), 400.0, epsilon = 1e-3);
    }

    #[test]
    fn test_fuselage_and_sensors() {
        let design = quad().with_airframe(airframe());
        let positions = PositionCalculator::default().calculate(&design).unwrap();

        let fuselage_z = 50.0 - 8.75 - 20.0;
        assert_eq!(position(&positions, "Fuselage"), Point3::new(0.0, 0.0, fuselage_z));

        let gps = position(&positions, "Sensor_5");
        assert_approx_eq!(f32, gps.x(), 4.0);
        assert_approx_eq!(f32, gps.y(), -8.0);
        assert_approx_eq!(f32, gps.z(), fuselage_z);

        let unknown = position(&positions, "Sensor_9");
        assert_approx_eq!(f32, unknown.z(), fuselage_z - 15.0);

        // jittered around the GPS sensor it hangs off
        let wire = position(&positions, "Wire");
        assert!((wire.x() - gps.x()).abs() <= 30.0);
        assert!((wire.z() - gps.z()).abs() <= 20.0);
    }

    #[test]
    fn test_deterministic() {
        let design = quad().with_airframe(airframe());
        let calculator = PositionCalculator::default();
        assert_eq!(
            calculator.calculate(&design).unwrap(),
            calculator.calculate(&design).unwrap()
        );
    }

    #[test]
    fn test_force_layout_without_geometry() {
        let design = quad();
        let positions = PositionCalculator::default().calculate(&design).unwrap();

        assert_eq!(positions.placement(), Placement::ForceLayout);
        assert!(positions.iter().all(|(_, p)| p.z() == 0.0));
        assert!(positions.iter().all(|(_, p)| p.x().abs() <= 600.0 + 1e-3));
    }

    #[test]
    fn test_force_layout_without_hub() {
        let design = Design::new(
            "hubless",
            vec![Component::new("A", "Arm"), Component::new("B", "Arm")],
            vec![Connection::new("A", "B")],
        )
        .with_airframe(Airframe::new("Hub4", None));
        let positions = PositionCalculator::default().calculate(&design).unwrap();
        assert_eq!(positions.placement(), Placement::ForceLayout);
    }

    #[test]
    fn test_empty_design() {
        let design = Design::new("empty", Vec::new(), Vec::new());
        let positions = PositionCalculator::default().calculate(&design).unwrap();
        assert!(positions.is_empty());
    }

    #[test]
    fn test_connector_number() {
        assert_eq!(connector_number("Side_Connector_12"), 12);
        assert_eq!(connector_number("Top"), NO_CONNECTOR_NUMBER);
    }
}
