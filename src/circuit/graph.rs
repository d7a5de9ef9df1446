//! Circuit graph: node arena, spatial merging, loop detection and the
//! simulation entry point.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::circuit::result::{ComponentDetail, SimulationResult, SimulationStatus};
use crate::circuit::types::{ComponentId, NodeId, Point};
use crate::components::Component;
use crate::solver::solve_circuit;

/// An electrical node: a point of common potential on the workspace.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub pos: Point,
    /// Directly adjacent nodes, established by component placement or
    /// explicit wiring.
    connected: HashSet<NodeId>,
}

impl Node {
    /// Iterate over directly adjacent nodes.
    pub fn neighbors(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.connected.iter().copied()
    }
}

/// A circuit under construction and simulation.
///
/// The graph owns an arena of [`Node`]s and an insertion-ordered list of
/// [`Component`]s. Nodes are merged spatially: any placement point within
/// [`CircuitGraph::MERGE_RADIUS`] of an existing node resolves to that node,
/// so components that visually touch share an electrical point.
///
/// `simulate()` can be called any number of times; aside from the state it
/// intentionally writes back into bulbs and meters it is a pure function of
/// the current graph.
#[derive(Debug, Default)]
pub struct CircuitGraph {
    nodes: Vec<Node>,
    components: Vec<Component>,
    last_simulation: Option<SimulationResult>,
}

impl CircuitGraph {
    /// Placement points closer than this (in workspace units) are the same
    /// electrical node.
    pub const MERGE_RADIUS: f64 = 25.0;

    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an electrical node at the given point, merging with any existing
    /// node within [`Self::MERGE_RADIUS`].
    ///
    /// Returns the id of the canonical node for that location, which may be a
    /// previously created one. First match wins, in node insertion order;
    /// grid-snapped placement keeps merge regions from overlapping.
    pub fn add_node(&mut self, at: Point) -> NodeId {
        for node in &self.nodes {
            if node.pos.distance(at) < Self::MERGE_RADIUS {
                return node.id;
            }
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            pos: at,
            connected: HashSet::new(),
        });
        id
    }

    /// Record direct adjacency between two nodes.
    pub fn connect(&mut self, a: NodeId, b: NodeId) {
        if a == b || a.0 >= self.nodes.len() || b.0 >= self.nodes.len() {
            return;
        }
        self.nodes[a.0].connected.insert(b);
        self.nodes[b.0].connected.insert(a);
    }

    /// Add a component whose terminals were resolved through [`Self::add_node`].
    ///
    /// Returns `None` (and logs) if either terminal id is not owned by this
    /// graph; the component is dropped rather than stored half-wired.
    pub fn add_component(&mut self, component: Component) -> Option<ComponentId> {
        let [start, end] = component.nodes();
        if start.0 >= self.nodes.len() || end.0 >= self.nodes.len() {
            warn!(
                name = component.name(),
                %start,
                %end,
                "dropping component with unresolved terminals"
            );
            return None;
        }

        self.connect(start, end);
        let id = ComponentId(self.components.len());
        self.components.push(component);
        Some(id)
    }

    /// All components in insertion order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Look up a component.
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.0)
    }

    /// Mutable access to a component (to toggle a switch, reset a bulb, ...).
    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.get_mut(id.0)
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of distinct electrical nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Components attached to the given node, in insertion order.
    pub fn connections_at(&self, node: NodeId) -> Vec<ComponentId> {
        self.components
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                let [s, e] = c.nodes();
                s == node || e == node
            })
            .map(|(i, _)| ComponentId(i))
            .collect()
    }

    /// The result of the most recent `simulate()` call, if it solved.
    pub fn last_simulation(&self) -> Option<&SimulationResult> {
        self.last_simulation.as_ref()
    }

    /// Search for a closed conducting loop from `start` back to `target`.
    ///
    /// Depth-first over conducting components. Components are visited at most
    /// once per path while nodes may be revisited through different
    /// components. Paths shorter than two components are rejected so a
    /// battery's own terminals never count as a loop.
    ///
    /// Returns the first loop found, as a component path.
    pub fn find_closed_loop(&self, start: NodeId, target: NodeId) -> Option<Vec<ComponentId>> {
        let mut visited = HashSet::new();
        let mut path = Vec::new();
        self.loop_dfs(start, target, &mut visited, &mut path)
    }

    fn loop_dfs(
        &self,
        current: NodeId,
        target: NodeId,
        visited: &mut HashSet<ComponentId>,
        path: &mut Vec<ComponentId>,
    ) -> Option<Vec<ComponentId>> {
        if current == target && !path.is_empty() {
            return Some(path.clone());
        }

        for id in self.connections_at(current) {
            let comp = &self.components[id.0];
            if !comp.conducts() || visited.contains(&id) {
                continue;
            }

            visited.insert(id);
            path.push(id);

            let next = comp.other_node(current);
            // A single hop back to the target is the degenerate
            // battery-terminal case, not a loop.
            if !(next == target && path.len() < 2) {
                if let Some(found) = self.loop_dfs(next, target, visited, path) {
                    return Some(found);
                }
            }

            path.pop();
            visited.remove(&id);
        }

        None
    }

    /// Run the simulation pipeline over the current graph state.
    ///
    /// Checks run in strict order, each short-circuiting the rest:
    /// battery present, all switches closed, a closed conducting loop
    /// exists, the MNA system solves. On success the solved currents are
    /// propagated into bulb brightness and meter readings and the result is
    /// cached as [`Self::last_simulation`].
    pub fn simulate(&mut self) -> SimulationResult {
        self.last_simulation = None;

        let batteries: Vec<(ComponentId, NodeId, NodeId, f64)> = self
            .components
            .iter()
            .enumerate()
            .filter_map(|(i, c)| match c {
                Component::Battery(b) => {
                    Some((ComponentId(i), b.negative(), b.positive(), b.voltage))
                }
                _ => None,
            })
            .collect();

        let Some(&(_, loop_start, loop_target, primary_voltage)) = batteries.first() else {
            debug!("simulation aborted: no battery");
            return SimulationResult::failure(SimulationStatus::NoBattery, "No battery in circuit");
        };

        let open_switch = self
            .components
            .iter()
            .enumerate()
            .find_map(|(i, c)| match c {
                Component::Switch(s) if !s.closed => Some((ComponentId(i), s.name.clone())),
                _ => None,
            });
        if let Some((id, name)) = open_switch {
            debug!(switch = %id, "simulation aborted: open switch");
            self.force_bulbs_off();
            let mut result = SimulationResult::failure(
                SimulationStatus::SwitchOpen,
                format!("Switch {name} is open"),
            );
            result.open_switch = Some(id);
            return result;
        }

        if self.find_closed_loop(loop_start, loop_target).is_none() {
            debug!("simulation aborted: no closed loop");
            self.force_bulbs_off();
            return SimulationResult::failure(
                SimulationStatus::OpenCircuit,
                "Circuit is open; current does not flow",
            );
        }

        let Some(solution) = solve_circuit(self) else {
            debug!("simulation aborted: solve failed");
            return SimulationResult::failure(SimulationStatus::OpenCircuit, "Circuit solve failed");
        };

        let mut total_current = 0.0;
        let mut details = Vec::with_capacity(self.components.len());
        for (i, comp) in self.components.iter_mut().enumerate() {
            let id = ComponentId(i);
            let current = solution.component_currents.get(&id).copied().unwrap_or(0.0);
            let drop = solution.component_voltages.get(&id).copied();

            match comp {
                Component::Battery(_) => total_current += current.abs(),
                Component::Bulb(b) => b.update(current.abs()),
                Component::Ammeter(a) => {
                    if solution.component_currents.contains_key(&id) {
                        a.set_connected(true);
                        a.update(current);
                    } else {
                        a.set_connected(false);
                    }
                }
                Component::Voltmeter(v) => match drop {
                    Some(d) => {
                        v.set_connected(true);
                        v.update(d.diff);
                    }
                    None => v.set_connected(false),
                },
                Component::Wire(_) | Component::Resistor(_) | Component::Switch(_) => {}
            }

            details.push(ComponentDetail {
                id,
                kind: comp.kind(),
                name: comp.name().to_string(),
                current,
                voltage: drop.map_or(0.0, |d| d.diff),
                start_voltage: drop.map_or(0.0, |d| d.start),
                end_voltage: drop.map_or(0.0, |d| d.end),
            });
        }

        debug!(
            total_current,
            nodes = solution.node_voltages.len(),
            "circuit solved"
        );

        let result = SimulationResult {
            status: SimulationStatus::Solved,
            message: "Circuit solved".to_string(),
            closed: true,
            open_switch: None,
            current: total_current,
            total_voltage: (batteries.len() == 1).then_some(primary_voltage),
            node_voltages: solution.node_voltages,
            component_currents: solution.component_currents,
            component_voltages: solution.component_voltages,
            component_details: details,
        };
        self.last_simulation = Some(result.clone());
        result
    }

    fn force_bulbs_off(&mut self) {
        for comp in &mut self.components {
            if let Component::Bulb(b) = comp {
                b.update(0.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Bulb;
    use approx::assert_relative_eq;

    /// Battery 9V + wire 1R + bulb 100R in a triangle.
    fn series_loop() -> (CircuitGraph, ComponentId, ComponentId, ComponentId) {
        let mut graph = CircuitGraph::new();
        let a = graph.add_node(Point::new(0.0, 0.0));
        let b = graph.add_node(Point::new(200.0, 0.0));
        let c = graph.add_node(Point::new(100.0, 150.0));

        let bat = graph
            .add_component(Component::battery("B1", a, b, 9.0))
            .unwrap();
        let wire = graph.add_component(Component::wire("W1", b, c)).unwrap();
        let bulb = graph.add_component(Component::bulb("L1", c, a)).unwrap();
        (graph, bat, wire, bulb)
    }

    #[test]
    fn nearby_nodes_merge_to_one() {
        let mut graph = CircuitGraph::new();
        let a = graph.add_node(Point::new(100.0, 100.0));
        let b = graph.add_node(Point::new(110.0, 120.0)); // within 25 units
        assert_eq!(a, b);
        assert_eq!(graph.node_count(), 1);

        let c = graph.add_node(Point::new(200.0, 100.0));
        assert_ne!(a, c);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn merge_is_strictly_inside_radius() {
        let mut graph = CircuitGraph::new();
        let a = graph.add_node(Point::new(0.0, 0.0));
        let b = graph.add_node(Point::new(CircuitGraph::MERGE_RADIUS, 0.0));
        assert_ne!(a, b);
    }

    #[test]
    fn add_component_links_adjacency() {
        let mut graph = CircuitGraph::new();
        let a = graph.add_node(Point::new(0.0, 0.0));
        let b = graph.add_node(Point::new(100.0, 0.0));
        graph.add_component(Component::wire("W1", a, b)).unwrap();

        let neighbors: Vec<_> = graph.node(a).unwrap().neighbors().collect();
        assert_eq!(neighbors, vec![b]);
    }

    #[test]
    fn add_component_rejects_foreign_nodes() {
        let mut graph = CircuitGraph::new();
        let a = graph.add_node(Point::new(0.0, 0.0));
        let bogus = NodeId(42);
        assert!(graph
            .add_component(Component::wire("W1", a, bogus))
            .is_none());
        assert!(graph.components().is_empty());
    }

    #[test]
    fn battery_terminals_alone_are_not_a_loop() {
        let mut graph = CircuitGraph::new();
        let a = graph.add_node(Point::new(0.0, 0.0));
        let b = graph.add_node(Point::new(100.0, 0.0));
        graph
            .add_component(Component::battery("B1", a, b, 9.0))
            .unwrap();

        assert!(graph.find_closed_loop(a, b).is_none());
        let result = graph.simulate();
        assert_eq!(result.status, SimulationStatus::OpenCircuit);
        assert!(!result.closed);
    }

    #[test]
    fn series_loop_solves() {
        let (mut graph, bat, wire, bulb) = series_loop();
        let result = graph.simulate();

        assert_eq!(result.status, SimulationStatus::Solved);
        assert_eq!(result.status.code(), 1);
        assert!(result.closed);
        assert_eq!(result.total_voltage, Some(9.0));

        // Total series resistance 101 ohms
        let expected = 9.0 / 101.0;
        assert_relative_eq!(result.current, expected, epsilon = 1e-6);
        assert_relative_eq!(result.component_currents[&bat], expected, epsilon = 1e-6);
        assert_relative_eq!(result.component_currents[&wire], expected, epsilon = 1e-6);

        // Bulb brightness follows current / max_current
        let Some(Component::Bulb(b)) = graph.component(bulb) else {
            panic!("expected bulb");
        };
        assert!(b.is_on);
        let expected_brightness = (expected / Bulb::DEFAULT_MAX_CURRENT * 100.0).min(100.0);
        assert_relative_eq!(b.brightness, expected_brightness, epsilon = 1e-6);
    }

    #[test]
    fn no_battery_reports_status() {
        let mut graph = CircuitGraph::new();
        let a = graph.add_node(Point::new(0.0, 0.0));
        let b = graph.add_node(Point::new(100.0, 0.0));
        graph.add_component(Component::wire("W1", a, b)).unwrap();

        let result = graph.simulate();
        assert_eq!(result.status, SimulationStatus::NoBattery);
        assert_eq!(result.status.code(), -1);
        assert!(graph.last_simulation().is_none());
    }

    #[test]
    fn open_switch_blocks_simulation_and_darkens_bulbs() {
        let (mut graph, _, _, bulb) = series_loop();

        // Light the bulb first
        graph.simulate();

        let c = graph.add_node(Point::new(100.0, 150.0));
        let a = graph.add_node(Point::new(0.0, 0.0));
        let sw = graph
            .add_component(Component::switch("S1", c, a, false))
            .unwrap();

        let result = graph.simulate();
        assert_eq!(result.status, SimulationStatus::SwitchOpen);
        assert_eq!(result.status.code(), -2);
        assert_eq!(result.open_switch, Some(sw));
        assert_eq!(result.current, 0.0);

        let Some(Component::Bulb(b)) = graph.component(bulb) else {
            panic!("expected bulb");
        };
        assert!(!b.is_on);
        assert_eq!(b.brightness, 0.0);

        // Closing the switch restores the solve
        if let Some(Component::Switch(s)) = graph.component_mut(sw) {
            s.toggle();
        }
        let result = graph.simulate();
        assert_eq!(result.status, SimulationStatus::Solved);
    }

    #[test]
    fn overcurrent_burns_bulb_until_reset() {
        let mut graph = CircuitGraph::new();
        let a = graph.add_node(Point::new(0.0, 0.0));
        let b = graph.add_node(Point::new(200.0, 0.0));
        let c = graph.add_node(Point::new(100.0, 150.0));

        graph
            .add_component(Component::battery("B1", a, b, 9.0))
            .unwrap();
        graph.add_component(Component::wire("W1", b, c)).unwrap();
        // 10 ohm filament: 9 / 11 A, far over the 0.2 A limit
        let bulb = graph
            .add_component(Component::Bulb(Bulb::new(
                "L1".to_string(),
                [c, a],
                10.0,
            )))
            .unwrap();

        let result = graph.simulate();
        assert_eq!(result.status, SimulationStatus::Solved);

        let Some(Component::Bulb(lamp)) = graph.component(bulb) else {
            panic!("expected bulb");
        };
        assert!(lamp.burned_out);

        // Burned out, the bulb no longer conducts: the loop is gone
        let result = graph.simulate();
        assert_eq!(result.status, SimulationStatus::OpenCircuit);
        let Some(Component::Bulb(lamp)) = graph.component(bulb) else {
            panic!("expected bulb");
        };
        assert!(lamp.burned_out);

        if let Some(Component::Bulb(lamp)) = graph.component_mut(bulb) {
            lamp.reset();
        }
        let result = graph.simulate();
        assert_eq!(result.status, SimulationStatus::Solved);
    }

    #[test]
    fn simulate_is_idempotent() {
        let (mut graph, ..) = series_loop();
        let first = graph.simulate();
        let second = graph.simulate();

        assert_eq!(first.status, second.status);
        for (node, v) in &first.node_voltages {
            assert_relative_eq!(*v, second.node_voltages[node], epsilon = 1e-9);
        }
        for (comp, i) in &first.component_currents {
            assert_relative_eq!(*i, second.component_currents[comp], epsilon = 1e-9);
        }
    }

    #[test]
    fn conflicting_batteries_surface_as_failed_solve() {
        let mut graph = CircuitGraph::new();
        let a = graph.add_node(Point::new(0.0, 0.0));
        let b = graph.add_node(Point::new(200.0, 0.0));
        let c = graph.add_node(Point::new(100.0, 150.0));

        // Two identical batteries across the same node pair: redundant
        // constraint rows, singular system.
        graph
            .add_component(Component::battery("B1", a, b, 9.0))
            .unwrap();
        graph
            .add_component(Component::battery("B2", a, b, 9.0))
            .unwrap();
        graph.add_component(Component::wire("W1", b, c)).unwrap();
        graph.add_component(Component::wire("W2", c, a)).unwrap();

        let result = graph.simulate();
        assert_eq!(result.status, SimulationStatus::OpenCircuit);
        assert_eq!(result.message, "Circuit solve failed");
        assert!(!result.closed);
        assert!(result.node_voltages.is_empty());
    }

    #[test]
    fn ohms_law_round_trip() {
        let (mut graph, ..) = series_loop();
        let result = graph.simulate();

        for detail in &result.component_details {
            let comp = graph.component(detail.id).unwrap();
            let r = comp.resistance();
            if !r.is_finite() || r == 0.0 || detail.kind == crate::components::ComponentKind::Battery
            {
                continue;
            }
            let drop = result.component_voltages[&detail.id];
            assert_relative_eq!((drop.start - drop.end) / r, detail.current, epsilon = 1e-9);
        }
    }

    #[test]
    fn meters_read_without_disturbing_the_circuit() {
        let (mut graph, ..) = series_loop();
        let baseline = graph.simulate().current;

        // Voltmeter across the bulb: endpoints placed on the bulb's nodes
        // merge into them.
        let c = graph.add_node(Point::new(100.0, 150.0));
        let a = graph.add_node(Point::new(0.0, 0.0));
        let vm = graph
            .add_component(Component::voltmeter("V1", c, a))
            .unwrap();

        let result = graph.simulate();
        assert_eq!(result.status, SimulationStatus::Solved);
        // No current may be drawn through the meter
        assert_relative_eq!(result.current, baseline, epsilon = 1e-9);
        assert_relative_eq!(result.component_currents[&vm], 0.0, epsilon = 1e-12);

        let Some(Component::Voltmeter(v)) = graph.component(vm) else {
            panic!("expected voltmeter");
        };
        assert!(v.is_connected);
        // Bulb drop: 9 * 100/101 = 8.910891..., rounded to 3 decimals
        assert_relative_eq!(v.measurement, 8.911, epsilon = 1e-9);
    }

    #[test]
    fn ammeter_reads_series_current() {
        let mut graph = CircuitGraph::new();
        let a = graph.add_node(Point::new(0.0, 0.0));
        let b = graph.add_node(Point::new(200.0, 0.0));
        let c = graph.add_node(Point::new(100.0, 150.0));
        let d = graph.add_node(Point::new(300.0, 150.0));

        graph
            .add_component(Component::battery("B1", a, b, 9.0))
            .unwrap();
        graph.add_component(Component::wire("W1", b, c)).unwrap();
        graph
            .add_component(Component::ammeter("A1", c, d))
            .unwrap();
        graph.add_component(Component::bulb("L1", d, a)).unwrap();

        let result = graph.simulate();
        assert_eq!(result.status, SimulationStatus::Solved);

        // 9 / (1 + 0.01 + 100) amps through the single loop
        let expected = 9.0 / 101.01;
        assert_relative_eq!(result.current, expected, epsilon = 1e-6);

        let Some(Component::Ammeter(am)) = graph
            .components()
            .iter()
            .find(|c| matches!(c, Component::Ammeter(_)))
        else {
            panic!("expected ammeter");
        };
        assert!(am.is_connected);
        assert_relative_eq!(am.measurement, 0.089, epsilon = 1e-9);
    }

    #[test]
    fn last_simulation_caches_solved_results() {
        let (mut graph, ..) = series_loop();
        assert!(graph.last_simulation().is_none());

        let result = graph.simulate();
        let cached = graph.last_simulation().expect("cache after solve");
        assert_eq!(cached.status, result.status);
        assert_relative_eq!(cached.current, result.current, epsilon = 1e-12);
    }
}
