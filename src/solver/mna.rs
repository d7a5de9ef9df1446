//! MNA matrix assembly and circuit solving.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::circuit::{CircuitGraph, ComponentId, NodeId, VoltageDrop};
use crate::components::Component;
use crate::error::Result;

use super::linear::solve_dense;

/// MNA matrix system Ax = z.
#[derive(Debug)]
pub struct MnaMatrix {
    /// System matrix A (row-major)
    pub a: Vec<f64>,
    /// Source vector z
    pub z: Vec<f64>,
    /// Matrix dimension
    pub size: usize,
}

impl MnaMatrix {
    /// Create a zeroed system of the given dimension.
    pub fn new(size: usize) -> Self {
        Self {
            a: vec![0.0; size * size],
            z: vec![0.0; size],
            size,
        }
    }

    /// Add to matrix element at (row, col).
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        self.a[row * self.size + col] += value;
    }

    /// Stamp a conductance between two node variables.
    /// For a conductance G between variables n1 and n2:
    ///   A[n1,n1] += G
    ///   A[n2,n2] += G
    ///   A[n1,n2] -= G
    ///   A[n2,n1] -= G
    /// `None` stands for the ground node, whose row and column are eliminated.
    pub fn stamp_conductance(&mut self, n1: Option<usize>, n2: Option<usize>, g: f64) {
        if let Some(i) = n1 {
            self.add(i, i, g);
        }
        if let Some(j) = n2 {
            self.add(j, j, g);
        }
        if let (Some(i), Some(j)) = (n1, n2) {
            self.add(i, j, -g);
            self.add(j, i, -g);
        }
    }

    /// Stamp a battery between two node variables with its branch current at
    /// index `br`, enforcing V[n+] - V[n-] = E.
    pub fn stamp_battery(
        &mut self,
        n_pos: Option<usize>,
        n_neg: Option<usize>,
        br: usize,
        voltage: f64,
    ) {
        if let Some(i) = n_pos {
            self.add(br, i, 1.0);
            self.add(i, br, 1.0);
        }
        if let Some(j) = n_neg {
            self.add(br, j, -1.0);
            self.add(j, br, -1.0);
        }
        self.z[br] = voltage;
    }

    /// Solve the assembled system.
    pub fn solve(&self) -> Result<Vec<f64>> {
        solve_dense(&self.a, &self.z, self.size)
    }
}

/// The raw output of a successful MNA solve.
///
/// Currents follow the start-to-end sign convention: a positive entry means
/// conventional current flows from the component's `start` node to its `end`
/// node. Components whose terminals were not part of the solved network
/// (e.g. a disconnected voltmeter) have no entries.
#[derive(Debug, Clone)]
pub struct MnaSolution {
    /// Solved voltage at every electrical node, ground fixed at 0 V.
    pub node_voltages: HashMap<NodeId, f64>,
    /// Signed branch current per component.
    pub component_currents: HashMap<ComponentId, f64>,
    /// Terminal voltages per component.
    pub component_voltages: HashMap<ComponentId, VoltageDrop>,
}

/// Assemble and solve the MNA system for the given graph.
///
/// Returns `None` when no solvable system exists: no participating nodes, no
/// unknowns, or a singular matrix (redundant or conflicting sources). The
/// caller treats all of these as a failed, non-fatal solve.
pub fn solve_circuit(graph: &CircuitGraph) -> Option<MnaSolution> {
    // 1. Collect the distinct electrical nodes touched by conducting
    //    components. Batteries always participate, conducting or not.
    let mut index: HashMap<NodeId, usize> = HashMap::new();
    let mut node_order: Vec<NodeId> = Vec::new();
    for comp in graph.components() {
        if !comp.conducts() && !matches!(comp, Component::Battery(_)) {
            continue;
        }
        for node in comp.nodes() {
            if let std::collections::hash_map::Entry::Vacant(e) = index.entry(node) {
                e.insert(node_order.len());
                node_order.push(node);
            }
        }
    }

    let n = node_order.len();
    if n == 0 {
        return None;
    }

    // 2. The first node encountered is the ground reference (0 V). With a
    //    fixed insertion order this makes the solve deterministic.
    let var = |i: usize| if i == 0 { None } else { Some(i - 1) };

    // 3. One branch current unknown per battery; positive terminal is `end`.
    let mut sources: Vec<(ComponentId, NodeId, NodeId, f64)> = Vec::new();
    for (idx, comp) in graph.components().iter().enumerate() {
        if let Component::Battery(b) = comp {
            sources.push((ComponentId(idx), b.positive(), b.negative(), b.voltage));
        }
    }

    let nv = n.saturating_sub(1);
    let unknowns = nv + sources.len();
    if unknowns == 0 {
        return None;
    }

    let mut matrix = MnaMatrix::new(unknowns);

    // 4. Conductance stamps for non-battery conducting components. Infinite
    //    resistance means an open branch; zero would be a hard short with no
    //    finite conductance. Neither is stamped.
    for comp in graph.components() {
        if !comp.conducts() || matches!(comp, Component::Battery(_)) {
            continue;
        }
        let r = comp.resistance();
        if !r.is_finite() || r == 0.0 {
            continue;
        }
        let [start, end] = comp.nodes();
        matrix.stamp_conductance(var(index[&start]), var(index[&end]), 1.0 / r);
    }

    // 5. Battery B/C blocks and source vector.
    for (k, (_, pos, neg, voltage)) in sources.iter().enumerate() {
        matrix.stamp_battery(var(index[pos]), var(index[neg]), nv + k, *voltage);
    }

    // 6. Solve; a singular system is a non-solution, not an error.
    let x = match matrix.solve() {
        Ok(x) => x,
        Err(err) => {
            debug!(%err, "MNA solve failed");
            return None;
        }
    };

    // 7. Recover node voltages (ground stays at 0).
    let voltages: Vec<f64> = (0..n).map(|i| var(i).map_or(0.0, |v| x[v])).collect();
    let node_voltages: HashMap<NodeId, f64> = node_order
        .iter()
        .zip(&voltages)
        .map(|(node, v)| (*node, *v))
        .collect();

    // 8. Per-component branch currents in start->end convention. The solved
    //    battery current variable flows positive-to-negative, so its sign is
    //    inverted; resistive branches use Ohm's law on the terminal voltages.
    let mut component_currents = HashMap::new();
    let mut component_voltages = HashMap::new();
    for (idx, comp) in graph.components().iter().enumerate() {
        let id = ComponentId(idx);
        let [start, end] = comp.nodes();
        let (Some(&i), Some(&j)) = (index.get(&start), index.get(&end)) else {
            continue;
        };
        let v_start = voltages[i];
        let v_end = voltages[j];

        let current = if matches!(comp, Component::Battery(_)) {
            sources
                .iter()
                .position(|(cid, ..)| *cid == id)
                .map_or(0.0, |k| -x[nv + k])
        } else {
            let r = comp.resistance();
            if !r.is_finite() || r == 0.0 {
                0.0
            } else {
                (v_start - v_end) / r
            }
        };

        trace!(component = %id, current, v_start, v_end, "branch solved");
        component_currents.insert(id, current);
        component_voltages.insert(
            id,
            VoltageDrop {
                start: v_start,
                end: v_end,
                diff: v_end - v_start,
            },
        );
    }

    Some(MnaSolution {
        node_voltages,
        component_currents,
        component_voltages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Point;
    use approx::assert_relative_eq;

    /// Battery 10V with two equal resistors in series: classic divider.
    #[test]
    fn voltage_divider() {
        let mut graph = CircuitGraph::new();
        let a = graph.add_node(Point::new(0.0, 0.0));
        let b = graph.add_node(Point::new(200.0, 0.0));
        let mid = graph.add_node(Point::new(100.0, 100.0));

        let bat = graph
            .add_component(Component::battery("B1", a, b, 10.0))
            .unwrap();
        graph
            .add_component(Component::resistor("R1", b, mid, 1000.0))
            .unwrap();
        graph
            .add_component(Component::resistor("R2", mid, a, 1000.0))
            .unwrap();

        let sol = solve_circuit(&graph).expect("divider should solve");

        // Ground is the battery's start node
        assert_relative_eq!(sol.node_voltages[&a], 0.0, epsilon = 1e-9);
        assert_relative_eq!(sol.node_voltages[&b], 10.0, epsilon = 1e-9);
        assert_relative_eq!(sol.node_voltages[&mid], 5.0, epsilon = 1e-9);

        // 5 mA around the loop, start->end convention
        assert_relative_eq!(sol.component_currents[&bat], 0.005, epsilon = 1e-9);
    }

    /// Two ideal batteries with different voltages across the same node pair
    /// produce contradictory constraints and a singular system.
    #[test]
    fn conflicting_batteries_do_not_solve() {
        let mut graph = CircuitGraph::new();
        let a = graph.add_node(Point::new(0.0, 0.0));
        let b = graph.add_node(Point::new(200.0, 0.0));

        graph
            .add_component(Component::battery("B1", a, b, 9.0))
            .unwrap();
        graph
            .add_component(Component::battery("B2", a, b, 5.0))
            .unwrap();
        graph
            .add_component(Component::resistor("R1", a, b, 100.0))
            .unwrap();

        assert!(solve_circuit(&graph).is_none());
    }

    #[test]
    fn empty_graph_has_no_solution() {
        let graph = CircuitGraph::new();
        assert!(solve_circuit(&graph).is_none());
    }
}
