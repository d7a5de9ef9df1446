//! VoltLab - educational circuit sandbox, demo CLI.
//!
//! Builds a simple series loop (battery, wire, bulb, optional switch and
//! meters) and prints the solved voltages and currents.
//!
//! # Usage
//!
//! ```bash
//! voltlab --voltage 9 --bulb-ohms 100
//! voltlab --with-switch --switch-open
//! RUST_LOG=voltlab_core=debug voltlab --with-meters
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;
use voltlab_core::components::Bulb;
use voltlab_core::{CircuitGraph, Component, Point, SimulationStatus};

/// Demo runner for the VoltLab circuit engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Battery voltage in volts
    #[arg(short, long, default_value_t = 9.0)]
    voltage: f64,

    /// Bulb filament resistance in ohms
    #[arg(long, default_value_t = 100.0)]
    bulb_ohms: f64,

    /// Insert a switch into the loop
    #[arg(long)]
    with_switch: bool,

    /// Leave the inserted switch open
    #[arg(long, requires = "with_switch")]
    switch_open: bool,

    /// Add an ammeter in series and a voltmeter across the bulb
    #[arg(long)]
    with_meters: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut graph = CircuitGraph::new();
    let a = graph.add_node(Point::new(0.0, 0.0));
    let b = graph.add_node(Point::new(300.0, 0.0));
    let c = graph.add_node(Point::new(300.0, 200.0));
    let d = graph.add_node(Point::new(0.0, 200.0));

    graph.add_component(Component::battery("B1", a, b, args.voltage));
    graph.add_component(Component::wire("W1", b, c));
    if args.with_switch {
        let e = graph.add_node(Point::new(150.0, 200.0));
        graph.add_component(Component::switch("S1", c, e, !args.switch_open));
        graph.add_component(Component::Bulb(Bulb::new(
            "L1".to_string(),
            [e, d],
            args.bulb_ohms,
        )));
    } else {
        graph.add_component(Component::Bulb(Bulb::new(
            "L1".to_string(),
            [c, d],
            args.bulb_ohms,
        )));
    }
    if args.with_meters {
        let loop_close = graph.add_node(Point::new(0.0, 100.0));
        graph.add_component(Component::ammeter("A1", d, loop_close));
        graph.add_component(Component::wire("W2", loop_close, a));
        let vc = graph.add_node(Point::new(300.0, 200.0));
        let vd = graph.add_node(Point::new(0.0, 200.0));
        graph.add_component(Component::voltmeter("V1", vc, vd));
    } else {
        graph.add_component(Component::wire("W2", d, a));
    }

    let result = graph.simulate();

    println!("status : {:?} ({})", result.status, result.status.code());
    println!("message: {}", result.message);

    if result.status != SimulationStatus::Solved {
        return;
    }

    println!("current: {:.4} mA", result.current * 1000.0);
    if let Some(v) = result.total_voltage {
        println!("source : {v} V");
    }

    println!("\nnode voltages:");
    let mut nodes: Vec<_> = result.node_voltages.iter().collect();
    nodes.sort_by_key(|(id, _)| **id);
    for (id, v) in nodes {
        println!("  {id}: {v:.6} V");
    }

    println!("\ncomponents:");
    for detail in &result.component_details {
        let state = graph
            .component(detail.id)
            .map(|c| c.display_value())
            .unwrap_or_default();
        println!(
            "  {} {} ({}): {:.4} mA, {:.6} V drop, {}",
            detail.kind,
            detail.name,
            detail.id,
            detail.current * 1000.0,
            detail.voltage,
            state
        );
    }
}
