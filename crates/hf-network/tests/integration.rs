//! Integration tests for hf-network.

use hf_core::{Tolerances, nearly_equal};
use hf_network::{Endpoint, Layer, NetworkError, ThermalNetworkBuilder, Wall};

fn close(a: f64, b: f64) -> bool {
    nearly_equal(a, b, Tolerances::default())
}

fn four_layer_wall() -> Wall {
    Wall::new(15.0, 7.7, 25.0)
        .with_layer(Layer::new("interior plaster", 0.03, 0.721, 1762.0, 840.0))
        .with_layer(Layer::new("brick", 0.19, 0.811, 1820.0, 880.0).with_subdivisions(3))
        .with_layer(Layer::new("insulation", 0.06, 0.035, 24.0, 1340.0))
        .with_layer(Layer::new("exterior plaster", 0.02, 0.721, 1762.0, 840.0))
}

#[test]
fn multi_layer_wall_chain() {
    let wall = four_layer_wall();
    let mut builder = ThermalNetworkBuilder::new();
    let room = builder.add_node("room air", 1.204 * 1006.0 * 60.0);
    let outdoor = builder.add_boundary("outdoor", 2.0);
    let nodes = builder.add_wall(room, &wall, outdoor).unwrap();
    let network = builder.build().unwrap();

    // room + plaster + 3 brick planes + insulation + plaster
    assert_eq!(network.len(), 7);
    assert_eq!(nodes.len(), 6);
    assert_eq!(network.links().len(), 7);

    let area = 15.0;
    let r_in = 1.0 / (7.7 * area);
    let r_out = 1.0 / (25.0 * area);
    let r_icp = 0.03 / (0.721 * area);
    let r_bwa = 0.19 / (0.811 * area);
    let r_ins = 0.06 / (0.035 * area);
    let r_ecp = 0.02 / (0.721 * area);

    let expected = [
        r_in + r_icp / 2.0,
        r_icp / 2.0,
        r_bwa / 2.0,
        r_bwa / 2.0,
        r_ins / 2.0,
        r_ins / 2.0 + r_ecp / 2.0,
    ];
    let mut prev = room;
    for (node, r) in nodes.iter().zip(expected) {
        assert!(close(network.resistance_between(prev, *node).unwrap(), r));
        prev = *node;
    }

    let ext = network.links().last().unwrap();
    assert_eq!(ext.from, prev);
    assert_eq!(ext.to, Endpoint::Boundary(outdoor));
    assert!(close(ext.resistance_k_per_w, r_ecp / 2.0 + r_out));

    let c_bwa = 1820.0 * 880.0 * 0.19 * area;
    let caps = network.capacitances();
    assert!(close(caps[2], c_bwa / 4.0));
    assert!(close(caps[3], c_bwa / 2.0));
    assert!(close(caps[4], c_bwa / 4.0));
    assert_eq!(network.node_names()[3], "brick[1]");

    // Subdividing moves resistance around but keeps the total.
    let series: f64 = network.links().iter().map(|l| l.resistance_k_per_w).sum();
    assert!(close(series, wall.total_resistance()));
}

#[test]
fn subdivided_single_layer_matches_surface_node_layout() {
    let wall = Wall::new(15.0, 7.7, 25.0)
        .with_layer(Layer::new("brick", 0.3, 0.811, 1820.0, 880.0).with_subdivisions(3));
    let mut builder = ThermalNetworkBuilder::new();
    let room = builder.add_node("room air", 72_247.0);
    let outdoor = builder.add_boundary("outdoor", 2.0);
    let nodes = builder.add_wall(room, &wall, outdoor).unwrap();
    let network = builder.build().unwrap();

    let r_in = 1.0 / (7.7 * 15.0);
    assert_eq!(nodes.len(), 3);
    // The interior face node sits directly behind the film.
    assert!(close(network.resistance_between(room, nodes[0]).unwrap(), r_in));
    assert!(close(
        network.resistance_between(nodes[0], nodes[1]).unwrap(),
        0.3 / (0.811 * 15.0) / 2.0
    ));
}

#[test]
fn two_rooms_can_share_a_partition() {
    let partition = Wall::new(10.0, 8.0, 8.0).with_layer(Layer::new("board", 0.1, 0.2, 800.0, 1000.0));
    let mut builder = ThermalNetworkBuilder::new();
    let a = builder.add_node("a", 50_000.0);
    let b = builder.add_node("b", 50_000.0);
    let out = builder.add_boundary("outdoor", 0.0);
    builder.add_wall(a, &partition, out).unwrap();
    builder.add_link(a, b, 0.05);
    let network = builder.build().unwrap();

    assert_eq!(network.node_links(a).len(), 2);
    assert_eq!(network.node_by_name("b"), Some(b));
    assert_eq!(network.boundary_by_name("outdoor"), Some(out));
}

#[test]
fn isolated_node_rejected() {
    let mut builder = ThermalNetworkBuilder::new();
    let a = builder.add_node("a", 1.0);
    let out = builder.add_boundary("outdoor", 0.0);
    builder.add_node("orphan", 1.0);
    builder.add_boundary_link(a, out, 1.0);

    let err = builder.build().unwrap_err();
    assert_eq!(
        err,
        NetworkError::Disconnected {
            name: "orphan".to_string()
        }
    );
}

#[test]
fn invalid_wall_leaves_builder_untouched() {
    let wall = Wall::new(15.0, 7.7, 25.0).with_layer(Layer::new("void", 0.0, 1.0, 1.0, 1.0));
    let mut builder = ThermalNetworkBuilder::new();
    let room = builder.add_node("room", 1.0);
    let out = builder.add_boundary("outdoor", 0.0);
    assert!(matches!(
        builder.add_wall(room, &wall, out),
        Err(NetworkError::InvalidLayer { .. })
    ));
    builder.add_boundary_link(room, out, 1.0);
    assert_eq!(builder.build().unwrap().len(), 1);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn layer_strategy() -> impl Strategy<Value = Layer> {
        (0.01f64..0.5, 0.02f64..2.0, 10.0f64..2500.0, 500.0f64..2000.0, 1usize..6).prop_map(
            |(thickness, k, rho, cp, m)| {
                Layer::new("layer", thickness, k, rho, cp).with_subdivisions(m)
            },
        )
    }

    proptest! {
        #[test]
        fn discretization_preserves_totals(
            mut layers in prop::collection::vec(layer_strategy(), 1..5),
            area in 1.0f64..50.0,
        ) {
            // Two subdivided layers in a row would share a face at zero resistance.
            for i in 1..layers.len() {
                if layers[i - 1].subdivisions > 1 {
                    layers[i].subdivisions = 1;
                }
            }
            let wall = layers.into_iter().fold(Wall::new(area, 7.7, 25.0), Wall::with_layer);
            let mut builder = ThermalNetworkBuilder::new();
            let room = builder.add_node("room air", 1.0e5);
            let outdoor = builder.add_boundary("outdoor", 0.0);
            let nodes = builder.add_wall(room, &wall, outdoor).unwrap();
            let network = builder.build().unwrap();

            let expected_nodes: usize = wall.layers.iter().map(|l| l.subdivisions).sum();
            prop_assert_eq!(nodes.len(), expected_nodes);

            // A chain: series resistance adds up to the air-to-air value.
            let series: f64 = network.links().iter().map(|l| l.resistance_k_per_w).sum();
            let tol = Tolerances::default();
            prop_assert!(nearly_equal(series, wall.total_resistance(), tol));

            let stored: f64 = nodes.iter().map(|id| network.node(*id).unwrap().capacitance_j_per_k).sum();
            let expected: f64 = wall.layers.iter().map(|l| l.capacitance(area)).sum();
            prop_assert!(nearly_equal(stored, expected, tol));
        }
    }
}
