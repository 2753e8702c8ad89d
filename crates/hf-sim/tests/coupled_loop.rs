//! Envelope, radiator and valve running together.

use hf_components::{Radiator, RadiatorSpec};
use hf_controls::{FirstOrderSensor, ThermostaticValve, ValveCharacteristic};
use hf_network::{Layer, ThermalNetworkBuilder, Wall};
use hf_sim::{CoupledModel, CoupledState, DiscreteModel, ExplicitUpdater, HeatingLoop, SimOptions, run_batch, run_sim};

fn model(initial_c: f64, setpoint_c: f64) -> CoupledModel {
    let wall = Wall::new(15.0, 7.7, 25.0)
        .with_layer(Layer::new("brick", 0.3, 0.811, 1820.0, 880.0).with_subdivisions(3));
    let mut builder = ThermalNetworkBuilder::new();
    let room = builder.add_node("room air", 1.204 * 1006.0 * 60.0);
    let outdoor = builder.add_boundary("outdoor", 2.0);
    builder.add_wall(room, &wall, outdoor).unwrap();
    let network = builder.build().unwrap();
    let updater = ExplicitUpdater::new(&network, 10.0).unwrap();

    let valve = ThermostaticValve::new(
        setpoint_c,
        FirstOrderSensor::from_gain(500.0).unwrap(),
        ValveCharacteristic::default(),
    )
    .unwrap();
    CoupledModel::new(updater, room, vec![initial_c; network.len()])
        .unwrap()
        .with_heating(HeatingLoop {
            radiator: Radiator::new(RadiatorSpec::default(), 10.0).unwrap(),
            supply_c: 90.0,
            valve: Some(valve),
            initial_radiator_c: initial_c + 2.0,
            initial_mass_flow_kgps: 0.1,
            initial_heat_output_w: 10.0,
        })
        .unwrap()
}

fn opts(steps: usize) -> SimOptions {
    SimOptions {
        dt_s: 10.0,
        steps,
        record_every: 1,
    }
}

#[test]
fn valve_closes_in_a_warm_room() {
    let mut m = model(25.0, 20.0);
    let record = run_sim(&mut m, &opts(50)).unwrap();

    for state in &record.x[1..] {
        assert_eq!(state.coupling.mass_flow_kgps, 0.0);
    }
    // With the valve shut after the first step only the first radiator step
    // sees inlet water.
    let temps: Vec<f64> = record
        .x
        .iter()
        .skip(2)
        .map(|s| s.radiator.as_ref().unwrap().mean_temperature_c())
        .collect();
    assert!(temps.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn cold_room_opens_valve_and_heats() {
    let mut m = model(15.0, 20.0);
    let record = run_sim(&mut m, &opts(2000)).unwrap();
    let first = &record.x[1];
    assert!(first.coupling.mass_flow_kgps > 0.0);

    let peak_flow = record
        .x
        .iter()
        .map(|s| s.coupling.mass_flow_kgps)
        .fold(0.0, f64::max);
    assert!(peak_flow <= 0.1);

    let (_, last) = record.last().unwrap();
    let radiator = last.radiator.as_ref().unwrap();
    assert!(radiator.segment_temperatures_c[0] > last.coupling.room_temperature_c);
    assert!(last.coupling.heat_output_w > 0.0);
    assert!(last.coupling.room_temperature_c > 15.0);
    assert!(last.coupling.room_temperature_c < 25.0);
}

#[test]
fn step_order_uses_stale_coupling() {
    let mut m = model(15.0, 20.0);
    let x0 = m.initial_state();
    let x1 = m.step(1, &x0).unwrap();
    let x2 = m.step(2, &x1).unwrap();

    // Step 2's radiator ran with the flow chosen at step 1.
    let radiator = &m.heating().unwrap().radiator;
    let expected = radiator.step(
        x1.radiator.as_ref().unwrap(),
        90.0,
        x1.coupling.mass_flow_kgps,
        x2.coupling.room_temperature_c,
    );
    assert_eq!(x2.radiator.as_ref().unwrap(), &expected.state);
    assert_eq!(x2.coupling.heat_output_w, expected.total_output_w);
}

#[test]
fn batch_matches_sequential_runs() {
    let jobs = vec![(model(15.0, 20.0), opts(300)), (model(18.0, 21.0), opts(300))];
    let batch = run_batch(jobs);

    let sequential: Vec<Vec<CoupledState>> = [(15.0, 20.0), (18.0, 21.0)]
        .into_iter()
        .map(|(t, sp)| run_sim(&mut model(t, sp), &opts(300)).unwrap().x)
        .collect();

    for (b, s) in batch.into_iter().zip(sequential) {
        assert_eq!(b.unwrap().x, s);
    }
}
