//! Valve driving a crude room model.

use hf_controls::{FirstOrderSensor, ThermostaticValve, ValveCharacteristic, ValveState};

#[test]
fn valve_holds_room_near_setpoint() {
    let valve = ThermostaticValve::new(
        20.0,
        FirstOrderSensor::from_gain(500.0).unwrap(),
        ValveCharacteristic::default(),
    )
    .unwrap();

    // Room heated in proportion to flow, losing heat to 2 °C outdoors.
    let dt = 10.0;
    let capacitance = 2.0e5;
    let ua = 30.0;
    let mut room = 15.0;
    let mut state = ValveState::default();
    for _ in 0..20_000 {
        let heat = 40_000.0 * state.mass_flow_kgps;
        room += dt / capacitance * (heat - ua * (room - 2.0));
        state = valve.update(&state, room, dt);
        assert!(state.mass_flow_kgps >= 0.0 && state.mass_flow_kgps <= 0.1);
    }

    assert!((room - 20.0).abs() < 1.0, "room settled at {room}");
}
