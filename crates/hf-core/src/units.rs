// hf-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, Energy as UomEnergy, Length as UomLength, MassRate as UomMassRate,
    Power as UomPower, TemperatureInterval as UomTemperatureInterval,
    ThermodynamicTemperature as UomThermodynamicTemperature, Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Energy = UomEnergy;
pub type Length = UomLength;
pub type MassRate = UomMassRate;
pub type Power = UomPower;
pub type TempInterval = UomTemperatureInterval;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;

#[inline]
pub fn degc(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn w(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn joules(v: f64) -> Energy {
    use uom::si::energy::joule;
    Energy::new::<joule>(v)
}

/// Temperature in degrees Celsius.
#[inline]
pub fn to_degc(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_celsius;
    t.get::<degree_celsius>()
}

#[inline]
pub fn to_watts(p: Power) -> f64 {
    use uom::si::power::watt;
    p.get::<watt>()
}

#[inline]
pub fn to_kwh(e: Energy) -> f64 {
    use uom::si::energy::kilowatt_hour;
    e.get::<kilowatt_hour>()
}

#[inline]
pub fn to_hours(t: Time) -> f64 {
    use uom::si::time::hour;
    t.get::<hour>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Tolerances, nearly_equal};

    #[test]
    fn constructors_smoke() {
        let _t = k(300.0);
        let _mdot = kgps(0.1);
        let _l = m(0.3);
        let _dt = s(10.0);
        let _q = w(276.0);
    }

    #[test]
    fn celsius_round_trip() {
        let tol = Tolerances::default();
        assert!(nearly_equal(to_degc(degc(20.0)), 20.0, tol));
        assert!(nearly_equal(to_degc(k(273.15)), 0.0, Tolerances { abs: 1e-9, rel: 1e-9 }));
    }

    #[test]
    fn energy_from_power_and_time() {
        let e = w(1000.0) * s(3600.0);
        assert!(nearly_equal(to_kwh(e), 1.0, Tolerances::default()));
        assert!(nearly_equal(to_kwh(joules(3.6e6)), 1.0, Tolerances::default()));
        assert!(nearly_equal(to_hours(s(7200.0)), 2.0, Tolerances::default()));
    }
}
