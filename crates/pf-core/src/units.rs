// pf-core/src/units.rs

use uom::si::f64::{
    Angle as UomAngle, ElectricalResistance as UomElectricalResistance, Frequency as UomFrequency,
    Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type Angle = UomAngle;
pub type Resistance = UomElectricalResistance;
pub type Frequency = UomFrequency;
pub type Time = UomTime;

#[inline]
pub fn ohms(v: f64) -> Resistance {
    use uom::si::electrical_resistance::ohm;
    Resistance::new::<ohm>(v)
}

#[inline]
pub fn hz(v: f64) -> Frequency {
    use uom::si::frequency::hertz;
    Frequency::new::<hertz>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn degrees(v: f64) -> Angle {
    use uom::si::angle::degree;
    Angle::new::<degree>(v)
}

/// Value of an angle in degrees.
#[inline]
pub fn in_degrees(a: Angle) -> f64 {
    use uom::si::angle::degree;
    a.get::<degree>()
}

pub mod constants {
    use super::*;

    /// Fundamental frequency of the distribution segment.
    pub const F_NOMINAL_HZ: f64 = 60.0;

    /// Samples per fundamental cycle of the reference acquisition.
    pub const SAMPLES_PER_CYCLE: usize = 100;

    #[inline]
    pub fn f_nominal() -> Frequency {
        hz(F_NOMINAL_HZ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _z = ohms(0.01);
        let _dt = s(1.0 / 6_000.0);
        let _f = constants::f_nominal();
    }

    #[test]
    fn degrees_round_trip() {
        let a = degrees(90.0);
        assert!((in_degrees(a) - 90.0).abs() < 1e-12);
        assert!((a.value - core::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }
}
