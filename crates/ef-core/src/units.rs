// ef-core/src/units.rs

use uom::si::f64::{
    Capacitance as UomCapacitance, ElectricPotential as UomElectricPotential,
    ElectricalResistance as UomElectricalResistance, Frequency as UomFrequency,
    Inductance as UomInductance, Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type Resistance = UomElectricalResistance;
pub type Capacitance = UomCapacitance;
pub type Inductance = UomInductance;
pub type Voltage = UomElectricPotential;
pub type Frequency = UomFrequency;
pub type Time = UomTime;

#[inline]
pub fn ohm(v: f64) -> Resistance {
    use uom::si::electrical_resistance::ohm;
    Resistance::new::<ohm>(v)
}

#[inline]
pub fn farad(v: f64) -> Capacitance {
    use uom::si::capacitance::farad;
    Capacitance::new::<farad>(v)
}

#[inline]
pub fn henry(v: f64) -> Inductance {
    use uom::si::inductance::henry;
    Inductance::new::<henry>(v)
}

#[inline]
pub fn volt(v: f64) -> Voltage {
    use uom::si::electric_potential::volt;
    Voltage::new::<volt>(v)
}

#[inline]
pub fn hertz(v: f64) -> Frequency {
    use uom::si::frequency::hertz;
    Frequency::new::<hertz>(v)
}

/// Display symbols for component values.
pub mod symbols {
    pub const OHM: &str = "Ω";
    pub const FARAD: &str = "F";
    pub const HENRY: &str = "H";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _r = ohm(4_700.0);
        let _c = farad(100e-9);
        let _l = henry(470e-6);
        let _v = volt(3.3);
        let _f = hertz(38e3);
    }

    #[test]
    fn rc_product_is_time() {
        use uom::si::time::second;
        let tau: Time = ohm(1_000.0) * farad(1e-6);
        assert!((tau.get::<second>() - 1e-3).abs() < 1e-15);
    }
}
