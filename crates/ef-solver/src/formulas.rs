//! Typed closed-form formulas for common passive networks.
//!
//! These are the expressions a combination closure usually wraps; keeping
//! them on `uom` quantities catches R/C mix-ups at compile time.

use ef_core::units::{
    Capacitance, Frequency, Inductance, Resistance, Time, Voltage, farad, hertz, ohm,
};
use std::f64::consts::PI;

pub fn series_resistance(parts: &[Resistance]) -> Resistance {
    parts.iter().fold(ohm(0.0), |acc, &r| acc + r)
}

pub fn parallel_resistance(parts: &[Resistance]) -> Resistance {
    ohm(1.0 / parts.iter().map(|r| r.value.recip()).sum::<f64>())
}

pub fn parallel_capacitance(parts: &[Capacitance]) -> Capacitance {
    parts.iter().fold(farad(0.0), |acc, &c| acc + c)
}

/// Unloaded output of a resistive divider.
pub fn divider_output(vin: Voltage, top: Resistance, bottom: Resistance) -> Voltage {
    vin * (bottom.value / (top.value + bottom.value))
}

/// Output of a regulator whose feedback pin regulates to `vref` through a
/// divider: `vref * (1 + top / bottom)`.
pub fn feedback_output(vref: Voltage, top: Resistance, bottom: Resistance) -> Voltage {
    vref * (1.0 + top.value / bottom.value)
}

pub fn time_constant(r: Resistance, c: Capacitance) -> Time {
    r * c
}

/// -3 dB corner of a first-order RC filter.
pub fn rc_cutoff(r: Resistance, c: Capacitance) -> Frequency {
    hertz(1.0 / (2.0 * PI * time_constant(r, c).value))
}

pub fn lc_resonance(l: Inductance, c: Capacitance) -> Frequency {
    hertz(1.0 / (2.0 * PI * (l.value * c.value).sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ef_core::units::{henry, volt};

    #[test]
    fn resistor_networks() {
        let total = series_resistance(&[ohm(180.0), ohm(820.0)]);
        assert_eq!(total.value, 1000.0);
        let both = parallel_resistance(&[ohm(1000.0), ohm(1000.0)]);
        assert_eq!(both.value, 500.0);
    }

    #[test]
    fn capacitors_add_in_parallel() {
        let c = parallel_capacitance(&[farad(100e-9), farad(220e-9)]);
        assert!((c.value - 320e-9).abs() < 1e-18);
    }

    #[test]
    fn dividers() {
        let v = divider_output(volt(12.0), ohm(3000.0), ohm(1000.0));
        assert_eq!(v.value, 3.0);
        let v = feedback_output(volt(0.8), ohm(27_500.0), ohm(10_000.0));
        assert!((v.value - 3.0).abs() < 1e-12);
    }

    #[test]
    fn corner_frequencies() {
        let f = rc_cutoff(ohm(1_000.0), farad(1e-6));
        assert!((f.value - 159.154_943).abs() < 1e-5);
        let f = lc_resonance(henry(1e-3), farad(1e-6));
        assert!((f.value - 5_032.921_2).abs() < 1e-3);
    }
}
