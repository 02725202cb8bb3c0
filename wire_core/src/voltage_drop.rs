//! # Voltage Drop & Power Loss
//!
//! Circuit formulas shared by every sizing engine.
//!
//! ```text
//! single-phase  VD = 2 · I · L · (R·cosφ + X·sinφ) / scale
//! three-phase   VD = √3 · I · L · (R·cosφ + X·sinφ) / scale
//! DC            VD = 2 · I · L · R / scale
//!
//! power loss    P  = k · I² · R · L / scale      k = 1 (1φ, DC), 3 (3φ)
//! efficiency    η  = (V − VD) / V · 100
//! ```
//!
//! `R` and `X` are per conductor in the owning table's unit, and `L` is the
//! one-way run length in the matching length unit. The scale is kept per
//! standard rather than unified: NEC/DC tables are Ω per 1000 ft with
//! length in feet, metric tables are Ω per km with length in metres.

use serde::{Deserialize, Serialize};

use crate::standards::VoltageSystem;
use crate::units::LengthUnit;

/// Length normalization of a reference table's impedance figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthScale {
    /// Ω per 1000 ft, run length in feet
    PerThousandFeet,
    /// Ω per km, run length in metres
    PerKilometre,
}

impl LengthScale {
    /// Run lengths per tabulated impedance unit
    pub fn divisor(&self) -> f64 {
        match self {
            LengthScale::PerThousandFeet => 1000.0,
            LengthScale::PerKilometre => 1000.0,
        }
    }

    /// Length unit the run length must be expressed in
    pub fn length_unit(&self) -> LengthUnit {
        match self {
            LengthScale::PerThousandFeet => LengthUnit::Feet,
            LengthScale::PerKilometre => LengthUnit::Meters,
        }
    }
}

/// Per-conductor impedance after material adjustment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impedance {
    pub resistance: f64,
    pub reactance: f64,
}

/// One circuit run to evaluate against a conductor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitRun {
    pub system: VoltageSystem,
    /// Load current (A)
    pub current: f64,
    /// One-way length in the scale's length unit
    pub length: f64,
    /// Supply voltage (V); line-to-line for three-phase
    pub voltage: f64,
    /// cos φ, ignored for DC
    pub power_factor: f64,
    pub scale: LengthScale,
}

/// Voltage drop, loss and efficiency of a run through one conductor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropAnalysis {
    pub volts: f64,
    pub percent: f64,
    pub power_loss_w: f64,
    pub efficiency_percent: f64,
}

/// Effective impedance term `R·cosφ + X·sinφ` (just `R` for DC)
pub fn effective_impedance(system: VoltageSystem, impedance: Impedance, power_factor: f64) -> f64 {
    match system {
        VoltageSystem::Dc => impedance.resistance,
        VoltageSystem::SinglePhase | VoltageSystem::ThreePhase => {
            let cos_phi = power_factor.clamp(0.0, 1.0);
            let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();
            impedance.resistance * cos_phi + impedance.reactance * sin_phi
        }
    }
}

/// Voltage drop in volts
pub fn voltage_drop_volts(run: &CircuitRun, impedance: Impedance) -> f64 {
    let multiplier = match run.system {
        VoltageSystem::SinglePhase | VoltageSystem::Dc => 2.0,
        VoltageSystem::ThreePhase => 3f64.sqrt(),
    };
    multiplier * run.current * run.length * effective_impedance(run.system, impedance, run.power_factor)
        / run.scale.divisor()
}

/// Resistive power loss in watts
pub fn power_loss_watts(run: &CircuitRun, resistance: f64) -> f64 {
    let multiplier = match run.system {
        VoltageSystem::SinglePhase | VoltageSystem::Dc => 1.0,
        VoltageSystem::ThreePhase => 3.0,
    };
    multiplier * run.current.powi(2) * resistance * run.length / run.scale.divisor()
}

/// Delivered fraction of supply voltage, as a percentage
pub fn efficiency_percent(voltage: f64, drop_volts: f64) -> f64 {
    (voltage - drop_volts) / voltage * 100.0
}

/// Full analysis of a run through one conductor
pub fn analyze(run: &CircuitRun, impedance: Impedance) -> DropAnalysis {
    let volts = voltage_drop_volts(run, impedance);
    DropAnalysis {
        volts,
        percent: volts / run.voltage * 100.0,
        power_loss_w: power_loss_watts(run, impedance.resistance),
        efficiency_percent: efficiency_percent(run.voltage, volts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(system: VoltageSystem) -> CircuitRun {
        CircuitRun {
            system,
            current: 15.0,
            length: 50.0,
            voltage: 120.0,
            power_factor: 1.0,
            scale: LengthScale::PerThousandFeet,
        }
    }

    const TWELVE_AWG: Impedance = Impedance {
        resistance: 2.0,
        reactance: 0.054,
    };

    #[test]
    fn test_single_phase_unity_pf() {
        // 2 × 15 × 50 × 2.0 / 1000 = 3.0 V
        let drop = analyze(&run(VoltageSystem::SinglePhase), TWELVE_AWG);
        assert!((drop.volts - 3.0).abs() < 1e-9);
        assert!((drop.percent - 2.5).abs() < 1e-9);
        assert!((drop.efficiency_percent - 97.5).abs() < 1e-9);
    }

    #[test]
    fn test_three_phase_uses_root_three() {
        let single = voltage_drop_volts(&run(VoltageSystem::SinglePhase), TWELVE_AWG);
        let three = voltage_drop_volts(&run(VoltageSystem::ThreePhase), TWELVE_AWG);
        assert!((three / single - 3f64.sqrt() / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_dc_ignores_reactance_and_power_factor() {
        let mut dc = run(VoltageSystem::Dc);
        dc.power_factor = 0.5;
        let volts = voltage_drop_volts(&dc, TWELVE_AWG);
        assert!((volts - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_reactance_term_at_lagging_pf() {
        let mut ac = run(VoltageSystem::SinglePhase);
        ac.power_factor = 0.8;
        // R·0.8 + X·0.6
        let z = effective_impedance(ac.system, TWELVE_AWG, ac.power_factor);
        assert!((z - (1.6 + 0.054 * 0.6)).abs() < 1e-12);
    }

    #[test]
    fn test_power_loss_multipliers() {
        // 1 × 15² × 2.0 × 50 / 1000 = 22.5 W
        let single = power_loss_watts(&run(VoltageSystem::SinglePhase), 2.0);
        assert!((single - 22.5).abs() < 1e-9);
        let three = power_loss_watts(&run(VoltageSystem::ThreePhase), 2.0);
        assert!((three - 67.5).abs() < 1e-9);
    }

    #[test]
    fn test_metric_scale() {
        let metric = CircuitRun {
            system: VoltageSystem::SinglePhase,
            current: 16.0,
            length: 25.0,
            voltage: 230.0,
            power_factor: 1.0,
            scale: LengthScale::PerKilometre,
        };
        let drop = analyze(
            &metric,
            Impedance {
                resistance: 7.41,
                reactance: 0.1,
            },
        );
        // 2 × 16 × 25 × 7.41 / 1000 = 5.928 V
        assert!((drop.volts - 5.928).abs() < 1e-9);
        assert_eq!(LengthScale::PerKilometre.length_unit(), LengthUnit::Meters);
    }
}
