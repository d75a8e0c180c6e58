//! Standard-atmosphere model: density, speed of sound, and the pressure
//! lapse with altitude.

use crate::error::DimensionError;
use crate::units::{Quantity, Unit};

/// ICAO lapse rate, K/m.
const LAPSE_RATE: f64 = 0.0065;
/// Standard gravity, m/s^2.
const G: f64 = 9.80665;
/// Molar mass of dry air, kg/mol.
const MOLAR_MASS_AIR: f64 = 0.0289644;
/// Universal gas constant, J/(mol*K).
const UNIVERSAL_GAS_CONSTANT: f64 = 8.31432;
/// Specific gas constant for dry air, J/(kg*K).
const R_DRY: f64 = 287.058;
/// Specific gas constant for water vapor, J/(kg*K).
const R_VAPOR: f64 = 461.495;
/// Ratio of specific heats for air.
const GAMMA: f64 = 1.4;

/// Capability contract a solver needs from an atmosphere: a named trait
/// rather than a duck-typed bundle of functions.
pub trait AtmosphereModel {
    /// Air density (kg/m^3) at `altitude_offset_m` above this atmosphere's
    /// reference altitude.
    fn density_at(&self, altitude_offset_m: f64) -> f64;
    /// Speed of sound (m/s) at `altitude_offset_m` above this atmosphere's
    /// reference altitude.
    fn speed_of_sound_at(&self, altitude_offset_m: f64) -> f64;
}

/// A shooter's local atmosphere: reference altitude, pressure, temperature,
/// humidity, and an optional powder-temperature sensitivity coefficient
/// (fraction of muzzle velocity change per degree of powder temperature
/// deviation from the ammunition's rated temperature; `None` disables the
/// correction).
#[derive(Debug, Clone, Copy)]
pub struct Atmosphere {
    altitude: Quantity,
    pressure: Quantity,
    temperature: Quantity,
    humidity: f64,
    powder_sensitivity: Option<f64>,
}

impl Atmosphere {
    pub fn new(
        altitude: Quantity,
        pressure: Quantity,
        temperature: Quantity,
        humidity: f64,
        powder_sensitivity: Option<f64>,
    ) -> Result<Self, DimensionError> {
        if temperature.canonical() <= 0.0 {
            return Err(DimensionError::OutOfDomain {
                dimension: temperature.dimension(),
                value: temperature.canonical(),
            });
        }
        if pressure.canonical() <= 0.0 {
            return Err(DimensionError::OutOfDomain {
                dimension: pressure.dimension(),
                value: pressure.canonical(),
            });
        }
        Ok(Self {
            altitude,
            pressure,
            temperature,
            humidity: humidity.clamp(0.0, 1.0),
            powder_sensitivity,
        })
    }

    /// ICAO standard atmosphere at sea level, zero humidity.
    pub fn icao_standard() -> Self {
        Self::new(
            Quantity::new(0.0, Unit::Meter),
            Quantity::new(101_325.0, Unit::Pascal),
            Quantity::new(288.15, Unit::Kelvin),
            0.0,
            None,
        )
        .expect("ICAO standard parameters are always valid")
    }

    pub fn altitude(&self) -> Quantity {
        self.altitude
    }

    pub fn temperature(&self) -> Quantity {
        self.temperature
    }

    pub fn pressure(&self) -> Quantity {
        self.pressure
    }

    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    pub fn powder_sensitivity(&self) -> Option<f64> {
        self.powder_sensitivity
    }

    /// Density ratio against the ICAO sea-level reference (1.225 kg/m^3),
    /// as used to scale drag deceleration in the integrator's force model.
    pub fn density_ratio_at(&self, altitude_offset_m: f64) -> f64 {
        self.density_at(altitude_offset_m) / 1.225
    }

    /// Density at the atmosphere's own reference conditions, with the
    /// Tetens humidity correction applied.
    fn reference_density(&self) -> f64 {
        let t_k = self.temperature.canonical();
        let t_c = t_k - 273.15;
        let p_pa = self.pressure.canonical();

        // Tetens saturation vapor pressure, Pa.
        let es = 610.94 * ((17.625 * t_c) / (t_c + 243.04)).exp();
        let e = self.humidity * es;
        let pd = (p_pa - e).max(0.0);

        pd / (R_DRY * t_k) + e / (R_VAPOR * t_k)
    }

    fn local_temperature(&self, altitude_offset_m: f64) -> f64 {
        (self.temperature.canonical() - LAPSE_RATE * altitude_offset_m).max(1.0)
    }
}

impl AtmosphereModel for Atmosphere {
    fn density_at(&self, altitude_offset_m: f64) -> f64 {
        let t0 = self.temperature.canonical();
        let rho0 = self.reference_density();
        let exponent = (G * MOLAR_MASS_AIR) / (UNIVERSAL_GAS_CONSTANT * LAPSE_RATE) - 1.0;
        let ratio = (1.0 - LAPSE_RATE * altitude_offset_m / t0).max(1e-6);
        rho0 * ratio.powf(exponent)
    }

    fn speed_of_sound_at(&self, altitude_offset_m: f64) -> f64 {
        let t = self.local_temperature(altitude_offset_m);
        (GAMMA * (UNIVERSAL_GAS_CONSTANT / MOLAR_MASS_AIR) * t).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icao_standard_density_is_about_1_225() {
        let atmos = Atmosphere::icao_standard();
        let rho = atmos.density_at(0.0);
        assert!((rho - 1.225).abs() < 0.01, "rho = {rho}");
    }

    #[test]
    fn speed_of_sound_at_15c_is_about_340() {
        let atmos = Atmosphere::icao_standard();
        let a = atmos.speed_of_sound_at(0.0);
        assert!((a - 340.0).abs() < 2.0, "a = {a}");
    }

    #[test]
    fn density_decreases_with_altitude() {
        let atmos = Atmosphere::icao_standard();
        let low = atmos.density_at(0.0);
        let high = atmos.density_at(3000.0);
        assert!(high < low);
    }

    #[test]
    fn humidity_reduces_density() {
        let dry = Atmosphere::new(
            Quantity::new(0.0, Unit::Meter),
            Quantity::new(101_325.0, Unit::Pascal),
            Quantity::new(303.15, Unit::Kelvin),
            0.0,
            None,
        )
        .unwrap();
        let humid = Atmosphere::new(
            Quantity::new(0.0, Unit::Meter),
            Quantity::new(101_325.0, Unit::Pascal),
            Quantity::new(303.15, Unit::Kelvin),
            1.0,
            None,
        )
        .unwrap();
        assert!(humid.density_at(0.0) < dry.density_at(0.0));
    }

    #[test]
    fn non_positive_temperature_is_rejected() {
        let result = Atmosphere::new(
            Quantity::new(0.0, Unit::Meter),
            Quantity::new(101_325.0, Unit::Pascal),
            Quantity::new(-1.0, Unit::Kelvin),
            0.0,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn humidity_outside_unit_interval_is_clamped() {
        let atmos = Atmosphere::new(
            Quantity::new(0.0, Unit::Meter),
            Quantity::new(101_325.0, Unit::Pascal),
            Quantity::new(288.15, Unit::Kelvin),
            1.5,
            None,
        )
        .unwrap();
        assert_eq!(atmos.humidity(), 1.0);
    }
}
