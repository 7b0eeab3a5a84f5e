//! Humid-air properties.
//!
//! Charts only talk to the [`HumidAir`] trait; [`Ashrae`] implements it with
//! the SI correlations of the ASHRAE Handbook of Fundamentals (2017, ch. 1).
//! Temperatures are dry-bulb in °C, pressures in Pa, humidity ratios in
//! kg water / kg dry air, enthalpies in J / kg dry air.
//!
//! Inputs outside a correlation's range give NaN instead of an error, so a
//! curve crossing the edge of validity renders with a gap.

/// Standard atmospheric pressure at sea level, Pa.
pub const STANDARD_PRESSURE: f64 = 101_325.0;

/// Latent heat of vaporization of water at 0 °C, J/kg.
pub const H_EVAP_H2O_0_CELSIUS: f64 = 2.501e6;

/// Specific heat of dry air used to turn enthalpy bounds into temperature bounds, J/kg·K.
pub const CP_DRY_AIR: f64 = 1.006e3;

const ZERO_CELSIUS_AS_KELVIN: f64 = 273.15;
const R_DRY_AIR: f64 = 287.042;
const TRIPLE_POINT_WATER: f64 = 0.01;
const MIN_HUM_RATIO: f64 = 1e-7;
const MOLAR_MASS_RATIO: f64 = 0.621945;
const VOLUME_VAPOUR_FACTOR: f64 = 1.607858;

/// Valid temperature range of the saturation pressure correlation, °C.
pub const T_DRY_BULB_RANGE: (f64, f64) = (-100.0, 200.0);

/// Property functions a psychrometric chart needs.
pub trait HumidAir {
    /// Saturation vapour pressure over water (or ice below the triple point).
    fn sat_vap_pres(&self, t_dry_bulb: f64) -> f64;

    /// Humidity ratio from vapour partial pressure.
    fn hum_ratio_from_vap_pres(&self, vap_pres: f64, pressure: f64) -> f64;

    /// Moist-air enthalpy.
    fn moist_air_enthalpy(&self, t_dry_bulb: f64, hum_ratio: f64) -> f64;

    /// Specific volume per kg of dry air, m³/kg.
    fn moist_air_volume(&self, t_dry_bulb: f64, hum_ratio: f64, pressure: f64) -> f64;

    /// Dry-bulb temperature from specific volume and humidity ratio.
    fn t_dry_bulb_from_volume_and_hum_ratio(
        &self,
        volume: f64,
        hum_ratio: f64,
        pressure: f64,
    ) -> f64;

    /// Barometric pressure at an altitude in m.
    fn standard_pressure(&self, altitude: f64) -> f64;

    fn hum_ratio_from_rel_hum(&self, t_dry_bulb: f64, rel_hum: f64, pressure: f64) -> f64 {
        if !(0.0..=1.0).contains(&rel_hum) {
            return f64::NAN;
        }
        let vap_pres = rel_hum * self.sat_vap_pres(t_dry_bulb);
        self.hum_ratio_from_vap_pres(vap_pres, pressure)
    }

    fn sat_hum_ratio(&self, t_dry_bulb: f64, pressure: f64) -> f64 {
        self.hum_ratio_from_vap_pres(self.sat_vap_pres(t_dry_bulb), pressure)
    }

    fn sat_air_enthalpy(&self, t_dry_bulb: f64, pressure: f64) -> f64 {
        self.moist_air_enthalpy(t_dry_bulb, self.sat_hum_ratio(t_dry_bulb, pressure))
    }

    /// Density of moist air, kg / m³ of mixture.
    fn moist_air_density(&self, t_dry_bulb: f64, hum_ratio: f64, pressure: f64) -> f64 {
        (1.0 + hum_ratio) / self.moist_air_volume(t_dry_bulb, hum_ratio, pressure)
    }
}

/// ASHRAE Handbook correlations (Hyland–Wexler saturation pressure).
#[derive(Debug, Clone, Copy, Default)]
pub struct Ashrae;

impl HumidAir for Ashrae {
    fn sat_vap_pres(&self, t_dry_bulb: f64) -> f64 {
        let (lo, hi) = T_DRY_BULB_RANGE;
        if !(lo..=hi).contains(&t_dry_bulb) {
            return f64::NAN;
        }

        let t = t_dry_bulb + ZERO_CELSIUS_AS_KELVIN;
        let ln_pws = if t_dry_bulb <= TRIPLE_POINT_WATER {
            -5.674_535_9e3 / t + 6.392_524_7 - 9.677_843e-3 * t + 6.221_570_1e-7 * t.powi(2)
                + 2.074_782_5e-9 * t.powi(3)
                - 9.484_024e-13 * t.powi(4)
                + 4.163_501_9 * t.ln()
        } else {
            -5.800_220_6e3 / t + 1.391_499_3 - 4.864_023_9e-2 * t + 4.176_476_8e-5 * t.powi(2)
                - 1.445_209_3e-8 * t.powi(3)
                + 6.545_967_3 * t.ln()
        };
        ln_pws.exp()
    }

    fn hum_ratio_from_vap_pres(&self, vap_pres: f64, pressure: f64) -> f64 {
        if !(vap_pres >= 0.0 && vap_pres < pressure) {
            return f64::NAN;
        }
        (MOLAR_MASS_RATIO * vap_pres / (pressure - vap_pres)).max(MIN_HUM_RATIO)
    }

    fn moist_air_enthalpy(&self, t_dry_bulb: f64, hum_ratio: f64) -> f64 {
        if hum_ratio < 0.0 {
            return f64::NAN;
        }
        let w = hum_ratio.max(MIN_HUM_RATIO);
        (1.006 * t_dry_bulb + w * (2501.0 + 1.86 * t_dry_bulb)) * 1000.0
    }

    fn moist_air_volume(&self, t_dry_bulb: f64, hum_ratio: f64, pressure: f64) -> f64 {
        if hum_ratio < 0.0 {
            return f64::NAN;
        }
        let w = hum_ratio.max(MIN_HUM_RATIO);
        R_DRY_AIR * (t_dry_bulb + ZERO_CELSIUS_AS_KELVIN) * (1.0 + VOLUME_VAPOUR_FACTOR * w)
            / pressure
    }

    fn t_dry_bulb_from_volume_and_hum_ratio(
        &self,
        volume: f64,
        hum_ratio: f64,
        pressure: f64,
    ) -> f64 {
        if hum_ratio < 0.0 {
            return f64::NAN;
        }
        let w = hum_ratio.max(MIN_HUM_RATIO);
        volume * pressure / (R_DRY_AIR * (1.0 + VOLUME_VAPOUR_FACTOR * w)) - ZERO_CELSIUS_AS_KELVIN
    }

    fn standard_pressure(&self, altitude: f64) -> f64 {
        STANDARD_PRESSURE * (1.0 - 2.255_77e-5 * altitude).powf(5.2559)
    }
}

/// Saturation states tabulated from -100 °C up to the boiling point at a
/// given pressure (exclusive), used to find where a density line meets the
/// saturation curve.
#[derive(Debug, Clone)]
pub struct SaturationTable {
    pub t_dry_bulb: Vec<f64>,
    pub hum_ratio: Vec<f64>,
    pub density: Vec<f64>,
}

impl SaturationTable {
    pub const DEFAULT_POINTS: usize = 100;

    pub fn new(air: &dyn HumidAir, pressure: f64, num: usize) -> Self {
        let t_min = T_DRY_BULB_RANGE.0;
        let t_max = boiling_point(air, pressure);
        let step = (t_max - t_min) / num as f64;

        let t_dry_bulb: Vec<f64> = (0..num).map(|i| t_min + step * i as f64).collect();
        let hum_ratio: Vec<f64> = t_dry_bulb
            .iter()
            .map(|&t| air.sat_hum_ratio(t, pressure))
            .collect();
        let density = t_dry_bulb
            .iter()
            .zip(&hum_ratio)
            .map(|(&t, &w)| air.moist_air_density(t, w, pressure))
            .collect();

        Self {
            t_dry_bulb,
            hum_ratio,
            density,
        }
    }

    /// Saturation humidity ratio whose state has the given density, by linear
    /// interpolation between table rows. `None` outside the tabulated range.
    pub fn hum_ratio_at_density(&self, density: f64) -> Option<f64> {
        self.density
            .windows(2)
            .zip(self.hum_ratio.windows(2))
            .find_map(|(rho, w)| {
                let (lo, hi) = if rho[0] <= rho[1] {
                    (rho[0], rho[1])
                } else {
                    (rho[1], rho[0])
                };
                if !(lo <= density && density <= hi) {
                    return None;
                }
                if rho[1] == rho[0] {
                    return Some(w[0]);
                }
                let frac = (density - rho[0]) / (rho[1] - rho[0]);
                Some(w[0] + frac * (w[1] - w[0]))
            })
    }
}

/// Temperature at which the saturation pressure reaches `pressure`, clamped
/// to the correlation's range.
pub fn boiling_point(air: &dyn HumidAir, pressure: f64) -> f64 {
    let (mut lo, mut hi) = T_DRY_BULB_RANGE;
    if air.sat_vap_pres(hi) <= pressure {
        return hi;
    }
    if air.sat_vap_pres(lo) >= pressure {
        return lo;
    }
    for _ in 0..80 {
        let mid = 0.5 * (lo + hi);
        if air.sat_vap_pres(mid) < pressure {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn saturation_pressure_matches_handbook_table() {
        let air = Ashrae;
        assert_relative_eq!(air.sat_vap_pres(20.0), 2339.3, max_relative = 1e-3);
        assert_relative_eq!(air.sat_vap_pres(-10.0), 259.9, max_relative = 2e-3);
        assert_relative_eq!(air.sat_vap_pres(100.0), 101_418.0, max_relative = 2e-3);
        assert!(air.sat_vap_pres(-150.0).is_nan());
        assert!(air.sat_vap_pres(250.0).is_nan());
    }

    #[test]
    fn humidity_ratio_at_saturation() {
        let air = Ashrae;
        let w = air.sat_hum_ratio(20.0, STANDARD_PRESSURE);
        assert_relative_eq!(w, 0.014_70, max_relative = 2e-3);
        assert_eq!(
            air.hum_ratio_from_rel_hum(20.0, 1.0, STANDARD_PRESSURE),
            w
        );
        assert!(air.hum_ratio_from_rel_hum(20.0, 1.5, STANDARD_PRESSURE).is_nan());
    }

    #[test]
    fn enthalpy_of_dry_and_moist_air() {
        let air = Ashrae;
        assert_relative_eq!(air.moist_air_enthalpy(20.0, 0.0), 20_120.0, max_relative = 1e-3);
        assert_relative_eq!(
            air.moist_air_enthalpy(20.0, 0.01),
            (1.006 * 20.0 + 0.01 * (2501.0 + 1.86 * 20.0)) * 1000.0,
            max_relative = 1e-12
        );
        assert!(air.moist_air_enthalpy(20.0, -0.1).is_nan());
    }

    #[test]
    fn volume_and_temperature_are_inverse() {
        let air = Ashrae;
        let v = air.moist_air_volume(25.0, 0.008, STANDARD_PRESSURE);
        let t = air.t_dry_bulb_from_volume_and_hum_ratio(v, 0.008, STANDARD_PRESSURE);
        assert_relative_eq!(t, 25.0, epsilon = 1e-9);
        assert_relative_eq!(air.moist_air_density(20.0, 0.0, STANDARD_PRESSURE), 1.204, max_relative = 1e-3);
    }

    #[test]
    fn standard_pressure_at_sea_level_and_altitude() {
        let air = Ashrae;
        assert_eq!(air.standard_pressure(0.0), STANDARD_PRESSURE);
        assert_relative_eq!(air.standard_pressure(1500.0), 84_556.0, max_relative = 1e-3);
    }

    #[test]
    fn boiling_point_near_one_hundred() {
        let t = boiling_point(&Ashrae, STANDARD_PRESSURE);
        assert!((t - 100.0).abs() < 0.1, "boiling point {t}");
        assert_eq!(boiling_point(&Ashrae, 1e9), T_DRY_BULB_RANGE.1);
    }

    #[test]
    fn density_interpolation_inside_and_outside_table() {
        let table = SaturationTable::new(&Ashrae, STANDARD_PRESSURE, SaturationTable::DEFAULT_POINTS);
        assert_eq!(table.t_dry_bulb.len(), SaturationTable::DEFAULT_POINTS);

        let w = table.hum_ratio_at_density(1.2).expect("inside table");
        let t = table
            .t_dry_bulb
            .iter()
            .zip(&table.hum_ratio)
            .find(|(_, tw)| **tw >= w)
            .map(|(&t, _)| t)
            .expect("row");
        assert!(t > 0.0 && t < 30.0);

        assert!(table.hum_ratio_at_density(10.0).is_none());
    }
}
