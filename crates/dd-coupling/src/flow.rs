//! Signed flow through an opening for a given regime.

use crate::common::{DischargeCoefficients, Heads, OpeningGeometry};
use crate::regime::CouplingRegime;
use dd_core::constants::GRAVITY_FT_PER_S2;

/// Flow through one opening (ft³/s).
///
/// Positive means surface → node, negative node → surface.
pub fn coupling_flow(
    regime: CouplingRegime,
    heads: Heads,
    geometry: OpeningGeometry,
    coeffs: DischargeCoefficients,
) -> f64 {
    let head_up = heads.overland.max(heads.node);
    let head_down = heads.overland.min(heads.node);
    let head_diff = head_up - head_down;
    let depth_up = head_up - heads.crest;
    let two_g = 2.0 * GRAVITY_FT_PER_S2;

    let magnitude = match regime {
        CouplingRegime::Orifice => coeffs.orifice * geometry.area() * (two_g * head_diff).sqrt(),
        CouplingRegime::FreeWeir => {
            (2.0 / 3.0) * coeffs.free_weir * geometry.weir_width() * depth_up.powf(1.5)
                * two_g.sqrt()
        }
        CouplingRegime::SubmergedWeir => {
            coeffs.submerged_weir * geometry.weir_width() * depth_up * (two_g * head_diff).sqrt()
        }
        CouplingRegime::NoFlow | CouplingRegime::NoCoupling => return 0.0,
    };

    heads.flow_sign() * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regime::classify;

    const M: f64 = 0.3048;
    const M3: f64 = M * M * M;

    fn coeffs() -> DischargeCoefficients {
        DischargeCoefficients::new(0.167, 0.54, 0.056).unwrap()
    }

    /// Metric inputs → (regime, flow in m³/s), computed in feet internally.
    fn metric_case(
        crest: f64,
        node: f64,
        overland: f64,
        area: f64,
        width: f64,
    ) -> (CouplingRegime, f64) {
        let heads = Heads::new(crest / M, node / M, overland / M);
        let geometry = OpeningGeometry::new(area / (M * M), width / M).unwrap();
        let regime = classify(heads, geometry.area(), geometry.weir_width());
        let q = coupling_flow(regime, heads, geometry, coeffs());
        (regime, q * M3)
    }

    #[test]
    fn overflow_orifice() {
        let (regime, q) = metric_case(2.0, 3.0, 2.0, 25.0, 1.0);
        assert_eq!(regime, CouplingRegime::Orifice);
        assert!((q - (-18.49294)).abs() < 0.005, "q = {q}");
    }

    #[test]
    fn free_weir() {
        let (regime, q) = metric_case(2.0, 1.0, 3.0, 10.0, 5.0);
        assert_eq!(regime, CouplingRegime::FreeWeir);
        assert!((q - 7.973).abs() < 0.005, "q = {q}");
    }

    #[test]
    fn drainage_orifice_and_submerged_weir() {
        let (regime, q) = metric_case(2.0, 3.0, 4.0, 10.0, 5.0);
        assert_eq!(regime, CouplingRegime::Orifice);
        assert!((q - 7.39717).abs() < 0.005, "q = {q}");

        let (regime, q) = metric_case(2.0, 3.0, 3.5, 10.0, 5.0);
        assert_eq!(regime, CouplingRegime::SubmergedWeir);
        assert!((q - 1.31547).abs() < 0.005, "q = {q}");

        let (regime, q) = metric_case(2.0, 3.0, 5.0, 10.0, 5.0);
        assert_eq!(regime, CouplingRegime::Orifice);
        assert!((q - 10.4611).abs() < 0.005, "q = {q}");
    }

    #[test]
    fn no_flow_cases_are_zero() {
        for (crest, node, overland) in [(2.0, 0.0, 2.0), (2.0, 2.0, 2.0), (3.0, 2.0, 1.0)] {
            let (regime, q) = metric_case(crest, node, overland, 25.0, 1.0);
            assert_eq!(regime, CouplingRegime::NoFlow);
            assert_eq!(q, 0.0);
        }
    }

    #[test]
    fn closed_regime_is_zero_even_with_head_difference() {
        let heads = Heads::new(2.0, 1.0, 3.0);
        let geometry = OpeningGeometry::new(10.0, 5.0).unwrap();
        assert_eq!(
            coupling_flow(CouplingRegime::NoCoupling, heads, geometry, coeffs()),
            0.0
        );
    }
}
