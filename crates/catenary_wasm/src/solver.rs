//! `WasmCatenarySolver`, the class the front end constructs once and calls
//! on every slider change.

use anyhow::Context;
use catenary_core::{BoundaryConditions, SolverSettings};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

use crate::report::{checked_settings, solve_report, SolutionReport};

#[wasm_bindgen]
pub struct WasmCatenarySolver {
    settings: SolverSettings,
}

#[wasm_bindgen]
impl WasmCatenarySolver {
    /// Accepts `undefined`/`null` for default settings, or a partial
    /// settings object whose missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(settings: JsValue) -> Result<WasmCatenarySolver, JsValue> {
        console_error_panic_hook::set_once();

        let settings = settings_from_js(settings)
            .map_err(|e| JsValue::from_str(&format!("{:#}", e)))?;
        Ok(WasmCatenarySolver { settings })
    }

    /// Returns the solution object, or `null` when the geometry is invalid or
    /// no solver phase produced a verified result.
    pub fn solve(&self, d: f64, h: f64, length: f64) -> Result<JsValue, JsValue> {
        let report = BoundaryConditions::new(d, h, length)
            .ok()
            .and_then(|conditions| solve_report(&conditions, &self.settings));
        report_to_js(report)
    }

    /// Like [`solve`](Self::solve) with support B placed at `theta_deg`
    /// degrees on a circle of `radius` around support A. The result also
    /// carries the derived `d` and `h`.
    pub fn solve_polar(&self, theta_deg: f64, radius: f64, length: f64) -> Result<JsValue, JsValue> {
        let report = BoundaryConditions::from_polar(theta_deg, radius, length)
            .ok()
            .and_then(|conditions| {
                solve_report(&conditions, &self.settings)
                    .map(|report| report.with_position(&conditions))
            });
        report_to_js(report)
    }

    pub fn settings(&self) -> Result<JsValue, JsValue> {
        to_value(&self.settings)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

fn settings_from_js(value: JsValue) -> anyhow::Result<SolverSettings> {
    if value.is_undefined() || value.is_null() {
        return Ok(SolverSettings::default());
    }
    let settings: SolverSettings = from_value(value)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("Failed to parse solver settings")?;
    checked_settings(settings)
}

fn report_to_js(report: Option<SolutionReport>) -> Result<JsValue, JsValue> {
    match report {
        Some(report) => to_value(&report)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e))),
        None => Ok(JsValue::NULL),
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_solver_tests {
    use super::WasmCatenarySolver;
    use catenary_core::SolverSettings;
    use serde::Deserialize;
    use serde_wasm_bindgen::{from_value, to_value};
    use wasm_bindgen::JsValue;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[derive(Deserialize)]
    struct Decoded {
        a: f64,
        x0: f64,
        method: String,
        lambda: f64,
        d: Option<f64>,
    }

    fn default_solver() -> WasmCatenarySolver {
        WasmCatenarySolver::new(JsValue::UNDEFINED).expect("solver")
    }

    #[wasm_bindgen_test]
    fn solve_returns_plain_object() {
        let value = default_solver().solve(1.0, 0.0, 1.5).expect("solve");
        let decoded: Decoded = from_value(value).expect("decode");
        assert!((decoded.x0 - 0.5).abs() < 1e-6);
        assert!((decoded.a - 0.308_236).abs() < 1e-5);
        assert_eq!(decoded.method, "newton");
        assert!(decoded.lambda > decoded.a);
        assert!(decoded.d.is_none());
    }

    #[wasm_bindgen_test]
    fn taut_chain_returns_null() {
        let value = default_solver().solve(1.0, 0.0, 1.0).expect("solve");
        assert!(value.is_null());
    }

    #[wasm_bindgen_test]
    fn polar_solve_matches_cartesian() {
        let solver = default_solver();
        let polar: Decoded = from_value(solver.solve_polar(-14.5, 0.99, 1.0).expect("solve"))
            .expect("decode");
        let theta = (-14.5f64).to_radians();
        let cartesian: Decoded = from_value(
            solver
                .solve(0.99 * theta.cos(), 0.99 * theta.sin(), 1.0)
                .expect("solve"),
        )
        .expect("decode");
        assert_eq!(polar.a, cartesian.a);
        assert_eq!(polar.x0, cartesian.x0);
        assert!(polar.d.is_some());
    }

    #[wasm_bindgen_test]
    fn partial_settings_keep_defaults() {
        let overrides = partial_settings(50);
        let solver = WasmCatenarySolver::new(overrides).expect("solver");
        let settings: SolverSettings = from_value(solver.settings().expect("settings"))
            .expect("decode settings");
        assert_eq!(settings.max_iterations, 50);
        assert_eq!(settings.tolerance, SolverSettings::default().tolerance);
    }

    #[wasm_bindgen_test]
    fn invalid_settings_are_rejected() {
        let settings = SolverSettings {
            tolerance: -1.0,
            ..SolverSettings::default()
        };
        let result = WasmCatenarySolver::new(to_value(&settings).expect("settings"));
        let message = result
            .err()
            .and_then(|err| err.as_string())
            .unwrap_or_default();
        assert!(message.contains("Invalid solver settings"));
        assert!(message.contains("tolerance"));
    }

    fn partial_settings(max_iterations: usize) -> JsValue {
        #[derive(serde::Serialize)]
        struct Partial {
            max_iterations: usize,
        }
        to_value(&Partial { max_iterations }).expect("partial settings")
    }
}
