//! WASM-compatible diagnostic types.
//!
//! Every failure crossing the boundary becomes a [`Diagnostic`]: a short
//! message plus the parameter that caused it.

use lamp_dna::DnaError;
use lamp_kernel::KernelError;
use wasm_bindgen::prelude::*;

/// Parameter name reported when the JSON record itself is malformed.
pub const PARAMS: &str = "params";

/// Parameter name reported for design code failures without a field.
pub const DESIGN_CODE: &str = "design_code";

/// A user-visible failure for JavaScript.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // try { generate_shell(json); } catch (diag) {
/// //   console.log(diag.message, diag.parameter);
/// // }
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    message: String,
    parameter: Option<String>,
}

#[wasm_bindgen]
impl Diagnostic {
    /// Returns the diagnostic message.
    pub fn message(&self) -> String {
        self.message.clone()
    }

    /// Returns the offending parameter, if known.
    pub fn parameter(&self) -> Option<String> {
        self.parameter.clone()
    }

    /// Converts this diagnostic to a plain JavaScript object.
    ///
    /// Plain objects survive `postMessage` between the worker and the main
    /// thread, wasm-bindgen wrappers do not.
    pub fn to_js_object(&self) -> JsValue {
        use js_sys::{Object, Reflect};

        let obj = Object::new();
        let _ = Reflect::set(
            &obj,
            &JsValue::from_str("message"),
            &JsValue::from_str(&self.message),
        );
        if let Some(parameter) = &self.parameter {
            let _ = Reflect::set(
                &obj,
                &JsValue::from_str("parameter"),
                &JsValue::from_str(parameter),
            );
        }
        JsValue::from(obj)
    }
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, parameter: Option<&str>) -> Self {
        Self {
            message: message.into(),
            parameter: parameter.map(str::to_string),
        }
    }

    /// Rust-side view of the offending parameter.
    pub fn parameter_name(&self) -> Option<&str> {
        self.parameter.as_deref()
    }

    /// Rust-side view of the message.
    pub fn text(&self) -> &str {
        &self.message
    }
}

impl From<KernelError> for Diagnostic {
    fn from(err: KernelError) -> Self {
        Self::new(err.to_string(), err.parameter())
    }
}

impl From<DnaError> for Diagnostic {
    fn from(err: DnaError) -> Self {
        let parameter = err.field().unwrap_or(DESIGN_CODE);
        Self::new(err.to_string(), Some(parameter))
    }
}

impl From<serde_json::Error> for Diagnostic {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Malformed parameter record: {err}"), Some(PARAMS))
    }
}
