//! Form input metadata
//!
//! Single source of truth for the sanctioned range, default and step size of
//! every measurement on the form. The UI renders its sliders from this table
//! and clamps submitted values with it.

use serde::Serialize;

use crate::features::{FeatureName, WineType};

/// Metadata for one numeric form input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputSpec {
    /// Model feature fed by this input
    pub feature: FeatureName,
    /// Form field name (also the JSON key of `RawInputs`)
    pub key: &'static str,
    /// Human readable label
    pub label: &'static str,
    /// Display unit, empty when dimensionless
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    /// Decimal places used when displaying the value
    pub decimals: usize,
}

impl InputSpec {
    /// Clamp a submitted value into `[min, max]`. Non-finite values fall back
    /// to the default.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            self.default
        }
    }

    /// Format a value with this input's display precision
    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", self.decimals, value)
    }

    /// Label with unit suffix, e.g. "Fixed Acidity (g/L)"
    pub fn display_label(&self) -> String {
        if self.unit.is_empty() {
            self.label.to_string()
        } else {
            format!("{} ({})", self.label, self.unit)
        }
    }
}

/// The 11 numeric inputs, in canonical feature order
pub static INPUT_SPECS: [InputSpec; 11] = [
    InputSpec {
        feature: FeatureName::FixedAcidity,
        key: "fixed_acidity",
        label: "Fixed Acidity",
        unit: "g/L",
        min: 3.0,
        max: 16.0,
        step: 0.1,
        default: 7.0,
        decimals: 1,
    },
    InputSpec {
        feature: FeatureName::VolatileAcidity,
        key: "volatile_acidity",
        label: "Volatile Acidity",
        unit: "g/L",
        min: 0.0,
        max: 2.0,
        step: 0.01,
        default: 0.4,
        decimals: 2,
    },
    InputSpec {
        feature: FeatureName::CitricAcid,
        key: "citric_acid",
        label: "Citric Acid",
        unit: "g/L",
        min: 0.0,
        max: 2.0,
        step: 0.01,
        default: 0.3,
        decimals: 2,
    },
    InputSpec {
        feature: FeatureName::ResidualSugar,
        key: "residual_sugar",
        label: "Residual Sugar",
        unit: "g/L",
        min: 0.5,
        max: 70.0,
        step: 0.1,
        default: 5.0,
        decimals: 1,
    },
    InputSpec {
        feature: FeatureName::Chlorides,
        key: "chlorides",
        label: "Chlorides",
        unit: "g/L",
        min: 0.01,
        max: 0.6,
        step: 0.001,
        default: 0.05,
        decimals: 3,
    },
    InputSpec {
        feature: FeatureName::FreeSulfurDioxide,
        key: "free_sulfur_dioxide",
        label: "Free Sulfur Dioxide",
        unit: "mg/L",
        min: 1.0,
        max: 80.0,
        step: 1.0,
        default: 30.0,
        decimals: 0,
    },
    InputSpec {
        feature: FeatureName::TotalSulfurDioxide,
        key: "total_sulfur_dioxide",
        label: "Total Sulfur Dioxide",
        unit: "mg/L",
        min: 6.0,
        max: 300.0,
        step: 1.0,
        default: 100.0,
        decimals: 0,
    },
    InputSpec {
        feature: FeatureName::Density,
        key: "density",
        label: "Density",
        unit: "g/mL",
        min: 0.98,
        max: 1.04,
        step: 0.0001,
        default: 0.99,
        decimals: 4,
    },
    InputSpec {
        feature: FeatureName::Ph,
        key: "ph",
        label: "pH",
        unit: "",
        min: 2.5,
        max: 4.5,
        step: 0.01,
        default: 3.2,
        decimals: 2,
    },
    InputSpec {
        feature: FeatureName::Sulphates,
        key: "sulphates",
        label: "Sulphates",
        unit: "g/L",
        min: 0.2,
        max: 2.0,
        step: 0.01,
        default: 0.6,
        decimals: 2,
    },
    InputSpec {
        feature: FeatureName::Alcohol,
        key: "alcohol",
        label: "Alcohol",
        unit: "%",
        min: 8.0,
        max: 15.0,
        step: 0.1,
        default: 10.0,
        decimals: 1,
    },
];

/// Wine type choices offered by the form (first is the default)
pub const WINE_TYPE_CHOICES: [WineType; 2] = WineType::ALL;

/// Metadata for the input feeding `feature`, `None` for `TypeWhite`
pub fn spec_for(feature: FeatureName) -> Option<&'static InputSpec> {
    INPUT_SPECS.iter().find(|spec| spec.feature == feature)
}
