//! Feature schema and feature vector builder
//!
//! The scaler and regressor artifacts were fitted on twelve columns in one
//! fixed order. [`FeatureName::ALL`] is that order, and every vector type in
//! this module is a fixed-size array indexed by it. A vector in any other
//! order cannot be constructed from named inputs.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::inputs::INPUT_SPECS;

/// Number of model features (11 measurements + wine type indicator)
pub const FEATURE_COUNT: usize = 12;

/// One model feature, in canonical column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureName {
    FixedAcidity,
    VolatileAcidity,
    CitricAcid,
    ResidualSugar,
    Chlorides,
    FreeSulfurDioxide,
    TotalSulfurDioxide,
    Density,
    Ph,
    Sulphates,
    Alcohol,
    TypeWhite,
}

impl FeatureName {
    /// Canonical column order the artifacts were fitted on
    pub const ALL: [FeatureName; FEATURE_COUNT] = [
        FeatureName::FixedAcidity,
        FeatureName::VolatileAcidity,
        FeatureName::CitricAcid,
        FeatureName::ResidualSugar,
        FeatureName::Chlorides,
        FeatureName::FreeSulfurDioxide,
        FeatureName::TotalSulfurDioxide,
        FeatureName::Density,
        FeatureName::Ph,
        FeatureName::Sulphates,
        FeatureName::Alcohol,
        FeatureName::TypeWhite,
    ];

    /// Column name as recorded in the fitted artifacts
    pub const fn as_str(self) -> &'static str {
        match self {
            FeatureName::FixedAcidity => "fixed acidity",
            FeatureName::VolatileAcidity => "volatile acidity",
            FeatureName::CitricAcid => "citric acid",
            FeatureName::ResidualSugar => "residual sugar",
            FeatureName::Chlorides => "chlorides",
            FeatureName::FreeSulfurDioxide => "free sulfur dioxide",
            FeatureName::TotalSulfurDioxide => "total sulfur dioxide",
            FeatureName::Density => "density",
            FeatureName::Ph => "pH",
            FeatureName::Sulphates => "sulphates",
            FeatureName::Alcohol => "alcohol",
            FeatureName::TypeWhite => "type_white",
        }
    }

    /// Position of this feature in every vector
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a feature by its column name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FeatureName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Column names in canonical order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = {
    let mut names = [""; FEATURE_COUNT];
    let mut i = 0;
    while i < FEATURE_COUNT {
        names[i] = FeatureName::ALL[i].as_str();
        i += 1;
    }
    names
};

/// Wine variant selected on the form
///
/// The artifacts were fitted with `type_white = 1` for white wine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WineType {
    #[default]
    #[serde(rename = "Blanco", alias = "blanco", alias = "white", alias = "White")]
    White,
    #[serde(rename = "Tinto", alias = "tinto", alias = "red", alias = "Red")]
    Red,
}

impl WineType {
    /// Choices in form display order
    pub const ALL: [WineType; 2] = [WineType::White, WineType::Red];

    /// Form label
    pub const fn label(self) -> &'static str {
        match self {
            WineType::White => "Blanco",
            WineType::Red => "Tinto",
        }
    }

    /// Value of the `type_white` indicator feature
    pub const fn type_white(self) -> f64 {
        match self {
            WineType::White => 1.0,
            WineType::Red => 0.0,
        }
    }

    /// Parse a form label (or its English alias)
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Blanco" | "blanco" | "white" | "White" => Some(WineType::White),
            "Tinto" | "tinto" | "red" | "Red" => Some(WineType::Red),
            _ => None,
        }
    }
}

impl fmt::Display for WineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// User-supplied form values before they become a feature vector
///
/// Missing fields deserialize to the form defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInputs {
    pub fixed_acidity: f64,
    pub volatile_acidity: f64,
    pub citric_acid: f64,
    pub residual_sugar: f64,
    pub chlorides: f64,
    pub free_sulfur_dioxide: f64,
    pub total_sulfur_dioxide: f64,
    pub density: f64,
    #[serde(alias = "pH")]
    pub ph: f64,
    pub sulphates: f64,
    pub alcohol: f64,
    pub wine_type: WineType,
}

impl RawInputs {
    /// Current value of a feature, with the wine type mapped to `type_white`
    pub fn value(&self, feature: FeatureName) -> f64 {
        match feature {
            FeatureName::FixedAcidity => self.fixed_acidity,
            FeatureName::VolatileAcidity => self.volatile_acidity,
            FeatureName::CitricAcid => self.citric_acid,
            FeatureName::ResidualSugar => self.residual_sugar,
            FeatureName::Chlorides => self.chlorides,
            FeatureName::FreeSulfurDioxide => self.free_sulfur_dioxide,
            FeatureName::TotalSulfurDioxide => self.total_sulfur_dioxide,
            FeatureName::Density => self.density,
            FeatureName::Ph => self.ph,
            FeatureName::Sulphates => self.sulphates,
            FeatureName::Alcohol => self.alcohol,
            FeatureName::TypeWhite => self.wine_type.type_white(),
        }
    }

    /// Overwrite one numeric measurement. `TypeWhite` selects the wine type
    /// (any non-zero value means white).
    pub fn set(&mut self, feature: FeatureName, value: f64) {
        let slot = match feature {
            FeatureName::FixedAcidity => &mut self.fixed_acidity,
            FeatureName::VolatileAcidity => &mut self.volatile_acidity,
            FeatureName::CitricAcid => &mut self.citric_acid,
            FeatureName::ResidualSugar => &mut self.residual_sugar,
            FeatureName::Chlorides => &mut self.chlorides,
            FeatureName::FreeSulfurDioxide => &mut self.free_sulfur_dioxide,
            FeatureName::TotalSulfurDioxide => &mut self.total_sulfur_dioxide,
            FeatureName::Density => &mut self.density,
            FeatureName::Ph => &mut self.ph,
            FeatureName::Sulphates => &mut self.sulphates,
            FeatureName::Alcohol => &mut self.alcohol,
            FeatureName::TypeWhite => {
                self.wine_type = if value != 0.0 {
                    WineType::White
                } else {
                    WineType::Red
                };
                return;
            }
        };
        *slot = value;
    }

    /// Copy with every measurement clamped into its form range
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for spec in INPUT_SPECS.iter() {
            out.set(spec.feature, spec.clamp(self.value(spec.feature)));
        }
        out
    }
}

impl Default for RawInputs {
    fn default() -> Self {
        let mut inputs = RawInputs {
            fixed_acidity: 0.0,
            volatile_acidity: 0.0,
            citric_acid: 0.0,
            residual_sugar: 0.0,
            chlorides: 0.0,
            free_sulfur_dioxide: 0.0,
            total_sulfur_dioxide: 0.0,
            density: 0.0,
            ph: 0.0,
            sulphates: 0.0,
            alcohol: 0.0,
            wine_type: WineType::default(),
        };
        for spec in INPUT_SPECS.iter() {
            inputs.set(spec.feature, spec.default);
        }
        inputs
    }
}

/// One row of the 12 model features in canonical order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Assemble the row from form inputs. No range validation happens here;
    /// callers clamp first.
    pub fn build(inputs: &RawInputs) -> Self {
        Self(FeatureName::ALL.map(|feature| inputs.value(feature)))
    }

    /// Wrap values that are already in canonical order
    pub const fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn get(&self, feature: FeatureName) -> f64 {
        self.0[feature.index()]
    }

    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// `(feature, value)` pairs in canonical order
    pub fn iter_named(&self) -> impl Iterator<Item = (FeatureName, f64)> + '_ {
        FeatureName::ALL.into_iter().zip(self.0.iter().copied())
    }
}

/// Shorthand for [`FeatureVector::build`]
pub fn build(inputs: &RawInputs) -> FeatureVector {
    FeatureVector::build(inputs)
}

/// Feature row after the fitted scaler has been applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledFeatureVector([f64; FEATURE_COUNT]);

impl ScaledFeatureVector {
    pub(crate) const fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn get(&self, feature: FeatureName) -> f64 {
        self.0[feature.index()]
    }

    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_names_in_canonical_order() {
        assert_eq!(
            FEATURE_NAMES,
            [
                "fixed acidity",
                "volatile acidity",
                "citric acid",
                "residual sugar",
                "chlorides",
                "free sulfur dioxide",
                "total sulfur dioxide",
                "density",
                "pH",
                "sulphates",
                "alcohol",
                "type_white",
            ]
        );
        for (i, feature) in FeatureName::ALL.iter().enumerate() {
            assert_eq!(feature.index(), i);
            assert_eq!(FeatureName::from_name(feature.as_str()), Some(*feature));
        }
    }

    #[test]
    fn test_build_defaults_white() {
        let vector = build(&RawInputs::default());
        assert_eq!(
            vector.as_array(),
            &[7.0, 0.4, 0.3, 5.0, 0.05, 30.0, 100.0, 0.99, 3.2, 0.6, 10.0, 1.0]
        );
    }

    #[test]
    fn test_wine_type_changes_only_last_field() {
        let white = build(&RawInputs::default());
        let red = build(&RawInputs {
            wine_type: WineType::Red,
            ..RawInputs::default()
        });

        assert_eq!(white.get(FeatureName::TypeWhite), 1.0);
        assert_eq!(red.get(FeatureName::TypeWhite), 0.0);
        assert_eq!(white.as_array()[..11], red.as_array()[..11]);
    }

    #[test]
    fn test_wine_type_labels() {
        assert_eq!(WineType::from_label("Blanco"), Some(WineType::White));
        assert_eq!(WineType::from_label("red"), Some(WineType::Red));
        assert_eq!(WineType::from_label("Rosado"), None);
        assert_eq!(WineType::White.to_string(), "Blanco");
    }

    #[test]
    fn test_clamped_limits_out_of_range_values() {
        let inputs = RawInputs {
            fixed_acidity: 100.0,
            chlorides: -1.0,
            density: f64::NAN,
            ..RawInputs::default()
        }
        .clamped();

        assert_eq!(inputs.fixed_acidity, 16.0);
        assert_eq!(inputs.chlorides, 0.01);
        assert_eq!(inputs.density, 0.99);
        assert_eq!(inputs.alcohol, 10.0);
    }

    #[test]
    fn test_raw_inputs_deserialize_partial() {
        let inputs: RawInputs =
            serde_json::from_str(r#"{"alcohol": 12.5, "pH": 3.4, "wine_type": "Tinto"}"#)
                .unwrap();
        assert_eq!(inputs.alcohol, 12.5);
        assert_eq!(inputs.ph, 3.4);
        assert_eq!(inputs.wine_type, WineType::Red);
        assert_eq!(inputs.fixed_acidity, 7.0);
    }
}
