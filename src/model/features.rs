use serde::Serialize;

/// Form field names, in the order the model expects its input columns.
pub const FEATURE_NAMES: [&str; 7] = [
    "Sex_Code",
    "Pclass",
    "Embarked_Code",
    "Title_Code",
    "FamilySize",
    "AgeBin_Code",
    "FareBin_Code",
];

/// The seven encoded passenger features a prediction is made from.
///
/// Serializes with the `predictions` table's column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureVector {
    pub sex_code: i32,
    pub pclass: i32,
    pub embarked_code: i32,
    pub title_code: i32,
    #[serde(rename = "familysize")]
    pub family_size: i32,
    #[serde(rename = "agebin_code")]
    pub age_bin_code: i32,
    #[serde(rename = "farebin_code")]
    pub fare_bin_code: i32,
}

impl FeatureVector {
    /// Values in `FEATURE_NAMES` order.
    pub fn values(&self) -> [i32; 7] {
        [
            self.sex_code,
            self.pclass,
            self.embarked_code,
            self.title_code,
            self.family_size,
            self.age_bin_code,
            self.fare_bin_code,
        ]
    }
}
