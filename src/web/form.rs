use crate::error::AppError;
use crate::model::FeatureVector;

/// The `/predict` form body as submitted, before integer coercion.
///
/// A repeated key keeps its first value.
#[derive(Debug, Default)]
pub struct PredictForm {
    sex_code: Option<String>,
    pclass: Option<String>,
    embarked_code: Option<String>,
    title_code: Option<String>,
    family_size: Option<String>,
    age_bin_code: Option<String>,
    fare_bin_code: Option<String>,
}

impl PredictForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = PredictForm::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "Sex_Code" => &mut form.sex_code,
                "Pclass" => &mut form.pclass,
                "Embarked_Code" => &mut form.embarked_code,
                "Title_Code" => &mut form.title_code,
                "FamilySize" => &mut form.family_size,
                "AgeBin_Code" => &mut form.age_bin_code,
                "FareBin_Code" => &mut form.fare_bin_code,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        form
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<i32, AppError> {
    let raw = value.ok_or_else(|| AppError::InvalidField {
        field,
        reason: "missing".to_string(),
    })?;
    raw.trim().parse().map_err(|e| AppError::InvalidField {
        field,
        reason: format!("{:?} is not an integer ({})", raw, e),
    })
}

impl TryFrom<PredictForm> for FeatureVector {
    type Error = AppError;

    fn try_from(form: PredictForm) -> Result<Self, Self::Error> {
        Ok(FeatureVector {
            sex_code: required("Sex_Code", form.sex_code)?,
            pclass: required("Pclass", form.pclass)?,
            embarked_code: required("Embarked_Code", form.embarked_code)?,
            title_code: required("Title_Code", form.title_code)?,
            family_size: required("FamilySize", form.family_size)?,
            age_bin_code: required("AgeBin_Code", form.age_bin_code)?,
            fare_bin_code: required("FareBin_Code", form.fare_bin_code)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_form() -> PredictForm {
        PredictForm::from_pairs(pairs(&[
            ("Sex_Code", "1"),
            ("Pclass", "3"),
            ("Embarked_Code", "0"),
            ("Title_Code", "2"),
            ("FamilySize", "1"),
            ("AgeBin_Code", "2"),
            ("FareBin_Code", "1"),
        ]))
    }

    #[test]
    fn coerces_every_field() {
        let features = FeatureVector::try_from(full_form()).unwrap();
        assert_eq!(features.values(), [1, 3, 0, 2, 1, 2, 1]);
    }

    #[test]
    fn tolerates_whitespace_and_signs() {
        let form = PredictForm {
            pclass: Some(" +3 ".to_string()),
            family_size: Some("-1".to_string()),
            ..full_form()
        };
        let features = FeatureVector::try_from(form).unwrap();
        assert_eq!(features.pclass, 3);
        assert_eq!(features.family_size, -1);
    }

    #[test]
    fn repeated_key_keeps_the_first_value() {
        let form = PredictForm::from_pairs(pairs(&[
            ("Sex_Code", "0"),
            ("Sex_Code", "1"),
            ("Pclass", "2"),
            ("Embarked_Code", "0"),
            ("Title_Code", "2"),
            ("FamilySize", "1"),
            ("AgeBin_Code", "2"),
            ("FareBin_Code", "1"),
            ("submit", "Predict"),
        ]));
        let features = FeatureVector::try_from(form).unwrap();
        assert_eq!(features.sex_code, 0);
        assert_eq!(features.pclass, 2);
    }

    #[test]
    fn missing_field_is_named() {
        let form = PredictForm {
            title_code: None,
            ..full_form()
        };
        match FeatureVector::try_from(form) {
            Err(AppError::InvalidField { field, reason }) => {
                assert_eq!(field, "Title_Code");
                assert_eq!(reason, "missing");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn non_integer_is_rejected() {
        for bad in ["", "2.5", "three", "99999999999"] {
            let form = PredictForm {
                age_bin_code: Some(bad.to_string()),
                ..full_form()
            };
            assert!(matches!(
                FeatureVector::try_from(form),
                Err(AppError::InvalidField {
                    field: "AgeBin_Code",
                    ..
                })
            ));
        }
    }
}
