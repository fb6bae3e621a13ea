use serde_json::Value;

/// Input rejected before any store access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("required fields missing: {}", .0.join(", "))]
    MissingRequiredFields(Vec<&'static str>),
    #[error("invalid numeric value for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

impl ValidationError {
    fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            field,
            value: value.into(),
        }
    }
}

/// Trimmed text, or `None` when blank.
pub(crate) fn present_text(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

/// Parses an optional numeric query value. Blank counts as absent.
pub(crate) fn parse_number(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<f64>, ValidationError> {
    let Some(value) = present_text(raw) else {
        return Ok(None);
    };

    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(Some(number)),
        _ => Err(ValidationError::invalid(field, value)),
    }
}

/// Accepts a JSON number or a string holding one; `null` and `""` are absent.
pub(crate) fn json_number(
    field: &'static str,
    raw: Option<&Value>,
) -> Result<Option<f64>, ValidationError> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_f64()
            .filter(|value| value.is_finite())
            .map(Some)
            .ok_or_else(|| ValidationError::invalid(field, number.to_string())),
        Some(Value::String(text)) => parse_number(field, Some(text.as_str())),
        Some(other) => Err(ValidationError::invalid(field, other.to_string())),
    }
}

/// Outcome of reading a required identifier.
pub(crate) enum IdField {
    Missing,
    Present(i64),
}

/// Reads a positive identifier that fits the signed `BIGINT` column.
///
/// JSON `null`, `false`, `0`, `"0"` and blank strings count as missing.
pub(crate) fn json_identifier(
    field: &'static str,
    raw: Option<&Value>,
) -> Result<IdField, ValidationError> {
    match raw {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(IdField::Missing),
        Some(Value::Number(number)) => match number.as_i64() {
            Some(id) => identifier(field, id, || number.to_string()),
            None if number.as_f64() == Some(0.0) => Ok(IdField::Missing),
            None => Err(ValidationError::invalid(field, number.to_string())),
        },
        Some(Value::String(text)) => match present_text(Some(text.as_str())) {
            None => Ok(IdField::Missing),
            Some(trimmed) => match trimmed.parse::<i64>() {
                Ok(id) => identifier(field, id, || trimmed.to_string()),
                Err(_) => Err(ValidationError::invalid(field, trimmed)),
            },
        },
        Some(other) => Err(ValidationError::invalid(field, other.to_string())),
    }
}

fn identifier(
    field: &'static str,
    id: i64,
    raw: impl FnOnce() -> String,
) -> Result<IdField, ValidationError> {
    match id {
        0 => Ok(IdField::Missing),
        id if id > 0 => Ok(IdField::Present(id)),
        _ => Err(ValidationError::invalid(field, raw())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_number_treats_blank_as_absent() {
        assert_eq!(parse_number("min_fee", None), Ok(None));
        assert_eq!(parse_number("min_fee", Some("   ")), Ok(None));
        assert_eq!(parse_number("min_fee", Some(" 1500.5 ")), Ok(Some(1500.5)));
    }

    #[test]
    fn parse_number_rejects_non_finite_and_garbage() {
        for raw in ["cheap", "NaN", "inf", "12abc"] {
            let err = parse_number("max_fee", Some(raw)).expect_err("rejected");
            assert_eq!(
                err,
                ValidationError::InvalidNumber {
                    field: "max_fee",
                    value: raw.to_string()
                }
            );
        }
    }

    #[test]
    fn json_number_accepts_numbers_and_numeric_strings() {
        assert_eq!(json_number("gpa", Some(&json!(3.7))), Ok(Some(3.7)));
        assert_eq!(json_number("gpa", Some(&json!("3.2"))), Ok(Some(3.2)));
        assert_eq!(json_number("gpa", Some(&json!(0))), Ok(Some(0.0)));
        assert_eq!(json_number("gpa", Some(&json!(""))), Ok(None));
        assert_eq!(json_number("gpa", Some(&Value::Null)), Ok(None));
        assert!(json_number("ielts", Some(&json!(true))).is_err());
        assert!(json_number("ielts", Some(&json!([6.5]))).is_err());
    }

    #[test]
    fn identifier_follows_falsy_rules() {
        for missing in [json!(0), json!("0"), json!(" 0 "), json!(""), json!(false), Value::Null] {
            assert!(matches!(
                json_identifier("university_id", Some(&missing)),
                Ok(IdField::Missing)
            ));
        }
        assert!(matches!(
            json_identifier("university_id", None),
            Ok(IdField::Missing)
        ));
        assert!(matches!(
            json_identifier("university_id", Some(&json!(42))),
            Ok(IdField::Present(42))
        ));
        assert!(matches!(
            json_identifier("university_id", Some(&json!(" 7 "))),
            Ok(IdField::Present(7))
        ));
        assert!(json_identifier("university_id", Some(&json!(-3))).is_err());
        assert!(json_identifier("university_id", Some(&json!(2.5))).is_err());
        assert!(json_identifier("university_id", Some(&json!("abc"))).is_err());
        assert!(json_identifier("university_id", Some(&json!("-3"))).is_err());
    }

    #[test]
    fn identifier_beyond_signed_range_is_invalid() {
        let err = json_identifier("university_id", Some(&json!(u64::MAX)))
            .err()
            .expect("rejected");
        assert_eq!(
            err,
            ValidationError::InvalidNumber {
                field: "university_id",
                value: u64::MAX.to_string()
            }
        );
        assert!(json_identifier("university_id", Some(&json!("9223372036854775808"))).is_err());
        assert!(matches!(
            json_identifier("university_id", Some(&json!(i64::MAX))),
            Ok(IdField::Present(i64::MAX))
        ));
    }
}
