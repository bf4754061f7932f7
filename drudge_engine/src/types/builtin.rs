use chrono::NaiveDate;
use std::sync::Arc;

use crate::types::{Clock, TypeHandler, Value};

pub(super) const STRING: &str = "string";
pub(super) const INTEGER: &str = "integer";
pub(super) const FLOAT: &str = "float";
pub(super) const BOOL: &str = "bool";
pub(super) const DATE: &str = "date";

pub(super) const BUILT_IN: [&str; 5] = [STRING, INTEGER, FLOAT, BOOL, DATE];

const ISO_DATE: &str = "%Y-%m-%d";
const TRUE_WORDS: [&str; 3] = ["yes", "true", "1"];
const FALSE_WORDS: [&str; 3] = ["no", "false", "0"];

/// The built-in handlers for `name`, in registration order.
pub(super) fn handlers(name: &str, date_formats: &[String], today: &Clock) -> Vec<TypeHandler> {
    match name {
        STRING => vec![handler(|text| Ok(Value::from(text)))],
        INTEGER => vec![handler(parse_integer)],
        FLOAT => vec![handler(parse_float)],
        BOOL => vec![handler(parse_bool)],
        DATE => {
            let formats: Vec<String> = date_formats.to_vec();
            let today = Arc::clone(today);
            vec![
                handler(move |text| parse_date(text, &formats)),
                handler(move |text| parse_relative_date(text, &today)),
            ]
        }
        _ => Vec::default(),
    }
}

fn handler(
    function: impl Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
) -> TypeHandler {
    Arc::new(function)
}

fn parse_integer(text: &str) -> Result<Value, String> {
    text.trim()
        .parse::<i64>()
        .map(Value::Integer)
        .map_err(|_| format!("'{text}' is not an integer"))
}

fn parse_float(text: &str) -> Result<Value, String> {
    text.trim()
        .parse::<f64>()
        .map(Value::Float)
        .map_err(|_| format!("'{text}' is not a float"))
}

fn parse_bool(text: &str) -> Result<Value, String> {
    let lowered = text.to_lowercase();

    if TRUE_WORDS.contains(&lowered.as_str()) {
        Ok(Value::Bool(true))
    } else if FALSE_WORDS.contains(&lowered.as_str()) {
        Ok(Value::Bool(false))
    } else {
        Err(format!("'{text}' is not a boolean"))
    }
}

fn parse_date(text: &str, formats: &[String]) -> Result<Value, String> {
    std::iter::once(ISO_DATE)
        .chain(formats.iter().map(String::as_str))
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .map(Value::Date)
        .ok_or_else(|| format!("'{text}' is not a date"))
}

fn parse_relative_date(text: &str, today: &Clock) -> Result<Value, String> {
    match text.to_lowercase().as_str() {
        "today" => Ok(Value::Date(today())),
        "yesterday" => today()
            .pred_opt()
            .map(Value::Date)
            .ok_or_else(|| format!("'{text}' is out of range")),
        _ => Err(format!("'{text}' is not a date")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("42", Ok(Value::Integer(42)))]
    #[case("-7", Ok(Value::Integer(-7)))]
    #[case("+7", Ok(Value::Integer(7)))]
    #[case("abc", Err("'abc' is not an integer".to_string()))]
    #[case("1.5", Err("'1.5' is not an integer".to_string()))]
    #[case("", Err("'' is not an integer".to_string()))]
    fn integer(#[case] text: &str, #[case] expected: Result<Value, String>) {
        assert_eq!(parse_integer(text), expected);
    }

    #[rstest]
    #[case("1.5", Ok(Value::Float(1.5)))]
    #[case("2", Ok(Value::Float(2.0)))]
    #[case("x", Err("'x' is not a float".to_string()))]
    fn float(#[case] text: &str, #[case] expected: Result<Value, String>) {
        assert_eq!(parse_float(text), expected);
    }

    #[rstest]
    #[case("yes", Ok(Value::Bool(true)))]
    #[case("TRUE", Ok(Value::Bool(true)))]
    #[case("1", Ok(Value::Bool(true)))]
    #[case("No", Ok(Value::Bool(false)))]
    #[case("false", Ok(Value::Bool(false)))]
    #[case("0", Ok(Value::Bool(false)))]
    #[case("maybe", Err("'maybe' is not a boolean".to_string()))]
    fn bool(#[case] text: &str, #[case] expected: Result<Value, String>) {
        assert_eq!(parse_bool(text), expected);
    }

    #[rstest]
    #[case("2024-03-05", Some((2024, 3, 5)))]
    #[case("05.03.2024", Some((2024, 3, 5)))]
    #[case("05.03.24", Some((2024, 3, 5)))]
    #[case("03/05/24", Some((2024, 3, 5)))]
    #[case("03/05/2024", Some((2024, 3, 5)))]
    #[case("2024-13-01", None)]
    #[case("tomorrow", None)]
    fn date(#[case] text: &str, #[case] expected: Option<(i32, u32, u32)>) {
        // Setup
        let formats: Vec<String> = ["%d.%m.%y", "%d.%m.%Y", "%m/%d/%y", "%m/%d/%Y"]
            .iter()
            .map(|f| f.to_string())
            .collect();

        // Execute
        let result = parse_date(text, &formats);

        // Verify
        match expected {
            Some((y, m, d)) => assert_eq!(
                result,
                Ok(Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap()))
            ),
            None => assert_eq!(result, Err(format!("'{text}' is not a date"))),
        }
    }

    #[rstest]
    #[case("today", Ok(Value::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())))]
    #[case("Yesterday", Ok(Value::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())))]
    #[case("someday", Err("'someday' is not a date".to_string()))]
    fn relative_date(#[case] text: &str, #[case] expected: Result<Value, String>) {
        // Setup
        let today: Clock = Arc::new(|| NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        // Execute
        let result = parse_relative_date(text, &today);

        // Verify
        assert_eq!(result, expected);
    }

    #[test]
    fn handlers_unknown() {
        let today: Clock = Arc::new(|| NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(handlers("colour", &[], &today).is_empty());
        assert_eq!(handlers(DATE, &[], &today).len(), 2);
        assert_eq!(handlers(STRING, &[], &today).len(), 1);
    }
}
