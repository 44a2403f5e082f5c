use crate::error::{MadobeError, Result};
use crate::escape::escape;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value as JsonValue;

/// Runtime value categories supported by the formatting dispatcher.
///
/// Generated widget markup defers value formatting to render time; this
/// closed enum replaces open-ended reflection with an explicit variant per
/// supported category, resolved where a value enters the system.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
    Seq(Vec<FormValue>),
}

impl FormValue {
    /// Convert a loosely-typed JSON value into a FormValue.
    ///
    /// JSON has no date types; dates arrive as strings and are resolved by
    /// the caller if needed. Objects are not form values.
    pub fn from_json(json: JsonValue) -> Result<Self> {
        match json {
            JsonValue::Null => Ok(FormValue::Null),
            JsonValue::Bool(b) => Ok(FormValue::Bool(b)),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(FormValue::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(FormValue::Float(f))
                } else {
                    Err(MadobeError::TypeError {
                        message: "Invalid number".to_string(),
                    })
                }
            }
            JsonValue::String(s) => Ok(FormValue::Str(s)),
            JsonValue::Array(arr) => {
                let values: Result<Vec<FormValue>> =
                    arr.into_iter().map(FormValue::from_json).collect();
                Ok(FormValue::Seq(values?))
            }
            JsonValue::Object(_) => Err(MadobeError::TypeError {
                message: "objects are not form values".to_string(),
            }),
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FormValue::Null => "null",
            FormValue::Bool(_) => "boolean",
            FormValue::Int(_) => "integer",
            FormValue::Float(_) => "float",
            FormValue::Str(_) => "string",
            FormValue::Date(_) => "date",
            FormValue::DateTime(_) => "datetime",
            FormValue::Time(_) => "time",
            FormValue::Seq(_) => "sequence",
        }
    }
}

/// Format a scalar value for widget output.
///
/// Per-type defaults: strings are HTML-escaped, numbers and booleans use
/// their canonical display form, dates render as `YYYY/MM/DD`, datetimes as
/// `YYYY/MM/DD HH:MM`, times as `HH:MM`. The minimum date/datetime values
/// are sentinels and render as the empty string, as does `Null`. A custom
/// `format` string (chrono `strftime` syntax) overrides the date defaults.
///
/// Sequences must go through [`format_values`]; passing one here is a type
/// error.
pub fn format_value(value: &FormValue, format: Option<&str>) -> Result<String> {
    match value {
        FormValue::Null => Ok(String::new()),
        FormValue::Bool(b) => Ok(b.to_string()),
        FormValue::Int(n) => Ok(n.to_string()),
        FormValue::Float(f) => Ok(f.to_string()),
        FormValue::Str(s) => Ok(escape(s)),
        FormValue::Date(d) => {
            if *d == NaiveDate::MIN {
                Ok(String::new())
            } else {
                Ok(d.format(format.unwrap_or("%Y/%m/%d")).to_string())
            }
        }
        FormValue::DateTime(dt) => {
            if *dt == NaiveDateTime::MIN {
                Ok(String::new())
            } else {
                Ok(dt.format(format.unwrap_or("%Y/%m/%d %H:%M")).to_string())
            }
        }
        FormValue::Time(t) => Ok(t.format(format.unwrap_or("%H:%M")).to_string()),
        FormValue::Seq(_) => Err(MadobeError::TypeError {
            message: "cannot format sequence as a scalar".to_string(),
        }),
    }
}

/// Format every element of a sequence with the same format string.
///
/// Widgets that iterate (multiple_hidden, multiple_checkbox) consume the
/// per-element results.
pub fn format_values(values: &[FormValue], format: Option<&str>) -> Result<Vec<String>> {
    values.iter().map(|v| format_value(v, format)).collect()
}
