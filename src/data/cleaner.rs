//! Column Cleaner
//! Normalizes numeric-looking text columns (thousands separators) to floats.

use polars::prelude::*;

use crate::error::AnalysisError;

/// Extract a column as `f64` values.
///
/// String columns are parsed after stripping `,` thousands separators and
/// surrounding whitespace. Numeric columns are cast straight to `f64`, so
/// re-applying to an already-clean column is a no-op.
pub fn numeric_values(column: &Column) -> Result<Vec<f64>, AnalysisError> {
    match column.dtype() {
        DataType::String => parse_text_column(column),
        DataType::Float32
        | DataType::Float64
        | DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => {
            let cast = column.cast(&DataType::Float64)?;
            let ca = cast.f64()?;
            let mut values = Vec::with_capacity(ca.len());
            for i in 0..ca.len() {
                match ca.get(i) {
                    Some(v) => values.push(v),
                    None => return Err(missing(column.name(), i)),
                }
            }
            Ok(values)
        }
        other => Err(AnalysisError::ParseError {
            column: column.name().to_string(),
            value: format!("<{other} column>"),
        }),
    }
}

fn parse_text_column(column: &Column) -> Result<Vec<f64>, AnalysisError> {
    let mut values = Vec::with_capacity(column.len());
    for i in 0..column.len() {
        let val = column.get(i)?;
        if val.is_null() {
            return Err(missing(column.name(), i));
        }
        let raw = val.to_string();
        let text = raw.trim_matches('"').trim();
        match text.replace(',', "").parse::<f64>() {
            Ok(parsed) => values.push(parsed),
            Err(_) => {
                return Err(AnalysisError::ParseError {
                    column: column.name().to_string(),
                    value: text.to_string(),
                })
            }
        }
    }
    Ok(values)
}

fn missing(column: &str, row: usize) -> AnalysisError {
    AnalysisError::ParseError {
        column: column.to_string(),
        value: format!("<missing at row {row}>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_thousands_separators() {
        let column = Column::new("price".into(), vec!["1,234", "987", "1,250,500.5"]);
        let values = numeric_values(&column).unwrap();
        assert_eq!(values, vec![1234.0, 987.0, 1_250_500.5]);
    }

    #[test]
    fn numeric_column_is_a_no_op() {
        let column = Column::new("rent".into(), vec![1500.0, 2750.5]);
        let values = numeric_values(&column).unwrap();
        assert_eq!(values, vec![1500.0, 2750.5]);
    }

    #[test]
    fn integer_column_casts_to_float() {
        let column = Column::new("volume".into(), vec![148i64, 358]);
        let values = numeric_values(&column).unwrap();
        assert_eq!(values, vec![148.0, 358.0]);
    }

    #[test]
    fn rejects_non_numeric_text() {
        let column = Column::new("price".into(), vec!["1,234", "n/a"]);
        let err = numeric_values(&column).unwrap_err();
        match err {
            AnalysisError::ParseError { column, value } => {
                assert_eq!(column, "price");
                assert_eq!(value, "n/a");
            }
            other => panic!("expected ParseError, got {other:?}"),
        }
    }
}
