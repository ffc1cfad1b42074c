//! CSV Data Loader Module
//! Handles dataset loading and typed record extraction using Polars.

use polars::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::data::{
    cleaner, BoroughRecord, COL_BOROUGH, COL_PRICE, COL_RENT, COL_RENT_COUNT, COL_SALES_VOLUME,
    COL_YIELD, REQUIRED_COLUMNS,
};
use crate::error::AnalysisError;

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Load a CSV file using Polars.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, AnalysisError> {
        if !file_path.exists() {
            return Err(AnalysisError::DataNotFound(file_path.to_path_buf()));
        }
        self.file_path = Some(file_path.to_path_buf());

        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(100))
            .finish()?
            .collect()?;

        Ok(self.df.insert(df))
    }

    /// Load a CSV file and materialize it as typed borough records.
    pub fn load_records(&mut self, file_path: &Path) -> Result<Vec<BoroughRecord>, AnalysisError> {
        let df = self.load_csv(file_path)?;
        borough_records(df)
    }
}

/// Column lookup by trimmed name; some exports of the dataset carry stray
/// whitespace in the header ("Average Sales Volume ").
fn resolve_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, AnalysisError> {
    df.get_columns()
        .iter()
        .find(|col| col.name().trim() == name)
        .ok_or_else(|| AnalysisError::SchemaMismatch(name.to_string()))
}

/// Bind the frame's columns by name and build one record per borough.
///
/// The schema is validated up front so a renamed or missing column surfaces
/// here instead of failing deep inside a computation. Duplicate borough
/// names are rejected; every numeric field is cleaned and parsed.
pub fn borough_records(df: &DataFrame) -> Result<Vec<BoroughRecord>, AnalysisError> {
    for required in REQUIRED_COLUMNS {
        resolve_column(df, required)?;
    }

    let names = text_values(resolve_column(df, COL_BOROUGH)?)?;
    let rents = cleaner::numeric_values(resolve_column(df, COL_RENT)?)?;
    let rent_counts = cleaner::numeric_values(resolve_column(df, COL_RENT_COUNT)?)?;
    let prices = cleaner::numeric_values(resolve_column(df, COL_PRICE)?)?;
    let volumes = cleaner::numeric_values(resolve_column(df, COL_SALES_VOLUME)?)?;
    let yields = cleaner::numeric_values(resolve_column(df, COL_YIELD)?)?;

    let mut seen = HashSet::with_capacity(names.len());
    let mut records = Vec::with_capacity(names.len());
    for (i, name) in names.into_iter().enumerate() {
        if !seen.insert(name.clone()) {
            return Err(AnalysisError::DuplicateBorough(name));
        }
        records.push(BoroughRecord {
            name,
            monthly_rent: rents[i],
            sale_price: prices[i],
            rent_count: rent_counts[i],
            sales_volume: volumes[i],
            gross_yield_pct: yields[i],
        });
    }
    Ok(records)
}

fn text_values(column: &Column) -> Result<Vec<String>, AnalysisError> {
    let mut values = Vec::with_capacity(column.len());
    for i in 0..column.len() {
        let val = column.get(i)?;
        let text = val.to_string().trim_matches('"').trim().to_string();
        if val.is_null() || text.is_empty() {
            return Err(AnalysisError::ParseError {
                column: column.name().to_string(),
                value: format!("<missing at row {i}>"),
            });
        }
        values.push(text);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    const HEADER: &str =
        "Boroughs,Average Monthly Rent (£),Counts of Rents,Average Price (£),Average Sales Volume,Gross Yield (%)";

    fn write_csv(body: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("housing.csv");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "{body}").unwrap();
        (dir, path)
    }

    #[test]
    fn loads_typed_records() {
        let (_dir, path) = write_csv(&format!(
            "{HEADER}\nCamden,2250,\"3,110\",\"840,000\",142,3.21\nSutton,1200,876,\"380,000\",204,3.79"
        ));
        let mut loader = DataLoader::new();
        let records = loader.load_records(&path).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Camden");
        assert_eq!(records[0].sale_price, 840_000.0);
        assert_eq!(records[0].rent_count, 3110.0);
        assert_eq!(records[1].monthly_rent, 1200.0);
        assert_eq!(records[1].gross_yield_pct, 3.79);
    }

    #[test]
    fn missing_file_is_data_not_found() {
        let mut loader = DataLoader::new();
        let err = loader.load_records(Path::new("no/such/file.csv")).unwrap_err();
        assert!(matches!(err, AnalysisError::DataNotFound(_)));
    }

    #[test]
    fn missing_column_is_schema_mismatch() {
        let (_dir, path) = write_csv(
            "Boroughs,Average Monthly Rent (£)\nCamden,2250\nSutton,1200",
        );
        let mut loader = DataLoader::new();
        let err = loader.load_records(&path).unwrap_err();
        match err {
            AnalysisError::SchemaMismatch(column) => assert_eq!(column, COL_RENT_COUNT),
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn header_whitespace_is_tolerated() {
        let (_dir, path) = write_csv(
            "Boroughs,Average Monthly Rent (£),Counts of Rents,Average Price (£),Average Sales Volume ,Gross Yield (%)\nCamden,2250,\"3,110\",\"840,000\",142,3.21",
        );
        let mut loader = DataLoader::new();
        let records = loader.load_records(&path).unwrap();
        assert_eq!(records[0].sales_volume, 142.0);
    }

    #[test]
    fn duplicate_borough_is_rejected() {
        let (_dir, path) = write_csv(&format!(
            "{HEADER}\nCamden,2250,\"3,110\",\"840,000\",142,3.21\nCamden,2250,\"3,110\",\"840,000\",142,3.21"
        ));
        let mut loader = DataLoader::new();
        let err = loader.load_records(&path).unwrap_err();
        assert!(matches!(err, AnalysisError::DuplicateBorough(name) if name == "Camden"));
    }
}
