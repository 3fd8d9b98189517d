//! Load batches of rating inputs from CSV

use super::{CoverageTier, Deductible, DwellingType, RatingInput};
use crate::error::{LoadError, RatingError};
use csv::Reader;
use std::path::{Path, PathBuf};

/// Raw CSV row matching the batch input columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "PropertyValue")]
    property_value: i64,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "DwellingType")]
    dwelling_type: String,
    #[serde(rename = "CoverageTier")]
    coverage_tier: String,
    #[serde(rename = "Deductible")]
    deductible: String,
}

impl CsvRow {
    fn to_input(self) -> Result<RatingInput, RatingError> {
        Ok(RatingInput::new(
            self.property_value,
            self.location.trim().to_ascii_uppercase(),
            self.dwelling_type.parse::<DwellingType>()?,
            self.coverage_tier.parse::<CoverageTier>()?,
            self.deductible.parse::<Deductible>()?,
        ))
    }
}

fn read_inputs<R: std::io::Read>(mut reader: Reader<R>, origin: &Path) -> Result<Vec<RatingInput>, LoadError> {
    let mut inputs = Vec::new();

    for (i, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result.map_err(|e| LoadError::csv(origin, e))?;
        let input = row
            .to_input()
            .map_err(|e| LoadError::record(origin, i + 1, e))?;
        inputs.push(input);
    }

    Ok(inputs)
}

/// Load all rating inputs from a CSV file
pub fn load_inputs<P: AsRef<Path>>(path: P) -> Result<Vec<RatingInput>, LoadError> {
    let path = path.as_ref();
    let reader = Reader::from_path(path).map_err(|e| LoadError::csv(path, e))?;
    read_inputs(reader, path)
}

/// Load rating inputs from any reader (e.g., string buffer, request body)
pub fn load_inputs_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<RatingInput>, LoadError> {
    read_inputs(Reader::from_reader(reader), &PathBuf::from("<input>"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATCH: &str = "\
PropertyValue,Location,DwellingType,CoverageTier,Deductible
25000,CA,apartment,standard,500
60000,la,house,premium,1000
8000,ZZ,condo,basic,2500
";

    #[test]
    fn test_load_inputs_from_reader() {
        let inputs = load_inputs_from_reader(BATCH.as_bytes()).unwrap();
        assert_eq!(inputs.len(), 3);

        assert_eq!(inputs[0], RatingInput::default());
        assert_eq!(inputs[1].location, "LA");
        assert_eq!(inputs[1].dwelling_type, DwellingType::House);
        assert_eq!(inputs[1].deductible, Deductible::D1000);
        assert_eq!(inputs[2].coverage_tier, CoverageTier::Basic);
    }

    #[test]
    fn test_bad_record_reports_position() {
        let data = "\
PropertyValue,Location,DwellingType,CoverageTier,Deductible
25000,CA,apartment,standard,500
25000,CA,yurt,standard,500
";
        let err = load_inputs_from_reader(data.as_bytes()).unwrap_err();
        match err {
            LoadError::Record { record, message, .. } => {
                assert_eq!(record, 2);
                assert!(message.contains("yurt"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unsupported_deductible_rejected() {
        let data = "\
PropertyValue,Location,DwellingType,CoverageTier,Deductible
25000,CA,apartment,standard,750
";
        assert!(load_inputs_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_load_sample_inputs() {
        let inputs = load_inputs("data/sample_inputs.csv").expect("Failed to load sample inputs");
        assert!(!inputs.is_empty());
        assert_eq!(inputs[0], RatingInput::default());
    }
}
