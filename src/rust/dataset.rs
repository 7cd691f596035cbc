//! The job dataset: one CSV row per known career outcome.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Dataset not found at {0}. Make sure the file is available.")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),
}

fn deserialize_code<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let value: f64 = raw.trim().parse().map_err(serde::de::Error::custom)?;
    if value < 0.0 || value > u8::MAX as f64 || value.fract() != 0.0 {
        return Err(serde::de::Error::custom(format!("invalid category code '{}'", raw)));
    }
    Ok(value as u8)
}

/// A single dataset row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(rename = "Gender", deserialize_with = "deserialize_code")]
    pub gender: u8,
    #[serde(rename = "UG Specialization (Major)")]
    pub major: String,
    #[serde(rename = "Interests")]
    pub interests: String,
    #[serde(rename = "Skills")]
    pub skills: String,
    #[serde(rename = "Average CGPA/Percentage")]
    pub cgpa: f64,
    #[serde(rename = "Certification Courses", deserialize_with = "deserialize_code")]
    pub certification: u8,
    #[serde(rename = "Working Status", deserialize_with = "deserialize_code")]
    pub working_status: u8,
    #[serde(rename = "Mapped Category")]
    pub category: String,
}

/// The read-only job dataset loaded once per session.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<JobRecord>,
}

impl Dataset {
    pub fn new(records: Vec<JobRecord>) -> Self {
        Self { records }
    }

    /// Loads the dataset from a CSV file with a header row.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DatasetError::NotFound(path.to_path_buf()),
            _ => DatasetError::IoError(e),
        })?;
        let dataset = Self::from_reader(BufReader::new(file))?;
        log::info!("Loaded {} dataset rows from {:?}", dataset.len(), path);
        Ok(dataset)
    }

    /// Parses rows one at a time. A row with a blank or malformed cell is
    /// logged and skipped; read failures abort the load.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut skipped = 0;
        for result in reader.deserialize::<JobRecord>() {
            match result {
                Ok(record) => records.push(record),
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or_default();
                    log::warn!("Skipping dataset row at line {}: {}", line, e);
                    skipped += 1;
                }
            }
        }
        if skipped > 0 {
            log::warn!("Skipped {} malformed dataset rows", skipped);
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct majors in the order they first appear.
    pub fn majors(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.major.as_str())
            .filter(|m| seen.insert(*m))
            .collect()
    }

    pub fn has_major(&self, major: &str) -> bool {
        self.records.iter().any(|r| r.major == major)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Gender, Profile};
    use crate::recommender::filter_and_rank;

    const CSV: &str = "\
Gender,UG Specialization (Major),Interests,Skills,Average CGPA/Percentage,Certification Courses,Working Status,Mapped Category
0,Computer Science,\"ai, data\",\"python, sql\",3.4,1,1,Data Scientist
1,Economics,finance,excel,3.1,0,0,Financial Analyst
0.0,Computer Science,web,javascript,2.8,0.0,1.0,Web Developer
";

    #[test]
    fn test_parse_rows() {
        let dataset = Dataset::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);
        let first = &dataset.records()[0];
        assert_eq!(first.gender, 0);
        assert_eq!(first.interests, "ai, data");
        assert_eq!(first.cgpa, 3.4);
        assert_eq!(first.category, "Data Scientist");
        // float-encoded codes
        assert_eq!(dataset.records()[2].working_status, 1);
    }

    #[test]
    fn test_majors_in_first_seen_order() {
        let dataset = Dataset::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(dataset.majors(), vec!["Computer Science", "Economics"]);
        assert!(dataset.has_major("Economics"));
        assert!(!dataset.has_major("Biology"));
    }

    #[test]
    fn test_missing_file() {
        let err = Dataset::load("/nonexistent/dataset.csv").unwrap_err();
        assert!(matches!(err, DatasetError::NotFound(_)));
    }

    #[test]
    fn test_bad_code_row_is_skipped() {
        let csv = "\
Gender,UG Specialization (Major),Interests,Skills,Average CGPA/Percentage,Certification Courses,Working Status,Mapped Category
0.5,CS,ai,python,3.0,1,1,X
0,CS,ai,python,3.0,1,1,Y
";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].category, "Y");
    }

    #[test]
    fn test_blank_cgpa_row_is_dropped() {
        let csv = "\
Gender,UG Specialization (Major),Interests,Skills,Average CGPA/Percentage,Certification Courses,Working Status,Mapped Category
0,Computer Science,ai,python,3.4,0,0,Data Scientist
1,Economics,finance,excel,,0,0,Financial Analyst
";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert!(!dataset.has_major("Economics"));

        let profile = Profile::new(Gender::Male, "Computer Science")
            .with_interests("ai")
            .with_skills("python");
        let ranked = filter_and_rank(&dataset, &profile);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].category(), "Data Scientist");
    }
}
