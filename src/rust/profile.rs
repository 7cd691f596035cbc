//! The user's profile as submitted through the recommendation form.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::recommender::RecommendError;
use crate::recommender::utils::split_tags;

/// Lowest CGPA the form accepts.
pub const MIN_CGPA: f64 = 2.0;
/// Highest CGPA the form accepts.
pub const MAX_CGPA: f64 = 4.0;

pub const MISSING_INTEREST_MESSAGE: &str = "Please enter at least one interest.";
pub const MISSING_SKILL_MESSAGE: &str = "Please enter at least one skill.";

/// Gender choice, stored in the dataset as a numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    PreferNotToSay,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::PreferNotToSay];

    pub fn code(&self) -> u8 {
        match self {
            Self::Male => 0,
            Self::Female => 1,
            Self::PreferNotToSay => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::PreferNotToSay => "Prefer not to say",
        }
    }
}

/// Whether the user holds a certification; dataset code 1 for yes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Certification {
    No,
    Yes,
}

impl Certification {
    pub fn code(&self) -> u8 {
        match self {
            Self::No => 0,
            Self::Yes => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes",
        }
    }
}

/// Current employment status; dataset code 1 for working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkingStatus {
    NotWorking,
    Working,
}

impl WorkingStatus {
    pub fn code(&self) -> u8 {
        match self {
            Self::NotWorking => 0,
            Self::Working => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NotWorking => "Not Working",
            Self::Working => "Working",
        }
    }
}

fn normalize_choice(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "male" | "0" => Ok(Self::Male),
            "female" | "1" => Ok(Self::Female),
            "prefernottosay" | "2" => Ok(Self::PreferNotToSay),
            _ => Err(format!("unknown gender '{}', expected Male, Female or Prefer not to say", s)),
        }
    }
}

impl FromStr for Certification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "yes" | "y" | "1" => Ok(Self::Yes),
            "no" | "n" | "0" => Ok(Self::No),
            _ => Err(format!("unknown certification answer '{}', expected Yes or No", s)),
        }
    }
}

impl FromStr for WorkingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "working" | "1" => Ok(Self::Working),
            "notworking" | "0" => Ok(Self::NotWorking),
            _ => Err(format!("unknown working status '{}', expected Working or Not Working", s)),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Certification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for WorkingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One form submission. Built fresh per request and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub gender: Gender,
    pub major: String,
    /// Comma-separated interest tags
    pub interests: String,
    /// Comma-separated skill tags
    pub skills: String,
    /// Rows with a CGPA below this are filtered out
    pub min_cgpa: f64,
    pub certification: Certification,
    pub certification_title: String,
    pub working_status: WorkingStatus,
}

impl Profile {
    /// Creates a profile with the form's defaults: lowest CGPA, no
    /// certification, not working, empty text fields.
    pub fn new(gender: Gender, major: impl Into<String>) -> Self {
        Self {
            gender,
            major: major.into(),
            interests: String::new(),
            skills: String::new(),
            min_cgpa: MIN_CGPA,
            certification: Certification::No,
            certification_title: String::new(),
            working_status: WorkingStatus::NotWorking,
        }
    }

    pub fn with_interests(mut self, interests: impl Into<String>) -> Self {
        self.interests = interests.into();
        self
    }

    pub fn with_skills(mut self, skills: impl Into<String>) -> Self {
        self.skills = skills.into();
        self
    }

    pub fn with_min_cgpa(mut self, cgpa: f64) -> Self {
        self.min_cgpa = cgpa;
        self
    }

    pub fn with_certification(mut self, certification: Certification, title: impl Into<String>) -> Self {
        self.certification = certification;
        self.certification_title = title.into();
        self
    }

    pub fn with_working_status(mut self, status: WorkingStatus) -> Self {
        self.working_status = status;
        self
    }

    /// Rejects profiles the form would not submit: no interest tag, no skill
    /// tag, or a CGPA outside the slider range.
    pub fn validate(&self) -> Result<(), RecommendError> {
        if split_tags(&self.interests).next().is_none() {
            return Err(RecommendError::ValidationError(MISSING_INTEREST_MESSAGE.into()));
        }
        if split_tags(&self.skills).next().is_none() {
            return Err(RecommendError::ValidationError(MISSING_SKILL_MESSAGE.into()));
        }
        if !(MIN_CGPA..=MAX_CGPA).contains(&self.min_cgpa) {
            return Err(RecommendError::ValidationError(format!(
                "CGPA must be between {:.1} and {:.1}, got {}",
                MIN_CGPA, MAX_CGPA, self.min_cgpa
            )));
        }
        if self.major.trim().is_empty() {
            return Err(RecommendError::ValidationError("Please choose a major.".into()));
        }
        Ok(())
    }

    /// The free text fed to the career classifier: major, interests, skills
    /// and certification title joined by spaces.
    pub fn combined_text(&self) -> String {
        [
            self.major.as_str(),
            self.interests.as_str(),
            self.skills.as_str(),
            self.certification_title.as_str(),
        ]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile::new(Gender::Male, "Computer Science")
            .with_interests("ai, ml")
            .with_skills("python")
            .with_min_cgpa(3.0)
    }

    #[test]
    fn test_choice_parsing() {
        assert_eq!("Prefer not to say".parse::<Gender>().unwrap(), Gender::PreferNotToSay);
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("Not Working".parse::<WorkingStatus>().unwrap(), WorkingStatus::NotWorking);
        assert_eq!("not-working".parse::<WorkingStatus>().unwrap(), WorkingStatus::NotWorking);
        assert_eq!("YES".parse::<Certification>().unwrap(), Certification::Yes);
        assert!("maybe".parse::<Certification>().is_err());
    }

    #[test]
    fn test_dataset_codes() {
        assert_eq!(Gender::Male.code(), 0);
        assert_eq!(Gender::Female.code(), 1);
        assert_eq!(Gender::PreferNotToSay.code(), 2);
        assert_eq!(Certification::Yes.code(), 1);
        assert_eq!(WorkingStatus::Working.code(), 1);
        assert_eq!(WorkingStatus::NotWorking.code(), 0);
    }

    #[test]
    fn test_empty_interests_rejected() {
        let err = profile().with_interests("").validate().unwrap_err();
        assert_eq!(err.to_string(), MISSING_INTEREST_MESSAGE);

        let err = profile().with_interests(" , ").validate().unwrap_err();
        assert_eq!(err.to_string(), MISSING_INTEREST_MESSAGE);
    }

    #[test]
    fn test_empty_skills_rejected() {
        let err = profile().with_skills("").validate().unwrap_err();
        assert_eq!(err.to_string(), MISSING_SKILL_MESSAGE);
    }

    #[test]
    fn test_cgpa_bounds() {
        assert!(profile().with_min_cgpa(2.0).validate().is_ok());
        assert!(profile().with_min_cgpa(4.0).validate().is_ok());
        assert!(profile().with_min_cgpa(1.9).validate().is_err());
        assert!(profile().with_min_cgpa(4.1).validate().is_err());
    }

    #[test]
    fn test_combined_text() {
        let p = profile().with_certification(Certification::Yes, "Data Science Certification");
        assert_eq!(p.combined_text(), "Computer Science ai, ml python Data Science Certification");
        assert_eq!(profile().combined_text(), "Computer Science ai, ml python");
    }
}
