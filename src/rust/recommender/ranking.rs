use std::collections::HashSet;
use serde::Serialize;

use crate::dataset::{Dataset, JobRecord};
use crate::profile::Profile;
use super::utils::split_tags;

/// A dataset row that passed every structured filter, with its tag overlap scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedJob {
    /// Position of the row in the dataset
    pub row: usize,
    pub record: JobRecord,
    pub interest_match: usize,
    pub skill_match: usize,
}

impl RankedJob {
    pub fn total_match(&self) -> usize {
        self.interest_match + self.skill_match
    }

    pub fn category(&self) -> &str {
        &self.record.category
    }
}

/// Number of distinct comma-separated tags the two texts share.
///
/// Tags are compared exactly after trimming surrounding whitespace.
pub fn overlap_count(row_text: &str, query_text: &str) -> usize {
    let row: HashSet<&str> = split_tags(row_text).collect();
    let query: HashSet<&str> = split_tags(query_text).collect();
    row.intersection(&query).count()
}

/// True when `record` satisfies all five structured predicates of `profile`.
pub fn matches_profile(record: &JobRecord, profile: &Profile) -> bool {
    record.gender == profile.gender.code()
        && record.major == profile.major
        && record.cgpa >= profile.min_cgpa
        && record.certification == profile.certification.code()
        && record.working_status == profile.working_status.code()
}

/// Filters the dataset down to rows matching the profile and ranks them by
/// combined interest and skill overlap, highest first. Rows with equal totals
/// keep their dataset order.
///
/// The profile is assumed to be validated; see [`Profile::validate`].
pub fn filter_and_rank(dataset: &Dataset, profile: &Profile) -> Vec<RankedJob> {
    let mut ranked: Vec<RankedJob> = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_profile(record, profile))
        .map(|(row, record)| RankedJob {
            row,
            record: record.clone(),
            interest_match: overlap_count(&record.interests, &profile.interests),
            skill_match: overlap_count(&record.skills, &profile.skills),
        })
        .collect();

    ranked.sort_by(|a, b| b.total_match().cmp(&a.total_match()).then(a.row.cmp(&b.row)));
    log::debug!("{} of {} rows match the profile", ranked.len(), dataset.len());
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Certification, Gender, WorkingStatus};

    fn record(major: &str, cgpa: f64, interests: &str, skills: &str, category: &str) -> JobRecord {
        JobRecord {
            gender: 0,
            major: major.into(),
            interests: interests.into(),
            skills: skills.into(),
            cgpa,
            certification: 1,
            working_status: 1,
            category: category.into(),
        }
    }

    fn profile() -> Profile {
        Profile::new(Gender::Male, "Computer Science")
            .with_interests("ai, ml")
            .with_skills("python")
            .with_min_cgpa(3.0)
            .with_certification(Certification::Yes, "")
            .with_working_status(WorkingStatus::Working)
    }

    #[test]
    fn test_overlap_count() {
        assert_eq!(overlap_count("ai, data", "ai, ml"), 1);
        assert_eq!(overlap_count("ai, data", "cooking"), 0);
        assert_eq!(overlap_count("ai,ml", "ml, ai, ai"), 2);
        assert_eq!(overlap_count("", "ai"), 0);
    }

    #[test]
    fn test_overlap_is_case_sensitive() {
        assert_eq!(overlap_count("AI", "ai"), 0);
    }

    #[test]
    fn test_filters_every_predicate() {
        let mut wrong_gender = record("Computer Science", 3.5, "ai", "python", "gender");
        wrong_gender.gender = 1;
        let mut no_cert = record("Computer Science", 3.5, "ai", "python", "cert");
        no_cert.certification = 0;
        let mut idle = record("Computer Science", 3.5, "ai", "python", "status");
        idle.working_status = 0;

        let dataset = Dataset::new(vec![
            wrong_gender,
            record("Economics", 3.5, "ai", "python", "major"),
            record("Computer Science", 2.9, "ai", "python", "cgpa"),
            no_cert,
            idle,
            record("Computer Science", 3.0, "ai", "python", "keep"),
        ]);

        let ranked = filter_and_rank(&dataset, &profile());
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].category(), "keep");
        assert_eq!(ranked[0].row, 5);
    }

    #[test]
    fn test_sorted_by_total_then_row() {
        let dataset = Dataset::new(vec![
            record("Computer Science", 3.2, "art", "excel", "none"),
            record("Computer Science", 3.2, "ai", "sql", "one-a"),
            record("Computer Science", 3.2, "ai, ml", "python", "three"),
            record("Computer Science", 3.2, "ml", "java", "one-b"),
        ]);

        let ranked = filter_and_rank(&dataset, &profile());
        let order: Vec<_> = ranked.iter().map(|r| r.category()).collect();
        assert_eq!(order, vec!["three", "one-a", "one-b", "none"]);
        assert!(ranked.windows(2).all(|w| w[0].total_match() >= w[1].total_match()));
        assert_eq!(ranked[0].interest_match, 2);
        assert_eq!(ranked[0].skill_match, 1);
    }

    #[test]
    fn test_no_matching_rows() {
        let dataset = Dataset::new(vec![record("Economics", 3.9, "ai", "python", "x")]);
        assert!(filter_and_rank(&dataset, &profile()).is_empty());
    }
}
