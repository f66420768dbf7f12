//! Recommendation scoring — pluggable, trait-based scorer that ranks the
//! career catalog against a user's interests and skill set.
//!
//! Default: `RuleBasedScorer` (pure-Rust, fast, deterministic, fully testable).
//!
//! `AppState` holds an `Arc<dyn CareerScorer>`, swapped at startup.

use std::cmp::Ordering;
use std::collections::HashSet;

use async_trait::async_trait;
use serde::Serialize;

use crate::catalog::CareerWithSkills;
use crate::errors::AppError;
use crate::models::catalog::Career;

/// Weight of one interest keyword appearing in a career title.
pub const INTEREST_WEIGHT: f64 = 1.0;
/// Weight of one overlapping required skill.
pub const OVERLAP_WEIGHT: f64 = 0.8;
/// How many catalog careers the fallback list is bounded to.
pub const FALLBACK_LIMIT: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// One ranked career with its requirement list and the user's skill gap.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub career: Career,
    pub score: f64,
    pub required_skills: Vec<String>,
    /// required_skills minus the user's effective skill set, case-insensitive,
    /// in requirement order.
    pub missing_skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The career scorer trait. Implement this to swap ranking backends without
/// touching the endpoint, handler, or caller code.
///
/// Carried in `AppState` as `Arc<dyn CareerScorer>`.
#[async_trait]
pub trait CareerScorer: Send + Sync {
    async fn rank(
        &self,
        interests: &[String],
        user_skills: &HashSet<String>,
        catalog: &[CareerWithSkills],
    ) -> Result<Vec<Recommendation>, AppError>;
}

/// Deterministic keyword-and-overlap scorer.
///
/// Algorithm:
/// 1. For each career: score = 1.0 per interest that is a case-insensitive
///    substring of the title + 0.8 per required skill the user already has.
/// 2. Candidates are careers with score > 0 or nonzero skill overlap; this is
///    the membership criterion, not just a sort key.
/// 3. If no career qualifies, fall back to the first `FALLBACK_LIMIT` catalog
///    entries with score 0.
/// 4. Sort by score descending; the sort is stable, so ties keep catalog order.
pub struct RuleBasedScorer;

#[async_trait]
impl CareerScorer for RuleBasedScorer {
    async fn rank(
        &self,
        interests: &[String],
        user_skills: &HashSet<String>,
        catalog: &[CareerWithSkills],
    ) -> Result<Vec<Recommendation>, AppError> {
        Ok(rank_careers(interests, user_skills, catalog))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core ranking algorithm
// ────────────────────────────────────────────────────────────────────────────

pub fn rank_careers(
    interests: &[String],
    user_skills: &HashSet<String>,
    catalog: &[CareerWithSkills],
) -> Vec<Recommendation> {
    let interests_lower: Vec<String> = interests
        .iter()
        .map(|i| i.trim().to_lowercase())
        .filter(|i| !i.is_empty())
        .collect();
    let skills_lower: HashSet<String> = user_skills.iter().map(|s| s.to_lowercase()).collect();

    let mut candidates: Vec<Recommendation> = catalog
        .iter()
        .filter_map(|entry| {
            let title_lower = entry.career.title.to_lowercase();
            let interest_hits = interests_lower
                .iter()
                .filter(|i| title_lower.contains(i.as_str()))
                .count();

            let overlap = entry
                .required_skills
                .iter()
                .filter(|r| skills_lower.contains(&r.to_lowercase()))
                .count();

            let score = interest_hits as f64 * INTEREST_WEIGHT + overlap as f64 * OVERLAP_WEIGHT;
            if score > 0.0 || overlap > 0 {
                Some(recommendation_for(entry, score, &skills_lower))
            } else {
                None
            }
        })
        .collect();

    // Fallback: an arbitrary bounded subset of the catalog, score 0.
    if candidates.is_empty() {
        candidates = catalog
            .iter()
            .take(FALLBACK_LIMIT)
            .map(|entry| recommendation_for(entry, 0.0, &skills_lower))
            .collect();
    }

    // Stable sort: ties keep catalog order.
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    candidates
}

fn recommendation_for(
    entry: &CareerWithSkills,
    score: f64,
    skills_lower: &HashSet<String>,
) -> Recommendation {
    let missing_skills = entry
        .required_skills
        .iter()
        .filter(|r| !skills_lower.contains(&r.to_lowercase()))
        .cloned()
        .collect();
    Recommendation {
        career: entry.career.clone(),
        score,
        required_skills: entry.required_skills.clone(),
        missing_skills,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_career(title: &str, required: &[&str]) -> CareerWithSkills {
        CareerWithSkills {
            career: Career {
                id: Uuid::new_v4(),
                title: title.to_string(),
                category: None,
                avg_salary: None,
                growth_rate: None,
                created_at: Utc::now(),
            },
            required_skills: required.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn skills(list: &[&str]) -> HashSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_overlap_scores_point_eight() {
        // interests=[programming], skills=[python], one career requiring
        // [python, data-structures, algorithms]. "programming" is not a
        // substring of "Software Engineer", so score = 0.8 (one overlap).
        let catalog = vec![make_career(
            "Software Engineer",
            &["python", "data-structures", "algorithms"],
        )];
        let recs = rank_careers(
            &["programming".to_string()],
            &skills(&["python"]),
            &catalog,
        );
        assert_eq!(recs.len(), 1);
        assert!((recs[0].score - 0.8).abs() < f64::EPSILON);
        assert_eq!(recs[0].missing_skills, vec!["data-structures", "algorithms"]);
    }

    #[test]
    fn test_interest_substring_match_is_case_insensitive() {
        let catalog = vec![make_career("Data Analyst", &["sql"])];
        let recs = rank_careers(&["DATA".to_string()], &skills(&[]), &catalog);
        assert_eq!(recs.len(), 1);
        assert!((recs[0].score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_membership_requires_score_or_overlap() {
        let catalog = vec![
            make_career("Data Analyst", &["sql", "statistics"]),
            make_career("UI/UX Designer", &["figma"]),
        ];
        let recs = rank_careers(&["data".to_string()], &skills(&["sql"]), &catalog);
        // Designer has neither an interest hit nor a skill overlap.
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].career.title, "Data Analyst");
        assert!(recs[0].score > 0.0 || !recs[0].required_skills.is_empty());
    }

    #[test]
    fn test_skill_overlap_alone_qualifies() {
        let catalog = vec![make_career("Cloud Engineer", &["aws", "linux"])];
        let recs = rank_careers(&[], &skills(&["LINUX"]), &catalog);
        assert_eq!(recs.len(), 1);
        assert!((recs[0].score - 0.8).abs() < f64::EPSILON);
        assert_eq!(recs[0].missing_skills, vec!["aws"]);
    }

    #[test]
    fn test_fallback_is_bounded_and_zero_scored() {
        let catalog: Vec<_> = (0..8)
            .map(|i| make_career(&format!("Career {i}"), &["skill"]))
            .collect();
        let recs = rank_careers(&["nothing".to_string()], &skills(&[]), &catalog);
        assert_eq!(recs.len(), FALLBACK_LIMIT);
        assert!(recs.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn test_empty_catalog_fallback_is_empty() {
        let recs = rank_careers(&["anything".to_string()], &skills(&[]), &[]);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_sort_descending_stable_on_ties() {
        let catalog = vec![
            make_career("Back-end Developer", &["python", "sql"]),
            make_career("Data Scientist", &["python", "statistics"]),
            make_career("Data Analyst", &["sql", "python", "statistics"]),
        ];
        let recs = rank_careers(&[], &skills(&["python"]), &catalog);
        // All tie at 0.8; catalog order is preserved.
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].career.title, "Back-end Developer");
        assert_eq!(recs[1].career.title, "Data Scientist");
        assert_eq!(recs[2].career.title, "Data Analyst");
    }

    #[test]
    fn test_interest_and_overlap_combine() {
        let catalog = vec![make_career("Data Analyst", &["sql", "statistics"])];
        let recs = rank_careers(&["data".to_string()], &skills(&["sql"]), &catalog);
        // 1.0 interest + 0.8 overlap
        assert!((recs[0].score - 1.8).abs() < 1e-9);
    }

    #[test]
    fn test_missing_skills_preserve_requirement_order() {
        let catalog = vec![make_career("ML Engineer", &["python", "ml", "docker", "aws"])];
        let recs = rank_careers(&[], &skills(&["docker"]), &catalog);
        assert_eq!(recs[0].missing_skills, vec!["python", "ml", "aws"]);
    }

    #[test]
    fn test_blank_interest_entries_ignored() {
        let catalog = vec![make_career("Data Analyst", &["sql"])];
        let recs = rank_careers(
            &["  ".to_string(), String::new()],
            &skills(&["sql"]),
            &catalog,
        );
        assert_eq!(recs.len(), 1);
        assert!((recs[0].score - 0.8).abs() < f64::EPSILON);
    }
}
