//! ATS Scoring — keyword overlap between a job description and a resume.
//!
//! Algorithm:
//! 1. J = deduplicated job-description tokens (first-occurrence order)
//! 2. R = resume vocabulary (see `keywords::extract_resume_keywords`)
//! 3. matched = J ∩ R, missing = J − R, both in J order
//! 4. score = round(100 × |matched| / |J|), or 0 when J is empty
//!
//! The report is a pure function of its two inputs and is byte-identical across runs.

use serde::{Deserialize, Serialize};

use crate::ats::keywords::{extract_resume_keywords, vocabulary_of};
use crate::models::resume::ResumeDocument;

/// Matched and missing lists are truncated to this many entries in the report.
pub const MAX_REPORTED_KEYWORDS: usize = 25;

pub const EMPTY_JOB_DESCRIPTION_SUMMARY: &str =
    "Provide a job description to see your ATS alignment.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsReport {
    pub score: u32, // 0 – 100
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub summary: String,
}

/// Untruncated split of the job-description vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordPartition {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl KeywordPartition {
    pub fn total(&self) -> usize {
        self.matched.len() + self.missing.len()
    }
}

/// Splits the job description's keywords by whether the resume contains them.
pub fn partition_keywords(job_description: &str, resume: &ResumeDocument) -> KeywordPartition {
    let target = vocabulary_of(job_description);
    let resume_vocabulary = extract_resume_keywords(resume);

    let (matched, missing): (Vec<String>, Vec<String>) = target
        .into_vec()
        .into_iter()
        .partition(|keyword| resume_vocabulary.contains(keyword));

    KeywordPartition { matched, missing }
}

/// Builds the ATS report shown next to the preview.
pub fn compute_ats_report(job_description: &str, resume: &ResumeDocument) -> AtsReport {
    let partition = partition_keywords(job_description, resume);
    let total = partition.total();

    if total == 0 {
        return AtsReport {
            score: 0,
            matched_keywords: vec![],
            missing_keywords: vec![],
            summary: EMPTY_JOB_DESCRIPTION_SUMMARY.to_string(),
        };
    }

    let matched_count = partition.matched.len();
    let score = ((matched_count as f64 / total as f64) * 100.0).round() as u32;

    AtsReport {
        score,
        summary: format!("Matching {matched_count} of {total} target keywords."),
        matched_keywords: truncated(partition.matched),
        missing_keywords: truncated(partition.missing),
    }
}

fn truncated(mut keywords: Vec<String>) -> Vec<String> {
    keywords.truncate(MAX_REPORTED_KEYWORDS);
    keywords
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Job, SkillGroup};

    fn kotlin_resume() -> ResumeDocument {
        let mut resume = ResumeDocument::sample();
        resume.header.title = String::new();
        resume.summary = String::new();
        resume.experience.clear();
        resume.education.clear();
        resume.skills = vec![SkillGroup {
            category: "Languages".to_string(),
            items: "Kotlin, Java".to_string(),
        }];
        resume
    }

    #[test]
    fn test_kotlin_java_scenario() {
        let report = compute_ats_report(
            "Looking for a Kotlin developer with Java experience",
            &kotlin_resume(),
        );

        assert!(report.matched_keywords.contains(&"kotlin".to_string()));
        assert!(report.matched_keywords.contains(&"java".to_string()));
        for excluded in ["looking", "for", "with"] {
            assert!(!report.matched_keywords.contains(&excluded.to_string()));
        }
        // JD vocabulary: looking, kotlin, developer, java, experience → 2 of 5
        assert_eq!(report.score, 40);
        assert_eq!(report.summary, "Matching 2 of 5 target keywords.");
        assert_eq!(report.missing_keywords, vec!["looking", "developer", "experience"]);
    }

    #[test]
    fn test_empty_job_description_scores_zero() {
        for jd in ["", "   ", "a an the for with"] {
            let report = compute_ats_report(jd, &ResumeDocument::sample());
            assert_eq!(report.score, 0);
            assert_eq!(report.summary, EMPTY_JOB_DESCRIPTION_SUMMARY);
            assert!(report.matched_keywords.is_empty());
            assert!(report.missing_keywords.is_empty());
        }
    }

    #[test]
    fn test_lists_follow_job_description_order() {
        let report = compute_ats_report("java swift kotlin dart", &kotlin_resume());
        assert_eq!(report.matched_keywords, vec!["java", "kotlin"]);
        assert_eq!(report.missing_keywords, vec!["swift", "dart"]);
    }

    #[test]
    fn test_duplicate_jd_tokens_count_once() {
        let report = compute_ats_report("kotlin kotlin KOTLIN rust", &kotlin_resume());
        assert_eq!(report.score, 50);
        assert_eq!(report.summary, "Matching 1 of 2 target keywords.");
    }

    #[test]
    fn test_score_rounds_to_nearest() {
        // 1 of 3 → 33.33 → 33; 2 of 3 → 66.67 → 67
        assert_eq!(compute_ats_report("kotlin rust scala", &kotlin_resume()).score, 33);
        assert_eq!(compute_ats_report("kotlin java scala", &kotlin_resume()).score, 67);
    }

    #[test]
    fn test_lists_are_capped_but_summary_counts_everything() {
        let jd: Vec<String> = (0..40).map(|i| format!("skill{i:02}")).collect();
        let mut resume = kotlin_resume();
        resume.skills[0].items = jd[..30].join(", ");

        let report = compute_ats_report(&jd.join(" "), &resume);
        assert_eq!(report.matched_keywords.len(), MAX_REPORTED_KEYWORDS);
        assert_eq!(report.missing_keywords.len(), 10);
        assert_eq!(report.matched_keywords[0], "skill00");
        assert_eq!(report.matched_keywords[24], "skill24");
        assert_eq!(report.summary, "Matching 30 of 40 target keywords.");
        assert_eq!(report.score, 75);
    }

    #[test]
    fn test_partition_reconstructs_jd_vocabulary() {
        let jd = "Senior Rust engineer: Kafka, Kubernetes, PostgreSQL, gRPC, on-call, \
                  mentoring, Java interop, Kotlin tooling, AWS, Terraform";
        let resume = ResumeDocument::sample();
        let partition = partition_keywords(jd, &resume);
        let vocabulary = extract_resume_keywords(&resume);

        let mut rebuilt: Vec<&String> = partition.matched.iter().chain(&partition.missing).collect();
        rebuilt.sort();
        let mut expected = vocabulary_of(jd).into_vec();
        expected.sort();
        assert_eq!(rebuilt, expected.iter().collect::<Vec<_>>());

        assert!(partition.matched.iter().all(|k| vocabulary.contains(k)));
        assert!(partition.missing.iter().all(|k| !vocabulary.contains(k)));
    }

    #[test]
    fn test_resume_scored_against_its_own_text_is_perfect() {
        let resume = ResumeDocument::sample();
        let mut own_text = vec![resume.header.title.clone(), resume.summary.clone()];
        for skill in &resume.skills {
            own_text.push(format!("{} {}", skill.category, skill.items));
        }
        for job in &resume.experience {
            own_text.push(format!("{} {} {} {}", job.company, job.role, job.location, job.date));
            own_text.extend(job.details.iter().cloned());
        }

        let report = compute_ats_report(&own_text.join("\n"), &resume);
        assert_eq!(report.score, 100);
        assert!(report.missing_keywords.is_empty());
    }

    #[test]
    fn test_report_is_deterministic() {
        let resume = ResumeDocument::sample();
        let jd = "Rust Kafka Kubernetes payments latency Terraform";
        let first = serde_json::to_string(&compute_ats_report(jd, &resume)).unwrap();
        let second = serde_json::to_string(&compute_ats_report(jd, &resume)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let value = serde_json::to_value(compute_ats_report("kotlin", &kotlin_resume())).unwrap();
        assert_eq!(value["score"], 100);
        assert!(value.get("matchedKeywords").is_some());
        assert!(value.get("missingKeywords").is_some());
        assert!(value.get("summary").is_some());
    }

    #[test]
    fn test_missing_optional_job_fields_do_not_break_scoring() {
        let mut resume = kotlin_resume();
        resume.experience.push(Job {
            company: "Acme".to_string(),
            location: String::new(),
            role: "Engineer".to_string(),
            date: String::new(),
            details: vec![],
        });
        let report = compute_ats_report("acme engineer", &resume);
        assert_eq!(report.score, 100);
    }
}
