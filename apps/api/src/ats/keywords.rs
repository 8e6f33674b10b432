//! Keyword extraction — builds the vocabulary a resume "speaks".

use std::collections::HashSet;

use crate::ats::tokenizer::tokenize;
use crate::models::resume::ResumeDocument;

/// A deduplicated keyword set that remembers first-occurrence order.
///
/// Membership is what scoring cares about; the order only keeps reports reproducible.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `keyword` unless already present. Returns true when it was new.
    pub fn insert(&mut self, keyword: String) -> bool {
        if self.seen.contains(&keyword) {
            return false;
        }
        self.seen.insert(keyword.clone());
        self.ordered.push(keyword);
        true
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.seen.contains(keyword)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

impl FromIterator<String> for Vocabulary {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        let mut vocabulary = Vocabulary::new();
        for keyword in iter {
            vocabulary.insert(keyword);
        }
        vocabulary
    }
}

/// Tokenizes `text` and dedupes, keeping first occurrences.
pub fn vocabulary_of(text: &str) -> Vocabulary {
    tokenize(text).into_iter().collect()
}

/// Text fields of a resume in the fixed order they are scanned.
///
/// Name and contact details are skipped: they are not skills a job description asks for.
fn text_buckets(resume: &ResumeDocument) -> Vec<&str> {
    let mut buckets: Vec<&str> = vec![resume.header.title.as_str(), resume.summary.as_str()];

    for skill in &resume.skills {
        buckets.push(&skill.category);
        buckets.push(&skill.items);
    }

    for job in &resume.experience {
        buckets.extend([
            job.company.as_str(),
            job.role.as_str(),
            job.location.as_str(),
            job.date.as_str(),
        ]);
        buckets.extend(job.details.iter().map(String::as_str));
    }

    for education in &resume.education {
        buckets.push(&education.degree);
        buckets.push(&education.school);
    }

    buckets
}

/// Returns the resume's vocabulary: every keyword from its text fields, first occurrence first.
pub fn extract_resume_keywords(resume: &ResumeDocument) -> Vocabulary {
    text_buckets(resume)
        .into_iter()
        .flat_map(tokenize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Education, Job, SkillGroup};

    fn minimal_resume() -> ResumeDocument {
        let mut resume = ResumeDocument::sample();
        resume.header.title = "Android Engineer".to_string();
        resume.summary = String::new();
        resume.skills.clear();
        resume.experience.clear();
        resume.education.clear();
        resume
    }

    #[test]
    fn test_vocabulary_dedupes_and_keeps_first_order() {
        let vocab = vocabulary_of("kotlin java Kotlin swift java");
        assert_eq!(vocab.into_vec(), vec!["kotlin", "java", "swift"]);
    }

    #[test]
    fn test_title_and_summary_come_first() {
        let mut resume = minimal_resume();
        resume.summary = "Performance focused engineer".to_string();
        let keywords = extract_resume_keywords(&resume).into_vec();
        assert_eq!(keywords, vec!["android", "engineer", "performance", "focused"]);
    }

    #[test]
    fn test_name_and_contact_are_ignored() {
        let mut resume = minimal_resume();
        resume.header.name = "Zebulon Quartz".to_string();
        resume.header.email = "zebulon@quartz.dev".to_string();
        let vocab = extract_resume_keywords(&resume);
        assert!(!vocab.contains("zebulon"));
        assert!(!vocab.contains("quartz"));
    }

    #[test]
    fn test_all_sections_contribute_in_order() {
        let mut resume = minimal_resume();
        resume.skills.push(SkillGroup {
            category: "Languages".to_string(),
            items: "Kotlin, Java".to_string(),
        });
        resume.experience.push(Job {
            company: "Walmart".to_string(),
            location: "Bengaluru".to_string(),
            role: "Developer".to_string(),
            date: "2022".to_string(),
            details: vec!["Shipped Splunk dashboards".to_string()],
        });
        resume.education.push(Education {
            degree: "Computer Science".to_string(),
            school: "CMR Institute".to_string(),
            date: "2019".to_string(),
        });

        let keywords = extract_resume_keywords(&resume).into_vec();
        assert_eq!(
            keywords,
            vec![
                "android",
                "engineer",
                "languages",
                "kotlin",
                "java",
                "walmart",
                "developer",
                "bengaluru",
                "2022",
                "shipped",
                "splunk",
                "dashboards",
                "computer",
                "science",
                "cmr",
                "institute",
            ]
        );
    }

    #[test]
    fn test_education_date_is_not_scanned() {
        let mut resume = minimal_resume();
        resume.education.push(Education {
            degree: "MBA".to_string(),
            school: "Insead".to_string(),
            date: "2099".to_string(),
        });
        assert!(!extract_resume_keywords(&resume).contains("2099"));
    }

    #[test]
    fn test_empty_sections_contribute_nothing() {
        let mut resume = minimal_resume();
        resume.header.title = String::new();
        assert!(extract_resume_keywords(&resume).into_vec().is_empty());
    }
}
