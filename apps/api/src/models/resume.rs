use serde::{Deserialize, Serialize};

/// A header link. Stored resumes may carry either a bare URL string or a labelled object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderLink {
    Labeled { label: String, url: String },
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeHeader {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub links: Vec<HeaderLink>,
}

/// One skills row, e.g. `Languages: Kotlin, Java`. `items` is free text, not a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub items: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub company: String,
    #[serde(default)]
    pub location: String,
    pub role: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub school: String,
    #[serde(default)]
    pub date: String,
}

/// Root resume value. Every engine treats it as an immutable snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub header: ResumeHeader,
    pub summary: String,
    pub skills: Vec<SkillGroup>,
    pub experience: Vec<Job>,
    pub education: Vec<Education>,
}

impl ResumeDocument {
    /// True when any body section carries non-blank text. An empty resume is not worth exporting.
    pub fn has_content(&self) -> bool {
        let filled = |s: &str| !s.trim().is_empty();

        filled(&self.summary)
            || self
                .skills
                .iter()
                .any(|s| filled(&s.category) || filled(&s.items))
            || self.experience.iter().any(|job| {
                filled(&job.company)
                    || filled(&job.role)
                    || filled(&job.location)
                    || filled(&job.date)
                    || job.details.iter().any(|d| filled(d))
            })
            || self
                .education
                .iter()
                .any(|e| filled(&e.degree) || filled(&e.school) || filled(&e.date))
    }

    /// The starter resume shown when nothing valid has been stored yet.
    pub fn sample() -> Self {
        ResumeDocument {
            header: ResumeHeader {
                name: "ALEX MORGAN".to_string(),
                title: "Senior Backend Engineer | Distributed Systems".to_string(),
                email: "alex.morgan@example.com".to_string(),
                phone: "+1-555-0100".to_string(),
                links: vec![
                    HeaderLink::Labeled {
                        label: "LinkedIn".to_string(),
                        url: "https://www.linkedin.com".to_string(),
                    },
                    HeaderLink::Labeled {
                        label: "GitHub".to_string(),
                        url: "https://github.com".to_string(),
                    },
                ],
            },
            summary: "Backend engineer with 7+ years building high-throughput services. \
                Cut p99 latency by 40% on a payments platform serving 2M daily users."
                .to_string(),
            skills: vec![
                SkillGroup {
                    category: "Languages".to_string(),
                    items: "Rust, Go, Python, SQL".to_string(),
                },
                SkillGroup {
                    category: "Infrastructure".to_string(),
                    items: "Kubernetes, Kafka, PostgreSQL, Redis, AWS".to_string(),
                },
            ],
            experience: vec![
                Job {
                    company: "NORTHWIND PAYMENTS".to_string(),
                    location: "Remote".to_string(),
                    role: "Senior Backend Engineer".to_string(),
                    date: "03/2021 – Present".to_string(),
                    details: vec![
                        "Rebuilt the settlement pipeline in Rust, reducing batch runtime by 60%."
                            .to_string(),
                        "Led migration of 14 services to Kubernetes with zero customer downtime."
                            .to_string(),
                    ],
                },
                Job {
                    company: "CONTOSO LABS".to_string(),
                    location: "Austin, TX".to_string(),
                    role: "Software Engineer".to_string(),
                    date: "06/2017 – 02/2021".to_string(),
                    details: vec![
                        "Built Kafka-based event ingestion handling 50K events per second."
                            .to_string(),
                    ],
                },
            ],
            education: vec![Education {
                degree: "B.S. Computer Science".to_string(),
                school: "State University".to_string(),
                date: "2013 – 2017".to_string(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_link_accepts_string_and_object() {
        let links: Vec<HeaderLink> = serde_json::from_value(json!([
            "https://example.com",
            {"label": "GitHub", "url": "https://github.com/x"}
        ]))
        .unwrap();
        assert_eq!(links[0], HeaderLink::Url("https://example.com".to_string()));
        assert!(matches!(&links[1], HeaderLink::Labeled { label, .. } if label == "GitHub"));
    }

    #[test]
    fn test_job_optional_fields_default_to_empty() {
        let job: Job = serde_json::from_value(json!({"company": "Acme", "role": "Dev"})).unwrap();
        assert_eq!(job.location, "");
        assert_eq!(job.date, "");
        assert!(job.details.is_empty());
    }

    #[test]
    fn test_sample_has_content() {
        assert!(ResumeDocument::sample().has_content());
    }

    #[test]
    fn test_blank_resume_has_no_content() {
        let mut resume = ResumeDocument::sample();
        resume.summary = "   ".to_string();
        resume.skills.clear();
        resume.experience.clear();
        resume.education = vec![Education {
            degree: String::new(),
            school: String::new(),
            date: String::new(),
        }];
        assert!(!resume.has_content());
    }

    #[test]
    fn test_resume_serializes_with_top_level_fields_in_order() {
        let json = serde_json::to_string(&ResumeDocument::sample()).unwrap();
        let header = json.find("\"header\"").unwrap();
        let summary = json.find("\"summary\"").unwrap();
        let education = json.find("\"education\"").unwrap();
        assert!(header < summary && summary < education);
    }
}
