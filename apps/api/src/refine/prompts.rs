// Prompt construction for AI refinement.
// The remote call itself lives behind `Refiner`; nothing here touches the network.

use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, NO_FABRICATION_INSTRUCTION};
use crate::models::resume::ResumeDocument;

/// Role and rewrite rules placed at the top of every refine prompt.
const REFINE_PREAMBLE: &str = "\
You are acting as both an ATS optimizer and a senior technical recruiter.
Rewrite the resume below to maximize relevance to the job description while staying truthful and concise.

Rules:
- Keep exactly the same top-level JSON fields: header, summary, skills, experience, education. Do not add or remove fields.
- Keep bullet lists concise and impact-focused, with metrics where the input already has them.
- Weave the missing / target keywords in naturally where the experience supports them. No keyword stuffing.";

/// Renders the refine prompt: rules, job description, comma-joined missing keywords,
/// and the resume as indented JSON.
pub fn build_ai_prompt(
    resume: &ResumeDocument,
    job_description: &str,
    missing_keywords: &[String],
) -> String {
    let resume_json = serde_json::to_string_pretty(resume).unwrap_or_default();

    format!(
        "{REFINE_PREAMBLE}\n- {NO_FABRICATION_INSTRUCTION}\n- {JSON_ONLY_INSTRUCTION}\n\n\
         Job Description:\n{job_description}\n\n\
         Missing / target keywords to weave in:\n{keywords}\n\n\
         Resume JSON to improve:\n{resume_json}\n",
        keywords = missing_keywords.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_job_description_and_keywords() {
        let prompt = build_ai_prompt(
            &ResumeDocument::sample(),
            "Staff engineer, Kafka and Terraform",
            &["kafka".to_string(), "terraform".to_string()],
        );
        assert!(prompt.contains("Job Description:\nStaff engineer, Kafka and Terraform"));
        assert!(prompt.contains("weave in:\nkafka, terraform\n"));
    }

    #[test]
    fn test_prompt_embeds_pretty_resume_json() {
        let resume = ResumeDocument::sample();
        let prompt = build_ai_prompt(&resume, "jd", &[]);
        let pretty = serde_json::to_string_pretty(&resume).unwrap();
        assert!(prompt.contains(&pretty));
        assert!(prompt.contains("\n  \"header\": {"));
    }

    #[test]
    fn test_prompt_carries_rules() {
        let prompt = build_ai_prompt(&ResumeDocument::sample(), "jd", &[]);
        assert!(prompt.contains("header, summary, skills, experience, education"));
        assert!(prompt.contains("Do NOT invent companies, roles, dates"));
        assert!(prompt.contains("Do NOT wrap it in markdown code fences"));
        assert!(prompt.contains("No keyword stuffing"));
    }

    #[test]
    fn test_placeholder_like_text_in_job_description_is_left_alone() {
        let prompt = build_ai_prompt(&ResumeDocument::sample(), "{keywords} {resume_json}", &[]);
        assert!(prompt.contains("Job Description:\n{keywords} {resume_json}\n"));
    }
}
