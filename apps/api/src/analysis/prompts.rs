// Resume evaluation prompt templates.
// All prompts for the analysis module are defined here.

pub const EVALUATION_SYSTEM: &str = r#"You are a senior HR professional who reviews resumes for a living.
Evaluate the resume you are given and reply with structured feedback as JSON. Return ONLY the JSON object: no prose, no markdown fences.

EVALUATE:
1. Strengths: standout skills, achievements and anything that sets the candidate apart.
2. Areas to improve: weak spots, missing details, formatting problems.
3. Missing skills and qualifications: measured against the job application when one is provided.
4. Technical and soft skill advice: certifications or skills worth adding.
5. Formatting and readability: clarity, concision, structure.
6. Overall score: a whole number out of 10 against industry norms.

OUTPUT SCHEMA (return exactly this structure):
{
  "strengths": ["string"],
  "areas_to_improve": ["string"],
  "missing_skills": ["string"],
  "suggested_enhancements": ["string"],
  "overall_score": 7
}

Return valid JSON only."#;

/// User turn: the literal resume text and the literal job application text (may be empty).
pub fn evaluation_prompt(resume_text: &str, job_application: &str) -> String {
    format!(
        "CANDIDATE RESUME:\n{resume_text}\n\n\
         JOB APPLICATION (may be empty):\n{job_application}\n\n\
         Respond with the JSON object only."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_names_every_field() {
        for field in [
            "strengths",
            "areas_to_improve",
            "missing_skills",
            "suggested_enhancements",
            "overall_score",
        ] {
            assert!(EVALUATION_SYSTEM.contains(field), "missing {field}");
        }
    }

    #[test]
    fn test_prompt_embeds_texts_verbatim() {
        let prompt = evaluation_prompt("Rust {engineer}", "Needs Kafka");
        assert!(prompt.contains("Rust {engineer}"));
        assert!(prompt.contains("Needs Kafka"));
    }

    #[test]
    fn test_prompt_with_no_job_application() {
        let prompt = evaluation_prompt("resume body", "");
        assert!(prompt.contains("JOB APPLICATION (may be empty):\n\n"));
    }
}
