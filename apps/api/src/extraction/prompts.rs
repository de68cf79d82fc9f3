// Resume extraction prompt: persona, JSON-only directive, and few-shot pairs.
// The examples steer field names and tone; they are not enforced by code.

use crate::llm_client::prompts::{JSON_ONLY_DIRECTIVE, NO_FABRICATION_INSTRUCTION};

/// One input/output pair embedded in the system prompt.
#[derive(Debug, Clone, Copy)]
pub struct FewShotExample {
    pub input_text: &'static str,
    pub expected_json_output: &'static str,
}

/// Immutable system instruction. Rendered once at startup.
#[derive(Debug, Clone, Copy)]
pub struct PromptSpec {
    pub persona: &'static str,
    pub format_directive: &'static str,
    pub rules: &'static str,
    pub examples: &'static [FewShotExample],
}

impl PromptSpec {
    /// Renders the full system message.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(self.persona);
        out.push(' ');
        out.push_str(self.format_directive);
        out.push(' ');
        out.push_str(self.rules);
        out.push_str("\n\n");
        out.push_str(OUTPUT_SHAPE);

        for (i, example) in self.examples.iter().enumerate() {
            out.push_str(&format!(
                "\n\nEXAMPLE {n}\nINPUT TEXT:\n{input}\n\nEXPECTED JSON OUTPUT:\n{output}",
                n = i + 1,
                input = example.input_text.trim(),
                output = example.expected_json_output.trim(),
            ));
        }

        out
    }
}

pub const RESUME_PERSONA: &str = "\
You are a helpful assistant and an expert resume writer. \
You turn free-form biographical text into a clean, professional resume. \
Rewrite descriptions in concise, action-oriented resume language.";

const OUTPUT_SHAPE: &str = r#"OUTPUT SHAPE (include only the fields the text supports):
{
  "name": "string",
  "contact": {"email", "phone", "linkedin", "github", "website", "twitter", "portfolio", "address": "string"},
  "summary": "string",
  "education": [{"degree": "string", "institution": "string", "year": "string"}],
  "experience": [{"position": "string", "company": "string", "duration": "string", "location": "string", "description": "string"}],
  "projects": [{"title": "string", "description": "string", "techStack": ["string"], "deployment": "url"}],
  "skills": {"technical": ["string"], "soft": ["string"]},
  "achievements": ["string"],
  "certifications": ["string"],
  "volunteer": [...], "publications": [...], "languages": ["string"], "hobbies": ["string"],
  "references": [{"name": "string", "company": "string", "position": "string", "phone": "string", "email": "string"}]
}
Skill categories may differ by profession (for example "clinical" for healthcare)."#;

pub const SOFTWARE_ENGINEER_INPUT: &str = r#"
My name is Arjun Mehta. You can reach me at arjun.mehta@example.com or +1 415 555 0142,
and my GitHub is github.com/arjunm. I did my B.Tech in Computer Science at IIT Bombay,
graduating in 2019. After that I joined Flipkart as a software engineer in Bangalore from
2019 to 2022 where I worked on the checkout service and cut payment latency by 30%.
Since 2022 I've been a senior backend engineer at Stripe in San Francisco, building
fraud detection pipelines. On the side I built SplitEase, an expense sharing app with
React, Node.js and PostgreSQL, deployed at splitease.app. I'm good at Go, Python,
Kubernetes and I like mentoring juniors and working with product teams. I won the
Smart India Hackathon in 2018 and I'm an AWS Certified Solutions Architect.
"#;

pub const SOFTWARE_ENGINEER_OUTPUT: &str = r#"{
  "name": "Arjun Mehta",
  "contact": {
    "email": "arjun.mehta@example.com",
    "phone": "+1 415 555 0142",
    "github": "github.com/arjunm"
  },
  "summary": "Backend engineer with 5+ years building high-throughput payment and fraud systems at Flipkart and Stripe.",
  "education": [
    {"degree": "B.Tech in Computer Science", "institution": "IIT Bombay", "year": "2019"}
  ],
  "experience": [
    {
      "position": "Senior Backend Engineer",
      "company": "Stripe",
      "duration": "2022 - Present",
      "location": "San Francisco, CA",
      "description": "Build fraud detection pipelines for payment traffic."
    },
    {
      "position": "Software Engineer",
      "company": "Flipkart",
      "duration": "2019 - 2022",
      "location": "Bangalore, India",
      "description": "Worked on the checkout service; reduced payment latency by 30%."
    }
  ],
  "projects": [
    {
      "title": "SplitEase",
      "description": "Expense sharing application for groups.",
      "techStack": ["React", "Node.js", "PostgreSQL"],
      "deployment": "https://splitease.app"
    }
  ],
  "skills": {
    "technical": ["Go", "Python", "Kubernetes", "React", "Node.js", "PostgreSQL"],
    "soft": ["Mentoring", "Cross-functional collaboration"]
  },
  "achievements": ["Winner, Smart India Hackathon 2018"],
  "certifications": ["AWS Certified Solutions Architect"]
}"#;

pub const NURSE_INPUT: &str = r#"
Maria Gonzalez, registered nurse, maria.gonzalez@example.org, 312-555-0199, Chicago IL.
BSN from Loyola University Chicago 2016. ICU nurse at Northwestern Memorial Hospital
since 2018, before that med-surg nurse at Rush University Medical Center 2016-2018.
Skilled in critical care, ventilator management and patient education, calm under
pressure and a strong communicator. BLS and ACLS certified. Fluent in Spanish and English.
Volunteer at the Chicago free clinic on weekends.
"#;

pub const NURSE_OUTPUT: &str = r#"{
  "name": "Maria Gonzalez",
  "contact": {
    "email": "maria.gonzalez@example.org",
    "phone": "312-555-0199",
    "address": "Chicago, IL"
  },
  "summary": "Registered nurse with 8+ years of acute and critical care experience.",
  "education": [
    {"degree": "Bachelor of Science in Nursing", "institution": "Loyola University Chicago", "year": "2016"}
  ],
  "experience": [
    {
      "position": "ICU Registered Nurse",
      "company": "Northwestern Memorial Hospital",
      "duration": "2018 - Present",
      "location": "Chicago, IL",
      "description": "Provide critical care including ventilator management for ICU patients."
    },
    {
      "position": "Medical-Surgical Nurse",
      "company": "Rush University Medical Center",
      "duration": "2016 - 2018",
      "location": "Chicago, IL",
      "description": "Delivered post-operative care and patient education."
    }
  ],
  "skills": {
    "clinical": ["Critical care", "Ventilator management", "Patient education"],
    "soft": ["Composure under pressure", "Communication"],
    "certifications": ["BLS", "ACLS"]
  },
  "certifications": ["Basic Life Support (BLS)", "Advanced Cardiovascular Life Support (ACLS)"],
  "languages": ["English", "Spanish"],
  "volunteer": ["Weekend volunteer, Chicago free clinic"]
}"#;

pub const RESUME_EXAMPLES: &[FewShotExample] = &[
    FewShotExample {
        input_text: SOFTWARE_ENGINEER_INPUT,
        expected_json_output: SOFTWARE_ENGINEER_OUTPUT,
    },
    FewShotExample {
        input_text: NURSE_INPUT,
        expected_json_output: NURSE_OUTPUT,
    },
];

pub const RESUME_PROMPT: PromptSpec = PromptSpec {
    persona: RESUME_PERSONA,
    format_directive: JSON_ONLY_DIRECTIVE,
    rules: NO_FABRICATION_INSTRUCTION,
    examples: RESUME_EXAMPLES,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::normalize::normalize;
    use serde_json::Value;

    #[test]
    fn test_rendered_prompt_contains_every_part() {
        let prompt = RESUME_PROMPT.render();
        assert!(prompt.starts_with(RESUME_PERSONA));
        assert!(prompt.contains("pure JSON"));
        assert!(prompt.contains("OUTPUT SHAPE"));
        assert!(prompt.contains("EXAMPLE 1"));
        assert!(prompt.contains("EXAMPLE 2"));
        assert!(prompt.contains("Arjun Mehta"));
        assert!(prompt.contains("Maria Gonzalez"));
    }

    #[test]
    fn test_prompt_without_examples_has_no_example_section() {
        let spec = PromptSpec {
            examples: &[],
            ..RESUME_PROMPT
        };
        assert!(!spec.render().contains("EXAMPLE"));
    }

    #[test]
    fn test_example_outputs_are_objects_that_normalize_cleanly() {
        for example in RESUME_EXAMPLES {
            let value: Value = serde_json::from_str(example.expected_json_output).unwrap();
            let obj = value.as_object().expect("example output must be an object");
            let (record, drift) = normalize(obj);
            assert!(drift.is_empty(), "example drifted: {drift:?}");
            assert!(record.name.is_some());
            assert!(record.contact.email.is_some());
            assert!(!record.education.is_empty());
            assert!(!record.experience.is_empty());
        }
    }

    #[test]
    fn test_example_inputs_are_nonempty() {
        for example in RESUME_EXAMPLES {
            assert!(!example.input_text.trim().is_empty());
        }
    }
}
