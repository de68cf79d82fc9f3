use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fully-defaulted resume record produced by `extraction::normalize`.
///
/// Every known field is always present: absent scalars serialize as `null`,
/// absent lists as `[]`. Field names follow the camelCase the prompt asks for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub name: Option<String>,
    pub contact: Contact,
    pub summary: Option<String>,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub skills: Skills,
    pub achievements: Vec<String>,
    pub certifications: Vec<String>,
    /// Entries are strings or objects depending on the source text.
    pub volunteer: Vec<Value>,
    /// Entries are strings or objects depending on the source text.
    pub publications: Vec<Value>,
    pub languages: Vec<String>,
    pub hobbies: Vec<String>,
    pub references: Vec<Reference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub portfolio: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: Option<String>,
    /// Always a plain name, whatever shape the model used.
    pub institution: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub position: Option<String>,
    pub company: Option<String>,
    pub duration: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tech_stack: Vec<String>,
    pub deployment: Option<String>,
}

/// Skill groups. The category set varies by profession; anything beyond the
/// four common groups lands in `other`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
    pub clinical: Vec<String>,
    pub certifications: Vec<String>,
    pub other: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub name: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_record_serializes_every_field() {
        let value = serde_json::to_value(ResumeRecord::default()).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "name",
            "contact",
            "summary",
            "education",
            "experience",
            "projects",
            "skills",
            "achievements",
            "certifications",
            "volunteer",
            "publications",
            "languages",
            "hobbies",
            "references",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(value["name"], Value::Null);
        assert_eq!(value["education"], json!([]));
        assert_eq!(value["contact"]["email"], Value::Null);
    }

    #[test]
    fn test_project_tech_stack_is_camel_case() {
        let project = Project {
            title: Some("Ledger".to_string()),
            tech_stack: vec!["Rust".to_string()],
            ..Default::default()
        };
        let value = serde_json::to_value(project).unwrap();
        assert_eq!(value["techStack"], json!(["Rust"]));
        assert!(value.get("tech_stack").is_none());
    }
}
