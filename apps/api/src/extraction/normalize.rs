//! Schema normalizer: turns whatever JSON object the model produced into a
//! fully-defaulted `ResumeRecord`, recording every place where the raw shape
//! had to be bent to fit.
//!
//! Rules:
//! - absent or `null` → default (`None` / empty list)
//! - empty or whitespace-only strings → `None`
//! - numbers and booleans where text is expected → stringified (coerced)
//! - `institution` may be a string or `{ "name": ... }`; both yield the name
//! - a lone value where a list is expected → one-element list (coerced)
//! - anything else of the wrong shape → dropped (coerced)
//! - keys outside the known schema, at the top level, in `contact`, or inside
//!   list entries → reported in `unknown_fields`, not copied

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::resume::{
    Contact, Education, Experience, Project, Reference, ResumeRecord, Skills,
};

const KNOWN_FIELDS: &[&str] = &[
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
];

const CONTACT_FIELDS: &[&str] = &[
    "email",
    "phone",
    "linkedin",
    "github",
    "website",
    "twitter",
    "portfolio",
    "address",
];

const EDUCATION_FIELDS: &[&str] = &["degree", "institution", "year"];

const EXPERIENCE_FIELDS: &[&str] = &["position", "company", "duration", "location", "description"];

const PROJECT_FIELDS: &[&str] = &["title", "description", "techStack", "deployment"];

const REFERENCE_FIELDS: &[&str] = &["name", "company", "position", "phone", "email"];

/// Differences between the raw model output and the normalized record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaDrift {
    /// Keys present in the raw output that the record has no slot for.
    pub unknown_fields: Vec<String>,
    /// Paths whose value had the wrong type and was converted or dropped.
    pub coerced_fields: Vec<String>,
}

impl SchemaDrift {
    pub fn is_empty(&self) -> bool {
        self.unknown_fields.is_empty() && self.coerced_fields.is_empty()
    }
}

/// Normalizes a raw model object into a `ResumeRecord`.
pub fn normalize(raw: &Map<String, Value>) -> (ResumeRecord, SchemaDrift) {
    let mut n = Normalizer::default();

    n.unknown_keys(raw, KNOWN_FIELDS, "");

    let record = ResumeRecord {
        name: n.text(raw.get("name"), "name"),
        contact: n.contact(raw.get("contact")),
        summary: n.text(raw.get("summary"), "summary"),
        education: n.object_list(raw.get("education"), "education", Normalizer::education),
        experience: n.object_list(raw.get("experience"), "experience", Normalizer::experience),
        projects: n.object_list(raw.get("projects"), "projects", Normalizer::project),
        skills: n.skills(raw.get("skills")),
        achievements: n.string_list(raw.get("achievements"), "achievements"),
        certifications: n.string_list(raw.get("certifications"), "certifications"),
        volunteer: n.raw_list(raw.get("volunteer"), "volunteer"),
        publications: n.raw_list(raw.get("publications"), "publications"),
        languages: n.string_list(raw.get("languages"), "languages"),
        hobbies: n.string_list(raw.get("hobbies"), "hobbies"),
        references: n.object_list(raw.get("references"), "references", Normalizer::reference),
    };

    (record, n.drift)
}

#[derive(Default)]
struct Normalizer {
    drift: SchemaDrift,
}

impl Normalizer {
    fn coerced(&mut self, path: &str) {
        self.drift.coerced_fields.push(path.to_string());
    }

    /// Reports keys of `obj` outside `known`, prefixed with `path` when nested.
    fn unknown_keys(&mut self, obj: &Map<String, Value>, known: &[&str], path: &str) {
        for key in obj.keys() {
            if known.contains(&key.as_str()) {
                continue;
            }
            let field = if path.is_empty() {
                key.clone()
            } else {
                format!("{path}.{key}")
            };
            self.drift.unknown_fields.push(field);
        }
    }

    fn text(&mut self, value: Option<&Value>, path: &str) -> Option<String> {
        match value {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => non_blank(s),
            Some(Value::Number(n)) => {
                self.coerced(path);
                Some(n.to_string())
            }
            Some(Value::Bool(b)) => {
                self.coerced(path);
                Some(b.to_string())
            }
            Some(Value::Array(_)) | Some(Value::Object(_)) => {
                self.coerced(path);
                None
            }
        }
    }

    fn institution(&mut self, value: Option<&Value>, path: &str) -> Option<String> {
        match value {
            Some(Value::Object(obj)) => match obj.get("name") {
                Some(name) => self.text(Some(name), &format!("{path}.name")),
                None => {
                    self.coerced(path);
                    None
                }
            },
            other => self.text(other, path),
        }
    }

    fn string_list(&mut self, value: Option<&Value>, path: &str) -> Vec<String> {
        match value {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| self.text(Some(item), &format!("{path}[{i}]")))
                .collect(),
            Some(single) => {
                self.coerced(path);
                self.text(Some(single), path).into_iter().collect()
            }
        }
    }

    fn raw_list(&mut self, value: Option<&Value>, path: &str) -> Vec<Value> {
        match value {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(single) => {
                self.coerced(path);
                vec![single.clone()]
            }
        }
    }

    fn object_list<T>(
        &mut self,
        value: Option<&Value>,
        path: &str,
        item: fn(&mut Self, &Map<String, Value>, &str) -> T,
    ) -> Vec<T> {
        match value {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .filter_map(|(i, entry)| {
                    let entry_path = format!("{path}[{i}]");
                    match entry {
                        Value::Object(obj) => Some(item(self, obj, &entry_path)),
                        _ => {
                            self.coerced(&entry_path);
                            None
                        }
                    }
                })
                .collect(),
            Some(Value::Object(obj)) => {
                self.coerced(path);
                vec![item(self, obj, path)]
            }
            Some(_) => {
                self.coerced(path);
                Vec::new()
            }
        }
    }

    fn contact(&mut self, value: Option<&Value>) -> Contact {
        let obj = match value {
            None | Some(Value::Null) => return Contact::default(),
            Some(Value::Object(obj)) => obj,
            Some(_) => {
                self.coerced("contact");
                return Contact::default();
            }
        };

        self.unknown_keys(obj, CONTACT_FIELDS, "contact");

        Contact {
            email: self.text(obj.get("email"), "contact.email"),
            phone: self.text(obj.get("phone"), "contact.phone"),
            linkedin: self.text(obj.get("linkedin"), "contact.linkedin"),
            github: self.text(obj.get("github"), "contact.github"),
            website: self.text(obj.get("website"), "contact.website"),
            twitter: self.text(obj.get("twitter"), "contact.twitter"),
            portfolio: self.text(obj.get("portfolio"), "contact.portfolio"),
            address: self.text(obj.get("address"), "contact.address"),
        }
    }

    fn skills(&mut self, value: Option<&Value>) -> Skills {
        let obj = match value {
            None | Some(Value::Null) => return Skills::default(),
            Some(Value::Object(obj)) => obj,
            // A flat list is the most common drift: treat it as technical skills.
            Some(Value::Array(_)) => {
                self.coerced("skills");
                return Skills {
                    technical: self.string_list(value, "skills"),
                    ..Default::default()
                };
            }
            Some(_) => {
                self.coerced("skills");
                return Skills::default();
            }
        };

        let mut skills = Skills::default();
        for (key, entry) in obj {
            let path = format!("skills.{key}");
            let items = self.string_list(Some(entry), &path);
            match key.as_str() {
                "technical" => skills.technical = items,
                "soft" => skills.soft = items,
                "clinical" => skills.clinical = items,
                "certifications" => skills.certifications = items,
                _ => {
                    skills.other.insert(key.clone(), items);
                }
            }
        }
        skills
    }

    fn education(&mut self, obj: &Map<String, Value>, path: &str) -> Education {
        self.unknown_keys(obj, EDUCATION_FIELDS, path);
        Education {
            degree: self.text(obj.get("degree"), &format!("{path}.degree")),
            institution: self.institution(obj.get("institution"), &format!("{path}.institution")),
            year: self.text(obj.get("year"), &format!("{path}.year")),
        }
    }

    fn experience(&mut self, obj: &Map<String, Value>, path: &str) -> Experience {
        self.unknown_keys(obj, EXPERIENCE_FIELDS, path);
        Experience {
            position: self.text(obj.get("position"), &format!("{path}.position")),
            company: self.text(obj.get("company"), &format!("{path}.company")),
            duration: self.text(obj.get("duration"), &format!("{path}.duration")),
            location: self.text(obj.get("location"), &format!("{path}.location")),
            description: self.text(obj.get("description"), &format!("{path}.description")),
        }
    }

    fn project(&mut self, obj: &Map<String, Value>, path: &str) -> Project {
        self.unknown_keys(obj, PROJECT_FIELDS, path);
        Project {
            title: self.text(obj.get("title"), &format!("{path}.title")),
            description: self.text(obj.get("description"), &format!("{path}.description")),
            tech_stack: self.string_list(obj.get("techStack"), &format!("{path}.techStack")),
            deployment: self.text(obj.get("deployment"), &format!("{path}.deployment")),
        }
    }

    fn reference(&mut self, obj: &Map<String, Value>, path: &str) -> Reference {
        self.unknown_keys(obj, REFERENCE_FIELDS, path);
        Reference {
            name: self.text(obj.get("name"), &format!("{path}.name")),
            company: self.text(obj.get("company"), &format!("{path}.company")),
            position: self.text(obj.get("position"), &format!("{path}.position")),
            phone: self.text(obj.get("phone"), &format!("{path}.phone")),
            email: self.text(obj.get("email"), &format!("{path}.email")),
        }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
