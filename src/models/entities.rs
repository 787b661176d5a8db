use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityCategory {
    Symptom,
    Diagnosis,
    Treatment,
    Prognosis,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 4] = [
        EntityCategory::Symptom,
        EntityCategory::Diagnosis,
        EntityCategory::Treatment,
        EntityCategory::Prognosis,
    ];
}

/// Matched phrases per category. Each list is deduplicated and ordered by first mention.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EntityBundle {
    #[serde(rename = "Symptoms")]
    pub symptoms: Vec<String>,
    #[serde(rename = "Diagnosis")]
    pub diagnosis: Vec<String>,
    #[serde(rename = "Treatment")]
    pub treatment: Vec<String>,
    #[serde(rename = "Prognosis")]
    pub prognosis: Vec<String>,
}

impl EntityBundle {
    pub fn get(&self, category: EntityCategory) -> &[String] {
        match category {
            EntityCategory::Symptom => &self.symptoms,
            EntityCategory::Diagnosis => &self.diagnosis,
            EntityCategory::Treatment => &self.treatment,
            EntityCategory::Prognosis => &self.prognosis,
        }
    }

    pub fn get_mut(&mut self, category: EntityCategory) -> &mut Vec<String> {
        match category {
            EntityCategory::Symptom => &mut self.symptoms,
            EntityCategory::Diagnosis => &mut self.diagnosis,
            EntityCategory::Treatment => &mut self.treatment,
            EntityCategory::Prognosis => &mut self.prognosis,
        }
    }

    pub fn is_empty(&self) -> bool {
        EntityCategory::ALL.iter().all(|c| self.get(*c).is_empty())
    }
}
