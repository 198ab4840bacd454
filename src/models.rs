use serde::{Deserialize, Serialize};

/// Patient sex inferred from the report text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// The population key this gender maps to in the reference range resource.
    pub fn as_key(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// One recognized lab test with its explanation and abnormality status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalTerm {
    pub term: String,
    /// Raw value string as it appeared in the report ("" when none was found).
    pub value: String,
    /// Raw unit string ("" when no unit pattern matched).
    pub unit: String,
    pub explanation: String,
    pub is_abnormal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Complete result of analyzing one uploaded report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportAnalysis {
    /// Leading excerpt of the cleaned report text.
    pub extracted_text: String,
    pub medical_terms: Vec<MedicalTerm>,
    pub summary: String,
}
