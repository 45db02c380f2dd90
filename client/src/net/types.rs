//! Wire DTOs for the hosted backend and the integrations endpoint.
//!
//! DESIGN
//! ======
//! Entity records mirror the backend collections field-for-field. Optional
//! fields default on deserialize so records created by older forms still load.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// EMPLOYEES
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    #[default]
    Active,
    OnLeave,
    Terminated,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    #[default]
    FullTime,
    PartTime,
    Contract,
}

/// Employee directory record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub status: EmploymentStatus,
    /// Work location, usually an atoll or island name (e.g. `"Majuro"`).
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

// =============================================================================
// LEAVE
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    Annual,
    Sick,
    Maternity,
    Paternity,
    Bereavement,
    Unpaid,
}

impl LeaveType {
    pub const ALL: [LeaveType; 6] = [
        LeaveType::Annual,
        LeaveType::Sick,
        LeaveType::Maternity,
        LeaveType::Paternity,
        LeaveType::Bereavement,
        LeaveType::Unpaid,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Annual => "Annual",
            Self::Sick => "Sick",
            Self::Maternity => "Maternity",
            Self::Paternity => "Paternity",
            Self::Bereavement => "Bereavement",
            Self::Unpaid => "Unpaid",
        }
    }

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Sick => "sick",
            Self::Maternity => "maternity",
            Self::Paternity => "paternity",
            Self::Bereavement => "bereavement",
            Self::Unpaid => "unpaid",
        }
    }

    #[must_use]
    pub fn from_id(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == raw)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: String,
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub status: LeaveStatus,
    #[serde(default)]
    pub reviewed_by: Option<String>,
}

// =============================================================================
// POLICIES & TRAINING
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    NeedsReview,
    NonCompliant,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
    #[serde(default)]
    pub compliance_status: Option<ComplianceStatus>,
    #[serde(default)]
    pub compliance_score: Option<u8>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingCourse {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration_hours: Option<f64>,
    #[serde(default)]
    pub mandatory: bool,
    /// Storage path of uploaded course material.
    #[serde(default)]
    pub material_path: Option<String>,
}

// =============================================================================
// INTEGRATIONS
// =============================================================================

/// Result of an object-storage upload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub path: String,
    #[serde(default)]
    pub public_url: Option<String>,
}

/// Body of `POST /api/integrations/llm/invoke`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LlmInvokeRequest {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// JSON schema the answer must satisfy; plain text when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_json_schema: Option<serde_json::Value>,
}

/// Answer from the LLM integration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LlmOutput {
    Text { text: String },
    Json { value: serde_json::Value },
}

/// Structured policy review produced by the LLM integration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyAnalysis {
    pub compliance_score: u8,
    pub status: ComplianceStatus,
    pub summary: String,
    #[serde(default)]
    pub gaps: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}
