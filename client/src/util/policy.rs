//! AI compliance review of HR policies.
//!
//! DESIGN
//! ======
//! The review asks the LLM integration for JSON matching
//! [`analysis_schema`], so the answer parses straight into
//! [`PolicyAnalysis`]. A plain-text answer is still accepted when it happens
//! to be the JSON document itself.

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;

use crate::net::types::{ComplianceStatus, LlmInvokeRequest, LlmOutput, Policy, PolicyAnalysis};

const ANALYSIS_SYSTEM: &str = "You are an employment law specialist for the Republic of the Marshall Islands. \
Review workplace policies against the Marshall Islands labor code, including the Wage and Hour Act, \
the Labor Recruitment Act, public holidays, and leave entitlements. Be specific and practical.";

/// JSON schema the review must satisfy.
#[must_use]
pub fn analysis_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "compliance_score": { "type": "integer", "minimum": 0, "maximum": 100 },
            "status": { "type": "string", "enum": ["compliant", "needs_review", "non_compliant"] },
            "summary": { "type": "string" },
            "gaps": { "type": "array", "items": { "type": "string" } },
            "recommendations": { "type": "array", "items": { "type": "string" } }
        },
        "required": ["compliance_score", "status", "summary", "gaps", "recommendations"]
    })
}

#[must_use]
pub fn analysis_request(policy: &Policy) -> LlmInvokeRequest {
    let category = policy.category.as_deref().unwrap_or("General");
    let prompt = format!(
        "Analyze this {category} policy for compliance with Marshall Islands labor law.\n\n\
         Title: {}\n\n{}\n\n\
         Score compliance from 0 to 100, list concrete gaps, and give recommendations.",
        policy.title,
        policy.content.trim()
    );
    LlmInvokeRequest {
        prompt,
        system: Some(ANALYSIS_SYSTEM.to_owned()),
        response_json_schema: Some(analysis_schema()),
    }
}

/// Turn the integration's answer into a [`PolicyAnalysis`].
///
/// # Errors
///
/// Returns an error when the answer is not a document of the expected shape.
pub fn parse_analysis(output: LlmOutput) -> Result<PolicyAnalysis, String> {
    let mut analysis: PolicyAnalysis = match output {
        LlmOutput::Json { value } => serde_json::from_value(value).map_err(|e| e.to_string())?,
        LlmOutput::Text { text } => serde_json::from_str(strip_code_fence(&text)).map_err(|e| e.to_string())?,
    };
    analysis.compliance_score = analysis.compliance_score.min(100);
    Ok(analysis)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body.strip_prefix("json").unwrap_or(body);
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Fields written back to the policy record after a review.
#[must_use]
pub fn analysis_patch(analysis: &PolicyAnalysis) -> serde_json::Value {
    serde_json::json!({
        "compliance_status": analysis.status,
        "compliance_score": analysis.compliance_score,
    })
}

#[must_use]
pub fn status_label(status: Option<ComplianceStatus>) -> &'static str {
    match status {
        Some(ComplianceStatus::Compliant) => "Compliant",
        Some(ComplianceStatus::NeedsReview) => "Needs review",
        Some(ComplianceStatus::NonCompliant) => "Non-compliant",
        None => "Not reviewed",
    }
}

/// Validate the new-policy form and build the create payload.
///
/// # Errors
///
/// Returns a message when the title or content is blank.
pub fn policy_payload(title: &str, category: &str, content: &str) -> Result<serde_json::Value, String> {
    let title = title.trim();
    let content = content.trim();
    if title.is_empty() {
        return Err("Enter a policy title.".to_owned());
    }
    if content.is_empty() {
        return Err("Enter the policy text.".to_owned());
    }
    let category = category.trim();
    Ok(serde_json::json!({
        "title": title,
        "category": (!category.is_empty()).then_some(category),
        "content": content,
    }))
}
