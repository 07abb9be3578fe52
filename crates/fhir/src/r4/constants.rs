//! Constants for R4 questionnaire resources.

/// `resourceType` of a questionnaire definition.
pub const QUESTIONNAIRE_RESOURCE_TYPE: &str = "Questionnaire";

/// `resourceType` of a filled-out questionnaire.
pub const QUESTIONNAIRE_RESPONSE_RESOURCE_TYPE: &str = "QuestionnaireResponse";

/// Publication status stamped on generated questionnaires.
pub const QUESTIONNAIRE_STATUS: &str = "unknown";

/// Status stamped on generated questionnaire responses.
pub const QUESTIONNAIRE_RESPONSE_STATUS: &str = "completed";
