//! FHIR R4 (4.0.1) wire support.
//!
//! This module implements the R4 shapes of `Questionnaire` and `QuestionnaireResponse` as far as
//! the SurveyJS conversion needs them, plus the `value[x]` wrappers they share.

pub mod constants;
pub mod data_types;
pub mod questionnaire;
pub mod questionnaire_response;

pub use data_types::{AnswerValue, Attachment, Coding, Quantity};
pub use questionnaire::{AnswerOption, ItemType, Questionnaire, QuestionnaireItem};
pub use questionnaire_response::{QuestionnaireResponse, ResponseItem};
