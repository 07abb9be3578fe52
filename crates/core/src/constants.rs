//! Constants used throughout the conversion core.

/// Latest supported FHIR release.
pub const LATEST_FHIR: fhir::FhirVersion = fhir::LATEST_FHIR;

/// `maxSize` given to `file` elements rebuilt from FHIR `attachment` items.
///
/// SurveyJS requires the field but FHIR has nowhere to store it, so the value is lost on the
/// way to FHIR. `0` means "no limit" to SurveyJS.
pub const DEFAULT_FILE_MAX_SIZE: u64 = 0;
