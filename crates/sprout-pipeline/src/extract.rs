//! JSON payload extraction from model responses.

use serde_json::Value;
use sprout_core::AcquisitionError;

/// Parse the text between the first `{` and the last `}` of `response`.
///
/// Surrounding prose and code fences are ignored.
pub fn extract_json(response: &str) -> Result<Value, AcquisitionError> {
    match (response.find('{'), response.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(serde_json::from_str(&response[start..=end])?),
        _ => Err(AcquisitionError::NoJsonPayload),
    }
}
