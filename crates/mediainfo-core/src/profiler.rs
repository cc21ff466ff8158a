//! Encode-profile selection
//!
//! Picks the encoding ladder rung for an enriched request. The chosen rung
//! never exceeds the source resolution; sources below 720p still use the 720p
//! ladder and are scaled up by the encoder.

use serde_json::Value;

use crate::models::{EncodeTier, EnrichedRequest};

const ENCODING_PROFILE_FIELD: &str = "encodingProfile";
const JOB_TEMPLATE_FIELD: &str = "jobTemplate";
const IS_CUSTOM_TEMPLATE_FIELD: &str = "isCustomTemplate";
const FRAME_CAPTURE_FIELD: &str = "frameCapture";

/// Highest tier whose minimum width and height both fit the source.
pub fn select_encode_tier(width: u32, height: u32) -> EncodeTier {
    [EncodeTier::P2160, EncodeTier::P1080]
        .into_iter()
        .find(|tier| {
            let (min_width, min_height) = tier.min_dimensions();
            width >= min_width && height >= min_height
        })
        .unwrap_or(EncodeTier::P720)
}

/// Record the encoding decision on the request and return the selected tier.
///
/// A `jobTemplate` already present on the request is kept and marked custom.
/// Otherwise the template named by the tier's `jobTemplate_<tier>` field is
/// used, if the orchestration supplied one.
pub fn apply_encode_profile(request: &mut EnrichedRequest) -> EncodeTier {
    let (width, height) = (request.source_width, request.source_height);
    let tier = select_encode_tier(width, height);

    request.set_field(ENCODING_PROFILE_FIELD, height);

    let has_custom_template = request
        .field(JOB_TEMPLATE_FIELD)
        .is_some_and(|template| !template.is_null());

    if has_custom_template {
        request.set_field(IS_CUSTOM_TEMPLATE_FIELD, true);
    } else {
        match request.field(tier.template_field()).cloned() {
            Some(template) => request.set_field(JOB_TEMPLATE_FIELD, template),
            None => tracing::warn!(
                tier = %tier,
                field = tier.template_field(),
                "No job template supplied for selected tier"
            ),
        }
        request.set_field(IS_CUSTOM_TEMPLATE_FIELD, false);
    }

    if request.field(FRAME_CAPTURE_FIELD).is_some_and(is_truthy) {
        request.set_field("frameCaptureWidth", width);
        request.set_field("frameCaptureHeight", height);
    }

    tracing::info!(
        width,
        height,
        tier = %tier,
        template = ?request.field(JOB_TEMPLATE_FIELD),
        custom_template = has_custom_template,
        "Selected encode profile"
    );

    tier
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
