use crate::models::{
    AdType, PromotionStatus, PropertyFeatures, PropertyImage, PropertyStatus, PropertyType,
    Visibility,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};
use tracing::debug;

const UNKNOWN_PUBLIC_ID: &str = "unknown";

/// Timestamp layouts the backend is known to emit besides RFC 3339.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Resolves the `images` column into a list of images.
///
/// Accepts a JSON-encoded string, an array of URLs or image objects, a single
/// image object, or nothing. A string that is not valid JSON is taken to be a
/// single image URL. Anything else yields no images.
pub fn normalize_images(value: Option<&Value>) -> Vec<PropertyImage> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(text)) if text.is_empty() => Vec::new(),
        Some(Value::String(text)) => match serde_json::from_str::<Value>(text) {
            Ok(parsed) => normalize_images(Some(&parsed)),
            Err(_) => {
                debug!("images column is not JSON, treating it as a single URL");
                vec![PropertyImage::from_url(text.as_str())]
            }
        },
        Some(Value::Array(items)) => items.iter().filter_map(image_from_element).collect(),
        Some(Value::Object(object)) => vec![image_from_object(object)],
        Some(other) => {
            debug!(kind = value_kind(other), "ignoring images column of unexpected type");
            Vec::new()
        }
    }
}

fn image_from_element(element: &Value) -> Option<PropertyImage> {
    match element {
        Value::String(url) => Some(PropertyImage::from_url(url.as_str())),
        Value::Object(object) => Some(image_from_object(object)),
        other => {
            debug!(kind = value_kind(other), "skipping image entry of unexpected type");
            None
        }
    }
}

fn image_from_object(object: &Map<String, Value>) -> PropertyImage {
    let url = non_empty_str(object.get("url")).unwrap_or_default();
    let public_id = non_empty_str(object.get("publicId"))
        .or_else(|| non_empty_str(object.get("public_id")))
        .unwrap_or_else(|| UNKNOWN_PUBLIC_ID.to_string());
    let caption = non_empty_str(object.get("caption"));
    let is_main = object
        .get("isMain")
        .or_else(|| object.get("is_main"))
        .and_then(Value::as_bool);

    PropertyImage {
        url,
        public_id,
        caption,
        is_main,
    }
}

/// Resolves the `features` column into amenity flags.
///
/// A JSON-encoded string is decoded first; malformed JSON, and any value that is
/// not an object, yields no features. Keys are passed through unchecked and each
/// value is coerced with [`truthy`].
pub fn normalize_features(value: Option<&Value>) -> PropertyFeatures {
    match value {
        None | Some(Value::Null) => PropertyFeatures::new(),
        Some(Value::String(text)) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(object)) => features_from_object(&object),
            Ok(other) => {
                debug!(kind = value_kind(&other), "features JSON is not an object");
                PropertyFeatures::new()
            }
            Err(err) => {
                debug!(error = %err, "features column is not valid JSON");
                PropertyFeatures::new()
            }
        },
        Some(Value::Object(object)) => features_from_object(object),
        Some(other) => {
            debug!(kind = value_kind(other), "ignoring features column of unexpected type");
            PropertyFeatures::new()
        }
    }
}

fn features_from_object(object: &Map<String, Value>) -> PropertyFeatures {
    object
        .iter()
        .map(|(key, value)| (key.clone(), truthy(value)))
        .collect()
}

/// Maps a free-form type label onto the fixed set of property types.
pub fn normalize_property_type(input: &str) -> PropertyType {
    PropertyType::parse(input).unwrap_or(PropertyType::Other)
}

pub fn normalize_status(input: Option<&str>) -> PropertyStatus {
    input.and_then(PropertyStatus::parse).unwrap_or_default()
}

pub fn normalize_ad_type(input: Option<&str>) -> AdType {
    input.and_then(AdType::parse).unwrap_or_default()
}

pub fn normalize_promotion_status(input: Option<&str>) -> PromotionStatus {
    input.and_then(PromotionStatus::parse).unwrap_or_default()
}

pub fn normalize_visibility(input: Option<&str>) -> Visibility {
    input.and_then(Visibility::parse).unwrap_or_default()
}

/// Parses a backend timestamp into UTC.
///
/// Offset-less date-times are read as UTC and bare dates as midnight UTC.
/// Returns `None` for empty or unrecognized input.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(input, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, format) {
            return Some(Utc.from_utc_datetime(&parsed));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|midnight| Utc.from_utc_datetime(&midnight));
    }

    debug!(input, "unrecognized timestamp, treating as absent");
    None
}

/// Truthiness of a loosely typed value.
///
/// Null, `false`, zero, NaN and the empty string are false, as are the strings
/// `"false"` and `"0"` in any case. Everything else is true.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => {
            let s = s.trim();
            !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false"))
        }
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
