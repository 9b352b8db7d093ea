use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::json;

use lattepad_core::samples;
use lattepad_render::request::{
    Compiler, DEFAULT_DELIMITERS, Delimiters, MissingKeyPolicy, RenderRequest,
};

#[test]
fn template_round_trips_through_base64() {
    let request = RenderRequest::from_sources(samples::SAMPLE_TEX, samples::SAMPLE_JSON).unwrap();
    let decoded = BASE64.decode(&request.template).unwrap();
    assert_eq!(String::from_utf8(decoded).unwrap(), samples::SAMPLE_TEX);
}

#[test]
fn details_carry_the_parsed_value() {
    let request = RenderRequest::from_sources(samples::SAMPLE_TEX, samples::SAMPLE_JSON).unwrap();
    assert_eq!(request.details, json!({"name": "world"}));
}

#[test]
fn malformed_details_fail_request_construction() {
    assert!(RenderRequest::from_sources(samples::SAMPLE_TEX, "{name: world}").is_err());
}

#[test]
fn non_object_details_fail_request_construction() {
    assert!(RenderRequest::from_sources(samples::SAMPLE_TEX, "\"world\"").is_err());
}

#[test]
fn optional_fields_are_absent_when_unset() {
    let request = RenderRequest::from_sources("x", "{}").unwrap();
    let body = serde_json::to_value(&request).unwrap();
    let object = body.as_object().unwrap();

    assert_eq!(object.len(), 2);
    assert!(object.contains_key("template"));
    assert!(object.contains_key("details"));
}

#[test]
fn configured_fields_serialize_with_service_names() {
    let request = RenderRequest::from_sources("x", "{}")
        .unwrap()
        .with_resource("logo.png", b"\x89PNG")
        .with_delimiters("<<", ">>")
        .with_missing_key_policy(MissingKeyPolicy::Zero)
        .with_compiler(Compiler::Latexmk)
        .with_count(2);
    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(body["onMissingKey"], "zero");
    assert_eq!(body["compiler"], "latexmk");
    assert_eq!(body["count"], 2);
    assert_eq!(body["delimiters"]["left"], "<<");
    assert_eq!(body["delimiters"]["right"], ">>");
    assert_eq!(body["resources"]["logo.png"], BASE64.encode(b"\x89PNG"));
}

#[test]
fn default_delimiters_match_the_service() {
    assert_eq!(DEFAULT_DELIMITERS, ("#!", "!#"));

    let delimiters = Delimiters::default();
    assert_eq!(
        (delimiters.left.as_str(), delimiters.right.as_str()),
        DEFAULT_DELIMITERS
    );
}
