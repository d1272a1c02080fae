// Parsers for free-form model output

pub mod lens_output;

pub use lens_output::{
    decode_lens_array, extract_json_array, parse_lens_output, repair_json, validate_assessments,
    DecodedOutput, EXPECTED_ASSESSMENTS,
};
