//! Response post-processing shared by all generators.

/// Markers at which generated text is cut.
const STOP_MARKERS: [&str; 5] = ["\n", "<|endoftext|>", "</s>", "<|im_end|>", "Human:"];

/// Returned when cleaning leaves nothing.
pub const EMPTY_RESPONSE_FALLBACK: &str = "I'm not sure how to answer that.";

/// Trim raw model output and cut it at the first end-of-text marker.
///
/// Models continuing the transcript with a new `Human:` line are cut there
/// as well.
#[must_use]
pub fn clean_response(raw: &str) -> String {
    let mut response = raw.trim();
    for marker in STOP_MARKERS {
        if let Some(idx) = response.find(marker) {
            response = response[..idx].trim();
        }
    }

    if response.is_empty() {
        EMPTY_RESPONSE_FALLBACK.to_string()
    } else {
        response.to_string()
    }
}
