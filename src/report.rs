//! Human-readable rendering of a classification.

use crate::classifier::Classification;
use crate::consts::INVALID_INPUT_MESSAGE;

/// Render the sentence returned to callers of the detector endpoint and the CLI.
pub fn render(classification: &Classification) -> String {
    match classification {
        Classification::Classified { scores, dominant } => format!(
            "For the given statement, the system response is \
             'anger': {}, 'disgust': {}, 'fear': {}, 'joy': {}, 'sadness': {}. \
             The dominant emotion is {}.",
            format_score(scores.anger),
            format_score(scores.disgust),
            format_score(scores.fear),
            format_score(scores.joy),
            format_score(scores.sadness),
            dominant
        ),
        Classification::Unclassified => INVALID_INPUT_MESSAGE.to_string(),
    }
}

/// Shortest round-trip form, always with a fraction or an exponent:
/// `1.0`, `0.0034`, `5.2e-05`, `1e+16`.
fn format_score(value: f64) -> String {
    let magnitude = value.abs();
    if value != 0.0 && (magnitude < 1e-4 || magnitude >= 1e16) {
        let sci = format!("{:e}", value);
        match sci.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => sci,
        }
    } else {
        let plain = value.to_string();
        if plain.contains('.') {
            plain
        } else {
            format!("{plain}.0")
        }
    }
}
