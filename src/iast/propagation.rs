use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use thiserror::Error;

/// Final value every run of the chain must reduce to
pub const EXPECTED_RESULT: &str = "DDD_III_extend";

static SEPARATED_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[_.][a-zA-Z]*").expect("valid regex"));
static LEADING_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+").expect("valid regex"));
static UNDERSCORED_PAIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)(_+)(\w+)").expect("valid regex"));
static SPACED_EEE: Lazy<Regex> = Lazy::new(|| Regex::new(r" EEE").expect("valid regex"));
static TRIPLE_O: Lazy<Regex> = Lazy::new(|| Regex::new(r"OOO").expect("valid regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropagationError {
    #[error("propagation step '{step}' found nothing to work on in {input:?}")]
    NoMatch { step: &'static str, input: String },

    #[error("propagation produced {got:?}, expected \"DDD_III_extend\"")]
    Unexpected { got: String },
}

/// The tainted strings the sinks are fed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tainted {
    /// `notainted_<INPUT>_notainted`, reaches the command and SSRF sinks
    pub command_arg: String,
    /// Same text after a split/rsplit round trip, reaches the file sink
    pub file_stem: String,
}

/// String phase: join, repeat, truncate and re-case both query parameters.
/// Infallible.
pub fn taint(string1: &str, password: &str) -> Tainted {
    let joined = format!("{string1}{password}");
    let repeated = [joined.as_str(); 3].join("-");
    let prefix: String = repeated.chars().take(20).collect();
    let shouted = title_case(&prefix).to_uppercase();
    let suffixed = format!("{shouted}_notainted");
    let command_arg = format!("notainted_{suffixed}");

    let multiline = format!("nottainted\n{command_arg}");
    let second_line = multiline.lines().nth(1).unwrap_or_default();
    let extended = format!("{second_line}_notainted");
    let file_stem = match extended.rsplit_once('_') {
        Some((head, _)) => head.to_string(),
        None => extended.clone(),
    };

    Tainted {
        command_arg,
        file_stem,
    }
}

/// Path and regex phase over the file stem. Breaks with [`PropagationError::NoMatch`]
/// when the input leaves a step nothing to match.
pub fn reduce(file_stem: &str) -> Result<String, PropagationError> {
    let through_paths = path_round_trip(file_stem)?;

    let separated = SEPARATED_WORD
        .find(&through_paths)
        .ok_or_else(|| no_match("separated word", &through_paths))?
        .as_str();
    let leading = LEADING_WORD
        .find(separated)
        .ok_or_else(|| no_match("leading word", separated))?
        .as_str();
    let prefixed = format!("DDDD{leading}");

    let captures = UNDERSCORED_PAIR
        .captures(&prefixed)
        .ok_or_else(|| no_match("underscored pair", &prefixed))?;
    let mut expanded = String::new();
    captures.expand("DDD_${3}", &mut expanded);

    let head = SEPARATED_WORD.split(&expanded).next().unwrap_or_default();
    let spaced = format!("{head} EEE");
    let substituted = SPACED_EEE.replace_all(&spaced, "_OOO");
    let mut result = TRIPLE_O.replace_all(&substituted, "III").into_owned();
    result.push_str("_extend");

    if result != EXPECTED_RESULT {
        return Err(PropagationError::Unexpected { got: result });
    }

    Ok(result)
}

/// Both phases back to back
pub fn propagate(string1: &str, password: &str) -> Result<String, PropagationError> {
    reduce(&taint(string1, password).file_stem)
}

/// join → parent → dirname → basename → strip extension
fn path_round_trip(value: &str) -> Result<String, PropagationError> {
    let joined = Path::new(value).join("a");
    let parent = joined.parent().unwrap_or(Path::new(""));

    let with_leaf = format!("{}/foobar", parent.display());
    let dir = Path::new(&with_leaf).parent().unwrap_or(Path::new(""));

    let rooted = format!("/foobar/{}", dir.display());
    let base = Path::new(&rooted)
        .file_name()
        .ok_or_else(|| no_match("basename", &rooted))?
        .to_string_lossy()
        .into_owned();

    let with_ext = format!("{base}.jpg");
    let stem = Path::new(&with_ext)
        .file_stem()
        .ok_or_else(|| no_match("stem", &with_ext))?
        .to_string_lossy()
        .into_owned();

    Ok(stem)
}

/// Upper-case the first letter of every run of letters, lower-case the rest
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

fn no_match(step: &'static str, input: &str) -> PropagationError {
    PropagationError::NoMatch {
        step,
        input: input.to_string(),
    }
}
