//! Dictionary-driven address engine.
//!
//! A small deterministic stand-in for a statistical parser. It understands
//! the common North American and UK layouts well enough to serve traffic and
//! tests without a native library:
//!
//! ```text
//! "123 Main St Apt 4, New York, NY 10001"
//!   house_number=123  road="main st"  unit="apt 4"
//!   city="new york"   state=ny        postcode=10001
//! ```
//!
//! Values are lowercased with punctuation removed, matching the shape of
//! libpostal output.

use crate::engine::dictionary;
use crate::engine::{AddressEngine, EngineError, ParsedComponent};

/// Upper bound on variants produced for one address.
pub const DEFAULT_MAX_EXPANSIONS: usize = 64;

/// Rule-based parser and expander.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    max_expansions: usize,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self {
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }

    /// Cap the number of expansion variants (at least one).
    pub fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = max.max(1);
        self
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressEngine for RuleEngine {
    fn name(&self) -> &'static str {
        "rules"
    }

    fn parse(&self, text: &str) -> Result<Vec<ParsedComponent>, EngineError> {
        let segments: Vec<Vec<String>> = text
            .split(',')
            .map(|segment| {
                segment
                    .split_whitespace()
                    .map(normalize_token)
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|segment| !segment.is_empty())
            .collect();

        let mut labeler = Labeler::default();
        for (index, segment) in segments.iter().enumerate() {
            labeler.segment(index, segment);
        }
        Ok(labeler.components)
    }

    fn expand(&self, text: &str) -> Result<Vec<String>, EngineError> {
        let tokens: Vec<String> = text
            .split(|c: char| c.is_whitespace() || c == ',')
            .map(normalize_token)
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let mut variants = vec![String::new()];
        for token in &tokens {
            let verbatim = [token.as_str()];
            let alternatives: &[&str] = match dictionary::expansions(token) {
                Some(expanded) => expanded,
                None => &verbatim,
            };

            let mut next = Vec::with_capacity(variants.len() * alternatives.len());
            'fill: for prefix in &variants {
                for alternative in alternatives {
                    if next.len() >= self.max_expansions {
                        break 'fill;
                    }
                    next.push(if prefix.is_empty() {
                        (*alternative).to_string()
                    } else {
                        format!("{prefix} {alternative}")
                    });
                }
            }
            variants = next;
        }

        variants.sort();
        variants.dedup();
        Ok(variants)
    }
}

/// Lowercase and strip punctuation, keeping `#`, `-` and `/` inside tokens.
fn normalize_token(raw: &str) -> String {
    let token: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '#' | '-' | '/'))
        .flat_map(char::to_lowercase)
        .collect();
    token.trim_matches(|c| c == '-' || c == '/').to_string()
}

/// What has been labeled so far, plus the output.
#[derive(Default)]
struct Labeler {
    components: Vec<ParsedComponent>,
    road: bool,
    city: bool,
    state: bool,
    country: bool,
}

impl Labeler {
    fn push(&mut self, label: &str, value: String) {
        match label {
            "road" => self.road = true,
            "city" => self.city = true,
            "state" => self.state = true,
            "country" => self.country = true,
            _ => {}
        }
        self.components.push(ParsedComponent::new(label, value));
    }

    fn any(&self) -> bool {
        !self.components.is_empty()
    }

    fn segment(&mut self, index: usize, tokens: &[String]) {
        let joined = tokens.join(" ");
        if self.any() && !self.country && dictionary::is_country(&joined) {
            self.push("country", joined);
            return;
        }

        let mut rest = tokens;

        if let Some(n) = po_box_len(rest) {
            self.push("po_box", rest[..n].join(" "));
            rest = &rest[n..];
        }

        let mut road_here = false;
        if !self.road && rest.len() > 1 && is_house_number(&rest[0]) {
            self.push("house_number", rest[0].clone());
            rest = &rest[1..];
            let n = road_len(rest);
            if n > 0 {
                self.push("road", rest[..n].join(" "));
                road_here = true;
            }
            rest = &rest[n..];
        }

        // "fl" after the road segment is far more likely Florida than a floor.
        let designators_allowed = road_here
            || (self.road && !self.city && rest.first().is_some_and(|t| !dictionary::is_state(t)));
        if designators_allowed {
            while let Some((label, n)) = designator_len(rest) {
                self.push(label, rest[..n].join(" "));
                rest = &rest[n..];
            }
        }

        if rest.is_empty() {
            return;
        }

        let mut body = rest;
        let mut postcode = None;
        if let Some(n) = trailing_postcode_len(body, index) {
            postcode = Some(body[body.len() - n..].join(" "));
            body = &body[..body.len() - n];
        }

        let mut state = None;
        if !self.state && (postcode.is_some() || index > 0) {
            if let Some(n) = trailing_state_len(body) {
                let whole_body = n == body.len();
                if !(whole_body && !self.city && postcode.is_none()) {
                    state = Some(body[body.len() - n..].join(" "));
                    body = &body[..body.len() - n];
                }
            }
        }

        if !body.is_empty() {
            self.locality(index, body);
        }
        if let Some(state) = state {
            self.push("state", state);
        }
        if let Some(postcode) = postcode {
            self.push("postcode", postcode);
        }
    }

    fn locality(&mut self, index: usize, body: &[String]) {
        let text = body.join(" ");
        let label = if index == 0
            && !self.road
            && !self.city
            && body.len() > 1
            && body.last().is_some_and(|t| dictionary::is_street_suffix(t))
        {
            "road"
        } else if !self.city {
            "city"
        } else if !self.state && dictionary::is_state(&text) {
            "state"
        } else if !self.country && dictionary::is_country(&text) {
            "country"
        } else if !self.state {
            "state"
        } else if !self.country {
            "country"
        } else {
            "suburb"
        };
        self.push(label, text);
    }
}

fn is_house_number(token: &str) -> bool {
    token.len() <= 8 && token.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Tokens making up the road: up to the first street suffix, or up to a
/// unit designator, or everything.
fn road_len(tokens: &[String]) -> usize {
    for (i, token) in tokens.iter().enumerate() {
        if designator_len(&tokens[i..]).is_some() {
            return i;
        }
        if i > 0 && dictionary::is_street_suffix(token) {
            return i + 1;
        }
    }
    tokens.len()
}

/// A unit or level designator at the start of `tokens`, with its argument.
fn designator_len(tokens: &[String]) -> Option<(&'static str, usize)> {
    let first = tokens.first()?;
    if first.len() > 1 && first.starts_with('#') {
        return Some(("unit", 1));
    }
    let label = if dictionary::is_unit_designator(first) {
        "unit"
    } else if dictionary::is_level_designator(first) {
        "level"
    } else {
        return None;
    };
    Some((label, tokens.len().min(2)))
}

fn po_box_len(tokens: &[String]) -> Option<usize> {
    let words: Vec<&str> = tokens.iter().map(String::as_str).collect();
    let prefix = match words.as_slice() {
        ["p", "o", "box", ..] => 3,
        ["po", "box", ..] => 2,
        ["pobox", ..] | ["box", ..] => 1,
        _ => return None,
    };
    let has_number = words
        .get(prefix)
        .is_some_and(|t| t.chars().any(|c| c.is_ascii_digit()));
    match (words[0], has_number) {
        // "Box Hill" is a place, "Box 12" is a box
        ("box", false) => None,
        (_, true) => Some(prefix + 1),
        (_, false) => Some(prefix),
    }
}

fn trailing_postcode_len(tokens: &[String], index: usize) -> Option<usize> {
    let n = tokens.len();
    if n >= 2 {
        let (outward, inward) = (&tokens[n - 2], &tokens[n - 1]);
        if is_canadian_postcode(outward, inward) || is_uk_postcode(outward, inward) {
            return Some(2);
        }
    }
    let last = tokens.last()?;
    if is_us_zip(last) || (index > 0 && last.len() == 4 && all_digits(last)) {
        return Some(1);
    }
    None
}

fn trailing_state_len(tokens: &[String]) -> Option<usize> {
    (1..=tokens.len().min(3))
        .rev()
        .find(|&n| dictionary::is_state(&tokens[tokens.len() - n..].join(" ")))
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn is_us_zip(token: &str) -> bool {
    match token.split_once('-') {
        Some((zip, plus4)) => zip.len() == 5 && all_digits(zip) && plus4.len() == 4 && all_digits(plus4),
        None => token.len() == 5 && all_digits(token),
    }
}

/// `k1a 0b1`
fn is_canadian_postcode(outward: &str, inward: &str) -> bool {
    fn alternating(s: &str, letter_first: bool) -> bool {
        let chars: Vec<char> = s.chars().collect();
        chars.len() == 3
            && chars.iter().enumerate().all(|(i, c)| {
                if (i % 2 == 0) == letter_first {
                    c.is_ascii_lowercase()
                } else {
                    c.is_ascii_digit()
                }
            })
    }
    alternating(outward, true) && alternating(inward, false)
}

/// `sw1a 2aa`, `m1 1ae`, `ec1a 1bb`
fn is_uk_postcode(outward: &str, inward: &str) -> bool {
    let inward: Vec<char> = inward.chars().collect();
    if inward.len() != 3
        || !inward[0].is_ascii_digit()
        || !inward[1].is_ascii_lowercase()
        || !inward[2].is_ascii_lowercase()
    {
        return false;
    }

    let outward: Vec<char> = outward.chars().collect();
    if !(2..=4).contains(&outward.len()) || !outward.iter().all(char::is_ascii_alphanumeric) {
        return false;
    }
    let letters = outward.iter().take_while(|c| c.is_ascii_lowercase()).count();
    (1..=2).contains(&letters) && outward.get(letters).is_some_and(char::is_ascii_digit)
}
