//! Word lists used by the rule engine.
//!
//! All lookups take lowercase, punctuation-free tokens.

/// Expansions for an abbreviated token, most common first.
pub fn expansions(token: &str) -> Option<&'static [&'static str]> {
    let expanded: &'static [&'static str] = match token {
        // thoroughfare types
        "st" | "str" => &["street", "saint"],
        "ave" | "av" | "avn" => &["avenue"],
        "rd" => &["road"],
        "blvd" | "bvd" => &["boulevard"],
        "dr" => &["drive", "doctor"],
        "ln" => &["lane"],
        "ct" => &["court"],
        "pl" => &["place"],
        "sq" => &["square"],
        "hwy" => &["highway"],
        "pkwy" | "pky" => &["parkway"],
        "cir" => &["circle"],
        "ter" | "terr" => &["terrace"],
        "trl" => &["trail"],
        "aly" => &["alley"],
        "cres" => &["crescent"],
        "expy" => &["expressway"],
        "fwy" => &["freeway"],
        "mt" => &["mount", "mountain"],
        "ft" => &["fort"],
        "pt" => &["point"],
        // directionals
        "n" => &["north"],
        "s" => &["south"],
        "e" => &["east"],
        "w" => &["west"],
        "ne" => &["northeast"],
        "nw" => &["northwest"],
        "se" => &["southeast"],
        "sw" => &["southwest"],
        // sub-building designators
        "apt" => &["apartment"],
        "ste" => &["suite"],
        "fl" | "flr" => &["floor"],
        "bldg" => &["building"],
        "rm" => &["room"],
        // places
        "usa" => &["united states"],
        "uk" => &["united kingdom"],
        _ => return None,
    };
    Some(expanded)
}

/// Words that end a road name ("Main St", "Infinite Loop").
pub fn is_street_suffix(token: &str) -> bool {
    matches!(
        token,
        "street"
            | "st"
            | "str"
            | "avenue"
            | "ave"
            | "av"
            | "road"
            | "rd"
            | "boulevard"
            | "blvd"
            | "drive"
            | "dr"
            | "lane"
            | "ln"
            | "way"
            | "court"
            | "ct"
            | "place"
            | "pl"
            | "square"
            | "sq"
            | "highway"
            | "hwy"
            | "parkway"
            | "pkwy"
            | "circle"
            | "cir"
            | "terrace"
            | "ter"
            | "trail"
            | "trl"
            | "loop"
            | "alley"
            | "aly"
            | "crescent"
            | "cres"
            | "close"
            | "row"
            | "expressway"
            | "freeway"
    )
}

/// Designators introducing an apartment or suite ("apt 4b").
pub fn is_unit_designator(token: &str) -> bool {
    matches!(
        token,
        "apt" | "apartment" | "unit" | "suite" | "ste" | "room" | "rm" | "#"
    )
}

/// Designators introducing a floor ("fl 3").
pub fn is_level_designator(token: &str) -> bool {
    matches!(token, "fl" | "flr" | "floor" | "level")
}

const US_STATES: &[(&str, &str)] = &[
    ("al", "alabama"),
    ("ak", "alaska"),
    ("az", "arizona"),
    ("ar", "arkansas"),
    ("ca", "california"),
    ("co", "colorado"),
    ("ct", "connecticut"),
    ("de", "delaware"),
    ("dc", "district of columbia"),
    ("fl", "florida"),
    ("ga", "georgia"),
    ("hi", "hawaii"),
    ("id", "idaho"),
    ("il", "illinois"),
    ("in", "indiana"),
    ("ia", "iowa"),
    ("ks", "kansas"),
    ("ky", "kentucky"),
    ("la", "louisiana"),
    ("me", "maine"),
    ("md", "maryland"),
    ("ma", "massachusetts"),
    ("mi", "michigan"),
    ("mn", "minnesota"),
    ("ms", "mississippi"),
    ("mo", "missouri"),
    ("mt", "montana"),
    ("ne", "nebraska"),
    ("nv", "nevada"),
    ("nh", "new hampshire"),
    ("nj", "new jersey"),
    ("nm", "new mexico"),
    ("ny", "new york"),
    ("nc", "north carolina"),
    ("nd", "north dakota"),
    ("oh", "ohio"),
    ("ok", "oklahoma"),
    ("or", "oregon"),
    ("pa", "pennsylvania"),
    ("ri", "rhode island"),
    ("sc", "south carolina"),
    ("sd", "south dakota"),
    ("tn", "tennessee"),
    ("tx", "texas"),
    ("ut", "utah"),
    ("vt", "vermont"),
    ("va", "virginia"),
    ("wa", "washington"),
    ("wv", "west virginia"),
    ("wi", "wisconsin"),
    ("wy", "wyoming"),
];

/// US state abbreviation or full name.
pub fn is_state(text: &str) -> bool {
    US_STATES
        .iter()
        .any(|(abbr, name)| *abbr == text || *name == text)
}

/// Country names and common short forms.
pub fn is_country(text: &str) -> bool {
    matches!(
        text,
        "usa"
            | "us"
            | "united states"
            | "united states of america"
            | "america"
            | "canada"
            | "mexico"
            | "uk"
            | "united kingdom"
            | "great britain"
            | "england"
            | "scotland"
            | "wales"
            | "ireland"
            | "france"
            | "germany"
            | "deutschland"
            | "spain"
            | "italy"
            | "netherlands"
            | "australia"
            | "new zealand"
            | "brazil"
            | "japan"
            | "india"
    )
}
