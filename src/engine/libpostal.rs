//! libpostal-backed engine.
//!
//! Links against the system `libpostal` C library. Only the handful of entry
//! points the gateway needs are declared here; struct layouts follow
//! `libpostal.h` (v1.1).
//!
//! # Threading
//! - `libpostal_setup*` runs exactly once per process (guarded by `OnceLock`)
//! - after setup, parsing and expansion are safe to call concurrently
//! - teardown is left to process exit

use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::sync::OnceLock;

use crate::engine::{AddressEngine, EngineError, ParsedComponent};

#[repr(C)]
#[derive(Clone, Copy)]
struct NormalizeOptions {
    languages: *mut *mut c_char,
    num_languages: usize,
    address_components: u16,
    latin_ascii: bool,
    transliterate: bool,
    strip_accents: bool,
    decompose: bool,
    lowercase: bool,
    trim_string: bool,
    drop_parentheticals: bool,
    replace_numeric_hyphens: bool,
    delete_numeric_hyphens: bool,
    split_alpha_from_numeric: bool,
    replace_word_hyphens: bool,
    delete_word_hyphens: bool,
    delete_final_periods: bool,
    delete_acronym_periods: bool,
    drop_english_possessives: bool,
    delete_apostrophes: bool,
    expand_numex: bool,
    roman_numerals: bool,
}

#[repr(C)]
#[derive(Clone, Copy)]
struct ParserOptions {
    language: *mut c_char,
    country: *mut c_char,
}

#[repr(C)]
struct ParserResponse {
    num_components: usize,
    components: *mut *mut c_char,
    labels: *mut *mut c_char,
}

#[link(name = "postal")]
extern "C" {
    fn libpostal_setup() -> bool;
    fn libpostal_setup_datadir(datadir: *mut c_char) -> bool;
    fn libpostal_setup_parser() -> bool;
    fn libpostal_setup_parser_datadir(datadir: *mut c_char) -> bool;
    fn libpostal_setup_language_classifier() -> bool;
    fn libpostal_setup_language_classifier_datadir(datadir: *mut c_char) -> bool;

    fn libpostal_get_default_options() -> NormalizeOptions;
    fn libpostal_expand_address(
        input: *mut c_char,
        options: NormalizeOptions,
        n: *mut usize,
    ) -> *mut *mut c_char;
    fn libpostal_expansion_array_destroy(expansions: *mut *mut c_char, n: usize);

    fn libpostal_get_address_parser_default_options() -> ParserOptions;
    fn libpostal_parse_address(address: *mut c_char, options: ParserOptions)
        -> *mut ParserResponse;
    fn libpostal_address_parser_response_destroy(response: *mut ParserResponse);
}

static SETUP: OnceLock<Result<(), String>> = OnceLock::new();

fn setup_once(data_dir: Option<&Path>) -> Result<(), EngineError> {
    SETUP
        .get_or_init(|| {
            let ok = match data_dir {
                Some(dir) => {
                    let dir = CString::new(dir.to_string_lossy().as_bytes())
                        .map_err(|_| format!("data directory {} contains NUL", dir.display()))?;
                    let ptr = dir.as_ptr() as *mut c_char;
                    // SAFETY: `dir` outlives the calls; libpostal copies the path.
                    unsafe {
                        libpostal_setup_datadir(ptr)
                            && libpostal_setup_parser_datadir(ptr)
                            && libpostal_setup_language_classifier_datadir(ptr)
                    }
                }
                // SAFETY: plain setup calls with no arguments.
                None => unsafe {
                    libpostal_setup()
                        && libpostal_setup_parser()
                        && libpostal_setup_language_classifier()
                },
            };
            if ok {
                Ok(())
            } else {
                Err("libpostal setup failed; are the data files installed?".to_string())
            }
        })
        .clone()
        .map_err(EngineError::Initialization)
}

/// Engine calling into libpostal.
#[derive(Debug)]
pub struct LibpostalEngine {
    _private: (),
}

impl LibpostalEngine {
    /// Initialize libpostal (once per process) and return an engine handle.
    pub fn setup(data_dir: Option<&Path>) -> Result<Self, EngineError> {
        setup_once(data_dir)?;
        tracing::info!(data_dir = ?data_dir, "libpostal initialized");
        Ok(Self { _private: () })
    }
}

/// Copy a C string, failing on invalid UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
unsafe fn owned_string(ptr: *const c_char) -> Result<String, EngineError> {
    if ptr.is_null() {
        return Ok(String::new());
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(str::to_owned)
        .map_err(|_| EngineError::InvalidUtf8)
}

impl AddressEngine for LibpostalEngine {
    fn name(&self) -> &'static str {
        "libpostal"
    }

    fn parse(&self, text: &str) -> Result<Vec<ParsedComponent>, EngineError> {
        let input = CString::new(text).map_err(|_| EngineError::InvalidInput)?;

        // SAFETY: setup ran in `LibpostalEngine::setup`; `input` lives until
        // the response is destroyed; the response arrays hold
        // `num_components` entries each.
        unsafe {
            let options = libpostal_get_address_parser_default_options();
            let response = libpostal_parse_address(input.as_ptr() as *mut c_char, options);
            if response.is_null() {
                return Err(EngineError::NoResult { operation: "parse" });
            }

            let count = (*response).num_components;
            let mut components = Vec::with_capacity(count);
            let mut result = Ok(());
            for i in 0..count {
                let label = owned_string(*(*response).labels.add(i));
                let value = owned_string(*(*response).components.add(i));
                match (label, value) {
                    (Ok(label), Ok(value)) => components.push(ParsedComponent { label, value }),
                    (Err(e), _) | (_, Err(e)) => {
                        result = Err(e);
                        break;
                    }
                }
            }

            libpostal_address_parser_response_destroy(response);
            result.map(|()| components)
        }
    }

    fn expand(&self, text: &str) -> Result<Vec<String>, EngineError> {
        let input = CString::new(text).map_err(|_| EngineError::InvalidInput)?;

        // SAFETY: as in `parse`; the expansion array holds `n` strings and is
        // released with the matching destroy call.
        unsafe {
            let options = libpostal_get_default_options();
            let mut n: usize = 0;
            let expansions =
                libpostal_expand_address(input.as_ptr() as *mut c_char, options, &mut n);
            if expansions.is_null() {
                return if n == 0 {
                    Ok(Vec::new())
                } else {
                    Err(EngineError::NoResult { operation: "expand" })
                };
            }

            let collected: Result<Vec<String>, EngineError> =
                (0..n).map(|i| owned_string(*expansions.add(i))).collect();

            libpostal_expansion_array_destroy(expansions, n);
            collected
        }
    }
}
