//! Settings <-> URL query string codec.
//!
//! Settings travel as an ordered list of key/value pairs. Fields equal to
//! their default are omitted, boolean flags are encoded by key presence alone
//! and the excluded character list is percent-encoded inside its pair value.
//! The key names are part of every shared link and must not change.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use tracing::{debug, warn};
use url::form_urlencoded;

use super::Settings;

/// Ordered key/value pairs equivalent to a URL query string.
pub type QueryPairs = Vec<(String, String)>;

/// Bytes left untouched when percent-encoding the excluded character list.
/// Matches the unreserved set browsers use for URI components.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Query key for each setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryKeys {
    pub length: &'static str,
    pub exclude_lowercase: &'static str,
    pub exclude_uppercase: &'static str,
    pub exclude_numbers: &'static str,
    pub exclude_symbols: &'static str,
    pub rule_no_leading_special: &'static str,
    pub excluded_chars: &'static str,
}

impl QueryKeys {
    pub const STANDARD: QueryKeys = QueryKeys {
        length: "len",
        exclude_lowercase: "exLower",
        exclude_uppercase: "exUpper",
        exclude_numbers: "exNum",
        exclude_symbols: "exSym",
        rule_no_leading_special: "ruleNoLead",
        excluded_chars: "exc",
    };
}

/// A field that could not be decoded. The field keeps its default value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeDiagnostic {
    #[error("ignoring `{key}={value}`: length must be a whole number from 1 to 128")]
    InvalidLength { key: &'static str, value: String },
    #[error("ignoring `{key}={value}`: {reason}")]
    MalformedExcludedChars {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Result of [`decode`]: always a usable [`Settings`], plus whatever went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub settings: Settings,
    pub diagnostics: Vec<DecodeDiagnostic>,
}

impl Decoded {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Key table plus the defaults that omitted keys fall back to.
#[derive(Debug, Clone)]
pub struct SettingsCodec {
    keys: QueryKeys,
    defaults: Settings,
}

impl SettingsCodec {
    pub const STANDARD: SettingsCodec = SettingsCodec::new(QueryKeys::STANDARD, Settings::DEFAULT);

    pub const fn new(keys: QueryKeys, defaults: Settings) -> Self {
        Self { keys, defaults }
    }

    pub fn keys(&self) -> &QueryKeys {
        &self.keys
    }

    pub fn defaults(&self) -> &Settings {
        &self.defaults
    }

    /// Build settings from query pairs. Never fails; bad fields fall back to
    /// their default and are reported in [`Decoded::diagnostics`].
    pub fn decode<K, V>(&self, pairs: &[(K, V)]) -> Decoded
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let keys = &self.keys;
        let mut settings = self.defaults.clone();
        let mut diagnostics = Vec::new();

        if let Some(raw) = first_value(pairs, keys.length).filter(|v| !v.is_empty()) {
            match raw.trim().parse::<usize>() {
                Ok(length) if Settings::length_in_range(length) => settings.length = length,
                _ => diagnostics.push(DecodeDiagnostic::InvalidLength {
                    key: keys.length,
                    value: raw.to_string(),
                }),
            }
        }

        // Presence alone means true; there is no way to spell false.
        settings.exclude_lowercase = has_key(pairs, keys.exclude_lowercase);
        settings.exclude_uppercase = has_key(pairs, keys.exclude_uppercase);
        settings.exclude_numbers = has_key(pairs, keys.exclude_numbers);
        settings.exclude_symbols = has_key(pairs, keys.exclude_symbols);
        settings.rule_no_leading_special = has_key(pairs, keys.rule_no_leading_special);

        if let Some(raw) = first_value(pairs, keys.excluded_chars).filter(|v| !v.is_empty()) {
            match decode_component(raw) {
                Ok(chars) => settings.excluded_chars = chars,
                Err(reason) => diagnostics.push(DecodeDiagnostic::MalformedExcludedChars {
                    key: keys.excluded_chars,
                    value: raw.to_string(),
                    reason,
                }),
            }
        }

        for diagnostic in &diagnostics {
            warn!(%diagnostic, "query field fell back to default");
        }
        debug!(?settings, "decoded settings");

        Decoded {
            settings,
            diagnostics,
        }
    }

    /// Encode settings as query pairs, omitting every field left at its default.
    pub fn encode(&self, settings: &Settings) -> QueryPairs {
        let keys = &self.keys;
        let mut pairs = QueryPairs::new();

        if settings.length != self.defaults.length {
            pairs.push((keys.length.to_string(), settings.length.to_string()));
        }

        let flags = [
            (settings.exclude_lowercase, keys.exclude_lowercase),
            (settings.exclude_numbers, keys.exclude_numbers),
            (settings.exclude_uppercase, keys.exclude_uppercase),
            (settings.exclude_symbols, keys.exclude_symbols),
            (settings.rule_no_leading_special, keys.rule_no_leading_special),
        ];
        for (_, key) in flags.into_iter().filter(|(set, _)| *set) {
            pairs.push((key.to_string(), String::new()));
        }

        if !settings.excluded_chars.is_empty() {
            pairs.push((
                keys.excluded_chars.to_string(),
                utf8_percent_encode(&settings.excluded_chars, COMPONENT).to_string(),
            ));
        }

        debug!(?pairs, "encoded settings");
        pairs
    }
}

impl Default for SettingsCodec {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Decode with the standard key table and defaults.
pub fn decode<K, V>(pairs: &[(K, V)]) -> Decoded
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    SettingsCodec::STANDARD.decode(pairs)
}

/// Encode with the standard key table and defaults.
pub fn encode(settings: &Settings) -> QueryPairs {
    SettingsCodec::STANDARD.encode(settings)
}

/// Split a raw query string into pairs. Accepts a bare query, a query with a
/// leading `?`, or a full URL (anything before `?` and after `#` is dropped).
pub fn parse_query_string(input: &str) -> QueryPairs {
    let query = input.split_once('?').map_or(input, |(_, query)| query);
    let query = query.split_once('#').map_or(query, |(query, _)| query);
    form_urlencoded::parse(query.as_bytes()).into_owned().collect()
}

/// Join pairs into a form-encoded query string without a leading `?`.
pub fn to_query_string<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
        .finish()
}

fn first_value<'a, K, V>(pairs: &'a [(K, V)], key: &str) -> Option<&'a str>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .iter()
        .find(|(k, _)| k.as_ref() == key)
        .map(|(_, v)| v.as_ref())
}

fn has_key<K, V>(pairs: &[(K, V)], key: &str) -> bool
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs.iter().any(|(k, _)| k.as_ref() == key)
}

/// Strict percent-decoding: every `%` must start a valid escape and the
/// result must be UTF-8.
fn decode_component(raw: &str) -> Result<String, &'static str> {
    let bytes = raw.as_bytes();
    let well_formed = raw.match_indices('%').all(|(i, _)| {
        bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    });
    if !well_formed {
        return Err("`%` must be followed by two hex digits");
    }

    percent_decode_str(raw)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| "decoded bytes are not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Decode under a warn-level subscriber and return what it logged.
    fn logged_at_warn(query: &str) -> String {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || decode_str(query));
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn decode_str(query: &str) -> Decoded {
        decode(&parse_query_string(query))
    }

    fn round_trip(settings: &Settings) -> Settings {
        let query = to_query_string(&encode(settings));
        let decoded = decode_str(&query);
        assert!(decoded.is_clean(), "{query}: {:?}", decoded.diagnostics);
        decoded.settings
    }

    #[test]
    fn empty_query_yields_defaults() {
        let decoded = decode_str("");
        assert_eq!(decoded.settings, Settings::DEFAULT);
        assert!(decoded.is_clean());
    }

    #[test]
    fn parses_length() {
        assert_eq!(decode_str("len=24").settings.length, 24);
        assert_eq!(decode_str("len=1").settings.length, 1);
        assert_eq!(decode_str("len=128").settings.length, 128);
    }

    #[test]
    fn bad_length_keeps_default_with_diagnostic() {
        for raw in ["0", "129", "-4", "abc", "12.5", "24abc"] {
            let decoded = decode_str(&format!("len={raw}"));
            assert_eq!(decoded.settings.length, 20, "len={raw}");
            assert_eq!(
                decoded.diagnostics,
                vec![DecodeDiagnostic::InvalidLength {
                    key: "len",
                    value: raw.to_string(),
                }]
            );
        }
    }

    #[test]
    fn diagnostics_are_logged_as_warnings() {
        let logged = logged_at_warn("len=abc&exc=%25zz");
        assert!(logged.contains("WARN"), "{logged}");
        assert!(logged.contains("len=abc"), "{logged}");
        assert!(logged.contains("exc=%zz"), "{logged}");

        assert_eq!(logged_at_warn("len=24&exSym"), "");
    }

    #[test]
    fn empty_length_is_treated_as_absent() {
        let decoded = decode_str("len=");
        assert_eq!(decoded.settings.length, 20);
        assert!(decoded.is_clean());
    }

    #[test]
    fn flag_presence_means_true_regardless_of_value() {
        let settings = decode_str("exLower&exNum=false&exSym=0").settings;
        assert!(settings.exclude_lowercase);
        assert!(settings.exclude_numbers);
        assert!(settings.exclude_symbols);
        assert!(!settings.exclude_uppercase);
        assert!(!settings.rule_no_leading_special);
    }

    #[test]
    fn flags_ignore_true_defaults() {
        let defaults = Settings {
            exclude_symbols: true,
            ..Settings::DEFAULT
        };
        let codec = SettingsCodec::new(QueryKeys::STANDARD, defaults);
        let decoded = codec.decode(&parse_query_string("len=10"));
        assert!(!decoded.settings.exclude_symbols);
    }

    #[test]
    fn decodes_excluded_chars() {
        assert_eq!(decode_str("exc=abc123").settings.excluded_chars, "abc123");
        assert_eq!(decode_str("exc=%40%23%24").settings.excluded_chars, "@#$");
        assert_eq!(decode_str("exc=%2540%2523").settings.excluded_chars, "@#");
    }

    #[test]
    fn malformed_excluded_chars_keeps_default() {
        let decoded = decode_str("len=12&exc=%25zz");
        assert_eq!(decoded.settings.excluded_chars, "");
        assert_eq!(decoded.settings.length, 12);
        assert!(matches!(
            decoded.diagnostics.as_slice(),
            [DecodeDiagnostic::MalformedExcludedChars { key: "exc", .. }]
        ));

        let decoded = decode_str("exc=%25ff");
        assert_eq!(decoded.settings.excluded_chars, "");
        assert_eq!(decoded.diagnostics.len(), 1);
    }

    #[test]
    fn combined_parameters() {
        let query = "http://localhost:8080/?len=18&exUpper&exSym&ruleNoLead&exc=xyz789";
        let settings = decode_str(query).settings;
        assert_eq!(settings.length, 18);
        assert!(settings.exclude_uppercase);
        assert!(settings.exclude_symbols);
        assert!(!settings.exclude_lowercase);
        assert!(!settings.exclude_numbers);
        assert!(settings.rule_no_leading_special);
        assert_eq!(settings.excluded_chars, "xyz789");
    }

    #[test]
    fn first_duplicate_wins() {
        let settings = decode_str("len=30&len=40&exc=a&exc=b").settings;
        assert_eq!(settings.length, 30);
        assert_eq!(settings.excluded_chars, "a");
    }

    #[test]
    fn unknown_keys_and_fragments_are_ignored() {
        let decoded = decode_str("?theme=dark&len=16#top");
        assert_eq!(decoded.settings.length, 16);
        assert!(decoded.is_clean());
    }

    #[test]
    fn defaults_encode_to_nothing() {
        assert!(encode(&Settings::DEFAULT).is_empty());
        assert_eq!(to_query_string(&encode(&Settings::DEFAULT)), "");
    }

    #[test]
    fn encodes_in_stable_order() {
        let settings = Settings {
            length: 18,
            exclude_uppercase: true,
            exclude_symbols: true,
            rule_no_leading_special: true,
            excluded_chars: "xyz789".into(),
            ..Settings::DEFAULT
        };
        assert_eq!(
            to_query_string(&encode(&settings)),
            "len=18&exUpper=&exSym=&ruleNoLead=&exc=xyz789"
        );

        let all = Settings {
            exclude_lowercase: true,
            exclude_uppercase: true,
            exclude_numbers: true,
            exclude_symbols: true,
            rule_no_leading_special: true,
            ..Settings::DEFAULT
        };
        let keys: Vec<String> = encode(&all).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["exLower", "exNum", "exUpper", "exSym", "ruleNoLead"]);
    }

    #[test]
    fn excluded_chars_are_encoded_twice_on_the_wire() {
        let settings = Settings {
            excluded_chars: "@ +".into(),
            ..Settings::DEFAULT
        };
        let pairs = encode(&settings);
        assert_eq!(pairs, vec![("exc".to_string(), "%40%20%2B".to_string())]);
        assert_eq!(to_query_string(&pairs), "exc=%2540%2520%252B");
    }

    #[test]
    fn round_trips_boundary_settings() {
        let cases = [
            Settings::DEFAULT,
            Settings {
                length: 1,
                ..Settings::DEFAULT
            },
            Settings {
                length: 128,
                ..Settings::DEFAULT
            },
            Settings {
                length: 7,
                exclude_lowercase: true,
                exclude_uppercase: true,
                exclude_numbers: true,
                exclude_symbols: true,
                rule_no_leading_special: true,
                excluded_chars: String::new(),
            },
            Settings {
                excluded_chars: "!@#$%^&*()_+~`|}{[]:;?><,./-=\\ é".into(),
                ..Settings::DEFAULT
            },
            Settings {
                excluded_chars: "%25".into(),
                ..Settings::DEFAULT
            },
        ];
        for settings in cases {
            assert_eq!(round_trip(&settings), settings);
        }
    }
}
