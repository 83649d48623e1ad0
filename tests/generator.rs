use rand::SeedableRng;
use rand::rngs::StdRng;
use sharepass::pass::charset::{self, CharClass};
use sharepass::{GenerateError, Settings, generate, generate_with};

fn active_classes(settings: &Settings) -> Vec<CharClass> {
    charset::build(settings).into_iter().map(|p| p.class).collect()
}

/// A spread of valid configurations, including ones that filter classes away.
fn configurations() -> Vec<Settings> {
    let mut out = Vec::new();
    for mask in 0u8..16 {
        for excluded in ["", "abc123", "ABCDEFGHIJKLMNOPQRSTUVWXYZ", "!@#$%^&*()"] {
            for rule in [false, true] {
                out.push(Settings {
                    length: 8 + usize::from(mask),
                    exclude_lowercase: mask & 1 != 0,
                    exclude_uppercase: mask & 2 != 0,
                    exclude_numbers: mask & 4 != 0,
                    exclude_symbols: mask & 8 != 0,
                    excluded_chars: excluded.to_string(),
                    rule_no_leading_special: rule,
                });
            }
        }
    }
    out
}

#[test]
fn successful_runs_honor_every_constraint() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut successes = 0;

    for settings in configurations() {
        let classes = active_classes(&settings);
        for _ in 0..20 {
            let password = match generate_with(&settings, &mut rng) {
                Ok(password) => password,
                Err(GenerateError::NoCharactersAvailable) => {
                    assert!(classes.is_empty());
                    break;
                }
                Err(GenerateError::CannotSatisfyLeadingRule) => {
                    assert!(settings.rule_no_leading_special);
                    assert!(!classes.iter().any(|c| c.is_letter()));
                    break;
                }
                Err(e) => panic!("unexpected {e:?} for {settings:?}"),
            };
            successes += 1;

            assert_eq!(password.chars().count(), settings.length);
            assert!(
                !password.chars().any(|c| settings.excluded_chars.contains(c)),
                "{password} uses an excluded char ({settings:?})"
            );
            for class in &classes {
                assert!(
                    password.chars().any(|c| CharClass::of(c) == Some(*class)),
                    "{password} is missing {class:?} ({settings:?})"
                );
            }
            for c in password.chars() {
                assert!(classes.contains(&CharClass::of(c).unwrap()), "{c} not active");
            }
            if settings.rule_no_leading_special {
                assert!(password.starts_with(|c: char| c.is_ascii_alphabetic()), "{password}");
            }
        }
    }

    assert!(successes > 0);
}

#[test]
fn scenario_length_24() {
    let settings = Settings {
        length: 24,
        ..Settings::default()
    };
    let password = generate(&settings).unwrap();
    assert_eq!(password.len(), 24);
    assert!(password.chars().any(|c| c.is_ascii_lowercase()));
    assert!(password.chars().any(|c| c.is_ascii_uppercase()));
    assert!(password.chars().any(|c| c.is_ascii_digit()));
    assert!(password.chars().any(|c| charset::SYMBOLS.contains(c)));
}

#[test]
fn scenario_upper_and_symbols_only() {
    let settings = Settings {
        length: 10,
        exclude_lowercase: true,
        exclude_numbers: true,
        ..Settings::default()
    };
    let allowed = |c: char| c.is_ascii_uppercase() || "!@#$%^&*()_+~`|}{[]:;?><,./=\\-".contains(c);
    for _ in 0..200 {
        let password = generate(&settings).unwrap();
        assert_eq!(password.len(), 10);
        assert!(password.chars().all(allowed), "{password}");
    }
}

#[test]
fn scenario_excluded_chars() {
    let settings = Settings {
        excluded_chars: "abc123".into(),
        ..Settings::default()
    };
    for _ in 0..200 {
        let password = generate(&settings).unwrap();
        assert!(!password.contains(['a', 'b', 'c', '1', '2', '3']), "{password}");
    }
}

#[test]
fn failures_are_distinct_values() {
    let invalid = Settings {
        length: 0,
        ..Settings::default()
    };
    let empty = Settings {
        exclude_lowercase: true,
        exclude_uppercase: true,
        exclude_numbers: true,
        exclude_symbols: true,
        ..Settings::default()
    };
    let short = Settings {
        length: 2,
        ..Settings::default()
    };
    let no_letters = Settings {
        exclude_lowercase: true,
        exclude_uppercase: true,
        rule_no_leading_special: true,
        ..Settings::default()
    };

    assert_eq!(generate(&invalid), Err(GenerateError::InvalidLength(0)));
    assert_eq!(generate(&empty), Err(GenerateError::NoCharactersAvailable));
    assert_eq!(
        generate(&short),
        Err(GenerateError::LengthTooShortForRequiredClasses {
            length: 2,
            required: 4
        })
    );
    assert_eq!(generate(&no_letters), Err(GenerateError::CannotSatisfyLeadingRule));
}

#[test]
fn error_messages_are_human_readable() {
    assert_eq!(
        GenerateError::InvalidLength(200).to_string(),
        "invalid length 200: must be between 1 and 128"
    );
    assert_eq!(
        GenerateError::NoCharactersAvailable.to_string(),
        "all character types excluded or all characters excluded"
    );
}
