//! Password generation.

use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};
use tracing::debug;
use zeroize::Zeroize;

use super::charset::{self, CharClass};
use super::error::GenerateError;
use crate::settings::Settings;

/// Generate a single password from the operating system CSPRNG.
pub fn generate(settings: &Settings) -> Result<String, GenerateError> {
    generate_with(settings, &mut OsRng)
}

/// Generate a single password, drawing every random choice from `rng`.
///
/// One character from each active class is seeded first, the rest is filled
/// from the combined pool, then the whole buffer is shuffled so the seeded
/// characters land anywhere. With `rule_no_leading_special` the first letter
/// found is swapped to the front; a letter is always present because every
/// active letter class seeds one.
pub fn generate_with<R>(settings: &Settings, rng: &mut R) -> Result<String, GenerateError>
where
    R: Rng + CryptoRng,
{
    let length = settings.length;
    if !Settings::length_in_range(length) {
        return Err(GenerateError::InvalidLength(length));
    }

    let pools = charset::build(settings);
    let pool = charset::combined(&pools);
    if pool.is_empty() {
        return Err(GenerateError::NoCharactersAvailable);
    }
    if pools.len() > length {
        return Err(GenerateError::LengthTooShortForRequiredClasses {
            length,
            required: pools.len(),
        });
    }
    if settings.rule_no_leading_special && !pools.iter().any(|p| p.class.is_letter()) {
        return Err(GenerateError::CannotSatisfyLeadingRule);
    }

    debug!(
        length,
        classes = pools.len(),
        pool = pool.len(),
        "generating password"
    );

    let mut buf = Vec::with_capacity(length);
    buf.extend(pools.iter().map(|p| pick(&p.chars, rng)));
    buf.extend((pools.len()..length).map(|_| pick(&pool, rng)));

    let mut buf = shuffled(buf, rng);

    if settings.rule_no_leading_special
        && let Err(e) = lead_with_letter(&mut buf)
    {
        buf.zeroize();
        return Err(e);
    }

    let password = buf.iter().collect();
    buf.zeroize();
    Ok(password)
}

/// Fisher-Yates shuffle. Every permutation of `items` is equally likely.
pub fn shuffled<T, R>(mut items: Vec<T>, rng: &mut R) -> Vec<T>
where
    R: Rng,
{
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
    items
}

#[inline]
fn pick<R: Rng>(chars: &[char], rng: &mut R) -> char {
    chars[rng.gen_range(0..chars.len())]
}

fn is_letter(c: &char) -> bool {
    CharClass::of(*c).is_some_and(CharClass::is_letter)
}

/// Swap the first letter after position 0 into the front if the buffer
/// starts with a digit or symbol.
fn lead_with_letter(buf: &mut [char]) -> Result<(), GenerateError> {
    match buf.first() {
        Some(first) if !is_letter(first) => {}
        _ => return Ok(()),
    }

    let offset = buf[1..]
        .iter()
        .position(is_letter)
        .ok_or(GenerateError::CannotSatisfyLeadingRule)?;
    buf.swap(0, offset + 1);
    Ok(())
}
