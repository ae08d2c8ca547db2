//! Engineering (SI prefix) notation.
//!
//! Formatting mirrors what a datasheet prints: three-digit exponent groups with
//! an SI prefix, and a mantissa rounded to a requested number of significant
//! digits. Parsing accepts the same notation back, plus the RKM code used on
//! schematics and part markings (`4k7`, `R47`, `1M5`).

use crate::error::{EfError, EfResult};
use crate::numeric::ensure_finite;

const PREFIXES_UP: [&str; 9] = ["", "k", "M", "G", "T", "P", "E", "Z", "Y"];
const PREFIXES_DOWN: [&str; 8] = ["m", "μ", "n", "p", "f", "a", "z", "y"];

/// Unit symbols accepted after a value when parsing.
const UNIT_SYMBOLS: &[&str] = &[
    "Ω", "ohm", "ohms", "Ohm", "F", "H", "V", "A", "Hz", "s",
];

/// Format `x` in engineering notation, e.g. `4.7 kΩ`.
///
/// `sig` is the number of significant digits to show. Zero prints with no
/// prefix and an infinite value prints as `∞`. Values whose exponent falls
/// outside the SI prefix range are an error.
pub fn format_eng(x: f64, unit: &str, sig: usize) -> EfResult<String> {
    if x.is_nan() {
        return Err(EfError::NonFinite {
            what: "formatted value",
            value: x,
        });
    }
    if x.is_infinite() {
        return Ok(if x > 0.0 { "∞".to_string() } else { "-∞".to_string() });
    }

    let p = if x == 0.0 {
        0
    } else {
        x.abs().log10().floor() as i32
    };
    let e = p.div_euclid(3);
    let digits = (sig as i32 - p.rem_euclid(3) - 1).max(0) as usize;

    let prefix = match e {
        0..=8 => PREFIXES_UP[e as usize],
        -8..=-1 => PREFIXES_DOWN[(-e - 1) as usize],
        _ => {
            return Err(EfError::OutOfRange {
                value: x,
                reason: "outside the SI prefix range",
            })
        }
    };

    let mantissa = if e >= 0 {
        x / 10f64.powi(3 * e)
    } else {
        x * 10f64.powi(-3 * e)
    };
    Ok(format!("{mantissa:.digits$} {prefix}{unit}"))
}

/// Parse a value written in engineering notation.
///
/// Accepted forms:
/// - plain and scientific numbers: `1000`, `4.7e3`
/// - SI prefix with optional unit: `4.7k`, `100 nF`, `2.2 MΩ`, `10uF`
/// - RKM code: `4k7` (4700), `R47` (0.47), `47R` (47), `1M5`
pub fn parse_eng(input: &str) -> EfResult<f64> {
    let text = input.trim();
    let parse_err = || EfError::Parse {
        input: input.to_string(),
        what: "an engineering value",
    };

    let (number, rest) = split_number(text);
    let rest = rest.trim_start();

    let (value, unit) = match rest.chars().next().and_then(|c| {
        prefix_multiplier(c).map(|m| (c, m))
    }) {
        Some((c, multiplier)) if accepts_prefix(&rest[c.len_utf8()..]) => {
            let after = &rest[c.len_utf8()..];
            let fraction_len = after
                .find(|ch: char| !ch.is_ascii_digit())
                .unwrap_or(after.len());
            let (fraction, unit) = after.split_at(fraction_len);

            let mantissa: f64 = if fraction.is_empty() {
                number.parse().map_err(|_| parse_err())?
            } else {
                // RKM: the prefix stands in for the decimal point
                if number.contains(['.', 'e', 'E', ' ']) {
                    return Err(parse_err());
                }
                let whole = if number.is_empty() { "0" } else { number };
                format!("{whole}.{fraction}")
                    .parse()
                    .map_err(|_| parse_err())?
            };
            if number.is_empty() && c != 'R' {
                return Err(parse_err());
            }
            (mantissa * multiplier, unit)
        }
        _ => {
            let value: f64 = number.parse().map_err(|_| parse_err())?;
            (value, rest)
        }
    };

    let unit = unit.trim();
    if !unit.is_empty() && !UNIT_SYMBOLS.contains(&unit) {
        return Err(parse_err());
    }

    ensure_finite(value, "parsed value")
}

fn prefix_multiplier(c: char) -> Option<f64> {
    let m = match c {
        'y' => 1e-24,
        'z' => 1e-21,
        'a' => 1e-18,
        'f' => 1e-15,
        'p' => 1e-12,
        'n' => 1e-9,
        'u' | 'µ' | 'μ' => 1e-6,
        'm' => 1e-3,
        'R' => 1.0,
        'k' | 'K' => 1e3,
        'M' => 1e6,
        'G' => 1e9,
        'T' => 1e12,
        'P' => 1e15,
        'E' => 1e18,
        'Z' => 1e21,
        'Y' => 1e24,
        _ => return None,
    };
    Some(m)
}

/// A prefix character is only a prefix when what follows it is RKM digits,
/// a unit symbol, or nothing. Otherwise it is the start of a unit (`F`, `Hz`).
fn accepts_prefix(after: &str) -> bool {
    let tail = after.trim_start_matches(|ch: char| ch.is_ascii_digit()).trim();
    tail.is_empty() || UNIT_SYMBOLS.contains(&tail)
}

/// Split leading `[sign] digits [. digits] [e [sign] digits]` from the rest.
fn split_number(text: &str) -> (&str, &str) {
    let bytes = text.as_bytes();
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }

    text.split_at(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * a.abs().max(b.abs())
    }

    #[test]
    fn format_kilo_ohm() {
        assert_eq!(format_eng(4_700.0, "Ω", 2).unwrap(), "4.7 kΩ");
        assert_eq!(format_eng(1_000.0, "Ω", 2).unwrap(), "1.0 kΩ");
        assert_eq!(format_eng(47_000.0, "Ω", 2).unwrap(), "47 kΩ");
    }

    #[test]
    fn format_small_values() {
        assert_eq!(format_eng(100e-9, "F", 2).unwrap(), "100 nF");
        assert_eq!(format_eng(4.7e-6, "F", 2).unwrap(), "4.7 μF");
        assert_eq!(format_eng(0.3, "V", 2).unwrap(), "300 mV");
    }

    #[test]
    fn format_zero_and_infinity() {
        assert_eq!(format_eng(0.0, "V", 2).unwrap(), "0.0 V");
        assert_eq!(format_eng(f64::INFINITY, "Ω", 2).unwrap(), "∞");
    }

    #[test]
    fn format_more_digits() {
        assert_eq!(format_eng(3.0126, "V", 4).unwrap(), "3.013 V");
        assert_eq!(format_eng(187e3, "Ω", 3).unwrap(), "187 kΩ");
    }

    #[test]
    fn format_out_of_range() {
        assert!(format_eng(1e30, "Ω", 2).is_err());
        assert!(format_eng(f64::NAN, "Ω", 2).is_err());
    }

    #[test]
    fn parse_plain_and_scientific() {
        assert_eq!(parse_eng("1000").unwrap(), 1000.0);
        assert_eq!(parse_eng(" 4.7e3 ").unwrap(), 4700.0);
        assert_eq!(parse_eng("-3.3 V").unwrap(), -3.3);
    }

    #[test]
    fn parse_si_prefixes() {
        assert!(close(parse_eng("4.7k").unwrap(), 4700.0));
        assert!(close(parse_eng("100 nF").unwrap(), 100e-9));
        assert!(close(parse_eng("2.2 MΩ").unwrap(), 2.2e6));
        assert!(close(parse_eng("10uF").unwrap(), 10e-6));
        assert!(close(parse_eng("10µF").unwrap(), 10e-6));
        assert!(close(parse_eng("38 kHz").unwrap(), 38e3));
        assert!(close(parse_eng("2 ms").unwrap(), 2e-3));
    }

    #[test]
    fn parse_units_without_prefix() {
        assert_eq!(parse_eng("10 F").unwrap(), 10.0);
        assert_eq!(parse_eng("50 Hz").unwrap(), 50.0);
        assert_eq!(parse_eng("1 A").unwrap(), 1.0);
    }

    #[test]
    fn parse_rkm_code() {
        assert!(close(parse_eng("4k7").unwrap(), 4700.0));
        assert!(close(parse_eng("R47").unwrap(), 0.47));
        assert!(close(parse_eng("47R").unwrap(), 47.0));
        assert!(close(parse_eng("1M5").unwrap(), 1.5e6));
        assert!(close(parse_eng("4k7Ω").unwrap(), 4700.0));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_eng("").is_err());
        assert!(parse_eng("abc").is_err());
        assert!(parse_eng("4.7 furlongs").is_err());
        assert!(parse_eng("4.7k7").is_err());
        assert!(parse_eng("k7").is_err());
    }

    #[test]
    fn format_then_parse_recovers_value() {
        for x in [1.0, 47.0, 4_700.0, 2.2e6, 100e-9] {
            let text = format_eng(x, "Ω", 3).unwrap();
            assert!(close(parse_eng(&text).unwrap(), x), "{text}");
        }
    }
}
