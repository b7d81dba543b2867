//! Request signature for the Baidu web endpoints.
//!
//! `v2transapi` rejects requests whose `sign` field does not match a checksum
//! computed from the query and the page's `gtk` value. The checksum works on
//! UTF-16 code units and relies on 32-bit integer wraparound. The running
//! value is kept as an `f64` because the `gtk` halves are arbitrary numbers
//! until the first wrapping step.

/// Shift/add program applied after every input byte.
const ROUND_PROGRAM: &str = "+-a^+6";

/// Shift/add program applied once at the end.
const FINAL_PROGRAM: &str = "+-3^+b+-f";

/// Queries longer than this many code units are sampled.
const SAMPLE_THRESHOLD: usize = 30;

const TWO_POW_32: f64 = 4_294_967_296.0;

/// Truncates to a signed 32-bit value. Non-finite input gives zero.
fn to_i32(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    value.trunc().rem_euclid(TWO_POW_32) as u32 as i32 as i64
}

/// Truncates to an unsigned 32-bit value.
fn to_u32(value: f64) -> i64 {
    to_i32(value) as u32 as i64
}

/// Runs a shift/add program over `r`.
///
/// The program is read in triples `(op, dir, amount)`: `amount` is a digit or
/// a letter (`a` = 10), `dir` is `+` for an unsigned right shift and anything
/// else for a left shift, `op` is `+` for wrapping addition and anything else
/// for xor.
fn token_a(mut r: f64, program: &str) -> f64 {
    let ops = program.as_bytes();
    let mut t = 0;
    while t + 2 < ops.len() {
        let amount = match ops[t + 2] {
            c @ b'a'..=b'z' => (c - 87) as u32,
            c => (c - b'0') as u32,
        };
        let shifted = if ops[t + 1] == b'+' {
            to_u32(r) >> (amount & 31)
        } else {
            (to_i32(r) as i32).wrapping_shl(amount) as i64
        };
        r = if ops[t] == b'+' {
            to_i32(r + shifted as f64) as f64
        } else {
            (to_i32(r) ^ (shifted as i32 as i64)) as f64
        };
        t += 3;
    }
    r
}

/// Picks the code units that feed the checksum.
fn sample_units(query: &str) -> Vec<u16> {
    let units: Vec<u16> = query.encode_utf16().collect();
    let len = units.len();
    if len <= SAMPLE_THRESHOLD {
        return units;
    }

    let middle = len / 2 - 5;
    let mut sampled = Vec::with_capacity(30);
    sampled.extend_from_slice(&units[..10]);
    sampled.extend_from_slice(&units[middle..middle + 10]);
    sampled.extend_from_slice(&units[len - 10..]);
    sampled
}

/// UTF-8 encodes code units, keeping lone surrogates as 3-byte sequences.
fn encode_units(units: &[u16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(units.len() * 3);
    let mut g = 0;
    while g < units.len() {
        let mut m = units[g] as u32;
        if m < 0x80 {
            bytes.push(m as u8);
        } else {
            if m < 0x800 {
                bytes.push(((m >> 6) | 0xC0) as u8);
            } else {
                let is_pair = (m & 0xFC00) == 0xD800
                    && g + 1 < units.len()
                    && (units[g + 1] & 0xFC00) == 0xDC00;
                if is_pair {
                    g += 1;
                    m = 0x10000 + ((m & 0x3FF) << 10) + (units[g] as u32 & 0x3FF);
                    bytes.push(((m >> 18) | 0xF0) as u8);
                    bytes.push((((m >> 12) & 0x3F) | 0x80) as u8);
                } else {
                    bytes.push(((m >> 12) | 0xE0) as u8);
                }
                bytes.push((((m >> 6) & 0x3F) | 0x80) as u8);
            }
            bytes.push(((m & 0x3F) | 0x80) as u8);
        }
        g += 1;
    }
    bytes
}

/// Reads one `gtk` half as a number.
///
/// Accepts what a JavaScript `Number(...)` call accepts: surrounding
/// whitespace, decimal with optional exponent, `0x`/`0o`/`0b` prefixes and
/// `Infinity`. Anything else, and the empty string, counts as zero.
fn parse_number(raw: &str) -> f64 {
    let s = raw.trim();
    let value = match s {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ => match s.get(..2).map(str::to_ascii_lowercase).as_deref() {
            Some("0x") => parse_radix(&s[2..], 16),
            Some("0o") => parse_radix(&s[2..], 8),
            Some("0b") => parse_radix(&s[2..], 2),
            _ if s
                .bytes()
                .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E')) =>
            {
                s.parse().unwrap_or(f64::NAN)
            }
            _ => f64::NAN,
        },
    };
    if value.is_nan() { 0.0 } else { value }
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0, |acc: f64, c| {
            c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
        })
        .unwrap_or(f64::NAN)
}

/// Splits `gtk` ("h.i") into its two numeric halves. A missing half counts
/// as zero.
fn split_gtk(gtk: &str) -> (f64, f64) {
    let mut parts = gtk.split('.');
    let h = parts.next().map(parse_number).unwrap_or(0.0);
    let i = parts.next().map(parse_number).unwrap_or(0.0);
    (h, i)
}

/// Computes the `sign` request parameter for `query`.
pub fn generate_sign(query: &str, gtk: &str) -> String {
    let (h, i) = split_gtk(gtk);
    let bytes = encode_units(&sample_units(query));

    let mut s = h;
    for b in bytes {
        s = token_a(s + b as f64, ROUND_PROGRAM);
    }
    s = token_a(s, FINAL_PROGRAM);

    let mut s = to_i32(s) ^ to_i32(i);
    if s < 0 {
        s = (s & 0x7FFF_FFFF) + 0x8000_0000;
    }
    s %= 1_000_000;

    format!("{}.{}", s, s ^ to_i32(h))
}
