//! Paint-order keys: fractional indices that sort lexicographically.
//!
//! A key is an integer part followed by an optional fraction, both written
//! in base 62 (`0-9A-Za-z`). The first character of the integer part encodes
//! its length: `a`..`z` for two to twenty-seven characters growing upward,
//! `Z`..`A` for the same lengths growing downward. The fraction never ends
//! in `0`, so every key has exactly one spelling.
//!
//! Generating a key between two neighbors never touches either neighbor,
//! which is what lets the document insert anywhere without renumbering.

#[cfg(test)]
#[path = "order_test.rs"]
mod order_test;

use std::fmt;

use serde::{Deserialize, Serialize};

const DIGITS: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const ZERO: u8 = b'0';
const LAST: u8 = b'z';

/// `A` followed by 26 zeros: the smallest integer part, reserved so that
/// there is always room below any key.
const SMALLEST_INTEGER: &[u8] = b"A00000000000000000000000000";

/// Error returned when parsing or generating an [`OrderKey`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderKeyError {
    /// The string is not a well-formed key.
    #[error("invalid order key: {0:?}")]
    Invalid(String),
    /// `between` was called with `lower >= upper`.
    #[error("order keys not ascending: {lower:?} >= {upper:?}")]
    NotAscending { lower: String, upper: String },
    /// No integer part exists below the given key.
    #[error("no order key below {0:?}")]
    Exhausted(String),
}

/// A validated paint-order key. Ordering is plain byte order on the string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderKey(String);

impl OrderKey {
    /// The key used when nothing else exists yet (`"a0"`).
    #[must_use]
    pub fn first() -> Self {
        Self(String::from("a0"))
    }

    /// Parse and validate a key.
    ///
    /// # Errors
    ///
    /// Returns [`OrderKeyError::Invalid`] when `s` is not a well-formed key.
    pub fn parse(s: &str) -> Result<Self, OrderKeyError> {
        validate(s.as_bytes()).map_err(|()| OrderKeyError::Invalid(s.to_owned()))?;
        Ok(Self(s.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A key strictly greater than `self`. Never fails.
    #[must_use]
    pub fn after(&self) -> Self {
        let (int, frac) = split(self.0.as_bytes());
        match increment_integer(int) {
            Some(next) => from_bytes(next),
            None => from_bytes(concat(int, &midpoint(frac, None))),
        }
    }

    /// A key strictly less than `self`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderKeyError::Exhausted`] if no integer part remains below.
    pub fn before(&self) -> Result<Self, OrderKeyError> {
        let b = self.0.as_bytes();
        let (int, frac) = split(b);
        if int == SMALLEST_INTEGER {
            return Ok(from_bytes(concat(int, &midpoint(b"", Some(frac)))));
        }
        if !frac.is_empty() {
            return Ok(from_bytes(int.to_vec()));
        }
        decrement_integer(int)
            .map(from_bytes)
            .ok_or_else(|| OrderKeyError::Exhausted(self.0.clone()))
    }

    /// A key strictly between `lower` and `upper`; `None` means an open end.
    ///
    /// # Errors
    ///
    /// Returns [`OrderKeyError::NotAscending`] when `lower >= upper`, or
    /// [`OrderKeyError::Exhausted`] when no key fits below `upper`.
    pub fn between(lower: Option<&Self>, upper: Option<&Self>) -> Result<Self, OrderKeyError> {
        match (lower, upper) {
            (None, None) => Ok(Self::first()),
            (Some(a), None) => Ok(a.after()),
            (None, Some(b)) => b.before(),
            (Some(a), Some(b)) => {
                if a >= b {
                    return Err(OrderKeyError::NotAscending { lower: a.0.clone(), upper: b.0.clone() });
                }
                let (int_a, frac_a) = split(a.0.as_bytes());
                let (int_b, frac_b) = split(b.0.as_bytes());
                if int_a == int_b {
                    return Ok(from_bytes(concat(int_a, &midpoint(frac_a, Some(frac_b)))));
                }
                match increment_integer(int_a) {
                    Some(next) if next.as_slice() < b.0.as_bytes() => Ok(from_bytes(next)),
                    _ => Ok(from_bytes(concat(int_a, &midpoint(frac_a, None)))),
                }
            }
        }
    }
}

impl Default for OrderKey {
    fn default() -> Self {
        Self::first()
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for OrderKey {
    type Error = OrderKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match validate(value.as_bytes()) {
            Ok(()) => Ok(Self(value)),
            Err(()) => Err(OrderKeyError::Invalid(value)),
        }
    }
}

impl From<OrderKey> for String {
    fn from(key: OrderKey) -> Self {
        key.0
    }
}

// =============================================================
// Digit arithmetic
// =============================================================

fn digit_index(c: u8) -> usize {
    DIGITS.iter().position(|&d| d == c).unwrap_or(0)
}

fn integer_length(head: u8) -> Option<usize> {
    match head {
        b'a'..=b'z' => Some(usize::from(head - b'a') + 2),
        b'A'..=b'Z' => Some(usize::from(b'Z' - head) + 2),
        _ => None,
    }
}

fn validate(key: &[u8]) -> Result<(), ()> {
    let Some(&head) = key.first() else {
        return Err(());
    };
    let int_len = integer_length(head).ok_or(())?;
    if int_len > key.len() || !key.iter().all(u8::is_ascii_alphanumeric) {
        return Err(());
    }
    if key == SMALLEST_INTEGER || key[int_len..].last() == Some(&ZERO) {
        return Err(());
    }
    Ok(())
}

/// Split a validated key into integer part and fraction.
fn split(key: &[u8]) -> (&[u8], &[u8]) {
    let len = key.first().and_then(|&h| integer_length(h)).unwrap_or(key.len()).min(key.len());
    key.split_at(len)
}

fn concat(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    out
}

fn from_bytes(bytes: Vec<u8>) -> OrderKey {
    OrderKey(bytes.into_iter().map(char::from).collect())
}

/// Shortest fraction strictly between `a` and `b` (`None` = 1).
fn midpoint(a: &[u8], b: Option<&[u8]>) -> Vec<u8> {
    if let Some(b) = b {
        let mut n = 0;
        while n < b.len() && a.get(n).copied().unwrap_or(ZERO) == b[n] {
            n += 1;
        }
        if n > 0 {
            let rest_a = a.get(n..).unwrap_or(&[]);
            return concat(&b[..n], &midpoint(rest_a, Some(&b[n..])));
        }
    }

    let digit_a = a.first().map_or(0, |&c| digit_index(c));
    let digit_b = b.and_then(|b| b.first()).map_or(DIGITS.len(), |&c| digit_index(c));

    if digit_b.saturating_sub(digit_a) > 1 {
        return vec![DIGITS[(digit_a + digit_b).div_ceil(2)]];
    }
    if let Some(b) = b.filter(|b| b.len() > 1) {
        return vec![b[0]];
    }
    let rest_a = a.get(1..).unwrap_or(&[]);
    concat(&[DIGITS[digit_a]], &midpoint(rest_a, None))
}

fn increment_integer(int: &[u8]) -> Option<Vec<u8>> {
    let (&head, digits) = int.split_first()?;
    let mut digits = digits.to_vec();
    let mut carry = true;
    for d in digits.iter_mut().rev() {
        let next = digit_index(*d) + 1;
        if next == DIGITS.len() {
            *d = ZERO;
        } else {
            *d = DIGITS[next];
            carry = false;
            break;
        }
    }
    if !carry {
        return Some(concat(&[head], &digits));
    }
    match head {
        b'Z' => Some(vec![b'a', ZERO]),
        b'z' => None,
        _ => {
            let head = head + 1;
            if head > b'a' {
                digits.push(ZERO);
            } else {
                digits.pop();
            }
            Some(concat(&[head], &digits))
        }
    }
}

fn decrement_integer(int: &[u8]) -> Option<Vec<u8>> {
    let (&head, digits) = int.split_first()?;
    let mut digits = digits.to_vec();
    let mut borrow = true;
    for d in digits.iter_mut().rev() {
        let index = digit_index(*d);
        if index == 0 {
            *d = LAST;
        } else {
            *d = DIGITS[index - 1];
            borrow = false;
            break;
        }
    }
    if !borrow {
        return Some(concat(&[head], &digits));
    }
    match head {
        b'a' => Some(vec![b'Z', LAST]),
        b'A' => None,
        _ => {
            let head = head - 1;
            if head < b'Z' {
                digits.push(LAST);
            } else {
                digits.pop();
            }
            Some(concat(&[head], &digits))
        }
    }
}
