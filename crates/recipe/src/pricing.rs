//! Deterministic display attributes derived from a recipe id.
//!
//! Prices and ratings are not stored anywhere; they are a pure function of
//! the id string, so every screen that renders the same recipe shows the
//! same numbers. The hash is a fixed contract (`id_hash_v1`): ports in any
//! language must reproduce its 32-bit wrap-around behavior bit for bit.

use std::fmt;

/// Version 1 of the id hash: iterate the UTF-16 code units of `s`,
/// accumulating `h = h * 31 + unit` in wrapping signed 32-bit arithmetic,
/// then take the unsigned absolute value.
///
/// The signed wrap is part of the contract. An unbounded-integer port
/// silently diverges on ids long enough to overflow, which is why this
/// is a named function and not inline arithmetic.
pub fn id_hash_v1(s: &str) -> u32 {
    let mut h: i32 = 0;
    for unit in s.encode_utf16() {
        h = h.wrapping_mul(31).wrapping_add(unit as i32);
    }
    h.unsigned_abs()
}

/// Suffix salt appended to the id before hashing for the rating, so price
/// and rating do not correlate.
const RATING_SALT: &str = "rating";

/// A display price in whole cents. Always within [8.00, 27.99].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u32);

impl Price {
    pub fn from_cents(cents: u32) -> Self {
        Self(cents)
    }

    pub fn cents(self) -> u32 {
        self.0
    }

    pub fn dollars(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// A display rating in tenths. Always within [3.5, 5.0].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    pub fn from_tenths(tenths: u8) -> Self {
        Self(tenths)
    }

    pub fn tenths(self) -> u8 {
        self.0
    }

    pub fn value(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// Synthetic attributes attached to every listed recipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DerivedAttributes {
    pub price: Price,
    pub rating: Rating,
}

impl DerivedAttributes {
    /// Derives price and rating from an id. Pure and total: any string,
    /// including the empty one, yields a stable result.
    pub fn synthesize(id: &str) -> Self {
        let h = id_hash_v1(id);
        // price = 8 + (h % 20) dollars, plus (h % 100) cents
        let price = Price((8 + h % 20) * 100 + h % 100);

        let salted = id_hash_v1(&format!("{id}{RATING_SALT}"));
        // rating = 3.5 + (salted % 15) / 10
        let rating = Rating((35 + salted % 15) as u8);

        Self { price, rating }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesize_is_reproducible() {
        for id in ["52772", "52959", "", "ind-001", "Ärtsoppa"] {
            assert_eq!(
                DerivedAttributes::synthesize(id),
                DerivedAttributes::synthesize(id)
            );
        }
    }

    #[test]
    fn synthesize_stays_in_range() {
        for id in ["52772", "52959", "", "x", "a-very-long-identifier-0123456789"] {
            let attrs = DerivedAttributes::synthesize(id);
            assert!((800..=2799).contains(&attrs.price.cents()), "{id}");
            assert!((35..=50).contains(&attrs.rating.tenths()), "{id}");
        }
    }

    #[test]
    fn known_values_match_the_reference_hash() {
        // Locked outputs of the v1 contract; a port that drifts on integer
        // width or wrap-around breaks these.
        assert_eq!(id_hash_v1("52772"), 50_490_773);
        assert_eq!(
            DerivedAttributes::synthesize("52772").price,
            Price::from_cents(2173)
        );
        assert_eq!(
            DerivedAttributes::synthesize("52772").rating,
            Rating::from_tenths(48)
        );
        assert_eq!(
            DerivedAttributes::synthesize("52959").price,
            Price::from_cents(840)
        );
    }

    #[test]
    fn empty_id_hashes_to_zero() {
        assert_eq!(id_hash_v1(""), 0);
        let attrs = DerivedAttributes::synthesize("");
        assert_eq!(attrs.price, Price::from_cents(800));
        // rating of "" is derived from the hash of the bare salt
        assert_eq!(attrs.rating, Rating::from_tenths(36));
    }

    #[test]
    fn signed_overflow_wraps_instead_of_growing() {
        // Long ids push the accumulator past i32::MAX; the result must
        // still be a valid u32 (and deterministic), not a panic.
        let id = "meal".repeat(64);
        assert_eq!(id_hash_v1(&id), id_hash_v1(&id));
    }

    #[test]
    fn display_formats_pad_cents_and_tenths() {
        assert_eq!(Price::from_cents(840).to_string(), "8.40");
        assert_eq!(Price::from_cents(2173).to_string(), "21.73");
        assert_eq!(Rating::from_tenths(40).to_string(), "4.0");
    }
}
