// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Money, Progress};

#[test]
fn money_clamps_negative_amounts_to_zero() {
    assert_eq!(Money::new(-500.0).amount(), 0.0);
    assert_eq!(Money::new(f64::NAN).amount(), 0.0);
    assert_eq!(Money::new(f64::NEG_INFINITY).amount(), 0.0);
}

#[test]
fn money_keeps_positive_amounts() {
    assert_eq!(Money::new(5000.0).amount(), 5000.0);
    assert_eq!(Money::new(0.01).amount(), 0.01);
}

#[test]
fn money_parses_formatted_text() {
    assert_eq!(Money::parse("5000").amount(), 5000.0);
    assert_eq!(Money::parse("$5,000").amount(), 5000.0);
    assert_eq!(Money::parse(" 350.50 ").amount(), 350.5);
}

#[test]
fn money_defaults_unparsable_text_to_zero() {
    assert_eq!(Money::parse("a lot").amount(), 0.0);
    assert_eq!(Money::parse("").amount(), 0.0);
}

#[test]
fn money_deserializes_numbers_strings_and_junk() {
    let from_number: Money = serde_json::from_str("5000").unwrap();
    assert_eq!(from_number.amount(), 5000.0);

    let from_string: Money = serde_json::from_str("\"5,000\"").unwrap();
    assert_eq!(from_string.amount(), 5000.0);

    let from_negative: Money = serde_json::from_str("-250").unwrap();
    assert_eq!(from_negative.amount(), 0.0);

    let from_null: Money = serde_json::from_str("null").unwrap();
    assert_eq!(from_null.amount(), 0.0);

    let from_bool: Money = serde_json::from_str("true").unwrap();
    assert_eq!(from_bool.amount(), 0.0);
}

#[test]
fn money_serializes_as_plain_number() {
    let json: String = serde_json::to_string(&Money::new(351.0)).unwrap();
    assert_eq!(json, "351.0");
}

#[test]
fn money_sums() {
    let total: Money = [Money::new(100.0), Money::new(-5.0), Money::new(23.5)]
        .into_iter()
        .sum();
    assert_eq!(total.amount(), 123.5);
}

#[test]
fn progress_caps_at_one_hundred() {
    assert_eq!(Progress::new(250).percent(), 100);
    assert_eq!(Progress::new(75).percent(), 75);
}

#[test]
fn progress_deserializes_out_of_range_values() {
    let over: Progress = serde_json::from_str("150").unwrap();
    assert_eq!(over.percent(), 100);

    let negative: Progress = serde_json::from_str("-20").unwrap();
    assert_eq!(negative.percent(), 0);

    let text: Progress = serde_json::from_str("\"75%\"").unwrap();
    assert_eq!(text.percent(), 75);

    let junk: Progress = serde_json::from_str("{}").unwrap();
    assert_eq!(junk.percent(), 0);
}
