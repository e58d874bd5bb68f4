//! Extraction of standalone address documents from nested user input.

use clover_core::entities::{Address, AddressKind};

use crate::seed::records::RawAddressInput;

/// Derive standalone [`Address`] records from a user's nested address array.
///
/// Extraction is best-effort relative to user seeding: absent or malformed
/// sub-fields default to empty strings and never abort the run. Ids are the
/// deterministic composite `{userId}-addr-{index}`, so re-seeding the same
/// input overwrites instead of duplicating.
///
/// Classification: a source label of `"billing"` yields a billing address,
/// anything else a shipping address; the first address, or one labelled
/// `"default"`, is marked as the default.
#[must_use]
pub fn extract(user_id: &str, inputs: &[RawAddressInput]) -> Vec<Address> {
    inputs
        .iter()
        .enumerate()
        .map(|(i, input)| {
            let label = input.label.as_deref().unwrap_or_default();
            let kind = if label == "billing" {
                AddressKind::Billing
            } else {
                AddressKind::Shipping
            };
            Address {
                id: Address::composite_id(user_id, i),
                user_id: user_id.to_string(),
                kind,
                line1: input.line1.clone().unwrap_or_default(),
                line2: input.line2.clone().unwrap_or_default(),
                city: input.city.clone().unwrap_or_default(),
                state: input.state.clone().unwrap_or_default(),
                postal_code: input.postal_code.clone().unwrap_or_default(),
                country: input.country.clone().unwrap_or_default(),
                is_default: label == "default" || i == 0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(label: Option<&str>, line1: Option<&str>) -> RawAddressInput {
        RawAddressInput {
            label: label.map(String::from),
            line1: line1.map(String::from),
            line2: None,
            city: None,
            state: None,
            postal_code: None,
            country: None,
        }
    }

    #[test]
    fn test_composite_ids_follow_array_position() {
        let out = extract("U1", &[input(None, Some("1 Main St")), input(None, None)]);
        let ids: Vec<&str> = out.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["U1-addr-0", "U1-addr-1"]);
    }

    #[test]
    fn test_billing_label_classifies_billing_else_shipping() {
        let out = extract(
            "U1",
            &[
                input(Some("billing"), None),
                input(Some("home"), None),
                input(None, None),
            ],
        );
        let kinds: Vec<AddressKind> = out.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            [AddressKind::Billing, AddressKind::Shipping, AddressKind::Shipping]
        );
    }

    #[test]
    fn test_first_or_default_labelled_is_default() {
        let out = extract(
            "U1",
            &[
                input(Some("home"), None),
                input(Some("default"), None),
                input(None, None),
            ],
        );
        let defaults: Vec<bool> = out.iter().map(|a| a.is_default).collect();
        assert_eq!(defaults, [true, true, false]);
    }

    #[test]
    fn test_missing_fields_default_to_empty_strings() {
        let out = extract("U1", &[input(None, None)]);
        let addr = out.first().expect("one address");
        assert_eq!(addr.line1, "");
        assert_eq!(addr.country, "");
        assert!(addr.is_default);
    }

    #[test]
    fn test_no_addresses_extracts_nothing() {
        assert!(extract("U1", &[]).is_empty());
    }
}
