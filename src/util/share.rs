//! Share-link encoding for calculator inputs.
//!
//! A link carries the subset of the form worth sharing (`sp`, `w`, `sell`,
//! `pf`, `csf`, `ad`); decoding tolerates any subset being absent and
//! ignores keys it does not know.

use url::Url;

use crate::domain::{CalculationInput, Platform};

/// Links resolve to the project page; the app itself only reads the query.
const SHARE_BASE_URL: &str = "https://skynatbs.github.io/global_seller_calc/";

/// Build a shareable URL from the current inputs. Zero-valued amounts are
/// omitted, matching "only what the sender actually filled in".
pub fn share_url(input: &CalculationInput) -> String {
    let mut pairs = url::form_urlencoded::Serializer::new(String::new());
    if input.sourcing_price > 0.0 {
        pairs.append_pair("sp", &trim_number(input.sourcing_price));
    }
    if input.weight > 0.0 {
        pairs.append_pair("w", &trim_number(input.weight));
    }
    if input.selling_price > 0.0 {
        pairs.append_pair("sell", &trim_number(input.selling_price));
    }
    pairs.append_pair("pf", input.platform.key());
    if input.customer_shipping_fee > 0.0 {
        pairs.append_pair("csf", &trim_number(input.customer_shipping_fee));
    }
    if input.ad_cost > 0.0 {
        pairs.append_pair("ad", &trim_number(input.ad_cost));
    }
    format!("{SHARE_BASE_URL}?{}", pairs.finish())
}

/// Apply the parameters of a pasted link (or bare query string) onto the
/// inputs. Returns false when nothing shareable could be read at all.
pub fn apply_share_link(raw: &str, input: &mut CalculationInput) -> bool {
    let Some(url) = parse_flexible(raw) else {
        return false;
    };

    let mut applied = false;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "sp" => {
                input.sourcing_price = parse_amount(&value);
                applied = true;
            }
            "w" => {
                input.weight = parse_amount(&value);
                applied = true;
            }
            "sell" => {
                input.selling_price = parse_amount(&value);
                applied = true;
            }
            "pf" => {
                if let Some(platform) = Platform::from_key(&value) {
                    input.platform = platform;
                    applied = true;
                }
            }
            "csf" => {
                input.customer_shipping_fee = parse_amount(&value);
                applied = true;
            }
            "ad" => {
                input.ad_cost = parse_amount(&value);
                applied = true;
            }
            // Unknown keys are somebody else's problem.
            _ => {}
        }
    }
    applied
}

fn parse_flexible(raw: &str) -> Option<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url);
    }
    // Bare query strings ("sp=100&w=2" or "?sp=100") are accepted too.
    let query = trimmed.trim_start_matches('?');
    Url::parse(&format!("https://share.invalid/?{query}")).ok()
}

/// Same normalization rule as the form boundary: unreadable numbers are 0.
fn parse_amount(value: &str) -> f64 {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0).unwrap_or(0.0)
}

fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_only_filled_fields() {
        let input = CalculationInput {
            sourcing_price: 100.0,
            selling_price: 40_000.0,
            platform: Platform::CoupangGeneral,
            ..CalculationInput::default()
        };
        let url = share_url(&input);
        assert!(url.contains("sp=100"));
        assert!(url.contains("sell=40000"));
        assert!(url.contains("pf=coupang_general"));
        assert!(!url.contains("csf="));
        assert!(!url.contains("ad="));
    }

    #[test]
    fn round_trip_restores_the_shared_subset() {
        let original = CalculationInput {
            sourcing_price: 150.5,
            weight: 2.4,
            selling_price: 55_000.0,
            customer_shipping_fee: 3_000.0,
            ad_cost: 500.0,
            platform: Platform::NaverLink,
            ..CalculationInput::default()
        };
        let url = share_url(&original);

        let mut restored = CalculationInput::default();
        assert!(apply_share_link(&url, &mut restored));
        assert_eq!(restored.sourcing_price, 150.5);
        assert_eq!(restored.weight, 2.4);
        assert_eq!(restored.selling_price, 55_000.0);
        assert_eq!(restored.customer_shipping_fee, 3_000.0);
        assert_eq!(restored.ad_cost, 500.0);
        assert_eq!(restored.platform, Platform::NaverLink);
    }

    #[test]
    fn accepts_bare_query_strings_and_subsets() {
        let mut input = CalculationInput::default();
        assert!(apply_share_link("sp=80&sell=30000", &mut input));
        assert_eq!(input.sourcing_price, 80.0);
        assert_eq!(input.selling_price, 30_000.0);
        // Untouched fields keep their values.
        assert_eq!(input.weight, 0.0);
        assert_eq!(input.platform, Platform::NaverGeneral);
    }

    #[test]
    fn ignores_unknown_keys_and_bad_values() {
        let mut input = CalculationInput::default();
        assert!(apply_share_link("?sp=abc&zzz=1&pf=not_a_platform&w=2", &mut input));
        assert_eq!(input.sourcing_price, 0.0);
        assert_eq!(input.weight, 2.0);
        assert_eq!(input.platform, Platform::NaverGeneral);
    }

    #[test]
    fn rejects_inputs_with_nothing_to_apply() {
        let mut input = CalculationInput::default();
        assert!(!apply_share_link("", &mut input));
        assert!(!apply_share_link("https://example.com/?foo=bar", &mut input));
    }
}
