//! Built-in catalog of listed bonds.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::market_data_model::BondListing;

struct CatalogEntry {
    isin: &'static str,
    name: &'static str,
    company: &'static str,
    coupon_rate: Decimal,
    face_value: Decimal,
    maturity: (i32, u32, u32),
    credit_rating: &'static str,
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        isin: "IN0020230085",
        name: "7.18% GS 2033",
        company: "Government of India",
        coupon_rate: dec!(7.18),
        face_value: dec!(100),
        maturity: (2033, 8, 14),
        credit_rating: "SOVEREIGN",
    },
    CatalogEntry {
        isin: "IN0020220151",
        name: "7.26% GS 2033",
        company: "Government of India",
        coupon_rate: dec!(7.26),
        face_value: dec!(100),
        maturity: (2033, 2, 6),
        credit_rating: "SOVEREIGN",
    },
    CatalogEntry {
        isin: "IN0020230010",
        name: "7.10% GS 2029",
        company: "Government of India",
        coupon_rate: dec!(7.10),
        face_value: dec!(100),
        maturity: (2029, 4, 18),
        credit_rating: "SOVEREIGN",
    },
    CatalogEntry {
        isin: "IN0020230168",
        name: "SGB 2023-24 Series III",
        company: "Reserve Bank of India",
        coupon_rate: dec!(2.50),
        face_value: dec!(6199),
        maturity: (2031, 12, 28),
        credit_rating: "SOVEREIGN",
    },
    CatalogEntry {
        isin: "INE053F07BX5",
        name: "IRFC 7.54% 2031",
        company: "Indian Railway Finance Corporation",
        coupon_rate: dec!(7.54),
        face_value: dec!(1000),
        maturity: (2031, 10, 29),
        credit_rating: "AAA",
    },
    CatalogEntry {
        isin: "INE134E08LP9",
        name: "PFC 7.42% 2033",
        company: "Power Finance Corporation",
        coupon_rate: dec!(7.42),
        face_value: dec!(1000),
        maturity: (2033, 4, 15),
        credit_rating: "AAA",
    },
    CatalogEntry {
        isin: "INE020B08EF3",
        name: "REC 7.55% 2031",
        company: "REC Limited",
        coupon_rate: dec!(7.55),
        face_value: dec!(1000),
        maturity: (2031, 5, 11),
        credit_rating: "AAA",
    },
    CatalogEntry {
        isin: "INE906B07HH5",
        name: "NHAI 7.35% 2031",
        company: "National Highways Authority of India",
        coupon_rate: dec!(7.35),
        face_value: dec!(1000),
        maturity: (2031, 1, 11),
        credit_rating: "AAA",
    },
    CatalogEntry {
        isin: "INE261F08DX0",
        name: "NABARD 7.50% 2032",
        company: "National Bank for Agriculture and Rural Development",
        coupon_rate: dec!(7.50),
        face_value: dec!(1000),
        maturity: (2032, 8, 31),
        credit_rating: "AAA",
    },
    CatalogEntry {
        isin: "INE733E07KL3",
        name: "NTPC 7.32% 2030",
        company: "NTPC Limited",
        coupon_rate: dec!(7.32),
        face_value: dec!(1000),
        maturity: (2030, 7, 17),
        credit_rating: "AAA",
    },
    CatalogEntry {
        isin: "INE848E07AO9",
        name: "NHPC 8.54% 2029",
        company: "NHPC Limited",
        coupon_rate: dec!(8.54),
        face_value: dec!(1000),
        maturity: (2029, 11, 26),
        credit_rating: "AAA",
    },
    CatalogEntry {
        isin: "INE002A08575",
        name: "Reliance 7.79% 2033",
        company: "Reliance Industries Limited",
        coupon_rate: dec!(7.79),
        face_value: dec!(100000),
        maturity: (2033, 11, 10),
        credit_rating: "AAA",
    },
];

fn to_listing(entry: &CatalogEntry) -> Option<BondListing> {
    let (year, month, day) = entry.maturity;
    Some(BondListing {
        isin: entry.isin.to_string(),
        name: entry.name.to_string(),
        company: entry.company.to_string(),
        coupon_rate: entry.coupon_rate,
        face_value: entry.face_value,
        maturity_date: NaiveDate::from_ymd_opt(year, month, day)?,
        credit_rating: entry.credit_rating.to_string(),
    })
}

/// Case-insensitive substring search over name, company and ISIN.
/// A blank query returns the whole catalog.
pub fn search_bonds(query: &str) -> Vec<BondListing> {
    let needle = query.trim().to_lowercase();
    CATALOG
        .iter()
        .filter(|entry| {
            needle.is_empty()
                || entry.name.to_lowercase().contains(&needle)
                || entry.company.to_lowercase().contains(&needle)
                || entry.isin.to_lowercase().contains(&needle)
        })
        .filter_map(to_listing)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_query_returns_catalog() {
        assert_eq!(search_bonds("  ").len(), CATALOG.len());
    }

    #[test]
    fn test_search_matches_company_case_insensitively() {
        let results = search_bonds("government of INDIA");
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|b| b.credit_rating == "SOVEREIGN"));
    }

    #[test]
    fn test_search_matches_isin() {
        let results = search_bonds("ine053f");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "IRFC 7.54% 2031");
    }

    #[test]
    fn test_unknown_query_is_empty() {
        assert!(search_bonds("no such bond").is_empty());
    }
}
