#[cfg(test)]
mod tests {
    use crate::investments::AssetClass;
    use crate::portfolio::aggregation::aggregate_lots;
    use crate::test_support::lot;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_input_yields_no_positions() {
        assert!(aggregate_lots(&[]).is_empty());
    }

    #[test]
    fn test_single_lot_passes_through() {
        let lots = vec![lot(
            AssetClass::Stock,
            "TCS",
            "NSE",
            dec!(10),
            dec!(35000),
            dec!(3600),
            Some(dec!(3550)),
        )];
        let positions = aggregate_lots(&lots);

        assert_eq!(positions.len(), 1);
        let p = &positions[0];
        assert_eq!(p.quantity, dec!(10));
        assert_eq!(p.cost_basis, dec!(35000));
        assert_eq!(p.avg_cost, dec!(3500));
        assert_eq!(p.current_price, dec!(3600));
        assert_eq!(p.previous_price, Some(dec!(3550)));
        assert_eq!(p.current_value, dec!(36000));
        assert_eq!(p.unrealized_pnl, dec!(1000));
        assert_eq!(p.lot_count, 1);
    }

    #[test]
    fn test_position_venue_is_normalized() {
        let lots = vec![
            lot(AssetClass::MutualFund, "120503", "", dec!(5), dec!(500), dec!(110), None),
            lot(AssetClass::Stock, "INFY", " nse ", dec!(2), dec!(3000), dec!(1600), None),
        ];
        let positions = aggregate_lots(&lots);

        assert_eq!(positions.len(), 2);
        let fund = positions.iter().find(|p| p.symbol == "120503").unwrap();
        assert_eq!(fund.venue, "MF");
        let stock = positions.iter().find(|p| p.symbol == "INFY").unwrap();
        assert_eq!(stock.venue, "NSE");
    }

    #[test]
    fn test_merge_sums_quantity_and_cost() {
        let lots = vec![
            lot(AssetClass::Stock, "INFY", "NSE", dec!(10), dec!(15000), dec!(1600), None),
            lot(AssetClass::Stock, "infy", "nse", dec!(30), dec!(48000), dec!(1650), None),
        ];
        let positions = aggregate_lots(&lots);

        assert_eq!(positions.len(), 1);
        let p = &positions[0];
        assert_eq!(p.quantity, dec!(40));
        assert_eq!(p.cost_basis, dec!(63000));
        assert_eq!(p.avg_cost, dec!(1575));
        assert_eq!(p.lot_count, 2);
        // 16000 + 49500
        assert_eq!(p.current_value, dec!(65500));
        assert_eq!(p.unrealized_pnl, dec!(2500));
    }

    #[test]
    fn test_last_folded_lot_sets_current_price() {
        let lots = vec![
            lot(AssetClass::Stock, "HDFC", "NSE", dec!(5), dec!(7500), dec!(1700), None),
            lot(AssetClass::Stock, "HDFC", "NSE", dec!(5), dec!(8000), dec!(1500), None),
        ];
        assert_eq!(aggregate_lots(&lots)[0].current_price, dec!(1500));

        let reversed: Vec<_> = lots.into_iter().rev().collect();
        assert_eq!(aggregate_lots(&reversed)[0].current_price, dec!(1700));
    }

    #[test]
    fn test_previous_price_is_quantity_weighted() {
        let lots = vec![
            lot(AssetClass::Stock, "ITC", "NSE", dec!(10), dec!(4000), dec!(420), Some(dec!(400))),
            // No previous price: falls back to its own current price.
            lot(AssetClass::Stock, "ITC", "NSE", dec!(30), dec!(12600), dec!(440), None),
        ];
        let p = &aggregate_lots(&lots)[0];
        // (400 * 10 + 440 * 30) / 40
        assert_eq!(p.previous_price, Some(dec!(430)));
    }

    #[test]
    fn test_zero_quantity_positions_are_excluded() {
        let lots = vec![
            lot(AssetClass::Stock, "WIPRO", "NSE", dec!(0), dec!(0), dec!(450), None),
            lot(AssetClass::Stock, "WIPRO", "NSE", dec!(0), dec!(0), dec!(455), None),
            lot(AssetClass::Stock, "SBIN", "NSE", dec!(1), dec!(600), dec!(610), None),
        ];
        let positions = aggregate_lots(&lots);
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].symbol, "SBIN");
    }

    #[test]
    fn test_same_symbol_on_different_venues_never_merges() {
        let lots = vec![
            lot(AssetClass::Stock, "RELIANCE", "NSE", dec!(1), dec!(2500), dec!(2600), None),
            lot(AssetClass::Stock, "RELIANCE", "BSE", dec!(1), dec!(2500), dec!(2601), None),
        ];
        assert_eq!(aggregate_lots(&lots).len(), 2);
    }

    #[test]
    fn test_mutual_funds_merge_under_default_venue() {
        let lots = vec![
            lot(AssetClass::MutualFund, "120503", "", dec!(100), dec!(5000), dec!(55), None),
            lot(AssetClass::MutualFund, "120503", "MF", dec!(50), dec!(2600), dec!(56), None),
        ];
        let positions = aggregate_lots(&lots);
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].quantity, dec!(150));
    }

    #[test]
    fn test_sorted_by_value_with_stable_ties() {
        let lots = vec![
            lot(AssetClass::Stock, "AAA", "NSE", dec!(1), dec!(100), dec!(100), None),
            lot(AssetClass::Stock, "BBB", "NSE", dec!(1), dec!(100), dec!(300), None),
            lot(AssetClass::Stock, "CCC", "NSE", dec!(1), dec!(100), dec!(100), None),
        ];
        let symbols: Vec<_> = aggregate_lots(&lots)
            .into_iter()
            .map(|p| p.symbol)
            .collect();
        assert_eq!(symbols, vec!["BBB", "AAA", "CCC"]);
    }

    #[test]
    fn test_pnl_percentage_is_zero_without_cost() {
        let lots = vec![lot(
            AssetClass::Bond,
            "GOI2033",
            "NSE",
            dec!(1),
            Decimal::ZERO,
            dec!(1000),
            None,
        )];
        assert_eq!(aggregate_lots(&lots)[0].pnl_percentage, Decimal::ZERO);
    }
}
