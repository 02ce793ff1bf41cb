//! Unit tests for the instrument catalog - CSV load, lookup, atomic swap.

#[cfg(test)]
mod catalog_tests {
    use crate::broker::types::OptionType;
    use crate::catalog::{normalize_name, InstrumentCatalog};
    use crate::error::CatalogError;
    use rust_decimal::Decimal;

    const SCRIP_CSV: &str = "\
DISPLAY_NAME,UNDERLYING_SYMBOL,SM_EXPIRY_DATE,OPTION_TYPE,STRIKE_PRICE,SECURITY_ID
NIFTY 31 OCT 22000 CALL,NIFTY,2024-10-31,CE,22000.00,49081
NIFTY 31 OCT 22000 PUT,NIFTY,2024-10-31,PE,22000.00,49082
RELIANCE,RELIANCE,,XX,,2885
";

    // ============= Load Tests =============

    #[test]
    fn test_load_indexes_all_complete_rows() {
        let catalog = InstrumentCatalog::new();
        let rows = catalog.load_from_csv(SCRIP_CSV).unwrap();

        assert_eq!(rows, 3);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_load_parses_derivative_fields() {
        let catalog = InstrumentCatalog::new();
        catalog.load_from_csv(SCRIP_CSV).unwrap();

        let record = catalog.get("NIFTY 31 OCT 22000 CALL").unwrap();
        assert_eq!(record.security_id, "49081");
        assert_eq!(record.underlying_symbol, "NIFTY");
        assert_eq!(record.option_type, Some(OptionType::Call));
        assert_eq!(record.strike_price, Some(Decimal::new(22000, 0)));
        assert_eq!(
            record.expiry_date.unwrap().to_string(),
            "2024-10-31"
        );
    }

    #[test]
    fn test_load_non_derivative_row() {
        let catalog = InstrumentCatalog::new();
        catalog.load_from_csv(SCRIP_CSV).unwrap();

        let record = catalog.get("RELIANCE").unwrap();
        assert_eq!(record.security_id, "2885");
        assert_eq!(record.option_type, None);
        assert_eq!(record.strike_price, None);
        assert_eq!(record.expiry_date, None);
    }

    #[test]
    fn test_load_skips_rows_missing_name_or_id() {
        let csv = "\
DISPLAY_NAME,SECURITY_ID
NIFTY 31 OCT 22000 CALL,49081
,49999
NO ID ROW,
";
        let catalog = InstrumentCatalog::new();
        let rows = catalog.load_from_csv(csv).unwrap();

        assert_eq!(rows, 1);
        assert_eq!(catalog.lookup("NIFTY 31 OCT 22000 CALL"), Some("49081".to_string()));
        assert_eq!(catalog.lookup("NO ID ROW"), None);
    }

    #[test]
    fn test_load_falls_back_to_symbol_name_column() {
        let csv = "\
SYMBOL_NAME,SECURITY_ID
BANKNIFTY 30 OCT 48000 CALL,41201
";
        let catalog = InstrumentCatalog::new();
        catalog.load_from_csv(csv).unwrap();

        assert_eq!(
            catalog.lookup("BANKNIFTY 30 OCT 48000 CALL"),
            Some("41201".to_string())
        );
    }

    #[test]
    fn test_load_missing_required_columns() {
        let catalog = InstrumentCatalog::new();

        let no_name = catalog.load_from_csv("SECURITY_ID\n49081\n");
        assert!(matches!(no_name, Err(CatalogError::MissingColumn(_))));

        let no_id = catalog.load_from_csv("DISPLAY_NAME\nNIFTY\n");
        assert!(matches!(no_id, Err(CatalogError::MissingColumn(_))));
    }

    #[test]
    fn test_failed_load_keeps_prior_state() {
        let catalog = InstrumentCatalog::new();
        catalog.load_from_csv(SCRIP_CSV).unwrap();
        assert_eq!(catalog.len(), 3);

        let result = catalog.load_from_csv("WRONG_COLUMN\nvalue\n");
        assert!(result.is_err());

        // Last-known-good contents stay live.
        assert_eq!(catalog.len(), 3);
        assert!(catalog.lookup("RELIANCE").is_some());
    }

    // ============= Lookup Tests =============

    #[test]
    fn test_lookup_is_case_insensitive_and_trimmed() {
        let catalog = InstrumentCatalog::new();
        catalog.load_from_csv(SCRIP_CSV).unwrap();

        assert_eq!(
            catalog.lookup("  nifty 31 oct 22000 call  "),
            Some("49081".to_string())
        );
        assert_eq!(catalog.lookup("reliance"), Some("2885".to_string()));
    }

    #[test]
    fn test_lookup_is_exact_no_fuzzy_match() {
        let catalog = InstrumentCatalog::new();
        catalog.load_from_csv(SCRIP_CSV).unwrap();

        assert_eq!(catalog.lookup("NIFTY 31 OCT 22000"), None);
        assert_eq!(catalog.lookup("NIFTY"), None);
    }

    #[test]
    fn test_empty_catalog_misses() {
        let catalog = InstrumentCatalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.lookup("NIFTY 31 OCT 22000 CALL"), None);
    }

    // ============= Swap Tests =============

    #[test]
    fn test_reload_swaps_whole_mapping() {
        let catalog = InstrumentCatalog::new();
        catalog.load_from_csv(SCRIP_CSV).unwrap();

        let csv = "\
DISPLAY_NAME,SECURITY_ID
SENSEX 31 OCT 81000 CALL,871234
";
        catalog.load_from_csv(csv).unwrap();

        // Old rows are gone, not merged.
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.lookup("RELIANCE"), None);
        assert_eq!(
            catalog.lookup("SENSEX 31 OCT 81000 CALL"),
            Some("871234".to_string())
        );
    }

    #[test]
    fn test_snapshot_is_isolated_from_reload() {
        let catalog = InstrumentCatalog::new();
        catalog.load_from_csv(SCRIP_CSV).unwrap();

        let snapshot = catalog.snapshot();
        catalog
            .load_from_csv("DISPLAY_NAME,SECURITY_ID\nNEW,1\n")
            .unwrap();

        // A reader holding the old snapshot keeps seeing the old map.
        assert_eq!(snapshot.len(), 3);
        assert!(snapshot.contains_key(&normalize_name("RELIANCE")));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  nifty 50  "), "NIFTY 50");
        assert_eq!(normalize_name("Reliance"), "RELIANCE");
    }
}
