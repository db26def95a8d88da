//! Tests for routing derivation.

use super::*;

mod select {
    use super::*;

    const FIRST: &str = "192.168.1.5/24";
    const SECOND: &str = "192.168.1.9/24";

    #[test]
    fn previous_first_selects_second() {
        assert_eq!(select_new_address(Some(FIRST), FIRST, SECOND), SECOND);
    }

    #[test]
    fn previous_second_selects_first() {
        assert_eq!(select_new_address(Some(SECOND), FIRST, SECOND), FIRST);
    }

    #[test]
    fn unknown_previous_falls_back_to_second() {
        assert_eq!(
            select_new_address(Some("10.0.0.1/8"), FIRST, SECOND),
            SECOND
        );
    }

    #[test]
    fn absent_previous_falls_back_to_second() {
        assert_eq!(select_new_address(None, FIRST, SECOND), SECOND);
    }

    #[test]
    fn known_address_detection() {
        assert!(is_known_address(Some(FIRST), FIRST, SECOND));
        assert!(is_known_address(Some(SECOND), FIRST, SECOND));
        assert!(!is_known_address(Some("10.0.0.1/8"), FIRST, SECOND));
        assert!(!is_known_address(None, FIRST, SECOND));
    }
}

mod gateway {
    use super::*;

    #[test]
    fn replaces_last_octet() {
        assert_eq!(
            derive_gateway("192.168.11.100/24").unwrap(),
            Ipv4Addr::new(192, 168, 11, 1)
        );
    }

    #[test]
    fn address_ending_in_one_is_its_own_gateway() {
        assert_eq!(derive_gateway("10.0.0.1/8").unwrap().to_string(), "10.0.0.1");
    }

    #[test]
    fn leading_zeros_are_normalized() {
        assert_eq!(
            derive_gateway("192.168.013.100/24").unwrap().to_string(),
            "192.168.13.1"
        );
        assert_eq!(derive_table_id("192.168.013.100/24").unwrap(), 113);
    }

    #[test]
    fn missing_mask_is_accepted() {
        assert_eq!(
            derive_gateway("172.16.4.20").unwrap().to_string(),
            "172.16.4.1"
        );
    }

    #[test]
    fn three_octets_is_error() {
        assert_eq!(
            derive_gateway("192.168.11/24"),
            Err(DerivationError::OctetCount {
                address: "192.168.11/24".to_string(),
                count: 3,
            })
        );
    }

    #[test]
    fn five_octets_is_error() {
        assert!(matches!(
            derive_gateway("1.2.3.4.5/24"),
            Err(DerivationError::OctetCount { count: 5, .. })
        ));
    }

    #[test]
    fn non_numeric_octet_is_error() {
        assert_eq!(
            derive_gateway("192.x.11.100/24"),
            Err(DerivationError::InvalidOctet {
                address: "192.x.11.100/24".to_string(),
                octet: "x".to_string(),
            })
        );
    }
}

mod table {
    use super::*;

    #[test]
    fn adds_base_to_third_octet() {
        assert_eq!(derive_table_id("192.168.13.100/24").unwrap(), 113);
    }

    #[test]
    fn zero_octet_gives_base() {
        assert_eq!(derive_table_id("192.168.0.5/24").unwrap(), 100);
    }

    #[test]
    fn max_octet_does_not_wrap() {
        assert_eq!(derive_table_id("192.168.255.5/24").unwrap(), 355);
    }

    #[test]
    fn out_of_range_octet_is_error() {
        assert!(matches!(
            derive_table_id("192.168.256.5/24"),
            Err(DerivationError::InvalidOctet { octet, .. }) if octet == "256"
        ));
    }

    #[test]
    fn signed_octet_is_error() {
        assert!(matches!(
            derive_table_id("192.168.+3.5/24"),
            Err(DerivationError::InvalidOctet { .. })
        ));
    }

    #[test]
    fn empty_octet_is_error() {
        assert!(matches!(
            derive_table_id("192.168..5/24"),
            Err(DerivationError::InvalidOctet { .. })
        ));
    }
}

mod routing {
    use super::*;

    #[test]
    fn from_address_combines_all_values() {
        let routing = DerivedRouting::from_address("192.168.11.100/24").unwrap();

        assert_eq!(routing.address, "192.168.11.100/24");
        assert_eq!(routing.gateway, Ipv4Addr::new(192, 168, 11, 1));
        assert_eq!(routing.table, 111);
    }

    #[test]
    fn from_address_keeps_mask_verbatim() {
        let routing = DerivedRouting::from_address("10.20.30.40/99").unwrap();

        assert_eq!(routing.address, "10.20.30.40/99");
    }

    #[test]
    fn from_address_propagates_errors() {
        assert!(DerivedRouting::from_address("garbage").is_err());
    }

    #[test]
    fn display_is_readable() {
        let routing = DerivedRouting::from_address("192.168.11.100/24").unwrap();

        assert_eq!(
            routing.to_string(),
            "address 192.168.11.100/24 via 192.168.11.1 table 111"
        );
    }
}
