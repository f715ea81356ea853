// Raffle DApp - Unit conversion
use alloy_primitives::U256;

/// Decimals of the native token (1 ETH = 10^18 wei)
pub const ETHER_DECIMALS: u8 = 18;

/// Render a wei amount as ETH, e.g. 10^16 -> "0.01"
pub fn wei_to_ether(wei: U256) -> String {
    format_units(wei, ETHER_DECIMALS)
}

/// Exact decimal rendering of `amount / 10^decimals` without trailing zeros
pub fn format_units(amount: U256, decimals: u8) -> String {
    let scale = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / scale;
    let fraction = amount % scale;

    if fraction.is_zero() {
        return whole.to_string();
    }

    let digits = fraction.to_string();
    let padded = format!("{:0>width$}", digits, width = decimals as usize);
    format!("{}.{}", whole, padded.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_fractional_ether() {
        assert_eq!(wei_to_ether(U256::from(10_000_000_000_000_000u64)), "0.01");
        assert_eq!(wei_to_ether(U256::from(1_500_000_000_000_000_000u64)), "1.5");
        assert_eq!(wei_to_ether(U256::from(1u64)), "0.000000000000000001");
    }

    #[test]
    fn formats_whole_ether() {
        assert_eq!(wei_to_ether(U256::ZERO), "0");
        assert_eq!(wei_to_ether(U256::from(2_000_000_000_000_000_000u64)), "2");
    }

    #[test]
    fn formats_other_decimals() {
        assert_eq!(format_units(U256::from(1_234_500u64), 6), "1.2345");
        assert_eq!(format_units(U256::from(42u64), 0), "42");
        assert_eq!(format_units(U256::from(5u64), 3), "0.005");
    }

    #[test]
    fn display_matches_fee() {
        for (wei, display) in [
            (0u64, "0"),
            (999, "0.000000000000000999"),
            (10_000_000_000_000_000, "0.01"),
            (123_456_789_000_000_000, "0.123456789"),
            (7_000_000_000_000_000_000, "7"),
        ] {
            let rendered = wei_to_ether(U256::from(wei));
            assert_eq!(rendered, display);
            assert!(!rendered.ends_with('0') || !rendered.contains('.'));
        }
    }
}
