use {
    alloy_primitives::{Address, U256},
    chrono::{DateTime, TimeDelta, Utc},
};

/// `0x5FbD...0aa3`: the leading six and trailing four characters of the hex
/// form, as wallet UIs render addresses.
pub fn shorten_address(address: &Address) -> String {
    let hex = address.to_string();

    format!("{}...{}", &hex[..6], &hex[hex.len() - 4..])
}

const WEI_PER_TOKEN: u64 = 1_000_000_000_000_000_000;

/// A wei-scale vote weight as whole tokens with two decimal places, floored.
/// Integer arithmetic throughout; tallies can exceed what an `f64` represents
/// exactly.
pub fn format_vote_weight(wei: U256) -> String {
    let unit = U256::from(WEI_PER_TOKEN);
    let whole = wei / unit;
    let hundredths = wei % unit / U256::from(WEI_PER_TOKEN / 100);

    format!("{whole}.{:02}", hundredths.saturating_to::<u64>())
}

/// Human phrasing for a deadline relative to `now`: a closed vote names the
/// date it ended, an open one counts down in the largest sensible unit.
pub fn format_deadline(deadline: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if deadline <= now {
        format!("Voting ended on {}", deadline.format("%b %-d, %Y"))
    } else {
        format!("Ends in {}", humanize(deadline - now))
    }
}

fn humanize(remaining: TimeDelta) -> String {
    let days = remaining.num_days();
    if days >= 1 {
        return pluralize(days, "day");
    }

    let hours = remaining.num_hours();
    if hours >= 1 {
        return pluralize(hours, "hour");
    }

    pluralize(remaining.num_minutes().max(1), "minute")
}

fn pluralize(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Display names for the chain ids a wallet is commonly pointed at.
pub fn network_name(chain_id: u64) -> &'static str {
    match chain_id {
        1 => "Ethereum Mainnet",
        5 => "Goerli Testnet",
        11_155_111 => "Sepolia Testnet",
        137 => "Polygon Mainnet",
        80_001 => "Mumbai Testnet",
        42_161 => "Arbitrum One",
        421_613 => "Arbitrum Goerli",
        _ => "Unknown Network",
    }
}

// ----------------------------------- tests -----------------------------------
