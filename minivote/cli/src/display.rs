use {
    chrono::{DateTime, Utc},
    colored::{Color, Colorize},
    minivote_types::{
        format_deadline, format_vote_weight, shorten_address, Proposal, ProposalStatus,
    },
};

const BAR_WIDTH: usize = 24;
const DESCRIPTION_CLAMP: usize = 160;

pub fn status_color(status: ProposalStatus) -> Color {
    match status {
        ProposalStatus::Active => Color::Cyan,
        ProposalStatus::Passed => Color::Green,
        ProposalStatus::Failed => Color::Red,
        ProposalStatus::Finalized => Color::BrightBlack,
    }
}

/// One proposal as a terminal card: title and status on top, vote bars with
/// their two-decimal shares, the deadline phrase at the bottom.
pub fn render_card(proposal: &Proposal, now: DateTime<Utc>) -> String {
    let status = proposal.status(now);
    let (yes_pct, no_pct) = proposal.vote_split();

    let mut card = String::new();
    card.push_str(&format!(
        "#{} {} {}\n",
        proposal.id,
        proposal.title.bold(),
        format!("[{status}]").color(status_color(status)),
    ));
    card.push_str(&format!(
        "   proposed by {}\n",
        shorten_address(&proposal.proposer),
    ));
    if !proposal.description.is_empty() {
        card.push_str(&format!(
            "   {}\n",
            clamp(&proposal.description, DESCRIPTION_CLAMP).dimmed(),
        ));
    }
    card.push_str(&format!(
        "   {} {} {:>6.2}% ({})\n",
        "Yes".green(),
        bar(yes_pct).green(),
        yes_pct,
        format_vote_weight(proposal.yes_votes),
    ));
    card.push_str(&format!(
        "   {}  {} {:>6.2}% ({})\n",
        "No".red(),
        bar(no_pct).red(),
        no_pct,
        format_vote_weight(proposal.no_votes),
    ));
    card.push_str(&format!(
        "   {}\n",
        format_deadline(proposal.deadline, now).dimmed(),
    ));

    card
}

fn bar(pct: f64) -> String {
    let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;

    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn clamp(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let clipped: String = text.chars().take(max_chars).collect();

    format!("{clipped}...")
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::primitives::{Address, U256},
    };

    fn proposal() -> Proposal {
        Proposal {
            id: 2,
            title: "fund the grants program".to_string(),
            description: "allocate 100 tokens to grants".to_string(),
            yes_votes: U256::from(3_000_000_000_000_000_000u64),
            no_votes: U256::from(1_000_000_000_000_000_000u64),
            deadline: DateTime::from_timestamp(1_754_000_000, 0).unwrap(),
            executed: false,
            passed: false,
            proposer: Address::repeat_byte(7),
        }
    }

    #[test]
    fn cards_carry_the_essentials() {
        let now = DateTime::from_timestamp(1_753_000_000, 0).unwrap();
        let card = render_card(&proposal(), now);

        assert!(card.contains("#2"));
        assert!(card.contains("fund the grants program"));
        assert!(card.contains("Active"));
        assert!(card.contains("75.00%"));
        assert!(card.contains("25.00%"));
        assert!(card.contains("3.00"));
    }

    #[test]
    fn bars_span_the_full_range() {
        assert_eq!(bar(0.0), "░".repeat(BAR_WIDTH));
        assert_eq!(bar(100.0), "█".repeat(BAR_WIDTH));
    }

    #[test]
    fn long_descriptions_are_clamped() {
        let text = "x".repeat(500);

        assert_eq!(clamp(&text, 10), format!("{}...", "x".repeat(10)));
        assert_eq!(clamp("short", 10), "short");
    }
}
