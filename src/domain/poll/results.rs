//! Derived vote tallies.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::OptionId;

/// Vote count for one option, computed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionTally {
    pub option_id: OptionId,
    pub option_text: String,
    pub vote_count: u64,
}

/// Sum of all tallies.
pub fn total_votes(tallies: &[OptionTally]) -> u64 {
    tallies.iter().map(|t| t.vote_count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_votes_sums_counts() {
        let tallies = vec![
            OptionTally {
                option_id: OptionId::new(),
                option_text: "JS".to_string(),
                vote_count: 3,
            },
            OptionTally {
                option_id: OptionId::new(),
                option_text: "Python".to_string(),
                vote_count: 0,
            },
        ];
        assert_eq!(total_votes(&tallies), 3);
        assert_eq!(total_votes(&[]), 0);
    }
}
