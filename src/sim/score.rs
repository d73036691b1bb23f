//! Score, milestones and the displayed high score

/// Points between milestones
pub const MILESTONE_STEP: u64 = 100;
/// Score units the text stays highlighted after a milestone
pub const HIGHLIGHT_SPAN: u64 = 10;

/// Zero-pad to five digits; larger values pass through as-is
pub fn format_score(score: u64) -> String {
    if score >= 100_000 {
        score.to_string()
    } else {
        format!("{score:05}")
    }
}

/// Running score for one play-through
#[derive(Debug, Clone, Default)]
pub struct Score {
    /// Elapsed deciseconds plus kill bonus
    pub current: u64,
    /// High score as read when this play-through began
    pub high_score: u64,
    /// Last multiple of 100 crossed
    pub milestone: u64,
    /// Cue already played for the exact multiple we're sitting on
    cue_played: bool,
}

impl Score {
    pub fn new(high_score: u64) -> Self {
        Self {
            high_score,
            ..Default::default()
        }
    }

    /// Recompute the score. Returns true exactly once per milestone crossed.
    pub fn update(&mut self, deciseconds: u64, bonus: u64) -> bool {
        self.current = deciseconds + bonus;

        if !self.current.is_multiple_of(MILESTONE_STEP) {
            self.cue_played = false;
        }

        if self.current >= self.milestone + MILESTONE_STEP && !self.cue_played {
            self.milestone = self.current / MILESTONE_STEP * MILESTONE_STEP;
            self.cue_played = self.current.is_multiple_of(MILESTONE_STEP);
            return true;
        }
        false
    }

    /// Within the highlight window right after a milestone
    pub fn highlighted(&self) -> bool {
        self.milestone > 0 && self.current < self.milestone + HIGHLIGHT_SPAN
    }

    /// `HI <high> <score>`
    pub fn text(&self) -> String {
        format!(
            "HI {} {}",
            format_score(self.high_score),
            format_score(self.current)
        )
    }

    /// End of a play-through: returns the new high score if this run beat it
    pub fn finish_run(&mut self) -> Option<u64> {
        if self.current > self.high_score {
            self.high_score = self.current;
            Some(self.current)
        } else {
            None
        }
    }

    /// Fresh play-through, keeping the high score
    pub fn reset(&mut self) {
        *self = Self::new(self.high_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_examples() {
        assert_eq!(format_score(0), "00000");
        assert_eq!(format_score(7), "00007");
        assert_eq!(format_score(100), "00100");
        assert_eq!(format_score(99_999), "99999");
        assert_eq!(format_score(123_456), "123456");
    }

    #[test]
    fn test_milestone_fires_once_per_hundred() {
        let mut score = Score::new(0);
        let mut fired = Vec::new();
        // Each decisecond is seen on several consecutive ticks
        for deci in 0..=350 {
            for _ in 0..6 {
                if score.update(deci, 0) {
                    fired.push(deci);
                }
            }
        }
        assert_eq!(fired, vec![100, 200, 300]);
    }

    #[test]
    fn test_zero_is_not_a_milestone() {
        let mut score = Score::new(0);
        assert!(!score.update(0, 0));
        assert!(!score.highlighted());
    }

    #[test]
    fn test_bonus_jumping_over_multiple_still_fires() {
        let mut score = Score::new(0);
        assert!(!score.update(96, 0));
        assert!(score.update(97, 8)); // 105
        assert_eq!(score.milestone, 100);
        assert!(!score.update(98, 8));
    }

    #[test]
    fn test_highlight_window_is_ten_points() {
        let mut score = Score::new(0);
        let lit: Vec<u64> = (90..130)
            .filter(|&s| {
                score.update(s, 0);
                score.highlighted()
            })
            .collect();
        assert_eq!(lit, (100..110).collect::<Vec<_>>());
    }

    #[test]
    fn test_text_uses_starting_high_score() {
        let mut score = Score::new(0);
        score.update(100, 0);
        assert_eq!(score.text(), "HI 00000 00100");
        assert_eq!(score.finish_run(), Some(100));
        assert_eq!(score.high_score, 100);
        score.reset();
        assert_eq!(score.text(), "HI 00100 00000");
        score.update(50, 0);
        assert_eq!(score.finish_run(), None);
    }

    proptest! {
        #[test]
        fn prop_format_is_five_digits(s in 0u64..100_000) {
            let text = format_score(s);
            prop_assert_eq!(text.len(), 5);
            prop_assert!(text.bytes().all(|b| b.is_ascii_digit()));
            prop_assert_eq!(text.parse::<u64>().unwrap(), s);
        }

        #[test]
        fn prop_high_score_never_decreases(runs in proptest::collection::vec(0u64..5000, 1..20)) {
            let mut score = Score::new(0);
            let mut prev = 0;
            for &r in &runs {
                score.update(r, 0);
                score.finish_run();
                prop_assert!(score.high_score >= prev);
                prev = score.high_score;
                score.reset();
            }
            prop_assert_eq!(score.high_score, *runs.iter().max().unwrap());
        }
    }
}
