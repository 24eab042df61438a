/// Number of periods each subject goes through.
pub const PERIOD_COUNT: usize = 8;
/// Number of leading periods the winner is selected from.
pub const SELECTION_PERIODS: usize = 4;

const CONFIRMATORY_WINNER: usize = SELECTION_PERIODS;
const CONFIRMATORY_LOSERS: std::ops::Range<usize> = (CONFIRMATORY_WINNER + 1)..PERIOD_COUNT;

/// One simulated participant: responses `y1..y8` in period order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subject {
    pub periods: [f64; PERIOD_COUNT],
}

/// Quantities derived from one subject by the winner/loser selection rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    /// Index (0-based) of the winning selection period.
    pub winner_period: usize,
    /// `max(y1, y2, y3, y4)`.
    pub winner_response: f64,
    /// Mean of the three non-winning selection periods.
    pub loser_mean_naive: f64,
    /// `mean(y6, y7, y8)`.
    pub loser_mean_confirmatory: f64,
    /// `y5`, the winner re-measured in an independent period.
    pub confirmatory_winner: f64,
}

impl Subject {
    #[must_use]
    pub const fn new(periods: [f64; PERIOD_COUNT]) -> Self {
        Self { periods }
    }

    #[must_use]
    pub fn selection_periods(&self) -> &[f64] {
        &self.periods[..SELECTION_PERIODS]
    }

    #[must_use]
    pub fn confirmatory_winner(&self) -> f64 {
        self.periods[CONFIRMATORY_WINNER]
    }

    #[must_use]
    pub fn confirmatory_losers(&self) -> &[f64] {
        &self.periods[CONFIRMATORY_LOSERS]
    }

    /// Applies the winner/loser selection rule.
    ///
    /// Ties for the maximum go to the earliest period.
    ///
    /// # Examples
    ///
    /// ```
    /// use winner_bias_engine::trial::Subject;
    ///
    /// let subject = Subject::new([0.1, 0.9, -0.4, 0.3, 0.5, 0.2, -0.2, 0.6]);
    /// let selection = subject.select();
    /// assert_eq!(selection.winner_period, 1);
    /// assert_eq!(selection.winner_response, 0.9);
    /// assert!((selection.loser_mean_naive - 0.0).abs() < 1e-12);
    /// assert!((selection.loser_mean_confirmatory - 0.2).abs() < 1e-12);
    /// assert_eq!(selection.confirmatory_winner, 0.5);
    /// ```
    #[must_use]
    pub fn select(&self) -> Selection {
        let selection = self.selection_periods();
        let mut winner_period = 0;
        for (i, &value) in selection.iter().enumerate().skip(1) {
            if value > selection[winner_period] {
                winner_period = i;
            }
        }
        let winner_response = selection[winner_period];
        let selection_sum = selection.iter().sum::<f64>();
        let losers = self.confirmatory_losers();

        Selection {
            winner_period,
            winner_response,
            loser_mean_naive: (selection_sum - winner_response) / 3.0,
            loser_mean_confirmatory: losers.iter().sum::<f64>() / 3.0,
            confirmatory_winner: self.confirmatory_winner(),
        }
    }
}
