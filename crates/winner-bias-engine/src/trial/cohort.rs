use super::{Selection, Subject};

/// All subjects of one simulated trial.
#[derive(Debug, Clone, PartialEq)]
pub struct Cohort {
    subjects: Vec<Subject>,
}

/// Column-wise view of the selections of a whole cohort, one entry per subject.
///
/// This is the shape the hypothesis tests consume: each test pairs two of
/// these columns subject by subject.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CohortSelection {
    pub winner_response: Vec<f64>,
    pub loser_mean_naive: Vec<f64>,
    pub loser_mean_confirmatory: Vec<f64>,
    pub confirmatory_winner: Vec<f64>,
}

impl Cohort {
    #[must_use]
    pub fn from_subjects(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }

    /// Applies [`Subject::select`] to every subject.
    #[must_use]
    pub fn select(&self) -> CohortSelection {
        let mut columns = CohortSelection::with_capacity(self.subjects.len());
        for selection in self.subjects.iter().map(Subject::select) {
            columns.push(&selection);
        }
        columns
    }
}

impl CohortSelection {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            winner_response: Vec::with_capacity(capacity),
            loser_mean_naive: Vec::with_capacity(capacity),
            loser_mean_confirmatory: Vec::with_capacity(capacity),
            confirmatory_winner: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, selection: &Selection) {
        self.winner_response.push(selection.winner_response);
        self.loser_mean_naive.push(selection.loser_mean_naive);
        self.loser_mean_confirmatory
            .push(selection.loser_mean_confirmatory);
        self.confirmatory_winner.push(selection.confirmatory_winner);
    }
}
