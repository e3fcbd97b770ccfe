//! Delimiter detection from a text sample.
//!
//! Each candidate splits every line literally (quotes are ignored) and the
//! resulting part counts are scored for consistency. A candidate that gives
//! the same count on every line is "stable" and always beats an unstable
//! one. Among equally stable candidates the higher score wins, and on equal
//! scores the earlier candidate in the list wins.

use tracing::{debug, trace};

/// ASCII record separator (0x1E).
pub const RECORD_SEPARATOR: char = '\u{1e}';

/// ASCII unit separator (0x1F).
pub const UNIT_SEPARATOR: char = '\u{1f}';

/// Candidate delimiters in tie-break order.
pub const DEFAULT_DELIMITERS: [char; 6] = [',', '\t', '|', ';', RECORD_SEPARATOR, UNIT_SEPARATOR];

/// Consistency score of one candidate delimiter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DelimiterScore {
    /// Every line split into the same number of parts.
    pub stable: bool,
    /// Longest run of equal part counts, multiplied by the part count when
    /// stable.
    pub score: usize,
}

impl DelimiterScore {
    /// Scores a list of per-line part counts.
    ///
    /// An empty list scores `{ stable: false, score: 0 }`.
    pub fn from_counts(counts: &[usize]) -> Self {
        let mut sorted = counts.to_vec();
        sorted.sort_unstable();

        let Some((&first, rest)) = sorted.split_first() else {
            return Self::default();
        };

        let mut stable = true;
        let mut current = first;
        let mut run = 1usize;
        let mut max_run = 0usize;

        for &count in rest {
            if count == current {
                run += 1;
            } else {
                stable = false;
                max_run = max_run.max(run);
                current = count;
                run = 1;
            }
        }
        max_run = max_run.max(run);

        let score = if stable { max_run * current } else { max_run };
        Self { stable, score }
    }

    /// Returns true if this score should replace `best`.
    fn beats(&self, best: &DelimiterScore) -> bool {
        (self.stable && !best.stable) || (self.stable == best.stable && self.score > best.score)
    }
}

/// Counts the parts each line splits into for `delimiter`.
pub fn part_counts(sample: &str, delimiter: char) -> Vec<usize> {
    sample
        .lines()
        .map(|line| line.split(delimiter).count())
        .collect()
}

/// Scores a single candidate against the sample.
pub fn score_delimiter(sample: &str, delimiter: char) -> DelimiterScore {
    DelimiterScore::from_counts(&part_counts(sample, delimiter))
}

/// Picks the most consistent delimiter from [`DEFAULT_DELIMITERS`].
///
/// Never fails: with no signal at all (an empty sample or a single line
/// without any candidate) the first candidate, `,`, is returned.
pub fn detect_delimiter(sample: &str) -> char {
    detect_delimiter_with(sample, &DEFAULT_DELIMITERS).unwrap_or(DEFAULT_DELIMITERS[0])
}

/// Picks the most consistent delimiter from `candidates`.
///
/// Returns `None` only when `candidates` is empty.
pub fn detect_delimiter_with(sample: &str, candidates: &[char]) -> Option<char> {
    let mut best: Option<(char, DelimiterScore)> = None;

    for &candidate in candidates {
        let score = score_delimiter(sample, candidate);
        trace!(
            delimiter = ?candidate,
            stable = score.stable,
            score = score.score,
            "scored delimiter candidate"
        );

        match best {
            Some((_, ref best_score)) if !score.beats(best_score) => {}
            _ => best = Some((candidate, score)),
        }
    }

    if let Some((delimiter, score)) = best {
        debug!(
            delimiter = ?delimiter,
            stable = score.stable,
            score = score.score,
            "detected delimiter"
        );
    }
    best.map(|(delimiter, _)| delimiter)
}
