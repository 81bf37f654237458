//! Simulates physical damage by eroding a percentage of characters.
//!
//! Eligible characters are every character that is not a separator (whitespace, `·`),
//! not already lost (`-`, `…`), and not part of a rendered [Placeholder].
//! After erosion, a single whitespace between two erosion markers is dropped (`- -` -> `--`).
use rand::seq::index;
use rand::Rng;

use crate::error::Error;
use crate::masking::Placeholder;

use super::Transform;

/// Character used for eroded positions.
pub const EROSION_MARKER: char = '-';

const SKIPPED: [char; 3] = ['-', '…', '·'];

#[derive(Debug, Clone)]
pub struct Corruption {
    percentage: f64,
    placeholder: Placeholder,
}

impl Corruption {
    /// `percentage` has to be in `[0, 100)`.
    pub fn new(percentage: f64, placeholder: Placeholder) -> Result<Self, Error> {
        if !(0.0..100.0).contains(&percentage) {
            return Err(Error::Config(format!(
                "corruption percentage must be in [0, 100), got {}",
                percentage
            )));
        }

        Ok(Self {
            percentage,
            placeholder,
        })
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// char indices that may be eroded.
    pub fn eligible(&self, text: &str) -> Vec<usize> {
        let protected = self.placeholder.find_all(text);

        text.char_indices()
            .enumerate()
            .filter(|(_, (byte_idx, c))| {
                !c.is_whitespace()
                    && !SKIPPED.contains(c)
                    && !protected.iter().any(|range| range.contains(byte_idx))
            })
            .map(|(char_idx, _)| char_idx)
            .collect()
    }

    /// Number of characters eroded out of `nb_eligible`.
    pub fn amount(&self, nb_eligible: usize) -> usize {
        (nb_eligible as f64 * self.percentage / 100.0).floor() as usize
    }
}

impl Transform for Corruption {
    fn transform<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String {
        let eligible = self.eligible(text);
        let amount = self.amount(eligible.len());
        let mut chars: Vec<char> = text.chars().collect();

        for picked in index::sample(rng, eligible.len(), amount) {
            chars[eligible[picked]] = EROSION_MARKER;
        }

        join_erosions(&chars)
    }
}

/// Drop single whitespaces sitting between two erosion markers.
fn join_erosions(chars: &[char]) -> String {
    chars
        .iter()
        .enumerate()
        .filter(|&(idx, c)| {
            let between_markers = idx > 0
                && idx + 1 < chars.len()
                && chars[idx - 1] == EROSION_MARKER
                && chars[idx + 1] == EROSION_MARKER;
            !(c.is_whitespace() && between_markers)
        })
        .map(|(_, c)| c)
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn corruption(percentage: f64) -> Corruption {
        Corruption::new(percentage, Placeholder::default()).unwrap()
    }

    #[test]
    fn invalid_percentages() {
        assert!(Corruption::new(100.0, Placeholder::default()).is_err());
        assert!(Corruption::new(-1.0, Placeholder::default()).is_err());
        assert!(Corruption::new(f64::NAN, Placeholder::default()).is_err());
    }

    #[test]
    fn zero_is_identity() {
        let mut rng = StdRng::seed_from_u64(0);
        let text = "αβγ - δε· ζ[3 letters missing]η";
        assert_eq!(corruption(0.0).transform(text, &mut rng), text);
    }

    #[test]
    fn eligibility() {
        let c = corruption(10.0);
        let text = "α- β·[2 letters missing]γ";
        // α, β, γ
        assert_eq!(c.eligible(text), vec![0, 3, 24]);
    }

    #[test]
    fn exact_amount() {
        let mut rng = StdRng::seed_from_u64(5);
        let c = corruption(25.0);
        // 40 eligible letters
        let text = "αβγδεζηθικ λμνξοπρστυ αβγδεζηθικ λμνξοπρστυ [7 letters missing]";
        assert_eq!(c.eligible(text).len(), 40);

        for _ in 0..50 {
            let corrupted = c.transform(text, &mut rng);
            assert_eq!(corrupted.matches(EROSION_MARKER).count(), 10);
            assert!(corrupted.ends_with("[7 letters missing]"));
        }
    }

    #[test]
    fn join() {
        let chars: Vec<char> = "α- - -β - γ".chars().collect();
        assert_eq!(join_erosions(&chars), "α---β - γ");
    }
}
