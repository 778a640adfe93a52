//! Multiple-choice option generation.
//!
//! Decoys come from a fixed, domain-agnostic pool of stock phrases; they are
//! deliberately unrelated to the prompt's subject matter. That is a known
//! quality limitation of the game, kept as-is.

use rand::seq::SliceRandom;
use rand::Rng;

/// One candidate answer shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    pub text: String,
    pub is_correct: bool,
}

/// The built-in decoy pool.
const DECOY_POOL: [&str; 8] = [
    "Syntax Error",
    "Off-by-one error",
    "Check the API limits",
    "Clear the cache",
    "It works on my machine",
    "Race condition",
    "Floating point inaccuracy",
    "Segmentation fault",
];

/// Build the option set for one prompt: the prompt itself as the single
/// correct option plus up to three decoys drawn from the shuffled pool.
///
/// A decoy equal to the correct prompt (ignoring case) is never selected,
/// and no two options share case-insensitive-equal text. When the pool
/// cannot supply three unique decoys the set is simply smaller; this never
/// fails. The final list is shuffled again so the correct answer's position
/// is uniform among the returned set.
pub fn generate_options<R: Rng>(prompt: &str, rng: &mut R) -> Vec<AnswerOption> {
    let mut options = vec![AnswerOption {
        text: prompt.to_string(),
        is_correct: true,
    }];

    let mut pool: Vec<&str> = DECOY_POOL.to_vec();
    pool.shuffle(rng);

    for decoy in pool {
        if options.len() >= 4 {
            break;
        }
        let duplicate = options
            .iter()
            .any(|opt| opt.text.to_lowercase() == decoy.to_lowercase());
        if duplicate {
            continue;
        }
        options.push(AnswerOption {
            text: decoy.to_string(),
            is_correct: false,
        });
    }

    options.shuffle(rng);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn exactly_one_correct_option_matching_prompt() {
        let mut rng = StdRng::seed_from_u64(1);
        let opts = generate_options("Water is H2O", &mut rng);
        let correct: Vec<_> = opts.iter().filter(|o| o.is_correct).collect();
        assert_eq!(correct.len(), 1);
        assert_eq!(correct[0].text, "Water is H2O");
    }

    #[test]
    fn four_options_for_an_ordinary_prompt() {
        let mut rng = StdRng::seed_from_u64(2);
        let opts = generate_options("What is the capital of France", &mut rng);
        assert_eq!(opts.len(), 4);
    }

    #[test]
    fn no_case_insensitive_duplicates() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let opts = generate_options("race CONDITION", &mut rng);
            let mut seen: Vec<String> = Vec::new();
            for opt in &opts {
                let lower = opt.text.to_lowercase();
                assert!(!seen.contains(&lower), "duplicate option {:?}", opt.text);
                seen.push(lower);
            }
        }
    }

    #[test]
    fn decoy_equal_to_prompt_is_excluded() {
        // Prompt collides with a pool entry; the pool has spares, so the set
        // is still full but the colliding decoy never appears twice.
        let mut rng = StdRng::seed_from_u64(3);
        let opts = generate_options("segmentation fault", &mut rng);
        assert_eq!(opts.len(), 4);
        let matches: Vec<_> = opts
            .iter()
            .filter(|o| o.text.eq_ignore_ascii_case("segmentation fault"))
            .collect();
        assert_eq!(matches.len(), 1);
        assert!(matches[0].is_correct);
    }

    #[test]
    fn seeded_rng_reproduces_the_same_set() {
        let a = generate_options(
            "DNA stands for deoxyribonucleic acid",
            &mut StdRng::seed_from_u64(9),
        );
        let b = generate_options(
            "DNA stands for deoxyribonucleic acid",
            &mut StdRng::seed_from_u64(9),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn correct_position_varies_across_seeds() {
        let mut positions = std::collections::HashSet::new();
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let opts = generate_options("The Earth revolves around the sun", &mut rng);
            positions.insert(opts.iter().position(|o| o.is_correct).unwrap());
        }
        assert!(positions.len() > 1, "correct answer stuck in one slot");
    }
}
