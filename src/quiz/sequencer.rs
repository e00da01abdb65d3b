//! Builds the ordered working set and per-question option order.

use std::rc::Rc;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::{Mode, Question, QuestionKind, Settings};

pub fn working_set<R: Rng + ?Sized>(
    pool: &[Rc<Question>],
    mode: Mode,
    settings: Settings,
    exam_size: usize,
    rng: &mut R,
) -> Vec<Rc<Question>> {
    let mut questions = pool.to_vec();

    match mode {
        Mode::Study => {}
        Mode::Practice => {
            if settings.shuffle_questions {
                questions.shuffle(rng);
            }
        }
        Mode::Exam => {
            if settings.shuffle_questions {
                questions.shuffle(rng);
            }
            questions.truncate(exam_size);
        }
    }

    questions
}

/// Display order of a question's choices as indices into its options.
pub fn option_order<R: Rng + ?Sized>(question: &Question, shuffle: bool, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..question.choice_count()).collect();
    if shuffle && matches!(question.kind, QuestionKind::MultipleChoice { .. }) {
        order.shuffle(rng);
    }
    order
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::models::fixtures::{multiple_choice, true_false};

    fn pool(len: usize) -> Vec<Rc<Question>> {
        (0..len)
            .map(|i| Rc::new(true_false(&format!("{:05}", 20000 + i), i % 2 == 0)))
            .collect()
    }

    fn numbers(set: &[Rc<Question>]) -> Vec<String> {
        set.iter().map(|q| q.id.number.clone()).collect()
    }

    const NO_SHUFFLE: Settings = Settings {
        shuffle_questions: false,
        shuffle_options: false,
    };

    #[test]
    fn test_practice_keeps_bank_order_without_shuffle() {
        let pool = pool(10);
        let mut rng = StdRng::seed_from_u64(1);
        let set = working_set(&pool, Mode::Practice, NO_SHUFFLE, 60, &mut rng);
        assert_eq!(numbers(&set), numbers(&pool));
    }

    #[test]
    fn test_practice_shuffle_is_a_permutation() {
        let pool = pool(50);
        let mut rng = StdRng::seed_from_u64(7);
        let set = working_set(&pool, Mode::Practice, Settings::default(), 60, &mut rng);

        let mut shuffled = numbers(&set);
        assert_ne!(shuffled, numbers(&pool));
        shuffled.sort();
        assert_eq!(shuffled, numbers(&pool));
    }

    #[test]
    fn test_exam_size_is_min_of_sample_and_pool() {
        let mut rng = StdRng::seed_from_u64(3);
        for len in [0, 1, 59, 60, 61, 245] {
            let pool = pool(len);
            for settings in [NO_SHUFFLE, Settings::default()] {
                let set = working_set(&pool, Mode::Exam, settings, 60, &mut rng);
                assert_eq!(set.len(), len.min(60));
            }
        }
    }

    #[test]
    fn test_exam_without_shuffle_takes_prefix() {
        let pool = pool(100);
        let mut rng = StdRng::seed_from_u64(3);
        let set = working_set(&pool, Mode::Exam, NO_SHUFFLE, 60, &mut rng);
        assert_eq!(numbers(&set), numbers(&pool[..60]));
    }

    #[test]
    fn test_study_ignores_settings() {
        let pool = pool(30);
        let mut rng = StdRng::seed_from_u64(11);
        let set = working_set(&pool, Mode::Study, Settings::default(), 60, &mut rng);
        assert_eq!(numbers(&set), numbers(&pool));
    }

    #[test]
    fn test_option_order() {
        let mut rng = StdRng::seed_from_u64(5);
        let mc = multiple_choice("01001", "ABCDEF", "A");

        assert_eq!(option_order(&mc, false, &mut rng), vec![0, 1, 2, 3, 4, 5]);

        let mut shuffled = option_order(&mc, true, &mut rng);
        shuffled.sort();
        assert_eq!(shuffled, vec![0, 1, 2, 3, 4, 5]);

        let tf = true_false("20001", true);
        assert_eq!(option_order(&tf, true, &mut rng), vec![0, 1]);
    }
}
