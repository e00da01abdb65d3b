//! Render models derived from a session. Pure: no state is mutated here.

use crate::models::{Answer, Mode, Module, Question, QuestionKind};
use crate::quiz::scorer;
use crate::quiz::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub label: char,
    pub text: String,
    pub answer: Answer,
    pub selected: bool,
    /// Present only when feedback is due.
    pub correct: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub correct: bool,
    pub expected: String,
}

/// Which navigation actions the current screen offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub previous: bool,
    pub next: bool,
    pub skip: bool,
    pub finish: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub id_label: String,
    pub module: Module,
    pub category: Option<String>,
    pub mode: Mode,
    pub reviewing: bool,
    pub position: usize,
    pub total: usize,
    pub text: String,
    pub options: Vec<OptionView>,
    pub recorded: Option<Answer>,
    pub feedback: Option<Feedback>,
    pub controls: Controls,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyView {
    pub id_label: String,
    pub category: Option<String>,
    pub position: usize,
    pub total: usize,
    pub text: String,
    pub answer_lines: Vec<String>,
    pub controls: Controls,
}

pub fn question_view(session: &Session) -> QuestionView {
    let question = session.current_question();
    let recorded = session.current_answer().copied();
    let feedback_due = session.feedback_due();
    let exam = session.effective_mode() == Mode::Exam;

    let order = session
        .option_order(session.position())
        .map(<[usize]>::to_vec)
        .unwrap_or_else(|| (0..question.choice_count()).collect());

    let options = order
        .into_iter()
        .filter_map(|index| choice(question, index))
        .map(|(label, text, answer, is_correct)| OptionView {
            label,
            text,
            answer,
            selected: recorded == Some(answer),
            correct: feedback_due.then_some(is_correct),
        })
        .collect();

    let feedback = feedback_due.then(|| Feedback {
        correct: scorer::is_correct(question, recorded.as_ref()),
        expected: question.expected_answer_text(),
    });

    QuestionView {
        id_label: question.id.to_string(),
        module: question.id.module,
        category: question.category.clone(),
        mode: session.effective_mode(),
        reviewing: session.is_reviewing(),
        position: session.position() + 1,
        total: session.len(),
        text: question.text.clone(),
        options,
        recorded,
        feedback,
        controls: Controls {
            previous: !session.is_first(),
            next: !exam && !session.is_last(),
            skip: exam && !session.is_last(),
            finish: session.can_finish(),
        },
    }
}

pub fn study_view(session: &Session) -> StudyView {
    let question = session.current_question();

    let answer_lines = match &question.kind {
        QuestionKind::TrueFalse { .. } => vec![question.expected_answer_text()],
        QuestionKind::MultipleChoice { options, .. } => options
            .iter()
            .filter(|option| option.is_correct)
            .map(|option| format!("{}: {}", option.letter, option.text))
            .collect(),
    };

    StudyView {
        id_label: question.id.to_string(),
        category: question.category.clone(),
        position: session.position() + 1,
        total: session.len(),
        text: question.text.clone(),
        answer_lines,
        controls: Controls {
            previous: !session.is_first(),
            next: !session.is_last(),
            ..Controls::default()
        },
    }
}

fn choice(question: &Question, index: usize) -> Option<(char, String, Answer, bool)> {
    match &question.kind {
        QuestionKind::TrueFalse { correct } => {
            let value = match index {
                0 => true,
                1 => false,
                _ => return None,
            };
            let (label, text) = if value { ('T', "True") } else { ('F', "False") };
            Some((label, text.to_string(), Answer::Bool(value), value == *correct))
        }
        QuestionKind::MultipleChoice {
            options,
            correct_answers,
        } => options.get(index).map(|option| {
            (
                option.letter,
                option.text.clone(),
                Answer::Letter(option.letter),
                correct_answers.contains(&option.letter),
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::config::QuizConfig;
    use crate::models::fixtures::{multiple_choice, true_false};
    use crate::models::Settings;

    fn session(mode: Mode, pool: Vec<Question>, settings: Settings) -> Session {
        let pool: Vec<Rc<Question>> = pool.into_iter().map(Rc::new).collect();
        Session::start(
            Module::T1,
            mode,
            &pool,
            settings,
            &QuizConfig::default(),
            StdRng::seed_from_u64(9),
        )
        .unwrap()
    }

    fn letters(view: &QuestionView) -> Vec<char> {
        view.options.iter().map(|o| o.label).collect()
    }

    #[test]
    fn test_practice_feedback_after_answer() {
        let mut session = session(
            Mode::Practice,
            vec![multiple_choice("01001", "ABCD", "BD")],
            Settings::default(),
        );

        let before = question_view(&session);
        assert!(before.feedback.is_none());
        assert!(before.options.iter().all(|o| o.correct.is_none()));

        session.select_answer(Answer::Letter('C')).unwrap();
        let after = question_view(&session);
        let feedback = after.feedback.unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.expected, "B, D");

        let selected: Vec<char> = after
            .options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.label)
            .collect();
        assert_eq!(selected, vec!['C']);
        for option in &after.options {
            assert_eq!(option.correct, Some(matches!(option.label, 'B' | 'D')));
        }
    }

    #[test]
    fn test_exam_only_highlights_selection() {
        let mut session = session(
            Mode::Exam,
            vec![true_false("1", true), true_false("2", false)],
            Settings::default(),
        );
        session.select_answer(Answer::Bool(false)).unwrap();

        let view = question_view(&session);
        assert!(view.feedback.is_none());
        assert!(view.options.iter().all(|o| o.correct.is_none()));
        assert_eq!(view.recorded, Some(Answer::Bool(false)));
        assert!(view.controls.skip);
        assert!(!view.controls.next);
        assert!(view.controls.finish);
    }

    #[test]
    fn test_true_false_choices_in_fixed_order() {
        let session = session(Mode::Practice, vec![true_false("1", true)], Settings::default());
        let view = question_view(&session);
        assert_eq!(letters(&view), vec!['T', 'F']);
        assert_eq!(view.id_label, "K-1");
        assert_eq!((view.position, view.total), (1, 1));
    }

    #[test]
    fn test_option_order_stable_across_renders() {
        let mut session = session(
            Mode::Practice,
            vec![
                multiple_choice("01001", "ABCDEF", "A"),
                multiple_choice("01002", "ABCDEF", "B"),
            ],
            Settings {
                shuffle_questions: false,
                shuffle_options: true,
            },
        );

        let first = letters(&question_view(&session));
        assert_eq!(letters(&question_view(&session)), first);

        session.next();
        session.select_answer(Answer::Letter('B')).unwrap();
        session.previous();
        assert_eq!(letters(&question_view(&session)), first);
    }

    #[test]
    fn test_repeated_id_shows_all_of_its_options() {
        let mut session = session(
            Mode::Practice,
            vec![
                multiple_choice("1", "AB", "A"),
                multiple_choice("1", "ABCD", "D"),
            ],
            Settings {
                shuffle_questions: false,
                shuffle_options: false,
            },
        );

        assert_eq!(letters(&question_view(&session)), vec!['A', 'B']);
        session.next();
        assert_eq!(letters(&question_view(&session)), vec!['A', 'B', 'C', 'D']);
    }

    #[test]
    fn test_review_shows_feedback_for_recorded_answers() {
        let mut session = session(
            Mode::Exam,
            vec![true_false("1", true), true_false("2", true)],
            Settings::default(),
        );
        session.select_answer(Answer::Bool(true)).unwrap();
        session.finish().unwrap();
        session.review().unwrap();

        let view = question_view(&session);
        assert!(view.reviewing);
        assert_eq!(view.mode, Mode::Practice);
        assert_eq!(view.recorded, Some(Answer::Bool(true)));
        assert!(view.feedback.unwrap().correct);
        assert!(view.controls.next);
        assert!(!view.controls.skip);
    }

    #[test]
    fn test_study_view_lists_correct_options() {
        let session = session(
            Mode::Study,
            vec![multiple_choice("01001", "ABCD", "AC"), true_false("2", false)],
            Settings::default(),
        );
        let view = study_view(&session);
        assert_eq!(view.answer_lines, vec!["A: Option A", "C: Option C"]);
        assert!(view.controls.next);
        assert!(!view.controls.previous);
        assert!(!view.controls.finish);
    }
}
