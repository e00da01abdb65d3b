use crate::models::Answer;

/// One answer slot per working-set position; `None` means unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    answers: Vec<Option<Answer>>,
}

impl AnswerSheet {
    pub fn new(len: usize) -> Self {
        Self {
            answers: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Overwrites any earlier answer at `position`. Out of range is ignored.
    pub fn record(&mut self, position: usize, answer: Answer) {
        if let Some(slot) = self.answers.get_mut(position) {
            *slot = Some(answer);
        }
    }

    pub fn answer_at(&self, position: usize) -> Option<&Answer> {
        self.answers.get(position).and_then(Option::as_ref)
    }

    pub fn answered(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&Answer>> {
        self.answers.iter().map(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sheet_is_unanswered() {
        let sheet = AnswerSheet::new(3);
        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet.answered(), 0);
        assert!(sheet.iter().all(|a| a.is_none()));
    }

    #[test]
    fn test_record_overwrites() {
        let mut sheet = AnswerSheet::new(2);
        sheet.record(1, Answer::Letter('A'));
        sheet.record(1, Answer::Letter('C'));
        assert_eq!(sheet.answer_at(1), Some(&Answer::Letter('C')));
        assert_eq!(sheet.answer_at(0), None);
        assert_eq!(sheet.answered(), 1);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut sheet = AnswerSheet::new(1);
        sheet.record(5, Answer::Bool(true));
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.answer_at(5), None);
    }
}
