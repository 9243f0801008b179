//! Exam countdown and answer assembly.
//!
//! The countdown starts when assessment data finishes loading and fires
//! the forced-submit signal exactly once when it reaches zero. Answer
//! assembly coerces unanswered multiple-choice questions to the
//! `NO_ANSWER` sentinel on forced submits; manual submits require every
//! question answered.

use std::collections::HashMap;

use crate::models::assessment::{AnswerPayload, NO_ANSWER, Question, QuestionKind};

/// Working time applied when the server omits one for a template.
pub const DEFAULT_DURATION_SECS: u64 = 3600;

/// One-second countdown with a one-shot expiry signal.
#[derive(Debug, Clone)]
pub struct ExamTimer {
    remaining: u64,
    expiry_fired: bool,
}

impl ExamTimer {
    pub fn new(total_secs: u64) -> Self {
        Self {
            remaining: total_secs,
            expiry_fired: false,
        }
    }

    /// Advance the timer by one second. Returns `true` on the tick that
    /// exhausts the countdown; never again afterwards.
    pub fn tick(&mut self) -> bool {
        if self.remaining > 0 {
            self.remaining -= 1;
            if self.remaining == 0 && !self.expiry_fired {
                self.expiry_fired = true;
                return true;
            }
        }
        false
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// `MM:SS` display, hours folded into minutes.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

/// Count questions with no recorded answer.
pub fn unanswered_count(questions: &[Question], answers: &HashMap<i64, String>) -> usize {
    questions
        .iter()
        .filter(|q| answers.get(&q.id).map(|a| a.trim().is_empty()).unwrap_or(true))
        .count()
}

/// Assemble the submit payload.
///
/// With `force` set (timer expiry), unanswered multiple-choice questions
/// are coerced to the `NO_ANSWER` sentinel and unanswered essays to an
/// empty string, bypassing the required-answer check.
pub fn collect_answers(questions: &[Question], answers: &HashMap<i64, String>, force: bool) -> Vec<AnswerPayload> {
    questions
        .iter()
        .map(|q| {
            let recorded = answers.get(&q.id).map(String::as_str).unwrap_or("");
            let answer = if recorded.trim().is_empty() && force {
                match q.kind {
                    QuestionKind::MultipleChoice => NO_ANSWER.to_string(),
                    QuestionKind::Essay => String::new(),
                }
            } else {
                recorded.to_string()
            };
            AnswerPayload {
                question_id: q.id,
                answer,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mc(id: i64) -> Question {
        Question {
            id,
            prompt: format!("Question {id}"),
            kind: QuestionKind::MultipleChoice,
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
        }
    }

    fn essay(id: i64) -> Question {
        Question {
            id,
            prompt: format!("Question {id}"),
            kind: QuestionKind::Essay,
            options: Vec::new(),
        }
    }

    #[test]
    fn test_timer_fires_exactly_once_after_n_ticks() {
        let n = 5;
        let mut timer = ExamTimer::new(n);

        let mut fired = 0;
        for _ in 0..n {
            if timer.tick() {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
        assert!(timer.is_expired());

        // Further ticks never re-fire.
        for _ in 0..10 {
            assert!(!timer.tick());
        }
    }

    #[test]
    fn test_timer_does_not_fire_early() {
        let mut timer = ExamTimer::new(3);
        assert!(!timer.tick());
        assert!(!timer.tick());
        assert_eq!(timer.remaining_secs(), 1);
        assert!(!timer.is_expired());
        assert!(timer.tick());
    }

    #[test]
    fn test_timer_display() {
        assert_eq!(ExamTimer::new(600).display(), "10:00");
        assert_eq!(ExamTimer::new(61).display(), "01:01");
        assert_eq!(ExamTimer::new(0).display(), "00:00");
    }

    #[test]
    fn test_forced_submit_coerces_unanswered_mc() {
        let questions = vec![mc(1), mc(2), essay(3)];
        let mut answers = HashMap::new();
        answers.insert(1, "B".to_string());

        let payload = collect_answers(&questions, &answers, true);
        assert_eq!(payload.len(), 3);
        assert_eq!(payload[0].answer, "B");
        assert_eq!(payload[1].answer, NO_ANSWER);
        assert_eq!(payload[2].answer, "");
    }

    #[test]
    fn test_manual_submit_keeps_answers_verbatim() {
        let questions = vec![mc(1), essay(2)];
        let mut answers = HashMap::new();
        answers.insert(1, "C".to_string());
        answers.insert(2, "Tamp evenly, then extract.".to_string());

        let payload = collect_answers(&questions, &answers, false);
        assert_eq!(payload[0].answer, "C");
        assert_eq!(payload[1].answer, "Tamp evenly, then extract.");
    }

    #[test]
    fn test_unanswered_count() {
        let questions = vec![mc(1), mc(2), essay(3)];
        let mut answers = HashMap::new();
        assert_eq!(unanswered_count(&questions, &answers), 3);

        answers.insert(1, "A".to_string());
        answers.insert(3, "   ".to_string());
        assert_eq!(unanswered_count(&questions, &answers), 2);

        answers.insert(2, "D".to_string());
        answers.insert(3, "Clean the group head.".to_string());
        assert_eq!(unanswered_count(&questions, &answers), 0);
    }
}
