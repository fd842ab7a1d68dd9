use itertools::Itertools;
use log::error;
use std::io::Write;

use crate::game::definition::Letter;
use crate::game::round::RoundSize;
use crate::output::{GameOutput, Message};

const HELP: &str = "Commands:
  select <numbers|all>   choose sections, e.g. `select 1 3`
  start [count|all]      start a round (default 10 questions)
  a, b, c, d             answer the current question
  next                   go to the next question (or just press enter)
  exit                   abandon the current round
  again                  repeat a finished round on the same sections
  continue               go back to section selection
  sections | score | reset | help | quit";

pub struct TerminalOutput<W> {
    writer: W,
}

impl<W: Write> TerminalOutput<W> {
    pub fn new(writer: W) -> Self {
        TerminalOutput { writer }
    }
}

pub fn render(message: &Message) -> String {
    match message {
        Message::AnswerFeedback(outcome) => {
            let mut text = if outcome.is_correct {
                "Correct!".to_owned()
            } else {
                format!(
                    "Incorrect. You picked {}, the answer was {}: {}",
                    outcome.selected,
                    outcome.question.correct_answer,
                    outcome.question.option(outcome.question.correct_answer)
                )
            };
            if let Some(explanation) = &outcome.question.explanation {
                text.push_str(&format!("\nExplanation: {}", explanation));
            }
            let next_step = if outcome.is_last_question {
                "finish the round"
            } else {
                "continue"
            };
            text.push_str(&format!(
                "\nOverall: {}\nPress enter to {}.",
                outcome.lifetime_score, next_step
            ));
            text
        }
        Message::Help => HELP.to_owned(),
        Message::Invalid(reason) => format!("! {}", reason),
        Message::LifetimeScore(score) => {
            if score.total_attempted == 0 {
                "No questions answered yet.".to_owned()
            } else {
                format!("Overall score: {}", score)
            }
        }
        Message::QuestionBegins(position, total, question) => {
            let options = Letter::ALL
                .iter()
                .map(|letter| format!("  {}", question.option(*letter)))
                .join("\n");
            format!(
                "Question {} of {} [{}]\n{}\n{}",
                position, total, question.section, question.text, options
            )
        }
        Message::RoundResults(tally, score, round_size) => {
            let repeat = match round_size {
                RoundSize::Limited(size) => format!("{} more questions", size),
                RoundSize::Unlimited => "every question again".to_owned(),
            };
            format!(
                "Round complete! You scored {}.\nOverall: {}\nType `again` for {} on the same sections, or `continue`.",
                tally, score, repeat
            )
        }
        Message::ScoreReset => "Score reset.".to_owned(),
        Message::SectionList(summaries, total) => {
            let lines = summaries
                .iter()
                .enumerate()
                .map(|(index, summary)| {
                    format!(
                        "  {:>2}. {} ({} question{})",
                        index + 1,
                        summary.name,
                        summary.num_questions,
                        if summary.num_questions == 1 { "" } else { "s" }
                    )
                })
                .join("\n");
            format!("Sections:\n{}\n  All sections ({} questions)", lines, total)
        }
        Message::Selection(names, available) => {
            if names.is_empty() {
                "No sections selected.".to_owned()
            } else {
                format!(
                    "Selected {} ({} questions available).",
                    names.iter().sorted().join(", "),
                    available
                )
            }
        }
    }
}

impl<W: Write> GameOutput for TerminalOutput<W> {
    fn say(&mut self, message: &Message) {
        if let Err(e) = writeln!(self.writer, "{}\n", render(message)) {
            error!("Error writing to terminal: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::definition::Question;
    use crate::game::round::{AnswerOutcome, Tally};
    use crate::game::SectionSummary;
    use crate::score::ScoreRecord;

    fn question() -> Question {
        Question {
            text: "Which protocol uses the DUAL algorithm?".to_owned(),
            options: [
                "A) OSPF".to_owned(),
                "B) RIP".to_owned(),
                "C) EIGRP".to_owned(),
                "D) BGP".to_owned(),
            ],
            correct_answer: Letter::C,
            section: "Routing".to_owned(),
            explanation: Some("DUAL computes EIGRP routes.".to_owned()),
        }
    }

    #[test]
    fn renders_question_with_options() {
        let text = render(&Message::QuestionBegins(2, 10, question()));
        assert!(text.starts_with("Question 2 of 10 [Routing]"));
        assert!(text.contains("  C) EIGRP"));
    }

    #[test]
    fn renders_incorrect_feedback_with_explanation() {
        let outcome = AnswerOutcome {
            question: question(),
            selected: Letter::A,
            is_correct: false,
            is_last_question: true,
            lifetime_score: ScoreRecord::new(1, 3),
        };
        let text = render(&Message::AnswerFeedback(outcome));
        assert!(text.contains("the answer was C: C) EIGRP"));
        assert!(text.contains("Explanation: DUAL computes EIGRP routes."));
        assert!(text.contains("Overall: 1/3 (33%)"));
        assert!(text.contains("finish the round"));
    }

    #[test]
    fn renders_section_list() {
        let summaries = vec![
            SectionSummary {
                name: "Routing".to_owned(),
                num_questions: 1,
            },
            SectionSummary {
                name: "Switching".to_owned(),
                num_questions: 4,
            },
        ];
        let text = render(&Message::SectionList(summaries, 5));
        assert!(text.contains(" 1. Routing (1 question)\n"));
        assert!(text.contains(" 2. Switching (4 questions)"));
        assert!(text.ends_with("All sections (5 questions)"));
    }

    #[test]
    fn renders_round_results() {
        let text = render(&Message::RoundResults(
            Tally {
                correct: 3,
                attempted: 3,
            },
            ScoreRecord::new(7, 13),
            RoundSize::Unlimited,
        ));
        assert!(text.contains("You scored 3/3."));
        assert!(text.contains("Overall: 7/13 (54%)"));
        assert!(text.contains("`again` for every question again"));
    }

    #[test]
    fn writes_to_terminal() {
        let mut output = TerminalOutput::new(Vec::new());
        output.say(&Message::ScoreReset);
        assert_eq!(String::from_utf8(output.writer).unwrap(), "Score reset.\n\n");
    }
}
