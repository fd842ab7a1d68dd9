use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;
use std::borrow::Cow;
use std::convert::TryFrom;
use std::iter;

use crate::game::definition::question::{Letter, Question, NUM_OPTIONS};
use crate::game::definition::Section;


const BLOCK_SEPARATOR: char = ';';
const MIN_BLOCK_LINES: usize = 1 + NUM_OPTIONS;

lazy_static! {
    static ref SECTION_HEADER_REGEX: Regex =
        Regex::new(r"(?im)^[ \t]*section[ \t]*:?[ \t]+(\S[^\r\n]*)").unwrap();
    static ref OPTION_LINE_REGEX: Regex = Regex::new(r"^[A-D][):]").unwrap();
    static ref OPTION_MARKER_REGEX: Regex = Regex::new(r"^[A-D][):]\s*").unwrap();
}

/// Parses a loosely formatted question bank.
///
/// Malformed questions and sections without any valid question are dropped
/// instead of failing the whole document.
pub fn parse_text(text: &str) -> Vec<Section> {
    let headers: Vec<(usize, usize, &str)> = SECTION_HEADER_REGEX
        .captures_iter(text)
        .filter_map(|captures| {
            let header = captures.get(0)?;
            let name = captures.get(1)?;
            Some((header.start(), header.end(), name.as_str().trim()))
        })
        .collect();

    let body_ends = headers
        .iter()
        .skip(1)
        .map(|(header_start, _, _)| *header_start)
        .chain(iter::once(text.len()));

    let mut sections: Vec<Section> = Vec::new();
    for ((_, body_start, name), body_end) in headers.iter().zip(body_ends) {
        let section = match parse_section(name, &text[*body_start..body_end]) {
            Some(section) => section,
            None => continue,
        };
        match sections.iter_mut().find(|s| s.name == section.name) {
            Some(existing) => existing.questions.extend(section.questions),
            None => sections.push(section),
        }
    }

    info!("Parsed {} sections from question bank text", sections.len());
    sections
}

fn parse_section(name: &str, body: &str) -> Option<Section> {
    let questions: Vec<Question> = body
        .split(BLOCK_SEPARATOR)
        .filter(|block| !block.trim().is_empty())
        .filter_map(|block| parse_question(block, name))
        .collect();

    if questions.is_empty() {
        debug!("Dropping section `{}`: no valid questions", name);
        return None;
    }

    debug!("Parsed section `{}` with {} questions", name, questions.len());
    Some(Section {
        name: name.to_owned(),
        questions,
    })
}

fn parse_question(block: &str, section_name: &str) -> Option<Question> {
    let lines: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() < MIN_BLOCK_LINES {
        debug!("Skipping incomplete question block in `{}`", section_name);
        return None;
    }

    // A comma marks the final option, followed by the answer
    let mut options = Vec::with_capacity(NUM_OPTIONS);
    let mut answer_token = None;
    for line in &lines[1..] {
        if let Some((option, answer)) = line.rsplit_once(',') {
            options.push(option.trim().to_owned());
            answer_token = Some(answer.trim());
        } else if OPTION_LINE_REGEX.is_match(line) {
            options.push((*line).to_owned());
        }
    }

    let answer_token = match answer_token {
        Some(token) if !token.is_empty() => token,
        _ => {
            debug!("Skipping question without an answer: `{}`", lines[0]);
            return None;
        }
    };

    let options = match <[String; NUM_OPTIONS]>::try_from(options) {
        Ok(options) => options,
        Err(options) => {
            debug!(
                "Skipping question with {} options: `{}`",
                options.len(),
                lines[0]
            );
            return None;
        }
    };

    let correct_answer = resolve_answer(answer_token, &options);
    Some(Question {
        text: lines[0].to_owned(),
        options,
        correct_answer,
        section: section_name.to_owned(),
        explanation: None,
    })
}

fn strip_option_marker(option: &str) -> Cow<'_, str> {
    OPTION_MARKER_REGEX.replace(option, "")
}

/// Turns an answer token into a letter, either directly (`c`, `C`) or by
/// matching free text against the option texts. Unmatched answers fall back to A.
pub fn resolve_answer(token: &str, options: &[String; NUM_OPTIONS]) -> Letter {
    if let Ok(letter) = token.parse::<Letter>() {
        return letter;
    }

    let token = token.to_lowercase();
    options
        .iter()
        .map(|option| strip_option_marker(option).trim().to_lowercase())
        .position(|option| option.contains(&token) || token.contains(&option))
        .and_then(Letter::from_index)
        .unwrap_or_else(|| {
            warn!("Could not match answer `{}` to any option, using A", token);
            Letter::A
        })
}
