use log::debug;
use rand::Rng;
use std::collections::HashSet;

use crate::game::definition::{Question, Section};

#[cfg(test)]
mod tests;

fn selected_sections<'a>(
    selected_names: &'a HashSet<String>,
    sections: &'a [Section],
) -> impl Iterator<Item = &'a Section> {
    sections
        .iter()
        .filter(move |section| selected_names.contains(&section.name))
}

/// Number of questions available across the selected sections.
pub fn count(selected_names: &HashSet<String>, sections: &[Section]) -> usize {
    selected_sections(selected_names, sections)
        .map(|section| section.questions.len())
        .sum()
}

/// Draws up to `count` distinct questions from the selected sections, in random order.
pub fn select<R: Rng>(
    selected_names: &HashSet<String>,
    sections: &[Section],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut pool: Vec<Question> = selected_sections(selected_names, sections)
        .flat_map(|section| section.questions.iter().cloned())
        .collect();

    shuffle(&mut pool, rng);
    if pool.len() > count {
        pool.truncate(count);
    }
    debug!("Selected {} questions for the round", pool.len());
    pool
}

/// Fisher-Yates shuffle.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0, i + 1);
        items.swap(i, j);
    }
}
