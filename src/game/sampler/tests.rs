use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

use crate::game::definition::Letter;

fn question(section: &str, index: usize) -> Question {
    Question {
        text: format!("{} question {}", section, index),
        options: [
            "A) first".to_owned(),
            "B) second".to_owned(),
            "C) third".to_owned(),
            "D) fourth".to_owned(),
        ],
        correct_answer: Letter::A,
        section: section.to_owned(),
        explanation: None,
    }
}

fn section(name: &str, num_questions: usize) -> Section {
    Section {
        name: name.to_owned(),
        questions: (0..num_questions).map(|i| question(name, i)).collect(),
    }
}

fn names(names: &[&str]) -> HashSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn all_sections() -> Vec<Section> {
    vec![
        section("Routing", 6),
        section("Switching", 4),
        section("Security", 5),
    ]
}

fn texts(questions: &[Question]) -> Vec<String> {
    questions.iter().map(|q| q.text.clone()).collect()
}

#[test]
fn counts_only_selected_sections() {
    let sections = all_sections();
    assert_eq!(count(&names(&["Routing", "Security"]), &sections), 11);
    assert_eq!(count(&names(&["Switching"]), &sections), 4);
    assert_eq!(count(&names(&["Unknown"]), &sections), 0);
    assert_eq!(count(&HashSet::new(), &sections), 0);
}

#[test]
fn selects_requested_count_without_duplicates() {
    let sections = all_sections();
    let selected = names(&["Routing", "Security"]);
    let mut rng = StdRng::seed_from_u64(7);
    for requested in 1..=11 {
        let questions = select(&selected, &sections, requested, &mut rng);
        assert_eq!(questions.len(), requested);

        let unique: HashSet<String> = texts(&questions).into_iter().collect();
        assert_eq!(unique.len(), requested);
        assert!(questions
            .iter()
            .all(|q| q.section == "Routing" || q.section == "Security"));
    }
}

#[test]
fn returns_whole_pool_when_count_exceeds_it() {
    let sections = all_sections();
    let selected = names(&["Switching", "Security"]);
    let mut rng = StdRng::seed_from_u64(42);

    let mut expected: Vec<String> = sections[1..]
        .iter()
        .flat_map(|s| texts(&s.questions))
        .collect();
    expected.sort();

    for requested in &[9, 10, usize::MAX] {
        let mut selected_texts = texts(&select(&selected, &sections, *requested, &mut rng));
        selected_texts.sort();
        assert_eq!(selected_texts, expected);
    }
}

#[test]
fn order_varies_between_rounds() {
    let sections = all_sections();
    let selected = names(&["Routing", "Switching", "Security"]);
    let orders: HashSet<Vec<String>> = (0..20)
        .map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            texts(&select(&selected, &sections, usize::MAX, &mut rng))
        })
        .collect();
    assert!(orders.len() > 1);
}

#[test]
fn empty_selection_yields_no_questions() {
    let sections = all_sections();
    let mut rng = StdRng::seed_from_u64(0);
    assert!(select(&HashSet::new(), &sections, 10, &mut rng).is_empty());
}

#[test]
fn shuffle_handles_short_slices() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut empty: Vec<u32> = vec![];
    shuffle(&mut empty, &mut rng);
    assert!(empty.is_empty());

    let mut single = vec![1];
    shuffle(&mut single, &mut rng);
    assert_eq!(single, [1]);
}

#[test]
fn shuffle_is_roughly_uniform() {
    let mut rng = StdRng::seed_from_u64(1234);
    let mut first_position_counts = [0u32; 4];
    for _ in 0..4000 {
        let mut items = [0, 1, 2, 3];
        shuffle(&mut items, &mut rng);
        first_position_counts[items[0]] += 1;
    }
    for count in &first_position_counts {
        assert!(*count > 800 && *count < 1200, "{:?}", first_position_counts);
    }
}
