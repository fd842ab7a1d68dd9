use std::num::NonZeroUsize;

#[derive(Debug)]
pub struct Settings {
    pub round_size: NonZeroUsize,
    pub structured_file_name: &'static str,
    pub text_file_name: &'static str,
    pub score_key: &'static str,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            round_size: NonZeroUsize::new(10).unwrap(),
            structured_file_name: "questions.json",
            text_file_name: "questions.txt",
            score_key: "ccnp_study_game_score",
        }
    }
}
