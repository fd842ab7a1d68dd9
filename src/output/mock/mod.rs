use crate::output::{GameOutput, Message};

#[derive(Clone, Debug, Default)]
pub struct MockGameOutput {
    messages: Vec<Message>,
}

impl MockGameOutput {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn flush(&mut self) -> Vec<Message> {
        std::mem::replace(&mut self.messages, Vec::new())
    }

    pub fn contains_message(&self, message: &Message) -> bool {
        self.messages.contains(message)
    }

    pub fn count_matching<F: Fn(&Message) -> bool>(&self, predicate: F) -> usize {
        self.messages.iter().filter(|m| predicate(m)).count()
    }
}

impl GameOutput for MockGameOutput {
    fn say(&mut self, message: &Message) {
        self.messages.push(message.clone());
    }
}
