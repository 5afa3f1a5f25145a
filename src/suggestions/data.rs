use serde::{Deserialize, Serialize};

pub const DICTIONARY: &[(&str, &[&str])] = &[
    ("buy", &["milk", "bread", "meat"]),
    ("study", &["math", "physics", "biology", "english"]),
    ("call", &["mom", "dad", "boss", "client"]),
    ("eat", &["breakfast", "lunch", "dinner"]),
    ("clean", &["room", "desk", "car"]),
    ("plan", &["trip", "week", "party"]),
    ("fix", &["bug", "layout"]),
    ("build", &["project", "portfolio", "resume"]),
    ("train", &["arms", "legs", "soon"]),
    ("play", &["football", "voleyball", "game"]),
    ("work", &["presentation", "email", "task"]),
    ("read", &["book", "article", "docs"]),
    ("write", &["code", "post", "essay"]),
    ("learn", &["maths", "school", "react"]),
    ("visit", &["grandma", "store", "friend"]),
    ("meet", &["team", "client", "group"]),
    ("watch", &["movie", "show", "stream"]),
    ("paint", &["wall", "picture", "door"]),
    ("order", &["food", "drink", "taxi"]),
    ("cook", &["pasta", "meat", "soup"]),
];

#[derive(Serialize, Debug)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<&'static str>,
}

#[derive(Deserialize, Debug)]
pub struct ApplySuggestionRequest {
    pub text: String,
    pub suggestion: String,
}

#[derive(Serialize, Debug)]
pub struct ApplySuggestionResponse {
    pub text: String,
}
