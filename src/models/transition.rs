use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Transition {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TransitionsResponse {
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

#[derive(Debug, Serialize)]
pub struct TransitionRequest<'a> {
    pub transition: TransitionId<'a>,
}

#[derive(Debug, Serialize)]
pub struct TransitionId<'a> {
    pub id: &'a str,
}

impl<'a> TransitionRequest<'a> {
    pub fn new(id: &'a str) -> Self {
        Self {
            transition: TransitionId { id },
        }
    }
}
