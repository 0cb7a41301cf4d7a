/// Reaction types the forum records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionKind {
    Like,
}

impl ReactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
        }
    }
}

/// Content a reaction can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactableType {
    Thread,
    Post,
}

impl ReactableType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactableType::Thread => "thread",
            ReactableType::Post => "post",
        }
    }
}
