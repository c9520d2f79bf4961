use std::cell::Cell;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FeedId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PostId(u64);

impl FeedId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl PostId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "feed-{}", self.0)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "post-{}", self.0)
    }
}

/// Session-wide id source shared by feeds and posts. Ids are never reused.
#[derive(Debug, Default)]
pub struct IdSequence {
    next: Cell<u64>,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&self) -> u64 {
        let id = self.next.get() + 1;
        self.next.set(id);
        id
    }

    pub fn next_feed(&self) -> FeedId {
        FeedId(self.bump())
    }

    pub fn next_post(&self) -> PostId {
        PostId(self.bump())
    }
}
