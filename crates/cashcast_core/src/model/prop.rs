//! Scenario overlays ("props")
//!
//! A prop is a named bundle of hypothetical events layered on top of the base
//! plan for what-if analysis. Props compose with `+`.

use std::ops::Add;

use serde::{Deserialize, Serialize};

use super::event::Event;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Prop {
    pub name: String,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Prop {
    #[must_use]
    pub fn new(name: impl Into<String>, events: Vec<Event>) -> Self {
        Self {
            name: name.into(),
            events,
        }
    }

    /// A prop with no events, used as the "base plan only" scenario
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

/// `a + b` keeps `a`'s events first and names the result `"a + b"`.
impl Add for Prop {
    type Output = Prop;

    fn add(mut self, other: Prop) -> Prop {
        self.name = format!("{} + {}", self.name, other.name);
        self.events.extend(other.events);
        self
    }
}
