//! Daily motivational quote.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// A quote and its author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    /// Quote text.
    pub text: &'static str,
    /// Attributed author.
    pub author: &'static str,
}

const QUOTES: [Quote; 10] = [
    Quote {
        text: "We are what we repeatedly do. Excellence, then, is not an act, but a habit.",
        author: "Aristotle",
    },
    Quote {
        text: "Habits are the compound interest of self-improvement.",
        author: "James Clear",
    },
    Quote {
        text: "You'll never change your life until you change something you do daily. \
               The secret of your success is found in your daily routine.",
        author: "John C. Maxwell",
    },
    Quote {
        text: "Motivation is what gets you started. Habit is what keeps you going.",
        author: "Jim Rohn",
    },
    Quote {
        text: "First forget inspiration. Habit is more dependable. \
               Habit will sustain you whether you're inspired or not.",
        author: "Octavia Butler",
    },
    Quote {
        text: "The chains of habit are too weak to be felt until they are too strong to be broken.",
        author: "Samuel Johnson",
    },
    Quote {
        text: "Habits are first cobwebs, then cables.",
        author: "Spanish Proverb",
    },
    Quote {
        text: "You do not rise to the level of your goals. You fall to the level of your systems.",
        author: "James Clear",
    },
    Quote {
        text: "Success is the sum of small efforts, repeated day in and day out.",
        author: "Robert Collier",
    },
    Quote {
        text: "The only way to make sense out of change is to plunge into it, \
               move with it, and join the dance.",
        author: "Alan Watts",
    },
];

/// The quote of the day: stable for a whole day, rotating by day of year.
#[must_use]
pub fn daily_quote(today: NaiveDate) -> Quote {
    QUOTES[today.ordinal() as usize % QUOTES.len()]
}
