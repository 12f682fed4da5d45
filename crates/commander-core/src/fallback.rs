//! Canned replies for when the completion provider is unavailable.
//!
//! Each planet has its own table of six lines; with no planet in focus the
//! general table is used, and an unknown planet borrows Earth's lines.
//! Selection is uniform over the table, after a short randomized delay that
//! stands in for typing time. Both the random source and the delay range are
//! injected so callers can make them deterministic.

use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const MERCURY: &[&str] = &[
    "Quick as lightning! I'm racing through space and catching every signal. What's your next move?",
    "Speed is my middle name! I'm already three steps ahead of you. What's the plan?",
    "Fast and furious - that's how we do it out here! What's the latest intel?",
    "I'm zipping around the solar system faster than you can blink! What's the mission?",
    "Time is of the essence! I'm moving at the speed of thought. What do you need?",
    "Swift and sure - that's the Mercury way! What's our next adventure?",
];

const VENUS: &[&str] = &[
    "Ah, the beauty of space never ceases to amaze me. What artistic vision are you pursuing?",
    "Passion drives everything in this universe. Tell me, what sets your heart on fire?",
    "In this vast cosmos, beauty and love are the only constants. What's your dream?",
    "The stars themselves seem to dance for us. What moves your soul today?",
    "Golden clouds and endless skies - what beauty shall we create together?",
    "Love and art transcend all boundaries. What masterpiece are we crafting?",
];

const EARTH: &[&str] = &[
    "Home sweet home! There's nothing quite like the comfort of familiar territory. How can I help?",
    "Balance is everything in this universe. What do you need to find your center?",
    "Life finds a way, even in the harshest conditions. What's your next step?",
    "From one Earthling to another, I'm here to support you. What's on your mind?",
    "The cradle of life - what new growth shall we nurture today?",
    "Gentle strength and steady progress. What foundation are we building?",
];

const MARS: &[&str] = &[
    "Courage is the fuel that drives us forward! What battle are we facing today?",
    "Red planet, red blood - we don't back down from any challenge! What's the mission?",
    "Persistence pays off in the end. What goal are we conquering together?",
    "Warrior spirit never dies! What adventure are we embarking on?",
    "Iron will and unbreakable determination. What frontier shall we conquer?",
    "The red dust of Mars runs through my veins. What challenge awaits us?",
];

const JUPITER: &[&str] = &[
    "Mighty and magnificent - that's how we roll in this part of space! What's the grand plan?",
    "I protect what matters most. What do you need me to watch over?",
    "Abundance flows through the universe. What resources do you need?",
    "Confidence is key to success. What are we building together?",
    "King of the giants - what kingdom shall we rule today?",
    "Vast storms and greater protection. What shall we shelter from the cosmic winds?",
];

const SATURN: &[&str] = &[
    "Patience and precision - the rings teach us that structure creates beauty. What's our next lesson?",
    "Slow and steady wins the cosmic race. What wisdom are we seeking?",
    "Discipline brings order to chaos. What structure shall we build?",
    "The rings remind us that boundaries can be beautiful. What limits shall we embrace?",
    "Wisdom comes with time, like the slow turn of my rings. What knowledge do you seek?",
    "Order and grace - what harmony shall we create in this universe?",
];

const URANUS: &[&str] = &[
    "Tilted perspective brings fresh insights! What unconventional approach shall we try?",
    "Innovation is my middle name - what crazy idea are we exploring today?",
    "Eccentricity is just another word for genius! What brilliant madness shall we attempt?",
    "Thinking sideways opens new dimensions. What impossible thing shall we make possible?",
    "Rebellion against the ordinary - what extraordinary path shall we forge?",
    "Originality is the spice of the cosmos. What unique creation shall we birth?",
];

const NEPTUNE: &[&str] = &[
    "Deep blue mysteries call to us from the edge of space. What secrets shall we uncover?",
    "Dreams and imagination are the true currency of the universe. What vision shall we pursue?",
    "The depths of space whisper ancient wisdom. What mysteries shall we explore?",
    "Intuition guides us through the cosmic seas. What inner voice shall we follow?",
    "Wonder and awe fuel the soul. What beauty shall we discover today?",
    "The unknown beckons with infinite possibility. What adventure calls to your spirit?",
];

const GENERAL: &[&str] = &[
    "Commander Sam H. on comms. We're drifting between worlds right now. Where shall we head?",
    "Deep space is quiet tonight, but I'm listening. What's on your mind?",
    "All systems steady out here. Pick a planet and I'll meet you there.",
    "Nothing but stars in every direction. Tell me what you need, explorer.",
    "Signal's clear and the nav computer is warm. Which sector are we charting next?",
    "Out here between orbits, every thought echoes. What would you like to talk about?",
];

/// Canned lines for a planet, the general table when `None`
pub fn lines_for(planet: Option<&str>) -> &'static [&'static str] {
    match planet {
        None => GENERAL,
        Some("Mercury") => MERCURY,
        Some("Venus") => VENUS,
        Some("Earth") => EARTH,
        Some("Mars") => MARS,
        Some("Jupiter") => JUPITER,
        Some("Saturn") => SATURN,
        Some("Uranus") => URANUS,
        Some("Neptune") => NEPTUNE,
        Some(_) => EARTH,
    }
}

/// Inclusive bounds of the simulated typing delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min: Duration,
    pub max: Duration,
}

impl DelayRange {
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// No delay at all
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000), Duration::from_millis(3000))
    }
}

pub struct FallbackResponder {
    rng: Mutex<StdRng>,
    delay: DelayRange,
}

impl FallbackResponder {
    pub fn new(rng: StdRng, delay: DelayRange) -> Self {
        Self {
            rng: Mutex::new(rng),
            delay,
        }
    }

    /// Seeded from OS entropy, default 1-3 second delay
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy(), DelayRange::default())
    }

    /// Deterministic picks, no delay
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), DelayRange::none())
    }

    /// Pick a line immediately
    pub fn pick(&self, planet: Option<&str>) -> &'static str {
        let lines = lines_for(planet);
        let mut rng = self.rng.lock();
        // Tables are never empty
        lines.choose(&mut *rng).copied().unwrap_or(GENERAL[0])
    }

    /// Wait out the simulated typing delay, then pick a line
    pub async fn respond(&self, planet: Option<&str>) -> String {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let line = self.pick(planet);
        tracing::debug!(planet = ?planet, delay_ms = delay.as_millis() as u64, "Picked canned reply");
        line.to_string()
    }

    fn next_delay(&self) -> Duration {
        let DelayRange { min, max } = self.delay;
        if min == max {
            return min;
        }
        let millis = self
            .rng
            .lock()
            .gen_range(min.as_millis() as u64..=max.as_millis() as u64);
        Duration::from_millis(millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const PLANETS: [&str; 8] = [
        "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
    ];

    #[test]
    fn test_every_table_has_six_non_empty_lines() {
        for planet in PLANETS.iter().copied().map(Some).chain([None]) {
            let lines = lines_for(planet);
            assert_eq!(lines.len(), 6, "{:?}", planet);
            assert!(lines.iter().all(|l| !l.trim().is_empty()));
        }
    }

    #[test]
    fn test_tables_are_distinct_per_planet() {
        assert_ne!(lines_for(Some("Mars")), lines_for(Some("Venus")));
        assert_ne!(lines_for(None), lines_for(Some("Earth")));
    }

    #[test]
    fn test_unknown_planet_uses_earth_table() {
        assert_eq!(lines_for(Some("Pluto")), lines_for(Some("Earth")));
        assert_eq!(lines_for(Some("mars")), lines_for(Some("Earth")));
    }

    #[test]
    fn test_pick_stays_within_planet_table() {
        let responder = FallbackResponder::seeded(7);
        for _ in 0..200 {
            let line = responder.pick(Some("Neptune"));
            assert!(NEPTUNE.contains(&line));
        }
    }

    #[test]
    fn test_every_line_is_reachable() {
        let responder = FallbackResponder::seeded(42);
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for _ in 0..3000 {
            *counts.entry(responder.pick(Some("Mars"))).or_default() += 1;
        }
        assert_eq!(counts.len(), MARS.len());
        // Uniform draw: each of six lines lands near 500
        assert!(counts.values().all(|&n| n > 300), "{:?}", counts);
    }

    #[test]
    fn test_same_seed_same_picks() {
        let a = FallbackResponder::seeded(99);
        let b = FallbackResponder::seeded(99);
        let picks_a: Vec<&str> = (0..20).map(|_| a.pick(None)).collect();
        let picks_b: Vec<&str> = (0..20).map(|_| b.pick(None)).collect();
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn test_delay_range_orders_bounds() {
        let range = DelayRange::new(Duration::from_secs(3), Duration::from_secs(1));
        assert_eq!(range.min, Duration::from_secs(1));
        assert_eq!(range.max, Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_respond_waits_within_bounds() {
        let responder = FallbackResponder::new(StdRng::seed_from_u64(1), DelayRange::default());
        for _ in 0..10 {
            let started = tokio::time::Instant::now();
            let reply = responder.respond(Some("Mars")).await;
            let waited = started.elapsed();

            assert!(MARS.contains(&reply.as_str()));
            assert!(waited >= Duration::from_secs(1), "{:?}", waited);
            assert!(waited <= Duration::from_secs(3) + Duration::from_millis(50), "{:?}", waited);
        }
    }

    #[tokio::test]
    async fn test_respond_without_delay() {
        let responder = FallbackResponder::seeded(3);
        let reply = responder.respond(None).await;
        assert!(GENERAL.contains(&reply.as_str()));
    }
}
