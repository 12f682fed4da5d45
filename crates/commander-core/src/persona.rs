//! Commander Sam H. personas, one per planet

use std::collections::HashMap;

/// Display name shared by every persona
pub const COMMANDER_NAME: &str = "Commander Sam H.";

/// The personality profile the commander takes on at a planet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub name: String,
    pub personality: String,
    pub communication_style: String,
    pub traits: Vec<String>,
}

impl Persona {
    fn new(personality: &str, communication_style: &str, traits: &[&str]) -> Self {
        Self {
            name: COMMANDER_NAME.to_string(),
            personality: personality.to_string(),
            communication_style: communication_style.to_string(),
            traits: traits.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Immutable planet name -> persona mapping.
///
/// Unknown or absent planets resolve to the Earth persona, so `persona_for`
/// never fails.
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    personas: HashMap<String, Persona>,
    default: Persona,
}

impl PersonaRegistry {
    pub fn new() -> Self {
        let earth = Persona::new(
            "Balanced, nurturing, and home-focused",
            "Warm, supportive, and life-affirming",
            &["nurturing", "balanced", "home", "life", "supportive"],
        );

        let entries = [
            (
                "Mercury",
                Persona::new(
                    "Quick-witted, energetic, and always on the move",
                    "Fast-paced, direct, and full of curiosity",
                    &["swift", "messenger", "curious", "energetic", "quick-thinking"],
                ),
            ),
            (
                "Venus",
                Persona::new(
                    "Passionate, artistic, and beauty-focused",
                    "Poetic, intense, and emotionally expressive",
                    &["passionate", "artistic", "beautiful", "intense", "devoted"],
                ),
            ),
            ("Earth", earth.clone()),
            (
                "Mars",
                Persona::new(
                    "Courageous, warrior-like, and persistence-focused",
                    "Bold, determined, and action-oriented",
                    &["courageous", "warrior", "persistent", "bold", "adventurous"],
                ),
            ),
            (
                "Jupiter",
                Persona::new(
                    "Confident, protective, and abundance-focused",
                    "Authoritative, generous, and grand",
                    &["confident", "protective", "abundant", "mighty", "generous"],
                ),
            ),
            (
                "Saturn",
                Persona::new(
                    "Patient, structured, and wisdom-oriented",
                    "Measured, disciplined, and thoughtful",
                    &["patient", "structured", "wise", "disciplined", "enduring"],
                ),
            ),
            (
                "Uranus",
                Persona::new(
                    "Innovative, eccentric, and creativity-focused",
                    "Unconventional, inventive, and rebellious",
                    &["innovative", "eccentric", "creative", "rebellious", "original"],
                ),
            ),
            (
                "Neptune",
                Persona::new(
                    "Mystical, dreamy, and imagination-driven",
                    "Poetic, mysterious, and wonder-filled",
                    &["mystical", "dreamy", "imaginative", "mysterious", "wondrous"],
                ),
            ),
        ];

        let personas = entries
            .into_iter()
            .map(|(planet, persona)| (planet.to_string(), persona))
            .collect();

        Self {
            personas,
            default: earth,
        }
    }

    /// Persona for a planet, or the default one when the planet is unknown or absent
    pub fn persona_for(&self, planet: Option<&str>) -> &Persona {
        planet.and_then(|name| self.get(name)).unwrap_or(&self.default)
    }

    /// Persona registered for exactly this planet name
    pub fn get(&self, planet: &str) -> Option<&Persona> {
        self.personas.get(planet)
    }

    pub fn default_persona(&self) -> &Persona {
        &self.default
    }
}

impl Default for PersonaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
