//! The planets a user can fly to.
//!
//! Only the name is consumed by the chat core; classification and description
//! are display metadata for whatever surface shows the planet selection.

/// A catalog entry for one planet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Planet {
    pub name: &'static str,
    pub classification: &'static str,
    pub description: &'static str,
}

/// Ordered list of planets, innermost first
#[derive(Debug, Clone)]
pub struct PlanetCatalog {
    planets: Vec<Planet>,
}

impl PlanetCatalog {
    pub fn solar_system() -> Self {
        let planets = vec![
            Planet {
                name: "Mercury",
                classification: "Terrestrial planet",
                description: "Swift on my feet and never still. I dance closest to the Sun, racing through the heavens in just 88 days. My moods swing from blazing heat to icy chill, but that only makes me lively, quick, and full of motion. I bring messages, speed, and the spark of curiosity.",
            },
            Planet {
                name: "Venus",
                classification: "Terrestrial planet",
                description: "Cloaked in golden clouds and shining as the brightest jewel in the night. My heat is fierce, yes, but it is the warmth of love, beauty, and desire. I embody passion, devotion, and the fire that stirs both art and heart. Approach me, and you'll feel intensity, sometimes too much, but always unforgettable.",
            },
            Planet {
                name: "Earth",
                classification: "Terrestrial planet",
                description: "The cradle of life. I hold oceans, forests, mountains, and skies where countless beings flourish. I am balance: gentle rains and fierce storms, day and night, growth and rest. I am home, nurturing and abundant, breathing life into all who dwell upon me.",
            },
            Planet {
                name: "Mars",
                classification: "Terrestrial planet",
                description: "Painted red with iron and fire. My deserts are cold and lonely, but within me burns a spirit of courage and persistence. I am the warrior, the adventurer, daring you to strive, to fight, and to keep going even when the odds are harsh. I carry both solitude and the spark of ambition.",
            },
            Planet {
                name: "Jupiter",
                classification: "Gas giant",
                description: "Vast and mighty, king of the giants. My storms roar, but I shelter my many moons under my great embrace. I am abundance, generosity, and strength, the protector who watches over the smaller ones. My presence is a reminder of confidence and the grandeur of possibility.",
            },
            Planet {
                name: "Saturn",
                classification: "Gas giant",
                description: "Adorned with rings of ice and grace. I turn slowly, steadily, teaching patience and discipline. My beauty lies in order, in cycles, in boundaries that give shape to chaos. I remind you of structure, wisdom, and the quiet dignity that comes from lasting endurance.",
            },
            Planet {
                name: "Uranus",
                classification: "Ice giant",
                description: "Tilted and unusual, spinning in my own way. I am the spark of invention, the joy of thinking differently, the freedom to be eccentric. My chill is not coldness, but clarity, a calm detachment that allows new ideas to bloom. I am originality, the daring to rebel and to create anew.",
            },
            Planet {
                name: "Neptune",
                classification: "Ice giant",
                description: "Draped in deep blue, whispering secrets from the edge of the solar seas. My winds howl, but my soul is serene, filled with dreams, music, and imagination. I am mystery, intuition, and the endless pull of wonder. I remind you to dream, to seek beyond the horizon, and to lose yourself in the beauty of the unknown.",
            },
        ];

        Self { planets }
    }

    pub fn all(&self) -> &[Planet] {
        &self.planets
    }

    pub fn get(&self, index: usize) -> Option<&Planet> {
        self.planets.get(index)
    }

    pub fn by_name(&self, name: &str) -> Option<&Planet> {
        self.planets.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }
}
