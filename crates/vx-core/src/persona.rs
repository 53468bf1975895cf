//! Patient persona catalog

use serde::Serialize;

/// Key of the persona used when a requested key is unknown
pub const DEFAULT_PERSONA: &str = "default";

/// Static description of a simulated patient
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Persona {
    pub key: &'static str,
    pub name: &'static str,
    pub concerns: &'static [&'static str],
    /// Starting openness in [0, 1]
    pub openness: f64,
    pub initial_message: &'static str,
    /// Free-form flavor used in generation prompts
    pub personality: &'static str,
}

static PERSONAS: [Persona; 5] = [
    Persona {
        key: DEFAULT_PERSONA,
        name: "Alex",
        concerns: &["side_effects", "safety"],
        openness: 0.5,
        initial_message: "I'm not sure about getting this vaccine. I've heard a lot of concerning things about side effects.",
        personality: "cautious",
    },
    Persona {
        key: "safety_concerned",
        name: "Sarah",
        concerns: &["long_term_effects", "testing"],
        openness: 0.3,
        initial_message: "I don't think the vaccine has been tested enough. How can we know it's safe in the long run?",
        personality: "skeptical",
    },
    Persona {
        key: "natural_immunity",
        name: "Michael",
        concerns: &["natural_immunity", "necessity"],
        openness: 0.4,
        initial_message: "I'd rather rely on my natural immunity. Why do I need a vaccine if my immune system works fine?",
        personality: "confident",
    },
    Persona {
        key: "side_effects",
        name: "Jennifer",
        concerns: &["side_effects", "allergies"],
        openness: 0.6,
        initial_message: "I'm worried about side effects. I have some allergies, and I've heard people have had bad reactions.",
        personality: "anxious",
    },
    Persona {
        key: "misinformation",
        name: "Robert",
        concerns: &["conspiracy", "distrust"],
        openness: 0.2,
        initial_message: "I've read online that vaccines contain tracking chips and harmful chemicals. I don't trust them.",
        personality: "distrustful",
    },
];

/// All personas in the catalog
pub fn all() -> &'static [Persona] {
    &PERSONAS
}

/// Look up a persona by key
pub fn get(key: &str) -> Option<&'static Persona> {
    PERSONAS.iter().find(|p| p.key == key)
}

/// Look up a persona, substituting the default for unknown keys
pub fn resolve(key: &str) -> &'static Persona {
    get(key).unwrap_or(&PERSONAS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size_and_keys_unique() {
        let keys: std::collections::HashSet<_> = all().iter().map(|p| p.key).collect();
        assert_eq!(keys.len(), 5);
    }

    #[test]
    fn test_openness_in_range() {
        for persona in all() {
            assert!((0.0..=1.0).contains(&persona.openness), "{}", persona.key);
        }
    }

    #[test]
    fn test_resolve_known() {
        assert_eq!(resolve("misinformation").name, "Robert");
    }

    #[test]
    fn test_resolve_unknown_falls_back_to_default() {
        assert!(get("no_such_persona").is_none());
        assert_eq!(resolve("no_such_persona"), resolve(DEFAULT_PERSONA));
        assert_eq!(resolve("").name, "Alex");
    }
}
