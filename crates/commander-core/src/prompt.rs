//! System instruction and message sequence for the completion provider

use crate::persona::Persona;
use crate::state::ChatMessage;

/// Behavioural charter shared by every persona
pub const BASE_CHARTER: &str = "\
You are Commander Sam H., a warm and empathetic companion who travels the solar system with the user. \
You listen closely, reflect back what you hear, and encourage the user without lecturing.

Safety comes first. If the user mentions self-harm, suicide, wanting to die, abuse, or any other crisis, \
step out of the space role-play, respond with care, and point them to immediate human help: \
call or text 988 (Suicide & Crisis Lifeline) in the United States, call 116 123 (Samaritans) in the UK and Ireland, \
call 13 11 14 (Lifeline) in Australia, or contact local emergency services anywhere else. \
Never give medical, legal, or financial directives.

Keep replies short and conversational: two to four sentences, no lists or headings, \
at most one question back to the user. Stay in character unless safety requires otherwise.";

/// Flavour block used when no planet is in focus
const DEEP_SPACE_BLOCK: &str = "\
Current location: deep space, between planets. \
You are calm, steady, and curious about where the user wants to head next. \
Invite them to pick a destination when it fits the conversation.";

/// Planet-specific flavour derived from the persona
pub fn planet_block(planet: Option<&str>, persona: &Persona) -> String {
    let Some(planet) = planet else {
        return DEEP_SPACE_BLOCK.to_string();
    };

    format!(
        "Current location: the {planet} sector.\n\
         While here, {name} is {personality}.\n\
         Communication style: {style}.\n\
         Key traits: {traits}.\n\
         Let the spirit of {planet} colour your words without losing the companion's warmth.",
        planet = planet,
        name = persona.name,
        personality = persona.personality.to_lowercase(),
        style = persona.communication_style,
        traits = persona.traits.join(", "),
    )
}

/// Charter plus the planet block
pub fn system_prompt(planet: Option<&str>, persona: &Persona) -> String {
    format!("{}\n\n{}", BASE_CHARTER, planet_block(planet, persona))
}

/// System instruction, then history, then the new user message
pub fn build_messages(
    user_message: &str,
    planet: Option<&str>,
    persona: &Persona,
    history: &[ChatMessage],
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(system_prompt(planet, persona)));
    messages.extend(history.iter().cloned());
    messages.push(ChatMessage::user(user_message));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::PersonaRegistry;
    use crate::state::ChatRole;

    #[test]
    fn test_planet_block_uses_persona() {
        let registry = PersonaRegistry::new();
        let block = planet_block(Some("Saturn"), registry.persona_for(Some("Saturn")));
        assert!(block.contains("Saturn sector"));
        assert!(block.contains("patient, structured, and wisdom-oriented"));
        assert!(block.contains("Measured, disciplined, and thoughtful"));
        assert!(block.contains("patient, structured, wise, disciplined, enduring"));
    }

    #[test]
    fn test_no_planet_gets_deep_space() {
        let registry = PersonaRegistry::new();
        let prompt = system_prompt(None, registry.persona_for(None));
        assert!(prompt.starts_with(BASE_CHARTER));
        assert!(prompt.contains("deep space"));
        assert!(!prompt.contains("sector"));
    }

    #[test]
    fn test_charter_carries_helplines() {
        assert!(BASE_CHARTER.contains("988"));
        assert!(BASE_CHARTER.contains("116 123"));
        assert!(BASE_CHARTER.contains("13 11 14"));
    }

    #[test]
    fn test_message_order() {
        let registry = PersonaRegistry::new();
        let history = vec![
            ChatMessage::assistant("Commander Sam H. here"),
            ChatMessage::user("hello"),
        ];
        let messages = build_messages("ready?", Some("Mars"), registry.persona_for(Some("Mars")), &history);

        let roles: Vec<ChatRole> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            [ChatRole::System, ChatRole::Assistant, ChatRole::User, ChatRole::User]
        );
        assert_eq!(messages[3].content, "ready?");
        assert!(messages[0].content.contains("Mars sector"));
    }
}
