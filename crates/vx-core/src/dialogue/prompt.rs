//! Prompt construction for the generated-text strategy

use crate::llm::Message;
use crate::persona::Persona;
use crate::session::{Speaker, Turn};

/// Words describing how receptive the patient currently is
pub fn openness_descriptor(openness: f64) -> &'static str {
    if openness < 0.35 {
        "very resistant"
    } else if openness < 0.65 {
        "somewhat open"
    } else {
        "fairly open"
    }
}

/// Short persona-describing system instruction
pub fn system_instruction(persona: &Persona, openness: f64) -> String {
    let concerns = persona
        .concerns
        .iter()
        .map(|c| c.replace('_', " "))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are {name}, a {personality} patient who is hesitant about getting vaccinated. \
         Your main concerns are: {concerns}. \
         You are currently {descriptor} to the idea of vaccination. \
         A healthcare student is talking with you. Reply in character with one to three \
         short sentences, stay natural, and never say that you are an AI.",
        name = persona.name,
        personality = persona.personality,
        descriptor = openness_descriptor(openness),
    )
}

/// Map the last `window` turns plus the new student message to a two-role transcript
///
/// Patient turns become assistant messages and student turns become user messages.
pub fn transcript(history: &[Turn], window: usize, message: &str) -> Vec<Message> {
    let start = history.len().saturating_sub(window);

    history[start..]
        .iter()
        .map(|turn| match turn.speaker {
            Speaker::Patient => Message::assistant(turn.message.clone()),
            Speaker::Student => Message::user(turn.message.clone()),
        })
        .chain(std::iter::once(Message::user(message)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona;

    #[test]
    fn test_descriptor_bands() {
        assert_eq!(openness_descriptor(0.2), "very resistant");
        assert_eq!(openness_descriptor(0.35), "somewhat open");
        assert_eq!(openness_descriptor(0.64), "somewhat open");
        assert_eq!(openness_descriptor(0.65), "fairly open");
    }

    #[test]
    fn test_system_instruction_mentions_persona() {
        let p = persona::resolve("safety_concerned");
        let text = system_instruction(p, 0.3);
        assert!(text.contains("Sarah"));
        assert!(text.contains("skeptical"));
        assert!(text.contains("long term effects"));
        assert!(text.contains("testing"));
        assert!(text.contains("very resistant"));
    }

    #[test]
    fn test_transcript_windows_history() {
        let history = vec![
            Turn::patient("p0"),
            Turn::student("s1"),
            Turn::patient("p1"),
            Turn::student("s2"),
            Turn::patient("p2"),
        ];

        let messages = transcript(&history, 4, "s3");
        assert_eq!(
            messages,
            vec![
                Message::user("s1"),
                Message::assistant("p1"),
                Message::user("s2"),
                Message::assistant("p2"),
                Message::user("s3"),
            ]
        );
    }

    #[test]
    fn test_transcript_short_history() {
        let history = vec![Turn::patient("hello")];
        let messages = transcript(&history, 4, "hi");
        assert_eq!(messages, vec![Message::assistant("hello"), Message::user("hi")]);

        assert_eq!(transcript(&history, 0, "hi"), vec![Message::user("hi")]);
    }
}
