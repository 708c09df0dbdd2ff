//! Conversation context reconstruction.
//!
//! Rebuilds the two per-narrator message sequences from a session's
//! system prompt and prior turns. Pure, no I/O: the same inputs always
//! produce the same two transcripts.

use dungeonduel_types::game::Turn;
use dungeonduel_types::llm::Message;

/// Build both narrators' transcripts for the next turn.
///
/// Each transcript is: a leading system entry, then for every prior turn
/// a user entry (the player action) and an assistant entry (that
/// narrator's own prior response), then the new action as the final user
/// entry. The two transcripts are identical except for the assistant
/// entries -- each narrator sees its own conversational memory, never its
/// counterpart's.
pub fn build_transcripts(
    system_prompt: &str,
    turns: &[Turn],
    action: &str,
) -> (Vec<Message>, Vec<Message>) {
    let transcript_a = transcript(system_prompt, turns, action, |t| &t.response_a);
    let transcript_b = transcript(system_prompt, turns, action, |t| &t.response_b);
    (transcript_a, transcript_b)
}

fn transcript(
    system_prompt: &str,
    turns: &[Turn],
    action: &str,
    response: impl Fn(&Turn) -> &str,
) -> Vec<Message> {
    let mut messages = Vec::with_capacity(2 * turns.len() + 2);
    messages.push(Message::system(system_prompt));
    for turn in turns {
        messages.push(Message::user(&turn.player_action));
        messages.push(Message::assistant(response(turn)));
    }
    messages.push(Message::user(action));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeonduel_types::llm::MessageRole;

    fn turn(number: u32, action: &str, a: &str, b: &str) -> Turn {
        Turn {
            session_id: "s1".to_string(),
            number,
            player_action: action.to_string(),
            response_a: a.to_string(),
            response_b: b.to_string(),
        }
    }

    #[test]
    fn test_fresh_session_has_exactly_system_and_action() {
        let (a, b) = build_transcripts("You are a narrator.", &[], "I open the door");

        for transcript in [&a, &b] {
            assert_eq!(transcript.len(), 2);
            assert_eq!(transcript[0].role, MessageRole::System);
            assert_eq!(transcript[0].content, "You are a narrator.");
            assert_eq!(transcript[1].role, MessageRole::User);
            assert_eq!(transcript[1].content, "I open the door");
        }
    }

    #[test]
    fn test_prior_turns_replayed_in_order() {
        let turns = vec![
            turn(1, "I open the door", "It creaks open.", "A draft greets you."),
            turn(2, "I step inside", "Darkness swallows you.", "Torches flare."),
        ];
        let (a, _) = build_transcripts("sp", &turns, "I look around");

        let roles: Vec<MessageRole> = a.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::System,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
            ]
        );
        assert_eq!(a[1].content, "I open the door");
        assert_eq!(a[2].content, "It creaks open.");
        assert_eq!(a[3].content, "I step inside");
        assert_eq!(a[4].content, "Darkness swallows you.");
        assert_eq!(a[5].content, "I look around");
    }

    #[test]
    fn test_transcripts_differ_only_in_assistant_entries() {
        let turns = vec![
            turn(1, "act 1", "a says one", "b says one"),
            turn(2, "act 2", "a says two", "b says two"),
        ];
        let (a, b) = build_transcripts("sp", &turns, "act 3");

        assert_eq!(a.len(), b.len());
        for (ma, mb) in a.iter().zip(&b) {
            assert_eq!(ma.role, mb.role);
            if ma.role == MessageRole::Assistant {
                assert_ne!(ma.content, mb.content);
            } else {
                assert_eq!(ma.content, mb.content);
            }
        }
        assert_eq!(b[2].content, "b says one");
        assert_eq!(b[4].content, "b says two");
    }

    #[test]
    fn test_deterministic() {
        let turns = vec![turn(1, "act", "ra", "rb")];
        let first = build_transcripts("sp", &turns, "next");
        let second = build_transcripts("sp", &turns, "next");
        assert_eq!(first, second);
    }
}
