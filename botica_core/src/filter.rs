//! Joke-appropriateness check for buffered conversation context.

/// Topics that rule out an automatic joke.
const SENSITIVE_TOPICS: [&str; 6] = [
    "muerte",
    "enfermedad",
    "accidente",
    "problema",
    "triste",
    "dolor",
];

/// Returns false for blank context or context mentioning a sensitive topic
/// (case-insensitive substring match).
#[must_use]
pub fn is_appropriate(context: &str) -> bool {
    if context.trim().is_empty() {
        return false;
    }

    let lowered = context.to_lowercase();
    !SENSITIVE_TOPICS
        .iter()
        .any(|topic| lowered.contains(topic))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_context_is_rejected() {
        assert!(!is_appropriate(""));
        assert!(!is_appropriate("   \n\t"));
    }

    #[test]
    fn sensitive_topics_are_rejected_case_insensitively() {
        assert!(!is_appropriate("Ana: tengo un PROBLEMA con el coche"));
        assert!(!is_appropriate("Luis: qué Triste noticia"));
        assert!(!is_appropriate("Eva: me duele, mucho dolor"));
        assert!(!is_appropriate("Eva: tuvo un accidente"));
    }

    #[test]
    fn matches_inside_longer_words() {
        assert!(!is_appropriate("Ana: son problemas menores"));
    }

    #[test]
    fn ordinary_chatter_is_fine() {
        assert!(is_appropriate("Ana: ¿vamos a la playa?\nLuis: ¡sí, con sombrilla!"));
    }
}
