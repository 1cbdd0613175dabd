//! Prompt builders for the AI assist endpoints
//!
//! Each helper turns request fields into the natural-language prompt sent to
//! the generative model. Kept as pure functions so the wording is testable
//! without touching the network.

/// System instruction for the profile interview assistant
///
/// The assistant runs a five-question interview and must answer with a JSON
/// object so the response can be decoded into a structured turn.
pub const PROFILE_ASSISTANT_INSTRUCTION: &str = "\
Eres Vibrai Assist, un asistente amable que ayuda a crear perfiles de citas. \
Haz cinco preguntas, una por turno: tiempo libre, pasiones, cómo te describen \
tus amigos, qué buscas en una conexión, y un superpoder. Tras la quinta \
respuesta, redacta una biografía breve en primera persona. Responde SIEMPRE \
con un objeto JSON con los campos \"responseText\" (string), \"generatedBio\" \
(string o null) e \"isProfileComplete\" (boolean). No añadas texto fuera del \
JSON.";

/// Prompt to derive interests from a bio
pub fn generate_interests_prompt(bio_text: &str) -> String {
    format!(
        "De la siguiente biografía, extrae de 2 a 4 intereses cortos (una o dos \
         palabras cada uno). Biografía: \"{}\". \
         Salida: solo un array JSON de strings.",
        bio_text
    )
}

/// Prompt for a short, playful icebreaker
pub fn suggest_icebreaker_prompt(
    user_name: &str,
    user_interests: &[String],
    attempt_number: u32,
) -> String {
    let interests = if user_interests.is_empty() {
        "ninguno".to_string()
    } else {
        user_interests.join(", ")
    };

    format!(
        "Eres un asistente de citas experto en iniciar conversaciones con un toque \
         DIVERTIDO y COQUETO. Ayuda a generar un rompehielos para {name}.\n\
         Los intereses conocidos de {name} son: {interests}. Intenta referenciar \
         sutilmente un interés si es posible.\n\
         Genera una sugerencia CORTA (máx 5 palabras). No incluyas saludos. \
         Intento #{attempt}.\n\
         Ejemplos: \"¿Escapada o travesura?\", \"¿Cenas o me cocinas?\", \
         \"¿Problemas o diversión?\"\n\
         Genera UN rompehielos. Solo el texto del rompehielos:",
        name = user_name,
        interests = interests,
        attempt = attempt_number,
    )
}

/// Prompt for two short chat reply suggestions, returned as a JSON array
pub fn suggest_replies_prompt(
    last_message_text: &str,
    own_name: &str,
    chat_partner_name: &str,
) -> String {
    format!(
        "Contexto: {partner} dijo, \"{message}\".\n\
         Tarea para {own}: 2 respuestas muy cortas (máx 4 palabras cada una), \
         que sean DIVERTIDAS y COQUETAS.\n\
         Salida: Solo array JSON de strings.\n\
         Ejemplo de salida para \"Estoy aburrido/a\": \
         [\"¿Te aburro yo?\", \"Tengo ideas traviesas...\"]\n\
         Genera el array JSON:",
        partner = chat_partner_name,
        message = last_message_text,
        own = own_name,
    )
}

/// Prompt to restyle a message toward a goal
pub fn rewrite_message_prompt(original_message: &str, rewrite_goal: &str) -> String {
    let goal = if rewrite_goal == "default" {
        "más atractivo y natural"
    } else {
        rewrite_goal
    };

    format!(
        "Reescribe este mensaje: \"{}\" para que sea {}. Mantén el idioma \
         original y una longitud similar. Devuelve solo el mensaje reescrito:",
        original_message, goal
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interests_prompt_embeds_bio() {
        let prompt = generate_interests_prompt("Me encanta el senderismo");
        assert!(prompt.contains("Me encanta el senderismo"));
        assert!(prompt.contains("array JSON"));
    }

    #[test]
    fn test_icebreaker_prompt_references_interest_and_attempt() {
        let interests = vec!["fotografía".to_string(), "cocina".to_string()];
        let prompt = suggest_icebreaker_prompt("Ana", &interests, 3);
        assert!(prompt.contains("Ana"));
        assert!(prompt.contains("fotografía, cocina"));
        assert!(prompt.contains("Intento #3"));
    }

    #[test]
    fn test_icebreaker_prompt_without_interests() {
        let prompt = suggest_icebreaker_prompt("Ana", &[], 1);
        assert!(prompt.contains("ninguno"));
    }

    #[test]
    fn test_replies_prompt_names_both_parties() {
        let prompt = suggest_replies_prompt("Estoy aburrida", "Luis", "Ana");
        assert!(prompt.contains("Ana dijo"));
        assert!(prompt.contains("Tarea para Luis"));
        assert!(prompt.contains("array JSON"));
    }

    #[test]
    fn test_rewrite_prompt_uses_goal() {
        let prompt = rewrite_message_prompt("hola que tal", "más divertido");
        assert!(prompt.contains("hola que tal"));
        assert!(prompt.contains("más divertido"));
    }

    #[test]
    fn test_rewrite_prompt_default_goal() {
        let prompt = rewrite_message_prompt("hola", "default");
        assert!(prompt.contains("más atractivo y natural"));
    }

    #[test]
    fn test_assistant_instruction_demands_json_contract() {
        assert!(PROFILE_ASSISTANT_INSTRUCTION.contains("responseText"));
        assert!(PROFILE_ASSISTANT_INSTRUCTION.contains("generatedBio"));
        assert!(PROFILE_ASSISTANT_INSTRUCTION.contains("isProfileComplete"));
    }
}
