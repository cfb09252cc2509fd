// Canned Replies
//
// Keyword-matched answers used when no response generator is available.

/// First message shown when a chat opens
pub const GREETING: &str =
    "¡Hola! Soy el asistente virtual del Cementerio San Agustín. ¿En qué puedo ayudarte?";

/// Suggested questions offered with the greeting
pub const QUICK_OPTIONS: [&str; 5] = [
    "¿Hay bóvedas disponibles?",
    "Consultar pagos",
    "Hacer una reserva",
    "Buscar difunto",
    "Horarios de atención",
];

/// Reply used when the generator fails
pub const APOLOGY: &str = "Lo siento, hubo un error al procesar tu solicitud.";

const DEFAULT_REPLY: &str =
    "Entiendo tu consulta. ¿Te gustaría que te conecte con uno de nuestros asesores para más información?";

const RULES: &[(&[&str], &str)] = &[
    (
        &["bóveda", "boveda"],
        "Actualmente tenemos 15 bóvedas disponibles en diferentes sectores. ¿Te gustaría conocer más detalles?",
    ),
    (
        &["pago"],
        "Para consultar pagos pendientes, necesito que me proporciones tu número de identificación.",
    ),
    (
        &["reserva"],
        "Puedes realizar una reserva a través de nuestra sección de Gestión. ¿Te gustaría que te guíe en el proceso?",
    ),
    (
        &["enterrad"],
        "Para buscar información sobre personas enterradas, necesito el nombre completo de la persona.",
    ),
    (
        &["horario"],
        "Nuestro horario de atención es: Lunes a Viernes de 8:00 AM a 6:00 PM, Sábados y Domingos de 9:00 AM a 4:00 PM, y Feriados de 10:00 AM a 2:00 PM.",
    ),
];

/// Pick the reply of the first rule whose keyword appears in `message`
pub fn canned_reply(message: &str) -> &'static str {
    let lowered = message.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, reply)| *reply)
        .unwrap_or(DEFAULT_REPLY)
}
