//! User-facing reply texts.

use botica_core::StrategyIntent;
use botica_core::validation::{MAX_PAYLOAD_CHARS, MIN_PAYLOAD_CHARS};
use chrono::{DateTime, Local};

const DATE_TIME: &str = "%d/%m/%Y %H:%M";
const DATE_TIME_SECONDS: &str = "%d/%m/%Y %H:%M:%S";

#[must_use]
pub const fn welcome() -> &'static str {
    "🤖 ¡Hola! Soy tu Asistente de IA\n\n\
     🎭 En grupos: Genero chistes basados en la conversación cada 3-4 mensajes\n\
     💼 En chats privados: Asesoro ventas analizando conversaciones\n\n\
     📋 Comandos disponibles:\n\
     • /help - Ver todos los comandos\n\
     • /chiste - Generar chiste manual\n\
     • /ayuda_ventas - Ayuda para asesoría de ventas\n\
     • /estado - Ver estado del bot\n\n\
     ✨ ¡Empecemos!"
}

#[must_use]
pub const fn help() -> &'static str {
    "🆘 AYUDA - Comandos disponibles:\n\n\
     🎭 CHISTES:\n\
     • /chiste - Generar chiste manual\n\
     • /limpiar_contexto - Limpiar historial de mensajes\n\n\
     💼 ASESORÍA DE VENTAS:\n\
     • /rechazar_devolucion - Consejos para rechazar devoluciones\n\
     • /upselling - Estrategias de upselling\n\
     • /motivar_compra - Técnicas de motivación\n\
     • /analisis_general - Análisis general de conversación\n\
     • /ayuda_ventas - Ayuda detallada de ventas\n\n\
     🔧 UTILIDADES:\n\
     • /estado - Estado del bot y servicios\n\
     • /help - Esta ayuda\n\n\
     💡 Tip: En grupos genero chistes automáticamente. \
     En chats privados uso los comandos de ventas."
}

#[must_use]
pub const fn sales_help() -> &'static str {
    "🔧 AYUDA - Asesor de Ventas\n\n\
     📝 Cómo usar:\n\
     1. Copia la conversación entre cliente y vendedor\n\
     2. Usa uno de estos comandos seguido de la conversación:\n\n\
     🚫 /rechazar_devolucion [conversación]\n\
     \x20\x20\x20- Consejos para rechazar devoluciones diplomáticamente\n\n\
     📈 /upselling [conversación]\n\
     \x20\x20\x20- Estrategias para vender productos mejores\n\n\
     💪 /motivar_compra [conversación]\n\
     \x20\x20\x20- Técnicas para motivar la compra\n\n\
     📊 /analisis_general [conversación]\n\
     \x20\x20\x20- Análisis general con recomendaciones\n\n\
     ⚠️ Requisitos:\n\
     • La conversación debe tener entre 50 y 10,000 caracteres\n\
     • Incluye tanto mensajes del cliente como del vendedor\n\
     • Usa formato: 'Cliente: mensaje' y 'Vendedor: mensaje'"
}

/// Asks for the conversation a sales command was sent without.
#[must_use]
pub const fn payload_prompt(intent: StrategyIntent) -> &'static str {
    match intent {
        StrategyIntent::RefundRejection => {
            "📝 Envía la conversación cliente-vendedor después del comando.\n\
             Ejemplo: /rechazar_devolucion Cliente: Quiero devolver... Vendedor: ..."
        }
        _ => "📝 Envía la conversación cliente-vendedor después del comando.",
    }
}

#[must_use]
pub const fn general_payload_prompt() -> &'static str {
    "📝 Envía la conversación para analizar después del comando."
}

#[must_use]
pub fn invalid_conversation() -> String {
    format!(
        "❌ Conversación inválida. Debe tener entre {MIN_PAYLOAD_CHARS} y {} caracteres.",
        thousands(MAX_PAYLOAD_CHARS)
    )
}

#[must_use]
pub fn unknown_command(command: &str) -> String {
    format!("❓ Comando desconocido: {command}\nUsa /help para ver los comandos disponibles.")
}

#[must_use]
pub const fn context_cleared() -> &'static str {
    "🧹 Contexto limpiado. El historial de mensajes se ha reiniciado."
}

/// Intent reported not ready by its availability probe.
#[must_use]
pub fn service_unavailable(intent: StrategyIntent) -> String {
    match intent {
        StrategyIntent::Joke => {
            "😅 El servicio de chistes no está disponible en este momento.".to_string()
        }
        sales => format!(
            "⚠️ El servicio de {} no está disponible en este momento. Inténtalo más tarde.",
            sales.display_name()
        ),
    }
}

/// Apology after a failed AI call.
#[must_use]
pub fn ai_failed(intent: StrategyIntent) -> String {
    match intent {
        StrategyIntent::Joke => "😅 Lo siento, no puedo generar un chiste en este momento.".to_string(),
        sales => format!(
            "❌ Error: No pude analizar la conversación para {}. \
             Verifica que el servicio de IA esté disponible.",
            sales.display_name().to_lowercase()
        ),
    }
}

const fn advice_header(intent: StrategyIntent) -> &'static str {
    match intent {
        StrategyIntent::RefundRejection => "🚫 ESTRATEGIA: Rechazo de Devolución",
        StrategyIntent::Upselling => "📈 ESTRATEGIA: Upselling",
        StrategyIntent::PurchaseMotivation => "💪 ESTRATEGIA: Motivación de Compra",
        StrategyIntent::Joke => "😄 CHISTE",
    }
}

#[must_use]
pub fn advice(intent: StrategyIntent, advice: &str, now: DateTime<Local>) -> String {
    format!(
        "{}\n⏰ {}\n\n{advice}\n\n📋 Consejo generado por IA",
        advice_header(intent),
        now.format(DATE_TIME)
    )
}

/// Local summary of a conversation, no AI involved.
#[must_use]
pub fn general_analysis(conversation: &str, now: DateTime<Local>) -> String {
    format!(
        "📊 ANÁLISIS GENERAL DE VENTAS\n\n\
         📝 Resumen de la conversación:\n\
         • Longitud: {} caracteres\n\
         • Líneas de diálogo: {}\n\n\
         💡 Recomendaciones generales:\n\
         • Usa las estrategias específicas para análisis detallado\n\
         • Comandos disponibles:\n\
         \x20\x20- /rechazar_devolucion - Para rechazar devoluciones\n\
         \x20\x20- /upselling - Para técnicas de upselling\n\
         \x20\x20- /motivar_compra - Para motivar la compra\n\n\
         ⏰ Análisis realizado: {}",
        conversation.chars().count(),
        conversation.lines().count(),
        now.format(DATE_TIME)
    )
}

/// Figures shown by `/estado`.
#[derive(Debug, Clone, Copy)]
pub struct StatusReport {
    pub jokes_available: bool,
    pub active_chats: usize,
    pub pending_messages: u64,
    pub sales_available: bool,
    pub advice_total: u64,
}

#[must_use]
pub fn status(report: &StatusReport, now: DateTime<Local>) -> String {
    format!(
        "🔧 ESTADO DEL BOT\n\n\
         🎭 Servicio de Chistes:\n\
         • Estado: {}\n\
         • Chats activos: {}\n\
         • Mensajes procesados: {}\n\n\
         💼 Servicio de Ventas:\n\
         • Estado: {}\n\
         • Consejos dados: {}\n\n\
         ⏰ Última actualización: {}",
        active_label(report.jokes_available),
        report.active_chats,
        report.pending_messages,
        active_label(report.sales_available),
        report.advice_total,
        now.format(DATE_TIME_SECONDS)
    )
}

const fn active_label(available: bool) -> &'static str {
    if available { "✅ Activo" } else { "❌ Inactivo" }
}

fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
