use botica_core::StrategyIntent;

/// A parsed slash command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    /// Manual joke
    Joke,
    /// Sales advice; `payload` is the inline conversation, if any
    Advise {
        intent: StrategyIntent,
        payload: Option<String>,
    },
    GeneralAnalysis(Option<String>),
    SalesHelp,
    Status,
    ClearContext,
    Unknown(String),
}

/// Command tokens with their menu descriptions.
const CATALOGUE: [(&str, &str); 10] = [
    ("start", "Iniciar el bot"),
    ("help", "Ver todos los comandos"),
    ("chiste", "Generar un chiste manual"),
    ("rechazar_devolucion", "Consejos para rechazar devoluciones"),
    ("upselling", "Estrategias de upselling"),
    ("motivar_compra", "Técnicas de motivación de compra"),
    ("analisis_general", "Análisis general de conversación"),
    ("ayuda_ventas", "Ayuda del asesor de ventas"),
    ("estado", "Estado del bot y servicios"),
    ("limpiar_contexto", "Limpiar historial de mensajes"),
];

impl Command {
    #[must_use]
    pub const fn catalogue() -> &'static [(&'static str, &'static str)] {
        &CATALOGUE
    }

    /// Parse text starting with `/` into a command.
    ///
    /// The token before the first whitespace is the command (case-insensitive,
    /// `@bot_name` suffix dropped); the rest, without leading whitespace, is
    /// the optional payload.
    /// Returns `None` for text that is not a command.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim_start();
        if !text.starts_with('/') {
            return None;
        }

        let (token, rest) = text
            .split_once(char::is_whitespace)
            .unwrap_or((text, ""));
        let token = token.to_lowercase();
        // Remove bot mention if present (e.g., "/start@my_bot")
        let name = token.split('@').next().unwrap_or(&token);
        // Trailing whitespace is part of the payload and counts toward its length
        let payload = Some(rest.trim_start())
            .filter(|p| !p.trim().is_empty())
            .map(ToString::to_string);

        let command = match name {
            "/start" => Self::Start,
            "/help" => Self::Help,
            "/chiste" => Self::Joke,
            "/rechazar_devolucion" => Self::Advise {
                intent: StrategyIntent::RefundRejection,
                payload,
            },
            "/upselling" => Self::Advise {
                intent: StrategyIntent::Upselling,
                payload,
            },
            "/motivar_compra" => Self::Advise {
                intent: StrategyIntent::PurchaseMotivation,
                payload,
            },
            "/analisis_general" => Self::GeneralAnalysis(payload),
            "/ayuda_ventas" => Self::SalesHelp,
            "/estado" => Self::Status,
            "/limpiar_contexto" => Self::ClearContext,
            other => Self::Unknown(other.to_string()),
        };

        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freeform_text_is_not_a_command() {
        assert_eq!(Command::parse("hola a todos"), None);
        assert_eq!(Command::parse("a/b"), None);
    }

    #[test]
    fn commands_are_case_insensitive_and_ignore_mentions() {
        assert_eq!(Command::parse("/START"), Some(Command::Start));
        assert_eq!(Command::parse("/Chiste@botica_bot"), Some(Command::Joke));
        assert_eq!(Command::parse("/estado"), Some(Command::Status));
    }

    #[test]
    fn payload_is_split_on_first_whitespace() {
        assert_eq!(
            Command::parse("/upselling\nCliente: hola\nVendedor: buenas"),
            Some(Command::Advise {
                intent: StrategyIntent::Upselling,
                payload: Some("Cliente: hola\nVendedor: buenas".to_string()),
            })
        );
        assert_eq!(
            Command::parse("/rechazar_devolucion    "),
            Some(Command::Advise {
                intent: StrategyIntent::RefundRejection,
                payload: None,
            })
        );
    }

    #[test]
    fn payload_keeps_trailing_whitespace() {
        assert_eq!(
            Command::parse("/upselling  Cliente: hola \n"),
            Some(Command::Advise {
                intent: StrategyIntent::Upselling,
                payload: Some("Cliente: hola \n".to_string()),
            })
        );
    }

    #[test]
    fn unknown_token_is_kept_lowercased() {
        assert_eq!(
            Command::parse("/Bailar ahora"),
            Some(Command::Unknown("/bailar".to_string()))
        );
    }

    #[test]
    fn catalogue_tokens_all_parse_to_known_commands() {
        for (token, _) in Command::catalogue() {
            let parsed = Command::parse(&format!("/{token}"));
            assert!(!matches!(parsed, None | Some(Command::Unknown(_))), "{token}");
        }
    }
}
