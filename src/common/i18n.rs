// src/common/i18n.rs

use std::collections::HashMap;
use std::sync::Arc;

pub const DEFAULT_LANG: &str = "pt";

// (chave, português, inglês)
const MESSAGES: &[(&str, &str, &str)] = &[
    ("errors.validation", "Um ou mais campos são inválidos.", "One or more fields are invalid."),
    ("errors.invalid_date", "Data inválida. Use o formato AAAA-MM-DD.", "Invalid date. Use the YYYY-MM-DD format."),
    ("errors.invalid_week", "Semana inválida. Use o formato AAAA-Www.", "Invalid week. Use the YYYY-Www format."),
    ("errors.invalid_month", "Mês inválido. Use o formato AAAA-MM.", "Invalid month. Use the YYYY-MM format."),
    ("errors.email_already_exists", "Este e-mail já está em uso.", "This e-mail is already in use."),
    ("errors.invalid_credentials", "E-mail ou senha inválidos.", "Invalid e-mail or password."),
    ("errors.invalid_token", "Token de autenticação inválido ou ausente.", "Invalid or missing authentication token."),
    ("errors.user_not_found", "Usuário não encontrado.", "User not found."),
    ("errors.account_disabled", "Este usuário está desativado.", "This user has been deactivated."),
    ("errors.forbidden", "Você não tem permissão para realizar esta ação.", "You are not allowed to perform this action."),
    ("errors.resource_not_found", "Registro não encontrado.", "Record not found."),
    ("errors.inventory_item_not_found", "Item de estoque não encontrado.", "Inventory item not found."),
    ("errors.internal", "Ocorreu um erro inesperado.", "An unexpected error occurred."),
];

// Mensagens traduzidas, indexadas por idioma e chave
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: Arc<HashMap<String, HashMap<&'static str, &'static str>>>,
}

impl Default for I18nStore {
    fn default() -> Self {
        let mut pt = HashMap::new();
        let mut en = HashMap::new();
        for (key, pt_msg, en_msg) in MESSAGES {
            pt.insert(*key, *pt_msg);
            en.insert(*key, *en_msg);
        }

        let mut messages = HashMap::new();
        messages.insert("pt".to_string(), pt);
        messages.insert("en".to_string(), en);

        Self { messages: Arc::new(messages) }
    }
}

impl I18nStore {
    /// Traduz a chave; idiomas desconhecidos caem para o português.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(lang)
            .or_else(|| self.messages.get(DEFAULT_LANG))
            .and_then(|table| table.get(key))
            .map(|msg| msg.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_portuguese() {
        let store = I18nStore::default();
        assert_eq!(
            store.translate("de", "errors.user_not_found"),
            "Usuário não encontrado."
        );
    }

    #[test]
    fn unknown_key_is_returned_verbatim() {
        let store = I18nStore::default();
        assert_eq!(store.translate("en", "errors.nope"), "errors.nope");
    }
}
