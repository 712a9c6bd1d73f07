//! Mapping update requests and their outcomes.

use serde::{Deserialize, Serialize};

/// A request to change the port mapping, as submitted by the dashboard form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingUpdate {
    /// Port to change. Required.
    #[serde(default)]
    pub port: Option<String>,
    /// New label. Ignored for deletes.
    #[serde(default)]
    pub app_name: Option<String>,
    /// `delete` removes the mapping; anything else saves it.
    #[serde(default)]
    pub action: Option<String>,
}

impl MappingUpdate {
    /// Request to set the label for a port.
    pub fn save(port: impl Into<String>, app_name: impl Into<String>) -> Self {
        Self {
            port: Some(port.into()),
            app_name: Some(app_name.into()),
            action: None,
        }
    }

    /// Request to remove the label for a port.
    pub fn delete(port: impl Into<String>) -> Self {
        Self {
            port: Some(port.into()),
            app_name: None,
            action: Some("delete".to_string()),
        }
    }

    pub fn is_delete(&self) -> bool {
        self.action.as_deref() == Some("delete")
    }

    /// The submitted port, or `None` when missing or blank.
    pub fn port_input(&self) -> Option<&str> {
        self.port.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }

    /// The submitted label with surrounding whitespace removed.
    pub fn label(&self) -> &str {
        self.app_name.as_deref().map(str::trim).unwrap_or_default()
    }
}

/// What happened to a [`MappingUpdate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MappingOutcome {
    /// The label was stored.
    Saved { port: u16, label: String },
    /// The label was removed.
    Removed { port: u16 },
    /// A delete targeted a port with no label. Nothing was written.
    NotFound { port: u16 },
    /// No port was submitted.
    MissingPort,
    /// The port was not a number in 0-65535.
    InvalidPort { input: String },
    /// A save was submitted with a blank label.
    BlankLabel,
}

impl MappingOutcome {
    /// Whether the mapping was changed.
    pub fn is_success(&self) -> bool {
        matches!(self, MappingOutcome::Saved { .. } | MappingOutcome::Removed { .. })
    }

    /// User-facing notice text.
    pub fn message(&self) -> String {
        match self {
            MappingOutcome::Saved { port, label } => {
                format!("Mapeamento para porta {} salvo como \"{}\" com sucesso!", port, label)
            }
            MappingOutcome::Removed { port } => {
                format!("Mapeamento para porta {} removido com sucesso!", port)
            }
            MappingOutcome::NotFound { port } => {
                format!("Mapeamento para porta {} não encontrado.", port)
            }
            MappingOutcome::MissingPort => "A porta é obrigatória!".to_string(),
            MappingOutcome::InvalidPort { input } => format!("Porta inválida: {}.", input),
            MappingOutcome::BlankLabel => {
                "O nome da aplicação não pode estar vazio para salvar/atualizar.".to_string()
            }
        }
    }
}

impl std::fmt::Display for MappingOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}
