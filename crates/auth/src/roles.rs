use serde::{Deserialize, Serialize};

/// Role of a user account.
///
/// The API knows exactly two roles; anything administrative (catalog and
/// user management) is reserved to [`Role::Administrador`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Administrador,
    #[default]
    Colaborador,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrador => "administrador",
            Role::Colaborador => "colaborador",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Administrador)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Role {
    type Err = stockdesk_core::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "administrador" | "admin" => Ok(Role::Administrador),
            "colaborador" => Ok(Role::Colaborador),
            other => Err(stockdesk_core::DomainError::validation(format!("unknown role '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_lowercase_spanish() {
        assert_eq!(serde_json::to_string(&Role::Administrador).unwrap(), "\"administrador\"");
        let role: Role = serde_json::from_str("\"colaborador\"").unwrap();
        assert_eq!(role, Role::Colaborador);
    }

    #[test]
    fn parses_cli_input() {
        assert_eq!(" Administrador ".parse::<Role>().unwrap(), Role::Administrador);
        assert!("root".parse::<Role>().is_err());
    }
}
