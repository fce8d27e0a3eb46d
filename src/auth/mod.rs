pub mod password;
pub mod scope;
pub mod token;

use serde::{Deserialize, Serialize};

pub use scope::TenantScope;
pub use token::{Claims, TokenError};

/// User roles. Wire values ("admin", "veterinario", "operario") are the
/// ones embedded in claims tokens and stored in the users table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum Role {
    Admin,
    Veterinario,
    Operario,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Veterinario => "veterinario",
            Role::Operario => "operario",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_to_wire_names() {
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), "admin");
        assert_eq!(serde_json::to_value(Role::Veterinario).unwrap(), "veterinario");
        assert_eq!(serde_json::to_value(Role::Operario).unwrap(), "operario");
    }
}
