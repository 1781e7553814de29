//! Client entity (database row mapping).

use sqlx::FromRow;

/// Database row mapping for the client table.
#[derive(Debug, Clone, FromRow)]
pub struct ClientEntity {
    pub client_id: i32,
    pub name: String,
    pub surname: Option<String>,
    pub email: String,
}

impl From<ClientEntity> for domain::models::Client {
    fn from(entity: ClientEntity) -> Self {
        Self {
            client_id: entity.client_id,
            name: entity.name,
            surname: entity.surname,
            email: entity.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_entity_into_domain() {
        let entity = ClientEntity {
            client_id: 18,
            name: "Иван".to_string(),
            surname: Some("Иванов".to_string()),
            email: "i_ivanov@servername.ru".to_string(),
        };

        let client: domain::models::Client = entity.into();
        assert_eq!(client.client_id, 18);
        assert_eq!(client.surname.as_deref(), Some("Иванов"));
        assert_eq!(client.email, "i_ivanov@servername.ru");
    }
}
