//! Fixed demonstration sequence over the client store.

use domain::models::{ClientUpdate, NewClient};
use persistence::{ClientStore, StoreError};
use tracing::info;

/// Clients inserted by the demonstration, as (name, surname, email, phones).
pub const DEMO_CLIENTS: [(&str, &str, &str, &[&str]); 4] = [
    (
        "Иван",
        "Иванов",
        "i_ivanov@servername.ru",
        &["0000000000", "1111111111", "3333333333"],
    ),
    ("Петр", "Петров", "p_petrov@servername.ru", &["2222222222"]),
    ("Максим", "Кузьмин", "m.kuzmin@servername.ru", &[]),
    (
        "Григорий",
        "Гришин",
        "g_grishin@servername.ru",
        &["4444444444", "5555555555"],
    ),
];

/// Emails the demonstration updates clients to.
const UPDATED_EMAILS: [&str; 2] = ["m_kuzmin@servername.ru", "a_vasilev@servername.ru"];

/// Searches printed at the end of the demonstration.
pub const DEMO_SEARCHES: [&str; 3] = ["Петров", "servername.ru", "00"];

pub fn demo_clients() -> Vec<NewClient> {
    DEMO_CLIENTS
        .iter()
        .map(|(name, surname, email, phones)| {
            NewClient::new(*name, Some(*surname), *email).with_phones(phones.iter().copied())
        })
        .collect()
}

/// Runs the demonstration.
///
/// Returns the ids found for each of [`DEMO_SEARCHES`], in the same order.
pub async fn run(store: &mut ClientStore) -> Result<Vec<Vec<i32>>, StoreError> {
    reset(store).await?;

    let mut ids = Vec::with_capacity(DEMO_CLIENTS.len());
    for client in demo_clients() {
        ids.push(store.add_client(&client).await?);
    }
    let (ivanov, kuzmin, grishin) = (ids[0], ids[2], ids[3]);
    info!(?ids, "Demo clients added");

    store.add_phone(kuzmin, "1234567890").await?;

    store
        .update_client(kuzmin, &ClientUpdate::new().email(UPDATED_EMAILS[0]))
        .await?;
    store
        .update_client(
            grishin,
            &ClientUpdate::new()
                .name("Александр")
                .surname(Some("Васильев".to_string()))
                .email(UPDATED_EMAILS[1]),
        )
        .await?;

    store.del_phone(ivanov, "0000000000").await?;
    store.del_client(ivanov).await?;

    let mut results = Vec::with_capacity(DEMO_SEARCHES.len());
    for needle in DEMO_SEARCHES {
        results.push(store.find_client(needle).await?);
    }
    Ok(results)
}

/// Deletes clients left behind by an earlier demonstration run.
async fn reset(store: &mut ClientStore) -> Result<(), StoreError> {
    let emails = DEMO_CLIENTS
        .iter()
        .map(|(_, _, email, _)| *email)
        .chain(UPDATED_EMAILS);

    for email in emails {
        for client_id in store.find_client(email).await? {
            let exact = store
                .get_client(client_id)
                .await?
                .is_some_and(|client| client.email == email);
            if exact {
                store.del_client(client_id).await?;
                info!(client_id, email, "Removed client from previous demo run");
            }
        }
    }
    Ok(())
}
