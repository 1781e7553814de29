//! Integration tests for the demonstration sequence.
//!
//! These tests require a running PostgreSQL instance and use their own
//! database, so that other clients never show up in the demo searches.
//!
//! Run with: TEST_DATABASE_USER=postgres TEST_DATABASE_PASSWORD=postgres cargo test --test demo_integration

use client_records_cli::demo;
use persistence::{ClientStore, ConnectionConfig};

fn demo_config() -> Option<ConnectionConfig> {
    let user = std::env::var("TEST_DATABASE_USER").ok()?;
    let password = std::env::var("TEST_DATABASE_PASSWORD").unwrap_or_default();

    let mut config = ConnectionConfig::new(user, password, "client_records_demo_test");
    if let Ok(host) = std::env::var("TEST_DATABASE_HOST") {
        config.host = host;
    }
    if let Some(port) = std::env::var("TEST_DATABASE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
    {
        config.port = port;
    }
    Some(config)
}

/// Checks the shape of one demo run and returns Petrov's id.
fn assert_demo_results(results: &[Vec<i32>]) -> i32 {
    assert_eq!(results.len(), demo::DEMO_SEARCHES.len());

    // "Петров": Petrov alone
    assert_eq!(results[0].len(), 1, "unexpected results: {:?}", results);
    let petrov = results[0][0];

    // "servername.ru": Petrov, Kuzmin and Grishin (now Vasilev); Ivanov is gone
    assert_eq!(results[1].len(), 3, "unexpected results: {:?}", results);
    assert_eq!(results[1][0], petrov);
    assert!(results[1].windows(2).all(|w| w[0] < w[1]));

    // "00": Ivanov's 0000000000 was deleted with him
    assert!(results[2].is_empty(), "unexpected results: {:?}", results);

    petrov
}

#[tokio::test]
async fn test_demo_runs_twice_with_same_result_shape() {
    let Some(config) = demo_config() else {
        eprintln!("TEST_DATABASE_USER not set, skipping database test");
        return;
    };
    let mut store = ClientStore::connect(&config)
        .await
        .expect("Failed to connect to test database");
    assert_eq!(store.database(), "client_records_demo_test");

    let first = demo::run(&mut store).await.expect("first demo run failed");
    let first_petrov = assert_demo_results(&first);

    // The second run removes the first run's clients before re-adding them
    let second = demo::run(&mut store).await.expect("second demo run failed");
    let second_petrov = assert_demo_results(&second);
    assert!(second_petrov > first_petrov);
    assert!(store.get_client(first_petrov).await.unwrap().is_none());

    let petrov = store.get_client(second_petrov).await.unwrap().unwrap();
    assert_eq!(petrov.email, "p_petrov@servername.ru");

    let vasilev = store.get_client(second[1][2]).await.unwrap().unwrap();
    assert_eq!(vasilev.name, "Александр");
    assert_eq!(vasilev.surname.as_deref(), Some("Васильев"));
    assert_eq!(vasilev.email, "a_vasilev@servername.ru");

    let kuzmin_numbers: Vec<_> = store
        .list_phones(second[1][1])
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.number)
        .collect();
    assert_eq!(kuzmin_numbers, vec!["1234567890"]);

    store.close().await.unwrap();
}
