use std::sync::Arc;

use embers::prelude::*;
use embers_test::MockProvider;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Person {
    id: Option<i64>,
    name: String,
}

impl Entity for Person {
    type Id = i64;

    fn descriptor() -> EntityDescriptor {
        EntityDescriptor::builder("person")
            .primary_key("id")
            .column("name")
            .build()
    }

    fn value_of(&self, field: &str) -> Value {
        match field {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            _ => Value::Null,
        }
    }

    fn set_value(&mut self, field: &str, value: Value) {
        match (field, value) {
            ("id", Value::Int(v)) => self.id = Some(v),
            ("name", Value::Text(v)) => self.name = v,
            _ => {}
        }
    }
}

// No identity column at all; exercises the keyless branches.
#[derive(Debug, Default, Clone, PartialEq)]
struct AuditLog {
    message: String,
    level: Option<i64>,
}

impl Entity for AuditLog {
    type Id = i64;

    fn descriptor() -> EntityDescriptor {
        EntityDescriptor::builder("audit_log")
            .column("message")
            .column("level")
            .build()
    }

    fn value_of(&self, field: &str) -> Value {
        match field {
            "message" => self.message.as_str().into(),
            "level" => self.level.into(),
            _ => Value::Null,
        }
    }

    fn set_value(&mut self, field: &str, value: Value) {
        match (field, value) {
            ("message", Value::Text(v)) => self.message = v,
            ("level", Value::Int(v)) => self.level = Some(v),
            _ => {}
        }
    }
}

fn person_repo(provider: &MockProvider) -> SqlRepository<Person, MockProvider> {
    SqlRepository::new(
        provider.clone(),
        Arc::new(DescriptorRegistry::new()),
        Arc::new(FirebirdDialect),
    )
}

fn audit_repo(provider: &MockProvider) -> SqlRepository<AuditLog, MockProvider> {
    SqlRepository::new(
        provider.clone(),
        Arc::new(DescriptorRegistry::new()),
        Arc::new(FirebirdDialect),
    )
}

fn person_row(id: i64, name: &str) -> Row {
    // Firebird reports labels upper-cased; mapping must not care.
    Row::new().with_column("ID", id).with_column("NAME", name)
}

#[tokio::test]
async fn test_save_generates_identity_before_insert() {
    init_tracing();
    let provider = MockProvider::new();
    provider.enqueue_rows(vec![Row::new().with_column("GEN_ID", 7i64)]);
    provider.enqueue_affected(1);
    provider.enqueue_rows(vec![person_row(7, "Ada")]);

    let repo = person_repo(&provider);
    let saved = repo
        .save(&Person {
            id: None,
            name: "Ada".into(),
        })
        .await
        .unwrap();
    assert_eq!(
        saved,
        Person {
            id: Some(7),
            name: "Ada".into()
        }
    );

    let statements = provider.statements();
    assert_eq!(statements.len(), 3);
    assert_eq!(
        statements[0].sql,
        "SELECT GEN_ID(GEN_person_ID, 1) FROM RDB$DATABASE"
    );
    assert!(statements[0].params.is_empty());
    assert_eq!(
        statements[1].sql,
        "INSERT INTO person (id, name) VALUES (?, ?)"
    );
    assert_eq!(
        statements[1].params,
        vec![Value::Int(7), Value::Text("Ada".into())]
    );
    assert_eq!(statements[2].sql, "SELECT * FROM person WHERE id = ?");
    assert_eq!(statements[2].params, vec![Value::Int(7)]);

    // One connection per round trip, all returned.
    assert_eq!(provider.acquired(), 3);
    assert_eq!(provider.released(), 3);
}

#[tokio::test]
async fn test_save_with_supplied_identity_skips_generation() {
    let provider = MockProvider::new();
    provider.enqueue_affected(1);
    provider.enqueue_rows(vec![person_row(42, "Grace")]);

    let repo = person_repo(&provider);
    let saved = repo
        .save(&Person {
            id: Some(42),
            name: "Grace".into(),
        })
        .await
        .unwrap();
    assert_eq!(saved.id, Some(42));

    let statements = provider.statements();
    assert_eq!(statements.len(), 2);
    assert_eq!(
        statements[0].sql,
        "INSERT INTO person (id, name) VALUES (?, ?)"
    );
    assert_eq!(statements[1].sql, "SELECT * FROM person WHERE id = ?");
}

#[tokio::test]
async fn test_save_fails_when_reread_finds_nothing() {
    let provider = MockProvider::new();
    provider.enqueue_rows(vec![Row::new().with_column("GEN_ID", 7i64)]);
    provider.enqueue_affected(1);
    provider.enqueue_rows(Vec::new());

    let repo = person_repo(&provider);
    let err = repo
        .save(&Person {
            id: None,
            name: "Ada".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::SaveFailed(_)));
    assert_eq!(provider.acquired(), provider.released());
}

#[tokio::test]
async fn test_save_without_primary_echoes_input_without_reread() {
    let provider = MockProvider::new();
    provider.enqueue_affected(1);

    let repo = audit_repo(&provider);
    let entry = AuditLog {
        message: "startup".into(),
        level: Some(2),
    };
    let saved = repo.save(&entry).await.unwrap();
    assert_eq!(saved, entry);

    let statements = provider.statements();
    assert_eq!(statements.len(), 1);
    assert_eq!(
        statements[0].sql,
        "INSERT INTO audit_log (message, level) VALUES (?, ?)"
    );
    assert_eq!(
        statements[0].params,
        vec![Value::Text("startup".into()), Value::Int(2)]
    );
}

#[tokio::test]
async fn test_find_renders_order_and_row_window() {
    let provider = MockProvider::new();
    provider.enqueue_rows(Vec::new());

    let repo = person_repo(&provider);
    let filter = Filter::new()
        .order_by("name", Direction::Asc)
        .limit(10)
        .offset(5);
    let people = repo.find(Some(&filter)).await.unwrap();
    assert!(people.is_empty());

    let statements = provider.statements();
    assert_eq!(
        statements[0].sql,
        "SELECT * FROM person ORDER BY name ASC ROWS 10 OFFSET 5"
    );
    assert!(statements[0].params.is_empty());
}

#[tokio::test]
async fn test_find_without_filter_selects_whole_table() {
    let provider = MockProvider::new();
    provider.enqueue_rows(vec![person_row(1, "a"), person_row(2, "b")]);

    let repo = person_repo(&provider);
    let people = repo.find(None).await.unwrap();
    assert_eq!(people.len(), 2);
    assert_eq!(people[0].id, Some(1));
    assert_eq!(people[1].id, Some(2));

    assert_eq!(provider.statements()[0].sql, "SELECT * FROM person");
}

#[tokio::test]
async fn test_find_predicate_binds_in_insertion_order() {
    let provider = MockProvider::new();
    provider.enqueue_rows(Vec::new());

    let repo = person_repo(&provider);
    let filter = Filter::new().where_eq("name", "Ada").where_eq("id", 7i64);
    repo.find(Some(&filter)).await.unwrap();

    let statement = &provider.statements()[0];
    assert_eq!(
        statement.sql,
        "SELECT * FROM person WHERE name = ? AND id = ?"
    );
    assert_eq!(
        statement.params,
        vec![Value::Text("Ada".into()), Value::Int(7)]
    );
}

#[tokio::test]
async fn test_find_by_id_not_found_is_none() {
    let provider = MockProvider::new();
    provider.enqueue_rows(Vec::new());

    let repo = person_repo(&provider);
    let found = repo.find_by_id(&7i64).await.unwrap();
    assert_eq!(found, None);
}

#[tokio::test]
async fn test_update_overwrites_row_and_rereads() {
    init_tracing();
    let provider = MockProvider::new();
    provider.enqueue_affected(1);
    provider.enqueue_rows(vec![person_row(7, "Ada L.")]);

    let repo = person_repo(&provider);
    let updated = repo
        .update(
            &7i64,
            &Person {
                id: None,
                name: "Ada L.".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Ada L.");

    let statements = provider.statements();
    assert_eq!(statements[0].sql, "UPDATE person SET name = ? WHERE id = ?");
    assert_eq!(
        statements[0].params,
        vec![Value::Text("Ada L.".into()), Value::Int(7)]
    );
    assert_eq!(statements[1].sql, "SELECT * FROM person WHERE id = ?");
}

#[tokio::test]
async fn test_update_fails_when_reread_finds_nothing() {
    let provider = MockProvider::new();
    provider.enqueue_affected(1);
    provider.enqueue_rows(Vec::new());

    let repo = person_repo(&provider);
    let err = repo
        .update(
            &7i64,
            &Person {
                id: None,
                name: "Ada".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::UpdateFailed(_)));
    assert_eq!(provider.acquired(), provider.released());
}

#[tokio::test]
async fn test_delete_of_missing_row_still_succeeds() {
    let provider = MockProvider::new();
    provider.enqueue_affected(0);

    let repo = person_repo(&provider);
    repo.delete(&42i64).await.unwrap();

    let statements = provider.statements();
    assert_eq!(statements[0].sql, "DELETE FROM person WHERE id = ?");
    assert_eq!(statements[0].params, vec![Value::Int(42)]);
}

#[tokio::test]
async fn test_identity_operations_without_primary_never_reach_executor() {
    let provider = MockProvider::new();
    let repo = audit_repo(&provider);
    let entry = AuditLog::default();

    assert!(matches!(
        repo.find_by_id(&1i64).await.unwrap_err(),
        DataError::NoPrimaryKey(_)
    ));
    assert!(matches!(
        repo.update(&1i64, &entry).await.unwrap_err(),
        DataError::NoPrimaryKey(_)
    ));
    assert!(matches!(
        repo.delete(&1i64).await.unwrap_err(),
        DataError::NoPrimaryKey(_)
    ));

    assert!(provider.statements().is_empty());
    assert_eq!(provider.acquired(), 0);
}

#[tokio::test]
async fn test_failed_insert_after_generation_still_releases_both_connections() {
    let provider = MockProvider::new();
    provider.enqueue_rows(vec![Row::new().with_column("GEN_ID", 7i64)]);
    provider.enqueue_error("violation of PRIMARY or UNIQUE KEY constraint");

    let repo = person_repo(&provider);
    let err = repo
        .save(&Person {
            id: None,
            name: "Ada".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::Executor(_)));

    // Generation and the failed insert each took and returned their own
    // connection; nothing is left held.
    assert_eq!(provider.acquired(), 2);
    assert_eq!(provider.released(), 2);
}

#[tokio::test]
async fn test_executor_error_propagates_and_releases_connection() {
    let provider = MockProvider::new();
    provider.enqueue_error("connection reset");

    let repo = person_repo(&provider);
    let err = repo.find(None).await.unwrap_err();
    assert!(matches!(err, DataError::Executor(_)));
    assert_eq!(provider.acquired(), 1);
    assert_eq!(provider.released(), 1);
}

#[tokio::test]
async fn test_count_with_filter() {
    let provider = MockProvider::new();
    provider.enqueue_rows(vec![Row::new().with_column("COUNT", 12i64)]);

    let repo = person_repo(&provider);
    let filter = Filter::new().where_eq("name", "Ada");
    let count = repo.count(Some(&filter)).await.unwrap();
    assert_eq!(count, 12);

    assert_eq!(
        provider.statements()[0].sql,
        "SELECT COUNT(*) FROM person WHERE name = ?"
    );
}

#[tokio::test]
async fn test_query_raw_returns_unmapped_rows() {
    let provider = MockProvider::new();
    provider.enqueue_rows(vec![Row::new().with_column("TOTAL", 3i64)]);

    let repo = person_repo(&provider);
    let rows = repo
        .query_raw("SELECT COUNT(*) AS TOTAL FROM person", &[])
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_ci("total"), Some(&Value::Int(3)));
}

#[tokio::test]
async fn test_unknown_filter_field_fails_before_executor() {
    let provider = MockProvider::new();
    let repo = person_repo(&provider);

    let filter = Filter::new().where_eq("nmae", "Ada");
    let err = repo.find(Some(&filter)).await.unwrap_err();
    assert!(matches!(err, DataError::Schema(_)));
    assert!(provider.statements().is_empty());
}
