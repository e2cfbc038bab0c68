use joinery::{Db, Row, Value, Where};
use pretty_assertions::assert_eq;
use tests::{init_tracing, models::User, CannedDriver};

async fn users(rows: Vec<Row>) -> joinery::Result<Vec<User>> {
    init_tracing();

    let mut db = Db::builder()
        .register::<User>()
        .build(CannedDriver::new(rows))
        .await
        .unwrap();

    db.select::<User>(Where::new()).await
}

fn row(columns: &[(&str, Value)]) -> Row {
    columns
        .iter()
        .map(|(name, value)| (*name, value.clone()))
        .collect()
}

#[tokio::test]
async fn complete_rows() {
    let loaded = users(vec![row(&[
        ("t1_id_application_user", Value::I64(3)),
        ("t1_username", Value::from("ann")),
        ("t1_display", Value::from("Ann")),
    ])])
    .await
    .unwrap();

    assert_eq!(
        loaded,
        [User {
            id: 3,
            username: "ann".to_string(),
            display_name: "Ann".to_string(),
        }]
    );
}

#[tokio::test]
async fn missing_implicit_columns_keep_their_default() {
    let loaded = users(vec![row(&[
        ("t1_id_application_user", Value::I64(3)),
        ("t1_display", Value::from("Ann")),
    ])])
    .await
    .unwrap();

    assert_eq!(loaded[0].username, "");
    assert_eq!(loaded[0].display_name, "Ann");
}

#[tokio::test]
async fn missing_explicit_columns_fail() {
    let err = users(vec![row(&[
        ("t1_id_application_user", Value::I64(3)),
        ("t1_username", Value::from("ann")),
    ])])
    .await
    .unwrap_err();

    assert!(err.to_string().contains("`t1_display`"), "{err}");
}

#[tokio::test]
async fn nulls_load_as_defaults() {
    let loaded = users(vec![row(&[
        ("t1_id_application_user", Value::I64(3)),
        ("t1_username", Value::Null),
        ("t1_display", Value::Null),
    ])])
    .await
    .unwrap();

    assert_eq!(loaded[0].username, "");
    assert_eq!(loaded[0].display_name, "");
}

#[tokio::test]
async fn mismatched_values_name_the_field() {
    let err = users(vec![row(&[
        ("t1_id_application_user", Value::from("three")),
        ("t1_username", Value::from("ann")),
        ("t1_display", Value::from("Ann")),
    ])])
    .await
    .unwrap_err();

    assert!(err.is_type_conversion(), "{err}");
    assert!(err.to_string().starts_with("cannot load `User.id`"), "{err}");
}
