use joinery::{Db, NamingStyle, Options, Where};
use joinery_core::schema::app::EntityId;
use pretty_assertions::assert_eq;
use tests::{models, models::*, setup};

#[test]
fn default_naming() {
    let schema = models().build_schema().unwrap();

    let customer = schema.describe(EntityId::of::<Customer>()).unwrap();
    assert_eq!(customer.table.schema, "dbo");
    assert_eq!(customer.table.name, "customer");

    let columns: Vec<_> = customer.columns.iter().map(|c| &c.column[..]).collect();
    assert_eq!(
        columns,
        [
            "id_customer",
            "name",
            "balance",
            "email",
            "characteristics",
            "id_billing_address",
            "id_shipping_address",
        ]
    );

    let city = schema.describe(EntityId::of::<City>()).unwrap();
    assert_eq!(city.column("state").unwrap().1.column, "id_state");

    let user = schema.describe(EntityId::of::<User>()).unwrap();
    assert_eq!(user.table.schema, "security");
    assert_eq!(user.table.name, "application_user");
    assert_eq!(user.key_columns().next().unwrap().column, "id_application_user");
}

#[test]
fn options_from_configuration() {
    let options: Options = serde_json::from_value(serde_json::json!({
        "schema": "sales",
        "naming_style": "pascal_case_underscored",
        "use_composed_id": false,
        "isolation_level": "snapshot",
    }))
    .unwrap();

    assert_eq!(options.naming_style, NamingStyle::PascalCaseUnderscored);
    assert!(options.infer_composed_id_in_foreign_keys);

    let mut builder = Db::builder();
    builder.register::<Address>().options(options);
    let schema = builder.build_schema().unwrap();

    let address = schema.describe(EntityId::of::<Address>()).unwrap();
    assert_eq!(address.table.schema, "sales");
    assert_eq!(address.table.name, "Address");
    assert_eq!(address.column("zip_code").unwrap().1.column, "Zip_Code");
    assert_eq!(address.column("id").unwrap().1.column, "Id");
    assert_eq!(address.column("city").unwrap().1.column, "id_City");
}

#[test]
fn composite_keys_follow_their_order() {
    let schema = models().build_schema().unwrap();
    let enrollment = schema.describe(EntityId::of::<Enrollment>()).unwrap();

    let key: Vec<_> = enrollment.key_columns().map(|c| c.name).collect();
    assert_eq!(key, ["course", "student"]);
    assert_eq!(enrollment.identity, None);
}

#[tokio::test]
async fn unregistered_entities_are_rejected() {
    let mut builder = Db::builder();
    builder.register::<User>();
    let (mut db, log) = setup(builder).await;

    let err = db.select::<Enrollment>(Where::new()).await.unwrap_err();
    assert!(err.is_invalid_schema(), "{err}");
    assert!(err.to_string().contains("`Enrollment` is not registered"), "{err}");
    assert!(log.is_empty());
}
