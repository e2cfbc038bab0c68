use jiff::civil::{date, DateTime};
use joinery::{Inserted, Op, Params, Value, Where};
use pretty_assertions::assert_eq;
use tests::{customer, models, models::*, seed_address, setup};
use uuid::Uuid;

fn profile() -> Profile {
    Profile {
        id: Uuid::new_v4(),
        // 1_000_000_000 seconds after the epoch
        born: date(2001, 9, 9).at(1, 46, 40, 0),
        status: Status::Suspended,
        characteristics: Some(Characteristics {
            height: 1.62,
            tags: vec!["early".to_string(), "bird".to_string()],
        }),
        preferences: Preferences {
            theme: "dark & <bold>".to_string(),
            font_size: 14,
            compact: true,
            shortcuts: vec!["ctrl+s".to_string()],
        },
        label: "not stored".to_string(),
    }
}

#[tokio::test]
async fn profile_round_trips() {
    let (mut db, _) = setup(models()).await;

    let mut profile = profile();
    assert_eq!(db.insert(&mut profile).await.unwrap(), Inserted::Rows(1));

    let loaded = db.get::<Profile>(profile.id).await.unwrap().unwrap();
    assert_eq!(
        loaded,
        Profile {
            label: String::new(),
            ..profile
        }
    );
}

#[tokio::test]
async fn empty_xml_members_round_trip() {
    let (mut db, _) = setup(models()).await;

    let cases = [
        vec![],
        vec!["ctrl+s".to_string()],
        vec!["ctrl+s".to_string(), "ctrl+q".to_string()],
    ];

    for shortcuts in cases {
        let mut profile = profile();
        profile.label = String::new();
        profile.preferences.theme = String::new();
        profile.preferences.shortcuts = shortcuts;
        db.insert(&mut profile).await.unwrap();

        let loaded = db.get::<Profile>(profile.id).await.unwrap().unwrap();
        assert_eq!(loaded, profile);
    }
}

#[tokio::test]
async fn stored_representations() {
    let (mut db, _) = setup(models()).await;
    db.insert(&mut profile()).await.unwrap();

    let rows = db
        .execute_query(
            "SELECT [id_profile], [born], [status], [characteristics], [preferences] FROM [profile];",
            Params::new(),
        )
        .await
        .unwrap();
    let row = &rows[0];

    assert!(matches!(row.get("id_profile"), Some(Value::String(id)) if id.len() == 36));
    assert_eq!(row.get("born"), Some(&Value::I64(1_000_000_000)));
    assert_eq!(row.get("status"), Some(&Value::I64(2)));

    let Some(Value::String(characteristics)) = row.get("characteristics") else {
        panic!("characteristics not stored as text: {row:?}");
    };
    let json: serde_json::Value = serde_json::from_str(characteristics).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "height": 1.62, "tags": ["early", "bird"] })
    );

    let Some(Value::String(preferences)) = row.get("preferences") else {
        panic!("preferences not stored as text: {row:?}");
    };
    assert!(preferences.starts_with("<preferences>"), "{preferences}");
    assert!(preferences.contains("<font_size>14</font_size>"), "{preferences}");
    assert!(preferences.contains("dark &amp; &lt;bold&gt;"), "{preferences}");
}

#[tokio::test]
async fn epoch_dates_filter_by_their_encoded_value() {
    let (mut db, _) = setup(models()).await;
    db.insert(&mut profile()).await.unwrap();

    let before: DateTime = date(2001, 1, 1).at(0, 0, 0, 0);
    let after: DateTime = date(2002, 1, 1).at(0, 0, 0, 0);

    let found = db
        .select::<Profile>(Where::new().and("born", Op::Between, [before, after]))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);

    let found = db
        .select::<Profile>(Where::new().and("born", Op::Gt, after))
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn enums_filter_by_discriminant() {
    let (mut db, _) = setup(models()).await;
    db.insert(&mut profile()).await.unwrap();

    let suspended = db
        .select::<Profile>(Where::new().and("status", Op::Eq, Status::Suspended))
        .await
        .unwrap();
    assert_eq!(suspended.len(), 1);

    let active = db
        .select::<Profile>(Where::new().and("status", Op::Eq, Status::Active))
        .await
        .unwrap();
    assert!(active.is_empty());
}

#[tokio::test]
async fn undefined_enum_values_fail() {
    let (mut db, _) = setup(models()).await;
    let profile = profile();
    db.insert(&mut profile.clone()).await.unwrap();

    db.execute_non_query("UPDATE [profile] SET [status] = 9;", Params::new(), Some(1))
        .await
        .unwrap();

    let err = db.get::<Profile>(profile.id).await.unwrap_err();
    assert!(err.is_type_conversion(), "{err}");
    assert!(err.to_string().contains("`Profile.status`"), "{err}");
    assert!(err.to_string().contains("Status"), "{err}");
}

#[tokio::test]
async fn null_documents_load_as_none() {
    let (mut db, _) = setup(models()).await;

    let mut profile = Profile {
        characteristics: None,
        ..profile()
    };
    db.insert(&mut profile).await.unwrap();

    let loaded = db.get::<Profile>(profile.id).await.unwrap().unwrap();
    assert_eq!(loaded.characteristics, None);
}

#[tokio::test]
async fn strings_are_trimmed_when_enabled() {
    for (trim, expected) in [(false, "  Ann  "), (true, "Ann")] {
        let mut builder = models();
        builder.auto_trim_strings(trim);

        let (mut db, _) = setup(builder).await;
        let shipping = seed_address(&mut db, "Rua A, 10", "13010-000").await;
        db.insert(&mut customer("  Ann  ", 1.0, &shipping)).await.unwrap();

        let loaded = db.select::<Customer>(Where::new()).await.unwrap();
        assert_eq!(loaded[0].name, expected);
    }
}
