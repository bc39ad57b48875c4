//! End-to-end flows through the dashboard command handlers, against an
//! in-memory database.

use discoverease_core::{AppCommand, CatalogFilter, CommandOutcome, NewAppForm, UpdateAppForm};
use discoverease_dashboard::commands::{catalog, crud, report};
use discoverease_dashboard::error::ErrorCode;
use discoverease_db::{Database, DbConfig, DeveloperRepository};

fn foo_form() -> NewAppForm {
    NewAppForm {
        app_id: "A1".to_string(),
        app_name: "Foo".to_string(),
        developer_id: "D1".to_string(),
        genre: "Puzzle".to_string(),
        size: "10".to_string(),
        app_version: "1.0".to_string(),
        ios_version: "10.0".to_string(),
        released_date: "2024-01-01".to_string(),
        updated_date: "2024-01-02".to_string(),
        avg_user_rating: "4.5".to_string(),
        age_group: "4+".to_string(),
        developer_name: "Acme".to_string(),
        price: "0".to_string(),
        currency: "USD".to_string(),
    }
}

fn form(n: usize, genre: &str, price: &str, rating: &str) -> NewAppForm {
    NewAppForm {
        app_id: format!("A{n}"),
        app_name: format!("App {n}"),
        developer_id: format!("D{n}"),
        genre: genre.to_string(),
        price: price.to_string(),
        avg_user_rating: rating.to_string(),
        developer_name: format!("Dev {n}"),
        ..foo_form()
    }
}

async fn db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

async fn counts(db: &Database) -> (i64, i64, i64) {
    (
        db.applications().count().await.unwrap(),
        db.developers().count().await.unwrap(),
        db.pricing().count().await.unwrap(),
    )
}

#[tokio::test]
async fn create_then_read_returns_linked_records() {
    let db = db().await;

    let created = crud::handle(&db, AppCommand::Create(foo_form()))
        .await
        .unwrap();
    assert!(matches!(created, CommandOutcome::Created(_)));
    assert_eq!(counts(&db).await, (1, 1, 1));

    let found = crud::handle(
        &db,
        AppCommand::Read {
            app_name: "Foo".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(found.message(), "App read successfully!");

    let agg = found.aggregate();
    assert_eq!(agg.application.app_id, "A1");
    assert_eq!(agg.application.developer_id, "D1");
    assert_eq!(agg.application.avg_user_rating, Some(4.5));
    assert_eq!(agg.developer.as_ref().unwrap().developer, "Acme");
    let pricing = agg.pricing.as_ref().unwrap();
    assert_eq!(pricing.price, 0.0);
    assert_eq!(pricing.currency, "USD");
}

#[tokio::test]
async fn delete_removes_rows_from_all_three_tables() {
    let db = db().await;
    crud::handle(&db, AppCommand::Create(foo_form()))
        .await
        .unwrap();

    let deleted = crud::handle(
        &db,
        AppCommand::Delete {
            app_id: "A1".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(
        deleted.message(),
        "App and related records deleted successfully!"
    );
    assert_eq!(counts(&db).await, (0, 0, 0));

    let err = crud::handle(
        &db,
        AppCommand::Read {
            app_name: "Foo".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);

    let err = crud::handle(
        &db,
        AppCommand::Delete {
            app_id: "A1".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn duplicate_app_id_is_rejected_without_insert() {
    let db = db().await;
    crud::handle(&db, AppCommand::Create(foo_form()))
        .await
        .unwrap();

    let again = NewAppForm {
        developer_id: "D2".to_string(),
        app_name: "Other".to_string(),
        ..foo_form()
    };
    let err = crud::handle(&db, AppCommand::Create(again))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::DuplicateIdentifier);
    assert_eq!(err.message, "App_Id must be unique. 'A1' already exists");
    assert_eq!(counts(&db).await, (1, 1, 1));
}

#[tokio::test]
async fn invalid_forms_never_reach_the_database() {
    let db = db().await;

    let cases = [
        (
            NewAppForm {
                app_name: String::new(),
                ..foo_form()
            },
            ErrorCode::MissingField,
        ),
        (
            NewAppForm {
                price: "-1".to_string(),
                ..foo_form()
            },
            ErrorCode::InvalidNumber,
        ),
        (
            NewAppForm {
                size: "ten".to_string(),
                ..foo_form()
            },
            ErrorCode::InvalidNumber,
        ),
        (
            NewAppForm {
                released_date: "2023-02-30".to_string(),
                ..foo_form()
            },
            ErrorCode::InvalidDate,
        ),
        (
            NewAppForm {
                avg_user_rating: "5.1".to_string(),
                ..foo_form()
            },
            ErrorCode::InvalidRating,
        ),
        (
            NewAppForm {
                genre: "Puzzle & Trivia".to_string(),
                ..foo_form()
            },
            ErrorCode::InvalidGenrePattern,
        ),
    ];

    for (form, expected) in cases {
        let err = crud::handle(&db, AppCommand::Create(form))
            .await
            .unwrap_err();
        assert_eq!(err.code, expected, "{}", err.message);
    }

    assert_eq!(counts(&db).await, (0, 0, 0));
}

#[tokio::test]
async fn update_changes_only_mutable_fields() {
    let db = db().await;
    crud::handle(&db, AppCommand::Create(foo_form()))
        .await
        .unwrap();

    let outcome = crud::handle(
        &db,
        AppCommand::Update(UpdateAppForm {
            app_id: "A1".to_string(),
            app_name: "Foo Plus".to_string(),
            genre: "Word Games".to_string(),
            price: "2.49".to_string(),
            developer_name: Some("Acme Studios".to_string()),
        }),
    )
    .await
    .unwrap();

    let agg = outcome.aggregate();
    assert_eq!(agg.application.app_name, "Foo Plus");
    assert_eq!(agg.application.genre, "Word Games");
    assert_eq!(agg.application.size, 10.0);
    assert_eq!(agg.application.age_group, "4+");
    assert_eq!(agg.developer.as_ref().unwrap().developer, "Acme Studios");
    assert_eq!(agg.pricing.as_ref().unwrap().price, 2.49);

    // Rejected update leaves the stored row alone
    let err = crud::handle(
        &db,
        AppCommand::Update(UpdateAppForm {
            app_id: "A1".to_string(),
            app_name: "Foo Plus".to_string(),
            genre: "Word Games 2".to_string(),
            price: "1".to_string(),
            developer_name: None,
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidGenrePattern);

    let stored = db.aggregates().find_by_id("A1").await.unwrap();
    assert_eq!(stored.application.genre, "Word Games");
}

#[tokio::test]
async fn update_succeeds_when_developer_row_is_missing() {
    let db = db().await;
    crud::handle(&db, AppCommand::Create(foo_form()))
        .await
        .unwrap();
    {
        let mut conn = db.pool().acquire().await.unwrap();
        DeveloperRepository::delete(&mut conn, "D1").await.unwrap();
    }

    let outcome = crud::handle(
        &db,
        AppCommand::Update(UpdateAppForm {
            app_id: "A1".to_string(),
            app_name: "Foo Pro".to_string(),
            genre: "Puzzle".to_string(),
            price: "1.5".to_string(),
            developer_name: None,
        }),
    )
    .await
    .unwrap();

    assert_eq!(outcome.message(), "App updated successfully!");
    assert!(outcome.aggregate().developer.is_none());

    let stored = db.aggregates().find_by_id("A1").await.unwrap();
    assert_eq!(stored.application.app_name, "Foo Pro");
    assert_eq!(stored.pricing.unwrap().price, 1.5);
    assert_eq!(counts(&db).await, (1, 0, 1));
}

#[tokio::test]
async fn free_puzzle_apps_are_capped_at_fifteen() {
    let db = db().await;
    for n in 1..=18 {
        crud::handle(&db, AppCommand::Create(form(n, "Puzzle", "0", "4")))
            .await
            .unwrap();
    }
    crud::handle(&db, AppCommand::Create(form(19, "Puzzle", "1.99", "4")))
        .await
        .unwrap();
    crud::handle(&db, AppCommand::Create(form(20, "Action", "0", "4")))
        .await
        .unwrap();

    let free = report::free_apps(&db, "Puzzle").await.unwrap();
    assert_eq!(free.len(), 15);
    assert!(free
        .iter()
        .all(|app| app.app_name != "App 19" && app.app_name != "App 20"));
}

#[tokio::test]
async fn browse_filters_by_genre_rating_and_search() {
    let db = db().await;
    let apps = [
        (1, "Puzzle", "4.5"),
        (2, "Puzzle", "2.0"),
        (3, "Action", "5"),
        (4, "Puzzle", ""),
        (5, "Puzzle", "3.0"),
    ];
    for (n, genre, rating) in apps {
        crud::handle(&db, AppCommand::Create(form(n, genre, "0", rating)))
            .await
            .unwrap();
    }

    let report = catalog::browse(
        &db,
        &CatalogFilter {
            search: Some("APP 5".to_string()),
            ..CatalogFilter::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(report.view.genres, vec!["Puzzle", "Action"]);
    assert_eq!(report.view.selected_genre.as_deref(), Some("Puzzle"));
    let ids: Vec<&str> = report
        .view
        .filtered
        .iter()
        .map(|a| a.app_id.as_str())
        .collect();
    assert_eq!(ids, vec!["A1", "A5"]);

    let search = report.view.search.unwrap();
    assert_eq!(search.len(), 1);
    assert_eq!(search[0].app_id, "A5");

    assert_eq!(report.top_developers.len(), 5);
    assert_eq!(report.free_apps.len(), 4);

    let err = catalog::browse(
        &db,
        &CatalogFilter {
            min_rating: 6.0,
            ..CatalogFilter::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidFilter);
}
