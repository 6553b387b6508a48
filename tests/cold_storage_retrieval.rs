//! Integration tests for moving content to cold storage and retrieving it.
//!
//! Operations run through the automation service of an in-memory platform.

use proptest::prelude::*;
use serde_json::{json, Value as JsonValue};

use docvault::application::{
    CreateDocumentCommand, OperationContext, OperationError, OperationParams,
    MOVE_TO_COLD_STORAGE_OPERATION, RETRIEVE_FROM_COLD_STORAGE_OPERATION,
};
use docvault::config::AppConfig;
use docvault::domain::document::{
    Blob, Document, DocumentError, COLD_STORAGE_AVAILABLE_UNTIL_PROPERTY,
    COLD_STORAGE_BEING_RETRIEVED_PROPERTY, COLD_STORAGE_RETRIEVAL_REQUESTED,
    DOCUMENT_MOVED_TO_COLD_STORAGE, FILE_CONTENT_PROPERTY, FILE_TYPE,
};
use docvault::domain::foundation::{CommandMetadata, ErrorCode, UserId};
use docvault::platform::Platform;
use docvault::ports::DocumentRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn metadata() -> CommandMetadata {
    CommandMetadata::new(UserId::new("Administrator").unwrap())
}

fn params(value: JsonValue) -> OperationParams {
    match value {
        JsonValue::Object(map) => map,
        other => panic!("expected an object, got {}", other),
    }
}

/// Creates `MyFile` with `foo` as main content and commits.
async fn my_file(platform: &Platform) -> Document {
    let doc = platform
        .create_document_handler()
        .handle(
            CreateDocumentCommand::new(None, "MyFile", FILE_TYPE)
                .with_content(Blob::from_string("foo").with_filename("MyFile.txt")),
            metadata(),
        )
        .await
        .unwrap();
    platform.commit().await.unwrap();
    doc
}

async fn move_to_cold_storage(platform: &Platform, doc: &Document) -> Document {
    let ctx = OperationContext::new(*doc.id(), metadata());
    let moved = platform
        .automation
        .run(&ctx, MOVE_TO_COLD_STORAGE_OPERATION, OperationParams::new())
        .await
        .unwrap();
    platform.commit().await.unwrap();
    moved
}

async fn retrieve(
    platform: &Platform,
    doc: &Document,
    days: JsonValue,
) -> Result<Document, OperationError> {
    let ctx = OperationContext::new(*doc.id(), metadata());
    let result = platform
        .automation
        .run(
            &ctx,
            RETRIEVE_FROM_COLD_STORAGE_OPERATION,
            params(json!({ "numberOfDaysOfAvailability": days })),
        )
        .await;
    platform.commit().await.unwrap();
    result
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn my_file_is_retrieved_for_seven_days() {
    let platform = Platform::in_memory(&AppConfig::default());
    let doc = my_file(&platform).await;
    assert_eq!(
        doc.property(FILE_CONTENT_PROPERTY).unwrap()["name"],
        "MyFile.txt"
    );

    let moved = move_to_cold_storage(&platform, &doc).await;
    assert_eq!(moved.property(FILE_CONTENT_PROPERTY), None);
    assert_eq!(moved.property(COLD_STORAGE_BEING_RETRIEVED_PROPERTY), Some(json!(false)));

    let retrieved = retrieve(&platform, &doc, json!(7)).await.unwrap();

    assert_eq!(retrieved.property(COLD_STORAGE_BEING_RETRIEVED_PROPERTY), Some(json!(true)));
    assert!(retrieved.property(COLD_STORAGE_AVAILABLE_UNTIL_PROPERTY).is_some());

    let stored = platform.documents.find_by_id(doc.id()).await.unwrap().unwrap();
    assert!(stored.is_being_retrieved());

    let key = &stored.cold_storage().cold_content().unwrap().key;
    assert_eq!(platform.cold_storage.requested_days(key).await, Some(7));

    assert_eq!(platform.bus.committed_of_type(DOCUMENT_MOVED_TO_COLD_STORAGE).len(), 1);
    assert_eq!(platform.bus.committed_of_type(COLD_STORAGE_RETRIEVAL_REQUESTED).len(), 1);
}

#[tokio::test]
async fn retrieving_a_document_never_moved_fails() {
    let platform = Platform::in_memory(&AppConfig::default());
    let doc = my_file(&platform).await;

    let err = retrieve(&platform, &doc, json!(7)).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    let stored = platform.documents.find_by_id(doc.id()).await.unwrap().unwrap();
    assert_eq!(stored.property(COLD_STORAGE_BEING_RETRIEVED_PROPERTY), Some(json!(false)));
    assert!(stored.content().is_some());
}

#[tokio::test]
async fn invalid_windows_are_rejected() {
    let platform = Platform::in_memory(&AppConfig::default());
    let doc = my_file(&platform).await;
    move_to_cold_storage(&platform, &doc).await;

    for days in [json!(0), json!(u32::MAX)] {
        let err = retrieve(&platform, &doc, days).await.unwrap_err();
        assert!(matches!(
            err,
            OperationError::Document(DocumentError::ValidationFailed { .. })
        ));
    }
    for days in [json!(-1), json!("seven"), json!(1.5)] {
        let err = retrieve(&platform, &doc, days).await.unwrap_err();
        assert!(matches!(err, OperationError::InvalidParameters { .. }));
    }

    let stored = platform.documents.find_by_id(doc.id()).await.unwrap().unwrap();
    assert!(!stored.is_being_retrieved());
    assert!(platform.bus.committed_of_type(COLD_STORAGE_RETRIEVAL_REQUESTED).is_empty());
}

#[tokio::test]
async fn windows_longer_than_a_month_are_accepted_by_default() {
    for days in [31, 90, 365] {
        let platform = Platform::in_memory(&AppConfig::default());
        let doc = my_file(&platform).await;
        move_to_cold_storage(&platform, &doc).await;

        let retrieved = retrieve(&platform, &doc, json!(days)).await.unwrap();

        assert!(retrieved.is_being_retrieved(), "{days} days should be accepted");
        assert_eq!(
            retrieved.cold_storage().retrieval().unwrap().number_of_days_of_availability,
            days
        );
    }
}

#[tokio::test]
async fn configured_maximum_bounds_the_window() {
    let mut config = AppConfig::default();
    config.cold_storage.max_days_of_availability = Some(3);
    let platform = Platform::in_memory(&config);
    let doc = my_file(&platform).await;
    move_to_cold_storage(&platform, &doc).await;

    assert!(retrieve(&platform, &doc, json!(4)).await.is_err());
    assert!(retrieve(&platform, &doc, json!(3)).await.is_ok());
}

#[tokio::test]
async fn unknown_operation_is_reported() {
    let platform = Platform::in_memory(&AppConfig::default());
    let doc = my_file(&platform).await;
    let ctx = OperationContext::new(*doc.id(), metadata());

    let err = platform
        .automation
        .run(&ctx, "Document.Defrost", OperationParams::new())
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::OperationNotFound);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn any_positive_window_flags_the_document(days in 1u32..=3_650_000) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let flagged = runtime.block_on(async {
            let platform = Platform::in_memory(&AppConfig::default());
            let doc = my_file(&platform).await;
            move_to_cold_storage(&platform, &doc).await;
            retrieve(&platform, &doc, json!(days)).await.unwrap().is_being_retrieved()
        });

        prop_assert!(flagged);
    }
}
