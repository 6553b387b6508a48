//! Integration tests for the annotation event and notification pipeline.
//!
//! These tests verify the end-to-end flow:
//! 1. Annotation handlers persist the change and buffer an event pair
//! 2. Committing delivers the events to the notification listener
//! 3. Matching subscriptions produce mail in the capturing mail box
//! 4. Comment authors are auto-subscribed at most once

use async_trait::async_trait;
use std::sync::Arc;

use docvault::adapters::{CapturingListener, CapturingMailBox};
use docvault::application::{
    CreateAnnotationCommand, CreateDocumentCommand, DeleteAnnotationCommand,
    UpdateAnnotationCommand, UpdateDocumentCommand,
};
use docvault::config::AppConfig;
use docvault::domain::annotation::{
    Annotation, AnnotationDraft, AnnotationUpdate, COMMENT_ADDED, COMMENT_REMOVED,
    COMMENT_UPDATED,
};
use docvault::domain::document::{
    Blob, Document, DOCUMENT_CREATED, DOCUMENT_REMOVED, DOCUMENT_UPDATED, FILE_TYPE, FOLDER_TYPE,
};
use docvault::domain::foundation::{CommandMetadata, DomainError, ErrorCode, UserId};
use docvault::domain::notification::{
    MailMessage, SubscriberKey, COMMENT_ADDED_NOTIFICATION, COMMENT_REMOVED_NOTIFICATION,
    COMMENT_UPDATED_NOTIFICATION, CREATION_NOTIFICATION, MODIFICATION_NOTIFICATION,
};
use docvault::platform::Platform;
use docvault::ports::{DocumentRepository, MailSender};

const ALL_EVENTS: [&str; 6] = [
    COMMENT_ADDED,
    COMMENT_UPDATED,
    COMMENT_REMOVED,
    DOCUMENT_CREATED,
    DOCUMENT_UPDATED,
    DOCUMENT_REMOVED,
];

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Workspace {
    platform: Platform,
    folder: Document,
    file: Document,
}

impl Workspace {
    async fn new(config: &AppConfig) -> Self {
        Self::with_platform(Platform::in_memory(config)).await
    }

    /// Creates `/workspace/report` and registers john and jane.
    async fn with_platform(platform: Platform) -> Self {
        let create = platform.create_document_handler();
        let folder = create
            .handle(
                CreateDocumentCommand::new(None, "workspace", FOLDER_TYPE),
                metadata("Administrator"),
            )
            .await
            .unwrap();
        let file = create
            .handle(
                CreateDocumentCommand::new(Some(*folder.id()), "report", FILE_TYPE)
                    .with_title("Quarterly report")
                    .with_content(Blob::from_string("Revenue grew.")),
                metadata("Administrator"),
            )
            .await
            .unwrap();
        platform.commit().await.unwrap();

        platform.directory.add_user("john", "john@example.com").await;
        platform.directory.add_user("jane", "jane@example.com").await;

        Self {
            platform,
            folder,
            file,
        }
    }

    async fn subscribe(&self, subscriber: &SubscriberKey, notification: &str, doc: &Document) {
        self.platform
            .notification_manager
            .add_subscription(subscriber, notification, doc.id(), true, None, None)
            .await
            .unwrap();
    }

    async fn annotate(&self, author: &str, parent: &Document, text: &str) -> Annotation {
        let annotation = self
            .platform
            .create_annotation_handler()
            .handle(
                CreateAnnotationCommand {
                    draft: AnnotationDraft::new(*parent.id(), author, text, "file:content"),
                },
                metadata(author),
            )
            .await
            .unwrap();
        self.platform.commit().await.unwrap();
        annotation
    }

    async fn edit(&self, author: &str, annotation: &Annotation, text: &str) {
        self.platform
            .update_annotation_handler()
            .handle(
                UpdateAnnotationCommand {
                    annotation_id: *annotation.id(),
                    update: AnnotationUpdate::text(text),
                },
                metadata(author),
            )
            .await
            .unwrap();
        self.platform.commit().await.unwrap();
    }

    async fn remove(&self, author: &str, annotation: &Annotation) {
        self.platform
            .delete_annotation_handler()
            .handle(
                DeleteAnnotationCommand {
                    annotation_id: *annotation.id(),
                },
                metadata(author),
            )
            .await
            .unwrap();
        self.platform.commit().await.unwrap();
    }

    async fn subscriptions_of(&self, user: &str) -> Vec<String> {
        self.platform
            .notification_manager
            .get_subscriptions_for_user_on_document(&user_key(user), self.file.id())
            .await
            .unwrap()
    }
}

fn metadata(user: &str) -> CommandMetadata {
    CommandMetadata::new(UserId::new(user).unwrap())
}

fn user_key(user: &str) -> SubscriberKey {
    SubscriberKey::User(user.to_string())
}

fn auto_subscribe_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.notification.auto_subscribe = vec![
        COMMENT_ADDED_NOTIFICATION.to_string(),
        COMMENT_UPDATED_NOTIFICATION.to_string(),
    ];
    config
}

// =============================================================================
// Event pairs
// =============================================================================

#[tokio::test]
async fn creating_an_annotation_fires_one_event_pair() {
    let ws = Workspace::new(&AppConfig::default()).await;
    let listener = CapturingListener::open(ws.platform.bus.clone(), &ALL_EVENTS);

    ws.annotate("jane", &ws.file, "Source?").await;

    assert_eq!(listener.captured_events().len(), 2);
    assert_eq!(listener.captured_of_type(COMMENT_ADDED).len(), 1);
    assert_eq!(listener.captured_of_type(DOCUMENT_CREATED).len(), 1);
}

#[tokio::test]
async fn events_are_not_delivered_before_commit() {
    let ws = Workspace::new(&AppConfig::default()).await;
    let listener = CapturingListener::open(ws.platform.bus.clone(), &ALL_EVENTS);

    ws.platform
        .create_annotation_handler()
        .handle(
            CreateAnnotationCommand {
                draft: AnnotationDraft::new(*ws.file.id(), "jane", "Source?", "file:content"),
            },
            metadata("jane"),
        )
        .await
        .unwrap();

    assert!(!listener.has_been_fired(COMMENT_ADDED));
    ws.platform.commit().await.unwrap();
    assert!(listener.has_been_fired(COMMENT_ADDED));
}

#[tokio::test]
async fn updating_an_annotation_fires_one_event_pair() {
    let ws = Workspace::new(&AppConfig::default()).await;
    let annotation = ws.annotate("jane", &ws.file, "Source?").await;
    let listener = CapturingListener::open(ws.platform.bus.clone(), &ALL_EVENTS);

    ws.platform
        .update_annotation_handler()
        .handle(
            UpdateAnnotationCommand {
                annotation_id: *annotation.id(),
                update: AnnotationUpdate::text("Source, please?"),
            },
            metadata("jane"),
        )
        .await
        .unwrap();
    ws.platform.commit().await.unwrap();

    assert_eq!(listener.captured_events().len(), 2);
    assert_eq!(listener.captured_of_type(COMMENT_UPDATED).len(), 1);
    assert_eq!(listener.captured_of_type(DOCUMENT_UPDATED).len(), 1);
    assert!(!listener.has_been_fired(COMMENT_ADDED));
}

#[tokio::test]
async fn removing_an_annotation_fires_one_event_pair() {
    let ws = Workspace::new(&AppConfig::default()).await;
    let annotation = ws.annotate("jane", &ws.file, "Source?").await;
    let listener = CapturingListener::open(ws.platform.bus.clone(), &ALL_EVENTS);

    ws.platform
        .delete_annotation_handler()
        .handle(
            DeleteAnnotationCommand {
                annotation_id: *annotation.id(),
            },
            metadata("jane"),
        )
        .await
        .unwrap();
    ws.platform.commit().await.unwrap();

    assert_eq!(listener.captured_events().len(), 2);
    assert_eq!(listener.captured_of_type(COMMENT_REMOVED).len(), 1);
    assert_eq!(listener.captured_of_type(DOCUMENT_REMOVED).len(), 1);
    assert!(!ws.platform.documents.exists(annotation.id()).await.unwrap());
}

// =============================================================================
// Mail
// =============================================================================

#[tokio::test]
async fn subscriber_receives_one_mail_per_comment() {
    let ws = Workspace::new(&AppConfig::default()).await;
    ws.subscribe(&user_key("john"), COMMENT_ADDED_NOTIFICATION, &ws.file).await;
    let seen = ws.platform.mail_box.sent_count();

    ws.annotate("jane", &ws.file, "Source?").await;

    let mails = ws.platform.mail_box.mails_since(seen);
    assert_eq!(mails.len(), 1);
    assert_eq!(mails[0].to, "john@example.com");
    assert_eq!(mails[0].subject, "New comment: Quarterly report");
    assert_eq!(mails[0].document_id, *ws.file.id());
    assert!(mails[0].body.contains("jane wrote:\nSource?"));
}

#[tokio::test]
async fn updating_an_annotation_mails_comment_updated_subscribers() {
    let ws = Workspace::new(&AppConfig::default()).await;
    ws.subscribe(&user_key("john"), COMMENT_UPDATED_NOTIFICATION, &ws.file).await;
    let annotation = ws.annotate("jane", &ws.file, "Source?").await;
    assert_eq!(ws.platform.mail_box.sent_count(), 0);
    let seen = ws.platform.mail_box.sent_count();

    ws.edit("jane", &annotation, "Source, please?").await;

    let mails = ws.platform.mail_box.mails_since(seen);
    assert_eq!(mails.len(), 1);
    assert_eq!(mails[0].to, "john@example.com");
    assert_eq!(mails[0].notification, COMMENT_UPDATED_NOTIFICATION);
    assert_eq!(mails[0].event_type, COMMENT_UPDATED);
    assert_eq!(mails[0].subject, "Comment updated: Quarterly report");
    assert_eq!(mails[0].document_id, *ws.file.id());
}

#[tokio::test]
async fn removing_an_annotation_mails_comment_removed_subscribers() {
    let ws = Workspace::new(&AppConfig::default()).await;
    ws.subscribe(&user_key("john"), COMMENT_REMOVED_NOTIFICATION, &ws.file).await;
    let annotation = ws.annotate("jane", &ws.file, "Source?").await;
    let seen = ws.platform.mail_box.sent_count();

    ws.remove("jane", &annotation).await;

    let mails = ws.platform.mail_box.mails_since(seen);
    assert_eq!(mails.len(), 1);
    assert_eq!(mails[0].to, "john@example.com");
    assert_eq!(mails[0].notification, COMMENT_REMOVED_NOTIFICATION);
    assert_eq!(mails[0].event_type, COMMENT_REMOVED);
    assert_eq!(mails[0].subject, "Comment removed: Quarterly report");
    assert_eq!(mails[0].document_id, *ws.file.id());
}

#[tokio::test]
async fn editing_an_annotation_does_not_trigger_modification_mail() {
    let ws = Workspace::new(&AppConfig::default()).await;
    ws.subscribe(&user_key("john"), MODIFICATION_NOTIFICATION, &ws.file).await;
    let annotation = ws.annotate("jane", &ws.file, "Source?").await;
    let seen = ws.platform.mail_box.sent_count();

    ws.edit("jane", &annotation, "Source, please?").await;
    assert!(ws.platform.mail_box.mails_since(seen).is_empty());
    assert_eq!(ws.platform.bus.committed_of_type(DOCUMENT_UPDATED).len(), 1);

    ws.platform
        .update_document_handler()
        .handle(
            UpdateDocumentCommand::new(*ws.file.id()).with_title("Quarterly report (final)"),
            metadata("Administrator"),
        )
        .await
        .unwrap();
    ws.platform.commit().await.unwrap();

    let mails = ws.platform.mail_box.mails_since(seen);
    assert_eq!(mails.len(), 1);
    assert_eq!(mails[0].notification, MODIFICATION_NOTIFICATION);
    assert_eq!(mails[0].event_type, DOCUMENT_UPDATED);
    assert_eq!(mails[0].document_id, *ws.file.id());
}

#[tokio::test]
async fn removed_subscription_no_longer_mails() {
    let ws = Workspace::new(&AppConfig::default()).await;
    let john = user_key("john");
    ws.subscribe(&john, COMMENT_ADDED_NOTIFICATION, &ws.file).await;
    ws.platform
        .notification_manager
        .remove_subscription(&john, COMMENT_ADDED_NOTIFICATION, ws.file.id())
        .await
        .unwrap();

    ws.annotate("jane", &ws.file, "Source?").await;

    assert_eq!(ws.platform.mail_box.sent_count(), 0);
}

#[tokio::test]
async fn reply_notifies_about_the_annotated_document() {
    let ws = Workspace::new(&AppConfig::default()).await;
    ws.subscribe(&user_key("john"), COMMENT_ADDED_NOTIFICATION, &ws.file).await;
    let question = ws.annotate("jane", &ws.file, "Source?").await;
    let question_doc = ws
        .platform
        .documents
        .find_by_id(question.id())
        .await
        .unwrap()
        .unwrap();
    let seen = ws.platform.mail_box.sent_count();

    ws.annotate("jane", &question_doc, "Found it, never mind.").await;

    let mails = ws.platform.mail_box.mails_since(seen);
    assert_eq!(mails.len(), 1);
    assert_eq!(mails[0].document_id, *ws.file.id());
    assert_eq!(mails[0].subject, "New comment: Quarterly report");
}

#[tokio::test]
async fn folder_subscription_covers_documents_inside() {
    let ws = Workspace::new(&AppConfig::default()).await;
    ws.subscribe(&user_key("john"), COMMENT_ADDED_NOTIFICATION, &ws.folder).await;

    ws.annotate("jane", &ws.file, "Source?").await;

    assert_eq!(ws.platform.mail_box.mails_to("john@example.com").len(), 1);
}

#[tokio::test]
async fn group_subscription_mails_every_member_once() {
    let ws = Workspace::new(&AppConfig::default()).await;
    ws.platform.directory.add_to_group("reviewers", "john").await;
    ws.platform.directory.add_to_group("reviewers", "jane").await;
    ws.subscribe(&SubscriberKey::Group("reviewers".into()), COMMENT_ADDED_NOTIFICATION, &ws.file)
        .await;
    ws.subscribe(&user_key("john"), COMMENT_ADDED_NOTIFICATION, &ws.file).await;

    ws.annotate("jane", &ws.file, "Source?").await;

    assert_eq!(ws.platform.mail_box.sent_count(), 2);
    assert_eq!(ws.platform.mail_box.mails_to("john@example.com").len(), 1);
    assert_eq!(ws.platform.mail_box.mails_to("jane@example.com").len(), 1);
}

#[tokio::test]
async fn annotations_do_not_trigger_creation_mail() {
    let ws = Workspace::new(&AppConfig::default()).await;
    ws.subscribe(&user_key("john"), CREATION_NOTIFICATION, &ws.folder).await;

    ws.annotate("jane", &ws.file, "Source?").await;
    assert_eq!(ws.platform.mail_box.sent_count(), 0);

    ws.platform
        .create_document_handler()
        .handle(
            CreateDocumentCommand::new(Some(*ws.folder.id()), "minutes", FILE_TYPE),
            metadata("Administrator"),
        )
        .await
        .unwrap();
    ws.platform.commit().await.unwrap();

    let mails = ws.platform.mail_box.mails();
    assert_eq!(mails.len(), 1);
    assert_eq!(mails[0].notification, CREATION_NOTIFICATION);
}

#[tokio::test]
async fn mail_failure_keeps_the_annotation() {
    struct BrokenRelay;

    #[async_trait]
    impl MailSender for BrokenRelay {
        async fn send(&self, _: &MailMessage) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::MailDeliveryFailed, "relay down"))
        }
    }

    let platform = Platform::with_mail_sender(
        &AppConfig::default(),
        Arc::new(BrokenRelay),
        Arc::new(CapturingMailBox::new()),
    );
    let ws = Workspace::with_platform(platform).await;
    ws.subscribe(&user_key("john"), COMMENT_ADDED_NOTIFICATION, &ws.file).await;

    let annotation = ws.annotate("jane", &ws.file, "Source?").await;

    assert!(ws.platform.documents.exists(annotation.id()).await.unwrap());
    assert_eq!(ws.platform.bus.committed_of_type(COMMENT_ADDED).len(), 1);
}

// =============================================================================
// Auto-subscription
// =============================================================================

#[tokio::test]
async fn john_keeps_explicit_subscriptions_and_removal_sticks() {
    let ws = Workspace::new(&auto_subscribe_config()).await;
    let john = user_key("john");
    ws.subscribe(&john, COMMENT_ADDED_NOTIFICATION, &ws.file).await;
    ws.subscribe(&john, COMMENT_UPDATED_NOTIFICATION, &ws.file).await;

    ws.annotate("john", &ws.file, "First pass done.").await;
    assert_eq!(
        ws.subscriptions_of("john").await,
        vec![COMMENT_ADDED_NOTIFICATION, COMMENT_UPDATED_NOTIFICATION]
    );

    for notification in [COMMENT_ADDED_NOTIFICATION, COMMENT_UPDATED_NOTIFICATION] {
        ws.platform
            .notification_manager
            .remove_subscription(&john, notification, ws.file.id())
            .await
            .unwrap();
    }
    ws.annotate("john", &ws.file, "Second pass done.").await;

    assert!(ws.subscriptions_of("john").await.is_empty());
}

#[tokio::test]
async fn author_is_auto_subscribed_once() {
    let ws = Workspace::new(&auto_subscribe_config()).await;

    ws.annotate("jane", &ws.file, "Source?").await;
    assert_eq!(ws.platform.mail_box.sent_count(), 0);
    assert_eq!(
        ws.subscriptions_of("jane").await,
        vec![COMMENT_ADDED_NOTIFICATION, COMMENT_UPDATED_NOTIFICATION]
    );

    ws.annotate("jane", &ws.file, "Still waiting.").await;
    ws.annotate("jane", &ws.file, "Found it.").await;

    assert_eq!(ws.platform.subscriptions.all().await.len(), 2);
    assert_eq!(ws.platform.mail_box.mails_to("jane@example.com").len(), 2);
}

#[tokio::test]
async fn auto_subscription_is_off_by_default() {
    let ws = Workspace::new(&AppConfig::default()).await;

    ws.annotate("jane", &ws.file, "Source?").await;

    assert!(ws.subscriptions_of("jane").await.is_empty());
}
