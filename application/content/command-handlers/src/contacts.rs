use std::sync::Arc;

use async_trait::async_trait;
use content_commands::{
    DeleteContactCommand, MarkContactReadCommand, SubmitContactCommand,
};
use content_dao::ContactDao;
use content_errors::ContentError;
use content_models::{ContactMessage, NewContactMessage};
use content_responses::ContactResponse;
use dao_utils::spawn_detached;
use sql_connection::SqlConnect;
use tracing::instrument;

/// Failure surfaced by a notification backend.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}

/// Side channel told about new inbox messages.
///
/// Dispatch runs on a detached task after the message is stored; a failing
/// backend is logged and never reaches the sender.
#[async_trait]
pub trait ContactNotifier: Send + Sync {
    async fn message_received(
        &self, message: &ContactMessage,
    ) -> Result<(), NotifyError>;
}

/// Notifier that only writes to the log, for deployments without a mail
/// backend.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl ContactNotifier for LogNotifier {
    async fn message_received(
        &self, message: &ContactMessage,
    ) -> Result<(), NotifyError> {
        tracing::info!(
            contact.id = %message.id,
            contact.name = %message.name,
            "New contact message received"
        );
        Ok(())
    }
}

#[derive(Clone)]
pub struct SubmitContactHandler {
    contact_dao: ContactDao,
    notifier: Arc<dyn ContactNotifier>,
}

impl SubmitContactHandler {
    pub fn new(db: SqlConnect, notifier: Arc<dyn ContactNotifier>) -> Self {
        Self {
            contact_dao: ContactDao::new(db),
            notifier,
        }
    }

    #[instrument(skip_all)]
    pub async fn execute(
        &self, command: SubmitContactCommand,
    ) -> Result<ContactResponse, ContentError> {
        let saved = self
            .contact_dao
            .insert(NewContactMessage {
                name: command.name,
                email: command.email,
                message: command.message,
            })
            .await?;

        let notifier = self.notifier.clone();
        let message = saved.clone();
        spawn_detached("contact-notify", async move {
            notifier.message_received(&message).await
        });

        Ok(saved.into())
    }
}

#[derive(Clone)]
pub struct MarkContactReadHandler {
    contact_dao: ContactDao,
}

impl MarkContactReadHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            contact_dao: ContactDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: MarkContactReadCommand,
    ) -> Result<ContactResponse, ContentError> {
        let updated = self.contact_dao.mark_read(command.contact_id).await?;

        Ok(updated.into())
    }
}

#[derive(Clone)]
pub struct DeleteContactHandler {
    contact_dao: ContactDao,
}

impl DeleteContactHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            contact_dao: ContactDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: DeleteContactCommand,
    ) -> Result<(), ContentError> {
        self.contact_dao.delete(command.contact_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Mutex, time::Duration};

    use test_utils::*;
    use uuid::Uuid;

    use super::*;

    #[derive(Default)]
    struct RecordingNotifier {
        seen: Mutex<Vec<Uuid>>,
    }

    #[async_trait]
    impl ContactNotifier for RecordingNotifier {
        async fn message_received(
            &self, message: &ContactMessage,
        ) -> Result<(), NotifyError> {
            self.seen.lock().unwrap().push(message.id);
            Ok(())
        }
    }

    fn sample_command() -> SubmitContactCommand {
        SubmitContactCommand {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Interested in a collaboration".to_string(),
        }
    }

    #[tokio::test]
    async fn submit_stores_message_and_notifies() {
        let container = TestPostgresContainer::new().await.unwrap();
        let db = create_sql_connect(&container);
        let notifier = Arc::new(RecordingNotifier::default());
        let handler = SubmitContactHandler::new(db, notifier.clone());

        let saved = handler.execute(sample_command()).await.unwrap();
        assert_eq!(saved.email, "ada@example.com");
        assert!(!saved.read);

        // Notification runs detached; give it a moment to land.
        let mut tries = 0;
        while notifier.seen.lock().unwrap().is_empty() && tries < 50 {
            tokio::time::sleep(Duration::from_millis(20)).await;
            tries += 1;
        }
        assert_eq!(*notifier.seen.lock().unwrap(), vec![saved.id]);
    }

    #[tokio::test]
    async fn mark_read_is_idempotent() {
        let container = TestPostgresContainer::new().await.unwrap();
        let db = create_sql_connect(&container);
        let submit = SubmitContactHandler::new(
            db.clone(),
            Arc::new(RecordingNotifier::default()),
        );
        let mark_read = MarkContactReadHandler::new(db);

        let saved = submit.execute(sample_command()).await.unwrap();

        let first = mark_read
            .execute(MarkContactReadCommand {
                contact_id: saved.id,
            })
            .await
            .unwrap();
        assert!(first.read);

        let second = mark_read
            .execute(MarkContactReadCommand {
                contact_id: saved.id,
            })
            .await
            .unwrap();
        assert!(second.read);
    }

    #[tokio::test]
    async fn delete_then_mark_read_reports_not_found() {
        let container = TestPostgresContainer::new().await.unwrap();
        let db = create_sql_connect(&container);
        let submit = SubmitContactHandler::new(
            db.clone(),
            Arc::new(RecordingNotifier::default()),
        );
        let mark_read = MarkContactReadHandler::new(db.clone());
        let delete = DeleteContactHandler::new(db);

        let saved = submit.execute(sample_command()).await.unwrap();
        delete
            .execute(DeleteContactCommand {
                contact_id: saved.id,
            })
            .await
            .unwrap();

        let result = mark_read
            .execute(MarkContactReadCommand {
                contact_id: saved.id,
            })
            .await;
        assert!(matches!(
            result,
            Err(ContentError::ContactNotFound { .. })
        ));
    }
}
