use common_errors::{Paged, Pagination};
use content_dao::ContactDao;
use content_errors::ContentError;
use content_queries::ListContactsQuery;
use content_responses::ContactResponse;
use dao_utils::PageParams;
use sql_connection::SqlConnect;
use tracing::instrument;

/// Inbox listing for the admin. Always read fresh; a stale unread flag is
/// worse than the extra query.
#[derive(Clone)]
pub struct ListContactsQueryHandler {
    contact_dao: ContactDao,
}

impl ListContactsQueryHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            contact_dao: ContactDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: ListContactsQuery,
    ) -> Result<Paged<ContactResponse>, ContentError> {
        let params = PageParams::new(query.page, query.limit);

        let items = self
            .contact_dao
            .find_page(query.unread_only, params.limit, params.offset())
            .await?;
        let total = self.contact_dao.count(query.unread_only).await?;

        Ok(Paged::new(
            items.into_iter().map(ContactResponse::from).collect(),
            Pagination::new(params.page, params.limit, total),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use content_command_handlers::{
        LogNotifier, MarkContactReadHandler, SubmitContactHandler,
    };
    use content_commands::{MarkContactReadCommand, SubmitContactCommand};
    use test_utils::*;

    use super::*;

    async fn setup() -> anyhow::Result<(
        TestPostgresContainer,
        SubmitContactHandler,
        MarkContactReadHandler,
        ListContactsQueryHandler,
    )> {
        let container = TestPostgresContainer::new().await?;
        let db = create_sql_connect(&container);

        Ok((
            container,
            SubmitContactHandler::new(db.clone(), Arc::new(LogNotifier)),
            MarkContactReadHandler::new(db.clone()),
            ListContactsQueryHandler::new(db),
        ))
    }

    fn message_from(name: &str) -> SubmitContactCommand {
        SubmitContactCommand {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            message: "hello".to_string(),
        }
    }

    #[tokio::test]
    async fn unread_filter_hides_handled_messages() {
        let (_container, submit, mark_read, list) = setup().await.unwrap();

        let first = submit.execute(message_from("Ada")).await.unwrap();
        submit.execute(message_from("Grace")).await.unwrap();

        mark_read
            .execute(MarkContactReadCommand {
                contact_id: first.id,
            })
            .await
            .unwrap();

        let unread = list
            .execute(ListContactsQuery {
                page: None,
                limit: None,
                unread_only: true,
            })
            .await
            .unwrap();
        assert_eq!(unread.items.len(), 1);
        assert_eq!(unread.items[0].name, "Grace");

        let everything = list
            .execute(ListContactsQuery {
                page: None,
                limit: None,
                unread_only: false,
            })
            .await
            .unwrap();
        assert_eq!(everything.items.len(), 2);
        assert_eq!(everything.pagination.total, 2);
    }

    #[tokio::test]
    async fn listing_is_newest_first_and_paginated() {
        let (_container, submit, _, list) = setup().await.unwrap();

        for name in ["First", "Second", "Third"] {
            submit.execute(message_from(name)).await.unwrap();
        }

        let page = list
            .execute(ListContactsQuery {
                page: Some(1),
                limit: Some(2),
                unread_only: false,
            })
            .await
            .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 2);
        assert_eq!(page.items[0].name, "Third");
    }
}
