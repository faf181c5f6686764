//! Link service: use-cases for managing links between rooms.

use mudstore_domain::error::MudError;
use mudstore_domain::id::LinkId;
use mudstore_domain::link::{Link, LinkChange, LinkFilter};

use crate::ports::LinkStorage;

/// Application service for link CRUD operations.
pub struct LinkService<S> {
    storage: S,
}

impl<S: LinkStorage> LinkService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// List links, bounding the requested page to the link limits.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the port.
    #[tracing::instrument(skip(self))]
    pub async fn list_links(&self, filter: LinkFilter) -> Result<Vec<Link>, MudError> {
        let filter = filter.normalized();
        self.storage.list(&filter).await
    }

    /// Look up a link by id.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no link with `id` exists, or a
    /// storage error from the port.
    #[tracing::instrument(skip(self))]
    pub async fn get_link(&self, id: LinkId) -> Result<Link, MudError> {
        self.storage.get(id).await
    }

    /// Create a new link after validating the change.
    ///
    /// # Errors
    ///
    /// Returns [`MudError::Validation`] if invariants fail, or a storage
    /// error propagated from the port.
    #[tracing::instrument(skip(self, change), fields(link_name = %change.name))]
    pub async fn create_link(&self, change: LinkChange) -> Result<Link, MudError> {
        change.validate()?;
        self.storage.create(change).await
    }

    /// Update an existing link.
    ///
    /// # Errors
    ///
    /// Returns [`MudError::Validation`] if invariants fail, or a storage
    /// error from the port.
    #[tracing::instrument(skip(self, change), fields(link_name = %change.name))]
    pub async fn update_link(&self, id: LinkId, change: LinkChange) -> Result<Link, MudError> {
        change.validate()?;
        self.storage.update(id, change).await
    }

    /// Delete a link by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the port.
    #[tracing::instrument(skip(self))]
    pub async fn remove_link(&self, id: LinkId) -> Result<(), MudError> {
        self.storage.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mudstore_domain::error::{Action, Cause, EntityKind, ErrorKind, OperationError};
    use mudstore_domain::id::{PlayerId, RoomId};
    use mudstore_domain::page::Page;
    use std::future::Future;
    use std::sync::Mutex;

    /// Storage without any links; records the filters it receives.
    #[derive(Default)]
    struct EmptyLinkStorage {
        filters: Mutex<Vec<LinkFilter>>,
    }

    fn missing(action: Action, id: LinkId) -> MudError {
        OperationError::new(
            action,
            EntityKind::Link,
            Cause::NotFound {
                entity: EntityKind::Link,
                id: id.to_string(),
            },
        )
        .into()
    }

    impl LinkStorage for EmptyLinkStorage {
        fn list(
            &self,
            filter: &LinkFilter,
        ) -> impl Future<Output = Result<Vec<Link>, MudError>> + Send {
            self.filters.lock().unwrap().push(filter.clone());
            async { Ok(Vec::new()) }
        }

        fn get(&self, id: LinkId) -> impl Future<Output = Result<Link, MudError>> + Send {
            async move { Err(missing(Action::Get, id)) }
        }

        fn create(&self, _change: LinkChange) -> impl Future<Output = Result<Link, MudError>> + Send {
            let err = MudError::from(OperationError::new(
                Action::Create,
                EntityKind::Link,
                Cause::Internal("read-only".into()),
            ));
            async { Err(err) }
        }

        fn update(
            &self,
            id: LinkId,
            _change: LinkChange,
        ) -> impl Future<Output = Result<Link, MudError>> + Send {
            async move { Err(missing(Action::Update, id)) }
        }

        fn remove(&self, id: LinkId) -> impl Future<Output = Result<(), MudError>> + Send {
            async move { Err(missing(Action::Remove, id)) }
        }
    }

    fn make_service() -> LinkService<EmptyLinkStorage> {
        LinkService::new(EmptyLinkStorage::default())
    }

    #[tokio::test]
    async fn should_keep_predicates_when_bounding_page() {
        let svc = make_service();
        let destination = RoomId::new();

        svc.list_links(LinkFilter {
            destination_id: Some(destination),
            page: Page::new(0, 7),
            ..LinkFilter::default()
        })
        .await
        .unwrap();

        let filters = svc.storage.filters.lock().unwrap();
        assert_eq!(filters[0].destination_id, Some(destination));
        assert_eq!(filters[0].page, Page::new(0, 7));
    }

    #[tokio::test]
    async fn should_propagate_not_found_from_storage() {
        let svc = make_service();
        let result = svc.remove_link(LinkId::new()).await;
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn should_propagate_internal_failure_from_storage() {
        let svc = make_service();
        let change = LinkChange::new("north", PlayerId::new(), RoomId::new(), RoomId::new());
        let result = svc.create_link(change).await;
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Internal);
    }

    #[tokio::test]
    async fn should_reject_blank_name_before_update() {
        let svc = make_service();
        let change = LinkChange::new("", PlayerId::new(), RoomId::new(), RoomId::new());
        let result = svc.update_link(LinkId::new(), change).await;
        assert_eq!(result.unwrap_err().kind(), ErrorKind::BadRequest);
    }
}
