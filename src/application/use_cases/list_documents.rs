use std::sync::Arc;

use crate::application::dto::{DocumentDto, ListRequest, ListResponse, SortField, SortOrder};
use crate::application::errors::DocumentUseCaseError;
use crate::application::ports::DocumentRepository;

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

/// Use case: list document metadata with pagination. Never returns content.
pub struct ListDocumentsUseCase {
    catalog: Arc<dyn DocumentRepository>,
}

impl ListDocumentsUseCase {
    pub fn new(catalog: Arc<dyn DocumentRepository>) -> Self {
        Self { catalog }
    }

    pub async fn execute(
        &self,
        request: ListRequest,
    ) -> Result<ListResponse, DocumentUseCaseError> {
        let page = request.page.unwrap_or(1).max(1);
        let limit = request.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

        let sort_field = match request.sort_by.as_deref() {
            Some(raw) => raw.parse::<SortField>()?,
            None => SortField::CreatedAt,
        };
        let sort_order = match request.sort_order.as_deref() {
            Some(raw) => raw.parse::<SortOrder>()?,
            None => SortOrder::Desc,
        };

        // Saturating: a page number far past the data must yield an empty
        // page, not an overflowing offset.
        let offset = page.saturating_sub(1).saturating_mul(limit);

        // The page and the aggregates have no ordering dependency.
        let (documents, total_count, total_size_bytes) = tokio::try_join!(
            self.catalog.find_page(offset, limit, sort_field, sort_order),
            self.catalog.count_all(),
            self.catalog.total_size_all(),
        )?;

        let total_pages = if total_count == 0 {
            0
        } else {
            (total_count + limit - 1) / limit
        };

        Ok(ListResponse {
            documents: documents.into_iter().map(DocumentDto::from).collect(),
            page,
            limit,
            total_count,
            total_size_bytes,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
        })
    }
}
