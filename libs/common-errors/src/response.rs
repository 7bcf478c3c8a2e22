use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Success envelope returned by every 2xx endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Always `true`
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
            pagination: None,
        }
    }

    pub fn with_message(data: T, message: &str) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.to_string()),
            pagination: None,
        }
    }

    pub fn paginated(data: T, pagination: Pagination) -> Self {
        Self {
            success: true,
            data,
            message: None,
            pagination: Some(pagination),
        }
    }
}

/// One page of a listing together with the pagination snapshot computed when
/// it was read. This is the unit that list endpoints cache; the envelope is
/// rebuilt around it on the way out.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Paged<T> {
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }
}

impl<T: Serialize> From<Paged<T>> for ApiResponse<Vec<T>> {
    fn from(page: Paged<T>) -> Self {
        ApiResponse::paginated(page.items, page.pagination)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(page: u64, limit: u64, total: i64) -> Self {
        let total = total.max(0) as u64;
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_envelope_omits_optional_fields() {
        let body = ApiResponse::new(vec![1, 2, 3]);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
        assert!(json.get("message").is_none());
        assert!(json.get("pagination").is_none());
    }

    #[test]
    fn paginated_envelope_uses_camel_case() {
        let body = ApiResponse::paginated(
            vec!["a"],
            Pagination::new(2, 10, 35),
        );
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["pagination"]["page"], 2);
        assert_eq!(json["pagination"]["limit"], 10);
        assert_eq!(json["pagination"]["total"], 35);
        assert_eq!(json["pagination"]["totalPages"], 4);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 10, 10).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 11).total_pages, 2);
    }
}
