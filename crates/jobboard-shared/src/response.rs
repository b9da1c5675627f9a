//! The uniform response envelope.
//!
//! Every endpoint answers `{success, message, object?, errors?}`; paginated
//! endpoints put `{items, total, page, size, pages}` in `object`.

use serde::{Deserialize, Serialize};

/// Standard response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(message: impl Into<String>, object: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            object: Some(object),
            errors: None,
        }
    }

    pub fn fail(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            object: None,
            errors: Some(errors),
        }
    }
}

impl Envelope<serde_json::Value> {
    /// Success with no payload.
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            object: None,
            errors: None,
        }
    }
}

/// Paginated payload carried in `Envelope::object`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageObject<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub size: u64,
    pub pages: u64,
}

impl<T> PageObject<T> {
    /// Build a page; `pages` is the ceiling of total / size.
    pub fn new(items: Vec<T>, total: u64, page: u64, size: u64) -> Self {
        let pages = if size == 0 { 0 } else { total.div_ceil(size) };
        Self {
            items,
            total,
            page,
            size,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_rounding() {
        let page: PageObject<u32> = PageObject::new(vec![], 25, 1, 10);
        assert_eq!(page.pages, 3);

        let page: PageObject<u32> = PageObject::new(vec![], 30, 1, 10);
        assert_eq!(page.pages, 3);

        let page: PageObject<u32> = PageObject::new(vec![], 0, 1, 10);
        assert_eq!(page.pages, 0);

        let page: PageObject<u32> = PageObject::new(vec![], 1, 1, 100);
        assert_eq!(page.pages, 1);
    }

    #[test]
    fn test_success_envelope_omits_errors() {
        let envelope = Envelope::ok("Job created", serde_json::json!({"job_id": 1}));
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Job created");
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_failure_envelope_omits_object() {
        let envelope: Envelope<serde_json::Value> =
            Envelope::fail("Job not found", vec!["No job".to_string()]);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("object").is_none());
        assert_eq!(json["errors"][0], "No job");
    }
}
