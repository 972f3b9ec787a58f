use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EducationLevel {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub city: String,
    pub recipient: String,
}

/// One page of the fund listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FundsPage {
    pub items: Vec<Fund>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FundDonateUrl {
    pub donate_url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MasterclassRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MentorshipRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_level_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Filter and paging parameters for the fund listing.
///
/// A parameter reaches the wire only when it carries a usable value:
/// empty strings and zero page numbers are treated as absent.
#[derive(Clone, Debug, Default)]
pub struct FundsQuery {
    pub city: Option<String>,
    pub recipient: Option<String>,
    pub page: Option<u32>,
    /// Sent under the wire name `page_size`.
    pub page_size: Option<u32>,
}

impl FundsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    #[inline]
    pub fn recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    #[inline]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[inline]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }
}
