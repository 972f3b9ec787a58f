//! Endpoint wrappers: parameter marshaling over [`ApiClient::request`].
//!
//! Every operation here is a thin adapter that builds a path/options pair
//! and delegates to the pipeline, inheriting its contract unchanged.

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{
    City, EducationLevel, FundDonateUrl, FundsPage, FundsQuery, MasterclassRequest,
    MentorshipRequest,
};
use bytes::Bytes;
use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::form_urlencoded;

impl<T: Transport> ApiClient<T> {
    pub async fn cities(&self) -> Result<Vec<City>, ApiError> {
        self.request_json("/common/cities", RequestOptions::default())
            .await
    }

    pub async fn education_levels(&self) -> Result<Vec<EducationLevel>, ApiError> {
        self.request_json("/common/education", RequestOptions::default())
            .await
    }

    pub async fn list_funds(&self, query: &FundsQuery) -> Result<FundsPage, ApiError> {
        self.request_json(&funds_path(query), RequestOptions::default())
            .await
    }

    pub async fn fund_donate_url(&self, slug: &str) -> Result<FundDonateUrl, ApiError> {
        let path = format!("/funds/{}/donate-url", encode_path_segment(slug));
        self.request_json(&path, RequestOptions::default()).await
    }

    pub async fn create_masterclass_request(
        &self,
        payload: &MasterclassRequest,
    ) -> Result<(), ApiError> {
        self.submit("/masterclass/request", payload).await
    }

    pub async fn create_mentorship_request(
        &self,
        payload: &MentorshipRequest,
    ) -> Result<(), ApiError> {
        self.submit("/mentorship/request", payload).await
    }

    // A 204 where the result type needs a body is a contract violation by
    // the backend, not a value.
    async fn request_json<R>(&self, path: &str, options: RequestOptions) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        match self.request(path, options).await? {
            Some(value) => Ok(value),
            None => Err(ApiError::UnexpectedNoContent {
                path: path.to_string(),
            }),
        }
    }

    /// Form submissions accept a 204 or any JSON success body; the body is
    /// discarded either way.
    async fn submit<P: Serialize>(&self, path: &str, payload: &P) -> Result<(), ApiError> {
        let body = Bytes::from(serde_json::to_vec(payload)?);
        let options = RequestOptions::default().method(Method::POST).body(body);
        self.request::<serde_json::Value>(path, options).await?;
        Ok(())
    }
}

fn funds_path(query: &FundsQuery) -> String {
    let mut pairs = form_urlencoded::Serializer::new(String::new());
    if let Some(city) = query.city.as_deref().filter(|v| !v.is_empty()) {
        pairs.append_pair("city", city);
    }
    if let Some(recipient) = query.recipient.as_deref().filter(|v| !v.is_empty()) {
        pairs.append_pair("recipient", recipient);
    }
    if let Some(page) = query.page.filter(|v| *v > 0) {
        pairs.append_pair("page", &page.to_string());
    }
    if let Some(page_size) = query.page_size.filter(|v| *v > 0) {
        pairs.append_pair("page_size", &page_size.to_string());
    }
    let qs = pairs.finish();
    if qs.is_empty() {
        "/funds".to_string()
    } else {
        format!("/funds?{qs}")
    }
}

// Single-segment semantics for dynamic path pieces.
// RFC3986 "unreserved": ALPHA / DIGIT / "-" / "." / "_" / "~"
fn encode_path_segment(seg: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let bytes = seg.as_bytes();
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        let unreserved = matches!(
          b,
          b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~'
        );
        if unreserved {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(HEX[(b >> 4) as usize] as char);
            out.push(HEX[(b & 0x0F) as usize] as char);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn funds_path_includes_only_supplied_params() {
        let query = FundsQuery::new().city("Moscow").page(2);
        assert_eq!(funds_path(&query), "/funds?city=Moscow&page=2");
    }

    #[test]
    fn funds_path_with_no_params_has_no_query() {
        assert_eq!(funds_path(&FundsQuery::new()), "/funds");
    }

    #[test]
    fn funds_path_sends_snake_case_page_size() {
        let query = FundsQuery::new().page_size(50);
        assert_eq!(funds_path(&query), "/funds?page_size=50");
    }

    #[test]
    fn funds_path_omits_empty_strings_and_zero_pages() {
        let query = FundsQuery::new().city("").recipient("").page(0).page_size(0);
        assert_eq!(funds_path(&query), "/funds");
    }

    #[test]
    fn funds_path_encodes_values() {
        let query = FundsQuery::new().city("Nizhny Novgorod");
        assert_eq!(funds_path(&query), "/funds?city=Nizhny+Novgorod");
    }

    #[test]
    fn path_segment_keeps_unreserved_bytes() {
        assert_eq!(encode_path_segment("fond-dobro_2024"), "fond-dobro_2024");
    }

    #[test]
    fn path_segment_escapes_reserved_bytes() {
        assert_eq!(encode_path_segment("a b/c"), "a%20b%2Fc");
    }
}
