mod base_url;
mod client;
mod debug;
mod endpoints;
pub mod error;
pub mod transport;
mod types;

pub mod prelude {
    pub use crate::base_url::{
        BaseUrl, LOCAL_API_BASE_URL, Location, RuntimeEnv, SystemEnv, default_base_url,
        resolve_base_url,
    };
    pub use crate::client::{ApiClient, RequestOptions};
    pub use crate::debug::DebugLevel;
    pub use crate::error::{ApiError, FxError};
    pub use crate::transport::{
        BuiltRequest, ReqwestTransport, Transport, TransportError, TransportResponse,
    };
    pub use crate::types::{
        City, EducationLevel, Fund, FundDonateUrl, FundsPage, FundsQuery, MasterclassRequest,
        MentorshipRequest,
    };
}
