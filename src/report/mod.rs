// Report acquisition: fetch the diagnostic page, hand back raw HTML.

pub mod fetcher;
pub mod traits;

pub use fetcher::ReqwestFetcher;
pub use traits::ReportFetcher;
