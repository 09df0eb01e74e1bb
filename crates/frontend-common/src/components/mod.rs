mod error_banner;
mod spinner;

pub use error_banner::ErrorBanner;
pub use spinner::LoadingSpinner as Spinner;
