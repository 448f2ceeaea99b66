pub mod errors;
pub mod html;
pub mod time_scale;

pub use errors::NeoError;
pub use html::escape_html;
pub use time_scale::TimeScale;
