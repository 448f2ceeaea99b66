pub mod feed_service;
pub mod plot_service;
pub mod render_service;
