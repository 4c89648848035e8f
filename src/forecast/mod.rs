pub mod handlers;
mod models;
mod query;
mod service;
mod view;

pub use models::{CurrentConditions, DayForecast, ForecastResult};
pub use query::LocationDefaults;
pub use service::{ForecastService, UpstreamConfig};
pub use view::ForecastView;
