//! # Domain Models
//!
//! Typed values the source clients produce or accept.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Annunciator`] | Chamber display (`CommonsMain`, `LordsMain`) |
//! | [`AnnunciatorDate`] | `current` or an RFC3339 instant |
//! | [`MemberRef`] | Member named on an annunciator line |
//! | [`ForecastRow`] | One hourly forecast period |
//! | [`Timestamp`] | RFC3339 instant with its source offset |

mod forecast;
mod parliament;
mod timestamp;

pub use forecast::ForecastRow;
pub use parliament::{Annunciator, AnnunciatorDate, MemberRef};
pub use timestamp::Timestamp;
