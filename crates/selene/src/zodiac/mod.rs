pub mod calendar;
pub mod signs;

pub use calendar::sun_sign_for_date;
pub use signs::{normalize, sign_from_longitude, sign_index, EclipticPosition, Sign, SIGN_WIDTH};
