pub mod moon;
pub mod snapshot;

pub use moon::{phase_emoji, phase_name_from_elongation, MoonPhaseInfo};
pub use snapshot::{snapshot, SkySnapshot};
